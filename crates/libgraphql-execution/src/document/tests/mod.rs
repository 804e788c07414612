mod document_constructor_tests;
