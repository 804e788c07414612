mod variable_binder_tests;
