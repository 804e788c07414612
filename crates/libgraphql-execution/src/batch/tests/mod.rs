mod batch_reconciler_tests;
