mod argument_set_tests;
mod execution_plan_builder_tests;
