mod prompt_builder_test;
