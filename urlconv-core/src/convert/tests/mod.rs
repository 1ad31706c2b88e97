mod converter_tests;
