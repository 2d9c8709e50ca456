mod utils;

mod session_tests;
