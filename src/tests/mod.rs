mod error_tests;
mod params_tests;
