mod app_tests;
mod config_tests;
