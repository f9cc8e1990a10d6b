//! Integration test modules.

mod athlete_day_test;
mod cli_test;
mod config_test;
