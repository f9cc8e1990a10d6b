//! Unit test modules.

mod pacing_test;
mod training_load_test;
