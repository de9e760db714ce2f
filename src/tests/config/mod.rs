//! Config module tests.

mod replay_tests;
mod spec_tests;
