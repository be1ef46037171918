//! Utilities shared by the Tuganire client binaries and tests.

pub mod logger;
pub mod paths;
pub mod time;
