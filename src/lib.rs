// Declare all modules that are part of this library
pub mod api;
pub mod config;
pub mod interaction;
pub mod parsing;
pub mod types;
pub mod worker;
