//! Presentation channels. The console is the only one.

pub mod console;

pub use console::run_console;
