//! Process bootstrap helpers run before the console starts.

pub mod logger;
