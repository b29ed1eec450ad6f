// Library root: exposes the session, safety and provider layers to the binary
// and to integration tests. The binary entry point is src/main.rs.

pub mod bootstrap;
pub mod chat;
pub mod comms;
pub mod core;
pub mod llm;

pub use crate::core::{config, error};
pub use bootstrap::logger;
