//! The chat session and the safety framing around each turn.
//!
//! ```text
//! SessionController::submit()
//!   ├─ ConversationSession::append(user)
//!   ├─ KeywordMatcher::detect        → emergency notice
//!   ├─ LlmProvider::complete(history, GenerationConfig)
//!   └─ FooterComposer::decorate      → ConversationSession::append(assistant)
//! ```

pub mod controller;
pub mod generation;
pub mod safety;
pub mod session;

pub use controller::{Presenter, SessionController, TurnError, TurnOutcome, TurnState};
pub use generation::{GenerationConfig, SettingError};
pub use safety::{FooterComposer, KeywordMatcher};
pub use session::{ConversationSession, Message, Role, SessionError};

/// Persona instruction seeded at index 0 of every session.
pub const SYSTEM_PROMPT: &str = concat!(
    "You are MED-INTEL, a careful, evidence-informed healthcare assistant. ",
    "Provide clear, structured answers in simple language. ",
    "When relevant, include typical symptoms, red flags, differential considerations, ",
    "self-care guidance, and when to seek in-person care. ",
    "Cite authoritative public sources (e.g., WHO/CDC/NHS) in plain text when possible. ",
    "NEVER give definitive diagnoses, prescriptions, or instructions that require a clinician. ",
    "ALWAYS include: 'I am not a doctor—this is not medical advice.' ",
    "If user shares sensitive info, be respectful and privacy-conscious. ",
    "If the query suggests an emergency, urge immediate in-person care.",
);
