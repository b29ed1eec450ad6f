//! Turn orchestration for one console session.
//!
//! ```text
//!   Idle ──submit──▶ AwaitingResponse ──ok──▶ Idle
//!    ▲                     │
//!    │                     └──err──▶ Errored
//!    └──────── next submit ─────────────┘
//! ```
//!
//! `Errored` is where a failed turn rests, so callers can see the last turn
//! failed; the next submission leaves it through `Idle`.
//!
//! A turn appends the user message, raises the emergency notice when a
//! red-flag phrase matches, calls the provider with the full history, then
//! either appends the decorated answer or reports the error. A failed turn
//! leaves no assistant message behind.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm::{LlmProvider, ProviderError};

use super::generation::GenerationConfig;
use super::safety::{FooterComposer, KeywordMatcher, EMERGENCY_NOTICE};
use super::session::{ConversationSession, Role, SessionError};

pub const MISSING_CREDENTIAL_TEXT: &str =
    "No API key detected. Set the environment variable `OPENAI_API_KEY` and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingResponse,
    Errored,
}

/// Why a turn produced no assistant message.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("No API key detected. Set the environment variable `OPENAI_API_KEY` and try again.")]
    MissingCredential,
    #[error("API error: {0}")]
    Provider(String),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl From<ProviderError> for TurnError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredential => TurnError::MissingCredential,
            ProviderError::Request(msg) => TurnError::Provider(msg),
            other => TurnError::Provider(other.to_string()),
        }
    }
}

/// Result of one submitted turn.
#[derive(Debug)]
pub struct TurnOutcome {
    /// The emergency notice was raised for this input.
    pub emergency: bool,
    /// Decorated assistant text, or the error shown instead.
    pub reply: Result<String, TurnError>,
}

/// Presentation-side callbacks. Invoked in order during a turn:
/// `emergency_notice` (optional), `thinking`, then exactly one of
/// `assistant_reply` / `turn_error`.
pub trait Presenter {
    fn emergency_notice(&mut self, notice: &str);
    fn thinking(&mut self) {}
    fn assistant_reply(&mut self, text: &str);
    fn turn_error(&mut self, text: &str);
}

pub struct SessionController {
    session: ConversationSession,
    provider: LlmProvider,
    generation: GenerationConfig,
    matcher: KeywordMatcher,
    footer: FooterComposer,
    state: TurnState,
}

impl SessionController {
    pub fn new(system_prompt: &str, provider: LlmProvider, generation: GenerationConfig) -> Self {
        Self {
            session: ConversationSession::create(system_prompt),
            provider,
            generation,
            matcher: KeywordMatcher::default(),
            footer: FooterComposer,
            state: TurnState::Idle,
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }

    /// Settings changes apply from the next turn on.
    pub fn generation_mut(&mut self) -> &mut GenerationConfig {
        &mut self.generation
    }

    /// Run one turn. Returns `None` for blank input, which starts no turn.
    ///
    /// Takes `&mut self`, so a second submission cannot start while one is
    /// awaiting the provider.
    pub async fn submit<P: Presenter>(&mut self, input: &str, presenter: &mut P) -> Option<TurnOutcome> {
        if input.trim().is_empty() {
            return None;
        }
        if self.state == TurnState::Errored {
            self.state = TurnState::Idle;
        }

        if let Err(e) = self.session.append(Role::User, input) {
            // Unreachable with a fixed role, but never let it escape the turn.
            let err = TurnError::from(e);
            presenter.turn_error(&err.to_string());
            return Some(TurnOutcome { emergency: false, reply: Err(err) });
        }

        let emergency = self.matcher.detect(input);
        if emergency {
            warn!(phrases = ?self.matcher.matches(input), "emergency phrase detected");
            presenter.emergency_notice(EMERGENCY_NOTICE);
        }

        self.state = TurnState::AwaitingResponse;
        presenter.thinking();
        debug!(
            history = self.session.len(),
            provider = %self.provider.describe(),
            "turn submitted"
        );

        let completion = self.provider.complete(self.session.history(), &self.generation).await;
        let reply = match completion {
            Ok(answer) => {
                let decorated = self
                    .footer
                    .decorate(&answer, self.generation.include_source_suggestions());
                self.record_answer(decorated)
            }
            Err(e) => Err(TurnError::from(e)),
        };

        match &reply {
            Ok(text) => {
                self.state = TurnState::Idle;
                info!(history = self.session.len(), "turn completed");
                presenter.assistant_reply(text);
            }
            Err(err) => {
                self.state = TurnState::Errored;
                warn!(error = %err, "turn failed");
                presenter.turn_error(&err.to_string());
            }
        }

        Some(TurnOutcome { emergency, reply })
    }

    fn record_answer(&mut self, decorated: String) -> Result<String, TurnError> {
        let msg = self.session.append(Role::Assistant, decorated)?;
        Ok(msg.content().to_string())
    }
}
