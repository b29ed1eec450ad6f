//! End-to-end turn behaviour through the public API with offline providers.

use med_intel::chat::{
    GenerationConfig, Presenter, Role, SessionController, TurnError, SYSTEM_PROMPT,
};
use med_intel::config::Config;
use med_intel::llm::providers;

#[derive(Default)]
struct Collect {
    notices: usize,
    replies: Vec<String>,
    errors: Vec<String>,
}

impl Presenter for Collect {
    fn emergency_notice(&mut self, _notice: &str) {
        self.notices += 1;
    }
    fn assistant_reply(&mut self, text: &str) {
        self.replies.push(text.to_string());
    }
    fn turn_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

fn controller_for(provider: &str, api_key: Option<&str>) -> SessionController {
    let mut cfg = Config::test_default();
    cfg.llm.provider = provider.to_string();
    let p = providers::build(&cfg.llm, api_key.map(str::to_string)).unwrap();
    SessionController::new(SYSTEM_PROMPT, p, GenerationConfig::default())
}

#[tokio::test]
async fn n_successful_turns_alternate_user_assistant() {
    let mut c = controller_for("dummy", None);
    let mut out = Collect::default();
    let inputs = ["I have a headache", "It started yesterday", "Should I take ibuprofen?"];

    for input in inputs {
        c.submit(input, &mut out).await.unwrap().reply.unwrap();
    }

    let history = c.session().history();
    assert_eq!(history.len(), 1 + 2 * inputs.len());
    assert_eq!(history[0].role(), Role::System);
    assert_eq!(history[0].content(), SYSTEM_PROMPT);
    for (i, m) in history[1..].iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert_eq!(m.role(), expected, "message {}", i + 1);
    }
    for (i, input) in inputs.iter().enumerate() {
        assert_eq!(history[1 + 2 * i].content(), *input);
    }
    assert_eq!(out.replies.len(), 3);
    assert_eq!(out.notices, 0);
}

#[tokio::test]
async fn failed_turn_grows_history_by_one() {
    // OpenAI provider without a key: fails before any network I/O.
    let mut c = controller_for("openai", None);
    let mut out = Collect::default();

    let outcome = c.submit("Shortness of breath after running", &mut out).await.unwrap();
    assert!(outcome.emergency);
    assert!(matches!(outcome.reply, Err(TurnError::MissingCredential)));
    assert_eq!(c.session().len(), 2);
    assert_eq!(out.notices, 1);
    assert!(out.errors[0].contains("OPENAI_API_KEY"));

    c.submit("still there?", &mut out).await.unwrap();
    assert_eq!(c.session().len(), 3);
    assert!(c.session().transcript().iter().all(|m| m.role() == Role::User));
}

#[tokio::test]
async fn transport_failure_is_reported_as_api_error() {
    let mut cfg = Config::test_default();
    cfg.llm.provider = "openai".into();
    // Nothing listens on port 1.
    cfg.llm.openai.api_base_url = "http://127.0.0.1:1/v1/chat/completions".into();
    let p = providers::build(&cfg.llm, Some("sk-test".into())).unwrap();
    let mut c = SessionController::new(SYSTEM_PROMPT, p, GenerationConfig::default());
    let mut out = Collect::default();

    let outcome = c.submit("hello", &mut out).await.unwrap();
    assert!(matches!(outcome.reply, Err(TurnError::Provider(_))));
    assert!(out.errors[0].starts_with("API error: "));
    assert_eq!(c.session().len(), 2);
}
