//! Safety framing around each turn: emergency-phrase detection on the way in,
//! disclaimer and source footer on the way out.

/// Red-flag phrases. Matched as lowercase substrings of the user's input.
pub const EMERGENCY_PHRASES: &[&str] = &[
    "chest pain",
    "pressure in chest",
    "heart attack",
    "stroke",
    "suicidal",
    "suicide",
    "homicidal",
    "overdose",
    "fainting",
    "severe bleeding",
    "difficulty breathing",
    "shortness of breath",
    "not breathing",
    "seizure",
    "confusion new",
    "slurred speech",
    "one-sided weakness",
    "anaphylaxis",
    "severe allergic",
    "burn large",
];

pub const EMERGENCY_NOTICE: &str = "🚨 This may be a medical emergency. \
    Please call your local emergency number or seek in-person care now.";

pub const DISCLAIMER: &str = "I am not a doctor—this is not medical advice.";

pub const SOURCE_ORGANIZATIONS: &[&str] = &["WHO", "CDC", "NHS", "MedlinePlus"];

/// Detects emergency phrases in free text.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    phrases: &'static [&'static str],
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self { phrases: EMERGENCY_PHRASES }
    }
}

impl KeywordMatcher {
    /// `true` iff any phrase occurs in the lowercased `text`.
    pub fn detect(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.phrases.iter().any(|p| lowered.contains(p))
    }

    /// The phrases that fired, in table order.
    pub fn matches(&self, text: &str) -> Vec<&'static str> {
        let lowered = text.to_lowercase();
        self.phrases.iter().copied().filter(|p| lowered.contains(p)).collect()
    }
}

/// Appends the disclaimer and optional source suggestions to an answer.
#[derive(Debug, Clone, Default)]
pub struct FooterComposer;

impl FooterComposer {
    pub fn decorate(&self, answer: &str, include_sources: bool) -> String {
        let mut out = String::with_capacity(answer.len() + 128);
        out.push_str(answer.trim());
        out.push_str("\n\n—\n");
        out.push_str(DISCLAIMER);
        if include_sources {
            out.push_str("\nFor reputable information, see: ");
            out.push_str(&SOURCE_ORGANIZATIONS.join(", "));
            out.push('.');
        }
        out
    }
}
