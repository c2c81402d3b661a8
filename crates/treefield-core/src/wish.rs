//! Boundary to the remote text-generation service that writes holiday wishes.
//!
//! The service is a collaborator: callers implement [`WishGenerator`] (or
//! produce a `Result` some other way, e.g. from a JS promise) and pass the
//! outcome through [`resolve_wish`], which always yields displayable text.

use thiserror::Error;

/// Shown when the service answers with nothing.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "May your holidays shine with the brilliance of gold and the peace of emerald nights.";
/// Shown when the call fails outright.
pub const ERROR_FALLBACK: &str = "Wishing you a season of grandeur and timeless beauty.";

/// Default budget for one generation call.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Elegant,
    Warm,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Elegant => "elegant",
            Tone::Warm => "warm",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elegant" => Some(Tone::Elegant),
            "warm" => Some(Tone::Warm),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WishRequest {
    recipient: String,
    pub tone: Tone,
}

impl WishRequest {
    /// `None` for a blank recipient; there is nobody to address.
    pub fn new(recipient: &str, tone: Tone) -> Option<Self> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return None;
        }
        Some(Self {
            recipient: recipient.to_string(),
            tone,
        })
    }

    /// Build a request from raw UI input. Unknown tones fall back to
    /// [`Tone::Elegant`]; a blank recipient yields `None`.
    pub fn from_input(recipient: &str, tone: &str) -> Option<Self> {
        Self::new(recipient, Tone::parse(tone).unwrap_or(Tone::Elegant))
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn prompt(&self) -> String {
        format!(
            "Write a very short, sophisticated, and luxurious Christmas wish for \"{}\".\n\
             The tone should be {}.\n\
             Use metaphoric language evoking gold, starlight, emeralds, and timeless elegance.\n\
             Max 2 sentences.\n\
             Do not use emojis.",
            self.recipient,
            self.tone.as_str()
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WishError {
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("empty response")]
    EmptyResponse,
    #[error("timed out after {millis} ms")]
    Timeout { millis: u32 },
}

pub trait WishGenerator {
    fn generate(&self, request: &WishRequest) -> Result<String, WishError>;
}

impl<F> WishGenerator for F
where
    F: Fn(&WishRequest) -> Result<String, WishError>,
{
    fn generate(&self, request: &WishRequest) -> Result<String, WishError> {
        self(request)
    }
}

/// Collapse a service outcome to display text. Never fails.
pub fn resolve_wish(outcome: Result<String, WishError>) -> String {
    match outcome {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                EMPTY_RESPONSE_FALLBACK.to_string()
            } else {
                text.to_string()
            }
        }
        Err(WishError::EmptyResponse) => EMPTY_RESPONSE_FALLBACK.to_string(),
        Err(err) => {
            log::warn!("wish generation failed: {}", err);
            ERROR_FALLBACK.to_string()
        }
    }
}

pub fn generate_wish<G: WishGenerator + ?Sized>(generator: &G, request: &WishRequest) -> String {
    resolve_wish(generator.generate(request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_recipient_rejected() {
        assert!(WishRequest::new("   ", Tone::Elegant).is_none());
        assert_eq!(WishRequest::new(" Ada ", Tone::Warm).unwrap().recipient(), "Ada");
    }

    #[test]
    fn test_prompt_mentions_recipient_and_tone() {
        let prompt = WishRequest::new("Grace", Tone::Warm).unwrap().prompt();
        assert!(prompt.contains("\"Grace\""));
        assert!(prompt.contains("The tone should be warm."));
    }

    #[test]
    fn test_tone_parse() {
        assert_eq!(Tone::parse("Elegant"), Some(Tone::Elegant));
        assert_eq!(Tone::parse("grand"), None);
    }

    #[test]
    fn test_resolve_trims_success() {
        assert_eq!(resolve_wish(Ok("  Joy.\n".to_string())), "Joy.");
    }

    #[test]
    fn test_resolve_empty_and_errors() {
        assert_eq!(resolve_wish(Ok("   ".to_string())), EMPTY_RESPONSE_FALLBACK);
        assert_eq!(resolve_wish(Err(WishError::EmptyResponse)), EMPTY_RESPONSE_FALLBACK);
        for err in [
            WishError::Network("offline".into()),
            WishError::MalformedResponse("not text".into()),
            WishError::Timeout { millis: 10 },
        ] {
            assert_eq!(resolve_wish(Err(err)), ERROR_FALLBACK);
        }
    }
}
