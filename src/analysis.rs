//! AI workload analysis via the Google Gemini API.
//!
//! One best-effort outbound call: the schedule digest is wrapped in a fixed
//! instruction preamble and sent to the text-generation endpoint, and the
//! returned markdown is handed back verbatim. Every failure mode degrades to
//! a canned human-readable string; nothing here returns an error to the
//! caller. A missing API key short-circuits before any request is built.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Returned when no API key is configured. No request is made.
pub const MISSING_KEY_MESSAGE: &str =
    "API key is missing. Set GEMINI_API_KEY to use AI features.";

/// Returned for any transport or response-shape failure.
pub const FAILURE_MESSAGE: &str =
    "An error occurred while analysing your schedule. Please try again.";

/// Returned when the endpoint answers but carries no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Could not generate analysis.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the schedule-analysis call.
pub struct Analyst {
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl Analyst {
    /// Build an analyst from the `GEMINI_API_KEY` environment variable.
    /// An unset or empty variable leaves the analyst keyless.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        Analyst {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Build an analyst with an explicit key and endpoint.
    pub fn new(api_key: Option<String>, base_url: String, model: String) -> Self {
        Analyst {
            api_key,
            base_url,
            model,
        }
    }

    /// Whether a credential is configured.
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Analyse a schedule digest, blocking until the endpoint responds.
    ///
    /// Always resolves to a displayable string: the analysis markdown on
    /// success, otherwise one of the canned messages. Failures are logged
    /// as diagnostics and never surfaced.
    pub fn analyze(&self, digest: &str) -> String {
        let Some(key) = self.api_key.as_deref() else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        let prompt = format!(
            "You are a productivity expert assistant. Analyse the following list of tasks \
             and provide a concise, 3-bullet point summary of the workload. Focus on \
             potential bottlenecks, the balance between work/personal life, duration of \
             tasks, and urgent items.\n\nTask List:\n{digest}\n\nOutput strictly in \
             markdown format."
        );

        match self.request(key, &prompt) {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(e) => {
                eprintln!("Gemini API error: {e}");
                FAILURE_MESSAGE.to_string()
            }
        }
    }

    fn request(&self, key: &str, prompt: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let response: GenerateResponse = client
            .post(&url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty()))
    }
}

/// Run the analysis on a background thread, delivering the resulting string
/// through the returned channel. The store stays fully usable while the
/// request is in flight; the caller owns the single in-flight slot.
pub fn spawn_analysis(analyst: Analyst, digest: String) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // A dropped receiver just discards the result.
        let _ = tx.send(analyst.analyze(&digest));
    });
    rx
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}
