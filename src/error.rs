use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can end a run early.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to parse config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Bad response, please report me about this! ({0})")]
    ResponseFormat(String),

    /// Messages reported by the API in its `error` body.
    #[error("{}", application_message(.0))]
    Application(Vec<String>),

    #[error("{0}")]
    Unsupported(&'static str),

    #[error("Failed to read input: {0}")]
    Prompt(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("{0}")]
    Usage(String),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 2,
            _ => 1,
        }
    }

    /// Lines to print on stderr, one per message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Application(messages)
                if messages.iter().any(|message| !message.trim().is_empty()) =>
            {
                messages.clone()
            }
            other => vec![other.to_string()],
        }
    }
}

const GENERIC_API_ERROR: &str = "The API returned an error";

fn application_message(messages: &[String]) -> String {
    if messages.iter().all(|message| message.trim().is_empty()) {
        return GENERIC_API_ERROR.to_string();
    }
    messages.join("\n")
}

impl From<reqwest::Error> for AppError {
    // The request URL carries the credential digest.
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.without_url().to_string())
    }
}
