use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::{self, BufRead, Write};

use crate::error::AppError;

/// Where missing values come from when no flag, env var or config default set them.
pub trait Prompt {
    fn read_line(&mut self, label: &str) -> Result<String, AppError>;
    fn read_secret(&mut self, label: &str) -> Result<String, AppError>;
}

/// Prompts on stderr and reads from stdin; passwords are read without echo.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, label: &str) -> Result<String, AppError> {
        let stdin = io::stdin();
        read_prompted_line(&mut stdin.lock(), &mut io::stderr(), label)
    }

    fn read_secret(&mut self, label: &str) -> Result<String, AppError> {
        // dialoguer moves to a fresh line once input is done.
        dialoguer::Password::new()
            .with_prompt(format!("Type {label}"))
            .allow_empty_password(true)
            .interact()
            .map_err(|err| AppError::Prompt(err.to_string()))
    }
}

fn read_prompted_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String, AppError> {
    write!(output, "Type {label}: ").map_err(|err| AppError::Prompt(err.to_string()))?;
    output.flush().map_err(|err| AppError::Prompt(err.to_string()))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|err| AppError::Prompt(err.to_string()))?;
    if read == 0 {
        return Err(AppError::Prompt(format!("no {label} given")));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Returns `value` when it is set and non-empty, otherwise asks for it.
pub fn required_option(
    prompt: &mut dyn Prompt,
    label: &str,
    value: Option<&str>,
) -> Result<String, AppError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => prompt.read_line(label),
    }
}

pub fn required_password(prompt: &mut dyn Prompt, value: Option<&str>) -> Result<String, AppError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => prompt.read_secret("password"),
    }
}

/// Builds the `digest` query value.
///
/// This is plain base64 of `email;password`, not a hash. Anyone who sees the
/// URL can recover the password, so only use it over TLS.
pub fn encode_logpass(email: &str, password: &str) -> String {
    STANDARD.encode(format!("{email};{password}"))
}

/// Splits a digest back into email and password.
#[cfg(test)]
pub fn decode_logpass(digest: &str) -> Option<(String, String)> {
    let bytes = STANDARD.decode(digest).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    let (email, password) = text.split_once(';')?;
    Some((email.to_string(), password.to_string()))
}
