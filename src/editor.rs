use std::env;
use std::fs;
use std::process::Command;

use crate::error::AppError;

/// Opens an editor on an empty file and returns what was saved, trimmed.
pub fn compose_description(configured: &str) -> Result<String, AppError> {
    let editor = pick_editor(env::var("VISUAL").ok(), env::var("EDITOR").ok(), configured);
    compose_with(&editor)
}

/// `$VISUAL`, then `$EDITOR`, then the config file's `editor`.
fn pick_editor(visual: Option<String>, editor: Option<String>, configured: &str) -> String {
    [visual, editor]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

fn compose_with(editor: &str) -> Result<String, AppError> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| AppError::Editor("no editor configured".to_string()))?;

    let file = tempfile::Builder::new()
        .prefix("timetrack-description-")
        .suffix(".txt")
        .tempfile()
        .map_err(|err| AppError::Editor(err.to_string()))?;

    tracing::debug!(editor, path = %file.path().display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .map_err(|err| AppError::Editor(format!("failed to start '{program}': {err}")))?;
    if !status.success() {
        return Err(AppError::Editor(format!("'{program}' exited with {status}")));
    }

    let contents =
        fs::read_to_string(file.path()).map_err(|err| AppError::Editor(err.to_string()))?;
    Ok(contents.trim().to_string())
}
