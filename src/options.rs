use std::collections::BTreeMap;

use crate::cli::Cli;
use crate::dates::{parse_date, today_string};
use crate::error::AppError;

pub const DEFAULT_URL: &str = "http://task-track.herokuapp.com/api";
pub const DEFAULT_STATUS: &str = "finished";
pub const DEFAULT_EDITOR: &str = "vim";

/// Settings for one run: hardcoded defaults, then config defaults, then flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub url: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub project: Option<String>,
    pub real_time: Option<String>,
    pub date: String,
    pub status: String,
    pub description: Option<String>,
    pub editor: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            email: None,
            password: None,
            name: None,
            project: None,
            real_time: None,
            date: today_string(),
            status: DEFAULT_STATUS.to_string(),
            description: None,
            editor: DEFAULT_EDITOR.to_string(),
        }
    }
}

impl Options {
    pub fn resolve(
        editor: Option<String>,
        defaults: &BTreeMap<String, String>,
        cli: &Cli,
    ) -> Result<Self, AppError> {
        let mut options = Options::default();
        if let Some(editor) = editor {
            options.editor = editor;
        }
        for (key, value) in defaults {
            options.apply(key, value.clone());
        }

        let flags = [
            ("url", &cli.url),
            ("email", &cli.email),
            ("password", &cli.password),
            ("name", &cli.name),
            ("project", &cli.project),
            ("real_time", &cli.real_time),
            ("date", &cli.date),
            ("status", &cli.status),
            ("description", &cli.description),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                options.apply(key, value.clone());
            }
        }

        parse_date(&options.date).map_err(AppError::Usage)?;
        Ok(options)
    }

    fn apply(&mut self, key: &str, value: String) {
        match key {
            "url" => self.url = value,
            "email" => self.email = Some(value),
            "password" => self.password = Some(value),
            "name" => self.name = Some(value),
            "project" => self.project = Some(value),
            "real_time" | "real-time" => self.real_time = Some(value),
            "date" => self.date = value,
            "status" => self.status = value,
            "description" => self.description = Some(value),
            other => tracing::warn!(key = other, "ignoring unknown default"),
        }
    }
}
