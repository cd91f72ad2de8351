use std::io::{self, IsTerminal, Write};

use crate::api::Api;
use crate::credentials::{Prompt, encode_logpass, required_option, required_password};
use crate::editor;
use crate::error::AppError;
use crate::models::{self, Envelope, Resource};
use crate::options::Options;
use crate::render::{self, ARTICLE_FIELDS, Field, TIME_ENTRY_FIELDS};
use crate::viewer;

const USAGE_HINT: &str =
    "Usage: timetrack <time-entries|te|articles> <get|create|c> [options]. Try --help.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Create,
}

/// A `<subject> <action>` pair from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub resource: Resource,
    pub action: Action,
}

impl Command {
    pub fn parse(tokens: &[String]) -> Result<Self, AppError> {
        let subject = tokens.first().map(String::as_str);
        let action = tokens.get(1).map(String::as_str);

        let resource = match subject {
            Some("time-entries" | "te") => Resource::TimeEntries,
            Some("articles") => Resource::Articles,
            Some(other) => return Err(usage(format!("Unknown subject '{other}'."))),
            None => return Err(usage("Missing subject.".to_string())),
        };
        let action = match action {
            Some("get") => Action::Get,
            Some("create" | "c") => Action::Create,
            Some(other) => return Err(usage(format!("Unknown action '{other}'."))),
            None => return Err(usage("Missing action.".to_string())),
        };
        if let Some(extra) = tokens.get(2) {
            return Err(usage(format!("Unexpected argument '{extra}'.")));
        }
        Ok(Command { resource, action })
    }
}

fn usage(reason: String) -> AppError {
    AppError::Usage(format!("{reason}\n{USAGE_HINT}"))
}

/// Where results go: a pager for record lists, plain lines for statuses.
pub trait Output {
    fn page(&mut self, text: &str) -> Result<(), AppError>;
    fn line(&mut self, text: &str) -> Result<(), AppError>;
}

pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn page(&mut self, text: &str) -> Result<(), AppError> {
        if io::stdout().is_terminal() {
            return viewer::run(text);
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn line(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(io::stdout(), "{text}")?;
        Ok(())
    }
}

pub struct Context<'a> {
    pub options: &'a Options,
    pub api: &'a dyn Api,
    pub prompt: &'a mut dyn Prompt,
    pub output: &'a mut dyn Output,
}

pub fn run(command: Command, ctx: &mut Context<'_>) -> Result<(), AppError> {
    tracing::debug!(resource = command.resource.as_str(), action = ?command.action, "dispatching");
    match (command.resource, command.action) {
        (resource, Action::Get) => print(resource, fields_for(resource), ctx),
        (Resource::TimeEntries, Action::Create) => {
            let response = create(Resource::TimeEntries, ctx)?.into_response()?;
            ctx.output.line(&models::status(&response)?)
        }
        (Resource::Articles, Action::Create) => Err(AppError::Unsupported("Not supported yet")),
    }
}

fn fields_for(resource: Resource) -> &'static [Field] {
    match resource {
        Resource::TimeEntries => TIME_ENTRY_FIELDS,
        Resource::Articles => ARTICLE_FIELDS,
    }
}

fn digest(ctx: &mut Context<'_>) -> Result<String, AppError> {
    let email = required_option(ctx.prompt, "email", ctx.options.email.as_deref())?;
    let password = required_password(ctx.prompt, ctx.options.password.as_deref())?;
    Ok(encode_logpass(&email, &password))
}

fn get(resource: Resource, ctx: &mut Context<'_>) -> Result<Envelope, AppError> {
    let digest = digest(ctx)?;
    Envelope::from_value(ctx.api.get(resource, &digest)?)
}

fn create(resource: Resource, ctx: &mut Context<'_>) -> Result<Envelope, AppError> {
    let digest = digest(ctx)?;
    let options = ctx.options;
    let mut form = vec![
        ("name", required_option(ctx.prompt, "time entry name", options.name.as_deref())?),
        ("project", required_option(ctx.prompt, "project name", options.project.as_deref())?),
        ("real_time", required_option(ctx.prompt, "real time", options.real_time.as_deref())?),
        ("date", options.date.clone()),
        ("status", options.status.clone()),
    ];
    match options.description.as_deref() {
        Some("") => form.push(("description", editor::compose_description(&options.editor)?)),
        Some(description) => form.push(("description", description.to_string())),
        None => {}
    }
    Envelope::from_value(ctx.api.create(resource, &digest, &form)?)
}

/// Fetches `resource` and pages one fixed-width line per record.
fn print(resource: Resource, fields: &[Field], ctx: &mut Context<'_>) -> Result<(), AppError> {
    let response = get(resource, ctx)?.into_response()?;
    let records = models::records(&response, resource)?;
    tracing::debug!(count = records.len(), "received records");
    ctx.output.page(&render::render_records(fields, &records))
}
