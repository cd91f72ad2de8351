use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde_json::Value;

use crate::cli::VERSION;
use crate::error::AppError;
use crate::models::Resource;

/// The TimeTrack HTTP API. Calls return the raw JSON body.
pub trait Api {
    fn get(&self, resource: Resource, digest: &str) -> Result<Value, AppError>;
    fn create(
        &self,
        resource: Resource,
        digest: &str,
        form: &[(&str, String)],
    ) -> Result<Value, AppError>;
}

pub struct TimeTrackClient {
    client: Client,
    base_url: String,
}

impl TimeTrackClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(format!("timetrack-cli/{VERSION}"))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn parse_body(response: Response) -> Result<Value, AppError> {
        let status = response.status();
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|err| {
            AppError::ResponseFormat(format!("HTTP {status}, body is not JSON: {err}"))
        })
    }
}

impl Api for TimeTrackClient {
    fn get(&self, resource: Resource, digest: &str) -> Result<Value, AppError> {
        let url = resource_url(&self.base_url, resource, digest)?;
        tracing::debug!(method = "GET", url = %redacted(&url), "sending request");
        let response = self.client.get(url).send()?;
        Self::parse_body(response)
    }

    fn create(
        &self,
        resource: Resource,
        digest: &str,
        form: &[(&str, String)],
    ) -> Result<Value, AppError> {
        let url = resource_url(&self.base_url, resource, digest)?;
        tracing::debug!(method = "POST", url = %redacted(&url), "sending request");
        let response = self.client.post(url).form(form).send()?;
        Self::parse_body(response)
    }
}

/// `<base_url>/<resource>?digest=<digest>`
pub fn resource_url(base_url: &str, resource: Resource, digest: &str) -> Result<Url, AppError> {
    let base = format!("{}/{}", base_url.trim_end_matches('/'), resource.as_str());
    Url::parse_with_params(&base, &[("digest", digest)])
        .map_err(|err| AppError::Network(format!("invalid url '{base}': {err}")))
}

fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
