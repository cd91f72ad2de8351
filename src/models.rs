use serde_json::{Map, Value};

use crate::error::AppError;

/// A named collection on the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    TimeEntries,
    Articles,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::TimeEntries => "time_entries",
            Resource::Articles => "articles",
        }
    }
}

pub type Record = Map<String, Value>;

/// A decoded API body: either a `response` payload or `error` messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Response(Map<String, Value>),
    Error(Vec<String>),
}

impl Envelope {
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let Value::Object(mut body) = value else {
            return Err(AppError::ResponseFormat("body is not an object".to_string()));
        };
        match (body.remove("response"), body.remove("error")) {
            (Some(Value::Object(response)), None) => Ok(Envelope::Response(response)),
            (None, Some(error)) => Ok(Envelope::Error(error_messages(&error)?)),
            (Some(_), None) => Err(AppError::ResponseFormat(
                "`response` is not an object".to_string(),
            )),
            (Some(_), Some(_)) => Err(AppError::ResponseFormat(
                "both `response` and `error` present".to_string(),
            )),
            (None, None) => Err(AppError::ResponseFormat(
                "neither `response` nor `error` present".to_string(),
            )),
        }
    }

    /// Converts an `error` body into `AppError::Application`.
    pub fn into_response(self) -> Result<Map<String, Value>, AppError> {
        match self {
            Envelope::Response(response) => Ok(response),
            Envelope::Error(messages) => Err(AppError::Application(messages)),
        }
    }
}

/// Records listed under `response.<resource>`.
pub fn records(response: &Map<String, Value>, resource: Resource) -> Result<Vec<Record>, AppError> {
    let list = response
        .get(resource.as_str())
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::ResponseFormat(format!("`response.{}` is not a list", resource.as_str()))
        })?;
    list.iter()
        .map(|item| {
            item.as_object().cloned().ok_or_else(|| {
                AppError::ResponseFormat(format!("{} record is not an object", resource.as_str()))
            })
        })
        .collect()
}

/// The `status` string returned by a create call.
pub fn status(response: &Map<String, Value>) -> Result<String, AppError> {
    response
        .get("status")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::ResponseFormat("`response.status` is not a string".to_string()))
}

fn error_messages(error: &Value) -> Result<Vec<String>, AppError> {
    let messages = error
        .get("messages")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::ResponseFormat("`error.messages` is not a list".to_string()))?;
    Ok(messages
        .iter()
        .map(|message| match message {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_response_body() {
        let envelope =
            Envelope::from_value(json!({"response": {"time_entries": [{"id": 1}]}})).unwrap();
        let response = envelope.into_response().unwrap();
        let list = records(&response, Resource::TimeEntries).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], json!(1));
    }

    #[test]
    fn parses_error_body() {
        let envelope =
            Envelope::from_value(json!({"error": {"messages": ["bad digest", "expired"]}})).unwrap();
        assert_eq!(
            envelope,
            Envelope::Error(vec!["bad digest".to_string(), "expired".to_string()])
        );
    }

    #[test]
    fn error_body_becomes_application_error() {
        let envelope = Envelope::Error(vec!["bad digest".to_string()]);
        let err = envelope.into_response().unwrap_err();
        assert!(matches!(err, AppError::Application(ref messages) if messages == &["bad digest"]));
    }

    #[test]
    fn rejects_unknown_shapes() {
        for body in [
            json!({}),
            json!({"data": []}),
            json!([1, 2]),
            json!({"response": {}, "error": {"messages": []}}),
            json!({"response": "ok"}),
            json!({"error": {"text": "nope"}}),
        ] {
            let err = Envelope::from_value(body).unwrap_err();
            assert!(matches!(err, AppError::ResponseFormat(_)));
        }
    }

    #[test]
    fn missing_resource_list_is_a_format_error() {
        let response = json!({"articles": []});
        let err = records(response.as_object().unwrap(), Resource::TimeEntries).unwrap_err();
        assert!(matches!(err, AppError::ResponseFormat(_)));
    }

    #[test]
    fn reads_create_status() {
        let response = json!({"status": "ok"});
        assert_eq!(status(response.as_object().unwrap()).unwrap(), "ok");
        let response = json!({"status": 1});
        assert!(status(response.as_object().unwrap()).is_err());
    }

    #[test]
    fn resource_names_match_api_paths() {
        assert_eq!(Resource::TimeEntries.as_str(), "time_entries");
        assert_eq!(Resource::Articles.as_str(), "articles");
    }
}
