use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use tracing::debug;

use crate::model::{Project, Status, Subtask, Task};

/// Error type for gateway calls. The store does not branch on the specific
/// failure; every variant collapses into one user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {path} returned {status}")]
    Status {
        method: &'static str,
        path: String,
        status: StatusCode,
    },
    #[error("invalid response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Request body for create and full-update calls
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
}

#[derive(Serialize)]
struct SubtaskDraft<'a> {
    name: &'a str,
}

/// The REST boundary. One method per endpoint; the server response is
/// authoritative and callers reconcile rather than recompute.
pub trait Gateway {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
    fn list_projects(&self) -> Result<Vec<Project>, ApiError>;
    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError>;
    fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<Task, ApiError>;
    fn toggle_task(&self, id: i64) -> Result<Task, ApiError>;
    fn change_status(&self, id: i64, status: Status) -> Result<Task, ApiError>;
    fn delete_task(&self, id: i64) -> Result<(), ApiError>;
    fn list_subtasks(&self, task_id: i64) -> Result<Vec<Subtask>, ApiError>;
    fn add_subtask(&self, task_id: i64, name: &str) -> Result<Subtask, ApiError>;
    fn toggle_subtask(&self, task_id: i64, subtask_id: i64) -> Result<Subtask, ApiError>;
    fn delete_subtask(&self, task_id: i64, subtask_id: i64) -> Result<(), ApiError>;
}

/// Gateway over HTTP. Synchronous: the UI event loop blocks on each call,
/// so no timeout or cancellation handling lives here.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpGateway {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!(method, path, "gateway request");
        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "PATCH" => self.client.patch(&url),
            "DELETE" => self.client.delete(&url),
            other => unreachable!("unsupported method {other}"),
        };
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().map_err(|e| ApiError::Transport {
            path: path.to_string(),
            source: e,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                path: path.to_string(),
                status,
            });
        }
        Ok(response)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send("GET", path, None::<&()>)?.json().map_err(|e| {
            ApiError::Decode {
                path: path.to_string(),
                source: e,
            }
        })
    }

    fn decode<T: serde::de::DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        response.json().map_err(|e| ApiError::Decode {
            path: path.to_string(),
            source: e,
        })
    }
}

impl Gateway for HttpGateway {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.get_json("/tasks")
    }

    fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json("/projects")
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let path = "/tasks";
        let response = self.send("POST", path, Some(draft))?;
        Self::decode(path, response)
    }

    fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<Task, ApiError> {
        let path = format!("/tasks/{id}");
        let response = self.send("PUT", &path, Some(draft))?;
        Self::decode(&path, response)
    }

    fn toggle_task(&self, id: i64) -> Result<Task, ApiError> {
        let path = format!("/tasks/{id}/toggle");
        let response = self.send("PATCH", &path, None::<&()>)?;
        Self::decode(&path, response)
    }

    fn change_status(&self, id: i64, status: Status) -> Result<Task, ApiError> {
        let path = format!("/tasks/{id}/status?new_status={}", status.as_str());
        let response = self.send("PATCH", &path, None::<&()>)?;
        Self::decode(&path, response)
    }

    fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        self.send("DELETE", &format!("/tasks/{id}"), None::<&()>)?;
        Ok(())
    }

    fn list_subtasks(&self, task_id: i64) -> Result<Vec<Subtask>, ApiError> {
        self.get_json(&format!("/tasks/{task_id}/subtasks"))
    }

    fn add_subtask(&self, task_id: i64, name: &str) -> Result<Subtask, ApiError> {
        let path = format!("/tasks/{task_id}/subtasks");
        let response = self.send("POST", &path, Some(&SubtaskDraft { name }))?;
        Self::decode(&path, response)
    }

    fn toggle_subtask(&self, task_id: i64, subtask_id: i64) -> Result<Subtask, ApiError> {
        let path = format!("/tasks/{task_id}/subtasks/{subtask_id}/toggle");
        let response = self.send("PATCH", &path, None::<&()>)?;
        Self::decode(&path, response)
    }

    fn delete_subtask(&self, task_id: i64, subtask_id: i64) -> Result<(), ApiError> {
        let path = format!("/tasks/{task_id}/subtasks/{subtask_id}");
        self.send("DELETE", &path, None::<&()>)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = HttpGateway::new("http://localhost:8000/api/");
        assert_eq!(gateway.url("/tasks"), "http://localhost:8000/api/tasks");
    }

    #[test]
    fn test_task_draft_skips_absent_fields() {
        let draft = TaskDraft {
            name: "Foo".into(),
            description: None,
            project_id: None,
        };
        assert_eq!(serde_json::to_string(&draft).unwrap(), r#"{"name":"Foo"}"#);

        let full = TaskDraft {
            name: "Foo".into(),
            description: Some("Bar".into()),
            project_id: Some(3),
        };
        let json = serde_json::to_string(&full).unwrap();
        assert!(json.contains(r#""description":"Bar""#));
        assert!(json.contains(r#""project_id":3"#));
    }
}
