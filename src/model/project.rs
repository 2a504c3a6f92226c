use serde::{Deserialize, Serialize};

/// A project a task may optionally be tagged with. Projects are managed
/// server-side; the client only reads them for badges and pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}
