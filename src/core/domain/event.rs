//! CloudFormation custom resource events.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::types::PhysicalResourceId;
use crate::error::{Result, ValidationError};

/// Lifecycle request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl TryFrom<String> for RequestType {
    type Error = ValidationError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            "Delete" => Ok(Self::Delete),
            _ => Err(ValidationError::UnknownRequestType(value)),
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        };
        f.write_str(name)
    }
}

/// A custom resource request as delivered by CloudFormation.
///
/// Envelope fields other than `RequestType` default to empty so that
/// hand-written events only need the parts they exercise.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    pub request_type: RequestType,
    #[serde(default)]
    pub request_id: String,
    #[serde(rename = "ResponseURL", default)]
    pub response_url: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub logical_resource_id: String,
    #[serde(default)]
    pub stack_id: String,
    #[serde(default)]
    pub physical_resource_id: PhysicalResourceId,
    #[serde(default)]
    pub resource_properties: Map<String, Value>,
    #[serde(default)]
    pub old_resource_properties: Map<String, Value>,
}

impl Event {
    /// Decode an event from its JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Event` if the document is not a valid event.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ValidationError::Event(e.to_string()).into())
    }
}
