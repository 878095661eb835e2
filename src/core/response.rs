//! CloudFormation response documents.
//!
//! CloudFormation waits for the provider to PUT a JSON document to the
//! pre-signed `ResponseURL` of the event.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::core::domain::Event;
use crate::core::lifecycle::Outcome;
use crate::error::{Result, Service, UpstreamError, ValidationError};

/// Response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Success,
    Failed,
}

/// Body CloudFormation expects at the response URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseDocument {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl ResponseDocument {
    /// Build the response for `outcome` of handling `event`.
    pub fn new(event: &Event, outcome: &Outcome) -> Self {
        let (status, reason) = match &outcome.error {
            None => (Status::Success, None),
            Some(err) => (Status::Failed, Some(err.to_string())),
        };
        Self {
            status,
            reason,
            physical_resource_id: outcome.physical_resource_id.clone(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data: outcome.data.clone(),
        }
    }

    /// Serialize to the JSON body.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// PUT `document` to the event's response URL.
///
/// No `Content-Type` is sent; the pre-signed S3 URL is signed without one.
///
/// # Errors
///
/// Returns `ValidationError::Event` if the event has no response URL and
/// `UpstreamError` if the upload fails.
#[instrument(skip_all, fields(request_id = %document.request_id))]
pub async fn send(
    http: &reqwest::Client,
    event: &Event,
    document: &ResponseDocument,
) -> Result<()> {
    if event.response_url.is_empty() {
        return Err(ValidationError::Event("ResponseURL is empty".to_string()).into());
    }

    let body = document.to_json()?;
    let response = http
        .put(&event.response_url)
        .body(body)
        .send()
        .await
        .map_err(|e| UpstreamError::request(Service::ResponseUrl, e))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            service: Service::ResponseUrl,
            status: status.as_u16(),
            message,
        }
        .into());
    }

    debug!(status = status.as_u16(), "response delivered");
    Ok(())
}
