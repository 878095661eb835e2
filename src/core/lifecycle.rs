//! Custom resource lifecycle dispatch.
//!
//! Create and Update both run the full pipeline (prepare, then deliver);
//! Update does not diff against the old properties. Delete leaves the
//! GitHub secret in place and makes no outbound calls.

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::core::deliver::deliver;
use crate::core::domain::{Event, Props, RequestType};
use crate::core::prepare::Preparer;
use crate::core::types::PhysicalResourceId;
use crate::core::validation::decode_props;
use crate::error::{Error, Result};

/// How a lifecycle request ended.
#[derive(Debug)]
pub struct Outcome {
    pub physical_resource_id: PhysicalResourceId,
    /// Attributes exposed to the stack; always empty on success.
    pub data: Map<String, Value>,
    pub error: Option<Error>,
}

impl Outcome {
    pub fn success(physical_resource_id: PhysicalResourceId) -> Self {
        Self {
            physical_resource_id,
            data: Map::new(),
            error: None,
        }
    }

    pub fn failure(physical_resource_id: PhysicalResourceId, error: Error) -> Self {
        Self {
            physical_resource_id,
            data: Map::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Custom resource provider for GitHub Actions secrets.
#[derive(Clone)]
pub struct Provider {
    preparer: Preparer,
}

impl Provider {
    pub fn new(preparer: Preparer) -> Self {
        Self { preparer }
    }

    /// Handle one lifecycle event.
    #[instrument(
        skip_all,
        fields(request_type = %event.request_type, logical_id = %event.logical_resource_id)
    )]
    pub async fn handle(&self, event: &Event) -> Outcome {
        match event.request_type {
            RequestType::Create | RequestType::Update => self.create_or_update(event).await,
            RequestType::Delete => delete(event),
        }
    }

    /// Resolve, seal and store the secret described by `props`.
    ///
    /// # Errors
    ///
    /// Returns the first error from preparation or delivery.
    pub async fn provision(&self, props: &Props) -> Result<()> {
        let prepared = self.preparer.prepare(props).await?;
        deliver(&prepared, props.repo(), props.secret_name()).await
    }

    async fn create_or_update(&self, event: &Event) -> Outcome {
        let props = match decode_props(&event.resource_properties) {
            Ok(props) => props,
            Err(err) => {
                warn!(error = %err, "rejecting resource properties");
                return Outcome::failure(physical_id(event, None), err);
            }
        };
        if !event.old_resource_properties.is_empty() {
            debug!("old properties present, re-provisioning from scratch");
        }

        let id = physical_id(event, Some(&props));
        match self.provision(&props).await {
            Ok(()) => {
                info!(physical_id = %id, "secret provisioned");
                Outcome::success(id)
            }
            Err(err) => {
                warn!(physical_id = %id, error = %err, "provisioning failed");
                Outcome::failure(id, err)
            }
        }
    }

}

/// Acknowledge a Delete.
///
/// Needs no provider: nothing is validated or called, and the GitHub secret
/// stays in place.
pub fn delete(event: &Event) -> Outcome {
    let props = decode_props(&event.resource_properties).ok();
    let id = physical_id(event, props.as_ref());
    info!(physical_id = %id, "delete leaves the GitHub secret in place");
    Outcome::success(id)
}

/// The event's physical id, else one derived from the request, else the
/// logical id.
pub fn physical_id(event: &Event, props: Option<&Props>) -> PhysicalResourceId {
    if !event.physical_resource_id.is_empty() {
        return event.physical_resource_id.clone();
    }
    match props {
        Some(props) => props.default_physical_id(),
        None => event.logical_resource_id.clone(),
    }
}
