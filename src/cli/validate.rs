//! Validate command.

use crate::core::domain::SecretSource;
use crate::core::validation::decode_props;
use crate::error::Result;

use super::output;

/// Decode the properties of the event read from `source` and print them.
pub async fn execute(source: &str) -> Result<()> {
    let event = super::read_event(source).await?;
    let props = decode_props(&event.resource_properties)?;

    output::success("resource properties are valid");
    output::kv("request:   ", event.request_type);
    output::kv("repository:", props.repo());
    output::kv("secret:    ", props.secret_name());
    output::kv("source:    ", props.source());
    match props.source() {
        SecretSource::PlainText => output::kv("value:     ", "<redacted>"),
        _ => output::kv("reference: ", props.secret_value()),
    }
    output::kv("token ref: ", props.credential_ref());
    Ok(())
}
