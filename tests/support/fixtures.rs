//! Test fixtures and constants.

use serde_json::{json, Map, Value};

use ghsecret::core::domain::{Event, Props, Repository, SecretSource};

/// Secrets Manager reference of the GitHub token.
pub const CREDENTIAL_REF: &str = "arn:aws:secretsmanager:us-east-1:123456789012:secret:cred";

/// Token stored under [`CREDENTIAL_REF`].
pub const GITHUB_TOKEN: &str = "ghp_testtoken";

/// Key id the fake GitHub advertises.
pub const KEY_ID: &str = "kid1";

pub fn repo() -> Repository {
    Repository::new("acme", "widget").unwrap()
}

/// Request with the given source; `value` is the literal or the locator.
pub fn props(source: SecretSource, value: &str) -> Props {
    Props::new(repo(), "TOKEN", value, source, CREDENTIAL_REF).unwrap()
}

/// Resource properties as CloudFormation sends them.
pub fn properties(source: &str, value: &str) -> Value {
    json!({
        "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:provider",
        "Repo": {"Owner": "acme", "Name": "widget"},
        "SecretName": "TOKEN",
        "SecretValue": value,
        "SecretResourceType": source,
        "GitHubAuthTokenSecretArn": CREDENTIAL_REF
    })
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Event JSON for `request_type` with `properties`.
pub fn event_json(request_type: &str, physical_id: &str, properties: Value) -> String {
    json!({
        "RequestType": request_type,
        "RequestId": "req-1",
        "ResponseURL": "https://cloudformation-custom-resource-response.example.com/r",
        "ResourceType": "Custom::GitHubSecrets",
        "LogicalResourceId": "DeployToken",
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/app/1",
        "PhysicalResourceId": physical_id,
        "ResourceProperties": properties,
        "OldResourceProperties": {}
    })
    .to_string()
}

pub fn event(request_type: &str, physical_id: &str, properties: Value) -> Event {
    Event::from_json(&event_json(request_type, physical_id, properties)).unwrap()
}
