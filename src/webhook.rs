use serde::Deserialize;

/// Body of an intdash webhook delivery. Decoding is permissive: missing or
/// unknown fields default to empty strings, matching the upstream contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub measurement_uuid: String,
}

impl WebhookEvent {
    pub fn parse(body: &str) -> Result<WebhookEvent, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Only completed measurements are summarized; everything else is
    /// acknowledged with a 422 and dropped.
    pub fn is_measurement_completed(&self) -> bool {
        self.resource_type == "measurement" && self.action == "completed"
    }
}
