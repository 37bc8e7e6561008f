use bytes::Bytes;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A single synchronous invocation against a hosted endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub endpoint_name: String,
    pub content_type: String,
    pub body: Bytes,
    /// Route the request to this production variant instead of letting the
    /// endpoint split traffic by weight.
    pub target_variant: Option<String>,
}

impl InvocationRequest {
    pub fn csv(endpoint_name: impl Into<String>, row: impl Into<String>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            content_type: CSV_CONTENT_TYPE.to_string(),
            body: Bytes::from(row.into()),
            target_variant: None,
        }
    }

    pub fn json(endpoint_name: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            content_type: JSON_CONTENT_TYPE.to_string(),
            body: Bytes::from(body),
            target_variant: None,
        }
    }

    pub fn with_target_variant(mut self, variant: impl Into<String>) -> Self {
        self.target_variant = Some(variant.into());
        self
    }
}
