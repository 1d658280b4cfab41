//! GetGatewayKeyHandler - exposes the public gateway key id.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetGatewayKeyResult {
    pub key: String,
}

/// Returns the key id the browser checkout needs. Never the secret.
#[derive(Debug, Clone)]
pub struct GetGatewayKeyHandler {
    key_id: String,
}

impl GetGatewayKeyHandler {
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
        }
    }

    pub fn handle(&self) -> GetGatewayKeyResult {
        GetGatewayKeyResult {
            key: self.key_id.clone(),
        }
    }
}
