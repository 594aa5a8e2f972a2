//! Cross-origin check for WebSocket upgrades.

/// Allow-list of `Origin` header values.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    pub fn new(allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// A request without an `Origin` header is never allowed.
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        origin.is_some_and(|origin| self.allowed.iter().any(|allowed| allowed == origin))
    }
}
