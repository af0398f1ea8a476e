use serde::{Deserialize, Serialize};

/// A monitor currently stored in the backend.
///
/// `name` is `None` when the stored document carries no name; such monitors
/// never match a desired name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingMonitor {
    pub id: String,
    pub name: Option<String>,
}

impl ExistingMonitor {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    #[must_use]
    pub fn unnamed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}
