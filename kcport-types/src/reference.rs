use serde::{Deserialize, Serialize};

/// A reference to an entity in a project, by id, codename or external id.
///
/// Absent identifiers are omitted when serialized, so a codename reference
/// is written as `{"codename":"..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl Reference {
    /// Reference by codename.
    pub fn codename(codename: impl Into<String>) -> Self {
        Self {
            codename: Some(codename.into()),
            ..Self::default()
        }
    }

    /// Reference by id.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Returns the codename, if this reference carries one.
    pub fn codename_str(&self) -> Option<&str> {
        self.codename.as_deref()
    }

    /// Returns the id, if this reference carries one.
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
