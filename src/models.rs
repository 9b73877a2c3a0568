//! Domain model that mirrors the SQLite schema and gets passed throughout
//! the TUI. The type stays a light-weight data holder so other layers can
//! focus on presentation and persistence logic.

use std::fmt;

#[derive(Debug, Clone)]
/// A saved dog profile. Instances are immutable once persisted: the store
/// supports create, fetch, and delete, never update.
pub struct DogProfile {
    /// Generated identifier from the store. Snapshot membership checks use
    /// this field, never structural equality, so two dogs sharing a name
    /// stay distinguishable.
    pub id: String,
    /// The dog's name. Required; the create form refuses to save without it.
    pub name: String,
    /// The owner's name, when provided.
    pub owner: Option<String>,
    /// A short free-text description of the dog.
    pub summary: Option<String>,
    /// PNG bytes of the cropped profile photo. The terminal preview is
    /// derived from these when the detail screen opens and never persisted.
    pub photo: Option<Vec<u8>>,
}

impl DogProfile {
    /// Owner text with a placeholder for profiles saved without one.
    pub fn owner_display(&self) -> &str {
        match self.owner.as_deref() {
            Some(owner) if !owner.trim().is_empty() => owner,
            _ => "Unknown owner",
        }
    }

    /// Summary text with a placeholder for profiles saved without one.
    pub fn summary_display(&self) -> &str {
        match self.summary.as_deref() {
            Some(summary) if !summary.trim().is_empty() => summary,
            _ => "No description yet.",
        }
    }

    /// Whether a photo blob is stored alongside the record.
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|data| !data.is_empty())
    }
}

impl fmt::Display for DogProfile {
    /// Write the dog's name to any formatter. Display is implemented so the
    /// type plays nicely with widgets and status messages that consume
    /// strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
