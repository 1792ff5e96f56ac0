use serde::{Deserialize, Serialize};

/// A Marvel character as the rest of the app sees it.
///
/// `id` is the remote-assigned natural key; a record is immutable once
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub bio: String,
}

/// An event a character appeared in, scoped to its parent characters through
/// the cache's link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub image_url: String,
    pub description: String,
}

impl EventRecord {
    /// Row-shaped placeholder for a character with no events on record.
    pub fn no_events_found(character_name: &str) -> Self {
        Self {
            name: "No Events Found".to_string(),
            image_url: String::new(),
            description: format!("No Events for {}.", character_name),
        }
    }

    /// Row-shaped placeholder for the offline case.
    pub fn offline() -> Self {
        Self {
            name: "Internet Offline".to_string(),
            image_url: String::new(),
            description: "Please connect to the internet and try loading again.".to_string(),
        }
    }
}
