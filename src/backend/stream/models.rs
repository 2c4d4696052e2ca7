/**
 * Stream Directory Models
 *
 * A directory entry is the minimal profile Stream keeps for each of our
 * users: `{id, name, image}`. Entries are derived from user records on demand
 * and never stored locally.
 */

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Profile record pushed to Stream's user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// String form of the user identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Profile image URI, or an empty string
    pub image: String,
}

impl DirectoryEntry {
    /// Build an entry, substituting `""` for a missing image
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.unwrap_or_default().to_string(),
        }
    }
}

/// Body of `POST /users`
///
/// Stream expects the users keyed by id: `{"users": {"<id>": {...}}}`.
/// Entries are written in slice order.
pub struct UpsertUsersRequest<'a> {
    pub users: &'a [DirectoryEntry],
}

struct UsersById<'a>(&'a [DirectoryEntry]);

impl Serialize for UsersById<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|entry| (&entry.id, entry)))
    }
}

impl Serialize for UpsertUsersRequest<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UpsertUsersRequest", 1)?;
        state.serialize_field("users", &UsersById(self.users))?;
        state.end()
    }
}
