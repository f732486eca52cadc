//! Domain DTOs for the notes API.
//!
//! # Design
//! The wire format is HAL-flavored: each note carries its text plus a
//! server-assigned self link under `_links`, and list responses nest the
//! collection under `_embedded.notes`. These types mirror the mock-server's
//! schema but are defined independently; integration tests catch schema drift.

use serde::{Deserialize, Serialize};

/// A single note as represented by the server.
///
/// `links` is only meaningful on values deserialized from a server response;
/// the client never fabricates a self link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub text: String,
    #[serde(rename = "_links")]
    pub links: NoteLinks,
}

impl Note {
    /// The note's canonical resource location, as issued by the server.
    pub fn self_href(&self) -> &str {
        &self.links.self_link.href
    }
}

/// Navigational links attached to a note representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// A single hypermedia link. The href may be absolute or relative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
}

/// Request payload for creating a note. The text is forwarded as-is — the
/// server, not the client, decides whether empty text is acceptable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    pub text: String,
}

/// Request payload for replacing a note's text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNote {
    pub text: String,
}

/// Collection envelope returned by the list endpoint. Servers may omit
/// `_embedded` entirely when the collection is empty, so both levels
/// default to an empty list.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NoteCollection {
    #[serde(rename = "_embedded", default)]
    pub embedded: EmbeddedNotes,
}

/// The `_embedded` member of a collection envelope.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EmbeddedNotes {
    #[serde(default)]
    pub notes: Vec<Note>,
}
