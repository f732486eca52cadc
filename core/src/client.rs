//! Stateless HTTP request builder and response parser for the notes API.
//!
//! # Design
//! `NotesClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Every parse method returns the decoded value (`Vec<Note>`, `Note`, `()`)
//! rather than the transport envelope, so create/update behave the same as
//! list. Deletes target the note's self link verbatim, even when that href
//! points away from this client's base URL.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateNote, Note, NoteCollection, UpdateNote};

/// Synchronous, stateless client for the notes API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct NotesClient {
    base_url: String,
}

impl NotesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_notes(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/notes", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_note(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/notes/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_note(&self, input: &CreateNote) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/notes", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_note(&self, id: &str, input: &UpdateNote) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/notes/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// The request target is `note`'s self link, untouched. The href must be
    /// populated (server-issued); the client does not validate it.
    pub fn build_delete_note(&self, note: &Note) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: note.self_href().to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Unwraps the `_embedded.notes` envelope, preserving server order.
    pub fn parse_list_notes(&self, response: HttpResponse) -> Result<Vec<Note>, ApiError> {
        check_status(&response, 200)?;
        let collection: NoteCollection = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(collection.embedded.notes)
    }

    pub fn parse_get_note(&self, response: HttpResponse) -> Result<Note, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_note(&self, response: HttpResponse) -> Result<Note, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_update_note(&self, response: HttpResponse) -> Result<Note, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_delete_note(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
