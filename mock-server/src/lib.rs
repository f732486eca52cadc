use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    #[serde(rename = "_links")]
    pub links: NoteLinks,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Deserialize)]
pub struct NotePayload {
    pub text: String,
}

#[derive(Serialize)]
pub struct NoteCollection {
    #[serde(rename = "_embedded")]
    embedded: EmbeddedNotes,
}

#[derive(Serialize)]
struct EmbeddedNotes {
    notes: Vec<Note>,
}

/// In-memory store. Ids are assigned sequentially from 1; the BTreeMap keeps
/// list responses in id (creation) order.
#[derive(Default)]
pub struct NoteStore {
    next_id: u64,
    notes: BTreeMap<u64, String>,
}

pub type Db = Arc<RwLock<NoteStore>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(NoteStore::default()));
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", get(get_note).put(update_note).delete(delete_note))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Hrefs are derived from the incoming Host header, the way Spring Data REST
/// builds them, so clients on a random test port get absolute links back.
fn note_href(headers: &HeaderMap, id: u64) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}/notes/{id}")
}

fn note_body(headers: &HeaderMap, id: u64, text: &str) -> Note {
    Note {
        text: text.to_string(),
        links: NoteLinks {
            self_link: Link {
                href: note_href(headers, id),
            },
        },
    }
}

async fn list_notes(State(db): State<Db>, headers: HeaderMap) -> Json<NoteCollection> {
    let store = db.read().await;
    let notes = store
        .notes
        .iter()
        .map(|(id, text)| note_body(&headers, *id, text))
        .collect();
    Json(NoteCollection {
        embedded: EmbeddedNotes { notes },
    })
}

async fn create_note(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<NotePayload>,
) -> Result<(StatusCode, Json<Note>), StatusCode> {
    // The original entity declares text @NotEmpty.
    if input.text.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    let note = note_body(&headers, id, &input.text);
    store.notes.insert(id, input.text);
    Ok((StatusCode::CREATED, Json(note)))
}

async fn get_note(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<Note>, StatusCode> {
    let store = db.read().await;
    let text = store.notes.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(note_body(&headers, id, text)))
}

async fn update_note(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(input): Json<NotePayload>,
) -> Result<Json<Note>, StatusCode> {
    if input.text.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let text = store.notes.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *text = input.text;
    Ok(Json(note_body(&headers, id, text)))
}

async fn delete_note(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .notes
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
