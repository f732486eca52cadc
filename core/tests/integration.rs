//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every core client
//! operation over real HTTP using ureq. Validates that the core's request
//! building and response parsing work end-to-end with the actual server,
//! including the self links the server derives from the Host header.

use notes_core::{ApiError, CreateNote, HttpMethod, HttpResponse, NotesClient, UpdateNote};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: notes_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Boot the mock server on a random port and return its address.
fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// The server addresses notes by the numeric tail of their self link.
fn id_from_href(href: &str) -> &str {
    href.rsplit('/').next().unwrap()
}

#[test]
fn crud_lifecycle() {
    let addr = start_server();
    let client = NotesClient::new(&format!("http://{addr}"));

    // list — should be empty.
    let req = client.build_list_notes();
    let notes = client.parse_list_notes(execute(req)).unwrap();
    assert!(notes.is_empty(), "expected empty list");

    // create two notes.
    let req = client
        .build_create_note(&CreateNote {
            text: "Integration note".to_string(),
        })
        .unwrap();
    let first = client.parse_create_note(execute(req)).unwrap();
    assert_eq!(first.text, "Integration note");
    assert_eq!(first.self_href(), format!("http://{addr}/notes/1"));

    let req = client
        .build_create_note(&CreateNote {
            text: "Second note".to_string(),
        })
        .unwrap();
    let second = client.parse_create_note(execute(req)).unwrap();

    // list — both notes, in creation order.
    let req = client.build_list_notes();
    let notes = client.parse_list_notes(execute(req)).unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0], first);
    assert_eq!(notes[1], second);

    // get the first note by id.
    let id = id_from_href(first.self_href()).to_string();
    let req = client.build_get_note(&id);
    let fetched = client.parse_get_note(execute(req)).unwrap();
    assert_eq!(fetched, first);

    // update its text.
    let req = client
        .build_update_note(
            &id,
            &UpdateNote {
                text: "Updated text".to_string(),
            },
        )
        .unwrap();
    let updated = client.parse_update_note(execute(req)).unwrap();
    assert_eq!(updated.text, "Updated text");
    assert_eq!(updated.self_href(), first.self_href());

    // delete the second note through a client with an unrelated base URL:
    // the request must target the self link verbatim, not the base.
    let unrelated = NotesClient::new("http://unrelated.invalid");
    let req = unrelated.build_delete_note(&second);
    assert_eq!(req.path, second.self_href());
    unrelated.parse_delete_note(execute(req)).unwrap();

    // delete the first note as well.
    let req = client.build_delete_note(&updated);
    client.parse_delete_note(execute(req)).unwrap();

    // get after delete — NotFound.
    let req = client.build_get_note(&id);
    let err = client.parse_get_note(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // delete again — NotFound.
    let req = client.build_delete_note(&updated);
    let err = client.parse_delete_note(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // list — empty again.
    let req = client.build_list_notes();
    let notes = client.parse_list_notes(execute(req)).unwrap();
    assert!(notes.is_empty(), "expected empty list after delete");
}

#[test]
fn server_rejection_surfaces_as_http_error() {
    let addr = start_server();
    let client = NotesClient::new(&format!("http://{addr}"));

    // The client forwards empty text untouched; the server rejects it and the
    // failure comes back unmodified, with no retry.
    let req = client
        .build_create_note(&CreateNote {
            text: String::new(),
        })
        .unwrap();
    let err = client.parse_create_note(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 400, .. }));

    // The server was left untouched.
    let req = client.build_list_notes();
    let notes = client.parse_list_notes(execute(req)).unwrap();
    assert!(notes.is_empty());
}
