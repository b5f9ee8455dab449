//! `HttpApi` against a canned HTTP server on loopback.

use std::sync::Arc;

use chat_viewer::Viewer;
use chat_viewer::api::{ApiError, ConversationApi, HttpApi};
use chat_viewer::config::ViewerConfig;
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Route = (&'static str, u16, &'static str);

/// Serves `routes` (path, status, body) until the test ends; unknown paths
/// get an empty 404. Returns the origin and the request paths seen.
async fn serve(routes: Vec<Route>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_server = seen.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            let seen = seen_by_server.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(route, ..)| *route == path)
                    .map(|(_, status, body)| (*status, *body))
                    .unwrap_or((404, ""));
                seen.lock().push(path);

                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), seen)
}

fn client(origin: &str) -> HttpApi {
    HttpApi::new(&ViewerConfig {
        base_url: origin.to_string(),
        ..ViewerConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn list_body_decodes_in_server_order() {
    let (origin, seen) = serve(vec![(
        "/api/conversations",
        200,
        r#"[{"id":"b","title":"Beta","message_count":2},{"id":"a","title":"Alpha","message_count":1}]"#,
    )])
    .await;

    let rows = client(&origin).list_conversations().await.unwrap();

    let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(rows[0].message_count, 2);
    assert_eq!(*seen.lock(), vec!["/api/conversations".to_string()]);
}

#[tokio::test]
async fn detail_404_is_not_found() {
    let (origin, _) = serve(Vec::new()).await;
    let err = client(&origin).get_conversation("missing").await.unwrap_err();
    assert_eq!(err, ApiError::NotFound);
}

#[tokio::test]
async fn list_404_is_a_plain_status_error() {
    let (origin, _) = serve(Vec::new()).await;
    let err = client(&origin).list_conversations().await.unwrap_err();
    assert_eq!(err, ApiError::Status(404));
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn detail_server_error_keeps_status_code() {
    let (origin, _) = serve(vec![("/api/conversations/a", 500, "boom")]).await;
    let err = client(&origin).get_conversation("a").await.unwrap_err();
    assert_eq!(err, ApiError::Status(500));
}

#[tokio::test]
async fn detail_body_missing_fields_is_parse_error() {
    let (origin, _) = serve(vec![("/api/conversations/a", 200, r#"{"messages":[]}"#)]).await;
    let err = client(&origin).get_conversation("a").await.unwrap_err();
    assert!(matches!(&err, ApiError::Parse(msg) if msg.contains("id")), "got {err:?}");
}

#[tokio::test]
async fn list_body_of_wrong_shape_is_parse_error() {
    let (origin, _) = serve(vec![("/api/conversations", 200, "{}")]).await;
    let err = client(&origin).list_conversations().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn conversation_id_is_percent_encoded_on_the_wire() {
    let (origin, seen) = serve(vec![(
        "/api/conversations/a%2Fb%20c",
        200,
        r#"{"id":"a/b c","messages":[]}"#,
    )])
    .await;

    let detail = client(&origin).get_conversation("a/b c").await.unwrap();

    assert_eq!(detail.id, "a/b c");
    assert!(detail.messages.is_empty());
    assert_eq!(
        *seen.lock(),
        vec!["/api/conversations/a%2Fb%20c".to_string()]
    );
}

#[tokio::test]
async fn server_404_reaches_the_pane_as_not_found_text() {
    let (origin, _) = serve(vec![(
        "/api/conversations",
        200,
        r#"[{"id":"a","title":"Alpha","message_count":3}]"#,
    )])
    .await;
    let viewer = Viewer::new(Arc::new(client(&origin)));

    viewer.bootstrap(Some("a")).await;

    let state = viewer.state.lock();
    assert_eq!(state.active_row(), Some("a"));
    assert_eq!(
        state.detail_pane().html(),
        "<p class=\"placeholder\">Conversation not found or has no messages.</p>\n"
    );
}
