use super::*;

#[test]
fn endpoint_url_never_doubles_slashes() {
    assert_eq!(
        endpoint_url("http://localhost:5000", "chat"),
        "http://localhost:5000/chat"
    );
    assert_eq!(
        endpoint_url("http://localhost:5000/", "/ai/sync"),
        "http://localhost:5000/ai/sync"
    );
    assert_eq!(
        endpoint_url("https://host/api//", "status"),
        "https://host/api/status"
    );
}

#[test]
fn client_keeps_configured_endpoint() {
    let settings = AssistantSettings {
        endpoint: "http://127.0.0.1:9/".to_string(),
        ..AssistantSettings::default()
    };
    let client = HttpAssistantClient::new(&settings).unwrap();
    assert_eq!(client.endpoint(), "http://127.0.0.1:9/");
}

#[test]
fn status_error_display_mentions_code() {
    assert_eq!(
        AssistantError::Status(503).to_string(),
        "assistant returned HTTP 503"
    );
}

#[test]
fn unreachable_endpoint_is_http_error() {
    let settings = AssistantSettings {
        // Port 9 (discard) is not expected to serve HTTP.
        endpoint: "http://127.0.0.1:9".to_string(),
        timeout_ms: 500,
        ..AssistantSettings::default()
    };
    let client = HttpAssistantClient::new(&settings).unwrap();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let err = rt.block_on(client.status()).unwrap_err();
    assert!(matches!(err, AssistantError::Http(_)));
}

mod local_server {
    use super::*;
    use crate::kernel::services::ports::ChatContext;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::runtime::Runtime;

    struct Request {
        line: String,
        body: String,
    }

    async fn read_request(stream: &mut TcpStream) -> Option<Request> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                return None;
            }
            buf.extend_from_slice(&chunk[..n]);
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        Some(Request {
            line: head.lines().next().unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
        })
    }

    fn route(request: &Request) -> (&'static str, String) {
        let mut parts = request.line.split_whitespace();
        let method = parts.next().unwrap_or_default();
        let path = parts.next().unwrap_or_default();
        match (method, path) {
            ("POST", "/chat") => {
                let Ok(chat) = serde_json::from_str::<ChatRequest>(&request.body) else {
                    return ("400 Bad Request", "{}".to_string());
                };
                let body = serde_json::json!({
                    "message": format!("saw {} from {}", chat.message, chat.context.path),
                    "files": { "/index.html": "<h1>new</h1>" },
                    "tokens_used": 42
                });
                ("200 OK", body.to_string())
            }
            ("GET", "/status") => (
                "200 OK",
                r#"{"status":"idle","total_tokens":1234,"sync_status":{"last":"ok"}}"#.to_string(),
            ),
            ("POST", "/ai/sync") => (
                "200 OK",
                r#"{"message":"Global Brain Synchronized","details":{"pushed":3}}"#.to_string(),
            ),
            _ => ("503 Service Unavailable", r#"{"error":"down"}"#.to_string()),
        }
    }

    async fn serve(listener: TcpListener) {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let Some(request) = read_request(&mut stream).await else {
                    return;
                };
                let (status, body) = route(&request);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    }

    /// Starts the fake assistant and returns a client for `base` under it.
    fn start(base: &str) -> (Runtime, HttpAssistantClient) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let listener = rt
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();
        rt.spawn(serve(listener));

        let settings = AssistantSettings {
            endpoint: format!("http://{}{}", addr, base),
            timeout_ms: 5_000,
            ..AssistantSettings::default()
        };
        (rt, HttpAssistantClient::new(&settings).unwrap())
    }

    #[test]
    fn chat_sends_context_and_decodes_reply() {
        let (rt, client) = start("/");
        let request = ChatRequest {
            message: "add a title".to_string(),
            context: ChatContext {
                path: "/index.html".to_string(),
                content: "<p/>".to_string(),
            },
        };

        let reply = rt.block_on(client.chat(&request)).unwrap();
        assert_eq!(reply.message, "saw add a title from /index.html");
        assert_eq!(reply.tokens_used, Some(42));
        assert_eq!(
            reply.files.get("/index.html").map(String::as_str),
            Some("<h1>new</h1>")
        );
        assert!(!reply.starts_training());
    }

    #[test]
    fn status_and_sync_decode() {
        let (rt, client) = start("");

        let status = rt.block_on(client.status()).unwrap();
        assert_eq!(status.status, "idle");
        assert_eq!(status.total_tokens, 1234);
        assert_eq!(status.sync_status["last"], "ok");

        let sync = rt.block_on(client.sync()).unwrap();
        assert_eq!(sync.message, "Global Brain Synchronized");
        assert_eq!(sync.details["pushed"], 3);
    }

    #[test]
    fn non_success_status_maps_to_status_error() {
        let (rt, client) = start("/offline");

        match rt.block_on(client.status()) {
            Err(AssistantError::Status(code)) => assert_eq!(code, 503),
            other => panic!("expected a status error, got {:?}", other.map(|s| s.status)),
        }
        assert!(matches!(
            rt.block_on(client.sync()),
            Err(AssistantError::Status(503))
        ));
    }
}
