use super::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: serde_json::Value,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

async fn read_http_request(stream: &mut tokio::net::TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut header_end = None;
    while header_end.is_none() {
        let mut chunk = [0_u8; 1024];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        header_end = buffer
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .map(|index| index + 4);
    }

    let header_end = header_end.ok_or("header end should exist")?;
    let header_text =
        std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
    let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?
        .to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }

    let body = serde_json::from_slice(&body).map_err(|err| err.to_string())?;
    Ok(CapturedRequest {
        request_line,
        headers,
        body,
    })
}

/// Serve one canned response on a loopback port and hand back what was received.
async fn serve_once(
    status_line: &'static str,
    response_body: &'static str,
) -> (String, tokio::task::JoinHandle<Result<CapturedRequest, String>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
        let captured = read_http_request(&mut stream).await?;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response_body}",
            response_body.len()
        );
        stream
            .write_all(response.as_bytes())
            .await
            .map_err(|err| err.to_string())?;
        stream.flush().await.map_err(|err| err.to_string())?;
        Ok(captured)
    });

    (format!("http://{addr}/v1/"), server)
}

fn settings(base_url: &str, history_mode: HistoryMode) -> ClientSettings {
    ClientSettings {
        base_url: base_url.to_string(),
        model: "gemma2-9b-it".to_string(),
        credential: Credential::Key("test-key".to_string()),
        history_mode,
        timeout: Some(Duration::from_secs(5)),
    }
}

fn conversation() -> Vec<ChatTurn> {
    vec![
        ChatTurn::human("Hello"),
        ChatTurn::assistant("Hi there!"),
        ChatTurn::human("What did I just say?"),
    ]
}

const OK_BODY: &str =
    r#"{"model":"gemma2-9b-it","choices":[{"index":0,"message":{"role":"assistant","content":"You said hello."},"finish_reason":"stop"}]}"#;

#[test]
fn latest_only_selects_newest_human_turn() {
    let messages = HistoryMode::LatestOnly.select(&conversation());
    assert_eq!(
        messages,
        vec![ChatMessage {
            role: "user".to_string(),
            content: "What did I just say?".to_string(),
        }]
    );
}

#[test]
fn latest_only_skips_trailing_assistant_turns() {
    let turns = vec![ChatTurn::human("Hello"), ChatTurn::assistant("Hi")];
    let messages = HistoryMode::LatestOnly.select(&turns);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Hello");
}

#[test]
fn full_history_keeps_every_turn_in_order() {
    let messages = HistoryMode::FullHistory.select(&conversation());
    let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["user", "assistant", "user"]);
}

#[test]
fn history_mode_display_matches_config_spelling() {
    assert_eq!(HistoryMode::LatestOnly.to_string(), "latest-only");
    assert_eq!(HistoryMode::FullHistory.to_string(), "full-history");
}

#[test]
fn settings_follow_config_defaults() {
    let settings = ClientSettings::from_config(&Config::default());
    assert_eq!(settings.model, "gemma2-9b-it");
    assert_eq!(settings.base_url, "https://api.groq.com/openai/v1");
    assert_eq!(settings.credential, Credential::Env("GROQ_API_KEY".to_string()));
    assert_eq!(settings.history_mode, HistoryMode::LatestOnly);
    assert_eq!(settings.timeout, None);
}

#[test]
fn api_error_summary_prefers_provider_message() {
    let body = r#"{"error":{"message":"Invalid   API\nKey","type":"invalid_request_error"}}"#;
    assert_eq!(summarize_api_error(body), "Invalid API Key");
    assert_eq!(summarize_api_error(r#"{"error":"quota"}"#), "quota");
    assert_eq!(summarize_api_error("  "), "<empty>");
    assert_eq!(summarize_api_error("<html>bad gateway</html>"), "<html>bad gateway</html>");
}

#[tokio::test]
async fn missing_credential_fails_on_first_send() {
    let var = "SESSIONCHAT_TEST_UNSET_CREDENTIAL";
    let client = CompletionClient::new(ClientSettings {
        credential: Credential::Env(var.to_string()),
        ..settings("http://127.0.0.1:9", HistoryMode::LatestOnly)
    })
    .expect("client should build without a credential");

    let err = client
        .send(&[ChatTurn::human("Hello")])
        .await
        .expect_err("send should fail");
    assert!(matches!(err, ChatError::MissingCredential { ref var } if var == "SESSIONCHAT_TEST_UNSET_CREDENTIAL"));
    assert_eq!(
        err.to_string(),
        "SESSIONCHAT_TEST_UNSET_CREDENTIAL environment variable not set"
    );
}

#[tokio::test]
async fn send_without_human_turn_is_rejected() {
    let client = CompletionClient::new(settings("http://127.0.0.1:9", HistoryMode::LatestOnly))
        .expect("client should build");
    let err = client.send(&[]).await.expect_err("send should fail");
    assert!(matches!(err, ChatError::EmptyRequest));
}

#[tokio::test]
async fn send_posts_latest_turn_and_returns_assistant_reply() {
    let (base_url, server) = serve_once("200 OK", OK_BODY).await;
    let client = CompletionClient::new(settings(&base_url, HistoryMode::LatestOnly))
        .expect("client should build");

    let reply = client.send(&conversation()).await.expect("send should succeed");
    assert_eq!(reply, ChatTurn::assistant("You said hello."));

    let captured = server
        .await
        .expect("server task should join")
        .expect("server should capture request");
    assert_eq!(captured.request_line, "POST /v1/chat/completions HTTP/1.1");
    assert_eq!(captured.header("authorization"), Some("Bearer test-key"));
    assert_eq!(
        captured.body,
        serde_json::json!({
            "model": "gemma2-9b-it",
            "messages": [{"role": "user", "content": "What did I just say?"}],
            "stream": false
        })
    );
}

#[tokio::test]
async fn full_history_mode_forwards_prior_turns() {
    let (base_url, server) = serve_once("200 OK", OK_BODY).await;
    let client = CompletionClient::new(settings(&base_url, HistoryMode::FullHistory))
        .expect("client should build");

    client.send(&conversation()).await.expect("send should succeed");

    let captured = server
        .await
        .expect("server task should join")
        .expect("server should capture request");
    let messages = captured.body["messages"]
        .as_array()
        .expect("messages should be an array");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "Hi there!");
}

#[tokio::test]
async fn non_success_status_becomes_api_error() {
    let (base_url, server) = serve_once(
        "401 Unauthorized",
        r#"{"error":{"message":"Invalid API Key"}}"#,
    )
    .await;
    let client = CompletionClient::new(settings(&base_url, HistoryMode::LatestOnly))
        .expect("client should build");

    let err = client
        .send(&[ChatTurn::human("Hello")])
        .await
        .expect_err("send should fail");
    match err {
        ChatError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API Key");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    server
        .await
        .expect("server task should join")
        .expect("server should capture request");
}

#[tokio::test]
async fn empty_choices_are_malformed() {
    let (base_url, server) = serve_once("200 OK", r#"{"choices":[]}"#).await;
    let client = CompletionClient::new(settings(&base_url, HistoryMode::LatestOnly))
        .expect("client should build");

    let err = client
        .send(&[ChatTurn::human("Hello")])
        .await
        .expect_err("send should fail");
    assert!(matches!(err, ChatError::MalformedResponse(_)));
    server
        .await
        .expect("server task should join")
        .expect("server should capture request");
}
