use httpmock::{Method::POST, MockServer};
use llm::{ChatRequest, LLMClient, OllamaClient, Turn};

#[tokio::test]
async fn chat_returns_message_content() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/chat")
            .body_contains("\"model\":\"mistral\"")
            .body_contains("earlier");
        then.status(200)
            .header("content-type", "application/json")
            .body("{\"model\":\"mistral\",\"created_at\":\"now\",\"message\":{\"role\":\"assistant\",\"content\":\"ok\"},\"done\":true}");
    });

    let client = OllamaClient::new(server.base_url(), "mistral").unwrap();
    let request = ChatRequest {
        system: None,
        turns: vec![Turn::user("earlier"), Turn::model("sure"), Turn::user("now")],
    };
    let reply = client.complete(&request).await.unwrap();
    mock.assert();
    assert_eq!(reply, "ok");
}

#[test]
fn rejects_invalid_url() {
    assert!(OllamaClient::new("not a url", "mistral").is_err());
}
