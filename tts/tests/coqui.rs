use httpmock::{Method::GET, MockServer};
use tts::{CoquiTts, Synthesizer, TTSError};

#[tokio::test]
async fn coqui_url_has_required_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/tts")
                .query_param("text", "hello")
                .query_param("speaker_id", "p1")
                .query_param("style_wav", "")
                .query_param("language_id", "en");
            then.status(200).body("abcd");
        })
        .await;

    let tts = CoquiTts::new(server.url("/api/tts"), Some("p1".into()), Some("en".into()));
    let audio = tts.synthesize("hello", "es").await.unwrap();
    mock.assert_async().await;
    assert_eq!(audio, b"abcd");
}

#[tokio::test]
async fn coqui_defaults_voice() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/tts")
                .query_param("text", "hi")
                .query_param("speaker_id", "p123")
                .query_param("style_wav", "")
                .query_param("language_id", "");
            then.status(200).body("abcd");
        })
        .await;

    let tts = CoquiTts::new(server.url("/api/tts"), None, None);
    tts.synthesize("hi", "en").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn coqui_server_errors_surface() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/tts");
            then.status(500);
        })
        .await;

    let tts = CoquiTts::new(server.url("/api/tts"), None, None);
    let err = tts.synthesize("hi", "en").await.unwrap_err();
    assert!(matches!(err, TTSError::Api { status: 500 }));
}
