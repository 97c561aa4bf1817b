mod common;

use common::Harness;
use llm::FALLBACK_REPLY;
use speakai::AppError;

#[tokio::test]
async fn successful_round_is_recorded_once() {
    let dir = tempfile::tempdir().unwrap();
    let (service, history) = Harness::default().service(dir.path());
    let reply = service.chat("  hello  ", Some("es-ES")).await.unwrap();
    assert_eq!(reply.response, "echo: hello");
    assert_eq!(reply.language, "es");
    let url = reply.audio_url.unwrap();
    assert!(url.starts_with("/static/audio/response_"));

    let history = history.lock().await;
    assert_eq!(history.len(), 1);
    let entry = history.iter().next().unwrap();
    assert_eq!(entry.user_text, "hello");
    assert_eq!(entry.ai_text, "echo: hello");
    assert_eq!(entry.language, "es");
}

#[tokio::test]
async fn generation_failure_records_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness {
        llm_fails: true,
        ..Harness::default()
    };
    let (service, history) = harness.service(dir.path());
    let reply = service.chat("hi", None).await.unwrap();
    assert_eq!(reply.response, FALLBACK_REPLY);
    assert_eq!(reply.language, "en");
    assert_eq!(history.lock().await.iter().next().unwrap().ai_text, FALLBACK_REPLY);
}

#[tokio::test]
async fn speech_failure_keeps_text_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness {
        tts: Some(true),
        ..Harness::default()
    };
    let (service, history) = harness.service(dir.path());
    let reply = service.chat("hi", None).await.unwrap();
    assert_eq!(reply.response, "echo: hi");
    assert_eq!(reply.audio_url, None);
    assert_eq!(history.lock().await.len(), 1);
}

#[tokio::test]
async fn speech_disabled_has_no_audio() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness {
        tts: None,
        ..Harness::default()
    };
    let (service, _) = harness.service(dir.path());
    assert_eq!(service.chat("hi", None).await.unwrap().audio_url, None);
}

#[tokio::test]
async fn empty_message_is_rejected_and_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let (service, history) = Harness::default().service(dir.path());
    let err = service.chat("   ", None).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "Empty message"));
    assert!(history.lock().await.is_empty());
}

#[tokio::test]
async fn unsupported_language_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (service, history) = Harness::default().service(dir.path());
    let err = service.chat("hi", Some("pt-BR")).await.unwrap_err();
    assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    assert!(history.lock().await.is_empty());
}

#[tokio::test]
async fn memory_disabled_skips_recording() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness {
        remember: false,
        ..Harness::default()
    };
    let (service, history) = harness.service(dir.path());
    service.chat("hi", None).await.unwrap();
    assert!(history.lock().await.is_empty());
}

#[tokio::test]
async fn history_stays_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness {
        capacity: 3,
        tts: None,
        ..Harness::default()
    };
    let (service, history) = harness.service(dir.path());
    for msg in ["A", "B", "C", "D"] {
        service.chat(msg, None).await.unwrap();
    }
    let history = history.lock().await;
    let users: Vec<&str> = history.iter().map(|e| e.user_text.as_str()).collect();
    assert_eq!(users, ["B", "C", "D"]);
}

#[tokio::test]
async fn model_context_follows_history_window() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness {
        capacity: 3,
        tts: None,
        ..Harness::default()
    };
    let (service, history, llm) = harness.service_with_llm(dir.path());
    for i in 0..10 {
        service.chat(&format!("m{i}"), None).await.unwrap();
    }
    {
        let requests = llm.requests.lock().unwrap();
        assert!(requests.iter().all(|r| r.turns.len() <= 7));
        let last = requests.last().unwrap();
        assert_eq!(last.turns.len(), 7);
        assert_eq!(last.turns[0].text, "m6");
        assert_eq!(last.turns[6].text, "m9");
    }

    service.clear_history().await;
    service.chat("again", None).await.unwrap();
    let requests = llm.requests.lock().unwrap();
    let last = requests.last().unwrap();
    assert_eq!(last.turns.len(), 1);
    assert_eq!(last.turns[0].text, "again");
    assert_eq!(history.lock().await.len(), 1);
}
