//! Telegram Transport Tests
//!
//! Bot API calls against a mock server: update parsing, outgoing messages
//! with inline keyboards, callback acknowledgement and API errors.

use crate::models::EmotionRecord;
use crate::responder::{format_diary, Menu, OutboundAction};
use crate::transport::telegram::MAX_MESSAGE_UNITS;
use crate::transport::{ChatTransport, ChatUser, InboundEvent, TelegramTransport};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123:abc";

fn transport_for(server: &MockServer) -> TelegramTransport {
    TelegramTransport::new(&server.uri(), TOKEN, 1).expect("Failed to build transport")
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result }))
}

#[tokio::test]
async fn test_poll_once_parses_messages_and_callbacks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .and(body_partial_json(json!({ "offset": 0 })))
        .respond_with(ok(json!([
            {
                "update_id": 10,
                "message": {
                    "chat": { "id": 77 },
                    "from": { "id": 5, "username": "alice" },
                    "text": "/mood"
                }
            },
            {
                "update_id": 11,
                "callback_query": {
                    "id": "cb-1",
                    "from": { "id": 6 },
                    "message": { "chat": { "id": 78 } },
                    "data": "relax_breath"
                }
            },
            { "update_id": 12, "edited_message": {} }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (events, next_offset) = transport_for(&server).poll_once(0).await.unwrap();

    assert_eq!(next_offset, 13);
    assert_eq!(
        events,
        vec![
            InboundEvent::Message {
                chat_id: 77,
                user: ChatUser {
                    id: 5,
                    display_name: "alice".to_string()
                },
                text: "/mood".to_string(),
            },
            InboundEvent::Callback {
                callback_id: "cb-1".to_string(),
                chat_id: 78,
                user: ChatUser {
                    id: 6,
                    display_name: String::new()
                },
                data: "relax_breath".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_message_without_text_becomes_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ok(json!([
            { "update_id": 3, "message": { "chat": { "id": 1 }, "from": { "id": 1 } } }
        ])))
        .mount(&server)
        .await;

    let (events, _) = transport_for(&server).poll_once(3).await.unwrap();
    assert!(matches!(&events[0], InboundEvent::Message { text, .. } if text.is_empty()));
}

#[tokio::test]
async fn test_empty_batch_keeps_offset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ok(json!([])))
        .mount(&server)
        .await;

    let (events, next_offset) = transport_for(&server).poll_once(42).await.unwrap();
    assert!(events.is_empty());
    assert_eq!(next_offset, 42);
}

#[tokio::test]
async fn test_send_plain_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .and(body_json(json!({ "chat_id": 77, "text": "привіт" })))
        .respond_with(ok(json!({ "message_id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    transport_for(&server)
        .send(77, &OutboundAction::text("привіт"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_with_menu_attaches_inline_keyboard() {
    let server = MockServer::start().await;
    let rows: Vec<serde_json::Value> = Menu::Relax
        .buttons()
        .into_iter()
        .map(|b| json!([{ "text": b.title, "callback_data": b.token }]))
        .collect();

    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .and(body_partial_json(json!({
            "chat_id": 77,
            "text": "Оберіть",
            "reply_markup": { "inline_keyboard": rows }
        })))
        .respond_with(ok(json!({ "message_id": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    transport_for(&server)
        .send(77, &OutboundAction::with_menu("Оберіть", Menu::Relax))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_answer_callback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/answerCallbackQuery", TOKEN)))
        .and(body_json(json!({ "callback_query_id": "cb-9" })))
        .respond_with(ok(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    transport_for(&server).answer_callback("cb-9").await.unwrap();
}

#[tokio::test]
async fn test_api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(1, &OutboundAction::text("x"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("chat not found"));
}

#[tokio::test]
async fn test_full_diary_is_split_under_telegram_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .respond_with(ok(json!({ "message_id": 3 })))
        .mount(&server)
        .await;

    let records: Vec<EmotionRecord> = (0..50)
        .map(|i| EmotionRecord {
            id: 50 - i,
            user_id: 1,
            username: String::new(),
            text: "щ".repeat(200),
            sentiment: "negative".to_string(),
            score: 0.6,
            created_at: 1_700_000_000 - i,
        })
        .collect();
    let diary = format_diary(&records);
    assert!(diary.encode_utf16().count() > 4096);

    transport_for(&server)
        .send(1, &OutboundAction::text(diary))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests.len() >= 2);
    let mut entries = 0;
    for request in &requests {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let text = body["text"].as_str().unwrap();
        assert!(text.encode_utf16().count() <= MAX_MESSAGE_UNITS);
        entries += text.matches("[negative 0.60]").count();
    }
    assert_eq!(entries, 50);
}

#[tokio::test]
async fn test_long_menu_message_keeps_menu_on_last_chunk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .respond_with(ok(json!({ "message_id": 4 })))
        .mount(&server)
        .await;

    let long = format!("{}\n{}", "а".repeat(3000), "б".repeat(3000));
    transport_for(&server)
        .send(1, &OutboundAction::with_menu(long, Menu::Relax))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let last: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert!(first.get("reply_markup").is_none());
    assert!(last["reply_markup"]["inline_keyboard"].is_array());
}
