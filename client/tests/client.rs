// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client integration tests with wiremock.

use calboard_client::{AuthMethod, CalendarClient, CalendarEvent, ClientConfig, ClientError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CalendarClient {
    let config = ClientConfig {
        base_url: server.uri(),
        auth: AuthMethod::None,
        ..Default::default()
    };
    CalendarClient::new(config).expect("Failed to create client")
}

fn standup() -> CalendarEvent {
    CalendarEvent {
        title: "Standup".to_string(),
        start: "2024-01-02T09:00".to_string(),
        end: "2024-01-02T09:15".to_string(),
        all_day: false,
    }
}

#[tokio::test]
async fn client_list_events() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": [{
                "title": "A",
                "start": "2024-01-01T10:00",
                "end": "2024-01-01T11:00",
                "allDay": false
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let events = client_for(&mock_server)
        .list_events()
        .await
        .expect("Failed to list events");

    assert_eq!(
        events,
        vec![CalendarEvent {
            title: "A".to_string(),
            start: "2024-01-01T10:00".to_string(),
            end: "2024-01-01T11:00".to_string(),
            all_day: false,
        }]
    );
}

#[tokio::test]
async fn client_list_events_without_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_events().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn client_list_events_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendar"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_events().await.unwrap_err();
    match err {
        ClientError::Http { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "database down");
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_create_event_sends_exact_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calendar"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "title": "Standup",
            "start": "2024-01-02T09:00",
            "end": "2024-01-02T09:15",
            "allDay": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = client_for(&mock_server)
        .create_event(&standup())
        .await
        .expect("Failed to create event");

    assert!(resp.success);
}

#[tokio::test]
async fn client_create_all_day_event() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calendar"))
        .and(body_json(json!({
            "title": "Holiday",
            "start": "2024-01-05T00:00",
            "end": "2024-01-05T23:59",
            "allDay": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "insertedId": "65a1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let event = CalendarEvent {
        title: "Holiday".to_string(),
        start: "2024-01-05T00:00".to_string(),
        end: "2024-01-05T23:59".to_string(),
        all_day: true,
    };
    let resp = client_for(&mock_server)
        .create_event(&event)
        .await
        .expect("Failed to create event");

    assert!(resp.success);
    assert_eq!(resp.extra.get("insertedId"), Some(&json!("65a1")));
}

#[tokio::test]
async fn client_create_event_soft_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calendar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&mock_server)
        .await;

    let resp = client_for(&mock_server)
        .create_event(&standup())
        .await
        .expect("Soft failure is not an error");

    assert!(!resp.success);
}

#[tokio::test]
async fn client_create_event_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calendar"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .create_event(&standup())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status code 400");
}

#[tokio::test]
async fn client_create_event_network_error() {
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 5,
        ..Default::default()
    };
    let client = CalendarClient::new(config).expect("Failed to create client");

    let err = client.create_event(&standup()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert!(err.to_string().contains("Network Error"));
}

#[tokio::test]
async fn client_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendar"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "payload": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        base_url: format!("{}/", mock_server.uri()),
        auth: AuthMethod::Bearer {
            token: "secret".to_string(),
        },
        ..Default::default()
    };
    let events = CalendarClient::new(config)
        .unwrap()
        .list_events()
        .await
        .expect("Failed to list events");

    assert!(events.is_empty());
}
