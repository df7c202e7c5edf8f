//! Integration tests for the Resend client (wiremock-based)

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_mail::{EmailRequest, MailError, MailSender, ResendClient, ResendConfig};

fn client_for_mock(base_url: &str) -> ResendClient {
    ResendClient::new(ResendConfig::with_api_key("re_test_key").with_base_url(base_url)).unwrap()
}

fn contact_mail() -> EmailRequest {
    EmailRequest {
        from: "SL ta mig hem <onboarding@resend.dev>".to_string(),
        to: vec!["kontakt@example.se".to_string()],
        reply_to: Some("anna@example.se".to_string()),
        subject: "Kontaktformulär: Anna".to_string(),
        html: "<h2>Nytt meddelande från kontaktformuläret</h2>".to_string(),
        text: "Nytt meddelande från kontaktformuläret".to_string(),
    }
}

#[tokio::test]
async fn send_success_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_test_key"))
        .and(body_partial_json(serde_json::json!({
            "from": "SL ta mig hem <onboarding@resend.dev>",
            "to": ["kontakt@example.se"],
            "reply_to": "anna@example.se",
            "subject": "Kontaktformulär: Anna"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let id = client.send(&contact_mail()).await.unwrap();

    assert_eq!(id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");
}

#[tokio::test]
async fn api_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "statusCode": 403,
            "name": "validation_error",
            "message": "You can only send testing emails to your own email address"
        })))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let err = client.send(&contact_mail()).await.unwrap_err();

    match err {
        MailError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("testing emails"));
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn error_without_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let err = client.send(&contact_mail()).await.unwrap_err();

    assert!(matches!(err, MailError::Api { status: 502, .. }));
}

#[tokio::test]
async fn malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let err = client.send(&contact_mail()).await.unwrap_err();

    assert!(matches!(err, MailError::InvalidResponse(_)));
}

#[tokio::test]
async fn connection_refused() {
    let client = client_for_mock("http://127.0.0.1:1");
    let err = client.send(&contact_mail()).await.unwrap_err();

    assert!(matches!(
        err,
        MailError::Request(_) | MailError::Timeout { .. }
    ));
}
