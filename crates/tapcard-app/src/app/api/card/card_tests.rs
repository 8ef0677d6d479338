//! Handler tests for the card page API.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::http::StatusCode;
    use salvo::prelude::*;
    use salvo::test::{ResponseExt, TestClient};

    use crate::app::api::routes;
    use crate::clients::{ClientsHandler, ServiceClients};
    use tapcard_service::email::{EmailSender, EmailValidator};
    use tapcard_service::photo::FixedPhotoInliner;
    use tapcard_service::profile::ProfileClient;

    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0 Mobile";
    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Safari/604.1";

    const PROFILE_BODY: &str = r#"{"data":{"handle":"ada","fullName":"Ada Lovelace","title":"Analyst","nfcEnabled":true,"links":[{"type":"email","value":"ada@example.com"},{"type":"linkedin","value":"ada-lovelace"}],"alert":{"text":"promo","kind":"text"}}}"#;

    fn serve(status: u16, body: &'static str) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let response = tiny_http::Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });
        format!("http://{addr}")
    }

    fn service(backend: String, validation: String, send: String) -> Service {
        let client = reqwest::Client::new();
        let clients = ServiceClients {
            profiles: ProfileClient::new(client.clone(), backend),
            validator: EmailValidator::new(client.clone(), validation, "test-key"),
            sender: EmailSender::new(client, send),
            inliner: Arc::new(FixedPhotoInliner(None)),
        };
        Service::new(
            Router::new()
                .hoop(ClientsHandler {
                    clients: Arc::new(clients),
                })
                .push(routes()),
        )
    }

    fn profile_service(backend: String) -> Service {
        // Validation and send collaborators unreachable; profile routes
        // never touch them.
        service(
            backend,
            "http://127.0.0.1:9/v1/".to_string(),
            "http://127.0.0.1:9/send".to_string(),
        )
    }

    #[test_log::test(tokio::test)]
    async fn healthcheck_returns_ok() {
        let service = profile_service("http://127.0.0.1:9".to_string());
        let mut resp = TestClient::get("http://127.0.0.1:5800/api/card/healthcheck")
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
        assert_eq!(resp.take_string().await.unwrap(), "OK");
    }

    #[test_log::test(tokio::test)]
    async fn profile_fetch_returns_data_envelope() {
        let service = profile_service(serve(200, PROFILE_BODY));
        let mut resp = TestClient::get("http://127.0.0.1:5800/api/card/profile/ada")
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
        let body = resp.take_string().await.unwrap();
        assert!(body.contains("\"fullName\":\"Ada Lovelace\""));
        assert!(body.contains("\"alert\""));
    }

    #[test_log::test(tokio::test)]
    async fn dismissed_alert_removed_from_response() {
        let service = profile_service(serve(200, PROFILE_BODY));
        let mut resp =
            TestClient::get("http://127.0.0.1:5800/api/card/profile/ada?dismissed=promo")
                .send(&service)
                .await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
        let body = resp.take_string().await.unwrap();
        assert!(body.contains("\"fullName\":\"Ada Lovelace\""));
        assert!(body.contains("\"alert\":null"));
    }

    #[test_log::test(tokio::test)]
    async fn unknown_handle_is_not_found() {
        let service = profile_service(serve(404, r#"{"error":"not found"}"#));
        let mut resp = TestClient::get("http://127.0.0.1:5800/api/card/profile/ghost")
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::NOT_FOUND));
        let body = resp.take_string().await.unwrap();
        assert!(body.contains("Profile not found"));
    }

    #[test_log::test(tokio::test)]
    async fn disabled_card_has_distinct_body() {
        let service = profile_service(serve(
            200,
            r#"{"data":{"handle":"ada","fullName":"Ada Lovelace","nfcEnabled":false}}"#,
        ));
        let mut resp = TestClient::get("http://127.0.0.1:5800/api/card/profile/ada")
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
        let body = resp.take_string().await.unwrap();
        assert!(body.contains("\"nfcEnabled\":false"));
        assert!(!body.contains("Profile not found"));
    }

    #[test_log::test(tokio::test)]
    async fn contact_download_carries_vcard_headers() {
        let service = profile_service(serve(200, PROFILE_BODY));
        let mut resp = TestClient::get("http://127.0.0.1:5800/api/card/profile/ada/contact.vcf")
            .add_header("User-Agent", ANDROID_UA, true)
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
        let content_type = resp
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/vcard"));
        let disposition = resp
            .headers()
            .get("Content-Disposition")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert_eq!(disposition, "attachment; filename=\"Ada_Lovelace.vcf\"");
        assert!(resp.headers().contains_key("ETag"));

        let body = resp.take_string().await.unwrap();
        assert!(body.starts_with("BEGIN:VCARD\r\n"));
        assert!(body.contains("URL;TYPE=LinkedIn:"));
    }

    #[test_log::test(tokio::test)]
    async fn apple_user_agent_selects_structured_social_fields() {
        let service = profile_service(serve(200, PROFILE_BODY));
        let mut resp = TestClient::get("http://127.0.0.1:5800/api/card/profile/ada/contact.vcf")
            .add_header("User-Agent", IPHONE_UA, true)
            .send(&service)
            .await;

        let body = resp.take_string().await.unwrap();
        assert!(body.contains("X-SOCIALPROFILE;type=linkedin:"));
    }

    #[test_log::test(tokio::test)]
    async fn email_with_empty_address_is_rejected() {
        let service = profile_service(serve(200, PROFILE_BODY));
        let mut resp = TestClient::post("http://127.0.0.1:5800/api/card/profile/ada/email")
            .json(&serde_json::json!({"email": "  "}))
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
        let body = resp.take_string().await.unwrap();
        assert!(body.contains("Email address is required"));
    }

    #[test_log::test(tokio::test)]
    async fn undeliverable_address_is_rejected() {
        let service = service(
            serve(200, PROFILE_BODY),
            serve(
                200,
                r#"{"is_valid_format":{"value":true},"deliverability":"UNDELIVERABLE"}"#,
            ),
            "http://127.0.0.1:9/send".to_string(),
        );
        let mut resp = TestClient::post("http://127.0.0.1:5800/api/card/profile/ada/email")
            .json(&serde_json::json!({"email": "bounce@example.com"}))
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
        let body = resp.take_string().await.unwrap();
        assert!(body.contains("undeliverable"));
    }

    #[test_log::test(tokio::test)]
    async fn deliverable_address_sends_the_card() {
        let service = service(
            serve(200, PROFILE_BODY),
            serve(
                200,
                r#"{"is_valid_format":{"value":true},"deliverability":"DELIVERABLE"}"#,
            ),
            serve(200, "{}"),
        );
        let resp = TestClient::post("http://127.0.0.1:5800/api/card/profile/ada/email")
            .add_header("User-Agent", ANDROID_UA, true)
            .json(&serde_json::json!({"email": "ada@example.com"}))
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
    }

    #[test_log::test(tokio::test)]
    async fn send_failure_surfaces_collaborator_message() {
        let service = service(
            serve(200, PROFILE_BODY),
            serve(
                200,
                r#"{"is_valid_format":{"value":true},"deliverability":"DELIVERABLE"}"#,
            ),
            serve(500, r#"{"message":"Mailbox full"}"#),
        );
        let mut resp = TestClient::post("http://127.0.0.1:5800/api/card/profile/ada/email")
            .json(&serde_json::json!({"email": "ada@example.com"}))
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::BAD_GATEWAY));
        let body = resp.take_string().await.unwrap();
        assert!(body.contains("Mailbox full"));
    }
}
