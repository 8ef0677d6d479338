//! Email deliverability validation client.
//!
//! Talks to the external validation service before a contact card is
//! emailed. The flow deliberately prefers availability over validator
//! uptime: a quota-exhausted validator is a soft pass, while an explicit
//! UNDELIVERABLE verdict is a hard block.

use serde::Deserialize;

/// Validation outcome for a recipient address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Address looks deliverable; proceed.
    Deliverable,
    /// Address is explicitly undeliverable; block the send.
    Undeliverable,
    /// The validator ran out of quota; proceed without verification.
    QuotaExhausted,
    /// The validator could not produce a verdict; block the send.
    Unverifiable,
}

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    #[serde(default)]
    is_valid_format: Option<BoolField>,
    #[serde(default)]
    deliverability: Option<String>,
    #[serde(default)]
    error: Option<ValidatorApiError>,
}

#[derive(Debug, Deserialize)]
struct BoolField {
    #[serde(default)]
    value: bool,
}

#[derive(Debug, Deserialize)]
struct ValidatorApiError {
    #[serde(default)]
    code: Option<String>,
}

/// Client for the deliverability validation service.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl EmailValidator {
    #[must_use]
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// ## Summary
    /// Verifies the deliverability of an address.
    ///
    /// Never returns an error: any transport or decode failure collapses to
    /// [`Verdict::Unverifiable`], which the caller surfaces as a generic
    /// "unable to verify" message.
    #[tracing::instrument(skip(self, address))]
    pub async fn verify(&self, address: &str) -> Verdict {
        match self.request(address).await {
            Ok(verdict) => verdict,
            Err(error) => {
                tracing::warn!(error = %error, "Email validation call failed");
                Verdict::Unverifiable
            }
        }
    }

    async fn request(&self, address: &str) -> Result<Verdict, reqwest::Error> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("api_key", self.api_key.as_str()), ("email", address)])
            .send()
            .await?;

        let status = response.status();
        let body: ValidationResponse = response.json().await?;

        if let Some(error) = &body.error {
            if error.code.as_deref() == Some("quota_reached") {
                tracing::warn!("Email validator quota exhausted");
                return Ok(Verdict::QuotaExhausted);
            }
            tracing::warn!(code = ?error.code, "Email validator returned an error");
            return Ok(Verdict::Unverifiable);
        }
        if !status.is_success() {
            tracing::warn!(%status, "Email validator returned an error status");
            return Ok(Verdict::Unverifiable);
        }

        if body.deliverability.as_deref() == Some("UNDELIVERABLE") {
            return Ok(Verdict::Undeliverable);
        }
        if let Some(format) = &body.is_valid_format
            && !format.value
        {
            return Ok(Verdict::Undeliverable);
        }

        Ok(Verdict::Deliverable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve(status: u16, body: &'static str) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let response = tiny_http::Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });
        format!("http://{addr}/v1/")
    }

    fn validator(api_url: String) -> EmailValidator {
        EmailValidator::new(reqwest::Client::new(), api_url, "test-key")
    }

    #[test_log::test(tokio::test)]
    async fn deliverable_address_passes() {
        let url = serve(
            200,
            r#"{"is_valid_format":{"value":true},"deliverability":"DELIVERABLE"}"#,
        );
        assert_eq!(validator(url).verify("ada@example.com").await, Verdict::Deliverable);
    }

    #[test_log::test(tokio::test)]
    async fn undeliverable_is_a_hard_block() {
        let url = serve(
            200,
            r#"{"is_valid_format":{"value":true},"deliverability":"UNDELIVERABLE"}"#,
        );
        assert_eq!(
            validator(url).verify("bounce@example.com").await,
            Verdict::Undeliverable
        );
    }

    #[test_log::test(tokio::test)]
    async fn invalid_format_blocks() {
        let url = serve(
            200,
            r#"{"is_valid_format":{"value":false},"deliverability":"UNKNOWN"}"#,
        );
        assert_eq!(validator(url).verify("not-an-email").await, Verdict::Undeliverable);
    }

    #[test_log::test(tokio::test)]
    async fn unknown_deliverability_passes() {
        let url = serve(
            200,
            r#"{"is_valid_format":{"value":true},"deliverability":"RISKY"}"#,
        );
        assert_eq!(validator(url).verify("ada@example.com").await, Verdict::Deliverable);
    }

    #[test_log::test(tokio::test)]
    async fn quota_exhausted_is_a_soft_pass() {
        let url = serve(422, r#"{"error":{"code":"quota_reached"}}"#);
        assert_eq!(
            validator(url).verify("ada@example.com").await,
            Verdict::QuotaExhausted
        );
    }

    #[test_log::test(tokio::test)]
    async fn other_validator_errors_are_hard() {
        let url = serve(401, r#"{"error":{"code":"unauthorized"}}"#);
        assert_eq!(
            validator(url).verify("ada@example.com").await,
            Verdict::Unverifiable
        );
    }

    #[test_log::test(tokio::test)]
    async fn network_failure_is_unverifiable() {
        let validator = validator("http://127.0.0.1:9/v1/".to_string());
        assert_eq!(validator.verify("ada@example.com").await, Verdict::Unverifiable);
    }
}
