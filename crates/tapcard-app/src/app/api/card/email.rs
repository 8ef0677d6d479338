use salvo::{Depot, Request, Response, handler, http::StatusCode, writing::Json};
use serde::Deserialize;
use tracing::error;

use tapcard_service::delivery::{EmailDeps, EmailFlowError, Platform, email_contact};
use tapcard_service::profile::ProfileLookup;

use super::profile::ErrorResponse;
use crate::clients::get_clients_from_depot;

/// ## Summary
/// Email request payload
#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// ## Summary
/// POST `/api/card/profile/{handle}/email` - Email the contact card.
///
/// Validates the recipient address before sending; an explicitly
/// undeliverable address blocks the send, while a quota-exhausted
/// validator does not.
///
/// ## Errors
/// Returns HTTP 400 for a missing body or an empty, undeliverable, or
/// unverifiable address
/// Returns HTTP 404 if no NFC-enabled profile exists for the handle
/// Returns HTTP 502 if a collaborator fails, with its message verbatim
/// when the send collaborator provided one
#[handler]
pub(super) async fn email_contact_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(handle) = req.param::<String>("handle") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse {
            error: "Handle required".to_string(),
        }));
        return;
    };

    let email_req: EmailRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            error!(error = ?e, "Failed to parse email request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    let clients = match get_clients_from_depot(depot) {
        Ok(clients) => clients,
        Err(e) => {
            error!(error = ?e, "Failed to get service clients");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
            return;
        }
    };

    let profile = match clients.profiles.fetch(&handle).await {
        Ok(ProfileLookup::Found(profile)) => profile,
        Ok(ProfileLookup::NotFound | ProfileLookup::NfcDisabled) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse {
                error: "Profile not found".to_string(),
            }));
            return;
        }
        Err(e) => {
            error!(error = %e, "Profile fetch failed");
            res.status_code(StatusCode::BAD_GATEWAY);
            res.render(Json(ErrorResponse {
                error: "Failed to load profile".to_string(),
            }));
            return;
        }
    };

    let user_agent = req.header::<String>("user-agent").unwrap_or_default();
    let platform = Platform::from_user_agent(&user_agent);
    let deps = EmailDeps {
        validator: &clients.validator,
        sender: &clients.sender,
        inliner: clients.inliner.as_ref(),
    };

    match email_contact(&profile, platform, &email_req.email, deps).await {
        Ok(receipt) => {
            tracing::info!(to = %receipt.to, "Contact card emailed");
            res.render(Json(serde_json::json!({})));
        }
        Err(
            e @ (EmailFlowError::EmptyAddress
            | EmailFlowError::Undeliverable
            | EmailFlowError::VerificationFailed),
        ) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: e.to_string(),
            }));
        }
        Err(EmailFlowError::SendFailed(message)) => {
            res.status_code(StatusCode::BAD_GATEWAY);
            res.render(Json(ErrorResponse { error: message }));
        }
        Err(EmailFlowError::Service(e)) => {
            error!(error = %e, "Email delivery failed");
            res.status_code(StatusCode::BAD_GATEWAY);
            res.render(Json(ErrorResponse {
                error: "Failed to send email".to_string(),
            }));
        }
    }
}
