use std::collections::HashSet;

use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Serialize;
use tracing::error;

use tapcard_core::clock::SystemClock;
use tapcard_service::profile::{ProfileLookup, scrub_alert};
use tapcard_vcf::Profile;

use crate::clients::get_clients_from_depot;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    data: Profile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DisabledResponse {
    nfc_enabled: bool,
}

/// ## Summary
/// GET `/api/card/profile/{handle}` - Fetch the card profile for a handle.
///
/// Expired alerts are always removed; `?dismissed=` (repeatable, comma
/// lists accepted) additionally suppresses alerts the visitor dismissed in
/// this page session. A card that exists but is not NFC enabled gets its
/// own response body, distinct from not-found.
///
/// ## Errors
/// Returns HTTP 400 if the handle path parameter is missing
/// Returns HTTP 404 if no profile exists for the handle
/// Returns HTTP 502 if the backend profile API fails
#[handler]
async fn get_profile(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(handle) = req.param::<String>("handle") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse {
            error: "Handle required".to_string(),
        }));
        return;
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

    match clients.profiles.fetch(&handle).await {
        Ok(ProfileLookup::Found(mut profile)) => {
            let dismissed = dismissed_keys(req);
            scrub_alert(&mut profile, &SystemClock, &dismissed);
            res.render(Json(ProfileResponse { data: *profile }));
        }
        Ok(ProfileLookup::NotFound) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse {
                error: "Profile not found".to_string(),
            }));
        }
        Ok(ProfileLookup::NfcDisabled) => {
            res.render(Json(DisabledResponse { nfc_enabled: false }));
        }
        Err(e) => {
            error!(error = %e, "Profile fetch failed");
            res.status_code(StatusCode::BAD_GATEWAY);
            res.render(Json(ErrorResponse {
                error: "Failed to load profile".to_string(),
            }));
        }
    }
}

/// Session-scoped alert dismissals carried on the query string.
fn dismissed_keys(req: &Request) -> HashSet<String> {
    req.queries()
        .get_vec("dismissed")
        .map(|values| {
            values
                .iter()
                .flat_map(|value| value.split(','))
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("profile/{handle}")
        .get(get_profile)
        .push(Router::with_path("contact.vcf").get(super::contact::download_contact))
        .push(Router::with_path("email").post(super::email::email_contact_handler))
}
