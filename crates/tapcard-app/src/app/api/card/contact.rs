use salvo::{Depot, Request, Response, handler, http::StatusCode, writing::Json};
use tracing::error;

use tapcard_service::delivery::{Platform, save_contact};
use tapcard_service::profile::ProfileLookup;

use super::profile::ErrorResponse;
use crate::clients::get_clients_from_depot;

/// ## Summary
/// GET `/api/card/profile/{handle}/contact.vcf` - Download the contact card.
///
/// The encoder dialect follows the requesting User-Agent; the response
/// carries the `text/vcard` body with an attachment filename and an ETag
/// over the document bytes.
///
/// ## Errors
/// Returns HTTP 404 if no NFC-enabled profile exists for the handle
/// Returns HTTP 502 if the backend profile API fails
#[handler]
pub(super) async fn download_contact(req: &mut Request, depot: &mut Depot, res: &mut Response) {
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

    match save_contact(&profile, platform, clients.inliner.as_ref()).await {
        Ok(saved) => {
            let _ = res.add_header(
                "Content-Type",
                format!("{}; charset=utf-8", saved.mime),
                true,
            );
            let _ = res.add_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", saved.filename),
                true,
            );
            let _ = res.add_header("ETag", format!("\"{}\"", saved.etag), true);
            let _ = res.write_body(saved.body);
        }
        Err(e) => {
            error!(error = %e, "Contact card generation failed");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Failed to generate contact card".to_string(),
            }));
        }
    }
}
