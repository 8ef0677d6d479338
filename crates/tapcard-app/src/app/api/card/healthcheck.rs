use salvo::{Router, handler};

/// Liveness probe for the card service.
#[handler]
async fn card_service_alive() -> &'static str {
    "OK"
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(card_service_alive)
}
