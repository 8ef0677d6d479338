mod card;

use salvo::Router;

// Re-export route constants from core
pub use tapcard_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, CARD_ROUTE_COMPONENT, CARD_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT).push(card::routes())
}
