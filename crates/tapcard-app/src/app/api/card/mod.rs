//! Card page API: profile fetch, `.vcf` download, and email delivery.

mod contact;
mod email;
mod healthcheck;
mod profile;

#[cfg(test)]
mod card_tests;

use salvo::Router;

use super::CARD_ROUTE_COMPONENT;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CARD_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(profile::routes())
}
