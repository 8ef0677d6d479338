/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const CARD_ROUTE_COMPONENT: &str = "card";
pub const CARD_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", CARD_ROUTE_COMPONENT);

/// MIME type of generated contact documents.
pub const VCARD_MIME: &str = "text/vcard";
