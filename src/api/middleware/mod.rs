pub mod verify_internal;

use http::request::Parts as ReqParts;
use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// `*` allows everything; anything else is treated as an origin suffix
/// (e.g. `.labubu.fan`).
pub fn cors(allow_origins: &str) -> CorsLayer {
    let allowed = if allow_origins == "*" {
        AllowOrigin::any()
    } else {
        let suffix = allow_origins.as_bytes().to_vec();
        AllowOrigin::predicate(move |origin: &HeaderValue, _: &ReqParts| {
            origin.as_bytes().ends_with(&suffix)
        })
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_origin(allowed)
}
