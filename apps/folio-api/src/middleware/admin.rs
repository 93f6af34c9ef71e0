//! Admin credential extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

/// Header carrying the shared admin secret on write requests.
pub static ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// The credential presented on a request, if any.
///
/// Extraction never fails; checking the value is the service's job so that
/// a missing secret and a missing credential are reported consistently.
#[derive(Debug, Clone, Default)]
pub struct AdminCredential(Option<String>);

impl AdminCredential {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for AdminCredential {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Non-UTF-8 values are treated as absent.
        let credential = req
            .headers()
            .get(ADMIN_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        ready(Ok(AdminCredential(credential)))
    }
}
