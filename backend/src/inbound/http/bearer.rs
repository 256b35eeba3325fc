//! Bearer credential extraction.
//!
//! Handlers take a [`BearerCredential`] and hand the optional credential to a
//! driving port; the domain decides whether the operation needs one and
//! verifies it. A header that is absent, not UTF-8, not using the `Bearer`
//! scheme or carrying an empty token yields no credential.

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Credential, Error};

/// Credential presented through `Authorization: Bearer <token>`, if any.
#[derive(Debug, Clone, Default)]
pub struct BearerCredential(Option<Credential>);

impl BearerCredential {
    /// Parse the credential from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Self(None);
        };
        let Ok(raw) = value.to_str() else {
            debug!("authorization header is not valid UTF-8");
            return Self(None);
        };
        let Some((scheme, token)) = raw.trim().split_once(' ') else {
            debug!("authorization header has no scheme");
            return Self(None);
        };
        if !scheme.eq_ignore_ascii_case("bearer") {
            debug!(scheme, "authorization header uses an unsupported scheme");
            return Self(None);
        }
        Self(Credential::new(token.trim()).ok())
    }

    pub fn into_inner(self) -> Option<Credential> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for BearerCredential {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_headers(req.headers())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn parse(header: Option<&str>) -> Option<String> {
        let mut req = TestRequest::default();
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let req = req.to_http_request();
        BearerCredential::from_headers(req.headers())
            .into_inner()
            .map(|credential| credential.expose().to_owned())
    }

    #[rstest]
    #[case("Bearer abc.def.ghi", "abc.def.ghi")]
    #[case("bearer abc", "abc")]
    #[case("  Bearer   abc  ", "abc")]
    fn bearer_tokens_are_extracted(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(parse(Some(header)).as_deref(), Some(expected));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer"))]
    #[case(Some("Bearer    "))]
    #[case(Some("abc.def.ghi"))]
    fn unusable_headers_yield_no_credential(#[case] header: Option<&str>) {
        assert_eq!(parse(header), None);
    }

    #[actix_web::test]
    async fn extractor_never_rejects() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Digest nonsense"))
            .to_http_request();
        let credential = BearerCredential::extract(&req).await.expect("extracts");
        assert!(!credential.is_present());
    }
}
