//! HS256 JSON Web Token adapter for the identity ports.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{IdentityError, IdentityVerifier, TokenIssuer};
use crate::domain::{Credential, User, UserId};

/// JWT claims carried by issued credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub username: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: u64,
}

/// Issues and verifies signed bearer tokens.
///
/// The signing secret is injected at construction and only lives inside the
/// derived keys.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn expiry(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        now.saturating_add(self.ttl.as_secs())
    }

    fn sign(&self, claims: &Claims) -> Result<Credential, IdentityError> {
        let token = encode(&Header::default(), claims, &self.encoding)
            .map_err(|err| IdentityError::issuance(err.to_string()))?;
        Credential::new(token).map_err(|err| IdentityError::issuance(err.to_string()))
    }
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenService {
    async fn issue(&self, user: &User) -> Result<Credential, IdentityError> {
        self.sign(&Claims {
            sub: user.id().to_string(),
            username: user.username().to_string(),
            exp: self.expiry(),
        })
    }
}

#[async_trait]
impl IdentityVerifier for JwtTokenService {
    async fn resolve(&self, credential: &Credential) -> Result<UserId, IdentityError> {
        let data = decode::<Claims>(credential.expose(), &self.decoding, &Validation::default())
            .map_err(|err| IdentityError::invalid_credential(err.to_string()))?;
        UserId::new(&data.claims.sub)
            .map_err(|err| IdentityError::invalid_credential(format!("subject: {err}")))
    }
}
