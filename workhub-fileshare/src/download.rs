/// Reversible download-link tokens
///
/// The download endpoint never serves file content; it issues a synthetic
/// link embedding a reversible token derived from the file's id. Tokens are
/// HS256-signed with a key the application state owns:
///
/// - when `DOWNLOAD_TOKEN_SECRET` is configured, the key is stable across
///   restarts and old links keep decoding;
/// - otherwise a fresh key is generated at startup and links issued before a
///   restart become undecodable, which matches the historical behavior of
///   this service.
///
/// Tokens carry no timestamps, so for one key the token for a given file id
/// is deterministic, and distinct file ids always produce distinct tokens.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error type for download token operations
#[derive(Debug, thiserror::Error)]
pub enum DownloadTokenError {
    /// Failed to mint a token
    #[error("Failed to create download token: {0}")]
    CreateError(String),

    /// Token failed signature or format checks
    #[error("Invalid download token")]
    Invalid,
}

#[derive(Debug, Serialize, Deserialize)]
struct DownloadClaims {
    /// File id the link points at
    sub: Uuid,
}

/// Issues and decodes download-link tokens with one owned key
pub struct DownloadLinkSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl DownloadLinkSigner {
    /// Creates a signer from a configured key
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Creates a signer with a freshly generated process-lifetime key
    pub fn ephemeral() -> Self {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        let secret = hex::encode(key);
        tracing::warn!(
            "DOWNLOAD_TOKEN_SECRET not configured; download links will not survive a restart"
        );
        Self::from_secret(&secret)
    }

    /// Mints the token for a file id
    pub fn issue(&self, file_id: Uuid) -> Result<String, DownloadTokenError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, &DownloadClaims { sub: file_id }, &self.encoding)
            .map_err(|e| DownloadTokenError::CreateError(e.to_string()))
    }

    /// Recovers the file id from a token
    pub fn reveal(&self, token: &str) -> Result<Uuid, DownloadTokenError> {
        // Download tokens carry no exp claim
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<DownloadClaims>(token, &self.decoding, &validation)
            .map_err(|_| DownloadTokenError::Invalid)?;

        Ok(data.claims.sub)
    }

    /// Formats the synthetic URL a client receives
    pub fn link_for(&self, file_id: Uuid) -> Result<String, DownloadTokenError> {
        Ok(format!("/download-file/{}", self.issue(file_id)?))
    }
}
