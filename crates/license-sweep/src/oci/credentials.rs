//! API signing key credentials

use super::error::{ApiError, CredentialError};
use ring::rand::SystemRandom;
use ring::signature::{RSA_PKCS1_SHA256, RsaKeyPair};
use std::path::Path;
use std::sync::Arc;

const PKCS8_LABEL: &str = "PRIVATE KEY";
const PKCS1_LABEL: &str = "RSA PRIVATE KEY";
const ENCRYPTED_KEY: &str = "encrypted keys are not supported, decrypt the key first";

/// Tenancy, user and RSA key used to sign every request.
///
/// Cheap to clone; the key pair is shared.
#[derive(Clone)]
pub struct ApiKeyCredentials {
    tenancy: String,
    user: String,
    fingerprint: String,
    key: Arc<RsaKeyPair>,
    rng: SystemRandom,
}

impl ApiKeyCredentials {
    /// Build credentials from an in-memory PEM private key
    pub fn from_pem(
        tenancy: &str,
        user: &str,
        fingerprint: &str,
        pem: &str,
    ) -> Result<Self, CredentialError> {
        for (name, value) in [
            ("tenancy", tenancy),
            ("user", user),
            ("fingerprint", fingerprint),
        ] {
            if value.trim().is_empty() {
                return Err(CredentialError::Missing(name));
            }
        }

        Ok(Self {
            tenancy: tenancy.to_string(),
            user: user.to_string(),
            fingerprint: fingerprint.to_string(),
            key: Arc::new(parse_private_key(pem)?),
            rng: SystemRandom::new(),
        })
    }

    /// Build credentials from a PEM key file on disk
    pub fn from_key_file(
        tenancy: &str,
        user: &str,
        fingerprint: &str,
        path: &Path,
    ) -> Result<Self, CredentialError> {
        if path.as_os_str().is_empty() {
            return Err(CredentialError::Missing("key_file"));
        }
        let pem = std::fs::read_to_string(path).map_err(|source| CredentialError::KeyFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_pem(tenancy, user, fingerprint, &pem)
    }

    pub fn tenancy(&self) -> &str {
        &self.tenancy
    }

    /// The `keyId` placed in the signature header
    pub fn key_id(&self) -> String {
        format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
    }

    /// RSA PKCS#1 v1.5 SHA-256 signature over `message`
    pub(crate) fn sign(&self, message: &[u8]) -> Result<Vec<u8>, ApiError> {
        let mut signature = vec![0; self.key.public().modulus_len()];
        self.key
            .sign(&RSA_PKCS1_SHA256, &self.rng, message, &mut signature)
            .map_err(|e| ApiError::Signing(e.to_string()))?;
        Ok(signature)
    }

    #[cfg(test)]
    pub(crate) fn public_key_der(&self) -> Vec<u8> {
        self.key.public().as_ref().to_vec()
    }
}

impl std::fmt::Debug for ApiKeyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCredentials")
            .field("tenancy", &self.tenancy)
            .field("user", &self.user)
            .field("fingerprint", &self.fingerprint)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Parse a PKCS#8 or PKCS#1 PEM RSA private key
fn parse_private_key(text: &str) -> Result<RsaKeyPair, CredentialError> {
    let block = pem::parse(text).map_err(|e| CredentialError::Pem(e.to_string()))?;
    if block.headers().get("Proc-Type").is_some() {
        return Err(CredentialError::Pem(ENCRYPTED_KEY.to_string()));
    }
    let parsed = match block.tag() {
        PKCS8_LABEL => RsaKeyPair::from_pkcs8(block.contents()),
        PKCS1_LABEL => RsaKeyPair::from_der(block.contents()),
        "ENCRYPTED PRIVATE KEY" => return Err(CredentialError::Pem(ENCRYPTED_KEY.to_string())),
        other => return Err(CredentialError::Pem(format!("unexpected block '{other}'"))),
    };
    parsed.map_err(|e| CredentialError::KeyRejected(e.to_string()))
}
