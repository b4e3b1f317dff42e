use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying the webhook signature: a base64-encoded
/// HMAC-SHA256 digest of the raw request body.
pub const SIGNATURE_HEADER: &str = "x-intdash-signature-256";

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("signature header {SIGNATURE_HEADER:?} is missing or empty")]
    Missing,
    #[error("signature is not valid base64: {0}")]
    Malformed(#[from] base64::DecodeError),
    #[error("invalid signing key: {0}")]
    Key(#[from] hmac::digest::InvalidLength),
    #[error("signature does not match request body digest")]
    Mismatch,
}

/// Verifies that `signature` is the base64-encoded HMAC-SHA256 of `body`
/// under `key`. The digest comparison is constant-time.
pub fn verify(body: &[u8], key: &[u8], signature: Option<&str>) -> Result<(), SignatureError> {
    let signature = match signature {
        Some(s) if !s.is_empty() => s,
        _ => return Err(SignatureError::Missing),
    };
    let want = BASE64_STANDARD.decode(signature)?;

    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(body);
    mac.verify_slice(&want).map_err(|_| SignatureError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(body: &[u8], key: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(key).unwrap();
        mac.update(body);
        BASE64_STANDARD.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_verify_round_trip() {
        let body = br#"{"resource_type":"measurement"}"#;
        let key = b"webhook-secret";
        let signature = sign(body, key);
        assert!(verify(body, key, Some(&signature)).is_ok());
    }

    #[test]
    fn test_verify_rejects_flipped_bit() {
        let body = b"payload";
        let key = b"webhook-secret";
        let mut mac = HmacSha256::new_from_slice(key).unwrap();
        mac.update(body);
        let mut digest = mac.finalize().into_bytes().to_vec();

        for i in 0..digest.len() {
            digest[i] ^= 0x01;
            let signature = BASE64_STANDARD.encode(&digest);
            assert!(matches!(
                verify(body, key, Some(&signature)),
                Err(SignatureError::Mismatch)
            ));
            digest[i] ^= 0x01;
        }
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let body = b"payload";
        let signature = sign(body, b"right-key");
        assert!(matches!(
            verify(body, b"wrong-key", Some(&signature)),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn test_verify_missing_signature() {
        assert!(matches!(
            verify(b"payload", b"key", None),
            Err(SignatureError::Missing)
        ));
        assert!(matches!(
            verify(b"payload", b"key", Some("")),
            Err(SignatureError::Missing)
        ));
    }

    #[test]
    fn test_verify_malformed_signature() {
        assert!(matches!(
            verify(b"payload", b"key", Some("not base64!!!")),
            Err(SignatureError::Malformed(_))
        ));
    }
}
