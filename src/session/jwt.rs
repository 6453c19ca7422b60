//! Minimal JWT payload inspection
//!
//! Only the `exp` claim is read. Signatures are never verified here;
//! that is the server's job.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SessionError;

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// Decode base64url (URL-safe base64, padding optional)
fn base64_decode_url(input: &str) -> Result<Vec<u8>, SessionError> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| SessionError::MalformedToken(e.to_string()))
}

/// Extract the expiry instant from a `header.payload.signature` token.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, SessionError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [_, payload_b64, _] = parts.as_slice() else {
        return Err(SessionError::MalformedToken(format!(
            "expected 3 segments, found {}",
            parts.len()
        )));
    };

    let payload_bytes = base64_decode_url(payload_b64)?;
    let claim: ExpiryClaim = serde_json::from_slice(&payload_bytes)
        .map_err(|e| SessionError::MalformedToken(format!("payload: {}", e)))?;

    DateTime::from_timestamp(claim.exp, 0)
        .ok_or_else(|| SessionError::MalformedToken("exp out of range".to_string()))
}

/// Build an unsigned token carrying `exp` for tests.
#[cfg(test)]
pub fn token_with_exp(exp: i64) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload =
        general_purpose::URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"admin","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_expiry() {
        let token = token_with_exp(1_900_000_000);
        let expires_at = decode_expiry(&token).unwrap();
        assert_eq!(expires_at.timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_decode_accepts_padded_payload() {
        let header = general_purpose::URL_SAFE.encode(r#"{"alg":"HS256"}"#);
        let payload = general_purpose::URL_SAFE.encode(r#"{"exp":1700000000}"#);
        let token = format!("{}.{}.sig", header, payload);
        assert_eq!(decode_expiry(&token).unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_wrong_segment_count() {
        assert!(matches!(
            decode_expiry("not-a-jwt"),
            Err(SessionError::MalformedToken(_))
        ));
        assert!(decode_expiry("a.b").is_err());
        assert!(decode_expiry("a.b.c.d").is_err());
    }

    #[test]
    fn test_payload_not_base64() {
        assert!(decode_expiry("aGVhZGVy.!!!.sig").is_err());
    }

    #[test]
    fn test_payload_without_exp() {
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"sub":"admin"}"#);
        let token = format!("h.{}.s", payload);
        assert!(decode_expiry(&token).is_err());
    }
}
