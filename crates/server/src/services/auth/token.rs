//! Bearer token issuance and verification.
//!
//! Tokens are compact JWS strings signed with HMAC-SHA256:
//! `base64url(header).base64url(claims).base64url(signature)`, all segments
//! unpadded. Claims carry the stringified user ID as `sub` plus `iat` and
//! `exp` as unix timestamps. Verification checks the declared algorithm,
//! the signature, and expiry; nothing in the claims is trusted before the
//! signature matches.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;

use ticklist_core::UserId;

type HmacSha256 = Hmac<Sha256>;

/// The only signing algorithm tokens are issued and accepted with.
const JWT_ALG: &str = "HS256";

/// Errors that can occur when issuing or verifying a token.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not have the expected shape (segments, encoding,
    /// claim types).
    #[error("malformed token")]
    Malformed,
    /// The signature does not match, or the header declares an algorithm
    /// other than HS256.
    #[error("invalid token signature")]
    InvalidSignature,
    /// The token was valid once but its expiry has passed.
    #[error("token expired")]
    Expired,
    /// The signing key could not be used.
    #[error("signing key unavailable")]
    Key,
}

/// Header fields checked during verification.
#[derive(Deserialize)]
struct Header {
    alg: String,
}

/// Claims checked during verification.
///
/// `iat` is emitted on issue but not read back; only `sub` and `exp`
/// matter for acceptance.
#[derive(Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Issues and verifies bearer tokens for a single signing key.
pub struct TokenService {
    signing_key: SecretString,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service with a signing key and token lifetime.
    #[must_use]
    pub const fn new(signing_key: SecretString, ttl: Duration) -> Self {
        Self { signing_key, ttl }
    }

    /// Issue a token for a user, valid for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Key` if the signing key cannot be used.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token with an explicit issuance instant.
    ///
    /// Deterministic for fixed inputs, which keeps expiry behavior testable
    /// without sleeping.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Key` if the signing key cannot be used.
    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let header = json!({ "alg": JWT_ALG, "typ": "JWT" });
        let claims = json!({
            "sub": user_id.to_string(),
            "iat": now.timestamp(),
            "exp": (now + self.ttl).timestamp(),
        });

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(claims.to_string()),
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verify a token and return the user ID it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed`, `TokenError::InvalidSignature`, or
    /// `TokenError::Expired` depending on what fails; see [`TokenError`].
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against an explicit instant.
    ///
    /// The signature is checked with a constant-time comparison before any
    /// claim is decoded. A token expires strictly after `exp`: verification
    /// at exactly `exp` still succeeds.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed`, `TokenError::InvalidSignature`, or
    /// `TokenError::Expired` depending on what fails; see [`TokenError`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let mut segments = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| TokenError::Malformed)?;
        let header: Header =
            serde_json::from_slice(&header_bytes).map_err(|_| TokenError::Malformed)?;
        if header.alg != JWT_ALG {
            return Err(TokenError::InvalidSignature);
        }

        // A signature that does not decode cannot match any computed MAC
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::InvalidSignature)?;

        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&claims_bytes).map_err(|_| TokenError::Malformed)?;

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        let id: i32 = claims.sub.parse().map_err(|_| TokenError::Malformed)?;
        Ok(UserId::new(id))
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(self.signing_key.expose_secret().as_bytes())
            .map_err(|_| TokenError::Key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn service(key: &str) -> TokenService {
        TokenService::new(SecretString::from(key.to_owned()), Duration::hours(12))
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    /// Build a token signed with `key` but with arbitrary segment contents.
    fn forge(key: &str, header: &str, claims: &str) -> String {
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims),
        );
        let mut mac = HmacSha256::new_from_slice(key.as_bytes()).unwrap();
        mac.update(signing_input.as_bytes());
        format!(
            "{signing_input}.{}",
            URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
        )
    }

    const KEY: &str = "unit-test-signing-key-0123456789";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service(KEY);
        let token = svc.issue_at(UserId::new(7), t0()).unwrap();

        let parsed = svc.verify_at(&token, t0() + Duration::hours(1)).unwrap();
        assert_eq!(parsed, UserId::new(7));
    }

    #[test]
    fn test_token_has_three_nonempty_segments() {
        let svc = service(KEY);
        let token = svc.issue_at(UserId::new(1), t0()).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_issue_at_is_deterministic() {
        let svc = service(KEY);
        let a = svc.issue_at(UserId::new(42), t0()).unwrap();
        let b = svc.issue_at(UserId::new(42), t0()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_valid_at_expiry_boundary() {
        let svc = service(KEY);
        let token = svc.issue_at(UserId::new(1), t0()).unwrap();

        // exp is inclusive: exactly at expiry still verifies
        let at_expiry = t0() + Duration::hours(12);
        assert!(svc.verify_at(&token, at_expiry).is_ok());
    }

    #[test]
    fn test_expired_one_second_past_ttl() {
        let svc = service(KEY);
        let token = svc.issue_at(UserId::new(1), t0()).unwrap();

        let past_expiry = t0() + Duration::hours(12) + Duration::seconds(1);
        assert_eq!(
            svc.verify_at(&token, past_expiry),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let svc = service(KEY);
        let token = svc.issue_at(UserId::new(7), t0()).unwrap();

        let mut segments: Vec<String> = token.split('.').map(str::to_owned).collect();
        segments[1] = URL_SAFE_NO_PAD.encode(r#"{"sub":"999","iat":0,"exp":32503680000}"#);
        let tampered = segments.join(".");

        assert_eq!(
            svc.verify_at(&tampered, t0()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let svc = service(KEY);
        let token = svc.issue_at(UserId::new(7), t0()).unwrap();

        let (rest, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{rest}.{}", chars.into_iter().collect::<String>());

        assert_eq!(
            svc.verify_at(&tampered, t0()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = service(KEY).issue_at(UserId::new(7), t0()).unwrap();
        let other = service("some-other-signing-key-987654321");

        assert_eq!(
            other.verify_at(&token, t0()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let svc = service(KEY);
        for input in ["", "not-a-token", "a.b", "a.b.c.d", "!!!.x.y"] {
            assert_eq!(
                svc.verify_at(input, t0()),
                Err(TokenError::Malformed),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_other_algorithms_rejected() {
        // correctly signed, but the header claims "none"
        let token = forge(
            KEY,
            r#"{"alg":"none","typ":"JWT"}"#,
            r#"{"sub":"1","iat":0,"exp":32503680000}"#,
        );
        assert_eq!(
            service(KEY).verify_at(&token, t0()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_non_numeric_subject_is_malformed() {
        let token = forge(
            KEY,
            r#"{"alg":"HS256","typ":"JWT"}"#,
            r#"{"sub":"alice","iat":0,"exp":32503680000}"#,
        );
        assert_eq!(
            service(KEY).verify_at(&token, t0()),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        let token = forge(KEY, r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"sub":"1","iat":0}"#);
        assert_eq!(
            service(KEY).verify_at(&token, t0()),
            Err(TokenError::Malformed)
        );
    }
}
