//! One-time code issuance and verification.
//!
//! The single OTP gate consumed by every flow that needs an email round-trip:
//! the `/otp/*` endpoints, account creation, sign-in, and restaurant creation.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngExt;
use sha2::Sha256;
use uuid::Uuid;

use crate::domain::repository::{MailSender, OtpRepository};
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, OneTimeCode};
use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

/// Charset for generating one-time codes (digits only).
const CHARSET: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Keyed hash of a one-time code, hex encoded. This is the only form that is
/// ever persisted.
pub fn hash_code(secret: &str, code: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(code.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time comparison of a submitted code against a stored hex hash.
fn code_matches(secret: &str, code: &str, stored_hex: &str) -> bool {
    let Ok(stored) = hex::decode(stored_hex) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(code.as_bytes());
    mac.verify_slice(&stored).is_ok()
}

/// The OTP gate: issues hashed, expiring codes and verifies submissions.
///
/// `consume_on_verify = false` reproduces the observed behavior where a
/// verified code stays valid until expiry; `true` deletes the email's records
/// on first successful verification.
pub struct OtpGate<O, M>
where
    O: OtpRepository,
    M: MailSender,
{
    pub otps: O,
    pub mailer: M,
    pub secret: String,
    pub consume_on_verify: bool,
}

impl<O, M> OtpGate<O, M>
where
    O: OtpRepository,
    M: MailSender,
{
    /// Generate a code for `email`, persist its hash with a 15-minute expiry,
    /// and send the plaintext out-of-band. Re-issuing appends a new record;
    /// earlier codes stay valid until they expire.
    pub async fn issue(&self, email: &str) -> Result<(), ApiError> {
        let code = generate_code();
        let now = Utc::now();
        let record = OneTimeCode {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            code_hash: hash_code(&self.secret, &code),
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            created_at: now,
        };
        self.otps.create(&record).await?;

        let body = format!("Your one-time code is {code}. It is valid for 15 minutes.");
        self.mailer.send(email, "Your one-time code", &body).await?;
        Ok(())
    }

    /// Check `code` against the most recently issued record for `email`.
    pub async fn verify(&self, email: &str, code: &str) -> Result<(), ApiError> {
        let record = self
            .otps
            .find_latest(email)
            .await?
            .ok_or(ApiError::OtpNotFound)?;

        if record.is_expired(Utc::now()) {
            return Err(ApiError::OtpExpired);
        }
        if !code_matches(&self.secret, code, &record.code_hash) {
            return Err(ApiError::OtpInvalid);
        }
        if self.consume_on_verify {
            self.otps.delete_for_email(email).await?;
        }
        Ok(())
    }
}
