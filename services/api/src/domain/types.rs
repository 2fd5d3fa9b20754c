use chrono::{DateTime, Utc};
use uuid::Uuid;

use dinetap_domain::category::FoodCategory;
use dinetap_domain::role::Role;

/// Account record as the usecase layer sees it.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password_hash: Option<String>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Restaurant record. The manager set is loaded separately via
/// [`crate::domain::repository::RestaurantRepository::managers`].
#[derive(Debug, Clone)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: i32,
    pub gstin: Option<String>,
    pub restrict: bool,
    pub deleted: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Menu item. Price is in minor currency units.
#[derive(Debug, Clone)]
pub struct FoodItem {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub enabled: bool,
    pub veg: bool,
    pub category: FoodCategory,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dining table and its QR payload.
#[derive(Debug, Clone)]
pub struct DiningTable {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub table_number: i32,
    pub qr_code: String,
    pub pin: Option<String>,
    pub pin_expires_at: Option<DateTime<Utc>>,
}

/// One-time code record. Only the keyed hash is ever stored.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    pub id: Uuid,
    pub email: String,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OneTimeCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// One-time code length in digits.
pub const OTP_LEN: usize = 6;

/// One-time code time-to-live in seconds (15 minutes).
pub const OTP_TTL_SECS: i64 = 15 * 60;

/// Upper bound on tables per restaurant for a single regeneration.
pub const MAX_TABLES_PER_RESTAURANT: i32 = 500;

// ── Field validation ─────────────────────────────────────────────────────────

/// Names, city/state and similar display fields: 2..=50 chars.
pub fn validate_name(value: &str) -> bool {
    (2..=50).contains(&value.chars().count())
}

/// Minimal email shape check: one `@` with a dot somewhere after it.
pub fn validate_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

/// E.164-ish phone: optional `+`, then 2..=15 digits, first digit nonzero.
pub fn validate_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (2..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

/// Six-digit postal pincode.
pub fn validate_pincode(value: i32) -> bool {
    (100_000..=999_999).contains(&value)
}
