//! QR payload encoding for dining tables.

use uuid::Uuid;

use crate::domain::repository::QrEncoder;

/// Encodes the per-table URL a guest lands on after scanning. Rendering the
/// payload into an actual QR image is the client's concern.
#[derive(Clone)]
pub struct UrlQrEncoder {
    pub public_url: String,
}

impl QrEncoder for UrlQrEncoder {
    fn encode(&self, restaurant_id: Uuid, table_number: i32) -> String {
        format!(
            "{}/restaurant/{restaurant_id}/{table_number}",
            self.public_url.trim_end_matches('/')
        )
    }
}
