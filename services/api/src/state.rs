use sea_orm::DatabaseConnection;

use dinetap_auth_types::token::RoleSecrets;

use crate::infra::db::{
    DbAccountRepository, DbFoodItemRepository, DbOtpRepository, DbRestaurantRepository,
    DbTableRepository,
};
use crate::infra::mail::SmtpMailer;
use crate::infra::qr::UrlQrEncoder;
use crate::usecase::otp::OtpGate;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: SmtpMailer,
    pub role_secrets: RoleSecrets,
    pub otp_secret: String,
    pub otp_single_use: bool,
    pub verification_code: String,
    pub public_url: String,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn restaurant_repo(&self) -> DbRestaurantRepository {
        DbRestaurantRepository {
            db: self.db.clone(),
        }
    }

    pub fn food_item_repo(&self) -> DbFoodItemRepository {
        DbFoodItemRepository {
            db: self.db.clone(),
        }
    }

    pub fn table_repo(&self) -> DbTableRepository {
        DbTableRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    /// The one OTP gate every flow shares.
    pub fn otp_gate(&self) -> OtpGate<DbOtpRepository, SmtpMailer> {
        OtpGate {
            otps: self.otp_repo(),
            mailer: self.mailer.clone(),
            secret: self.otp_secret.clone(),
            consume_on_verify: self.otp_single_use,
        }
    }

    pub fn qr_encoder(&self) -> UrlQrEncoder {
        UrlQrEncoder {
            public_url: self.public_url.clone(),
        }
    }
}
