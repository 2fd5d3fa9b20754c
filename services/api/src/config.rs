use dinetap_auth_types::token::RoleSecrets;

/// API service configuration loaded from environment variables once at
/// startup; role secrets and flags are injected from here, never read from
/// the environment at request time.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Per-role bearer-token signing secrets.
    pub role_secrets: RoleSecrets,
    /// HMAC key for one-time code hashes.
    pub otp_secret: String,
    /// When true, a verified one-time code is deleted on first successful
    /// verification. Env var: `OTP_SINGLE_USE` (default false).
    pub otp_single_use: bool,
    /// Shared code gating superadmin bootstrap. Env var: `VERIFICATION_CODE`.
    pub verification_code: String,
    /// Public base URL encoded into table QR payloads.
    pub public_url: String,
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (default 587, STARTTLS).
    pub smtp_port: u16,
    /// RFC 5322 "From" address for outgoing mail.
    pub smtp_from: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// TCP port to listen on (default 3000). Env var: `API_PORT`.
    pub api_port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            role_secrets: RoleSecrets {
                admin: std::env::var("ADMIN_TOKEN_SECRET").expect("ADMIN_TOKEN_SECRET"),
                manager: std::env::var("MANAGER_TOKEN_SECRET").expect("MANAGER_TOKEN_SECRET"),
                superadmin: std::env::var("SUPERADMIN_TOKEN_SECRET")
                    .expect("SUPERADMIN_TOKEN_SECRET"),
            },
            otp_secret: std::env::var("OTP_SECRET").expect("OTP_SECRET"),
            otp_single_use: std::env::var("OTP_SINGLE_USE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            verification_code: std::env::var("VERIFICATION_CODE").expect("VERIFICATION_CODE"),
            public_url: std::env::var("PUBLIC_URL").expect("PUBLIC_URL"),
            smtp_host: std::env::var("SMTP_HOST").expect("SMTP_HOST"),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_from: std::env::var("SMTP_FROM").expect("SMTP_FROM"),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}
