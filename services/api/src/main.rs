use sea_orm::Database;
use tracing::info;

use dinetap_api::config::ApiConfig;
use dinetap_api::infra::mail::SmtpMailer;
use dinetap_api::router::build_router;
use dinetap_api::state::AppState;
use dinetap_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::from_config(&config);

    let state = AppState {
        db,
        mailer,
        role_secrets: config.role_secrets,
        otp_secret: config.otp_secret,
        otp_single_use: config.otp_single_use,
        verification_code: config.verification_code,
        public_url: config.public_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
