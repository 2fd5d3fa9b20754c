use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use dinetap_core::health::{healthz, readyz};
use dinetap_core::middleware::request_id_layer;

use crate::handlers::{
    account::{create_account, delete_account, get_account, sign_in, update_account},
    food_item::{
        create_food_item, delete_food_item, get_food_item, list_food_items, update_food_item,
    },
    otp::{generate_otp, verify_otp},
    restaurant::{
        create_restaurant, delete_restaurant, get_restaurant, list_restaurants, update_restaurant,
    },
    table::{generate_tables, list_tables},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // OTP gate
        .route("/otp/generate", post(generate_otp))
        .route("/otp/verify", post(verify_otp))
        // Accounts
        .route("/accounts/{role}", post(create_account))
        .route("/accounts/{role}", get(get_account))
        .route("/accounts/{role}", put(update_account))
        .route("/accounts/{role}", delete(delete_account))
        .route("/accounts/{role}/signin", post(sign_in))
        // Restaurants
        .route("/restaurants", post(create_restaurant))
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/{id}", get(get_restaurant))
        .route("/restaurants/{id}", put(update_restaurant))
        .route("/restaurants/{id}", delete(delete_restaurant))
        // Food items
        .route("/restaurants/{id}/fooditems", post(create_food_item))
        .route("/restaurants/{id}/fooditems", get(list_food_items))
        .route("/restaurants/{id}/fooditems/{item_id}", get(get_food_item))
        .route("/restaurants/{id}/fooditems/{item_id}", put(update_food_item))
        .route(
            "/restaurants/{id}/fooditems/{item_id}",
            delete(delete_food_item),
        )
        // Tables / QR
        .route("/restaurants/{id}/tables/generate", post(generate_tables))
        .route("/restaurants/{id}/tables", get(list_tables))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
