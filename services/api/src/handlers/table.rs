use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use dinetap_auth_types::extract::MaybeAuthorization;
use dinetap_auth_types::token::verify_bearer;
use dinetap_core::envelope::ok;

use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::state::AppState;
use crate::usecase::table::{GenerateTablesUseCase, ListTablesUseCase};

#[derive(Serialize)]
pub struct TableResponse {
    pub id: String,
    pub restaurant_id: String,
    pub table_number: i32,
    pub qr_code: String,
}

impl From<crate::domain::types::DiningTable> for TableResponse {
    fn from(table: crate::domain::types::DiningTable) -> Self {
        Self {
            id: table.id.to_string(),
            restaurant_id: table.restaurant_id.to_string(),
            table_number: table.table_number,
            qr_code: table.qr_code,
        }
    }
}

// ── POST /restaurants/{id}/tables/generate ───────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateTablesRequest {
    pub number_of_tables: i32,
}

pub async fn generate_tables(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: MaybeAuthorization,
    Json(body): Json<GenerateTablesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let actor = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = GenerateTablesUseCase {
        restaurants: state.restaurant_repo(),
        tables: state.table_repo(),
        qr: state.qr_encoder(),
    };
    let tables = usecase
        .execute(actor, restaurant_id, body.number_of_tables)
        .await?;
    let data: Vec<TableResponse> = tables.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, ok(data)))
}

// ── GET /restaurants/{id}/tables ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListTablesQuery {
    pub table_number: Option<i32>,
}

pub async fn list_tables(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListTablesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let usecase = ListTablesUseCase {
        restaurants: state.restaurant_repo(),
        tables: state.table_repo(),
    };
    let tables = usecase.execute(restaurant_id, query.table_number).await?;
    let data: Vec<TableResponse> = tables.into_iter().map(Into::into).collect();
    Ok(ok(data))
}
