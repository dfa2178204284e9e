//! # REST API for the Discount Catalog
//!
//! Endpoints for listing and storing discounts and looking up commitment tiers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info, warn};

use crate::backend::domain::models::discount::DiscountValidationError;
use crate::backend::io::rest::mappers::discount_mapper::DiscountMapper;
use crate::backend::AppState;
use shared::{
    CommitmentDiscountRequest, CommitmentDiscountResponse, Discount, DiscountListResponse,
    StoreDiscountResponse,
};

/// Create a router for discount catalog APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_discounts).post(store_discount))
        .route("/commitment", get(get_commitment_discount))
}

/// List every discount in the catalog, inactive ones included
pub async fn list_discounts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/discounts");

    match state.pricing_service.list_discounts().await {
        Ok(discounts) => {
            let response = DiscountListResponse {
                discounts: discounts.into_iter().map(DiscountMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list discounts: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving discounts").into_response()
        }
    }
}

/// Create a discount, or replace the one with the same ID
pub async fn store_discount(
    State(state): State<AppState>,
    Json(request): Json<Discount>,
) -> impl IntoResponse {
    info!("POST /api/discounts - request: {:?}", request);

    let is_new = request.id.trim().is_empty();
    let discount = match DiscountMapper::to_domain(request) {
        Ok(discount) => discount,
        Err(e) => {
            warn!("Rejected discount: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.pricing_service.store_discount(discount).await {
        Ok(result) => {
            let response = StoreDiscountResponse {
                discount: DiscountMapper::to_dto(result.discount),
                success_message: result.success_message,
            };
            let status = if is_new { StatusCode::CREATED } else { StatusCode::OK };
            (status, Json(response)).into_response()
        }
        Err(e) => match e.downcast_ref::<DiscountValidationError>() {
            Some(invalid) => {
                warn!("Rejected discount: {}", invalid);
                (StatusCode::BAD_REQUEST, invalid.to_string()).into_response()
            }
            None => {
                error!("Failed to store discount: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to store discount").into_response()
            }
        },
    }
}

/// Commitment tier that applies to a plan length
pub async fn get_commitment_discount(
    State(state): State<AppState>,
    Query(request): Query<CommitmentDiscountRequest>,
) -> impl IntoResponse {
    info!("GET /api/discounts/commitment?months={}", request.months);

    match state.pricing_service.find_commitment_discount(request.months).await {
        Ok(result) => {
            let response = CommitmentDiscountResponse {
                percentage: result.percentage,
                discount: result.discount.map(DiscountMapper::to_dto),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to look up commitment discount: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to look up commitment discount").into_response()
        }
    }
}
