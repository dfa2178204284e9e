//! # REST API for Membership Pricing
//!
//! Endpoints for price calculation, the price table and drop-in passes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::backend::domain::commands::pricing::CalculatePriceCommand;
use crate::backend::domain::models::pricing_error::PricingError;
use crate::backend::domain::PricingServiceError;
use crate::backend::io::rest::mappers::pricing_mapper::{
    PlanOverrideMapper, PriceBreakdownMapper, PricingConfigMapper,
};
use crate::backend::AppState;
use shared::{
    CalculatePriceRequest, DropInPass, DropInPriceResponse, PricingConfig, UpdatePricingConfigResponse,
};

/// Create a router for pricing related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate_price))
        .route("/config", get(get_pricing_config).put(update_pricing_config))
        .route("/drop-in/:pass", get(get_drop_in_price))
}

/// Calculate the monthly price and first payment for a membership
pub async fn calculate_price(
    State(state): State<AppState>,
    Json(request): Json<CalculatePriceRequest>,
) -> impl IntoResponse {
    info!("POST /api/pricing/calculate - request: {:?}", request);

    let command = CalculatePriceCommand {
        modality_ids: request.modality_ids,
        commitment_months: request.commitment_months,
        promo_code: request.promo_code,
        member_status: request.member_status,
        plan_override: request.plan_override.map(PlanOverrideMapper::to_domain),
        as_of: Utc::now(),
    };

    match state.pricing_service.calculate(command).await {
        Ok(quote) => (StatusCode::OK, Json(PriceBreakdownMapper::quote_to_response(quote))).into_response(),
        Err(PricingServiceError::Pricing(e)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(PriceBreakdownMapper::error_to_response(&e)),
        )
            .into_response(),
        Err(PricingServiceError::Storage(e)) => {
            error!("Failed to calculate price: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to calculate price").into_response()
        }
    }
}

/// Get the current price table
pub async fn get_pricing_config(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/pricing/config");

    match state.pricing_service.get_pricing_config().await {
        Ok(config) => (StatusCode::OK, Json(PricingConfigMapper::to_dto(config))).into_response(),
        Err(e) => {
            error!("Failed to get pricing config: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving pricing configuration").into_response()
        }
    }
}

/// Replace the price table
pub async fn update_pricing_config(
    State(state): State<AppState>,
    Json(request): Json<PricingConfig>,
) -> impl IntoResponse {
    info!("PUT /api/pricing/config - request: {:?}", request);

    let config = PricingConfigMapper::to_domain(request);
    match state.pricing_service.update_pricing_config(config).await {
        Ok(config) => {
            let response = UpdatePricingConfigResponse {
                pricing_config: PricingConfigMapper::to_dto(config),
                success_message: "Pricing configuration updated".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => match e.downcast_ref::<PricingError>() {
            Some(invalid) => {
                warn!("Rejected pricing config: {}", invalid);
                (StatusCode::BAD_REQUEST, invalid.to_string()).into_response()
            }
            None => {
                error!("Failed to update pricing config: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update pricing configuration").into_response()
            }
        },
    }
}

/// Price of a single class or a day pass
pub async fn get_drop_in_price(
    State(state): State<AppState>,
    Path(pass): Path<DropInPass>,
) -> impl IntoResponse {
    info!("GET /api/pricing/drop-in/{:?}", pass);

    match state.pricing_service.drop_in_price(pass).await {
        Ok((price_cents, currency)) => {
            let response = DropInPriceResponse {
                pass,
                price_cents,
                currency,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(PricingServiceError::Pricing(e)) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
        Err(PricingServiceError::Storage(e)) => {
            error!("Failed to get drop-in price: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get drop-in price").into_response()
        }
    }
}
