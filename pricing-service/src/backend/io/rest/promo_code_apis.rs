//! # REST API for Promo Codes
//!
//! Endpoints for checking a promo code and confirming its use after payment.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::{error, info, warn};

use crate::backend::domain::commands::discounts::ConfirmPromoUsageResult;
use crate::backend::domain::commands::pricing::ValidatePromoCodeCommand;
use crate::backend::domain::PricingServiceError;
use crate::backend::io::rest::mappers::discount_mapper::DiscountMapper;
use crate::backend::AppState;
use shared::{ConfirmPromoUsageResponse, PromoCodeValidationResponse, ValidatePromoCodeRequest};

/// Create a router for promo code related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(validate_promo_code))
        .route("/:id/confirm-usage", post(confirm_promo_usage))
}

/// Check a promo code without consuming a use. Rejections are reported in the
/// body with `valid: false`.
pub async fn validate_promo_code(
    State(state): State<AppState>,
    Json(request): Json<ValidatePromoCodeRequest>,
) -> impl IntoResponse {
    info!("POST /api/promo-codes/validate - request: {:?}", request);

    let command = ValidatePromoCodeCommand {
        code: request.code,
        member_status: request.member_status,
    };

    let response = match state.pricing_service.validate_promo_code(command).await {
        Ok(discount) => PromoCodeValidationResponse {
            valid: true,
            discount: Some(DiscountMapper::to_dto(discount)),
            error_kind: None,
            message: None,
        },
        Err(PricingServiceError::Pricing(e)) => PromoCodeValidationResponse {
            valid: false,
            discount: None,
            error_kind: Some(e.kind()),
            message: Some(e.to_string()),
        },
        Err(PricingServiceError::Storage(e)) => {
            error!("Failed to validate promo code: {:#}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to validate promo code").into_response();
        }
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Record one use of a promo once the payment that applied it has cleared
pub async fn confirm_promo_usage(
    State(state): State<AppState>,
    Path(discount_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/promo-codes/{}/confirm-usage", discount_id);

    match state.pricing_service.confirm_promo_usage(&discount_id).await {
        Ok(ConfirmPromoUsageResult::Confirmed { discount }) => {
            let response = ConfirmPromoUsageResponse {
                success_message: format!("Recorded use of {}", discount.code),
                discount_id: discount.id,
                current_uses: discount.current_uses,
                max_uses: discount.max_uses,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(ConfirmPromoUsageResult::CapReached { discount }) => {
            warn!("Usage cap reached for {}", discount.id);
            (
                StatusCode::CONFLICT,
                format!("Promo code {} has reached its usage limit", discount.code),
            )
                .into_response()
        }
        Ok(ConfirmPromoUsageResult::NotFound) => {
            (StatusCode::NOT_FOUND, "Discount not found").into_response()
        }
        Err(e) => {
            error!("Failed to confirm promo usage: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to confirm promo usage").into_response()
        }
    }
}
