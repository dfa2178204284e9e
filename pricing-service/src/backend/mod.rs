//! # Backend Module
//!
//! Contains all non-UI logic for the gym membership pricing service.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Pricing engine and discount rules
//! - **Storage**: CSV/YAML persistence of the catalog and price table
//! - **IO**: REST interface consumed by checkout and admin clients
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Pricing engine, PricingService)
//!     ↓
//! Storage Layer (CSV / YAML files)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{http::Method, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::backend::config::ServiceConfig;
use crate::backend::domain::PricingService;
use crate::backend::storage::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub pricing_service: PricingService<CsvConnection>,
}

impl AppState {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            pricing_service: PricingService::new(connection),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServiceConfig) -> Result<AppState> {
    info!("Setting up data directory {}", config.data_directory.display());
    let connection = Arc::new(CsvConnection::new(&config.data_directory)?);
    connection.ensure_discounts_file_exists()?;

    info!("Setting up domain model");
    let app_state = AppState::new(connection);
    app_state.pricing_service.ensure_pricing_config().await?;

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServiceConfig) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/pricing", io::pricing_apis::router())
        .nest("/promo-codes", io::promo_code_apis::router())
        .nest("/discounts", io::discount_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
