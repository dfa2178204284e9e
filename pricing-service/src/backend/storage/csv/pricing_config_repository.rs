//! # Pricing Config Repository
//!
//! Keeps the price table in `{data_directory}/pricing_config.yaml` so
//! administrators can read and edit it by hand.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::backend::domain::models::pricing_config::PricingConfig;
use crate::backend::storage::traits::PricingConfigStorage;

#[derive(Clone)]
pub struct PricingConfigRepository {
    connection: CsvConnection,
}

impl PricingConfigRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl PricingConfigStorage for PricingConfigRepository {
    async fn get_pricing_config(&self) -> Result<Option<PricingConfig>> {
        let yaml_path = self.connection.pricing_config_file_path();

        if !yaml_path.exists() {
            debug!("No pricing config at {:?}", yaml_path);
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)
            .with_context(|| format!("Failed to read {}", yaml_path.display()))?;
        let config: PricingConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {}", yaml_path.display()))?;
        config.validate()?;

        Ok(Some(config))
    }

    async fn store_pricing_config(&self, config: &PricingConfig) -> Result<()> {
        config.validate()?;

        let yaml_path = self.connection.pricing_config_file_path();
        let yaml_content = serde_yaml::to_string(config)?;

        // Write to a temp file, then rename
        let temp_path = yaml_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &yaml_path)?;

        info!(
            "Saved pricing config: base={} extra={} enrollment={} {}",
            config.base_price_cents,
            config.extra_modality_price_cents,
            config.enrollment_fee_cents,
            config.currency
        );
        Ok(())
    }
}
