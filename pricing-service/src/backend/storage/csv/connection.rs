use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use super::discount_repository::{DiscountRepository, DISCOUNTS_CSV_HEADER};
use super::pricing_config_repository::PricingConfigRepository;
use crate::backend::storage::traits::Connection;

const DISCOUNTS_FILE: &str = "discounts.csv";
const PRICING_CONFIG_FILE: &str = "pricing_config.yaml";

/// CsvConnection manages file paths inside the data directory and serialises
/// catalog writes
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    catalog_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            catalog_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn discounts_file_path(&self) -> PathBuf {
        self.base_directory.join(DISCOUNTS_FILE)
    }

    pub fn pricing_config_file_path(&self) -> PathBuf {
        self.base_directory.join(PRICING_CONFIG_FILE)
    }

    /// Create an empty discounts file with just the header row if missing.
    /// Never truncates a file that already exists.
    pub fn ensure_discounts_file_exists(&self) -> Result<()> {
        let path = self.discounts_file_path();
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()));
            }
        };

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(DISCOUNTS_CSV_HEADER)?;
        writer.flush()?;
        info!("Created empty discount catalog at {}", path.display());
        Ok(())
    }

    /// Held for the whole read-modify-write of any catalog update. Every clone
    /// of this connection shares the same lock.
    pub async fn lock_catalog(&self) -> MutexGuard<'_, ()> {
        self.catalog_lock.lock().await
    }
}

impl Connection for CsvConnection {
    type DiscountRepository = DiscountRepository;
    type PricingConfigRepository = PricingConfigRepository;

    fn create_discount_repository(&self) -> Self::DiscountRepository {
        DiscountRepository::new(self.clone())
    }

    fn create_pricing_config_repository(&self) -> Self::PricingConfigRepository {
        PricingConfigRepository::new(self.clone())
    }
}
