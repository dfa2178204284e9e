/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::discount_repository::DiscountRepository;
use super::pricing_config_repository::PricingConfigRepository;

/// RAII test environment; the temporary data directory is removed on drop
pub struct TestEnvironment {
    /// Kept alive so the directory survives until the environment is dropped
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// Same as `new`, with a recognisable directory prefix for debugging
    pub async fn new_with_prefix(prefix: &str) -> Result<Self> {
        let temp_dir = TempDir::with_prefix(prefix)?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("GYM_PRICING_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}

/// Repository test helper with automatic cleanup
pub struct RepositoryTestHelper {
    pub env: TestEnvironment,
    pub discount_repo: DiscountRepository,
    pub pricing_config_repo: PricingConfigRepository,
}

impl RepositoryTestHelper {
    pub async fn new() -> Result<Self> {
        let env = TestEnvironment::new().await?;
        Ok(Self::with_env(env))
    }

    pub async fn new_with_prefix(prefix: &str) -> Result<Self> {
        let env = TestEnvironment::new_with_prefix(prefix).await?;
        Ok(Self::with_env(env))
    }

    fn with_env(env: TestEnvironment) -> Self {
        let discount_repo = DiscountRepository::new(env.connection.clone());
        let pricing_config_repo = PricingConfigRepository::new(env.connection.clone());

        RepositoryTestHelper {
            env,
            discount_repo,
            pricing_config_repo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_removed_on_drop() {
        let path = {
            let helper = RepositoryTestHelper::new_with_prefix("gym_pricing_test_").await.unwrap();
            assert!(helper.env.base_path.exists());
            assert!(helper
                .env
                .base_path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with("gym_pricing_test_")));
            helper.env.base_path.clone()
        };

        assert!(!path.exists());
    }
}
