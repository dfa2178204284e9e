//! # CSV Discount Repository
//!
//! Stores the whole discount catalog in `{data_directory}/discounts.csv`,
//! one row per discount, timestamps in RFC 3339. Writes go to a temp file
//! that is renamed over the existing file, and every read-modify-write runs under
//! the connection's catalog lock so usage increments cannot race.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use csv::{Reader, StringRecord, Writer};
use shared::{DiscountCategory, DiscountType};
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::backend::domain::models::discount::{parse_timestamp, Discount, DiscountValue};
use crate::backend::storage::traits::{DiscountStorage, UsageIncrement};

pub const DISCOUNTS_CSV_HEADER: [&str; 13] = [
    "id",
    "code",
    "description",
    "category",
    "discount_type",
    "discount_value",
    "min_commitment_months",
    "valid_from",
    "valid_until",
    "max_uses",
    "current_uses",
    "new_members_only",
    "is_active",
];

/// CSV-based discount catalog repository
#[derive(Clone)]
pub struct DiscountRepository {
    connection: CsvConnection,
}

impl DiscountRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// A missing file is an empty catalog; only writes create it
    fn read_discounts(&self) -> Result<Vec<Discount>> {
        let path = self.connection.discounts_file_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = Reader::from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut discounts = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            // Header is line 1
            let discount = parse_record(&record)
                .with_context(|| format!("Invalid discount on line {} of {}", index + 2, path.display()))?;
            discounts.push(discount);
        }

        Ok(discounts)
    }

    fn write_discounts(&self, discounts: &[Discount]) -> Result<()> {
        let file_path = self.connection.discounts_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut writer = Writer::from_writer(BufWriter::new(file));
            writer.write_record(DISCOUNTS_CSV_HEADER)?;
            for discount in discounts {
                writer.write_record(to_record(discount))?;
            }
            writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl DiscountStorage for DiscountRepository {
    async fn list_discounts(&self) -> Result<Vec<Discount>> {
        let discounts = self.read_discounts()?;
        debug!("Loaded {} discounts from catalog", discounts.len());
        Ok(discounts)
    }

    async fn get_discount(&self, discount_id: &str) -> Result<Option<Discount>> {
        let discounts = self.read_discounts()?;
        Ok(discounts.into_iter().find(|d| d.id == discount_id))
    }

    async fn store_discount(&self, discount: &Discount) -> Result<()> {
        let _guard = self.connection.lock_catalog().await;

        let mut discounts = self.read_discounts()?;
        match discounts.iter_mut().find(|d| d.id == discount.id) {
            Some(existing) => {
                *existing = discount.clone();
                info!("Updated discount {}", discount.id);
            }
            None => {
                discounts.push(discount.clone());
                info!("Added discount {} ({})", discount.id, discount.code);
            }
        }

        self.write_discounts(&discounts)
    }

    async fn increment_usage_if_below_cap(&self, discount_id: &str) -> Result<UsageIncrement> {
        let _guard = self.connection.lock_catalog().await;

        let mut discounts = self.read_discounts()?;
        let Some(discount) = discounts.iter_mut().find(|d| d.id == discount_id) else {
            warn!("Usage increment for unknown discount {}", discount_id);
            return Ok(UsageIncrement::NotFound);
        };

        if discount.usage_cap_reached() {
            warn!(
                "Discount {} already at its cap ({}/{:?})",
                discount_id, discount.current_uses, discount.max_uses
            );
            return Ok(UsageIncrement::CapReached(discount.clone()));
        }

        discount.current_uses = discount.current_uses.saturating_add(1);
        let updated = discount.clone();
        self.write_discounts(&discounts)?;

        info!(
            "Discount {} usage now {}/{:?}",
            discount_id, updated.current_uses, updated.max_uses
        );
        Ok(UsageIncrement::Incremented(updated))
    }
}

fn parse_record(record: &StringRecord) -> Result<Discount> {
    let field = |index: usize| record.get(index).unwrap_or("").trim();

    let category = DiscountCategory::parse(field(3))
        .ok_or_else(|| anyhow!("unknown category '{}'", field(3)))?;
    let discount_type = DiscountType::parse(field(4))
        .ok_or_else(|| anyhow!("unknown discount type '{}'", field(4)))?;
    let raw_value: i64 = field(5)
        .parse()
        .with_context(|| format!("discount_value '{}' is not an integer", field(5)))?;

    let discount = Discount {
        id: field(0).to_string(),
        code: field(1).to_string(),
        description: field(2).to_string(),
        category,
        value: DiscountValue::from_parts(discount_type, raw_value)?,
        min_commitment_months: parse_optional(field(6), "min_commitment_months")?,
        valid_from: parse_timestamp(field(7))?,
        valid_until: parse_timestamp(field(8))?,
        max_uses: parse_optional(field(9), "max_uses")?,
        current_uses: parse_optional(field(10), "current_uses")?.unwrap_or(0),
        new_members_only: parse_bool(field(11), "new_members_only")?,
        is_active: parse_bool(field(12), "is_active")?,
    };

    discount.validate()?;
    Ok(discount)
}

fn to_record(discount: &Discount) -> Vec<String> {
    fn optional<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    vec![
        discount.id.clone(),
        discount.code.clone(),
        discount.description.clone(),
        discount.category.as_str().to_string(),
        discount.value.discount_type().as_str().to_string(),
        discount.value.raw_value().to_string(),
        optional(discount.min_commitment_months),
        optional(discount.valid_from.map(|t| t.to_rfc3339())),
        optional(discount.valid_until.map(|t| t.to_rfc3339())),
        optional(discount.max_uses),
        discount.current_uses.to_string(),
        discount.new_members_only.to_string(),
        discount.is_active.to_string(),
    ]
}

fn parse_optional<T>(value: &str, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if value.is_empty() {
        return Ok(None);
    }
    let parsed = value
        .parse::<T>()
        .with_context(|| format!("{} '{}' is not a valid number", name, value))?;
    Ok(Some(parsed))
}

fn parse_bool(value: &str, name: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(anyhow!("{} '{}' is not a boolean", name, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::RepositoryTestHelper;
    use chrono::{TimeZone, Utc};

    fn promo(id: &str, code: &str, max_uses: Option<u32>) -> Discount {
        Discount {
            id: id.to_string(),
            code: code.to_string(),
            description: "Promo, with comma".to_string(),
            category: DiscountCategory::Promo,
            value: DiscountValue::Percentage(15),
            min_commitment_months: None,
            valid_from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            valid_until: Some(Utc.with_ymd_and_hms(2030, 12, 31, 23, 59, 59).unwrap()),
            max_uses,
            current_uses: 0,
            new_members_only: true,
            is_active: true,
        }
    }

    fn tier(id: &str, months: u32, pct: u8) -> Discount {
        Discount {
            id: id.to_string(),
            code: format!("TIER{}", months),
            description: String::new(),
            category: DiscountCategory::Commitment,
            value: DiscountValue::Percentage(pct),
            min_commitment_months: Some(months),
            valid_from: None,
            valid_until: None,
            max_uses: None,
            current_uses: 0,
            new_members_only: false,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let helper = RepositoryTestHelper::new().await.unwrap();

        let discounts = helper.discount_repo.list_discounts().await.unwrap();
        assert!(discounts.is_empty());
        assert!(helper.env.connection.discounts_file_path().exists());
    }

    #[tokio::test]
    async fn test_store_and_reload_preserves_fields() {
        let helper = RepositoryTestHelper::new().await.unwrap();
        let stored = promo("p1", "WELCOME", Some(50));

        helper.discount_repo.store_discount(&stored).await.unwrap();
        helper.discount_repo.store_discount(&tier("t3", 3, 10)).await.unwrap();

        let loaded = helper.discount_repo.get_discount("p1").await.unwrap().unwrap();
        assert_eq!(loaded, stored);

        let all = helper.discount_repo.list_discounts().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].min_commitment_months, Some(3));
    }

    #[tokio::test]
    async fn test_store_replaces_existing_id() {
        let helper = RepositoryTestHelper::new().await.unwrap();
        helper.discount_repo.store_discount(&promo("p1", "OLD", None)).await.unwrap();

        let mut updated = promo("p1", "NEW", None);
        updated.value = DiscountValue::Fixed(2500);
        helper.discount_repo.store_discount(&updated).await.unwrap();

        let all = helper.discount_repo.list_discounts().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].code, "NEW");
        assert_eq!(all[0].value, DiscountValue::Fixed(2500));
    }

    #[tokio::test]
    async fn test_list_active_filters_inactive() {
        let helper = RepositoryTestHelper::new().await.unwrap();
        let mut inactive = promo("p2", "OFF", None);
        inactive.is_active = false;

        helper.discount_repo.store_discount(&promo("p1", "ON", None)).await.unwrap();
        helper.discount_repo.store_discount(&inactive).await.unwrap();

        let active = helper.discount_repo.list_active_discounts().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "p1");
    }

    #[tokio::test]
    async fn test_increment_respects_cap() {
        let helper = RepositoryTestHelper::new().await.unwrap();
        helper.discount_repo.store_discount(&promo("p1", "TWICE", Some(2))).await.unwrap();

        let first = helper.discount_repo.increment_usage_if_below_cap("p1").await.unwrap();
        assert!(matches!(first, UsageIncrement::Incremented(ref d) if d.current_uses == 1));

        let second = helper.discount_repo.increment_usage_if_below_cap("p1").await.unwrap();
        assert!(matches!(second, UsageIncrement::Incremented(ref d) if d.current_uses == 2));

        let third = helper.discount_repo.increment_usage_if_below_cap("p1").await.unwrap();
        assert!(matches!(third, UsageIncrement::CapReached(ref d) if d.current_uses == 2));

        let missing = helper.discount_repo.increment_usage_if_below_cap("nope").await.unwrap();
        assert_eq!(missing, UsageIncrement::NotFound);
    }

    #[tokio::test]
    async fn test_unlimited_code_keeps_counting() {
        let helper = RepositoryTestHelper::new().await.unwrap();
        helper.discount_repo.store_discount(&promo("p1", "FOREVER", None)).await.unwrap();

        for _ in 0..5 {
            helper.discount_repo.increment_usage_if_below_cap("p1").await.unwrap();
        }

        let loaded = helper.discount_repo.get_discount("p1").await.unwrap().unwrap();
        assert_eq!(loaded.current_uses, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_never_pass_cap() {
        let helper = RepositoryTestHelper::new().await.unwrap();
        helper.discount_repo.store_discount(&promo("p1", "RACE", Some(3))).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..12 {
            let repo = helper.discount_repo.clone();
            handles.push(tokio::spawn(async move {
                repo.increment_usage_if_below_cap("p1").await.unwrap()
            }));
        }

        let mut incremented = 0;
        for handle in handles {
            if let UsageIncrement::Incremented(_) = handle.await.unwrap() {
                incremented += 1;
            }
        }

        assert_eq!(incremented, 3);
        let loaded = helper.discount_repo.get_discount("p1").await.unwrap().unwrap();
        assert_eq!(loaded.current_uses, 3);
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty_without_creating_it() {
        let helper = RepositoryTestHelper::new().await.unwrap();
        let path = helper.env.connection.discounts_file_path();

        assert!(helper.discount_repo.list_discounts().await.unwrap().is_empty());
        assert!(helper.discount_repo.get_discount("p1").await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_first_reads_racing_stores_keep_every_entry() {
        let helper = RepositoryTestHelper::new().await.unwrap();

        let mut handles = Vec::new();
        for i in 0..8 {
            let writer = helper.discount_repo.clone();
            handles.push(tokio::spawn(async move {
                let id = format!("p{}", i);
                writer.store_discount(&promo(&id, &format!("CODE{}", i), None)).await.unwrap();
            }));
            let reader = helper.discount_repo.clone();
            handles.push(tokio::spawn(async move {
                reader.list_discounts().await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = helper.discount_repo.list_discounts().await.unwrap();
        assert_eq!(stored.len(), 8);
    }

    #[tokio::test]
    async fn test_corrupt_row_reports_line() {
        let helper = RepositoryTestHelper::new().await.unwrap();
        let path = helper.env.connection.discounts_file_path();
        std::fs::write(
            &path,
            format!(
                "{}\np1,BAD,,promo,percentage,250,,,,,0,false,true\n",
                DISCOUNTS_CSV_HEADER.join(",")
            ),
        )
        .unwrap();

        let error = helper.discount_repo.list_discounts().await.unwrap_err();
        assert!(format!("{:#}", error).contains("line 2"));
    }
}
