pub mod breakdown;
pub mod discount;
pub mod pricing_config;
pub mod pricing_error;
