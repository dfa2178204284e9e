//! Mappers for converting between discount domain models and shared DTOs.

use crate::backend::domain::models::discount::{
    parse_timestamp, Discount as DomainDiscount, DiscountValidationError, DiscountValue,
};
use shared::Discount as SharedDiscount;

pub struct DiscountMapper;

impl DiscountMapper {
    pub fn to_dto(domain: DomainDiscount) -> SharedDiscount {
        SharedDiscount {
            id: domain.id,
            code: domain.code,
            description: domain.description,
            category: domain.category,
            discount_type: domain.value.discount_type(),
            discount_value: domain.value.raw_value(),
            min_commitment_months: domain.min_commitment_months,
            valid_from: domain.valid_from.map(|t| t.to_rfc3339()),
            valid_until: domain.valid_until.map(|t| t.to_rfc3339()),
            max_uses: domain.max_uses,
            current_uses: domain.current_uses,
            new_members_only: domain.new_members_only,
            is_active: domain.is_active,
        }
    }

    /// Fails when the DTO's value or timestamps cannot form a valid discount
    pub fn to_domain(dto: SharedDiscount) -> Result<DomainDiscount, DiscountValidationError> {
        let value = DiscountValue::from_parts(dto.discount_type, dto.discount_value)?;
        let valid_from = match dto.valid_from.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => None,
        };
        let valid_until = match dto.valid_until.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => None,
        };

        Ok(DomainDiscount {
            id: dto.id,
            code: dto.code,
            description: dto.description,
            category: dto.category,
            value,
            min_commitment_months: dto.min_commitment_months,
            valid_from,
            valid_until,
            max_uses: dto.max_uses,
            current_uses: dto.current_uses,
            new_members_only: dto.new_members_only,
            is_active: dto.is_active,
        })
    }
}
