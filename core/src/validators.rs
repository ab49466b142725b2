//! 欄位驗證

use crate::error::ValidationError;
use chrono::Datelike;

/// 最早的出版年份
const FIRST_PUBLICATION_YEAR: i32 = 1974;

pub fn validate_in_range(
    field: &str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// 允許 0
pub fn validate_positive(field: &str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// 非負且能放進 u32 的數量或等級
pub fn validate_count(field: &str, value: i64) -> Result<u32, ValidationError> {
    validate_positive(field, value)?;
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field: field.to_string(),
        value,
        min: 0,
        max: i64::from(u32::MAX),
    })
}

/// 出版年份必須介於 1974 和今年之間
pub fn validate_year(value: i32) -> Result<(), ValidationError> {
    validate_year_against(value, chrono::Local::now().year())
}

fn validate_year_against(value: i32, current: i32) -> Result<(), ValidationError> {
    if value < FIRST_PUBLICATION_YEAR || value > current {
        return Err(ValidationError::InvalidYear { value, current });
    }
    Ok(())
}
