//! Validation utilities for trial datasets
//!
//! Nothing here rejects data outright: the pipeline zero-fills and
//! buckets whatever it is given. The loader reports these findings as
//! warnings so bad exports are noticed.

use crate::models::{
    classify, RawRecord, StageRow, SubplotRecord, BREEDERS, UNKNOWN_BREEDER,
};
use crate::types::LocationSlot;

/// Upper bound of a plausible sugar-content reading
pub const MAX_BRIX: f64 = 30.0;

/// Longest variety code seen in any export, with headroom
pub const MAX_VARIETY_CODE_LEN: usize = 32;

// ============================================================================
// Measurement Validations
// ============================================================================

/// Validate a yield quantity (t/ha): finite and not negative
pub fn validate_yield(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Yield must be a finite number");
    }
    if value < 0.0 {
        return Err("Yield cannot be negative");
    }
    Ok(())
}

/// Validate a sugar-content reading (Brix°)
pub fn validate_brix(value: f64) -> Result<(), &'static str> {
    validate_yield(value).map_err(|_| "Brix must be a finite, non-negative number")?;
    if value > MAX_BRIX {
        return Err("Brix reading out of plausible range");
    }
    Ok(())
}

// ============================================================================
// Record Validations
// ============================================================================

/// Validate a primary-dataset row
pub fn validate_raw_record(record: &RawRecord) -> Result<(), &'static str> {
    validate_variety_code(&record.variety)?;
    for slot in LocationSlot::ALL {
        if let Some(value) = record.yield_at(slot) {
            validate_yield(value)?;
        }
    }
    Ok(())
}

/// Validate a sugar-content row; slot values are Brix readings
pub fn validate_brix_record(record: &RawRecord) -> Result<(), &'static str> {
    validate_variety_code(&record.variety)?;
    for slot in LocationSlot::ALL {
        if let Some(value) = record.yield_at(slot) {
            validate_brix(value)?;
        }
    }
    Ok(())
}

/// Validate a subplot row, including its row type tag
pub fn validate_subplot_record(record: &SubplotRecord) -> Result<(), &'static str> {
    validate_variety_code(&record.variety)?;
    if let Some(kind) = record.kind.as_deref() {
        if kind != "érett" && kind != "romló" {
            return Err("Subplot row type must be 'érett' or 'romló'");
        }
    }
    for value in [record.l_i, record.l_ii].into_iter().flatten() {
        validate_yield(value)?;
    }
    Ok(())
}

/// Validate a cumulative stage row
pub fn validate_stage_row(row: &StageRow) -> Result<(), &'static str> {
    validate_variety_code(&row.variety)?;
    for value in [row.ripe, row.yellow, row.green, row.decaying].into_iter().flatten() {
        validate_yield(value)?;
    }
    if let Some(breeder) = row.breeder.as_deref() {
        if breeder.trim().is_empty() {
            return Err("Breeder name cannot be blank");
        }
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate variety code format (non-empty, no surrounding whitespace)
pub fn validate_variety_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() {
        return Err("Variety code cannot be empty");
    }
    if code.trim() != code {
        return Err("Variety code has surrounding whitespace");
    }
    if code.chars().count() > MAX_VARIETY_CODE_LEN {
        return Err("Variety code is too long");
    }
    Ok(())
}

/// Check if a variety is claimed by a breeder in the static table
pub fn is_known_variety(code: &str) -> bool {
    classify(code) != UNKNOWN_BREEDER
}

/// Validate colour format (`#rrggbb`)
pub fn validate_hex_color(color: &str) -> Result<(), &'static str> {
    let Some(digits) = color.strip_prefix('#') else {
        return Err("Colour must start with '#'");
    };
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Colour must have six hex digits");
    }
    Ok(())
}

/// Validate the static breeder table: colours parse and no variety has two owners
pub fn validate_breeder_table() -> Result<(), &'static str> {
    for (index, breeder) in BREEDERS.iter().enumerate() {
        validate_hex_color(breeder.color)?;
        let claimed_elsewhere = breeder.varieties.iter().any(|variety| {
            BREEDERS[index + 1..].iter().any(|other| other.owns(variety))
        });
        if claimed_elsewhere {
            return Err("Variety claimed by more than one breeder");
        }
    }
    Ok(())
}
