//! # Validation Module
//!
//! Input validation for Atelier forms.
//!
//! ## The Line Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Add line" clicked                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LineDraft::validate() ← THIS MODULE                                   │
//! │       │                                                                 │
//! │       ├── designation/supply missing? → Required("designation")        │
//! │       ├── work type missing/empty?    → Required("work_type")          │
//! │       ├── quantity missing?           → Required("quantity")           │
//! │       ├── quantity ≤ 0?               → MustBePositive("quantity")     │
//! │       ├── unit price missing?         → Required("unit_price")         │
//! │       ├── unit price < 0?             → MustBeNonNegative("unit_price")│
//! │       ├── discount out of bounds?     → OutOfRange / MustBeNonNegative │
//! │       ├── tax rate < 0?               → MustBeNonNegative("tax_rate")  │
//! │       │                                                                 │
//! │       └── OK → LineItem (the only way one is ever produced)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first violation wins; the caller gets exactly one failing field to
//! highlight. No partial line is ever added to a document.
//!
//! The unit price check is deliberately a presence check on the `Option`,
//! not a truthiness check: `Some(0)` is a valid free-of-charge line, `None`
//! is a missing input.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Amount;
use crate::types::{Discount, LineDraft, LineItem, TaxRate, WorkType};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the designation/reference pair of a line.
///
/// ## Rules
/// - A line needs a designation or a supply reference; both absent is an error
/// - A designation, when present, is capped at 200 characters
///
/// ## Returns
/// The trimmed designation (empty when only a supply reference was given).
pub fn validate_designation(
    designation: Option<&str>,
    has_supply: bool,
) -> ValidationResult<String> {
    let designation = designation.map(str::trim).unwrap_or("");

    if designation.is_empty() && !has_supply {
        return Err(ValidationError::Required {
            field: "designation".to_string(),
        });
    }

    if designation.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "designation".to_string(),
            max: 200,
        });
    }

    Ok(designation.to_string())
}

/// Validates the raw work-type string of a line.
///
/// ## Rules
/// - Must be present and non-empty
/// - Any non-empty string is accepted; unknown categories parse to
///   [`WorkType::Unrecognized`] and are handled by the aggregation policy
pub fn validate_work_type(work_type: Option<&str>) -> ValidationResult<WorkType> {
    let raw = work_type.map(str::trim).unwrap_or("");

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "work_type".to_string(),
        });
    }

    Ok(WorkType::from_string(raw))
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be present
/// - Must be strictly positive (> 0)
pub fn validate_quantity(quantity: Option<Decimal>) -> ValidationResult<Decimal> {
    let qty = quantity.ok_or_else(|| ValidationError::Required {
        field: "quantity".to_string(),
    })?;

    if qty <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(qty)
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be present (zero is a valid price, absence is not)
/// - Must be non-negative (>= 0)
///
/// ## Example
/// ```rust
/// use atelier_core::validation::validate_unit_price;
/// use rust_decimal_macros::dec;
///
/// assert!(validate_unit_price(Some(dec!(0))).is_ok());   // free line
/// assert!(validate_unit_price(None).is_err());           // missing input
/// assert!(validate_unit_price(Some(dec!(-1))).is_err());
/// ```
pub fn validate_unit_price(unit_price: Option<Decimal>) -> ValidationResult<Amount> {
    let price = unit_price.ok_or_else(|| ValidationError::Required {
        field: "unit_price".to_string(),
    })?;

    if price < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(Amount::new(price))
}

/// Validates a discount.
///
/// ## Rules
/// - Percentage discounts must lie in [0, 100]
/// - Amount discounts must be non-negative (they MAY exceed the line base;
///   that case is governed by the pricing configuration, not rejected here)
pub fn validate_discount(discount: &Discount) -> ValidationResult<Discount> {
    match discount {
        Discount::None => Ok(Discount::None),
        Discount::Percentage(p) => {
            if *p < Decimal::ZERO || *p > Decimal::ONE_HUNDRED {
                return Err(ValidationError::OutOfRange {
                    field: "discount".to_string(),
                    min: Decimal::ZERO,
                    max: Decimal::ONE_HUNDRED,
                });
            }
            Ok(Discount::Percentage(*p))
        }
        Discount::Amount(a) => {
            if a.is_negative() {
                return Err(ValidationError::MustBeNonNegative {
                    field: "discount".to_string(),
                });
            }
            Ok(Discount::Amount(*a))
        }
    }
}

/// Validates a tax rate percent.
///
/// ## Rules
/// - Missing means 0%
/// - Must be non-negative; rates above 100% are unusual but accepted
pub fn validate_tax_rate(tax_rate: Option<Decimal>) -> ValidationResult<TaxRate> {
    let rate = tax_rate.unwrap_or(Decimal::ZERO);

    if rate < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "tax_rate".to_string(),
        });
    }

    Ok(TaxRate::from_percent(rate))
}

/// Validates a registry reference.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Alphanumeric characters, hyphens and underscores only
pub fn validate_reference(reference: &str) -> ValidationResult<String> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "reference".to_string(),
        });
    }

    if reference.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "reference".to_string(),
            max: 50,
        });
    }

    if !reference
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "reference".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(reference.to_string())
}

// =============================================================================
// The Gate
// =============================================================================

impl LineDraft {
    /// Validates the draft and produces a [`LineItem`].
    ///
    /// Checks run in form order (designation, work type, quantity, unit
    /// price, discount, tax rate) and stop at the first failure, so the
    /// error always names the single field the form should highlight.
    ///
    /// This is the only constructor of `LineItem` in the crate.
    pub fn validate(self) -> ValidationResult<LineItem> {
        let designation =
            validate_designation(self.designation.as_deref(), self.supply_id.is_some())?;
        let work_type = validate_work_type(self.work_type.as_deref())?;
        let quantity = validate_quantity(self.quantity)?;
        let unit_price = validate_unit_price(self.unit_price)?;
        let discount = validate_discount(&self.discount)?;
        let tax_rate = validate_tax_rate(self.tax_rate)?;

        Ok(LineItem {
            supply_id: self.supply_id,
            designation,
            work_type,
            quantity,
            unit_price,
            discount,
            tax_rate,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
