//! # Domain Types
//!
//! Core domain types used throughout Atelier.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    Discount     │   │    WorkType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  designation    │   │  None           │   │  Labor          │       │
//! │  │  quantity       │   │  Percentage(p)  │   │  Supply         │       │
//! │  │  unit_price     │   │  Amount(a)      │   │  Other          │       │
//! │  │  discount       │   └─────────────────┘   │  Unrecognized   │       │
//! │  │  tax_rate       │                         └─────────────────┘       │
//! │  │  work_type      │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  └─────────────────┘   │  DocumentKind   │   │ DocumentStatus  │       │
//! │                        │  ─────────────  │   │  ─────────────  │       │
//! │  ┌─────────────────┐   │  Invoice        │   │  Draft          │       │
//! │  │    TaxRate      │   │  Quote          │   │  Finalized      │       │
//! │  │  percent (Dec)  │   │  WorkAuth...    │   │  Voided         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line totals are never stored on a line. They are derived by the pricing
//! engine ([`crate::pricing`]) on every read, so a stale `line_total` cannot
//! exist.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Amount;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate expressed as a percentage (18 = 18%).
///
/// Rates are non-negative; values above 100 are unusual but accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct TaxRate(#[ts(as = "String")] Decimal);

impl TaxRate {
    /// The zero rate.
    pub const ZERO: TaxRate = TaxRate(Decimal::ZERO);

    /// Creates a tax rate from a percentage value.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        TaxRate(percent)
    }

    /// Returns the rate as a percentage (18 = 18%).
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction (0.18 for 18%), for multiplication.
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate::ZERO
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Work Type
// =============================================================================

/// Category of a line item, used for cost aggregation.
///
/// `Unrecognized` is the landing spot for foreign or legacy data whose
/// category string matches none of the known ones. Such lines still count
/// toward the grand totals but land in no category bucket (see
/// [`crate::pricing::aggregate`]). The validation gate never produces
/// `Unrecognized` from an empty input; it rejects those outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    /// Labor (workshop hours).
    Labor,
    /// Supplies and parts.
    Supply,
    /// Anything else (consumables, fees, subcontracting).
    Other,
    /// Category string that matches no known work type.
    #[serde(other)]
    Unrecognized,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Labor => "labor",
            WorkType::Supply => "supply",
            WorkType::Other => "other",
            WorkType::Unrecognized => "unrecognized",
        }
    }

    /// Parses a category string, falling back to `Unrecognized`.
    pub fn from_string(s: &str) -> Self {
        match s {
            "labor" => WorkType::Labor,
            "supply" => WorkType::Supply,
            "other" => WorkType::Other,
            _ => WorkType::Unrecognized,
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Discount policy of a line.
///
/// Serialized with an explicit kind so the browser forms can bind a
/// `{kind, value}` pair directly:
/// `{"kind": "percentage", "value": "10"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// No discount.
    None,
    /// Percentage off the base, constrained to [0, 100].
    Percentage(#[ts(as = "String")] Decimal),
    /// Fixed amount off the base, non-negative.
    ///
    /// May exceed the base; whether the result is clamped at zero is decided
    /// by [`crate::pricing::PricingConfig::allow_negative_line_total`].
    Amount(Amount),
}

impl Default for Discount {
    fn default() -> Self {
        Discount::None
    }
}

impl Discount {
    /// Checks whether this discount changes the base at all.
    ///
    /// Zero-valued percentage and amount discounts are inert, the same as
    /// `Discount::None`.
    pub fn is_none(&self) -> bool {
        match self {
            Discount::None => true,
            Discount::Percentage(p) => p.is_zero(),
            Discount::Amount(a) => a.is_zero(),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced row within an invoice, quote, or work authorization.
///
/// A line belongs to exactly one parent document and has no existence outside
/// it. Instances are only produced by the validation gate
/// ([`LineDraft::validate`]), so every `LineItem` in a document satisfies the
/// field invariants (positive quantity, non-negative unit price, a present
/// designation or supply reference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Registry entry this line was drawn from, if any.
    pub supply_id: Option<Uuid>,

    /// Free-text description. May be empty when `supply_id` is set.
    pub designation: String,

    /// Aggregation category.
    pub work_type: WorkType,

    /// Quantity, strictly positive. Decimal: hours, liters, units.
    #[ts(as = "String")]
    pub quantity: Decimal,

    /// Unit price before discount and tax. Zero is a valid price.
    pub unit_price: Amount,

    /// Discount applied to quantity × unit_price.
    pub discount: Discount,

    /// Tax rate applied after the discount.
    pub tax_rate: TaxRate,
}

// =============================================================================
// Line Draft
// =============================================================================

/// Raw line input, as it arrives from a form.
///
/// Every field that a user can leave blank is an `Option`, so the gate can
/// tell "not provided" from "provided as zero". A unit price of `Some(0)` is
/// valid; `None` is not.
///
/// ## Example
/// ```rust
/// use atelier_core::types::{Discount, LineDraft};
/// use rust_decimal_macros::dec;
///
/// let draft = LineDraft {
///     designation: Some("Brake pads".into()),
///     work_type: Some("supply".into()),
///     quantity: Some(dec!(2)),
///     unit_price: Some(dec!(100)),
///     discount: Discount::Percentage(dec!(10)),
///     tax_rate: Some(dec!(18)),
///     ..LineDraft::default()
/// };
/// let line = draft.validate().unwrap();
/// assert_eq!(line.quantity, dec!(2));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineDraft {
    /// Registry entry backing this line, if the user picked one.
    pub supply_id: Option<Uuid>,

    /// Free-text description.
    pub designation: Option<String>,

    /// Raw category string from the form select.
    pub work_type: Option<String>,

    #[ts(as = "Option<String>")]
    pub quantity: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub unit_price: Option<Decimal>,

    pub discount: Discount,

    /// Tax rate percent. Missing means 0%.
    #[ts(as = "Option<String>")]
    pub tax_rate: Option<Decimal>,
}

// =============================================================================
// Document Kind
// =============================================================================

/// The three document types that carry priced lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Quote,
    WorkAuthorization,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quote => "quote",
            DocumentKind::WorkAuthorization => "work_authorization",
        }
    }
}

// =============================================================================
// Document Status
// =============================================================================

/// The status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Lines are being edited.
    Draft,
    /// Submitted to the backend; the line list is frozen.
    Finalized,
    /// Cancelled.
    Voided,
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Draft
    }
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Finalized => "finalized",
            DocumentStatus::Voided => "voided",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tax_rate_fraction() {
        let rate = TaxRate::from_percent(dec!(18));
        assert_eq!(rate.percent(), dec!(18));
        assert_eq!(rate.as_fraction(), dec!(0.18));
    }

    #[test]
    fn test_tax_rate_default_is_zero() {
        assert!(TaxRate::default().is_zero());
    }

    #[test]
    fn test_work_type_from_string() {
        assert_eq!(WorkType::from_string("labor"), WorkType::Labor);
        assert_eq!(WorkType::from_string("supply"), WorkType::Supply);
        assert_eq!(WorkType::from_string("other"), WorkType::Other);
        assert_eq!(WorkType::from_string("paint"), WorkType::Unrecognized);
        assert_eq!(WorkType::from_string(""), WorkType::Unrecognized);
    }

    #[test]
    fn test_work_type_unknown_string_deserializes_to_unrecognized() {
        let wt: WorkType = serde_json::from_str("\"bodywork\"").unwrap();
        assert_eq!(wt, WorkType::Unrecognized);
    }

    #[test]
    fn test_discount_serde_shape() {
        let json = serde_json::to_value(Discount::Percentage(dec!(10))).unwrap();
        assert_eq!(json["kind"], "percentage");

        let json = serde_json::to_value(Discount::None).unwrap();
        assert_eq!(json["kind"], "none");
    }

    #[test]
    fn test_discount_is_none_for_zero_values() {
        assert!(Discount::None.is_none());
        assert!(Discount::Percentage(dec!(0)).is_none());
        assert!(Discount::Amount(Amount::ZERO).is_none());
        assert!(!Discount::Percentage(dec!(5)).is_none());
    }

    #[test]
    fn test_document_status_default() {
        assert_eq!(DocumentStatus::default(), DocumentStatus::Draft);
    }
}
