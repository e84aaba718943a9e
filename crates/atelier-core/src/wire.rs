//! # Wire Payloads
//!
//! Serialization shapes for the REST backend and the browser forms. The
//! engine itself has no wire format; this module is the mapping the callers
//! share.
//!
//! ## Line-Item Schema
//! ```text
//! LineItem + LinePricing           LineItemPayload (camelCase JSON)
//! ──────────────────────           ─────────────────────────────────
//! supply_id                   ──►  supplyId
//! designation                 ──►  designation
//! work_type                   ──►  workType
//! (position in list)          ──►  lineNumber          (1-based)
//! quantity                    ──►  quantity
//! unit_price                  ──►  unitPrice
//! Discount::Percentage(p)     ──►  discountPercentage  (discountAmount null)
//! Discount::Amount(a)         ──►  discountAmount      (discountPercentage null)
//! Discount::None              ──►  both null
//! tax_rate                    ──►  taxRate
//! pricing.line_total          ──►  lineTotal           (tax-inclusive)
//! ```
//!
//! `discountPercentage` and `discountAmount` are mutually exclusive; a
//! payload carrying both is rejected on the way back in. Amounts cross the
//! wire at full precision; rounding is a display concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::document::Document;
use crate::error::ValidationError;
use crate::money::Amount;
use crate::pricing::{PricingConfig, Totals};
use crate::types::{Discount, DocumentKind, DocumentStatus, LineDraft, LineItem, WorkType};

// =============================================================================
// Line Item Payload
// =============================================================================

/// One line in the backend's line-item schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    pub supply_id: Option<Uuid>,
    pub designation: String,
    pub work_type: WorkType,
    /// 1-based position of the line in its document.
    pub line_number: u32,
    #[ts(as = "String")]
    pub quantity: Decimal,
    pub unit_price: Amount,
    #[ts(as = "Option<String>")]
    pub discount_percentage: Option<Decimal>,
    pub discount_amount: Option<Amount>,
    #[ts(as = "String")]
    pub tax_rate: Decimal,
    /// Tax-inclusive line figure (`line_ht + line_tax`).
    pub line_total: Amount,
}

impl LineItemPayload {
    /// Builds the payload for the line at `index` (0-based) in a list.
    pub fn from_line(index: usize, line: &LineItem, config: &PricingConfig) -> Self {
        let pricing = line.pricing(config);

        let (discount_percentage, discount_amount) = match line.discount {
            Discount::None => (None, None),
            Discount::Percentage(p) => (Some(p), None),
            Discount::Amount(a) => (None, Some(a)),
        };

        LineItemPayload {
            supply_id: line.supply_id,
            designation: line.designation.clone(),
            work_type: line.work_type,
            line_number: index as u32 + 1,
            quantity: line.quantity,
            unit_price: line.unit_price,
            discount_percentage,
            discount_amount,
            tax_rate: line.tax_rate.percent(),
            line_total: pricing.line_total,
        }
    }

    /// Turns the payload back into a draft, to re-enter the validation gate.
    ///
    /// The stored `lineTotal` is dropped on the way in: totals are always
    /// recomputed from the fields, never trusted from the wire.
    pub fn into_draft(self) -> Result<LineDraft, ValidationError> {
        let discount = match (self.discount_percentage, self.discount_amount) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::InvalidFormat {
                    field: "discount".to_string(),
                    reason: "discountPercentage and discountAmount are mutually exclusive"
                        .to_string(),
                })
            }
            (Some(p), None) => Discount::Percentage(p),
            (None, Some(a)) => Discount::Amount(a),
            (None, None) => Discount::None,
        };

        Ok(LineDraft {
            supply_id: self.supply_id,
            designation: Some(self.designation),
            work_type: Some(self.work_type.as_str().to_string()),
            quantity: Some(self.quantity),
            unit_price: Some(self.unit_price.value()),
            discount,
            tax_rate: Some(self.tax_rate),
        })
    }
}

// =============================================================================
// Document Payload
// =============================================================================

/// A full document as submitted to the backend: header, numbered lines,
/// and the totals recomputed at serialization time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub reference: String,
    pub customer: String,
    pub status: DocumentStatus,
    pub lines: Vec<LineItemPayload>,
    pub totals: Totals,
}

impl DocumentPayload {
    pub fn from_document(doc: &Document) -> Self {
        DocumentPayload {
            id: doc.id,
            kind: doc.kind,
            reference: doc.reference.clone(),
            customer: doc.customer.clone(),
            status: doc.status,
            lines: doc
                .lines()
                .iter()
                .enumerate()
                .map(|(i, line)| LineItemPayload::from_line(i, line, &doc.pricing))
                .collect(),
            totals: doc.totals(),
        }
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// The backend's `{success, data, message}` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// A successful response carrying data.
    pub fn ok(data: T) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// A failed response carrying a user-facing message.
    pub fn error(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
