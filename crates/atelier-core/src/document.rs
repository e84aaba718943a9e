//! # Document
//!
//! The parent entity of a line list: an invoice, quote, or work
//! authorization being edited in a form session.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Operations                                  │
//! │                                                                         │
//! │  Form Action              Method                  Line List Change      │
//! │  ───────────              ──────                  ────────────────      │
//! │                                                                         │
//! │  "Add line" ────────────► add_line(draft) ──────► lines.push(line)     │
//! │                                                                         │
//! │  Edit a row ────────────► replace_line(i, d) ───► lines[i] = line      │
//! │                                                                         │
//! │  Remove a row ──────────► remove_line(i) ───────► lines.remove(i)      │
//! │                                                                         │
//! │  Form reset ────────────► reset() ──────────────► lines.clear()        │
//! │                                                                         │
//! │  Totals display ────────► totals() ─────────────► (read only)          │
//! │                                                                         │
//! │  Every insertion goes through LineDraft::validate; no partial line     │
//! │  ever enters the list.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The line list is a simple ordered collection (insertion order, no
//! cross-line invariant). A document owns its lines exclusively; `&mut self`
//! on every mutator is the whole concurrency story.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::pricing::{aggregate, PricingConfig, Totals};
use crate::types::{DocumentKind, DocumentStatus, LineDraft, LineItem};
use crate::MAX_DOCUMENT_LINES;

/// An invoice, quote, or work authorization with its priced lines.
///
/// Totals are never stored; [`Document::totals`] recomputes them from the
/// current lines on every call.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Document {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Which form this document came from.
    pub kind: DocumentKind,

    /// Business reference shown to the user (e.g. "INV-2024-0042").
    pub reference: String,

    /// Customer display name.
    pub customer: String,

    /// Lifecycle status. Lines are editable in Draft only.
    pub status: DocumentStatus,

    /// Pricing policy for this document.
    pub pricing: PricingConfig,

    /// The ordered line list. Only the validation gate appends to it.
    lines: Vec<LineItem>,

    /// When the document was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the document was finalized.
    #[ts(as = "Option<String>")]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Creates an empty draft document with the default pricing policy.
    pub fn new(kind: DocumentKind, reference: impl Into<String>, customer: impl Into<String>) -> Self {
        Document {
            id: Uuid::new_v4(),
            kind,
            reference: reference.into(),
            customer: customer.into(),
            status: DocumentStatus::Draft,
            pricing: PricingConfig::default(),
            lines: Vec::new(),
            created_at: Utc::now(),
            finalized_at: None,
        }
    }

    /// Creates an empty draft with an explicit pricing policy.
    pub fn with_pricing(
        kind: DocumentKind,
        reference: impl Into<String>,
        customer: impl Into<String>,
        pricing: PricingConfig,
    ) -> Self {
        Document {
            pricing,
            ..Document::new(kind, reference, customer)
        }
    }

    // =========================================================================
    // Line Operations
    // =========================================================================

    /// Validates a draft and appends the resulting line.
    ///
    /// ## Behavior
    /// - The draft runs through the validation gate first; a rejected draft
    ///   leaves the document untouched and the error names the failing field
    /// - The document must be in Draft status
    /// - The line count is capped at [`MAX_DOCUMENT_LINES`]
    pub fn add_line(&mut self, draft: LineDraft) -> CoreResult<()> {
        self.ensure_editable()?;

        if self.lines.len() >= MAX_DOCUMENT_LINES {
            return Err(CoreError::DocumentTooLarge {
                max: MAX_DOCUMENT_LINES,
            });
        }

        let line = draft.validate()?;
        debug!(
            reference = %self.reference,
            designation = %line.designation,
            work_type = %line.work_type.as_str(),
            "Added line"
        );
        self.lines.push(line);
        Ok(())
    }

    /// Replaces the line at `index` with a freshly validated draft.
    pub fn replace_line(&mut self, index: usize, draft: LineDraft) -> CoreResult<()> {
        self.ensure_editable()?;

        if index >= self.lines.len() {
            return Err(CoreError::LineNotFound { index });
        }

        let line = draft.validate()?;
        debug!(reference = %self.reference, index, "Replaced line");
        self.lines[index] = line;
        Ok(())
    }

    /// Removes and returns the line at `index`.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<LineItem> {
        self.ensure_editable()?;

        if index >= self.lines.len() {
            return Err(CoreError::LineNotFound { index });
        }

        debug!(reference = %self.reference, index, "Removed line");
        Ok(self.lines.remove(index))
    }

    /// Discards all lines (form reset).
    pub fn reset(&mut self) -> CoreResult<()> {
        self.ensure_editable()?;
        debug!(reference = %self.reference, discarded = self.lines.len(), "Reset document");
        self.lines.clear();
        Ok(())
    }

    /// The current lines, in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Recomputes the document totals from the current lines.
    pub fn totals(&self) -> Totals {
        aggregate(&self.lines, &self.pricing)
    }

    // =========================================================================
    // Status Transitions
    // =========================================================================

    /// Freezes the line list. Draft → Finalized.
    ///
    /// An empty document cannot be finalized.
    pub fn finalize(&mut self) -> CoreResult<()> {
        self.ensure_editable()?;

        if self.lines.is_empty() {
            return Err(CoreError::EmptyDocument {
                reference: self.reference.clone(),
            });
        }

        self.status = DocumentStatus::Finalized;
        self.finalized_at = Some(Utc::now());
        debug!(reference = %self.reference, lines = self.lines.len(), "Finalized document");
        Ok(())
    }

    /// Cancels the document. Draft or Finalized → Voided.
    pub fn void(&mut self) -> CoreResult<()> {
        if self.status == DocumentStatus::Voided {
            return Err(self.not_editable());
        }
        self.status = DocumentStatus::Voided;
        debug!(reference = %self.reference, "Voided document");
        Ok(())
    }

    fn ensure_editable(&self) -> CoreResult<()> {
        if self.status != DocumentStatus::Draft {
            return Err(self.not_editable());
        }
        Ok(())
    }

    fn not_editable(&self) -> CoreError {
        CoreError::DocumentNotEditable {
            reference: self.reference.clone(),
            status: self.status.as_str().to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Discount;
    use rust_decimal_macros::dec;

    fn labor_draft(hours: rust_decimal::Decimal, rate: rust_decimal::Decimal) -> LineDraft {
        LineDraft {
            designation: Some("Labor".to_string()),
            work_type: Some("labor".to_string()),
            quantity: Some(hours),
            unit_price: Some(rate),
            discount: Discount::None,
            tax_rate: Some(dec!(20)),
            ..LineDraft::default()
        }
    }

    fn quote() -> Document {
        Document::new(DocumentKind::Quote, "QUO-001", "Garage Martin")
    }

    #[test]
    fn test_add_line_and_totals() {
        let mut doc = quote();
        doc.add_line(labor_draft(dec!(2), dec!(50))).unwrap();

        let totals = doc.totals();
        assert_eq!(totals.labor_cost.value(), dec!(100));
        assert_eq!(totals.total_ht.value(), dec!(100));
        assert_eq!(totals.tax_amount.value(), dec!(20.00));
        assert_eq!(totals.total_ttc.value(), dec!(120.00));
    }

    #[test]
    fn test_rejected_draft_leaves_document_untouched() {
        let mut doc = quote();
        let mut bad = labor_draft(dec!(1), dec!(50));
        bad.unit_price = None;

        assert!(doc.add_line(bad).is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_remove_and_replace() {
        let mut doc = quote();
        doc.add_line(labor_draft(dec!(1), dec!(50))).unwrap();
        doc.add_line(labor_draft(dec!(2), dec!(50))).unwrap();

        let removed = doc.remove_line(0).unwrap();
        assert_eq!(removed.quantity, dec!(1));
        assert_eq!(doc.line_count(), 1);

        doc.replace_line(0, labor_draft(dec!(3), dec!(60))).unwrap();
        assert_eq!(doc.totals().total_ht.value(), dec!(180));

        assert!(matches!(
            doc.remove_line(5),
            Err(CoreError::LineNotFound { index: 5 })
        ));
    }

    #[test]
    fn test_reset_discards_lines() {
        let mut doc = quote();
        doc.add_line(labor_draft(dec!(1), dec!(50))).unwrap();
        doc.reset().unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.totals(), crate::pricing::Totals::default());
    }

    #[test]
    fn test_totals_recomputed_on_every_read() {
        let mut doc = quote();
        doc.add_line(labor_draft(dec!(1), dec!(50))).unwrap();
        let before = doc.totals();
        doc.add_line(labor_draft(dec!(1), dec!(30))).unwrap();
        let after = doc.totals();

        assert_eq!(before.total_ht.value(), dec!(50));
        assert_eq!(after.total_ht.value(), dec!(80));
    }

    #[test]
    fn test_finalized_document_is_frozen() {
        let mut doc = quote();
        doc.add_line(labor_draft(dec!(1), dec!(50))).unwrap();
        doc.finalize().unwrap();

        assert_eq!(doc.status, DocumentStatus::Finalized);
        assert!(doc.finalized_at.is_some());
        assert!(matches!(
            doc.add_line(labor_draft(dec!(1), dec!(10))),
            Err(CoreError::DocumentNotEditable { .. })
        ));
        assert!(doc.reset().is_err());
        assert!(doc.remove_line(0).is_err());
    }

    #[test]
    fn test_empty_document_cannot_be_finalized() {
        let mut doc = quote();
        assert!(matches!(
            doc.finalize(),
            Err(CoreError::EmptyDocument { .. })
        ));
    }

    #[test]
    fn test_void_transitions() {
        let mut doc = quote();
        doc.add_line(labor_draft(dec!(1), dec!(50))).unwrap();
        doc.finalize().unwrap();
        doc.void().unwrap();
        assert_eq!(doc.status, DocumentStatus::Voided);

        // Voiding twice is an error
        assert!(doc.void().is_err());
    }

    #[test]
    fn test_line_cap() {
        let mut doc = quote();
        for _ in 0..MAX_DOCUMENT_LINES {
            doc.add_line(labor_draft(dec!(1), dec!(1))).unwrap();
        }
        assert!(matches!(
            doc.add_line(labor_draft(dec!(1), dec!(1))),
            Err(CoreError::DocumentTooLarge { .. })
        ));
    }

    #[test]
    fn test_negative_line_policy_is_per_document() {
        let mut doc = Document::with_pricing(
            DocumentKind::Invoice,
            "INV-001",
            "Garage Martin",
            PricingConfig {
                allow_negative_line_total: false,
            },
        );
        let mut draft = labor_draft(dec!(1), dec!(50));
        draft.discount = Discount::Amount(crate::money::Amount::new(dec!(75)));
        doc.add_line(draft).unwrap();

        assert_eq!(doc.totals().total_ht, crate::money::Amount::ZERO);
    }
}
