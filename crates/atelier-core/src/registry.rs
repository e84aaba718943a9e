//! # Price Registry
//!
//! In-memory catalog of priced supplies and services. Forms pick an entry,
//! the registry prefills a [`LineDraft`] with the entry's current price, and
//! the line keeps that price even if the entry changes later (snapshot at
//! draft time).
//!
//! Persistence of the catalog is the backend's concern; this registry is the
//! working copy a form session operates on.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Amount;
use crate::types::{LineDraft, TaxRate, WorkType};
use crate::validation::validate_reference;

// =============================================================================
// Price Entry
// =============================================================================

/// A priced supply or service in the registry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceEntry {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Business reference, unique within the registry (e.g. "OIL-5W30").
    pub reference: String,

    /// Display name shown in search results and on document lines.
    pub label: String,

    /// Category this entry prices.
    pub work_type: WorkType,

    /// Current unit price.
    pub unit_price: Amount,

    /// Tax rate applied to lines drawn from this entry.
    pub tax_rate: TaxRate,

    /// Whether the entry is selectable (soft delete).
    pub is_active: bool,

    /// When the entry was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the price was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl PriceEntry {
    /// Creates an active entry with a validated reference.
    pub fn new(
        reference: &str,
        label: impl Into<String>,
        work_type: WorkType,
        unit_price: Amount,
        tax_rate: TaxRate,
    ) -> Result<Self, ValidationError> {
        let reference = validate_reference(reference)?;
        let now = Utc::now();
        Ok(PriceEntry {
            id: Uuid::new_v4(),
            reference,
            label: label.into(),
            work_type,
            unit_price,
            tax_rate,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

// =============================================================================
// Price Registry
// =============================================================================

/// The catalog, keyed by business reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceRegistry {
    entries: HashMap<String, PriceEntry>,
}

impl PriceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        PriceRegistry {
            entries: HashMap::new(),
        }
    }

    /// Adds an entry. The reference must be unused.
    pub fn add(&mut self, entry: PriceEntry) -> CoreResult<()> {
        if self.entries.contains_key(&entry.reference) {
            return Err(ValidationError::Duplicate {
                field: "reference".to_string(),
                value: entry.reference.clone(),
            }
            .into());
        }
        debug!(reference = %entry.reference, "Added price entry");
        self.entries.insert(entry.reference.clone(), entry);
        Ok(())
    }

    /// Looks up an entry by reference.
    pub fn get(&self, reference: &str) -> Option<&PriceEntry> {
        self.entries.get(reference)
    }

    /// Updates the unit price of an entry.
    pub fn update_price(&mut self, reference: &str, unit_price: Amount) -> CoreResult<()> {
        let entry = self
            .entries
            .get_mut(reference)
            .ok_or_else(|| CoreError::EntryNotFound {
                reference: reference.to_string(),
            })?;
        entry.unit_price = unit_price;
        entry.updated_at = Utc::now();
        debug!(reference = %reference, price = %unit_price, "Updated price entry");
        Ok(())
    }

    /// Deactivates an entry (soft delete). It stays resolvable by reference
    /// for existing documents but stops appearing in searches.
    pub fn deactivate(&mut self, reference: &str) -> CoreResult<()> {
        let entry = self
            .entries
            .get_mut(reference)
            .ok_or_else(|| CoreError::EntryNotFound {
                reference: reference.to_string(),
            })?;
        entry.is_active = false;
        entry.updated_at = Utc::now();
        debug!(reference = %reference, "Deactivated price entry");
        Ok(())
    }

    /// Searches active entries by reference or label.
    ///
    /// ## Behavior
    /// - Case-insensitive substring match
    /// - Empty query returns active entries up to `limit`
    /// - Results are sorted by reference for a stable display order
    pub fn search(&self, query: &str, limit: usize) -> Vec<&PriceEntry> {
        let query = query.trim().to_lowercase();

        debug!(query = %query, limit, "Searching price entries");

        let mut results: Vec<&PriceEntry> = self
            .entries
            .values()
            .filter(|e| e.is_active)
            .filter(|e| {
                query.is_empty()
                    || e.reference.to_lowercase().contains(&query)
                    || e.label.to_lowercase().contains(&query)
            })
            .collect();

        results.sort_by(|a, b| a.reference.cmp(&b.reference));
        results.truncate(limit);
        results
    }

    /// Prefills a line draft from an entry (price snapshot at draft time).
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Amount;
    /// use atelier_core::registry::{PriceEntry, PriceRegistry};
    /// use atelier_core::types::{TaxRate, WorkType};
    /// use rust_decimal_macros::dec;
    ///
    /// let mut registry = PriceRegistry::new();
    /// registry
    ///     .add(PriceEntry::new(
    ///         "OIL-5W30",
    ///         "Engine oil 5W30",
    ///         WorkType::Supply,
    ///         Amount::new(dec!(12.50)),
    ///         TaxRate::from_percent(dec!(20)),
    ///     ).unwrap())
    ///     .unwrap();
    ///
    /// let draft = registry.draft_line("OIL-5W30", dec!(4)).unwrap();
    /// let line = draft.validate().unwrap();
    /// assert_eq!(line.unit_price.value(), dec!(12.50));
    /// ```
    pub fn draft_line(&self, reference: &str, quantity: Decimal) -> CoreResult<LineDraft> {
        let entry = self.get(reference).ok_or_else(|| CoreError::EntryNotFound {
            reference: reference.to_string(),
        })?;

        if !entry.is_active {
            return Err(CoreError::EntryInactive {
                reference: reference.to_string(),
            });
        }

        Ok(LineDraft {
            supply_id: Some(entry.id),
            designation: Some(entry.label.clone()),
            work_type: Some(entry.work_type.as_str().to_string()),
            quantity: Some(quantity),
            unit_price: Some(entry.unit_price.value()),
            discount: Default::default(),
            tax_rate: Some(entry.tax_rate.percent()),
        })
    }

    /// Number of entries, active or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(reference: &str, label: &str, price: Decimal) -> PriceEntry {
        PriceEntry::new(
            reference,
            label,
            WorkType::Supply,
            Amount::new(price),
            TaxRate::from_percent(dec!(20)),
        )
        .unwrap()
    }

    fn seeded() -> PriceRegistry {
        let mut registry = PriceRegistry::new();
        registry.add(entry("OIL-5W30", "Engine oil 5W30", dec!(12.50))).unwrap();
        registry.add(entry("PAD-FRONT", "Front brake pads", dec!(45))).unwrap();
        registry.add(entry("FILTER-OIL", "Oil filter", dec!(8.90))).unwrap();
        registry
    }

    #[test]
    fn test_duplicate_reference_rejected() {
        let mut registry = seeded();
        let err = registry
            .add(entry("OIL-5W30", "Another oil", dec!(10)))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_invalid_reference_rejected_at_construction() {
        assert!(PriceEntry::new(
            "has space",
            "Bad",
            WorkType::Other,
            Amount::ZERO,
            TaxRate::zero()
        )
        .is_err());
    }

    #[test]
    fn test_search_matches_reference_and_label() {
        let registry = seeded();

        let by_ref = registry.search("oil", 10);
        // OIL-5W30 (reference), FILTER-OIL (reference), Oil filter (label)
        assert_eq!(by_ref.len(), 2);

        let by_label = registry.search("brake", 10);
        assert_eq!(by_label.len(), 1);
        assert_eq!(by_label[0].reference, "PAD-FRONT");
    }

    #[test]
    fn test_search_empty_query_lists_active() {
        let registry = seeded();
        assert_eq!(registry.search("", 10).len(), 3);
        assert_eq!(registry.search("", 2).len(), 2);
    }

    #[test]
    fn test_search_results_sorted_by_reference() {
        let registry = seeded();
        let all = registry.search("", 10);
        let refs: Vec<&str> = all.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["FILTER-OIL", "OIL-5W30", "PAD-FRONT"]);
    }

    #[test]
    fn test_deactivated_entry_hidden_from_search_but_resolvable() {
        let mut registry = seeded();
        registry.deactivate("OIL-5W30").unwrap();

        assert_eq!(registry.search("5W30", 10).len(), 0);
        assert!(registry.get("OIL-5W30").is_some());
        assert!(matches!(
            registry.draft_line("OIL-5W30", dec!(1)),
            Err(CoreError::EntryInactive { .. })
        ));
    }

    #[test]
    fn test_draft_line_snapshots_price() {
        let mut registry = seeded();
        let draft = registry.draft_line("PAD-FRONT", dec!(2)).unwrap();

        // Price changes after the draft was taken do not affect it
        registry.update_price("PAD-FRONT", Amount::new(dec!(60))).unwrap();

        let line = draft.validate().unwrap();
        assert_eq!(line.unit_price.value(), dec!(45));
        assert_eq!(line.quantity, dec!(2));
        assert_eq!(line.work_type, WorkType::Supply);
        assert!(line.supply_id.is_some());
    }

    #[test]
    fn test_unknown_reference() {
        let registry = seeded();
        assert!(matches!(
            registry.draft_line("NOPE", dec!(1)),
            Err(CoreError::EntryNotFound { .. })
        ));
    }
}
