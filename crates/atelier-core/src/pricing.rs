//! # Line Pricing Engine
//!
//! Computes per-line totals and document aggregates for invoices, quotes,
//! and work authorizations. This is the single home of the discount/tax
//! arithmetic that the browser forms all share.
//!
//! ## Operation Order (fixed)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price_line                                                             │
//! │                                                                         │
//! │  base = quantity × unit_price                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discount:  none        → base                                         │
//! │             percentage  → base × (1 − p/100)        (only if p > 0)    │
//! │             amount      → base − a                  (only if a > 0)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  line_ht    = base                  (post-discount, pre-tax)           │
//! │  line_tax   = line_ht × rate/100                                       │
//! │  line_total = line_ht + line_tax    (tax-inclusive)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both figures are always computed and retained: `line_ht` feeds the
//! aggregation (tax tracked separately), `line_total` serves any UI that
//! wants a tax-inclusive single-line figure. No rounding happens anywhere in
//! this module; presentation layers round through [`Amount::rounded`].
//!
//! An amount discount larger than the base legitimately drives `line_ht`
//! negative. Whether that is allowed is a per-document policy,
//! [`PricingConfig::allow_negative_line_total`], not a hardcoded choice.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Amount;
use crate::types::{Discount, LineItem, WorkType};

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Per-document pricing policy.
///
/// Constructor-injected wherever pricing runs; nothing in the engine reads
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// When an amount discount exceeds the line base, keep the negative
    /// result (`true`, the historical behavior of the forms) or clamp the
    /// HT at zero (`false`).
    pub allow_negative_line_total: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            allow_negative_line_total: true,
        }
    }
}

// =============================================================================
// Line Pricing
// =============================================================================

/// The derived price figures of one line, at full precision.
///
/// Never stored; recomputed from the line on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LinePricing {
    /// Post-discount, pre-tax amount.
    pub line_ht: Amount,
    /// Tax on `line_ht`.
    pub line_tax: Amount,
    /// `line_ht + line_tax`, the tax-inclusive figure.
    pub line_total: Amount,
}

/// Computes the price figures of a single line.
///
/// ## Example
/// ```rust
/// use atelier_core::pricing::{price_line, PricingConfig};
/// use atelier_core::types::{Discount, LineDraft};
/// use rust_decimal_macros::dec;
///
/// let line = LineDraft {
///     designation: Some("Front brake pads".into()),
///     work_type: Some("supply".into()),
///     quantity: Some(dec!(2)),
///     unit_price: Some(dec!(100)),
///     discount: Discount::Percentage(dec!(10)),
///     tax_rate: Some(dec!(18)),
///     ..LineDraft::default()
/// }
/// .validate()
/// .unwrap();
///
/// let pricing = price_line(&line, &PricingConfig::default());
/// assert_eq!(pricing.line_ht.value(), dec!(180.0));
/// assert_eq!(pricing.line_tax.value(), dec!(32.40));
/// assert_eq!(pricing.line_total.value(), dec!(212.40));
/// ```
pub fn price_line(line: &LineItem, config: &PricingConfig) -> LinePricing {
    let base = line.unit_price * line.quantity;

    let discounted = match line.discount {
        Discount::None => base,
        Discount::Percentage(p) if p.is_sign_positive() && !p.is_zero() => {
            base.apply_percentage_discount(p)
        }
        Discount::Amount(a) if a.is_positive() => {
            let reduced = base - a;
            if reduced.is_negative() && !config.allow_negative_line_total {
                Amount::ZERO
            } else {
                reduced
            }
        }
        // Zero-valued discounts leave the base untouched
        Discount::Percentage(_) | Discount::Amount(_) => base,
    };

    let line_ht = discounted;
    let line_tax = line_ht.tax_at(line.tax_rate);

    LinePricing {
        line_ht,
        line_tax,
        line_total: line_ht + line_tax,
    }
}

impl LineItem {
    /// Convenience accessor for [`price_line`].
    #[inline]
    pub fn pricing(&self, config: &PricingConfig) -> LinePricing {
        price_line(self, config)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Category-aggregated and grand totals of a line list.
///
/// Derived on every read, never persisted independently of the lines that
/// produced them.
///
/// ## Invariants
/// - `total_ht` is the straight sum of every line's HT, whatever its
///   category; `labor_cost + parts_cost + other_cost` may be smaller when
///   unrecognized work types are present
/// - `total_ttc == total_ht + tax_amount`, exactly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of HT amounts for labor lines.
    pub labor_cost: Amount,
    /// Sum of HT amounts for supply lines.
    pub parts_cost: Amount,
    /// Sum of HT amounts for other lines.
    pub other_cost: Amount,
    /// Sum of HT amounts for ALL lines.
    pub total_ht: Amount,
    /// Sum of per-line tax contributions.
    pub tax_amount: Amount,
    /// `total_ht + tax_amount`.
    pub total_ttc: Amount,
}

impl Totals {
    /// Field-wise addition, for rolling several documents up into a report.
    pub fn accumulate(&mut self, other: &Totals) {
        self.labor_cost += other.labor_cost;
        self.parts_cost += other.parts_cost;
        self.other_cost += other.other_cost;
        self.total_ht += other.total_ht;
        self.tax_amount += other.tax_amount;
        self.total_ttc += other.total_ttc;
    }
}

/// Aggregates a line list into [`Totals`].
///
/// Pure function of the list: recomputing it on an unchanged list yields
/// identical results (decimal arithmetic, no rounding, no hidden state).
///
/// Lines whose work type is [`WorkType::Unrecognized`] are excluded from the
/// three category buckets but still count toward `total_ht` and
/// `tax_amount`, which are straight all-lines sums.
pub fn aggregate(lines: &[LineItem], config: &PricingConfig) -> Totals {
    let mut totals = Totals::default();

    for line in lines {
        let pricing = price_line(line, config);

        match line.work_type {
            WorkType::Labor => totals.labor_cost += pricing.line_ht,
            WorkType::Supply => totals.parts_cost += pricing.line_ht,
            WorkType::Other => totals.other_cost += pricing.line_ht,
            WorkType::Unrecognized => {}
        }

        totals.total_ht += pricing.line_ht;
        totals.tax_amount += pricing.line_tax;
    }

    totals.total_ttc = totals.total_ht + totals.tax_amount;
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineDraft, TaxRate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn line(
        work_type: &str,
        quantity: Decimal,
        unit_price: Decimal,
        discount: Discount,
        tax_rate: Decimal,
    ) -> LineItem {
        LineDraft {
            designation: Some(format!("{} line", work_type)),
            work_type: Some(work_type.to_string()),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
            discount,
            tax_rate: Some(tax_rate),
            ..LineDraft::default()
        }
        .validate()
        .unwrap()
    }

    const CFG: PricingConfig = PricingConfig {
        allow_negative_line_total: true,
    };

    #[test]
    fn test_no_discount_ht_is_base() {
        let l = line("labor", dec!(3), dec!(45.50), Discount::None, dec!(0));
        let p = price_line(&l, &CFG);
        assert_eq!(p.line_ht.value(), dec!(136.50));
        assert_eq!(p.line_tax, Amount::ZERO);
        assert_eq!(p.line_total, p.line_ht);
    }

    #[test]
    fn test_percentage_discount_then_tax() {
        // quantity=2, unitPrice=100, 10% discount, 18% tax
        // lineHT = 2×100×0.9 = 180 ; lineTax = 180×0.18 = 32.4 ; total 212.4
        let l = line(
            "supply",
            dec!(2),
            dec!(100),
            Discount::Percentage(dec!(10)),
            dec!(18),
        );
        let p = price_line(&l, &CFG);
        assert_eq!(p.line_ht.value(), dec!(180.0));
        assert_eq!(p.line_tax.value(), dec!(32.4));
        assert_eq!(p.line_total.value(), dec!(212.4));
    }

    #[test]
    fn test_amount_discount() {
        let l = line(
            "supply",
            dec!(1),
            dec!(50),
            Discount::Amount(Amount::new(dec!(8))),
            dec!(0),
        );
        let p = price_line(&l, &CFG);
        assert_eq!(p.line_ht.value(), dec!(42));
    }

    #[test]
    fn test_amount_discount_exceeding_base_goes_negative() {
        // quantity=1, unitPrice=50, amount discount 75 → lineHT = −25
        let l = line(
            "supply",
            dec!(1),
            dec!(50),
            Discount::Amount(Amount::new(dec!(75))),
            dec!(0),
        );
        let p = price_line(&l, &CFG);
        assert_eq!(p.line_ht.value(), dec!(-25));
        assert_eq!(p.line_total.value(), dec!(-25));
    }

    #[test]
    fn test_amount_discount_clamped_when_configured() {
        let cfg = PricingConfig {
            allow_negative_line_total: false,
        };
        let l = line(
            "supply",
            dec!(1),
            dec!(50),
            Discount::Amount(Amount::new(dec!(75))),
            dec!(20),
        );
        let p = price_line(&l, &cfg);
        assert_eq!(p.line_ht, Amount::ZERO);
        assert_eq!(p.line_tax, Amount::ZERO);
        assert_eq!(p.line_total, Amount::ZERO);
    }

    #[test]
    fn test_zero_valued_discounts_are_inert() {
        let with_zero_pct = line(
            "labor",
            dec!(2),
            dec!(40),
            Discount::Percentage(dec!(0)),
            dec!(20),
        );
        let with_zero_amt = line(
            "labor",
            dec!(2),
            dec!(40),
            Discount::Amount(Amount::ZERO),
            dec!(20),
        );
        let without = line("labor", dec!(2), dec!(40), Discount::None, dec!(20));

        let cfg = PricingConfig::default();
        assert_eq!(price_line(&with_zero_pct, &cfg), price_line(&without, &cfg));
        assert_eq!(price_line(&with_zero_amt, &cfg), price_line(&without, &cfg));
    }

    #[test]
    fn test_hundred_percent_discount_gives_zero() {
        let l = line(
            "labor",
            dec!(4),
            dec!(25),
            Discount::Percentage(dec!(100)),
            dec!(20),
        );
        let p = price_line(&l, &CFG);
        assert!(p.line_ht.is_zero());
        assert!(p.line_total.is_zero());
    }

    #[test]
    fn test_line_identities_hold() {
        // lineTax == lineHT × rate/100 and lineTotal == lineHT + lineTax
        let l = line(
            "other",
            dec!(3.5),
            dec!(19.99),
            Discount::Percentage(dec!(12.5)),
            dec!(8.25),
        );
        let p = price_line(&l, &CFG);
        assert_eq!(p.line_tax, p.line_ht.tax_at(TaxRate::from_percent(dec!(8.25))));
        assert_eq!(p.line_total, p.line_ht + p.line_tax);
    }

    #[test]
    fn test_aggregate_partitions_by_work_type() {
        // One labor line HT=180, one supply line HT=50, no tax
        let lines = vec![
            line(
                "labor",
                dec!(2),
                dec!(100),
                Discount::Percentage(dec!(10)),
                dec!(0),
            ),
            line("supply", dec!(1), dec!(50), Discount::None, dec!(0)),
        ];
        let totals = aggregate(&lines, &CFG);
        assert_eq!(totals.labor_cost.value(), dec!(180.0));
        assert_eq!(totals.parts_cost.value(), dec!(50));
        assert_eq!(totals.other_cost, Amount::ZERO);
        assert_eq!(totals.total_ht.value(), dec!(230.0));
        assert_eq!(totals.tax_amount, Amount::ZERO);
        assert_eq!(totals.total_ttc.value(), dec!(230.0));
    }

    #[test]
    fn test_unrecognized_work_type_counts_in_grand_totals_only() {
        let mut foreign = line("labor", dec!(1), dec!(100), Discount::None, dec!(20));
        foreign.work_type = WorkType::Unrecognized;
        let known = line("labor", dec!(1), dec!(40), Discount::None, dec!(20));

        let totals = aggregate(&[foreign, known], &CFG);
        assert_eq!(totals.labor_cost.value(), dec!(40));
        assert_eq!(totals.parts_cost, Amount::ZERO);
        assert_eq!(totals.other_cost, Amount::ZERO);
        // The foreign line is still in the grand totals
        assert_eq!(totals.total_ht.value(), dec!(140));
        assert_eq!(totals.tax_amount.value(), dec!(28.00));
        assert_eq!(totals.total_ttc.value(), dec!(168.00));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let lines = vec![
            line(
                "labor",
                dec!(2.5),
                dec!(60),
                Discount::Percentage(dec!(5)),
                dec!(20),
            ),
            line(
                "supply",
                dec!(4),
                dec!(12.99),
                Discount::Amount(Amount::new(dec!(3))),
                dec!(5.5),
            ),
            line("other", dec!(1), dec!(0), Discount::None, dec!(20)),
        ];
        let first = aggregate(&lines, &CFG);
        let second = aggregate(&lines, &CFG);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ttc_identity_holds() {
        let lines = vec![
            line(
                "labor",
                dec!(1.75),
                dec!(80),
                Discount::Percentage(dec!(7.5)),
                dec!(20),
            ),
            line(
                "supply",
                dec!(3),
                dec!(33.33),
                Discount::Amount(Amount::new(dec!(120))),
                dec!(10),
            ),
        ];
        let totals = aggregate(&lines, &CFG);
        assert_eq!(totals.total_ttc, totals.total_ht + totals.tax_amount);
    }

    #[test]
    fn test_empty_list_aggregates_to_zero() {
        let totals = aggregate(&[], &CFG);
        assert_eq!(totals, Totals::default());
    }
}
