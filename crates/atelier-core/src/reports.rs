//! # Reports
//!
//! Dashboard roll-ups over documents. Everything here is a pure fold of
//! [`crate::pricing::aggregate`] results; nothing is cached or persisted.
//!
//! Policy: counts cover every document; monetary roll-ups skip voided
//! documents, and invoice revenue counts finalized invoices only (a draft
//! invoice is not revenue yet).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::document::Document;
use crate::pricing::Totals;
use crate::types::{DocumentKind, DocumentStatus};

/// Activity roll-up for the reports dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub invoice_count: usize,
    pub quote_count: usize,
    pub authorization_count: usize,

    /// Totals of finalized invoices (revenue).
    pub invoiced: Totals,

    /// Totals of non-voided quotes (pipeline).
    pub quoted: Totals,

    /// Totals of non-voided work authorizations.
    pub authorized: Totals,
}

/// Summarizes a slice of documents.
pub fn summarize(documents: &[Document]) -> ActivitySummary {
    let mut summary = ActivitySummary::default();

    for doc in documents {
        match doc.kind {
            DocumentKind::Invoice => summary.invoice_count += 1,
            DocumentKind::Quote => summary.quote_count += 1,
            DocumentKind::WorkAuthorization => summary.authorization_count += 1,
        }

        if doc.status == DocumentStatus::Voided {
            continue;
        }

        let totals = doc.totals();
        match doc.kind {
            DocumentKind::Invoice => {
                if doc.status == DocumentStatus::Finalized {
                    summary.invoiced.accumulate(&totals);
                }
            }
            DocumentKind::Quote => summary.quoted.accumulate(&totals),
            DocumentKind::WorkAuthorization => summary.authorized.accumulate(&totals),
        }
    }

    summary
}

// =============================================================================
// Unit Tests
// =============================================================================
