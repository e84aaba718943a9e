//! # atelier-core: Pure Business Logic for Atelier
//!
//! This crate is the **heart** of Atelier. It contains the line pricing
//! engine and the domain model shared by the invoice, quote, and work
//! authorization forms, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atelier Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Forms                                │   │
//! │  │   Invoice ──► Quote ──► Work Authorization ──► Reports          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atelier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │ document  │  │ validation│  │   │
//! │  │   │ LineItem  │  │ price_line│  │ Document  │  │   gate    │  │   │
//! │  │   │ Discount  │  │ aggregate │  │ add/reset │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ registry  │  │   fuel    │  │   wire    │  │   │
//! │  │   │  Amount   │  │ PriceBook │  │ FuelStats │  │ payloads  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every computation is deterministic, and derived
//!    figures (line totals, document totals) are recomputed on every read
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: All monetary values are `rust_decimal` decimals at
//!    full precision; rounding exists only at the presentation boundary
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::document::Document;
//! use atelier_core::types::{Discount, DocumentKind, LineDraft};
//! use rust_decimal_macros::dec;
//!
//! let mut invoice = Document::new(DocumentKind::Invoice, "INV-001", "Garage Martin");
//!
//! invoice
//!     .add_line(LineDraft {
//!         designation: Some("Front brake pads".into()),
//!         work_type: Some("supply".into()),
//!         quantity: Some(dec!(2)),
//!         unit_price: Some(dec!(100)),
//!         discount: Discount::Percentage(dec!(10)),
//!         tax_rate: Some(dec!(18)),
//!         ..LineDraft::default()
//!     })
//!     .unwrap();
//!
//! let totals = invoice.totals();
//! assert_eq!(totals.total_ht.value(), dec!(180.0));
//! assert_eq!(totals.tax_amount.value(), dec!(32.40));
//! assert_eq!(totals.total_ttc.value(), dec!(212.40));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod fuel;
pub mod money;
pub mod pricing;
pub mod registry;
pub mod reports;
pub mod types;
pub mod validation;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atelier_core::Amount` instead of
// `use atelier_core::money::Amount`

pub use document::Document;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Amount;
pub use pricing::{aggregate, price_line, LinePricing, PricingConfig, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single document
///
/// Guards against runaway forms; the backend enforces the same cap.
pub const MAX_DOCUMENT_LINES: usize = 100;
