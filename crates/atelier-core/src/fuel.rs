//! # Fuel Log
//!
//! Fuel fill-up entries and the consumption statistics derived from them.
//!
//! Costs use the same [`Amount`] type as document lines; statistics keep
//! full precision and leave display rounding to the caller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Amount;

// =============================================================================
// Fuel Entry
// =============================================================================

/// One fill-up of a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FuelEntry {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Vehicle this fill-up belongs to (registration plate or fleet code).
    pub vehicle: String,

    /// When the tank was filled.
    #[ts(as = "String")]
    pub filled_at: DateTime<Utc>,

    /// Odometer reading at fill time, in kilometers.
    #[ts(as = "String")]
    pub odometer_km: Decimal,

    /// Liters filled.
    #[ts(as = "String")]
    pub liters: Decimal,

    /// Price per liter at the pump.
    pub price_per_liter: Amount,
}

impl FuelEntry {
    /// Creates a validated entry.
    ///
    /// ## Rules
    /// - `vehicle` must not be empty
    /// - `odometer_km` and `liters` must be strictly positive
    /// - `price_per_liter` must be non-negative
    pub fn new(
        vehicle: impl Into<String>,
        filled_at: DateTime<Utc>,
        odometer_km: Decimal,
        liters: Decimal,
        price_per_liter: Amount,
    ) -> Result<Self, ValidationError> {
        let vehicle = vehicle.into();

        if vehicle.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "vehicle".to_string(),
            });
        }
        if odometer_km <= Decimal::ZERO {
            return Err(ValidationError::MustBePositive {
                field: "odometer_km".to_string(),
            });
        }
        if liters <= Decimal::ZERO {
            return Err(ValidationError::MustBePositive {
                field: "liters".to_string(),
            });
        }
        if price_per_liter.is_negative() {
            return Err(ValidationError::MustBeNonNegative {
                field: "price_per_liter".to_string(),
            });
        }

        Ok(FuelEntry {
            id: Uuid::new_v4(),
            vehicle,
            filled_at,
            odometer_km,
            liters,
            price_per_liter,
        })
    }

    /// Cost of this fill-up (liters × price per liter), full precision.
    pub fn cost(&self) -> Amount {
        self.price_per_liter * self.liters
    }
}

// =============================================================================
// Fuel Statistics
// =============================================================================

/// Consumption and cost statistics over a set of fill-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FuelStats {
    pub fill_count: usize,

    #[ts(as = "String")]
    pub total_liters: Decimal,

    pub total_cost: Amount,

    /// Distance between the first and last odometer reading.
    #[ts(as = "String")]
    pub distance_km: Decimal,

    /// Liters per 100 km. The first fill only sets the odometer baseline,
    /// so its liters are excluded. `None` below two fills or zero distance.
    #[ts(as = "Option<String>")]
    pub consumption_per_100km: Option<Decimal>,

    /// Fuel cost per kilometer driven. `None` when distance is zero.
    #[ts(as = "Option<String>")]
    pub cost_per_km: Option<Decimal>,
}

impl FuelStats {
    /// Computes statistics over a vehicle's fill-ups.
    ///
    /// Entries may arrive in any order; they are ranked by odometer reading.
    pub fn for_entries(entries: &[FuelEntry]) -> FuelStats {
        let mut ordered: Vec<&FuelEntry> = entries.iter().collect();
        ordered.sort_by(|a, b| a.odometer_km.cmp(&b.odometer_km));

        let total_liters: Decimal = ordered.iter().map(|e| e.liters).sum();
        let total_cost: Amount = ordered.iter().map(|e| e.cost()).sum();

        let distance_km = match (ordered.first(), ordered.last()) {
            (Some(first), Some(last)) => last.odometer_km - first.odometer_km,
            _ => Decimal::ZERO,
        };

        let consumption_per_100km = if ordered.len() >= 2 && !distance_km.is_zero() {
            let liters_after_baseline: Decimal =
                ordered.iter().skip(1).map(|e| e.liters).sum();
            Some(liters_after_baseline / distance_km * Decimal::ONE_HUNDRED)
        } else {
            None
        };

        let cost_per_km = if !distance_km.is_zero() {
            Some(total_cost.value() / distance_km)
        } else {
            None
        };

        FuelStats {
            fill_count: ordered.len(),
            total_liters,
            total_cost,
            distance_km,
            consumption_per_100km,
            cost_per_km,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
