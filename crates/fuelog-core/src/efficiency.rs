//! Fuel efficiency policies
//!
//! A new fill is always evaluated against the store as it was *before* the
//! fill is appended, so a record never takes part in its own window.

use fuelog_api::{EfficiencyPolicy, FuelRecord, LegacyFillPolicy};
use std::fmt;

/// The figures of a new fill that efficiency depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillReading {
    pub odometer: f64,
    pub fuel_amount: f64,
    pub full_tank: bool,
}

/// Why no efficiency figure could be derived.
///
/// This is a normal outcome, stored as a null efficiency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotComputable {
    /// No prior record to measure from
    EmptyHistory,
    /// Odometer did not advance past the reference record
    NonPositiveDistance { distance: f64 },
    /// A partial fill cannot close a full-tank window
    PartialFill,
    /// No earlier full-tank fill to open a window
    NoPriorFullTank,
    /// No fuel was attributed to the window
    NoFuel,
}

impl fmt::Display for NotComputable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotComputable::EmptyHistory => write!(f, "no earlier record"),
            NotComputable::NonPositiveDistance { distance } => {
                write!(f, "odometer did not advance ({distance})")
            }
            NotComputable::PartialFill => write!(f, "partial fill"),
            NotComputable::NoPriorFullTank => write!(f, "no earlier full-tank fill"),
            NotComputable::NoFuel => write!(f, "no fuel in window"),
        }
    }
}

/// Evaluate a new fill against the prior history with the given policy
pub fn evaluate(
    policy: EfficiencyPolicy,
    history: &[FuelRecord],
    fill: &FillReading,
    legacy: LegacyFillPolicy,
) -> Result<f64, NotComputable> {
    match policy {
        EfficiencyPolicy::Consecutive => consecutive(history, fill),
        EfficiencyPolicy::FullTank => full_tank(history, fill, legacy),
    }
}

/// Distance since the last record in storage order over this fill's fuel
fn consecutive(history: &[FuelRecord], fill: &FillReading) -> Result<f64, NotComputable> {
    let last = history.last().ok_or(NotComputable::EmptyHistory)?;
    let distance = positive_distance(fill.odometer - last.odometer)?;
    ratio(distance, fill.fuel_amount)
}

/// Distance since the last full-tank fill over every litre added after it,
/// this fill included
fn full_tank(
    history: &[FuelRecord],
    fill: &FillReading,
    legacy: LegacyFillPolicy,
) -> Result<f64, NotComputable> {
    if !fill.full_tank {
        return Err(NotComputable::PartialFill);
    }
    if history.is_empty() {
        return Err(NotComputable::EmptyHistory);
    }

    let anchor = history
        .iter()
        .rposition(|r| r.is_full_tank(legacy))
        .ok_or(NotComputable::NoPriorFullTank)?;

    let distance = positive_distance(fill.odometer - history[anchor].odometer)?;
    let fuel_used: f64 = history[anchor + 1..]
        .iter()
        .map(|r| r.fuel_amount)
        .sum::<f64>()
        + fill.fuel_amount;

    ratio(distance, fuel_used)
}

fn positive_distance(distance: f64) -> Result<f64, NotComputable> {
    if distance.is_finite() && distance > 0.0 {
        Ok(distance)
    } else {
        Err(NotComputable::NonPositiveDistance { distance })
    }
}

fn ratio(distance: f64, fuel: f64) -> Result<f64, NotComputable> {
    if fuel.is_finite() && fuel > 0.0 {
        Ok(round2(distance / fuel))
    } else {
        Err(NotComputable::NoFuel)
    }
}

/// Round to two decimal places, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unit price rounded to the nearest whole currency unit
pub fn price_per_liter(price: i64, fuel_amount: f64) -> i64 {
    (price as f64 / fuel_amount).round() as i64
}
