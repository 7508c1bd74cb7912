//! Aggregate statistics over the record store

use fuelog_api::{FuelRecord, FuelSummary};

use crate::round2;

fn efficiencies(records: &[FuelRecord]) -> impl Iterator<Item = f64> + '_ {
    records.iter().filter_map(|r| r.fuel_efficiency)
}

/// Mean of every computed efficiency, or `None` when there are none
pub fn average_efficiency(records: &[FuelRecord]) -> Option<f64> {
    let (total, count) = efficiencies(records).fold((0.0, 0usize), |(sum, n), e| (sum + e, n + 1));
    if count == 0 {
        return None;
    }
    Some(round2(total / count as f64))
}

/// Highest computed efficiency, or `None` when there are none
pub fn best_efficiency(records: &[FuelRecord]) -> Option<f64> {
    efficiencies(records).reduce(f64::max).map(round2)
}

/// Summarize the whole store.
///
/// The average unit price is total spend over total fuel, not the mean of
/// per-record unit prices.
pub fn summarize(records: &[FuelRecord]) -> FuelSummary {
    let total_fuel: f64 = records.iter().map(|r| r.fuel_amount).sum();
    let total_price: i64 = records.iter().map(|r| r.price).sum();

    let average_price_per_liter = (total_fuel > 0.0)
        .then(|| (total_price as f64 / total_fuel).round() as i64);

    FuelSummary {
        record_count: records.len(),
        total_fuel: round2(total_fuel),
        total_price,
        average_efficiency: average_efficiency(records),
        best_efficiency: best_efficiency(records),
        average_price_per_liter,
    }
}
