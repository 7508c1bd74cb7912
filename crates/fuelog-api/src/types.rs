//! Shared types for the fuelog data contract

use chrono::NaiveDate;
use fuelog_util::RecordId;
use serde::{Deserialize, Serialize};

/// Whether a fill topped the tank to full.
///
/// Records written before the flag existed carry no `isFullTank` field at all;
/// those deserialize as [`FullTank::Unrecorded`] and are interpreted through a
/// [`LegacyFillPolicy`] rather than by coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum FullTank {
    Full,
    Partial,
    #[default]
    Unrecorded,
}

impl FullTank {
    pub fn is_unrecorded(&self) -> bool {
        matches!(self, FullTank::Unrecorded)
    }

    /// Resolve the flag to a definite answer
    pub fn resolve(self, legacy: LegacyFillPolicy) -> bool {
        match self {
            FullTank::Full => true,
            FullTank::Partial => false,
            FullTank::Unrecorded => legacy == LegacyFillPolicy::AssumeFull,
        }
    }
}

impl From<bool> for FullTank {
    fn from(full: bool) -> Self {
        if full { FullTank::Full } else { FullTank::Partial }
    }
}

impl From<Option<bool>> for FullTank {
    fn from(flag: Option<bool>) -> Self {
        flag.map(FullTank::from).unwrap_or(FullTank::Unrecorded)
    }
}

impl From<FullTank> for Option<bool> {
    fn from(flag: FullTank) -> Self {
        match flag {
            FullTank::Full => Some(true),
            FullTank::Partial => Some(false),
            FullTank::Unrecorded => None,
        }
    }
}

/// How records without a full-tank flag are read.
///
/// The same policy applies to display and to efficiency windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegacyFillPolicy {
    /// Every fill predating the flag closed an efficiency window
    #[default]
    #[serde(rename = "full")]
    AssumeFull,
    #[serde(rename = "partial")]
    AssumePartial,
}

/// Strategy used to derive fuel efficiency for a new fill-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyPolicy {
    /// Distance since the last stored record over this fill's fuel
    Consecutive,
    /// Distance since the last full-tank fill over all fuel added since
    #[default]
    FullTank,
}

/// One refueling event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelRecord {
    /// Creation timestamp in milliseconds, unique within a store
    pub id: RecordId,

    /// Calendar date of the fill-up
    pub date: NaiveDate,

    /// Cumulative distance reading
    pub odometer: f64,

    /// Volume of fuel added
    pub fuel_amount: f64,

    /// Total price paid, in whole currency units
    pub price: i64,

    #[serde(default, skip_serializing_if = "FullTank::is_unrecorded")]
    pub is_full_tank: FullTank,

    /// `price / fuel_amount`, fixed at creation
    pub price_per_liter: i64,

    /// Distance per unit of fuel; `None` when not computable
    #[serde(default)]
    pub fuel_efficiency: Option<f64>,
}

impl FuelRecord {
    pub fn is_full_tank(&self, legacy: LegacyFillPolicy) -> bool {
        self.is_full_tank.resolve(legacy)
    }
}

/// Raw form input for a new fill-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillInput {
    pub date: NaiveDate,
    pub odometer: f64,
    pub fuel_amount: f64,
    pub price: i64,
    pub is_full_tank: bool,
}

/// Export/import envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// ISO-8601 timestamp of the export
    pub export_date: String,
    pub version: String,
    pub records: Vec<FuelRecord>,
}

/// Aggregate statistics over the whole store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FuelSummary {
    pub record_count: usize,
    pub total_fuel: f64,
    pub total_price: i64,
    /// `None` when no record has a computed efficiency
    pub average_efficiency: Option<f64>,
    /// `None` when no record has a computed efficiency
    pub best_efficiency: Option<f64>,
    /// `None` for an empty store
    pub average_price_per_liter: Option<i64>,
}
