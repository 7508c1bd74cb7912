//! Collaborator interface implemented by whatever presents the tracker

use fuelog_api::{FillInput, FuelRecord, FuelSummary};

use crate::{CoreResult, ExportFile};

/// Presentation and user interaction.
///
/// The core never reaches into presentation state; it only calls these
/// methods from [`crate::Controller`].
pub trait Frontend {
    /// Read and parse the fill-up form
    fn read_fill_form(&mut self) -> CoreResult<FillInput>;

    /// Show records, already sorted newest first
    fn render_list(&mut self, records: &[FuelRecord]);

    /// Show aggregates; `None` efficiencies mean "no data"
    fn render_stats(&mut self, summary: &FuelSummary);

    /// Ask before overwriting every record with `count` imported ones
    fn confirm_destructive_import(&mut self, count: usize) -> bool;

    /// User-visible success or failure notice
    fn notify(&mut self, message: &str);

    /// Hand an export to the user (download, write to disk, ...)
    fn deliver_export(&mut self, file: &ExportFile) -> CoreResult<()>;

    /// Clear the import file selection. Called after every import attempt.
    fn reset_import(&mut self) {}
}
