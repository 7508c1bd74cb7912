//! Scripted frontend for unit/integration testing

use fuelog_api::{FillInput, FuelRecord, FuelSummary};
use std::collections::VecDeque;

use crate::{CoreError, CoreResult, ExportFile, Frontend};

/// Frontend that replays queued form inputs and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    /// Form submissions, consumed in order
    pub forms: VecDeque<FillInput>,

    /// Answer given to every import confirmation
    pub confirm_imports: bool,

    /// Configure export delivery to fail
    pub fail_delivery: bool,

    pub notices: Vec<String>,
    pub rendered_lists: Vec<Vec<FuelRecord>>,
    pub rendered_stats: Vec<FuelSummary>,
    pub confirm_requests: Vec<usize>,
    pub delivered: Vec<ExportFile>,
    pub import_resets: usize,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirming(mut self, answer: bool) -> Self {
        self.confirm_imports = answer;
        self
    }

    pub fn queue_form(&mut self, input: FillInput) {
        self.forms.push_back(input);
    }

    /// Most recently rendered list, if any
    pub fn last_list(&self) -> Option<&[FuelRecord]> {
        self.rendered_lists.last().map(Vec::as_slice)
    }

    pub fn last_stats(&self) -> Option<&FuelSummary> {
        self.rendered_stats.last()
    }

    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }
}

impl Frontend for ScriptedFrontend {
    fn read_fill_form(&mut self) -> CoreResult<FillInput> {
        self.forms
            .pop_front()
            .ok_or_else(|| CoreError::frontend("no form submission queued"))
    }

    fn render_list(&mut self, records: &[FuelRecord]) {
        self.rendered_lists.push(records.to_vec());
    }

    fn render_stats(&mut self, summary: &FuelSummary) {
        self.rendered_stats.push(summary.clone());
    }

    fn confirm_destructive_import(&mut self, count: usize) -> bool {
        self.confirm_requests.push(count);
        self.confirm_imports
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn deliver_export(&mut self, file: &ExportFile) -> CoreResult<()> {
        if self.fail_delivery {
            return Err(CoreError::frontend("download blocked"));
        }
        self.delivered.push(file.clone());
        Ok(())
    }

    fn reset_import(&mut self) {
        self.import_resets += 1;
    }
}
