//! Command dispatch: runs one command at a time against the tracker and
//! recovers every failure at the frontend boundary.

use chrono::{DateTime, Local};
use fuelog_api::{Command, CommandOutcome, ErrorCode, ErrorInfo, FillInput, OutcomePayload};
use fuelog_util::RecordId;
use tracing::{debug, info, warn};

use crate::{CoreError, CoreResult, Frontend, FuelTracker};

/// Explicitly owned controller binding a tracker to a frontend
pub struct Controller<F: Frontend> {
    tracker: FuelTracker,
    frontend: F,
}

impl<F: Frontend> Controller<F> {
    pub fn new(tracker: FuelTracker, frontend: F) -> Self {
        Self { tracker, frontend }
    }

    pub fn tracker(&self) -> &FuelTracker {
        &self.tracker
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Execute a command at the current time
    pub fn dispatch(&mut self, command: Command) -> CommandOutcome {
        self.dispatch_at(command, fuelog_util::now())
    }

    /// Execute a command as if issued at `now`
    pub fn dispatch_at(&mut self, command: Command, now: DateTime<Local>) -> CommandOutcome {
        debug!(?command, "Dispatching command");

        let result = match command {
            Command::SubmitForm => self
                .frontend
                .read_fill_form()
                .and_then(|input| self.add_fill(input, now)),
            Command::AddFill { input } => self.add_fill(input, now),
            Command::Delete { id } => self.delete(id),
            Command::Export => self.export(now),
            Command::Import { contents } => {
                let result = self.import(&contents);
                self.frontend.reset_import();
                result
            }
            Command::Refresh => {
                self.refresh();
                Ok(OutcomePayload::Refreshed)
            }
        };

        match result {
            Ok(payload) => CommandOutcome::Ok(payload),
            Err(e) => {
                warn!(error = %e, "Command failed");
                self.frontend.notify(&e.to_string());
                CommandOutcome::Err(error_info(&e))
            }
        }
    }

    /// Re-render the list (newest first) and the statistics
    pub fn refresh(&mut self) {
        let records = self.tracker.sorted_records();
        self.frontend.render_list(&records);
        self.frontend.render_stats(&self.tracker.summary());
    }

    fn add_fill(&mut self, input: FillInput, now: DateTime<Local>) -> CoreResult<OutcomePayload> {
        let record = self.tracker.add_fill(input, &now)?;
        self.refresh();
        Ok(OutcomePayload::Added { record })
    }

    fn delete(&mut self, id: RecordId) -> CoreResult<OutcomePayload> {
        let removed = self.tracker.delete(id)?;
        self.refresh();
        Ok(OutcomePayload::Deleted { id, removed })
    }

    fn export(&mut self, now: DateTime<Local>) -> CoreResult<OutcomePayload> {
        let file = self.tracker.export(&now)?;
        self.frontend.deliver_export(&file)?;
        self.frontend
            .notify(&format!("Exported {} records to {}", file.record_count, file.file_name));

        Ok(OutcomePayload::Exported {
            file_name: file.file_name,
            record_count: file.record_count,
        })
    }

    fn import(&mut self, contents: &str) -> CoreResult<OutcomePayload> {
        let plan = self.tracker.prepare_import(contents)?;
        let record_count = plan.record_count();

        if !self.frontend.confirm_destructive_import(record_count) {
            info!(record_count, "Import declined");
            return Ok(OutcomePayload::ImportDeclined { record_count });
        }

        self.tracker.apply_import(plan)?;
        self.refresh();
        self.frontend
            .notify(&format!("Imported {} records", record_count));

        Ok(OutcomePayload::Imported { record_count })
    }
}

/// Map an error to the code shown to frontends
pub fn error_info(error: &CoreError) -> ErrorInfo {
    let code = match error {
        CoreError::InvalidFormat(_) => ErrorCode::InvalidFormat,
        CoreError::EmptyExport => ErrorCode::EmptyExport,
        CoreError::InvalidInput(_) => ErrorCode::InvalidInput,
        CoreError::Frontend(_) => ErrorCode::FrontendError,
        CoreError::Store(_) => ErrorCode::StorageError,
    };
    ErrorInfo::new(code, error.to_string())
}
