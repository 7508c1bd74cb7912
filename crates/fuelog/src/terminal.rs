//! Terminal frontend: parses form fields from the command line, prints
//! lists and notices, prompts on stdin and writes exports to disk.

use fuelog_api::{FillInput, FuelRecord, FuelSummary, LegacyFillPolicy};
use fuelog_config::DisplayConfig;
use fuelog_core::{CoreError, CoreResult, ExportFile, Frontend};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

/// Unparsed fill-up fields as typed by the user
#[derive(Debug, Clone)]
pub struct RawForm {
    /// `YYYY-MM-DD`; today when absent
    pub date: Option<String>,
    pub odometer: String,
    pub fuel_amount: String,
    pub price: String,
    pub full_tank: bool,
}

pub struct TerminalFrontend {
    display: DisplayConfig,
    legacy: LegacyFillPolicy,
    form: Option<RawForm>,
    export_dir: PathBuf,
    assume_yes: bool,
    show_list: bool,
    show_stats: bool,
}

impl TerminalFrontend {
    pub fn new(display: DisplayConfig, legacy: LegacyFillPolicy) -> Self {
        Self {
            display,
            legacy,
            form: None,
            export_dir: PathBuf::from("."),
            assume_yes: false,
            show_list: false,
            show_stats: false,
        }
    }

    pub fn with_form(mut self, form: RawForm) -> Self {
        self.form = Some(form);
        self
    }

    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn show_list(mut self) -> Self {
        self.show_list = true;
        self
    }

    pub fn show_stats(mut self) -> Self {
        self.show_stats = true;
        self
    }
}

impl Frontend for TerminalFrontend {
    fn read_fill_form(&mut self) -> CoreResult<FillInput> {
        let form = self
            .form
            .take()
            .ok_or_else(|| CoreError::frontend("no fill-up form submitted"))?;
        parse_form(&form)
    }

    fn render_list(&mut self, records: &[FuelRecord]) {
        if !self.show_list {
            return;
        }
        if records.is_empty() {
            println!("No records");
            return;
        }
        for record in records {
            println!("{}", format_record(record, &self.display, self.legacy));
        }
    }

    fn render_stats(&mut self, summary: &FuelSummary) {
        if !self.show_stats {
            return;
        }
        let unit = self.display.efficiency_unit();
        println!("Records:            {}", summary.record_count);
        println!(
            "Total fuel:         {:.2} {}",
            summary.total_fuel, self.display.volume_unit
        );
        println!(
            "Total spent:        {}{}",
            self.display.currency,
            group_thousands(summary.total_price)
        );
        if let Some(ppl) = summary.average_price_per_liter {
            println!(
                "Average unit price: {}{}/{}",
                self.display.currency, ppl, self.display.volume_unit
            );
        }
        println!(
            "Average efficiency: {}",
            format_efficiency(summary.average_efficiency, &unit, "no data")
        );
        println!(
            "Best efficiency:    {}",
            format_efficiency(summary.best_efficiency, &unit, "no data")
        );
    }

    fn confirm_destructive_import(&mut self, count: usize) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!(
            "Import {} records?\nExisting records will be overwritten.\nContinue? [y/N] ",
            count
        );
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }

    fn deliver_export(&mut self, file: &ExportFile) -> CoreResult<()> {
        std::fs::create_dir_all(&self.export_dir)
            .map_err(|e| CoreError::frontend(format!("cannot create {:?}: {e}", self.export_dir)))?;

        let path = self.export_dir.join(&file.file_name);
        std::fs::write(&path, &file.contents)
            .map_err(|e| CoreError::frontend(format!("cannot write {:?}: {e}", path)))?;

        debug!(path = %path.display(), bytes = file.contents.len(), "Export written");
        Ok(())
    }
}

/// Parse raw form fields. Range checks are left to the tracker.
pub fn parse_form(form: &RawForm) -> CoreResult<FillInput> {
    let date = match &form.date {
        Some(s) => fuelog_util::parse_date(s)
            .map_err(|_| CoreError::invalid_input(format!("date '{s}' is not YYYY-MM-DD")))?,
        None => fuelog_util::today(),
    };

    let odometer = parse_number(&form.odometer, "odometer")?;
    let fuel_amount = parse_number(&form.fuel_amount, "fuel amount")?;
    let price = form
        .price
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::invalid_input(format!("price '{}' is not a whole number", form.price)))?;

    Ok(FillInput {
        date,
        odometer,
        fuel_amount,
        price,
        is_full_tank: form.full_tank,
    })
}

fn parse_number(raw: &str, field: &str) -> CoreResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoreError::invalid_input(format!("{field} '{raw}' is not a number")))
}

/// One list line
pub fn format_record(record: &FuelRecord, display: &DisplayConfig, legacy: LegacyFillPolicy) -> String {
    let tank = if record.is_full_tank(legacy) { "full" } else { "partial" };
    format!(
        "{id}  {date}  {odo:.1} {dist}  {fuel:.2} {vol}  {cur}{price}  {cur}{ppl}/{vol}  {eff}  [{tank}]",
        id = record.id,
        date = fuelog_util::format_date(record.date),
        odo = record.odometer,
        dist = display.distance_unit,
        fuel = record.fuel_amount,
        vol = display.volume_unit,
        cur = display.currency,
        price = group_thousands(record.price),
        ppl = record.price_per_liter,
        eff = format_efficiency(record.fuel_efficiency, &display.efficiency_unit(), "not computable"),
        tank = tank,
    )
}

pub fn format_efficiency(value: Option<f64>, unit: &str, missing: &str) -> String {
    match value {
        Some(v) => format!("{v} {unit}"),
        None => missing.to_string(),
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
