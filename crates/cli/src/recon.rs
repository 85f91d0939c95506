//! `irecon run` / `irecon validate`: config-driven two-ledger reconciliation.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use invoice_recon::load::load_csv_records;
use invoice_recon::{LabelStyle, ReconConfig, ReconError, ReconInput, Side};
use tracing::info;

use crate::export::write_outcomes_csv;
use crate::CliError;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LabelArg {
    /// "In File A only" for records found only in ledger A
    Corrected,
    /// Swapped labels of older exports
    Legacy,
}

impl From<LabelArg> for LabelStyle {
    fn from(arg: LabelArg) -> Self {
        match arg {
            LabelArg::Corrected => LabelStyle::Corrected,
            LabelArg::Legacy => LabelStyle::Legacy,
        }
    }
}

fn read_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::usage(format!("cannot read config {}: {e}", config_path.display()))
    })?;
    ReconConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))
}

fn runtime_err(e: ReconError) -> CliError {
    let hint = match &e {
        ReconError::DuplicateKey { .. } => {
            Some("aggregate the source first, or set [matching] duplicates = \"sum\"")
        }
        ReconError::MissingColumn { .. } => Some("map header names under [sources.<a|b>.columns]"),
        _ => None,
    };
    let err = CliError::runtime(e.to_string());
    match hint {
        Some(h) => err.with_hint(h),
        None => err,
    }
}

pub fn cmd_recon_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    eprintln!(
        "config ok: \"{}\" (A: {}, B: {})",
        config.name, config.sources.a.file, config.sources.b.file
    );
    Ok(())
}

pub fn cmd_recon_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
    labels: Option<LabelArg>,
) -> Result<(), CliError> {
    let mut config = read_config(&config_path)?;
    if let Some(labels) = labels {
        config.output.labels = labels.into();
    }

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut input = ReconInput::default();
    for side in [Side::A, Side::B] {
        let source = config.sources.get(side);
        let csv_path = base_dir.join(&source.file);
        let csv_data = std::fs::read_to_string(&csv_path).map_err(|e| {
            CliError::runtime(format!("cannot read {}: {e}", csv_path.display()))
        })?;
        let records = load_csv_records(side, &csv_data, &source.columns).map_err(runtime_err)?;
        info!(%side, records = records.len(), path = %csv_path.display(), "loaded ledger");
        match side {
            Side::A => input.a = records,
            Side::B => input.b = records,
        }
    }

    let result = invoice_recon::run(&config, &input).map_err(runtime_err)?;

    let json_str = result
        .to_json_pretty()
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    let json_path = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = json_path {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::runtime(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    let csv_path = csv_file.or_else(|| config.output.csv.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = csv_path {
        let file = std::fs::File::create(path)
            .map_err(|e| CliError::runtime(format!("cannot write {}: {e}", path.display())))?;
        write_outcomes_csv(file, &result.outcomes, config.output.labels)
            .map_err(|e| CliError::runtime(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    let labels = config.output.labels;
    eprintln!(
        "recon \"{}\": {} outcomes: {} matched, {} partially matched ({} fuzzy), {} {}, {} {}",
        result.meta.config_name,
        s.total_outcomes,
        s.matched,
        s.partially_matched,
        s.low_confidence,
        s.only_in_a,
        invoice_recon::Remark::OnlyInA.label(labels),
        s.only_in_b,
        invoice_recon::Remark::OnlyInB.label(labels),
    );
    eprintln!(
        "taxable value: A {} / B {} (matched A {} / B {})",
        s.total_value_a, s.total_value_b, s.matched_value_a, s.matched_value_b,
    );

    if !s.is_clean() {
        return Err(CliError::mismatch("ledgers differ"));
    }

    Ok(())
}
