use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ReconError;
use crate::model::{LabelStyle, Side};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub sources: SourcesConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    pub a: SourceConfig,
    pub b: SourceConfig,
}

impl SourcesConfig {
    pub fn get(&self, side: Side) -> &SourceConfig {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file: String,
    #[serde(default)]
    pub columns: ColumnMapping,
}

/// Header names of the canonical CSV columns. Unset entries keep the canonical name.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub gstin: String,
    pub name: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub taxable_value: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            gstin: "gstin".into(),
            name: "name".into(),
            invoice_number: "invoice_number".into(),
            invoice_date: "invoice_date".into(),
            taxable_value: "taxable_value".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// What to do when two records on one side share a match key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`ReconError::DuplicateKey`] before matching.
    #[default]
    Reject,
    /// Sum taxable values per key before matching.
    Sum,
}

/// Tolerances and weights for both matching passes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Fuzzy pass: `|a - b| <= value_tolerance` counts as close.
    pub value_tolerance: Decimal,
    /// Field diff: `|a - b| < exact_epsilon` counts as equal.
    pub exact_epsilon: Decimal,
    pub date_window_days: u32,
    pub name_weight: u32,
    pub value_weight: u32,
    pub date_weight: u32,
    pub min_score: u32,
    pub duplicates: DuplicatePolicy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            value_tolerance: Decimal::ONE,
            exact_epsilon: Decimal::new(1, 3),
            date_window_days: 7,
            name_weight: 2,
            value_weight: 1,
            date_weight: 1,
            min_score: 2,
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), ReconError> {
        if self.value_tolerance.is_sign_negative() {
            return Err(ReconError::ConfigValidation(format!(
                "value_tolerance must not be negative, got {}",
                self.value_tolerance
            )));
        }
        if self.exact_epsilon.is_sign_negative() {
            return Err(ReconError::ConfigValidation(format!(
                "exact_epsilon must not be negative, got {}",
                self.exact_epsilon
            )));
        }
        if self.exact_epsilon > self.value_tolerance {
            return Err(ReconError::ConfigValidation(format!(
                "exact_epsilon ({}) must not exceed value_tolerance ({})",
                self.exact_epsilon, self.value_tolerance
            )));
        }
        if self.min_score == 0 {
            return Err(ReconError::ConfigValidation(
                "min_score must be at least 1".into(),
            ));
        }
        let max_score = self
            .name_weight
            .checked_add(self.value_weight)
            .and_then(|sum| sum.checked_add(self.date_weight))
            .ok_or_else(|| {
                ReconError::ConfigValidation(format!(
                    "weights overflow: name_weight {} + value_weight {} + date_weight {} exceeds {}",
                    self.name_weight,
                    self.value_weight,
                    self.date_weight,
                    u32::MAX
                ))
            })?;
        if self.min_score > max_score {
            return Err(ReconError::ConfigValidation(format!(
                "min_score {} is unreachable (weights sum to {max_score})",
                self.min_score
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub labels: LabelStyle,
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for side in [Side::A, Side::B] {
            if self.sources.get(side).file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "sources.{}: file must not be empty",
                    side.to_string().to_lowercase()
                )));
            }
        }
        if self.sources.a.file == self.sources.b.file {
            return Err(ReconError::ConfigValidation(format!(
                "sources.a and sources.b both read '{}'",
                self.sources.a.file
            )));
        }
        self.matching.validate()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
