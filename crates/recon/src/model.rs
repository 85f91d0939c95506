use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One normalized invoice line from either ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub gstin: String,
    pub name: String,
    pub invoice_number: String,
    pub invoice_date: Option<NaiveDate>,
    pub taxable_value: Decimal,
}

impl InvoiceRecord {
    pub fn new(
        gstin: impl Into<String>,
        name: impl Into<String>,
        invoice_number: impl Into<String>,
        invoice_date: Option<NaiveDate>,
        taxable_value: Decimal,
    ) -> Self {
        Self {
            gstin: gstin.into(),
            name: name.into(),
            invoice_number: invoice_number.into(),
            invoice_date,
            taxable_value,
        }
    }
}

/// Pre-loaded records for both ledgers, in input order.
#[derive(Debug, Clone, Default)]
pub struct ReconInput {
    pub a: Vec<InvoiceRecord>,
    pub b: Vec<InvoiceRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

// ---------------------------------------------------------------------------
// Match key
// ---------------------------------------------------------------------------

/// Normalized `(gstin, invoice_number)` pair. Built by [`crate::key::make_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey {
    pub gstin: String,
    pub invoice_number: String,
}

impl MatchKey {
    /// A key with an empty component never takes part in exact matching.
    pub fn is_valid(&self) -> bool {
        !self.gstin.is_empty() && !self.invoice_number.is_empty()
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.gstin, self.invoice_number)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Remark {
    Match,
    PartiallyMatched,
    OnlyInA,
    OnlyInB,
}

/// How `OnlyInA` / `OnlyInB` are rendered for reports.
///
/// `Legacy` keeps the swapped wording of older exports, where a record present
/// only in ledger A was labelled "In File B only".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    #[default]
    Corrected,
    Legacy,
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrected => write!(f, "corrected"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl Remark {
    /// Stable report label. These strings are consumed by downstream exports.
    pub fn label(self, style: LabelStyle) -> &'static str {
        match (self, style) {
            (Self::Match, _) => "Match",
            (Self::PartiallyMatched, _) => "Partially Matched",
            (Self::OnlyInA, LabelStyle::Corrected) | (Self::OnlyInB, LabelStyle::Legacy) => {
                "In File A only"
            }
            (Self::OnlyInB, LabelStyle::Corrected) | (Self::OnlyInA, LabelStyle::Legacy) => {
                "In File B only"
            }
        }
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(LabelStyle::Corrected))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Paired by exact match key.
    High,
    /// Paired by the fuzzy scoring pass.
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    #[serde(rename = "gstin")]
    Gstin,
    #[serde(rename = "invoice number")]
    InvoiceNumber,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "invoice date")]
    InvoiceDate,
    #[serde(rename = "taxable value")]
    TaxableValue,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gstin => write!(f, "gstin"),
            Self::InvoiceNumber => write!(f, "invoice number"),
            Self::Name => write!(f, "name"),
            Self::InvoiceDate => write!(f, "invoice date"),
            Self::TaxableValue => write!(f, "taxable value"),
        }
    }
}

/// One row of the reconciliation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconOutcome {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_a: Option<InvoiceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_b: Option<InvoiceRecord>,
    pub remark: Remark,
    /// Report label for `remark`, filled in by `engine::run` under the configured style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_diffs: Option<BTreeSet<Field>>,
}

impl ReconOutcome {
    /// A paired row. `Match` only for a high-confidence pair with no diffs.
    pub fn paired(
        key: String,
        a: &InvoiceRecord,
        b: &InvoiceRecord,
        confidence: Confidence,
        diffs: BTreeSet<Field>,
    ) -> Self {
        let remark = if confidence == Confidence::High && diffs.is_empty() {
            Remark::Match
        } else {
            Remark::PartiallyMatched
        };
        Self {
            key,
            record_a: Some(a.clone()),
            record_b: Some(b.clone()),
            remark,
            label: None,
            confidence: Some(confidence),
            field_diffs: Some(diffs),
        }
    }

    pub fn only_in_a(key: String, a: &InvoiceRecord) -> Self {
        Self {
            key,
            record_a: Some(a.clone()),
            record_b: None,
            remark: Remark::OnlyInA,
            label: None,
            confidence: None,
            field_diffs: None,
        }
    }

    pub fn only_in_b(key: String, b: &InvoiceRecord) -> Self {
        Self {
            key,
            record_a: None,
            record_b: Some(b.clone()),
            remark: Remark::OnlyInB,
            label: None,
            confidence: None,
            field_diffs: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconSummary {
    pub total_outcomes: usize,
    pub matched: usize,
    pub partially_matched: usize,
    pub only_in_a: usize,
    pub only_in_b: usize,
    pub high_confidence: usize,
    pub low_confidence: usize,
    pub by_label: BTreeMap<String, usize>,
    pub total_value_a: Decimal,
    pub total_value_b: Decimal,
    pub matched_value_a: Decimal,
    pub matched_value_b: Decimal,
    pub partial_value_a: Decimal,
    pub partial_value_b: Decimal,
}

impl ReconSummary {
    /// Every outcome is an exact `Match`.
    pub fn is_clean(&self) -> bool {
        self.matched == self.total_outcomes
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub labels: LabelStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub outcomes: Vec<ReconOutcome>,
}

impl ReconResult {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
