use serde::{Deserialize, Serialize};
use slha_core::Index;
use tracing::warn;

use crate::params::ReorderPolicy;

/// Category of a non-fatal conversion finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// Block name not recognised; copied through unchanged.
    UnknownBlock,
    /// Index not valid for its block; entry dropped.
    UnknownIndex,
    /// Yukawa entry absent; tree-level default substituted.
    DefaultYukawa,
    /// 2x2 mixing block failed a consistency check; values still used.
    MixingConsistency,
    /// Flavour sector left in input order because data was missing.
    SectorSkipped,
}

/// Single non-fatal finding recorded during conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionWarning {
    /// Finding category.
    pub kind: WarningKind,
    /// Block the finding refers to.
    pub block: String,
    /// Entry index, when the finding concerns a single entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Index>,
    /// Human readable description.
    pub message: String,
}

/// Side channel collecting warnings while they are logged.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<ConversionWarning>,
}

impl Diagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and records a warning.
    pub fn warn(
        &mut self,
        kind: WarningKind,
        block: &str,
        index: Option<&Index>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        match index {
            Some(index) => warn!(?kind, block, index = %index, "{message}"),
            None => warn!(?kind, block, "{message}"),
        }
        self.warnings.push(ConversionWarning {
            kind,
            block: block.to_string(),
            index: index.cloned(),
            message,
        });
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }

    /// Number of warnings of the given kind.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    /// Consumes the collector.
    pub fn into_warnings(self) -> Vec<ConversionWarning> {
        self.warnings
    }
}

/// Summary emitted alongside the converted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Canonical hash of the SLHA1 input.
    pub input_hash: String,
    /// Canonical hash of the SLHA2 output.
    pub output_hash: String,
    /// Reorder policy applied to the flavour sectors.
    pub policy: ReorderPolicy,
    /// Neutralinos whose mass sign was absorbed into `IMNMIX`.
    pub flipped_neutralinos: Vec<i32>,
    /// Sectors whose rows were permuted.
    pub reordered_sectors: Vec<String>,
    /// Non-fatal findings in the order they were raised.
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionReport {
    /// Number of warnings of the given kind.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }
}
