//! Embedding of legacy 2x2 sfermion mixing blocks into SLHA2 6x6 matrices.

use slha_core::{Block, Document};
use tracing::debug;

use crate::report::{Diagnostics, WarningKind};

/// Legacy single-generation mixing block and where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyMixing {
    /// SLHA1 block name.
    pub name: &'static str,
    /// SLHA2 flavour mixing matrix.
    pub target: &'static str,
    /// Generation, 1 to 3.
    pub generation: i32,
}

impl LegacyMixing {
    /// Rows/columns of the target the 2x2 block occupies: the generation's
    /// left-handed state and its right-handed partner three rows below.
    pub fn positions(&self) -> (i32, i32) {
        (self.generation, self.generation + 3)
    }
}

const fn legacy(name: &'static str, target: &'static str, generation: i32) -> LegacyMixing {
    LegacyMixing {
        name,
        target,
        generation,
    }
}

/// Every legacy 2x2 mixing block.
pub static LEGACY_MIXING: [LegacyMixing; 9] = [
    legacy("SUPMIX", "USQMIX", 1),
    legacy("SCHARMMIX", "USQMIX", 2),
    legacy("STOPMIX", "USQMIX", 3),
    legacy("SDOWNMIX", "DSQMIX", 1),
    legacy("SSTRANGEMIX", "DSQMIX", 2),
    legacy("SBOTMIX", "DSQMIX", 3),
    legacy("SELECTRONMIX", "SELMIX", 1),
    legacy("SMUMIX", "SELMIX", 2),
    legacy("STAUMIX", "SELMIX", 3),
];

/// Flavour mixing matrices seeded as identities, with their dimension.
pub const FLAVOUR_MIXING_SEEDS: [(&str, i32); 4] =
    [("USQMIX", 6), ("DSQMIX", 6), ("SELMIX", 6), ("SNUMIX", 3)];

/// Looks up a legacy mixing block by (upper-case) name.
pub fn legacy_mixing(name: &str) -> Option<&'static LegacyMixing> {
    LEGACY_MIXING.iter().find(|legacy| legacy.name == name)
}

/// Inserts identity flavour mixing matrices so that generations without a
/// legacy block default to no mixing.
pub fn seed_identity_matrices(out: &mut Document) {
    for (name, dimension) in FLAVOUR_MIXING_SEEDS {
        out.insert_block(Block::identity(name, dimension));
    }
}

/// Lists the consistency checks a 2x2 rotation block fails.
///
/// The ratio checks need both `(2,1)` and `(2,2)` non-zero. An all-zero
/// block is degenerate and passes trivially.
pub fn consistency_violations(block: &Block, tolerance: f64) -> Vec<String> {
    let value = |i: i32, j: i32| block.get((i, j)).unwrap_or(0.0);
    let (cos, sin, sin_p, cos_p) = (value(1, 1), value(1, 2), value(2, 1), value(2, 2));
    let mut violations = Vec::new();
    if [cos, sin, sin_p, cos_p].iter().all(|v| *v == 0.0) {
        return violations;
    }
    if cos_p != 0.0 && sin_p != 0.0 {
        let ratio = (cos / cos_p).abs();
        if (ratio - 1.0).abs() > tolerance {
            violations.push(format!("|(1,1)/(2,2)| = {ratio} differs from 1"));
        }
        let ratio = (sin / sin_p).abs();
        if (ratio - 1.0).abs() > tolerance {
            violations.push(format!("|(1,2)/(2,1)| = {ratio} differs from 1"));
        }
    }
    let norm = cos * cos + sin * sin;
    if (norm - 1.0).abs() > tolerance {
        violations.push(format!("(1,1)^2 + (1,2)^2 = {norm} differs from 1"));
    }
    if sin * sin_p * cos * cos_p > 0.0 {
        violations.push("signs are inconsistent with a rotation".to_string());
    }
    violations
}

/// Writes a legacy 2x2 block into its flavour mixing matrix.
///
/// Consistency failures are reported but the values are embedded as given.
pub fn embed_mixing(
    block: &Block,
    legacy: &LegacyMixing,
    tolerance: f64,
    out: &mut Document,
    diagnostics: &mut Diagnostics,
) {
    for violation in consistency_violations(block, tolerance) {
        diagnostics.warn(WarningKind::MixingConsistency, block.name(), None, violation);
    }
    let (a, b) = legacy.positions();
    let mut embedded = 0;
    for (index, entry) in block.iter() {
        let target = match index.as_pair() {
            Some((1, 1)) => (a, a),
            Some((1, 2)) => (a, b),
            Some((2, 1)) => (b, a),
            Some((2, 2)) => (b, b),
            _ => {
                diagnostics.warn(
                    WarningKind::UnknownIndex,
                    block.name(),
                    Some(index),
                    "2x2 mixing blocks only carry (1,1) to (2,2); entry dropped",
                );
                continue;
            }
        };
        out.block_or_insert(legacy.target).set_with_annotation(
            target,
            entry.value,
            format!("{}{}", block.name(), index),
        );
        embedded += 1;
    }
    debug!(
        block = block.name(),
        target = legacy.target,
        embedded,
        "embedded legacy mixing block"
    );
}
