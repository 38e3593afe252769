//! Trilinear A-terms to SLHA2 T-terms.

use slha_core::{Block, Index};
use tracing::debug;

use crate::report::{Diagnostics, WarningKind};

/// Tree-level Yukawa eigenvalues `sqrt(2) m_f / v` with `v = 246.22 GeV`,
/// ordered by generation.
pub const DEFAULT_YUKAWA_UP: [f64; 3] = [1.240639e-5, 7.294498e-3, 9.922814e-1];
/// Down-type counterpart of [`DEFAULT_YUKAWA_UP`].
pub const DEFAULT_YUKAWA_DOWN: [f64; 3] = [2.682307e-5, 5.34164e-4, 2.400866e-2];
/// Charged-lepton counterpart of [`DEFAULT_YUKAWA_UP`].
pub const DEFAULT_YUKAWA_LEPTON: [f64; 3] = [2.935024e-6, 6.068699e-4, 1.020575e-2];

/// Which Higgs doublet a fermion family couples to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFactor {
    /// Up-type fermions, scaled by `sin(beta)`.
    SinBeta,
    /// Down-type fermions and leptons, scaled by `cos(beta)`.
    CosBeta,
}

impl TrigFactor {
    /// Evaluates the factor at the given mixing angle.
    pub fn at(self, beta: f64) -> f64 {
        match self {
            TrigFactor::SinBeta => beta.sin(),
            TrigFactor::CosBeta => beta.cos(),
        }
    }
}

/// Fermion family of a trilinear block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavour {
    /// `AU` / `YU` / `TU`.
    Up,
    /// `AD` / `YD` / `TD`.
    Down,
    /// `AE` / `YE` / `TE`.
    Lepton,
}

impl Flavour {
    /// Maps a legacy trilinear block name onto its family.
    pub fn from_trilinear(name: &str) -> Option<Self> {
        match name {
            "AU" => Some(Flavour::Up),
            "AD" => Some(Flavour::Down),
            "AE" => Some(Flavour::Lepton),
            _ => None,
        }
    }

    /// Legacy trilinear block name.
    pub fn trilinear_block(self) -> &'static str {
        match self {
            Flavour::Up => "AU",
            Flavour::Down => "AD",
            Flavour::Lepton => "AE",
        }
    }

    /// Yukawa block name.
    pub fn yukawa_block(self) -> &'static str {
        match self {
            Flavour::Up => "YU",
            Flavour::Down => "YD",
            Flavour::Lepton => "YE",
        }
    }

    /// SLHA2 output block name.
    pub fn target_block(self) -> &'static str {
        match self {
            Flavour::Up => "TU",
            Flavour::Down => "TD",
            Flavour::Lepton => "TE",
        }
    }

    /// Mixing-angle factor applied to default Yukawa eigenvalues.
    pub fn trig_factor(self) -> TrigFactor {
        match self {
            Flavour::Up => TrigFactor::SinBeta,
            Flavour::Down | Flavour::Lepton => TrigFactor::CosBeta,
        }
    }

    /// Default Yukawa eigenvalues, by generation.
    pub fn default_yukawas(self) -> &'static [f64; 3] {
        match self {
            Flavour::Up => &DEFAULT_YUKAWA_UP,
            Flavour::Down => &DEFAULT_YUKAWA_DOWN,
            Flavour::Lepton => &DEFAULT_YUKAWA_LEPTON,
        }
    }
}

fn diagonal_generation(index: &Index) -> Option<usize> {
    match index.as_pair() {
        Some((i, j)) if i == j && (1..=3).contains(&i) => Some(i as usize),
        _ => None,
    }
}

/// Rescales a trilinear block into its T-block.
///
/// `factor` is `sin(beta)` or `cos(beta)`; it only enters when a Yukawa
/// entry is absent. A zero factor is not guarded and yields a non-finite
/// output entry.
pub fn convert_trilinear(
    trilinear: &Block,
    yukawa: Option<&Block>,
    factor: f64,
    flavour: Flavour,
    diagnostics: &mut Diagnostics,
) -> Block {
    let mut output = Block::new(flavour.target_block()).with_scale(trilinear.scale());
    for (index, entry) in trilinear.iter() {
        let Some(generation) = diagonal_generation(index) else {
            diagnostics.warn(
                WarningKind::UnknownIndex,
                trilinear.name(),
                Some(index),
                "only diagonal entries (1,1) to (3,3) are converted; entry dropped",
            );
            continue;
        };
        let a = entry.value;
        let annotation = format!("{}{} = {a:.8e}", trilinear.name(), index);
        if a == 0.0 {
            output.set_with_annotation(index.clone(), 0.0, annotation);
            continue;
        }
        let value = match yukawa.and_then(|block| block.get(index.clone())) {
            Some(y) => a * y,
            None => {
                let default = flavour.default_yukawas()[generation - 1];
                diagnostics.warn(
                    WarningKind::DefaultYukawa,
                    flavour.yukawa_block(),
                    Some(index),
                    format!("Yukawa entry missing; using default {default:e} / {factor:e}"),
                );
                a * (default / factor)
            }
        };
        output.set_with_annotation(index.clone(), value, annotation);
    }
    debug!(
        block = output.name(),
        entries = output.len(),
        "rescaled trilinear couplings"
    );
    output
}
