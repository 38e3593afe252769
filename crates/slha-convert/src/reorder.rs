//! Coupled row/mass permutation of the sfermion flavour sectors.

use slha_core::{Document, Entry};
use tracing::debug;

use crate::params::ReorderPolicy;
use crate::report::{Diagnostics, WarningKind};

/// Sfermion sector: its particles in row order and its mixing matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    /// Label used in reports.
    pub name: &'static str,
    /// PDG codes, one per matrix row.
    pub particles: &'static [i32],
    /// Flavour mixing matrix.
    pub mixing: &'static str,
}

/// Up squarks, down squarks, charged sleptons and sneutrinos.
pub const SECTORS: [Sector; 4] = [
    Sector {
        name: "up-squarks",
        particles: &[1000002, 1000004, 1000006, 2000002, 2000004, 2000006],
        mixing: "USQMIX",
    },
    Sector {
        name: "down-squarks",
        particles: &[1000001, 1000003, 1000005, 2000001, 2000003, 2000005],
        mixing: "DSQMIX",
    },
    Sector {
        name: "charged-sleptons",
        particles: &[1000011, 1000013, 1000015, 2000011, 2000013, 2000015],
        mixing: "SELMIX",
    },
    Sector {
        name: "sneutrinos",
        particles: &[1000012, 1000014, 1000016],
        mixing: "SNUMIX",
    },
];

/// Row permutation for the given masses: `order[new] = old`.
pub fn row_order(masses: &[f64], policy: ReorderPolicy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..masses.len()).collect();
    match policy {
        ReorderPolicy::FullMixing => {
            order.sort_by(|a, b| masses[*a].total_cmp(&masses[*b]));
        }
        ReorderPolicy::GenerationPaired => {
            if masses.len() == 6 {
                for light in 0..3 {
                    if masses[light] > masses[light + 3] {
                        order.swap(light, light + 3);
                    }
                }
            }
        }
    }
    order
}

/// Reorders one sector in place. Returns whether any row moved.
pub fn reorder_sector(
    document: &mut Document,
    sector: &Sector,
    policy: ReorderPolicy,
    diagnostics: &mut Diagnostics,
) -> bool {
    let masses: Option<Vec<f64>> = sector
        .particles
        .iter()
        .map(|pdg| document.mass(*pdg))
        .collect();
    let Some(masses) = masses else {
        diagnostics.warn(
            WarningKind::SectorSkipped,
            "MASS",
            None,
            format!("{} masses incomplete; rows left in input order", sector.name),
        );
        return false;
    };
    let Some(mixing) = document.block(sector.mixing) else {
        diagnostics.warn(
            WarningKind::SectorSkipped,
            sector.mixing,
            None,
            format!("{} mixing matrix absent; rows left in input order", sector.name),
        );
        return false;
    };

    let order = row_order(&masses, policy);
    if order.iter().enumerate().all(|(new, old)| new == *old) {
        return false;
    }

    let width = sector.particles.len() as i32;
    let rows: Vec<Vec<Option<Entry>>> = (1..=width)
        .map(|row| {
            (1..=width)
                .map(|column| mixing.entry((row, column)).cloned())
                .collect()
        })
        .collect();

    let matrix = document.block_or_insert(sector.mixing);
    for (new, old) in order.iter().enumerate() {
        let row = new as i32 + 1;
        for (column, entry) in (1..=width).zip(&rows[*old]) {
            match entry {
                Some(entry) => matrix.set_entry((row, column), entry.clone()),
                None => {
                    matrix.remove((row, column));
                }
            }
        }
    }

    let mass_block = document.block_or_insert("MASS");
    for (new, old) in order.iter().enumerate() {
        let pdg = sector.particles[new];
        let mut entry = mass_block.entry(pdg).cloned().unwrap_or_else(|| Entry::new(0.0));
        entry.value = masses[*old];
        mass_block.set_entry(pdg, entry);
    }

    debug!(sector = sector.name, ?order, "reordered sector");
    true
}

/// Applies [`reorder_sector`] to every sector, returning the names of the
/// sectors that changed.
pub fn reorder_all(
    document: &mut Document,
    policy: ReorderPolicy,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    SECTORS
        .iter()
        .filter(|sector| reorder_sector(document, sector, policy, diagnostics))
        .map(|sector| sector.name.to_string())
        .collect()
}
