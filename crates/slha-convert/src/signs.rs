//! Absorbs negative neutralino masses into the phase of their mixing row.

use slha_core::{Block, Document};
use tracing::{debug, warn};

/// Neutralino PDG codes and their `NMIX` row.
pub const NEUTRALINOS: [(i32, i32); 4] = [(1000022, 1), (1000023, 2), (1000025, 3), (1000035, 4)];

/// Real part of the neutralino mixing matrix.
pub const NMIX: &str = "NMIX";
/// Imaginary part of the neutralino mixing matrix.
pub const IMNMIX: &str = "IMNMIX";

const FLIPPED: &str = "flipped";

/// Mixing coefficient `re + i im` split across `NMIX` and `IMNMIX`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Coefficient {
    re: f64,
    im: f64,
}

impl Coefficient {
    /// Multiplies by `i`: a sign flip of the mass squared away into the
    /// eigenvector phase.
    fn times_i(self) -> Self {
        Self {
            re: if self.im == 0.0 { 0.0 } else { -self.im },
            im: self.re,
        }
    }
}

fn flipped_annotation(block: &Block, row: i32, column: i32) -> String {
    match block.entry((row, column)).and_then(|entry| entry.annotation.as_deref()) {
        Some(existing) if existing.ends_with(FLIPPED) => existing.to_string(),
        Some(existing) => format!("{existing} {FLIPPED}"),
        None => FLIPPED.to_string(),
    }
}

/// Makes every neutralino mass non-negative, rotating the matching `NMIX`
/// row by `i` and creating `IMNMIX` on demand.
///
/// Without an `NMIX` block only the mass is flipped; no mixing block is
/// created.
///
/// Returns the PDG codes that were flipped. Rows with a non-negative or
/// absent mass are untouched, so applying the pass twice equals applying it
/// once.
pub fn normalize_signs(document: &mut Document) -> Vec<i32> {
    let mut flipped = Vec::new();
    for (pdg, row) in NEUTRALINOS {
        let Some(mass) = document.mass(pdg) else {
            continue;
        };
        if mass >= 0.0 {
            continue;
        }
        if let Some(entry) = document.block("MASS").and_then(|block| block.entry(pdg)) {
            let mut entry = entry.clone();
            entry.value = mass.abs();
            document.block_or_insert("MASS").set_entry(pdg, entry);
        }
        flipped.push(pdg);
        if !document.contains_block(NMIX) {
            warn!(pdg, "NMIX absent; neutralino mass sign flipped without a phase rotation");
            continue;
        }
        if !document.contains_block(IMNMIX) {
            let scale = document.block(NMIX).and_then(Block::scale);
            document.insert_block(Block::zeros(IMNMIX, 4).with_scale(scale));
        }

        for column in 1..=4 {
            let old = Coefficient {
                re: document.get(NMIX, (row, column)).unwrap_or(0.0),
                im: document.get(IMNMIX, (row, column)).unwrap_or(0.0),
            };
            let new = old.times_i();
            let real = document.block_or_insert(NMIX);
            let annotation = flipped_annotation(real, row, column);
            real.set_with_annotation((row, column), new.re, annotation);
            let imaginary = document.block_or_insert(IMNMIX);
            let annotation = flipped_annotation(imaginary, row, column);
            imaginary.set_with_annotation((row, column), new.im, annotation);
        }
        debug!(pdg, row, "absorbed negative neutralino mass into IMNMIX");
    }
    flipped
}
