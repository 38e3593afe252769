//! Expansion of the flat `MSOFT` block into SLHA2 soft mass matrices.

use slha_core::{Block, Document, ErrorInfo, SlhaError};
use tracing::debug;

use crate::report::{Diagnostics, WarningKind};

/// Gaugino masses and Higgs soft masses kept in `MSOFT`.
pub const MSOFT_PASSTHROUGH: [i32; 5] = [1, 2, 3, 21, 22];

/// First `MSOFT` index of each three-wide sfermion range and its target.
pub const SOFT_MASS_RANGES: [(i32, &str); 5] = [
    (31, "MSL2"),
    (34, "MSE2"),
    (41, "MSQ2"),
    (44, "MSU2"),
    (47, "MSD2"),
];

/// Maps an `MSOFT` index onto its target matrix and diagonal position.
pub fn soft_mass_target(index: i32) -> Option<(&'static str, i32)> {
    SOFT_MASS_RANGES
        .iter()
        .find(|(start, _)| (*start..*start + 3).contains(&index))
        .map(|(start, name)| (*name, index - start + 1))
}

fn lazy_block<'a>(out: &'a mut Document, name: &str, scale: Option<f64>) -> &'a mut Block {
    if !out.contains_block(name) {
        out.insert_block(Block::new(name).with_scale(scale));
    }
    out.block_or_insert(name)
}

/// Splits `MSOFT` into the pass-through block and the diagonal sfermion
/// matrices, writing them into `out`.
///
/// Sfermion entries are squared on the way. An index that is not a single
/// integer is an invariant violation and aborts.
pub fn expand_soft_masses(
    msoft: &Block,
    out: &mut Document,
    diagnostics: &mut Diagnostics,
) -> Result<(), SlhaError> {
    for (index, entry) in msoft.iter() {
        let Some(position) = index.as_single() else {
            return Err(SlhaError::Convert(
                ErrorInfo::new("msoft-index-arity", "MSOFT entries take a single integer index")
                    .with_context("block", msoft.name())
                    .with_context("index", index),
            ));
        };
        if MSOFT_PASSTHROUGH.contains(&position) {
            lazy_block(out, msoft.name(), msoft.scale()).set_entry(index.clone(), entry.clone());
            continue;
        }
        match soft_mass_target(position) {
            Some((target, diagonal)) => {
                let squared = entry.value * entry.value;
                lazy_block(out, target, msoft.scale()).set_with_annotation(
                    (diagonal, diagonal),
                    squared,
                    format!("{}({position})^2", msoft.name()),
                );
            }
            None => diagnostics.warn(
                WarningKind::UnknownIndex,
                msoft.name(),
                Some(index),
                "not a recognised MSOFT index; entry dropped",
            ),
        }
    }
    debug!(entries = msoft.len(), "expanded soft masses");
    Ok(())
}
