#![deny(missing_docs)]
#![doc = "SLHA1 to SLHA2 conversion: trilinear rescaling, soft mass expansion, mixing embedding, sign normalisation and sector reordering."]

/// Block classification and the conversion pipeline.
pub mod convert;
/// Trilinear to T-coupling rescaling.
pub mod couplings;
/// Legacy 2x2 mixing block embedding.
pub mod mixing;
/// Conversion options.
pub mod params;
/// Mass-ordered reordering of flavour sectors.
pub mod reorder;
/// Warning collection and the conversion report.
pub mod report;
/// Neutralino sign normalisation.
pub mod signs;
/// `MSOFT` expansion.
pub mod soft_masses;

pub use convert::{classify, convert, mixing_angle, BlockKind, Conversion, PASS_THROUGH};
pub use couplings::{convert_trilinear, Flavour, TrigFactor};
pub use mixing::{consistency_violations, embed_mixing, seed_identity_matrices, LegacyMixing};
pub use params::{ConvertOpts, ReorderPolicy};
pub use reorder::{reorder_all, reorder_sector, row_order, Sector, SECTORS};
pub use report::{ConversionReport, ConversionWarning, Diagnostics, WarningKind};
pub use signs::normalize_signs;
pub use soft_masses::{expand_soft_masses, soft_mass_target};
