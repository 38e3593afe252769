//! Block classification and the SLHA1 to SLHA2 pipeline.

use slha_core::{canonical_document_hash, Document, ErrorInfo, Index, SlhaError};
use tracing::{debug, info};

use crate::couplings::{convert_trilinear, Flavour};
use crate::mixing::{embed_mixing, legacy_mixing, seed_identity_matrices, LegacyMixing};
use crate::params::ConvertOpts;
use crate::reorder::reorder_all;
use crate::report::{ConversionReport, Diagnostics, WarningKind};
use crate::signs::normalize_signs;
use crate::soft_masses::expand_soft_masses;

/// Blocks copied to the output unchanged and without a warning.
pub const PASS_THROUGH: [&str; 34] = [
    "SPINFO", "DCINFO", "MODSEL", "SMINPUTS", "MINPAR", "EXTPAR", "MASS", "NMIX", "IMNMIX",
    "UMIX", "VMIX", "ALPHA", "HMIX", "GAUGE", "YU", "YD", "YE", "QEXTPAR", "SNUMIX", "USQMIX",
    "DSQMIX", "SELMIX", "TU", "TD", "TE", "MSQ2", "MSU2", "MSD2", "MSL2", "MSE2", "VCKM",
    "VCKMIN", "UPMNS", "UPMNSIN",
];

/// Name of the soft mass block expanded by the converter.
pub const MSOFT: &str = "MSOFT";

/// How the converter handles an input block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Known SLHA1/SLHA2 block copied verbatim.
    PassThrough,
    /// `AU`, `AD` or `AE`, rescaled into a T-block.
    Trilinear(Flavour),
    /// `MSOFT`, expanded into soft mass matrices.
    SoftMasses,
    /// Legacy 2x2 sfermion mixing block.
    LegacyMixing(&'static LegacyMixing),
    /// Anything else; copied with a warning.
    Unknown,
}

/// Classifies a block by name (case-insensitive).
pub fn classify(name: &str) -> BlockKind {
    let name = name.to_ascii_uppercase();
    if let Some(flavour) = Flavour::from_trilinear(&name) {
        return BlockKind::Trilinear(flavour);
    }
    if name == MSOFT {
        return BlockKind::SoftMasses;
    }
    if let Some(legacy) = legacy_mixing(&name) {
        return BlockKind::LegacyMixing(legacy);
    }
    if PASS_THROUGH.contains(&name.as_str()) {
        BlockKind::PassThrough
    } else {
        BlockKind::Unknown
    }
}

/// Reads `beta = atan(tan beta)` from `HMIX`(2).
pub fn mixing_angle(input: &Document) -> Result<f64, SlhaError> {
    let tan_beta = input.get("HMIX", 2).ok_or_else(|| {
        SlhaError::Convert(
            ErrorInfo::new(
                "missing-tan-beta",
                "tan(beta) is required to rescale trilinear couplings",
            )
            .with_context("block", "HMIX")
            .with_context("index", Index::single(2))
            .with_hint("add `Block HMIX` with entry 2 = tan(beta)"),
        )
    })?;
    Ok(tan_beta.atan())
}

/// Converted document together with its report.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// SLHA2 document.
    pub document: Document,
    /// Warnings, hashes and pass summaries.
    pub report: ConversionReport,
}

/// Converts an SLHA1 document into SLHA2 conventions.
///
/// The input is never modified. Known SLHA2 and unknown blocks are copied
/// first and converted blocks are merged over them, so the result does not
/// depend on block order. Fails without producing output when a trilinear
/// block is present but `HMIX`(2) is not, or when `MSOFT` holds a non-vector
/// index.
pub fn convert(input: &Document, opts: &ConvertOpts) -> Result<Conversion, SlhaError> {
    let opts = opts.sanitised();
    let mut diagnostics = Diagnostics::new();
    let mut output = Document::new();
    seed_identity_matrices(&mut output);

    for block in input.blocks() {
        match classify(block.name()) {
            BlockKind::PassThrough => {
                output.merge_block(block.clone());
            }
            BlockKind::Unknown => {
                diagnostics.warn(
                    WarningKind::UnknownBlock,
                    block.name(),
                    None,
                    "unrecognised block copied unchanged",
                );
                output.merge_block(block.clone());
            }
            _ => {}
        }
    }

    for block in input.blocks() {
        let kind = classify(block.name());
        debug!(block = block.name(), ?kind, "dispatching block");
        match kind {
            BlockKind::PassThrough | BlockKind::Unknown => {}
            BlockKind::Trilinear(flavour) => {
                let factor = flavour.trig_factor().at(mixing_angle(input)?);
                let converted = convert_trilinear(
                    block,
                    input.block(flavour.yukawa_block()),
                    factor,
                    flavour,
                    &mut diagnostics,
                );
                output.merge_block(converted);
            }
            BlockKind::SoftMasses => expand_soft_masses(block, &mut output, &mut diagnostics)?,
            BlockKind::LegacyMixing(legacy) => embed_mixing(
                block,
                legacy,
                opts.mixing_tolerance,
                &mut output,
                &mut diagnostics,
            ),
        }
    }
    for (pdg, decay) in input.decays() {
        output.insert_decay(pdg, decay.clone());
    }

    let flipped_neutralinos = normalize_signs(&mut output);
    let reordered_sectors = reorder_all(&mut output, opts.reorder, &mut diagnostics);

    let report = ConversionReport {
        input_hash: canonical_document_hash(input)?,
        output_hash: canonical_document_hash(&output)?,
        policy: opts.reorder,
        flipped_neutralinos,
        reordered_sectors,
        warnings: diagnostics.into_warnings(),
    };
    info!(
        blocks = output.block_count(),
        warnings = report.warnings.len(),
        flipped = report.flipped_neutralinos.len(),
        reordered = report.reordered_sectors.len(),
        "converted SLHA1 document to SLHA2"
    );
    Ok(Conversion {
        document: output,
        report,
    })
}
