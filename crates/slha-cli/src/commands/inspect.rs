use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use slha_core::{canonical_document_hash, Document};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Spectrum file to summarise.
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(Debug, Serialize)]
struct BlockSummary {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<f64>,
    entries: usize,
}

#[derive(Debug, Serialize)]
struct InspectSummary {
    document_hash: String,
    blocks: Vec<BlockSummary>,
    decays: usize,
    decay_channels: usize,
}

fn summarise(document: &Document) -> Result<InspectSummary, Box<dyn Error>> {
    let blocks = document
        .blocks()
        .map(|block| BlockSummary {
            name: block.name().to_string(),
            scale: block.scale(),
            entries: block.len() + block.labels().count(),
        })
        .collect();
    Ok(InspectSummary {
        document_hash: canonical_document_hash(document)?,
        blocks,
        decays: document.decays().count(),
        decay_channels: document.decays().map(|(_, decay)| decay.channels.len()).sum(),
    })
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let document = slha_io::read_file(&args.input)?;
    let summary = summarise(&document)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
