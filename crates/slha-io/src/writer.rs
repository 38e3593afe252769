use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use slha_core::{Block, Document, Index, SlhaError};

/// Formats a value the way SLHA spectrum generators print it (`%16.8E`).
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value:>16}");
    }
    let raw = format!("{value:.8e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{:>16}", format!("{mantissa}E{sign}{:02}", exponent.abs()))
}

fn format_index(index: &Index) -> String {
    index
        .values()
        .iter()
        .map(|value| {
            if value.abs() >= 1000 {
                format!("{value:>10}")
            } else {
                format!("{value:>4}")
            }
        })
        .collect()
}

fn write_block(out: &mut String, block: &Block) {
    let _ = write!(out, "BLOCK {}", block.name());
    if let Some(scale) = block.scale() {
        let _ = write!(out, " Q= {}", format_value(scale).trim_start());
    }
    out.push('\n');

    let mut lines: Vec<(&Index, String)> = block
        .iter()
        .map(|(index, entry)| {
            let mut line = format!("{}   {}", format_index(index), format_value(entry.value));
            if let Some(annotation) = &entry.annotation {
                let _ = write!(line, "   # {annotation}");
            }
            (index, line)
        })
        .collect();
    lines.extend(
        block
            .labels()
            .map(|(index, label)| (index, format!("{}   {label}", format_index(index)))),
    );
    lines.sort_by(|a, b| a.0.cmp(b.0));
    for (_, line) in lines {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Renders a document as SLHA text.
pub fn write_document(document: &Document) -> String {
    let mut out = String::new();
    for block in document.blocks() {
        write_block(&mut out, block);
    }
    for (pdg, decay) in document.decays() {
        let _ = write!(out, "DECAY {pdg:>10}   {}", format_value(decay.width));
        if let Some(annotation) = &decay.annotation {
            let _ = write!(out, "   # {annotation}");
        }
        out.push('\n');
        for channel in &decay.channels {
            let _ = write!(
                out,
                "   {}   {:>2}",
                format_value(channel.branching_ratio),
                channel.daughters.len()
            );
            for daughter in &channel.daughters {
                let _ = write!(out, "   {daughter:>9}");
            }
            if let Some(annotation) = &channel.annotation {
                let _ = write!(out, "   # {annotation}");
            }
            out.push('\n');
        }
    }
    out
}

/// Writes a document to disk as SLHA text.
pub fn write_file(path: &Path, document: &Document) -> Result<(), SlhaError> {
    fs::write(path, write_document(document)).map_err(|err| SlhaError::io("write-slha", path, err))
}
