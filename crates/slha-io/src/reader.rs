use std::fs;
use std::path::Path;

use slha_core::{Block, Decay, DecayChannel, Document, ErrorInfo, Index, SlhaError};
use tracing::{debug, warn};

fn parse_error(code: &str, line: usize, message: impl Into<String>) -> SlhaError {
    SlhaError::Parse(ErrorInfo::new(code, message).with_context("line", line))
}

enum Section {
    None,
    Block(String),
    Decay(i32),
}

enum Payload {
    Value(Index, f64),
    Label(Index, String),
}

/// Parses a floating point literal, accepting Fortran `D` exponents.
pub fn parse_float(token: &str) -> Option<f64> {
    if token.contains(|c: char| matches!(c, 'D' | 'd')) {
        token.replace(|c: char| matches!(c, 'D' | 'd'), "E").parse().ok()
    } else {
        token.parse().ok()
    }
}

fn split_comment(line: &str) -> (&str, Option<String>) {
    match line.split_once('#') {
        Some((content, comment)) => {
            let comment = comment.trim();
            let comment = (!comment.is_empty()).then(|| comment.to_string());
            (content, comment)
        }
        None => (line, None),
    }
}

fn parse_scale(tokens: &[&str], line: usize) -> Result<Option<f64>, SlhaError> {
    if tokens.is_empty() {
        return Ok(None);
    }
    let joined = tokens.concat();
    let upper = joined.to_ascii_uppercase();
    let Some(literal) = upper.strip_prefix("Q=") else {
        return Err(parse_error(
            "bad-block-header",
            line,
            format!("unexpected block header suffix `{}`", tokens.join(" ")),
        ));
    };
    parse_float(literal)
        .map(Some)
        .ok_or_else(|| parse_error("bad-scale", line, format!("scale `{literal}` is not a number")))
}

fn parse_payload(tokens: &[&str]) -> Payload {
    let leading = tokens
        .iter()
        .take_while(|token| token.parse::<i32>().is_ok())
        .count();
    let ints = |slice: &[&str]| -> Vec<i32> {
        slice
            .iter()
            .filter_map(|token| token.parse::<i32>().ok())
            .collect()
    };
    if leading == tokens.len() {
        if let Some((last, index)) = tokens.split_last() {
            let value = parse_float(last).unwrap_or_default();
            return Payload::Value(Index::new(ints(index)), value);
        }
    }
    let index = Index::new(ints(&tokens[..leading]));
    let rest = &tokens[leading..];
    match rest {
        [single] => match parse_float(single) {
            Some(value) => Payload::Value(index, value),
            None => Payload::Label(index, single.to_string()),
        },
        _ => Payload::Label(index, rest.join(" ")),
    }
}

fn parse_channel(
    tokens: &[&str],
    comment: Option<String>,
    line: usize,
) -> Result<DecayChannel, SlhaError> {
    let [br, nda, daughters @ ..] = tokens else {
        return Err(parse_error(
            "bad-decay-channel",
            line,
            "decay channel needs a branching ratio and a daughter count",
        ));
    };
    let branching_ratio = parse_float(br).ok_or_else(|| {
        parse_error("bad-decay-channel", line, format!("branching ratio `{br}` is not a number"))
    })?;
    let count: usize = nda.parse().map_err(|_| {
        parse_error("bad-decay-channel", line, format!("daughter count `{nda}` is not an integer"))
    })?;
    if daughters.len() != count {
        return Err(parse_error(
            "bad-decay-channel",
            line,
            format!("expected {count} daughters, found {}", daughters.len()),
        ));
    }
    let daughters = daughters
        .iter()
        .map(|token| {
            token.parse::<i32>().map_err(|_| {
                parse_error("bad-decay-channel", line, format!("`{token}` is not a PDG code"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DecayChannel {
        branching_ratio,
        daughters,
        annotation: comment,
    })
}

/// Parses SLHA text into a [`Document`].
///
/// A block listed more than once is merged into a single block: later
/// entries replace earlier ones and the last `Q=` wins, so one block keeps
/// one scale.
pub fn parse_str(text: &str) -> Result<Document, SlhaError> {
    let mut document = Document::new();
    let mut section = Section::None;

    for (offset, raw) in text.lines().enumerate() {
        let line = offset + 1;
        let (content, comment) = split_comment(raw);
        let tokens: Vec<&str> = content.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            continue;
        };

        match first.to_ascii_uppercase().as_str() {
            "BLOCK" => {
                let name = tokens
                    .get(1)
                    .ok_or_else(|| parse_error("bad-block-header", line, "block name missing"))?
                    .to_ascii_uppercase();
                let scale = parse_scale(&tokens[2..], line)?;
                if document.contains_block(&name) {
                    warn!(block = %name, line, "block repeated; merging entries");
                } else {
                    document.insert_block(Block::new(&name));
                }
                if let Some(scale) = scale {
                    document.block_or_insert(&name).set_scale(scale);
                }
                section = Section::Block(name);
            }
            "DECAY" => {
                let pdg = tokens
                    .get(1)
                    .and_then(|token| token.parse::<i32>().ok())
                    .ok_or_else(|| parse_error("bad-decay-header", line, "PDG code missing"))?;
                let width = tokens
                    .get(2)
                    .and_then(|token| parse_float(token))
                    .ok_or_else(|| parse_error("bad-decay-header", line, "total width missing"))?;
                let mut decay = Decay::new(width);
                decay.annotation = comment;
                document.insert_decay(pdg, decay);
                section = Section::Decay(pdg);
            }
            _ => match &section {
                Section::Block(name) => {
                    let block = document.block_or_insert(name);
                    match parse_payload(&tokens) {
                        Payload::Value(index, value) => match comment {
                            Some(text) => block.set_with_annotation(index, value, text),
                            None => block.set(index, value),
                        },
                        Payload::Label(index, label) => block.set_label(index, label),
                    }
                }
                Section::Decay(pdg) => {
                    let channel = parse_channel(&tokens, comment, line)?;
                    if let Some(decay) = document.decay_mut(*pdg) {
                        decay.channels.push(channel);
                    }
                }
                Section::None => {
                    return Err(parse_error(
                        "entry-outside-block",
                        line,
                        "data line appears before any BLOCK or DECAY header",
                    ));
                }
            },
        }
    }

    debug!(
        blocks = document.block_count(),
        decays = document.decays().count(),
        "parsed SLHA document"
    );
    Ok(document)
}

/// Reads and parses an SLHA file.
pub fn read_file(path: &Path) -> Result<Document, SlhaError> {
    let text = fs::read_to_string(path).map_err(|err| SlhaError::io("read-slha", path, err))?;
    parse_str(&text).map_err(|err| match err {
        SlhaError::Parse(info) => SlhaError::Parse(info.with_context("path", path.display())),
        other => other,
    })
}
