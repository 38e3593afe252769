//! Resolution of declared model parameters against an SLHA2 document.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use slha_core::{Document, ErrorInfo, Index, SlhaError};
use tracing::{debug, info, warn};

use crate::schema::{ModelSchema, ParameterDecl, DECAY_PSEUDO_BLOCK};

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParameterSource {
    /// Read from the document.
    Document,
    /// The declaration's own default.
    ExplicitDefault,
    /// The first default rule whose pattern matched the name.
    Rule {
        /// Matching glob.
        pattern: String,
    },
}

impl ParameterSource {
    /// Whether the value was substituted rather than read.
    pub fn is_default(&self) -> bool {
        !matches!(self, ParameterSource::Document)
    }
}

/// Value of one declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParameter {
    /// Resolved value.
    pub value: f64,
    /// Block the parameter is declared in.
    pub block: String,
    /// Entry index within the block.
    pub index: Index,
    /// Provenance of the value.
    pub source: ParameterSource,
}

/// Parameter that fell back to a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultedParameter {
    /// Parameter name.
    pub name: String,
    /// Substituted value.
    pub value: f64,
    /// Explicit default or matching rule.
    pub source: ParameterSource,
}

/// Side information gathered while mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingReport {
    /// Defaulted parameters in declaration order.
    pub defaulted: Vec<DefaultedParameter>,
    /// Document entries and widths no declaration refers to.
    pub unclaimed_entries: usize,
}

/// Resolved parameters keyed and ordered by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTable {
    /// Model the table was resolved for.
    pub model: String,
    /// Resolved parameters.
    pub parameters: BTreeMap<String, ResolvedParameter>,
    /// Defaults and unclaimed entry count.
    pub report: MappingReport,
}

impl ParameterTable {
    /// Value of a parameter by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).map(|parameter| parameter.value)
    }

    /// Number of resolved parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// `(name, value)` pairs in name order.
    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.parameters
            .iter()
            .map(|(name, parameter)| (name.as_str(), parameter.value))
    }

    /// Pretty canonical JSON rendering of the table.
    pub fn to_json(&self) -> Result<String, SlhaError> {
        slha_core::serde::to_canonical_json_pretty(self)
    }
}

fn lookup(document: &Document, decl: &ParameterDecl) -> Option<f64> {
    if decl.is_width() {
        let pdg = decl.index.as_single()?;
        return document.decay(pdg).map(|decay| decay.width);
    }
    document.get(&decl.block, decl.index.clone())
}

fn missing_parameter(decl: &ParameterDecl) -> SlhaError {
    SlhaError::Model(
        ErrorInfo::new(
            "missing-parameter",
            format!("parameter `{}` is absent and has no default", decl.name),
        )
        .with_context("parameter", &decl.name)
        .with_context("block", &decl.block)
        .with_context("index", &decl.index)
        .with_hint("add the entry to the spectrum, a `default` to the declaration, or a matching default rule"),
    )
}

fn count_unclaimed(document: &Document, claimed: &BTreeSet<(String, Index)>) -> usize {
    let entries = document
        .blocks()
        .flat_map(|block| {
            block
                .iter()
                .map(move |(index, _)| (block.name().to_string(), index.clone()))
        })
        .filter(|key| !claimed.contains(key))
        .count();
    let widths = document
        .decays()
        .filter(|(pdg, _)| !claimed.contains(&(DECAY_PSEUDO_BLOCK.to_string(), Index::single(*pdg))))
        .count();
    entries + widths
}

/// Resolves every declared parameter of `schema` from `document`.
///
/// A parameter takes the document value when present, else its explicit
/// default, else the value of the first default rule matching its name.
/// A parameter with none of these fails the whole mapping.
pub fn map_parameters(document: &Document, schema: &ModelSchema) -> Result<ParameterTable, SlhaError> {
    let schema = schema.clone().validated()?;
    let rules = schema.default_rules()?;
    let mut parameters = BTreeMap::new();
    let mut report = MappingReport::default();
    let mut claimed = BTreeSet::new();

    for decl in &schema.parameters {
        claimed.insert((decl.block.clone(), decl.index.clone()));
        let (value, source) = match lookup(document, decl) {
            Some(value) => (value, ParameterSource::Document),
            None => match decl.default {
                Some(value) => (value, ParameterSource::ExplicitDefault),
                None => {
                    let rule = rules
                        .matches(&decl.name)
                        .into_iter()
                        .min()
                        .map(|position| &schema.defaults[position]);
                    match rule {
                        Some(rule) => (
                            rule.value,
                            ParameterSource::Rule {
                                pattern: rule.pattern.clone(),
                            },
                        ),
                        None => return Err(missing_parameter(decl)),
                    }
                }
            },
        };
        if source.is_default() {
            warn!(
                parameter = %decl.name,
                block = %decl.block,
                index = %decl.index,
                value,
                ?source,
                "parameter absent from spectrum; default used"
            );
            report.defaulted.push(DefaultedParameter {
                name: decl.name.clone(),
                value,
                source: source.clone(),
            });
        }
        parameters.insert(
            decl.name.clone(),
            ResolvedParameter {
                value,
                block: decl.block.clone(),
                index: decl.index.clone(),
                source,
            },
        );
    }

    report.unclaimed_entries = count_unclaimed(document, &claimed);
    debug!(unclaimed = report.unclaimed_entries, "document entries not claimed by the model");
    info!(
        model = %schema.name,
        parameters = parameters.len(),
        defaulted = report.defaulted.len(),
        "mapped model parameters"
    );
    Ok(ParameterTable {
        model: schema.name,
        parameters,
        report,
    })
}
