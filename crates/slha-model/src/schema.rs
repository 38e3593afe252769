use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use slha_core::{ErrorInfo, Index, SlhaError};

/// Pseudo-block name addressing total widths in the decay table.
pub const DECAY_PSEUDO_BLOCK: &str = "DECAY";

fn model_error(code: &str, message: impl Into<String>) -> SlhaError {
    SlhaError::Model(ErrorInfo::new(code, message))
}

/// One model parameter and where it lives in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    /// Parameter name as the model knows it.
    pub name: String,
    /// Source block; `MASS` and `DECAY` are indexed by PDG code.
    pub block: String,
    /// Entry index within the block. Empty for scalar blocks.
    #[serde(default = "Index::scalar")]
    pub index: Index,
    /// Value used when the document lacks the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
}

impl ParameterDecl {
    /// Declares a parameter without an explicit default.
    pub fn new(name: impl Into<String>, block: impl Into<String>, index: impl Into<Index>) -> Self {
        Self {
            name: name.into(),
            block: block.into(),
            index: index.into(),
            default: None,
        }
    }

    /// Attaches an explicit default.
    pub fn with_default(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    /// Whether the declaration reads a total width rather than a block entry.
    pub fn is_width(&self) -> bool {
        self.block.eq_ignore_ascii_case(DECAY_PSEUDO_BLOCK)
    }
}

/// Fallback value for every undeclared-default parameter whose name matches
/// `pattern`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultRule {
    /// Glob over parameter names, e.g. `yu*` or `M?`.
    pub pattern: String,
    /// Substituted value.
    pub value: f64,
}

/// Declared parameters of a model plus ordered default rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Model name, carried into the parameter table.
    pub name: String,
    /// Parameter declarations.
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    /// Default rules; the first match wins.
    #[serde(default)]
    pub defaults: Vec<DefaultRule>,
}

impl ModelSchema {
    /// Parses a YAML schema.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SlhaError> {
        let schema: Self = serde_yaml::from_str(yaml)
            .map_err(|err| SlhaError::Serde(ErrorInfo::new("model-yaml", err.to_string())))?;
        schema.validated()
    }

    /// Parses a JSON schema.
    pub fn from_json_str(json: &str) -> Result<Self, SlhaError> {
        let schema: Self = serde_json::from_str(json)
            .map_err(|err| SlhaError::Serde(ErrorInfo::new("model-json", err.to_string())))?;
        schema.validated()
    }

    /// Loads a schema, choosing JSON for `.json` files and YAML otherwise.
    pub fn load(path: &Path) -> Result<Self, SlhaError> {
        let text = fs::read_to_string(path).map_err(|err| SlhaError::io("read-model", path, err))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        };
        parsed.map_err(|err| match err {
            SlhaError::Serde(info) => SlhaError::Serde(info.with_context("path", path.display())),
            SlhaError::Model(info) => SlhaError::Model(info.with_context("path", path.display())),
            other => other,
        })
    }

    /// Upper-cases block names and rejects duplicate names, PDG-keyed
    /// declarations without a single index, and malformed rule patterns.
    pub fn validated(mut self) -> Result<Self, SlhaError> {
        let mut seen = BTreeSet::new();
        for decl in &mut self.parameters {
            decl.block = decl.block.to_ascii_uppercase();
            if decl.name.is_empty() {
                return Err(SlhaError::Model(
                    ErrorInfo::new("empty-parameter-name", "parameter name is empty")
                        .with_context("block", &decl.block),
                ));
            }
            if !seen.insert(decl.name.clone()) {
                return Err(SlhaError::Model(
                    ErrorInfo::new("duplicate-parameter", "parameter declared twice")
                        .with_context("parameter", &decl.name),
                ));
            }
            let keyed_by_pdg = decl.block == "MASS" || decl.is_width();
            if keyed_by_pdg && decl.index.arity() != 1 {
                return Err(SlhaError::Model(
                    ErrorInfo::new("bad-parameter-index", "MASS and DECAY are keyed by one PDG code")
                        .with_context("parameter", &decl.name)
                        .with_context("index", &decl.index),
                ));
            }
        }
        self.default_rules()?;
        Ok(self)
    }

    /// Compiles the default rule patterns.
    pub fn default_rules(&self) -> Result<GlobSet, SlhaError> {
        let mut builder = GlobSetBuilder::new();
        for rule in &self.defaults {
            let glob = Glob::new(&rule.pattern).map_err(|err| {
                SlhaError::Model(
                    ErrorInfo::new("bad-default-pattern", err.to_string())
                        .with_context("pattern", &rule.pattern),
                )
            })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|err| model_error("default-rules-build", err.to_string()))
    }
}
