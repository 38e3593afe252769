#![deny(missing_docs)]
#![doc = "Model parameter mapping: resolves declared parameters from an SLHA2 document with explicit and pattern defaults."]

/// Parameter resolution and the resulting table.
pub mod mapping;
/// Model schema declarations and loading.
pub mod schema;

pub use mapping::{
    map_parameters, DefaultedParameter, MappingReport, ParameterSource, ParameterTable,
    ResolvedParameter,
};
pub use schema::{DefaultRule, ModelSchema, ParameterDecl, DECAY_PSEUDO_BLOCK};
