use serde::{Deserialize, Serialize};
use slha_core::{ErrorInfo, SlhaError};

/// Row ordering applied to the sfermion mixing matrices after conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReorderPolicy {
    /// Swap a generation's left/right rows when the first is heavier.
    #[default]
    GenerationPaired,
    /// Sort every row of a sector by ascending mass.
    FullMixing,
}

impl ReorderPolicy {
    /// Maps the command line `--full-mixing` flag onto a policy.
    pub fn from_full_mixing(full_mixing: bool) -> Self {
        if full_mixing {
            ReorderPolicy::FullMixing
        } else {
            ReorderPolicy::GenerationPaired
        }
    }
}

fn default_mixing_tolerance() -> f64 {
    1e-4
}

/// Options controlling an SLHA1 to SLHA2 conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOpts {
    /// Row ordering policy for the flavour sectors.
    #[serde(default)]
    pub reorder: ReorderPolicy,
    /// Relative tolerance of the 2x2 mixing block consistency checks.
    #[serde(default = "default_mixing_tolerance")]
    pub mixing_tolerance: f64,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            reorder: ReorderPolicy::default(),
            mixing_tolerance: default_mixing_tolerance(),
        }
    }
}

impl ConvertOpts {
    /// Options with the given reorder policy and default tolerance.
    pub fn with_policy(reorder: ReorderPolicy) -> Self {
        Self {
            reorder,
            ..Self::default()
        }
    }

    /// Loads options from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SlhaError> {
        let opts: Self = serde_yaml::from_str(yaml)
            .map_err(|err| SlhaError::Serde(ErrorInfo::new("convert-opts-yaml", err.to_string())))?;
        Ok(opts.sanitised())
    }

    /// Returns a copy with a positive finite tolerance.
    pub fn sanitised(&self) -> Self {
        let mixing_tolerance = if self.mixing_tolerance.is_finite() && self.mixing_tolerance > 0.0 {
            self.mixing_tolerance
        } else {
            default_mixing_tolerance()
        };
        Self {
            reorder: self.reorder,
            mixing_tolerance,
        }
    }
}
