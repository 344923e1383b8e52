//! Engine configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the tree an engine starts from unless configured otherwise.
pub const DEFAULT_ROOT: &str = "Root";

/// How many complete runs a repeating node (or the engine) performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Iterations {
    Count(u32),
    Infinite,
}

impl Iterations {
    /// Finite count, `None` when unbounded.
    pub fn count(self) -> Option<u32> {
        match self {
            Iterations::Count(n) => Some(n),
            Iterations::Infinite => None,
        }
    }
}

impl Default for Iterations {
    fn default() -> Self {
        Iterations::Count(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// Name of the tree ticked by the engine.
    pub root: String,

    /// Number of full runs of the root before the engine completes.
    pub iterations: Iterations,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            iterations: Iterations::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_root_once() {
        let config = BehaviorConfig::default();
        assert_eq!(config.root, "Root");
        assert_eq!(config.iterations.count(), Some(1));
        assert_eq!(Iterations::Infinite.count(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: BehaviorConfig = serde_json::from_str(r#"{"iterations":"infinite"}"#)
            .expect("deserialize");
        assert_eq!(config.root, DEFAULT_ROOT);
        assert_eq!(config.iterations, Iterations::Infinite);

        let config: BehaviorConfig =
            serde_json::from_str(r#"{"root":"Patrol","iterations":{"count":3}}"#)
                .expect("deserialize");
        assert_eq!(config.root, "Patrol");
        assert_eq!(config.iterations, Iterations::Count(3));
    }
}
