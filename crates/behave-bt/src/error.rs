use thiserror::Error;

/// Errors raised while assembling trees or a behavior. Ticking never fails with an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("tree {0:?} is registered more than once")]
    DuplicateTree(String),

    #[error("random node has {weights} weights for {children} children")]
    WeightCount { weights: usize, children: usize },

    #[error("random weight #{index} is {weight}, expected a finite non-negative number")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("random weights sum past the largest finite number")]
    WeightOverflow,
}

pub type Result<T> = std::result::Result<T, BuildError>;
