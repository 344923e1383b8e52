use std::borrow::Cow;

use behave_core::{BtStatus, DeterministicRng, SplitMix64};

use crate::error::BuildError;
use crate::node::{BtNode, Node, ResetMode, TickScope};

/// Ticks one child picked at random.
///
/// The pick happens on construction and again on every reset, never between ticks of a
/// run. With weights, child `i` is chosen with probability `weights[i] / sum(weights)`.
/// Without weights the pick is uniform. No children, or weights summing to zero, leave
/// nothing selected and the node fails.
pub struct Random<C> {
    children: Vec<Node<C>>,
    weights: Option<Vec<f64>>,
    selected: Option<usize>,
    rng: Box<dyn DeterministicRng>,
}

impl<C: 'static> Random<C> {
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self::build(children, None)
    }

    /// Weighted selection. Weights must be finite, non-negative and match the children
    /// one to one. Their sum must be finite too.
    pub fn weighted(weights: Vec<f64>, children: Vec<Node<C>>) -> Result<Self, BuildError> {
        if weights.len() != children.len() {
            return Err(BuildError::WeightCount {
                weights: weights.len(),
                children: children.len(),
            });
        }
        if let Some((index, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(BuildError::InvalidWeight { index, weight });
        }
        if !weights.iter().sum::<f64>().is_finite() {
            return Err(BuildError::WeightOverflow);
        }
        Ok(Self::build(children, Some(weights)))
    }

    /// Reseeds and redraws the selection, making the node reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(SplitMix64::new(seed))
    }

    pub fn with_rng(mut self, rng: impl DeterministicRng + 'static) -> Self {
        self.rng = Box::new(rng);
        self.select();
        self
    }

    /// Index of the child this run will tick.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn build(children: Vec<Node<C>>, weights: Option<Vec<f64>>) -> Self {
        let mut random = Self {
            children,
            weights,
            selected: None,
            rng: Box::new(SplitMix64::from_stream()),
        };
        random.select();
        random
    }

    fn select(&mut self) {
        self.selected = match &self.weights {
            Some(weights) => weighted_pick(weights, self.rng.as_mut()),
            None if self.children.is_empty() => None,
            None => Some(self.rng.below(self.children.len())),
        };
    }
}

fn weighted_pick(weights: &[f64], rng: &mut dyn DeterministicRng) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let draw = rng.next_f64_unit() * total;
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw < cumulative {
            return Some(i);
        }
    }
    // Rounding can leave `draw` at the very top of the range.
    weights.iter().rposition(|w| *w > 0.0)
}

impl<C: 'static> BtNode<C> for Random<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        match self.selected {
            Some(i) => self.children[i].tick(scope),
            None => BtStatus::Failure,
        }
    }

    fn reset(&mut self, _mode: ResetMode) {
        self.select();
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        self.children.iter_mut().for_each(visit);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Random")
    }
}
