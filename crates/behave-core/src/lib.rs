//! Deterministic primitives shared by the behave behavior-tree engine.
//!
//! Nothing in here knows about nodes or trees: this crate holds the values that flow
//! through a tick (status, time, iteration policy) plus the small RNG used by random
//! selection.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod rng;
pub mod status;
pub mod tick;

pub use config::{BehaviorConfig, Iterations, DEFAULT_ROOT};
pub use rng::{DeterministicRng, SplitMix64};
pub use status::BtStatus;
pub use tick::TickTime;
