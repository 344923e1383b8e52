//! Built-in node kinds.
//!
//! - Leaves: [`Action`], [`Condition`], [`Log`], [`Succeed`], [`Fail`], [`Run`], [`Random`]
//! - Decorators: [`Not`], [`Mute`], [`Retry`], [`Cooldown`], [`Timeout`], [`Wait`]
//! - Composites: [`Sequence`], [`Fallback`], [`Parallel`], [`Race`]
//! - Control flow: [`Repeat`], [`While`], [`Tree`], [`Subtree`], [`FailParent`],
//!   [`SucceedParent`]

mod composite;
mod control;
mod decorator;
mod leaf;
mod random;

pub use composite::{Fallback, Parallel, Race, Sequence};
pub use control::{FailParent, Repeat, SucceedParent, Subtree, Tree, While};
pub use decorator::{Cooldown, Mute, Not, Retry, Timeout, Wait, WaitFor};
pub use leaf::{Action, Condition, Fail, Log, Run, Succeed, LOG_EVENT};
pub use random::Random;
