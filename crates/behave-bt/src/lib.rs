//! Tick-driven behavior trees.
//!
//! A [`Behavior`] owns a host context and a set of named [`Tree`]s. The host calls
//! [`Behavior::tick`] once per frame with the elapsed time; every node reports
//! [`BtStatus::Running`], [`BtStatus::Success`] or [`BtStatus::Failure`], and a completed
//! node keeps answering with its cached result until it is reset.
//!
//! Trees are assembled from [`Node`] handles, either through the types in [`nodes`] or the
//! free functions in [`builder`]. A node can be [tagged](Node::tagged) so descendants in the
//! same tree can complete it early with [`FailParent`] or [`SucceedParent`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod builder;
pub mod engine;
pub mod error;
pub mod node;
pub mod nodes;

pub use behave_core::{BehaviorConfig, BtStatus, Iterations, TickTime, DEFAULT_ROOT};
pub use behave_tools::{
    NullTraceSink, SharedTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink,
};
pub use engine::{Behavior, BehaviorBuilder, SharedTree, TreeRegistry, COMPLETED_EVENT};
pub use error::BuildError;
pub use node::{BtNode, Node, ResetMode, Tag, TickScope};
pub use nodes::{
    Action, Condition, Cooldown, Fail, FailParent, Fallback, Log, Mute, Not, Parallel, Race,
    Random, Repeat, Retry, Run, Sequence, Subtree, Succeed, SucceedParent, Timeout, Tree, Wait,
    WaitFor, While, LOG_EVENT,
};
