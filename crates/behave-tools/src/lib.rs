//! Trace events and sinks for the behave behavior-tree engine.
//!
//! `Log` nodes and the engine write [`TraceEvent`]s into a [`TraceSink`]; what happens to
//! them afterwards is up to the host.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, SharedTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink};
