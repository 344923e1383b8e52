#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

/// One observation recorded while a behavior ticks: a `Log` message or an engine
/// transition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    /// Engine tick the event was recorded on (1-based).
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub message: String,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            message: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Receives trace events. Implementations must not block the tick.
pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Messages of every event carrying `tag`, in emission order.
    pub fn messages(&self, tag: &str) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.message.as_str())
            .collect()
    }
}

/// Sink that appends into a [`TraceLog`] the host keeps a handle to.
///
/// Useful when the sink itself is moved into an engine but the host still wants to read
/// what was recorded.
#[derive(Debug, Clone, Default)]
pub struct SharedTraceSink {
    log: Rc<RefCell<TraceLog>>,
}

impl SharedTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Rc<RefCell<TraceLog>> {
        Rc::clone(&self.log)
    }
}

impl TraceSink for SharedTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.log.borrow_mut().push(event);
    }
}
