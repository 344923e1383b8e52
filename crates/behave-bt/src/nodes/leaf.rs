use std::borrow::Cow;

use behave_core::{BtStatus, TickTime};
use behave_tools::TraceEvent;

use crate::node::{BtNode, TickScope};

/// Trace tag for messages produced by [`Log`] nodes.
pub const LOG_EVENT: &str = "behave.log";

/// Runs a host function and reports whatever it returns.
pub struct Action<C> {
    action: Box<dyn FnMut(&mut C, &TickTime) -> BtStatus>,
}

impl<C: 'static> Action<C> {
    pub fn new(mut action: impl FnMut(&mut C) -> BtStatus + 'static) -> Self {
        Self {
            action: Box::new(move |ctx: &mut C, _: &TickTime| action(ctx)),
        }
    }

    /// Like [`Action::new`], but the function also sees the tick's timing.
    pub fn with_time(action: impl FnMut(&mut C, &TickTime) -> BtStatus + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }
}

impl<C: 'static> BtNode<C> for Action<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        let time = scope.time();
        (self.action)(scope.context_mut(), &time)
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Action")
    }
}

/// Checks a predicate: `true` succeeds, `false` fails. Never running.
pub struct Condition<C> {
    predicate: Box<dyn FnMut(&C) -> bool>,
}

impl<C: 'static> Condition<C> {
    pub fn new(predicate: impl FnMut(&C) -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl<C: 'static> BtNode<C> for Condition<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        BtStatus::from((self.predicate)(scope.context()))
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Condition")
    }
}

/// Forwards a message to `tracing` and to the engine's trace sink. Always succeeds.
pub struct Log<C> {
    message: Box<dyn FnMut(&C) -> String>,
}

impl<C: 'static> Log<C> {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: Box::new(move |_: &C| message.clone()),
        }
    }

    /// Message built from the context at tick time.
    pub fn with(message: impl FnMut(&C) -> String + 'static) -> Self {
        Self {
            message: Box::new(message),
        }
    }
}

impl<C: 'static> BtNode<C> for Log<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        let tick = scope.tick();
        let message = (self.message)(scope.context());
        tracing::trace!(target: "behave::log", tick, "{message}");
        scope.emit(TraceEvent::new(tick, LOG_EVENT).with_message(message));
        BtStatus::Success
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Log")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Succeed;

impl<C: 'static> BtNode<C> for Succeed {
    fn run(&mut self, _scope: &mut TickScope<'_, C>) -> BtStatus {
        BtStatus::Success
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Succeed")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Fail;

impl<C: 'static> BtNode<C> for Fail {
    fn run(&mut self, _scope: &mut TickScope<'_, C>) -> BtStatus {
        BtStatus::Failure
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Fail")
    }
}

/// Never completes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Run;

impl<C: 'static> BtNode<C> for Run {
    fn run(&mut self, _scope: &mut TickScope<'_, C>) -> BtStatus {
        BtStatus::Running
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Run")
    }
}
