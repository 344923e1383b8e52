use std::borrow::Cow;

use behave_core::BtStatus;

use crate::node::{BtNode, Node, ResetMode, TickScope};

/// Swaps success and failure.
pub struct Not<C> {
    child: Node<C>,
}

impl<C: 'static> Not<C> {
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

impl<C: 'static> BtNode<C> for Not<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        self.child.tick(scope).invert()
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        visit(&mut self.child);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Not")
    }
}

/// Reports any completion as success.
pub struct Mute<C> {
    child: Node<C>,
}

impl<C: 'static> Mute<C> {
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

impl<C: 'static> BtNode<C> for Mute<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        self.child.tick(scope).mute()
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        visit(&mut self.child);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Mute")
    }
}

/// Gives a failing child up to `max_attempts` runs (the first one included).
///
/// A failed attempt restarts the child and reports `Running`; the next attempt starts on
/// the following tick.
pub struct Retry<C> {
    max_attempts: u32,
    attempts: u32,
    child: Node<C>,
}

impl<C: 'static> Retry<C> {
    /// `max_attempts` below 1 is raised to 1.
    pub fn new(max_attempts: u32, child: Node<C>) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            attempts: 0,
            child,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl<C: 'static> BtNode<C> for Retry<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        match self.child.tick(scope) {
            BtStatus::Failure => {
                self.attempts += 1;
                if self.attempts < self.max_attempts {
                    self.child.restart();
                    BtStatus::Running
                } else {
                    BtStatus::Failure
                }
            }
            status => status,
        }
    }

    fn reset(&mut self, _mode: ResetMode) {
        self.attempts = 0;
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        visit(&mut self.child);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Retry")
    }
}

/// Rate-limits its child.
///
/// After the child completes, the result is replayed without ticking the child until
/// `duration` seconds of elapsed time have been fed to this node. The timer only runs
/// between completions; a running child is ticked normally.
///
/// The timer and the replayed result survive [`ResetMode::Restart`], so a cooldown inside
/// a loop keeps limiting across iterations. An explicit reset clears both.
pub struct Cooldown<C> {
    duration: f64,
    remaining: f64,
    last: Option<BtStatus>,
    child: Node<C>,
}

impl<C: 'static> Cooldown<C> {
    /// Negative durations are treated as zero.
    pub fn new(duration: f64, child: Node<C>) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
            last: None,
            child,
        }
    }

    /// Seconds left before the child may run again.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

impl<C: 'static> BtNode<C> for Cooldown<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - scope.time().elapsed).max(0.0);
        }
        if self.remaining > 0.0 {
            if let Some(last) = self.last {
                return last;
            }
        }

        let status = self.child.tick(scope);
        if status.is_done() {
            self.last = Some(status);
            self.remaining = self.duration;
            self.child.restart();
        }
        status
    }

    fn reset(&mut self, mode: ResetMode) {
        if mode == ResetMode::Explicit {
            self.remaining = 0.0;
            self.last = None;
        }
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        visit(&mut self.child);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Cooldown")
    }
}

/// Fails its child once `duration` seconds of elapsed time have passed.
///
/// Time is counted from the tick after the first one, matching [`Wait`]. Once the limit is
/// reached the child is no longer ticked.
pub struct Timeout<C> {
    duration: f64,
    accumulated: f64,
    child: Node<C>,
}

impl<C: 'static> Timeout<C> {
    /// Negative durations are treated as zero.
    pub fn new(duration: f64, child: Node<C>) -> Self {
        Self {
            duration: duration.max(0.0),
            accumulated: 0.0,
            child,
        }
    }
}

impl<C: 'static> BtNode<C> for Timeout<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        if !scope.is_first_run() {
            self.accumulated += scope.time().elapsed;
        }
        if self.accumulated >= self.duration {
            return BtStatus::Failure;
        }
        self.child.tick(scope)
    }

    fn reset(&mut self, _mode: ResetMode) {
        self.accumulated = 0.0;
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        visit(&mut self.child);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Timeout")
    }
}

/// What a [`Wait`] waits for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaitFor {
    /// Seconds of elapsed time, counted from the second tick on.
    Duration(f64),
    /// Number of ticks, the first one included.
    Ticks(u32),
}

/// Runs until its threshold is met, then succeeds.
#[derive(Debug, Clone)]
pub struct Wait {
    until: WaitFor,
    elapsed: f64,
    ticks: u32,
}

impl Wait {
    /// Negative durations are treated as zero.
    pub fn seconds(duration: f64) -> Self {
        Self::new(WaitFor::Duration(duration.max(0.0)))
    }

    pub fn ticks(ticks: u32) -> Self {
        Self::new(WaitFor::Ticks(ticks))
    }

    fn new(until: WaitFor) -> Self {
        Self {
            until,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn until(&self) -> WaitFor {
        self.until
    }
}

impl<C: 'static> BtNode<C> for Wait {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        if !scope.is_first_run() {
            self.elapsed += scope.time().elapsed;
        }
        self.ticks = self.ticks.saturating_add(1);

        let done = match self.until {
            WaitFor::Duration(duration) => self.elapsed >= duration,
            WaitFor::Ticks(ticks) => self.ticks >= ticks,
        };
        if done {
            BtStatus::Success
        } else {
            BtStatus::Running
        }
    }

    fn reset(&mut self, _mode: ResetMode) {
        self.elapsed = 0.0;
        self.ticks = 0;
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Wait")
    }
}
