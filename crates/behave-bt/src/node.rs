//! The tick/cache/reset protocol shared by every node.
//!
//! A [`Node`] pairs a node behavior ([`BtNode`]) with its cached completion state. Parents
//! only ever call [`Node::tick`]; the behavior's [`BtNode::run`] step is reached exclusively
//! through it, since a [`TickScope`] can only be created by this crate.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use behave_core::{BtStatus, TickTime};
use behave_tools::{TraceEvent, TraceSink};

use crate::engine::TreeRegistry;

/// Label attached to a node so descendants can find it with `FailParent`/`SucceedParent`.
pub type Tag = String;

/// Why a node is being reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Requested by the host or the engine. Every piece of node memory is dropped.
    Explicit,
    /// A loop or decorator starting the next run of its body.
    ///
    /// Identical to `Explicit` for every built-in node except `Cooldown`, whose timer and
    /// cached result survive a restart.
    Restart,
}

/// State a node shares with the children pointing back at it.
///
/// Children hold a `Weak` to their parent's cell, so the links never keep a node alive.
#[derive(Debug, Default)]
pub(crate) struct NodeCell {
    status: Cell<Option<BtStatus>>,
    tag: RefCell<Option<Tag>>,
    parent: RefCell<Weak<NodeCell>>,
}

impl NodeCell {
    fn attach(&self, parent: &Weak<NodeCell>) {
        *self.parent.borrow_mut() = parent.clone();
    }

    /// First ancestor (excluding `self`) tagged `tag`.
    fn find_ancestor(&self, tag: &str) -> Option<Rc<NodeCell>> {
        let mut next = self.parent.borrow().upgrade();
        while let Some(cell) = next {
            if cell.tag.borrow().as_deref() == Some(tag) {
                return Some(cell);
            }
            next = cell.parent.borrow().upgrade();
        }
        None
    }
}

/// Behavior of one kind of node.
///
/// Implementors describe a single execution step; caching, tagging and reset propagation
/// are handled by the [`Node`] wrapping them.
pub trait BtNode<C>: 'static {
    /// One execution step. Only ever invoked by [`Node::tick`] while the node's cached
    /// status is unset or `Running`.
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus;

    /// Clears node-local memory (counters, accumulators, selections).
    ///
    /// Children reported by [`BtNode::for_each_child`] have already been reset with the
    /// same mode when this is called.
    fn reset(&mut self, _mode: ResetMode) {}

    /// Visits every child node owned by this node, in order.
    ///
    /// Used to attach parent links on construction and to propagate resets, so a node that
    /// owns children must report all of them.
    fn for_each_child(&mut self, _visit: &mut dyn FnMut(&mut Node<C>)) {}

    /// Diagnostic name.
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Owned handle to a node in a tree.
pub struct Node<C> {
    cell: Rc<NodeCell>,
    behavior: Box<dyn BtNode<C>>,
}

impl<C: 'static> Node<C> {
    pub fn new(behavior: impl BtNode<C>) -> Self {
        let cell = Rc::new(NodeCell::default());
        let mut behavior: Box<dyn BtNode<C>> = Box::new(behavior);
        let link = Rc::downgrade(&cell);
        behavior.for_each_child(&mut |child| child.cell.attach(&link));
        Self { cell, behavior }
    }

    /// Attaches `tag` to this node.
    pub fn tagged(self, tag: impl Into<Tag>) -> Self {
        *self.cell.tag.borrow_mut() = Some(tag.into());
        self
    }

    pub fn tag(&self) -> Option<Tag> {
        self.cell.tag.borrow().clone()
    }

    /// Cached status; `None` until the first tick after construction or reset.
    pub fn state(&self) -> Option<BtStatus> {
        self.cell.status.get()
    }

    pub fn is_first_run(&self) -> bool {
        self.state().is_none()
    }

    pub fn label(&self) -> Cow<'static, str> {
        self.behavior.label()
    }

    /// Runs one step unless the node already completed, in which case the cached status is
    /// returned without side effects.
    pub fn tick(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        if let Some(done) = self.cell.status.get().filter(|s| s.is_done()) {
            return done;
        }

        let outer = scope.enter(&self.cell);
        let outcome = self.behavior.run(scope);
        scope.leave(outer);

        // A tagged descendant may have completed this node while it ran; that wins.
        let status = match self.cell.status.get() {
            Some(injected) if injected.is_done() => injected,
            _ => outcome,
        };
        self.cell.status.set(Some(status));
        status
    }

    /// Host-level reset: clears this node and every descendant.
    pub fn reset(&mut self) {
        self.reset_with(ResetMode::Explicit);
    }

    /// Prepares the node for its next run inside a loop.
    pub fn restart(&mut self) {
        self.reset_with(ResetMode::Restart);
    }

    pub fn reset_with(&mut self, mode: ResetMode) {
        self.cell.status.set(None);
        self.behavior.for_each_child(&mut |child| child.reset_with(mode));
        self.behavior.reset(mode);
    }
}

impl<C: 'static> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("label", &self.behavior.label())
            .field("tag", &self.cell.tag.borrow())
            .field("state", &self.cell.status.get())
            .finish()
    }
}

/// Everything a node can reach while it is being ticked.
pub struct TickScope<'a, C> {
    context: &'a mut C,
    time: TickTime,
    tick: u64,
    trees: &'a TreeRegistry<C>,
    sink: &'a mut dyn TraceSink,
    current: Option<Rc<NodeCell>>,
}

impl<'a, C> TickScope<'a, C> {
    pub(crate) fn new(
        context: &'a mut C,
        time: TickTime,
        tick: u64,
        trees: &'a TreeRegistry<C>,
        sink: &'a mut dyn TraceSink,
    ) -> Self {
        Self {
            context,
            time,
            tick,
            trees,
            sink,
            current: None,
        }
    }

    pub fn context(&self) -> &C {
        &*self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut *self.context
    }

    pub fn time(&self) -> TickTime {
        self.time
    }

    /// Engine tick number, starting at 1.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Whether the node currently running has not been ticked since it was built or reset.
    pub fn is_first_run(&self) -> bool {
        self.current
            .as_ref()
            .map_or(true, |cell| cell.status.get().is_none())
    }

    pub fn emit(&mut self, event: TraceEvent) {
        self.sink.emit(event);
    }

    pub(crate) fn trees(&self) -> &'a TreeRegistry<C> {
        self.trees
    }

    /// Writes `status` straight into the cached state of the nearest ancestor tagged `tag`.
    ///
    /// This is the only place one node mutates another's state. Returns `false` when no
    /// ancestor in the current tree carries the tag.
    pub(crate) fn complete_ancestor(&self, tag: &str, status: BtStatus) -> bool {
        let ancestor = self
            .current
            .as_ref()
            .and_then(|cell| cell.find_ancestor(tag));
        match ancestor {
            Some(cell) => {
                cell.status.set(Some(status));
                true
            }
            None => false,
        }
    }

    fn enter(&mut self, cell: &Rc<NodeCell>) -> Option<Rc<NodeCell>> {
        self.current.replace(Rc::clone(cell))
    }

    fn leave(&mut self, outer: Option<Rc<NodeCell>>) {
        self.current = outer;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use behave_core::{BtStatus, TickTime};
    use behave_tools::NullTraceSink;

    use super::{Node, TickScope};
    use crate::engine::TreeRegistry;

    /// Ticks a detached node against an empty registry.
    pub(crate) fn tick<C: 'static>(node: &mut Node<C>, context: &mut C, time: TickTime) -> BtStatus {
        let trees = TreeRegistry::default();
        let mut sink = NullTraceSink;
        let mut scope = TickScope::new(context, time, 1, &trees, &mut sink);
        node.tick(&mut scope)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::tick;
    use super::*;

    struct Counter {
        runs: u32,
        result: BtStatus,
    }

    impl BtNode<u32> for Counter {
        fn run(&mut self, scope: &mut TickScope<'_, u32>) -> BtStatus {
            self.runs += 1;
            *scope.context_mut() += 1;
            self.result
        }

        fn reset(&mut self, _mode: ResetMode) {
            self.runs = 0;
        }
    }

    #[test]
    fn completed_node_is_not_run_again() {
        let mut node = Node::new(Counter {
            runs: 0,
            result: BtStatus::Success,
        });
        let mut ctx = 0u32;

        assert!(node.is_first_run());
        assert_eq!(tick(&mut node, &mut ctx, TickTime::default()), BtStatus::Success);
        assert_eq!(tick(&mut node, &mut ctx, TickTime::default()), BtStatus::Success);
        assert_eq!(ctx, 1);
        assert_eq!(node.state(), Some(BtStatus::Success));
    }

    #[test]
    fn running_node_runs_every_tick() {
        let mut node = Node::new(Counter {
            runs: 0,
            result: BtStatus::Running,
        });
        let mut ctx = 0u32;

        for _ in 0..3 {
            assert_eq!(tick(&mut node, &mut ctx, TickTime::default()), BtStatus::Running);
        }
        assert_eq!(ctx, 3);
    }

    #[test]
    fn reset_clears_cached_state() {
        let mut node = Node::new(Counter {
            runs: 0,
            result: BtStatus::Failure,
        })
        .tagged("counter");
        let mut ctx = 0u32;

        tick(&mut node, &mut ctx, TickTime::default());
        node.reset();
        assert_eq!(node.state(), None);
        assert_eq!(node.tag().as_deref(), Some("counter"));

        assert_eq!(tick(&mut node, &mut ctx, TickTime::default()), BtStatus::Failure);
        assert_eq!(ctx, 2);
    }

    #[test]
    fn debug_output_names_the_node() {
        let mut node = Node::new(Counter {
            runs: 0,
            result: BtStatus::Success,
        })
        .tagged("counter");
        let mut ctx = 0u32;
        tick(&mut node, &mut ctx, TickTime::default());

        let text = format!("{node:?}");
        assert!(text.contains("Counter"), "{text}");
        assert!(text.contains("\"counter\""), "{text}");
        assert!(text.contains("Success"), "{text}");
    }
}
