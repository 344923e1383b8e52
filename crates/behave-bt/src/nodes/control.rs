use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use behave_core::{BtStatus, Iterations};

use crate::node::{BtNode, Node, ResetMode, Tag, TickScope};
use crate::nodes::Sequence;

/// Runs its body (an implicit [`Sequence`]) a number of times.
///
/// Each successful pass restarts the body and reports `Running`; the node succeeds after
/// the last pass and fails as soon as a pass fails. `Iterations::Count(0)` succeeds
/// without ticking the body.
pub struct Repeat<C> {
    iterations: Iterations,
    remaining: Option<u32>,
    body: Node<C>,
}

impl<C: 'static> Repeat<C> {
    pub fn new(iterations: Iterations, body: Vec<Node<C>>) -> Self {
        Self {
            iterations,
            remaining: iterations.count(),
            body: Node::new(Sequence::new(body)),
        }
    }

    pub fn iterations(&self) -> Iterations {
        self.iterations
    }

    /// Passes still to run; `None` when repeating forever.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }
}

impl<C: 'static> BtNode<C> for Repeat<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        if self.remaining == Some(0) {
            return BtStatus::Success;
        }

        match self.body.tick(scope) {
            BtStatus::Success => {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                    if *remaining == 0 {
                        return BtStatus::Success;
                    }
                }
                self.body.restart();
                BtStatus::Running
            }
            status => status,
        }
    }

    fn reset(&mut self, _mode: ResetMode) {
        self.remaining = self.iterations.count();
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        visit(&mut self.body);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Repeat")
    }
}

/// Loops its body while `condition` holds.
///
/// The condition is re-evaluated every tick the loop is ticked, restarting it first if it
/// had succeeded. A failing condition ends the loop with success. A failing body fails the
/// loop; a succeeding body is restarted and the loop keeps running.
pub struct While<C> {
    condition: Node<C>,
    body: Node<C>,
}

impl<C: 'static> While<C> {
    pub fn new(condition: Node<C>, body: Vec<Node<C>>) -> Self {
        Self {
            condition,
            body: Node::new(Sequence::new(body)),
        }
    }
}

impl<C: 'static> BtNode<C> for While<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        if self.condition.state() == Some(BtStatus::Success) {
            self.condition.restart();
        }

        match self.condition.tick(scope) {
            BtStatus::Running => BtStatus::Running,
            BtStatus::Failure => BtStatus::Success,
            BtStatus::Success => match self.body.tick(scope) {
                BtStatus::Success => {
                    self.body.restart();
                    BtStatus::Running
                }
                status => status,
            },
        }
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        visit(&mut self.condition);
        visit(&mut self.body);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("While")
    }
}

/// A named top-level tree: its children run as a [`Sequence`].
///
/// Trees are registered with an engine and never attached under another node, which is
/// what keeps tag searches inside the tree they start in.
pub struct Tree<C> {
    name: String,
    body: Node<C>,
}

impl<C: 'static> Tree<C> {
    pub fn new(name: impl Into<String>, body: Vec<Node<C>>) -> Self {
        Self {
            name: name.into(),
            body: Node::new(Sequence::new(body)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<C: 'static> BtNode<C> for Tree<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        self.body.tick(scope)
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        visit(&mut self.body);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(format!("Tree({})", self.name))
    }
}

/// Ticks another registered tree by name.
///
/// The name is looked up on every tick, so trees may be registered in any order. An
/// unknown name fails, and so does a tree that is already being ticked further up the call
/// chain.
pub struct Subtree<C> {
    name: String,
    resolved: Weak<RefCell<Node<C>>>,
}

impl<C: 'static> Subtree<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: Weak::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<C: 'static> BtNode<C> for Subtree<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        let Some(tree) = scope.trees().get(&self.name) else {
            tracing::warn!(tree = %self.name, "subtree not registered");
            return BtStatus::Failure;
        };
        self.resolved = Rc::downgrade(tree);

        match tree.try_borrow_mut() {
            Ok(mut tree) => tree.tick(scope),
            Err(_) => {
                tracing::warn!(tree = %self.name, "subtree is already running, refusing to re-enter");
                BtStatus::Failure
            }
        }
    }

    // Loops restart their bodies through here, so the referenced tree has to start over too.
    fn reset(&mut self, mode: ResetMode) {
        if let Some(tree) = self.resolved.upgrade() {
            if let Ok(mut tree) = tree.try_borrow_mut() {
                tree.reset_with(mode);
            }
        }
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(format!("Subtree({})", self.name))
    }
}

/// Fails the nearest ancestor tagged `tag` and keeps running itself.
///
/// The ancestor reports the failure when its current tick returns. Fails when no ancestor
/// in the same tree carries the tag.
#[derive(Debug, Clone)]
pub struct FailParent {
    tag: Tag,
}

impl FailParent {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self { tag: tag.into() }
    }
}

impl<C: 'static> BtNode<C> for FailParent {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        if scope.complete_ancestor(&self.tag, BtStatus::Failure) {
            BtStatus::Running
        } else {
            tracing::warn!(tag = %self.tag, "no ancestor carries the tag");
            BtStatus::Failure
        }
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(format!("FailParent({})", self.tag))
    }
}

/// Succeeds the nearest ancestor tagged `tag`, and itself.
#[derive(Debug, Clone)]
pub struct SucceedParent {
    tag: Tag,
}

impl SucceedParent {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self { tag: tag.into() }
    }
}

impl<C: 'static> BtNode<C> for SucceedParent {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        if scope.complete_ancestor(&self.tag, BtStatus::Success) {
            BtStatus::Success
        } else {
            tracing::warn!(tag = %self.tag, "no ancestor carries the tag");
            BtStatus::Failure
        }
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(format!("SucceedParent({})", self.tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::testing::tick;
    use crate::nodes::{Action, Condition, Run, Succeed};
    use behave_core::TickTime;

    #[test]
    fn zero_count_repeat_succeeds_without_ticking() {
        let body = Node::new(Action::new(|runs: &mut u32| {
            *runs += 1;
            BtStatus::Success
        }));
        let mut node = Node::new(Repeat::new(Iterations::Count(0), vec![body]));
        let mut runs = 0;

        assert_eq!(tick(&mut node, &mut runs, TickTime::default()), BtStatus::Success);
        assert_eq!(runs, 0);
    }

    #[test]
    fn infinite_repeat_keeps_running() {
        let mut node = Node::new(Repeat::<()>::new(Iterations::Infinite, vec![Node::new(Succeed)]));
        for _ in 0..10 {
            assert_eq!(tick(&mut node, &mut (), TickTime::default()), BtStatus::Running);
        }
    }

    #[test]
    fn running_condition_keeps_loop_running() {
        let mut node = Node::new(While::<()>::new(Node::new(Run), vec![Node::new(Succeed)]));
        assert_eq!(tick(&mut node, &mut (), TickTime::default()), BtStatus::Running);
    }

    #[test]
    fn while_with_false_condition_succeeds() {
        let mut node = Node::new(While::<u32>::new(
            Node::new(Condition::new(|v: &u32| *v > 0)),
            vec![Node::new(Succeed)],
        ));
        assert_eq!(tick(&mut node, &mut 0, TickTime::default()), BtStatus::Success);
    }

    #[test]
    fn detached_subtree_fails() {
        let mut node = Node::new(Subtree::<()>::new("Elsewhere"));
        assert_eq!(tick(&mut node, &mut (), TickTime::default()), BtStatus::Failure);
    }

    #[test]
    fn tree_label_carries_name() {
        let node = Node::new(Tree::<()>::new("Patrol", vec![]));
        assert_eq!(node.label(), "Tree(Patrol)");
    }
}
