//! Tree registry and root driver.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use behave_core::{BehaviorConfig, BtStatus, Iterations, TickTime};
use behave_tools::{NullTraceSink, TraceEvent, TraceSink};

use crate::error::BuildError;
use crate::node::{BtNode, Node, ResetMode, TickScope};
use crate::nodes::{Fail, Repeat, Tree};

/// Trace tag emitted once when the engine completes.
pub const COMPLETED_EVENT: &str = "behave.completed";

/// A registered tree. Shared so `Subtree` nodes can reach it while another tree is ticking.
pub type SharedTree<C> = Rc<RefCell<Node<C>>>;

/// Named trees owned by an engine.
pub struct TreeRegistry<C> {
    trees: BTreeMap<String, SharedTree<C>>,
}

impl<C> Default for TreeRegistry<C> {
    fn default() -> Self {
        Self {
            trees: BTreeMap::new(),
        }
    }
}

impl<C: 'static> TreeRegistry<C> {
    pub fn get(&self, name: &str) -> Option<&SharedTree<C>> {
        self.trees.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.trees.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Tree names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    fn insert(&mut self, tree: Tree<C>) -> Result<(), BuildError> {
        let name = tree.name().to_string();
        if self.trees.contains_key(&name) {
            return Err(BuildError::DuplicateTree(name));
        }
        self.trees
            .insert(name, Rc::new(RefCell::new(Node::new(tree))));
        Ok(())
    }

    fn reset_all(&self, mode: ResetMode) {
        for tree in self.trees.values() {
            tree.borrow_mut().reset_with(mode);
        }
    }
}

/// Ticks the root tree from inside the engine's repeater.
///
/// The tree is not attached as a child, so tag searches started inside it stop at the tree.
struct RootLink<C> {
    tree: SharedTree<C>,
}

impl<C: 'static> BtNode<C> for RootLink<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        match self.tree.try_borrow_mut() {
            Ok(mut tree) => tree.tick(scope),
            Err(_) => BtStatus::Failure,
        }
    }

    fn reset(&mut self, mode: ResetMode) {
        if let Ok(mut tree) = self.tree.try_borrow_mut() {
            tree.reset_with(mode);
        }
    }

    fn label(&self) -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Borrowed("RootLink")
    }
}

/// A behavior: the named trees of one agent, the context they act on, and the overall
/// completion state of the root.
///
/// The host calls [`Behavior::tick`] once per frame. Once the root has completed the
/// configured number of iterations the result is cached until [`Behavior::reset`].
pub struct Behavior<C: 'static> {
    context: C,
    trees: TreeRegistry<C>,
    root_name: String,
    iterations: Iterations,
    repeater: Node<C>,
    state: Option<BtStatus>,
    ticks: u64,
    sink: Box<dyn TraceSink>,
}

impl<C: 'static> Behavior<C> {
    pub fn builder(context: C) -> BehaviorBuilder<C> {
        BehaviorBuilder::new(context)
    }

    /// Behavior with the default root name ("Root") running it once.
    pub fn new(context: C, trees: impl IntoIterator<Item = Tree<C>>) -> Result<Self, BuildError> {
        trees
            .into_iter()
            .fold(Self::builder(context), BehaviorBuilder::tree)
            .build()
    }

    /// Overall state; `None` until the first tick and after a reset.
    pub fn state(&self) -> Option<BtStatus> {
        self.state
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    pub fn trees(&self) -> &TreeRegistry<C> {
        &self.trees
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn iterations(&self) -> Iterations {
        self.iterations
    }

    /// Number of ticks that did work since construction or the last reset.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Cached state of a registered tree; `None` if unknown, not started, or mid-tick.
    pub fn tree_state(&self, name: &str) -> Option<BtStatus> {
        let tree = self.trees.get(name)?;
        let tree = tree.try_borrow().ok()?;
        tree.state()
    }

    pub fn tick(&mut self, time: TickTime) -> BtStatus {
        if let Some(done) = self.state.filter(|s| s.is_done()) {
            return done;
        }

        self.ticks += 1;
        let status = {
            let mut scope = TickScope::new(
                &mut self.context,
                time,
                self.ticks,
                &self.trees,
                self.sink.as_mut(),
            );
            self.repeater.tick(&mut scope)
        };

        if status.is_done() {
            tracing::debug!(root = %self.root_name, tick = self.ticks, ?status, "behavior completed");
            self.sink.emit(
                TraceEvent::new(self.ticks, COMPLETED_EVENT).with_message(format!("{status:?}")),
            );
        }
        self.state = Some(status);
        status
    }

    /// Clears the overall state and resets every registered tree.
    pub fn reset(&mut self) {
        tracing::debug!(root = %self.root_name, "behavior reset");
        self.state = None;
        self.ticks = 0;
        self.repeater.reset();
        self.trees.reset_all(ResetMode::Explicit);
    }
}

pub struct BehaviorBuilder<C: 'static> {
    context: C,
    config: BehaviorConfig,
    trees: Vec<Tree<C>>,
    sink: Option<Box<dyn TraceSink>>,
}

impl<C: 'static> BehaviorBuilder<C> {
    pub fn new(context: C) -> Self {
        Self {
            context,
            config: BehaviorConfig::default(),
            trees: Vec::new(),
            sink: None,
        }
    }

    pub fn config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.config.root = name.into();
        self
    }

    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.config.iterations = iterations;
        self
    }

    pub fn tree(mut self, tree: Tree<C>) -> Self {
        self.trees.push(tree);
        self
    }

    /// Receives `Log` node messages and completion events.
    pub fn sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Fails only on duplicate tree names. A missing root is replaced by a tree that
    /// always fails, so the result is always tickable.
    pub fn build(self) -> Result<Behavior<C>, BuildError> {
        let BehaviorConfig { root, iterations } = self.config;

        let mut trees = TreeRegistry::default();
        for tree in self.trees {
            trees.insert(tree)?;
        }

        let root_tree = match trees.get(&root) {
            Some(tree) => Rc::clone(tree),
            None => {
                tracing::warn!(root = %root, "root tree not registered, substituting a failing root");
                let fallback = Tree::new(root.clone(), vec![Node::new(Fail)]);
                Rc::new(RefCell::new(Node::new(fallback)))
            }
        };
        let repeater = Node::new(Repeat::new(
            iterations,
            vec![Node::new(RootLink { tree: root_tree })],
        ));

        Ok(Behavior {
            context: self.context,
            trees,
            root_name: root,
            iterations,
            repeater,
            state: None,
            ticks: 0,
            sink: self.sink.unwrap_or_else(|| Box::new(NullTraceSink)),
        })
    }
}
