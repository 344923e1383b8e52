//! Free functions for assembling trees without naming every node type.
//!
//! ```
//! use behave_bt::builder::*;
//! use behave_bt::{Behavior, BtStatus, TickTime};
//!
//! let root = tree(
//!     "Root",
//!     vec![
//!         condition(|hp: &u32| *hp > 0),
//!         action(|hp: &mut u32| {
//!             *hp -= 1;
//!             BtStatus::Success
//!         }),
//!     ],
//! );
//! let mut behavior = Behavior::new(3u32, [root]).unwrap();
//! assert_eq!(behavior.tick(TickTime::default()), BtStatus::Success);
//! assert_eq!(*behavior.context(), 2);
//! ```

use behave_core::{BtStatus, Iterations, TickTime};

use crate::error::Result;
use crate::node::{Node, Tag};
use crate::nodes::{
    Action, Condition, Cooldown, Fail, FailParent, Fallback, Log, Mute, Not, Parallel, Race,
    Random, Repeat, Retry, Run, Sequence, Subtree, Succeed, SucceedParent, Timeout, Tree, Wait,
    While,
};

pub fn tree<C: 'static>(name: impl Into<String>, children: Vec<Node<C>>) -> Tree<C> {
    Tree::new(name, children)
}

pub fn sequence<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Node::new(Sequence::new(children))
}

pub fn fallback<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Node::new(Fallback::new(children))
}

pub fn parallel<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Node::new(Parallel::new(children))
}

pub fn race<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Node::new(Race::new(children))
}

pub fn action<C: 'static>(f: impl FnMut(&mut C) -> BtStatus + 'static) -> Node<C> {
    Node::new(Action::new(f))
}

pub fn action_with_time<C: 'static>(
    f: impl FnMut(&mut C, &TickTime) -> BtStatus + 'static,
) -> Node<C> {
    Node::new(Action::with_time(f))
}

pub fn condition<C: 'static>(predicate: impl FnMut(&C) -> bool + 'static) -> Node<C> {
    Node::new(Condition::new(predicate))
}

pub fn log<C: 'static>(message: impl Into<String>) -> Node<C> {
    Node::new(Log::new(message))
}

pub fn log_with<C: 'static>(message: impl FnMut(&C) -> String + 'static) -> Node<C> {
    Node::new(Log::with(message))
}

pub fn succeed<C: 'static>() -> Node<C> {
    Node::new(Succeed)
}

pub fn fail<C: 'static>() -> Node<C> {
    Node::new(Fail)
}

pub fn run<C: 'static>() -> Node<C> {
    Node::new(Run)
}

pub fn not<C: 'static>(child: Node<C>) -> Node<C> {
    Node::new(Not::new(child))
}

pub fn mute<C: 'static>(child: Node<C>) -> Node<C> {
    Node::new(Mute::new(child))
}

pub fn retry<C: 'static>(max_attempts: u32, child: Node<C>) -> Node<C> {
    Node::new(Retry::new(max_attempts, child))
}

pub fn cooldown<C: 'static>(seconds: f64, child: Node<C>) -> Node<C> {
    Node::new(Cooldown::new(seconds, child))
}

pub fn timeout<C: 'static>(seconds: f64, child: Node<C>) -> Node<C> {
    Node::new(Timeout::new(seconds, child))
}

pub fn wait<C: 'static>(seconds: f64) -> Node<C> {
    Node::new(Wait::seconds(seconds))
}

pub fn wait_ticks<C: 'static>(ticks: u32) -> Node<C> {
    Node::new(Wait::ticks(ticks))
}

pub fn repeat<C: 'static>(count: u32, body: Vec<Node<C>>) -> Node<C> {
    Node::new(Repeat::new(Iterations::Count(count), body))
}

pub fn repeat_forever<C: 'static>(body: Vec<Node<C>>) -> Node<C> {
    Node::new(Repeat::new(Iterations::Infinite, body))
}

pub fn while_loop<C: 'static>(condition: Node<C>, body: Vec<Node<C>>) -> Node<C> {
    Node::new(While::new(condition, body))
}

pub fn subtree<C: 'static>(name: impl Into<String>) -> Node<C> {
    Node::new(Subtree::new(name))
}

pub fn fail_parent<C: 'static>(tag: impl Into<Tag>) -> Node<C> {
    Node::new(FailParent::new(tag))
}

pub fn succeed_parent<C: 'static>(tag: impl Into<Tag>) -> Node<C> {
    Node::new(SucceedParent::new(tag))
}

pub fn random<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Node::new(Random::new(children))
}

/// Fails on a weight count that does not match `children`, or on a negative or non-finite
/// weight.
pub fn random_weighted<C: 'static>(weights: Vec<f64>, children: Vec<Node<C>>) -> Result<Node<C>> {
    Ok(Node::new(Random::weighted(weights, children)?))
}
