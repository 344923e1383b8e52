use std::borrow::Cow;

use behave_core::BtStatus;

use crate::node::{BtNode, Node, TickScope};

/// Ticks children in order until one reports something other than `pass`, and returns it.
///
/// Completed children answer from their cache, so a scan resumes at the child that was
/// running on the previous tick.
fn scan<C: 'static>(children: &mut [Node<C>], scope: &mut TickScope<'_, C>, pass: BtStatus) -> BtStatus {
    for child in children.iter_mut() {
        let status = child.tick(scope);
        if status != pass {
            return status;
        }
    }
    pass
}

macro_rules! composite {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<C> {
            children: Vec<Node<C>>,
        }

        impl<C: 'static> $name<C> {
            pub fn new(children: Vec<Node<C>>) -> Self {
                Self { children }
            }

            pub fn len(&self) -> usize {
                self.children.len()
            }

            pub fn is_empty(&self) -> bool {
                self.children.is_empty()
            }
        }
    };
}

composite! {
    /// AND: fails or runs at the first child that does, succeeds when all children succeed.
    Sequence
}

composite! {
    /// OR: succeeds or runs at the first child that does, fails when all children fail.
    Fallback
}

composite! {
    /// Ticks every child each tick. Fails at the first failure without ticking the rest
    /// of the pass, runs while any child runs, and succeeds once all have succeeded.
    Parallel
}

composite! {
    /// The first child to succeed wins. A running child halts the scan for this tick.
    Race
}

impl<C: 'static> BtNode<C> for Sequence<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        scan(&mut self.children, scope, BtStatus::Success)
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        self.children.iter_mut().for_each(visit);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Sequence")
    }
}

impl<C: 'static> BtNode<C> for Fallback<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        scan(&mut self.children, scope, BtStatus::Failure)
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        self.children.iter_mut().for_each(visit);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Fallback")
    }
}

impl<C: 'static> BtNode<C> for Parallel<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        let mut running = false;
        for child in self.children.iter_mut() {
            match child.tick(scope) {
                BtStatus::Failure => return BtStatus::Failure,
                BtStatus::Running => running = true,
                BtStatus::Success => {}
            }
        }
        if running {
            BtStatus::Running
        } else {
            BtStatus::Success
        }
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        self.children.iter_mut().for_each(visit);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Parallel")
    }
}

// Same scan as Fallback: failures are skipped, the first success or running child decides.
impl<C: 'static> BtNode<C> for Race<C> {
    fn run(&mut self, scope: &mut TickScope<'_, C>) -> BtStatus {
        scan(&mut self.children, scope, BtStatus::Failure)
    }

    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut Node<C>)) {
        self.children.iter_mut().for_each(visit);
    }

    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("Race")
    }
}
