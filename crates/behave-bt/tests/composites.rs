use behave_bt::builder::*;
use behave_bt::{Behavior, BtStatus, Node, TickTime};

#[derive(Debug, Default)]
struct Ctx {
    log: Vec<&'static str>,
}

fn step(name: &'static str, status: BtStatus) -> Node<Ctx> {
    action(move |ctx: &mut Ctx| {
        ctx.log.push(name);
        status
    })
}

fn behavior(children: Vec<Node<Ctx>>) -> Behavior<Ctx> {
    Behavior::new(Ctx::default(), [tree("Root", children)]).expect("single tree")
}

fn tick(behavior: &mut Behavior<Ctx>) -> BtStatus {
    behavior.tick(TickTime::default())
}

#[test]
fn sequence_stops_at_first_failure() {
    let mut b = behavior(vec![sequence(vec![
        step("a", BtStatus::Success),
        step("b", BtStatus::Failure),
        step("c", BtStatus::Success),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Failure);
    assert_eq!(b.context().log, vec!["a", "b"]);
}

#[test]
fn sequence_succeeds_when_all_succeed() {
    let mut b = behavior(vec![sequence(vec![
        step("a", BtStatus::Success),
        step("b", BtStatus::Success),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Success);
    assert_eq!(b.context().log, vec!["a", "b"]);
}

#[test]
fn sequence_resumes_at_running_child() {
    let mut calls = 0;
    let flaky = action(move |ctx: &mut Ctx| {
        ctx.log.push("b");
        calls += 1;
        if calls < 2 {
            BtStatus::Running
        } else {
            BtStatus::Success
        }
    });
    let mut b = behavior(vec![sequence(vec![step("a", BtStatus::Success), flaky])]);

    assert_eq!(tick(&mut b), BtStatus::Running);
    assert_eq!(tick(&mut b), BtStatus::Success);
    assert_eq!(b.context().log, vec!["a", "b", "b"]);
}

#[test]
fn fallback_stops_at_first_success() {
    let mut b = behavior(vec![fallback(vec![
        step("a", BtStatus::Failure),
        step("b", BtStatus::Success),
        step("c", BtStatus::Failure),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Success);
    assert_eq!(b.context().log, vec!["a", "b"]);
}

#[test]
fn fallback_fails_when_all_fail() {
    let mut b = behavior(vec![fallback(vec![
        step("a", BtStatus::Failure),
        step("b", BtStatus::Failure),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Failure);
    assert_eq!(b.context().log, vec!["a", "b"]);
}

#[test]
fn fallback_returns_running_child() {
    let mut b = behavior(vec![fallback(vec![
        step("a", BtStatus::Failure),
        step("b", BtStatus::Running),
        step("c", BtStatus::Success),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Running);
    assert_eq!(b.context().log, vec!["a", "b"]);
}

#[test]
fn parallel_fails_fast() {
    let mut b = behavior(vec![parallel(vec![
        step("a", BtStatus::Running),
        step("b", BtStatus::Failure),
        step("c", BtStatus::Success),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Failure);
    assert_eq!(b.context().log, vec!["a", "b"]);
}

#[test]
fn parallel_ticks_every_child_and_waits_for_all() {
    let mut remaining = 2;
    let slow = action(move |ctx: &mut Ctx| {
        ctx.log.push("slow");
        remaining -= 1;
        if remaining > 0 {
            BtStatus::Running
        } else {
            BtStatus::Success
        }
    });
    let mut b = behavior(vec![parallel(vec![step("fast", BtStatus::Success), slow])]);

    assert_eq!(tick(&mut b), BtStatus::Running);
    assert_eq!(tick(&mut b), BtStatus::Success);
    // The completed child answers from its cache on the second tick.
    assert_eq!(b.context().log, vec!["fast", "slow", "slow"]);
}

#[test]
fn race_first_success_wins_regardless_of_position() {
    let mut b = behavior(vec![race(vec![
        step("a", BtStatus::Failure),
        step("b", BtStatus::Failure),
        step("c", BtStatus::Success),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Success);
    assert_eq!(b.context().log, vec!["a", "b", "c"]);
}

#[test]
fn race_halts_on_running_child() {
    let mut b = behavior(vec![race(vec![
        step("a", BtStatus::Running),
        step("b", BtStatus::Success),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Running);
    assert_eq!(b.context().log, vec!["a"]);
}

#[test]
fn race_fails_when_all_fail() {
    let mut b = behavior(vec![race(vec![
        step("a", BtStatus::Failure),
        step("b", BtStatus::Failure),
    ])]);

    assert_eq!(tick(&mut b), BtStatus::Failure);
}

#[test]
fn completed_action_is_not_invoked_again() {
    let mut b = behavior(vec![parallel(vec![step("once", BtStatus::Success), run()])]);

    for _ in 0..5 {
        assert_eq!(tick(&mut b), BtStatus::Running);
    }
    assert_eq!(b.context().log, vec!["once"]);
}

#[test]
fn reset_reproduces_a_fresh_run() {
    let children = || {
        vec![fallback(vec![
            step("a", BtStatus::Failure),
            sequence(vec![step("b", BtStatus::Success), step("c", BtStatus::Running)]),
        ])]
    };
    let mut reused = behavior(children());
    let mut fresh = behavior(children());

    tick(&mut reused);
    tick(&mut reused);
    reused.reset();
    reused.context_mut().log.clear();

    for _ in 0..3 {
        assert_eq!(tick(&mut reused), tick(&mut fresh));
    }
    assert_eq!(reused.context().log, fresh.context().log);
}
