use behave_bt::builder::*;
use behave_bt::{
    Behavior, BehaviorConfig, BtStatus, BuildError, Iterations, Node, SharedTraceSink, TickTime,
    VecTraceSink, COMPLETED_EVENT, LOG_EVENT,
};

#[derive(Debug, Default)]
struct Agent {
    health: i32,
    steps: u32,
}

fn step() -> Node<Agent> {
    action(|agent: &mut Agent| {
        agent.steps += 1;
        BtStatus::Success
    })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("behave=trace")
        .with_test_writer()
        .try_init();
}

#[test]
fn state_is_unset_before_first_tick() {
    let b = Behavior::new(Agent::default(), [tree("Root", vec![step()])]).expect("single tree");
    assert_eq!(b.state(), None);
    assert_eq!(b.tick_count(), 0);
    assert_eq!(b.root_name(), "Root");
}

#[test]
fn completed_state_is_cached() {
    let mut b = Behavior::new(Agent::default(), [tree("Root", vec![step()])]).expect("single tree");

    assert_eq!(b.tick(TickTime::default()), BtStatus::Success);
    assert_eq!(b.tick(TickTime::default()), BtStatus::Success);
    assert_eq!(b.tick(TickTime::default()), BtStatus::Success);
    assert_eq!(b.context().steps, 1);
    assert_eq!(b.tick_count(), 1);
    assert_eq!(b.state(), Some(BtStatus::Success));
}

#[test]
fn reset_runs_the_root_again() {
    let mut b = Behavior::new(Agent::default(), [tree("Root", vec![step()])]).expect("single tree");

    b.tick(TickTime::default());
    b.reset();
    assert_eq!(b.state(), None);
    assert_eq!(b.tree_state("Root"), None);

    assert_eq!(b.tick(TickTime::default()), BtStatus::Success);
    assert_eq!(b.context().steps, 2);
}

#[test]
fn missing_root_is_replaced_by_a_failing_tree() {
    init_tracing();
    let mut b = Behavior::new(Agent::default(), [tree("Patrol", vec![step()])]).expect("single tree");

    assert_eq!(b.tick(TickTime::default()), BtStatus::Failure);
    assert_eq!(b.context().steps, 0);
    assert!(!b.trees().contains("Root"));
}

#[test]
fn duplicate_tree_names_are_rejected() {
    let err = Behavior::new(
        Agent::default(),
        [tree("Root", vec![step()]), tree("Root", vec![fail()])],
    )
    .err();

    assert_eq!(err, Some(BuildError::DuplicateTree("Root".to_string())));
}

#[test]
fn custom_root_and_config() {
    let config = BehaviorConfig {
        root: "Main".to_string(),
        iterations: Iterations::Count(3),
    };
    let mut b = Behavior::builder(Agent::default())
        .config(config)
        .tree(tree("Main", vec![step()]))
        .tree(tree("Unused", vec![fail()]))
        .build()
        .expect("distinct names");

    assert_eq!(b.root_name(), "Main");
    assert_eq!(b.iterations(), Iterations::Count(3));
    assert_eq!(b.trees().names().collect::<Vec<_>>(), vec!["Main", "Unused"]);

    while b.tick(TickTime::default()).is_running() {}
    assert_eq!(b.context().steps, 3);
    assert_eq!(b.tree_state("Unused"), None);
}

#[test]
fn context_is_returned_to_the_host() {
    let drain = action(|agent: &mut Agent| {
        agent.health -= 10;
        BtStatus::Success
    });
    let mut b = Behavior::builder(Agent {
        health: 30,
        steps: 0,
    })
    .iterations(Iterations::Infinite)
    .tree(tree("Root", vec![drain]))
    .build()
    .expect("single tree");

    for _ in 0..3 {
        b.tick(TickTime::default());
    }
    b.context_mut().steps = 7;

    let agent = b.into_context();
    assert_eq!(agent.health, 0);
    assert_eq!(agent.steps, 7);
}

#[test]
fn action_sees_tick_time() {
    let timed = action_with_time(|agent: &mut Agent, time: &TickTime| {
        agent.steps = (time.elapsed * 1000.0).round() as u32;
        BtStatus::Success
    });
    let mut b = Behavior::new(Agent::default(), [tree("Root", vec![timed])]).expect("single tree");

    b.tick(TickTime::from_elapsed(0.25));
    assert_eq!(b.context().steps, 250);
}

#[test]
fn log_messages_reach_the_sink() {
    init_tracing();
    let sink = SharedTraceSink::new();
    let recorded = sink.log();
    let mut b = Behavior::builder(Agent {
        health: 5,
        steps: 0,
    })
    .tree(tree(
        "Root",
        vec![
            log("spawned"),
            log_with(|agent: &Agent| format!("health={}", agent.health)),
        ],
    ))
    .sink(Box::new(sink))
    .build()
    .expect("single tree");

    assert_eq!(b.tick(TickTime::default()), BtStatus::Success);
    b.tick(TickTime::default());

    let recorded = recorded.borrow();
    assert_eq!(recorded.messages(LOG_EVENT), vec!["spawned", "health=5"]);
    assert_eq!(recorded.messages(COMPLETED_EVENT), vec!["Success"]);
    assert!(recorded.events.iter().all(|e| e.tick == 1));
}

#[test]
fn vec_sink_is_accepted() {
    let mut b = Behavior::builder(Agent::default())
        .tree(tree("Root", vec![log("hello")]))
        .sink(Box::new(VecTraceSink::default()))
        .build()
        .expect("single tree");

    assert_eq!(b.tick(TickTime::default()), BtStatus::Success);
}
