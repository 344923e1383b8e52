//! The arena: enemies spawn around the player, chase them down and trade blows until one
//! side falls. Every defeated enemy is recycled and a new one spawns; when the player falls
//! the last enemy celebrates and the behavior completes.

use behave_bt::builder::*;
use behave_bt::{BtStatus, BuildError, Node, Random, TickTime, Tree};
use behave_core::rng::derive_seed;
use behave_core::{DeterministicRng, SplitMix64};

const HEADINGS: [&str; 4] = ["north", "east", "south", "west"];

const PLAYER_HEALTH: i32 = 100;
const ENEMY_HEALTH: i32 = 50;
const ENEMY_SPEED: f64 = 4.0;
const STRIKE_RANGE: f64 = 1.0;

#[derive(Debug)]
pub struct Arena {
    rng: SplitMix64,
    pub in_play: bool,
    pub player_health: i32,
    pub enemy_health: i32,
    pub distance: f64,
    pub heading: &'static str,
    pub spawned: u32,
    pub defeated: u32,
}

impl Arena {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
            in_play: true,
            player_health: PLAYER_HEALTH,
            enemy_health: 0,
            distance: 0.0,
            heading: HEADINGS[0],
            spawned: 0,
            defeated: 0,
        }
    }

    pub fn player_alive(&self) -> bool {
        self.player_health > 0
    }

    pub fn enemy_alive(&self) -> bool {
        self.enemy_health > 0
    }
}

/// Every tree of the arena behavior. `seed` fixes the outcome of each strike.
pub fn trees(seed: u64) -> Result<Vec<Tree<Arena>>, BuildError> {
    Ok(vec![root(), chase(seed)?, die(), player_died()])
}

fn root() -> Tree<Arena> {
    tree(
        "Root",
        vec![while_loop(
            condition(|arena: &Arena| arena.in_play),
            vec![fallback(vec![
                sequence(vec![acquire_spawn_direction(), spawn(), subtree("Chase")]),
                subtree("Player Died"),
            ])],
        )],
    )
}

fn chase(seed: u64) -> Result<Tree<Arena>, BuildError> {
    let exchange = vec![chase_player(), strike(seed)?, take_return_fire(), wait(0.25)];
    Ok(tree(
        "Chase",
        vec![
            while_loop(
                condition(|arena: &Arena| arena.enemy_alive() && arena.player_alive()),
                exchange,
            ),
            condition(Arena::player_alive),
            subtree("Die"),
        ],
    ))
}

fn die() -> Tree<Arena> {
    tree(
        "Die",
        vec![
            log_with(|arena: &Arena| format!("enemy from the {} is down", arena.heading)),
            action(|arena: &mut Arena| {
                arena.defeated += 1;
                BtStatus::Success
            }),
            wait(1.0),
            log("sinking below ground"),
            action(|arena: &mut Arena| {
                arena.distance = 0.0;
                BtStatus::Success
            }),
        ],
    )
}

fn player_died() -> Tree<Arena> {
    tree(
        "Player Died",
        vec![
            log("the player has fallen"),
            repeat(3, vec![log("celebrating"), wait_ticks(10)]),
            action(|arena: &mut Arena| {
                arena.in_play = false;
                BtStatus::Success
            }),
        ],
    )
}

fn acquire_spawn_direction() -> Node<Arena> {
    action(|arena: &mut Arena| {
        let i = arena.rng.below(HEADINGS.len());
        arena.heading = HEADINGS[i];
        BtStatus::Success
    })
}

fn spawn() -> Node<Arena> {
    sequence(vec![
        action(|arena: &mut Arena| {
            arena.enemy_health = ENEMY_HEALTH;
            arena.distance = 5.0 + arena.rng.next_f64_unit() * 10.0;
            arena.spawned += 1;
            BtStatus::Success
        }),
        log_with(|arena: &Arena| {
            format!(
                "enemy #{} spawned {:.1}m to the {}",
                arena.spawned, arena.distance, arena.heading
            )
        }),
    ])
}

fn chase_player() -> Node<Arena> {
    action_with_time(|arena: &mut Arena, time: &TickTime| {
        arena.distance = (arena.distance - ENEMY_SPEED * time.elapsed).max(0.0);
        if arena.distance <= STRIKE_RANGE {
            BtStatus::Success
        } else {
            BtStatus::Running
        }
    })
}

/// Three strikes in four land. The pick is redrawn every exchange.
fn strike(seed: u64) -> Result<Node<Arena>, BuildError> {
    let hit = sequence(vec![
        action(|arena: &mut Arena| {
            arena.player_health -= 10;
            BtStatus::Success
        }),
        log_with(|arena: &Arena| format!("hit! player health {}", arena.player_health)),
    ]);
    let miss = log("missed");
    let pick = Random::weighted(vec![3.0, 1.0], vec![hit, miss])?.with_seed(derive_seed(seed, 1));
    Ok(Node::new(pick))
}

fn take_return_fire() -> Node<Arena> {
    action(|arena: &mut Arena| {
        arena.enemy_health -= 25;
        BtStatus::Success
    })
}
