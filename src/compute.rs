/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Lifecycle notifications are appended to `state.events`;
/// the shell drains them with `take_events` after each call.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::Config;
use crate::entities::{
    Command, GameCondition, GameEvent, GameState, HitKind, Key, Obstacle, ObstacleKind,
    ObstaclePair, Player, SafeZone,
};
use crate::timer::Timer;

// ── Constructors ─────────────────────────────────────────────────────────────

fn start_player(config: &Config) -> Player {
    Player {
        x: config.player_start_x(),
        y: config.player_start_y(),
        velocity_y: 0,
        width: config.player_width,
        height: config.player_height,
    }
}

/// Safe zone when no obstacle is beside the player: the whole field.
pub fn full_field_zone(config: &Config) -> SafeZone {
    SafeZone {
        upper: 0,
        lower: config.floor_y(),
    }
}

/// Build the initial state.  The outbox starts with `WaitingToStart` so the
/// shell lays out its first screen through the normal event path.
pub fn init_state(config: Config) -> GameState {
    GameState {
        player: start_player(&config),
        pairs: VecDeque::with_capacity(config.max_pairs),
        safe_zone: full_field_zone(&config),
        score: 0,
        condition: GameCondition::WaitingToStart,
        tick_timer: Timer::new(config.tick_period_ms),
        spawn_timer: Timer::new(config.spawn_period_ms),
        events: vec![GameEvent::WaitingToStart],
        frame: 0,
        config,
    }
}

/// Hand pending lifecycle events to the caller, oldest first.
pub fn take_events(state: &mut GameState) -> Vec<GameEvent> {
    std::mem::take(&mut state.events)
}

/// Every obstacle in spawn order, upper before lower within a pair.
pub fn obstacles(state: &GameState) -> impl Iterator<Item = &Obstacle> {
    state.pairs.iter().flat_map(|p| [&p.upper, &p.lower])
}

// ── Lifecycle transitions ────────────────────────────────────────────────────

pub fn start_game(state: &GameState) -> GameState {
    if state.condition != GameCondition::WaitingToStart {
        return state.clone();
    }
    let mut next = state.clone();
    next.spawn_timer.start();
    next.tick_timer.start();
    next.condition = GameCondition::Starting;
    next.events.push(GameEvent::Started);
    log::info!("game started");
    next
}

fn stop_game(state: &GameState, hit: HitKind) -> GameState {
    let mut next = state.clone();
    next.spawn_timer.stop();
    next.tick_timer.stop();
    next.condition = GameCondition::GameOver;
    next.events.push(GameEvent::GameOver);
    log::info!("game over ({:?}) with score {}", hit, next.score);
    next
}

pub fn restart_game(state: &GameState) -> GameState {
    if state.condition != GameCondition::GameOver {
        return state.clone();
    }
    let mut next = state.clone();
    next.player = start_player(&state.config);
    next.safe_zone = full_field_zone(&state.config);
    next.score = 0;
    next.pairs.clear();
    next.condition = GameCondition::WaitingToStart;
    next.events.push(GameEvent::Restarted);
    log::info!("game restarted");
    next
}

/// Timers are left running; the next tick halts the spawner.
pub fn pause_game(state: &GameState) -> GameState {
    if !is_active(state.condition) {
        return state.clone();
    }
    let mut next = state.clone();
    next.condition = GameCondition::Paused;
    next.events.push(GameEvent::Paused);
    log::info!("game paused at score {}", next.score);
    next
}

pub fn continue_game(state: &GameState) -> GameState {
    if state.condition != GameCondition::Paused {
        return state.clone();
    }
    let mut next = state.clone();
    next.spawn_timer.start();
    next.tick_timer.start();
    next.condition = GameCondition::Playing;
    next.events.push(GameEvent::ScoreUpdated(next.score));
    next.events.push(GameEvent::Continued);
    log::info!("game continued");
    next
}

/// Flap: velocity is overwritten, not accumulated.
pub fn impulse(state: &GameState) -> GameState {
    if !is_active(state.condition) {
        return state.clone();
    }
    GameState {
        player: Player {
            velocity_y: state.config.impulse_velocity,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn apply_command(state: &GameState, command: Command) -> GameState {
    match command {
        Command::Start => start_game(state),
        Command::Restart => restart_game(state),
        Command::Pause => pause_game(state),
        Command::Continue => continue_game(state),
        Command::Impulse => impulse(state),
        Command::None => state.clone(),
    }
}

/// Translate a key press into a command for the current condition.
pub fn command_for_key(condition: GameCondition, key: Key) -> Command {
    match (condition, key) {
        (GameCondition::WaitingToStart, Key::Confirm) => Command::Start,
        (GameCondition::Starting | GameCondition::Playing, Key::Confirm) => Command::Impulse,
        (GameCondition::Starting | GameCondition::Playing, Key::Pause) => Command::Pause,
        (GameCondition::GameOver, Key::Restart) => Command::Restart,
        (GameCondition::Paused, Key::Pause) => Command::Continue,
        _ => Command::None,
    }
}

pub fn handle_key(state: &GameState, key: Key) -> GameState {
    apply_command(state, command_for_key(state.condition, key))
}

fn is_active(condition: GameCondition) -> bool {
    matches!(condition, GameCondition::Starting | GameCondition::Playing)
}

// ── Obstacle spawner ─────────────────────────────────────────────────────────

/// Append one upper/lower pair at the right edge of the field.  The oldest
/// pair is dropped first if the queue is already full.
pub fn place_pair(state: &GameState, rng: &mut impl Rng) -> GameState {
    let cfg = &state.config;
    let offset = rng.gen_range(0..(cfg.obstacle_height / 2).max(1));
    let upper_y = -cfg.obstacle_height / 4 - offset;
    let lower_y = upper_y + cfg.gap_height + cfg.obstacle_height;

    let obstacle = |y: i32, kind: ObstacleKind| Obstacle {
        x: cfg.field_width,
        y,
        width: cfg.obstacle_width,
        height: cfg.obstacle_height,
        velocity_x: cfg.obstacle_velocity,
        kind,
    };
    let pair = ObstaclePair {
        upper: obstacle(upper_y, ObstacleKind::Upper),
        lower: obstacle(lower_y, ObstacleKind::Lower),
        passed: false,
    };

    let mut next = state.clone();
    if next.pairs.len() >= cfg.max_pairs {
        next.pairs.pop_front();
        log::debug!("obstacle queue full, dropped oldest pair");
    }
    next.pairs.push_back(pair);
    log::debug!("obstacle pair spawned, gap top at y={}", upper_y + cfg.obstacle_height);
    next
}

/// Spawn-timer callback.  The first firing after a start moves the game
/// from `Starting` to `Playing`.
pub fn spawn_tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    match state.condition {
        GameCondition::Starting => {
            let mut next = state.clone();
            next.condition = GameCondition::Playing;
            next.events.push(GameEvent::ScoreUpdated(next.score));
            place_pair(&next, rng)
        }
        GameCondition::Playing => place_pair(state, rng),
        _ => {
            let mut next = state.clone();
            next.spawn_timer.stop();
            next
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Compare the player's row against the current safe zone.
pub fn check_hit(state: &GameState) -> HitKind {
    let y = state.player.y;
    if y < state.safe_zone.upper {
        HitKind::HitTop
    } else if y > state.safe_zone.lower {
        HitKind::HitBottom
    } else {
        HitKind::Unhit
    }
}

/// Tick-timer callback.  Only `Starting` and `Playing` move the world;
/// any other condition halts the spawner.
pub fn tick(state: &GameState) -> GameState {
    let mut next = if is_active(state.condition) {
        move_world(state)
    } else {
        let mut next = state.clone();
        next.spawn_timer.stop();
        next
    };
    next.frame += 1;
    next
}

fn move_world(state: &GameState) -> GameState {
    let cfg = &state.config;
    let mut next = state.clone();

    // ── 1. Gravity, then velocity; never above the top edge ──────────────────
    next.player.velocity_y += cfg.gravity;
    next.player.y = (next.player.y + next.player.velocity_y).max(0);

    // ── 2. Drop pairs that have fully left the field ────────────────────────
    while next.pairs.front().is_some_and(|p| p.right() < 0) {
        next.pairs.pop_front();
        log::debug!("obstacle pair scrolled off, {} left", next.pairs.len());
    }

    // ── 3. Scroll ────────────────────────────────────────────────────────────
    for pair in next.pairs.iter_mut() {
        pair.upper.x -= pair.upper.velocity_x;
        pair.lower.x -= pair.lower.velocity_x;
    }

    // ── 4. Safe zone from the pair beside the player ────────────────────────
    let player_left = next.player.x;
    let player_right = next.player.x + next.player.width;
    let mut zone = full_field_zone(cfg);
    let mut passed_now: u32 = 0;

    for pair in next.pairs.iter_mut() {
        if !pair.passed && pair.right() <= player_left {
            pair.passed = true;
            passed_now += 1;
        } else if pair.left() <= player_right && pair.right() > player_left {
            zone = SafeZone {
                upper: pair.upper.y + pair.upper.height,
                lower: pair.lower.y - next.player.height,
            };
        }
    }
    next.safe_zone = zone;

    // ── 5. Collision, else score ─────────────────────────────────────────────
    let hit = check_hit(&next);
    if hit != HitKind::Unhit {
        return stop_game(&next, hit);
    }
    if passed_now > 0 {
        next.score += passed_now;
        next.events.push(GameEvent::ScoreUpdated(next.score));
    }
    next
}

// ── Scheduler ────────────────────────────────────────────────────────────────

/// Feed `dt_ms` of wall time to both timers and run their callbacks.
/// Spawn firings are handled before tick firings.
pub fn advance(state: &GameState, dt_ms: u64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();

    let spawns = next.spawn_timer.advance(dt_ms);
    for _ in 0..spawns {
        if !next.spawn_timer.is_running() {
            break;
        }
        next = spawn_tick(&next, rng);
    }

    let ticks = next.tick_timer.advance(dt_ms);
    for _ in 0..ticks {
        if !next.tick_timer.is_running() {
            break;
        }
        next = tick(&next);
    }

    next
}
