/// All game entity types — pure data, no logic.

use std::collections::VecDeque;

use crate::config::Config;
use crate::timer::Timer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCondition {
    WaitingToStart,
    /// Running, but no obstacle has appeared yet ("Get Ready?").
    Starting,
    Playing,
    GameOver,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    Unhit,
    HitTop,
    HitBottom,
}

// ── Lifecycle events & commands ───────────────────────────────────────────────

/// Notifications recorded by the core on state transitions, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    WaitingToStart,
    ScoreUpdated(u32),
    GameOver,
    Restarted,
    Paused,
    Continued,
}

/// Operations the shell may request.  Invalid ones for the current
/// condition are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    Pause,
    Continue,
    Impulse,
    None,
}

/// Keys the core understands, already decoded by the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Confirm,
    Pause,
    Restart,
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Upper,
    Lower,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Leftward scroll per tick.
    pub velocity_x: i32,
    pub kind: ObstacleKind,
}

/// An upper and a lower obstacle spawned together around one gap.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstaclePair {
    pub upper: Obstacle,
    pub lower: Obstacle,
    /// Set once the player has cleared the pair, so it scores only once.
    pub passed: bool,
}

impl ObstaclePair {
    pub fn left(&self) -> i32 {
        self.upper.x
    }

    pub fn right(&self) -> i32 {
        self.upper.x + self.upper.width
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub velocity_y: i32,
    pub width: i32,
    pub height: i32,
}

/// Vertical range the player may occupy without a collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafeZone {
    pub upper: i32,
    pub lower: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: Config,
    pub player: Player,
    /// Live obstacle pairs in spawn order.  Never longer than
    /// `config.max_pairs`; pairs are popped once fully off screen.
    pub pairs: VecDeque<ObstaclePair>,
    pub safe_zone: SafeZone,
    pub score: u32,
    pub condition: GameCondition,
    pub tick_timer: Timer,
    pub spawn_timer: Timer,
    /// Lifecycle events not yet consumed by the shell.
    pub events: Vec<GameEvent>,
    pub frame: u64,
}
