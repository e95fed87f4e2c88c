/// Game constants.
///
/// Every value is expressed in field pixels or milliseconds; the terminal
/// shell scales pixels to cells when drawing.  Defaults reproduce the
/// classic 360×640 board.  A JSON file may override any subset of fields.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // ── Field ────────────────────────────────────────────────────────────────
    pub field_width: i32,
    pub field_height: i32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: i32,
    pub player_height: i32,
    /// Added to the vertical velocity every tick.
    pub gravity: i32,
    /// Vertical velocity set by a flap (negative = upward).
    pub impulse_velocity: i32,

    // ── Obstacles ────────────────────────────────────────────────────────────
    pub obstacle_width: i32,
    pub obstacle_height: i32,
    /// Pixels an obstacle scrolls left per tick.
    pub obstacle_velocity: i32,
    /// Vertical opening between an upper and a lower obstacle.
    pub gap_height: i32,
    /// Upper bound on obstacle pairs kept alive at once.
    pub max_pairs: usize,

    // ── Timers ───────────────────────────────────────────────────────────────
    pub tick_period_ms: u64,
    pub spawn_period_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let field_height = 640;
        Self {
            field_width: 360,
            field_height,
            player_width: 34,
            player_height: 24,
            gravity: 1,
            impulse_velocity: -10,
            obstacle_width: 64,
            obstacle_height: 512,
            obstacle_velocity: 1,
            gap_height: field_height / 4,
            max_pairs: 8,
            tick_period_ms: 1000 / 60,
            spawn_period_ms: 3000,
        }
    }
}

impl Config {
    /// Read a JSON config file.  Missing fields keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Config::from_json(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Config> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> anyhow::Result<()> {
        let sizes = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_velocity", self.obstacle_velocity),
            ("gap_height", self.gap_height),
        ];
        for (name, value) in sizes {
            if value <= 0 {
                bail!("{name} must be positive, got {value}");
            }
        }
        if self.player_height >= self.field_height {
            bail!(
                "player_height ({}) must be smaller than field_height ({})",
                self.player_height,
                self.field_height
            );
        }
        if self.tick_period_ms == 0 || self.spawn_period_ms == 0 {
            bail!("timer periods must be at least 1 ms");
        }
        let needed = self.max_live_pairs();
        if self.max_pairs < needed {
            bail!(
                "max_pairs ({}) is too small: up to {} pairs can be on screen at once",
                self.max_pairs,
                needed
            );
        }
        Ok(())
    }

    /// Most pairs alive at once: a pair lives from spawning at the right
    /// edge until its right edge scrolls past the left edge.
    pub fn max_live_pairs(&self) -> usize {
        let travel = (self.field_width.max(0) + self.obstacle_width.max(0)) as u64;
        let velocity = self.obstacle_velocity.max(1) as u64;
        let lifetime_ms = (travel.div_ceil(velocity) + 1) * self.tick_period_ms.max(1);
        (lifetime_ms.div_ceil(self.spawn_period_ms.max(1)) + 1) as usize
    }

    // ── Derived positions ────────────────────────────────────────────────────

    /// Player spawn column: horizontally centred.
    pub fn player_start_x(&self) -> i32 {
        self.field_width / 2 - self.player_width / 2
    }

    /// Player spawn row: vertically centred.
    pub fn player_start_y(&self) -> i32 {
        self.field_height / 2 - self.player_height / 2
    }

    /// Lowest y the player may occupy on an open field.
    pub fn floor_y(&self) -> i32 {
        self.field_height - self.player_height
    }
}
