/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands, scaling field pixels to terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use flappy_bird::compute::obstacles;
use flappy_bird::entities::{GameState, Obstacle, ObstacleKind};
use flappy_bird::layout::Layout;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BANNER: Color = Color::Yellow;
const C_PLAYER: Color = Color::Yellow;
const C_PIPE: Color = Color::Green;
const C_PIPE_CAP: Color = Color::DarkGreen;
const C_TITLE: Color = Color::White;
const C_BUTTON: Color = Color::Cyan;
const C_QUIT: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Pixel → cell mapping ──────────────────────────────────────────────────────

/// The playable cell rectangle inside the border and the field it shows.
struct Viewport {
    left: i64,
    top: i64,
    cols: i64,
    rows: i64,
    field_width: i64,
    field_height: i64,
}

impl Viewport {
    fn new(state: &GameState, width: u16, height: u16) -> Self {
        Viewport {
            left: 1,
            top: 2,
            cols: (width as i64 - 2).max(1),
            rows: (height as i64 - 4).max(1),
            field_width: state.config.field_width.max(1) as i64,
            field_height: state.config.field_height.max(1) as i64,
        }
    }

    fn col(&self, x: i32) -> i64 {
        self.left + (x as i64 * self.cols).div_euclid(self.field_width)
    }

    fn row(&self, y: i32) -> i64 {
        self.top + (y as i64 * self.rows).div_euclid(self.field_height)
    }

    fn right(&self) -> i64 {
        self.left + self.cols
    }

    fn bottom(&self) -> i64 {
        self.top + self.rows
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    layout: &Layout,
    confirm_quit: bool,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(state, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;

    for obstacle in obstacles(state) {
        draw_obstacle(out, obstacle, &view)?;
    }
    draw_player(out, state, &view)?;

    draw_banner(out, layout, width)?;
    draw_overlay(out, layout, confirm_quit, width, height)?;
    draw_controls_hint(out, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_obstacle<W: Write>(
    out: &mut W,
    obstacle: &Obstacle,
    view: &Viewport,
) -> std::io::Result<()> {
    let c0 = view.col(obstacle.x).max(view.left);
    let c1 = view.col(obstacle.x + obstacle.width).min(view.right());
    let r0 = view.row(obstacle.y).max(view.top);
    let r1 = view.row(obstacle.y + obstacle.height).min(view.bottom());
    if c0 >= c1 || r0 >= r1 {
        return Ok(());
    }

    // The cap faces the gap: bottom row of an upper pipe, top row of a lower one.
    let cap_row = match obstacle.kind {
        ObstacleKind::Upper => r1 - 1,
        ObstacleKind::Lower => r0,
    };
    let span = (c1 - c0) as usize;
    let body = "█".repeat(span);
    let cap = "▓".repeat(span);

    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0 as u16, row as u16))?;
        if row == cap_row {
            out.queue(style::SetForegroundColor(C_PIPE_CAP))?;
            out.queue(Print(&cap))?;
        } else {
            out.queue(style::SetForegroundColor(C_PIPE))?;
            out.queue(Print(&body))?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Sprite (1 row, 3 cols), wing follows the direction of travel:
    //   \●>   rising
    //   /●>   falling
    let p = &state.player;
    let sprite = if p.velocity_y < 0 { "\\●>" } else { "/●>" };

    let centre_col = view.col(p.x + p.width / 2);
    let col = (centre_col - 1).clamp(view.left, (view.right() - 3).max(view.left));
    let row = view
        .row(p.y + p.height / 2)
        .clamp(view.top, (view.bottom() - 1).max(view.top));

    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, layout: &Layout, width: u16) -> std::io::Result<()> {
    if let Some(text) = &layout.banner {
        let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_BANNER))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Title / button / quit overlay ────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    layout: &Layout,
    confirm_quit: bool,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let button_line = layout
        .button
        .map(|b| format!("[ ENTER ]  {}", b.label()));
    let quit_line = if confirm_quit {
        Some("Are you sure?  Y / N".to_string())
    } else if layout.quit_visible {
        Some("[   Q   ]  Quit".to_string())
    } else {
        None
    };

    let mut lines: Vec<(String, Color)> = Vec::new();
    if let Some(title) = layout.title {
        lines.push((format!("╔{}╗", "═".repeat(title.chars().count() + 4)), C_TITLE));
        lines.push((format!("║  {}  ║", title), C_TITLE));
        lines.push((format!("╚{}╝", "═".repeat(title.chars().count() + 4)), C_TITLE));
    }
    if let Some(line) = button_line {
        lines.push((line, C_BUTTON));
    }
    if let Some(line) = quit_line {
        lines.push((line, C_QUIT));
    }

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE : Flap   P : Pause   R : Restart   ENTER : Button   Q : Quit"))?;
    Ok(())
}
