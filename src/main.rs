mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use flappy_bird::compute::{advance, apply_command, handle_key, init_state, take_events};
use flappy_bird::config::Config;
use flappy_bird::entities::{GameState, Key};
use flappy_bird::layout::Layout;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Longest stretch of wall time fed to the simulation in one frame.
/// A stalled terminal must not turn into hundreds of catch-up ticks.
const MAX_CATCH_UP_MS: u64 = 100;

#[derive(Parser, Debug)]
#[command(name = "flappy_bird", about = "Flappy Bird in the terminal")]
struct Args {
    /// JSON file overriding game constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for obstacle placement (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; filter with RUST_LOG (default: info).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs only go to a file.
fn init_logging(path: Option<&PathBuf>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Event dispatch ────────────────────────────────────────────────────────────

/// Route every pending lifecycle event to the layout.
fn dispatch(state: &mut GameState, layout: &mut Layout) {
    for event in take_events(state) {
        log::debug!("event {:?}", event);
        layout.apply(&event);
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Input {
    Quit,
    Continue,
}

/// Apply one key press.  Quitting needs a confirmation, and only while the
/// layout offers the quit control; Ctrl-C always quits.
fn on_key(
    key: KeyEvent,
    state: &mut GameState,
    layout: &mut Layout,
    confirm_quit: &mut bool,
) -> Input {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Input::Quit;
    }

    if *confirm_quit {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => return Input::Quit,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => *confirm_quit = false,
            _ => {}
        }
        return Input::Continue;
    }

    let next = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            if layout.quit_visible {
                *confirm_quit = true;
            }
            return Input::Continue;
        }
        KeyCode::Enter => match layout.button {
            Some(button) => apply_command(state, button.command()),
            None => return Input::Continue,
        },
        KeyCode::Char(' ') => handle_key(state, Key::Confirm),
        KeyCode::Char('p') | KeyCode::Char('P') => handle_key(state, Key::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => handle_key(state, Key::Restart),
        _ => return Input::Continue,
    };
    *state = next;
    dispatch(state, layout);
    Input::Continue
}

fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut layout = Layout::default();
    let mut confirm_quit = false;
    dispatch(state, &mut layout);

    let clock = Instant::now();
    let mut fed_ms: u64 = 0;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Input::Quit = on_key(key, state, &mut layout, &mut confirm_quit) {
                    return Ok(());
                }
            }
        }

        // ── Feed elapsed time to the timers ───────────────────────────────────
        let now_ms = clock.elapsed().as_millis() as u64;
        let dt = (now_ms - fed_ms).min(MAX_CATCH_UP_MS);
        fed_ms = now_ms;

        *state = advance(state, dt, rng);
        dispatch(state, &mut layout);

        display::render(out, state, &layout, confirm_quit)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(args.log_file.as_ref())?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("starting with {:?}, seed {:?}", config, args.seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut state = init_state(config);
    let result = game_loop(&mut out, &mut state, &mut rng, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("fatal: {:#}", e);
    } else {
        log::info!("quit with score {}", state.score);
    }
    result
}
