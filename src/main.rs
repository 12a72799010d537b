mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use block_shooter::config::Config;
use block_shooter::input::{Command, KeyTracker};
use block_shooter::session::Session;
use block_shooter::spawner::SpawnTimer;

use display::TerminalSurface;

// ── Held-key windows (terminals without release events) ──────────────────────

/// A first press stays "held" this long, covering the OS auto-repeat delay.
const FIRST_HOLD: Duration = Duration::from_millis(600);

/// Once auto-repeat is flowing, silence this long means the key was let go.
/// The OS repeat rate is ≥ 15 Hz, so repeats always arrive inside it.
const REPEAT_HOLD: Duration = Duration::from_millis(150);


// ── Logging ───────────────────────────────────────────────────────────────────

/// The screen belongs to the game, so logs only go to `--log-file`.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
/// Dropping it restores the terminal, on the error paths too.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter(out: &mut Stdout) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        // From here on an early return drops the guard, which undoes the above.
        let mut guard = TerminalGuard { keyboard_enhanced: false };
        out.execute(terminal::EnterAlternateScreen)
            .context("failed to enter the alternate screen")?;
        out.execute(cursor::Hide).context("failed to hide the cursor")?;

        // Request key-release (and key-repeat) events from the terminal.
        // kitty-protocol terminals support this; others fall back to hold windows.
        // The capability query reads stdin, so it must run before the reader
        // thread starts.
        guard.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Input reader ──────────────────────────────────────────────────────────────

/// Dedicate a thread exclusively to blocking event reads, sending them
/// through the channel so the game loop never has to block on I/O.
fn start_input_reader(tx: mpsc::Sender<Event>) {
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                error!("terminal input failed, no more keys will be read: {}", err);
                break;
            }
        }
    });
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame drains every pending event in arrival order (so several key
/// events between two frames collapse to the last one applied), applies the
/// spawns that fell due, then runs one simulation step and sleeps out the
/// rest of the frame.  The loop is the only writer of the game state.
fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    session: &mut Session<StdRng>,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    keyboard_enhanced: bool,
) -> Result<()> {
    let frame_duration = config.frame_duration();
    let mut keys = KeyTracker::new(
        config.frames_in(FIRST_HOLD),
        config.frames_in(REPEAT_HOLD),
        !keyboard_enhanced,
    );
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending events (non-blocking) ───────────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => match keys.on_key(&key, frame) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Input(input)) => session.handle_input(input),
                    None => {}
                },
                Event::Resize(cols, rows) => {
                    let viewport = config.viewport_for(cols, rows);
                    surface.resize(cols, rows, viewport);
                    session.handle_resize(viewport);
                }
                _ => {}
            }
        }

        for input in keys.expire(frame) {
            session.handle_input(input);
        }
        session.poll_spawns(frame_start);

        session
            .frame(surface)
            .context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("seed {}, {} fps, spawn every {:?}", seed, config.fps, config.spawn_interval());

    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let viewport = config.viewport_for(cols, rows);

    // Declared before the surface so it drops after it: the surface's buffer
    // is flushed while the alternate screen is still up.
    let guard = TerminalGuard::enter(&mut stdout())?;
    info!("keyboard enhancement: {}", guard.keyboard_enhanced);

    let mut surface = TerminalSurface::new(BufWriter::new(stdout()), cols, rows, viewport);
    let mut session = Session::new(
        viewport,
        StdRng::seed_from_u64(seed),
        SpawnTimer::new(config.spawn_interval(), Instant::now()),
    );

    let (tx, rx) = mpsc::channel::<Event>();
    start_input_reader(tx);

    let result = game_loop(&mut surface, &mut session, &rx, &config, guard.keyboard_enhanced);

    info!("exiting with score {}", session.state().score);
    result
}
