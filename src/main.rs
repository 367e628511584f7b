use crossterm::{
    cursor,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use color_eyre::eyre::{Result, WrapErr};
use std::fs::{self, File};
use std::io::{self, Stdout, stdout};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use neon_racer::audio::SoundManager;
use neon_racer::clock::FramePacer;
use neon_racer::config::{Config, TITLE};
use neon_racer::input::{Command, Input};
use neon_racer::render::PixelBuf;
use neon_racer::state::{App, Context};

// ── Logging ─────────────────────────────────────────────────────────────────

/// The terminal belongs to the renderer, so logs go to a file or nowhere.
fn init_logging(config: &Config) {
    let Ok(file) = File::create(config.log_path()) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

// ── Terminal ────────────────────────────────────────────────────────────────

/// Returns whether the terminal reports key releases.
fn setup(out: &mut Stdout) -> io::Result<bool> {
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
        EnableFocusChange,
        terminal::SetTitle(TITLE),
    )?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            out,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }
    Ok(enhanced)
}

fn restore(out: &mut Stdout, enhanced: bool) -> io::Result<()> {
    if enhanced {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(
        out,
        DisableFocusChange,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

// ── Main ────────────────────────────────────────────────────────────────────

fn run(app: &mut App, input: &mut Input, out: &mut Stdout, fps: u32) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);
    let mut pacer = FramePacer::new(fps);
    let start = Instant::now();

    loop {
        let dt = pacer.tick();
        let now = start.elapsed().as_secs_f64();

        // Input
        for command in input.poll(now).wrap_err("input lost")? {
            if let Command::Resize { cols, rows } = command {
                buf.resize(cols as usize, rows as usize * 2);
            }
            app.handle(command);
        }
        if app.should_quit() {
            return Ok(());
        }

        // Update
        app.update(dt, input.steer(now));

        // Render
        app.draw(&mut buf);
        buf.render(out).wrap_err("display lost")?;

        pacer.wait();
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::from_env();
    let dir_ready = fs::create_dir_all(&config.data_dir);
    init_logging(&config);
    if let Err(err) = dir_ready {
        warn!(error = %err, dir = %config.data_dir.display(), "data directory unavailable");
    }
    info!(?config, "neon racer starting");

    let audio = SoundManager::open(config.sounds_dir());
    let (fps, hold_window) = (config.fps, config.hold_window);
    let mut app = App::new(Context::new(config, audio));

    let mut out = stdout();
    let enhanced = match setup(&mut out) {
        Ok(enhanced) => enhanced,
        Err(err) => {
            app.shutdown();
            let _ = restore(&mut out, false);
            return Err(err).wrap_err("terminal setup failed");
        }
    };
    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    let mut input = Input::new(cols, rows, enhanced).with_hold_window(hold_window);

    let result = run(&mut app, &mut input, &mut out, fps);
    app.shutdown();
    let restored = restore(&mut out, enhanced);
    if let Err(err) = &result {
        error!(error = %err, "stopped on error");
    }
    result?;
    restored?;
    info!("bye");
    Ok(())
}
