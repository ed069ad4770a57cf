mod app;
mod config;
mod engine;
mod event;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};

use app::App;
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::hud::Hud;
use ui::components::world_bar::WorldBar;

#[derive(Parser)]
#[command(
    name = "railbar",
    version,
    about = "Terminal typing status bar: a scrolling railway world with live WPM"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "World width in slots")]
    width: Option<usize>,

    #[arg(short, long, help = "Render ticks per second")]
    fps: Option<u32>,

    #[arg(short, long, help = "Keystrokes per WPM round")]
    round: Option<usize>,

    #[arg(long, help = "Show the engine debug line")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    if let Some(round) = cli.round {
        config.round_size = round;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Ask the terminal to distinguish Press from Repeat/Release; without
    // this, autorepeat arrives as plain presses and inflates the input.
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_secs_f64(1.0 / config.fps.max(1) as f64);
    let events = EventHandler::new(tick_rate);

    // Ctrl+R resets: tear the app down and rebuild a fresh engine.
    let result = loop {
        let mut app = match App::new(config.clone(), cli.debug) {
            Ok(app) => app,
            Err(err) => break Err(err),
        };
        match run_app(&mut terminal, &mut app, &events) {
            Ok(()) if app.should_reset => continue,
            other => break other,
        }
    };

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if app.engine.is_idle() {
            // Velocity has decayed to exactly zero: suspend on the
            // listener instead of burning ticks on a static world.
            let key = events.wait_for_key()?;
            app.handle_key(key, Instant::now());
        } else {
            match events.next()? {
                AppEvent::Key(key) => app.handle_key(key, Instant::now()),
                AppEvent::Tick => app.on_tick(Instant::now()),
                AppEvent::Resize(_, _) => {}
            }
        }

        if app.should_quit || app.should_reset {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(WorldBar::new(&app.snapshot, &app.theme), layout[0]);
    frame.render_widget(Hud::new(&app.snapshot, &app.theme), layout[1]);
}
