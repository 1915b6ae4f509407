//! Dicetray - Terminal User Interface
//!
//! A terminal dice tray built on dicetray-core. Type a formula such as
//! `2d6+3`, press Enter, and the roll lands at the top of a history that
//! persists between sessions.

mod app;
mod events;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use dicetray_core::{
    default_data_dir, history_path, PersistError, RollSession, SessionConfig, SessionError,
};

use app::App;
use events::{handle_event, EventResult};

/// Command-line options understood by the binary.
struct CliOptions {
    data_dir: Option<PathBuf>,
    seed: Option<u64>,
    ephemeral: bool,
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        data_dir: None,
        seed: None,
        ephemeral: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                i += 1;
                let dir = args
                    .get(i)
                    .ok_or_else(|| "--data requires a directory".to_string())?;
                options.data_dir = Some(PathBuf::from(dir));
            }
            "--seed" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--seed requires a number".to_string())?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed: {raw}"))?;
                options.seed = Some(seed);
            }
            "--ephemeral" => options.ephemeral = true,
            other => return Err(format!("Unknown option: {other}")),
        }
        i += 1;
    }

    Ok(options)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    let mut config = SessionConfig::new();
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    let session = RollSession::new(config);

    let data_path = if options.ephemeral {
        None
    } else {
        let dir = options.data_dir.unwrap_or_else(default_data_dir);
        Some(history_path(&dir))
    };

    let mut app = App::new(session, data_path);

    // Load whatever was saved last time. A missing blob is a normal first
    // run; anything else starts empty and says so in the status line.
    if let Some(path) = app.data_path.clone() {
        match app.session.load_history(&path).await {
            Ok(count) if count > 0 => {
                app.set_status(format!("Loaded {count} saved rolls"));
            }
            Ok(_) => {}
            Err(SessionError::Persist(PersistError::Io(ref io_err)))
                if io_err.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                app.set_status(format!("Could not load saved history: {e}"));
            }
        }
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {err:?}");
    }

    Ok(())
}

/// Main application loop: draw, flush pending saves, then handle input.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        // Autosave requested by the last mutation. Quiet on success so the
        // status line stays free for roll results.
        if app.pending_save {
            app.pending_save = false;
            if let Some(path) = app.data_path.clone() {
                if let Err(e) = app.session.save_history(&path).await {
                    app.set_status(format!("Autosave failed: {e}"));
                }
            }
        }

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => {
                    if app.pending_save {
                        if let Some(path) = app.data_path.clone() {
                            let _ = app.session.save_history(&path).await;
                        }
                    }
                    return Ok(());
                }
                EventResult::Continue | EventResult::NeedsRedraw => {}
            }
        }
    }
}

fn print_help() {
    println!("Dicetray - Terminal Dice Tray");
    println!();
    println!("USAGE:");
    println!("    dicetray [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show this help message");
    println!("    --data <DIR>     Directory for the saved history (default: platform data dir)");
    println!("    --seed <N>       Seed the roll sequence for a reproducible session");
    println!("    --ephemeral      Do not load or save history");
    println!();
    println!("KEYBINDINGS (normal mode):");
    println!("    i, a       Edit the formula field");
    println!("    1-9        Roll a preset (d4, d6, d8, d10, d12, d20, d100, 2d6, 3d6)");
    println!("    j, k       Select an older / newer roll");
    println!("    g, G       Jump to the newest / oldest roll");
    println!("    r          Reroll the selected formula");
    println!("    d          Delete the selected roll");
    println!("    C          Clear the whole history");
    println!("    ?          Toggle the help overlay");
    println!("    q          Quit");
    println!();
    println!("KEYBINDINGS (insert mode):");
    println!("    Enter      Roll the typed formula");
    println!("    Up/Down    Recall previously typed formulas");
    println!("    Esc        Back to normal mode");
    println!();
    println!("FORMULAS:");
    println!("    <count>d<sides>[+/-modifier], e.g. 2d6+3, d20, -1d6+2");
}
