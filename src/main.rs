//! Halocline - a terminal-based browser for hierarchical scientific data containers.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use halocline::app::App;
use halocline::container::ContainerHandle;
use halocline::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "halocline")]
#[command(about = "A terminal-based browser for hierarchical scientific data containers", long_about = None)]
struct Args {
    /// Container file to open on startup
    file: Option<String>,

    /// Container file to open on startup (alternative syntax)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file_flag: Option<String>,

    /// Report availability of required libraries and exit
    #[arg(long)]
    check_deps: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_path = log_path.clone();
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(move || {
                std::fs::OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .append(false)
                    .open(&log_path)
                    .expect("Failed to open log file")
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Halocline");
    }

    if args.check_deps {
        let ok = check_dependencies();
        std::process::exit(if ok { 0 } else { 1 });
    }

    // Positional argument wins over --file when both are given.
    let filename = args.file.or(args.file_flag);

    // Validate the startup file before entering the UI.
    if let Some(ref path) = filename {
        if let Err(e) = ContainerHandle::open(path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(filename);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("Halocline exited");
    }

    Ok(())
}

/// Report availability of the container library and the terminal.
fn check_dependencies() -> bool {
    let mut ok = true;

    let probe = std::env::temp_dir().join(format!("halocline-deps-{}.nc", std::process::id()));
    let container_ok = (|| -> halocline::Result<()> {
        {
            let mut file = netcdf::create(&probe)?;
            file.add_dimension("probe", 1)?;
        }
        netcdf::open(&probe)?;
        Ok(())
    })();
    let _ = std::fs::remove_file(&probe);

    match container_ok {
        Ok(()) => println!("✓ netcdf - container read/write available"),
        Err(e) => {
            println!("✗ netcdf - {}", e);
            ok = false;
        }
    }

    // The terminal backend is linked in; report the attached terminal when
    // there is one, without failing the check for piped output.
    match crossterm::terminal::size() {
        Ok((w, h)) => println!("✓ terminal - {}x{}", w, h),
        Err(_) => println!("✓ crossterm - library available (not attached to a tty)"),
    }

    if ok {
        println!("\n✓ All dependencies are available!");
    }
    ok
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Info overlay - any key closes it
                if app.info.is_some() {
                    app.close_overlay();
                    continue;
                }

                // Prompt mode - handle separately
                if app.prompt.is_active() {
                    match key.code {
                        KeyCode::Enter => app.submit_prompt(),
                        KeyCode::Esc => {
                            app.prompt.cancel();
                            app.status = "Cancelled".to_string();
                        }
                        KeyCode::Backspace => app.prompt.backspace(),
                        KeyCode::Char(c) => app.prompt.input(c),
                        _ => {}
                    }
                    continue;
                }

                // Normal mode
                match (key.modifiers, key.code) {
                    // Quit
                    (KeyModifiers::NONE, KeyCode::Char('q'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('Q')) => return Ok(()),

                    // Open file
                    (KeyModifiers::NONE, KeyCode::Char('o'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('O')) => {
                        app.start_open_prompt();
                    }

                    // Navigation
                    (KeyModifiers::NONE, KeyCode::Up)
                    | (KeyModifiers::NONE, KeyCode::Char('k'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('K')) => {
                        app.move_selection(-1);
                    }
                    (KeyModifiers::NONE, KeyCode::Down)
                    | (KeyModifiers::NONE, KeyCode::Char('j'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('J')) => {
                        app.move_selection(1);
                    }
                    (KeyModifiers::NONE, KeyCode::Left)
                    | (KeyModifiers::NONE, KeyCode::Char('h'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('H')) => {
                        app.go_to_parent();
                    }
                    (KeyModifiers::NONE, KeyCode::Right)
                    | (KeyModifiers::NONE, KeyCode::Char('l'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('L'))
                    | (KeyModifiers::NONE, KeyCode::Enter) => {
                        app.activate();
                    }

                    // Vim-style jumps
                    (KeyModifiers::NONE, KeyCode::Char('g')) => {
                        app.jump_top();
                    }
                    (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                        app.jump_bottom();
                    }

                    // Export
                    (KeyModifiers::NONE, KeyCode::Char('e'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('E')) => {
                        app.start_subtree_export_prompt();
                    }
                    (KeyModifiers::NONE, KeyCode::Char('c'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('C')) => {
                        app.start_table_export_prompt();
                    }

                    // Dataset info
                    (KeyModifiers::NONE, KeyCode::Char('i'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('I')) => {
                        app.show_info();
                    }

                    // Theme
                    (KeyModifiers::SHIFT, KeyCode::Char('T')) => {
                        app.cycle_theme();
                    }

                    // Escape - close overlays
                    (KeyModifiers::NONE, KeyCode::Esc) => {
                        app.close_overlay();
                    }

                    _ => {}
                }
            }
        }
    }
}
