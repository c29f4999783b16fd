//! nbtoc: a live table-of-contents sidebar for Jupyter notebooks.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use nbtoc::{app::App, config::Config, notebook::Notebook, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "nbtoc")]
#[command(about = "Live table-of-contents sidebar for Jupyter notebooks", long_about = None)]
struct Args {
    /// Notebook file to open
    #[arg(value_name = "NOTEBOOK")]
    path: PathBuf,

    /// Maximum heading depth shown in the outline
    #[arg(long)]
    threshold: Option<usize>,

    /// Exclude the top-level heading from the outline
    #[arg(long)]
    skip_h1_title: bool,

    /// Do not write display preferences back into the notebook on exit
    #[arg(long)]
    no_save: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let notebook = Notebook::load(&args.path)?;

    // two-tier precedence: installation defaults, then per-notebook values,
    // then explicit command line flags
    let mut cfg = Config::load().with_doc(&notebook.doc_settings());
    if let Some(threshold) = args.threshold {
        cfg.threshold = threshold;
    }
    if args.skip_h1_title {
        cfg.skip_h1_title = true;
    }

    let app = App::new(notebook, cfg);
    run_tui(app, args.no_save)
}

fn run_tui(mut app: App, no_save: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    } else if !no_save {
        if let Err(e) = app.persist() {
            eprintln!("Could not save notebook settings: {e}");
        }
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        app.tick(Instant::now());

        // poll rather than block so the execution runner keeps ticking
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                app.message = None;
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Up => app.select_prev(),
                    KeyCode::Down => app.select_next(),
                    KeyCode::Enter => app.run_selected(),
                    KeyCode::Char(' ') => app.collapse_current(),
                    KeyCode::Char('n') => app.toggle_numbering(),
                    KeyCode::Char('t') => app.sidebar.toggle_visible(),
                    KeyCode::Char('c') => app.sidebar.toggle_list(),
                    KeyCode::Char('<') => app.sidebar.narrow(),
                    KeyCode::Char('>') => {
                        let width = terminal.size()?.width;
                        app.sidebar.widen(width);
                    }
                    KeyCode::Char('r') => app.reload(),
                    _ => {}
                }
            }
            Event::Resize(width, _) => app.sidebar.clamp_to(width),
            _ => {}
        }
    }
}
