mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use wordrace::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    corpus::{Corpus, DEFAULT_CORPUS},
    input::{apply_intent, intent_for_key, Intent},
    logging::init_file_logging,
    runtime::{spawn_terminal_events, Clock, MonotonicClock, QuizEvent, Runner},
    GameError, SessionConfig, SessionEngine, WordBank,
};

const TICK_RATE_MS: u64 = 100;

/// timed english to chinese vocabulary quiz
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Translate English prompts into Chinese by picking one of four options before the clock runs out, then review what you missed."
)]
pub struct Cli {
    /// number of seconds per game
    #[clap(short = 'd', long, value_parser = clap::value_parser!(u32).range(1..))]
    duration: Option<u32>,

    /// JSON corpus file to use instead of the built-in word list
    #[clap(short = 'c', long)]
    corpus: Option<PathBuf>,

    /// seed the random generator for a repeatable word order
    #[clap(long)]
    seed: Option<u64>,

    /// where to write the log file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Overlay command line flags on the stored config
    fn merge_into(&self, mut cfg: Config) -> Config {
        if let Some(duration) = self.duration {
            cfg.game_duration_secs = duration;
        }
        if let Some(ref corpus) = self.corpus {
            cfg.corpus_path = Some(corpus.clone());
        }
        cfg
    }
}

#[derive(Debug)]
pub struct App {
    pub engine: SessionEngine,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: SessionEngine) -> Self {
        Self {
            engine,
            should_quit: false,
        }
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Result<(), GameError> {
        if intent == Intent::Quit {
            self.should_quit = true;
            return Ok(());
        }
        apply_intent(&mut self.engine, intent)
    }
}

fn load_bank(cfg: &Config) -> Result<WordBank, GameError> {
    let corpus = match cfg.corpus_path {
        Some(ref path) => Corpus::from_path(path)?,
        None => Corpus::embedded(DEFAULT_CORPUS)?,
    };
    corpus.into_bank()
}

fn build_engine(cli: &Cli, cfg: &Config) -> Result<SessionEngine, GameError> {
    let bank = load_bank(cfg)?;
    let session_config = SessionConfig::from(cfg);
    match cli.seed {
        Some(seed) => SessionEngine::with_seed(bank, session_config, seed),
        None => SessionEngine::new(bank, session_config),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // Logging is best effort; a read-only state dir must not stop the game
        let _ = init_file_logging(&log_path);
    }

    let store = FileConfigStore::new();
    let cfg = cli.merge_into(store.load());
    let engine = match build_engine(&cli, &cfg) {
        Ok(engine) => engine,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };
    if let Err(e) = store.save(&cfg) {
        tracing::warn!(path = %store.path().display(), "could not save config: {e}");
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        spawn_terminal_events(),
        MonotonicClock::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    run_loop(terminal, app, &mut runner)
}

fn run_loop<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<C>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        if let Some(QuizEvent::Key(key)) = runner.drive(&mut app.engine)? {
            if let Some(intent) = intent_for_key(app.engine.phase(), key) {
                app.handle_intent(intent)?;
            }
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    tracing::info!("quit");
    Ok(())
}
