mod ui;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, stdin},
    path::Path,
    time::Duration,
};

use typerace::{
    app_dirs::AppDirs,
    clock::MonotonicClock,
    config::{Config, ConfigStore, FileConfigStore},
    history::{HistoryLog, HistoryRecord},
    keys::KeyPress,
    results::RaceSummary,
    room::{self, RoomId},
    runtime::{CrosstermEventSource, FixedTicker, RaceEvent, Runner},
    word_bank::{words_from_prompt, WordBank},
    KeyAction, Race,
};

const TICK_RATE_MS: u64 = 100;

/// typing race in the terminal: shuffled words, per-word timing, words per minute
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words to race (default: the whole word bank)
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// word bank to pull words from
    #[clap(short = 'l', long, value_enum)]
    word_bank: Option<WordBankName>,

    /// custom space-separated words to race instead of a word bank
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// seed for the word shuffle, for repeatable races
    #[clap(long)]
    seed: Option<u64>,

    /// how many characters past a word's length may be typed into its slot
    #[clap(long)]
    max_overflow: Option<usize>,

    /// room to join (multiplayer is not available; the race runs solo)
    #[clap(long)]
    room: Option<String>,

    /// do not record finished races in the history file
    #[clap(long)]
    no_history: bool,

    /// persist the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
pub enum WordBankName {
    Common,
    English,
}

impl Cli {
    /// Config file values with command-line overrides applied
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(n) = self.number_of_words {
            cfg.number_of_words = Some(n);
        }
        if let Some(bank) = self.word_bank {
            cfg.word_bank = bank.to_string().to_lowercase();
        }
        if let Some(slack) = self.max_overflow {
            cfg.max_overflow = slack;
        }
        if self.no_history {
            cfg.record_history = false;
        }
        cfg
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub race: Race<MonotonicClock>,
    pub state: AppState,
    pub history: Option<HistoryLog>,
    pub best_wpm: Option<f64>,
    pub room: Option<RoomId>,
}

impl App {
    pub fn new(race: Race<MonotonicClock>, history: Option<HistoryLog>) -> Self {
        let best_wpm = history.as_ref().and_then(|h| match h.best_wpm() {
            Ok(best) => best,
            Err(e) => {
                warn!("could not read history: {e}");
                None
            }
        });

        Self {
            race,
            state: AppState::Typing,
            history,
            best_wpm,
            room: None,
        }
    }

    pub fn from_settings(cli: &Cli, cfg: &Config) -> Result<Self> {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let words = match &cli.prompt {
            Some(prompt) => words_from_prompt(prompt),
            None => WordBank::load(&cfg.word_bank)
                .with_context(|| format!("loading word bank {:?}", cfg.word_bank))?
                .pick(cfg.number_of_words, &mut rng),
        };

        let race = Race::with_parts(words, cfg.typing_policy(), MonotonicClock, rng)
            .context("setting up the race")?;
        let history = cfg
            .record_history
            .then(|| HistoryLog::new(AppDirs::history_path()));

        let mut app = App::new(race, history);
        if let Some(raw) = &cli.room {
            let id = RoomId::parse(raw)?;
            room::join(&id);
            app.room = Some(id);
        }
        Ok(app)
    }

    pub fn summary(&self) -> Option<&RaceSummary> {
        self.race.summary()
    }

    pub fn restart(&mut self) {
        self.race.restart();
        self.state = AppState::Typing;
    }

    fn finish(&mut self, summary: &RaceSummary) {
        if let Some(history) = &self.history {
            if let Some(record) = HistoryRecord::from_summary(summary) {
                if let Err(e) = history.append(&record) {
                    warn!("could not record race: {e}");
                }
            }
        }
        if let Some(wpm) = summary.words_per_minute {
            self.best_wpm = Some(self.best_wpm.map_or(wpm, |b| b.max(wpm)));
        }
        self.state = AppState::Results;
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('r') if ctrl => {
                self.restart();
                return Flow::Continue;
            }
            _ => {}
        }

        match self.state {
            AppState::Typing => {
                if let KeyAction::Completed(summary) = self.race.press(&KeyPress::from(key)) {
                    self.finish(&summary);
                }
            }
            AppState::Results => {
                if matches!(key.code, KeyCode::Char('r') | KeyCode::Enter) {
                    self.restart();
                }
            }
        }
        Flow::Continue
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn init_logging() {
    use env_logger::{Builder, Env, Target};

    let path = AppDirs::log_path();
    // the terminal belongs to the UI, so logs go to a file or nowhere
    let Ok(file) = open_log_file(&path) else {
        return;
    };

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = FileConfigStore::new();
    let cfg = cli.apply_to(store.load());
    if cli.save_config {
        store.save(&cfg).context("saving config")?;
        info!("saved config to {}", store.path().display());
    }

    let mut app = App::from_settings(&cli, &cfg)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui::draw(app, f))?;
    loop {
        match runner.step() {
            RaceEvent::Tick => {
                // only the running clock changes between keystrokes
                if app.state == AppState::Typing && app.race.state().started_at.is_some() {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            RaceEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            RaceEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
