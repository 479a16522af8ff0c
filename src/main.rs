//! JSON Log Viewer - Entry Point

use clap::Parser;
use jlv::config::{self, KeyBindings, ResolvedConfig};
use jlv::model::{AppError, Command};
use jlv::state::AppState;
use jlv::store::LineStore;
use jlv::view::{ColorConfig, LineStyles};
use jlv::view_state::Viewport;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// JSON Log Viewer - TUI for paging through large JSON log files
#[derive(Parser, Debug)]
#[command(name = "jlv")]
#[command(version)]
#[command(about = "TUI application for viewing large line-oriented JSON log files")]
pub struct Args {
    /// Path to log file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Start at specific line number (must be positive)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub line: u32,

    /// Start with the cursor on the first match of this regex
    #[arg(short, long)]
    pub search: Option<String>,

    /// Columns per tab stop
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub tab_size: Option<u32>,

    /// Rows kept between the cursor and the window edge
    #[arg(long)]
    pub scroll_margin: Option<u32>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Resolve configuration: Defaults → Config File → Env Vars → CLI Args
    fn resolve_config(&self) -> Result<ResolvedConfig, AppError> {
        let config_file = config::load_config_with_precedence(self.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);

        // Flags only override when given
        let color_override = self.no_color.then_some(false);
        Ok(config::apply_cli_overrides(
            with_env,
            self.tab_size.map(|n| n as usize),
            self.scroll_margin.map(|n| n as usize),
            color_override,
        ))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Exiting with error");
            eprintln!("jlv: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.resolve_config()?;

    // Initialize tracing with configured log file path
    jlv::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    // Detect input source (file or stdin)
    let input_source = jlv::source::detect_input_source(args.file.clone())?;
    let source_name = input_source.display_name();

    let (store, load_failure) = match input_source.load() {
        Ok(store) => (store, None),
        Err(e) => {
            error!(error = %e, source = %source_name, "Load failed, showing empty buffer");
            (LineStore::default(), Some(e.to_string()))
        }
    };

    let viewport = Viewport::new(0, 0, config.scroll_margin);
    let mut app_state = AppState::new(store, source_name, viewport, config.tab_size);
    apply_startup(&mut app_state, args);
    if let Some(message) = load_failure {
        app_state.notify(message);
    }

    let styles = LineStyles::with_color_config(ColorConfig::from_env_and_args(!config.color));

    jlv::view::run_with_state(app_state, KeyBindings::default(), styles)?;

    Ok(())
}

/// Initial cursor placement from `--line` and `--search`.
///
/// The search runs after the jump, so it starts from the requested line.
fn apply_startup(app_state: &mut AppState, args: &Args) {
    if args.line > 1 {
        app_state.apply(Command::JumpToLine(args.line as usize));
    }
    if let Some(pattern) = args.search.as_deref().filter(|p| !p.is_empty()) {
        app_state.search_for(pattern);
    }
}
