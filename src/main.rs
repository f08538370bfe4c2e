use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info, warn};
use simplelog::{ConfigBuilder, WriteLogger};

use shellshow::core::config::{self, CliOverrides, ResolvedConfig, ShellshowConfig};
use shellshow::core::loader;
use shellshow::tui::markdown;
use shellshow::{to_markdown, tui};

#[derive(Parser)]
#[command(name = "shellshow", version, about = "Present a Markdown deck in the terminal")]
struct Args {
    /// Markdown deck to present
    file: PathBuf,

    /// Print the deck as canonical Markdown and exit
    #[arg(long, conflicts_with = "json")]
    outline: bool,

    /// Print the parsed deck as JSON and exit
    #[arg(long)]
    json: bool,

    /// Syntax highlighting theme for code blocks
    #[arg(long)]
    theme: Option<String>,

    /// Skip the title page
    #[arg(long)]
    no_title_page: bool,
}

fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();

    // The log file location comes from the config, so config errors are
    // held until the logger is up.
    let (file_config, config_error) = match config::load_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => (ShellshowConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        code_theme: args.theme.clone(),
        no_title_page: args.no_title_page,
    };
    let resolved = config::resolve(&file_config, &cli);
    init_logging(&resolved);

    info!("Shellshow starting on {}", args.file.display());
    if let Some(e) = config_error {
        warn!("{e}; using default settings");
    }
    if !markdown::theme_exists(&resolved.code_theme) {
        warn!(
            "Unknown code theme `{}`, falling back to {}",
            resolved.code_theme,
            config::DEFAULT_CODE_THEME
        );
    }

    let navigator = match loader::open(&args.file) {
        Ok(navigator) => navigator,
        Err(e) => {
            error!("{}: {e}", args.file.display());
            eprintln!("shellshow: {}: {e}", args.file.display());
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.outline {
        print!("{}", to_markdown(navigator.presentation()));
        return Ok(ExitCode::SUCCESS);
    }
    if args.json {
        let json = serde_json::to_string_pretty(navigator.presentation())
            .map_err(std::io::Error::other)?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    tui::run(navigator, resolved, args.file)?;
    Ok(ExitCode::SUCCESS)
}

/// File logger with RFC 3339 timestamps. Logging is best-effort: an
/// unwritable log file only costs the log.
fn init_logging(config: &ResolvedConfig) {
    let level = config.log_level.parse().unwrap_or(LevelFilter::Info);
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}
