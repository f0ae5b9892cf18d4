// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod encoder;
mod errors;
mod file_utils;
mod image_compositor;
mod providers;
mod quote;
mod segmenter;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a quote video (default command)
    Generate(GenerateArgs),

    /// Generate shell completions for quotereel
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// JSON file with the quote library
    #[arg(value_name = "QUOTES_FILE")]
    quotes_file: PathBuf,

    /// Background image to composite behind the text
    #[arg(short, long, default_value = "background.jpg")]
    background: PathBuf,

    /// Directory where the final video is written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Pick a specific quote by index instead of a random one
    #[arg(short, long)]
    quote_index: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Keep the temporary working directory after a successful run
    #[arg(long)]
    keep_temp: bool,

    /// Show the encoder's own console output instead of hiding it
    #[arg(long)]
    show_encoder_output: bool,
}

/// quotereel - Anime quote shorts generator
///
/// Turns a quote from a JSON library into a short vertical video with a
/// background image, burned-in text, and synthesized voice-over.
#[derive(Parser, Debug)]
#[command(name = "quotereel")]
#[command(version = "1.0.0")]
#[command(about = "Quote-to-video generator with voice-over")]
#[command(long_about = "quotereel picks a quote, splits it into sentences, synthesizes a voice
line per sentence, renders one clip per sentence with ffmpeg, and joins the
clips into a single vertical video.

EXAMPLES:
    quotereel quotes.json                          # Random quote, defaults
    quotereel -f quotes.json                       # Force overwrite existing output
    quotereel -b beach.jpg quotes.json             # Use a specific background
    quotereel -q 3 quotes.json                     # Use the quote at index 3
    quotereel --log-level debug quotes.json        # Verbose logging
    quotereel completions bash > quotereel.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file with the quote library
    #[arg(value_name = "QUOTES_FILE")]
    quotes_file: Option<PathBuf>,

    /// Background image to composite behind the text
    #[arg(short, long, default_value = "background.jpg")]
    background: PathBuf,

    /// Directory where the final video is written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Pick a specific quote by index instead of a random one
    #[arg(short, long)]
    quote_index: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Keep the temporary working directory after a successful run
    #[arg(long)]
    keep_temp: bool,

    /// Show the encoder's own console output instead of hiding it
    #[arg(long)]
    show_encoder_output: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "quotereel", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let quotes_file = cli
                .quotes_file
                .ok_or_else(|| anyhow!("QUOTES_FILE is required when no subcommand is specified"))?;

            let generate_args = GenerateArgs {
                quotes_file,
                background: cli.background,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                quote_index: cli.quote_index,
                config_path: cli.config_path,
                log_level: cli.log_level,
                keep_temp: cli.keep_temp,
                show_encoder_output: cli.show_encoder_output,
            };
            run_generate(generate_args).await
        }
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.keep_temp {
        config.keep_temp_files = true;
    }
    if options.show_encoder_output {
        config.encoder.hide_output = false;
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    // Create controller and run the pipeline
    let controller = Controller::with_config(config)?;

    controller
        .run(
            options.quotes_file,
            options.background,
            options.output_dir,
            options.quote_index,
            options.force_overwrite,
        )
        .await?;

    Ok(())
}

/// Map the config log level onto the log crate's filter
fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
