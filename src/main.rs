// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use std::sync::atomic::Ordering;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use doctran::app_config::{self, Config, TranslationProvider};
use doctran::language_utils;
use doctran::{AppError, Controller};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Microsoft,
    #[value(name = "mymemory")]
    MyMemory,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Microsoft => TranslationProvider::Microsoft,
            CliTranslationProvider::MyMemory => TranslationProvider::MyMemory,
        }
    }
}

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a document or every document in a folder (default command)
    Translate(TranslateArgs),

    /// List the supported languages and their codes
    Languages,

    /// Generate shell completions for doctran
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Source language code or name (e.g., 'zh-CN', 'English', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code or name (e.g., 'es', 'French')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Directory for the translated file (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the translated text instead of writing a file
    #[arg(long, conflicts_with = "output_dir")]
    stdout: bool,

    /// Maximum characters per translation request
    #[arg(long)]
    max_chunk_size: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// doctran - translate Word and text documents
///
/// Extracts the text of a document, translates it paragraph by paragraph
/// through an online translation service and writes a new document.
#[derive(Parser, Debug)]
#[command(name = "doctran")]
#[command(version)]
#[command(about = "Chunked document translation tool")]
#[command(long_about = "doctran extracts text from .docx, .doc and .txt files and translates it through online translation services.

EXAMPLES:
    doctran report.docx                         # Translate using default config
    doctran -f report.docx                      # Force overwrite existing files
    doctran -p mymemory report.docx             # Use a specific provider
    doctran -s en -t fr notes.txt               # Translate from English to French
    doctran --stdout report.docx > report.txt   # Print the translation
    doctran --log-level debug /documents/       # Process entire directory with debug logging
    doctran languages                           # List supported languages
    doctran completions bash > doctran.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google    - Google Translate public endpoint (default, no key)
    microsoft - Microsoft Azure Translator (requires API key)
    mymemory  - MyMemory translation memory (optional e-mail raises quota)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Source language code or name (e.g., 'zh-CN', 'English', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code or name (e.g., 'es', 'French')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Directory for the translated file (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the translated text instead of writing a file
    #[arg(long, conflicts_with = "output_dir")]
    stdout: bool,

    /// Maximum characters per translation request
    #[arg(long)]
    max_chunk_size: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: Marker for log level
    fn get_marker_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_colour_for_level(level: Level) -> &'static str {
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_colour_for_level(level),
                now,
                Self::get_marker_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info by default; the level is raised or lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "doctran", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            print_languages();
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - top-level args without a subcommand
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let translate_args = TranslateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                provider: cli.provider,
                source_language: cli.source_language,
                target_language: cli.target_language,
                output_dir: cli.output_dir,
                stdout: cli.stdout,
                max_chunk_size: cli.max_chunk_size,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

fn print_languages() {
    println!("Source only:");
    println!("  {:<8} Auto-detect", language_utils::AUTO_DETECT);
    println!("Languages:");
    for entry in language_utils::target_languages() {
        println!("  {:<8} {}", entry.code, entry.name);
    }
    println!("Providers:");
    for provider in TranslationProvider::ALL {
        println!("  {:<10} {} - {}", provider.to_lowercase_string(), provider.display_name(), provider.description());
    }
}

fn load_config(options: &TranslateArgs) -> Result<Config> {
    let config_path = &options.config_path;

    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Command line options take precedence over the file
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(max_chunk_size) = options.max_chunk_size {
        config.translation.common.max_chunk_size = max_chunk_size;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.normalize_languages()
        .context("Unsupported language")?;
    config.validate()
        .context("Configuration validation failed")?;

    if language_utils::language_codes_match(&config.source_language, &config.target_language) {
        warn!(
            "Source and target language are both {}; the backend will likely return the text unchanged",
            config.target_language
        );
    }

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(&options)?;
    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::with_config(config)?
        .with_progress(!options.stdout);

    // Ctrl-C stops the run after the chunk in flight
    let cancel = controller.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current chunk...");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    if options.input_path.is_file() {
        let result = if options.stdout {
            controller.run_to_stdout(&options.input_path).await
                .map(|translated| println!("{}", translated))
        } else {
            let output_dir = match &options.output_dir {
                Some(dir) => dir.clone(),
                None => options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            };
            controller.run(options.input_path.clone(), output_dir, options.force_overwrite).await
                .map(|_| ())
        };

        if let Err(e) = result {
            if is_cancelled(&e) {
                warn!("{:#}", e);
                return Ok(());
            }
            return Err(e);
        }
    } else if options.input_path.is_dir() {
        if options.stdout {
            return Err(anyhow!("--stdout requires a single input file"));
        }
        let summary = controller.run_folder(options.input_path.clone(), options.force_overwrite).await?;
        if summary.failed > 0 {
            error!("{} file(s) could not be translated", summary.failed);
        }
        if summary.cancelled {
            return Ok(());
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    info!("Done.");
    Ok(())
}

// True when the run was stopped by Ctrl-C
fn is_cancelled(error: &anyhow::Error) -> bool {
    error.downcast_ref::<AppError>().is_some_and(AppError::is_cancelled)
}
