use clap::{Parser, Subcommand};
use log::{debug, error, info};
use std::io::Write;

use timeutils_rust::config::{Config, ConfigManager};
use timeutils_rust::{
    current_time, current_timezone, distance_with_clock, from_unix_timestamp_with, parse_instant,
    to_unix_timestamp, FixedClock, RelativeOptions, SystemClock, UnixFormatOptions,
};

#[derive(Parser)]
#[command(name = "timeutils-rust")]
#[command(about = "Date and time helpers: patterns, relative phrases, Unix timestamps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    verbose: bool,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current local time
    Now {
        #[arg(short, long, help = "Pattern, e.g. 'YYYY-MM-DD hh:mm:ss a'")]
        pattern: Option<String>,
    },
    /// Describe how far a time is from now, e.g. "about 1 hour ago"
    Distance {
        #[arg(help = "Target time (RFC 3339, 'Mar 26, 2024 17:55:51', epoch seconds, ...)")]
        target: String,
        #[arg(short = 's', long, help = "Use fine-grained buckets under 90 seconds")]
        include_seconds: bool,
        #[arg(short, long, help = "Append 'ago' or 'from now'")]
        add_suffix: bool,
        #[arg(short, long, help = "Reference time instead of the system clock")]
        reference: Option<String>,
    },
    /// Convert a time to Unix seconds
    ToUnix {
        #[arg(help = "Target time; omit or pass 'now' for the current time")]
        target: Option<String>,
    },
    /// Render Unix seconds in local time
    FromUnix {
        #[arg(allow_hyphen_values = true)]
        timestamp: i64,
        #[arg(short, long, help = "Pattern, e.g. 'MONTHNAME DD, YYYY hh:mm:ss a'")]
        pattern: Option<String>,
        #[arg(long, help = "Append the local timezone name")]
        show_timezone: bool,
    },
    /// Show the local timezone and its UTC offset
    Timezone {
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
    /// Show the config file location and contents
    ShowConfig,
    /// Write a config file with the default settings
    InitConfig {
        #[arg(long, help = "Overwrite an existing config file")]
        force: bool,
    },
    /// Delete the config file
    ClearConfig {
        #[arg(long, help = "Clear config without confirmation")]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.debug);

    info!("Starting timeutils-rust CLI");
    debug!(
        "CLI arguments parsed: verbose={}, debug={}",
        cli.verbose, cli.debug
    );

    let config_manager = ConfigManager::new()?;
    let config = match config_manager.load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config, using defaults: {}", e);
            Config::new()
        }
    };

    if let Err(e) = run(cli.command, &config, &config_manager) {
        error!("Command failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(
    command: Commands,
    config: &Config,
    config_manager: &ConfigManager,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Now { pattern } => {
            let pattern = pattern.as_deref().unwrap_or(&config.default_pattern);
            debug!("Formatting current time with pattern '{}'", pattern);
            println!("{}", current_time(pattern));
        }
        Commands::Distance {
            target,
            include_seconds,
            add_suffix,
            reference,
        } => {
            let _span = tracing::info_span!("distance", target = %target).entered();

            // Flags can only switch options on; config supplies the baseline.
            let options = RelativeOptions {
                include_seconds: include_seconds || config.relative.include_seconds,
                add_suffix: add_suffix || config.relative.add_suffix,
            };
            info!(
                "Computing distance - target: {}, options: {:?}, reference: {:?}",
                target, options, reference
            );

            let phrase = match reference {
                Some(reference) => {
                    let clock = FixedClock(parse_instant(reference.as_str())?);
                    distance_with_clock(&clock, target, options)?
                }
                None => distance_with_clock(&SystemClock, target, options)?,
            };
            println!("{}", phrase);
        }
        Commands::ToUnix { target } => {
            let timestamp = to_unix_timestamp(target.as_deref())?;
            println!("{}", timestamp);
        }
        Commands::FromUnix {
            timestamp,
            pattern,
            show_timezone,
        } => {
            let pattern = pattern.as_deref().unwrap_or(&config.default_pattern);
            let options = UnixFormatOptions { show_timezone };
            println!("{}", from_unix_timestamp_with(timestamp, pattern, options)?);
        }
        Commands::Timezone { json } => {
            let zone = current_timezone();
            if json {
                let value = serde_json::json!({
                    "name": zone.name,
                    "offset_seconds": zone.offset_seconds,
                    "offset_hours": zone.offset_hours(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", zone);
            }
        }
        Commands::ShowConfig => {
            println!("📄 Config file: {}", config_manager.get_config_path().display());
            if !config_manager.config_exists() {
                println!("ℹ️  No config file found, using defaults");
            }
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        Commands::InitConfig { force } => {
            if config_manager.config_exists() && !force {
                println!(
                    "ℹ️  Config already exists at: {} (use --force to overwrite)",
                    config_manager.get_config_path().display()
                );
                return Ok(());
            }
            config_manager.save_config(&Config::new())?;
            println!(
                "✅ Wrote default config to: {}",
                config_manager.get_config_path().display()
            );
        }
        Commands::ClearConfig { force } => {
            if !config_manager.config_exists() {
                println!("ℹ️  No config file found");
                return Ok(());
            }

            if !force {
                println!(
                    "⚠️  This will delete the config file at: {}",
                    config_manager.get_config_path().display()
                );
                print!("Are you sure? (y/N): ");
                std::io::stdout().flush()?;

                let mut input = String::new();
                std::io::stdin().read_line(&mut input)?;

                if !input.trim().to_lowercase().starts_with('y') {
                    println!("❌ Config clear cancelled");
                    return Ok(());
                }
            }

            config_manager.clear_config()?;
            println!("✅ Config cleared successfully");
        }
    }

    Ok(())
}

/// Initialize logging based on CLI flags and environment variables
fn init_logging(verbose: bool, debug: bool) {
    use std::path::PathBuf;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    // Log directory next to the executable
    let exe_path = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
    let log_dir = exe_path
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "timeutils-rust.log");

    // Console output goes to stderr so command output stays pipeable
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "timeutils_rust={},timeutils-rust={}",
            log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();
}
