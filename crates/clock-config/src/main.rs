//! Clock screensaver configuration tool: entry point.
//!
//! Command-line counterpart of the screensaver's settings dialog: it loads
//! the properties file, applies one edit, and saves it again.
//!
//! # Usage
//!
//! ```text
//! clock-config [OPTIONS] <COMMAND>
//!
//! Commands:
//!   path      Print the config file path
//!   show      Print the effective settings
//!   get       Print one raw property
//!   set       Set one raw property
//!   scale     Set the clock size (percent of screen height)
//!   space     Set the gap between digit groups (percent)
//!   seconds   Show or hide seconds
//!   font      Use a custom font
//!   no-font   Go back to the built-in font
//!   fg        Set the foreground color (RRGGBB)
//!   bg        Set the background color (RRGGBB)
//!   reset     Restore default settings
//!
//! Options:
//!   --config <PATH>          Config file [env: CLOCK_CONFIG]
//!   --log-level <LEVEL>      Log filter when RUST_LOG is unset [default: warn]
//!   --retries <N>            Retry failed loads and saves N times [default: 0]
//!   --ignore-load-errors     Continue with defaults if the file cannot be loaded
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use clock_config::application::edit_properties::{set_property, validate_value};
use clock_config::application::load_settings::{load_config_with_recovery, LoadedConfig};
use clock_config::application::recovery::{Recovery, RetryPolicy};
use clock_config::application::save_settings::{
    save_properties_with_recovery, save_settings_with_recovery, SaveOutcome,
};
use clock_config::infrastructure::storage::FileStorage;
use clock_core::domain::settings::{keys, FONT_WEIGHT_DONT_CARE, PERCENT_MAX};
use clock_core::{encode_properties, Rgb, Settings};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Clock screensaver configuration tool.
#[derive(Debug, Parser)]
#[command(name = "clock-config", about = "Edit the clock screensaver configuration", version)]
struct Cli {
    /// Path of the properties file.  Defaults to the platform config directory.
    #[arg(long, global = true, env = "CLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// How many times to retry a failed load or save before giving up.
    #[arg(long, global = true, default_value_t = 0)]
    retries: u32,

    /// Continue with default settings when the file exists but cannot be
    /// read or parsed.
    #[arg(long, global = true)]
    ignore_load_errors: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Retries, then falls back to defaults or aborts per `--ignore-load-errors`.
    fn load_policy(&self) -> RetryPolicy {
        let exhausted = if self.ignore_load_errors {
            Recovery::Ignore
        } else {
            Recovery::Abort
        };
        RetryPolicy::new(self.retries, exhausted)
    }

    /// A save that keeps failing is always reported.
    fn save_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, Recovery::Abort)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the config file path.
    Path,
    /// Print the effective settings, defaults included.
    Show {
        #[arg(long, value_enum, default_value_t = ShowFormat::Properties)]
        format: ShowFormat,
    },
    /// Print the raw value of one property.
    Get { name: String },
    /// Set the raw value of one property.
    Set { name: String, value: String },
    #[command(flatten)]
    Edit(SettingsEdit),
}

/// Typed edits of the settings record, one per dialog control.
#[derive(Debug, Subcommand)]
enum SettingsEdit {
    /// Set the clock size as a percentage of the screen height.
    Scale {
        #[arg(value_parser = clap::value_parser!(u32).range(0..=PERCENT_MAX as i64))]
        percent: u32,
    },
    /// Set the gap between digit groups as a percentage.
    Space {
        #[arg(value_parser = clap::value_parser!(u32).range(0..=PERCENT_MAX as i64))]
        percent: u32,
    },
    /// Show or hide the seconds.
    Seconds {
        #[arg(action = clap::ArgAction::Set, value_parser = parse_switch)]
        show: bool,
    },
    /// Use a custom font.
    Font {
        #[arg(value_parser = parse_font_name)]
        name: String,
        /// Font weight (100 = thin … 900 = black, 0 = don't care).
        #[arg(long, default_value_t = FONT_WEIGHT_DONT_CARE)]
        weight: u32,
        #[arg(long)]
        italic: bool,
    },
    /// Go back to the built-in font.
    NoFont,
    /// Set the foreground color as RRGGBB.
    Fg {
        #[arg(value_parser = parse_color)]
        color: Rgb,
    },
    /// Set the background color as RRGGBB.
    Bg {
        #[arg(value_parser = parse_color)]
        color: Rgb,
    },
    /// Restore the default settings.
    Reset,
}

impl SettingsEdit {
    fn apply(self, settings: &mut Settings) {
        match self {
            SettingsEdit::Scale { percent } => settings.scale = percent,
            SettingsEdit::Space { percent } => settings.space = percent,
            SettingsEdit::Seconds { show } => settings.show_seconds = show,
            SettingsEdit::Font {
                name,
                weight,
                italic,
            } => {
                settings.use_custom_font = true;
                settings.font_name = name;
                settings.font_weight = weight;
                settings.font_italic = italic;
            }
            SettingsEdit::NoFont => settings.use_custom_font = false,
            SettingsEdit::Fg { color } => settings.fg_color = color,
            SettingsEdit::Bg { color } => settings.bg_color = color,
            SettingsEdit::Reset => *settings = Settings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShowFormat {
    /// `name=value` lines, as stored on disk.
    Properties,
    /// The settings record rendered as TOML.
    Toml,
}

/// Accepts the same literals as the file format (`yes`, `no`, `true`, `false`).
fn parse_switch(text: &str) -> Result<bool, String> {
    clock_core::properties::typed::parse_bool(text)
        .ok_or_else(|| format!("expected yes, no, true or false, got {text:?}"))
}

/// Rejects names the file could not store on one line.
fn parse_font_name(text: &str) -> Result<String, String> {
    validate_value(keys::FONT_NAME, text).map_err(|err| err.to_string())?;
    Ok(text.to_string())
}

/// Accepts exactly six hex digits.  Stricter than the file reader on purpose
/// so typos on the command line are reported instead of becoming `00`.
fn parse_color(text: &str) -> Result<Rgb, String> {
    if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected six hex digits (RRGGBB), got {text:?}"));
    }
    Rgb::from_hex_lenient(text).ok_or_else(|| format!("invalid color {text:?}"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let storage = match &cli.config {
        Some(path) => FileStorage::new(path),
        None => FileStorage::at_default_location().context("cannot locate the config file")?,
    };
    info!("using config file {}", storage.path().display());

    let load_policy = cli.load_policy();
    let save_policy = cli.save_policy();

    let load = || {
        load_config_with_recovery(&storage, |err, n| load_policy.decide(err, n))
            .with_context(|| format!("failed to load {}", storage.path().display()))
    };
    let save_context = || format!("failed to save {}", storage.path().display());

    match cli.command {
        Command::Path => println!("{}", storage.path().display()),
        Command::Show { format } => {
            let loaded = load()?;
            print!("{}", render_settings(&loaded.settings, format)?);
        }
        Command::Get { name } => {
            let loaded = load()?;
            match loaded.properties.get(&name) {
                Ok(value) => println!("{value}"),
                Err(_) => bail!("property {name} is not set"),
            }
        }
        Command::Set { name, value } => {
            let LoadedConfig { mut properties, .. } = load()?;
            set_property(&mut properties, &name, &value)?;
            let outcome = save_properties_with_recovery(&storage, &properties, |err, n| {
                save_policy.decide(err, n)
            })
            .with_context(save_context)?;
            report(outcome);
        }
        Command::Edit(edit) => {
            let LoadedConfig {
                mut properties,
                mut settings,
                ..
            } = load()?;
            edit.apply(&mut settings);
            let outcome = save_settings_with_recovery(&storage, &mut properties, &settings, |err, n| {
                save_policy.decide(err, n)
            })
            .with_context(save_context)?;
            report(outcome);
        }
    }
    Ok(())
}

fn render_settings(settings: &Settings, format: ShowFormat) -> anyhow::Result<String> {
    match format {
        ShowFormat::Properties => {
            let bytes = encode_properties(&settings.to_properties()?)?;
            String::from_utf8(bytes).context("encoded settings are not UTF-8")
        }
        ShowFormat::Toml => toml::to_string_pretty(settings).context("failed to render settings"),
    }
}

fn report(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Saved => info!("configuration saved"),
        SaveOutcome::Skipped => info!("configuration not saved"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
