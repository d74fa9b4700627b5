use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use passgen::{CharacterCategory, GenerateError, GeneratorConfig};

mod clipboard;
mod generate;

#[derive(Parser)]
#[command(version, about = "Generate secure random passwords")]
enum Args {
    /// Generate one or more passwords.
    #[command(alias = "gen")]
    Generate {
        /// Password length; defaults to the configured length.
        #[arg(short, long)]
        length: Option<usize>,
        /// Character categories to include, comma separated (lowercase, uppercase, digit,
        /// symbol); defaults to the configured categories.
        #[arg(short, long, value_delimiter = ',')]
        categories: Option<Vec<CharacterCategory>>,
        /// How many passwords to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Copy the result to the clipboard instead of printing it.
        #[arg(long)]
        copy: bool,
        #[arg(long, env = "PASSGEN_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration as YAML.
    Config {
        #[arg(long, env = "PASSGEN_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    match args {
        Args::Generate {
            length,
            categories,
            count,
            copy,
            config,
        } => {
            let config = load_config(config)?;
            let options = generate::Options {
                length,
                categories,
                count,
                copy,
            };
            generate::generate(&config, options)?;
        }
        Args::Config { config } => {
            let config = load_config(config)?;
            io::stdout()
                .lock()
                .write_all(config.to_yaml()?.as_bytes())
                .context("failed to write configuration to stdout")?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        log::debug!("exiting with error: {err:?}");
        eprintln!("{err}");
        process::exit(1);
    }
}

/// The explicitly requested configuration, or the one in the user's config directory if there is
/// one, or the built-in defaults.
fn load_config(config_path: Option<PathBuf>) -> Result<GeneratorConfig, ProgError> {
    let path = match config_path {
        Some(p) => p,
        None => match default_config_path() {
            Some(p) if p.is_file() => p,
            _ => {
                log::debug!("no configuration file; using defaults");
                return Ok(GeneratorConfig::default());
            }
        },
    };
    log::debug!("loading configuration from {}", path.display());
    GeneratorConfig::load(&path).map_err(|err| ProgError::Config(path, err))
}

fn default_config_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let mut p = PathBuf::from(home);
    p.push(".config");
    p.push("passgen");
    p.push("config.yaml");
    Some(p)
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("Password length must be between {min} and {max}.")]
    InvalidLength { min: usize, max: usize },
    #[error("Select at least one character type.")]
    NoCategorySelected,
    #[error(
        "Password length {length} is too short to include all {categories} selected character \
         types."
    )]
    LengthTooShort { length: usize, categories: usize },
    #[error(
        "Secure password generation requires a working operating-system random number generator."
    )]
    SecureRandomUnavailable(#[source] passgen::RandomUnavailable),
    #[error("The count of passwords to generate must be at least 1.")]
    ZeroCount,
    #[error("Invalid configuration in {}: {}", .0.display(), .1)]
    Config(PathBuf, #[source] passgen::ConfigError),
    #[error("Clipboard unavailable.")]
    Clipboard(#[source] anyhow::Error),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<GenerateError> for ProgError {
    fn from(err: GenerateError) -> ProgError {
        match err {
            GenerateError::InvalidLength { min, max, .. } => ProgError::InvalidLength { min, max },
            GenerateError::NoCategorySelected => ProgError::NoCategorySelected,
            GenerateError::LengthTooShortForCategories { length, categories } => {
                ProgError::LengthTooShort { length, categories }
            }
            GenerateError::SecureRandomUnavailable(err) => ProgError::SecureRandomUnavailable(err),
        }
    }
}

impl From<passgen::ConfigError> for ProgError {
    fn from(err: passgen::ConfigError) -> ProgError {
        ProgError::Other(err.into())
    }
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}
