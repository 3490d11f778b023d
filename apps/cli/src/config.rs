//! CLI settings: flags, an optional YAML file, and defaults, in that order of
//! precedence.

use anyhow::{bail, Context, Result};
use playbill_statement::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Consulted when `--config` is not given.
pub const CONFIG_ENV: &str = "PLAYBILL_CONFIG";

const DEFAULT_PLAYS: &str = "plays.json";
const DEFAULT_INVOICES: &str = "invoices.json";

/// Values given on the command line. Unset flags are `None`.
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub plays: Option<PathBuf>,
    pub invoices: Option<PathBuf>,
    pub format: Option<String>,
}

/// Contents of a YAML config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub plays: Option<PathBuf>,
    pub invoices: Option<PathBuf>,
    pub format: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub plays: PathBuf,
    pub invoices: PathBuf,
    pub format: OutputFormat,
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        let slot = match arg.as_str() {
            "--config" => &mut parsed.config,
            "--plays" => &mut parsed.plays,
            "--invoices" => &mut parsed.invoices,
            "--format" => {
                parsed.format = Some(it.next().context("--format needs a value")?);
                continue;
            }
            other => {
                warn!(arg = other, "ignoring unrecognized argument");
                continue;
            }
        };
        let value = it.next().with_context(|| format!("{arg} needs a value"))?;
        *slot = Some(PathBuf::from(value));
    }
    Ok(parsed)
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_file_config(&text).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_file_config(text: &str) -> Result<FileConfig> {
    Ok(serde_yaml::from_str(text)?)
}

/// Merge flags over the file config over the defaults.
pub fn resolve(args: Args, file: FileConfig) -> Result<Settings> {
    let format = match args.format.or(file.format) {
        Some(raw) => raw.parse::<OutputFormat>()?,
        None => OutputFormat::default(),
    };
    let plays = args
        .plays
        .or(file.plays)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAYS));
    let invoices = args
        .invoices
        .or(file.invoices)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INVOICES));
    if plays.as_os_str().is_empty() || invoices.as_os_str().is_empty() {
        bail!("input paths must not be empty");
    }
    Ok(Settings {
        plays,
        invoices,
        format,
    })
}

/// Build settings from process arguments and, if present, a config file
/// named by `--config` or [`CONFIG_ENV`].
pub fn settings_from<I: IntoIterator<Item = String>>(
    args: I,
    env_config: Option<PathBuf>,
) -> Result<Settings> {
    let args = parse_args(args)?;
    let file = match args.config.clone().or(env_config) {
        Some(path) => load_file_config(&path)?,
        None => FileConfig::default(),
    };
    resolve(args, file)
}
