//! # Configuration Module
//!
//! This module resolves the run configuration from three layers, lowest to
//! highest precedence: built-in defaults, an optional `.addlicense.toml`
//! file, and command-line flags.
//!
//! The result is an immutable [`Settings`] value built once at program entry.
//! Everything that can fail here fails before any file is touched.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::Deserialize;

use crate::templates::{LicenseData, LicenseKind, LicenseTemplate, TemplateError, UnknownLicenseError};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".addlicense.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "ADDLICENSE_CONFIG";

/// Copyright holder used when none is configured.
pub const DEFAULT_HOLDER: &str = "Google LLC";

/// Error type for configuration operations.
///
/// Every variant is fatal: the run stops before processing any file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The license kind is not one of the built-ins.
  #[error(transparent)]
  UnknownLicense(#[from] UnknownLicenseError),

  /// The custom license file could not be read.
  #[error("license file '{path}': {source}")]
  LicenseFileRead { path: PathBuf, source: std::io::Error },

  /// The custom license file is not a valid template.
  #[error("license file '{path}': {source}")]
  LicenseFileParse { path: PathBuf, source: TemplateError },

  /// A built-in template failed to parse.
  #[error("built-in license {kind}: {source}")]
  BuiltinTemplate { kind: LicenseKind, source: TemplateError },

  /// A skip pattern is not a valid regular expression.
  #[error("can't compile regexp {pattern:?}: {source}")]
  InvalidPattern { pattern: String, source: regex::Error },

  /// The worker count is zero.
  #[error("jobs must be at least 1")]
  InvalidJobs,
}

/// Contents of a `.addlicense.toml` file.
///
/// ```toml
/// holder = "Acme Inc"
/// license = "mit"
/// year = "2024"
/// skip-dirs = ["^vendor$", "^node_modules$"]
/// skip-files = ['\.pb\.go$']
/// ```
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Copyright holder
  pub holder: Option<String>,

  /// Built-in license kind (apache, bsd, mit, mpl)
  pub license: Option<String>,

  /// Custom license template. Relative paths are resolved against the
  /// directory containing the config file.
  pub license_file: Option<PathBuf>,

  /// Copyright year(s)
  pub year: Option<String>,

  /// Regular expressions of directory names to skip
  #[serde(default)]
  pub skip_dirs: Vec<String>,

  /// Regular expressions of file names to skip
  #[serde(default)]
  pub skip_files: Vec<String>,

  /// Number of concurrent file workers
  pub jobs: Option<usize>,
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    if let Some(ref license_file) = config.license_file
      && license_file.is_relative()
      && let Some(base) = path.parent()
    {
      config.license_file = Some(base.join(license_file));
    }

    Ok(config)
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Explicit path from the `--config` flag
/// 2. Path from the `ADDLICENSE_CONFIG` environment variable
/// 3. `.addlicense.toml` in `search_dir`
///
/// An explicit path is returned even if it does not exist so that loading it
/// reports the error.
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
    && !env_path.is_empty()
  {
    verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, env_path);
    return Some(PathBuf::from(env_path));
  }

  let default_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if default_config.is_file() {
    verbose_log!("Using config: {}", default_config.display());
    return Some(default_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `Ok(None)` when discovery is disabled or finds nothing.
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Option<Config>, ConfigError> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  discover_config_path(explicit_path, search_dir)
    .map(|path| Config::load(&path))
    .transpose()
}

/// Values given on the command line. `None`/empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub holder: Option<String>,
  pub license: Option<String>,
  pub license_file: Option<PathBuf>,
  pub year: Option<String>,
  pub check_only: bool,
  pub skip_dirs: Vec<String>,
  pub skip_files: Vec<String>,
  pub jobs: Option<usize>,
}

/// Where the license template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseSource {
  Builtin(LicenseKind),
  File(PathBuf),
}

/// Fully resolved, immutable run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub holder: String,
  pub year: String,
  pub license: LicenseSource,
  pub check_only: bool,
  pub skip_dirs: Vec<String>,
  pub skip_files: Vec<String>,
  pub jobs: usize,
}

impl Settings {
  /// Merges the config file and command-line layers over the defaults.
  ///
  /// Scalars from the command line replace those from the file. Skip-pattern
  /// lists are concatenated, file entries first. For the license, the
  /// command line is consulted before the file and, within a layer, a license
  /// file wins over a license kind. A license name is only parsed when it is
  /// the source actually used, so a shadowed name is never an error.
  pub fn resolve(config: Option<Config>, cli: CliOverrides) -> Result<Self, ConfigError> {
    let config = config.unwrap_or_default();

    let license = match (cli.license_file, cli.license, config.license_file, config.license) {
      (Some(path), _, _, _) => LicenseSource::File(path),
      (None, Some(name), _, _) => LicenseSource::Builtin(name.parse()?),
      (None, None, Some(path), _) => LicenseSource::File(path),
      (None, None, None, Some(name)) => LicenseSource::Builtin(name.parse()?),
      (None, None, None, None) => LicenseSource::Builtin(LicenseKind::Apache),
    };

    let jobs = cli.jobs.or(config.jobs).unwrap_or_else(default_jobs);
    if jobs == 0 {
      return Err(ConfigError::InvalidJobs);
    }

    let mut skip_dirs = config.skip_dirs;
    skip_dirs.extend(cli.skip_dirs);
    let mut skip_files = config.skip_files;
    skip_files.extend(cli.skip_files);

    Ok(Self {
      holder: cli
        .holder
        .or(config.holder)
        .unwrap_or_else(|| DEFAULT_HOLDER.to_string()),
      year: cli.year.or(config.year).unwrap_or_else(default_year),
      license,
      check_only: cli.check_only,
      skip_dirs,
      skip_files,
      jobs,
    })
  }

  pub fn license_data(&self) -> LicenseData {
    LicenseData {
      year: self.year.clone(),
      holder: self.holder.clone(),
    }
  }

  /// Reads and parses the license template.
  pub fn load_template(&self) -> Result<LicenseTemplate, ConfigError> {
    match &self.license {
      LicenseSource::Builtin(kind) => {
        LicenseTemplate::builtin(*kind).map_err(|source| ConfigError::BuiltinTemplate { kind: *kind, source })
      }
      LicenseSource::File(path) => {
        verbose_log!("Loading template from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::LicenseFileRead {
          path: path.clone(),
          source,
        })?;
        LicenseTemplate::parse(&text).map_err(|source| ConfigError::LicenseFileParse {
          path: path.clone(),
          source,
        })
      }
    }
  }
}

/// The current local year.
pub fn default_year() -> String {
  chrono::Local::now().year().to_string()
}

/// Default worker count: four per logical CPU, since the work is I/O bound.
pub fn default_jobs() -> usize {
  num_cpus::get().saturating_mul(4).max(1)
}
