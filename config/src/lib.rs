//! Configuration loading for Aula.
//!
//! The config file lives at `~/.aula/config.toml` (or wherever `AULA_CONFIG`
//! points). Every section is optional; missing sections resolve to defaults.
//!
//! ```toml
//! [sync]
//! primary_student = "s1"
//! author = "Dr. Juan Pérez"
//! course_name = "Differential Calculus"
//!
//! [navigation]
//! home = "dashboard"
//! breadcrumbs = "shown"
//!
//! [session]
//! role = "student"
//! student = "s1"
//! seed = "${HOME}/aula/seed.json"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use aula_types::{Identity, NavigationSettings, Role, SyncSettings};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "AULA_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct AulaConfig {
    pub sync: Option<SyncSettings>,
    pub navigation: Option<NavigationSettings>,
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Who signs in and which data set seeds the session.
#[derive(Debug, Default, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub role: Role,
    /// Gradebook row of the signed-in student. Defaults to the primary student.
    pub student: Option<String>,
    /// JSON seed file. `${VAR}` references are expanded. Absent means the demo seed.
    pub seed: Option<String>,
}

impl AulaConfig {
    /// Load the config from the default location.
    ///
    /// Returns `Ok(None)` when no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn sync_settings(&self) -> SyncSettings {
        self.sync.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn navigation_settings(&self) -> NavigationSettings {
        self.navigation.unwrap_or_default()
    }

    /// The identity the session starts with.
    #[must_use]
    pub fn identity(&self) -> Identity {
        let session = self.session.as_ref();
        match session.map(|s| s.role).unwrap_or_default() {
            Role::Professor => Identity::professor(),
            Role::Student => {
                let student = session
                    .and_then(|s| s.student.clone())
                    .unwrap_or_else(|| self.sync_settings().primary_student().to_string());
                Identity::student(student)
            }
        }
    }

    /// Seed file path with environment variables expanded.
    #[must_use]
    pub fn seed_path(&self) -> Option<PathBuf> {
        self.session
            .as_ref()
            .and_then(|s| s.seed.as_deref())
            .map(|raw| PathBuf::from(expand_env_vars(raw)))
    }
}

/// Expand `${VAR}` references. Unset variables expand to nothing; an
/// unterminated `${` is kept literally.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".aula").join("config.toml"))
}
