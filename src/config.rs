//! Runtime configuration.
//!
//! The only setting is where the model artifact lives. It resolves as:
//! `--model` flag, then `MEDINSURE_MODEL` (a `.env` file is honored), then
//! the bundled default.

use std::path::{Path, PathBuf};

pub const MODEL_PATH_ENV: &str = "MEDINSURE_MODEL";
pub const DEFAULT_MODEL_PATH: &str = "models/insurance_gbt.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub model_path: PathBuf,
}

impl Settings {
    pub fn from_env(cli_model: Option<&Path>) -> Self {
        dotenvy::dotenv().ok();
        let env_model = std::env::var(MODEL_PATH_ENV).ok();
        Self {
            model_path: resolve_model_path(cli_model, env_model.as_deref()),
        }
    }
}

fn resolve_model_path(cli_model: Option<&Path>, env_model: Option<&str>) -> PathBuf {
    if let Some(path) = cli_model {
        return path.to_path_buf();
    }
    match env_model.map(str::trim) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_MODEL_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment() {
        let path = resolve_model_path(Some(Path::new("a.json")), Some("b.json"));
        assert_eq!(path, PathBuf::from("a.json"));
    }

    #[test]
    fn environment_wins_over_default() {
        assert_eq!(resolve_model_path(None, Some("b.json")), PathBuf::from("b.json"));
    }

    #[test]
    fn blank_environment_falls_back_to_default() {
        assert_eq!(resolve_model_path(None, Some("  ")), PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(resolve_model_path(None, None), PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
