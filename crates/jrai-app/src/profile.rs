use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use jrai_config::Config;

/// Config from a JSON file when given, otherwise from the environment.
///
/// Fields missing from the file keep their environment defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_uses_environment() {
        let config = load_config(None).unwrap();
        assert_eq!(config.quiz.batch_size, 6);
    }

    #[test]
    fn file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jrai.json");
        std::fs::write(&path, r#"{"quiz": {"batch_size": 10}, "admin_secret": "s3cret"}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.quiz.batch_size, 10);
        assert_eq!(config.admin_secret, "s3cret");
        assert_eq!(config.audio.sample_rate, 24_000);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jrai.json");
        std::fs::write(&path, "{").unwrap();
        assert!(load_config(Some(&path)).is_err());
        assert!(load_config(Some(&dir.path().join("missing.json"))).is_err());
    }
}
