//! Resolves [`EmbedConfig`] from defaults, a TOML file, the environment and flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use embedcmp_embeddings::EmbedConfig;
use tracing::debug;

use crate::args::GlobalArgs;

pub fn resolve(args: &GlobalArgs) -> Result<EmbedConfig> {
    let config = match &args.config {
        Some(path) => load_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => load_file(&path)?,
            None => EmbedConfig::default(),
        },
    };

    let config = apply_env(config, |key| std::env::var(key).ok())?;
    Ok(apply_flags(config, args))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("embedcmp").join("config.toml"))
}

fn load_file(path: &Path) -> Result<EmbedConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn apply_env(
    mut config: EmbedConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<EmbedConfig> {
    if let Some(key) = var("OPENAI_API_KEY") {
        config.api_key = Some(key);
    }
    if let Some(url) = var("OPENAI_BASE_URL") {
        config.base_url = url;
    }
    if let Some(model) = var("EMBEDCMP_MODEL") {
        config.model = model;
    }
    if let Some(dims) = var("EMBEDCMP_DIMENSIONS") {
        let dims = dims
            .parse()
            .with_context(|| format!("EMBEDCMP_DIMENSIONS is not a number: {dims}"))?;
        config.dimensions = Some(dims);
    }
    if let Some(store) = var("EMBEDCMP_STORE") {
        config.store_path = PathBuf::from(store);
    }
    Ok(config)
}

fn apply_flags(mut config: EmbedConfig, args: &GlobalArgs) -> EmbedConfig {
    if let Some(store) = &args.store {
        config.store_path = store.clone();
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(dims) = args.dimensions {
        config.dimensions = Some(dims);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_layers_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "model = \"from-file\"\nbase_url = \"http://file\"\napi_key = \"file-key\"\n",
        )
        .unwrap();

        let config = load_file(&path).unwrap();
        assert_eq!(config.model, "from-file");
        assert_eq!(config.api_key.as_deref(), Some("file-key"));

        let config = apply_env(
            config,
            env(&[("EMBEDCMP_MODEL", "from-env"), ("OPENAI_API_KEY", "env-key")]),
        )
        .unwrap();
        assert_eq!(config.model, "from-env");
        assert_eq!(config.base_url, "http://file");
        assert_eq!(config.api_key.as_deref(), Some("env-key"));

        let args = GlobalArgs {
            model: Some("from-flag".to_string()),
            store: Some(PathBuf::from("/tmp/ref.json")),
            ..GlobalArgs::default()
        };
        let config = apply_flags(config, &args);
        assert_eq!(config.model, "from-flag");
        assert_eq!(config.store_path, PathBuf::from("/tmp/ref.json"));
    }

    #[test]
    fn test_bad_dimensions_env() {
        let err = apply_env(EmbedConfig::default(), env(&[("EMBEDCMP_DIMENSIONS", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("EMBEDCMP_DIMENSIONS"));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = GlobalArgs {
            config: Some(dir.path().join("absent.toml")),
            ..GlobalArgs::default()
        };
        assert!(resolve(&args).is_err());
    }
}
