use crate::diagnostics::DiagnosticKind;
use crate::error::ConfigError;
use crate::theme::{ThemeVariable, ThemeVariableRegistry, is_valid_css_property_name};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "tailcheck.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,
    /// Alias name to the utilities it expands to.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub lint: Lint,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Theme {
    #[serde(default)]
    pub variables: BTreeMap<String, ThemeVariable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Lint {
    /// Diagnostic kinds reported as errors.
    #[serde(default)]
    pub escalate: Vec<DiagnosticKind>,
}

impl Config {
    pub fn registry(&self) -> ThemeVariableRegistry {
        let mut registry = ThemeVariableRegistry::new();
        for (name, variable) in &self.theme.variables {
            registry.insert_variable(name.clone(), variable.clone());
        }
        for (name, expansion) in &self.aliases {
            registry.insert_alias(name.clone(), expansion.clone());
        }
        registry
    }

    pub fn escalated_kinds(&self) -> BTreeSet<DiagnosticKind> {
        self.lint.escalate.iter().copied().collect()
    }
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&text, path)?;
    tracing::debug!(
        path = %path.display(),
        variables = config.theme.variables.len(),
        aliases = config.aliases.len(),
        "loaded config"
    );
    Ok(config)
}

/// Loads `explicit` when given, otherwise `tailcheck.toml` from `base` if it
/// exists, otherwise the default config.
pub fn discover(explicit: Option<&Path>, base: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load(path);
    }
    let candidate: PathBuf = base.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        return load(&candidate);
    }
    Ok(Config::default())
}

fn parse(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(name) = config
        .theme
        .variables
        .keys()
        .find(|name| !name.starts_with("--") || !is_valid_css_property_name(name))
    {
        return Err(ConfigError::InvalidVariable { name: name.clone() });
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{Config, discover, load};
    use crate::diagnostics::DiagnosticKind;
    use crate::error::ConfigError;
    use crate::theme::{ColorMode, ThemeTokenKind};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("tailcheck.toml");
        fs::write(&path, text).expect("config should be written");
        path
    }

    #[test]
    fn defaults_when_empty() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "");
        let config = load(&path).expect("config should parse");
        assert_eq!(config, Config::default());
        assert!(config.registry().is_empty());
        assert!(config.escalated_kinds().is_empty());
    }

    #[test]
    fn loads_variables_aliases_and_lint() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(
            &dir,
            r##"
[theme.variables."--color-brand"]
kind = "color"
light = "#2b7fff"
dark = "oklch(70% 0.15 250)"

[theme.variables."--spacing-gutter"]
kind = "spacing"
light = "1.5rem"

[aliases]
card = "p-4 rounded-lg"

[lint]
escalate = ["conflicting-styles", "unknown-class"]
"##,
        );
        let config = load(&path).expect("config should parse");
        let registry = config.registry();

        let brand = registry
            .variable("--color-brand")
            .expect("brand should be registered");
        assert_eq!(brand.kind, ThemeTokenKind::Color);
        assert_eq!(
            registry
                .variables()
                .map(|(name, variable)| (name, variable.kind))
                .collect::<Vec<_>>(),
            vec![
                ("--color-brand", ThemeTokenKind::Color),
                ("--spacing-gutter", ThemeTokenKind::Spacing),
            ]
        );
        assert_eq!(
            registry.value_for("--color-brand", ColorMode::Dark),
            Some("oklch(70% 0.15 250)")
        );
        assert_eq!(
            registry.value_for("--spacing-gutter", ColorMode::Dark),
            Some("1.5rem")
        );
        assert_eq!(registry.alias("card"), Some("p-4 rounded-lg"));
        assert_eq!(
            config.escalated_kinds().into_iter().collect::<Vec<_>>(),
            vec![DiagnosticKind::UnknownClass, DiagnosticKind::ConflictingStyles]
        );
    }

    #[test]
    fn rejects_unknown_kinds() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(
            &dir,
            "[theme.variables.\"--color-x\"]\nkind = \"paint\"\nlight = \"#000000\"\n",
        );
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));

        let path = write_config(&dir, "[lint]\nescalate = [\"everything\"]\n");
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn rejects_malformed_variable_names() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(
            &dir,
            "[theme.variables.\"color brand\"]\nkind = \"color\"\nlight = \"#000000\"\n",
        );
        match load(&path) {
            Err(ConfigError::InvalidVariable { name }) => assert_eq!(name, "color brand"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reports_missing_explicit_file() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            discover(Some(&missing), dir.path()),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn discovers_default_file() {
        let dir = TempDir::new().expect("temp dir");
        assert_eq!(
            discover(None, dir.path()).expect("default config"),
            Config::default()
        );
        write_config(&dir, "[aliases]\nbtn = \"px-4 py-2\"\n");
        let config = discover(None, dir.path()).expect("discovered config");
        assert_eq!(config.aliases["btn"], "px-4 py-2");
    }
}
