use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, DatasetSettings, LoggingSettings, OutputFormat, ReportSettings};

/// The largest number of decimal places a report may show.
pub const MAX_DECIMALS: u32 = 6;

/// Loads the application configuration.
///
/// Sources are layered as built-in defaults, then the TOML file at `path` (if it
/// exists), then `SALESBOARD__*` environment variables such as
/// `SALESBOARD__DATASET__PATH`. The merged result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_env(path, environment())
}

/// Like [`load_config`], but reads overrides from `env` instead of the process
/// environment layer. `env` should be built from [`environment`].
pub fn load_config_with_env(path: &Path, env: Environment) -> Result<Config, ConfigError> {
    let builder = defaults()?
        .add_source(File::from(path).required(false))
        .add_source(env);

    let config = finish(builder)?;
    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

/// The `SALESBOARD__<SECTION>__<KEY>` environment source.
pub fn environment() -> Environment {
    Environment::with_prefix("SALESBOARD")
        .separator("__")
        .try_parsing(true)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(config::Config::builder()
        .set_default("dataset.path", "Superstore_Sales_utf8.csv")?
        .set_default("dataset.date_formats", vec!["%m/%d/%Y", "%Y-%m-%d"])?
        .set_default("report.currency_symbol", "$")?
        .set_default("report.decimals", 2)?
        .set_default("report.format", "table")?
        .set_default("report.overview_rows", 20)?
        .set_default("logging.level", "warn")?)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.dataset.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError("dataset.path must not be empty".to_string()));
    }
    if config.dataset.date_formats.is_empty() {
        return Err(ConfigError::ValidationError(
            "dataset.date_formats must list at least one format".to_string(),
        ));
    }
    if config.report.decimals > MAX_DECIMALS {
        return Err(ConfigError::ValidationError(format!(
            "report.decimals must be at most {MAX_DECIMALS}, got {}",
            config.report.decimals
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        finish(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let config = from_toml("").unwrap();
        assert_eq!(config.dataset.path, Path::new("Superstore_Sales_utf8.csv"));
        assert_eq!(config.dataset.date_formats, vec!["%m/%d/%Y", "%Y-%m-%d"]);
        assert_eq!(config.report.currency_symbol, "$");
        assert_eq!(config.report.decimals, 2);
        assert_eq!(config.report.format, OutputFormat::Table);
        assert_eq!(config.report.default_category, None);
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn file_values_override_defaults() {
        let config = from_toml(
            r#"
            [dataset]
            path = "data/sales.csv"

            [report]
            currency_symbol = "€"
            default_category = "Technology"
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.dataset.path, Path::new("data/sales.csv"));
        assert_eq!(config.report.currency_symbol, "€");
        assert_eq!(config.report.default_category.as_deref(), Some("Technology"));
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.overview_rows, 20);
    }

    #[test]
    fn too_many_decimals_is_rejected() {
        let err = from_toml("[report]\ndecimals = 9\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_date_formats_are_rejected() {
        let err = from_toml("[dataset]\ndate_formats = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn empty_dataset_path_is_rejected() {
        let err = from_toml("[dataset]\npath = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("dataset.path")));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config_with_env(Path::new("does-not-exist/salesboard.toml"), env(&[])).unwrap();
        assert_eq!(config.dataset.path, Path::new("Superstore_Sales_utf8.csv"));
        assert_eq!(config.report.decimals, 2);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load_config_with_env(
            Path::new("does-not-exist/salesboard.toml"),
            env(&[
                ("SALESBOARD__DATASET__PATH", "from_env.csv"),
                ("SALESBOARD__REPORT__DECIMALS", "3"),
                ("SALESBOARD__REPORT__FORMAT", "json"),
                ("UNRELATED__REPORT__DECIMALS", "5"),
            ]),
        )
        .unwrap();
        assert_eq!(config.dataset.path, Path::new("from_env.csv"));
        assert_eq!(config.report.decimals, 3);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.currency_symbol, "$");
    }

    #[test]
    fn environment_values_are_validated() {
        let err = load_config_with_env(
            Path::new("does-not-exist/salesboard.toml"),
            env(&[("SALESBOARD__REPORT__DECIMALS", "12")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
