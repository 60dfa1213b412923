//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PreprocessorConfig;
use crate::domain::errors::PreprocessError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PreprocessorConfig
/// 4. Applies environment variable overrides (KMLPRE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use kml_preprocessor::config::loader::load_config;
///
/// let config = load_config("kml-preprocessor.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PreprocessorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PreprocessError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PreprocessError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PreprocessorConfig = toml::from_str(&contents)
        .map_err(|e| PreprocessError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PreprocessError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// The CLI runs without any configuration file; environment overrides still
/// apply in that case.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be loaded, or if the
/// overridden defaults fail validation.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<PreprocessorConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = PreprocessorConfig::default();
    apply_env_overrides(&mut config);
    config.validate().map_err(|e| {
        PreprocessError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PreprocessError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PreprocessError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using KMLPRE_* prefix
///
/// Environment variables follow the pattern: KMLPRE_<SECTION>_<KEY>
/// For example: KMLPRE_PIPELINE_MAX_LAYER_COUNT, KMLPRE_INDEX_MAPNIK_INDEX_PATH
fn apply_env_overrides(config: &mut PreprocessorConfig) {
    if let Ok(val) = std::env::var("KMLPRE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("KMLPRE_PIPELINE_MAX_LAYER_COUNT") {
        if let Ok(count) = val.parse() {
            config.pipeline.max_layer_count = count;
        }
    }
    if let Ok(val) = std::env::var("KMLPRE_PIPELINE_INDEX_WORTHY_SIZE") {
        if let Ok(size) = val.parse() {
            config.pipeline.index_worthy_size = size;
        }
    }

    if let Ok(val) = std::env::var("KMLPRE_INDEX_MAPNIK_INDEX_PATH") {
        config.index.mapnik_index_path = val;
    }
    if let Ok(val) = std::env::var("KMLPRE_INDEX_VALIDATE_FEATURES") {
        config.index.validate_features = val.parse().unwrap_or(true);
    }

    if let Ok(val) = std::env::var("KMLPRE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("KMLPRE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("KMLPRE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
