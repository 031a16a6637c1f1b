//! Loader for sharecount configuration with YAML + environment overlays.
//!
//! Every section is optional; an empty configuration fetches every network
//! concurrently from the stock endpoints with `Connection: close` as the only
//! default header. Environment variables use the `SHARECOUNT__` prefix with
//! `__` between path segments, e.g. `SHARECOUNT__FETCH__MODE=sequential`.
//! `${VAR}` placeholders in string values are expanded after merging.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use sharecount_common::observability::{LogConfig, LogFormat};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "SHARECOUNT";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareCountConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How a multi-network request is dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One request at a time, stopping at the first failure.
    Sequential,
    /// All requests in flight at once.
    #[default]
    Concurrent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchConfig {
    #[serde(default)]
    pub mode: FetchMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: None,
            headers: default_headers(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Connection".to_string(), "close".to_string())])
}

/// Per-network endpoint templates. Each must contain a `{url}` placeholder;
/// unset entries fall back to the public endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub pinterest: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub stumbleupon: Option<String>,
}

impl EndpointConfig {
    /// Look up an override by network identifier.
    pub fn get(&self, network: &str) -> Option<&str> {
        match network {
            "facebook" => self.facebook.as_deref(),
            "pinterest" => self.pinterest.as_deref(),
            "linkedin" => self.linkedin.as_deref(),
            "stumbleupon" => self.stumbleupon.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_true")]
    pub file: bool,
    #[serde(default)]
    pub stderr: bool,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            dir: None,
            format: LogFormat::Text,
            file: true,
            stderr: false,
            filter: default_filter(),
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            app_name: self.app_name.clone(),
            log_dir: self.dir.clone(),
            emit_file: self.file,
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

fn default_app_name() -> String {
    "sharecount".into()
}
fn default_filter() -> String {
    "info".into()
}
fn default_true() -> bool {
    true
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => break,
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder over the `config` crate wiring (files + env overrides).
pub struct ShareCountConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ShareCountConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareCountConfigLoader {
    /// Start with no files; `SHARECOUNT__` environment overrides are applied
    /// on top of whatever gets attached.
    ///
    /// ```
    /// use sharecount_config::{FetchMode, ShareCountConfigLoader};
    ///
    /// let config = ShareCountConfigLoader::new()
    ///     .with_yaml_str("version: '1'\nfetch:\n  mode: sequential")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.fetch.mode, FetchMode::Sequential);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a required YAML/TOML/JSON file; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is skipped when missing, so deployments can run on
    /// environment variables alone.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders and deserialize.
    ///
    /// ```
    /// use sharecount_config::ShareCountConfigLoader;
    ///
    /// unsafe { std::env::set_var("FB_STAGING", "http://staging.local"); }
    ///
    /// let config = ShareCountConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// endpoints:
    ///   facebook: "${FB_STAGING}/stats?urls={url}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(
    ///     config.endpoints.get("facebook"),
    ///     Some("http://staging.local/stats?urls={url}")
    /// );
    /// assert_eq!(config.endpoints.get("linkedin"), None);
    ///
    /// unsafe { std::env::remove_var("FB_STAGING"); }
    /// ```
    pub fn load(self) -> Result<ShareCountConfig, ConfigError> {
        // Env goes last so it wins over every file.
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
