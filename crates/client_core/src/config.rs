use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use crate::view_state::ResolutionPolicy;

pub const DEFAULT_BASE_ENDPOINT: &str = "http://3.17.25.67:9090";
pub const SETTINGS_FILE_NAME: &str = "compression.toml";

/// Which resolution wins when submissions overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Responses older than the last committed one are dropped.
    #[default]
    LastIssuedWins,
    /// Every response commits in arrival order, so a slow older request
    /// can overwrite a newer one.
    LastResolvedWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureDisplay {
    #[default]
    Surface,
    /// Failed requests leave the view untouched and show nothing.
    Silent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathEncoding {
    #[default]
    Percent,
    /// Sentence appended verbatim. Spaces and `?`/`#`/`/` corrupt the request.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    setting: &'static str,
    value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value '{}'", self.setting, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

fn normalize_variant(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for ResponseOrdering {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "last_issued_wins" | "last_issued" => Ok(Self::LastIssuedWins),
            "last_resolved_wins" | "last_resolved" => Ok(Self::LastResolvedWins),
            _ => Err(UnknownVariant {
                setting: "response_ordering",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for FailureDisplay {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "surface" | "show" => Ok(Self::Surface),
            "silent" | "hide" => Ok(Self::Silent),
            _ => Err(UnknownVariant {
                setting: "failure_display",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for PathEncoding {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "percent" | "encoded" => Ok(Self::Percent),
            "raw" => Ok(Self::Raw),
            _ => Err(UnknownVariant {
                setting: "path_encoding",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_endpoint: String,
    pub ordering: ResponseOrdering,
    pub failures: FailureDisplay,
    pub path_encoding: PathEncoding,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_endpoint: DEFAULT_BASE_ENDPOINT.into(),
            ordering: ResponseOrdering::default(),
            failures: FailureDisplay::default(),
            path_encoding: PathEncoding::default(),
        }
    }
}

impl ClientSettings {
    pub fn policy(&self) -> ResolutionPolicy {
        ResolutionPolicy {
            ordering: self.ordering,
            failures: self.failures,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_endpoint: Option<String>,
    response_ordering: Option<String>,
    failure_display: Option<String>,
    path_encoding: Option<String>,
}

/// Defaults, then the TOML file, then environment overrides.
///
/// An explicit `path` must exist and parse. Without one, `compression.toml`
/// in the working directory is used when present.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            apply_file_settings(&mut settings, &raw)
                .with_context(|| format!("invalid settings file '{}'", path.display()))?;
            info!(path = %path.display(), "loaded compression settings");
        }
        None => {
            let default_path = PathBuf::from(SETTINGS_FILE_NAME);
            if let Ok(raw) = fs::read_to_string(&default_path) {
                if let Err(error) = apply_file_settings(&mut settings, &raw) {
                    warn!(path = %default_path.display(), %error, "ignoring unreadable settings file");
                }
            }
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file_settings(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.base_endpoint {
        settings.base_endpoint = v;
    }
    if let Some(v) = file_cfg.response_ordering {
        set_parsed(&mut settings.ordering, &v);
    }
    if let Some(v) = file_cfg.failure_display {
        set_parsed(&mut settings.failures, &v);
    }
    if let Some(v) = file_cfg.path_encoding {
        set_parsed(&mut settings.path_encoding, &v);
    }
    Ok(())
}

pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("COMPRESSION_ENDPOINT") {
        settings.base_endpoint = v;
    }
    if let Some(v) = lookup("APP__BASE_ENDPOINT") {
        settings.base_endpoint = v;
    }
    if let Some(v) = lookup("APP__RESPONSE_ORDERING") {
        set_parsed(&mut settings.ordering, &v);
    }
    if let Some(v) = lookup("APP__FAILURE_DISPLAY") {
        set_parsed(&mut settings.failures, &v);
    }
    if let Some(v) = lookup("APP__PATH_ENCODING") {
        set_parsed(&mut settings.path_encoding, &v);
    }
}

fn set_parsed<T>(slot: &mut T, raw: &str)
where
    T: FromStr<Err = UnknownVariant> + fmt::Debug,
{
    match raw.parse::<T>() {
        Ok(value) => *slot = value,
        Err(error) => warn!(%error, keeping = ?slot, "invalid setting value"),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn defaults_point_at_the_public_endpoint_and_guard_ordering() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_endpoint, "http://3.17.25.67:9090");
        assert_eq!(settings.ordering, ResponseOrdering::LastIssuedWins);
        assert_eq!(settings.failures, FailureDisplay::Surface);
        assert_eq!(settings.path_encoding, PathEncoding::Percent);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = ClientSettings::default();
        apply_file_settings(
            &mut settings,
            r#"
                base_endpoint = "http://127.0.0.1:9090"
                response_ordering = "last-resolved-wins"
                failure_display = "silent"
                path_encoding = "raw"
            "#,
        )
        .expect("parse");

        assert_eq!(settings.base_endpoint, "http://127.0.0.1:9090");
        assert_eq!(settings.ordering, ResponseOrdering::LastResolvedWins);
        assert_eq!(settings.failures, FailureDisplay::Silent);
        assert_eq!(settings.path_encoding, PathEncoding::Raw);
    }

    #[test]
    fn unknown_enum_values_keep_previous_setting() {
        let mut settings = ClientSettings::default();
        apply_file_settings(&mut settings, r#"response_ordering = "first-wins""#)
            .expect("parse");
        assert_eq!(settings.ordering, ResponseOrdering::LastIssuedWins);
    }

    #[test]
    fn env_overrides_win_and_app_prefix_beats_plain_name() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("COMPRESSION_ENDPOINT", "http://plain:1"),
            ("APP__BASE_ENDPOINT", "http://prefixed:2"),
            ("APP__FAILURE_DISPLAY", "SILENT"),
        ]);
        let mut settings = ClientSettings::default();
        apply_env_overrides(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.base_endpoint, "http://prefixed:2");
        assert_eq!(settings.failures, FailureDisplay::Silent);
        assert_eq!(settings.ordering, ResponseOrdering::LastIssuedWins);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let missing = env::temp_dir().join(format!("compression_missing_{suffix}.toml"));

        let err = load_settings(Some(&missing)).expect_err("must fail");
        assert!(err.to_string().contains("failed to read settings file"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("compression_settings_{suffix}.toml"));
        fs::write(&path, "path_encoding = \"raw\"\n").expect("write settings");

        let settings = load_settings(Some(&path)).expect("load");
        assert_eq!(settings.path_encoding, PathEncoding::Raw);

        fs::remove_file(path).expect("cleanup");
    }
}
