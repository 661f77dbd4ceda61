use crate::Result;
use crate::defects::{Severity, Stage};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Number of quality bands for banded metrics
pub const NUM_BANDS: usize = 3;

/// Default escape-rate thresholds: `[good_limit, acceptable_limit]` in percent.
/// Below 5% is good, 5-10% is acceptable, above 10% is bad.
const fn default_escape_rate_bands() -> [f64; NUM_BANDS - 1] {
    [5.0, 10.0]
}

/// Default mean-time-to-resolution thresholds in days.
/// Under 3 days is good, 3-7 days is acceptable, above 7 days is bad.
const fn default_mttr_bands() -> [f64; NUM_BANDS - 1] {
    [3.0, 7.0]
}

/// Default tracker priority to severity mapping (JIRA priority names).
fn default_severity_map() -> BTreeMap<String, Severity> {
    let mut map = BTreeMap::new();
    let _ = map.insert("Highest".to_string(), Severity::Critical);
    let _ = map.insert("High".to_string(), Severity::High);
    let _ = map.insert("Medium".to_string(), Severity::Medium);
    let _ = map.insert("Low".to_string(), Severity::Low);
    let _ = map.insert("Lowest".to_string(), Severity::Low);
    map
}

/// Default tracker label to found-stage mapping.
fn default_stage_labels() -> BTreeMap<String, Stage> {
    let mut map = BTreeMap::new();
    let _ = map.insert("dev".to_string(), Stage::Development);
    let _ = map.insert("code-review".to_string(), Stage::CodeReview);
    let _ = map.insert("qa".to_string(), Stage::QATesting);
    let _ = map.insert("uat".to_string(), Stage::UAT);
    let _ = map.insert("production".to_string(), Stage::Production);
    map
}

const fn default_severity() -> Severity {
    Severity::Medium
}

const fn default_stage() -> Stage {
    Stage::QATesting
}

fn default_unassigned_label() -> String {
    crate::metrics::UNASSIGNED_SPRINT.to_string()
}

/// User-tunable settings: quality-gate thresholds and the tracker-specific
/// mappings used when extracting defects from issue exports.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Escape-rate thresholds `[good_limit, acceptable_limit]` for console
    /// colorization and the `--check` gate.
    #[serde(default = "default_escape_rate_bands")]
    pub escape_rate_bands: [f64; NUM_BANDS - 1],

    /// Mean-resolution-days thresholds `[good_limit, acceptable_limit]`.
    #[serde(default = "default_mttr_bands")]
    pub mttr_bands: [f64; NUM_BANDS - 1],

    /// Tracker priority name to severity.
    #[serde(default = "default_severity_map")]
    pub severity_map: BTreeMap<String, Severity>,

    /// Tracker label (lowercase) to the stage the defect was found in.
    #[serde(default = "default_stage_labels")]
    pub stage_labels: BTreeMap<String, Stage>,

    /// Severity assigned when a priority is missing or unmapped.
    #[serde(default = "default_severity")]
    pub default_severity: Severity,

    /// Found stage assigned when no label matches.
    #[serde(default = "default_stage")]
    pub default_stage: Stage,

    /// Label of the sprint bucket that collects records without a sprint.
    #[serde(default = "default_unassigned_label")]
    pub unassigned_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            escape_rate_bands: default_escape_rate_bands(),
            mttr_bands: default_mttr_bands(),
            severity_map: default_severity_map(),
            stage_labels: default_stage_labels(),
            default_severity: default_severity(),
            default_stage: default_stage(),
            unassigned_label: default_unassigned_label(),
        }
    }
}

/// File names probed when no explicit config path is given. These must not
/// collide with the default data file names (`defects.json`, the `extract`
/// output), or the search would pick up a record file as config.
const DEFAULT_CONFIG_NAMES: [&str; 4] =
    ["defect-metrics.toml", "defect-metrics.yml", "defect-metrics.yaml", "defect-metrics.json"];

impl Config {
    /// Load configuration, searching `base_path` for a default-named file when
    /// no explicit path is given. Returns the config plus any non-fatal
    /// validation warnings. Missing files mean defaults.
    pub fn load(base_path: &Utf8Path, explicit: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let path = match explicit {
            Some(path) => Some(path.clone()),
            None => DEFAULT_CONFIG_NAMES.iter().map(|name| base_path.join(name)).find(|p| p.exists()),
        };

        let config = match path {
            None => Self::default(),
            Some(path) => {
                let content = fs::read_to_string(&path).into_app_err(format!("unable to read config file {path}"))?;
                Self::parse(&path, &content)?
            }
        };

        let warnings = config.validate();
        Ok((config, warnings))
    }

    fn parse(path: &Utf8Path, content: &str) -> Result<Self> {
        match path.extension() {
            Some("toml") => toml::from_str(content).into_app_err(format!("invalid TOML config {path}")),
            Some("yml" | "yaml") => serde_yaml::from_str(content).into_app_err(format!("invalid YAML config {path}")),
            Some("json") => serde_json::from_str(content).into_app_err(format!("invalid JSON config {path}")),
            _ => Err(app_err!("unsupported config format for {path}, expected .toml, .yml, .yaml, or .json")),
        }
    }

    /// Write the commented default configuration file.
    pub fn save_default_with_comments(path: &Utf8Path) -> Result<()> {
        fs::write(path, DEFAULT_CONFIG_TOML).into_app_err(format!("unable to write config file {path}"))?;
        Ok(())
    }

    fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.escape_rate_bands[0] > self.escape_rate_bands[1] {
            warnings.push(format!(
                "escape_rate_bands are unordered ({} > {}): the acceptable band is empty",
                self.escape_rate_bands[0], self.escape_rate_bands[1]
            ));
        }
        if self.mttr_bands[0] > self.mttr_bands[1] {
            warnings.push(format!(
                "mttr_bands are unordered ({} > {}): the acceptable band is empty",
                self.mttr_bands[0], self.mttr_bands[1]
            ));
        }
        if !(0.0..=100.0).contains(&self.escape_rate_bands[0]) || !(0.0..=100.0).contains(&self.escape_rate_bands[1]) {
            warnings.push("escape_rate_bands must be percentages in [0, 100]".to_string());
        }
        if self.unassigned_label.is_empty() {
            warnings.push("unassigned_label is empty: records without a sprint get a blank bucket".to_string());
        }

        warnings
    }

    /// Band index for a metric value against thresholds: 0 good, 1 acceptable, 2 bad.
    fn band(value: f64, bands: [f64; NUM_BANDS - 1]) -> usize {
        if value < bands[0] {
            0
        } else if value < bands[1] {
            1
        } else {
            2
        }
    }

    pub fn escape_rate_band(&self, rate: f64) -> usize {
        Self::band(rate, self.escape_rate_bands)
    }

    pub fn mttr_band(&self, days: f64) -> usize {
        Self::band(days, self.mttr_bands)
    }
}
