use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::Result;
use crate::filters::parse_filter_date;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive sales analytics dashboard for the Bee Cycle dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "beecycle-dash",
    about = "Interactive sales analytics dashboard for the Bee Cycle dataset",
    version
)]
pub struct Settings {
    /// Path to the sales dataset (a CSV file, or a directory to search)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Page shown at startup
    #[arg(long, default_value = "overview", value_parser = ["overview", "forecast"])]
    pub page: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Start of the order-date filter, e.g. 2024-01-01
    #[arg(long)]
    pub from: Option<String>,

    /// End of the order-date filter, e.g. 2024-12-31
    #[arg(long)]
    pub to: Option<String>,

    /// Region labels to pre-select (default: every region in the dataset)
    #[arg(long, value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.beecycle-dash/last_used.json`.
///
/// Only presentation preferences are remembered between runs; filter state is
/// derived from the dataset on every start.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.beecycle-dash/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".beecycle-dash").join("last_used.json")
    }

    /// Load persisted params from the default path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load persisted params from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to the default path, creating parent
    /// directories if needed.
    pub fn save(&self) -> std::result::Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            if settings.debug {
                settings.log_level = "DEBUG".to_string();
            }
            return settings;
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins). Filter flags are never loaded
        // from last-used; they describe one interaction, not a preference.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "page") {
            if let Some(v) = last.page {
                settings.page = v;
            }
        }

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// Parse the `--from` / `--to` flags into typed dates.
    ///
    /// Supplying only one of the two is allowed and produces the single-date
    /// filter state (date predicate disabled); a value that is not a date at
    /// all surfaces as `InvalidFilter`.
    pub fn date_bounds(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
        let from = self.from.as_deref().map(parse_filter_date).transpose()?;
        let to = self.to.as_deref().map(parse_filter_date).transpose()?;
        Ok((from, to))
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            page: Some(s.page.clone()),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Build the config path inside `tmp`.
    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    /// Save `params` to `tmp`, then load them back.
    fn round_trip(tmp: &TempDir, params: &LastUsedParams) -> LastUsedParams {
        let path = tmp_config_path(tmp);
        params.save_to(&path).expect("save");
        LastUsedParams::load_from(&path)
    }

    // ── test_last_used_params_save_load ───────────────────────────────────────

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            page: Some("forecast".to_string()),
        };

        let loaded = round_trip(&tmp, &params);

        assert_eq!(loaded.theme, Some("dark".to_string()));
        assert_eq!(loaded.page, Some("forecast".to_string()));
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("light".to_string()),
            ..Default::default()
        };
        params.save_to(&path).expect("save");
        assert!(path.exists(), "file must exist after save");

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists(), "file must be gone after clear");
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert!(loaded.theme.is_none());
        assert!(loaded.page.is_none());
    }

    // ── test_settings_default_values ─────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["beecycle-dash"]);

        assert!(settings.data.is_none());
        assert_eq!(settings.page, "overview");
        assert_eq!(settings.theme, "auto");
        assert!(settings.from.is_none());
        assert!(settings.to.is_none());
        assert!(settings.regions.is_empty());
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    // ── CLI parsing ───────────────────────────────────────────────────────────

    #[test]
    fn test_settings_cli_regions_comma_separated() {
        let settings =
            Settings::parse_from(["beecycle-dash", "--regions", "Europe,Pacific"]);
        assert_eq!(settings.regions, vec!["Europe", "Pacific"]);
    }

    #[test]
    fn test_settings_cli_data_path() {
        let settings = Settings::parse_from(["beecycle-dash", "--data", "/tmp/sales.csv"]);
        assert_eq!(settings.data, Some(PathBuf::from("/tmp/sales.csv")));
    }

    #[test]
    fn test_settings_cli_page_forecast() {
        let settings = Settings::parse_from(["beecycle-dash", "--page", "forecast"]);
        assert_eq!(settings.page, "forecast");
    }

    // ── date_bounds ───────────────────────────────────────────────────────────

    #[test]
    fn test_date_bounds_both_present() {
        let settings = Settings::parse_from([
            "beecycle-dash",
            "--from",
            "2024-01-01",
            "--to",
            "2024-06-30",
        ]);
        let (from, to) = settings.date_bounds().unwrap();
        assert_eq!(from, Some("2024-01-01".parse().unwrap()));
        assert_eq!(to, Some("2024-06-30".parse().unwrap()));
    }

    #[test]
    fn test_date_bounds_single_endpoint() {
        let settings = Settings::parse_from(["beecycle-dash", "--from", "2024-01-01"]);
        let (from, to) = settings.date_bounds().unwrap();
        assert_eq!(from, Some("2024-01-01".parse().unwrap()));
        assert!(to.is_none());
    }

    #[test]
    fn test_date_bounds_malformed_is_invalid_filter() {
        let settings = Settings::parse_from(["beecycle-dash", "--from", "soonish"]);
        let err = settings.date_bounds().unwrap_err();
        assert!(matches!(err, DashboardError::InvalidFilter(_)));
    }

    // ── load_with_last_used (uses config path injection) ─────────────────────

    #[test]
    fn test_load_with_last_used_merges_persisted_theme() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            page: Some("overview".to_string()),
        };
        params.save_to(&config_path).expect("save");

        let settings =
            Settings::load_with_last_used_impl(vec!["beecycle-dash".into()], &config_path);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            page: Some("forecast".to_string()),
        };
        params.save_to(&config_path).expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec!["beecycle-dash".into(), "--theme".into(), "light".into()],
            &config_path,
        );
        assert_eq!(settings.theme, "light");
        // page was not given on the CLI, so the persisted value applies.
        assert_eq!(settings.page, "forecast");
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("classic".to_string()),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");
        assert!(config_path.exists(), "file must exist before clear");

        Settings::load_with_last_used_impl(
            vec!["beecycle-dash".into(), "--clear".into()],
            &config_path,
        );

        assert!(!config_path.exists(), "file must be gone after --clear");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let settings = Settings::load_with_last_used_impl(
            vec!["beecycle-dash".into(), "--debug".into()],
            &config_path,
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            vec!["beecycle-dash".into(), "--theme".into(), "classic".into()],
            &config_path,
        );

        assert!(
            config_path.exists(),
            "config file must be persisted after run"
        );
        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.theme, Some("classic".to_string()));
    }

    #[test]
    fn test_load_with_last_used_filter_flags_not_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            vec![
                "beecycle-dash".into(),
                "--from".into(),
                "2024-01-01".into(),
                "--regions".into(),
                "Europe".into(),
            ],
            &config_path,
        );

        // A fresh run without filter flags must not inherit them.
        let settings =
            Settings::load_with_last_used_impl(vec!["beecycle-dash".into()], &config_path);
        assert!(settings.from.is_none());
        assert!(settings.regions.is_empty());
    }
}
