//! Default configuration file creation.
//!
//! The generated file is assembled with a small builder that keeps setting
//! comments aligned in one column, so the layout stays tidy whenever a
//! default in constants.rs changes.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Create a default config file at `path`.
///
/// With `coords` the location settings are written live; without them they
/// are written commented out and sun-linked entries use their fallback time.
pub fn create_default_config(path: &Path, coords: Option<(f64, f64)>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = default_config_content(coords);
    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    Ok(())
}

fn default_config_content(coords: Option<(f64, f64)>) -> String {
    let builder = ConfigBuilder::new().add_section("Location");

    let builder = match coords {
        Some((lat, lon)) => builder
            .add_setting("latitude", &format!("{lat:.6}"), "Geographic latitude")
            .add_setting("longitude", &format!("{lon:.6}"), "Geographic longitude"),
        None => builder
            .add_setting(
                "# latitude",
                "40.712800",
                "Uncomment to compute sunrise/sunset",
            )
            .add_setting("# longitude", "-74.006000", "Geographic longitude"),
    };

    let settings = builder
        .add_section("Display")
        .add_setting(
            "render_step",
            &DEFAULT_RENDER_STEP.to_string(),
            &format!(
                "Minutes between rendered samples ({MINIMUM_RENDER_STEP}-{MAXIMUM_RENDER_STEP})"
            ),
        )
        .add_setting(
            "clock_refresh_secs",
            &DEFAULT_CLOCK_REFRESH_SECS.to_string(),
            &format!(
                "Watch mode refresh ({MINIMUM_CLOCK_REFRESH_SECS}-{MAXIMUM_CLOCK_REFRESH_SECS}) seconds"
            ),
        )
        .build();

    let schedule = [
        default_entry("07:00", Some(ORACLE_KEY_SUNRISE), 80),
        default_entry("13:00", None, 100),
        default_entry("19:30", Some(ORACLE_KEY_SUNSET), 60),
        default_entry("23:00", None, 20),
    ]
    .join("\n");

    format!("{settings}\n\n#[Schedule]\n{schedule}")
}

fn default_entry(time: &str, oracle_key: Option<&str>, brightness: u32) -> String {
    let mut lines = vec!["[[schedule]]".to_string(), format!("time = \"{time}\"")];
    if let Some(key) = oracle_key {
        lines.push("useOracle = true".to_string());
        lines.push(format!("oracleKey = \"{key}\""));
    }
    lines.push(format!("brightness = {brightness}"));
    lines.join("\n") + "\n"
}

/// Builder for configuration files with aligned setting comments.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1; // one space between setting and comment

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_builder_aligns_comments() {
        let output = ConfigBuilder::new()
            .add_section("A")
            .add_setting("short", "1", "first")
            .add_setting("much_longer_key", "22", "second")
            .build();

        let columns: Vec<usize> = output
            .lines()
            .filter(|line| line.contains(" = "))
            .map(|line| line.find('#').unwrap())
            .collect();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], columns[1]);
    }

    #[test]
    fn test_default_content_parses() {
        let config: Config = toml::from_str(&default_config_content(None)).unwrap();
        assert_eq!(config.latitude, None);
        assert_eq!(config.render_step, Some(DEFAULT_RENDER_STEP));
        assert_eq!(config.schedule.len(), 4);
        assert!(config.schedule[0].use_oracle);
        assert_eq!(config.schedule[0].oracle_key.as_deref(), Some("sunrise"));
        assert!(!config.schedule[1].use_oracle);
        assert!(crate::config::validate_config(&config).is_ok());
    }

    #[test]
    fn test_default_content_with_coordinates() {
        let config: Config =
            toml::from_str(&default_config_content(Some((52.52, 13.405)))).unwrap();
        assert_eq!(config.coordinates(), Some((52.52, 13.405)));
    }
}
