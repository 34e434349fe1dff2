use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sampling: RateConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct RateConfig {
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    #[serde(default = "default_rate_min")]
    pub rate_min: f64,
    #[serde(default = "default_rate_max")]
    pub rate_max: f64,
    #[serde(default = "default_control_max")]
    pub control_max: f64,
    /// Used when neither a control value nor a rate is given.
    #[serde(default = "default_rate")]
    pub default_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_display_ratio")]
    pub display_ratio: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_crf")]
    pub crf: u32,
    #[serde(default = "default_codec")]
    pub codec: String,
    #[serde(default)]
    pub font: Option<PathBuf>,
    #[serde(default)]
    pub font_url: Option<String>,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
            rate_min: default_rate_min(),
            rate_max: default_rate_max(),
            control_max: default_control_max(),
            default_rate: default_rate(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            display_ratio: default_display_ratio(),
            font_size: default_font_size(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            crf: default_crf(),
            codec: default_codec(),
            font: None,
            font_url: None,
        }
    }
}

fn default_sample_count() -> usize { 1024 }
fn default_rate_min() -> f64 { 100.0 }
fn default_rate_max() -> f64 { 2000.0 }
fn default_control_max() -> f64 { 1000.0 }
fn default_rate() -> f64 { 800.0 }
fn default_width() -> u32 { 1000 }
fn default_height() -> u32 { 600 }
fn default_display_ratio() -> f64 { 20_000.0 }
fn default_font_size() -> f32 { 20.0 }
fn default_fps() -> u32 { 30 }
fn default_crf() -> u32 { 18 }
fn default_codec() -> String { "libx264".into() }

/// Explicit path first, then `./aliasview.toml`, then the user config dirs.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("aliasview.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("aliasview").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("aliasview").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Invalid config {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sampling.sample_count, 1024);
        assert_eq!(config.sampling.rate_min, 100.0);
        assert_eq!(config.sampling.rate_max, 2000.0);
        assert_eq!(config.display.display_ratio, 20_000.0);
        assert_eq!(config.output.codec, "libx264");
        assert!(config.output.font.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [sampling]
            rate_min = 500
            rate_max = 800

            [output]
            fps = 60
            font = "/tmp/mono.ttf"
            "#,
        )
        .unwrap();
        assert_eq!(config.sampling.rate_min, 500.0);
        assert_eq!(config.sampling.rate_max, 800.0);
        assert_eq!(config.sampling.control_max, 1000.0);
        assert_eq!(config.output.fps, 60);
        assert_eq!(config.output.crf, 18);
        assert_eq!(config.output.font, Some(PathBuf::from("/tmp/mono.ttf")));
        assert_eq!(config.display.width, 1000);
    }

    #[test]
    fn missing_file_loads_nothing() {
        assert!(load_config(Path::new("/nonexistent/aliasview.toml")).is_none());
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/some/where.toml");
        assert_eq!(find_config(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn round_trips_through_file() {
        let path = std::env::temp_dir().join(format!("aliasview-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[display]\nwidth = 1280\n").unwrap();
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.display.width, 1280);
        assert_eq!(config.display.height, 600);
    }
}
