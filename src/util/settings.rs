use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_derive::Deserialize;

use crate::{
    error::{AppError, AppResult},
    logln,
    util::{
        logging::{self, LogLevel, LoggingConfig},
        DateTimeUtils,
    },
};

const SETTINGS_ENV: &str = "STRAITS_SETTINGS";
const SECRETS_ENV: &str = "STRAITS_SECRETS";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    GoogleSheets,
    JsonFiles,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub file_id: String,
    pub progress_sheet: String,
    pub segments_sheet: String,
    pub cell_range: String,
    pub progress_path: PathBuf,
    pub segments_path: PathBuf,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::GoogleSheets,
            file_id: String::new(),
            progress_sheet: "Meters".to_string(),
            segments_sheet: "Locations".to_string(),
            cell_range: "A1:AB1000".to_string(),
            progress_path: PathBuf::from("data/progress.json"),
            segments_path: PathBuf::from("data/segments.json"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ChallengeSettings {
    pub title: String,
    pub start_date: String,
    pub utc_offset_hours: i32,
    pub club_url: String,
    pub info_url: String,
    pub intro_path: Option<PathBuf>,
    pub default_start_caption: String,
    pub default_finish_caption: String,
    pub info_link_text: String,
    pub date_prompt: String,
    /// `{date}`, `{overall}`, `{segment}` and `{count}` are replaced.
    pub summary: String,
    pub finished_text: String,
}

impl Default for ChallengeSettings {
    fn default() -> Self {
        Self {
            title: "Virtual swims".to_string(),
            start_date: "13.01.2025".to_string(),
            utc_offset_hours: 5,
            club_url: String::new(),
            info_url: String::new(),
            intro_path: None,
            default_start_caption: "Start point".to_string(),
            default_finish_caption: "Finish point".to_string(),
            info_link_text: "Seven straits".to_string(),
            date_prompt: "Pick a day to see where we were".to_string(),
            summary: "{date}: {overall} m swum in total, segment {segment} of {count}.".to_string(),
            finished_text: "Challenge complete!".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MapSettings {
    pub zoom: u8,
    pub route_steps: usize,
    pub travelled_steps: usize,
    /// `{remaining}` is replaced with meters left in the segment.
    pub position_popup: String,
    /// `{length}` is replaced with the segment length.
    pub route_tooltip: String,
    /// `{travelled}` is replaced with meters swum in the segment.
    pub travelled_tooltip: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: 10,
            route_steps: 100,
            travelled_steps: 10,
            position_popup: "We are here! {remaining} m to the end of the strait".to_string(),
            route_tooltip: "Swim route, {length} m long".to_string(),
            travelled_tooltip: "Swum {travelled} m".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingSettings {
    pub enabled: bool,
    pub level: String,
    /// Components logged at verbose level whatever the global level is.
    pub verbose: Vec<String>,
    pub disabled: Vec<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            verbose: Vec::new(),
            disabled: Vec::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub challenge: ChallengeSettings,
    pub map: MapSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    const CC: &str = "Settings";

    /// Reads `settings.toml` (or `$STRAITS_SETTINGS`). A missing file means defaults.
    pub fn load() -> AppResult<Self> {
        let path = std::env::var(SETTINGS_ENV).unwrap_or_else(|_| "settings.toml".to_string());
        let path = Path::new(&path);

        if !path.exists() {
            logln!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }

        Self::from_file(path)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> AppResult<()> {
        if !(-23..=23).contains(&self.challenge.utc_offset_hours) {
            return Err(AppError::Config(format!(
                "utc_offset_hours {} is not a valid offset",
                self.challenge.utc_offset_hours
            )));
        }

        if LogLevel::from_name(&self.logging.level).is_none() {
            return Err(AppError::Config(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }

        self.start_date().map(|_| ())
    }

    pub fn start_date(&self) -> AppResult<NaiveDate> {
        DateTimeUtils::parse_date(&self.challenge.start_date)
    }

    /// Intro text shown above the map; empty when no file is configured.
    pub fn intro_text(&self) -> AppResult<String> {
        match &self.challenge.intro_path {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => Ok(String::new()),
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig::default();

        if !self.logging.enabled {
            config.disable_global_tracing();
        }
        if let Some(level) = LogLevel::from_name(&self.logging.level) {
            config.set_global_level(level);
        }

        for cc in &self.logging.verbose {
            config.enable_cc(cc, LogLevel::VERBOSE);
        }
        // Disabling wins over a verbose entry for the same component
        for cc in &self.logging.disabled {
            config.disable_cc(cc);
        }

        config
    }

    pub fn apply_logging(&self) {
        logging::install(self.logging_config());
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Secrets {
    pub api_key: String,
}

impl Secrets {
    /// Reads `secrets.toml` (or `$STRAITS_SECRETS`).
    pub fn load() -> AppResult<Self> {
        let path = std::env::var(SECRETS_ENV).unwrap_or_else(|_| "secrets.toml".to_string());
        let content = std::fs::read_to_string(&path)
            .map_err(|err| AppError::Config(format!("unable to open {}: {}", path, err)))?;

        Ok(toml::from_str(&content)?)
    }
}
