use std::{collections::HashMap, sync::RwLock};

use once_cell::sync::Lazy;

static LOGGER_CONFIG: Lazy<RwLock<LoggingConfig>> =
    Lazy::new(|| RwLock::new(LoggingConfig::default()));

#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub enum LogLevel {
    INFO,
    VERBOSE,
}

impl LogLevel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "info" => Some(LogLevel::INFO),
            "verbose" => Some(LogLevel::VERBOSE),
            _ => None,
        }
    }
}

// Log lines go to stderr so the CLI can keep stdout for JSON.
#[macro_export]
macro_rules! logln {
    ($fmt:literal) => {
        if $crate::util::logging::is_enabled(Self::CC) {
            eprintln!("[{}:{}] {}", file!(), line!(), $fmt);
        }
    };
    ($fmt:literal, $($arg:tt)*) => {
        if $crate::util::logging::is_enabled(Self::CC) {
            eprint!("[{}:{}] ", file!(), line!());
            eprintln!($fmt, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! logvbln {
    ($fmt:literal) => {
        if $crate::util::logging::is_enabled(Self::CC) && $crate::util::logging::is_at_level(Self::CC, $crate::util::logging::LogLevel::VERBOSE) {
            eprintln!("[{}:{}] {}", file!(), line!(), $fmt);
        }
    };
    ($fmt:literal, $($arg:tt)*) => {
        if $crate::util::logging::is_enabled(Self::CC) && $crate::util::logging::is_at_level(Self::CC, $crate::util::logging::LogLevel::VERBOSE) {
            eprint!("[{}:{}] ", file!(), line!());
            eprintln!($fmt, $($arg)*);
        }
    };
}

pub fn is_enabled(cc: &str) -> bool {
    LOGGER_CONFIG
        .read()
        .map(|config| config.cc_enabled(cc))
        .unwrap_or(false)
}

pub fn is_at_level(cc: &str, level: LogLevel) -> bool {
    LOGGER_CONFIG
        .read()
        .map(|config| config.cc_at_level(cc, level))
        .unwrap_or(false)
}

/// Replaces the process-wide logging configuration.
pub fn install(config: LoggingConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

pub struct LoggingConfig {
    global_tracing_enabled: bool,
    global_level: LogLevel,
    flags: HashMap<String, (bool, LogLevel)>, // <component, (tracing enabled, trace level)>
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_tracing_enabled: true,
            global_level: LogLevel::INFO,
            flags: Default::default(),
        }
    }
}

impl LoggingConfig {
    pub fn cc_enabled(&self, cc: &str) -> bool {
        if !self.global_tracing_enabled {
            return false;
        }

        self.flags.get(cc).map_or(true, |flag| flag.0)
    }

    pub fn cc_at_level(&self, cc: &str, level: LogLevel) -> bool {
        if self.global_level >= level {
            return true;
        }

        self.flags.get(cc).map_or(false, |flag| flag.1 >= level)
    }

    pub fn enable_cc(&mut self, cc: &str, level: LogLevel) {
        self.flags.insert(cc.to_string(), (true, level));
    }

    pub fn disable_cc(&mut self, cc: &str) {
        self.flags.insert(cc.to_string(), (false, LogLevel::INFO));
    }

    pub fn disable_global_tracing(&mut self) {
        self.global_tracing_enabled = false;
    }

    pub fn set_global_level(&mut self, level: LogLevel) {
        self.global_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_flags_override_defaults() {
        let mut config = LoggingConfig::default();
        assert!(config.cc_enabled("App"));
        assert!(!config.cc_at_level("App", LogLevel::VERBOSE));

        config.enable_cc("App", LogLevel::VERBOSE);
        config.disable_cc("GoogleSheetsSource");
        assert!(config.cc_at_level("App", LogLevel::VERBOSE));
        assert!(!config.cc_enabled("GoogleSheetsSource"));

        config.disable_global_tracing();
        assert!(!config.cc_enabled("App"));
    }

    #[test]
    fn global_level_covers_every_component() {
        let mut config = LoggingConfig::default();
        config.set_global_level(LogLevel::VERBOSE);
        assert!(config.cc_at_level("MapBuilder", LogLevel::VERBOSE));
    }
}
