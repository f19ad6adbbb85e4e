use std::{env, str::FromStr};

use strata_lang_printer::{ColorChoice, PrintCfg};

/// Host configuration of a session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub colorize: ColorChoice,
    pub log_level: log::LevelFilter,
    /// Used when rendering results
    pub print: PrintCfg,
}

impl Default for Settings {
    fn default() -> Self {
        Self { colorize: ColorChoice::Auto, log_level: log::LevelFilter::Info, print: PrintCfg::default() }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let colorize = env::var("STRATA_COLORIZE")
            .ok()
            .and_then(|var| ColorChoice::from_str(&var).ok())
            .unwrap_or(ColorChoice::Auto);

        let log_level = env::var("STRATA_LOG_LEVEL")
            .ok()
            .and_then(|var| log::LevelFilter::from_str(&var.to_uppercase()).ok())
            .unwrap_or(log::LevelFilter::Info);

        Self { colorize, log_level, print: PrintCfg::default() }
    }

    /// Install a logger with the configured level. Does nothing if a logger is already installed.
    pub fn init_logger(&self) {
        let _ = env_logger::Builder::new().filter_level(self.log_level).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_log_info() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, log::LevelFilter::Info);
        assert!(settings.print.print_function_sugar);
        settings.init_logger();
        settings.init_logger();
    }
}
