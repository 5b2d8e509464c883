use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::{clock::ClockSettings, presentation::NoticeDelays};

#[derive(Deserialize, Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NoticeSettings {
    pub success_ms: u64,
    pub error_ms: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ClockSection {
    pub tick_ms: u64,
    pub timezone: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub notices: NoticeSettings,
    pub clock: ClockSection,
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Self::builder_with_env(Environment::with_prefix("APP").separator("__"))
    }

    fn builder_with_env(
        environment: Environment,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api.base_url", "http://127.0.0.1:5000")?
            .set_default("notices.success_ms", 3000)?
            .set_default("notices.error_ms", 5000)?
            .set_default("clock.tick_ms", 1000)?
            .set_default("clock.timezone", "Asia/Kolkata")
            .map(|builder| {
                builder
                    .add_source(File::with_name("appsettings").required(false))
                    .add_source(File::with_name("appsettings.local").required(false))
                    .add_source(environment)
            })
    }

    pub fn notice_delays(&self) -> NoticeDelays {
        NoticeDelays {
            success: Duration::from_millis(self.notices.success_ms),
            error: Duration::from_millis(self.notices.error_ms),
        }
    }

    pub fn clock_settings(&self) -> Result<ClockSettings, ConfigError> {
        let timezone = self.clock.timezone.parse::<Tz>().map_err(|e| {
            ConfigError::Message(format!("Invalid clock.timezone {:?}: {e}", self.clock.timezone))
        })?;

        if self.clock.tick_ms == 0 {
            return Err(ConfigError::Message(
                "clock.tick_ms must be greater than zero".to_owned(),
            ));
        }

        Ok(ClockSettings {
            tick: Duration::from_millis(self.clock.tick_ms),
            timezone,
        })
    }
}
