use std::{env, time::Duration};

use config::{Config, ConfigError};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub notify: NotifySettings,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_view_ttl_seconds: u64,
    pub log_level: String,
}

impl Settings {
    pub fn page_view_ttl(&self) -> Duration {
        Duration::from_secs(self.page_view_ttl_seconds)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub repository_url: String,
}

/// Where captured addresses go. Every field is optional: with nothing set the
/// form falls back to a simulated delivery.
#[derive(Clone, Debug, Deserialize)]
pub struct NotifySettings {
    #[serde(default)]
    pub subscribe_api: Option<String>,
    #[serde(default)]
    pub emailjs_service: Option<String>,
    #[serde(default)]
    pub emailjs_template: Option<String>,
    #[serde(default)]
    pub emailjs_user: Option<String>,
    #[serde(default = "default_emailjs_endpoint")]
    pub emailjs_endpoint: String,
    #[serde(
        default = "default_simulated_delay",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub simulated_delay_milliseconds: u64,
}

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

fn default_emailjs_endpoint() -> String {
    EMAILJS_ENDPOINT.to_owned()
}

fn default_simulated_delay() -> u64 {
    700
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            subscribe_api: None,
            emailjs_service: None,
            emailjs_template: None,
            emailjs_user: None,
            emailjs_endpoint: default_emailjs_endpoint(),
            simulated_delay_milliseconds: default_simulated_delay(),
        }
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Reads `configuration/base.yaml`, layers `configuration/<APP_ENVIRONMENT>.yaml`
/// on top, then `APP_*` environment variables (`APP_NOTIFY__SUBSCRIBE_API`).
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
