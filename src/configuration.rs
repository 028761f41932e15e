use std::path::PathBuf;

use config::{Config, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub backend: BackendSettings,
    pub store: StoreSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

/// The external shortening service this front end forwards to.
#[derive(serde::Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
}

#[derive(serde::Deserialize)]
pub struct StoreSettings {
    /// Location of the slot file holding the saved short URLs.
    pub path: PathBuf,
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn to_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configurations");
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");
    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")))
        .add_source(File::from(
            configuration_directory.join(environment.to_str()),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"), // Use double underscore to represent nested struct fields (e.g., APP_BACKEND__BASE_URL)
        );

    settings.build()?.try_deserialize()
}
