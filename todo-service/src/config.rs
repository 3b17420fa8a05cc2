use serde::Deserialize;

/// Runtime settings, read from environment variables (`PORT`, `VERSION`,
/// `DEPLOYMENT_COLOR`, ...). Every field has a default so the service starts
/// with an empty environment.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_deployment_color")]
    pub deployment_color: String,
    #[serde(default = "default_deployment_type")]
    pub deployment_type: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(config::Environment::default())
    }

    fn from_source(source: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder().add_source(source).build()?;
        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            service_name: default_service_name(),
            version: default_version(),
            environment: default_environment(),
            deployment_color: default_deployment_color(),
            deployment_type: default_deployment_type(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_service_name() -> String {
    "Todo API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_deployment_color() -> String {
    "unknown".to_string()
}

fn default_deployment_type() -> String {
    "standard".to_string()
}
