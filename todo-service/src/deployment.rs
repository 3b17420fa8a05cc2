//! Release metadata attached to health, list and stats responses so a
//! blue/green switch can be observed from the outside.

use serde::Serialize;

use crate::config::Config;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub service: String,
    pub version: String,
    pub environment: String,
    pub color: String,
    pub kind: String,
    pub hostname: String,
    pub platform: &'static str,
}

impl Deployment {
    /// Captures the machine hostname once; falls back to `"unknown"`.
    pub fn from_config(config: &Config) -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string());
        Self::with_hostname(config, hostname)
    }

    pub fn with_hostname(config: &Config, hostname: String) -> Self {
        Self {
            service: config.service_name.clone(),
            version: config.version.clone(),
            environment: config.environment.clone(),
            color: config.deployment_color.clone(),
            kind: config.deployment_type.clone(),
            hostname,
            platform: std::env::consts::OS,
        }
    }

    pub fn release(&self) -> Release {
        Release {
            version: self.version.clone(),
            color: self.color.clone(),
        }
    }

    pub fn instance(&self) -> Instance {
        Instance {
            version: self.version.clone(),
            color: self.color.clone(),
            kind: self.kind.clone(),
            hostname: self.hostname.clone(),
        }
    }

    pub fn host(&self) -> Host {
        Host {
            color: self.color.clone(),
            kind: self.kind.clone(),
            hostname: self.hostname.clone(),
            platform: self.platform,
        }
    }
}

/// `deployment` block of the list response.
#[derive(Clone, Debug, Serialize)]
pub struct Release {
    pub version: String,
    pub color: String,
}

/// `deployment` block of the stats response.
#[derive(Clone, Debug, Serialize)]
pub struct Instance {
    pub version: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub hostname: String,
}

/// `deployment` block of the health response.
#[derive(Clone, Debug, Serialize)]
pub struct Host {
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub hostname: String,
    pub platform: &'static str,
}
