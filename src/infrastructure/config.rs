use crate::application::chart_renderer::DEFAULT_RENDER_DELAY;
use crate::domain::chart::SurfaceId;
use crate::infrastructure::rpc_source::DEFAULT_DATA_PATH;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub source: SourceSettings,
    #[serde(default)]
    pub render: RenderSettings,
    pub dispatch: DispatchSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Where the dashboard statistics come from.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceSettings {
    /// A backend exposing the JSON-RPC data endpoint.
    Rpc {
        base_url: String,
        #[serde(default = "default_data_path")]
        path: String,
    },
    /// A local JSON file with raw membership and invoice records.
    Snapshot { path: String },
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderSettings {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_surfaces")]
    pub surfaces: Vec<SurfaceId>,
}

impl RenderSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            surfaces: default_surfaces(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DispatchSettings {
    pub endpoint: String,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_data_path() -> String {
    DEFAULT_DATA_PATH.to_string()
}

fn default_delay_ms() -> u64 {
    DEFAULT_RENDER_DELAY.as_millis() as u64
}

fn default_surfaces() -> Vec<SurfaceId> {
    SurfaceId::ALL.to_vec()
}

/// Load `config/dashboard.*`, with `DASHBOARD__SECTION__KEY` environment
/// variables taking precedence.
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
