use protocol::Endpoints;
use serde::Deserialize;

use crate::messages::Locale;

/// Options forwarded to the geolocation collaborator.
///
/// The defaults force a fresh, high-accuracy fix and allow a long wait.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u32,
    /// 0 disables cached fixes.
    pub maximum_age_ms: u32,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: 15_000,
            maximum_age_ms: 0,
        }
    }
}

/// Raster tile source with `{s}` subdomain rotation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TileSource {
    pub url_template: String,
    pub subdomains: Vec<String>,
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}".to_string(),
            subdomains: ["mt0", "mt1", "mt2", "mt3"]
                .into_iter()
                .map(String::from)
                .collect(),
            attribution: "🛰️ Google Satellite".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AreaStyle {
    pub color: String,
    pub fill_opacity: f64,
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self {
            color: "green".to_string(),
            fill_opacity: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub zoom: u8,
    pub tiles: TileSource,
    pub area_style: AreaStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: 18,
            tiles: TileSource::default(),
            area_style: AreaStyle::default(),
        }
    }
}

/// Window features for the embedded form popup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PopupFeatures {
    pub target: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PopupFeatures {
    fn default() -> Self {
        Self {
            target: "_blank".to_string(),
            width: 900,
            height: 700,
        }
    }
}

impl PopupFeatures {
    /// Feature string for `window.open`.
    pub fn features(&self) -> String {
        format!("width={},height={}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub endpoints: Endpoints,
    pub geolocation: PositionOptions,
    pub map: MapConfig,
    pub popup: PopupFeatures,
    pub poll_interval_ms: u32,
    pub locale: Locale,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            geolocation: PositionOptions::default(),
            map: MapConfig::default(),
            popup: PopupFeatures::default(),
            poll_interval_ms: 1_000,
            locale: Locale::default(),
        }
    }
}

impl FlowConfig {
    /// Parses a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
