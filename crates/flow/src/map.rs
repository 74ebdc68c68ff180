use foundation::{AllowedArea, Position};

use crate::config::{AreaStyle, MapConfig, TileSource};
use crate::messages::Messages;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Position,
    pub popup: String,
    /// Open the popup as soon as the marker is placed.
    pub open_popup: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaOverlay {
    pub ring: Vec<Position>,
    pub style: AreaStyle,
    pub popup: String,
}

/// Everything a map collaborator needs to draw one attempt's map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub center: Position,
    pub zoom: u8,
    pub tiles: TileSource,
    pub marker: Marker,
    pub area: AreaOverlay,
}

impl MapScene {
    pub fn for_position(
        position: Position,
        config: &MapConfig,
        area: &AllowedArea,
        messages: &Messages,
    ) -> Self {
        Self {
            center: position,
            zoom: config.zoom,
            tiles: config.tiles.clone(),
            marker: Marker {
                position,
                popup: messages.marker_popup.to_string(),
                open_popup: true,
            },
            area: AreaOverlay {
                ring: area.ring().to_vec(),
                style: config.area_style.clone(),
                popup: messages.area_popup.to_string(),
            },
        }
    }

    /// `[[lat, lon], ...]`, the ring layout Leaflet-style APIs take.
    pub fn area_lat_lngs(&self) -> Vec<[f64; 2]> {
        self.area
            .ring
            .iter()
            .map(|p| [p.latitude, p.longitude])
            .collect()
    }
}
