//! Collaborators for running the flow without a browser.

use std::io::Write;
use std::time::Duration;

use flow::{
    FlowUiState, GeolocationError, GeolocationErrorKind, Geolocator, MapRenderer, MapScene,
    PopupFeatures, PositionOptions, UiSurface, WindowHost,
};
use foundation::Position;
use tracing::info;

/// Reports a position given on the command line.
pub struct FixedGeolocator {
    position: Option<Position>,
}

impl FixedGeolocator {
    pub fn new(lat: Option<f64>, lon: Option<f64>) -> Self {
        Self {
            position: lat.zip(lon).map(|(lat, lon)| Position::new(lat, lon)),
        }
    }
}

impl Geolocator for FixedGeolocator {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, GeolocationError> {
        match self.position {
            Some(p) if p.is_valid() => Ok(p),
            Some(p) => Err(GeolocationError::new(
                GeolocationErrorKind::PositionUnavailable,
                format!("coordinates out of range: {}", p.display_pair()),
            )),
            None => Err(GeolocationError::new(
                GeolocationErrorKind::PositionUnavailable,
                "both --lat and --lon are required",
            )),
        }
    }
}

/// Logs the scene instead of drawing it.
#[derive(Default)]
pub struct LogMap {
    pub rendered: usize,
}

impl MapRenderer for LogMap {
    fn clear(&mut self) {}

    fn render(&mut self, scene: &MapScene) {
        self.rendered += 1;
        info!(
            center = %scene.center.display_pair(),
            zoom = scene.zoom,
            area_vertices = scene.area.ring.len(),
            "map scene"
        );
    }
}

/// Prints status and debug output whenever they change.
pub struct ConsoleSurface<W> {
    out: W,
    last: Option<FlowUiState>,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> UiSurface for ConsoleSurface<W> {
    fn apply(&mut self, state: &FlowUiState) {
        let prev = self.last.replace(state.clone());
        let prev_status = prev.as_ref().and_then(|p| p.status.as_ref());
        let prev_debug = prev.as_ref().and_then(|p| p.debug_payload.as_ref());

        // Console output is best effort.
        if let Some(status) = &state.status {
            if prev_status != Some(status) {
                let _ = writeln!(self.out, "[{}] {}", status.severity.class_name(), status.text);
            }
        }
        if let Some(debug) = &state.debug_payload {
            if prev_debug != Some(debug) {
                let _ = writeln!(self.out, "{debug}");
            }
        }
    }
}

/// A browsing context with no real window: the popup counts as closed at
/// the first poll.
#[derive(Default)]
pub struct HeadlessWindow {
    pub opened: Vec<String>,
    pub navigated: Option<String>,
}

impl WindowHost for HeadlessWindow {
    type Popup = usize;

    fn open_popup(&mut self, url: &str, features: &PopupFeatures) -> Option<usize> {
        info!(%url, features = %features.features(), "opening form");
        self.opened.push(url.to_string());
        Some(self.opened.len() - 1)
    }

    fn is_closed(&self, _popup: &usize) -> bool {
        true
    }

    fn navigate(&mut self, url: &str) {
        self.navigated = Some(url.to_string());
    }

    async fn sleep(&self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(u64::from(ms))).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow::{Severity, StatusMessage};

    #[tokio::test]
    async fn fixed_geolocator_requires_both_coordinates() {
        let opts = PositionOptions::default();
        let ok = FixedGeolocator::new(Some(21.5), Some(39.8));
        assert_eq!(
            ok.current_position(&opts).await,
            Ok(Position::new(21.5, 39.8))
        );

        let missing = FixedGeolocator::new(Some(21.5), None);
        let err = missing.current_position(&opts).await.unwrap_err();
        assert_eq!(err.kind, GeolocationErrorKind::PositionUnavailable);

        let out_of_range = FixedGeolocator::new(Some(95.0), Some(0.0));
        assert!(out_of_range.current_position(&opts).await.is_err());
    }

    #[test]
    fn console_surface_prints_only_changes() {
        let mut surface = ConsoleSurface::new(Vec::new());
        let mut state = FlowUiState::idle("open");
        surface.apply(&state);

        state.status = Some(StatusMessage::new("located", Severity::Info));
        surface.apply(&state);
        surface.apply(&state);

        state.debug_payload = Some("{}".to_string());
        surface.apply(&state);

        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(text, "[info] located\n{}\n");
    }
}
