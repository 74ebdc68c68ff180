//! Recording fakes for every collaborator.

use std::cell::{Cell, RefCell};
use std::future::{Future, ready};
use std::rc::Rc;

use foundation::Position;
use protocol::{RawResponse, TokenRequest};

use crate::collab::{Geolocator, MapRenderer, TokenClient, UiSurface, WindowHost};
use crate::config::{FlowConfig, PopupFeatures, PositionOptions};
use crate::controller::VerificationFlow;
use crate::error::{GeolocationError, TransportError};
use crate::map::MapScene;
use crate::messages::Locale;
use crate::ui::FlowUiState;

pub(crate) fn sample_position() -> Position {
    Position::new(21.45338975, 39.85719504)
}

pub(crate) fn granted(token: &str) -> RawResponse {
    RawResponse::json(
        200,
        serde_json::json!({ "success": true, "token": token }).to_string(),
    )
}

/// Cross-collaborator call order.
#[derive(Debug, Default, Clone)]
pub(crate) struct Journal(Rc<RefCell<Vec<&'static str>>>);

impl Journal {
    fn push(&self, entry: &'static str) {
        self.0.borrow_mut().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<&'static str> {
        self.0.borrow().clone()
    }
}

pub(crate) struct FakeGeolocator {
    result: Result<Position, GeolocationError>,
    calls: Cell<usize>,
    last_options: Cell<Option<PositionOptions>>,
    journal: Journal,
}

impl FakeGeolocator {
    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    pub(crate) fn last_options(&self) -> Option<PositionOptions> {
        self.last_options.get()
    }
}

impl Geolocator for FakeGeolocator {
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Position, GeolocationError>> {
        self.journal.push("geolocate");
        self.calls.set(self.calls.get() + 1);
        self.last_options.set(Some(*options));
        ready(self.result.clone())
    }
}

pub(crate) struct FakeTokenClient {
    response: Result<RawResponse, TransportError>,
    requests: RefCell<Vec<(String, TokenRequest)>>,
    journal: Journal,
}

impl FakeTokenClient {
    pub(crate) fn requests(&self) -> Vec<(String, TokenRequest)> {
        self.requests.borrow().clone()
    }
}

impl TokenClient for FakeTokenClient {
    fn exchange(
        &self,
        url: &str,
        request: &TokenRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> {
        self.journal.push("exchange");
        self.requests.borrow_mut().push((url.to_string(), *request));
        ready(self.response.clone())
    }
}

#[derive(Default)]
pub(crate) struct RecordingMap {
    pub(crate) clears: usize,
    pub(crate) scenes: Vec<MapScene>,
    journal: Journal,
}

impl RecordingMap {
    pub(crate) fn journal(&self) -> &Journal {
        &self.journal
    }
}

impl MapRenderer for RecordingMap {
    fn clear(&mut self) {
        self.journal.push("map.clear");
        self.clears += 1;
    }

    fn render(&mut self, scene: &MapScene) {
        self.journal.push("map.render");
        self.scenes.push(scene.clone());
    }
}

pub(crate) struct FakeWindow {
    block_popups: bool,
    closes_after: usize,
    polls: Cell<usize>,
    sleeps: RefCell<Vec<u32>>,
    pub(crate) opened: Vec<(String, PopupFeatures)>,
    pub(crate) navigations: Vec<String>,
}

impl FakeWindow {
    pub(crate) fn polls(&self) -> usize {
        self.polls.get()
    }

    pub(crate) fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

impl WindowHost for FakeWindow {
    type Popup = usize;

    fn open_popup(&mut self, url: &str, features: &PopupFeatures) -> Option<usize> {
        if self.block_popups {
            return None;
        }
        self.opened.push((url.to_string(), features.clone()));
        Some(self.opened.len() - 1)
    }

    fn is_closed(&self, _popup: &usize) -> bool {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        polls >= self.closes_after
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn sleep(&self, ms: u32) -> impl Future<Output = ()> {
        self.sleeps.borrow_mut().push(ms);
        ready(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingUi {
    pub(crate) snapshots: Vec<FlowUiState>,
}

impl UiSurface for RecordingUi {
    fn apply(&mut self, state: &FlowUiState) {
        self.snapshots.push(state.clone());
    }
}

pub(crate) type TestFlow =
    VerificationFlow<FakeGeolocator, FakeTokenClient, RecordingMap, FakeWindow, RecordingUi>;

pub(crate) struct Setup {
    config: FlowConfig,
    geolocation: Result<Position, GeolocationError>,
    token: Result<RawResponse, TransportError>,
    block_popups: bool,
    closes_after: usize,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            config: FlowConfig::default(),
            geolocation: Ok(sample_position()),
            token: Ok(granted("token-1")),
            block_popups: false,
            closes_after: 1,
        }
    }
}

impl Setup {
    pub(crate) fn english() -> Self {
        Self {
            config: FlowConfig {
                locale: Locale::En,
                ..FlowConfig::default()
            },
            ..Self::default()
        }
    }

    pub(crate) fn geolocation(mut self, result: Result<Position, GeolocationError>) -> Self {
        self.geolocation = result;
        self
    }

    pub(crate) fn token(mut self, response: Result<RawResponse, TransportError>) -> Self {
        self.token = response;
        self
    }

    pub(crate) fn block_popups(mut self) -> Self {
        self.block_popups = true;
        self
    }

    pub(crate) fn closes_after_polls(mut self, polls: usize) -> Self {
        self.closes_after = polls;
        self
    }

    pub(crate) fn build(self) -> TestFlow {
        let journal = Journal::default();
        VerificationFlow::new(
            self.config,
            FakeGeolocator {
                result: self.geolocation,
                calls: Cell::new(0),
                last_options: Cell::new(None),
                journal: journal.clone(),
            },
            FakeTokenClient {
                response: self.token,
                requests: RefCell::new(Vec::new()),
                journal: journal.clone(),
            },
            RecordingMap {
                journal,
                ..RecordingMap::default()
            },
            FakeWindow {
                block_popups: self.block_popups,
                closes_after: self.closes_after,
                polls: Cell::new(0),
                sleeps: RefCell::new(Vec::new()),
                opened: Vec::new(),
                navigations: Vec::new(),
            },
            RecordingUi::default(),
        )
    }
}
