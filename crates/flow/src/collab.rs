//! Seams between the flow and the outside world.
//!
//! Every method is called from a single logical thread, so futures carry no
//! `Send` bound and collaborators may hold `Rc`/`RefCell` state.

use std::future::Future;

use foundation::Position;
use protocol::{RawResponse, TokenRequest};

use crate::config::{PopupFeatures, PositionOptions};
use crate::error::{GeolocationError, TransportError};
use crate::map::MapScene;
use crate::ui::FlowUiState;

pub trait Geolocator {
    /// Acquires one fresh fix. Not cancelable once started.
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Position, GeolocationError>>;
}

pub trait TokenClient {
    /// POSTs `request` as JSON to `url`, bypassing any local cache.
    ///
    /// Any HTTP status is a successful round trip; only connection-level
    /// problems are errors.
    fn exchange(
        &self,
        url: &str,
        request: &TokenRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>>;
}

pub trait MapRenderer {
    /// Removes any map drawn by an earlier attempt.
    fn clear(&mut self);
    fn render(&mut self, scene: &MapScene);
}

/// The browsing context hosting the widget.
pub trait WindowHost {
    type Popup;

    /// Opens a new window; `None` when the browser refused.
    fn open_popup(&mut self, url: &str, features: &PopupFeatures) -> Option<Self::Popup>;
    fn is_closed(&self, popup: &Self::Popup) -> bool;
    fn navigate(&mut self, url: &str);
    fn sleep(&self, ms: u32) -> impl Future<Output = ()>;
}

pub trait UiSurface {
    fn apply(&mut self, state: &FlowUiState);
}
