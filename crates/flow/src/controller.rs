use foundation::{AllowedArea, Position};
use protocol::TokenRequest;
use tracing::{debug, info, warn};

use crate::collab::{Geolocator, MapRenderer, TokenClient, UiSurface, WindowHost};
use crate::config::FlowConfig;
use crate::error::{GeolocationError, GeolocationErrorKind, VerifyError};
use crate::map::MapScene;
use crate::messages::Messages;
use crate::phase::FlowPhase;
use crate::trace::TransitionLog;
use crate::ui::{FlowUiState, Severity, StatusMessage};
use crate::verdict::classify_response;

/// How one call to [`VerificationFlow::run_attempt`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The popup closed and the page was sent to the thank-you destination.
    Navigated,
    LocationFailed(GeolocationErrorKind),
    VerifyFailed(VerifyError),
    /// Not started: an attempt is already in flight or the flow has navigated.
    Busy,
}

/// Drives geolocation, map feedback, token exchange and the form popup.
///
/// The controller owns the UI state and pushes a full snapshot to its
/// [`UiSurface`] after every change. Attempts are not cancelable; dropping a
/// `run_attempt` future mid-way leaves the flow in flight.
pub struct VerificationFlow<G, T, M, W, U> {
    config: FlowConfig,
    messages: &'static Messages,
    area: AllowedArea,
    geolocator: G,
    tokens: T,
    map: M,
    window: W,
    surface: U,
    ui: FlowUiState,
    phase: FlowPhase,
    attempts: u64,
    log: TransitionLog,
}

impl<G, T, M, W, U> VerificationFlow<G, T, M, W, U>
where
    G: Geolocator,
    T: TokenClient,
    M: MapRenderer,
    W: WindowHost,
    U: UiSurface,
{
    /// Builds an idle flow and publishes the idle state to `surface`.
    pub fn new(config: FlowConfig, geolocator: G, tokens: T, map: M, window: W, surface: U) -> Self {
        let messages = Messages::for_locale(config.locale);
        let mut flow = Self {
            config,
            messages,
            area: AllowedArea::permitted(),
            geolocator,
            tokens,
            map,
            window,
            surface,
            ui: FlowUiState::idle(messages.button_idle),
            phase: FlowPhase::Idle,
            attempts: 0,
            log: TransitionLog::new(),
        };
        flow.publish();
        flow
    }

    pub async fn run_attempt(&mut self) -> AttemptOutcome {
        if self.phase != FlowPhase::Idle {
            debug!(phase = self.phase.as_str(), "start ignored");
            return AttemptOutcome::Busy;
        }
        self.attempts += 1;
        info!(attempt = self.attempts, "verification attempt started");

        self.ui.begin(self.messages.button_busy);
        self.map.clear();
        self.publish();
        self.enter(FlowPhase::Locating);

        let position = match self
            .geolocator
            .current_position(&self.config.geolocation)
            .await
        {
            Ok(p) => p,
            Err(err) => return self.fail_location(err),
        };
        self.enter(FlowPhase::LocationOk);
        self.show_position(position);

        self.enter(FlowPhase::Verifying);
        let token = match self.exchange(position).await {
            Ok(token) => token,
            Err(err) => return self.fail_verify(err),
        };

        self.enter(FlowPhase::Unlocking);
        self.unlock(&token).await
    }

    fn show_position(&mut self, position: Position) {
        self.ui.status = Some(StatusMessage::new(
            self.messages.located(&position),
            Severity::Info,
        ));
        let scene = MapScene::for_position(position, &self.config.map, &self.area, self.messages);
        self.map.render(&scene);
        self.ui.map_rendered = true;
        self.publish();
    }

    async fn exchange(&mut self, position: Position) -> Result<String, VerifyError> {
        let url = self.config.endpoints.token_url();
        let request = TokenRequest::from(position);
        debug!(%url, lat = request.lat, lon = request.lon, "requesting form token");

        let raw = self.tokens.exchange(&url, &request).await?;
        debug!(status = raw.status, content_type = ?raw.content_type, "token response");

        let verdict = classify_response(&raw);
        if let Some(text) = verdict.payload_text() {
            self.ui.debug_payload = Some(text);
            self.publish();
        }
        verdict.token
    }

    async fn unlock(&mut self, token: &str) -> AttemptOutcome {
        self.ui.status = Some(StatusMessage::new(self.messages.verified, Severity::Success));
        self.publish();

        let url = self.config.endpoints.form_url(token);
        let Some(popup) = self.window.open_popup(&url, &self.config.popup) else {
            return self.fail_verify(VerifyError::PopupBlocked);
        };
        self.enter(FlowPhase::WaitingForPopupClose);

        let interval = self.config.poll_interval_ms;
        loop {
            self.window.sleep(interval).await;
            if self.window.is_closed(&popup) {
                break;
            }
        }

        let destination = self.config.endpoints.thank_you_url().to_string();
        info!(%destination, "form window closed, navigating");
        self.window.navigate(&destination);
        self.enter(FlowPhase::Navigated);
        AttemptOutcome::Navigated
    }

    fn fail_location(&mut self, err: GeolocationError) -> AttemptOutcome {
        warn!(error = %err, "geolocation failed");
        self.ui.status = Some(StatusMessage::new(
            self.messages.geolocation_error(err.kind),
            Severity::Error,
        ));
        self.ui.debug_payload = Some(if err.message.is_empty() {
            err.to_string()
        } else {
            err.message.clone()
        });
        self.enter(FlowPhase::LocationFailed);
        self.finish();
        AttemptOutcome::LocationFailed(err.kind)
    }

    fn fail_verify(&mut self, err: VerifyError) -> AttemptOutcome {
        warn!(error = %err, kind = err.kind(), "verification failed");
        self.ui.status = Some(StatusMessage::new(
            self.verify_status_text(&err),
            Severity::Warning,
        ));
        // A decoded payload stays on screen; other failures show their raw detail.
        if self.ui.debug_payload.is_none() {
            self.ui.debug_payload = Some(match &err {
                VerifyError::Network(msg) => msg.clone(),
                other => other.to_string(),
            });
        }
        self.enter(FlowPhase::VerifyFailed);
        self.finish();
        AttemptOutcome::VerifyFailed(err)
    }

    fn verify_status_text(&self, err: &VerifyError) -> String {
        let m = self.messages;
        match err {
            VerifyError::Rejected { reason, .. } => {
                m.verify_failure(reason.as_deref().unwrap_or(m.rejected))
            }
            VerifyError::NotJson { .. } => m.verify_failure(m.not_json),
            VerifyError::Malformed(_) => m.verify_failure(m.malformed),
            VerifyError::Network(_) => m.verify_failure(m.network_failure),
            VerifyError::PopupBlocked => m.popup_blocked.to_string(),
        }
    }

    /// Hands the control back after a failed attempt.
    fn finish(&mut self) {
        self.ui.end(self.messages.button_idle);
        self.publish();
        self.enter(FlowPhase::Idle);
    }

    fn enter(&mut self, next: FlowPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal flow transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!(
            attempt = self.attempts,
            from = self.phase.as_str(),
            to = next.as_str(),
            "flow transition"
        );
        self.log.record(self.attempts, self.phase, next);
        self.phase = next;
    }

    fn publish(&mut self) {
        self.surface.apply(&self.ui);
    }

    pub fn ui_state(&self) -> &FlowUiState {
        &self.ui
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn transition_log(&self) -> &TransitionLog {
        &self.log
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn geolocator(&self) -> &G {
        &self.geolocator
    }

    pub fn token_client(&self) -> &T {
        &self.tokens
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }
}
