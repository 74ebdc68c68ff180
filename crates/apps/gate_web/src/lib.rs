use std::cell::RefCell;
use std::rc::Rc;

use console_error_panic_hook::set_once;
use flow::{AttemptOutcome, FlowConfig, FlowPhase, VerificationFlow};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

mod geolocation;
mod http;
mod leaflet;
mod view;
mod window;

use geolocation::BrowserGeolocator;
use http::FetchTokenClient;
use leaflet::LeafletRenderer;
use view::DomSurface;
use window::BrowserWindow;

const BUTTON_ID: &str = "openForm";
const STATUS_ID: &str = "status";
const DEBUG_ID: &str = "debug";
const MAP_ID: &str = "map";

type WebFlow =
    VerificationFlow<BrowserGeolocator, FetchTokenClient, LeafletRenderer, BrowserWindow, DomSurface>;

/// Best-effort text for a thrown JS value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

/// Console line describing how an attempt ended.
#[derive(Debug, PartialEq, Eq)]
enum ConsoleNote {
    Log(String),
    Warn(String),
}

fn outcome_note(outcome: &AttemptOutcome, phase: FlowPhase) -> Option<ConsoleNote> {
    match outcome {
        AttemptOutcome::Navigated => None,
        AttemptOutcome::LocationFailed(kind) => Some(ConsoleNote::Warn(format!(
            "geolocation failed: {}",
            kind.as_str()
        ))),
        AttemptOutcome::VerifyFailed(err) => {
            Some(ConsoleNote::Warn(format!("verification failed: {err}")))
        }
        AttemptOutcome::Busy if phase.is_terminal() => Some(ConsoleNote::Log(
            "click ignored: already sent to the confirmation page".to_string(),
        )),
        AttemptOutcome::Busy => Some(ConsoleNote::Log(format!(
            "click ignored: flow is {}",
            phase.as_str()
        ))),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Wires the verification flow to `#openForm`, `#status`, `#debug` and `#map`.
///
/// `config_json` optionally overrides defaults, e.g.
/// `{"endpoints":{"base_url":"https://forms.example"},"locale":"en"}`.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => FlowConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => FlowConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let button: HtmlButtonElement = element(&document, BUTTON_ID)?;
    let surface = DomSurface {
        button: button.clone(),
        status: element::<HtmlElement>(&document, STATUS_ID)?,
        debug: element::<HtmlElement>(&document, DEBUG_ID)?,
    };
    let map = LeafletRenderer::new(element::<HtmlElement>(&document, MAP_ID)?);

    let flow: WebFlow = VerificationFlow::new(
        config,
        BrowserGeolocator::new(window.navigator()),
        FetchTokenClient,
        map,
        BrowserWindow::new(window),
        surface,
    );

    // The flow leaves its slot for the duration of an attempt.
    let slot: Rc<RefCell<Option<WebFlow>>> = Rc::new(RefCell::new(Some(flow)));
    let on_click = Closure::<dyn FnMut()>::new(move || {
        let Some(mut flow) = slot.borrow_mut().take() else {
            web_sys::console::log_1(&JsValue::from_str("verification already in progress"));
            return;
        };
        let slot = slot.clone();
        spawn_local(async move {
            let outcome = flow.run_attempt().await;
            match outcome_note(&outcome, flow.phase()) {
                Some(ConsoleNote::Warn(line)) => web_sys::console::warn_1(&JsValue::from_str(&line)),
                Some(ConsoleNote::Log(line)) => web_sys::console::log_1(&JsValue::from_str(&line)),
                None => {}
            }
            *slot.borrow_mut() = Some(flow);
        });
    });
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ConsoleNote, outcome_note};
    use flow::{AttemptOutcome, FlowPhase, GeolocationErrorKind, VerifyError};

    #[test]
    fn failures_are_warnings() {
        assert_eq!(
            outcome_note(
                &AttemptOutcome::LocationFailed(GeolocationErrorKind::Timeout),
                FlowPhase::Idle
            ),
            Some(ConsoleNote::Warn("geolocation failed: timeout".to_string()))
        );
        assert_eq!(
            outcome_note(
                &AttemptOutcome::VerifyFailed(VerifyError::PopupBlocked),
                FlowPhase::Idle
            ),
            Some(ConsoleNote::Warn(
                "verification failed: form window was blocked".to_string()
            ))
        );
    }

    #[test]
    fn click_after_navigation_is_logged() {
        assert_eq!(
            outcome_note(&AttemptOutcome::Busy, FlowPhase::Navigated),
            Some(ConsoleNote::Log(
                "click ignored: already sent to the confirmation page".to_string()
            ))
        );
        assert_eq!(
            outcome_note(&AttemptOutcome::Busy, FlowPhase::Verifying),
            Some(ConsoleNote::Log("click ignored: flow is verifying".to_string()))
        );
        assert_eq!(outcome_note(&AttemptOutcome::Navigated, FlowPhase::Navigated), None);
    }
}
