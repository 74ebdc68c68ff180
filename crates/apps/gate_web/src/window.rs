use flow::{PopupFeatures, WindowHost};
use js_sys::Promise;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

/// The page's own window: popups, navigation and timers.
pub struct BrowserWindow {
    window: Window,
}

impl BrowserWindow {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl WindowHost for BrowserWindow {
    type Popup = Window;

    fn open_popup(&mut self, url: &str, features: &PopupFeatures) -> Option<Window> {
        self.window
            .open_with_url_and_target_and_features(url, &features.target, &features.features())
            .ok()
            .flatten()
    }

    fn is_closed(&self, popup: &Window) -> bool {
        popup.closed().unwrap_or(true)
    }

    fn navigate(&mut self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            web_sys::console::error_1(&err);
        }
    }

    async fn sleep(&self, ms: u32) {
        let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve, reject| {
            if let Err(err) = self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
            {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });
        // A timer that could not be scheduled ends the wait early.
        if let Err(err) = JsFuture::from(promise).await {
            web_sys::console::error_1(&err);
        }
    }
}
