use flow::{GeolocationError, GeolocationErrorKind, Geolocator, PositionOptions};
use foundation::Position;
use js_sys::{Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Navigator, Position as GeolocationPosition};

use crate::describe_js;

/// `navigator.geolocation.getCurrentPosition` as a future.
pub struct BrowserGeolocator {
    navigator: Navigator,
}

impl BrowserGeolocator {
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }
}

impl Geolocator for BrowserGeolocator {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Position, GeolocationError> {
        let geolocation = self.navigator.geolocation().map_err(|err| {
            GeolocationError::new(GeolocationErrorKind::Other, describe_js(&err))
        })?;

        let opts = web_sys::PositionOptions::new();
        opts.set_enable_high_accuracy(options.enable_high_accuracy);
        opts.set_timeout(options.timeout_ms);
        opts.set_maximum_age(options.maximum_age_ms);

        let promise = Promise::new(&mut |resolve, reject| {
            if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &opts,
            ) {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });

        match JsFuture::from(promise).await {
            Ok(value) => {
                // Older engines name the class `Position`; skip the instanceof check.
                let fix: GeolocationPosition = value.unchecked_into();
                let coords = fix.coords();
                Ok(Position::new(coords.latitude(), coords.longitude()))
            }
            Err(err) => Err(position_error(&err)),
        }
    }
}

/// Reads `{code, message}` off a `GeolocationPositionError`, or anything thrown instead.
fn position_error(err: &JsValue) -> GeolocationError {
    let code = Reflect::get(err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as u16)
        .unwrap_or(0);
    GeolocationError::new(GeolocationErrorKind::from_code(code), describe_js(err))
}
