//! Minimal Leaflet bindings; `L` must be loaded by the host page.

use flow::{MapRenderer, MapScene};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    type Map;
    type Layer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn new_map(container: &HtmlElement) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: u8) -> Map;

    #[wasm_bindgen(method)]
    fn remove(this: &Map);

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(lat_lng: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = polygon)]
    fn polygon(lat_lngs: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &str) -> Layer;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Layer) -> Layer;
}

#[derive(Serialize)]
struct TileOptions<'a> {
    subdomains: &'a [String],
    attribution: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolygonOptions<'a> {
    color: &'a str,
    fill_opacity: f64,
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

/// Draws the attempt map into a fixed container, replacing any earlier map.
pub struct LeafletRenderer {
    container: HtmlElement,
    current: Option<Map>,
}

impl LeafletRenderer {
    pub fn new(container: HtmlElement) -> Self {
        Self {
            container,
            current: None,
        }
    }

    fn draw(&self, scene: &MapScene) -> Result<Map, JsValue> {
        let map = new_map(&self.container)?;
        map.set_view(&to_js(&[scene.center.latitude, scene.center.longitude])?, scene.zoom);

        let tiles = TileOptions {
            subdomains: &scene.tiles.subdomains,
            attribution: &scene.tiles.attribution,
        };
        tile_layer(&scene.tiles.url_template, &to_js(&tiles)?).add_to(&map);

        let pin = [scene.marker.position.latitude, scene.marker.position.longitude];
        let pin_layer = marker(&to_js(&pin)?)
            .add_to(&map)
            .bind_popup(&scene.marker.popup);
        if scene.marker.open_popup {
            pin_layer.open_popup();
        }

        let style = PolygonOptions {
            color: &scene.area.style.color,
            fill_opacity: scene.area.style.fill_opacity,
        };
        polygon(&to_js(&scene.area_lat_lngs())?, &to_js(&style)?)
            .add_to(&map)
            .bind_popup(&scene.area.popup);

        Ok(map)
    }
}

impl MapRenderer for LeafletRenderer {
    fn clear(&mut self) {
        if let Some(map) = self.current.take() {
            map.remove();
        }
        self.container.set_inner_html("");
    }

    fn render(&mut self, scene: &MapScene) {
        match self.draw(scene) {
            Ok(map) => self.current = Some(map),
            Err(err) => web_sys::console::error_1(&err),
        }
    }
}
