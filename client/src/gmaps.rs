//! Bindings to the parts of the Google Maps JavaScript API the map uses.
//! Only valid once the maps script has loaded.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type Map;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps"], js_class = "Map")]
    pub fn new(container: &web_sys::HtmlElement, options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setCenter)]
    pub fn set_center(this: &Map, center: &JsValue);

    #[wasm_bindgen(method, js_name = setZoom)]
    pub fn set_zoom(this: &Map, zoom: f64);
}

#[wasm_bindgen]
extern "C" {
    pub type Marker;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps"], js_class = "Marker")]
    pub fn new(options: &JsValue) -> Result<Marker, JsValue>;

    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &Marker, map: Option<&Map>);

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &Marker, event: &str, handler: &js_sys::Function)
    -> MapsEventListener;
}

#[wasm_bindgen]
extern "C" {
    pub type InfoWindow;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps"], js_class = "InfoWindow")]
    pub fn new(options: &JsValue) -> Result<InfoWindow, JsValue>;

    #[wasm_bindgen(method, js_name = setContent)]
    pub fn set_content(this: &InfoWindow, content: &web_sys::Element);

    /// `options` is an `InfoWindowOpenOptions` literal (`anchor`, `map`).
    #[wasm_bindgen(method)]
    pub fn open(this: &InfoWindow, options: &JsValue);

    #[wasm_bindgen(method)]
    pub fn close(this: &InfoWindow);

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(
        this: &InfoWindow,
        event: &str,
        handler: &js_sys::Function,
    ) -> MapsEventListener;
}

#[wasm_bindgen]
extern "C" {
    pub type MapsEventListener;

    #[wasm_bindgen(method)]
    pub fn remove(this: &MapsEventListener);

    #[wasm_bindgen(js_namespace = ["google", "maps", "event"], js_name = clearInstanceListeners)]
    pub fn clear_instance_listeners(instance: &JsValue);
}
