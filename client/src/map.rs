use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use js_sys::{Object, Reflect};
use leptos::prelude::*;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use datasource_map_shared::{
    DatasourceError, MARKER_ICON_URL, MapDetailItem, MapOptions, MapRange, MapsSettings,
    MarkerPlacement, Selection, SettingsError, plan_markers,
};

use crate::gmaps;
use crate::loader::{ScriptStatus, load_maps_script};

pub(crate) const CONTAINER_CLASS: &str = "location-finder-map-container";
pub(crate) const MAP_CLASS: &str = "map";
const EMPTY_DETAILS_TEXT: &str = "No details for this location.";

/// What the component shows, in order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MapPhase {
    MissingDatasource(String),
    Loading,
    Unavailable,
    Ready,
}

impl MapPhase {
    pub(crate) fn from_state(datasource_error: Option<String>, status: ScriptStatus) -> Self {
        if let Some(message) = datasource_error {
            return Self::MissingDatasource(message);
        }
        match status {
            ScriptStatus::Loading => Self::Loading,
            ScriptStatus::Failed => Self::Unavailable,
            ScriptStatus::Ready => Self::Ready,
        }
    }
}

/// Map of datasource items with one info window per clicked marker.
#[component]
pub fn DatasourceMap(
    #[prop(into)] range: Signal<MapRange>,
    #[prop(into)] items: Signal<Result<Vec<MapDetailItem>, DatasourceError>>,
    settings: Result<MapsSettings, SettingsError>,
) -> impl IntoView {
    let status = match &settings {
        Ok(settings) => load_maps_script(settings),
        Err(e) => {
            log::error!("map disabled: {e}");
            RwSignal::new(ScriptStatus::Failed)
        }
    };

    let datasource_error = Memo::new(move |_| {
        items.with(|result| result.as_ref().err().map(ToString::to_string))
    });
    let map_items = Memo::new(move |_| {
        items.with(|result| result.as_ref().map(Clone::clone).unwrap_or_default())
    });
    let phase = Memo::new(move |_| MapPhase::from_state(datasource_error.get(), status.get()));

    Effect::new(move || {
        if let Some(message) = datasource_error.get() {
            log::error!("map has no items: {message}");
        }
    });

    view! {
        {move || match phase.get() {
            MapPhase::MissingDatasource(message) => view! {
                <p class="map-notice">{message}</p>
            }.into_any(),
            MapPhase::Loading => view! { <p>"Loading..."</p> }.into_any(),
            MapPhase::Unavailable => view! {
                <p class="map-notice">"Map unavailable"</p>
            }.into_any(),
            MapPhase::Ready => view! { <MapCanvas range=range items=map_items /> }.into_any(),
        }}
    }
}

thread_local! {
    static NEXT_CANVAS_ID: Cell<u64> = const { Cell::new(0) };
    static CANVASES: RefCell<HashMap<u64, MapBinding>> = RefCell::new(HashMap::new());
}

fn with_binding<R>(id: u64, f: impl FnOnce(&mut MapBinding) -> R) -> Option<R> {
    CANVASES.with(|slot| slot.borrow_mut().get_mut(&id).map(f))
}

fn teardown(id: u64) {
    let binding = CANVASES.with(|slot| slot.borrow_mut().remove(&id));
    if let Some(binding) = binding {
        binding.detach();
    }
}

#[component]
fn MapCanvas(range: Signal<MapRange>, items: Memo<Vec<MapDetailItem>>) -> impl IntoView {
    let selection = RwSignal::new(Selection::new());
    let map_ready = RwSignal::new(false);
    let map_ref = NodeRef::<leptos::html::Div>::new();
    let options = StoredValue::new(MapOptions::standard());
    let id = NEXT_CANVAS_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });

    on_cleanup(move || teardown(id));

    // Create the map once its container is in the DOM
    Effect::new(move || {
        let Some(container) = map_ref.get() else {
            return;
        };
        if map_ready.get_untracked() {
            return;
        }
        match options.with_value(|opts| MapBinding::create(&container, opts, selection)) {
            Ok(binding) => {
                CANVASES.with(|slot| slot.borrow_mut().insert(id, binding));
                map_ready.set(true);
            }
            Err(e) => log::error!("failed to create map: {e:?}"),
        }
    });

    Effect::new(move || {
        if !map_ready.get() {
            return;
        }
        let view = range.get();
        with_binding(id, |binding| binding.set_view(view));
    });

    // A changed item list invalidates any selected index
    Effect::new(move |previous: Option<Vec<MapDetailItem>>| {
        let next = items.get();
        if let Some(previous) = previous {
            let mut sel = selection.get_untracked();
            if sel.follow_items(&previous, &next) {
                selection.set(sel);
            }
        }
        next
    });

    Effect::new(move || {
        if !map_ready.get() {
            return;
        }
        let placements = items.with(|items| plan_markers(items));
        with_binding(id, |binding| binding.set_markers(&placements, selection));
    });

    Effect::new(move || {
        if !map_ready.get() {
            return;
        }
        let open = selection.with(Selection::open_index).and_then(|index| {
            items.with(|items| items.get(index).map(|item| (index, item.details.clone())))
        });
        with_binding(id, |binding| binding.show_popup(open));
    });

    view! {
        <div class=CONTAINER_CLASS>
            <div class=MAP_CLASS>
                <div node_ref=map_ref style="width: 100%; height: 100%;" />
            </div>
        </div>
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// Live maps-library objects owned by one `MapCanvas`.
struct MapBinding {
    map: gmaps::Map,
    info_window: gmaps::InfoWindow,
    close_listener: gmaps::MapsEventListener,
    _on_close: Closure<dyn FnMut()>,
    markers: Vec<MarkerBinding>,
}

struct MarkerBinding {
    index: usize,
    marker: gmaps::Marker,
    listener: gmaps::MapsEventListener,
    _on_click: Closure<dyn FnMut()>,
}

impl MarkerBinding {
    fn place(
        map: &gmaps::Map,
        placement: MarkerPlacement,
        selection: RwSignal<Selection>,
    ) -> Result<Self, JsValue> {
        let opts = Object::new();
        Reflect::set(
            &opts,
            &JsValue::from_str("position"),
            &to_js(&placement.position)?,
        )?;
        Reflect::set(
            &opts,
            &JsValue::from_str("icon"),
            &JsValue::from_str(MARKER_ICON_URL),
        )?;
        Reflect::set(&opts, &JsValue::from_str("map"), map.as_ref())?;

        let marker = gmaps::Marker::new(&opts)?;
        let index = placement.index;
        let on_click = Closure::<dyn FnMut()>::new(move || {
            selection.update(|sel| sel.click(index));
        });
        let listener = marker.add_listener("click", on_click.as_ref().unchecked_ref());

        Ok(Self {
            index,
            marker,
            listener,
            _on_click: on_click,
        })
    }

    fn detach(self) {
        self.listener.remove();
        self.marker.set_map(None);
    }
}

impl MapBinding {
    fn create(
        container: &web_sys::HtmlElement,
        options: &MapOptions,
        selection: RwSignal<Selection>,
    ) -> Result<Self, JsValue> {
        let map = gmaps::Map::new(container, &to_js(options)?)?;
        let info_window = gmaps::InfoWindow::new(&Object::new())?;
        let on_close = Closure::<dyn FnMut()>::new(move || {
            selection.update(Selection::close);
        });
        let close_listener =
            info_window.add_listener("closeclick", on_close.as_ref().unchecked_ref());

        Ok(Self {
            map,
            info_window,
            close_listener,
            _on_close: on_close,
            markers: Vec::new(),
        })
    }

    fn set_view(&self, range: MapRange) {
        match to_js(&range.center) {
            Ok(center) => self.map.set_center(&center),
            Err(e) => log::warn!("failed to convert map center: {e:?}"),
        }
        self.map.set_zoom(range.zoom);
    }

    fn set_markers(&mut self, placements: &[MarkerPlacement], selection: RwSignal<Selection>) {
        for marker in self.markers.drain(..) {
            marker.detach();
        }
        for placement in placements {
            match MarkerBinding::place(&self.map, *placement, selection) {
                Ok(marker) => self.markers.push(marker),
                Err(e) => log::warn!("failed to place marker {}: {e:?}", placement.index),
            }
        }
        log::debug!("placed {} markers", self.markers.len());
    }

    /// Show the info window on the marker for `open`, or hide it.
    fn show_popup(&self, open: Option<(usize, String)>) {
        let target = open.and_then(|(index, details)| {
            self.markers
                .iter()
                .find(|m| m.index == index)
                .map(|m| (m, details))
        });
        let Some((marker, details)) = target else {
            self.info_window.close();
            return;
        };

        match popup_content(&details) {
            Ok(content) => self.info_window.set_content(&content),
            Err(e) => log::warn!("failed to build popup content: {e:?}"),
        }

        let opts = Object::new();
        let anchored = Reflect::set(&opts, &JsValue::from_str("anchor"), marker.marker.as_ref())
            .and_then(|_| Reflect::set(&opts, &JsValue::from_str("map"), self.map.as_ref()));
        match anchored {
            Ok(_) => self.info_window.open(&opts),
            Err(e) => log::warn!("failed to open popup: {e:?}"),
        }
    }

    fn detach(self) {
        self.close_listener.remove();
        self.info_window.close();
        for marker in self.markers {
            marker.detach();
        }
        gmaps::clear_instance_listeners(self.map.as_ref());
    }
}

/// `<div class="content">` holding the item's CMS rich text.
fn popup_content(details: &str) -> Result<web_sys::Element, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let content = document.create_element("div")?;
    content.set_class_name("content");
    if details.trim().is_empty() {
        content.set_text_content(Some(EMPTY_DETAILS_TEXT));
    } else {
        // CMS rich text is authored content and is inserted unsanitised.
        content.set_inner_html(details);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_until_script_is_ready() {
        assert_eq!(
            MapPhase::from_state(None, ScriptStatus::Loading),
            MapPhase::Loading
        );
        assert_eq!(
            MapPhase::from_state(None, ScriptStatus::Ready),
            MapPhase::Ready
        );
    }

    #[test]
    fn failed_script_is_unavailable() {
        assert_eq!(
            MapPhase::from_state(None, ScriptStatus::Failed),
            MapPhase::Unavailable
        );
    }

    #[test]
    fn missing_datasource_wins_over_script_state() {
        for status in [
            ScriptStatus::Loading,
            ScriptStatus::Ready,
            ScriptStatus::Failed,
        ] {
            assert_eq!(
                MapPhase::from_state(Some("no datasource".to_string()), status),
                MapPhase::MissingDatasource("no datasource".to_string())
            );
        }
    }
}
