use std::cell::RefCell;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use datasource_map_shared::{
    ComponentProps, DatasourceError, MapDetailItem, MapRange, MapsSettings, SettingsError,
    resolve_map_range,
};

use crate::host;
use crate::map::DatasourceMap;

type ResolvedProps = (MapRange, Result<Vec<MapDetailItem>, DatasourceError>);

struct PropsListenerBinding {
    document: web_sys::Document,
    handler: Closure<dyn Fn(web_sys::CustomEvent)>,
}

thread_local! {
    static PROPS_LISTENER: RefCell<Option<PropsListenerBinding>> = const { RefCell::new(None) };
}

/// Split a host payload into the initial view and the item list.
/// A malformed `MapRange` falls back to the default view.
pub(crate) fn resolve_props(props: Result<ComponentProps, DatasourceError>) -> ResolvedProps {
    match props {
        Ok(props) => (resolve_map_range(props.map_range()), props.map_items()),
        Err(e) => (MapRange::default(), Err(e)),
    }
}

/// Which halves of the current props a fresh payload replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PropsChange {
    pub range: bool,
    pub items: bool,
}

impl PropsChange {
    pub(crate) fn between(
        current: (&MapRange, &Result<Vec<MapDetailItem>, DatasourceError>),
        next: (&MapRange, &Result<Vec<MapDetailItem>, DatasourceError>),
    ) -> Self {
        Self {
            range: current.0 != next.0,
            items: current.1 != next.1,
        }
    }
}

#[component]
pub fn App(
    props: Result<ComponentProps, DatasourceError>,
    settings: Result<MapsSettings, SettingsError>,
) -> impl IntoView {
    let (initial_range, initial_items) = resolve_props(props);
    let range = RwSignal::new(initial_range);
    let items = RwSignal::new(initial_items);

    // The host may re-render the datasource in place (e.g. while editing)
    Effect::new(move || {
        bind_props_listener(range, items);
        on_cleanup(unbind_props_listener);
    });

    view! { <DatasourceMap range=range items=items settings=settings /> }
}

fn bind_props_listener(
    range: RwSignal<MapRange>,
    items: RwSignal<Result<Vec<MapDetailItem>, DatasourceError>>,
) {
    unbind_props_listener();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let handler = Closure::<dyn Fn(web_sys::CustomEvent)>::new(move |e: web_sys::CustomEvent| {
        let detail = e.detail();
        let payload = detail.as_string().or_else(|| {
            js_sys::JSON::stringify(&detail)
                .ok()
                .and_then(|s| s.as_string())
        });
        let Some(payload) = payload else {
            log::warn!("ignoring {} event without a payload", host::PROPS_UPDATE_EVENT);
            return;
        };

        let (next_range, next_items) = resolve_props(host::parse_props(&payload));
        let change = range.with_untracked(|current_range| {
            items.with_untracked(|current_items| {
                PropsChange::between((current_range, current_items), (&next_range, &next_items))
            })
        });
        log::info!(
            "map datasource updated ({} items, view changed: {})",
            next_items.as_ref().map(Vec::len).unwrap_or(0),
            change.range
        );
        // Untouched signals stay quiet so the user's pan and zoom survive.
        if change.range {
            range.set(next_range);
        }
        if change.items {
            items.set(next_items);
        }
    });

    if let Err(e) = document.add_event_listener_with_callback(
        host::PROPS_UPDATE_EVENT,
        handler.as_ref().unchecked_ref(),
    ) {
        log::warn!("failed to listen for datasource updates: {e:?}");
        return;
    }

    PROPS_LISTENER.with(|slot| {
        *slot.borrow_mut() = Some(PropsListenerBinding { document, handler });
    });
}

fn unbind_props_listener() {
    PROPS_LISTENER.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old.document.remove_event_listener_with_callback(
                host::PROPS_UPDATE_EVENT,
                old.handler.as_ref().unchecked_ref(),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasource_map_shared::LatLng;
    use serde_json::json;

    fn props(value: serde_json::Value) -> Result<ComponentProps, DatasourceError> {
        ComponentProps::from_json(&value.to_string())
    }

    #[test]
    fn defaults_without_map_range() {
        let (range, items) = resolve_props(props(json!({
            "fields": { "data": { "fields": { "map": { "targetItems": [] } } } }
        })));
        assert_eq!(range.center, LatLng::new(47.1164, -101.2996));
        assert_eq!(range.zoom, 3.5);
        assert_eq!(items.unwrap(), Vec::new());
    }

    #[test]
    fn map_range_sets_initial_view() {
        let (range, _) = resolve_props(props(json!({
            "params": { "MapRange": "{\"RangeCenter\":{\"value\":\"10,20\"},\"Zoom\":{\"value\":\"5\"}}" },
            "fields": { "data": { "fields": { "map": { "targetItems": [] } } } }
        })));
        assert_eq!(range.center, LatLng::new(10.0, 20.0));
        assert_eq!(range.zoom, 5.0);
    }

    #[test]
    fn malformed_map_range_keeps_items() {
        let (range, items) = resolve_props(props(json!({
            "params": { "MapRange": "{oops" },
            "fields": { "data": { "fields": { "map": { "targetItems": [
                { "latitude": { "jsonValue": { "value": "1" } },
                  "longitude": { "jsonValue": { "value": "2" } } }
            ] } } } }
        })));
        assert_eq!(range, MapRange::default());
        assert_eq!(items.unwrap().len(), 1);
    }

    fn payload(map_range: &str, details: &str) -> ResolvedProps {
        resolve_props(props(json!({
            "params": { "MapRange": map_range },
            "fields": { "data": { "fields": { "map": { "targetItems": [
                { "latitude": { "jsonValue": { "value": "1" } },
                  "longitude": { "jsonValue": { "value": "2" } },
                  "details": { "jsonValue": { "value": details } } }
            ] } } } }
        })))
    }

    fn change(current: &ResolvedProps, next: &ResolvedProps) -> PropsChange {
        PropsChange::between((&current.0, &current.1), (&next.0, &next.1))
    }

    const RANGE: &str = "{\"RangeCenter\":{\"value\":\"10,20\"},\"Zoom\":{\"value\":\"5\"}}";

    #[test]
    fn identical_payload_changes_nothing() {
        let current = payload(RANGE, "<p>a</p>");
        assert_eq!(
            change(&current, &payload(RANGE, "<p>a</p>")),
            PropsChange {
                range: false,
                items: false
            }
        );
    }

    #[test]
    fn details_edit_keeps_the_view() {
        let current = payload(RANGE, "<p>a</p>");
        assert_eq!(
            change(&current, &payload(RANGE, "<p>b</p>")),
            PropsChange {
                range: false,
                items: true
            }
        );
    }

    #[test]
    fn range_edit_keeps_the_items() {
        let current = payload(RANGE, "<p>a</p>");
        assert_eq!(
            change(&current, &payload("", "<p>a</p>")),
            PropsChange {
                range: true,
                items: false
            }
        );
    }

    #[test]
    fn undecodable_payload_reports_error() {
        let (range, items) = resolve_props(Err(DatasourceError::Json("eof".to_string())));
        assert_eq!(range, MapRange::default());
        assert!(matches!(items, Err(DatasourceError::Json(_))));
    }
}
