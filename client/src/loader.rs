use std::cell::RefCell;

use js_sys::Reflect;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use datasource_map_shared::MapsSettings;

const READY_CALLBACK_KEY: &str = "__datasourceMapScriptReady";
const SCRIPT_ELEMENT_ID: &str = "datasource-map-maps-script";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    Loading,
    Ready,
    Failed,
}

/// The page-wide script element and everyone waiting on it.
struct ScriptLoad {
    status: ScriptStatus,
    waiters: Vec<RwSignal<ScriptStatus>>,
    _on_ready: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

thread_local! {
    static SCRIPT_LOAD: RefCell<Option<ScriptLoad>> = const { RefCell::new(None) };
}

/// Request the maps script and return a signal that settles once it has
/// loaded or failed. The script is injected at most once per page.
pub fn load_maps_script(settings: &MapsSettings) -> RwSignal<ScriptStatus> {
    let status = RwSignal::new(ScriptStatus::Loading);

    if maps_namespace_present() {
        status.set(ScriptStatus::Ready);
        return status;
    }

    SCRIPT_LOAD.with(|slot| {
        let mut slot = slot.borrow_mut();
        match slot.as_mut() {
            Some(load) if load.status == ScriptStatus::Loading => load.waiters.push(status),
            Some(load) => status.set(load.status),
            None => match inject_script(settings) {
                Ok(mut load) => {
                    load.waiters.push(status);
                    *slot = Some(load);
                }
                Err(e) => {
                    log::error!("failed to request maps script: {e:?}");
                    status.set(ScriptStatus::Failed);
                }
            },
        }
    });

    status
}

fn maps_namespace_present() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    Reflect::get(window.as_ref(), &JsValue::from_str("google"))
        .ok()
        .filter(|google| google.is_object())
        .and_then(|google| Reflect::get(&google, &JsValue::from_str("maps")).ok())
        .is_some_and(|maps| maps.is_object())
}

fn inject_script(settings: &MapsSettings) -> Result<ScriptLoad, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let on_ready = Closure::<dyn FnMut()>::new(move || settle(ScriptStatus::Ready));
    let on_error = Closure::<dyn FnMut()>::new(move || {
        log::error!("maps script failed to load");
        settle(ScriptStatus::Failed);
    });

    Reflect::set(
        window.as_ref(),
        &JsValue::from_str(READY_CALLBACK_KEY),
        on_ready.as_ref(),
    )?;

    let script: web_sys::HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_id(SCRIPT_ELEMENT_ID);
    script.set_async(true);
    script.set_defer(true);
    script.set_src(&settings.script_url(READY_CALLBACK_KEY, encode_component));
    script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    head.append_child(&script)?;
    log::info!("requested maps script (libraries: {})", settings.libraries.join(","));

    Ok(ScriptLoad {
        status: ScriptStatus::Loading,
        waiters: Vec::new(),
        _on_ready: on_ready,
        _on_error: on_error,
    })
}

fn encode_component(value: &str) -> String {
    js_sys::encode_uri_component(value)
        .as_string()
        .unwrap_or_default()
}

fn settle(result: ScriptStatus) {
    let waiters = SCRIPT_LOAD.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some(load) = slot.as_mut() else {
            return Vec::new();
        };
        load.status = result;
        std::mem::take(&mut load.waiters)
    });

    // Waiters whose component is already gone are disposed; skip them.
    for waiter in waiters {
        let _ = waiter.try_set(result);
    }
}
