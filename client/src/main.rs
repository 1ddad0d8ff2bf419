mod app;
mod gmaps;
mod host;
mod loader;
mod map;

use app::App;
use leptos::mount::mount_to;
use leptos::prelude::*;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console logger unavailable: {e}").into());
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let mount_element = document.get_element_by_id(host::MOUNT_ELEMENT_ID);
    let settings = host::read_settings(mount_element.as_ref());
    let props = host::read_props(&document);

    let mount_target = mount_element
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        log::error!("no element to mount the map into");
        return;
    };

    APP_MOUNT_HANDLE.with(move |slot| {
        // Drop a previous mount if main() runs again, so its effects stop.
        let _old = slot.borrow_mut().take();
        let handle = mount_to(target, move || view! { <App props=props settings=settings /> });
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
