//! Reads what the hosting page hands the map: the CMS payload and maps settings.

use web_sys::{Document, Element};

use datasource_map_shared::settings::{API_KEY_VAR, LANGUAGE_VAR, LIBRARIES_VAR, REGION_VAR};
use datasource_map_shared::{ComponentProps, DatasourceError, MapsSettings, SettingsError};

pub const MOUNT_ELEMENT_ID: &str = "datasource-map";
pub const PROPS_ELEMENT_ID: &str = "datasource-map-props";
/// Dispatched on the document (or bubbling up to it) with a fresh payload as `detail`.
pub const PROPS_UPDATE_EVENT: &str = "datasource-map:props";

/// Decode the JSON payload the host embeds in
/// `<script type="application/json" id="datasource-map-props">`.
pub fn read_props(document: &Document) -> Result<ComponentProps, DatasourceError> {
    let payload = document
        .get_element_by_id(PROPS_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    parse_props(&payload)
}

pub fn parse_props(payload: &str) -> Result<ComponentProps, DatasourceError> {
    if payload.trim().is_empty() {
        return Ok(ComponentProps::default());
    }
    ComponentProps::from_json(payload)
}

/// Settings come from `data-maps-*` attributes on the mount element, then
/// from values baked in at compile time.
pub fn read_settings(mount: Option<&Element>) -> Result<MapsSettings, SettingsError> {
    MapsSettings::from_lookup(|name| {
        mount
            .zip(attribute_for(name))
            .and_then(|(el, attr)| el.get_attribute(attr))
            .filter(|value| !value.trim().is_empty())
            .or_else(|| compiled_default(name))
    })
}

fn attribute_for(name: &str) -> Option<&'static str> {
    match name {
        API_KEY_VAR => Some("data-maps-api-key"),
        LIBRARIES_VAR => Some("data-maps-libraries"),
        LANGUAGE_VAR => Some("data-maps-language"),
        REGION_VAR => Some("data-maps-region"),
        _ => None,
    }
}

fn compiled_default(name: &str) -> Option<String> {
    let value = match name {
        API_KEY_VAR => option_env!("DATASOURCE_MAP_API_KEY"),
        LIBRARIES_VAR => option_env!("DATASOURCE_MAP_LIBRARIES"),
        LANGUAGE_VAR => option_env!("DATASOURCE_MAP_LANGUAGE"),
        REGION_VAR => option_env!("DATASOURCE_MAP_REGION"),
        _ => None,
    };
    value.map(str::to_string)
}
