//! Adapter from the CMS rendering payload to flat map items.
//!
//! The host binds the datasource as
//! `fields.data.fields.map.targetItems[*].{latitude,longitude,details}.jsonValue.value`.
//! Nothing outside this module depends on that nesting.

use serde::Deserialize;

use crate::error::DatasourceError;

/// One geo-tagged content item. Identity is its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapDetailItem {
    pub latitude: String,
    pub longitude: String,
    /// Rich text (HTML) authored in the CMS.
    pub details: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentProps {
    #[serde(default)]
    pub params: ComponentParams,
    #[serde(default)]
    pub fields: Option<DatasourceFields>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentParams {
    #[serde(rename = "MapRange", default)]
    pub map_range: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasourceFields {
    #[serde(default)]
    pub data: Option<DatasourceData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasourceData {
    #[serde(default)]
    pub fields: Option<DatasourceItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasourceItem {
    #[serde(default)]
    pub map: Option<MultilistField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultilistField {
    #[serde(rename = "targetItems", default)]
    pub target_items: Vec<RawMapItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMapItem {
    #[serde(default)]
    pub latitude: Option<JsonValueField>,
    #[serde(default)]
    pub longitude: Option<JsonValueField>,
    #[serde(default)]
    pub details: Option<JsonValueField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonValueField {
    #[serde(rename = "jsonValue", default)]
    pub json_value: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub value: Option<String>,
}

fn field_text(field: Option<JsonValueField>) -> String {
    field
        .and_then(|f| f.json_value)
        .and_then(|v| v.value)
        .unwrap_or_default()
}

impl From<RawMapItem> for MapDetailItem {
    fn from(raw: RawMapItem) -> Self {
        Self {
            latitude: field_text(raw.latitude),
            longitude: field_text(raw.longitude),
            details: field_text(raw.details),
        }
    }
}

impl ComponentProps {
    pub fn from_json(payload: &str) -> Result<Self, DatasourceError> {
        serde_json::from_str(payload).map_err(|e| DatasourceError::Json(e.to_string()))
    }

    /// Raw `MapRange` parameter, if the rendering sets one.
    pub fn map_range(&self) -> Option<&str> {
        self.params.map_range.as_deref()
    }

    /// Flatten the bound datasource into list-ordered items.
    pub fn map_items(&self) -> Result<Vec<MapDetailItem>, DatasourceError> {
        let map = self
            .fields
            .as_ref()
            .and_then(|f| f.data.as_ref())
            .and_then(|d| d.fields.as_ref())
            .and_then(|item| item.map.as_ref())
            .ok_or(DatasourceError::MissingDatasource)?;

        Ok(map
            .target_items
            .iter()
            .cloned()
            .map(MapDetailItem::from)
            .collect())
    }
}
