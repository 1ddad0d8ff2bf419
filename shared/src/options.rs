//! Fixed map options passed to the maps library when the map is created.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(rename = "disableDefaultUI")]
    pub disable_default_ui: bool,
    pub clickable_icons: bool,
    pub scrollwheel: bool,
    pub zoom_control: bool,
    pub map_type_control: bool,
    pub styles: Vec<MapTypeStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTypeStyle {
    pub feature_type: &'static str,
    pub element_type: &'static str,
    pub stylers: Vec<Styler>,
}

/// A single styler rule; serializes as a one-key object such as `{"color":"#023459"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Styler {
    Gamma(&'static str),
    Weight(&'static str),
    Visibility(&'static str),
    Color(&'static str),
}

impl MapOptions {
    /// Chrome-less map with zoom and map-type controls, no scroll-wheel zoom,
    /// blue country fills and dark water.
    pub fn standard() -> Self {
        Self {
            disable_default_ui: true,
            clickable_icons: false,
            scrollwheel: false,
            zoom_control: true,
            map_type_control: true,
            styles: vec![
                MapTypeStyle {
                    feature_type: "administrative.country",
                    element_type: "geometry.fill",
                    stylers: vec![
                        Styler::Gamma("0.00"),
                        Styler::Weight("0.01"),
                        Styler::Visibility("simplified"),
                        Styler::Color("#1b75bc"),
                    ],
                },
                MapTypeStyle {
                    feature_type: "water",
                    element_type: "all",
                    stylers: vec![Styler::Color("#FFFFFF"), Styler::Visibility("on")],
                },
                MapTypeStyle {
                    feature_type: "water",
                    element_type: "geometry.fill",
                    stylers: vec![Styler::Color("#023459")],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MapOptions;
    use serde_json::json;

    #[test]
    fn standard_options_match_library_shape() {
        let value = serde_json::to_value(MapOptions::standard()).unwrap();
        assert_eq!(
            value,
            json!({
                "disableDefaultUI": true,
                "clickableIcons": false,
                "scrollwheel": false,
                "zoomControl": true,
                "mapTypeControl": true,
                "styles": [
                    {
                        "featureType": "administrative.country",
                        "elementType": "geometry.fill",
                        "stylers": [
                            { "gamma": "0.00" },
                            { "weight": "0.01" },
                            { "visibility": "simplified" },
                            { "color": "#1b75bc" }
                        ]
                    },
                    {
                        "featureType": "water",
                        "elementType": "all",
                        "stylers": [ { "color": "#FFFFFF" }, { "visibility": "on" } ]
                    },
                    {
                        "featureType": "water",
                        "elementType": "geometry.fill",
                        "stylers": [ { "color": "#023459" } ]
                    }
                ]
            })
        );
    }
}
