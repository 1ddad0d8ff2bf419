use crate::error::SettingsError;

pub const API_KEY_VAR: &str = "DATASOURCE_MAP_API_KEY";
pub const LIBRARIES_VAR: &str = "DATASOURCE_MAP_LIBRARIES";
pub const LANGUAGE_VAR: &str = "DATASOURCE_MAP_LANGUAGE";
pub const REGION_VAR: &str = "DATASOURCE_MAP_REGION";

pub const DEFAULT_LIBRARIES: &[&str] = &["places"];
pub const MAPS_SCRIPT_BASE: &str = "https://maps.googleapis.com/maps/api/js";

/// Settings for loading the maps library. The key is always supplied from
/// outside the build's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapsSettings {
    pub api_key: String,
    pub libraries: Vec<String>,
    pub language: Option<String>,
    pub region: Option<String>,
}

impl MapsSettings {
    /// Read settings through `lookup`, keyed by the `DATASOURCE_MAP_*` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = non_blank(API_KEY_VAR).ok_or(SettingsError::MissingApiKey(API_KEY_VAR))?;

        let libraries = non_blank(LIBRARIES_VAR)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|lib| !lib.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|libs| !libs.is_empty())
            .unwrap_or_else(|| DEFAULT_LIBRARIES.iter().map(|s| s.to_string()).collect());

        Ok(Self {
            api_key,
            libraries,
            language: non_blank(LANGUAGE_VAR),
            region: non_blank(REGION_VAR),
        })
    }

    /// Query parameters for the script request, unencoded and in a stable order.
    pub fn script_params(&self, callback: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("key", self.api_key.clone())];
        if !self.libraries.is_empty() {
            params.push(("libraries", self.libraries.join(",")));
        }
        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }
        if let Some(region) = &self.region {
            params.push(("region", region.clone()));
        }
        params.push(("callback", callback.to_string()));
        params
    }

    /// Full script URL, percent-encoding each value with `encode`.
    pub fn script_url(&self, callback: &str, encode: impl Fn(&str) -> String) -> String {
        let query = self
            .script_params(callback)
            .iter()
            .map(|(name, value)| format!("{name}={}", encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{MAPS_SCRIPT_BASE}?{query}")
    }
}
