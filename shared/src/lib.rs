pub mod coords;
pub mod datasource;
pub mod error;
pub mod marker;
pub mod options;
pub mod range;
pub mod selection;
pub mod settings;

pub use coords::LatLng;
pub use datasource::{ComponentProps, MapDetailItem};
pub use error::*;
pub use marker::{MARKER_ICON_URL, MarkerPlacement, plan_markers};
pub use options::MapOptions;
pub use range::{MapRange, parse_map_range, resolve_map_range};
pub use selection::Selection;
pub use settings::MapsSettings;
