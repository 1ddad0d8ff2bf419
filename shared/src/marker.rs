use crate::coords::LatLng;
use crate::datasource::MapDetailItem;

pub const MARKER_ICON_URL: &str = "http://maps.google.com/mapfiles/ms/icons/blue.png";

/// A marker to place: the item's list index and its validated position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    pub index: usize,
    pub position: LatLng,
}

impl MapDetailItem {
    pub fn position(&self) -> Result<LatLng, crate::error::CoordinateError> {
        LatLng::parse(&self.latitude, &self.longitude)
    }
}

/// One placement per item with usable coordinates, in input order.
/// Items whose coordinates do not parse are skipped.
pub fn plan_markers(items: &[MapDetailItem]) -> Vec<MarkerPlacement> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.position() {
            Ok(position) => Some(MarkerPlacement { index, position }),
            Err(e) => {
                log::warn!("skipping map item {index}: {e}");
                None
            }
        })
        .collect()
}
