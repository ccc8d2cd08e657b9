use crate::types::coordinate::Coordinate;
use crate::types::marker::{Marker, MarkerSet, MarkerTag};
use crate::types::search_result::MapFeature;
use std::collections::HashSet;

/// Rebuilds a map's marker set from the active result set.
///
/// Every call throws away all previous markers and draws exactly one marker
/// per distinct restaurant in `results`, plus one self marker when the self
/// location is known. Repeated searches, toggling between the full and the
/// nearby set, or location updates can therefore never leave duplicates or
/// orphans behind. Marker-level transient state does not survive a call, so
/// popups must be anchored from the selection, not from a marker.
pub struct MarkerReconciler;

impl MarkerReconciler {
    pub fn reconcile<F: MapFeature>(
        current: MarkerSet,
        results: &[F],
        self_location: Option<Coordinate>,
    ) -> MarkerSet {
        Self::reconcile_with_pick(current, results, self_location, None)
    }

    /// Same as [`MarkerReconciler::reconcile`], also drawing the single
    /// location pin of the registration map.
    pub fn reconcile_with_pick<F: MapFeature>(
        mut current: MarkerSet,
        results: &[F],
        self_location: Option<Coordinate>,
        picked: Option<Coordinate>,
    ) -> MarkerSet {
        current.clear();

        let mut seen: HashSet<&str> = HashSet::with_capacity(results.len());
        for feature in results {
            let id = feature.feature_id();
            // el mismo restaurante no se dibuja dos veces
            if !seen.insert(id) {
                continue;
            }
            current.push(Marker {
                tag: MarkerTag::Restaurant(id.to_string()),
                position: feature.position(),
            });
        }

        if let Some(position) = self_location {
            current.push(Marker {
                tag: MarkerTag::SelfLocation,
                position,
            });
        }

        if let Some(position) = picked {
            current.push(Marker {
                tag: MarkerTag::PickedLocation,
                position,
            });
        }

        current
    }
}
