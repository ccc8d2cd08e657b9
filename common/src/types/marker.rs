use crate::types::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// What a marker stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerTag {
    /// The user's own location.
    SelfLocation,
    /// A restaurant, by id.
    Restaurant(String),
    /// The spot picked on the registration map.
    PickedLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub tag: MarkerTag,
    pub position: Coordinate,
}

impl Marker {
    pub fn restaurant_id(&self) -> Option<&str> {
        match &self.tag {
            MarkerTag::Restaurant(id) => Some(id),
            _ => None,
        }
    }
}

/// The markers currently drawn on a map.
///
/// Only the reconciler builds a populated set; everything else reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn restaurant_ids(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().filter_map(Marker::restaurant_id)
    }

    pub fn self_marker(&self) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|m| m.tag == MarkerTag::SelfLocation)
    }

    pub fn find(&self, tag: &MarkerTag) -> Option<&Marker> {
        self.markers.iter().find(|m| &m.tag == tag)
    }

    /// Empties the set, returning how many markers were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.markers.len();
        self.markers.clear();
        removed
    }

    pub(crate) fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }
}
