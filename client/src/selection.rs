use common::constants::{ANIMATION_MILLIS, SELECTED_ZOOM};
use common::types::coordinate::Coordinate;
use common::types::marker::MarkerTag;
use common::types::search_result::Listing;
use serde::Serialize;
use std::time::Duration;

/// A requested camera move: land centered on `center` at `zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewAnimation {
    pub center: Coordinate,
    pub zoom: f64,
    pub duration: Duration,
}

impl ViewAnimation {
    pub fn to(center: Coordinate, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            duration: Duration::from_millis(ANIMATION_MILLIS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(Listing),
}

/// Tracks the single restaurant shown in the detail panel.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&Listing> {
        match &self.state {
            SelectionState::Selected(listing) => Some(listing),
            SelectionState::Unselected => None,
        }
    }

    /// A map click resolved to `hit` (or to empty space).
    ///
    /// Only a restaurant marker whose restaurant is in `active` selects; the
    /// self marker, the pick pin and empty space all clear the selection.
    pub fn on_map_click(&mut self, hit: Option<&MarkerTag>, active: &[Listing]) -> Option<ViewAnimation> {
        let listing = match hit {
            Some(MarkerTag::Restaurant(id)) => active.iter().find(|l| l.id() == id),
            _ => None,
        };
        match listing {
            Some(listing) => Some(self.select(listing.clone())),
            None => {
                self.clear();
                None
            }
        }
    }

    /// A list entry was activated.
    pub fn on_list_activate(&mut self, listing: Listing) -> ViewAnimation {
        self.select(listing)
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Unselected;
    }

    /// Called after every change of the active result set.
    ///
    /// Keeps the selection when its restaurant is still listed, refreshing it
    /// with the new entry (distance may have changed), and clears it
    /// otherwise. Returns true when the selection was dropped.
    pub fn retain_active(&mut self, active: &[Listing]) -> bool {
        let SelectionState::Selected(current) = &self.state else {
            return false;
        };
        match active.iter().find(|l| l.id() == current.id()) {
            Some(fresh) => {
                self.state = SelectionState::Selected(fresh.clone());
                false
            }
            None => {
                self.clear();
                true
            }
        }
    }

    fn select(&mut self, listing: Listing) -> ViewAnimation {
        let animation = ViewAnimation::to(listing.restaurant.position, SELECTED_ZOOM);
        self.state = SelectionState::Selected(listing);
        animation
    }
}
