use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::snapshot::StationId;

/// Stations currently shown on the charts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationSelection(BTreeSet<StationId>);

impl StationSelection {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = StationId>,
    {
        Self(ids.into_iter().collect())
    }

    pub fn contains(&self, station_id: StationId) -> bool {
        self.0.contains(&station_id)
    }

    /// Check or uncheck a station toggle.
    pub fn set(&mut self, station_id: StationId, enabled: bool) {
        if enabled {
            self.0.insert(station_id);
        } else {
            self.0.remove(&station_id);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = StationId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<StationId> for StationSelection {
    fn from_iter<I: IntoIterator<Item = StationId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection: StationSelection = (1..=3).map(StationId).collect();
        assert_eq!(selection.len(), 3);

        selection.set(StationId(2), false);
        assert!(!selection.contains(StationId(2)));

        selection.set(StationId(2), true);
        selection.set(StationId(2), true);
        assert!(selection.contains(StationId(2)));
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_iterates_in_station_order() {
        let selection = StationSelection::new([StationId(5), StationId(1), StationId(3)]);
        let ids: Vec<u32> = selection.iter().map(|s| s.value()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_serializes_as_list() {
        let selection = StationSelection::new([StationId(2), StationId(1)]);
        assert_eq!(serde_json::to_string(&selection).unwrap(), "[1,2]");
    }
}
