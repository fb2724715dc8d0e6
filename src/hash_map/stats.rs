//! Point-in-time occupancy statistics for a [`Hashtable`](super::Hashtable).

use serde::{Deserialize, Serialize};

/// Snapshot of table occupancy and chain shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    /// Number of stored key-value pairs
    pub len: usize,
    /// Number of slots
    pub bucket_size: usize,
    /// `len / bucket_size`
    pub load_factor: f32,
    /// Configured growth threshold
    pub load_limit: f32,
    /// Slots holding a non-empty chain
    pub occupied_slots: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Vacated arena nodes waiting for reuse
    pub vacant_nodes: usize,
    /// Number of resizes since construction
    pub resizes: usize,
}

impl TableStats {
    /// Average chain length over non-empty slots
    pub fn average_chain_length(&self) -> f64 {
        if self.occupied_slots == 0 {
            0.0
        } else {
            self.len as f64 / self.occupied_slots as f64
        }
    }

    /// Entries sharing a slot with an earlier entry
    pub fn collisions(&self) -> usize {
        self.len.saturating_sub(self.occupied_slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableStats {
        TableStats {
            len: 10,
            bucket_size: 11,
            load_factor: 10.0 / 11.0,
            load_limit: 0.75,
            occupied_slots: 8,
            longest_chain: 2,
            vacant_nodes: 1,
            resizes: 0,
        }
    }

    #[test]
    fn test_derived_figures() {
        let stats = sample();
        assert_eq!(stats.collisions(), 2);
        assert!((stats.average_chain_length() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_average() {
        let stats = TableStats {
            len: 0,
            occupied_slots: 0,
            ..sample()
        };
        assert_eq!(stats.average_chain_length(), 0.0);
        assert_eq!(stats.collisions(), 0);
    }

    #[test]
    fn test_collisions_on_inconsistent_snapshot() {
        // deserialized snapshots are not checked against each other
        let stats: TableStats = serde_json::from_str(
            r#"{"len":2,"bucket_size":11,"load_factor":0.18,"load_limit":0.75,
                "occupied_slots":5,"longest_chain":1,"vacant_nodes":0,"resizes":0}"#,
        )
        .unwrap();
        assert_eq!(stats.collisions(), 0);
    }

    #[test]
    fn test_json_roundtrip() {
        let stats = sample();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"occupied_slots\":8"));
        let back: TableStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
