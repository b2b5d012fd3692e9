use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sentinel accuracy for moves that never miss.
pub const ALWAYS_HITS: i32 = -1;

/// Immutable move reference data, owned by the ingestion layer.
///
/// The engine only ever reads these. Power and accuracy carry the
/// ingestion layer's normalizations: non-damaging moves have power 1,
/// moves without an accuracy check have accuracy -1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: u16,
    pub identifier: String,
    pub power: i32,
    pub accuracy: i32,
    pub priority: i32,
    pub pp: i32,
}

impl MoveData {
    /// Build a move record, applying the same normalization the tabular
    /// loader applies: power is floored at 1 so non-attack moves still
    /// deal their token point of damage.
    pub fn new(
        id: u16,
        identifier: impl Into<String>,
        power: i32,
        accuracy: i32,
        priority: i32,
        pp: i32,
    ) -> Self {
        MoveData {
            id,
            identifier: identifier.into(),
            power: power.max(1),
            accuracy,
            priority,
            pp,
        }
    }

    /// True when this move skips the accuracy roll entirely.
    pub fn always_hits(&self) -> bool {
        self.accuracy == ALWAYS_HITS
    }
}

/// Read-only lookup table of move records keyed by numeric id.
///
/// Populated by the external ingestion collaborator before a session
/// starts; the engine never inserts into it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveDex {
    moves: HashMap<u16, MoveData>,
}

impl MoveDex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a move table from a JSON array of move records, applying the
    /// same normalization as [`MoveData::new`].
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<MoveData> = serde_json::from_str(text)?;
        Ok(records
            .into_iter()
            .map(|record| {
                MoveData::new(
                    record.id,
                    record.identifier,
                    record.power,
                    record.accuracy,
                    record.priority,
                    record.pp,
                )
            })
            .collect())
    }

    pub fn insert(&mut self, move_data: MoveData) {
        self.moves.insert(move_data.id, move_data);
    }

    pub fn get(&self, id: u16) -> Option<&MoveData> {
        self.moves.get(&id)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl FromIterator<MoveData> for MoveDex {
    fn from_iter<I: IntoIterator<Item = MoveData>>(iter: I) -> Self {
        let mut dex = MoveDex::new();
        for move_data in iter {
            dex.insert(move_data);
        }
        dex
    }
}
