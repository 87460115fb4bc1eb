//! The placement result handed to topology generation.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use qtopo_core::{GridCoordinate, QubitId};

use crate::individual::Individual;
use crate::repair::{PlacementProblem, Repair};

/// Named qubit positions and named couplers on the grid.
///
/// `positions` serializes as a JSON object keyed by qubit name in qubit
/// order; `edges` as a list of `[name_a, name_b]` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyLayout {
    /// `q{i}` → grid coordinate, in qubit order.
    #[serde(
        serialize_with = "serialize_positions",
        deserialize_with = "deserialize_positions"
    )]
    pub positions: Vec<(String, GridCoordinate)>,
    /// Couplers as `[q{i}, q{j}]` with `i < j`.
    pub edges: Vec<[String; 2]>,
    /// Number of grid rows.
    pub row_count: u32,
    /// Number of grid columns.
    pub col_num: u32,
}

impl TopologyLayout {
    /// Format a repaired individual.
    ///
    /// Edges come from the augmented adjacency of the repair, ordered by the
    /// lower qubit index, then the higher.
    pub fn from_repair(
        problem: &PlacementProblem,
        individual: &Individual,
        repair: &Repair,
    ) -> Self {
        let positions = (0..individual.len())
            .map(|q| {
                (
                    QubitId::from(q).name(),
                    problem.qubit_coordinate(individual, q),
                )
            })
            .collect();

        let edges = repair
            .augmented
            .upper_pairs()
            .map(|(i, j)| [QubitId::from(i).name(), QubitId::from(j).name()])
            .collect();

        let shape = problem.shape();
        Self {
            positions,
            edges,
            row_count: shape.rows,
            col_num: shape.columns,
        }
    }

    /// Position of a named qubit.
    pub fn position(&self, name: &str) -> Option<GridCoordinate> {
        self.positions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
    }

    /// Whether a coupler joins the two named qubits, in either order.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edges
            .iter()
            .any(|[x, y]| (x == a && y == b) || (x == b && y == a))
    }
}

fn serialize_positions<S: Serializer>(
    positions: &[(String, GridCoordinate)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(positions.len()))?;
    for (name, coord) in positions {
        map.serialize_entry(name, &(coord.x, coord.y))?;
    }
    map.end()
}

fn deserialize_positions<'de, D>(
    deserializer: D,
) -> Result<Vec<(String, GridCoordinate)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let map = serde_json::Map::deserialize(deserializer)?;
    let mut positions = map
        .into_iter()
        .map(|(name, value)| {
            let (x, y): (u32, u32) =
                serde_json::from_value(value).map_err(serde::de::Error::custom)?;
            Ok((name, GridCoordinate::new(x, y)))
        })
        .collect::<Result<Vec<_>, D::Error>>()?;
    // Object keys come back sorted as strings; restore qubit order.
    positions.sort_by_key(|(name, _)| {
        name.strip_prefix('q')
            .and_then(|i| i.parse::<usize>().ok())
            .unwrap_or(usize::MAX)
    });
    Ok(positions)
}
