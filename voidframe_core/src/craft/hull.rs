//! The per-column height map a craft derives from its block set.
//!
//! Holds the min and max relative y seen in each relative (x, z) column.
//! That makes "is this position inside the hull" a cheap approximate check:
//! enclosed pockets of air count as inside even though they are not detected
//! blocks. Always rebuilt wholesale from the current block set - never
//! patched in place - so it cannot drift out of sync with membership.

use bevy::platform::collections::HashMap;

use crate::{
    coordinates::{BlockCoordinate, CoordinateType, RelativeCoordinate},
    rotation::CoordinateFrame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A vertical column of the craft's relative frame.
pub struct RelativeColumn {
    /// The relative x component.
    pub x: CoordinateType,
    /// The relative z component.
    pub z: CoordinateType,
}

impl From<RelativeCoordinate> for RelativeColumn {
    #[inline(always)]
    fn from(pos: RelativeCoordinate) -> Self {
        Self { x: pos.x, z: pos.z }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
/// Min/max relative y per occupied column, derived from a craft's block set.
pub struct HullMap {
    columns: HashMap<RelativeColumn, (CoordinateType, CoordinateType)>,
}

impl HullMap {
    /// Builds the column map for `blocks`, expressed in `frame`.
    pub fn compute<'a>(frame: CoordinateFrame, blocks: impl IntoIterator<Item = &'a BlockCoordinate>) -> Self {
        let mut columns: HashMap<RelativeColumn, (CoordinateType, CoordinateType)> = HashMap::default();

        for pos in blocks.into_iter().map(|&pos| frame.to_relative(pos)) {
            let extremes = columns.entry(pos.into()).or_insert((pos.y, pos.y));
            extremes.0 = extremes.0.min(pos.y);
            extremes.1 = extremes.1.max(pos.y);
        }

        Self { columns }
    }

    /// Whether `pos` falls within the occupied height range of its column.
    pub fn contains(&self, pos: RelativeCoordinate) -> bool {
        self.columns
            .get(&RelativeColumn::from(pos))
            .is_some_and(|&(min, max)| min <= pos.y && pos.y <= max)
    }

    /// The number of occupied columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::CardinalDirection;

    fn frame() -> CoordinateFrame {
        CoordinateFrame::new(BlockCoordinate::new(0, 0, 0), CardinalDirection::North)
    }

    #[test]
    fn tracks_min_and_max_per_column() {
        let blocks = [
            BlockCoordinate::new(0, 0, 0),
            BlockCoordinate::new(0, 3, 0),
            BlockCoordinate::new(1, 5, 0),
        ];

        let hull = HullMap::compute(frame(), &blocks);

        assert_eq!(hull.column_count(), 2);
        // the air pocket between the column's extremes still counts as inside
        assert!(hull.contains(RelativeCoordinate::new(0, 1, 0)));
        assert!(hull.contains(RelativeCoordinate::new(0, 3, 0)));
        assert!(!hull.contains(RelativeCoordinate::new(0, 4, 0)));
        assert!(hull.contains(RelativeCoordinate::new(1, 5, 0)));
        assert!(!hull.contains(RelativeCoordinate::new(2, 0, 0)));
    }

    #[test]
    fn empty_block_set_contains_nothing() {
        let hull = HullMap::compute(frame(), &[]);

        assert!(!hull.contains(RelativeCoordinate::new(0, 0, 0)));
        assert_eq!(hull.column_count(), 0);
    }

    #[test]
    fn columns_follow_the_frame_facing() {
        let frame = CoordinateFrame::new(BlockCoordinate::new(0, 0, 0), CardinalDirection::East);
        // one block east of the origin: relative (0, 0, -1) when facing east
        let blocks = [BlockCoordinate::new(1, 0, 0)];

        let hull = HullMap::compute(frame, &blocks);

        assert!(hull.contains(RelativeCoordinate::new(0, 0, -1)));
        assert!(!hull.contains(RelativeCoordinate::new(1, 0, 0)));
    }
}
