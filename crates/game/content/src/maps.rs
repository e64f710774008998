//! Authored map layouts.

use std::collections::BTreeMap;

use hexmarch_core::{CellSpec, MapLayout};

/// Raised ground: occupiable, crossable, but breaks sightlines.
const TOWER: CellSpec = CellSpec {
    blocks_pathing: false,
    blocks_targeting: true,
    occupiable: true,
};

/// The standard skirmish map.
///
/// A walled arena with a chasm channel through the middle and two towers
/// flanking it. Two pieces per side, spawned in the corners.
pub fn standard_layout() -> MapLayout {
    MapLayout {
        rows: vec![
            "#########".into(),
            "#ggggggg#".into(),
            "#ggtgtgg#".into(),
            "#gg~~~gg#".into(),
            "#ggtgtgg#".into(),
            "#ggggggg#".into(),
            "#########".into(),
        ],
        legend: BTreeMap::from([
            ('g', CellSpec::GROUND),
            ('#', CellSpec::WALL),
            ('~', CellSpec::CHASM),
            ('t', TOWER),
        ]),
        spawns: vec![vec![(1, 1), (2, 1)], vec![(7, 5), (6, 5)]],
    }
}
