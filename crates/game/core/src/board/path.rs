//! Weighted, range-limited path search.
//!
//! A label-correcting Dijkstra variant over the cell map. Instead of a
//! priority queue it keeps a "ticker" of provisional costs and, each round,
//! finalizes every pending cell currently at the minimum provisional cost.
//! Ties are therefore settled within a single round, which is the exact
//! semantics movement rules depend on. Boards are small; the simplicity is
//! worth the lost asymptotics.

use std::collections::BTreeMap;

use crate::board::{Board, Cell};
use crate::hex::HexCoordinate;

/// Result of a path search: reachable cells, their minimal cumulative
/// weight, and enough parent links to reconstruct a concrete route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathMap {
    start: HexCoordinate,
    costs: BTreeMap<HexCoordinate, u32>,
    parents: BTreeMap<HexCoordinate, HexCoordinate>,
}

impl PathMap {
    pub fn start(&self) -> HexCoordinate {
        self.start
    }

    /// Minimal cumulative weight to a cell, if it survived the range and
    /// final-condition filters.
    pub fn cost(&self, coordinate: HexCoordinate) -> Option<u32> {
        self.costs.get(&coordinate).copied()
    }

    pub fn contains(&self, coordinate: HexCoordinate) -> bool {
        self.costs.contains_key(&coordinate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (HexCoordinate, u32)> + '_ {
        self.costs.iter().map(|(&c, &w)| (c, w))
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// The step-by-step route from just after `start` up to and including
    /// `goal`. `None` when the goal was not reached.
    ///
    /// Routes may pass through finalized cells that the min-range or final
    /// condition later filtered out of the cost map; those were still legal
    /// to traverse.
    pub fn route_to(&self, goal: HexCoordinate) -> Option<Vec<HexCoordinate>> {
        if !self.costs.contains_key(&goal) {
            return None;
        }
        let mut route = vec![goal];
        let mut cursor = goal;
        while let Some(&parent) = self.parents.get(&cursor) {
            if parent == self.start {
                break;
            }
            route.push(parent);
            cursor = parent;
        }
        route.reverse();
        Some(route)
    }
}

impl Board {
    /// Finds every cell reachable from `start` whose minimal cumulative
    /// weight lies in `min..=max`.
    ///
    /// `continue_condition(prev, next)` gates whether traversal may cross
    /// from one cell into its neighbor; `weight(prev, next)` prices that
    /// edge (non-negative). `final_condition` and the `min` bound are applied
    /// as a post-filter only: a cell that fails them can still be crossed on
    /// the way to cells beyond it.
    pub fn path_find(
        &self,
        start: HexCoordinate,
        (min, max): (u32, u32),
        mut continue_condition: impl FnMut(&Cell, &Cell) -> bool,
        mut final_condition: impl FnMut(&Cell) -> bool,
        mut weight: impl FnMut(&Cell, &Cell) -> u32,
    ) -> Result<PathMap, super::BoardError> {
        // Strict: searching from a coordinate with no cell is a logic error.
        self.cell_at(start, true)?;

        let mut ticker: BTreeMap<HexCoordinate, (u32, Option<HexCoordinate>)> = BTreeMap::new();
        let mut finalized: BTreeMap<HexCoordinate, (u32, Option<HexCoordinate>)> = BTreeMap::new();
        ticker.insert(start, (0, None));

        while let Some(round) = ticker.values().map(|&(cost, _)| cost).min() {
            if round > max {
                break;
            }
            // Finalize the whole tie class at once.
            let batch: Vec<(HexCoordinate, Option<HexCoordinate>)> = ticker
                .iter()
                .filter(|&(_, &(cost, _))| cost == round)
                .map(|(&coordinate, &(_, parent))| (coordinate, parent))
                .collect();
            for (coordinate, parent) in batch {
                ticker.remove(&coordinate);
                finalized.insert(coordinate, (round, parent));

                let cell = self
                    .cell_at(coordinate, true)?
                    .ok_or(super::BoardError::MissingCell(coordinate))?;
                for neighbor in coordinate.adjacent() {
                    let Some(next_cell) = self.cell_at(neighbor, false)? else {
                        continue;
                    };
                    if finalized.contains_key(&neighbor) {
                        continue;
                    }
                    if !continue_condition(cell, next_cell) {
                        continue;
                    }
                    let tentative = round + weight(cell, next_cell);
                    match ticker.get(&neighbor) {
                        Some(&(existing, _)) if existing <= tentative => {}
                        _ => {
                            ticker.insert(neighbor, (tentative, Some(coordinate)));
                        }
                    }
                }
            }
        }

        let mut map = PathMap {
            start,
            costs: BTreeMap::new(),
            parents: BTreeMap::new(),
        };
        for (&coordinate, &(cost, parent)) in &finalized {
            if let Some(parent) = parent {
                map.parents.insert(coordinate, parent);
            }
            if cost < min || cost > max {
                continue;
            }
            let cell = self
                .cell_at(coordinate, true)?
                .ok_or(super::BoardError::MissingCell(coordinate))?;
            if !final_condition(cell) {
                continue;
            }
            map.costs.insert(coordinate, cost);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardError, CellSpec};
    use crate::hex::HexCoordinate;

    fn open_board(radius: i32) -> Board {
        let mut board = Board::new();
        for x in -radius..=radius {
            for y in (-radius).max(-x - radius)..=radius.min(-x + radius) {
                board
                    .insert_cell(HexCoordinate::new(x, y, -x - y), CellSpec::GROUND)
                    .unwrap();
            }
        }
        board
    }

    fn uniform(board: &Board, start: HexCoordinate, range: (u32, u32)) -> PathMap {
        board
            .path_find(start, range, |_, _| true, |_| true, |_, _| 1)
            .unwrap()
    }

    #[test]
    fn unit_range_returns_exactly_the_neighbors() {
        let board = open_board(2);
        let map = uniform(&board, HexCoordinate::ORIGIN, (1, 1));
        assert_eq!(map.len(), 6);
        for neighbor in HexCoordinate::ORIGIN.adjacent() {
            assert_eq!(map.cost(neighbor), Some(1));
        }
    }

    #[test]
    fn unit_range_shrinks_at_the_map_edge() {
        let board = open_board(1);
        let corner = HexCoordinate::new(1, 0, -1);
        let map = uniform(&board, corner, (1, 1));
        // Three of the six neighbors fall off a radius-1 board.
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn min_bound_excludes_near_cells_without_blocking_traversal() {
        let board = open_board(3);
        let map = uniform(&board, HexCoordinate::ORIGIN, (2, 2));
        assert_eq!(map.len(), 12);
        assert_eq!(map.cost(HexCoordinate::ORIGIN), None);
        assert_eq!(map.cost(HexCoordinate::new(0, 1, -1)), None);
        assert_eq!(map.cost(HexCoordinate::new(0, 2, -2)), Some(2));
    }

    #[test]
    fn continue_condition_blocks_the_edge_not_the_cell() {
        let mut board = open_board(2);
        // Replace one ring cell with a wall.
        let wall = HexCoordinate::new(0, 1, -1);
        board = {
            let mut b = Board::new();
            for cell in board.cells() {
                let spec = if cell.coordinate() == wall {
                    CellSpec::WALL
                } else {
                    CellSpec::GROUND
                };
                b.insert_cell(cell.coordinate(), spec).unwrap();
            }
            b
        };
        let map = board
            .path_find(
                HexCoordinate::ORIGIN,
                (1, 2),
                |_, next| !next.blocks_pathing,
                |cell| cell.occupiable,
                |_, _| 1,
            )
            .unwrap();
        assert!(!map.contains(wall));
        // The cell straight past the wall now costs 3 around it, past max.
        assert!(!map.contains(HexCoordinate::new(0, 2, -2)));
        assert_eq!(map.cost(HexCoordinate::new(1, 1, -2)), Some(2));
    }

    #[test]
    fn weights_batch_ties_into_one_round() {
        let board = open_board(2);
        // Weight 2 everywhere: all six neighbors finalize in the same round
        // at cost 2, the second ring at cost 4.
        let map = board
            .path_find(
                HexCoordinate::ORIGIN,
                (0, 4),
                |_, _| true,
                |_| true,
                |_, _| 2,
            )
            .unwrap();
        assert_eq!(map.cost(HexCoordinate::ORIGIN), Some(0));
        assert_eq!(map.cost(HexCoordinate::new(0, 1, -1)), Some(2));
        assert_eq!(map.cost(HexCoordinate::new(0, 2, -2)), Some(4));
    }

    #[test]
    fn route_reconstruction_steps_through_adjacent_cells() {
        let board = open_board(3);
        let goal = HexCoordinate::new(0, 3, -3);
        let map = uniform(&board, HexCoordinate::ORIGIN, (1, 3));
        let route = map.route_to(goal).unwrap();
        assert_eq!(route.len(), 3);
        assert_eq!(*route.last().unwrap(), goal);
        let mut previous = HexCoordinate::ORIGIN;
        for step in route {
            assert_eq!(previous.radius_to(step), 1);
            previous = step;
        }
    }

    #[test]
    fn search_from_missing_cell_is_fatal() {
        let board = open_board(1);
        let far = HexCoordinate::new(9, 0, -9);
        let result = board.path_find(far, (0, 1), |_, _| true, |_| true, |_, _| 1);
        assert_eq!(result, Err(BoardError::MissingCell(far)));
    }
}
