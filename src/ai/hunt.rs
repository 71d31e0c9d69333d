//! Hunt/target state machine shared by the normal and hard bots.
//!
//! The tracker keeps the unresolved hits of the ship being hunted. With one
//! hit it probes the four neighbours in random order; once a second hit lines
//! up with the previous one it locks onto that axis and keeps extending from
//! the newest hit. A miss at one end sends it back to the first hit in the
//! opposite sense. A second dead end unlocks the axis again and drops the
//! oldest hit.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::debug;

use crate::common::{AttackOutcome, Coord, Direction, Grid};
use crate::random::Randomness;

/// Where the tracker is in its hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntState {
    /// No unresolved hits; the next shot is a fresh search.
    Searching,
    /// Unresolved hits but no known axis.
    TrackingUndirected,
    /// Axis locked; probing along it.
    TrackingDirected,
}

/// A ship the tracker saw go down, reconstructed from its own hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunkShip {
    positions: Vec<Coord>,
}

impl SunkShip {
    pub fn new(mut positions: Vec<Coord>) -> Self {
        positions.sort_unstable();
        Self { positions }
    }

    pub fn size(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    pub fn footprint(&self) -> Grid {
        let mut grid = Grid::new();
        for &(r, c) in &self.positions {
            grid.insert(r, c);
        }
        grid
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntTracker {
    hit_queue: VecDeque<Coord>,
    direction: Option<Direction>,
    /// Probing sense along the locked axis: rightward or downward when `true`.
    forward: bool,
    /// Next directed probe extends from the first hit instead of the last.
    go_back: bool,
    /// The sense has already been flipped once for the current axis.
    reversed: bool,
}

impl HuntTracker {
    pub fn new() -> Self {
        Self {
            hit_queue: VecDeque::new(),
            direction: None,
            forward: true,
            go_back: false,
            reversed: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> HuntState {
        match (self.hit_queue.is_empty(), self.direction) {
            (true, _) => HuntState::Searching,
            (false, None) => HuntState::TrackingUndirected,
            (false, Some(_)) => HuntState::TrackingDirected,
        }
    }

    /// Unresolved hits, oldest first.
    pub fn hit_queue(&self) -> Vec<Coord> {
        self.hit_queue.iter().copied().collect()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn is_going_back(&self) -> bool {
        self.go_back
    }

    /// Next cell to probe around the tracked hits, skipping `blocked` cells.
    /// `None` means the caller should search for a fresh cell.
    pub fn next_probe(&mut self, blocked: &Grid, rng: &mut dyn Randomness) -> Option<Coord> {
        while let Some(&last) = self.hit_queue.back() {
            let Some(direction) = self.direction else {
                let probe = self.probe_neighbours(last, blocked, rng);
                if probe.is_none() {
                    let dropped = self.hit_queue.pop_front();
                    debug!("no open neighbour around {:?}, dropping {:?}", last, dropped);
                }
                return probe;
            };
            let anchor = if self.go_back {
                self.go_back = false;
                self.hit_queue.front().copied().unwrap_or(last)
            } else {
                last
            };
            let probe = direction
                .step(anchor, self.forward)
                .filter(|&(r, c)| !blocked.contains(r, c));
            if probe.is_some() {
                return probe;
            }
            self.dead_end();
        }
        None
    }

    /// First open cell among the shuffled axis neighbours of `last`.
    fn probe_neighbours(
        &self,
        last: Coord,
        blocked: &Grid,
        rng: &mut dyn Randomness,
    ) -> Option<Coord> {
        let mut neighbours: Vec<Coord> = [
            Direction::Vertical.step(last, true),
            Direction::Vertical.step(last, false),
            Direction::Horizontal.step(last, false),
            Direction::Horizontal.step(last, true),
        ]
        .into_iter()
        .flatten()
        .collect();
        rng.shuffle(&mut neighbours);

        neighbours
            .into_iter()
            .find(|&(r, c)| !blocked.contains(r, c))
    }

    /// The current end of the ship is closed: flip once, then give up the axis
    /// along with the oldest hit.
    fn dead_end(&mut self) {
        if self.reversed {
            let dropped = self.hit_queue.pop_front();
            debug!(
                "both ends closed along {:?}, unlocking and dropping {:?}",
                self.direction, dropped
            );
            self.unlock();
        } else {
            self.reversed = true;
            self.forward = !self.forward;
            self.go_back = true;
        }
    }

    fn unlock(&mut self) {
        self.direction = None;
        self.forward = true;
        self.go_back = false;
        self.reversed = false;
    }

    /// Learn from the outcome of a shot at `coord`. Returns the reconstructed
    /// ship when the shot sank one.
    pub fn record(&mut self, coord: Coord, outcome: AttackOutcome) -> Option<SunkShip> {
        match outcome {
            AttackOutcome::Hit => {
                if self.direction.is_none() {
                    self.lock_axis(coord);
                }
                self.hit_queue.push_back(coord);
                None
            }
            AttackOutcome::Sink => {
                let sunk = self.take_sunk(coord);
                self.unlock();
                debug!("sunk ship of size {} at {:?}", sunk.size(), sunk.positions());
                Some(sunk)
            }
            AttackOutcome::Miss | AttackOutcome::Rejected(_) => {
                if self.direction.is_some() {
                    self.dead_end();
                }
                None
            }
        }
    }

    /// Lock onto the axis through the previous hit and `coord` if they touch.
    fn lock_axis(&mut self, coord: Coord) {
        let Some(&(last_row, last_col)) = self.hit_queue.back() else {
            return;
        };
        let (row, col) = coord;
        if row == last_row && col.abs_diff(last_col) == 1 {
            self.direction = Some(Direction::Horizontal);
            self.forward = col > last_col;
        } else if col == last_col && row.abs_diff(last_row) == 1 {
            self.direction = Some(Direction::Vertical);
            self.forward = row > last_row;
        } else {
            return;
        }
        self.reversed = false;
        debug!("locked {:?}, forward={}", self.direction, self.forward);
    }

    /// Pull the sinking cell and the tracked hits in line with it out of the queue.
    fn take_sunk(&mut self, coord: Coord) -> SunkShip {
        let axis = self.direction.or_else(|| {
            [Direction::Horizontal, Direction::Vertical]
                .into_iter()
                .find(|d| {
                    [true, false].into_iter().any(|forward| {
                        d.step(coord, forward)
                            .is_some_and(|n| self.hit_queue.contains(&n))
                    })
                })
        });

        let mut positions = alloc::vec![coord];
        if let Some(axis) = axis {
            for forward in [false, true] {
                let mut cursor = coord;
                while let Some(next) = axis.step(cursor, forward) {
                    if !self.hit_queue.contains(&next) {
                        break;
                    }
                    positions.push(next);
                    cursor = next;
                }
            }
        }
        self.hit_queue.retain(|c| !positions.contains(c));
        SunkShip::new(positions)
    }
}

impl Default for HuntTracker {
    fn default() -> Self {
        Self::new()
    }
}
