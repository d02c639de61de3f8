use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Most direction changes a connecting path may take, i.e. at most three straight segments.
pub const MAX_TURNS: u8 = 2;

/// Polyline between two tiles, holding only the endpoints and the corners. Always at least two
/// points, each segment straight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SmallVec<[Point; 4]>", into = "SmallVec<[Point; 4]>")]
pub struct Path {
    points: SmallVec<[Point; 4]>,
}

impl Path {
    fn from_cells(cells: impl IntoIterator<Item = Point>) -> Self {
        let mut points: SmallVec<[Point; 4]> = SmallVec::new();
        for cell in cells {
            // collapse collinear runs into a single segment
            if let [.., before, last] = points.as_slice() {
                if Direction::between(*before, *last) == Direction::between(*last, cell) {
                    points.pop();
                }
            }
            points.push(cell);
        }
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Number of direction changes along the path.
    pub fn turns(&self) -> usize {
        self.points
            .windows(3)
            .filter(|w| Direction::between(w[0], w[1]) != Direction::between(w[1], w[2]))
            .count()
    }

    /// Number of unit steps along the path.
    pub fn cell_len(&self) -> usize {
        self.points
            .windows(2)
            .map(|w| usize::from(w[0].row.abs_diff(w[1].row)) + usize::from(w[0].col.abs_diff(w[1].col)))
            .sum()
    }

    fn reversed(mut self) -> Self {
        self.points.reverse();
        self
    }
}

impl TryFrom<SmallVec<[Point; 4]>> for Path {
    type Error = GameError;

    fn try_from(points: SmallVec<[Point; 4]>) -> Result<Self> {
        let straight = points
            .windows(2)
            .all(|w| Direction::between(w[0], w[1]).is_some());
        if points.len() < 2 || !straight {
            return Err(GameError::InvalidPath);
        }
        Ok(Self { points })
    }
}

impl From<Path> for SmallVec<[Point; 4]> {
    fn from(path: Path) -> Self {
        path.points
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connection {
    Connected(Path),
    Disconnected,
}

impl Connection {
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Connected(path) => Some(path),
            Self::Disconnected => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Connected(path) => Some(path),
            Self::Disconnected => None,
        }
    }
}

/// Decides whether the tiles at `from` and `to` form a connectable pair and finds the path.
///
/// Tiles of different types, inactive tiles, and a tile paired with itself are rejected before
/// any search. The search always runs from the row-major smaller endpoint, so swapping the
/// arguments yields the same outcome with the path reversed.
pub fn can_connect(board: &Board, from: Point, to: Point) -> Connection {
    let (Some(a), Some(b)) = (board.get(from), board.get(to)) else {
        return Connection::Disconnected;
    };
    if a.kind != b.kind || !a.is_active() || !b.is_active() || a.id == b.id {
        return Connection::Disconnected;
    }

    let path = if to < from {
        search(board, to, from).map(Path::reversed)
    } else {
        search(board, from, to)
    };
    path.map_or(Connection::Disconnected, Connection::Connected)
}

#[derive(Copy, Clone, Debug)]
struct Node {
    pos: Point,
    heading: Option<Direction>,
    turns: u8,
    parent: Option<usize>,
}

/// Breadth-first search where every expansion slides along a whole run of empty cells, enqueuing
/// each cell it passes. Turns are counted per change of direction, not per cell.
fn search(board: &Board, from: Point, to: Point) -> Option<Path> {
    let bounds = board.size();
    let mut nodes = vec![Node {
        pos: from,
        heading: None,
        turns: 0,
        parent: None,
    }];
    let mut queue = VecDeque::from([0]);
    let mut visited: HashSet<(Point, Direction, u8)> = HashSet::new();

    while let Some(current) = queue.pop_front() {
        let Node {
            pos, heading, turns, ..
        } = nodes[current];

        for direction in Direction::ALL {
            let turns = match heading {
                Some(heading) if heading != direction => turns + 1,
                _ => turns,
            };
            if turns > MAX_TURNS {
                continue;
            }

            let mut next = pos.step(direction, bounds);
            while let Some(cell) = next {
                if cell != to && !board[cell].is_empty() {
                    break;
                }
                if visited.insert((cell, direction, turns)) {
                    nodes.push(Node {
                        pos: cell,
                        heading: Some(direction),
                        turns,
                        parent: Some(current),
                    });
                    if cell == to {
                        log::trace!("Connected {} to {} after {} nodes", from, to, nodes.len());
                        return Some(trace_back(&nodes, nodes.len() - 1));
                    }
                    queue.push_back(nodes.len() - 1);
                }
                next = cell.step(direction, bounds);
            }
        }
    }

    log::trace!("No path from {} to {} after {} nodes", from, to, nodes.len());
    None
}

fn trace_back(nodes: &[Node], mut index: usize) -> Path {
    let mut cells = Vec::new();
    loop {
        let node = nodes[index];
        cells.push(node.pos);
        match node.parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    Path::from_cells(cells.into_iter().rev())
}
