use crate::deadlocks::is_corner_deadlock;
use crate::game::{ALL_DIRECTIONS, Board, Direction, Entity, Position};
use crate::heuristic::Heuristic;
use crate::zobrist::Zobrist;
use arrayvec::ArrayVec;
use std::hash::{Hash, Hasher};

/// Index of a state in the solver's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub usize);

/// A node of the search tree. Each state owns its board; parents are referred
/// to by arena index.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub board: Board,
    pub player: Position,
    pub g: usize,
    pub h: usize,
    pub parent: Option<StateId>,
    pub last_move: Option<Direction>,
}

impl SearchState {
    /// Root state for a board. Returns None if the board has no player.
    pub fn initial<H: Heuristic>(board: Board, heuristic: &H) -> Option<Self> {
        let player = board.player_pos()?;
        let h = heuristic.estimate(&board);
        Some(SearchState {
            board,
            player,
            g: 0,
            h,
            parent: None,
            last_move: None,
        })
    }

    pub fn f(&self) -> usize {
        self.g + self.h
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_solved()
    }

    pub fn key(&self, zobrist: &Zobrist) -> StateKey {
        StateKey::new(self, zobrist)
    }
}

/// Identity of a state for duplicate detection: the player position and the
/// set of box positions. Target status is not part of it since targets never
/// move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateKey {
    player: Position,
    // Row-major order, so equal sets compare equal
    boxes: Vec<Position>,
    hash: u64,
}

impl StateKey {
    pub fn new(state: &SearchState, zobrist: &Zobrist) -> Self {
        let boxes: Vec<Position> = state.board.box_positions().collect();
        let hash = zobrist.hash(state.player, boxes.iter().copied());
        StateKey {
            player: state.player,
            boxes,
            hash,
        }
    }
}

impl Hash for StateKey {
    fn hash<S: Hasher>(&self, state: &mut S) {
        state.write_u64(self.hash);
    }
}

/// Generate the children of `parent`, in up, down, left, right order.
///
/// A child is either a player step onto free floor or a push of an adjacent
/// box onto the free cell behind it. Pushes that leave the box in a corner
/// deadlock are dropped. Every child costs one move more than its parent.
pub fn successors<H: Heuristic>(
    parent_id: StateId,
    parent: &SearchState,
    heuristic: &H,
) -> ArrayVec<SearchState, 4> {
    let mut children = ArrayVec::new();
    let board = &parent.board;

    for dir in ALL_DIRECTIONS {
        let Some(next) = board.step(parent.player, dir) else {
            continue;
        };
        let cell = board.get(next);

        let child_board = if cell.is_free() {
            let mut child_board = board.clone();
            child_board.move_entity(parent.player, next, Entity::Player);
            child_board
        } else if cell.is_box() {
            let Some(beyond) = board.step(next, dir) else {
                continue;
            };
            if !board.get(beyond).is_free() {
                continue;
            }

            // Box first, so the player walks onto the cell it vacated.
            let mut child_board = board.clone();
            child_board.move_entity(next, beyond, Entity::Box);
            child_board.move_entity(parent.player, next, Entity::Player);

            if is_corner_deadlock(&child_board, beyond) {
                continue;
            }
            child_board
        } else {
            continue;
        };

        let h = heuristic.estimate(&child_board);
        children.push(SearchState {
            board: child_board,
            player: next,
            g: parent.g + 1,
            h,
            parent: Some(parent_id),
            last_move: Some(dir),
        });
    }

    children
}
