use crate::game::{Board, Direction, Position};

/// Returns true if the box at `pos` sits in a corner that is not a target.
///
/// A box can only be pushed, never pulled, so a box walled in (or against the
/// board edge) on one vertical and one horizontal side can never leave. Only
/// corners are detected; frozen groups of boxes and dead wall runs are not.
pub fn is_corner_deadlock(board: &Board, pos: Position) -> bool {
    if board.get(pos).is_target() {
        return false;
    }

    let vertical = board.blocked(pos, Direction::Up) || board.blocked(pos, Direction::Down);
    let horizontal = board.blocked(pos, Direction::Left) || board.blocked(pos, Direction::Right);
    vertical && horizontal
}
