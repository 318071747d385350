use crate::game::{Board, Position};

/// Trait for computing heuristics that estimate the number of moves needed to solve a board.
pub trait Heuristic {
    /// Build the heuristic for one board. A solver only ever scores states
    /// derived from the board its heuristic was built for.
    fn for_board(board: &Board) -> Self
    where
        Self: Sized;

    /// Lower bound on the moves still needed to reach a solved board.
    fn estimate(&self, board: &Board) -> usize;
}

/// Estimates zero everywhere, which degrades A* to uniform-cost search.
pub struct NullHeuristic;

impl NullHeuristic {
    pub fn new() -> Self {
        NullHeuristic
    }
}

impl Default for NullHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for NullHeuristic {
    fn for_board(_board: &Board) -> Self {
        NullHeuristic
    }

    fn estimate(&self, _board: &Board) -> usize {
        0
    }
}

/// Sum over every box off target of the Manhattan distance to its nearest
/// target. Several boxes may count the same target; each term is still a lower
/// bound for its box alone, so the sum never overestimates.
pub struct ManhattanHeuristic {
    targets: Vec<Position>,
}

impl ManhattanHeuristic {
    /// Targets never move, so they are collected once from the initial board.
    pub fn new(board: &Board) -> Self {
        ManhattanHeuristic {
            targets: board.target_positions().collect(),
        }
    }

    fn nearest_target(&self, pos: Position) -> usize {
        self.targets
            .iter()
            .map(|&target| pos.manhattan(target))
            .min()
            .unwrap_or(0)
    }
}

impl Heuristic for ManhattanHeuristic {
    fn for_board(board: &Board) -> Self {
        Self::new(board)
    }

    fn estimate(&self, board: &Board) -> usize {
        // Boxes already on a target contribute zero.
        board
            .box_positions()
            .filter(|&pos| !board.get(pos).is_target())
            .map(|pos| self.nearest_target(pos))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_solved() {
        let input = "#####\n\
                     #@ *#\n\
                     #####";
        let board = Board::from_text(input).unwrap();
        let heuristic = ManhattanHeuristic::new(&board);

        assert_eq!(heuristic.estimate(&board), 0);
    }

    #[test]
    fn test_manhattan_one_move() {
        let input = "#####\n\
                     #@$.#\n\
                     #####";
        let board = Board::from_text(input).unwrap();
        let heuristic = ManhattanHeuristic::new(&board);

        assert_eq!(heuristic.estimate(&board), 1);
    }

    #[test]
    fn test_manhattan_ignores_walls() {
        // The wall between box and target doesn't count.
        let input = "#######\n\
                     #@$#. #\n\
                     #     #\n\
                     #######";
        let board = Board::from_text(input).unwrap();
        let heuristic = ManhattanHeuristic::new(&board);

        assert_eq!(heuristic.estimate(&board), 2);
    }

    #[test]
    fn test_manhattan_targets_are_shared() {
        // Both boxes are nearest to the left target. Without a unique
        // assignment each counts distance 1 to it.
        let input = "########\n\
                     #  .$  #\n\
                     #  $  .#\n\
                     #@     #\n\
                     ########";
        let board = Board::from_text(input).unwrap();
        let heuristic = ManhattanHeuristic::new(&board);

        assert_eq!(heuristic.estimate(&board), 2);
    }

    #[test]
    fn test_manhattan_zero_iff_solved() {
        for input in [
            "#####\n#@$.#\n#####",
            "#####\n#@ *#\n#####",
            "######\n#+ $ #\n######",
            "######\n#@* *#\n#.  $#\n######",
        ] {
            let board = Board::from_text(input).unwrap();
            let heuristic = ManhattanHeuristic::new(&board);
            assert_eq!(heuristic.estimate(&board) == 0, board.is_solved(), "{}", input);
        }
    }

    #[test]
    fn test_player_on_target_counts_as_target() {
        let input = "######\n\
                     #+ $ #\n\
                     ######";
        let board = Board::from_text(input).unwrap();
        let heuristic = ManhattanHeuristic::new(&board);

        assert_eq!(heuristic.estimate(&board), 2);
    }

    #[test]
    fn test_null_heuristic() {
        let board = Board::from_text("#####\n#@$.#\n#####").unwrap();
        assert_eq!(NullHeuristic::new().estimate(&board), 0);
    }
}
