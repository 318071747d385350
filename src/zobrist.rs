use crate::game::{Board, Position};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Zobrist tables for one board's dimensions.
pub struct Zobrist {
    cols: usize,
    box_hashes: Vec<u64>,
    player_hashes: Vec<u64>,
}

impl Zobrist {
    pub fn new(rows: usize, cols: usize) -> Self {
        // Use a seeded PRNG for reproducible Zobrist hashes
        let mut rng = ChaCha8Rng::seed_from_u64(0x123456789abcdef0);
        let cells = rows * cols;

        let box_hashes = (0..cells).map(|_| rng.next_u64()).collect();
        let player_hashes = (0..cells).map(|_| rng.next_u64()).collect();

        Zobrist {
            cols,
            box_hashes,
            player_hashes,
        }
    }

    pub fn for_board(board: &Board) -> Self {
        Self::new(board.rows(), board.cols())
    }

    pub fn box_hash(&self, pos: Position) -> u64 {
        self.box_hashes[pos.row * self.cols + pos.col]
    }

    pub fn player_hash(&self, pos: Position) -> u64 {
        self.player_hashes[pos.row * self.cols + pos.col]
    }

    /// Hash of a player position together with a set of box positions.
    pub fn hash<I>(&self, player: Position, boxes: I) -> u64
    where
        I: IntoIterator<Item = Position>,
    {
        boxes
            .into_iter()
            .fold(self.player_hash(player), |acc, pos| acc ^ self.box_hash(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducible() {
        let a = Zobrist::new(4, 5);
        let b = Zobrist::new(4, 5);
        let pos = Position::new(2, 3);
        assert_eq!(a.box_hash(pos), b.box_hash(pos));
        assert_eq!(a.player_hash(pos), b.player_hash(pos));
    }

    #[test]
    fn test_box_order_does_not_matter() {
        let zobrist = Zobrist::new(4, 4);
        let player = Position::new(0, 0);
        let boxes = [Position::new(1, 1), Position::new(2, 3)];
        let reversed = [Position::new(2, 3), Position::new(1, 1)];
        assert_eq!(zobrist.hash(player, boxes), zobrist.hash(player, reversed));
    }

    #[test]
    fn test_player_and_box_tables_differ() {
        let zobrist = Zobrist::new(3, 3);
        let pos = Position::new(1, 1);
        assert_ne!(zobrist.box_hash(pos), zobrist.player_hash(pos));
    }
}
