use crate::games::checkers::{material_balance, Checkers};
use crate::{Board, Player};

/// Static evaluation of a non-terminal position at the search horizon.
pub trait Heuristic<B: Board> {
    /// Positive values favour `side`.
    fn evaluate(&self, board: &B, snapshot: &B::Snapshot, side: Player) -> i32;
}

/// Treats every horizon position as even.
#[derive(Debug, Default, Copy, Clone)]
pub struct ZeroHeuristic;

impl<B: Board> Heuristic<B> for ZeroHeuristic {
    fn evaluate(&self, _: &B, _: &B::Snapshot, _: Player) -> i32 {
        0
    }
}

/// Piece count difference, kings weighted above men.
#[derive(Debug, Default, Copy, Clone)]
pub struct MaterialHeuristic;

impl Heuristic<Checkers> for MaterialHeuristic {
    fn evaluate(&self, _: &Checkers, snapshot: &<Checkers as Board>::Snapshot, side: Player) -> i32 {
        material_balance(snapshot, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::board::{Cell, CheckersSnapshot};
    use crate::games::tic_tac_toe::TicTacToe;
    use crate::Coord;

    #[test]
    fn zero_heuristic_is_flat() {
        let board = TicTacToe::default();
        let snapshot = board.initialize();
        assert_eq!(ZeroHeuristic.evaluate(&board, &snapshot, Player::One), 0);
    }

    #[test]
    fn material_is_symmetric() {
        let board = Checkers::default();
        let snapshot = CheckersSnapshot::starting_position()
            .with_cell(Coord::new(0, 0), Cell::King(Player::One))
            .without_piece(Coord::new(7, 7));

        let one = MaterialHeuristic.evaluate(&board, &snapshot, Player::One);
        let two = MaterialHeuristic.evaluate(&board, &snapshot, Player::Two);
        assert!(one > 0);
        assert_eq!(one, -two);
    }
}
