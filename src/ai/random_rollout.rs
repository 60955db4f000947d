use rand::seq::SliceRandom;
use rand::Rng;
use crate::{Board, GameState, Player};

/// Uniformly random legal move.
pub fn random_move<B: Board, R: Rng>(board: &B, rng: &mut R, snapshot: &B::Snapshot, side: Player) -> Option<B::Move> {
    board.legal_moves(side, snapshot).choose(rng).cloned()
}

/// Plays random moves from `snapshot` with `side` to move until the game is
/// decided or `max_moves` plies have been played, in which case the result
/// is [GameState::Ongoing].
pub fn random_rollout<B: Board, R: Rng>(board: &B, rng: &mut R, snapshot: &B::Snapshot, side: Player, max_moves: u32) -> GameState {
    let mut snapshot = snapshot.clone();
    let mut side = side;

    for _ in 0..max_moves {
        let state = board.terminal_state(side, &snapshot);
        if state.is_terminal() {
            return state;
        }

        let Some(mv) = random_move(board, rng, &snapshot, side) else {
            return GameState::Ongoing;
        };

        snapshot = match board.apply_move(side, &mv, &snapshot) {
            Ok(next) => next,
            Err(err) => panic!("generated move {mv} was rejected by the board: {err}"),
        };
        side = side.other();
    }

    board.terminal_state(side, &snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::games::checkers::Checkers;
    use crate::games::tic_tac_toe::TicTacToe;

    #[test]
    fn tic_tac_toe_rollouts_always_finish() {
        let board = TicTacToe::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let state = random_rollout(&board, &mut rng, &board.initialize(), Player::One, 9);
            assert!(state.is_terminal());
        }
    }

    #[test]
    fn random_move_is_legal() {
        let board = Checkers::default();
        let snapshot = board.initialize();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..20 {
            let mv = random_move(&board, &mut rng, &snapshot, Player::One).unwrap();
            assert!(board.legal_moves(Player::One, &snapshot).contains(&mv));
        }
    }

    #[test]
    fn checkers_rollout_respects_the_move_budget() {
        let board = Checkers::default();
        let mut rng = StdRng::seed_from_u64(9);

        let state = random_rollout(&board, &mut rng, &board.initialize(), Player::One, 0);
        assert_eq!(state, GameState::Ongoing);

        // the capture-free counter guarantees an end well within this budget
        for _ in 0..5 {
            let state = random_rollout(&board, &mut rng, &board.initialize(), Player::One, 2_000);
            assert!(state.is_terminal());
        }
    }
}
