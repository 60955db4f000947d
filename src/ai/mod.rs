pub mod game_tree;
pub mod heuristic;
pub mod mcts;
pub mod minimax;
pub mod random_rollout;

use log::debug;
use rand::Rng;
use crate::ai::heuristic::Heuristic;
use crate::ai::mcts::{MctsConfig, MonteCarloSearch};
use crate::ai::random_rollout::random_move;
use crate::error::GameError;
use crate::game::Game;
use crate::Board;

/// Anything that can propose the next move of a game.
pub trait Agent<B: Board> {
    fn name(&self) -> &str;

    /// The move for the side to move, in the board's move notation. Has no
    /// effect on `game`.
    fn next_move(&mut self, game: &Game<B>) -> Result<String, GameError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchMethod {
    Random,
    Minimax { depth: u32 },
    AlphaBeta { depth: u32 },
    MonteCarlo(MctsConfig),
}

/// A computer opponent: a search method with the evaluation and randomness
/// it needs.
pub struct VirtualPlayer<H, R> where R: Rng {
    name: String,
    method: SearchMethod,
    heuristic: H,
    rng: R,
}

impl<H, R> VirtualPlayer<H, R> where R: Rng {
    pub fn new(name: impl Into<String>, method: SearchMethod, heuristic: H, rng: R) -> Self {
        if let SearchMethod::Minimax { depth } | SearchMethod::AlphaBeta { depth } = method {
            assert!(depth > 0, "search depth must be at least one ply");
        }

        Self {
            name: name.into(),
            method,
            heuristic,
            rng,
        }
    }

    pub fn method(&self) -> &SearchMethod {
        &self.method
    }
}

impl<B, H, R> Agent<B> for VirtualPlayer<H, R>
where
    B: Board,
    H: Heuristic<B>,
    R: Rng,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, game: &Game<B>) -> Result<String, GameError> {
        if game.game_state()?.is_terminal() {
            return Err(GameError::GameOver);
        }

        let side = game.current_player()?;
        let snapshot = game.snapshot()?;
        let board = game.board();

        let mv = match &self.method {
            SearchMethod::Random => random_move(board, &mut self.rng, snapshot, side),
            SearchMethod::Minimax { depth } => minimax::minimax(board, &self.heuristic, snapshot, side, *depth),
            SearchMethod::AlphaBeta { depth } => minimax::alpha_beta(board, &self.heuristic, snapshot, side, *depth),
            SearchMethod::MonteCarlo(config) => MonteCarloSearch::new(board, config)
                .choose_move(&mut self.rng, snapshot, side)
                .map(|report| report.best_move),
        };

        let mv = mv.ok_or(GameError::GameOver)?;
        debug!("{} ({side:?}) proposes {mv}", self.name);
        Ok(mv.to_string())
    }
}
