pub mod ai;
pub mod coords;
pub mod error;
pub mod game;
pub mod games;

use std::fmt::{Debug, Display};
use std::hash::Hash;

pub use ai::{
    Agent,
    SearchMethod,
    VirtualPlayer,
    heuristic::{Heuristic, MaterialHeuristic, ZeroHeuristic},
    mcts::{MctsConfig, MctsReport, MonteCarloSearch},
    game_tree::{
        GameTree,
        builder::TreeBuilder,
        node::GameTreeNode,
        edge::GameTreeEdge,
        score::Score,
    },
    random_rollout::{random_move, random_rollout},
};
pub use coords::Coord;
pub use error::GameError;
pub use game::Game;

/// One of the two sides of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// State of a position as seen by the side to move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameState {
    Ongoing,
    Winner(Player),
    Draw,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Ongoing
    }
}

/// The rules of a game, as pure functions over explicit snapshots.
///
/// Implementations hold configuration only; every position lives in a
/// [Board::Snapshot] value, so branches of a search never observe each other.
pub trait Board {
    type Snapshot: Clone + Eq + Hash + Debug;
    type Move: Clone + Eq + Debug + Display;
    type Cell: Copy + Debug;

    /// The starting position.
    fn initialize(&self) -> Self::Snapshot;

    fn legal_moves(&self, side: Player, snapshot: &Self::Snapshot) -> Vec<Self::Move>;

    fn apply_move(&self, side: Player, mv: &Self::Move, snapshot: &Self::Snapshot) -> Result<Self::Snapshot, GameError>;

    /// `side` is the player about to move in `snapshot`.
    fn terminal_state(&self, side: Player, snapshot: &Self::Snapshot) -> GameState;

    fn parse_move(&self, notation: &str) -> Result<Self::Move, GameError>;

    /// Rows of raw cells in storage order, row 0 first.
    fn rows(&self, snapshot: &Self::Snapshot) -> Vec<Vec<Self::Cell>>;
}
