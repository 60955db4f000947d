use crate::Player;

/// Monte Carlo statistics of one root move.
#[derive(Debug, Clone, PartialEq)]
pub struct Score<M> {
    pub mv: M,
    pub player: Player,
    pub wins: u32,
    pub plays: u32,
}

impl<M> Score<M> {
    /// Unvisited moves count as a single lost play.
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.plays.max(1) as f64
    }
}
