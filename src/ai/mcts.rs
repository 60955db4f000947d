use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use log::{debug, trace};
use rand::Rng;
use crate::ai::game_tree::score::Score;
use crate::{Board, GameState, Player};

#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    pub num_simulations: u32,
    /// Plies after which a playout is abandoned without a result.
    pub max_moves: u32,
    pub exploration: f64,
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 100,
            max_moves: 100,
            exploration: 1.4,
            time_limit: None,
        }
    }
}

impl MctsConfig {
    pub fn with_num_simulations(mut self, num_simulations: u32) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

#[derive(Debug, Default, Copy, Clone)]
struct Stats {
    plays: u32,
    wins: u32,
}

/// Outcome of one search: the chosen move and how the root moves fared.
#[derive(Debug, Clone)]
pub struct MctsReport<M> {
    pub best_move: M,
    pub scores: Vec<Score<M>>,
    pub simulations: u32,
    /// Deepest ply at which a position was added to the table.
    pub max_depth: u32,
}

/// One Monte Carlo search. The statistics table lives as long as the search
/// and is dropped with it.
pub struct MonteCarloSearch<'a, B> where B: Board {
    board: &'a B,
    config: &'a MctsConfig,
    /// Keyed by the side that made the move and the position it produced.
    stats: HashMap<(Player, B::Snapshot), Stats>,
    max_depth: u32,
}

impl<'a, B> MonteCarloSearch<'a, B> where B: Board {
    pub fn new(board: &'a B, config: &'a MctsConfig) -> Self {
        Self {
            board,
            config,
            stats: HashMap::new(),
            max_depth: 0,
        }
    }

    /// Pick a move for `side`. `None` when the position is already decided
    /// or offers no move.
    pub fn choose_move<R: Rng>(mut self, rng: &mut R, snapshot: &B::Snapshot, side: Player) -> Option<MctsReport<B::Move>> {
        if self.board.terminal_state(side, snapshot).is_terminal() {
            return None;
        }

        let mut moves = self.board.legal_moves(side, snapshot);
        if moves.len() <= 1 {
            let best_move = moves.pop()?;
            debug!("{side:?} has a single move {best_move}, skipping simulations");
            return Some(MctsReport {
                best_move,
                scores: Vec::new(),
                simulations: 0,
                max_depth: 0,
            });
        }

        let started = Instant::now();
        let mut simulations = 0;
        while simulations < self.config.num_simulations {
            if self.config.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                debug!("time limit reached after {simulations} simulations");
                break;
            }
            self.run_simulation(rng, snapshot, side);
            simulations += 1;
        }

        let scores: Vec<Score<B::Move>> = moves
            .into_iter()
            .map(|mv| {
                let child = self.child_snapshot(side, &mv, snapshot);
                let stats = self.stats.get(&(side, child)).copied().unwrap_or_default();
                Score {
                    mv,
                    player: side,
                    wins: stats.wins,
                    plays: stats.plays,
                }
            })
            .collect();

        let mut best: Option<&Score<B::Move>> = None;
        for score in &scores {
            if best.map_or(true, |best| score.win_rate() > best.win_rate()) {
                best = Some(score);
            }
        }
        let best_move = best?.mv.clone();

        debug!(
            "{side:?} chose {best_move} after {simulations} simulations, {} positions, max depth {}",
            self.stats.len(),
            self.max_depth
        );

        Some(MctsReport {
            best_move,
            scores,
            simulations,
            max_depth: self.max_depth,
        })
    }

    fn run_simulation<R: Rng>(&mut self, rng: &mut R, root: &B::Snapshot, root_side: Player) {
        let mut visited: HashSet<(Player, B::Snapshot)> = HashSet::new();
        let mut snapshot = root.clone();
        let mut side = root_side;
        let mut expand = true;
        let mut outcome = GameState::Ongoing;

        for ply in 1..=self.config.max_moves {
            let moves = self.board.legal_moves(side, &snapshot);
            if moves.is_empty() {
                break;
            }

            let mut children: Vec<(Player, B::Snapshot)> = moves
                .iter()
                .map(|mv| (side, self.child_snapshot(side, mv, &snapshot)))
                .collect();

            let index = if children.iter().all(|key| self.stats.contains_key(key)) {
                self.select(&children)
            } else {
                rng.gen_range(0..children.len())
            };
            let key = children.swap_remove(index);

            if expand && !self.stats.contains_key(&key) {
                expand = false;
                self.stats.insert(key.clone(), Stats::default());
                self.max_depth = self.max_depth.max(ply);
                trace!("expanded a position at ply {ply}");
            }

            snapshot = key.1.clone();
            visited.insert(key);
            side = side.other();

            outcome = self.board.terminal_state(side, &snapshot);
            if outcome.is_terminal() {
                break;
            }
        }

        for key in visited {
            if let Some(stats) = self.stats.get_mut(&key) {
                stats.plays += 1;
                if outcome == GameState::Winner(key.0) {
                    stats.wins += 1;
                }
            }
        }
    }

    /// upper confidence bound 1, first maximum on ties
    fn select(&self, children: &[(Player, B::Snapshot)]) -> usize {
        let stats: Vec<Stats> = children
            .iter()
            .map(|key| self.stats.get(key).copied().unwrap_or_default())
            .collect();
        let total_plays: u32 = stats.iter().map(|stats| stats.plays).sum();
        let log_total = (total_plays.max(1) as f64).ln();

        let mut selected = (0, f64::MIN);
        for (index, stats) in stats.iter().enumerate() {
            let ucb = if stats.plays == 0 {
                f64::MAX
            } else {
                let plays = stats.plays as f64;
                let exploitation = stats.wins as f64 / plays;
                let exploration = self.config.exploration * (log_total / plays).sqrt();
                exploitation + exploration
            };
            if ucb > selected.1 {
                selected = (index, ucb);
            }
        }
        selected.0
    }

    fn child_snapshot(&self, side: Player, mv: &B::Move, snapshot: &B::Snapshot) -> B::Snapshot {
        match self.board.apply_move(side, mv, snapshot) {
            Ok(child) => child,
            Err(err) => panic!("generated move {mv} was rejected by the board: {err}"),
        }
    }
}

/// Convenience wrapper returning only the chosen move.
pub fn mcts<B: Board, R: Rng>(board: &B, config: &MctsConfig, rng: &mut R, snapshot: &B::Snapshot, side: Player) -> Option<B::Move> {
    MonteCarloSearch::new(board, config)
        .choose_move(rng, snapshot, side)
        .map(|report| report.best_move)
}
