use log::debug;
use rand::Rng;
use crate::error::GameError;
use crate::{Board, GameState, Player};

/// The authoritative state of one match: the board rules, the position and
/// whose turn it is.
pub struct Game<B> where B: Board {
    board: B,
    starting_player: Option<Player>,
    started: Option<Started<B>>,
}

struct Started<B> where B: Board {
    snapshot: B::Snapshot,
    current_player: Player,
    moves_played: u32,
}

impl<B> Game<B> where B: Board {
    /// `starting_player` of `None` lets [Game::start_game] draw the side
    /// that moves first.
    pub fn new(board: B, starting_player: Option<Player>) -> Self {
        Self {
            board,
            starting_player,
            started: None,
        }
    }

    /// A game resumed from an arbitrary position.
    pub fn from_position(board: B, snapshot: B::Snapshot, current_player: Player) -> Self {
        Self {
            board,
            starting_player: Some(current_player),
            started: Some(Started {
                snapshot,
                current_player,
                moves_played: 0,
            }),
        }
    }

    pub fn start_game<R: Rng>(&mut self, rng: &mut R) {
        let first = match self.starting_player {
            Some(player) => player,
            None if rng.gen_bool(0.5) => Player::One,
            None => Player::Two,
        };
        self.starting_player = Some(first);

        debug!("starting a new game, {first:?} moves first");
        self.started = Some(Started {
            snapshot: self.board.initialize(),
            current_player: first,
            moves_played: 0,
        });
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    pub fn starting_player(&self) -> Option<Player> {
        self.starting_player
    }

    pub fn current_player(&self) -> Result<Player, GameError> {
        Ok(self.started()?.current_player)
    }

    pub fn snapshot(&self) -> Result<&B::Snapshot, GameError> {
        Ok(&self.started()?.snapshot)
    }

    pub fn moves_played(&self) -> Result<u32, GameError> {
        Ok(self.started()?.moves_played)
    }

    pub fn game_state(&self) -> Result<GameState, GameError> {
        let started = self.started()?;
        Ok(self.board.terminal_state(started.current_player, &started.snapshot))
    }

    /// Parse `notation`, apply it for the current player and hand the turn
    /// over. The position is left untouched when the move is rejected.
    pub fn make_move(&mut self, notation: &str) -> Result<(), GameError> {
        if self.game_state()?.is_terminal() {
            return Err(GameError::GameOver);
        }

        let mv = self.board.parse_move(notation)?;
        let started = self.started.as_mut().ok_or(GameError::GameNotStarted)?;
        started.snapshot = self.board.apply_move(started.current_player, &mv, &started.snapshot)?;

        debug!("{:?} played {mv}", started.current_player);
        started.current_player = started.current_player.other();
        started.moves_played += 1;
        Ok(())
    }

    /// Rows with the highest row first, the way a board is printed.
    pub fn board_view(&self) -> Result<Vec<Vec<B::Cell>>, GameError> {
        let mut rows = self.board.rows(&self.started()?.snapshot);
        rows.reverse();
        Ok(rows)
    }

    fn started(&self) -> Result<&Started<B>, GameError> {
        self.started.as_ref().ok_or(GameError::GameNotStarted)
    }
}
