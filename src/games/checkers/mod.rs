pub mod board;
pub mod movegen;

use std::fmt::{Display, Formatter};

use log::trace;

use crate::coords::{parse_squares, Coord};
use crate::error::GameError;
use crate::games::checkers::board::{promotion_row, Cell, CheckersSnapshot, PieceKind, BOARD_SIZE};
use crate::games::checkers::movegen::{capture_moves, find_moves_for_piece, simple_moves};
use crate::{Board, GameState, Player};

/// Moves without a capture after which the game is drawn.
pub const DEFAULT_DRAW_THRESHOLD: u32 = 50;

/// Draughts on an 8×8 board with mandatory captures, multi-jump chains and
/// flying kings.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Checkers {
    draw_threshold: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct CheckersMove {
    pub from: Coord,
    pub to: Coord,
    /// Captured pieces in chain order. Empty for plain steps, and for moves
    /// parsed from notation until they are matched against a generated chain.
    pub captures: Vec<Coord>,
}

impl Default for Checkers {
    fn default() -> Self {
        Checkers { draw_threshold: DEFAULT_DRAW_THRESHOLD }
    }
}

impl Checkers {
    pub fn with_draw_threshold(mut self, moves_without_capture: u32) -> Self {
        self.draw_threshold = moves_without_capture;
        self
    }

    pub fn draw_threshold(&self) -> u32 {
        self.draw_threshold
    }

    fn has_legal_move(&self, side: Player, snapshot: &CheckersSnapshot) -> bool {
        snapshot.pieces(side).into_iter().any(|(coord, _)| {
            find_moves_for_piece(coord.x, coord.y, side, snapshot)
                .map(|moves| !moves.is_empty())
                .unwrap_or(false)
        })
    }
}

impl CheckersMove {
    pub fn new(from: Coord, to: Coord) -> Self {
        CheckersMove { from, to, captures: Vec::new() }
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

impl Display for CheckersMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl Board for Checkers {
    type Snapshot = CheckersSnapshot;
    type Move = CheckersMove;
    type Cell = Cell;

    fn initialize(&self) -> CheckersSnapshot {
        CheckersSnapshot::starting_position()
    }

    fn legal_moves(&self, side: Player, snapshot: &CheckersSnapshot) -> Vec<CheckersMove> {
        let pieces = snapshot.pieces(side);

        let to_moves = |from: Coord, moves: Vec<(Coord, Vec<Coord>)>| {
            moves
                .into_iter()
                .map(move |(to, captures)| CheckersMove { from, to, captures })
        };

        let captures: Vec<CheckersMove> = pieces
            .iter()
            .flat_map(|&(from, kind)| to_moves(from, capture_moves(snapshot, from, kind, side)))
            .collect();
        if !captures.is_empty() {
            return captures;
        }

        pieces
            .iter()
            .flat_map(|&(from, kind)| to_moves(from, simple_moves(snapshot, from, kind, side)))
            .collect()
    }

    fn apply_move(&self, side: Player, mv: &CheckersMove, snapshot: &CheckersSnapshot) -> Result<CheckersSnapshot, GameError> {
        if !mv.from.is_within(BOARD_SIZE, BOARD_SIZE) || !mv.to.is_within(BOARD_SIZE, BOARD_SIZE) {
            return Err(GameError::invalid_move(format!("{mv} leaves the board")));
        }

        let piece = snapshot.get(mv.from);
        if piece.owner() != Some(side) {
            return Err(GameError::invalid_move(format!("there is no piece of the moving player on {}", mv.from)));
        }

        let candidates = find_moves_for_piece(mv.from.x, mv.from.y, side, snapshot)?;
        let Some((_, captures)) = candidates
            .into_iter()
            .find(|(to, captures)| *to == mv.to && (mv.captures.is_empty() || *captures == mv.captures))
        else {
            return Err(GameError::invalid_move(format!("{mv} is not a legal move")));
        };

        let mut next = snapshot.clone();
        next.set(mv.from, Cell::EmptyDark);
        for &captured in &captures {
            next = next.without_piece(captured);
        }

        let landed = match piece {
            Cell::Man(owner) if mv.to.y == promotion_row(owner) => {
                trace!("{mv}: man crowned on {}", mv.to);
                Cell::King(owner)
            }
            other => other,
        };
        next.set(mv.to, landed);

        if captures.is_empty() {
            next.set_moves_without_capture(snapshot.moves_without_capture() + 1);
        } else {
            next.set_moves_without_capture(0);
        }

        Ok(next)
    }

    fn terminal_state(&self, side: Player, snapshot: &CheckersSnapshot) -> GameState {
        for player in Player::BOTH {
            if snapshot.pieces(player).is_empty() {
                return GameState::Winner(player.other());
            }
            if player == side && !self.has_legal_move(side, snapshot) {
                return GameState::Winner(player.other());
            }
        }

        if snapshot.moves_without_capture() >= self.draw_threshold {
            return GameState::Draw;
        }

        GameState::Ongoing
    }

    fn parse_move(&self, notation: &str) -> Result<CheckersMove, GameError> {
        match parse_squares(notation)?.as_slice() {
            [from, to] => Ok(CheckersMove::new(*from, *to)),
            _ => Err(GameError::invalid_move(format!("'{notation}' must name exactly two squares"))),
        }
    }

    fn rows(&self, snapshot: &CheckersSnapshot) -> Vec<Vec<Cell>> {
        snapshot.rows()
    }
}

/// Material balance from the point of view of `side`, kings counting as three men.
pub fn material_balance(snapshot: &CheckersSnapshot, side: Player) -> i32 {
    let material = |player: Player| -> i32 {
        snapshot
            .pieces(player)
            .iter()
            .map(|(_, kind)| match kind {
                PieceKind::Man => 1,
                PieceKind::King => 3,
            })
            .sum()
    };
    material(side) - material(side.other())
}
