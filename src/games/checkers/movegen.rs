//! Move generation for checkers.
//!
//! All four diagonal directions are scanned for captures by every piece kind,
//! each with its own range, both when listing a piece's captures and when
//! checking whether a capture is mandatory. Men only step forward.

use thiserror::Error;

use crate::coords::Coord;
use crate::error::GameError;
use crate::games::checkers::board::{CheckersSnapshot, Cell, PieceKind, BOARD_SIZE};
use crate::Player;

/// A destination together with the pieces removed on the way, in capture order.
pub type PieceMove = (Coord, Vec<Coord>);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    LeftUp,
    RightUp,
    RightDown,
    LeftDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::LeftUp,
        Direction::RightUp,
        Direction::RightDown,
        Direction::LeftDown,
    ];

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::LeftUp => (-1, 1),
            Direction::RightUp => (1, 1),
            Direction::RightDown => (1, -1),
            Direction::LeftDown => (-1, -1),
        }
    }

    /// The diagonals a man of `owner` may step along.
    pub fn forward(owner: Player) -> &'static [Direction] {
        match owner {
            Player::One => &[Direction::RightUp, Direction::LeftUp],
            Player::Two => &[Direction::LeftDown, Direction::RightDown],
        }
    }
}

impl PieceKind {
    pub fn range(self) -> usize {
        match self {
            PieceKind::Man => 1,
            PieceKind::King => BOARD_SIZE,
        }
    }

    pub fn step_directions(self, owner: Player) -> &'static [Direction] {
        match self {
            PieceKind::Man => Direction::forward(owner),
            PieceKind::King => &Direction::ALL,
        }
    }
}

/// A probe walked off the grid. Only ever ends the probe in that direction.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[error("probe left the board")]
struct OutOfBounds;

/// An opposing piece that can be jumped, and the direction of the jump.
#[derive(Debug, Copy, Clone)]
struct CaptureTarget {
    captured: Coord,
    direction: Direction,
}

fn next_cell(snapshot: &CheckersSnapshot, from: Coord, direction: Direction) -> Result<(Coord, Cell), OutOfBounds> {
    let (dx, dy) = direction.delta();
    let (x, y) = (from.x as isize + dx, from.y as isize + dy);
    let cell = snapshot.try_get(x, y).ok_or(OutOfBounds)?;
    Ok((Coord::new(x as usize, y as usize), cell))
}

fn capture_target_in_direction(
    snapshot: &CheckersSnapshot,
    from: Coord,
    direction: Direction,
    range: usize,
    owner: Player,
) -> Result<Option<CaptureTarget>, OutOfBounds> {
    let mut position = from;

    for _ in 0..range {
        let (next, cell) = next_cell(snapshot, position, direction)?;
        match cell {
            Cell::EmptyDark => position = next,
            cell if cell.owner() == Some(owner.other()) => {
                let (_, behind) = next_cell(snapshot, next, direction)?;
                let target = CaptureTarget { captured: next, direction };
                return Ok((behind == Cell::EmptyDark).then_some(target));
            }
            _ => return Ok(None),
        }
    }

    Ok(None)
}

fn capture_targets(snapshot: &CheckersSnapshot, from: Coord, kind: PieceKind, owner: Player) -> Vec<CaptureTarget> {
    Direction::ALL
        .iter()
        .filter_map(|&direction| {
            capture_target_in_direction(snapshot, from, direction, kind.range(), owner)
                .ok()
                .flatten()
        })
        .collect()
}

/// Follow every chain starting with `target`. The moving piece stays on its
/// origin, so no chain passes over or ends on that square.
fn capture_chains(
    snapshot: &CheckersSnapshot,
    target: CaptureTarget,
    kind: PieceKind,
    owner: Player,
    captured_before: &[Coord],
) -> Vec<PieceMove> {
    let remaining = snapshot.without_piece(target.captured);
    let mut captured = captured_before.to_vec();
    captured.push(target.captured);

    let mut chains = Vec::new();
    let mut landing = target.captured;

    for _ in 0..kind.range() {
        let Ok((next, cell)) = next_cell(&remaining, landing, target.direction) else {
            break;
        };
        if cell != Cell::EmptyDark {
            break;
        }
        landing = next;

        let further = capture_targets(&remaining, landing, kind, owner);
        if further.is_empty() {
            chains.push((landing, captured.clone()));
        } else {
            for next_target in further {
                chains.extend(capture_chains(&remaining, next_target, kind, owner, &captured));
            }
        }
    }

    chains
}

/// Every complete capture sequence the piece on `origin` can play.
pub fn capture_moves(snapshot: &CheckersSnapshot, origin: Coord, kind: PieceKind, owner: Player) -> Vec<PieceMove> {
    capture_targets(snapshot, origin, kind, owner)
        .into_iter()
        .flat_map(|target| capture_chains(snapshot, target, kind, owner, &[]))
        .collect()
}

pub fn simple_moves(snapshot: &CheckersSnapshot, origin: Coord, kind: PieceKind, owner: Player) -> Vec<PieceMove> {
    let mut moves = Vec::new();

    for &direction in kind.step_directions(owner) {
        let mut position = origin;
        for _ in 0..kind.range() {
            match next_cell(snapshot, position, direction) {
                Ok((next, Cell::EmptyDark)) => {
                    moves.push((next, Vec::new()));
                    position = next;
                }
                _ => break,
            }
        }
    }

    moves
}

/// Whether any piece of `side` can capture, which makes captures mandatory.
pub fn side_has_capture(snapshot: &CheckersSnapshot, side: Player) -> bool {
    snapshot
        .pieces(side)
        .into_iter()
        .any(|(coord, kind)| !capture_targets(snapshot, coord, kind, side).is_empty())
}

/// Legal destinations of the piece on `(x, y)`, with the pieces each one captures.
///
/// Fails when the cell holds no piece of `side`, or when the piece cannot
/// capture while another piece of `side` can.
pub fn find_moves_for_piece(x: usize, y: usize, side: Player, snapshot: &CheckersSnapshot) -> Result<Vec<PieceMove>, GameError> {
    let origin = Coord::new(x, y);
    if !origin.is_within(BOARD_SIZE, BOARD_SIZE) {
        return Err(GameError::invalid_move(format!("({x}, {y}) is outside the board")));
    }

    let Some((owner, kind)) = snapshot.get(origin).piece() else {
        return Err(GameError::invalid_move(format!("there is no piece on {origin}")));
    };
    if owner != side {
        return Err(GameError::invalid_move(format!("the piece on {origin} belongs to the opponent")));
    }

    let captures = capture_moves(snapshot, origin, kind, side);
    if !captures.is_empty() {
        return Ok(captures);
    }

    if side_has_capture(snapshot, side) {
        return Err(GameError::invalid_move("a capture is available and must be played first"));
    }

    Ok(simple_moves(snapshot, origin, kind, side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::board::is_dark;

    const ONE: Cell = Cell::Man(Player::One);
    const TWO: Cell = Cell::Man(Player::Two);

    fn place(pieces: &[(usize, usize, Cell)]) -> CheckersSnapshot {
        pieces.iter().fold(CheckersSnapshot::empty(), |snapshot, &(x, y, cell)| {
            assert!(is_dark(Coord::new(x, y)), "({x}, {y}) is a light cell");
            snapshot.with_cell(Coord::new(x, y), cell)
        })
    }

    fn destinations(moves: &[PieceMove]) -> Vec<Coord> {
        let mut destinations: Vec<Coord> = moves.iter().map(|(to, _)| *to).collect();
        destinations.sort();
        destinations
    }

    #[test]
    fn men_step_forward_only() {
        let snapshot = place(&[(2, 2, ONE)]);

        let moves = find_moves_for_piece(2, 2, Player::One, &snapshot).unwrap();
        assert_eq!(destinations(&moves), vec![Coord::new(1, 3), Coord::new(3, 3)]);
        assert!(moves.iter().all(|(_, captured)| captured.is_empty()));
    }

    #[test]
    fn player_two_moves_down() {
        let snapshot = CheckersSnapshot::starting_position();
        let moves = find_moves_for_piece(1, 5, Player::Two, &snapshot).unwrap();
        assert_eq!(destinations(&moves), vec![Coord::new(0, 4), Coord::new(2, 4)]);
    }

    #[test]
    fn edge_pieces_prune_off_board_directions() {
        let snapshot = CheckersSnapshot::starting_position();
        let moves = find_moves_for_piece(7, 5, Player::Two, &snapshot).unwrap();
        assert_eq!(destinations(&moves), vec![Coord::new(6, 4)]);

        // blocked by its own pieces
        assert!(find_moves_for_piece(0, 0, Player::One, &snapshot).unwrap().is_empty());
    }

    #[test]
    fn kings_slide_in_all_directions() {
        let snapshot = place(&[(0, 0, Cell::King(Player::One))]);

        let moves = find_moves_for_piece(0, 0, Player::One, &snapshot).unwrap();
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().any(|(to, _)| *to == Coord::new(7, 7)));
    }

    #[test]
    fn single_capture() {
        let snapshot = place(&[(3, 1, ONE), (4, 2, TWO)]);

        let moves = find_moves_for_piece(3, 1, Player::One, &snapshot).unwrap();
        assert_eq!(moves, vec![(Coord::new(5, 3), vec![Coord::new(4, 2)])]);
    }

    #[test]
    fn men_capture_backwards() {
        let snapshot = place(&[(4, 4, ONE), (3, 3, TWO)]);

        let moves = find_moves_for_piece(4, 4, Player::One, &snapshot).unwrap();
        assert_eq!(moves, vec![(Coord::new(2, 2), vec![Coord::new(3, 3)])]);
    }

    #[test]
    fn capture_chains_are_maximal() {
        let snapshot = place(&[(3, 1, ONE), (4, 2, TWO), (6, 4, TWO)]);

        let moves = find_moves_for_piece(3, 1, Player::One, &snapshot).unwrap();
        assert_eq!(
            moves,
            vec![(Coord::new(7, 5), vec![Coord::new(4, 2), Coord::new(6, 4)])]
        );
    }

    #[test]
    fn branching_chains_yield_one_move_each() {
        let snapshot = place(&[(3, 1, ONE), (4, 2, TWO), (6, 4, TWO), (4, 4, TWO)]);

        let moves = find_moves_for_piece(3, 1, Player::One, &snapshot).unwrap();
        assert_eq!(destinations(&moves), vec![Coord::new(3, 5), Coord::new(7, 5)]);
        assert!(moves.iter().all(|(_, captured)| captured.len() == 2));
    }

    #[test]
    fn chains_cannot_return_to_the_origin() {
        // a ring of four pieces around c3 would lead a man from c1 back home
        let snapshot = place(&[(2, 0, ONE), (1, 1, TWO), (1, 3, TWO), (3, 1, TWO), (3, 3, TWO)]);

        let moves = find_moves_for_piece(2, 0, Player::One, &snapshot).unwrap();
        assert_eq!(
            moves,
            vec![
                (Coord::new(4, 2), vec![Coord::new(1, 1), Coord::new(1, 3), Coord::new(3, 3)]),
                (Coord::new(0, 2), vec![Coord::new(3, 1), Coord::new(3, 3), Coord::new(1, 3)]),
            ]
        );
    }

    #[test]
    fn cannot_jump_two_adjacent_pieces() {
        let snapshot = place(&[(3, 1, ONE), (4, 2, TWO), (5, 3, TWO)]);

        let moves = find_moves_for_piece(3, 1, Player::One, &snapshot).unwrap();
        assert_eq!(moves, vec![(Coord::new(2, 2), vec![])]);
    }

    #[test]
    fn flying_king_captures_from_a_distance() {
        let snapshot = place(&[(0, 0, Cell::King(Player::One)), (4, 4, TWO)]);

        let moves = find_moves_for_piece(0, 0, Player::One, &snapshot).unwrap();
        assert_eq!(
            destinations(&moves),
            vec![Coord::new(5, 5), Coord::new(6, 6), Coord::new(7, 7)]
        );
        assert!(moves.iter().all(|(_, captured)| captured == &vec![Coord::new(4, 4)]));
    }

    #[test]
    fn forced_capture_blocks_other_pieces() {
        let snapshot = place(&[(3, 1, ONE), (4, 2, TWO), (0, 0, ONE)]);

        assert!(side_has_capture(&snapshot, Player::One));
        assert!(matches!(
            find_moves_for_piece(0, 0, Player::One, &snapshot),
            Err(GameError::InvalidMove(_))
        ));
        assert_eq!(find_moves_for_piece(3, 1, Player::One, &snapshot).unwrap().len(), 1);
    }

    #[test]
    fn empty_and_foreign_cells_are_rejected() {
        let snapshot = CheckersSnapshot::starting_position();
        assert!(find_moves_for_piece(3, 3, Player::One, &snapshot).is_err());
        assert!(find_moves_for_piece(1, 5, Player::One, &snapshot).is_err());
        assert!(find_moves_for_piece(8, 0, Player::One, &snapshot).is_err());
    }

    #[test]
    fn out_of_bounds_probe_is_not_a_capture() {
        // the opponent sits on the edge, there is nowhere to land
        let snapshot = place(&[(6, 6, ONE), (7, 7, TWO)]);

        assert!(!side_has_capture(&snapshot, Player::One));
        let moves = find_moves_for_piece(6, 6, Player::One, &snapshot).unwrap();
        assert_eq!(moves, vec![(Coord::new(5, 7), vec![])]);
    }
}
