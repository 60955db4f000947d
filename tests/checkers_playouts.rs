use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use board_ai::games::checkers::board::{Cell, CheckersSnapshot, PieceKind};
use board_ai::games::checkers::movegen::{capture_moves, side_has_capture};
use board_ai::games::checkers::{Checkers, CheckersMove};
use board_ai::{Board, GameState, Player};

fn kings(snapshot: &CheckersSnapshot, side: Player) -> usize {
    snapshot
        .pieces(side)
        .iter()
        .filter(|(_, kind)| *kind == PieceKind::King)
        .count()
}

fn check_move(board: &Checkers, side: Player, snapshot: &CheckersSnapshot, mv: &CheckersMove) -> CheckersSnapshot {
    assert_ne!(mv.from, mv.to, "{mv} ends where it started");
    let moving = snapshot.get(mv.from);
    assert_eq!(moving.owner(), Some(side), "{mv} does not move a piece of {side:?}");
    assert_eq!(snapshot.get(mv.to), Cell::EmptyDark, "{mv} lands on an occupied cell");

    let next = board.apply_move(side, mv, snapshot).unwrap();

    assert_eq!(next.get(mv.from), Cell::EmptyDark);
    assert_eq!(next.get(mv.to).owner(), Some(side));
    assert_eq!(next.pieces(side).len(), snapshot.pieces(side).len());
    assert_eq!(
        next.pieces(side.other()).len(),
        snapshot.pieces(side.other()).len() - mv.captures.len()
    );
    for captured in &mv.captures {
        assert_eq!(next.get(*captured), Cell::EmptyDark);
    }

    assert!(kings(&next, side) >= kings(snapshot, side), "a king was demoted by {mv}");
    assert_eq!(kings(&next, side.other()), kings(snapshot, side.other()) - captured_kings(snapshot, mv));

    if mv.is_capture() {
        assert_eq!(next.moves_without_capture(), 0);
        // a chain only ends once the piece has nothing left to take; its
        // origin stays blocked while the chain is played
        if let (Some((_, before)), Some((_, after))) = (moving.piece(), next.get(mv.to).piece()) {
            if before == after {
                let during_chain = next.with_cell(mv.from, moving);
                assert!(capture_moves(&during_chain, mv.to, after, side).is_empty(), "{mv} stops a chain early");
            }
        }
    } else {
        assert_eq!(next.moves_without_capture(), snapshot.moves_without_capture() + 1);
    }

    next
}

fn captured_kings(snapshot: &CheckersSnapshot, mv: &CheckersMove) -> usize {
    mv.captures
        .iter()
        .filter(|coord| matches!(snapshot.get(**coord), Cell::King(_)))
        .count()
}

#[test]
fn random_playouts_keep_the_rules() {
    let board = Checkers::default();

    for seed in 0..12 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut snapshot = board.initialize();
        let mut side = Player::One;

        // captures reset the draw counter at most 24 times, so this always ends
        for _ in 0..1500 {
            if board.terminal_state(side, &snapshot).is_terminal() {
                break;
            }

            let moves = board.legal_moves(side, &snapshot);
            assert!(!moves.is_empty());
            if side_has_capture(&snapshot, side) {
                assert!(moves.iter().all(CheckersMove::is_capture), "a plain move is offered while a capture exists");
            } else {
                assert!(moves.iter().all(|mv| !mv.is_capture()));
            }

            let mv = moves.choose(&mut rng).unwrap();
            snapshot = check_move(&board, side, &snapshot, mv);
            side = side.other();
        }

        assert!(board.terminal_state(side, &snapshot).is_terminal(), "seed {seed} did not finish");
    }
}

#[test]
fn plain_moves_are_refused_while_a_capture_exists() {
    let board = Checkers::default();
    let snapshot = CheckersSnapshot::from_rows(&[
        "._._._._",
        "_._._._.",
        "._._._._",
        "_._._._.",
        "._.x._._",
        "_.o._.o.",
        "._._._._",
        "_._._._.",
    ])
    .unwrap();

    let plain = board.parse_move("g3h4").unwrap();
    assert!(board.apply_move(Player::One, &plain, &snapshot).is_err());

    let capture = board.parse_move("c3e5").unwrap();
    let next = board.apply_move(Player::One, &capture, &snapshot).unwrap();
    assert!(next.pieces(Player::Two).is_empty());
    assert_eq!(board.terminal_state(Player::Two, &next), GameState::Winner(Player::One));
}

#[test]
fn surrounded_pieces_never_capture_back_onto_their_origin() {
    let board = Checkers::default();
    let man = CheckersSnapshot::from_rows(&[
        "._._._._",
        "_._._._.",
        "._._._._",
        "_._._._.",
        ".x.x._._",
        "_._._._.",
        ".x.x._._",
        "_.o._._.",
    ])
    .unwrap();
    let king = CheckersSnapshot::from_rows(&[
        "._._._._",
        "_.x.x.x.",
        "._._._._",
        "_.x.x.x.",
        "._._._._",
        "_.x.x.x.",
        "._._._._",
        "O._._._.",
    ])
    .unwrap();

    for snapshot in [man, king] {
        let moves = board.legal_moves(Player::One, &snapshot);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert!(mv.is_capture());
            check_move(&board, Player::One, &snapshot, mv);
        }
    }
}

#[test]
fn men_are_crowned_on_the_far_row() {
    let board = Checkers::default();
    let snapshot = CheckersSnapshot::from_rows(&[
        "._._._._",
        "_._._.o.",
        "._._._._",
        "_._._._.",
        "._._._._",
        "_._._._.",
        "._._._._",
        "x._._._.",
    ])
    .unwrap();

    let next = board.apply_move(Player::One, &board.parse_move("g7h8").unwrap(), &snapshot).unwrap();
    assert_eq!(next.get(board_ai::Coord::new(7, 7)), Cell::King(Player::One));
}
