pub mod checkers;
pub mod tic_tac_toe;
