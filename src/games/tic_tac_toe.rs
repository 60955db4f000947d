use crate::coords::{parse_squares, Coord};
use crate::error::GameError;
use crate::{Board, GameState, Player};

/// An n-in-a-row placement game on a square board.
///
/// Player one places `x` marks and player two `o` marks. The default is
/// classic tic-tac-toe: 3×3 with a winning length of 3.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TicTacToe {
    size: usize,
    win_length: usize,
    lines: Vec<Vec<Coord>>,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TicTacToeSnapshot {
    size: usize,
    cells: Vec<Option<Player>>,
}

impl Default for TicTacToe {
    fn default() -> Self {
        TicTacToe::new(3, 3)
    }
}

impl TicTacToe {
    pub fn new(size: usize, win_length: usize) -> Self {
        assert!(size > 0 && size <= 26, "board size must be between 1 and 26");
        assert!(
            win_length > 0 && win_length <= size,
            "winning length must fit on the board"
        );
        TicTacToe { size, win_length, lines: lines(size, win_length) }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    fn run_owner(&self, snapshot: &TicTacToeSnapshot, line: &[Coord]) -> Option<Player> {
        let mut run = 0;
        let mut owner = None;

        for &coord in line {
            let cell = snapshot.get(coord);
            if cell.is_some() && cell == owner {
                run += 1;
            } else {
                owner = cell;
                run = usize::from(cell.is_some());
            }

            if run >= self.win_length {
                return owner;
            }
        }

        None
    }
}

/// All lines a run can lie on: rows, columns, then both diagonal
/// orientations at every offset.
fn lines(size: usize, win_length: usize) -> Vec<Vec<Coord>> {
    let n = size;
    let mut lines: Vec<Vec<Coord>> = Vec::with_capacity(6 * n);

    for y in 0..n {
        lines.push((0..n).map(|x| Coord::new(x, y)).collect());
    }
    for x in 0..n {
        lines.push((0..n).map(|y| Coord::new(x, y)).collect());
    }

    // diagonals where x - y is constant
    for start in 0..(2 * n - 1) {
        let (x0, y0) = if start < n { (0, n - 1 - start) } else { (start - n + 1, 0) };
        lines.push(
            (0..n)
                .map(|i| (x0 + i, y0 + i))
                .take_while(|&(x, y)| x < n && y < n)
                .map(|(x, y)| Coord::new(x, y))
                .collect(),
        );
    }

    // diagonals where x + y is constant
    for sum in 0..(2 * n - 1) {
        lines.push(
            (0..n)
                .filter(|&x| sum >= x && sum - x < n)
                .map(|x| Coord::new(x, sum - x))
                .collect(),
        );
    }

    lines.retain(|line| line.len() >= win_length);
    lines
}

impl TicTacToeSnapshot {
    pub fn empty(size: usize) -> Self {
        TicTacToeSnapshot { size, cells: vec![None; size * size] }
    }

    /// Build a snapshot from rows in storage order, `x` for player one,
    /// `o` for player two and `-` for empty.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GameError> {
        let size = rows.len();
        let mut snapshot = TicTacToeSnapshot::empty(size);

        for (y, row) in rows.iter().enumerate() {
            let signs: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if signs.len() != size {
                return Err(GameError::invalid_position(format!("row {y} does not have {size} cells")));
            }
            for (x, sign) in signs.into_iter().enumerate() {
                snapshot.cells[y * size + x] = match sign {
                    'x' => Some(Player::One),
                    'o' => Some(Player::Two),
                    '-' => None,
                    other => return Err(GameError::invalid_position(format!("unknown sign '{other}'"))),
                };
            }
        }

        Ok(snapshot)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, coord: Coord) -> Option<Player> {
        self.cells[coord.y * self.size + coord.x]
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl Board for TicTacToe {
    type Snapshot = TicTacToeSnapshot;
    type Move = Coord;
    type Cell = Option<Player>;

    fn initialize(&self) -> TicTacToeSnapshot {
        TicTacToeSnapshot::empty(self.size)
    }

    fn legal_moves(&self, _: Player, snapshot: &TicTacToeSnapshot) -> Vec<Coord> {
        (0..snapshot.size)
            .flat_map(|y| (0..snapshot.size).map(move |x| Coord::new(x, y)))
            .filter(|&coord| snapshot.get(coord).is_none())
            .collect()
    }

    fn apply_move(&self, side: Player, mv: &Coord, snapshot: &TicTacToeSnapshot) -> Result<TicTacToeSnapshot, GameError> {
        if !mv.is_within(snapshot.size, snapshot.size) {
            return Err(GameError::invalid_move(format!("{mv} is outside the board")));
        }
        if snapshot.get(*mv).is_some() {
            return Err(GameError::invalid_move(format!("the field {mv} is not empty")));
        }

        let mut next = snapshot.clone();
        next.cells[mv.y * snapshot.size + mv.x] = Some(side);
        Ok(next)
    }

    fn terminal_state(&self, _: Player, snapshot: &TicTacToeSnapshot) -> GameState {
        if let Some(winner) = self.lines.iter().find_map(|line| self.run_owner(snapshot, line)) {
            return GameState::Winner(winner);
        }

        if snapshot.is_full() {
            GameState::Draw
        } else {
            GameState::Ongoing
        }
    }

    fn parse_move(&self, notation: &str) -> Result<Coord, GameError> {
        match parse_squares(notation)?.as_slice() {
            [coord] if coord.is_within(self.size, self.size) => Ok(*coord),
            [coord] => Err(GameError::invalid_move(format!("{coord} is outside the board"))),
            _ => Err(GameError::invalid_move(format!("'{notation}' is not a single square"))),
        }
    }

    fn rows(&self, snapshot: &TicTacToeSnapshot) -> Vec<Vec<Option<Player>>> {
        snapshot.cells.chunks(snapshot.size).map(<[_]>::to_vec).collect()
    }
}
