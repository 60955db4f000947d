use crate::coords::Coord;
use crate::error::GameError;
use crate::Player;

pub const BOARD_SIZE: usize = 8;

/// Rows of men each side starts with.
const STARTING_ROWS: usize = 3;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Man,
    King,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    EmptyLight,
    EmptyDark,
    Man(Player),
    King(Player),
}

impl Cell {
    pub fn piece(self) -> Option<(Player, PieceKind)> {
        match self {
            Cell::Man(owner) => Some((owner, PieceKind::Man)),
            Cell::King(owner) => Some((owner, PieceKind::King)),
            Cell::EmptyLight | Cell::EmptyDark => None,
        }
    }

    pub fn owner(self) -> Option<Player> {
        self.piece().map(|(owner, _)| owner)
    }

    pub fn sign(self) -> char {
        match self {
            Cell::Man(Player::One) => 'o',
            Cell::King(Player::One) => 'O',
            Cell::Man(Player::Two) => 'x',
            Cell::King(Player::Two) => 'X',
            Cell::EmptyLight => '.',
            Cell::EmptyDark => '_',
        }
    }

    fn from_sign(sign: char) -> Option<Cell> {
        match sign {
            'o' => Some(Cell::Man(Player::One)),
            'O' => Some(Cell::King(Player::One)),
            'x' => Some(Cell::Man(Player::Two)),
            'X' => Some(Cell::King(Player::Two)),
            '.' => Some(Cell::EmptyLight),
            '_' => Some(Cell::EmptyDark),
            _ => None,
        }
    }
}

pub fn is_dark(coord: Coord) -> bool {
    coord.x % 2 == coord.y % 2
}

/// The row on which a man of `owner` gets crowned.
pub fn promotion_row(owner: Player) -> usize {
    match owner {
        Player::One => BOARD_SIZE - 1,
        Player::Two => 0,
    }
}

/// An immutable checkers position: the grid plus the number of moves played
/// since the last capture.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct CheckersSnapshot {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    moves_without_capture: u32,
}

impl CheckersSnapshot {
    /// A board without any pieces.
    pub fn empty() -> Self {
        let mut cells = [[Cell::EmptyLight; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if is_dark(Coord::new(x, y)) {
                    *cell = Cell::EmptyDark;
                }
            }
        }

        CheckersSnapshot { cells, moves_without_capture: 0 }
    }

    /// Player one fills the dark cells of the bottom three rows, player two
    /// those of the top three.
    pub fn starting_position() -> Self {
        let mut snapshot = CheckersSnapshot::empty();
        for y in 0..BOARD_SIZE {
            let owner = if y < STARTING_ROWS {
                Player::One
            } else if y >= BOARD_SIZE - STARTING_ROWS {
                Player::Two
            } else {
                continue;
            };
            for x in 0..BOARD_SIZE {
                if is_dark(Coord::new(x, y)) {
                    snapshot.cells[y][x] = Cell::Man(owner);
                }
            }
        }
        snapshot
    }

    /// Parse a position from eight rows of cell signs, top row (row 8) first.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GameError> {
        if rows.len() != BOARD_SIZE {
            return Err(GameError::invalid_position(format!("expected {BOARD_SIZE} rows")));
        }

        let mut snapshot = CheckersSnapshot::empty();
        for (i, row) in rows.iter().enumerate() {
            let y = BOARD_SIZE - 1 - i;
            let signs: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if signs.len() != BOARD_SIZE {
                return Err(GameError::invalid_position(format!("row {} does not have {BOARD_SIZE} cells", y + 1)));
            }

            for (x, sign) in signs.into_iter().enumerate() {
                let coord = Coord::new(x, y);
                let cell = Cell::from_sign(sign)
                    .ok_or_else(|| GameError::invalid_position(format!("unknown sign '{sign}'")))?;
                // empty signs are only cosmetic, parity decides the cell colour
                if cell.piece().is_some() {
                    if !is_dark(coord) {
                        return Err(GameError::invalid_position(format!("piece on light cell {coord}")));
                    }
                    snapshot.cells[y][x] = cell;
                }
            }
        }

        Ok(snapshot)
    }

    pub fn with_moves_without_capture(mut self, count: u32) -> Self {
        self.moves_without_capture = count;
        self
    }

    pub fn moves_without_capture(&self) -> u32 {
        self.moves_without_capture
    }

    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.y][coord.x]
    }

    /// `None` when `(x, y)` is off the board.
    pub fn try_get(&self, x: isize, y: isize) -> Option<Cell> {
        if x < 0 || y < 0 || x >= BOARD_SIZE as isize || y >= BOARD_SIZE as isize {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// A copy of this board with `coord` cleared.
    pub fn without_piece(&self, coord: Coord) -> Self {
        let mut next = self.clone();
        next.cells[coord.y][coord.x] = Cell::EmptyDark;
        next
    }

    /// A copy of this board with `cell` placed on `coord`.
    pub fn with_cell(&self, coord: Coord, cell: Cell) -> Self {
        let mut next = self.clone();
        next.cells[coord.y][coord.x] = cell;
        next
    }

    pub fn pieces(&self, owner: Player) -> Vec<(Coord, PieceKind)> {
        let mut pieces = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some((cell_owner, kind)) = cell.piece() {
                    if cell_owner == owner {
                        pieces.push((Coord::new(x, y), kind));
                    }
                }
            }
        }
        pieces
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    pub(super) fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.y][coord.x] = cell;
    }

    pub(super) fn set_moves_without_capture(&mut self, count: u32) {
        self.moves_without_capture = count;
    }
}
