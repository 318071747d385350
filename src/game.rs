use std::error::Error;
use std::fmt;

/// Contents of a single board cell. The set is closed: every cell is exactly
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Floor,
    Target,
    Box,
    BoxOnTarget,
    Player,
    PlayerOnTarget,
}

/// Something that can occupy a walkable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Player,
    Box,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    pub fn is_box(self) -> bool {
        matches!(self, Cell::Box | Cell::BoxOnTarget)
    }

    pub fn is_player(self) -> bool {
        matches!(self, Cell::Player | Cell::PlayerOnTarget)
    }

    /// True if the underlying cell is a target, whatever stands on it.
    pub fn is_target(self) -> bool {
        matches!(self, Cell::Target | Cell::BoxOnTarget | Cell::PlayerOnTarget)
    }

    /// True for empty floor or an empty target.
    pub fn is_free(self) -> bool {
        matches!(self, Cell::Floor | Cell::Target)
    }

    /// The cell left behind once its occupant walks or is pushed away.
    fn vacated(self) -> Cell {
        if self.is_target() {
            Cell::Target
        } else {
            Cell::Floor
        }
    }

    /// The cell produced by placing `entity` on this (free) cell.
    fn occupied_by(self, entity: Entity) -> Cell {
        match (entity, self.is_target()) {
            (Entity::Player, false) => Cell::Player,
            (Entity::Player, true) => Cell::PlayerOnTarget,
            (Entity::Box, false) => Cell::Box,
            (Entity::Box, true) => Cell::BoxOnTarget,
        }
    }

    fn from_char(ch: char) -> Option<Cell> {
        match ch {
            '#' | '■' => Some(Cell::Wall),
            ' ' | '-' | '_' | '□' => Some(Cell::Floor),
            '.' | 'T' => Some(Cell::Target),
            '$' => Some(Cell::Box),
            '*' => Some(Cell::BoxOnTarget),
            '@' => Some(Cell::Player),
            '+' => Some(Cell::PlayerOnTarget),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Floor => ' ',
            Cell::Target => '.',
            Cell::Box => '$',
            Cell::BoxOnTarget => '*',
            Cell::Player => '@',
            Cell::PlayerOnTarget => '+',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Expansion order. Successors are generated in this order, which doubles as
/// the tie-break between children of equal cost.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// (row, col) offset.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }
}

/// Full direction name, honouring width and alignment flags.
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn manhattan(&self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Reasons a board is rejected before any search is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Empty,
    InvalidSymbol { symbol: char, row: usize, col: usize },
    NotRectangular { row: usize, len: usize, expected: usize },
    NoPlayer,
    MultiplePlayers,
    NoBoxes,
    BoxTargetMismatch { boxes: usize, targets: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Empty => write!(f, "Empty board"),
            BoardError::InvalidSymbol { symbol, row, col } => {
                write!(f, "Invalid character '{}' at row {}, col {}", symbol, row, col)
            }
            BoardError::NotRectangular { row, len, expected } => write!(
                f,
                "Row {} has {} cells, expected {}",
                row, len, expected
            ),
            BoardError::NoPlayer => write!(f, "No player found on board"),
            BoardError::MultiplePlayers => write!(f, "Multiple players found"),
            BoardError::NoBoxes => write!(f, "Board contains no boxes"),
            BoardError::BoxTargetMismatch { boxes, targets } => write!(
                f,
                "Target count ({}) does not match box count ({})",
                targets, boxes
            ),
        }
    }
}

impl Error for BoardError {}

/// A rectangular snapshot of every cell. Cloning produces a fully independent
/// copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Board {
    /// Parse a Sokoban board from text format.
    ///
    /// Characters:
    /// - `#` = Wall
    /// - ` `, `-` or `_` = Floor
    /// - `.` = Target
    /// - `$` = Box
    /// - `*` = Box on target
    /// - `@` = Player
    /// - `+` = Player on target
    ///
    /// `■`, `□` and `T` are accepted as wall, floor and target. Short lines
    /// are padded with floor up to the widest line.
    pub fn from_text(text: &str) -> Result<Self, BoardError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.is_empty() {
            return Err(BoardError::Empty);
        }

        let cols = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        if cols == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let mut len = 0;
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(BoardError::InvalidSymbol {
                    symbol: ch,
                    row,
                    col,
                })?;
                cells.push(cell);
                len += 1;
            }
            cells.extend(std::iter::repeat_n(Cell::Floor, cols - len));
        }

        Self::validated(cells, lines.len(), cols)
    }

    /// Build a board from already classified rows. Rows must all have the
    /// same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let cols = rows.first().map(|row| row.len()).unwrap_or(0);
        if cols == 0 {
            return Err(BoardError::Empty);
        }
        if let Some((row, len)) = rows
            .iter()
            .map(|r| r.len())
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(BoardError::NotRectangular {
                row,
                len,
                expected: cols,
            });
        }

        let height = rows.len();
        Self::validated(rows.into_iter().flatten().collect(), height, cols)
    }

    fn validated(cells: Vec<Cell>, rows: usize, cols: usize) -> Result<Self, BoardError> {
        let players = cells.iter().filter(|c| c.is_player()).count();
        match players {
            0 => return Err(BoardError::NoPlayer),
            1 => {}
            _ => return Err(BoardError::MultiplePlayers),
        }

        let boxes = cells.iter().filter(|c| c.is_box()).count();
        let targets = cells.iter().filter(|c| c.is_target()).count();
        if boxes == 0 {
            return Err(BoardError::NoBoxes);
        }
        if boxes != targets {
            return Err(BoardError::BoxTargetMismatch { boxes, targets });
        }

        Ok(Board { cells, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row * self.cols + pos.col]
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row * self.cols + pos.col] = cell;
    }

    /// Step from `pos` in the given direction.
    /// Returns None if the step would leave the board.
    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        if row < self.rows && col < self.cols {
            Some(Position::new(row, col))
        } else {
            None
        }
    }

    /// True if the neighbour in `dir` is a wall or lies off the board.
    pub fn blocked(&self, pos: Position, dir: Direction) -> bool {
        self.step(pos, dir).is_none_or(|next| self.get(next).is_wall())
    }

    /// Iterate all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    pub fn player_pos(&self) -> Option<Position> {
        self.positions().find(|&pos| self.get(pos).is_player())
    }

    /// Box positions (on target or not) in row-major order.
    pub fn box_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&pos| self.get(pos).is_box())
    }

    /// Target positions in row-major order, occupied or not.
    pub fn target_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&pos| self.get(pos).is_target())
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Goal test: no box remains off target.
    pub fn is_solved(&self) -> bool {
        !self.cells.contains(&Cell::Box)
    }

    /// Move `entity` from `from` to `to`. The vacated cell keeps its target
    /// underneath and the destination becomes the on-target variant when it
    /// is a target. The caller guarantees `to` is free.
    pub fn move_entity(&mut self, from: Position, to: Position, entity: Entity) {
        let source = self.get(from);
        let dest = self.get(to);
        debug_assert!(dest.is_free(), "cannot move onto occupied cell {}", to);
        self.set(from, source.vacated());
        self.set(to, dest.occupied_by(entity));
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| self.get(Position::new(row, col)).to_char())
                .collect();
            // Trim trailing spaces to match original input format
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
