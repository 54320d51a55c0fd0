//! Shared vocabulary for the falling-block game.
//!
//! Everything here is plain data with no dependencies, so the simulation core,
//! the input mapping, the settings store and the terminal view can all agree
//! on piece kinds, rotations, color tags and commands without depending on
//! each other.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Row 0 is the top row and
//! pieces spawn there; row 19 is the floor.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame cadence (~60 FPS) |
//! | `DEFAULT_DROP_INTERVAL_MS` | 1000 | Gravity at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Interval shaved off per level |
//! | `MIN_DROP_INTERVAL_MS` | 100 | Gravity floor |
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{GameCommand, PieceKind, Rotation};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//! ```

/// Default board width in cells.
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells.
pub const BOARD_HEIGHT: u8 = 20;

/// Host frame cadence in milliseconds.
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1.
pub const DEFAULT_DROP_INTERVAL_MS: u32 = 1000;

/// Amount the gravity interval shrinks per level gained.
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Gravity never gets faster than this.
pub const MIN_DROP_INTERVAL_MS: u32 = 100;

/// Score needed per level (`level = score / threshold + 1`).
pub const LEVEL_SCORE_THRESHOLD: u32 = 1000;

/// Points for clearing 0..=4 lines at once, multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Every piece kind covers exactly this many cells.
pub const MINOS_PER_PIECE: usize = 4;

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Parse a piece kind from its letter (case-insensitive).
    ///
    /// ```
    /// use falling_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Upper-case letter, as shown in the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Quarter-turn orientation of a piece.
///
/// The cycle goes North → East → South → West → North; each step is a 90°
/// clockwise turn of the base matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°).
    ///
    /// ```
    /// use falling_blocks_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from North (0..=3).
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Orientation after `turns` clockwise quarter turns from North.
    ///
    /// ```
    /// use falling_blocks_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_quarter_turns(5), Rotation::East);
    /// ```
    pub fn from_quarter_turns(turns: u32) -> Self {
        match turns % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Opaque color identifier carried by shapes and locked cells.
///
/// Resolving a tag into real color data is the renderer's job (see the
/// palette in the settings crate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorTag {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

impl ColorTag {
    pub const ALL: [ColorTag; 7] = [
        ColorTag::Cyan,
        ColorTag::Blue,
        ColorTag::Orange,
        ColorTag::Yellow,
        ColorTag::Green,
        ColorTag::Purple,
        ColorTag::Red,
    ];
}

/// A board cell: `None` when empty, otherwise the color tag of the piece
/// that locked there.
pub type Cell = Option<ColorTag>;

/// Commands accepted by the engine, produced by keyboard, buttons or swipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// Move one column left.
    MoveLeft,
    /// Move one column right.
    MoveRight,
    /// Move one row down; locks the piece if it is resting.
    SoftDrop,
    /// Rotate 90° clockwise (rejected when blocked, no wall kicks).
    Rotate,
    /// Drop to the lowest legal row and lock.
    HardDrop,
    TogglePause,
    /// Reset and spawn the first piece.
    Start,
}

impl GameCommand {
    /// Parse a command from its camelCase name (case-insensitive).
    ///
    /// ```
    /// use falling_blocks_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("PAUSE"), Some(GameCommand::TogglePause));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "rotate" => Some(GameCommand::Rotate),
            "harddrop" => Some(GameCommand::HardDrop),
            "pause" | "togglepause" => Some(GameCommand::TogglePause),
            "start" | "restart" => Some(GameCommand::Start),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::Rotate => "rotate",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::TogglePause => "pause",
            GameCommand::Start => "start",
        }
    }
}
