//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used by the engine and by any
//! front end reading engine state. All types are plain data with no behavior beyond
//! small conversions, so they can be shared between the rules crate, the host driver,
//! and whatever renders the board.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (`BOARD_WIDTH / 2 - 1`, 0) = (4, 0)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TICK_MS` | 800 | Gravity interval at level 1 |
//! | `SPEED_DECAY` | 0.8 | Per-level multiplier on the interval |
//! | `TICK_START_DELAY_MS` | 200 | Delay before the first tick of a session |
//!
//! # Examples
//!
//! ```
//! use tetris_engine_types::{GameState, PieceKind, Rotation, Score, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::from_index(5), Rotation::R1);
//! assert_eq!(Score::default().level, 1);
//! assert_eq!(GameState::default(), GameState::Ready);
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 1, in milliseconds
pub const INITIAL_TICK_MS: u64 = 800;

/// Multiplier applied to the tick interval for every level above 1
pub const SPEED_DECAY: f64 = 0.8;

/// Delay before a freshly started session receives its first tick
pub const TICK_START_DELAY_MS: u64 = 200;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing 1..=4 lines at once (index 0 unused)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Alpha used for ghost cells (0.3 of full opacity)
pub const GHOST_ALPHA: u8 = 77;

/// Colors with an alpha at or below this value are ghost markers
pub const GHOST_ALPHA_THRESHOLD: u8 = 127;

/// The seven tetromino piece kinds
///
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in declaration order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_engine_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display color of this kind (opaque)
    pub fn color(&self) -> Rgba {
        match self {
            PieceKind::I => Rgba::from_argb(0xFF00F0F0),
            PieceKind::O => Rgba::from_argb(0xFFF0F000),
            PieceKind::T => Rgba::from_argb(0xFFA000F0),
            PieceKind::S => Rgba::from_argb(0xFF00F000),
            PieceKind::Z => Rgba::from_argb(0xFFF00000),
            PieceKind::J => Rgba::from_argb(0xFF0000F0),
            PieceKind::L => Rgba::from_argb(0xFFF0A000),
        }
    }
}

/// Rotation states, cycling clockwise with period 4
///
/// `R0` is the spawn orientation. The cycle is R0 → R1 → R2 → R3 → R0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    /// Rotate clockwise
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_engine_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotate_cw(), Rotation::R1);
    /// assert_eq!(Rotation::R3.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::R0 => Rotation::R1,
            Rotation::R1 => Rotation::R2,
            Rotation::R2 => Rotation::R3,
            Rotation::R3 => Rotation::R0,
        }
    }

    /// Rotation index in 0..4
    pub fn index(&self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    /// Build from any index, reduced modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::R0,
            1 => Rotation::R1,
            2 => Rotation::R2,
            _ => Rotation::R3,
        }
    }
}

/// Board-relative position; `x` grows rightward, `y` grows downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Offset by a delta
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black; the color of an empty cell
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a `0xAARRGGBB` value
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha as a fraction in 0.0..=1.0
    pub fn alpha_f32(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Whether this color falls under the ghost translucency threshold
    pub fn is_translucent(&self) -> bool {
        self.a <= GHOST_ALPHA_THRESHOLD
    }
}

/// A locked board cell
///
/// Immutable value; the default is unfilled and transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub filled: bool,
    pub color: Rgba,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        filled: false,
        color: Rgba::TRANSPARENT,
    };

    pub const fn filled(color: Rgba) -> Self {
        Self {
            filled: true,
            color,
        }
    }
}

/// Engine lifecycle state; the sole authority for which commands are accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    #[default]
    Ready,
    Playing,
    Paused,
    GameOver,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Ready => "READY",
            GameState::Playing => "PLAYING",
            GameState::Paused => "PAUSED",
            GameState::GameOver => "GAME_OVER",
        }
    }
}

/// Score tracker values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub lines: u32,
    pub score: u32,
    pub level: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            lines: 0,
            score: 0,
            level: 1,
        }
    }
}
