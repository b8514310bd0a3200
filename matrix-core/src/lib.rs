//! Matrix Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Board-Profil, Koordinaten-Mapping, das serielle
//! Frame-Protokoll und die Logik der drei Demos (Snake, WiFi-Signal,
//! Falling Stars) als Pure Functions bzw. Zustandsautomaten.

#![no_std]

pub mod board;
pub mod color;
pub mod frame;
pub mod mapper;
pub mod matrix;
pub mod particles;
pub mod signal;
pub mod snake;
pub mod traits;

// Re-exports für einfachen Zugriff
pub use board::{BoardConfig, BoardError, BoardProfile, ColorOrder, Rotation, Wiring};
pub use frame::{MetaError, parse_meta, write_frame, write_meta};
pub use matrix::LedMatrix;
pub use particles::ParticleField;
pub use signal::{AccessPoint, Indicator, SignalTracker, TrackerState, TrackerUpdate};
pub use snake::{Cell, Direction, SnakeGame, TickOutcome};
pub use traits::{ImuError, LedError, SmartLedWriter, Tilt, TiltSensor};
