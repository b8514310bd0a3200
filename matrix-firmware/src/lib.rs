// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod serial;
pub mod tasks;

// Re-exports von matrix-core
pub use matrix_core::{BoardProfile, LedError, LedMatrix, SmartLedWriter, TiltSensor};
