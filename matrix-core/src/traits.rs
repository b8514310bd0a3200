//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use rgb::RGB8;

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Fehler-Typ für den Lagesensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError {
    /// I2C-Transfer fehlgeschlagen
    Bus,
    /// WHO_AM_I liefert eine unerwartete Kennung
    UnknownDevice(u8),
}

/// Beschleunigung in g entlang der Panel-Achsen
///
/// `x` zeigt nach rechts, `y` nach unten (gleiche Richtung wie die
/// logischen Matrix-Koordinaten).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
}

/// Trait für SmartLED Hardware-Zugriff
///
/// Abstrahiert den Zugriff auf ein LED-Panel (WS2812/Neopixel).
///
/// # Implementierungen
/// - **Production:** RmtLedWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockLedWriter (in-memory Mock)
pub trait SmartLedWriter {
    /// Schreibt einen kompletten Frame in physikalischer Reihenfolge
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), LedError>;
}

/// Trait für den Lagesensor (Beschleunigungsmesser)
///
/// # Implementierungen
/// - **Production:** Qmi8658 (I2C)
/// - **Testing:** MockTiltSensor
pub trait TiltSensor {
    fn read_tilt(&mut self) -> Result<Tilt, ImuError>;
}
