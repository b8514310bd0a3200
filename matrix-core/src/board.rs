//! Board-Profil: Geometrie und Verdrahtung des LED-Panels
//!
//! Entspricht den Compile-Time-Makros der Board-Konfiguration
//! (Breite, Höhe, Farbreihenfolge, Verdrahtung, Rotation, Spiegelung).
//! Ein `BoardProfile` wird einmal beim Start erzeugt und danach nur gelesen.

/// Fehler bei der Validierung einer Board-Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Breite oder Höhe ist 0
    ZeroDimension,
    /// 90°/270° Rotation ist nur auf quadratischen Panels eine Bijektion
    RotationNeedsSquarePanel,
    /// Panel ist größer als der statisch reservierte Puffer
    CapacityExceeded,
    /// Panel zu klein für die Startposition des Spiels
    TooSmall,
}

/// Verdrahtung der LED-Kette über die Zeilen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wiring {
    /// Jede Zeile läuft von links nach rechts
    #[default]
    Progressive,
    /// Ungerade Zeilen laufen von rechts nach links
    ///
    /// ```text
    /// Zeile 0:  0 →  1 →  2 →  3
    /// Zeile 1:  7 ←  6 ←  5 ←  4
    /// Zeile 2:  8 →  9 → 10 → 11
    /// ```
    Serpentine,
}

impl Wiring {
    /// Name wie in der META-Zeile
    pub const fn as_str(self) -> &'static str {
        match self {
            Wiring::Progressive => "progressive",
            Wiring::Serpentine => "serpentine",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "progressive" => Some(Wiring::Progressive),
            "serpentine" => Some(Wiring::Serpentine),
            _ => None,
        }
    }
}

/// Panel-Rotation im Uhrzeigersinn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Alle vier Rotationen (praktisch für Tests und Kalibrierung)
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Vierteldrehungen (90° und 270°) vertauschen die Achsen
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Reihenfolge der Farbkanäle, wie sie der LED-Controller erwartet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Grb,
    Brg,
    Gbr,
    Rbg,
    Bgr,
}

impl ColorOrder {
    /// Drei-Buchstaben-Kürzel wie in der META-Zeile (z.B. "GRB")
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorOrder::Rgb => "RGB",
            ColorOrder::Grb => "GRB",
            ColorOrder::Brg => "BRG",
            ColorOrder::Gbr => "GBR",
            ColorOrder::Rbg => "RBG",
            ColorOrder::Bgr => "BGR",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "RGB" => Some(ColorOrder::Rgb),
            "GRB" => Some(ColorOrder::Grb),
            "BRG" => Some(ColorOrder::Brg),
            "GBR" => Some(ColorOrder::Gbr),
            "RBG" => Some(ColorOrder::Rbg),
            "BGR" => Some(ColorOrder::Bgr),
            _ => None,
        }
    }
}

/// Rohe Board-Konfiguration (ungeprüft)
///
/// Wird in der Firmware als `const` hingeschrieben und dann mit
/// [`BoardProfile::from_config`] validiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    pub color_order: ColorOrder,
    pub wiring: Wiring,
    pub rotation: Rotation,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl BoardConfig {
    /// Konfiguration ohne Rotation/Spiegelung, progressive Verdrahtung, RGB
    pub const fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            color_order: ColorOrder::Rgb,
            wiring: Wiring::Progressive,
            rotation: Rotation::Deg0,
            flip_x: false,
            flip_y: false,
        }
    }
}

/// Validiertes, unveränderliches Board-Profil
///
/// # Invarianten
/// - `width > 0` und `height > 0`
/// - `width * height <= 255 * 255` passt immer in einen `u16`-Index
/// - bei 90°/270° Rotation ist das Panel quadratisch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoardProfile {
    config: BoardConfig,
}

impl BoardProfile {
    /// Prüft eine rohe Konfiguration
    ///
    /// `const fn`, damit eine ungültige Firmware-Konfiguration schon beim
    /// Kompilieren auffällt.
    pub const fn from_config(config: BoardConfig) -> Result<Self, BoardError> {
        if config.width == 0 || config.height == 0 {
            return Err(BoardError::ZeroDimension);
        }
        if config.rotation.is_quarter_turn() && config.width != config.height {
            return Err(BoardError::RotationNeedsSquarePanel);
        }
        Ok(Self { config })
    }

    /// Profil mit Standardwerten (keine Rotation, progressive Verdrahtung)
    pub const fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        Self::from_config(BoardConfig::new(width, height))
    }

    pub const fn config(&self) -> BoardConfig {
        self.config
    }

    pub const fn width(&self) -> u8 {
        self.config.width
    }

    pub const fn height(&self) -> u8 {
        self.config.height
    }

    pub const fn color_order(&self) -> ColorOrder {
        self.config.color_order
    }

    pub const fn wiring(&self) -> Wiring {
        self.config.wiring
    }

    pub const fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    pub const fn flip_x(&self) -> bool {
        self.config.flip_x
    }

    pub const fn flip_y(&self) -> bool {
        self.config.flip_y
    }

    /// Anzahl der LEDs (`width * height`)
    pub const fn led_count(&self) -> usize {
        self.config.width as usize * self.config.height as usize
    }

    /// Prüft, ob das Panel in einen Puffer mit `capacity` Plätzen passt
    pub const fn ensure_capacity(&self, capacity: usize) -> Result<(), BoardError> {
        if self.led_count() > capacity {
            Err(BoardError::CapacityExceeded)
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for BoardError {
    fn format(&self, fmt: defmt::Formatter) {
        let text = match self {
            BoardError::ZeroDimension => "ZeroDimension",
            BoardError::RotationNeedsSquarePanel => "RotationNeedsSquarePanel",
            BoardError::CapacityExceeded => "CapacityExceeded",
            BoardError::TooSmall => "TooSmall",
        };
        defmt::write!(fmt, "BoardError::{}", text)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BoardProfile {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "BoardProfile {{ {}x{}, wiring: {}, rot: {}, flip: ({}, {}), color: {} }}",
            self.width(),
            self.height(),
            self.wiring().as_str(),
            self.rotation().degrees(),
            self.flip_x(),
            self.flip_y(),
            self.color_order().as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimension() {
        assert_eq!(BoardProfile::new(0, 8), Err(BoardError::ZeroDimension));
        assert_eq!(BoardProfile::new(8, 0), Err(BoardError::ZeroDimension));
    }

    #[test]
    fn test_quarter_turn_needs_square_panel() {
        let mut config = BoardConfig::new(16, 8);
        config.rotation = Rotation::Deg90;
        assert_eq!(
            BoardProfile::from_config(config),
            Err(BoardError::RotationNeedsSquarePanel)
        );

        config.rotation = Rotation::Deg180;
        assert!(BoardProfile::from_config(config).is_ok());
    }

    #[test]
    fn test_largest_panel_fits_u16_index() {
        let board = BoardProfile::new(255, 255).unwrap();
        assert_eq!(board.led_count(), 65025);
    }

    #[test]
    fn test_capacity_check() {
        let board = BoardProfile::new(8, 8).unwrap();
        assert_eq!(board.ensure_capacity(64), Ok(()));
        assert_eq!(board.ensure_capacity(63), Err(BoardError::CapacityExceeded));
    }

    #[test]
    fn test_names_roundtrip() {
        for order in [
            ColorOrder::Rgb,
            ColorOrder::Grb,
            ColorOrder::Brg,
            ColorOrder::Gbr,
            ColorOrder::Rbg,
            ColorOrder::Bgr,
        ] {
            assert_eq!(ColorOrder::parse(order.as_str()), Some(order));
        }
        for rotation in Rotation::ALL {
            assert_eq!(Rotation::from_degrees(rotation.degrees()), Some(rotation));
        }
        assert_eq!(Wiring::parse("serpentine"), Some(Wiring::Serpentine));
        assert_eq!(Rotation::from_degrees(45), None);
    }
}
