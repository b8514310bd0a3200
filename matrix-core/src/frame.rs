//! Serielles Frame-Protokoll für externe Visualisierung
//!
//! Zwei Zeilentypen:
//!
//! ```text
//! META:W=8,H=8,ORDER=xy,WIRING=serpentine,ROT=0,FLIPX=0,FLIPY=0,COLOR=GRB
//! FRAME:000000,00FF00,...,FF0000
//! ```
//!
//! Die META-Zeile wird einmal beim Start gesendet, danach folgt eine
//! FRAME-Zeile pro Bild. Frames enthalten `width * height` Tokens in
//! logischer Zeilen-Reihenfolge, unabhängig von Verdrahtung und Rotation.

use core::fmt::{self, Write};

use crate::board::{BoardConfig, BoardError, BoardProfile, ColorOrder, Rotation, Wiring};
use crate::matrix::LedMatrix;

/// Präfix der Meta-Zeile
pub const META_PREFIX: &str = "META:";

/// Präfix der Frame-Zeile
pub const FRAME_PREFIX: &str = "FRAME:";

/// Fehler beim Parsen einer META-Zeile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaError {
    /// Zeile beginnt nicht mit `META:`
    MissingPrefix,
    /// Pflichtfeld fehlt (W oder H)
    MissingField(&'static str),
    /// Feld vorhanden, Wert aber ungültig
    InvalidValue(&'static str),
    /// Werte gelesen, Board-Konfiguration aber ungültig
    Board(BoardError),
}

impl From<BoardError> for MetaError {
    fn from(error: BoardError) -> Self {
        MetaError::Board(error)
    }
}

/// Schreibt die META-Zeile (inkl. Zeilenumbruch)
pub fn write_meta<W: Write>(board: &BoardProfile, out: &mut W) -> fmt::Result {
    writeln!(
        out,
        "{}W={},H={},ORDER=xy,WIRING={},ROT={},FLIPX={},FLIPY={},COLOR={}",
        META_PREFIX,
        board.width(),
        board.height(),
        board.wiring().as_str(),
        board.rotation().degrees(),
        u8::from(board.flip_x()),
        u8::from(board.flip_y()),
        board.color_order().as_str()
    )
}

/// Schreibt eine FRAME-Zeile (inkl. Zeilenumbruch)
///
/// Tokens sind `RRGGBB` in Großbuchstaben, durch Kommas getrennt.
pub fn write_frame<W: Write, const N: usize>(matrix: &LedMatrix<N>, out: &mut W) -> fmt::Result {
    out.write_str(FRAME_PREFIX)?;
    for (i, (x, y)) in matrix.board().cells().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        let color = matrix.get(x, y);
        write!(out, "{:02X}{:02X}{:02X}", color.r, color.g, color.b)?;
    }
    out.write_char('\n')
}

/// Liest eine META-Zeile zurück in ein Board-Profil
///
/// Unbekannte Schlüssel werden ignoriert, optionale Felder fallen auf
/// die Standardwerte von [`BoardConfig::new`] zurück.
pub fn parse_meta(line: &str) -> Result<BoardProfile, MetaError> {
    let body = line
        .trim_end()
        .strip_prefix(META_PREFIX)
        .ok_or(MetaError::MissingPrefix)?;

    let mut width = None;
    let mut height = None;
    let mut config = BoardConfig::new(1, 1);

    for field in body.split(',') {
        let Some((key, value)) = field.split_once('=') else {
            continue;
        };
        match key {
            "W" => width = Some(value.parse::<u8>().map_err(|_| MetaError::InvalidValue("W"))?),
            "H" => height = Some(value.parse::<u8>().map_err(|_| MetaError::InvalidValue("H"))?),
            "ORDER" if value != "xy" => return Err(MetaError::InvalidValue("ORDER")),
            "WIRING" => {
                config.wiring = Wiring::parse(value).ok_or(MetaError::InvalidValue("WIRING"))?;
            }
            "ROT" => {
                config.rotation = value
                    .parse::<u16>()
                    .ok()
                    .and_then(Rotation::from_degrees)
                    .ok_or(MetaError::InvalidValue("ROT"))?;
            }
            "FLIPX" => config.flip_x = parse_flag(value, "FLIPX")?,
            "FLIPY" => config.flip_y = parse_flag(value, "FLIPY")?,
            "COLOR" => {
                config.color_order =
                    ColorOrder::parse(value).ok_or(MetaError::InvalidValue("COLOR"))?;
            }
            _ => {}
        }
    }

    config.width = width.ok_or(MetaError::MissingField("W"))?;
    config.height = height.ok_or(MetaError::MissingField("H"))?;
    Ok(BoardProfile::from_config(config)?)
}

fn parse_flag(value: &str, field: &'static str) -> Result<bool, MetaError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(MetaError::InvalidValue(field)),
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MetaError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MetaError::MissingPrefix => defmt::write!(fmt, "MissingPrefix"),
            MetaError::MissingField(field) => defmt::write!(fmt, "MissingField({})", field),
            MetaError::InvalidValue(field) => defmt::write!(fmt, "InvalidValue({})", field),
            MetaError::Board(error) => defmt::write!(fmt, "Board({})", error),
        }
    }
}
