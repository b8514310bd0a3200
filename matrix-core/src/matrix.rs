//! LED-Puffer mit Board-Profil
//!
//! Der Puffer liegt in physikalischer Reihenfolge (so wie er an den
//! LED-Treiber geht). Zugriffe über logische Koordinaten laufen immer
//! durch [`BoardProfile::xy`].

use rgb::RGB8;

use crate::board::{BoardError, BoardProfile};

/// Helligkeit der Kalibrier-Marker in den Ecken
const CALIBRATION_LEVEL: u8 = 100;

/// LED-Puffer für bis zu `N` LEDs
///
/// `N` ist die statische Kapazität, die tatsächliche Länge ist
/// `board.led_count()`.
#[derive(Clone)]
pub struct LedMatrix<const N: usize> {
    board: BoardProfile,
    pixels: [RGB8; N],
}

impl<const N: usize> LedMatrix<N> {
    /// Erstellt einen schwarzen Puffer für das Board
    ///
    /// # Fehler
    /// `BoardError::CapacityExceeded` wenn das Panel mehr als `N` LEDs hat
    pub fn new(board: BoardProfile) -> Result<Self, BoardError> {
        board.ensure_capacity(N)?;
        Ok(Self {
            board,
            pixels: [RGB8::default(); N],
        })
    }

    pub fn board(&self) -> &BoardProfile {
        &self.board
    }

    /// Setzt alle LEDs auf Schwarz
    pub fn clear(&mut self) {
        self.fill(RGB8::default());
    }

    pub fn fill(&mut self, color: RGB8) {
        let len = self.board.led_count();
        self.pixels[..len].fill(color);
    }

    /// Setzt eine LED über logische Koordinaten (wird geclampt)
    pub fn set(&mut self, x: u8, y: u8, color: RGB8) {
        let index = usize::from(self.board.xy(x, y));
        self.pixels[index] = color;
    }

    /// Liest eine LED über logische Koordinaten (wird geclampt)
    pub fn get(&self, x: u8, y: u8) -> RGB8 {
        self.pixels[usize::from(self.board.xy(x, y))]
    }

    /// Puffer in physikalischer Reihenfolge (Länge = `width * height`)
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels[..self.board.led_count()]
    }

    /// Zeichnet Eck-Marker zur Ausrichtung
    ///
    /// ```text
    /// oben links:  Grün     oben rechts:  Rot
    /// unten links: Blau     unten rechts: Weiß
    /// ```
    pub fn draw_calibration(&mut self) {
        let right = self.board.width() - 1;
        let bottom = self.board.height() - 1;
        let level = CALIBRATION_LEVEL;

        self.clear();
        self.set(0, 0, RGB8::new(0, level, 0));
        self.set(right, 0, RGB8::new(level, 0, 0));
        self.set(0, bottom, RGB8::new(0, 0, level));
        self.set(right, bottom, RGB8::new(level, level, level));
    }
}
