//! Koordinaten-Mapping: logisches (x, y) → physikalischer LED-Index
//!
//! Reihenfolge der Transformationen:
//! 1. Clamp auf das gültige Gitter (kein Fehler, stilles Begrenzen)
//! 2. Rotation im Uhrzeigersinn
//! 3. Spiegelung X / Y
//! 4. Verdrahtung (progressive oder serpentine)
//!
//! Für jede feste Konfiguration ist das Mapping eine Bijektion
//! von `[0, width) × [0, height)` auf `[0, width * height)`.

use crate::board::{BoardProfile, Rotation, Wiring};

impl Rotation {
    /// Dreht eine Koordinate auf einem `width × height` Gitter
    ///
    /// - 90°:  (x, y) → (w-1-y, x)
    /// - 180°: (x, y) → (w-1-x, h-1-y)
    /// - 270°: (x, y) → (y, h-1-x), die Umkehrung von 90°
    ///
    /// Vierteldrehungen setzen ein quadratisches Gitter voraus
    /// (wird von [`BoardProfile::from_config`] garantiert).
    pub const fn apply(self, x: u8, y: u8, width: u8, height: u8) -> (u8, u8) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (width - 1 - y, x),
            Rotation::Deg180 => (width - 1 - x, height - 1 - y),
            Rotation::Deg270 => (y, height - 1 - x),
        }
    }
}

impl BoardProfile {
    /// Physikalischer LED-Index für logische Koordinaten
    ///
    /// Koordinaten außerhalb des Panels werden auf die letzte Zeile/Spalte
    /// begrenzt.
    ///
    /// ```
    /// use matrix_core::{BoardConfig, BoardProfile, Wiring};
    ///
    /// let mut config = BoardConfig::new(8, 8);
    /// config.wiring = Wiring::Serpentine;
    /// let board = BoardProfile::from_config(config).unwrap();
    ///
    /// assert_eq!(board.xy(3, 2), 19); // gerade Zeile: links → rechts
    /// assert_eq!(board.xy(3, 3), 28); // ungerade Zeile: rechts → links
    /// ```
    pub const fn xy(&self, x: u8, y: u8) -> u16 {
        let width = self.width();
        let height = self.height();

        let x = if x >= width { width - 1 } else { x };
        let y = if y >= height { height - 1 } else { y };

        let (mut x, mut y) = self.rotation().apply(x, y, width, height);

        if self.flip_x() {
            x = width - 1 - x;
        }
        if self.flip_y() {
            y = height - 1 - y;
        }

        let row_start = y as u16 * width as u16;
        match self.wiring() {
            Wiring::Serpentine if y & 0x01 == 1 => row_start + (width - 1 - x) as u16,
            _ => row_start + x as u16,
        }
    }

    /// Iteriert alle logischen Zellen in Zeilen-Reihenfolge (y außen, x innen)
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + use<> {
        let width = self.width();
        (0..self.height()).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardConfig;

    fn board(wiring: Wiring, rotation: Rotation, flip_x: bool, flip_y: bool) -> BoardProfile {
        let mut config = BoardConfig::new(8, 8);
        config.wiring = wiring;
        config.rotation = rotation;
        config.flip_x = flip_x;
        config.flip_y = flip_y;
        BoardProfile::from_config(config).unwrap()
    }

    #[test]
    fn test_progressive_row_major() {
        let board = board(Wiring::Progressive, Rotation::Deg0, false, false);
        assert_eq!(board.xy(0, 0), 0);
        assert_eq!(board.xy(3, 2), 19);
        assert_eq!(board.xy(7, 7), 63);
    }

    #[test]
    fn test_serpentine_odd_rows_reversed() {
        let board = board(Wiring::Serpentine, Rotation::Deg0, false, false);
        assert_eq!(board.xy(3, 2), 19);
        assert_eq!(board.xy(3, 3), 28);
        assert_eq!(board.xy(0, 1), 15);
        assert_eq!(board.xy(7, 1), 8);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let board = board(Wiring::Progressive, Rotation::Deg0, false, false);
        assert_eq!(board.xy(200, 3), board.xy(7, 3));
        assert_eq!(board.xy(2, 8), board.xy(2, 7));
        assert_eq!(board.xy(255, 255), 63);
    }

    #[test]
    fn test_rotation_90_moves_top_left_to_top_right() {
        let board = board(Wiring::Progressive, Rotation::Deg90, false, false);
        assert_eq!(board.xy(0, 0), 7);
        assert_eq!(board.xy(7, 0), 63);
    }

    #[test]
    fn test_rotation_180_mirrors_both_axes() {
        let board = board(Wiring::Progressive, Rotation::Deg180, false, false);
        assert_eq!(board.xy(0, 0), 63);
        assert_eq!(board.xy(7, 7), 0);
    }

    #[test]
    fn test_flip_after_rotation() {
        // 180° gefolgt von beiden Spiegelungen ergibt wieder die Identität
        let board = board(Wiring::Progressive, Rotation::Deg180, true, true);
        assert_eq!(board.xy(2, 5), 5 * 8 + 2);
    }

    #[test]
    fn test_rotation_applied_four_times_is_identity() {
        for rotation in Rotation::ALL {
            for y in 0..8 {
                for x in 0..8 {
                    let mut point = (x, y);
                    for _ in 0..4 {
                        point = rotation.apply(point.0, point.1, 8, 8);
                    }
                    assert_eq!(point, (x, y));
                }
            }
        }
    }

    #[test]
    fn test_270_is_inverse_of_90() {
        for y in 0..8 {
            for x in 0..8 {
                let (rx, ry) = Rotation::Deg90.apply(x, y, 8, 8);
                assert_eq!(Rotation::Deg270.apply(rx, ry, 8, 8), (x, y));
            }
        }
    }

    #[test]
    fn test_cells_scan_order() {
        let board = BoardProfile::new(3, 2).unwrap();
        let mut cells = board.cells();
        assert_eq!(cells.next(), Some((0, 0)));
        assert_eq!(cells.next(), Some((1, 0)));
        assert_eq!(cells.next(), Some((2, 0)));
        assert_eq!(cells.next(), Some((0, 1)));
        assert_eq!(board.cells().count(), 6);
    }
}
