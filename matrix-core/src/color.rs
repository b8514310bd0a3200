//! Farb-Hilfsfunktionen: HSV → RGB, Helligkeits-Limit, Kanal-Reihenfolge
//!
//! Alle Funktionen sind pure und nutzen nur Integer-Arithmetik.

use rgb::RGB8;

use crate::board::ColorOrder;

/// Gedimmte Standard-Palette
///
/// Die LEDs sitzen dicht auf der Platine, hohe Helligkeit heizt das Board
/// schnell auf. Deshalb liegen alle Farben bei maximal 60.
pub mod palette {
    use rgb::RGB8;

    pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
    pub const RED: RGB8 = RGB8 { r: 60, g: 0, b: 0 };
    pub const GREEN: RGB8 = RGB8 { r: 0, g: 60, b: 0 };
    pub const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 60 };
    pub const YELLOW: RGB8 = RGB8 { r: 60, g: 60, b: 0 };
    pub const CYAN: RGB8 = RGB8 { r: 0, g: 60, b: 60 };
    pub const MAGENTA: RGB8 = RGB8 { r: 60, g: 0, b: 60 };
    pub const WHITE: RGB8 = RGB8 { r: 60, g: 60, b: 60 };
    pub const ORANGE: RGB8 = RGB8 { r: 60, g: 30, b: 0 };
    pub const PURPLE: RGB8 = RGB8 { r: 30, g: 0, b: 60 };
}

/// Standard-HSV → RGB Umrechnung (sechs Sektoren à 60°)
///
/// - `hue`: Farbton in Grad, Werte ≥ 360 werden modulo 360 genommen
/// - `saturation`, `value`: 0-255
///
/// ```
/// # use rgb::RGB8;
/// # use matrix_core::color::hsv_to_rgb;
/// assert_eq!(hsv_to_rgb(0, 255, 255), RGB8 { r: 255, g: 0, b: 0 });
/// assert_eq!(hsv_to_rgb(120, 255, 255), RGB8 { r: 0, g: 255, b: 0 });
/// ```
pub fn hsv_to_rgb(hue: u16, saturation: u8, value: u8) -> RGB8 {
    let hue = u32::from(hue % 360);
    let s = u32::from(saturation);
    let v = u32::from(value);

    let sector = hue / 60;
    let remainder = hue % 60;

    let p = (v * (255 - s) / 255) as u8;
    let q = (v * (255 - s * remainder / 60) / 255) as u8;
    let t = (v * (255 - s * (60 - remainder) / 60) / 255) as u8;
    let v = value;

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    RGB8 { r, g, b }
}

/// Skaliert einen Kanal wie ein globaler Helligkeitsregler (255 = unverändert)
#[inline]
pub const fn scale8(channel: u8, scale: u8) -> u8 {
    ((channel as u16 * (scale as u16 + 1)) >> 8) as u8
}

/// Wendet ein Helligkeits-Limit auf eine Farbe an
pub const fn limit_brightness(color: RGB8, brightness: u8) -> RGB8 {
    RGB8 {
        r: scale8(color.r, brightness),
        g: scale8(color.g, brightness),
        b: scale8(color.b, brightness),
    }
}

impl ColorOrder {
    /// Ordnet die Kanäle so, wie sie über die Datenleitung gehen
    ///
    /// ```
    /// # use rgb::RGB8;
    /// # use matrix_core::ColorOrder;
    /// let color = RGB8 { r: 1, g: 2, b: 3 };
    /// assert_eq!(ColorOrder::Grb.wire_bytes(color), [2, 1, 3]);
    /// ```
    pub const fn wire_bytes(self, color: RGB8) -> [u8; 3] {
        let RGB8 { r, g, b } = color;
        match self {
            ColorOrder::Rgb => [r, g, b],
            ColorOrder::Grb => [g, r, b],
            ColorOrder::Brg => [b, r, g],
            ColorOrder::Gbr => [g, b, r],
            ColorOrder::Rbg => [r, b, g],
            ColorOrder::Bgr => [b, g, r],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primary_and_secondary_colors() {
        assert_eq!(hsv_to_rgb(0, 255, 255), RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(60, 255, 255), RGB8 { r: 255, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(120, 255, 255), RGB8 { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(180, 255, 255), RGB8 { r: 0, g: 255, b: 255 });
        assert_eq!(hsv_to_rgb(240, 255, 255), RGB8 { r: 0, g: 0, b: 255 });
        assert_eq!(hsv_to_rgb(300, 255, 255), RGB8 { r: 255, g: 0, b: 255 });
    }

    #[test]
    fn test_hsv_wraps_at_360() {
        assert_eq!(hsv_to_rgb(360, 255, 255), hsv_to_rgb(0, 255, 255));
        assert_eq!(hsv_to_rgb(480, 255, 255), hsv_to_rgb(120, 255, 255));
    }

    #[test]
    fn test_hsv_between_sectors() {
        // Halbweg zwischen Rot und Gelb
        assert_eq!(hsv_to_rgb(30, 255, 255), RGB8 { r: 255, g: 128, b: 0 });
    }

    #[test]
    fn test_hsv_zero_saturation_is_gray() {
        assert_eq!(hsv_to_rgb(200, 0, 90), RGB8 { r: 90, g: 90, b: 90 });
    }

    #[test]
    fn test_limit_brightness() {
        let white = RGB8 {
            r: 255,
            g: 255,
            b: 255,
        };
        assert_eq!(limit_brightness(white, 255), white);
        assert_eq!(limit_brightness(white, 0), RGB8::default());
        assert_eq!(limit_brightness(white, 60), RGB8 { r: 60, g: 60, b: 60 });
    }

    #[test]
    fn test_wire_bytes_all_orders() {
        let color = RGB8 { r: 1, g: 2, b: 3 };
        assert_eq!(ColorOrder::Rgb.wire_bytes(color), [1, 2, 3]);
        assert_eq!(ColorOrder::Grb.wire_bytes(color), [2, 1, 3]);
        assert_eq!(ColorOrder::Brg.wire_bytes(color), [3, 1, 2]);
        assert_eq!(ColorOrder::Gbr.wire_bytes(color), [2, 3, 1]);
        assert_eq!(ColorOrder::Rbg.wire_bytes(color), [1, 3, 2]);
        assert_eq!(ColorOrder::Bgr.wire_bytes(color), [3, 2, 1]);
    }
}
