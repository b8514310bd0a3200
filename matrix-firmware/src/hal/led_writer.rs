// SmartLED Writer für das Matrix-Panel
//
// Implementiert den SmartLedWriter-Trait aus matrix-core für WS2812 LEDs
// am RMT Peripheral. Helligkeits-Limit und Farbreihenfolge werden hier
// beim Schreiben angewendet, die Logik arbeitet immer mit RGB.

use esp_hal::Blocking;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use matrix_core::color::limit_brightness;
use matrix_core::{ColorOrder, LedError, SmartLedWriter};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::LED_COUNT;

/// Buffer-Größe für das Panel (3 Farben * 8 Bits pro LED + 1 Reset)
pub const LED_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

/// RMT Puls-Buffer für das ganze Panel
pub type LedBuffer = [PulseCode; LED_BUFFER_SIZE];

/// Real Hardware LED Writer
///
/// Nutzt ESP32 RMT Peripheral um WS2812 LEDs anzusteuern.
///
/// Hinweis: Der Buffer muss länger leben als der Writer, daher wird er im
/// Task erstellt und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtLedWriter<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
    color_order: ColorOrder,
    brightness: u8,
}

impl<'a> RmtLedWriter<'a> {
    /// Erstellt einen neuen RmtLedWriter
    ///
    /// # Parameter
    /// - `pin`: GPIO für die LED-Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer! Macro)
    /// - `color_order`: Kanal-Reihenfolge des Panels
    /// - `brightness`: globales Helligkeits-Limit
    ///
    /// # Fehler
    /// `LedError::WriteFailed` wenn das RMT Peripheral nicht startet
    pub fn new(
        pin: impl PeripheralOutput<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut LedBuffer,
        color_order: ColorOrder,
        brightness: u8,
    ) -> Result<Self, LedError> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| LedError::WriteFailed)?;

        let led = SmartLedsAdapter::new(rmt.channel0, pin, buffer);

        Ok(Self {
            led,
            color_order,
            brightness,
        })
    }
}

/// Der Adapter sendet immer G-R-B. Damit am Draht die Reihenfolge des
/// Panels ankommt, werden die Kanäle vorher vertauscht.
fn to_adapter_order(color: RGB8, order: ColorOrder) -> RGB8 {
    let [first, second, third] = order.wire_bytes(color);
    RGB8 {
        r: second,
        g: first,
        b: third,
    }
}

impl SmartLedWriter for RmtLedWriter<'_> {
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), LedError> {
        let order = self.color_order;
        let brightness = self.brightness;
        self.led
            .write(
                pixels
                    .iter()
                    .map(|pixel| to_adapter_order(limit_brightness(*pixel, brightness), order)),
            )
            .map_err(|_| LedError::WriteFailed)
    }
}
