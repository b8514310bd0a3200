// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
// Waveshare ESP32-S3-Matrix mit 8x8 WS2812B Panel und QMI8658 Lagesensor

use matrix_core::{BoardConfig, BoardProfile, ColorOrder, Rotation, Wiring};

// ============================================================================
// Panel Konfiguration
// ============================================================================

pub const MATRIX_WIDTH: u8 = 8;
pub const MATRIX_HEIGHT: u8 = 8;

/// Anzahl der LEDs im Panel (statische Puffergröße)
pub const LED_COUNT: usize = MATRIX_WIDTH as usize * MATRIX_HEIGHT as usize;

/// Board-Profil, zur Compile-Zeit geprüft
///
/// Eine ungültige Kombination (z.B. 90° Rotation auf einem nicht
/// quadratischen Panel) bricht den Build ab.
pub const BOARD: BoardProfile = {
    let mut config = BoardConfig::new(MATRIX_WIDTH, MATRIX_HEIGHT);
    config.color_order = ColorOrder::Rgb;
    config.wiring = Wiring::Progressive;
    config.rotation = Rotation::Deg0;
    config.flip_x = false;
    config.flip_y = false;

    match BoardProfile::from_config(config) {
        Ok(board) => board,
        Err(_) => panic!("Ungültiges Board-Profil in config.rs"),
    }
};

/// Eck-Marker beim Start anzeigen statt direkt loszulegen
pub const CALIBRATION_MODE: bool = false;

/// Wie lange die Eck-Marker stehen bleiben
pub const CALIBRATION_HOLD_MS: u64 = 3000;

// ============================================================================
// LED Konfiguration
// ============================================================================

/// GPIO-Pin für die Datenleitung des Panels
pub const LED_GPIO_PIN: u8 = 14;

/// Globales Helligkeits-Limit (0-255)
/// Schützt das dicht bestückte Panel vor Überhitzung
pub const BRIGHTNESS_LIMIT: u8 = 60;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// Serielle Visualisierung
// ============================================================================

/// Maximale Wartezeit auf den seriellen Monitor vor der META-Zeile
pub const SERIAL_WAIT_MS: u64 = 1500;

/// FRAME-Zeilen aktivieren (für den Terminal-Visualizer)
pub const SEND_FRAMES: bool = true;

/// Bildintervall für Anzeigen ohne eigenen Takt (10 FPS)
pub const FRAME_RATE_MS: u64 = 100;

// ============================================================================
// Lagesensor (QMI8658)
// ============================================================================

/// I2C-Adresse des QMI8658 (SA0 auf High)
pub const IMU_I2C_ADDRESS: u8 = 0x6B;

pub const IMU_SDA_PIN: u8 = 11;
pub const IMU_SCL_PIN: u8 = 12;

/// I2C-Frequenz in kHz
pub const IMU_I2C_FREQUENCY_KHZ: u32 = 400;

/// Einbaulage: Sensor-Achsen tauschen bzw. invertieren, bis die Neigung
/// nach rechts `x > 0` und nach unten `y > 0` ergibt
pub const IMU_SWAP_AXES: bool = true;
pub const IMU_INVERT_X: bool = false;
pub const IMU_INVERT_Y: bool = true;

/// Wartezeit nach einem Sensor-Fehler beim Start
pub const IMU_RETRY_DELAY_MS: u64 = 1000;

// ============================================================================
// Falling Stars
// ============================================================================

/// Simulationsschritt der Partikel
pub const STARS_TICK_MS: u64 = 50;

// ============================================================================
// WiFi-Signal
// ============================================================================

/// Pause zwischen zwei Scans (zusätzlich zur Scan-Dauer)
pub const SCAN_INTERVAL_MS: u64 = 500;

/// Anzeigedauer des neutralen Lost-Indikators
pub const LOST_HOLD_MS: u64 = 1000;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Scan-Ergebnisse und Treiber
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Wartezeit nach fehlgeschlagenem WiFi-Start
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

// ============================================================================
// Laufzeit
// ============================================================================

/// Heap-Größe für esp-rtos (Bytes)
pub const HEAP_SIZE: usize = 32768; // 32 KB
