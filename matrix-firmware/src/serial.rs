// Serielle Ausgabe für den Terminal-Visualizer
//
// META- und FRAME-Zeilen sind reiner Text und gehen über esp_println
// direkt auf die Konsole, Status-Meldungen laufen weiter über defmt.

use defmt::warn;
use embassy_time::{Duration, Timer};
use esp_println::Printer;
use matrix_core::{BoardProfile, LedMatrix, write_frame, write_meta};

use crate::config::SERIAL_WAIT_MS;

/// Gibt dem seriellen Monitor Zeit zum Verbinden (begrenzt)
pub async fn wait_for_monitor() {
    Timer::after(Duration::from_millis(SERIAL_WAIT_MS)).await;
}

/// Sendet die META-Zeile mit der Panel-Beschreibung
pub fn send_meta(board: &BoardProfile) {
    if write_meta(board, &mut Printer).is_err() {
        warn!("Serial: META-Zeile konnte nicht geschrieben werden");
    }
}

/// Sendet den aktuellen Puffer als FRAME-Zeile
pub fn send_frame<const N: usize>(matrix: &LedMatrix<N>) {
    if write_frame(matrix, &mut Printer).is_err() {
        warn!("Serial: FRAME-Zeile konnte nicht geschrieben werden");
    }
}
