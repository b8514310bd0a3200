// Task-Modul: ein Embassy Task pro Demo
//
// Jeder Task besitzt seinen LED-Puffer und seinen Zustand selbst,
// es gibt keine geteilten Daten zwischen Tasks.

pub mod signal;
pub mod snake;
pub mod stars;

use defmt::error;
use embassy_time::{Duration, Timer};
use matrix_core::{LedMatrix, SmartLedWriter};

use crate::config::{BOARD, CALIBRATION_HOLD_MS, CALIBRATION_MODE, SEND_FRAMES};
use crate::serial;

// Re-export Tasks für einfachen Import
pub use signal::wifi_signal_task;
pub use snake::snake_task;
pub use stars::falling_stars_task;

/// Zeigt den Puffer auf dem Panel und sendet ihn optional als FRAME-Zeile
pub fn present<L: SmartLedWriter, const N: usize>(led: &mut L, matrix: &LedMatrix<N>) {
    if let Err(e) = led.write(matrix.pixels()) {
        error!("LED: Frame konnte nicht geschrieben werden: {}", e);
    }
    if SEND_FRAMES {
        serial::send_frame(matrix);
    }
}

/// Gemeinsamer Start aller Demos
///
/// Wartet auf den seriellen Monitor, sendet die META-Zeile und zeigt im
/// Kalibrier-Modus die Eck-Marker.
pub async fn startup<L: SmartLedWriter, const N: usize>(led: &mut L, matrix: &mut LedMatrix<N>) {
    serial::wait_for_monitor().await;
    serial::send_meta(&BOARD);

    if CALIBRATION_MODE {
        matrix.draw_calibration();
        present(led, matrix);
        Timer::after(Duration::from_millis(CALIBRATION_HOLD_MS)).await;
    }

    matrix.clear();
    present(led, matrix);
}
