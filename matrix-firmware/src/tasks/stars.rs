// Falling Stars Task - Fallende Partikel mit Schwerkraft
use defmt::{error, info};
use embassy_time::{Duration, Timer};
use esp_hal_smartled::smart_led_buffer;
use matrix_core::{BoardError, LedMatrix, ParticleField, SmartLedWriter};
use rand_core::RngCore;

use crate::config::{BOARD, BRIGHTNESS_LIMIT, LED_COUNT, RMT_CLOCK_MHZ, STARS_TICK_MS};
use crate::hal::{HardwareRng, LedBuffer, RmtLedWriter};
use crate::tasks::{present, startup};

/// Falling Stars Logic - Testbare Animationsschleife
///
/// Läuft endlos; das Feld leert sich selbst, sobald ein Partikel in der
/// obersten Zeile liegen bleibt.
///
/// # Fehler
/// `BoardError` wenn das Board nicht in den statischen Puffer passt
pub async fn falling_stars_logic<L, R>(mut led: L, mut rng: R) -> Result<(), BoardError>
where
    L: SmartLedWriter,
    R: RngCore,
{
    let mut matrix = LedMatrix::<LED_COUNT>::new(BOARD)?;
    let mut field = ParticleField::<LED_COUNT>::new(&BOARD)?;

    startup(&mut led, &mut matrix).await;
    info!("Stars: Start");

    loop {
        let was_full = field.is_full();
        field.tick(&mut rng);
        if was_full {
            info!("Stars: Feld voll, neue Runde");
        }

        field.render(&mut matrix);
        present(&mut led, &matrix);

        Timer::after(Duration::from_millis(STARS_TICK_MS)).await;
    }
}

/// Falling Stars Task - Embassy Task
///
/// # Parameter
/// - `led_pin`: GPIO14 für die LED-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
#[embassy_executor::task]
pub async fn falling_stars_task(
    led_pin: esp_hal::peripherals::GPIO14<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
) {
    let mut rmt_buffer: LedBuffer = smart_led_buffer!(LED_COUNT);

    let led = match RmtLedWriter::new(
        led_pin,
        rmt_peripheral,
        RMT_CLOCK_MHZ,
        &mut rmt_buffer,
        BOARD.color_order(),
        BRIGHTNESS_LIMIT,
    ) {
        Ok(led) => led,
        Err(e) => {
            error!("LED: RMT Initialisierung fehlgeschlagen: {}", e);
            return;
        }
    };

    if let Err(e) = falling_stars_logic(led, HardwareRng::new()).await {
        error!("Stars: Board-Profil passt nicht: {}", e);
    }
}
