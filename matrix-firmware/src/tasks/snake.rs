// Snake Task - Spiel mit Lagesensor-Steuerung
use defmt::{error, info, warn};
use embassy_time::{Duration, Timer};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal_smartled::smart_led_buffer;
use matrix_core::snake::GameOverFlash;
use matrix_core::{
    BoardError, Direction, LedMatrix, SmartLedWriter, SnakeGame, TickOutcome, TiltSensor,
};
use rand_core::RngCore;

use crate::config::{
    BOARD, BRIGHTNESS_LIMIT, IMU_I2C_ADDRESS, IMU_I2C_FREQUENCY_KHZ, IMU_INVERT_X, IMU_INVERT_Y,
    IMU_RETRY_DELAY_MS, IMU_SWAP_AXES, LED_COUNT, RMT_CLOCK_MHZ,
};
use crate::hal::{HardwareRng, LedBuffer, Mounting, Qmi8658, RmtLedWriter};
use crate::tasks::{present, startup};

/// Snake Logic - Testbare Spielschleife ohne Hardware-Abhängigkeit
///
/// Pro Schritt:
/// 1. Neigung lesen und in eine Richtung umsetzen
/// 2. Spielschritt ausführen
/// 3. Bei Game Over die rote Blink-Animation zeigen
/// 4. Rendern, ausgeben und je nach Länge der Schlange warten
///
/// Ein Sensor-Fehler behält die aktuelle Richtung bei.
///
/// # Fehler
/// `BoardError` wenn das Board nicht in den statischen Puffer passt
pub async fn snake_logic<L, T, R>(mut led: L, mut imu: T, mut rng: R) -> Result<(), BoardError>
where
    L: SmartLedWriter,
    T: TiltSensor,
    R: RngCore,
{
    let mut matrix = LedMatrix::<LED_COUNT>::new(BOARD)?;
    let mut game = SnakeGame::<LED_COUNT>::new(&BOARD, &mut rng)?;

    startup(&mut led, &mut matrix).await;
    info!("Snake: Start, Länge {}", game.len());

    loop {
        let heading = match imu.read_tilt() {
            Ok(tilt) => Direction::from_tilt(tilt, game.heading()),
            Err(e) => {
                warn!("Snake: Lagesensor nicht lesbar: {}", e);
                game.heading()
            }
        };

        match game.tick(heading, &mut rng) {
            TickOutcome::FoodEaten => {
                info!("Snake: Futter! Score {}, Länge {}", game.score(), game.len());
            }
            TickOutcome::GameOver => {
                info!("Snake: Game Over, Score {}", game.score());
                for step in GameOverFlash::new() {
                    matrix.fill(step.color);
                    present(&mut led, &matrix);
                    Timer::after(Duration::from_millis(u64::from(step.hold_ms))).await;
                }
                // Nächster tick() startet ein neues Spiel
                continue;
            }
            TickOutcome::NormalMove => {}
        }

        game.render(&mut matrix);
        present(&mut led, &matrix);

        Timer::after(Duration::from_millis(u64::from(game.tick_interval_ms()))).await;
    }
}

/// Wartet bis der Lagesensor antwortet
async fn init_imu<I: embedded_hal::i2c::I2c>(i2c: I) -> Qmi8658<I> {
    let mounting = Mounting {
        swap_axes: IMU_SWAP_AXES,
        invert_x: IMU_INVERT_X,
        invert_y: IMU_INVERT_Y,
    };
    let mut imu = Qmi8658::new(i2c, IMU_I2C_ADDRESS, mounting);

    loop {
        match imu.init() {
            Ok(()) => {
                info!("IMU: QMI8658 bereit");
                return imu;
            }
            Err(e) => {
                error!("IMU: Initialisierung fehlgeschlagen: {}", e);
                Timer::after(Duration::from_millis(IMU_RETRY_DELAY_MS)).await;
            }
        }
    }
}

/// Snake Task - Embassy Task für die Waveshare ESP32-S3-Matrix
///
/// Initialisiert LED-Panel und Lagesensor und ruft dann die testbare
/// `snake_logic()` auf.
///
/// # Parameter
/// - `led_pin`: GPIO14 für die LED-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `i2c_peripheral`, `sda`, `scl`: I2C-Bus zum QMI8658
#[embassy_executor::task]
pub async fn snake_task(
    led_pin: esp_hal::peripherals::GPIO14<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    i2c_peripheral: esp_hal::peripherals::I2C0<'static>,
    sda: esp_hal::peripherals::GPIO11<'static>,
    scl: esp_hal::peripherals::GPIO12<'static>,
) {
    // Buffer für SmartLED Daten erstellen (ganzes Panel)
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

    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(IMU_I2C_FREQUENCY_KHZ));
    let i2c = match I2c::new(i2c_peripheral, i2c_config) {
        Ok(i2c) => i2c.with_sda(sda).with_scl(scl),
        Err(e) => {
            error!("IMU: I2C Konfiguration ungültig: {}", defmt::Debug2Format(&e));
            return;
        }
    };
    let imu = init_imu(i2c).await;

    if let Err(e) = snake_logic(led, imu, HardwareRng::new()).await {
        error!("Snake: Board-Profil passt nicht: {}", e);
    }
}
