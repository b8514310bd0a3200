// Hardware Abstraction Layer (HAL) Module
//
// Konkrete Implementierungen der Traits aus matrix-core für die
// Waveshare ESP32-S3-Matrix.

pub mod imu;
pub mod led_writer;
pub mod rng;

pub use imu::{Mounting, Qmi8658};
pub use led_writer::{LED_BUFFER_SIZE, LedBuffer, RmtLedWriter};
pub use rng::HardwareRng;
