//! Test-Hilfen für die Host-Tests
//!
//! Mock-Implementierungen der Hardware-Traits und ein deterministischer
//! Zufallsgenerator. Diese Tests laufen auf dem Host (x86_64).

use matrix_core::{ImuError, LedError, SmartLedWriter, Tilt, TiltSensor};
use rand_core::{Error, RngCore, impls};
use rgb::RGB8;

// ============================================================================
// Mock LED Writer
// ============================================================================

#[derive(Default)]
pub struct MockLedWriter {
    /// Zuletzt geschriebener Frame
    pub last_frame: Vec<RGB8>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockLedWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SmartLedWriter for MockLedWriter {
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.last_frame = pixels.to_vec();
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock Lagesensor
// ============================================================================

/// Liefert vorgegebene Messwerte der Reihe nach, danach Bus-Fehler
#[derive(Default)]
pub struct MockTiltSensor {
    pub readings: Vec<Tilt>,
    next: usize,
}

impl MockTiltSensor {
    pub fn new(readings: Vec<Tilt>) -> Self {
        Self { readings, next: 0 }
    }
}

impl TiltSensor for MockTiltSensor {
    fn read_tilt(&mut self) -> Result<Tilt, ImuError> {
        let reading = self.readings.get(self.next).copied().ok_or(ImuError::Bus)?;
        self.next += 1;
        Ok(reading)
    }
}

// ============================================================================
// Deterministischer Zufall
// ============================================================================

/// Linearer Kongruenzgenerator, reproduzierbar über den Seed
pub struct LcgRng {
    seed: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RngCore for LcgRng {
    fn next_u32(&mut self) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.seed >> 33) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let upper = u64::from(self.next_u32());
        let lower = u64::from(self.next_u32());
        (upper << 32) | lower
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
