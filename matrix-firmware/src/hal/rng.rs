// Zufallsquelle für Futter und Partikel
//
// Der Hardware-RNG des ESP32 liefert 32-Bit Werte; hier als
// rand_core::RngCore verpackt, damit matrix-core ihn nutzen kann.

use esp_hal::rng::Rng;
use rand_core::{Error, RngCore, impls};

pub struct HardwareRng {
    rng: Rng,
}

impl HardwareRng {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }
}

impl Default for HardwareRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for HardwareRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.random()
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32()) << 32 | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
