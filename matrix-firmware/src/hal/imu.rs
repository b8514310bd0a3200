// QMI8658 Lagesensor (6-Achsen IMU) über I2C
//
// Nur der Beschleunigungsmesser wird genutzt: ±2 g, Werte werden in g
// umgerechnet und auf die Panel-Achsen gedreht.

use embedded_hal::i2c::I2c;
use matrix_core::{ImuError, Tilt, TiltSensor};

/// Register-Adressen (Datenblatt QMI8658A)
mod reg {
    pub const WHO_AM_I: u8 = 0x00;
    /// Serielle Schnittstelle: Adress-Autoinkrement
    pub const CTRL1: u8 = 0x02;
    /// Beschleunigungsmesser: Messbereich und Datenrate
    pub const CTRL2: u8 = 0x03;
    /// Sensoren ein-/ausschalten
    pub const CTRL7: u8 = 0x08;
    /// Erstes Datenregister (AX_L), danach AX_H, AY_L, AY_H, AZ_L, AZ_H
    pub const AX_L: u8 = 0x35;
}

/// Erwarteter Inhalt von WHO_AM_I
const DEVICE_ID: u8 = 0x05;

/// CTRL1: Adress-Autoinkrement, Little Endian
const CTRL1_ADDR_AI: u8 = 0x40;

/// CTRL2: ±2 g, 125 Hz
const CTRL2_ACCEL_2G_125HZ: u8 = 0x06;

/// CTRL7: nur Beschleunigungsmesser aktiv
const CTRL7_ACCEL_ENABLE: u8 = 0x01;

/// LSB pro g bei ±2 g
const LSB_PER_G: f32 = 16384.0;

/// Einbaulage des Sensors relativ zum Panel
#[derive(Debug, Clone, Copy, Default)]
pub struct Mounting {
    pub swap_axes: bool,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl Mounting {
    fn apply(&self, ax: f32, ay: f32) -> Tilt {
        let (x, y) = if self.swap_axes { (ay, ax) } else { (ax, ay) };
        Tilt {
            x: if self.invert_x { -x } else { x },
            y: if self.invert_y { -y } else { y },
        }
    }
}

pub struct Qmi8658<I> {
    i2c: I,
    address: u8,
    mounting: Mounting,
}

impl<I: I2c> Qmi8658<I> {
    pub fn new(i2c: I, address: u8, mounting: Mounting) -> Self {
        Self {
            i2c,
            address,
            mounting,
        }
    }

    /// Prüft die Geräte-Kennung und schaltet den Beschleunigungsmesser ein
    ///
    /// # Fehler
    /// - `ImuError::Bus` bei I2C-Fehlern
    /// - `ImuError::UnknownDevice` wenn WHO_AM_I nicht passt
    pub fn init(&mut self) -> Result<(), ImuError> {
        let id = self.read_register(reg::WHO_AM_I)?;
        if id != DEVICE_ID {
            return Err(ImuError::UnknownDevice(id));
        }

        self.write_register(reg::CTRL1, CTRL1_ADDR_AI)?;
        self.write_register(reg::CTRL2, CTRL2_ACCEL_2G_125HZ)?;
        self.write_register(reg::CTRL7, CTRL7_ACCEL_ENABLE)
    }

    /// Rohe Beschleunigung (x, y, z) in LSB
    pub fn read_accel_raw(&mut self) -> Result<[i16; 3], ImuError> {
        let mut data = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::AX_L], &mut data)
            .map_err(|_| ImuError::Bus)?;

        Ok([
            i16::from_le_bytes([data[0], data[1]]),
            i16::from_le_bytes([data[2], data[3]]),
            i16::from_le_bytes([data[4], data[5]]),
        ])
    }

    fn read_register(&mut self, register: u8) -> Result<u8, ImuError> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut value)
            .map_err(|_| ImuError::Bus)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), ImuError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|_| ImuError::Bus)
    }
}

impl<I: I2c> TiltSensor for Qmi8658<I> {
    fn read_tilt(&mut self) -> Result<Tilt, ImuError> {
        let [ax, ay, _] = self.read_accel_raw()?;
        Ok(self
            .mounting
            .apply(f32::from(ax) / LSB_PER_G, f32::from(ay) / LSB_PER_G))
    }
}
