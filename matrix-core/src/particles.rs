//! Fallende Partikel ("Falling Stars")
//!
//! Feste Anzahl von Partikeln, die von oben mit Schwerkraft nach unten
//! fallen und auf dem Boden oder auf bereits liegenden Partikeln landen.
//! Gelandete Partikel werden in einem Belegungs-Gitter gespeichert.

use heapless::Vec;
use rand_core::RngCore;
use rgb::RGB8;

use crate::board::{BoardError, BoardProfile};
use crate::matrix::LedMatrix;

/// Maximale Anzahl gleichzeitig fallender Partikel
pub const MAX_PARTICLES: usize = 12;

/// Wahrscheinlichkeit für einen neuen Partikel pro Schritt (in Prozent)
pub const SPAWN_CHANCE_PERCENT: u32 = 30;

/// Geschwindigkeitszuwachs pro Schritt (Zeilen pro Schritt²)
pub const GRAVITY: f32 = 0.3;

/// Kräftige Farben für neue Partikel
pub const PARTICLE_COLORS: [RGB8; 6] = [
    RGB8 { r: 255, g: 0, b: 0 },
    RGB8 { r: 0, g: 255, b: 0 },
    RGB8 { r: 0, g: 0, b: 255 },
    RGB8 { r: 255, g: 255, b: 0 },
    RGB8 { r: 255, g: 0, b: 255 },
    RGB8 { r: 0, g: 255, b: 255 },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub column: u8,
    /// Zeile als Gleitkommazahl (0.0 = oben)
    pub y: f32,
    pub velocity: f32,
    pub color: RGB8,
    pub active: bool,
}

impl Particle {
    const IDLE: Particle = Particle {
        column: 0,
        y: 0.0,
        velocity: 0.0,
        color: RGB8 { r: 0, g: 0, b: 0 },
        active: false,
    };

    /// Aktuelle Zeile (abgeschnitten)
    pub fn row(&self) -> u8 {
        self.y as u8
    }
}

/// Gelandeter Partikel in einer Zelle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    /// Slot-Nummer des Partikels, der hier gelandet ist
    pub owner: u8,
    pub color: RGB8,
}

/// Partikelfeld für ein Panel mit bis zu `N` Zellen
pub struct ParticleField<const N: usize> {
    width: u8,
    height: u8,
    particles: [Particle; MAX_PARTICLES],
    settled: Vec<Option<Settled>, N>,
    full: bool,
}

impl<const N: usize> ParticleField<N> {
    /// Leeres Feld
    ///
    /// # Fehler
    /// `CapacityExceeded` wenn das Panel mehr als `N` Zellen hat
    pub fn new(board: &BoardProfile) -> Result<Self, BoardError> {
        board.ensure_capacity(N)?;
        let mut settled = Vec::new();
        settled
            .resize(board.led_count(), None)
            .map_err(|_| BoardError::CapacityExceeded)?;

        Ok(Self {
            width: board.width(),
            height: board.height(),
            particles: [Particle::IDLE; MAX_PARTICLES],
            settled,
            full: false,
        })
    }

    /// Ein Simulationsschritt: evtl. neuer Partikel, Physik, Landung
    pub fn tick<R: RngCore>(&mut self, rng: &mut R) {
        if self.full {
            self.clear();
        }

        if rng.next_u32() % 100 < SPAWN_CHANCE_PERCENT {
            self.spawn(rng);
        }

        for slot in 0..MAX_PARTICLES {
            if self.particles[slot].active {
                self.advance(slot);
            }
        }
    }

    /// Setzt Partikel und Belegung zurück
    pub fn clear(&mut self) {
        self.particles = [Particle::IDLE; MAX_PARTICLES];
        self.settled.iter_mut().for_each(|cell| *cell = None);
        self.full = false;
    }

    /// Startet einen Partikel in einem freien Slot (oben, zufällige Spalte)
    ///
    /// Gibt `false` zurück, wenn alle Slots belegt sind.
    pub fn spawn<R: RngCore>(&mut self, rng: &mut R) -> bool {
        let Some(slot) = self.particles.iter().position(|p| !p.active) else {
            return false;
        };
        let column = (rng.next_u32() % u32::from(self.width)) as u8;
        let color = PARTICLE_COLORS[rng.next_u32() as usize % PARTICLE_COLORS.len()];
        self.particles[slot] = Particle {
            column,
            y: 0.0,
            velocity: 0.0,
            color,
            active: true,
        };
        true
    }

    fn advance(&mut self, slot: usize) {
        let bottom = self.height - 1;
        let particle = &mut self.particles[slot];
        let start_row = particle.row();

        particle.velocity += GRAVITY;
        particle.y += particle.velocity;
        let column = particle.column;
        let target_row = if particle.y >= f32::from(bottom) {
            bottom
        } else {
            particle.row()
        };

        // Alle überquerten Zeilen prüfen, damit schnelle Partikel nicht
        // durch liegende Partikel hindurchfallen
        let mut landing = None;
        for row in start_row..=target_row {
            if row == bottom || self.settled_at(column, row + 1).is_some() {
                landing = Some(row);
                break;
            }
        }

        if let Some(row) = landing {
            self.settle(slot, column, row);
        }
    }

    fn settle(&mut self, slot: usize, column: u8, row: u8) {
        // Zelle im selben Schritt schon belegt: auf die nächste freie
        // Zelle darüber ausweichen
        let free_row = (0..=row)
            .rev()
            .find(|r| self.settled_at(column, *r).is_none());
        let color = self.particles[slot].color;
        self.particles[slot].active = false;

        let Some(free_row) = free_row else {
            self.full = true;
            return;
        };
        self.particles[slot].y = f32::from(free_row);

        let index = self.cell_index(column, free_row);
        self.settled[index] = Some(Settled {
            owner: slot as u8,
            color,
        });
        if free_row == 0 {
            self.full = true;
        }
    }

    /// Belegung einer Zelle
    pub fn settled_at(&self, column: u8, row: u8) -> Option<Settled> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.settled[self.cell_index(column, row)]
    }

    /// Alle Partikel-Slots (aktive und inaktive)
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    pub fn settled_count(&self) -> usize {
        self.settled.iter().filter(|cell| cell.is_some()).count()
    }

    /// Ein Partikel ist in der obersten Zeile gelandet
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Zeichnet erst liegende, dann fallende Partikel
    pub fn render<const M: usize>(&self, matrix: &mut LedMatrix<M>) {
        matrix.clear();
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(cell) = self.settled_at(x, y) {
                    matrix.set(x, y, cell.color);
                }
            }
        }
        for particle in self.particles.iter().filter(|p| p.active) {
            let row = particle.row();
            if row < self.height {
                matrix.set(particle.column, row, particle.color);
            }
        }
    }

    fn cell_index(&self, column: u8, row: u8) -> usize {
        usize::from(row) * usize::from(self.width) + usize::from(column)
    }
}
