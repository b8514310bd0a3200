//! Snake-Spiellogik
//!
//! Toroidales Spielfeld (kein Tod an der Wand), Schlange als
//! `heapless::Vec` mit dem Kopf an Index 0. Ein Aufruf von
//! [`SnakeGame::tick`] entspricht einem Spielschritt.

use heapless::Vec;
use rand_core::RngCore;
use rgb::RGB8;

use crate::board::{BoardError, BoardProfile};
use crate::matrix::LedMatrix;
use crate::traits::Tilt;

/// Länge der Schlange beim Start
pub const INITIAL_LENGTH: usize = 3;

/// Start-Intervall zwischen zwei Spielschritten
pub const BASE_INTERVAL_MS: u32 = 400;

/// Verkürzung des Intervalls pro zusätzlichem Segment
pub const INTERVAL_STEP_MS: u32 = 25;

/// Untergrenze für das Intervall
pub const MIN_INTERVAL_MS: u32 = 120;

/// Neigung (in g), ab der eine Richtung erkannt wird
pub const TILT_DEAD_ZONE: f32 = 0.25;

pub const HEAD_COLOR: RGB8 = RGB8 { r: 0, g: 50, b: 0 };
pub const BODY_COLOR: RGB8 = RGB8 { r: 0, g: 25, b: 0 };
pub const FOOD_COLOR: RGB8 = RGB8 { r: 40, g: 0, b: 0 };

/// Farbe der Game-Over-Animation
pub const FLASH_COLOR: RGB8 = RGB8 { r: 30, g: 0, b: 0 };

/// Anzahl der roten Blitze bei Game Over
pub const FLASH_COUNT: u8 = 3;

/// Dauer einer Flash-Phase (an oder aus)
pub const FLASH_HOLD_MS: u32 = 200;

/// Zelle auf dem Spielfeld (x = Spalte, y = Zeile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Bewegungsrichtung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Nachbarzelle in dieser Richtung, mit Wrap-Around an den Rändern
    pub fn step(self, cell: Cell, width: u8, height: u8) -> Cell {
        let (dx, dy): (i16, i16) = match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        };
        let x = (i16::from(cell.x) + dx).rem_euclid(i16::from(width));
        let y = (i16::from(cell.y) + dy).rem_euclid(i16::from(height));
        Cell::new(x as u8, y as u8)
    }

    /// Richtung aus der Neigung des Boards
    ///
    /// Die dominante Achse gewinnt. Liegen beide Achsen innerhalb der
    /// Totzone, bleibt `current` erhalten.
    pub fn from_tilt(tilt: Tilt, current: Direction) -> Direction {
        let ax = if tilt.x < 0.0 { -tilt.x } else { tilt.x };
        let ay = if tilt.y < 0.0 { -tilt.y } else { tilt.y };

        if ax < TILT_DEAD_ZONE && ay < TILT_DEAD_ZONE {
            current
        } else if ax >= ay {
            if tilt.x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if tilt.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Ergebnis eines Spielschritts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    GameOver,
    NormalMove,
    FoodEaten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    Running,
    GameOver,
}

/// Spielzustand für ein Panel mit bis zu `N` Zellen
pub struct SnakeGame<const N: usize> {
    width: u8,
    height: u8,
    body: Vec<Cell, N>,
    food: Option<Cell>,
    heading: Direction,
    state: GameState,
    score: u16,
}

impl<const N: usize> SnakeGame<N> {
    /// Neues Spiel: Kopf in der Mitte, Blick nach rechts, Körper nach links
    ///
    /// # Fehler
    /// - `CapacityExceeded` wenn das Panel mehr als `N` Zellen hat
    /// - `TooSmall` bei weniger als 3 Spalten
    pub fn new<R: RngCore>(board: &BoardProfile, rng: &mut R) -> Result<Self, BoardError> {
        board.ensure_capacity(N)?;
        if usize::from(board.width()) < INITIAL_LENGTH {
            return Err(BoardError::TooSmall);
        }

        let mut game = Self {
            width: board.width(),
            height: board.height(),
            body: Vec::new(),
            food: None,
            heading: Direction::Right,
            state: GameState::Running,
            score: 0,
        };
        game.restart(rng);
        Ok(game)
    }

    /// Setzt das Spiel auf den Startzustand zurück
    pub fn restart<R: RngCore>(&mut self, rng: &mut R) {
        let head_x = (self.width / 2).max(INITIAL_LENGTH as u8 - 1);
        let row = self.height / 2;

        self.body.clear();
        for offset in 0..INITIAL_LENGTH as u8 {
            // Kapazität ist durch ensure_capacity garantiert
            let _ = self.body.push(Cell::new(head_x - offset, row));
        }
        self.heading = Direction::Right;
        self.state = GameState::Running;
        self.score = 0;
        self.food = self.random_free_cell(rng);
    }

    /// Ein Spielschritt
    ///
    /// 1. Richtung direkt entgegen der aktuellen ändert die Fahrtrichtung
    ///    nicht (Länge > 1)
    /// 2. neuer Kopf aus der angefragten Richtung, mit Wrap-Around
    /// 3. neuer Kopf == zweites Segment → Schritt ohne Bewegung
    /// 4. neuer Kopf trifft restlichen Körper → Game Over
    /// 5. sonst bewegen bzw. wachsen, wenn Futter gefressen wurde
    ///
    /// Nach Game Over startet der nächste Aufruf ein neues Spiel und
    /// meldet `NormalMove`, ohne die Schlange zu bewegen.
    pub fn tick<R: RngCore>(&mut self, requested: Direction, rng: &mut R) -> TickOutcome {
        if self.state == GameState::GameOver {
            self.restart(rng);
            return TickOutcome::NormalMove;
        }

        if self.body.len() <= 1 || requested != self.heading.opposite() {
            self.heading = requested;
        }

        // Der neue Kopf folgt der angefragten Richtung. Eine abgelehnte
        // Umkehr landet damit auf dem Hals und wird unten zum Leerschritt.
        let new_head = requested.step(self.head(), self.width, self.height);

        if self.body.len() > 1 && self.body[1] == new_head {
            return TickOutcome::NormalMove;
        }

        if self.body.iter().skip(2).any(|cell| *cell == new_head) {
            self.state = GameState::GameOver;
            return TickOutcome::GameOver;
        }

        if self.food == Some(new_head) {
            if self.body.push(new_head).is_err() {
                self.state = GameState::GameOver;
                return TickOutcome::GameOver;
            }
            self.body.rotate_right(1);
            self.score = self.score.saturating_add(1);
            self.food = self.random_free_cell(rng);
            TickOutcome::FoodEaten
        } else {
            self.body.rotate_right(1);
            self.body[0] = new_head;
            TickOutcome::NormalMove
        }
    }

    /// Legt Futter auf eine bestimmte Zelle
    ///
    /// Gibt `false` zurück (und ändert nichts), wenn die Zelle außerhalb
    /// liegt oder von der Schlange belegt ist.
    pub fn place_food(&mut self, cell: Cell) -> bool {
        if cell.x >= self.width || cell.y >= self.height || self.body.contains(&cell) {
            return false;
        }
        self.food = Some(cell);
        true
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Segmente, Kopf zuerst
    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Futter-Zelle, `None` wenn die Schlange das ganze Feld füllt
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Anzahl gefressener Futter-Stücke seit dem letzten Neustart
    pub fn score(&self) -> u16 {
        self.score
    }

    /// Wartezeit bis zum nächsten Schritt: wird mit jeder Länge kürzer
    pub fn tick_interval_ms(&self) -> u32 {
        let extra = self.body.len().saturating_sub(INITIAL_LENGTH) as u32;
        BASE_INTERVAL_MS
            .saturating_sub(INTERVAL_STEP_MS.saturating_mul(extra))
            .max(MIN_INTERVAL_MS)
    }

    /// Zeichnet Körper, Kopf (heller) und Futter
    pub fn render<const M: usize>(&self, matrix: &mut LedMatrix<M>) {
        matrix.clear();
        for cell in self.body.iter().skip(1) {
            matrix.set(cell.x, cell.y, BODY_COLOR);
        }
        let head = self.head();
        matrix.set(head.x, head.y, HEAD_COLOR);
        if let Some(food) = self.food {
            matrix.set(food.x, food.y, FOOD_COLOR);
        }
    }

    /// Gleichverteilt gewählte freie Zelle
    fn random_free_cell<R: RngCore>(&self, rng: &mut R) -> Option<Cell> {
        let total = usize::from(self.width) * usize::from(self.height);
        let free = total - self.body.len();
        if free == 0 {
            return None;
        }

        let mut remaining = rng.next_u32() as usize % free;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Cell::new(x, y);
                if self.body.contains(&cell) {
                    continue;
                }
                if remaining == 0 {
                    return Some(cell);
                }
                remaining -= 1;
            }
        }
        None
    }
}

/// Ein Schritt der Game-Over-Animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashStep {
    /// Farbe für das ganze Panel
    pub color: RGB8,
    pub hold_ms: u32,
}

/// Game-Over-Animation: dreimal rot / schwarz
///
/// ```
/// # use matrix_core::snake::GameOverFlash;
/// assert_eq!(GameOverFlash::new().count(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameOverFlash {
    step: u8,
}

impl GameOverFlash {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for GameOverFlash {
    type Item = FlashStep;

    fn next(&mut self) -> Option<FlashStep> {
        if self.step >= FLASH_COUNT * 2 {
            return None;
        }
        let color = if self.step % 2 == 0 {
            FLASH_COLOR
        } else {
            RGB8::default()
        };
        self.step += 1;
        Some(FlashStep {
            color,
            hold_ms: FLASH_HOLD_MS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministischer Zufall für Tests
    struct CountingRng(u32);

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.0 = self.0.wrapping_add(7);
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand_core::impls::fill_bytes_via_next(self, dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn game() -> (SnakeGame<64>, CountingRng) {
        let mut rng = CountingRng(0);
        let board = BoardProfile::new(8, 8).unwrap();
        (SnakeGame::new(&board, &mut rng).unwrap(), rng)
    }

    #[test]
    fn test_initial_layout() {
        let (game, _) = game();
        assert_eq!(
            game.body(),
            &[Cell::new(4, 4), Cell::new(3, 4), Cell::new(2, 4)]
        );
        assert_eq!(game.heading(), Direction::Right);
        let food = game.food().unwrap();
        assert!(!game.body().contains(&food));
    }

    #[test]
    fn test_step_wraps_around() {
        assert_eq!(Direction::Left.step(Cell::new(0, 3), 8, 8), Cell::new(7, 3));
        assert_eq!(Direction::Up.step(Cell::new(2, 0), 8, 8), Cell::new(2, 7));
        assert_eq!(Direction::Right.step(Cell::new(7, 1), 8, 8), Cell::new(0, 1));
        assert_eq!(Direction::Down.step(Cell::new(5, 7), 8, 8), Cell::new(5, 0));
    }

    #[test]
    fn test_opposite_direction_is_rejected() {
        let (mut game, mut rng) = game();
        game.place_food(Cell::new(0, 0));
        assert_eq!(game.tick(Direction::Left, &mut rng), TickOutcome::NormalMove);
        assert_eq!(game.head(), Cell::new(4, 4));
        assert_eq!(game.heading(), Direction::Right);
        assert_eq!(
            game.body(),
            &[Cell::new(4, 4), Cell::new(3, 4), Cell::new(2, 4)]
        );
    }

    #[test]
    fn test_too_small_board() {
        let mut rng = CountingRng(0);
        let board = BoardProfile::new(2, 8).unwrap();
        assert!(matches!(
            SnakeGame::<64>::new(&board, &mut rng),
            Err(BoardError::TooSmall)
        ));
    }

    #[test]
    fn test_tick_interval_bounded() {
        let mut rng = CountingRng(0);
        let board = BoardProfile::new(16, 8).unwrap();
        let mut game = SnakeGame::<128>::new(&board, &mut rng).unwrap();
        assert_eq!(game.tick_interval_ms(), BASE_INTERVAL_MS);

        // Futter immer direkt vor den Kopf legen: 12x wachsen auf Zeile 4
        for _ in 0..12 {
            let next = game.heading().step(game.head(), 16, 8);
            assert!(game.place_food(next));
            assert_eq!(game.tick(Direction::Right, &mut rng), TickOutcome::FoodEaten);
        }
        assert_eq!(game.len(), 15);
        assert_eq!(game.tick_interval_ms(), MIN_INTERVAL_MS);
    }

    #[test]
    fn test_flash_alternates_red_and_black() {
        let steps: Vec<FlashStep, 8> = GameOverFlash::new().collect();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0].color, FLASH_COLOR);
        assert_eq!(steps[1].color, RGB8::default());
        assert!(steps.iter().all(|step| step.hold_ms == FLASH_HOLD_MS));
    }

    #[test]
    fn test_tilt_dead_zone_keeps_heading() {
        let tilt = Tilt { x: 0.1, y: -0.2 };
        assert_eq!(Direction::from_tilt(tilt, Direction::Up), Direction::Up);
    }

    #[test]
    fn test_tilt_dominant_axis() {
        assert_eq!(
            Direction::from_tilt(Tilt { x: 0.6, y: 0.3 }, Direction::Up),
            Direction::Right
        );
        assert_eq!(
            Direction::from_tilt(Tilt { x: -0.6, y: 0.3 }, Direction::Up),
            Direction::Left
        );
        assert_eq!(
            Direction::from_tilt(Tilt { x: 0.1, y: 0.5 }, Direction::Left),
            Direction::Down
        );
        assert_eq!(
            Direction::from_tilt(Tilt { x: 0.1, y: -0.5 }, Direction::Left),
            Direction::Up
        );
    }
}
