//! Integration Tests für die Snake-Spiellogik

use matrix_core::snake::{BODY_COLOR, FOOD_COLOR, GameState, HEAD_COLOR, INITIAL_LENGTH};
use matrix_core::{BoardProfile, Cell, Direction, LedMatrix, SnakeGame, TickOutcome};
use matrix_tests::LcgRng;
use rgb::RGB8;

fn new_game(seed: u64) -> (SnakeGame<64>, LcgRng) {
    let mut rng = LcgRng::new(seed);
    let board = BoardProfile::new(8, 8).unwrap();
    (SnakeGame::new(&board, &mut rng).unwrap(), rng)
}

fn assert_no_duplicates(game: &SnakeGame<64>) {
    let body = game.body();
    for (i, a) in body.iter().enumerate() {
        assert!(!body[i + 1..].contains(a), "Segment {a:?} doppelt");
    }
}

// ============================================================================
// Tests: Bewegung
// ============================================================================

#[test]
fn test_move_right_vacates_tail() {
    let (mut game, mut rng) = new_game(1);
    game.place_food(Cell::new(0, 0));

    assert_eq!(game.head(), Cell::new(4, 4));
    assert_eq!(game.tick(Direction::Right, &mut rng), TickOutcome::NormalMove);

    assert_eq!(game.head(), Cell::new(5, 4));
    assert_eq!(game.len(), INITIAL_LENGTH);
    assert!(!game.body().contains(&Cell::new(2, 4)));
}

#[test]
fn test_backward_request_is_noop() {
    let (mut game, mut rng) = new_game(2);
    game.place_food(Cell::new(0, 0));
    let before: Vec<Cell> = game.body().to_vec();

    assert_eq!(game.tick(Direction::Left, &mut rng), TickOutcome::NormalMove);
    assert_eq!(game.heading(), Direction::Right);
    assert_eq!(game.head(), Cell::new(4, 4));
    assert_eq!(game.body(), before.as_slice());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_backward_request_after_turn_hits_neck() {
    let (mut game, mut rng) = new_game(8);
    game.place_food(Cell::new(0, 0));

    // Nach unten abbiegen: Hals liegt jetzt oberhalb des Kopfes
    game.tick(Direction::Down, &mut rng);
    assert_eq!(game.head(), Cell::new(4, 5));
    assert_eq!(game.body()[1], Cell::new(4, 4));

    for _ in 0..3 {
        assert_eq!(game.tick(Direction::Up, &mut rng), TickOutcome::NormalMove);
        assert_eq!(game.head(), Cell::new(4, 5));
        assert_eq!(game.heading(), Direction::Down);
        assert_no_duplicates(&game);
    }

    // Weiter in alter Richtung
    game.tick(Direction::Down, &mut rng);
    assert_eq!(game.head(), Cell::new(4, 6));
}

#[test]
fn test_turn_changes_heading() {
    let (mut game, mut rng) = new_game(3);
    game.place_food(Cell::new(0, 0));

    game.tick(Direction::Down, &mut rng);
    assert_eq!(game.head(), Cell::new(4, 5));
    assert_eq!(game.body()[1], Cell::new(4, 4));
}

#[test]
fn test_long_random_walk_keeps_invariants() {
    let (mut game, mut rng) = new_game(42);
    let directions = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
    let mut eaten = 0;

    for step in 0..500 {
        let requested = directions[(step * 7 + step / 3) % 4];
        match game.tick(requested, &mut rng) {
            TickOutcome::FoodEaten => eaten += 1,
            TickOutcome::GameOver => {
                // Nächster Tick startet neu
                game.tick(requested, &mut rng);
                assert_eq!(game.len(), INITIAL_LENGTH);
                eaten = 0;
            }
            TickOutcome::NormalMove => {}
        }
        assert_eq!(game.len(), INITIAL_LENGTH + eaten);
        assert_eq!(usize::from(game.score()), eaten);
        assert_no_duplicates(&game);
        if let Some(food) = game.food() {
            assert!(!game.body().contains(&food));
        }
    }
}

// ============================================================================
// Tests: Futter und Game Over
// ============================================================================

#[test]
fn test_eating_grows_snake() {
    let (mut game, mut rng) = new_game(4);
    assert!(game.place_food(Cell::new(5, 4)));

    assert_eq!(game.tick(Direction::Right, &mut rng), TickOutcome::FoodEaten);
    assert_eq!(game.len(), INITIAL_LENGTH + 1);
    assert_eq!(game.head(), Cell::new(5, 4));
    assert_eq!(*game.body().last().unwrap(), Cell::new(2, 4));
    assert_ne!(game.food(), Some(Cell::new(5, 4)));
}

#[test]
fn test_food_not_placed_on_snake() {
    let (mut game, _) = new_game(5);
    assert!(!game.place_food(Cell::new(3, 4)));
    assert!(!game.place_food(Cell::new(8, 0)));
}

#[test]
fn test_self_collision_then_restart() {
    let (mut game, mut rng) = new_game(6);
    game.place_food(Cell::new(0, 0));

    // Auf 5 Segmente wachsen: Kopf (4,4) -> (5,4) -> (6,4)
    assert!(game.place_food(Cell::new(5, 4)));
    game.tick(Direction::Right, &mut rng);
    assert!(game.place_food(Cell::new(6, 4)));
    game.tick(Direction::Right, &mut rng);
    assert!(game.place_food(Cell::new(0, 0)));
    assert_eq!(game.len(), 5);

    // Kreis nach unten, links, oben läuft in den eigenen Körper
    assert_eq!(game.tick(Direction::Down, &mut rng), TickOutcome::NormalMove);
    assert_eq!(game.tick(Direction::Left, &mut rng), TickOutcome::NormalMove);
    assert_eq!(game.tick(Direction::Up, &mut rng), TickOutcome::GameOver);
    assert_eq!(game.state(), GameState::GameOver);

    assert_eq!(game.tick(Direction::Up, &mut rng), TickOutcome::NormalMove);
    assert_eq!(game.state(), GameState::Running);
    assert_eq!(game.len(), INITIAL_LENGTH);
    assert_eq!(game.head(), Cell::new(4, 4));
    assert_eq!(game.score(), 0);
}

// ============================================================================
// Tests: Rendering
// ============================================================================

#[test]
fn test_render_colors() {
    let (mut game, _) = new_game(7);
    game.place_food(Cell::new(0, 0));
    let mut matrix = LedMatrix::<64>::new(BoardProfile::new(8, 8).unwrap()).unwrap();
    game.render(&mut matrix);

    assert_eq!(matrix.get(4, 4), HEAD_COLOR);
    assert_eq!(matrix.get(3, 4), BODY_COLOR);
    assert_eq!(matrix.get(2, 4), BODY_COLOR);
    assert_eq!(matrix.get(0, 0), FOOD_COLOR);
    let lit = matrix.pixels().iter().filter(|p| **p != RGB8::default()).count();
    assert_eq!(lit, 4);
}
