//! Engine tests - game flow from creation to game over

use classic_tetris::core::{Board, PieceBag, PieceSource, Shuffler, Tetromino};
use classic_tetris::engine::{Engine, GameState, Landing, Phase};
use classic_tetris::types::{Color, GameAction, PieceKind};

const GRAY: Color = Color::new(128, 128, 128);

/// Hands out the given kinds in a loop.
struct Cycle {
    kinds: Vec<PieceKind>,
    i: usize,
}

impl Cycle {
    fn new(kinds: &[PieceKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            i: 0,
        }
    }
}

impl PieceSource for Cycle {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.i % self.kinds.len()];
        self.i += 1;
        kind
    }
}

/// Leaves every bag in catalog order.
struct InOrder;

impl Shuffler for InOrder {
    fn shuffle(&mut self, _kinds: &mut [PieceKind]) {}
}

const ALL_ACTIONS: [GameAction; 7] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::MoveDown,
    GameAction::Rotate,
    GameAction::HardDrop,
    GameAction::Pause,
    GameAction::Reset,
];

#[test]
fn test_create_game_spawns_without_collision() {
    for seed in 0..100u32 {
        let mut engine = Engine::new(seed);
        let state = engine.create_game();
        let current = state.current().expect("current piece");
        assert!(!state.board().collides(current, 0, 0), "seed {}", seed);
        assert_eq!(current.y, 0);
        assert_eq!(state.next().y, 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.phase(), Phase::Active);
    }
}

#[test]
fn test_first_pieces_follow_the_bag() {
    let mut engine = Engine::with_source(PieceBag::with_shuffler(InOrder));
    let state = engine.create_game();
    assert_eq!(state.current().unwrap().kind, PieceKind::I);
    assert_eq!(state.next().kind, PieceKind::J);

    let state = engine.hard_drop(&state);
    assert_eq!(state.current().unwrap().kind, PieceKind::J);
    assert_eq!(state.next().kind, PieceKind::L);
}

#[test]
fn test_bag_fairness_over_engine_draws() {
    let mut engine = Engine::new(77);
    let mut state = engine.create_game();
    let mut seen = vec![state.current().unwrap().kind, state.next().kind];
    while seen.len() < 70 {
        state = engine.hard_drop(&state);
        if state.is_game_over() {
            state = engine.reset(&state);
            seen.push(state.current().unwrap().kind);
        }
        seen.push(state.next().kind);
    }
    for bag in seen[..70].chunks(7) {
        let mut sorted = bag.to_vec();
        sorted.sort();
        assert_eq!(sorted, PieceKind::ALL.to_vec());
    }
}

#[test]
fn test_move_left_at_wall_is_noop() {
    let mut engine = Engine::with_source(Cycle::new(&[PieceKind::O]));
    let mut state = engine.create_game();
    // O starts at column 4.
    for _ in 0..4 {
        state = state.move_left();
    }
    assert_eq!(state.current().unwrap().x, 0);
    assert_eq!(state.move_left(), state);
    assert_eq!(engine.apply(&state, GameAction::MoveLeft), state);
}

#[test]
fn test_move_right_at_wall_is_noop() {
    let mut engine = Engine::with_source(Cycle::new(&[PieceKind::I]));
    let mut state = engine.create_game();
    for _ in 0..10 {
        state = state.move_right();
    }
    // I is 4 wide, starting in column 3; it stops at column 6.
    assert_eq!(state.current().unwrap().x, 6);
}

#[test]
fn test_rotation_into_wall_is_rejected() {
    let board = Board::from_ascii(&[".##......."], GRAY);
    // Vertical I in column 0 (box x = -2), bottom cell resting on row 19.
    let piece = Tetromino::spawn(PieceKind::I).rotated().shifted(-5, 16);
    assert_eq!(piece.board_cells().map(|(x, _)| x).max(), Some(0));
    assert!(!board.collides(&piece, 0, 0));
    assert!(board.collides(&piece, 0, 1));

    let state = GameState::from_parts(board, piece, Tetromino::spawn(PieceKind::O), 0);
    // Turning back to horizontal would hit the wall at x = -2.
    assert_eq!(state.rotate(), state);
}

#[test]
fn test_pause_blocks_everything_but_pause_and_reset() {
    let mut engine = Engine::new(9);
    let state = engine.create_game();
    let paused = engine.apply(&state, GameAction::Pause);
    assert!(paused.is_paused());

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveDown,
        GameAction::Rotate,
        GameAction::HardDrop,
    ] {
        assert_eq!(engine.apply(&paused, action), paused, "{:?}", action);
    }
    assert_eq!(engine.tick(&paused), paused);

    let resumed = engine.apply(&paused, GameAction::Pause);
    assert_eq!(resumed.phase(), Phase::Active);
    assert_eq!(resumed.current(), state.current());

    let reset = engine.apply(&paused, GameAction::Reset);
    assert_eq!(reset.phase(), Phase::Active);
}

#[test]
fn test_single_line_clear_scores_100() {
    let mut engine = Engine::with_source(Cycle::new(&[PieceKind::I]));
    let board = Board::from_ascii(&["###....###"], GRAY);
    let state = GameState::from_parts(
        board,
        Tetromino::spawn(PieceKind::I),
        Tetromino::spawn(PieceKind::I),
        250,
    );

    let next = engine.apply(&state, GameAction::HardDrop);
    assert_eq!(next.score(), 350);
    assert_eq!(next.board().filled_count(), 0);
    assert_eq!(
        next.last_landing(),
        Some(Landing {
            lines_cleared: 1,
            points: 100,
            topped_out: false
        })
    );
}

#[test]
fn test_tetris_scores_800() {
    let mut engine = Engine::with_source(Cycle::new(&[PieceKind::I]));
    let board = Board::from_ascii(
        &[
            "#########.",
            "#########.",
            "#########.",
            "#########.",
        ],
        GRAY,
    );
    // Vertical I lined up with column 9.
    let piece = Tetromino::spawn(PieceKind::I).rotated().shifted(4, 0);
    let state = GameState::from_parts(board, piece, Tetromino::spawn(PieceKind::I), 0);

    let next = engine.hard_drop(&state);
    assert_eq!(next.score(), 800);
    assert_eq!(next.last_landing().unwrap().lines_cleared, 4);
    assert_eq!(next.board().filled_count(), 0);
}

#[test]
fn test_landing_event_only_on_landing_state() {
    let mut engine = Engine::with_source(Cycle::new(&[PieceKind::T]));
    let state = engine.create_game();
    let landed = engine.hard_drop(&state);
    assert!(landed.last_landing().is_some());

    let moved = landed.move_left();
    assert!(moved.last_landing().is_none());
    let ticked = engine.tick(&landed);
    assert!(ticked.last_landing().is_none());
}

#[test]
fn test_game_over_ticks_do_not_repeat_landing() {
    let mut engine = Engine::with_source(Cycle::new(&[PieceKind::O]));
    let mut state = engine.create_game();
    let mut landings = Vec::new();
    while !state.is_game_over() {
        let (next, landing) = engine.step(&state, GameAction::HardDrop);
        landings.extend(landing);
        state = next;
    }
    for _ in 0..3 {
        let (next, landing) = engine.step(&state, GameAction::MoveDown);
        landings.extend(landing);
        state = next;
    }
    assert_eq!(landings.len(), 10);
    assert_eq!(landings.iter().filter(|l| l.topped_out).count(), 1);
}

#[test]
fn test_o_stack_game_over() {
    let mut engine = Engine::with_source(Cycle::new(&[PieceKind::O]));
    let mut state = engine.create_game();
    let mut last_score = state.score();

    while !state.is_game_over() {
        state = engine.hard_drop(&state);
        let landing = state.last_landing().expect("hard drop always lands");
        assert_eq!(landing.lines_cleared, 0);
        assert_eq!(state.score(), last_score);
        last_score = state.score();
    }

    assert_eq!(state.score(), 0);
    assert!(state.board().is_top_row_occupied());
    assert_eq!(state.board().filled_count(), 40);
    assert_eq!(state.phase(), Phase::GameOver);

    for action in ALL_ACTIONS.iter().filter(|&&a| a != GameAction::Reset) {
        assert_eq!(engine.apply(&state, *action), state, "{:?}", action);
    }

    let fresh = engine.apply(&state, GameAction::Reset);
    assert_eq!(fresh.phase(), Phase::Active);
    assert_eq!(fresh.score(), 0);
    assert_eq!(fresh.board().filled_count(), 0);
}

#[test]
fn test_random_play_keeps_invariants() {
    for seed in 0..20u32 {
        let mut engine = Engine::new(seed);
        let mut script = classic_tetris::core::SimpleRng::new(seed.wrapping_add(1000));
        let mut state = engine.create_game();

        for _ in 0..400 {
            let action = ALL_ACTIONS[script.next_range(6) as usize];
            let before = state.clone();
            let (next, landing) = engine.step(&state, action);
            state = next;

            assert!(state.score() >= before.score());
            match landing {
                Some(landing) => {
                    assert_eq!(state.score() - before.score(), landing.points);
                    assert!(landing.lines_cleared <= 4);
                }
                None => assert_eq!(state.score(), before.score()),
            }
            for y in 0..20 {
                assert!(!state.board().is_row_full(y), "seed {} row {}", seed, y);
            }
            assert_eq!(state.current().is_none(), state.is_game_over());
            if state.is_game_over() {
                state = engine.reset(&state);
            }
        }
    }
}
