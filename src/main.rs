//! Classic Tetris runner (default binary).
//!
//! `classic-tetris` plays in the terminal with crossterm input and the
//! framebuffer renderer. `classic-tetris headless` serves the JSON line
//! protocol on stdin/stdout instead.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::info;

use classic_tetris::config::{AppConfig, Mode};
use classic_tetris::engine::{Engine, GameState};
use classic_tetris::headless;
use classic_tetris::input::{handle_key_event, is_actionable, should_quit};
use classic_tetris::logging::{self, record_landing};
use classic_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use classic_tetris::types::GameAction;

fn main() -> Result<()> {
    let config = AppConfig::from_process()?;
    logging::init(&config)?;

    let seed = config.seed_or_random();
    info!(seed, drop_ms = config.drop_ms, mode = ?config.mode, "starting");
    let mut engine = Engine::new(seed);

    match config.mode {
        Mode::Headless => {
            headless::run(&mut engine, io::stdin().lock(), io::stdout().lock())?;
            Ok(())
        }
        Mode::Interactive => {
            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = run(&mut term, &mut engine, Duration::from_millis(config.drop_ms));

            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
    }
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine, drop_interval: Duration) -> Result<()> {
    let mut state = engine.create_game();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&state.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = drop_interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_actionable(key) => {
                    if should_quit(key) {
                        info!(score = state.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        state = step(engine, &state, action);
                        if action == GameAction::Reset {
                            last_tick = Instant::now();
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        if last_tick.elapsed() >= drop_interval {
            last_tick = Instant::now();
            state = step(engine, &state, GameAction::MoveDown);
        }
    }
}

fn step(engine: &mut Engine, state: &GameState, action: GameAction) -> GameState {
    let (next, landing) = engine.step(state, action);
    if let Some(landing) = landing {
        record_landing(landing, next.score());
    }
    next
}
