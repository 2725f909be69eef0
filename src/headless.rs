//! Headless driver: line-delimited JSON over any reader/writer pair.
//!
//! Each input line is one action name (`moveLeft`, `moveRight`, `moveDown` or
//! `tick`, `rotate`, `hardDrop`, `pause`, `reset`, case-insensitive) or `quit`.
//! Each accepted action answers with an `observation`; anything else answers
//! with an `error` and the session continues. One observation is sent before
//! the first line is read.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::core::{PieceSource, Tetromino};
use crate::engine::{Engine, GameSnapshot, GameState, Landing};
use crate::logging::record_landing;
use crate::types::GameAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Observation(Observation),
    Error { code: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub seq: u64,
    /// Rows top to bottom; `null` or `"#rrggbb"` per cell
    pub board: Vec<Vec<Option<String>>>,
    pub current: Option<PieceView>,
    pub next: PieceView,
    pub ghost_y: Option<i8>,
    pub score: u32,
    pub paused: bool,
    pub game_over: bool,
    pub last_landing: Option<LandingView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub kind: &'static str,
    pub x: i8,
    pub y: i8,
    pub color: String,
    pub shape: Vec<Vec<u8>>,
}

impl From<&Tetromino> for PieceView {
    fn from(piece: &Tetromino) -> Self {
        Self {
            kind: piece.kind.letter(),
            x: piece.x,
            y: piece.y,
            color: piece.color.hex(),
            shape: piece.shape.rows(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LandingView {
    pub lines_cleared: u32,
    pub points: u32,
    pub topped_out: bool,
}

impl From<Landing> for LandingView {
    fn from(l: Landing) -> Self {
        Self {
            lines_cleared: l.lines_cleared,
            points: l.points,
            topped_out: l.topped_out,
        }
    }
}

impl Observation {
    /// `landing` is the landing caused by the step being reported, if any.
    pub fn from_snapshot(seq: u64, snap: &GameSnapshot, landing: Option<Landing>) -> Self {
        Self {
            seq,
            board: snap
                .board
                .iter()
                .map(|row| row.iter().map(|c| c.map(|color| color.hex())).collect())
                .collect(),
            current: snap.current.as_ref().map(PieceView::from),
            next: PieceView::from(&snap.next),
            ghost_y: snap.ghost_y,
            score: snap.score,
            paused: snap.paused,
            game_over: snap.game_over,
            last_landing: landing.map(LandingView::from),
        }
    }
}

/// One headless game bound to an output stream.
pub struct Session<'e, S: PieceSource, W: Write> {
    engine: &'e mut Engine<S>,
    state: GameState,
    out: W,
    seq: u64,
}

impl<'e, S: PieceSource, W: Write> Session<'e, S, W> {
    /// Start a game and send the first observation.
    pub fn start(engine: &'e mut Engine<S>, out: W) -> Result<Self> {
        let state = engine.create_game();
        let mut session = Self {
            engine,
            state,
            out,
            seq: 0,
        };
        session.observe(None)?;
        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Handle one input line. Returns `false` once the client asked to quit.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        let cmd = line.trim();
        if cmd.is_empty() {
            return Ok(true);
        }
        if cmd.eq_ignore_ascii_case("quit") {
            return Ok(false);
        }

        match GameAction::from_str(cmd) {
            Some(action) => {
                let (next, landing) = self.engine.step(&self.state, action);
                self.state = next;
                if let Some(landing) = landing {
                    record_landing(landing, self.state.score());
                }
                self.observe(landing)?;
            }
            None => {
                warn!(command = cmd, "unknown action");
                self.send(&Message::Error {
                    code: "unknown_action".to_string(),
                    message: format!("unknown action: {}", cmd),
                })?;
            }
        }
        Ok(true)
    }

    fn observe(&mut self, landing: Option<Landing>) -> Result<()> {
        self.seq += 1;
        let obs = Observation::from_snapshot(self.seq, &self.state.snapshot(), landing);
        self.send(&Message::Observation(obs))
    }

    fn send(&mut self, msg: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.out, msg).context("encode message")?;
        self.out.write_all(b"\n")?;
        self.out.flush().context("flush output")?;
        Ok(())
    }
}

/// Serve a whole session: read until EOF or `quit`, return the final state.
pub fn run<S, R, W>(engine: &mut Engine<S>, input: R, out: W) -> Result<GameState>
where
    S: PieceSource,
    R: BufRead,
    W: Write,
{
    let mut session = Session::start(engine, out)?;
    for line in input.lines() {
        let line = line.context("read command")?;
        if !session.handle_line(&line)? {
            break;
        }
    }
    info!(score = session.state().score(), "headless session finished");
    Ok(session.state.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn observation_shape() {
        let mut engine = Engine::new(1);
        let state = engine.create_game();
        let obs = Observation::from_snapshot(1, &state.snapshot(), None);

        assert_eq!(obs.board.len(), 20);
        assert!(obs.board.iter().all(|row| row.len() == 10 && row.iter().all(|c| c.is_none())));
        let current = obs.current.expect("current piece");
        assert_eq!(current.y, 0);
        assert_eq!(current.shape.len(), current.shape[0].len());
        assert!(obs.last_landing.is_none());
    }

    #[test]
    fn piece_view_uses_letter_and_hex() {
        let view = PieceView::from(&Tetromino::spawn(PieceKind::T));
        assert_eq!(view.kind, "T");
        assert_eq!(view.color, "#a000f0");
        assert_eq!(view.shape, vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 0, 0]]);
    }

    #[test]
    fn error_message_json() {
        let msg = Message::Error {
            code: "unknown_action".to_string(),
            message: "unknown action: fly".to_string(),
        };
        let v: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "unknown_action");
    }

    #[test]
    fn session_counts_and_quits() {
        let mut engine = Engine::new(5);
        let mut out = Vec::new();
        {
            let mut session = Session::start(&mut engine, &mut out).unwrap();
            assert!(session.handle_line("left").unwrap());
            assert!(session.handle_line("   ").unwrap());
            assert!(session.handle_line("nope").unwrap());
            assert!(!session.handle_line("QUIT").unwrap());
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("\"seq\":2"));
        assert!(lines[2].contains("\"type\":\"error\""));
    }

    #[test]
    fn session_reports_landing_only_on_the_landing_step() {
        let mut engine = Engine::new(8);
        let mut out = Vec::new();
        {
            let mut session = Session::start(&mut engine, &mut out).unwrap();
            session.handle_line("hardDrop").unwrap();
            session.handle_line("pause").unwrap();
            session.handle_line("left").unwrap();
        }
        let msgs: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(msgs.len(), 4);
        assert!(msgs[1]["last_landing"].is_object());
        assert!(msgs[2]["last_landing"].is_null());
        assert!(msgs[3]["last_landing"].is_null());
    }
}
