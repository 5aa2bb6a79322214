//! Terminal stacker runner (default binary).
//!
//! Fixed-timestep loop: crossterm input is folded into one snapshot per tick,
//! the session advances by exactly one tick, and the framebuffer renderer
//! draws the resulting snapshot.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_stacker::cli::{parse_args, Command, USAGE};
use tui_stacker::core::{GameEvent, GameOptions, Session, SessionSnapshot};
use tui_stacker::input::{should_quit, InputHandler};
use tui_stacker::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const TICK: Duration = Duration::from_millis(16);

/// Totals printed after the terminal is restored
#[derive(Debug, Default)]
struct RunSummary {
    rounds: u32,
    best_score: u32,
    best_lines: u32,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args, clock_seed()) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("[tui-stacker] {}", e);
            eprintln!("[tui-stacker] run with --help for usage");
            return Err(e);
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, options);

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    if summary.rounds > 0 {
        eprintln!(
            "[tui-stacker] rounds={} best_score={} best_lines={} seed={}",
            summary.rounds, summary.best_score, summary.best_lines, options.seed
        );
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, options: GameOptions) -> Result<RunSummary> {
    let mut session = Session::new(options);
    let mut summary = RunSummary::default();

    let view = GameView::default();
    let mut input = InputHandler::new().with_release_events(term.reports_key_release());
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_s = TICK.as_secs_f32();
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = TICK.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(summary);
                    }
                    input.handle_key(key);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= TICK {
            last_tick = Instant::now();

            let frame = input.frame();
            let out = session.tick(tick_s, &frame);

            for event in &out.events {
                if let Some(cue) = event.sound_cue() {
                    term.play(cue)?;
                }
                if let GameEvent::RoundEnded { .. } = event {
                    if let Some(round) = session.round() {
                        summary.rounds += 1;
                        summary.best_score = summary.best_score.max(round.score());
                        summary.best_lines = summary.best_lines.max(round.lines());
                    }
                }
            }

            if out.quit {
                return Ok(summary);
            }
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
