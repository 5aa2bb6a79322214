//! Command-line arguments for the terminal runner.

use anyhow::{anyhow, Result};

use crate::core::GameOptions;
use crate::types::{GameMode, DEFAULT_SPRINT_LINES};

pub const USAGE: &str = "\
usage: tui-stacker [options]

  --width N      playfield width in cells (3-30, default 10)
  --height N     playfield height in cells (16-60, default 20)
  --queue N      upcoming pieces shown (1-6, default 3)
  --no-ghost     hide the landing preview
  --seed N       piece sequence seed (default: clock)
  --sprint [N]   preselect sprint mode with an N line goal (default 40)
  --help         show this message

keys: arrows/hjkl move, up/x/k rotate cw, z rotate ccw, tab rotate 180,
      space/enter drop, c hold, p/esc pause, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run(GameOptions),
    Help,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, raw))
}

/// Parse arguments (without the program name). `default_seed` is used when
/// `--seed` is absent.
pub fn parse_args(args: &[String], default_seed: u32) -> Result<Command> {
    let mut options = GameOptions {
        seed: default_seed,
        ..GameOptions::default()
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                options.grid_width = number(value(args, i, "--width")?, "--width")?;
            }
            "--height" => {
                i += 1;
                options.grid_height = number(value(args, i, "--height")?, "--height")?;
            }
            "--queue" => {
                i += 1;
                options.upcoming_pieces = number(value(args, i, "--queue")?, "--queue")?;
            }
            "--seed" => {
                i += 1;
                options.seed = number(value(args, i, "--seed")?, "--seed")?;
            }
            "--no-ghost" => options.show_ghost = false,
            "--sprint" => {
                let target = match args.get(i + 1).and_then(|v| v.parse::<u32>().ok()) {
                    Some(n) => {
                        i += 1;
                        n
                    }
                    None => DEFAULT_SPRINT_LINES,
                };
                options.mode = GameMode::Sprint {
                    target_lines: target,
                };
            }
            "-h" | "--help" => return Ok(Command::Help),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    options
        .validate()
        .map_err(|e| anyhow!("{} ({})", e, e.code()))?;
    Ok(Command::Run(options))
}
