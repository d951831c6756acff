//! Headless autoplay: build a board, take the first legal move until none
//! remain (or a move cap is hit), printing each grid and the running score.
//!
//! Usage: tilematch [ROWS COLS] [SEED] [MAX_MOVES]

use anyhow::{Context, Result};

use tilematch::types::DEFAULT_SHAPE;
use tilematch::Board;

struct Args {
    rows: usize,
    cols: usize,
    seed: Option<u32>,
    max_moves: usize,
}

fn parse_args() -> Result<Args> {
    let raw: Vec<String> = std::env::args().skip(1).collect();

    let mut args = Args {
        rows: DEFAULT_SHAPE.0,
        cols: DEFAULT_SHAPE.1,
        seed: None,
        max_moves: 1000,
    };

    let mut rest = raw.as_slice();
    if rest.len() >= 2 {
        args.rows = rest[0]
            .parse()
            .with_context(|| format!("bad row count {:?}", rest[0]))?;
        args.cols = rest[1]
            .parse()
            .with_context(|| format!("bad column count {:?}", rest[1]))?;
        rest = &rest[2..];
    }
    if let Some(seed) = rest.first() {
        args.seed = Some(
            seed.parse()
                .with_context(|| format!("bad seed {seed:?}"))?,
        );
        rest = &rest[1..];
    }
    if let Some(cap) = rest.first() {
        args.max_moves = cap
            .parse()
            .with_context(|| format!("bad move cap {cap:?}"))?;
    }

    Ok(args)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let mut board = Board::new((args.rows, args.cols), args.seed)
        .context("failed to build board")?;
    println!("seed {}", board.seed());
    println!("{board_grid}\n", board_grid = board.grid());

    let mut score = 0u64;
    let mut moves = 0usize;
    while moves < args.max_moves {
        let Some((seed, targ)) = board.automove_hint() else {
            break;
        };
        let points = board.attempt_swap(seed, targ);
        score += points;
        moves += 1;
        println!("move {moves}: {seed:?} <-> {targ:?} (+{points})");
        println!("{grid}\n", grid = board.grid());
    }

    if moves == args.max_moves {
        println!("move cap reached after {moves} moves, score {score}");
    } else {
        println!("no moves left after {moves} moves, score {score}");
    }
    Ok(())
}
