use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_stacker::core::{
    Cell, GameOptions, Grid, Piece, Position, Round, RoundSnapshot, Session, Turn,
};
use tui_stacker::types::{BlockColor, GameAction, InputSnapshot, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut round = Round::new(GameOptions {
        seed: 12345,
        ..GameOptions::default()
    });

    c.bench_function("round_tick_16ms", |b| {
        b.iter(|| {
            if round.game_over() {
                round.start();
            }
            round.tick(black_box(0.016), &InputSnapshot::NONE);
        })
    });
}

fn bench_hard_drop_tick(c: &mut Criterion) {
    let mut round = Round::new(GameOptions {
        seed: 12345,
        ..GameOptions::default()
    });
    let input = InputSnapshot::press(GameAction::HardDrop);

    c.bench_function("round_tick_hard_drop", |b| {
        b.iter(|| {
            if round.game_over() {
                round.start();
            }
            round.tick(black_box(0.016), &input);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    grid.set(x, y, Cell::locked(BlockColor::SkyBlue));
                }
            }
            for row in 16..20 {
                grid.clear_line(black_box(row));
            }
            grid
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let grid = Grid::new(10, 20);
    let piece = Piece::main(PieceKind::T);

    c.bench_function("can_piece_exist_at", |b| {
        b.iter(|| grid.can_piece_exist_at(black_box(&piece), Position::new(4, 10)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut round = Round::new(GameOptions {
        seed: 12345,
        ..GameOptions::default()
    });

    c.bench_function("rotate", |b| {
        b.iter(|| {
            round.rotate(black_box(Turn::Right));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let round = Round::new(GameOptions::default());
    let mut snap = RoundSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            round.snapshot_into(&mut snap);
        })
    });
}

fn bench_session_tick(c: &mut Criterion) {
    let mut session = Session::default();
    session.tick(0.0, &InputSnapshot::press(GameAction::HardDrop));

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(0.016), &InputSnapshot::NONE);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_hard_drop_tick,
    bench_line_clear,
    bench_collision,
    bench_rotate,
    bench_snapshot,
    bench_session_tick
);
criterion_main!(benches);
