//! Search benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full search with varying round counts
//! - Search from different game phases (opening, midgame, near-terminal)
//! - Individual tree operations (selection, expansion, best-move extraction)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use game_core::GameState;
use games_tictactoe::TicTacToeState;
use mcts::{Mcts, SearchConfig, SearchTree, Uct};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Board state after playing a sequence of moves from the empty board.
fn play_moves(moves: &[u8]) -> TicTacToeState {
    moves
        .iter()
        .fold(TicTacToeState::new(), |s, mv| s.apply(mv).unwrap())
}

fn bench_search_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_rounds");

    for rounds in [50, 100, 200, 400, 800, 1600] {
        group.throughput(Throughput::Elements(rounds as u64));
        group.bench_with_input(
            BenchmarkId::new("tictactoe", rounds),
            &rounds,
            |b, &rounds| {
                let config = SearchConfig::default().with_rounds(rounds);
                b.iter(|| {
                    let mut search = Mcts::from_seed(TicTacToeState::new(), Uct, 42);
                    black_box(search.run(&config).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_game_phases");
    let config = SearchConfig::default().with_rounds(200);

    // Opening position (all 9 moves available)
    group.bench_function("opening", |b| {
        b.iter(|| {
            let mut search = Mcts::from_seed(TicTacToeState::new(), Uct, 42);
            black_box(search.run(&config).unwrap())
        });
    });

    // Midgame position (5 moves available)
    // Board: X at 4, O at 0, X at 2, O at 6
    group.bench_function("midgame", |b| {
        b.iter(|| {
            let state = play_moves(&[4, 0, 2, 6]);
            let mut search = Mcts::from_seed(state, Uct, 42);
            black_box(search.run(&config).unwrap())
        });
    });

    // Near-terminal position (winning move available)
    // Board: X at 0, O at 3, X at 1, O at 4 -> X can win at 2
    group.bench_function("near_terminal", |b| {
        b.iter(|| {
            let state = play_moves(&[0, 3, 1, 4]);
            let mut search = Mcts::from_seed(state, Uct, 42);
            black_box(search.run(&config).unwrap())
        });
    });

    group.finish();
}

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_tree_ops");

    // Fully expand the root and accumulate some statistics.
    fn warmed_tree(rounds: u32) -> SearchTree<TicTacToeState> {
        let mut tree = SearchTree::new(TicTacToeState::new());
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for _ in 0..rounds {
            tree.mc_round(&Uct, &mut rng).unwrap();
        }
        tree
    }

    // Benchmark one full round on a warm tree
    group.bench_function("mc_round_warm", |b| {
        b.iter_batched(
            || (warmed_tree(100), ChaCha20Rng::seed_from_u64(7)),
            |(mut tree, mut rng)| {
                tree.mc_round(&Uct, &mut rng).unwrap();
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // Benchmark the selection descent alone
    group.bench_function("select", |b| {
        let tree = warmed_tree(400);
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        b.iter(|| black_box(tree.select(tree.root(), &Uct, &mut rng)));
    });

    // Benchmark expansion of a fresh root
    group.bench_function("expand", |b| {
        b.iter_batched(
            || {
                (
                    SearchTree::new(TicTacToeState::new()),
                    ChaCha20Rng::seed_from_u64(7),
                )
            },
            |(mut tree, mut rng)| {
                let root = tree.root();
                black_box(tree.expand(root, &mut rng).unwrap())
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // Benchmark best-move extraction
    group.bench_function("best_move", |b| {
        let tree = warmed_tree(400);
        b.iter(|| black_box(tree.best_move()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_rounds,
    bench_game_phases,
    bench_tree_operations,
);

criterion_main!(benches);
