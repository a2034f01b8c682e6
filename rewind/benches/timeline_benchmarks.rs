use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rewind::segments::partition;
use rewind::{ActionLog, RecordedAction, ReplayData, ReplaySession, Segmentation, Timeline};

const LOREM: &str = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod \
                     tempor incididunt ut labore et dolore magna aliqua ";

fn text(len: usize) -> String {
    LOREM.chars().cycle().take(len).collect()
}

/// A recording that types `text` with a typo on every 20th character
fn recording(len: usize) -> ReplayData {
    let quote = text(len);
    let characters: Vec<char> = quote.chars().collect();
    let mut actions = Vec::with_capacity(len * 2);

    for i in 1..=len {
        if i % 20 == 0 {
            let mut typo: String = characters[..i - 1].iter().collect();
            typo.push('#');
            actions.push(RecordedAction::new(&typo, 80.0).with_typo("word"));
        }
        let input: String = characters[..i].iter().collect();
        actions.push(RecordedAction::new(&input, 120.0));
    }

    ReplayData {
        quote,
        actions,
        delays: (0..len).map(|i| 100.0 + (i % 7) as f64 * 10.0).collect(),
        raw_delays: (0..len).map(|i| 90.0 + (i % 5) as f64 * 10.0).collect(),
        graph: None,
    }
}

fn benchmark_timeline_precompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_precompute");

    let text_lengths = vec![100, 1000, 10000];

    for len in text_lengths {
        let data = recording(len);
        group.bench_with_input(BenchmarkId::new("timeline", len), &data, |b, data| {
            b.iter(|| {
                Timeline::new(
                    black_box(len),
                    black_box(&data.delays),
                    black_box(&data.raw_delays),
                )
            })
        });
    }

    group.finish();
}

fn benchmark_action_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("action_log");

    let text_lengths = vec![100, 1000];

    for len in text_lengths {
        let data = recording(len);
        group.bench_with_input(
            BenchmarkId::new("timestamps", data.actions.len()),
            &data,
            |b, data| b.iter(|| ActionLog::new(black_box(data.actions.clone()))),
        );
    }

    group.finish();
}

fn benchmark_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    let text_lengths = vec![50, 500, 5000];

    for len in text_lengths {
        let data = recording(len);
        group.bench_with_input(BenchmarkId::new("partition", len), &data, |b, data| {
            b.iter(|| partition(black_box(&data.quote)))
        });
        group.bench_with_input(BenchmarkId::new("from_delays", len), &data, |b, data| {
            b.iter(|| {
                Segmentation::from_delays(
                    black_box(&data.quote),
                    black_box(&data.delays),
                    black_box(&data.raw_delays),
                )
            })
        });
    }

    group.finish();
}

fn benchmark_session_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_load");

    let text_lengths = vec![100, 1000];

    for len in text_lengths {
        let data = recording(len);
        group.bench_with_input(BenchmarkId::new("new", len), &data, |b, data| {
            b.iter(|| ReplaySession::new(black_box(data.clone())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_timeline_precompute,
    benchmark_action_log,
    benchmark_segmentation,
    benchmark_session_load
);
criterion_main!(benches);
