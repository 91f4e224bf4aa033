use divan::{Bencher, black_box};
use phrasemine::record::Node;
use phrasemine::{Miner, MinerConfig, PruneStrategy, Record};
use serde_json::json;

fn main() {
    divan::main();
}

/// Synthetic corpus with heavy phrase overlap across records
fn corpus(size: usize) -> Vec<Record> {
    let templates = [
        "systolic blood pressure measured at rest",
        "diastolic blood pressure measured at rest",
        "systolic blood pressure measured after exercise",
        "resting heart rate in beats per minute",
        "maximum heart rate during graded exercise",
    ];
    (0..size)
        .map(|i| {
            let text = templates[i % templates.len()];
            Record::new(
                format!("C{}", i),
                Node::from_json(json!({ "definition": text })),
            )
        })
        .collect()
}

#[divan::bench(args = ["none", "per-id", "global", "threshold"])]
fn mine_with_strategy(bencher: Bencher, strategy: &str) {
    let prune: PruneStrategy = strategy.parse().unwrap();
    let records = corpus(200);
    let miner = Miner::new(MinerConfig {
        field_names: vec!["definition".to_string()],
        min_ids: 1,
        prune,
        ..MinerConfig::default()
    })
    .unwrap();

    bencher.bench_local(|| miner.mine(black_box(&records)));
}
