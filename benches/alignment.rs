//! アラインメントエンジンのベンチマーク
//!
//! 字幕同期で典型的な「原稿 vs 認識トランスクリプト」規模の文字系列に
//! 対する大域アラインメントの速度を計測します。

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use yomigana::align;

/// 周期的なかな列に一定割合の置換・脱落を混ぜた擬似トランスクリプトを作る
fn synthesize(len: usize, corruption_period: usize) -> (Vec<char>, Vec<char>) {
    let base: Vec<char> = "あいうえおかきくけこさしすせそたちつてと".chars().collect();
    let manuscript: Vec<char> = (0..len).map(|i| base[i % base.len()]).collect();
    let transcript: Vec<char> = manuscript
        .iter()
        .enumerate()
        .filter(|(i, _)| i % (corruption_period * 3) != 0)
        .map(|(i, &c)| if i % corruption_period == 1 { '〇' } else { c })
        .collect();
    (manuscript, transcript)
}

fn benchmark_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("Global Alignment");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for len in [1_000, 4_000, 16_000] {
        let (manuscript, transcript) = synthesize(len, 17);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_function(BenchmarkId::new("Hirschberg", len), |b| {
            b.iter(|| align(&manuscript, &transcript, 10, -3, -2).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_alignment);
criterion_main!(benches);
