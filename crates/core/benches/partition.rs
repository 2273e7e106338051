use chrono::{DateTime, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use miqat_core::BlockPartitioner;
use miqat_domain::{BlockConfig, PrayerTimes};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, hour, min, 0).single().unwrap()
}

fn sample_times(with_qiyam: bool) -> PrayerTimes {
    let times = PrayerTimes {
        fajr: at(5, 30),
        dhuhr: at(12, 30),
        asr: at(15, 45),
        maghrib: at(18, 15),
        isha: at(19, 45),
        qiyam: None,
    };
    if with_qiyam {
        times.with_qiyam(at(2, 30))
    } else {
        times
    }
}

fn partition_benchmark(c: &mut Criterion) {
    let builder = BlockPartitioner::new(BlockConfig::default()).expect("valid default config");

    let mut group = c.benchmark_group("partition");

    group.bench_function("five_prayers", |b| {
        let times = sample_times(false);
        b.iter(|| builder.partition(black_box(&times)));
    });

    group.bench_function("with_qiyam", |b| {
        let times = sample_times(true);
        b.iter(|| builder.partition(black_box(&times)));
    });

    group.bench_function("trim_overlaps", |b| {
        let config = BlockConfig { trim_overlaps: true, ..BlockConfig::default() };
        let trimming = BlockPartitioner::new(config).expect("valid trimming config");
        let times = sample_times(true);
        b.iter(|| trimming.partition(black_box(&times)));
    });

    group.finish();
}

criterion_group!(core_benchmarks, partition_benchmark);
criterion_main!(core_benchmarks);
