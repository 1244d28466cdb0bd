/// Benchmarks for scan cycles and front matter rewriting
use chrono::DateTime;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use post_stamp::clock::FixedClock;
use post_stamp::front_matter::FrontMatterFormat;
use post_stamp::scanner::DocumentWalker;
use post_stamp::stamper::DateUpdater;
use post_stamp::tracker::Tracker;
use tempfile::TempDir;

/// Helper to create test posts
fn create_test_posts(dir: &TempDir, count: usize) -> anyhow::Result<()> {
    for i in 0..count {
        let content = format!(
            "---\nlayout: post\ntitle: Post {i}\ndate: 2020-01-01 00:00:00 +0000\n---\n\n{}\n",
            "Lorem ipsum dolor sit amet. ".repeat(200)
        );
        std::fs::write(dir.path().join(format!("2020-01-01-post-{i}.md")), content)?;
    }
    Ok(())
}

fn benchmark_quiet_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("quiet_cycle");
    let updater = DateUpdater::with_clock(
        FrontMatterFormat::new("---", "date").unwrap(),
        FixedClock(DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z").unwrap()),
    );

    for post_count in [10, 100, 500].iter() {
        let posts = TempDir::new().unwrap();
        create_test_posts(&posts, *post_count).unwrap();
        let mut tracker = Tracker::new(DocumentWalker::new(posts.path()));
        tracker.initialize().unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_posts", post_count)),
            post_count,
            |b, _| b.iter(|| black_box(tracker.scan_cycle(&updater))),
        );
    }

    group.finish();
}

fn benchmark_stamp(c: &mut Criterion) {
    let format = FrontMatterFormat::new("---", "date").unwrap();
    let with_date = format!(
        "---\nlayout: post\ndate: 2020-01-01 00:00:00 +0000\ntags: [a, b]\n---\n{}",
        "body\n".repeat(1_000)
    );
    let without_date = with_date.replace("date: 2020-01-01 00:00:00 +0000\n", "");

    c.bench_function("stamp_replace", |b| {
        b.iter(|| format.stamp(black_box(&with_date), "2024-06-15 12:00:00 +0000"))
    });
    c.bench_function("stamp_append", |b| {
        b.iter(|| format.stamp(black_box(&without_date), "2024-06-15 12:00:00 +0000"))
    });
}

criterion_group!(benches, benchmark_quiet_cycle, benchmark_stamp);
criterion_main!(benches);
