//! Loader fan-out benchmarks.
//!
//! Measures a full load cycle from disk: spawn, read, parse, clean, coerce
//! and join.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `load_all/sources` | Cycle time at 1, 5 and 20 concurrent sources |
//! | `dashboard` | The five-source dashboard cycle |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench loader_bench
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dashfeed::{Dashboard, Loader, SourceDescriptor, SourceKind};
use std::path::Path;

fn write_inventory(dir: &Path, name: &str, rows: usize) -> SourceDescriptor {
    let mut body = String::from("Product_Category,Current_Stock\n");
    for i in 0..rows {
        body.push_str(&format!("category-{i},{i}\n"));
    }
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    SourceDescriptor::new(SourceKind::Inventory, path.to_string_lossy())
}

fn load_all_bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut group = c.benchmark_group("load_all/sources");

    for count in [1usize, 5, 20] {
        let sources: Vec<_> = (0..count)
            .map(|i| write_inventory(dir.path(), &format!("inv-{count}-{i}.csv"), 500))
            .collect();
        let loader: Loader = Loader::default();

        group.bench_with_input(BenchmarkId::new("sources", count), &sources, |b, sources| {
            b.to_async(&runtime)
                .iter(|| async { loader.load_all(sources).await.unwrap() })
        });
    }

    group.finish();
}

fn dashboard_bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let bodies = [
        (SourceKind::Sales, "Date,Revenue_USD\n2024-01-01,120.50\n2024-01-02,99.00\n"),
        (SourceKind::Tracks, "Track_ID,Purchase_Count\n1,12\n2,40\n"),
        (SourceKind::Customers, "Age_Group,Total_Purchases\n18-25,120\n60+,60\n"),
        (SourceKind::Genres, "Genre,Total_Minutes_Played\nRock,5400\n"),
        (SourceKind::Inventory, "Product_Category,Current_Stock\nWidgets,42\n"),
    ];
    let sources: Vec<_> = bodies
        .iter()
        .map(|(kind, body)| {
            let path = dir.path().join(kind.default_file());
            std::fs::write(&path, body).unwrap();
            SourceDescriptor::new(*kind, path.to_string_lossy())
        })
        .collect();
    let loader: Loader = Loader::default();

    c.bench_function("dashboard", |b| {
        b.to_async(&runtime)
            .iter(|| async { Dashboard::load(&loader, &sources).await.unwrap() })
    });
}

criterion_group!(loader_benches, load_all_bench, dashboard_bench);
criterion_main!(loader_benches);
