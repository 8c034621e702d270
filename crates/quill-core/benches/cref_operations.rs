//! Benchmark suite for cref generation, parsing and resolution
//!
//! Runs over every symbol of the sample library so overloads, nested
//! generics and conversion operators are all represented.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use quill_core::codedoc::{DetailLevel, GraphRepository, MemberRepository, SearchContext};
use quill_core::cref::{generate, parse_query, CRef};
use quill_core::display::DisplayNameFormatter;
use quill_core::testutil::{system_library, test_library, test_library_overlay};
use quill_core::xmldoc::InheritDocMode;

fn all_crefs() -> Vec<CRef> {
    let graph = test_library();
    graph
        .symbols()
        .into_iter()
        .map(|symbol| generate(&graph, symbol).expect("sample symbols generate"))
        .collect()
}

/// Benchmark cref generation for every symbol
fn bench_generate(c: &mut Criterion) {
    let graph = test_library();
    let symbols = graph.symbols();

    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Elements(symbols.len() as u64));
    group.bench_function("all_symbols", |b| {
        b.iter(|| {
            for &symbol in &symbols {
                black_box(generate(&graph, symbol).ok());
            }
        });
    });
    group.finish();
}

/// Benchmark parsing cref text into queries
fn bench_parse(c: &mut Criterion) {
    let crefs = all_crefs();
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(crefs.len() as u64));
    group.bench_function("all_symbols", |b| {
        b.iter(|| {
            for cref in &crefs {
                black_box(parse_query(cref.as_str()).ok());
            }
        });
    });

    for text in [
        "T:TestLibrary1.Class1",
        "M:TestLibrary1.Generic1`2.Junk1``1(``0)",
        "M:TestLibrary1.Generic1`2.Combine(System.Collections.Generic.KeyValuePair{`0,`1},TestLibrary1.Generic1{System.Int32,System.String})",
    ] {
        group.bench_with_input(BenchmarkId::new("single", text.len()), text, |b, text| {
            b.iter(|| black_box(parse_query(text).ok()));
        });
    }
    group.finish();
}

/// Benchmark resolving parsed crefs back to symbols
fn bench_resolve(c: &mut Criterion) {
    let graph = test_library();
    let crefs = all_crefs();
    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(crefs.len() as u64));
    group.bench_function("round_trip", |b| {
        b.iter(|| {
            for cref in &crefs {
                black_box(graph.find(cref));
            }
        });
    });
    group.finish();
}

/// Benchmark display names with and without qualification
fn bench_display(c: &mut Criterion) {
    let graph = test_library();
    let symbols = graph.symbols();
    let mut group = c.benchmark_group("display_name");
    for (label, formatter) in [
        ("short", DisplayNameFormatter::new()),
        ("qualified", DisplayNameFormatter::qualified()),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| {
                for &symbol in &symbols {
                    black_box(formatter.display_name(&graph, symbol).ok());
                }
            });
        });
    }
    group.finish();
}

/// Benchmark full member lookups across two repositories
fn bench_lookup(c: &mut Criterion) {
    let target = GraphRepository::new(test_library()).with_overlay(
        test_library_overlay(InheritDocMode::ExplicitOrMissing).expect("sample docs parse"),
    );
    let system = GraphRepository::new(system_library());
    let crefs = all_crefs();

    let mut group = c.benchmark_group("lookup");
    for detail in [DetailLevel::Minimum, DetailLevel::Full] {
        let context = SearchContext::new(vec![&target, &system], detail);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{detail:?}")),
            &context,
            |b, context| {
                b.iter(|| {
                    for cref in &crefs {
                        black_box(context.search(cref));
                    }
                });
            },
        );
    }
    group.bench_function("direct_full", |b| {
        b.iter(|| {
            for cref in &crefs {
                black_box(target.lookup(cref, DetailLevel::Full));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_generate,
    bench_parse,
    bench_resolve,
    bench_display,
    bench_lookup,
);

criterion_main!(benches);
