//! Criterion benchmarks for toonkit critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Color: slot color resolution (hex and CSS functional)
//! - Compositor: character to render tree
//! - Rasterizer: render tree to image at several canvas sizes
//! - Store: roster JSON parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use toonkit::color::{parse_color, resolve_slot_color};
use toonkit::compositor::compose;
use toonkit::models::{update_slot, Character, SlotKey, SlotUpdate};
use toonkit::raster::{rasterize, RasterOptions};
use toonkit::store::{community_characters, MemoryStore, Roster, Store};

// =============================================================================
// Test Data Generators
// =============================================================================

/// A character with every finish and pattern switched on.
fn dressed_character() -> Character {
    let dex = Character::seed();
    let dex = update_slot(&dex, SlotKey::Outfit, &SlotUpdate { material: Some("holographic".into()), texture: Some("grid".into()), ..Default::default() });
    let dex = update_slot(&dex, SlotKey::Hair, &SlotUpdate { material: Some("glossy".into()), texture: Some("shine".into()), ..Default::default() });
    let dex = update_slot(&dex, SlotKey::Headwear, &SlotUpdate::variant("wizard"));
    let dex = update_slot(&dex, SlotKey::Accessory, &SlotUpdate { id: Some("cape".into()), color: Some("#AA0000".into()), ..Default::default() });
    update_slot(&dex, SlotKey::HandItem, &SlotUpdate::variant("mallet"))
}

/// Serialized roster of `n` characters.
fn roster_json(n: usize) -> String {
    let mut roster = Roster::seeded();
    for _ in 1..n {
        let _ = roster.add_new();
    }
    let store = MemoryStore::new();
    let _ = store.save_roster(&roster);
    store.roster_json().unwrap_or_default()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    group.bench_function("parse_hex_6", |b| b.iter(|| parse_color(black_box("#FF4500"))));
    group.bench_function("parse_rgb", |b| b.iter(|| parse_color(black_box("rgb(255, 69, 0)"))));
    group.bench_function("resolve_transparent", |b| b.iter(|| resolve_slot_color(black_box("transparent"))));
    group.bench_function("resolve_invalid", |b| b.iter(|| resolve_slot_color(black_box("#GGGGGG"))));

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let seed = Character::seed();
    let dressed = dressed_character();

    group.bench_function("seed", |b| b.iter(|| compose(black_box(&seed), 1.0, None)));
    group.bench_function("dressed", |b| b.iter(|| compose(black_box(&dressed), 1.0, None)));
    group.bench_function("dressed_with_preview", |b| {
        b.iter(|| compose(black_box(&dressed), 1.0, Some("beehive")))
    });
    group.bench_function("community", |b| {
        let characters = community_characters();
        b.iter(|| characters.iter().map(|c| compose(c, 1.0, None).primitive_count()).sum::<usize>())
    });

    group.finish();
}

fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize");
    let tree = compose(&dressed_character(), 1.0, Some("bowl_cut"));

    for (width, height) in [(100u32, 120u32), (400, 480), (800, 960)] {
        let options = RasterOptions { width, height, ..Default::default() };
        group.throughput(Throughput::Elements(u64::from(width * height)));
        group.bench_with_input(BenchmarkId::new("dressed", format!("{}x{}", width, height)), &options, |b, options| {
            b.iter(|| rasterize(black_box(&tree), options))
        });
    }

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    for n in [1usize, 10, 50] {
        let json = roster_json(n);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("load_roster", n), &json, |b, json| {
            let store = MemoryStore::new();
            b.iter(|| {
                store.set_roster_json(json.as_str());
                store.load_roster()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_color, bench_compose, bench_rasterize, bench_store);
criterion_main!(benches);
