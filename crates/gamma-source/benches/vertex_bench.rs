// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Primary Vertex Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gamma_decay::import::{DecayTable, RadiationTable};
use gamma_decay::DecayDatabase;
use gamma_geometry::{Cuboid, Cylinder, Placement, Vec3, VolumeStore};
use gamma_source::PrimaryVertexAssembler;
use gamma_types::records::{Daughter, DecayRecord, NuclideId, RadiationRecord};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::hint::black_box;
use std::sync::Arc;

/// Geometry of a vial above a slab detector, independent of data files.
fn bench_store() -> VolumeStore {
    let mut store = VolumeStore::new();
    store
        .insert(Placement::world("World", Arc::new(Cuboid::new(1e3, 1e3, 1e3))))
        .unwrap();
    store
        .insert(Placement::translated(
            "Source",
            Arc::new(Cylinder::new(5.0, 10.0)),
            "World",
            Vec3::zeros(),
        ))
        .unwrap();
    store
        .insert(Placement::translated(
            "Detector",
            Arc::new(Cuboid::new(40.0, 40.0, 10.0)),
            "World",
            Vec3::new(0.0, 0.0, 150.0),
        ))
        .unwrap();
    store
}

/// Linear chain `N0 -> N1 -> ...` with `lines` photon lines per member.
fn chain_database(depth: usize, lines: usize) -> DecayDatabase {
    let mut decay = DecayTable::new();
    let mut radiation = RadiationTable::new();
    for i in 0..depth {
        let daughters = if i + 1 < depth {
            vec![Daughter {
                id: NuclideId::new(format!("N{}", i + 1)),
                branch_ratio: 0.9,
            }]
        } else {
            Vec::new()
        };
        decay.insert(
            NuclideId::new(format!("N{i}")),
            DecayRecord {
                daughters,
                ..DecayRecord::default()
            },
        );
        radiation.insert(
            NuclideId::new(format!("N{i}")),
            RadiationRecord::from_lines((0..lines).map(|k| (0.01 + 0.01 * k as f64, 0.05))),
        );
    }
    DecayDatabase::new(decay, radiation)
}

fn bench_generate_primary(c: &mut Criterion) {
    let store = bench_store();
    let mut group = c.benchmark_group("generate_primary");

    for &lines in &[4usize, 64, 512] {
        let db = chain_database(4, lines);
        let mut assembler = PrimaryVertexAssembler::new(&store, &db);
        assembler.set_source_volume("Source");
        assembler.set_target_volume("Detector", 50.0);
        assembler.set_nuclide("N0").unwrap();
        assembler.set_min_photon_energy(0.02);
        let mut rng = ChaChaRng::seed_from_u64(42);

        group.bench_with_input(BenchmarkId::new("lines_per_nuclide", lines), &lines, |b, _| {
            b.iter(|| black_box(assembler.generate_primary(&mut rng)))
        });
    }
    group.finish();
}

fn bench_set_nuclide(c: &mut Criterion) {
    let store = bench_store();
    let db = chain_database(8, 64);
    let mut assembler = PrimaryVertexAssembler::new(&store, &db);

    c.bench_function("set_nuclide_chain_8", |b| {
        b.iter(|| black_box(assembler.set_nuclide(black_box("N0"))))
    });
}

criterion_group!(benches, bench_generate_primary, bench_set_nuclide);
criterion_main!(benches);
