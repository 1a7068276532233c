use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand_dxsm::*;

const ENTROPY: [u32; 4] = [0xb76a074c, 0x23c70376, 0x7710e1d7, 0x56f73ae9];

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut pcg = Pcg64Dxsm::new(0, 0);
    c.bench_function("Pcg64Dxsm::next_u64", move |b| b.iter(|| pcg.next_u64()));
    let mut pcg = Pcg64Dxsm::new(0, 0);
    c.bench_function("Pcg64Dxsm::next_unit_double", move |b| b.iter(|| pcg.next_unit_double()));
    let mut pcg = Pcg64Dxsm::new(0, 0);
    c.bench_function("Pcg64Dxsm::advance", move |b| b.iter(|| pcg.advance(black_box(1 << 100))));
    let mut xoshiro = Xoshiro256PlusPlus::from_state([1, 2, 3, 4]).unwrap();
    c.bench_function("Xoshiro256PlusPlus::next_u64", move |b| b.iter(|| xoshiro.next_u64()));
    c.bench_function("SeedSequence::spawn(16)", |b| b.iter(|| {
        let mut seq = SeedSequence::new(black_box(&ENTROPY), 4).unwrap();
        seq.spawn(16).unwrap()
    }));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
