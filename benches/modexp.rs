use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use bignum::limb::Limb;
use bignum::montgomery::{Context, exp, ops};
use bignum::prime;
use bignum::random::SystemRandom;

// A 512-bit RSA-sized modulus and a same-size odd base, both fixed so
// every run exercises the same code path.
const MODULUS_512: [u64; 8] = [
    0xB1A7_B1A7_B1A7_B1A9,
    0x1122_3344_5566_7788,
    0x8877_6655_4433_2211,
    0xAABB_CCDD_EEFF_0011,
    0x0011_2233_4455_6677,
    0x7766_5544_3322_1100,
    0xFEDC_BA98_7654_3211,
    0x0123_4567_89AB_CDEF,
];

const EXPONENT_512: [u64; 8] = [
    0x5A5A_5A5A_5A5A_5A5B,
    0x1111_1111_1111_1111,
    0x2222_2222_2222_2222,
    0x3333_3333_3333_3333,
    0x4444_4444_4444_4444,
    0x5555_5555_5555_5555,
    0x6666_6666_6666_6666,
    0x7777_7777_7777_7777,
];

#[cfg(target_pointer_width = "64")]
fn modulus() -> Vec<u64> {
    MODULUS_512.to_vec()
}

#[cfg(not(target_pointer_width = "64"))]
fn modulus() -> Vec<u32> {
    MODULUS_512
        .iter()
        .flat_map(|limb| [*limb as u32, (*limb >> 32) as u32])
        .collect()
}

#[cfg(target_pointer_width = "64")]
fn exponent() -> Vec<u64> {
    EXPONENT_512.to_vec()
}

#[cfg(not(target_pointer_width = "64"))]
fn exponent() -> Vec<u32> {
    EXPONENT_512
        .iter()
        .flat_map(|limb| [*limb as u32, (*limb >> 32) as u32])
        .collect()
}

fn bench_mod_exp(c: &mut Criterion) {
    let m = modulus();
    let e = exponent();
    let ctx = Context::new(&m).unwrap();
    let msize = m.len();

    let mut base = vec![0 as Limb; msize];
    let three: [Limb; 1] = [3];
    ops::encode(&mut base, &three, &ctx);

    let ebits = e.len() as u32 * bignum::limb::LIMB_BITS;

    c.bench_function("mod_exp 512-bit vartime", |b| {
        b.iter(|| exp::exp_vartime(black_box(&ctx), black_box(&base), black_box(&e)))
    });

    c.bench_function("mod_exp 512-bit consttime", |b| {
        b.iter(|| {
            exp::exp_consttime(
                black_box(&ctx),
                black_box(&base),
                black_box(&e),
                black_box(ebits),
            )
        })
    });

    c.bench_function("mod_exp 512-bit window vartime", |b| {
        b.iter(|| {
            exp::exp_window_vartime(
                black_box(&ctx),
                black_box(&base),
                black_box(&e),
                black_box(ebits),
            )
        })
    });

    c.bench_function("mod_exp 512-bit window consttime", |b| {
        b.iter(|| {
            exp::exp_window_consttime(
                black_box(&ctx),
                black_box(&base),
                black_box(&e),
                black_box(ebits),
            )
        })
    });
}

fn bench_prime_generation(c: &mut Criterion) {
    c.bench_function("probable_prime 256-bit", |b| {
        b.iter(|| {
            let mut rng = SystemRandom::new();
            prime::probable_prime(black_box(256), black_box(false), &mut rng).unwrap()
        })
    });
}

criterion_group!(benches, bench_mod_exp, bench_prime_generation);
criterion_main!(benches);
