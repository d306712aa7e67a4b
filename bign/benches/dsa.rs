//! bign signature benchmarks

use bign::{
    ParamSet,
    dsa::{self, Signature, SigningKey, signature::{Signer, Verifier}},
    oid,
};
use criterion::{Criterion, criterion_group, criterion_main};
use hex_literal::hex;

const SIGNING_KEY_BYTES: [u8; 32] =
    hex!("1F66B5B84B7339674533F0329C74F21834281FED0732429E0C79235FC273E269");

const MSG: &[u8] = b"testing";

fn bench_dsa(c: &mut Criterion) {
    let params = ParamSet::load(oid::BIGN_CURVE256V1).unwrap();
    let signing_key = SigningKey::from_bytes(&params, &SIGNING_KEY_BYTES).unwrap();
    let verifying_key = signing_key.verifying_key().clone();
    let signature: Signature = signing_key.sign(MSG);

    let mut group = c.benchmark_group("bign/curve256v1 (belt-hash)");
    group.bench_function("pubkey_calc", |b| {
        b.iter(|| dsa::pubkey_calc(&params, &SIGNING_KEY_BYTES))
    });
    group.bench_function("sign", |b| b.iter(|| signing_key.sign(MSG)));
    group.bench_function("verify", |b| {
        b.iter(|| verifying_key.verify(MSG, &signature))
    });
    group.finish();
}

criterion_group!(benches, bench_dsa);
criterion_main!(benches);
