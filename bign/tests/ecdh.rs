#![cfg(feature = "ecdh")]

use bign::{
    Error, ParamSet, SecretKey,
    dsa,
    ecdh::{EphemeralSecret, diffie_hellman},
    oid,
};
use hex_literal::hex;
use rand_core::OsRng; // requires 'getrandom' feature

const SECRET_KEY: [u8; 32] =
    hex!("1F66B5B84B7339674533F0329C74F21834281FED0732429E0C79235FC273E269");

fn params() -> ParamSet {
    ParamSet::load(oid::BIGN_CURVE256V1).unwrap()
}

#[test]
fn ecdh() {
    let params = params();

    // Alice
    let alice_secret = EphemeralSecret::random(&params, &mut OsRng).unwrap();
    let alice_pk = alice_secret.public_key().unwrap();

    // Bob
    let bob_secret = EphemeralSecret::random(&params, &mut OsRng).unwrap();
    let bob_pk = bob_secret.public_key().unwrap();

    let alice_shared = alice_secret.diffie_hellman(&bob_pk, 64).unwrap();
    let bob_shared = bob_secret.diffie_hellman(&alice_pk, 64).unwrap();

    // Both participants arrive on the same shared secret
    assert_eq!(
        alice_shared.raw_secret_bytes(),
        bob_shared.raw_secret_bytes()
    );
}

#[test]
fn byte_api_is_symmetric_and_truncates() {
    let params = params();
    let alice = SECRET_KEY;
    let alice_pk = dsa::pubkey_calc(&params, &alice).unwrap();
    let bob = SecretKey::random(&params, &mut OsRng).unwrap();
    let bob_pk = bob.public_key(&params).unwrap();

    let full = diffie_hellman(&params, &alice, bob_pk.as_bytes(), 64).unwrap();
    let other = diffie_hellman(&params, &bob.to_bytes(), alice_pk.as_bytes(), 64).unwrap();
    assert_eq!(full.raw_secret_bytes(), other.raw_secret_bytes());

    let short = diffie_hellman(&params, &alice, bob_pk.as_bytes(), 32).unwrap();
    assert_eq!(short.raw_secret_bytes(), &full.raw_secret_bytes()[..32]);

    let none = diffie_hellman(&params, &alice, bob_pk.as_bytes(), 0).unwrap();
    assert!(none.raw_secret_bytes().is_empty());
}

#[test]
fn rejects_bad_input() {
    let params = params();
    let bob_pk = dsa::pubkey_calc(&params, &SECRET_KEY).unwrap();

    assert_eq!(
        diffie_hellman(&params, &SECRET_KEY, bob_pk.as_bytes(), 65).unwrap_err(),
        Error::InvalidParams
    );
    assert_eq!(
        diffie_hellman(&params, &[0u8; 32], bob_pk.as_bytes(), 32).unwrap_err(),
        Error::InvalidKey
    );

    let mut off_curve = bob_pk.as_bytes().to_vec();
    off_curve[0] ^= 1;
    assert_eq!(
        diffie_hellman(&params, &SECRET_KEY, &off_curve, 32).unwrap_err(),
        Error::InvalidKey
    );
}
