use ghash::{
    BLOCK_SIZE, Block, GHash,
    universal_hash::{KeyInit, Reset, UniversalHash},
};
use hex_literal::hex;

//
// Intermediate GHASH values from "The Galois/Counter Mode of Operation (GCM)",
// McGrew & Viega, Appendix B, test case 2
//

/// H = AES-128(0^128, 0^128)
const H: [u8; BLOCK_SIZE] = hex!("66e94bd4ef8a2c3b884cfa59ca342b2e");

/// Ciphertext of a single zero block under the all-zero key and IV
const C: [u8; BLOCK_SIZE] = hex!("0388dace60b6a392f328c2b971b2fe78");

/// Length block: len(A) = 0, len(C) = 128 bits
const LENGTHS: [u8; BLOCK_SIZE] = hex!("00000000000000000000000000000080");

const X_1: [u8; BLOCK_SIZE] = hex!("5e2ec746917062882c85b0685353deb7");
const GHASH_RESULT: [u8; BLOCK_SIZE] = hex!("f38cbb1ad69223dcc3457ae5b6b0f885");

#[test]
fn gcm_test_case_2() {
    let mut ghash = GHash::new(&H.into());
    ghash.update(&[C.into()]);
    assert_eq!(ghash.clone().finalize().as_slice(), &X_1[..]);

    ghash.update(&[LENGTHS.into()]);
    assert_eq!(ghash.finalize().as_slice(), &GHASH_RESULT[..]);
}

#[test]
fn empty_input_is_zero() {
    let ghash = GHash::new(&H.into());
    assert_eq!(ghash.finalize().as_slice(), &[0u8; BLOCK_SIZE][..]);
}

#[test]
fn update_padded_zero_fills() {
    let data = hex!("0102030405");
    let mut padded = [0u8; BLOCK_SIZE];
    padded[..data.len()].copy_from_slice(&data);

    let mut a = GHash::new(&H.into());
    a.update_padded(&data);

    let mut b = GHash::new(&H.into());
    b.update(&[padded.into()]);

    assert_eq!(a.finalize(), b.finalize());
}

#[test]
fn reset_keeps_key() {
    let mut ghash = GHash::new(&H.into());
    ghash.update(&[C.into()]);
    ghash.reset();
    ghash.update(&[C.into(), LENGTHS.into()]);
    assert_eq!(ghash.finalize().as_slice(), &GHASH_RESULT[..]);
}

#[test]
fn verify_result() {
    let mut ghash = <GHash as KeyInit>::new(&H.into());
    ghash.update(&[C.into(), LENGTHS.into()]);
    assert!(ghash.clone().verify(&GHASH_RESULT.into()).is_ok());
    assert!(ghash.verify(&X_1.into()).is_err());
}

// A longer test case, to ensure that block-at-a-time and bulk input agree.
#[test]
fn longer_test() {
    let inp = (1u16..=4096)
        .map(|n| ((n * 3) % 0xFF) as u8)
        .collect::<Vec<u8>>();

    // Try computing GHASH all at once.
    let mut ghash = GHash::new(&H.into());
    ghash.update_padded(&inp);
    let result1 = ghash.finalize_reset();

    // Try computing GHASH one block at a time.
    for block in inp.chunks(BLOCK_SIZE) {
        ghash.update(&[Block::clone_from_slice(block)]);
    }
    let result2 = ghash.finalize();

    // Make sure the results are the same.
    assert_eq!(result1, result2);
}
