use std::collections::BTreeSet;

use assert_matches::assert_matches;
use proptest::collection::vec;
use proptest::proptest;

use kmerminhash::encodings::revcomp;
use kmerminhash::sketch::minhash::KmerMinHash;
use kmerminhash::sketch::SigsTrait;
use kmerminhash::{Error, DEFAULT_MINHASH_PRIME};

const PRIME: u64 = DEFAULT_MINHASH_PRIME;

fn dna(num: u32, ksize: u32) -> KmerMinHash {
    KmerMinHash::new(num, ksize, PRIME, false).unwrap()
}

fn protein(num: u32, ksize: u32) -> KmerMinHash {
    KmerMinHash::new(num, ksize, PRIME, true).unwrap()
}

#[test]
fn throws_error() {
    let mut mh = dna(1, 4);

    assert!(
        mh.add_sequence(b"ATGR").is_err(),
        "R is not a valid DNA character"
    );
}

#[test]
fn short_sequence() {
    let mut mh = dna(5, 3);

    assert_matches!(
        mh.add_sequence(b"AC"),
        Err(Error::ShortSequence { len: 2, ksize: 3 })
    );
    assert!(mh.is_empty());
}

#[test]
fn small_sketch() {
    let mut mh = dna(5, 3);
    mh.add_sequence(b"AAATTTCCC").unwrap();

    assert_eq!(
        mh.mins(),
        vec![500232401, 1365327084, 1443079203, 1844697910, 2053901562]
    );
    assert!(mh.iter_mins().all(|h| *h < PRIME));
}

#[test]
fn invalid_dna_keeps_forward_strand() {
    let mut mh = dna(100, 3);

    assert_matches!(mh.add_sequence(b"ACGTX"), Err(Error::InvalidDNA { .. }));
    // ACG, CGT and GTX were admitted before the reverse complement failed
    assert_eq!(mh.size(), 3);
    assert!(mh.mins().contains(&1224338246));
    assert!(mh.mins().contains(&8715836483));
}

#[test]
fn lowercase_is_invalid() {
    let mut mh = dna(100, 3);
    assert_matches!(mh.add_sequence(b"acgt"), Err(Error::InvalidDNA { .. }));
}

#[test]
fn strand_symmetry() {
    let mut a = dna(100, 3);
    let mut b = dna(100, 3);

    a.add_sequence(b"AAATTTCCC").unwrap();
    b.add_sequence(b"GGGAAATTT").unwrap();

    assert_eq!(a.mins(), b.mins());
    assert_eq!(a.size(), 10);
}

#[test]
fn protein_sketch() {
    let mut mh = protein(100, 6);
    mh.add_sequence(b"ATGGCCTAA").unwrap();

    assert_eq!(
        mh.mins(),
        vec![
            598336523, 673456676, 796275303, 920945879, 1697116680, 8063694043, 8253002268,
            9619799664
        ]
    );
}

#[test]
fn protein_ksize_not_multiple_of_three() {
    // 7-base windows translate to 2 residues, the last base is dropped
    let mut mh = protein(100, 7);
    mh.add_sequence(b"ATGGCCTAAG").unwrap();

    assert_eq!(
        mh.mins(),
        vec![
            326529537, 598336523, 673456676, 796275303, 920945879, 8063694043, 8253002268,
            9619799664
        ]
    );
}

#[test]
fn protein_invalid_window() {
    let mut mh = protein(100, 6);

    assert_matches!(mh.add_sequence(b"ATGGCCN"), Err(Error::InvalidDNA { .. }));
    // only the first window made it in, both directions
    assert_eq!(mh.size(), 2);
}

#[test]
fn protein_ksize_below_codon() {
    // every 2-base window translates to the empty word, which hashes to 0
    let mut mh = protein(10, 2);
    mh.add_sequence(b"ACGT").unwrap();

    assert_eq!(mh.mins(), vec![0]);
}

#[test]
fn prime_one_folds_everything_to_zero() {
    let mut mh = KmerMinHash::new(10, 3, 1, false).unwrap();
    mh.add_many(&[i64::MIN, -1, 0, 5, i64::MAX]).unwrap();
    mh.add_sequence(b"AAATTTCCC").unwrap();

    assert_eq!(mh.mins(), vec![0]);
}

#[test]
fn merge() {
    let mut a = dna(20, 10);
    let mut b = dna(20, 10);

    a.add_sequence(b"TGCCGCCCAGCA").unwrap();
    b.add_sequence(b"TGCCGCCCAGCA").unwrap();

    a.add_sequence(b"GTCCGCCCAGTGA").unwrap();
    b.add_sequence(b"GTCCGCCCAGTGG").unwrap();

    assert_eq!(a.count_common(&b).unwrap(), 12);

    a.merge(&b).unwrap();
    assert_eq!(
        a.to_vec(),
        vec![
            22121170, 1091292167, 1390131576, 2098508114, 7890991211, 8011943419, 8300762797,
            8361188567, 8669255263, 9007191332, 9027651319, 9582500340, 9709442648, 9893990363,
            9927085136, 9944620052,
        ]
    );
}

#[test]
fn merge_empty() {
    let mut a = dna(20, 10);
    let mut b = dna(20, 10);

    a.merge(&b).unwrap();
    assert!(a.is_empty());

    b.add_hash(42);
    a.merge(&b).unwrap();
    assert_eq!(a.mins(), vec![42]);
}

#[test]
fn check_errors() {
    let mut a = dna(20, 10);
    let b = dna(20, 21);
    let c = KmerMinHash::new(20, 10, 7, false).unwrap();
    let d = protein(20, 10);
    let e = dna(500, 10);

    assert_matches!(a.merge(&b), Err(Error::MismatchKSizes));
    assert_matches!(a.merge(&c), Err(Error::MismatchPrime));
    assert_matches!(a.merge(&d), Err(Error::MismatchDNAProt));
    assert_matches!(a.count_common(&b), Err(Error::MismatchKSizes));
    assert_matches!(a.count_common(&c), Err(Error::MismatchPrime));
    assert_matches!(a.count_common(&d), Err(Error::MismatchDNAProt));

    // num does not need to match
    assert!(a.merge(&e).is_ok());
    assert!(a.count_common(&e).is_ok());
}

#[test]
fn add_hash_normalizes() {
    let mut mh = dna(10, 3);
    mh.add_hash(-1);
    mh.add_hash(PRIME as i64 + 5);
    mh.add_hash(5);

    assert_eq!(mh.mins(), vec![5, PRIME - 1]);
}

#[test]
fn add_from_other_sketch() {
    let mut a = dna(3, 3);
    let mut b = dna(10, 3);
    b.add_many(&[9, 1, 5, 7]).unwrap();

    a.add_from(&b).unwrap();
    assert_eq!(a.mins(), vec![1, 5, 7]);
}

proptest! {
#[test]
fn oracle_mins(hashes in vec(proptest::num::i64::ANY, 1..2000), num in 1u32..300) {
    let mut mh = dna(num, 21);
    let mut oracle = BTreeSet::new();

    for hash in &hashes {
        mh.add_hash(*hash);
        assert!(mh.size() <= num as usize);

        oracle.insert((*hash as i128).rem_euclid(PRIME as i128) as u64);
    }

    let expected: Vec<u64> = oracle.into_iter().take(num as usize).collect();
    assert_eq!(mh.mins(), expected);
}
}

proptest! {
#[test]
fn admission_is_idempotent(hashes in vec(proptest::num::i64::ANY, 1..500)) {
    let mut mh = dna(100, 21);
    mh.add_many(&hashes).unwrap();
    let before = mh.mins();

    mh.add_many(&hashes).unwrap();
    assert_eq!(mh.mins(), before);
}
}

proptest! {
#[test]
fn bounded_after_sequence(seq in "[ACGT]{3,300}", num in 1u32..50, is_protein in proptest::bool::ANY) {
    let mut mh = KmerMinHash::new(num, 3, PRIME, is_protein).unwrap();
    mh.add_sequence(seq.as_bytes()).unwrap();

    assert!(mh.size() <= num as usize);
    assert!(mh.iter_mins().all(|h| *h < PRIME));
    let mins = mh.mins();
    assert!(mins.windows(2).all(|w| w[0] < w[1]));
}
}

proptest! {
#[test]
fn prop_merge(seq1 in "[ACGT]{6,100}", seq2 in "[ACGT]{6,200}") {
    let mut a = dna(10, 6);
    let mut b = dna(10, 6);
    let mut c = dna(10, 6);

    a.add_sequence(seq1.as_bytes()).unwrap();
    b.add_sequence(seq2.as_bytes()).unwrap();
    c.add_sequence(seq1.as_bytes()).unwrap();
    c.add_sequence(seq2.as_bytes()).unwrap();

    let mut ab = a.clone();
    ab.merge(&b).unwrap();
    let mut ba = b.clone();
    ba.merge(&a).unwrap();

    assert_eq!(ab.mins(), ba.mins());
    assert_eq!(ab.mins(), c.mins());
    assert!(ab.size() <= 10);
}
}

proptest! {
#[test]
fn prop_count_common(seq1 in "[ACGT]{6,100}", seq2 in "[ACGT]{6,100}") {
    let mut a = dna(20, 6);
    let mut b = dna(20, 6);

    a.add_sequence(seq1.as_bytes()).unwrap();
    b.add_sequence(seq2.as_bytes()).unwrap();

    assert_eq!(a.count_common(&b).unwrap(), b.count_common(&a).unwrap());
    assert_eq!(a.count_common(&a).unwrap(), a.size() as u64);

    let union: BTreeSet<u64> = a.iter_mins().chain(b.iter_mins()).copied().collect();
    let expected = (a.size() + b.size() - union.len()) as u64;
    assert_eq!(a.count_common(&b).unwrap(), expected);
}
}

proptest! {
#[test]
fn prop_revcomp_involution(seq in "[ACGT]{0,200}") {
    let rc = revcomp(seq.as_bytes()).unwrap();
    assert_eq!(revcomp(&rc).unwrap(), seq.as_bytes().to_vec());
}
}

proptest! {
#[test]
fn prop_strand_symmetry(seq in "[ACGT]{9,200}", is_protein in proptest::bool::ANY) {
    let mut a = KmerMinHash::new(50, 9, PRIME, is_protein).unwrap();
    let mut b = KmerMinHash::new(50, 9, PRIME, is_protein).unwrap();

    a.add_sequence(seq.as_bytes()).unwrap();
    b.add_sequence(&revcomp(seq.as_bytes()).unwrap()).unwrap();

    assert_eq!(a.mins(), b.mins());
}
}
