//! # Bottom-k MinHash sketches for nucleotide and translated protein sequences.
//!
//! A [`KmerMinHash`] keeps the `num` smallest distinct hash values of the
//! k-mers it has seen, reduced modulo a prime. Two sketches built with the same
//! parameters can be merged, or compared to estimate how many k-mers their
//! inputs share, without ever holding the full k-mer sets.
//!
//! ```
//! use kmerminhash::sketch::SigsTrait;
//! use kmerminhash::KmerMinHash;
//!
//! let mut a = KmerMinHash::new(5, 3, kmerminhash::DEFAULT_MINHASH_PRIME, false)?;
//! a.add_sequence(b"AAATTTCCC")?;
//! assert!(a.size() <= 5);
//! # Ok::<(), kmerminhash::Error>(())
//! ```
//!
//! [`KmerMinHash`]: sketch::minhash::KmerMinHash

pub mod errors;
pub use errors::SketchError as Error;

pub mod cmd;

pub mod encodings;

pub mod sketch;
pub use sketch::minhash::KmerMinHash;

use murmurhash3::murmurhash3_x86_32;

pub const DEFAULT_MINHASH_PRIME: u64 = 9_999_999_967;

/// MurmurHash3 (x86, 32 bits) with seed 0, read as a signed integer.
pub fn _hash_murmur32(kmer: &[u8]) -> i32 {
    murmurhash3_x86_32(kmer, 0) as i32
}
