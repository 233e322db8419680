pub mod minhash;

use log::warn;
use typed_builder::TypedBuilder;

use crate::encodings::{revcomp, to_aa};
use crate::sketch::minhash::KmerMinHash;
use crate::{Error, _hash_murmur32, DEFAULT_MINHASH_PRIME};

pub trait SigsTrait {
    fn size(&self) -> usize;
    fn to_vec(&self) -> Vec<u64>;
    fn ksize(&self) -> usize;
    fn is_protein(&self) -> bool;
    fn check_compatible(&self, other: &Self) -> Result<(), Error>;

    fn add_hash(&mut self, hash: i64);

    /// Add every k-mer of `seq` (both strands), translating windows first for
    /// protein sketches.
    ///
    /// Hashes admitted before an invalid character is found stay in the sketch.
    fn add_sequence(&mut self, seq: &[u8]) -> Result<(), Error> {
        let ready_hashes = SeqToHashes::new(seq, self.ksize(), self.is_protein())?;

        for hash_value in ready_hashes {
            self.add_hash(hash_value?);
        }

        Ok(())
    }
}

/// Construction parameters for a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct SketchParameters {
    #[builder(default = 500)]
    pub num: u32,

    #[builder(default = 21)]
    pub ksize: u32,

    #[builder(default = DEFAULT_MINHASH_PRIME)]
    pub prime: u64,

    #[builder(default = false)]
    pub is_protein: bool,
}

impl Default for SketchParameters {
    fn default() -> SketchParameters {
        SketchParameters::builder().build()
    }
}

impl SketchParameters {
    pub fn check(&self) -> Result<(), Error> {
        if self.ksize == 0 {
            return Err(Error::InvalidParameter {
                message: "ksize must be at least 1".into(),
            });
        }
        if self.prime == 0 {
            return Err(Error::InvalidParameter {
                message: "prime must be at least 1".into(),
            });
        }
        if !primal_check::miller_rabin(self.prime) {
            warn!("modulus {} is not prime", self.prime);
        }
        Ok(())
    }

    /// An empty sketch with these parameters.
    pub fn sketch(&self) -> Result<KmerMinHash, Error> {
        KmerMinHash::new(self.num, self.ksize, self.prime, self.is_protein)
    }
}

// Iterator for converting sequence to hashes.
//
// DNA: every forward window, then every window of the reverse complement of
// the whole sequence. Protein: for each window, the translated window and
// its translated reverse complement.
pub struct SeqToHashes<'a> {
    sequence: &'a [u8],
    k_size: usize,
    kmer_index: usize,
    max_index: usize,
    is_protein: bool,

    dna_rc: Option<Vec<u8>>,
    rc_index: usize,
    pending: Option<i64>,
}

impl<'a> SeqToHashes<'a> {
    pub fn new(seq: &'a [u8], k_size: usize, is_protein: bool) -> Result<SeqToHashes<'a>, Error> {
        if seq.len() < k_size {
            return Err(Error::ShortSequence {
                len: seq.len(),
                ksize: k_size as u32,
            });
        }

        Ok(SeqToHashes {
            sequence: seq,
            k_size,
            kmer_index: 0,
            max_index: seq.len() - k_size + 1,
            is_protein,
            dna_rc: None,
            rc_index: 0,
            pending: None,
        })
    }

    fn next_dna(&mut self) -> Option<Result<i64, Error>> {
        let seq = self.sequence;
        if self.kmer_index < self.max_index {
            let kmer = &seq[self.kmer_index..self.kmer_index + self.k_size];
            self.kmer_index += 1;
            return Some(Ok(_hash_murmur32(kmer) as i64));
        }

        if self.dna_rc.is_none() {
            match revcomp(seq) {
                Ok(rc) => self.dna_rc = Some(rc),
                Err(e) => {
                    // nothing else to yield after an invalid sequence
                    self.rc_index = self.max_index;
                    self.dna_rc = Some(vec![]);
                    return Some(Err(e));
                }
            }
        }

        let rc = self.dna_rc.as_ref()?;
        if self.rc_index < self.max_index {
            let kmer = &rc[self.rc_index..self.rc_index + self.k_size];
            self.rc_index += 1;
            Some(Ok(_hash_murmur32(kmer) as i64))
        } else {
            None
        }
    }

    fn next_protein(&mut self) -> Option<Result<i64, Error>> {
        if let Some(hash) = self.pending.take() {
            return Some(Ok(hash));
        }

        if self.kmer_index >= self.max_index {
            return None;
        }

        let seq = self.sequence;
        let kmer = &seq[self.kmer_index..self.kmer_index + self.k_size];
        let rc = match revcomp(kmer) {
            Ok(rc) => rc,
            Err(e) => {
                self.kmer_index = self.max_index;
                return Some(Err(e));
            }
        };
        self.kmer_index += 1;

        self.pending = Some(_hash_murmur32(&to_aa(&rc)) as i64);
        Some(Ok(_hash_murmur32(&to_aa(kmer)) as i64))
    }
}

impl<'a> Iterator for SeqToHashes<'a> {
    type Item = Result<i64, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_protein {
            self.next_protein()
        } else {
            self.next_dna()
        }
    }
}
