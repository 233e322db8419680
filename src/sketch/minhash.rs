use std::cmp::Ordering;
use std::iter::{Iterator, Peekable};

use log::debug;

use crate::sketch::{SigsTrait, SketchParameters};
use crate::{Error, _hash_murmur32};

/// A bottom-k MinHash sketch.
///
/// `mins` holds at most `num` distinct values in `[0, prime)`, kept sorted in
/// ascending order. The four parameters are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerMinHash {
    num: u32,
    ksize: u32,
    prime: u64,
    is_protein: bool,
    mins: Vec<u64>,
}

impl Default for KmerMinHash {
    fn default() -> KmerMinHash {
        let params = SketchParameters::default();
        KmerMinHash {
            num: params.num,
            ksize: params.ksize,
            prime: params.prime,
            is_protein: params.is_protein,
            mins: Vec::with_capacity(params.num as usize + 1),
        }
    }
}

impl KmerMinHash {
    pub fn new(num: u32, ksize: u32, prime: u64, is_protein: bool) -> Result<KmerMinHash, Error> {
        SketchParameters {
            num,
            ksize,
            prime,
            is_protein,
        }
        .check()?;

        Ok(KmerMinHash {
            num,
            ksize,
            prime,
            is_protein,
            // +1: insertion happens before the largest value is dropped
            mins: Vec::with_capacity(usize::min(num as usize, 1000) + 1),
        })
    }

    pub fn num(&self) -> u32 {
        self.num
    }

    pub fn prime(&self) -> u64 {
        self.prime
    }

    pub fn is_protein(&self) -> bool {
        self.is_protein
    }

    pub fn is_empty(&self) -> bool {
        self.mins.is_empty()
    }

    /// Largest retained value, if any.
    pub fn max_value(&self) -> Option<u64> {
        self.mins.last().copied()
    }

    /// Reduce `hash` into `[0, prime)`, folding negative values back in.
    #[inline]
    fn normalize(&self, hash: i64) -> u64 {
        let prime = self.prime as i128;
        (((hash as i128 % prime) + prime) % prime) as u64
    }

    pub fn add_hash(&mut self, hash: i64) {
        let hash = self.normalize(hash);
        self.insert_normalized(hash);
    }

    // `hash` must already be in `[0, prime)`
    fn insert_normalized(&mut self, hash: u64) {
        let num = self.num as usize;

        if num == 0 {
            return;
        }

        if self.mins.len() == num {
            if let Some(&current_max) = self.mins.last() {
                if hash > current_max {
                    // sketch is full and this is larger than anything kept
                    return;
                }
            }
        }

        let pos = match self.mins.binary_search(&hash) {
            // already present, nothing to do
            Ok(_) => return,
            Err(p) => p,
        };

        if pos == self.mins.len() {
            // at end - must still be growing, the check above keeps the
            // list from getting too long
            self.mins.push(hash);
        } else {
            self.mins.insert(pos, hash);

            // is it too big now?
            if self.mins.len() > num {
                self.mins.pop();
            }
        }
    }

    pub fn add_word(&mut self, word: &[u8]) {
        let hash = _hash_murmur32(word);
        self.add_hash(hash as i64);
    }

    pub fn add_many(&mut self, hashes: &[i64]) -> Result<(), Error> {
        for hash in hashes {
            self.add_hash(*hash);
        }
        Ok(())
    }

    pub fn add_from(&mut self, other: &KmerMinHash) -> Result<(), Error> {
        for min in &other.mins {
            self.insert_normalized(*min % self.prime);
        }
        Ok(())
    }

    /// Union `other` into this sketch, keeping the `num` smallest values.
    ///
    /// Fails before touching either sketch if they are not compatible.
    pub fn merge(&mut self, other: &KmerMinHash) -> Result<(), Error> {
        self.check_compatible(other)?;

        let merged: Vec<u64> = Union::new(self.mins.iter(), other.mins.iter())
            .take(self.num as usize)
            .copied()
            .collect();

        debug!(
            "merged {} + {} hashes into {} (num = {})",
            self.mins.len(),
            other.mins.len(),
            merged.len(),
            self.num
        );
        self.mins = merged;
        Ok(())
    }

    /// Number of hashes present in both sketches.
    pub fn count_common(&self, other: &KmerMinHash) -> Result<u64, Error> {
        self.check_compatible(other)?;

        let iter = if self.size() < other.size() {
            Intersection::new(self.mins.iter(), other.mins.iter())
        } else {
            Intersection::new(other.mins.iter(), self.mins.iter())
        };

        Ok(iter.count() as u64)
    }

    /// Shared hashes among the `num` smallest of the union, and the size of
    /// that union.
    pub fn intersection_size(&self, other: &KmerMinHash) -> Result<(u64, u64), Error> {
        self.check_compatible(other)?;

        let mut combined_mh = KmerMinHash {
            num: self.num,
            ksize: self.ksize,
            prime: self.prime,
            is_protein: self.is_protein,
            mins: Vec::new(),
        };
        combined_mh.merge(self)?;
        combined_mh.merge(other)?;

        let it1 = Intersection::new(self.mins.iter(), other.mins.iter());

        let i1: Vec<u64> = it1.copied().collect();
        let it2 = Intersection::new(i1.iter(), combined_mh.mins.iter());

        Ok((it2.count() as u64, combined_mh.mins.len() as u64))
    }

    // calculate Jaccard similarity estimate
    pub fn jaccard(&self, other: &KmerMinHash) -> Result<f64, Error> {
        let (common, size) = self.intersection_size(other)?;
        Ok(common as f64 / u64::max(1, size) as f64)
    }

    /// Snapshot of the retained values, ascending.
    pub fn mins(&self) -> Vec<u64> {
        self.mins.clone()
    }

    pub fn iter_mins(&self) -> impl Iterator<Item = &u64> {
        self.mins.iter()
    }
}

impl SigsTrait for KmerMinHash {
    fn size(&self) -> usize {
        self.mins.len()
    }

    fn to_vec(&self) -> Vec<u64> {
        self.mins.clone()
    }

    fn ksize(&self) -> usize {
        self.ksize as usize
    }

    fn is_protein(&self) -> bool {
        self.is_protein
    }

    fn add_hash(&mut self, hash: i64) {
        KmerMinHash::add_hash(self, hash);
    }

    fn check_compatible(&self, other: &KmerMinHash) -> Result<(), Error> {
        if self.ksize != other.ksize {
            return Err(Error::MismatchKSizes);
        }
        if self.prime != other.prime {
            return Err(Error::MismatchPrime);
        }
        if self.is_protein != other.is_protein {
            return Err(Error::MismatchDNAProt);
        }
        Ok(())
    }
}

struct Intersection<T, I: Iterator<Item = T>> {
    iter: Peekable<I>,
    other: Peekable<I>,
}

impl<T, I: Iterator<Item = T>> Intersection<T, I> {
    pub fn new(left: I, right: I) -> Self {
        Intersection {
            iter: left.peekable(),
            other: right.peekable(),
        }
    }
}

impl<T: Ord, I: Iterator<Item = T>> Iterator for Intersection<T, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let res = match (self.iter.peek(), self.other.peek()) {
                (Some(ref left_key), Some(ref right_key)) => left_key.cmp(right_key),
                _ => return None,
            };

            match res {
                Ordering::Less => {
                    self.iter.next();
                }
                Ordering::Greater => {
                    self.other.next();
                }
                Ordering::Equal => {
                    self.other.next();
                    return self.iter.next();
                }
            }
        }
    }
}

struct Union<T, I: Iterator<Item = T>> {
    iter: Peekable<I>,
    other: Peekable<I>,
}

impl<T, I: Iterator<Item = T>> Union<T, I> {
    pub fn new(left: I, right: I) -> Self {
        Union {
            iter: left.peekable(),
            other: right.peekable(),
        }
    }
}

impl<T: Ord, I: Iterator<Item = T>> Iterator for Union<T, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let res = match (self.iter.peek(), self.other.peek()) {
            (Some(ref left_key), Some(ref right_key)) => left_key.cmp(right_key),
            (None, Some(_)) => {
                return self.other.next();
            }
            (Some(_), None) => {
                return self.iter.next();
            }
            _ => return None,
        };

        match res {
            Ordering::Less => self.iter.next(),
            Ordering::Greater => self.other.next(),
            Ordering::Equal => {
                self.other.next();
                self.iter.next()
            }
        }
    }
}
