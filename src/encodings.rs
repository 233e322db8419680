//! Nucleotide encodings: complements and the standard genetic code.
//!
//! Every table here is a `const`, so nothing is built at runtime and the
//! tables can be read from any thread.

use crate::Error;

const COMPLEMENT: [u8; 256] = {
    let mut lookup = [0; 256];
    lookup[b'A' as usize] = b'T';
    lookup[b'C' as usize] = b'G';
    lookup[b'G' as usize] = b'C';
    lookup[b'T' as usize] = b'A';
    lookup
};

// Position of each base in the TCAG ordering used by CODONTABLE,
// 4 for anything that is not a nucleotide.
const CODON_INDEX: [u8; 256] = {
    let mut lookup = [4; 256];
    lookup[b'T' as usize] = 0;
    lookup[b'C' as usize] = 1;
    lookup[b'A' as usize] = 2;
    lookup[b'G' as usize] = 3;
    lookup
};

// Standard genetic code, first base varying slowest:
//   TTT TTC TTA TTG TCT ... GGG
// `*` marks the three stop codons.
const CODONTABLE: [u8; 64] =
    *b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// Reverse complement of `seq`.
///
/// Fails on the first byte outside `{A,C,G,T}`; lowercase bases and `N` are
/// rejected too.
#[inline]
pub fn revcomp(seq: &[u8]) -> Result<Vec<u8>, Error> {
    seq.iter()
        .rev()
        .map(|nt| match COMPLEMENT[*nt as usize] {
            0 => Err(Error::InvalidDNA {
                message: String::from_utf8_lossy(seq).into_owned(),
            }),
            c => Ok(c),
        })
        .collect()
}

#[inline]
pub fn translate_codon(codon: &[u8]) -> Option<u8> {
    if codon.len() != 3 {
        return None;
    }

    let mut pos = 0usize;
    for nt in codon {
        let idx = CODON_INDEX[*nt as usize];
        if idx > 3 {
            return None;
        }
        pos = pos * 4 + idx as usize;
    }
    Some(CODONTABLE[pos])
}

/// Translate `seq` codon by codon, dropping an incomplete trailing codon.
///
/// Codons with non-nucleotide characters have no entry in the table and
/// contribute nothing; callers that care validate the window beforehand.
#[inline]
pub fn to_aa(seq: &[u8]) -> Vec<u8> {
    let mut converted: Vec<u8> = Vec::with_capacity(seq.len() / 3);

    for chunk in seq.chunks_exact(3) {
        if let Some(residue) = translate_codon(chunk) {
            converted.push(residue);
        }
    }

    converted
}
