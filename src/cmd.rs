use std::path::Path;

use log::{debug, trace, warn};
use needletail::parse_fastx_file;

use crate::sketch::minhash::KmerMinHash;
use crate::sketch::{SigsTrait, SketchParameters};
use crate::Error;

/// Sketch every record of a FASTA/FASTQ file into one sketch.
///
/// Records shorter than `ksize` are skipped. A record with characters outside
/// `ACGT` (after uppercasing) aborts the file, unless `force` is set, in which
/// case it is skipped and whatever it admitted before the bad character stays.
pub fn sketch_file<P: AsRef<Path>>(
    path: P,
    params: &SketchParameters,
    force: bool,
) -> Result<KmerMinHash, Error> {
    let mut mh = params.sketch()?;
    let mut reader = parse_fastx_file(path.as_ref())?;

    let mut records = 0usize;
    let mut skipped = 0usize;
    while let Some(record) = reader.next() {
        let record = record?;
        let seq = record.seq().to_ascii_uppercase();
        records += 1;

        match mh.add_sequence(&seq) {
            Ok(()) => {}
            Err(Error::ShortSequence { len, .. }) => {
                trace!(
                    "skipping {}: {} bases",
                    String::from_utf8_lossy(record.id()),
                    len
                );
                skipped += 1;
            }
            Err(err @ Error::InvalidDNA { .. }) if force => {
                warn!("skipping {}: {}", String::from_utf8_lossy(record.id()), err);
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "{}: {} records ({} skipped), {} hashes",
        path.as_ref().display(),
        records,
        skipped,
        mh.size()
    );
    Ok(mh)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub common: u64,
    pub jaccard: f64,
    pub sizes: (usize, usize),
}

pub fn compare(a: &KmerMinHash, b: &KmerMinHash) -> Result<Comparison, Error> {
    Ok(Comparison {
        common: a.count_common(b)?,
        jaccard: a.jaccard(b)?,
        sizes: (a.size(), b.size()),
    })
}
