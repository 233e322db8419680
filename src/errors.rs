use thiserror::Error;

#[derive(Debug, Error)]
pub enum SketchError {
    /// Raised when a sketch is built with parameters it cannot work with.
    #[error("invalid sketch parameter: {message}")]
    InvalidParameter { message: String },

    #[error("different ksizes cannot be compared")]
    MismatchKSizes,

    #[error("different primes cannot be compared")]
    MismatchPrime,

    #[error("DNA/prot minhashes cannot be compared")]
    MismatchDNAProt,

    #[error("sequence is shorter than ksize: {len} < {ksize}")]
    ShortSequence { len: usize, ksize: u32 },

    #[error("invalid DNA character in sequence: {message}")]
    InvalidDNA { message: String },

    #[error(transparent)]
    Parse(#[from] needletail::errors::ParseError),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl SketchError {
    /// Errors raised because two sketches disagree on `ksize`, `prime` or molecule.
    pub fn is_incompatible(&self) -> bool {
        matches!(
            self,
            SketchError::MismatchKSizes | SketchError::MismatchPrime | SketchError::MismatchDNAProt
        )
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchErrorCode {
    // no error
    NoError = 0,
    // parameters
    InvalidParameter = 2,
    // Compatibility errors
    MismatchKSizes = 1_01,
    MismatchDNAProt = 1_02,
    MismatchPrime = 1_03,
    // Input sequence errors
    InvalidDNA = 11_01,
    ShortSequence = 11_02,
    // external errors
    Io = 100_001,
    ParseError = 100_002,
}

impl SketchErrorCode {
    pub fn from_error(error: &SketchError) -> SketchErrorCode {
        match error {
            SketchError::InvalidParameter { .. } => SketchErrorCode::InvalidParameter,
            SketchError::MismatchKSizes => SketchErrorCode::MismatchKSizes,
            SketchError::MismatchPrime => SketchErrorCode::MismatchPrime,
            SketchError::MismatchDNAProt => SketchErrorCode::MismatchDNAProt,
            SketchError::ShortSequence { .. } => SketchErrorCode::ShortSequence,
            SketchError::InvalidDNA { .. } => SketchErrorCode::InvalidDNA,
            SketchError::Parse(_) => SketchErrorCode::ParseError,
            SketchError::IOError(_) => SketchErrorCode::Io,
        }
    }
}
