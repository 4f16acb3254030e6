use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, GammaError>;

/// Everything that can make a gamma call fail.
///
/// All variants are raised while validating inputs, before any search runs.
#[derive(Debug, Display, From)]
pub enum GammaError {
    /// An array with the wrong number of dimensions was passed to an entry point.
    #[display("{which} must be {expected}-dimensional, got {found} dimensions")]
    Dimensionality {
        which: &'static str,
        expected: usize,
        found: usize,
    },

    /// Reference and evaluation grids of different shapes were passed to the 2D search.
    #[display("reference shape {reference:?} does not match evaluation shape {evaluation:?}")]
    ShapeMismatch {
        reference: Vec<usize>,
        evaluation: Vec<usize>,
    },

    #[display("{_0} distribution is empty")]
    Empty(&'static str),

    #[display("{which} coordinates have {coordinates} entries but the distribution has {samples}")]
    CoordinateLength {
        which: &'static str,
        coordinates: usize,
        samples: usize,
    },

    #[display("{_0} coordinates are not monotonically non-decreasing")]
    NonMonotonic(&'static str),

    /// The evaluation axis leaves the reference axis; extrapolation is not supported.
    #[display(
        "evaluation coordinates [{eval_min}, {eval_max}] extend outside reference coordinates [{ref_min}, {ref_max}]"
    )]
    Extrapolation {
        eval_min: f64,
        eval_max: f64,
        ref_min: f64,
        ref_max: f64,
    },

    #[display("resolution factor must be a positive integer, got {_0}")]
    ResolutionFactor(usize),

    /// A tolerance, threshold or cap outside its admissible range.
    #[display("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[display("{_0}")]
    #[from]
    Shape(ndarray::ShapeError),
}

impl std::error::Error for GammaError {}
