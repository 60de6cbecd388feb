//! Error types for every fallible operation in the engine.
//!
//! Each one implements [`std::error::Error`] via [`thiserror`], so that they
//! nest into one another and pass through [`anyhow`][anyhow] in the binaries.
//!
//! Most failures a user can provoke (bad custom expressions, an eigensolver
//! that fails to converge, resonant tunneling energies) are absorbed inside
//! the engine and never surface as one of these; see the individual solver
//! functions.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when a grid-sampled quantity (potential, wavefunction, weights)
/// does not have one value per grid point.
#[derive(Debug, Error)]
#[error("grid-sampled arrays disagree in length: {0} vs {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        lhs: &nd::ArrayBase<S, nd::Ix1>,
        rhs: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        match (lhs.len(), rhs.len()) {
            (n, m) if n == m => Ok(()),
            (n, m) => Err(Self(n, m)),
        }
    }
}

/// Returned from [`build_grid`][crate::grid::build_grid].
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when fewer than 2 sample points are requested.
    #[error("grids must have at least 2 points; got {0}")]
    TooFewPoints(usize),

    /// Returned when the interval bounds are non-finite or reversed.
    #[error("grid bounds must be finite with min <= max; got ({0}, {1})")]
    BadInterval(f64, f64),
}

impl GridError {
    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::TooFewPoints(n))
    }

    pub(crate) fn check_interval(min: f64, max: f64) -> Result<(), Self> {
        (min.is_finite() && max.is_finite() && min <= max)
            .then_some(())
            .ok_or(Self::BadInterval(min, max))
    }
}

/// Returned from parsing or evaluating a custom potential
/// [expression][crate::expr::Expr].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    /// A character that cannot begin any token.
    #[error("unexpected character {0:?} at position {1}")]
    UnexpectedChar(char, usize),

    /// A numeric literal that could not be read.
    #[error("malformed number {0:?}")]
    BadNumber(String),

    /// A token that does not fit the grammar at its position.
    #[error("unexpected token {0}")]
    UnexpectedToken(String),

    /// The input ended in the middle of an expression.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A name that is neither `x` nor a known constant.
    #[error("unknown variable {0:?}")]
    UnknownVariable(String),

    /// A call to a function that is not provided.
    #[error("unknown function {0:?}")]
    UnknownFunction(String),

    /// A known function called with the wrong number of arguments.
    #[error("function {name:?} takes {expected} argument(s); got {got}")]
    BadArity { name: String, expected: usize, got: usize },

    /// Evaluation produced NaN or ±∞.
    #[error("expression evaluated to a non-finite value at x = {0}")]
    NonFinite(f64),

    /// Parentheses, calls, or operators nested beyond the supported limit.
    #[error("expression nests more than {0} levels deep")]
    TooDeep(usize),
}

/// Returned from the [symmetric eigensolver][crate::eigen::eigh].
#[derive(Debug, Error)]
pub enum EigenError {
    /// The input matrix is not square.
    #[error("eigensolver requires a square matrix; got {0}x{1}")]
    NotSquare(usize, usize),

    /// The input matrix contains NaN or ±∞.
    #[error("eigensolver encountered non-finite matrix elements")]
    NonFinite,

    /// Off-diagonal elements were not annihilated within the sweep limit.
    #[error("jacobi rotations failed to converge after {0} sweeps")]
    NoConvergence(usize),
}

/// Returned from spatial wavefunction solver functions.
#[derive(Debug, Error)]
pub enum XError {
    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`EigenError`]
    #[error("eigensolver error: {0}")]
    Eigen(#[from] EigenError),
}

/// Returned from the [qubit gate engine][crate::qubit].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QubitError {
    /// Qubit input with a number of amplitudes other than 2.
    #[error("qubit states have exactly 2 amplitudes; got {0}")]
    BadLength(usize),

    /// An amplitude that could not be read as a real or complex number.
    #[error("could not parse amplitude {0:?}")]
    BadAmplitude(String),

    /// A gate name that is not recognized.
    #[error("unknown gate {0:?}")]
    UnknownGate(String),
}

/// Returned when reading or writing configuration and export documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// [`serde_json::Error`]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
