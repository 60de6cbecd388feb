//! Model potentials sampled over a [`Grid`].

use std::{ fmt, str::FromStr };
use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{
    COULOMB_SOFTENING,
    INFINITE_WALL,
    expr::Expr,
    grid::Grid,
    safe_denom,
};

/// Selects a potential family.
///
/// Each family takes up to two real parameters `p1` and `p2`, whose meaning
/// depends on the family; see [`evaluate_potential`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Harmonic oscillator; `p1` is the angular frequency.
    Harmonic,
    /// Infinite square well centered on 0; `p1` is the width.
    #[serde(rename = "infinite")]
    InfiniteWell,
    /// Finite square well centered on 0; `p1` is the width, `p2` the depth.
    #[serde(rename = "finite")]
    FiniteWell,
    /// Step at the origin; `p1` is the step height.
    Step,
    /// Symmetric quartic double well; `p1` is the separation, `p2` the depth.
    #[serde(rename = "double")]
    DoubleWell,
    /// Softened attractive Coulomb potential; `p1` is the charge.
    Coulomb,
    /// A user-defined [expression][Expr] in `x`.
    Custom,
    /// Fallback for unrecognized tags: `0.5 x²`.
    #[default]
    #[serde(other)]
    Default,
}

impl Family {
    /// Look up a family by its short tag, mapping unknown tags to
    /// [`Family::Default`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "harmonic" => Self::Harmonic,
            "infinite" | "infinite_well" | "box" => Self::InfiniteWell,
            "finite" | "finite_well" => Self::FiniteWell,
            "step" => Self::Step,
            "double" | "double_well" => Self::DoubleWell,
            "coulomb" => Self::Coulomb,
            "custom" => Self::Custom,
            _ => Self::Default,
        }
    }

    /// Get the short tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Harmonic => "harmonic",
            Self::InfiniteWell => "infinite",
            Self::FiniteWell => "finite",
            Self::Step => "step",
            Self::DoubleWell => "double",
            Self::Coulomb => "coulomb",
            Self::Custom => "custom",
            Self::Default => "default",
        }
    }

    /// Return `true` if the spectrum of `self` has a closed form.
    pub fn is_analytic(&self) -> bool {
        matches!(self, Self::Harmonic | Self::InfiniteWell)
    }

    /// Evaluate the potential at a single point.
    ///
    /// [`Family::Custom`] has no closed form and returns 0 here; use
    /// [`evaluate_potential`] with an expression instead.
    pub fn value(&self, x: f64, p1: f64, p2: f64) -> f64 {
        match self {
            Self::Harmonic => 0.5 * p1 * p1 * x * x,
            Self::InfiniteWell => {
                if x.abs() <= p1 / 2.0 { 0.0 } else { INFINITE_WALL }
            },
            Self::FiniteWell => if x.abs() <= p1 / 2.0 { 0.0 } else { p2 },
            Self::Step => if x > 0.0 { p1 } else { 0.0 },
            Self::DoubleWell => {
                p2 * (x * x - (p1 / 2.0).powi(2)).powi(2)
                    / safe_denom(p1.powi(4))
            },
            Self::Coulomb => -p1 / (x.abs() + COULOMB_SOFTENING),
            Self::Custom => 0.0,
            Self::Default => 0.5 * x * x,
        }
    }
}

impl FromStr for Family {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self::from_tag(s)) }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Sample a user expression over a grid.
///
/// Points at which evaluation fails are set to 0; the rest of the profile is
/// unaffected.
pub fn evaluate_expr(grid: &Grid, expr: &Expr) -> nd::Array1<f64> {
    let mut failures: usize = 0;
    let V = grid.map(|xk| {
        expr.eval(xk).unwrap_or_else(|_| { failures += 1; 0.0 })
    });
    if failures > 0 {
        log::warn!(
            "potential::evaluate_expr: custom potential could not be \
            evaluated at {} of {} points; using 0 there",
            failures,
            grid.len(),
        );
    }
    V
}

/// Compute a potential profile over a grid.
///
/// | family | V(x) |
/// |---|---|
/// | harmonic | 0.5 p1² x² |
/// | infinite well | 0 for \|x\| ≤ p1/2, else [`INFINITE_WALL`] |
/// | finite well | 0 for \|x\| ≤ p1/2, else p2 |
/// | step | p1 for x > 0, else 0 |
/// | double well | p2 (x² - (p1/2)²)² / p1⁴ |
/// | coulomb | -p1 / (\|x\| + 0.1) |
/// | custom | `custom` evaluated per point |
/// | default | 0.5 x² |
///
/// For the custom family, an expression that fails to parse (or a missing
/// one) produces an all-zero profile, and points at which a valid expression
/// fails to evaluate are set to 0. This function never fails.
pub fn evaluate_potential(
    grid: &Grid,
    family: Family,
    p1: f64,
    p2: f64,
    custom: Option<&str>,
) -> nd::Array1<f64> {
    match family {
        Family::Custom => {
            match custom.map(Expr::parse) {
                Some(Ok(expr)) => evaluate_expr(grid, &expr),
                Some(Err(err)) => {
                    log::warn!(
                        "potential::evaluate_potential: invalid custom \
                        potential: {}",
                        err,
                    );
                    nd::Array1::zeros(grid.len())
                },
                None => nd::Array1::zeros(grid.len()),
            }
        },
        fam => grid.map(|xk| fam.value(xk, p1, p2)),
    }
}

/// Barrier geometries for the scattering view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarrierShape {
    /// Two barriers of width `a/2` centered at `±a/2`.
    Double,
    /// A periodic array of barriers with period `a`.
    Periodic,
    /// A smooth ramp rising to the barrier height over a length `a`.
    Ramp,
    /// A single rectangular barrier of width `a`.
    #[default]
    #[serde(other)]
    Single,
}

impl BarrierShape {
    /// Look up a shape by tag, mapping unknown tags to
    /// [`BarrierShape::Single`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "double" => Self::Double,
            "periodic" => Self::Periodic,
            "ramp" => Self::Ramp,
            _ => Self::Single,
        }
    }

    /// Evaluate the barrier at a single point.
    pub fn value(&self, x: f64, height: f64, width: f64) -> f64 {
        match self {
            Self::Single => if x.abs() < width / 2.0 { height } else { 0.0 },
            Self::Double => {
                let inside
                    = (x - width / 2.0).abs() < width / 4.0
                    || (x + width / 2.0).abs() < width / 4.0;
                if inside { height } else { 0.0 }
            },
            Self::Periodic => {
                let phase = x * std::f64::consts::PI / safe_denom(width);
                if phase.sin().abs() > 0.5 { height } else { 0.0 }
            },
            Self::Ramp => {
                if x > 0.0 {
                    height * (1.0 - (-x / safe_denom(width)).exp())
                } else {
                    0.0
                }
            },
        }
    }
}

/// Compute a barrier profile over a grid.
pub fn barrier_potential(
    grid: &Grid,
    shape: BarrierShape,
    height: f64,
    width: f64,
) -> nd::Array1<f64> {
    grid.map(|xk| shape.value(xk, height, width))
}
