//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Finite differences](#finite-differences)
//! - [Jacobi rotations](#jacobi-rotations)
//! - [Time dependence](#time-dependence)
//! - [Momentum space](#momentum-space)
//! - [Tunneling](#tunneling)
//!
//! # Background
//! Stationary states of a particle of mass *m* in a conservative potential
//! *V*(*x*) are eigenpairs of the Hamiltonian,
//! ```text
//!      ħ²  ∂²
//! - --- --- φ(x) + V(x) φ(x) = E φ(x)
//!     2 m ∂x²
//! ```
//! the one-dimensional time-independent Schrödinger equation (TISE). Since the
//! Hamiltonian is Hermitian its eigenvalues are real, and for a real potential
//! the bound-state wavefunctions can be chosen real as well. Every
//! wavefunction in this crate is real until it is evolved in time.
//!
//! Two potentials have well-known closed forms which are used directly. For the
//! harmonic oscillator *V* = *ω*² *x*² / 2,
//! ```text
//! E[n] = ω (n + 1/2)
//! φ[n](x) ∝ H[n](ξ) exp(-ξ²/2),   ξ = x √ω
//! ```
//! where the *H*\[*n*\] are the physicists' Hermite polynomials,
//! ```text
//! H[0](ξ) = 1
//! H[1](ξ) = 2 ξ
//! H[n](ξ) = 2 ξ H[n - 1](ξ) - 2 (n - 1) H[n - 2](ξ)
//! ```
//! and for an infinite square well of width *L* centered on the origin,
//! ```text
//!        (n + 1)² π²
//! E[n] = -----------
//!           2 L²
//!
//! φ[n](x) ∝ sin((n + 1) π (x + L/2) / L),   |x| ≤ L/2
//! ```
//! Closed-form wavefunctions are sampled on the grid and then normalized over
//! it, so that all states, however they were obtained, satisfy the same
//! discrete normalization (see below).
//!
//! # Units
//! All quantities are expressed in natural units where *ħ* = *m* = 1. Lengths,
//! times and energies are then all measured in terms of one another: for a
//! harmonic oscillator of frequency *ω*, the natural length scale is
//! 1/√*ω* and the level spacing is *ω*. Nothing in the crate converts to
//! physical units.
//!
//! # Finite differences
//! Every other potential is handled by replacing the second derivative with
//! its three-point central difference on a uniform grid,
//! ```text
//! x[i] = x₀ + i δx,   i ∊ {0, ..., N - 1}
//!
//!  ∂²φ      φ[i + 1] - 2 φ[i] + φ[i - 1]
//! ---- ≈ ---------------------------- + O(δx²)
//! ∂x²                δx²
//! ```
//! with the wavefunction taken to vanish just outside the grid. The TISE
//! becomes an ordinary eigenvalue problem for the real symmetric tridiagonal
//! matrix
//! ```text
//! H[i, i]     = 2 t + V[i]
//! H[i, i ± 1] = -t
//!
//! t = 1 / (2 δx²)
//! ```
//! whose lowest eigenpairs approximate the lowest bound states. The error in
//! each energy scales as *δx*² times the expectation value of the fourth power
//! of the momentum, so low-lying states on a grid of ~100 points are accurate
//! to a few parts in 10⁴ or better.
//!
//! Matrix eigenvectors are normalized under the Euclidean inner product; they
//! are rescaled so that
//! ```text
//! Σ φ[i]² δx = 1
//! ```
//! which is the discrete analogue of ∫ |φ|² d*x* = 1 and the inner product under
//! which expectation values are computed.
//!
//! # Jacobi rotations
//! The matrix is diagonalized with the cyclic Jacobi method[^1]. A Jacobi
//! rotation *P*(*p*, *q*, *θ*) is chosen so that the transformed matrix
//! *P*ᵀ *H* *P* has a zero at (*p*, *q*):
//! ```text
//!          H[q, q] - H[p, p]
//! cot 2θ = -----------------
//!              2 H[p, q]
//! ```
//! The rotation also mixes the other elements of rows and columns *p* and *q*,
//! so zeros produced earlier do not stay zero, but the sum of squares of all
//! off-diagonal elements strictly decreases with every rotation. Sweeping
//! cyclically over all pairs therefore converges, quadratically once the
//! off-diagonal elements are small. The product of all rotations accumulates
//! the eigenvectors.
//!
//! Two refinements keep the method fast and stable: during the first three
//! sweeps, rotations are skipped for elements below a threshold proportional
//! to the current off-diagonal sum; and after four sweeps, elements that are
//! negligible next to both corresponding diagonal elements are set to zero
//! outright. In practice a matrix of a few hundred rows converges in under ten
//! sweeps.
//!
//! Unlike iterative Krylov methods, Jacobi is unconditionally convergent for
//! symmetric matrices and produces eigenvectors that are orthogonal to working
//! precision. If for any reason it fails (e.g. the potential contains
//! non-finite values), the solver falls back to placeholder sine-basis states
//! and reports doing so.
//!
//! # Time dependence
//! The Hamiltonian is time-independent, so any superposition of its
//! eigenstates evolves exactly as
//! ```text
//! ψ(x, t) = Σ[n] c[n] φ[n](x) exp(-i E[n] t)
//! ```
//! with constant complex coefficients *c*\[*n*\]. Rather than stepping a
//! differential equation forward, the state at any time is assembled directly
//! from the spectrum. There is no truncation error in *t*, norm is exactly
//! conserved, and jumping to an arbitrary time costs the same as advancing by
//! one frame. The only approximation is in the truncation of the spectrum to
//! the requested number of states.
//!
//! For a two-state superposition the probability density
//! ```text
//! |ψ|² = |c₀|² φ₀² + |c₁|² φ₁² + 2 Re(c₀* c₁ exp(-i ΔE t)) φ₀ φ₁
//! ```
//! oscillates with period 2π / Δ*E*.
//!
//! The probability current
//! ```text
//! J = Re ψ ∂ₓ Im ψ - Im ψ ∂ₓ Re ψ
//! ```
//! is computed with central differences and vanishes identically for a single
//! real eigenstate.
//!
//! # Momentum space
//! The momentum-space wavefunction is the Fourier transform
//! ```text
//!           __
//! φ(k) ≈   \    ψ(x[j]) exp(-i k x[j]) δx
//!          /__ j
//! ```
//! evaluated on the centered grid *k*\[*m*\] = (*m* - *N*/2) *δk*,
//! *δk* = 2π / (*N* *δx*). Substituting *x*\[*j*\] = *x*₀ + *j* *δx*,
//! ```text
//! φ(k[m]) = δx exp(-i k[m] x₀) Σ[j] (-1)^j ψ[j] exp(-2π i j m / N)
//! ```
//! which is a single forward FFT of the sign-alternated samples followed by a
//! phase. The density |*φ*(*k*)|² / 2π is then normalized under Σ *δk* by
//! Parseval's theorem whenever *ψ* is normalized under Σ *δx*.
//!
//! # Tunneling
//! A particle of energy *E* incident on a rectangular barrier of height *V*₀
//! and width *a* is transmitted with probability[^2]
//! ```text
//!                  V₀² sinh²(κ a)
//! 1 / T = 1 + ----------------,   κ = √(2 (V₀ - E)),   E < V₀
//!               4 E (V₀ - E)
//!
//!                  V₀² sin²(q a)
//! 1 / T = 1 + ----------------,   q = √(2 (E - V₀)),   E > V₀
//!               4 E (E - V₀)
//! ```
//! Both expressions have the same finite limit as *E* → *V*₀,
//! ```text
//! 1 / T = 1 + a² V₀ / 2
//! ```
//! which is used explicitly near that point. Above the barrier, *T* = 1
//! whenever *q a* is a multiple of π (transmission resonances).
//!
//! [^1]: W. H. Press, S. A. Teukolsky, W. T. Vetterling, and B. P. Flannery,
//! *Numerical Recipes*, 3rd ed., §11.1. Cambridge University Press (2007).
//!
//! [^2]: D. J. Griffiths, *Introduction to Quantum Mechanics*, 2nd ed.,
//! problem 2.33. Pearson (2005).
