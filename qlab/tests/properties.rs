//! End-to-end checks of the engine's physical guarantees, exercised only
//! through the public API.

use std::f64::consts::{ FRAC_1_SQRT_2, PI, TAU };
use approx::assert_abs_diff_eq;
use num_complex::Complex64 as C64;
use qlab::{
    config::{ Parameters, ScatteringParams },
    grid::build_grid,
    observables::QuantumProperties,
    potential::{ evaluate_potential, Family },
    qubit::{ apply_gate, Qubit },
    solve::{ solve_spectrum, System },
    timedep::{ evolve, probability_density, InitialState },
    tunnel::{ tunnel, Scattering },
    utils::{ wf_norm, wf_normalized },
};

#[test]
fn harmonic_levels() {
    let grid = build_grid(-5.0, 5.0, 150).unwrap();
    let V = evaluate_potential(&grid, Family::Harmonic, 1.0, 0.0, None);
    let spectrum = solve_spectrum(&grid, &V, Family::Harmonic, 1.0, 5).unwrap();
    assert!(!spectrum.used_fallback());
    spectrum.energies().iter().enumerate()
        .for_each(|(n, e)| assert_abs_diff_eq!(*e, n as f64 + 0.5, epsilon = 1e-9));
}

#[test]
fn infinite_well_levels() {
    let grid = build_grid(-6.0, 6.0, 150).unwrap();
    let V = evaluate_potential(&grid, Family::InfiniteWell, 10.0, 0.0, None);
    let spectrum = solve_spectrum(&grid, &V, Family::InfiniteWell, 10.0, 5).unwrap();
    spectrum.energies().iter().enumerate()
        .for_each(|(n, e)| {
            let expected = ((n + 1) as f64).powi(2) * PI * PI / 200.0;
            assert_abs_diff_eq!(*e, expected, epsilon = 1e-9);
        });
}

#[test]
fn normalizer() {
    let grid = build_grid(-3.0, 8.0, 77).unwrap();
    let f = grid.map(|x| (0.7 * x).sin() * (-0.1 * x * x).exp() + 0.05);
    let fn_ = wf_normalized(&f, grid.dx());
    assert_abs_diff_eq!(wf_norm(&fn_, grid.dx()), 1.0, epsilon = 1e-6);
}

#[test]
fn every_state_is_normalized() {
    let params = Parameters { param1: 2.0, param2: 6.0, ..Parameters::default() };
    for family in [Family::FiniteWell, Family::DoubleWell, Family::Coulomb, Family::Step] {
        let system = System::new(family, &params, None, 100).unwrap();
        let spectrum = system.solve(params.num_states).unwrap();
        assert_eq!(spectrum.len(), params.num_states);
        spectrum.iter()
            .for_each(|sol| {
                assert_abs_diff_eq!(wf_norm(&sol.wf, system.get_dx()), 1.0, epsilon = 1e-6);
            });
    }
}

#[test]
fn tunneling_reference_cases() {
    let below = tunnel(1.0, 10.0, 1.0);
    assert!(below.T > 0.0 && below.T < 1e-3);
    let above = tunnel(20.0, 10.0, 1.0);
    assert!(above.T > 0.5 && above.T < 1.0);
    let edge = tunnel(10.0, 10.0, 1.0);
    assert_abs_diff_eq!(edge.T, 1.0 / 6.0, epsilon = 1e-12);
    for res in [below, above, edge] {
        assert_abs_diff_eq!(res.T + res.R, 1.0, epsilon = 1e-15);
    }
}

#[test]
fn transmission_is_bounded() {
    for i in 0..50 {
        for j in 0..20 {
            let E = 0.05 + 0.4 * i as f64;
            let V0 = 0.5 * j as f64;
            let res = tunnel(E, V0, 1.3);
            assert!((0.0..=1.0).contains(&res.T));
            assert_abs_diff_eq!(res.T + res.R, 1.0, epsilon = 1e-15);
        }
    }
}

#[test]
fn evolution_at_zero_reproduces_ground_state() {
    let system = System::new(Family::FiniteWell, &Parameters::default(), None, 80).unwrap();
    let spectrum = system.solve(4).unwrap();
    let psi = evolve(&spectrum, &[C64::from(1.0), C64::from(0.0)], 0.0);
    psi.iter().zip(&spectrum.ground().unwrap().wf)
        .for_each(|(psik, phik)| {
            assert_abs_diff_eq!(psik.re, *phik, epsilon = 1e-12);
            assert_abs_diff_eq!(psik.im, 0.0, epsilon = 1e-12);
        });
}

#[test]
fn two_level_density_is_periodic() {
    let system = System::new(Family::Harmonic, &Parameters::default(), None, 150).unwrap();
    let spectrum = system.solve(2).unwrap();
    let c = InitialState::Superposition.coefficients(spectrum.len());
    let E = spectrum.energies();
    let period = TAU / (E[1] - E[0]);
    for t in [0.0, 0.3, 1.7] {
        let rho0 = probability_density(&evolve(&spectrum, &c, t));
        let rho1 = probability_density(&evolve(&spectrum, &c, t + period));
        rho0.iter().zip(&rho1)
            .for_each(|(a, b)| assert_abs_diff_eq!(a, b, epsilon = 1e-10));
    }
    // but not at half the period
    let rho0 = probability_density(&evolve(&spectrum, &c, 0.0));
    let rho_half = probability_density(&evolve(&spectrum, &c, period / 2.0));
    let diff: f64 = rho0.iter().zip(&rho_half).map(|(a, b)| (a - b).abs()).sum();
    assert!(diff > 1.0);
}

#[test]
fn gate_identities() {
    let zero = Qubit::zero();
    let hh = apply_gate(&apply_gate(&zero, "H").unwrap(), "H").unwrap();
    assert_abs_diff_eq!((hh.alpha() - C64::from(1.0)).norm(), 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(hh.beta().norm(), 0.0, epsilon = 1e-15);

    let q = Qubit::new(C64::new(FRAC_1_SQRT_2, 0.0), C64::new(0.0, -FRAC_1_SQRT_2));
    let xx = apply_gate(&apply_gate(&q, "X").unwrap(), "X").unwrap();
    assert_eq!(xx, q);

    assert!(apply_gate(&q, "sqrt-swap").is_err());
}

#[test]
fn default_harmonic_session() {
    let params = Parameters::default();
    let system = System::new(Family::Harmonic, &params, None, 150).unwrap();
    let spectrum = system.solve(params.num_states).unwrap();
    assert_abs_diff_eq!(spectrum.energies()[0], 0.5, epsilon = 1e-12);
    let props = QuantumProperties::of_ground(system.get_grid(), system.get_V(), &spectrum)
        .unwrap()
        .unwrap();
    assert!(props.uncertainty_product >= 0.5 - 1e-9);
    assert!(props.satisfies_heisenberg());
}

#[test]
fn default_barrier() {
    let params = ScatteringParams::default();
    let res = tunnel(params.energy, params.barrier_height, params.barrier_width);
    assert!(res.T > 0.0 && res.T < 1.0);
    assert_eq!(res.R, 1.0 - res.T);
    let view = Scattering::compute(&params, 0.0).unwrap();
    assert_eq!(view.result, res);
}

#[test]
fn custom_potential_never_fails() {
    let grid = build_grid(-2.0, 2.0, 41).unwrap();
    for expr in ["sqrt(x)", "log(x)", "1/x", "x ^", "foo(x)", ""] {
        let V = evaluate_potential(&grid, Family::Custom, 0.0, 0.0, Some(expr));
        assert_eq!(V.len(), 41);
        assert!(V.iter().all(|v| v.is_finite()), "non-finite profile for {:?}", expr);
        let spectrum = solve_spectrum(&grid, &V, Family::Custom, 0.0, 3).unwrap();
        assert!(spectrum.energies().iter().all(|e| e.is_finite()));
    }
}
