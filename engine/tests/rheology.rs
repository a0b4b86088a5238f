use engine::rheology::{Plasticity, ViscosityLaw, ViscousCreep};

#[test]
fn creep_viscosity_decreases_with_temperature() {
    let law = ViscousCreep::karato_and_wu_1990();
    let rate = 1.0e-15;
    let p = 1.0e9;
    let cold = law.viscosity_pa_s(rate, 900.0, p);
    let warm = law.viscosity_pa_s(rate, 1300.0, p);
    let hot = law.viscosity_pa_s(rate, 1600.0, p);
    assert!(cold > warm && warm > hot);
    assert!(hot > 0.0);
}

#[test]
fn creep_viscosity_decreases_with_strain_rate() {
    // n > 1: faster deformation is weaker
    let law = ViscousCreep::gleason_and_tullis_1995();
    let slow = law.viscosity_pa_s(1.0e-16, 800.0, 5.0e8);
    let fast = law.viscosity_pa_s(1.0e-13, 800.0, 5.0e8);
    assert!(slow > fast);
}

#[test]
fn strength_multiplier_scales_linearly() {
    let base = ViscousCreep::karato_and_wu_1990();
    let stiff = base.scaled(5.0);
    let eta = base.viscosity_pa_s(1.0e-15, 1400.0, 2.0e9);
    let eta5 = stiff.viscosity_pa_s(1.0e-15, 1400.0, 2.0e9);
    assert!((eta5 / eta - 5.0).abs() < 1e-9);
}

#[test]
fn pressure_stiffens_when_activation_volume_is_set() {
    let law = ViscousCreep::karato_and_wu_1990();
    assert!(law.activation_volume_m3_mol > 0.0);
    let shallow = law.viscosity_pa_s(1.0e-15, 1400.0, 1.0e8);
    let deep = law.viscosity_pa_s(1.0e-15, 1400.0, 5.0e9);
    assert!(deep > shallow);

    // quartzite has no activation volume: pressure changes nothing
    let q = ViscousCreep::gleason_and_tullis_1995();
    let a = q.viscosity_pa_s(1.0e-15, 800.0, 1.0e8);
    let b = q.viscosity_pa_s(1.0e-15, 800.0, 5.0e9);
    assert!((a - b).abs() / a < 1e-12);
}

#[test]
fn softening_ramps_between_the_strain_knots() {
    let p = Plasticity { epsilon1: 0.01, epsilon2: 1.0, ..Plasticity::huismans_et_al_2011_crust() };

    let (c0, mu0) = p.softened(0.0);
    assert!((c0 - p.cohesion_pa).abs() < 1e-9);
    assert!((mu0 - p.friction_coefficient).abs() < 1e-12);

    let (c_end, mu_end) = p.softened(2.0);
    assert!((c_end - p.cohesion_after_softening_pa).abs() < 1e-9);
    assert!((mu_end - p.friction_after_softening).abs() < 1e-12);

    // halfway through the ramp
    let mid = 0.5 * (p.epsilon1 + p.epsilon2);
    let (c_mid, mu_mid) = p.softened(mid);
    assert!((c_mid - 0.5 * (p.cohesion_pa + p.cohesion_after_softening_pa)).abs() < 1e-6);
    assert!((mu_mid - 0.5 * (p.friction_coefficient + p.friction_after_softening)).abs() < 1e-12);

    // monotone weakening
    let mut prev = p.yield_stress_pa(0.0, 1.0e8);
    for i in 1..=20 {
        let y = p.yield_stress_pa(i as f64 * 0.1, 1.0e8);
        assert!(y <= prev);
        prev = y;
    }
}

#[test]
fn yield_stress_grows_with_pressure() {
    let p = Plasticity::huismans_et_al_2011_crust();
    let low = p.yield_stress_pa(0.0, 1.0e7);
    let high = p.yield_stress_pa(0.0, 1.0e9);
    assert!(high > low);
    assert!((low - (p.cohesion_pa + p.friction_coefficient * 1.0e7)).abs() < 1e-6);
}

#[test]
fn constant_law_ignores_conditions() {
    let law = ViscosityLaw::Constant(1.0e19);
    assert!((law.viscosity_pa_s(1.0e-15, 300.0, 0.0) - 1.0e19).abs() < 1e-9);
    assert!((law.viscosity_pa_s(1.0e-12, 1600.0, 5.0e9) - 1.0e19).abs() < 1e-9);
    assert_eq!(law.name(), "constant");
    assert_eq!(
        ViscosityLaw::Creep(ViscousCreep::gleason_and_tullis_1995()).name(),
        "Gleason and Tullis, 1995"
    );
}
