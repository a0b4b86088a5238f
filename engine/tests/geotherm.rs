use engine::bcs::TemperatureBcs;
use engine::geotherm::{self, ThermalDefaults};
use engine::grid::Grid;
use engine::materials::{DensityLaw, Layer, Material, MaterialSet};
use engine::rheology::ViscosityLaw;
use engine::scaling::Scaling;
use engine::units::{cm_yr, deg_k, km, m, MetersPerSecond};

const DEFAULTS: ThermalDefaults = ThermalDefaults { capacity_j_kg_k: 1000.0, diffusivity_m2_s: 1.0e-6 };

fn scaling() -> Scaling {
    Scaling::from_characteristic(
        m(500.0e3),
        MetersPerSecond::from(cm_yr(1.8)),
        3370.0 * 9.81,
        deg_k(273.15),
        deg_k(1603.15),
    )
}

fn layered_set() -> (MaterialSet, TemperatureBcs) {
    let mut set = MaterialSet::new();
    let air = set.add(Material {
        shape: Some(Layer::new(km(20.0).into(), km(0.0).into())),
        density: DensityLaw::Constant(1.0),
        viscosity: ViscosityLaw::Constant(1.0e19),
        capacity_j_kg_k: Some(100.0),
        ..Material::named("Air")
    });
    set.add(Material {
        shape: Some(Layer::new(km(0.0).into(), km(-40.0).into())),
        density: DensityLaw::linear(2800.0),
        heat_production_w_m3: 0.7e-6,
        ..Material::named("Crust")
    });
    set.add(Material {
        shape: Some(Layer::new(km(-40.0).into(), km(-100.0).into())),
        density: DensityLaw::linear(3370.0),
        ..Material::named("MantleLithosphere")
    });
    let mantle = set.add(Material {
        shape: Some(Layer::new(km(-100.0).into(), km(-160.0).into())),
        density: DensityLaw::linear(3370.0),
        ..Material::named("Mantle")
    });
    let bcs = TemperatureBcs::new(deg_k(293.15), deg_k(1603.15))
        .with_override(mantle, deg_k(1603.15))
        .with_override(air, deg_k(293.15));
    (set, bcs)
}

fn rift_grid(scaling: &Scaling) -> Grid {
    Grid::new(
        [8, 4, 8],
        [0.0, 0.0, scaling.nd_length(m(-160.0e3))],
        [1.0, 1.0, scaling.nd_length(m(20.0e3))],
        [false, true, false],
    )
    .unwrap()
}

#[test]
fn overrides_pin_air_and_mantle() {
    let sc = scaling();
    let (set, bcs) = layered_set();
    let g = rift_grid(&sc);
    let (wb, wt) = geotherm::conductive_window_m(&g, &sc, &set, &bcs);
    assert!((wt - 0.0).abs() < 1.0);
    assert!((wb + 100.0e3).abs() < 1.0);

    let t_air = geotherm::temperature_at_z_m(10.0e3, &set, &bcs, DEFAULTS, wt, wb);
    assert!((t_air - 293.15).abs() < 1e-9);
    let t_mantle = geotherm::temperature_at_z_m(-120.0e3, &set, &bcs, DEFAULTS, wt, wb);
    assert!((t_mantle - 1603.15).abs() < 1e-9);
}

#[test]
fn conductive_ramp_hits_both_dirichlet_values() {
    let sc = scaling();
    let (set, bcs) = layered_set();
    let g = rift_grid(&sc);
    let (wb, wt) = geotherm::conductive_window_m(&g, &sc, &set, &bcs);

    // top of crust: parabola vanishes at the layer bound
    let t_top = geotherm::temperature_at_z_m(0.0, &set, &bcs, DEFAULTS, wt, wb);
    assert!((t_top - 293.15).abs() < 1e-6);
    // base of lithosphere
    let t_base = geotherm::temperature_at_z_m(-100.0e3, &set, &bcs, DEFAULTS, wt, wb);
    assert!((t_base - 1603.15).abs() < 1e-6);

    // deeper is hotter through the window
    let mut prev = t_top;
    for i in 1..=10 {
        let z = -(i as f64) * 10.0e3;
        let t = geotherm::temperature_at_z_m(z, &set, &bcs, DEFAULTS, wt, wb);
        assert!(t > prev, "geotherm not monotone at z={z}");
        prev = t;
    }
}

#[test]
fn radiogenic_layer_warms_above_the_linear_ramp() {
    let sc = scaling();
    let (set, bcs) = layered_set();
    let g = rift_grid(&sc);
    let (wb, wt) = geotherm::conductive_window_m(&g, &sc, &set, &bcs);

    // mid-crust at -20 km: H·(top−z)(z−bottom)/2k with k = κρcp = 2.8 W/(m·K)
    // gives +50 K over the 555.15 K linear value.
    let t = geotherm::temperature_at_z_m(-20.0e3, &set, &bcs, DEFAULTS, wt, wb);
    let linear = 293.15 + 0.2 * (1603.15 - 293.15);
    let bump = 0.7e-6 * 20.0e3 * 20.0e3 / (2.0 * 1.0e-6 * 2800.0 * 1000.0);
    assert!((t - (linear + bump)).abs() < 1e-6);
    assert!((bump - 50.0).abs() < 1e-9);
}

#[test]
fn field_build_matches_pointwise_evaluation() {
    let sc = scaling();
    let (set, bcs) = layered_set();
    let g = rift_grid(&sc);
    let field = geotherm::build(&g, &sc, &set, &bcs, DEFAULTS).unwrap();
    assert_eq!(field.len(), g.cells());

    let (wb, wt) = geotherm::conductive_window_m(&g, &sc, &set, &bcs);
    for (k, j, i) in [(0, 0, 0), (3, 1, 2), (7, 3, 7)] {
        let cell = g.cell_index(i, j, k);
        let z_m = sc.length_m_from_nd(g.cell_center(i, j, k)[2]);
        let expect = geotherm::temperature_at_z_m(z_m, &set, &bcs, DEFAULTS, wt, wb);
        assert!((sc.temperature_k_from_nd(field[cell]) - expect).abs() < 1e-9);
    }
}
