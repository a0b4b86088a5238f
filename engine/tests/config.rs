use engine::config::{self, BASE_RESOLUTION, RES_FACTOR_ENV};
use engine::model::{Model, ModelParams};
use engine::scaling::Scaling;
use engine::units::{cm_yr, deg_k, m, MetersPerSecond};

fn scaling() -> Scaling {
    Scaling::from_characteristic(
        m(500.0e3),
        MetersPerSecond::from(cm_yr(1.8)),
        3370.0 * 9.81,
        deg_k(273.15),
        deg_k(1603.15),
    )
}

#[test]
fn factor_scales_each_axis() {
    assert_eq!(config::resolution_with_factor(1), BASE_RESOLUTION);
    assert_eq!(config::resolution_with_factor(2), [256, 128, 128]);
    assert_eq!(config::resolution_with_factor(3), [384, 192, 192]);
}

// All environment manipulation lives in one test: integration test files run
// in their own process, but tests within a file share it.
#[test]
fn env_factor_with_catch_all_fallback() {
    std::env::remove_var(RES_FACTOR_ENV);
    assert_eq!(config::resolution_factor(), 1);
    assert_eq!(config::resolution(), BASE_RESOLUTION);

    std::env::set_var(RES_FACTOR_ENV, "2");
    assert_eq!(config::resolution_factor(), 2);
    assert_eq!(config::resolution(), [256, 128, 128]);

    // End-to-end: the factor reaches the model grid.
    let params = ModelParams {
        resolution: config::resolution(),
        min_coord: [m(0.0), m(0.0), m(-160.0e3)],
        max_coord: [m(500.0e3), m(500.0e3), m(20.0e3)],
        periodic: [false, true, false],
        gravity_m_s2: [0.0, 0.0, -9.81],
    };
    let model = Model::new(params, scaling()).unwrap();
    assert_eq!(model.grid.res, [256, 128, 128]);

    // Invalid values fall back to 1, undifferentiated.
    for bad in ["abc", "-3", "0", "1.5", ""] {
        std::env::set_var(RES_FACTOR_ENV, bad);
        assert_eq!(config::resolution_factor(), 1, "input {bad:?}");
    }

    std::env::remove_var(RES_FACTOR_ENV);
    assert_eq!(config::resolution(), BASE_RESOLUTION);
}

#[test]
fn solver_options_validate() {
    let ok = config::SolverOptions {
        solver: config::SolverKind::Multigrid,
        initial_nonlinear_tolerance: 2.0e-2,
        nonlinear_tolerance: 2.0e-2,
    };
    assert!(ok.validate().is_ok());

    let bad = config::SolverOptions { nonlinear_tolerance: 0.0, ..ok };
    assert!(bad.validate().is_err());
    let bad = config::SolverOptions { initial_nonlinear_tolerance: -1.0, ..ok };
    assert!(bad.validate().is_err());
}

#[test]
fn solver_options_serialize_roundtrip() {
    let opts = config::SolverOptions::default();
    let json = serde_json::to_string(&opts).unwrap();
    assert!(json.contains("\"mg\""));
    let parsed: config::SolverOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, opts);
}
