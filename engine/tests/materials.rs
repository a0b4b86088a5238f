use engine::materials::{DensityLaw, Layer, Material, MaterialId, MaterialSet};
use engine::units::{km, m};

fn stack() -> MaterialSet {
    let mut set = MaterialSet::new();
    set.add(Material {
        shape: Some(Layer::new(km(20.0).into(), km(0.0).into())),
        ..Material::named("Air")
    });
    set.add(Material {
        shape: Some(Layer::new(km(0.0).into(), km(-40.0).into())),
        ..Material::named("Crust")
    });
    set.add(Material {
        shape: Some(Layer::new(km(-40.0).into(), km(-160.0).into())),
        ..Material::named("Mantle")
    });
    set.add(Material::named("Sediment")); // shapeless
    set
}

#[test]
fn layer_bounds_are_inclusive() {
    let layer = Layer::new(m(0.0), m(-40.0e3));
    assert!(layer.contains(0.0));
    assert!(layer.contains(-40.0e3));
    assert!(layer.contains(-20.0e3));
    assert!(!layer.contains(1.0));
    assert!(!layer.contains(-40.0e3 - 1.0));
}

#[test]
fn assignment_is_first_match_in_insertion_order() {
    let set = stack();
    assert_eq!(set.len(), 4);
    // shared bound goes to the earlier material
    assert_eq!(set.assign_z_m(0.0), Some(MaterialId(0)));
    assert_eq!(set.assign_z_m(-40.0e3), Some(MaterialId(1)));
    assert_eq!(set.assign_z_m(10.0e3), Some(MaterialId(0)));
    assert_eq!(set.assign_z_m(-80.0e3), Some(MaterialId(2)));
    // outside every layer
    assert_eq!(set.assign_z_m(25.0e3), None);
}

#[test]
fn shapeless_materials_never_capture_particles() {
    let set = stack();
    let ids = set.assign_all(&[10.0e3, -10.0e3, -120.0e3]).unwrap();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(!ids.contains(&3));
}

#[test]
fn uncovered_particles_are_an_error() {
    let set = stack();
    let err = set.assign_all(&[10.0e3, 30.0e3, 40.0e3]).unwrap_err();
    assert!(err.to_string().contains("2 particle(s)"), "got: {err}");
}

#[test]
fn linear_density_expands_with_temperature() {
    let law = DensityLaw::linear(3370.0);
    let cold = law.density_kg_m3(273.15);
    let hot = law.density_kg_m3(1603.15);
    assert!((cold - 3370.0).abs() < 1e-9);
    assert!(hot < cold);
    // ρ = ρ0(1 − α ΔT) with α = 3e-5
    assert!((hot - 3370.0 * (1.0 - 3.0e-5 * 1330.0)).abs() < 1e-9);
    assert_eq!(law.reference_kg_m3(), 3370.0);

    let constant = DensityLaw::Constant(2300.0);
    assert_eq!(constant.density_kg_m3(500.0), 2300.0);
}
