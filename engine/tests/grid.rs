use engine::grid::Grid;

fn unit_box() -> Grid {
    Grid::new([4, 2, 2], [0.0, 0.0, -1.0], [1.0, 1.0, 0.0], [false, true, false]).unwrap()
}

#[test]
fn construction_validates_resolution_and_extent() {
    assert!(Grid::new([0, 2, 2], [0.0; 3], [1.0; 3], [false; 3]).is_err());
    assert!(Grid::new([2, 2, 2], [0.0, 0.0, 0.0], [1.0, 0.0, 1.0], [false; 3]).is_err());
    assert!(Grid::new([2, 2, 2], [0.0; 3], [1.0; 3], [false; 3]).is_ok());
}

#[test]
fn counts_and_spacing() {
    let g = unit_box();
    assert_eq!(g.cells(), 16);
    assert_eq!(g.columns(), 8);
    assert!((g.spacing(0) - 0.25).abs() < 1e-15);
    assert!((g.spacing(2) - 0.5).abs() < 1e-15);
    assert!((g.extent(2) - 1.0).abs() < 1e-15);
}

#[test]
fn cell_centers_and_locate_are_inverse() {
    let g = unit_box();
    for k in 0..g.res[2] {
        for j in 0..g.res[1] {
            for i in 0..g.res[0] {
                let c = g.cell_center(i, j, k);
                assert_eq!(g.locate(c), [i, j, k]);
            }
        }
    }
    // outside points clamp to boundary cells
    assert_eq!(g.locate([-5.0, 0.5, -0.5]), [0, 0, 0]);
    assert_eq!(g.locate([5.0, 0.5, -0.5]), [3, 0, 0]);
}

#[test]
fn confine_wraps_periodic_axes_and_clamps_the_rest() {
    let g = unit_box();
    // y is periodic
    let p = g.confine([0.5, 1.2, -0.5]);
    assert!((p[1] - 0.2).abs() < 1e-12);
    let p = g.confine([0.5, -0.3, -0.5]);
    assert!((p[1] - 0.7).abs() < 1e-12);
    // x and z clamp
    let p = g.confine([1.7, 0.5, -1.8]);
    assert!((p[0] - 1.0).abs() < 1e-15);
    assert!((p[2] + 1.0).abs() < 1e-15);
}

#[test]
fn x_normalization_spans_unit_interval() {
    let g = unit_box();
    assert!((g.x_normalized(0.0) - 0.0).abs() < 1e-15);
    assert!((g.x_normalized(1.0) - 1.0).abs() < 1e-15);
    assert!((g.x_normalized(0.25) - 0.25).abs() < 1e-15);
}
