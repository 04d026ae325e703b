use approx::assert_abs_diff_eq;
use bonebc::base::{ConstraintKind, Samples};
use bonebc::{prelude::*, StrError};

#[test]
fn test_directional_shear_along_y() -> Result<(), StrError> {
    // test axis y: sense 0 is z, sense 1 is x, and sense 2 is y
    let mesh = Samples::two_voxels();
    let materials = MaterialTable::homogeneous(&mesh);
    let mut setup = TestSetup::new();
    setup.set_test_axis(1);
    let mut test = DirectionalShear::new();
    test.set_shear_vector(0.01, 0.02);
    let model = apply_test(&mesh, &materials, &setup, &test)?;
    println!("{}", model);

    let bottom = model.constraints.get("bottom_fixed").ok_or("missing")?;
    assert_eq!(bottom.len(), 18);
    let top_fixed = model.constraints.get("top_fixed").ok_or("missing")?;
    assert_eq!(top_fixed.indices(), &[2, 3, 6, 7, 10, 11]);
    assert_eq!(top_fixed.senses(), &[1; 6]);

    let top = model.constraints.get("top_displacement").ok_or("missing")?;
    assert_eq!(top.indices(), &[2, 3, 6, 7, 10, 11, 2, 3, 6, 7, 10, 11]);
    assert_eq!(top.senses(), &[2, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0]);
    for i in 0..6 {
        assert_abs_diff_eq!(top.values()[i], 0.01);
        assert_abs_diff_eq!(top.values()[6 + i], 0.02);
    }
    Ok(())
}

#[test]
fn test_symmetric_shear_offset_mesh() -> Result<(), StrError> {
    // x0 = -1.0, x1 = -0.2, y0 = 0.5, y1 = 2.0
    let mesh = Samples::two_voxels_offset();
    let materials = MaterialTable::homogeneous(&mesh);
    let mut test = SymmetricShear::new();
    test.set_shear_strain(0.02);
    let model = apply_test(&mesh, &materials, &TestSetup::new(), &test)?;
    println!("{}", model);
    assert_eq!(model.constraints.len(), 10);

    let f = 0.01;
    let check = |name: &str, expected: &dyn Fn(f64, f64) -> [f64; 2]| -> Result<(), StrError> {
        let c = model.constraints.get(name).ok_or("missing")?;
        assert_eq!(c.len(), 12);
        for i in (0..c.len()).step_by(2) {
            let p = c.indices()[i];
            assert_eq!(c.indices()[i + 1], p);
            assert_eq!((c.senses()[i], c.senses()[i + 1]), (0, 1));
            let x = mesh.points[p].coords;
            let u = expected(x[0], x[1]);
            assert_abs_diff_eq!(c.values()[i], u[0], epsilon = 1e-15);
            assert_abs_diff_eq!(c.values()[i + 1], u[1], epsilon = 1e-15);
        }
        Ok(())
    };
    check("face_x0_lateral", &|_, y| [f * (y - 0.5), 0.0])?;
    check("face_x1_lateral", &|_, y| [f * (y - 0.5), f * 0.8])?;
    check("face_y0_lateral", &|x, _| [0.0, f * (x + 1.0)])?;
    check("face_y1_lateral", &|x, _| [f * 1.5, f * (x + 1.0)])?;

    let face_y1 = model.constraints.get("face_y1_lateral").ok_or("missing")?;
    assert_abs_diff_eq!(face_y1.values()[0], 0.015, epsilon = 1e-15);

    for name in ["face_x0_vertical", "face_x1_vertical", "face_y0_vertical", "face_y1_vertical"] {
        let c = model.constraints.get(name).ok_or("missing")?;
        assert_eq!(c.len(), 6);
        assert!(c.senses().iter().all(|s| *s == 2));
    }

    let set = model.convergence_set.as_ref().ok_or("missing convergence set")?;
    assert_eq!(set.kind, ConstraintKind::Force);
    assert_eq!(set.indices(), &[0, 0, 1, 1, 4, 4, 5, 5, 8, 8, 9, 9]);
    assert_eq!(
        model.post_processing_element_sets,
        &["face_x0", "face_x1", "face_y0", "face_y1"]
    );
    Ok(())
}
