use approx::assert_abs_diff_eq;
use bonebc::base::Samples;
use bonebc::{prelude::*, StrError};

#[test]
fn test_torsion_along_x() -> Result<(), StrError> {
    // test axis x: sense 0 is y, sense 1 is z, and sense 2 is x
    //
    //  z
    //  2  9-----11       quarter turn about (y, z) = (0.5, 1.0)
    //  |  |      |
    //  1  5------7
    //  |  |      |
    //  0  1------3
    //     0 ---- 1  y
    let mesh = Samples::two_voxels();
    let materials = MaterialTable::homogeneous(&mesh);
    let mut setup = TestSetup::new();
    setup.set_test_axis(0);
    let mut test = Torsion::new();
    test.set_twist_angle(std::f64::consts::FRAC_PI_2).set_twist_axis_origin(0.5, 1.0);
    let model = apply_test(&mesh, &materials, &setup, &test)?;
    println!("{}", model);

    assert_eq!(model.node_set(FACE_Z0)?, &[0, 2, 4, 6, 8, 10]);
    assert_eq!(model.node_set(FACE_Z1)?, &[1, 3, 5, 7, 9, 11]);

    let bottom = model.constraints.get("bottom_fixed").ok_or("missing")?;
    assert_eq!(bottom.len(), 18);
    let top_fixed = model.constraints.get("top_fixed").ok_or("missing")?;
    assert_eq!(top_fixed.indices(), &[1, 3, 5, 7, 9, 11]);
    assert_eq!(top_fixed.senses(), &[0; 6]);

    let top = model.constraints.get("top_displacement").ok_or("missing")?;
    assert_eq!(top.indices(), &[1, 1, 3, 3, 5, 5, 7, 7, 9, 9, 11, 11]);
    assert_eq!(top.senses(), &[1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2]);
    let expected = [1.5, 0.5, 0.5, 1.5, 0.5, -0.5, -0.5, 0.5, -0.5, -1.5, -1.5, -0.5];
    for i in 0..12 {
        assert_abs_diff_eq!(top.values()[i], expected[i], epsilon = 1e-14);
    }

    // rotation center in the data frame
    let center = model.rotation_center.ok_or("missing rotation center")?;
    assert_abs_diff_eq!(center[0], 0.5);
    assert_abs_diff_eq!(center[1], 0.5);
    assert_abs_diff_eq!(center[2], 1.0);

    let set = model.convergence_set.as_ref().ok_or("missing convergence set")?;
    assert_eq!(set.len(), 12);
    Ok(())
}

#[test]
fn test_torsion_keeps_the_distance_to_the_axis() -> Result<(), StrError> {
    let mesh = Samples::quasi_donut();
    let materials = MaterialTable::homogeneous(&mesh);
    let mut test = Torsion::new();
    test.set_twist_angle(0.3).set_twist_axis_origin(2.5, 2.5);
    let model = apply_test(&mesh, &materials, &TestSetup::new(), &test)?;
    let top = model.constraints.get("top_displacement").ok_or("missing")?;
    assert_eq!(top.len(), 2 * 32);
    for i in (0..top.len()).step_by(2) {
        let p = top.indices()[i];
        let x = mesh.points[p].coords;
        let (dx, dy) = (x[0] - 2.5, x[1] - 2.5);
        let (ux, uy) = (top.values()[i], top.values()[i + 1]);
        let r_before = f64::sqrt(dx * dx + dy * dy);
        let r_after = f64::sqrt((dx + ux) * (dx + ux) + (dy + uy) * (dy + uy));
        assert_abs_diff_eq!(r_before, r_after, epsilon = 1e-14);
    }
    Ok(())
}
