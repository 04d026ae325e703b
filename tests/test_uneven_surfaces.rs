use approx::assert_abs_diff_eq;
use bonebc::base::Samples;
use bonebc::{prelude::*, StrError};

#[test]
fn test_uneven_top_surface() -> Result<(), StrError> {
    //          24------25
    //        /        / |
    //    22------23     |
    //    |        |    20-------21
    //    |        |   /        / |
    //    16------17-------18     |
    //    |        |        |    14-------15
    //    |        |        |   /        / |
    //    8--------9-------10-------11     |
    //    |        |        |        |     7
    //    0--------1--------2--------3
    let mesh = Samples::two_step();
    let materials = MaterialTable::homogeneous(&mesh);
    let mut setup = TestSetup::new();
    setup.set_uneven_top_surface(true);
    let model = apply_test(&mesh, &materials, &setup, &Compression::new())?;
    println!("{}", model);

    // the whole upper envelope is loaded
    assert_eq!(model.node_set(FACE_Z1)?, &[11, 15, 18, 21, 22, 23, 24, 25]);
    assert_eq!(model.element_set(FACE_Z1)?, &[2, 4, 5]);
    let top = model.constraints.get("top_displacement").ok_or("missing")?;
    assert_eq!(top.indices(), &[11, 15, 18, 21, 22, 23, 24, 25]);
    for v in top.values() {
        assert_abs_diff_eq!(*v, -0.03, epsilon = 1e-15);
    }

    // the bottom is still the plane z = 0
    assert_eq!(model.node_set(FACE_Z0)?, &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert!(model.log.contains("uneven_top_surface = true\nuse_top_surface_maximum_depth = false\n"));
    Ok(())
}

#[test]
fn test_uneven_top_surface_within_depth() -> Result<(), StrError> {
    let mesh = Samples::two_step();
    let materials = MaterialTable::homogeneous(&mesh);
    let mut setup = TestSetup::new();
    setup.set_uneven_top_surface(true).set_top_surface_maximum_depth(1.5)?;
    let model = apply_test(&mesh, &materials, &setup, &Compression::new())?;
    assert_eq!(model.node_set(FACE_Z1)?, &[18, 21, 22, 23, 24, 25]);
    assert!(model.log.contains("top_surface_maximum_depth = 1.5\n"));

    // negative depths are rejected
    assert_eq!(
        setup.set_top_surface_maximum_depth(-1.0).err(),
        Some("top surface maximum depth must be ≥ 0.0")
    );
    Ok(())
}

#[test]
fn test_uneven_bottom_surface_within_depth() -> Result<(), StrError> {
    let mesh = Samples::upside_down_two_step();
    let materials = MaterialTable::homogeneous(&mesh);
    let mut setup = TestSetup::new();
    setup.set_uneven_bottom_surface(true).set_bottom_surface_maximum_depth(1.5)?;
    let model = apply_test(&mesh, &materials, &setup, &Compression::new())?;
    assert_eq!(model.node_set(FACE_Z0)?, &[0, 1, 2, 3, 6, 9]);
    let bottom = model.constraints.get("bottom_fixed").ok_or("missing")?;
    assert_eq!(bottom.indices(), &[0, 1, 2, 3, 6, 9]);
    assert_eq!(model.node_set(FACE_Z1)?, &[18, 19, 20, 21, 22, 23, 24, 25]);
    Ok(())
}

#[test]
fn test_uneven_top_surface_with_specific_material() -> Result<(), StrError> {
    // the middle layer of material 2 is seen through the hole of the top layer
    let mesh = Samples::quasi_donut_two_materials();
    let materials = MaterialTable::homogeneous(&mesh);
    let mut setup = TestSetup::new();
    setup
        .set_uneven_top_surface(true)
        .set_top_constraint_specific_material(Some(2));
    let model = apply_test(&mesh, &materials, &setup, &Compression::new())?;
    assert_eq!(
        model.node_set(FACE_Z1)?,
        &[
            82, 83, 88, 89, 106, 107, 108, 109, 112, 113, 114, 115, 118, 119, 122, 123, 126, 127, 128, 129, 132, 133,
            134, 135
        ]
    );
    Ok(())
}
