use super::{Cell, Cellmap, Mesh, Point, PointId};

/// Holds sample meshes used by tests and documentation
pub struct Samples {}

impl Samples {
    /// Generates a voxel mesh from a cellmap
    ///
    /// Points are created only where touched by a nonzero cell and are numbered
    /// in scan order with x being the fastest changing coordinate. Cells are
    /// numbered in the same scan order; their material id is the cellmap value.
    ///
    /// # Input
    ///
    /// * `cellmap` -- labelled image indexed by (k, j, i)
    /// * `offset` -- coordinates of the first grid point
    /// * `spacing` -- voxel size along x, y, z
    pub fn voxels(cellmap: &Cellmap, offset: [f64; 3], spacing: [f64; 3]) -> Mesh {
        let [nk, nj, ni] = cellmap.shape();
        let (pk, pj, pi) = (nk + 1, nj + 1, ni + 1);
        let grid = |k: usize, j: usize, i: usize| (k * pj + j) * pi + i;

        // flag grid points touched by cells
        let mut pointmap: Vec<Option<PointId>> = vec![None; pk * pj * pi];
        let mut touched = vec![false; pk * pj * pi];
        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    if cellmap.get(k, j, i) != 0 {
                        for m in 0..8 {
                            touched[grid(k + m / 4, j + (m / 2) % 2, i + m % 2)] = true;
                        }
                    }
                }
            }
        }

        // number points in scan order
        let mut points = Vec::new();
        for k in 0..pk {
            for j in 0..pj {
                for i in 0..pi {
                    if touched[grid(k, j, i)] {
                        let id = points.len();
                        pointmap[grid(k, j, i)] = Some(id);
                        points.push(Point {
                            id,
                            coords: [
                                offset[0] + (i as f64) * spacing[0],
                                offset[1] + (j as f64) * spacing[1],
                                offset[2] + (k as f64) * spacing[2],
                            ],
                        });
                    }
                }
            }
        }

        // cells with the voxel corner convention
        let mut cells = Vec::new();
        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    let material_id = cellmap.get(k, j, i);
                    if material_id == 0 {
                        continue;
                    }
                    let mut corners = [0; 8];
                    for m in 0..8 {
                        // touched above, thus always numbered
                        corners[m] = pointmap[grid(k + m / 4, j + (m / 2) % 2, i + m % 2)].unwrap_or_default();
                    }
                    cells.push(Cell {
                        id: cells.len(),
                        material_id,
                        points: corners,
                    });
                }
            }
        }
        Mesh { points, cells }
    }

    /// Returns two unit voxels stacked along z
    #[rustfmt::skip]
    pub fn two_voxels() -> Mesh {
        //          10--------11
        //         / |       / |
        //        /  |      /  |
        //       8---------9   |
        //       |   |     |   |
        //       |   6-----|---7
        //       | / | [1] | / |
        //       |/  |     |/  |
        //       4---------5   |
        //       |   |     |   |
        //       |   2-----|---3
        //       |  /  [0] |  /      [#] indicates id
        //       |/        | /       all cells have material 1
        //       0---------1         z  y
        //                           | /
        //                           .-- x
        Mesh {
            points: vec![
                Point { id:  0, coords: [0.0, 0.0, 0.0] },
                Point { id:  1, coords: [1.0, 0.0, 0.0] },
                Point { id:  2, coords: [0.0, 1.0, 0.0] },
                Point { id:  3, coords: [1.0, 1.0, 0.0] },
                Point { id:  4, coords: [0.0, 0.0, 1.0] },
                Point { id:  5, coords: [1.0, 0.0, 1.0] },
                Point { id:  6, coords: [0.0, 1.0, 1.0] },
                Point { id:  7, coords: [1.0, 1.0, 1.0] },
                Point { id:  8, coords: [0.0, 0.0, 2.0] },
                Point { id:  9, coords: [1.0, 0.0, 2.0] },
                Point { id: 10, coords: [0.0, 1.0, 2.0] },
                Point { id: 11, coords: [1.0, 1.0, 2.0] },
            ],
            cells: vec![
                Cell { id: 0, material_id: 1, points: [0, 1, 2, 3, 4, 5, 6, 7] },
                Cell { id: 1, material_id: 1, points: [4, 5, 6, 7, 8, 9, 10, 11] },
            ],
        }
    }

    /// Returns two voxels stacked along z, offset from the origin and scaled
    ///
    /// Spacing is (0.8, 1.5, 0.5); origin is (-1.0, 0.5, 2.0);
    /// bounds are (-1.0, -0.2, 0.5, 2.0, 2.0, 3.0).
    pub fn two_voxels_offset() -> Mesh {
        let cellmap = Cellmap::new(2, 1, 1, 1);
        Samples::voxels(&cellmap, [-1.0, 0.5, 2.0], [0.8, 1.5, 0.5])
    }

    /// Returns a step shape with two materials
    ///
    /// ```text
    ///                22------23
    ///              /        / |
    ///            /  200   /   |
    ///          20------21     |
    ///        /        / |    16-------17
    ///      /        /   |   /        / |
    ///    18------19     | /  200   /   |
    ///    |        |    13-------14     |
    ///    |  100   |   /        / |     8
    ///    |        | /        /   |   /
    ///    9-------10-------11     | /
    ///    |        |        |     5
    ///    |  100   |  100   |   /               z  y
    ///    |        |        | /                 | /
    ///    0--------1--------2                   .-- x
    /// ```
    pub fn step_two_materials() -> Mesh {
        let mut cellmap = Cellmap::new(2, 2, 2, 100);
        cellmap.set_box(0..2, 1..2, 0..2, 200).set_box(1..2, 0..2, 1..2, 0);
        Samples::voxels(&cellmap, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    /// Returns a two-step shape (the top surface descends along x)
    ///
    /// ```text
    ///          24------25
    ///        /        / |
    ///      /        /   |
    ///    22------23     |
    ///    |        |    20-------21
    ///    |        |   /        / |
    ///    |        | /        /   |
    ///    16------17-------18     |
    ///    |        |        |    14-------15
    ///    |        |        |   /        / |
    ///    |        |        | /        /   |
    ///    8--------9-------10-------11     |
    ///    |        |        |        |     7
    ///    |        |        |        |   /               z  y
    ///    |        |        |        | /                 | /
    ///    0--------1--------2--------3                   .-- x
    /// ```
    pub fn two_step() -> Mesh {
        let mut cellmap = Cellmap::new(3, 1, 3, 100);
        cellmap.set(1, 0, 2, 0).set(2, 0, 1, 0).set(2, 0, 2, 0);
        Samples::voxels(&cellmap, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    /// Returns the two-step shape upside down (the bottom surface ascends along x)
    ///
    /// ```text
    ///          22------23-------24-------25
    ///        /        /        /        / |
    ///      /        /        /        /   |
    ///    18------19-------20-------21     |
    ///    |        |        |        |    17
    ///    |        |        |        |   /
    ///    |        |        |        | /
    ///    10------11-------12----+--13
    ///    |        |        |    9
    ///    |        |        |   /
    ///    |        |        | /
    ///    4--------5-----+--6
    ///    |        |     3
    ///    |        |   /               z  y
    ///    |        | /                 | /
    ///    0--------1                   .-- x
    /// ```
    pub fn upside_down_two_step() -> Mesh {
        let mut cellmap = Cellmap::new(3, 1, 3, 100);
        cellmap.set(1, 0, 2, 0).set(0, 0, 1, 0).set(0, 0, 2, 0);
        Samples::voxels(&cellmap, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    /// Returns the two-step shape lying on its side (the steps are along y)
    pub fn sideways_two_step() -> Mesh {
        let mut cellmap = Cellmap::new(1, 3, 3, 100);
        cellmap.set(0, 1, 2, 0).set(0, 2, 1, 0).set(0, 2, 2, 0);
        Samples::voxels(&cellmap, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    /// Returns a 5×5×3 block with 3×3 holes in the bottom and top layers
    ///
    /// Bottom layer point numbering (z = 0):
    ///
    /// ```text
    ///  26  27  28  29  30  31
    ///  20  21  22  23  24  25      y
    ///  16  17          18  19      ^
    ///  12  13          14  15      |
    ///   6   7   8   9  10  11      |
    ///   0   1   2   3   4   5      .---> x
    /// ```
    ///
    /// The z = 1 and z = 2 layers are complete (ids 32 to 67 and 68 to 103);
    /// the top layer (z = 3) mirrors the bottom one (ids 104 to 135).
    pub fn quasi_donut() -> Mesh {
        let mut cellmap = Cellmap::new(3, 5, 5, 1);
        cellmap.set_box(0..1, 1..4, 1..4, 0).set_box(2..3, 1..4, 1..4, 0);
        Samples::voxels(&cellmap, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    /// Returns the quasi-donut with material 1 for x < 2 and material 2 for x > 2
    pub fn quasi_donut_two_materials() -> Mesh {
        Samples::voxels(&Samples::quasi_donut_two_materials_cellmap(), [0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    /// Returns the quasi-donut with two materials, offset from the origin and scaled
    ///
    /// Spacing is (0.5, 1.0, 2.0); origin is (0.5, 1.0, -0.5);
    /// bounds are (0.5, 3.0, 1.0, 6.0, -0.5, 5.5).
    pub fn quasi_donut_two_materials_offset() -> Mesh {
        Samples::voxels(&Samples::quasi_donut_two_materials_cellmap(), [0.5, 1.0, -0.5], [0.5, 1.0, 2.0])
    }

    fn quasi_donut_two_materials_cellmap() -> Cellmap {
        let mut cellmap = Cellmap::new(3, 5, 5, 1);
        cellmap
            .set_box(0..3, 0..5, 2..5, 2)
            .set_box(0..1, 1..4, 1..4, 0)
            .set_box(2..3, 1..4, 1..4, 0);
        cellmap
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
