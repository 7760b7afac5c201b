//! Procedural mesh generators: subdivided box, slice/stack sphere,
//! icosahedron geosphere, flat grid, and screen-style quad.  All triangles
//! are generated front facing for a left-handed, +Z-forward world.

use glam::Vec3;

use super::mesh::MeshData;
use super::vertex::Vertex;

/// Subdivision beyond this explodes vertex counts for no visual gain.
const MAX_SUBDIVISIONS: u32 = 6;

/// Box centered at the origin with the given dimensions and per-face colors.
pub fn box_mesh(width: f32, height: f32, depth: f32, subdivisions: u32) -> MeshData {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    const FACE_COLORS: [[f32; 4]; 6] = [
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 1.0],
        [0.0, 1.0, 1.0, 1.0],
    ];

    // Four corners per face, wound front-facing for the left-handed view.
    let faces: [[Vec3; 4]; 6] = [
        // front (z+)
        [
            Vec3::new(-hw, -hh, hd),
            Vec3::new(-hw, hh, hd),
            Vec3::new(hw, hh, hd),
            Vec3::new(hw, -hh, hd),
        ],
        // back (z-)
        [
            Vec3::new(hw, -hh, -hd),
            Vec3::new(hw, hh, -hd),
            Vec3::new(-hw, hh, -hd),
            Vec3::new(-hw, -hh, -hd),
        ],
        // left (x-)
        [
            Vec3::new(-hw, -hh, -hd),
            Vec3::new(-hw, hh, -hd),
            Vec3::new(-hw, hh, hd),
            Vec3::new(-hw, -hh, hd),
        ],
        // right (x+)
        [
            Vec3::new(hw, -hh, hd),
            Vec3::new(hw, hh, hd),
            Vec3::new(hw, hh, -hd),
            Vec3::new(hw, -hh, -hd),
        ],
        // top (y+)
        [
            Vec3::new(-hw, hh, hd),
            Vec3::new(-hw, hh, -hd),
            Vec3::new(hw, hh, -hd),
            Vec3::new(hw, hh, hd),
        ],
        // bottom (y-)
        [
            Vec3::new(-hw, -hh, -hd),
            Vec3::new(-hw, -hh, hd),
            Vec3::new(hw, -hh, hd),
            Vec3::new(hw, -hh, -hd),
        ],
    ];

    let mut mesh = MeshData::default();
    for (face, color) in faces.iter().zip(FACE_COLORS) {
        let base = mesh.vertices.len() as u32;
        for corner in face {
            mesh.vertices.push(Vertex::new(corner.to_array(), color));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    for _ in 0..subdivisions.min(MAX_SUBDIVISIONS) {
        subdivide(&mut mesh);
    }
    mesh
}

/// Sphere centered at the origin; `slices`/`stacks` control tessellation.
pub fn sphere(radius: f32, slices: u32, stacks: u32) -> MeshData {
    let slices = slices.max(3);
    let stacks = stacks.max(2);

    let mut mesh = MeshData::default();
    mesh.vertices.push(pole_vertex(radius, 1.0));

    // Interior rings, poles excluded.
    for i in 1..stacks {
        let phi = i as f32 * std::f32::consts::PI / stacks as f32;
        for j in 0..=slices {
            let theta = j as f32 * std::f32::consts::TAU / slices as f32;
            let p = Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            );
            mesh.vertices.push(surface_vertex(p, radius));
        }
    }
    mesh.vertices.push(pole_vertex(radius, -1.0));

    // Top fan.
    for j in 1..=slices {
        mesh.indices.extend_from_slice(&[0, j, j + 1]);
    }

    // Ring quads.
    let ring = slices + 1;
    let base = 1u32;
    for i in 0..stacks - 2 {
        for j in 0..slices {
            let a = base + i * ring + j;
            let b = base + (i + 1) * ring + j;
            mesh.indices.extend_from_slice(&[a, b, a + 1]);
            mesh.indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    // Bottom fan.
    let south = mesh.vertices.len() as u32 - 1;
    let last_ring = south - ring;
    for j in 0..slices {
        mesh.indices
            .extend_from_slice(&[south, last_ring + j + 1, last_ring + j]);
    }

    mesh
}

/// Flat grids and quads carry no shading of their own; the item color does
/// the tinting.
const FLAT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Flat grid on the xz-plane centered at the origin: `m` rows by `n`
/// columns of vertices, facing up.
pub fn grid(width: f32, depth: f32, m: u32, n: u32) -> MeshData {
    let m = m.max(2);
    let n = n.max(2);
    let (hw, hd) = (width * 0.5, depth * 0.5);
    let dx = width / (n - 1) as f32;
    let dz = depth / (m - 1) as f32;

    let mut mesh = MeshData::default();
    for i in 0..m {
        let z = hd - i as f32 * dz;
        for j in 0..n {
            let x = -hw + j as f32 * dx;
            mesh.vertices.push(Vertex::new([x, 0.0, z], FLAT_COLOR));
        }
    }
    for i in 0..m - 1 {
        for j in 0..n - 1 {
            let a = i * n + j;
            let b = a + 1;
            let c = (i + 1) * n + j;
            let d = c + 1;
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    mesh
}

/// Axis-aligned quad in the xy-plane at `depth`; `(x, y)` is the top-left
/// corner.  Faces the default camera (outward normal -Z).
pub fn quad(x: f32, y: f32, w: f32, h: f32, depth: f32) -> MeshData {
    MeshData {
        vertices: vec![
            Vertex::new([x + w, y - h, depth], FLAT_COLOR),
            Vertex::new([x + w, y, depth], FLAT_COLOR),
            Vertex::new([x, y, depth], FLAT_COLOR),
            Vertex::new([x, y - h, depth], FLAT_COLOR),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Geosphere: a subdivided icosahedron with every vertex pushed out to the
/// radius, giving triangles of near-uniform area.
pub fn geosphere(radius: f32, subdivisions: u32) -> MeshData {
    const X: f32 = 0.525_731;
    const Z: f32 = 0.850_651;

    let positions = [
        Vec3::new(-X, 0.0, Z),
        Vec3::new(X, 0.0, Z),
        Vec3::new(-X, 0.0, -Z),
        Vec3::new(X, 0.0, -Z),
        Vec3::new(0.0, Z, X),
        Vec3::new(0.0, Z, -X),
        Vec3::new(0.0, -Z, X),
        Vec3::new(0.0, -Z, -X),
        Vec3::new(Z, X, 0.0),
        Vec3::new(-Z, X, 0.0),
        Vec3::new(Z, -X, 0.0),
        Vec3::new(-Z, -X, 0.0),
    ];

    let indices: [u32; 60] = [
        1, 0, 4, 4, 0, 9, 4, 9, 5, 8, 4, 5, 1, 4, 8, //
        1, 8, 10, 10, 8, 3, 8, 5, 3, 3, 5, 2, 3, 2, 7, //
        3, 7, 10, 10, 7, 6, 6, 7, 11, 6, 11, 0, 6, 0, 1, //
        10, 6, 1, 11, 9, 0, 2, 9, 11, 5, 9, 2, 11, 7, 2,
    ];

    let mut mesh = MeshData {
        vertices: positions
            .iter()
            .map(|&p| surface_vertex(p, 1.0))
            .collect(),
        indices: indices.to_vec(),
    };

    for _ in 0..subdivisions.min(MAX_SUBDIVISIONS) {
        subdivide(&mut mesh);
    }

    // Project onto the sphere.
    for v in &mut mesh.vertices {
        let n = Vec3::from_array(v.position).normalize();
        *v = surface_vertex(n * radius, radius);
    }
    mesh
}

/// Splits every triangle into four by its edge midpoints.
///
/// ```text
///       v1
///       *
///      / \
///  m0 *---* m1
///    / \ / \
///   *---*---*
///  v0   m2   v2
/// ```
fn subdivide(mesh: &mut MeshData) {
    let input = std::mem::take(mesh);

    mesh.vertices.reserve(input.triangle_count() * 6);
    mesh.indices.reserve(input.indices.len() * 4);

    for tri in input.indices.chunks_exact(3) {
        let v0 = input.vertices[tri[0] as usize];
        let v1 = input.vertices[tri[1] as usize];
        let v2 = input.vertices[tri[2] as usize];

        let m0 = midpoint(&v0, &v1);
        let m1 = midpoint(&v1, &v2);
        let m2 = midpoint(&v0, &v2);

        let base = mesh.vertices.len() as u32;
        mesh.vertices
            .extend_from_slice(&[v0, v1, v2, m0, m1, m2]);
        mesh.indices.extend_from_slice(&[
            base,
            base + 3,
            base + 5,
            base + 3,
            base + 4,
            base + 5,
            base + 5,
            base + 4,
            base + 2,
            base + 3,
            base + 1,
            base + 4,
        ]);
    }
}

fn midpoint(a: &Vertex, b: &Vertex) -> Vertex {
    let position = (Vec3::from_array(a.position) + Vec3::from_array(b.position)) * 0.5;
    let mut color = [0.0f32; 4];
    for (c, (ca, cb)) in color.iter_mut().zip(a.color.iter().zip(b.color.iter())) {
        *c = (ca + cb) * 0.5;
    }
    Vertex::new(position.to_array(), color)
}

fn pole_vertex(radius: f32, sign: f32) -> Vertex {
    surface_vertex(Vec3::new(0.0, sign * radius, 0.0), radius)
}

/// Colors a sphere-surface point by its unit normal.
fn surface_vertex(p: Vec3, radius: f32) -> Vertex {
    let n = if radius > 0.0 { p / radius } else { Vec3::Y };
    Vertex::new(
        p.to_array(),
        [n.x * 0.5 + 0.5, n.y * 0.5 + 0.5, n.z * 0.5 + 0.5, 1.0],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_valid(mesh: &MeshData) {
        assert_eq!(mesh.indices.len() % 3, 0);
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());
    }

    fn triangle_cross(mesh: &MeshData, tri: &[u32]) -> Vec3 {
        let p0 = Vec3::from_array(mesh.vertices[tri[0] as usize].position);
        let p1 = Vec3::from_array(mesh.vertices[tri[1] as usize].position);
        let p2 = Vec3::from_array(mesh.vertices[tri[2] as usize].position);
        (p1 - p0).cross(p2 - p1)
    }

    // For an origin-centered convex mesh every triangle must face away from
    // the center with the pipeline's left-handed winding, i.e. the
    // right-handed edge cross product points inward.
    fn assert_faces_outward(mesh: &MeshData) {
        for tri in mesh.indices.chunks_exact(3) {
            let p0 = Vec3::from_array(mesh.vertices[tri[0] as usize].position);
            let p1 = Vec3::from_array(mesh.vertices[tri[1] as usize].position);
            let p2 = Vec3::from_array(mesh.vertices[tri[2] as usize].position);
            let centroid = (p0 + p1 + p2) / 3.0;
            assert!(
                triangle_cross(mesh, tri).dot(centroid) < 0.0,
                "inverted triangle {tri:?} at {centroid}"
            );
        }
    }

    #[test]
    fn box_without_subdivision_has_24_vertices_36_indices() {
        let mesh = box_mesh(1.0, 1.0, 1.0, 0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_indices_valid(&mesh);
    }

    #[test]
    fn subdivision_quadruples_triangle_count() {
        let base = box_mesh(1.0, 1.0, 1.0, 0);
        let once = box_mesh(1.0, 1.0, 1.0, 1);
        let twice = box_mesh(1.0, 1.0, 1.0, 2);
        assert_eq!(once.triangle_count(), base.triangle_count() * 4);
        assert_eq!(twice.triangle_count(), base.triangle_count() * 16);
        assert_indices_valid(&twice);
    }

    #[test]
    fn box_respects_dimensions() {
        let mesh = box_mesh(2.0, 4.0, 6.0, 1);
        for v in &mesh.vertices {
            assert!(v.position[0].abs() <= 1.0 + 1e-6);
            assert!(v.position[1].abs() <= 2.0 + 1e-6);
            assert!(v.position[2].abs() <= 3.0 + 1e-6);
        }
    }

    #[test]
    fn geosphere_vertices_sit_on_the_sphere() {
        let radius = 2.0;
        let mesh = geosphere(radius, 3);
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - radius).abs() < 1e-4, "vertex at radius {r}");
        }
        assert_indices_valid(&mesh);
    }

    #[test]
    fn grid_has_expected_counts_and_faces_up() {
        let mesh = grid(10.0, 4.0, 3, 5);
        assert_eq!(mesh.vertices.len(), 15);
        assert_eq!(mesh.indices.len(), 6 * 2 * 4);
        assert_indices_valid(&mesh);
        for v in &mesh.vertices {
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[0].abs() <= 5.0 + 1e-6);
            assert!(v.position[2].abs() <= 2.0 + 1e-6);
        }
        // Up-facing under the left-handed winding: right-handed triangle
        // normals point down, as on the box's top face.
        for tri in mesh.indices.chunks_exact(3) {
            assert!(triangle_cross(&mesh, tri).y < 0.0);
        }
    }

    #[test]
    fn quad_faces_the_default_view() {
        let mesh = quad(-1.0, 1.0, 2.0, 2.0, 0.5);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        for v in &mesh.vertices {
            assert_eq!(v.position[2], 0.5);
            assert!(v.position[0].abs() <= 1.0 + 1e-6);
            assert!(v.position[1].abs() <= 1.0 + 1e-6);
        }
        // Outward normal -Z, so the right-handed cross points +Z, as on the
        // box's back face.
        for tri in mesh.indices.chunks_exact(3) {
            assert!(triangle_cross(&mesh, tri).z > 0.0);
        }
    }

    #[test]
    fn all_generators_agree_on_winding() {
        assert_faces_outward(&box_mesh(2.0, 2.0, 2.0, 1));
        assert_faces_outward(&sphere(1.0, 12, 6));
        assert_faces_outward(&geosphere(1.0, 2));
    }

    #[test]
    fn sphere_is_well_formed() {
        let mesh = sphere(1.5, 16, 8);
        assert_indices_valid(&mesh);
        // Poles plus (stacks-1) rings of (slices+1) vertices.
        assert_eq!(mesh.vertices.len(), 2 + 7 * 17);
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 1.5).abs() < 1e-4);
        }
    }
}
