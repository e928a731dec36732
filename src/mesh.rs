use glam::{Vec2, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, tangent: Vec4, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tangent: tangent.to_array(),
            uv: uv.to_array(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub bounds: MeshBounds,
}

#[derive(Clone, Debug)]
pub struct MeshBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub center: Vec3,
    pub radius: f32,
}

impl Mesh {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        let bounds = MeshBounds::from_vertices(&vertices);
        Self { vertices, indices, bounds }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer contents as uploaded by the render pipeline.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn cube(size: f32) -> Self {
        let hs = size * 0.5;
        let positions = [
            Vec3::new(-hs, -hs, -hs),
            Vec3::new(hs, -hs, -hs),
            Vec3::new(hs, hs, -hs),
            Vec3::new(-hs, hs, -hs),
            Vec3::new(-hs, -hs, hs),
            Vec3::new(hs, -hs, hs),
            Vec3::new(hs, hs, hs),
            Vec3::new(-hs, hs, hs),
        ];
        let normals = [Vec3::NEG_Z, Vec3::Z, Vec3::NEG_X, Vec3::X, Vec3::Y, Vec3::NEG_Y];

        let uv_quad = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
        let mut vertices = Vec::with_capacity(24);
        let mut write_face = |indices: [usize; 4], normal: Vec3| {
            for (i, &index) in indices.iter().enumerate() {
                vertices.push(MeshVertex::new(positions[index], normal, Vec4::new(1.0, 0.0, 0.0, 1.0), uv_quad[i]));
            }
        };

        write_face([0, 3, 2, 1], normals[0]); // back
        write_face([4, 5, 6, 7], normals[1]); // front
        write_face([0, 4, 7, 3], normals[2]); // left
        write_face([1, 2, 6, 5], normals[3]); // right
        write_face([3, 7, 6, 2], normals[4]); // top
        write_face([0, 1, 5, 4], normals[5]); // bottom

        let mut indices = Vec::with_capacity(36);
        for face in 0..6 {
            let base = face * 4;
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(vertices, indices)
    }

    /// Cone with its apex at +Y and its base disc at -Y, unit height.
    ///
    /// Light indicators flip it about X so the apex leads along the light direction.
    pub fn cone(radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let apex = Vec3::new(0.0, 0.5, 0.0);
        let base_y = -0.5;
        let mut vertices = Vec::with_capacity(segments as usize * 4 + 2);
        let mut indices = Vec::with_capacity(segments as usize * 6);

        for i in 0..segments {
            let a0 = TAU * i as f32 / segments as f32;
            let a1 = TAU * (i + 1) as f32 / segments as f32;
            let p0 = Vec3::new(radius * a0.cos(), base_y, radius * a0.sin());
            let p1 = Vec3::new(radius * a1.cos(), base_y, radius * a1.sin());
            let mid = 0.5 * (a0 + a1);
            let normal = Vec3::new(mid.cos(), radius, mid.sin()).normalize();
            let tangent = Vec4::new(-mid.sin(), 0.0, mid.cos(), 1.0);
            let base = vertices.len() as u32;
            let u0 = i as f32 / segments as f32;
            let u1 = (i + 1) as f32 / segments as f32;
            vertices.push(MeshVertex::new(p0, normal, tangent, Vec2::new(u0, 1.0)));
            vertices.push(MeshVertex::new(p1, normal, tangent, Vec2::new(u1, 1.0)));
            vertices.push(MeshVertex::new(apex, normal, tangent, Vec2::new(0.5 * (u0 + u1), 0.0)));
            indices.extend_from_slice(&[base, base + 2, base + 1]);
        }

        let centre = vertices.len() as u32;
        let cap_tangent = Vec4::new(1.0, 0.0, 0.0, 1.0);
        vertices.push(MeshVertex::new(Vec3::new(0.0, base_y, 0.0), Vec3::NEG_Y, cap_tangent, Vec2::splat(0.5)));
        let ring = vertices.len() as u32;
        for i in 0..segments {
            let a = TAU * i as f32 / segments as f32;
            let p = Vec3::new(radius * a.cos(), base_y, radius * a.sin());
            let uv = Vec2::new(0.5 + 0.5 * a.cos(), 0.5 + 0.5 * a.sin());
            vertices.push(MeshVertex::new(p, Vec3::NEG_Y, cap_tangent, uv));
        }
        for i in 0..segments {
            let next = (i + 1) % segments;
            indices.extend_from_slice(&[centre, ring + i, ring + next]);
        }

        Self::new(vertices, indices)
    }

    pub fn uv_sphere(radius: f32, rings: u32, sectors: u32) -> Self {
        let rings = rings.max(2);
        let sectors = sectors.max(3);
        let mut vertices = Vec::with_capacity(((rings + 1) * (sectors + 1)) as usize);
        for r in 0..=rings {
            let v = r as f32 / rings as f32;
            let phi = v * PI;
            for s in 0..=sectors {
                let u = s as f32 / sectors as f32;
                let theta = u * TAU;
                let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                let tangent = Vec4::new(-theta.sin(), 0.0, theta.cos(), 1.0);
                vertices.push(MeshVertex::new(normal * radius, normal, tangent, Vec2::new(u, v)));
            }
        }

        let stride = sectors + 1;
        let mut indices = Vec::with_capacity((rings * sectors * 6) as usize);
        for r in 0..rings {
            for s in 0..sectors {
                let i0 = r * stride + s;
                let i1 = i0 + stride;
                indices.extend_from_slice(&[i0, i0 + 1, i1, i1, i0 + 1, i1 + 1]);
            }
        }

        Self::new(vertices, indices)
    }
}

impl MeshBounds {
    pub fn from_vertices(vertices: &[MeshVertex]) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for vertex in vertices {
            let pos = Vec3::from_array(vertex.position);
            min = min.min(pos);
            max = max.max(pos);
        }
        if vertices.is_empty() {
            return MeshBounds { min: Vec3::ZERO, max: Vec3::ZERO, center: Vec3::ZERO, radius: 0.0 };
        }
        let center = (min + max) * 0.5;
        let mut radius: f32 = 0.0;
        for vertex in vertices {
            let pos = Vec3::from_array(vertex.position);
            radius = radius.max((pos - center).length());
        }
        MeshBounds { min, max, center, radius }
    }
}
