use glam::Vec3;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32], label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }
}

/// Blocky stand-in for the character model: body, head and four legs, feet
/// at y = 0 and snout toward +X (the controller's facing offset maps +X to
/// the move direction).
pub fn player_mesh() -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let coat = [0.82, 0.60, 0.35];
    let head = [0.88, 0.68, 0.42];
    let paws = [0.55, 0.38, 0.20];

    push_box(
        &mut vertices,
        &mut indices,
        Vec3::new(-0.45, 0.25, -0.25),
        Vec3::new(0.35, 0.75, 0.25),
        coat,
    );
    push_box(
        &mut vertices,
        &mut indices,
        Vec3::new(0.30, 0.60, -0.18),
        Vec3::new(0.65, 1.00, 0.18),
        head,
    );
    for (x0, x1) in [(-0.40, -0.22), (0.10, 0.28)] {
        for (z0, z1) in [(-0.22, -0.06), (0.06, 0.22)] {
            push_box(
                &mut vertices,
                &mut indices,
                Vec3::new(x0, 0.0, z0),
                Vec3::new(x1, 0.25, z1),
                paws,
            );
        }
    }
    (vertices, indices)
}

/// Axis-aligned box with per-face normals, wound counter-clockwise seen from
/// outside.
fn push_box(vertices: &mut Vec<Vertex>, indices: &mut Vec<u32>, min: Vec3, max: Vec3, color: [f32; 3]) {
    // (normal, tangent, bitangent) per face, with tangent x bitangent = normal.
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let center = (min + max) * 0.5;
    let half = (max - min) * 0.5;

    for (normal, tangent, bitangent) in FACES {
        let base = vertices.len() as u32;
        for (st, sb) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = center + normal * half + tangent * half * st + bitangent * half * sb;
            vertices.push(Vertex {
                position: position.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}
