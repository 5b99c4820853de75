use super::*;
use glam::Vec3;

// ============================================================================
// Tests: StaticMesh
// ============================================================================

#[test]
fn test_static_mesh_builder() {
    let mut resources = ResourceManager::new();
    let vb = resources.add_buffer(
        Buffer::from_slice("vb", BufferKind::Vertex, &QUAD_VERTICES).unwrap());
    let ib = resources.add_buffer(
        Buffer::from_slice("ib", BufferKind::Index, &QUAD_INDICES).unwrap());
    let material = resources.add_material(crate::resource::Material::new("m"));

    let mesh = StaticMesh::new("sky", vec![vb], ib, 6)
        .with_material(material)
        .with_clear_depth_after_draw(true);

    assert_eq!(mesh.name(), "sky");
    assert_eq!(mesh.vertex_buffer_ids(), &[vb]);
    assert_eq!(mesh.index_buffer_id(), ib);
    assert_eq!(mesh.index_count(), 6);
    assert_eq!(mesh.material_id(), Some(material));
    assert!(mesh.clear_depth_after_draw());
    assert!(mesh.references_buffer(vb));
    assert!(mesh.references_buffer(ib));
    assert!(!mesh.references_buffer(material));
}

// ============================================================================
// Tests: Built-in primitives
// ============================================================================

#[test]
fn test_create_quad() {
    let mut resources = ResourceManager::new();
    let quad_id = create_quad_static_mesh(&mut resources).unwrap();
    let quad = resources.static_mesh(quad_id).unwrap();

    assert_eq!(quad.index_count(), 6);
    let vertices = resources.buffer(quad.vertex_buffer_ids()[0]).unwrap();
    assert_eq!(vertices.element_count(), 4);
    assert_eq!(vertices.stride(), std::mem::size_of::<Vertex>());
    let indices = resources.buffer(quad.index_buffer_id()).unwrap();
    assert_eq!(indices.kind(), BufferKind::Index);
}

#[test]
fn test_create_cube() {
    let mut resources = ResourceManager::new();
    let cube_id = create_cube_static_mesh(&mut resources).unwrap();
    let cube = resources.static_mesh(cube_id).unwrap();

    assert_eq!(cube.index_count(), 36);
    let buffer = resources.buffer(cube.vertex_buffer_ids()[0]).unwrap();
    let vertices: Vec<Vertex> = buffer.data()
        .chunks_exact(std::mem::size_of::<Vertex>())
        .map(bytemuck::pod_read_unaligned::<Vertex>)
        .collect();
    assert_eq!(vertices.len(), 24);
    for vertex in &vertices {
        let p = Vec3::from(vertex.position);
        // Every corner of the unit cube is at distance sqrt(3)
        assert!((p.length() - 3f32.sqrt()).abs() < 1e-5);
        // Vertices lie on the face their normal points to
        assert!((p.dot(Vec3::from(vertex.normal)) - 1.0).abs() < 1e-5);
    }
}
