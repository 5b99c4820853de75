//! Integration tests for a complete frame
//!
//! A small deferred pipeline (geometry → lighting → tone mapping) is
//! declared through the public `frame` namespace and rendered into a
//! MockGraphicsDevice. No GPU required.
//!
//! Run with: cargo test --test frame_integration_tests

use std::sync::{Arc, Mutex};
use frame_engine::frame::{Error, Renderer, RendererConfig};
use frame_engine::frame::camera::Camera;
use frame_engine::frame::device::{ClearFlags, DeviceCommand, MockGraphicsDevice, UniformValue};
use frame_engine::frame::log::NullLogger;
use frame_engine::frame::render_graph::{PassAction, RenderGraph};
use frame_engine::frame::resource::{
    create_cube_static_mesh, EntityId, Material, Program, ProgramDesc, ResourceManager, Texture,
    TextureDesc, DEFAULT_CAMERA_NAME, DEFAULT_OUTPUT_TEXTURE_NAME, DEFAULT_ROOT_NAME,
};
use frame_engine::frame::scene::SceneNode;
use frame_engine::glam::{Mat4, Vec3};

// ============================================================================
// SCENE SETUP
// ============================================================================

struct Level {
    resources: ResourceManager,
    geometry: EntityId,
    lighting: EntityId,
    tone_map: EntityId,
    unused: EntityId,
    final_texture: EntityId,
}

fn named_texture(resources: &mut ResourceManager, desc: TextureDesc) -> EntityId {
    let name = desc.name.clone();
    let id = resources.add_texture(Texture::from_desc(desc).unwrap());
    resources.register_name(id, &name).unwrap();
    id
}

fn named_program(resources: &mut ResourceManager, desc: ProgramDesc) -> EntityId {
    let name = desc.name.clone();
    let id = resources.add_program(Program::from_desc(desc).unwrap());
    resources.register_name(id, &name).unwrap();
    id
}

/// Loads a level the way a scene loader would: resources first, then
/// programs (registered consumer first), then the scene tree
fn load_level() -> Level {
    let mut resources = ResourceManager::new();

    let albedo = named_texture(&mut resources, TextureDesc::new_2d("albedo", 320, 200));
    let normal = named_texture(&mut resources, TextureDesc::new_2d("normal", 320, 200));
    let lit = named_texture(&mut resources, TextureDesc::new_2d("lit", 320, 200));
    let final_texture = named_texture(&mut resources, TextureDesc::new_2d(DEFAULT_OUTPUT_TEXTURE_NAME, 320, 200));
    let debug = named_texture(&mut resources, TextureDesc::new_2d("debug", 16, 16));

    let mut tone_material = Material::new("tone_map_material");
    tone_material.add_texture_id(lit, "lit_tex");
    tone_material.set_param("exposure", UniformValue::Float(1.2));
    let tone_material = resources.add_material(tone_material);

    let mut light_material = Material::new("lighting_material");
    light_material.add_texture_id(albedo, "albedo_tex");
    light_material.add_texture_id(normal, "normal_tex");
    let light_material = resources.add_material(light_material);

    let tone_map = named_program(&mut resources, ProgramDesc {
        name: "tone_map".to_string(),
        inputs: vec![lit],
        outputs: vec![final_texture],
        material_id: Some(tone_material),
        ..Default::default()
    });
    let lighting = named_program(&mut resources, ProgramDesc {
        name: "lighting".to_string(),
        inputs: vec![normal, albedo],
        outputs: vec![lit],
        material_id: Some(light_material),
        ..Default::default()
    });
    let unused = named_program(&mut resources, ProgramDesc {
        name: "debug_view".to_string(),
        outputs: vec![debug],
        pass: PassAction::scene(),
        ..Default::default()
    });
    let geometry = named_program(&mut resources, ProgramDesc {
        name: "geometry".to_string(),
        outputs: vec![albedo, normal],
        pass: PassAction::scene(),
        ..Default::default()
    });

    let mut surface = Material::new("surface");
    surface.set_program_id(Some(geometry));
    let surface = resources.add_material(surface);

    let camera = resources.add_camera(Camera::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z, Vec3::Y));
    resources.register_name(camera, DEFAULT_CAMERA_NAME).unwrap();

    let cube = create_cube_static_mesh(&mut resources).unwrap();
    resources.static_mesh_mut(cube).unwrap().set_material_id(Some(surface));

    let root = resources.add_scene_node(
        SceneNode::transform("root").with_clear_flags(ClearFlags::COLOR | ClearFlags::DEPTH),
    ).unwrap();
    resources.register_name(root, DEFAULT_ROOT_NAME).unwrap();
    let pivot = resources.add_scene_node(
        SceneNode::transform("pivot")
            .with_parent(root)
            .with_local_matrix(Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0))),
    ).unwrap();
    resources.add_scene_node(SceneNode::mesh("cube_a", cube).with_parent(pivot)).unwrap();
    resources.add_scene_node(
        SceneNode::mesh("cube_b", cube)
            .with_parent(pivot)
            .with_local_matrix(Mat4::from_translation(Vec3::X)),
    ).unwrap();

    Level { resources, geometry, lighting, tone_map, unused, final_texture }
}

fn start(level: Level) -> (Renderer, Arc<Mutex<MockGraphicsDevice>>) {
    let device = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    let mut renderer = Renderer::new(
        level.resources,
        device.clone(),
        Arc::new(NullLogger),
        RendererConfig::default().with_size(320, 200),
    ).unwrap();
    renderer.startup().unwrap();
    (renderer, device)
}

// ============================================================================
// RENDER ORDER TESTS
// ============================================================================

#[test]
fn test_integration_render_order_follows_dependencies() {
    let level = load_level();
    let graph = RenderGraph::build(&level.resources, level.final_texture, &NullLogger).unwrap();

    assert_eq!(graph.passes(), &[level.geometry, level.lighting, level.tone_map]);
    assert!(!graph.contains(level.unused));
}

#[test]
fn test_integration_renderer_uses_default_output() {
    let level = load_level();
    let expected = vec![level.geometry, level.lighting, level.tone_map];
    let (renderer, _device) = start(level);
    assert_eq!(renderer.render_graph().unwrap().passes(), expected.as_slice());
}

#[test]
fn test_integration_ambiguous_output_rejected_at_startup() {
    let mut level = load_level();
    let lit = level.resources.id_from_name("lit").unwrap();
    level.resources.add_program(Program::from_desc(ProgramDesc {
        name: "second_lighting".to_string(),
        outputs: vec![lit],
        ..Default::default()
    }).unwrap());

    let device = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    let mut renderer = Renderer::new(
        level.resources, device, Arc::new(NullLogger), RendererConfig::default(),
    ).unwrap();
    assert!(matches!(renderer.startup(), Err(Error::AmbiguousProducer(_))));
}

// ============================================================================
// FRAME TESTS
// ============================================================================

#[test]
fn test_integration_frame_draw_counts() {
    let level = load_level();
    let (mut renderer, device) = start(level);
    renderer.render_frame(1.0 / 60.0).unwrap();

    let device = device.lock().unwrap();
    // 2 cubes in the geometry pass + lighting quad + tone mapping quad
    assert_eq!(device.draw_count(), 4);
    assert_eq!(
        device.commands().iter().filter(|c| **c == DeviceCommand::BindFrameTarget).count(),
        3
    );
    assert!(device.commands().contains(&DeviceCommand::SetDrawBuffers(2)));
    assert_eq!(device.last_uniform("exposure"), Some(UniformValue::Float(1.2)));
}

#[test]
fn test_integration_geometry_pass_world_matrices() {
    let level = load_level();
    let (mut renderer, device) = start(level);
    renderer.render_frame(1.0 / 60.0).unwrap();

    let device = device.lock().unwrap();
    let models: Vec<Mat4> = device.commands().iter().filter_map(|c| match c {
        DeviceCommand::SetUniform { name, value: UniformValue::Mat4(m) } if name == "model" => Some(*m),
        _ => None,
    }).collect();

    let pivot = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0));
    assert_eq!(models[0], pivot);
    assert_eq!(models[1], pivot * Mat4::from_translation(Vec3::X));
    // Full-screen passes draw with an identity model
    assert_eq!(models[2], Mat4::IDENTITY);
}

#[test]
fn test_integration_every_draw_releases_its_slots() {
    let level = load_level();
    let (mut renderer, device) = start(level);
    for _ in 0..3 {
        renderer.render_frame(1.0 / 60.0).unwrap();
    }

    let device = device.lock().unwrap();
    let binds = device.commands().iter().filter(|c| matches!(c, DeviceCommand::BindTexture { .. })).count();
    let unbinds = device.commands().iter().filter(|c| matches!(c, DeviceCommand::UnbindTexture { .. })).count();
    // lighting binds 2 textures, tone mapping 1, per frame
    assert_eq!(binds, 9);
    assert_eq!(binds, unbinds);
    for (_, material) in renderer.resources().materials() {
        assert_eq!(material.bound_count(), 0);
    }
}

#[test]
fn test_integration_failed_frame_leaves_slots_released() {
    let level = load_level();
    let (mut renderer, device) = start(level);
    device.lock().unwrap().set_fail_draws(true);

    assert!(matches!(renderer.render_frame(1.0 / 60.0), Err(Error::BackendError(_))));
    for (_, material) in renderer.resources().materials() {
        assert_eq!(material.bound_count(), 0);
    }

    device.lock().unwrap().set_fail_draws(false);
    renderer.render_frame(1.0 / 60.0).unwrap();
}

#[test]
fn test_integration_scene_edit_between_frames() {
    let level = load_level();
    let (mut renderer, device) = start(level);
    renderer.render_frame(1.0 / 60.0).unwrap();

    let root = renderer.resources().default_root_id().unwrap();
    let cube = renderer.resources().default_cube_id().unwrap();
    assert!(renderer.resources().static_mesh(cube).unwrap().material_id().is_none());

    // Attach the built-in cube with an explicit surface material
    let surface = renderer.resources()
        .materials()
        .find(|(_, m)| m.name() == "surface")
        .map(|(id, _)| id)
        .unwrap();
    renderer.resources_mut()
        .add_scene_node(SceneNode::mesh("extra", cube).with_parent(root).with_material(surface))
        .unwrap();

    device.lock().unwrap().clear_commands();
    renderer.render_frame(1.0 / 60.0).unwrap();
    assert_eq!(device.lock().unwrap().draw_count(), 5);
}
