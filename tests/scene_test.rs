use cgmath::{Matrix4, SquareMatrix};
use desk_scene::{
    data_structures::mesh::MeshKind,
    render::{DrawCall, MeshLibrary},
    shader,
};
use image::{GrayImage, ImageFormat, Luma, Rgba, RgbaImage};

use crate::common::test_utils::{TEXTURES, asset_dir, rendered_scene, scene_in};
mod common;

const EPS: f32 = 1e-5;

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < EPS, "{a} != {b}");
}

fn draw_range(draws: &[DrawCall], range: std::ops::Range<usize>) -> &[DrawCall] {
    &draws[range]
}

#[test]
fn prepare_registers_textures_in_load_order() {
    let dir = asset_dir();
    let mut scene = scene_in(dir.path());
    scene.prepare_scene();

    let tags: Vec<_> = scene.textures().iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, ["brick", "desk", "wood", "plastic"]);
    for (slot, entry) in scene.textures().iter().enumerate() {
        assert_eq!(scene.textures().find_slot(&entry.tag), Some(slot));
        assert_eq!(scene.renderer().units[&slot], entry.handle);
    }
    let recorded = &scene.renderer().textures;
    assert_eq!(recorded.len(), TEXTURES.len());
    assert!(recorded.values().all(|t| t.channels == 3 && t.width == 8));
}

#[test]
fn prepare_defines_materials_lights_and_meshes() {
    let dir = asset_dir();
    let mut scene = scene_in(dir.path());
    scene.prepare_scene();

    assert_eq!(scene.materials().len(), 8);
    assert_close(scene.materials().find("wood").unwrap().ambient_strength, 0.05);
    assert_close(scene.materials().find("plastic").unwrap().ambient_strength, 0.3);

    let renderer = scene.renderer();
    assert_eq!(renderer.uniforms.flag(shader::USE_LIGHTING), Some(true));
    let lights = renderer.lights();
    assert_eq!(lights.lights[0].position, [3.0, 6.0, 0.0]);
    assert_eq!(lights.lights[1].position, [0.0, 1.0, 3.0]);
    assert_close(lights.lights[1].focal_strength, 20.1);
    assert_eq!(renderer.loaded_meshes.len(), 5);
}

#[test]
fn scene_draws_every_object_in_order() {
    use MeshKind::*;
    let dir = asset_dir();
    let scene = rendered_scene(dir.path());

    let kinds: Vec<_> = scene.renderer().draws.iter().map(|d| d.mesh).collect();
    #[rustfmt::skip]
    let expected = [
        // desk, back wall
        Plane, Plane,
        // desk stand
        Box, Box, Box,
        // mug
        Cylinder, Cylinder, Cylinder, TaperedCylinder,
        // books
        Box, Plane, Plane, Box, Plane, Plane, Plane,
        // lamp
        Cylinder, Box, Box, Cone,
        // pen holder
        Box, Box, Box, Box, Cylinder, Cylinder, Cylinder, Cylinder,
    ];
    assert_eq!(kinds, expected);
}

#[test]
fn desk_and_wall_use_their_own_texture_and_uv_scale() {
    let dir = asset_dir();
    let scene = rendered_scene(dir.path());
    let draws = &scene.renderer().draws;
    let slot = |tag| scene.textures().find_slot(tag).unwrap() as i32;

    let desk = draws[0].object;
    assert!(desk.uses_texture());
    assert_eq!(desk.texture_unit, slot("desk"));
    assert_eq!(desk.uv_scale, [2.0, 2.0]);
    assert_eq!(desk.model_matrix(), Matrix4::from_nonuniform_scale(30.0, 1.0, 10.0));
    assert_close(desk.material.ambient_strength, 0.2 * 0.25);

    let wall = draws[1].object;
    assert_eq!(wall.texture_unit, slot("brick"));
    assert_eq!(wall.uv_scale, [7.0, 3.0]);
    assert_eq!(wall.use_lighting, 1);
}

#[test]
fn mug_parts_inherit_texture_material_and_uv_scale() {
    let dir = asset_dir();
    let scene = rendered_scene(dir.path());
    let plastic = scene.textures().find_slot("plastic").unwrap() as i32;

    for draw in draw_range(&scene.renderer().draws, 5..9) {
        assert_eq!(draw.object.texture_unit, plastic);
        assert_eq!(draw.object.material.shininess, 32.0);
        // the desk stand left (1, 1) behind
        assert_eq!(draw.object.uv_scale, [1.0, 1.0]);
    }
}

#[test]
fn books_keep_the_mug_texture_with_their_own_materials() {
    let dir = asset_dir();
    let scene = rendered_scene(dir.path());
    let plastic = scene.textures().find_slot("plastic").unwrap() as i32;
    let books = draw_range(&scene.renderer().draws, 9..16);

    assert!(books.iter().all(|d| d.object.texture_unit == plastic));
    let diffuse: Vec<_> = books.iter().map(|d| d.object.material.diffuse_color).collect();
    assert_eq!(diffuse[0], [0.84, 0.84, 0.84]);
    assert_eq!(diffuse[1], [0.89, 0.73, 0.02]);
    assert_eq!(diffuse[4], [0.0, 0.3, 0.3]);
}

#[test]
fn pencils_carry_the_pen_holder_uv_scale() {
    let dir = asset_dir();
    let scene = rendered_scene(dir.path());
    let draws = &scene.renderer().draws;
    let plastic = scene.textures().find_slot("plastic").unwrap() as i32;

    let pencils = draw_range(draws, 24..28);
    assert!(pencils.iter().all(|d| d.object.uv_scale == [0.25, 0.25]));
    assert!(pencils.iter().all(|d| d.object.texture_unit == plastic));
    // erasers are rubber
    assert_eq!(pencils[2].object.material.specular_color, [0.94, 0.30, 0.93]);
}

#[test]
fn rendering_twice_repeats_the_same_draws() {
    let dir = asset_dir();
    let mut scene = rendered_scene(dir.path());
    let first = scene.renderer().draws.clone();

    scene.renderer_mut().clear_draws();
    scene.render_scene();

    assert_eq!(scene.renderer().draws, first);
}

#[test]
fn grayscale_texture_is_skipped_and_objects_fall_back_to_colour() {
    let dir = asset_dir();
    GrayImage::from_pixel(4, 4, Luma([128]))
        .save(dir.path().join("desk.jpg"))
        .unwrap();

    let scene = rendered_scene(dir.path());

    assert_eq!(scene.textures().len(), 3);
    assert_eq!(scene.textures().find_slot("desk"), None);
    assert_eq!(scene.textures().find_slot("plastic"), Some(2));
    let draws = &scene.renderer().draws;
    // desk and desk stand
    for index in [0, 2, 3, 4] {
        assert!(!draws[index].object.uses_texture(), "draw {index} is textured");
        assert_eq!(draws[index].object.texture_unit, -1);
    }
    assert!(draws[1].object.uses_texture());
}

#[test]
fn rgba_texture_file_is_loaded_like_the_others() {
    let dir = asset_dir();
    // jpeg cannot hold alpha, the decoder goes by content
    RgbaImage::from_pixel(4, 4, Rgba([20, 20, 24, 255]))
        .save_with_format(dir.path().join("plastic.jpg"), ImageFormat::Png)
        .unwrap();

    let scene = rendered_scene(dir.path());

    assert_eq!(scene.textures().len(), 4);
    let handle = scene.textures().find_handle("plastic").unwrap();
    assert_eq!(scene.renderer().textures[&handle].channels, 4);
    assert!(draws_use(&scene.renderer().draws[5..9], 3));
}

fn draws_use(draws: &[DrawCall], unit: i32) -> bool {
    draws
        .iter()
        .all(|d| d.object.uses_texture() && d.object.texture_unit == unit)
}

#[test]
fn textures_are_read_from_the_configured_asset_root() {
    let dir = asset_dir();
    let mut scene = scene_in(dir.path());
    assert_eq!(scene.config().asset_root, dir.path());

    std::fs::remove_file(scene.config().asset("wood.jpg")).unwrap();
    scene.prepare_scene();

    let tags: Vec<_> = scene.textures().iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, ["brick", "desk", "plastic"]);
}

#[test]
fn missing_texture_file_only_affects_its_own_objects() {
    let dir = asset_dir();
    std::fs::remove_file(dir.path().join("plastic.jpg")).unwrap();

    let scene = rendered_scene(dir.path());

    assert_eq!(scene.textures().len(), 3);
    let draws = &scene.renderer().draws;
    assert!(draws[5..9].iter().all(|d| !d.object.uses_texture()));
    assert!(draws[20].object.uses_texture());
}

#[test]
fn missing_material_keeps_previous_material_uniforms() {
    let dir = asset_dir();
    let mut scene = scene_in(dir.path());
    scene.prepare_scene();
    scene.set_material("wood");
    let before = scene.renderer().uniforms.writes();

    scene.set_material("granite");

    let uniforms = &scene.renderer().uniforms;
    assert_eq!(uniforms.writes(), before);
    assert_eq!(uniforms.float(shader::MATERIAL_SHININESS), Some(0.3));
}

#[test]
fn release_textures_destroys_every_handle() {
    let dir = asset_dir();
    let mut scene = rendered_scene(dir.path());
    let handles: Vec<_> = scene.textures().iter().map(|e| e.handle).collect();

    scene.release_textures();

    assert!(scene.textures().is_empty());
    assert_eq!(scene.renderer().destroyed, handles);
    assert!(scene.renderer().textures.is_empty());
    assert!(scene.renderer().units.is_empty());
}

#[test]
fn untouched_scene_has_identity_defaults() {
    let dir = asset_dir();
    let mut scene = scene_in(dir.path());
    scene.prepare_scene();
    scene.renderer_mut().draw_mesh(MeshKind::Box);

    let draw = scene.renderer().draws[0];
    assert_eq!(draw.object.model_matrix(), Matrix4::identity());
    assert_eq!(draw.object.uv_scale, [1.0, 1.0]);
}
