//! Ready-made scenes.
//!
//! All scenes share the same conventions: +Y is up, the camera starts in
//! front of the content at negative Z and looks toward +Z.

use crate::camera::Camera;
use crate::hittable::{CullMode, Hittable};
use crate::material::{Color, Material};
use crate::mesh::TriangleMesh;
use crate::plane::Plane;
use crate::scene::Scene;
use crate::sphere::Sphere;
use glint_core::{Mesh, MeshResult};
use glint_math::Vec3;

const WALL_COLOR: Color = Color::new(0.49, 0.57, 0.57);

fn log_scene(name: &str, scene: &Scene) {
    log::info!(
        "Scene '{}': {} primitives, {} lights",
        name,
        scene.primitive_count(),
        scene.lights().len()
    );
}

/// Floor, back wall, ceiling and side walls of the reference room.
fn add_room(scene: &mut Scene, material: usize) {
    scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, material));
    scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y, material));
    scene.add_plane(Plane::new(Vec3::new(0.0, 10.0, 0.0), -Vec3::Y, material));
    scene.add_plane(Plane::new(Vec3::new(5.0, 0.0, 0.0), -Vec3::X, material));
    scene.add_plane(Plane::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, material));
}

/// Warm key light, warm fill from the front left, cool rim from the front right.
fn add_three_point_lights(scene: &mut Scene) {
    scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45));
    scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45));
    scene.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68));
}

fn reference_camera() -> Camera {
    let mut camera = Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0);
    camera.look_at(Vec3::new(0.0, 3.0, 0.0));
    camera
}

/// One white Lambert unit sphere at the origin lit straight from above.
pub fn unit_sphere() -> Scene {
    let mut camera = Camera::new(Vec3::new(0.0, 1.0, -3.0), 90.0);
    camera.look_at(Vec3::ZERO);

    let mut scene = Scene::new(camera);
    let white = scene.add_material(Material::lambert(Color::ONE, 1.0));
    scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, white));
    scene.add_directional_light(-Vec3::Y, 1.0, Color::ONE);

    log_scene("unit-sphere", &scene);
    scene
}

/// A row of diffuse and glossy spheres on a floor in front of a wall.
pub fn spheres() -> Scene {
    let mut scene = Scene::new(reference_camera());

    let wall = scene.add_material(Material::lambert(WALL_COLOR, 1.0));
    let red = scene.add_material(Material::lambert_phong(Color::new(1.0, 0.0, 0.0), 1.0, 1.0, 60.0));
    let blue = scene.add_material(Material::lambert_phong(Color::new(0.0, 0.0, 1.0), 1.0, 1.0, 40.0));
    let yellow = scene.add_material(Material::lambert(Color::new(1.0, 1.0, 0.0), 1.0));
    let green = scene.add_material(Material::solid_color(Color::new(0.0, 1.0, 0.0)));

    scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, wall));
    scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y, wall));

    scene.add_sphere(Sphere::new(Vec3::new(-1.75, 1.0, 0.0), 0.75, red));
    scene.add_sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.75, blue));
    scene.add_sphere(Sphere::new(Vec3::new(1.75, 1.0, 0.0), 0.75, yellow));
    scene.add_sphere(Sphere::new(Vec3::new(0.0, 3.0, 2.0), 0.5, green));

    scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 70.0, Color::new(1.0, 0.61, 0.45));
    scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45));

    log_scene("spheres", &scene);
    scene
}

/// Cook-Torrance material study in a closed room, plus three single-triangle
/// meshes showing back, front and no culling.
pub fn reference() -> MeshResult<Scene> {
    let mut scene = Scene::new(reference_camera());

    let silver = Color::new(0.972, 0.960, 0.915);
    let plastic = Color::splat(0.75);

    let wall = scene.add_material(Material::lambert(WALL_COLOR, 1.0));
    let white = scene.add_material(Material::lambert(Color::ONE, 1.0));

    // Bottom row metal, top row plastic, roughness decreasing left to right
    for (row, (albedo, metalness)) in [(silver, 1.0), (plastic, 0.0)].into_iter().enumerate() {
        for (column, roughness) in [1.0, 0.6, 0.1].into_iter().enumerate() {
            let material = scene.add_material(Material::cook_torrance(albedo, metalness, roughness));
            let center = Vec3::new(-1.75 + 1.75 * column as f32, 1.0 + 2.0 * row as f32, 0.0);
            scene.add_sphere(Sphere::new(center, 0.75, material));
        }
    }

    add_room(&mut scene, wall);

    let culling = [
        (CullMode::BackFaceCulling, Vec3::new(-1.75, 4.5, 0.0)),
        (CullMode::FrontFaceCulling, Vec3::new(0.0, 4.5, 0.0)),
        (CullMode::NoCulling, Vec3::new(1.75, 4.5, 0.0)),
    ];
    for (cull_mode, translation) in culling {
        let mut mesh = TriangleMesh::new(demo_triangle()?, cull_mode, white);
        mesh.set_translation(translation);
        mesh.update_transforms();
        scene.add_mesh(mesh);
    }

    add_three_point_lights(&mut scene);

    log_scene("reference", &scene);
    Ok(scene)
}

/// A mesh standing on the floor of the reference room.
///
/// The mesh is scaled to fit a 3 unit tall box and placed so its base rests
/// on the floor in the middle of the room.
pub fn mesh(model: Mesh) -> Scene {
    let mut scene = Scene::new(reference_camera());

    let wall = scene.add_material(Material::lambert(WALL_COLOR, 1.0));
    let body = scene.add_material(Material::cook_torrance(Color::new(0.95, 0.64, 0.54), 1.0, 0.4));

    add_room(&mut scene, wall);

    let bounds = model.bounds();
    let extent = (bounds.max - bounds.min).max_element();
    let scale = if extent > 0.0 { 3.0 / extent } else { 1.0 };

    let mut mesh = TriangleMesh::new(model, CullMode::BackFaceCulling, body);
    mesh.set_scale(Vec3::splat(scale));
    mesh.set_rotation_y(30f32.to_radians());
    mesh.update_transforms();

    // Center on the transformed bounds and rest the base on the floor
    let placed = mesh.bounding_box();
    let lift = Vec3::new(-placed.centroid().x, -placed.min.y + 0.0001, -placed.centroid().z);
    mesh.set_translation(lift);
    mesh.update_transforms();

    log::debug!("Placed mesh at {:?} with scale {}", lift, scale);
    scene.add_mesh(mesh);

    add_three_point_lights(&mut scene);

    log_scene("mesh", &scene);
    scene
}

/// Single triangle used by the culling demo, facing the camera.
fn demo_triangle() -> MeshResult<Mesh> {
    Mesh::new(
        vec![
            Vec3::new(-0.75, 1.5, 0.0),
            Vec3::new(0.75, 0.0, 0.0),
            Vec3::new(-0.75, 0.0, 0.0),
        ],
        vec![0, 1, 2],
    )
}

/// Unit-radius icosahedron centered at the origin, outward-facing winding.
pub fn icosahedron() -> MeshResult<Mesh> {
    let t = (1.0 + 5f32.sqrt()) / 2.0;

    let positions = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    #[rustfmt::skip]
    let indices = vec![
        0, 11, 5,   0, 5, 1,    0, 1, 7,    0, 7, 10,   0, 10, 11,
        1, 5, 9,    5, 11, 4,   11, 10, 2,  10, 7, 6,   7, 1, 8,
        3, 9, 4,    3, 4, 2,    3, 2, 6,    3, 6, 8,    3, 8, 9,
        4, 9, 5,    2, 4, 11,   6, 2, 10,   8, 6, 7,    9, 8, 1,
    ];

    Mesh::new(positions, indices)
}
