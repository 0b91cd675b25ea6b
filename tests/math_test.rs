use cgmath::{Deg, InnerSpace, Matrix4, Vector3, Vector4};
use route_mirror::math::{reflect, remove_translation, to_vector3};

mod common;
use common::test_utils::{assert_vec3_close, assert_vec4_close};

#[test]
fn remove_translation_zeroes_translation_only() {
    let transform =
        Matrix4::from_translation(Vector3::new(3.0, -2.0, 7.5)) * Matrix4::from_angle_y(Deg(30.0));
    let stripped = remove_translation(transform);

    // Rotation/scale columns are untouched.
    assert_eq!(stripped.x, transform.x);
    assert_eq!(stripped.y, transform.y);
    assert_eq!(stripped.z, transform.z);

    // Translation is gone, homogeneous component preserved.
    assert_eq!(stripped.w, Vector4::new(0.0, 0.0, 0.0, transform.w.w));
}

#[test]
fn remove_translation_is_idempotent() {
    let transform =
        Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)) * Matrix4::from_angle_x(Deg(-45.0));
    let once = remove_translation(transform);
    let twice = remove_translation(once);

    assert_eq!(once, twice);
}

#[test]
fn to_vector3_drops_homogeneous_component() {
    let vector = Vector4::new(1.5, -2.0, 9.0, 4.0);
    assert_eq!(to_vector3(vector), Vector3::new(1.5, -2.0, 9.0));
}

#[test]
fn reflect_is_an_involution() {
    let vector = Vector3::new(3.0, -1.0, 2.5);
    let normal = Vector3::new(1.0, 2.0, -0.5).normalize();

    assert_vec3_close(reflect(reflect(vector, normal), normal), vector);
}

#[test]
fn reflect_flips_only_the_normal_component() {
    let normal = Vector3::new(0.0, 0.0, 1.0);
    let vector = Vector3::new(2.0, 3.0, 5.0);

    assert_vec3_close(reflect(vector, normal), Vector3::new(2.0, 3.0, -5.0));
}

#[test]
fn mirroring_a_point_across_a_plane_twice_returns_it() {
    // The mirrored camera position is built as
    // `plane_point + reflect(plane_point - point, normal)`.
    let mirror = |point: Vector3<f32>, plane_point: Vector3<f32>, normal: Vector3<f32>| {
        plane_point + reflect(plane_point - point, normal)
    };

    let plane_point = Vector3::new(4.0, 1.0, -2.0);
    let normal = Vector3::new(0.5, -1.0, 2.0).normalize();
    let point = Vector3::new(-3.0, 7.0, 0.25);

    let mirrored = mirror(point, plane_point, normal);
    assert_vec3_close(mirror(mirrored, plane_point, normal), point);
}

#[test]
fn camera_on_the_mirror_axis_mirrors_onto_itself() {
    // Head-on mirror: the virtual camera looks from the mirror straight
    // back at the real camera position.
    let plane_point = Vector3::new(0.0, 0.0, 10.0);
    let normal = Vector3::new(0.0, 0.0, 1.0);
    let point = Vector3::new(0.0, 0.0, 0.0);

    let mirrored = plane_point + reflect(plane_point - point, normal);
    assert_vec4_close(
        mirrored.extend(1.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    );
}
