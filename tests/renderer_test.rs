use cgmath::{Matrix4, Vector3, Vector4};
use route_mirror::renderer::{BLOCK_LENGTH, Renderer};

mod common;
use common::test_utils::{StubScenario, assert_vec3_close, assert_vec4_close, instance, model};

#[test]
fn tick_derives_camera_state_from_the_host() {
    let mut scenario = StubScenario::new();
    scenario.block_index = 4;
    // Camera sits 10m ahead of the block origin along +z.
    scenario.camera_from_block = Matrix4::from_translation(Vector3::new(0.0, 0.0, -10.0));

    let mut renderer = Renderer::new();
    renderer.tick(&scenario).unwrap();

    assert_eq!(renderer.block_origin_location(), 4.0 * BLOCK_LENGTH);
    assert_vec3_close(renderer.camera_position(), Vector3::new(0.0, 0.0, 10.0));

    // camera_to_block is the inverse of the host transform.
    let round_trip = renderer.block_to_camera() * renderer.camera_to_block();
    assert_vec4_close(round_trip * Vector4::unit_w(), Vector4::unit_w());
}

#[test]
fn track_transform_queries_at_the_current_block_origin() {
    let mut scenario = StubScenario::new();
    scenario.block_index = 8;

    let mut renderer = Renderer::new();
    renderer.tick(&scenario).unwrap();

    let mirror = model("Mirror1", &["refl.png"]);
    let placed = instance(&mirror, 123.0);
    renderer.track_transform(&scenario, &placed);

    assert_eq!(
        *scenario.last_track_query.borrow(),
        Some((123.0, 8.0 * BLOCK_LENGTH))
    );
}

#[test]
fn reflection_view_looks_from_the_mirror_toward_the_mirrored_camera() {
    // Camera at the block origin, mirror 10m ahead facing straight back.
    let scenario = StubScenario::new();
    let mut renderer = Renderer::new();
    renderer.tick(&scenario).unwrap();

    let block_to_object = Matrix4::from_translation(Vector3::new(0.0, 0.0, 10.0));
    let view = renderer.reflection_view(block_to_object).unwrap();

    // The mirror position is the view-space origin.
    assert_vec4_close(
        view * Vector4::new(0.0, 0.0, 10.0, 1.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    );

    // The mirrored camera position (the camera itself, head-on) lies on the
    // forward axis at the mirror distance.
    assert_vec4_close(
        view * Vector4::new(0.0, 0.0, 0.0, 1.0),
        Vector4::new(0.0, 0.0, 10.0, 1.0),
    );
}

#[test]
fn reflection_view_is_expressed_in_the_camera_frame() {
    // Camera 5m ahead of the block origin.
    let mut scenario = StubScenario::new();
    scenario.camera_from_block = Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0));

    let mut renderer = Renderer::new();
    renderer.tick(&scenario).unwrap();
    assert_vec3_close(renderer.camera_position(), Vector3::new(0.0, 0.0, 5.0));

    let block_to_object = Matrix4::from_translation(Vector3::new(0.0, 0.0, 10.0));
    let view = renderer.reflection_view(block_to_object).unwrap();

    // A point handed to the view transform is in the camera frame: the
    // mirror sits at z = 5 there, and must land at the view-space origin.
    assert_vec4_close(
        view * Vector4::new(0.0, 0.0, 5.0, 1.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    );
}

#[test]
fn reflection_view_double_reflection_restores_the_camera() {
    // Reflecting the mirrored camera position across the same plane gives
    // back the original camera position.
    let mut scenario = StubScenario::new();
    scenario.camera_from_block = Matrix4::from_translation(Vector3::new(-2.0, 1.0, -5.0));

    let mut renderer = Renderer::new();
    renderer.tick(&scenario).unwrap();
    let camera = renderer.camera_position();

    let object_position = Vector3::new(3.0, 0.0, 12.0);
    let normal = Vector3::new(0.0, 0.0, 1.0);

    let mirror =
        |point: Vector3<f32>| object_position + route_mirror::math::reflect(object_position - point, normal);

    assert_vec3_close(mirror(mirror(camera)), camera);
}
