//! Release-before-attach sequencing and per-frame animation.

use galaxy::{
    FieldLifecycle, GalaxyController, GalaxyParams, HeadlessScene, Scene, SceneError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn small(count: u32) -> GalaxyParams {
    GalaxyParams {
        count,
        ..Default::default()
    }
}

#[test]
fn test_repeated_regenerate_keeps_one_drawable() {
    let mut scene = HeadlessScene::new();
    let mut lifecycle = FieldLifecycle::new();
    let mut rng = StdRng::seed_from_u64(10);
    let params = small(500);

    lifecycle.regenerate_with(&params, &mut scene, &mut rng).unwrap();
    for _ in 0..10 {
        lifecycle.regenerate_with(&params, &mut scene, &mut rng).unwrap();
        assert_eq!(scene.detach_count, scene.attach_count - 1);
        assert_eq!(scene.dispose_count, scene.detach_count);
        assert_eq!(scene.attached().len(), 1);
        assert_eq!(scene.live(), 1);
    }

    // The old drawable was always gone before the new one was created
    assert_eq!(scene.peak_live, 1);
}

#[test]
fn test_displayed_handle_matches_scene() {
    let mut scene = HeadlessScene::new();
    let mut lifecycle = FieldLifecycle::new();
    let first = lifecycle
        .regenerate(&small(300), &mut scene)
        .unwrap()
        .drawable();
    let second = lifecycle
        .regenerate(&small(700), &mut scene)
        .unwrap()
        .drawable();

    assert_ne!(first, second);
    assert!(!scene.is_live(first));
    assert_eq!(scene.attached(), &[second]);
    assert_eq!(scene.point_count(second), Some(700));
    assert_eq!(lifecycle.displayed().map(|d| d.field().len()), Some(700));
}

#[test]
fn test_release_error_is_reported_and_replacement_still_attached() {
    let mut scene = HeadlessScene::new();
    let mut lifecycle = FieldLifecycle::new();
    let id = lifecycle
        .regenerate(&small(100), &mut scene)
        .unwrap()
        .drawable();

    // Someone else detached it behind the lifecycle's back
    scene.detach(id).unwrap();

    let err = lifecycle.regenerate(&small(250), &mut scene).unwrap_err();
    assert_eq!(err, SceneError::NotAttached(id));
    assert!(!scene.is_live(id));

    // A galaxy is still on screen
    let displayed = lifecycle.displayed().unwrap();
    assert_eq!(displayed.field().len(), 250);
    assert_eq!(scene.attached(), &[displayed.drawable()]);
    assert_eq!(scene.live(), 1);

    // And the next rebuild is clean again
    lifecycle.regenerate(&small(100), &mut scene).unwrap();
    assert_eq!(scene.attached().len(), 1);
    assert_eq!(scene.live(), 1);
}

#[test]
fn test_controller_commit_after_release_fault_keeps_a_galaxy() {
    let mut scene = HeadlessScene::new();
    let mut controller = GalaxyController::seeded(small(200), 17);
    controller.start(&mut scene).unwrap();
    let old = controller.displayed().unwrap().drawable();
    scene.detach(old).unwrap();

    controller.params_mut().branches = 7;
    assert!(controller.commit(&mut scene).is_err());

    let id = controller.displayed().unwrap().drawable();
    assert_ne!(id, old);
    assert_eq!(scene.attached(), &[id]);
}

#[test]
fn test_controller_shutdown_releases() {
    let mut scene = HeadlessScene::new();
    let mut controller = GalaxyController::seeded(small(200), 11);
    controller.start(&mut scene).unwrap();
    controller.shutdown(&mut scene);

    assert!(controller.displayed().is_none());
    assert_eq!(scene.live(), 0);
    assert!(scene.attached().is_empty());
}

#[test]
fn test_edit_commits_once_pointer_is_released() {
    let mut scene = HeadlessScene::new();
    let mut controller = GalaxyController::seeded(small(200), 12);
    controller.start(&mut scene).unwrap();

    // Slider drag through several values
    for branches in 4..8 {
        controller.params_mut().branches = branches;
        assert!(!controller.observe_edit(true, true, &mut scene).unwrap());
    }
    assert_eq!(scene.attach_count, 1);

    assert!(controller.observe_edit(false, false, &mut scene).unwrap());
    assert_eq!(scene.attach_count, 2);
    assert_eq!(scene.detach_count, 1);
}

#[test]
fn test_waviness_at_time_zero() {
    let mut scene = HeadlessScene::new();
    let params = GalaxyParams {
        count: 1000,
        randomness: 0.5,
        waviness: true,
        ..Default::default()
    };
    let mut controller = GalaxyController::seeded(params, 13);
    controller.start(&mut scene).unwrap();

    // Move Y somewhere else first; the result must not depend on it
    controller.update(2.7, &mut scene).unwrap();
    controller.update(0.0, &mut scene).unwrap();

    let displayed = controller.displayed().unwrap();
    let field = displayed.field();
    for (p, x0) in field.positions().iter().zip(field.original_x()) {
        assert_eq!(p.y, x0.sin());
        assert_eq!(p.x, *x0);
    }
    assert_eq!(scene.uploads(displayed.drawable()), Some(2));
}

#[test]
fn test_no_uploads_without_waviness() {
    let mut scene = HeadlessScene::new();
    let mut controller = GalaxyController::seeded(small(100), 14);
    controller.start(&mut scene).unwrap();

    for frame in 0..10 {
        controller.update(frame as f32 / 60.0, &mut scene).unwrap();
    }

    let id = controller.displayed().unwrap().drawable();
    assert_eq!(scene.uploads(id), Some(0));
}

#[test]
fn test_rotation_follows_elapsed_time() {
    let mut scene = HeadlessScene::new();
    let params = GalaxyParams {
        rotation: 0.5,
        ..small(100)
    };
    let mut controller = GalaxyController::seeded(params, 15);
    controller.start(&mut scene).unwrap();

    controller.update(2.0, &mut scene).unwrap();
    let id = controller.displayed().unwrap().drawable();
    assert_eq!(scene.rotation_y(id), Some(1.0));

    controller.params_mut().rotation = 0.0;
    controller.update(5.0, &mut scene).unwrap();
    assert_eq!(scene.rotation_y(id), Some(0.0));
}

#[test]
fn test_seeded_controllers_agree() {
    let mut scene_a = HeadlessScene::new();
    let mut scene_b = HeadlessScene::new();
    let mut a = GalaxyController::seeded(small(400), 16);
    let mut b = GalaxyController::seeded(small(400), 16);
    a.start(&mut scene_a).unwrap();
    b.start(&mut scene_b).unwrap();

    let pa = a.displayed().unwrap().field().positions().to_vec();
    let pb = b.displayed().unwrap().field().positions().to_vec();
    assert_eq!(pa, pb);
}
