//! End-to-end pipeline scenarios: full ticks over synthetic frames.

use drishti_map::{
    classify, grid, transform, GridCoord, PerceptionConfig, PerceptionPipeline,
    PerspectiveRectifier, RgbFrame, RoverPose, WorldMap,
};

fn pipeline() -> PerceptionPipeline {
    PerceptionPipeline::new(PerceptionConfig::default()).unwrap()
}

/// Uniform bright ground: everything valid is navigable, nothing is an
/// obstacle.
#[test]
fn uniform_bright_frame_is_fully_navigable() {
    let pipeline = pipeline();
    let mut map = WorldMap::new(200);
    let frame = RgbFrame::filled(320, 160, [200, 200, 200]);
    let pose = RoverPose::new(100.0, 100.0, 0.0);

    let step = pipeline.process(&frame, pose, &mut map).unwrap();

    // The navigable mask covers exactly the valid region of the warp.
    let rectifier = PerspectiveRectifier::new(&pipeline.config().calibration).unwrap();
    let (_, validity) = rectifier.rectify(&frame);
    assert_eq!(step.navigable_pixels, validity.count_set());
    assert!(step.navigable_pixels > 0);

    // No obstacle pixel, no obstacle confidence anywhere.
    assert_eq!(step.obstacle_pixels, 0);
    assert!(map.obstacle_channel().iter().all(|&v| v == 0));

    // Navigation cues cover every navigable pixel.
    assert_eq!(step.nav.polar.len(), step.navigable_pixels);
}

/// A dark frame: the valid region classifies entirely as obstacle and
/// the invalid border stays out of both classes.
#[test]
fn uniform_dark_frame_is_all_obstacle_within_valid_region() {
    let pipeline = pipeline();
    let mut map = WorldMap::new(200);
    let frame = RgbFrame::filled(320, 160, [50, 50, 50]);
    let pose = RoverPose::new(100.0, 100.0, 0.0);

    let step = pipeline.process(&frame, pose, &mut map).unwrap();

    let rectifier = PerspectiveRectifier::new(&pipeline.config().calibration).unwrap();
    let (_, validity) = rectifier.rectify(&frame);
    assert_eq!(step.navigable_pixels, 0);
    assert_eq!(step.obstacle_pixels, validity.count_set());
    assert!(map.navigable_channel().iter().all(|&v| v == 0));
}

/// A 5x5 sample-colored block on an otherwise black rectified view:
/// exactly one world cell receives the +10 marker on all three
/// channels, and the sample branch touches nothing else.
#[test]
fn sample_block_registers_one_marker_cell() {
    let config = PerceptionConfig::default();
    let mut frame = RgbFrame::new(320, 160);
    for row in 100..105 {
        for col in 150..155 {
            frame.set(row, col, [150, 150, 10]);
        }
    }

    let sample = classify::detect_sample(
        &frame,
        config.classifier.sample_lower,
        config.classifier.sample_upper,
    );
    assert_eq!(sample.count_set(), 25);

    let points = transform::rover_points(&sample);
    let pose = RoverPose::new(100.0, 100.0, 0.0);
    let scale = config.calibration.world_scale();

    let mut map = WorldMap::new(config.map.world_size);
    let expected_cell = transform::point_to_world(
        points.min_forward().unwrap(),
        points.mean_lateral().unwrap(),
        pose,
        scale,
        map.size(),
    );

    let update = grid::apply_observation(&mut map, &[], &[], Some(expected_cell), &config.map);
    assert_eq!(update.sample_cell, Some(expected_cell));

    // min forward = 160 - 104 = 56, mean lateral = mean(6..=10) = 8;
    // world = (100 + 5.6, 100 + 0.8) truncated.
    assert_eq!(expected_cell, GridCoord::new(105, 100));

    // Exactly one cell carries confidence, at +10 on every channel.
    for channel in [
        map.obstacle_channel(),
        map.sample_channel(),
        map.navigable_channel(),
    ] {
        assert_eq!(channel.iter().filter(|&&v| v != 0).count(), 1);
        assert_eq!(channel.iter().sum::<u32>(), 10);
    }
    assert_eq!(map.sample_at(expected_cell), 10);
}

/// The same sample block fed through the full pipeline still produces a
/// marker: the band survives rectification.
#[test]
fn sample_block_survives_full_pipeline() {
    let pipeline = pipeline();
    let mut map = WorldMap::new(200);

    // Paint the sample color over the calibration's known ground patch
    // so it lands inside the valid region of the warp.
    let mut frame = RgbFrame::filled(320, 160, [200, 200, 200]);
    for row in 100..140 {
        for col in 120..200 {
            frame.set(row, col, [150, 150, 10]);
        }
    }

    let step = pipeline
        .process(&frame, RoverPose::new(100.0, 100.0, 0.0), &mut map)
        .unwrap();

    assert!(step.sample_pixels > 0);
    let cell = step.update.sample_cell.expect("sample marker expected");
    assert!(map.sample_at(cell) >= 10);
}

/// A tick without sample pixels leaves the sample channel untouched.
#[test]
fn sample_branch_skipped_when_nothing_in_view() {
    let pipeline = pipeline();
    let mut map = WorldMap::new(200);
    let frame = RgbFrame::filled(320, 160, [200, 200, 200]);

    let step = pipeline
        .process(&frame, RoverPose::new(100.0, 100.0, 0.0), &mut map)
        .unwrap();

    assert_eq!(step.sample_pixels, 0);
    assert_eq!(step.update.sample_cell, None);
    assert!(map.sample_channel().iter().all(|&v| v == 0));
}

/// Two identical ticks accumulate additively: every navigable cell
/// value doubles, none is overwritten.
#[test]
fn identical_ticks_accumulate_additively() {
    let pipeline = pipeline();
    let mut map = WorldMap::new(200);
    let frame = RgbFrame::filled(320, 160, [200, 200, 200]);
    let pose = RoverPose::new(100.0, 100.0, 30.0);

    pipeline.process(&frame, pose, &mut map).unwrap();
    let after_first: Vec<u32> = map.navigable_channel().to_vec();

    pipeline.process(&frame, pose, &mut map).unwrap();
    let after_second = map.navigable_channel();

    assert!(after_first.iter().any(|&v| v > 0));
    for (first, second) in after_first.iter().zip(after_second.iter()) {
        assert_eq!(*second, 2 * *first);
    }
}

/// A pose far outside the grid never writes out of bounds: everything
/// clips to the map edge instead.
#[test]
fn out_of_range_pose_clips_to_grid_edge() {
    let pipeline = pipeline();
    let mut map = WorldMap::new(200);
    let frame = RgbFrame::filled(320, 160, [200, 200, 200]);
    let pose = RoverPose::new(1e7, -1e7, 123.0);

    let step = pipeline.process(&frame, pose, &mut map).unwrap();
    assert!(step.navigable_pixels > 0);

    // All confidence piled up on the clipped border cells.
    let size = map.size() as i32;
    let mut total = 0u32;
    for y in 0..size {
        for x in 0..size {
            total += map.navigable_at(GridCoord::new(x, y));
        }
    }
    assert_eq!(total as usize, step.navigable_pixels * 2);
}
