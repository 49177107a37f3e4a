// Host-side tests for the panorama orientation controller.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod orientation {
    include!("../src/core/orientation.rs");
}

use orientation::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Signed shortest turn from `a` to `b`.
fn turn(a: f64, b: f64) -> f64 {
    wrap_delta(b - a)
}

fn gyro() -> OrientationController {
    let mut c = OrientationController::new();
    c.set_mode(ControlMode::Gyroscope);
    c
}

#[test]
fn wrap_degrees_stays_in_range() {
    let inputs = [
        0.0, 359.999, 360.0, 720.5, -0.5, -360.0, -725.0, 1e9, -1e9, -1e-20, 1e-20,
    ];
    for h in inputs {
        let w = wrap_degrees(h);
        assert!((0.0..360.0).contains(&w), "{h} wrapped to {w}");
    }
    for i in 0..3600 {
        let h = i as f64 * 0.1;
        let w = wrap_degrees(h);
        assert!((0.0..360.0).contains(&w));
        assert!(approx(w, h));
    }
    assert_eq!(wrap_degrees(f64::NAN), 0.0);
    assert_eq!(wrap_degrees(f64::INFINITY), 0.0);
}

#[test]
fn wrap_delta_picks_the_short_way() {
    assert!(approx(wrap_delta(340.0), -20.0));
    assert!(approx(wrap_delta(-340.0), 20.0));
    assert!(approx(wrap_delta(180.0), 180.0));
    assert!(approx(wrap_delta(-180.0), 180.0));
    assert!(approx(wrap_delta(10.0), 10.0));
    assert!(approx(wrap_delta(540.0), 180.0));
    for i in -720..=720 {
        let d = wrap_delta(i as f64 * 0.5);
        assert!(d > -180.0 && d <= 180.0, "delta {d}");
    }
}

/// Sample from raw device fields that carry at least one reading.
fn device(alpha: Option<f64>, beta: Option<f64>, compass: Option<f64>) -> OrientationSample {
    OrientationSample::from_device(alpha, beta, compass).expect("sample has a reading")
}

#[test]
fn ios_compass_heading_is_used_as_is() {
    let s = device(Some(123.0), Some(90.0), Some(45.0));
    assert!(approx(s.heading_deg, 45.0));
    let s = device(None, Some(90.0), Some(370.0));
    assert!(approx(s.heading_deg, 10.0));
}

#[test]
fn android_alpha_is_flipped_to_clockwise() {
    let s = device(Some(30.0), Some(90.0), None);
    assert!(approx(s.heading_deg, 330.0));
    let s = device(Some(0.0), Some(90.0), None);
    assert!(approx(s.heading_deg, 0.0));
    let s = device(Some(270.0), Some(90.0), None);
    assert!(approx(s.heading_deg, 90.0));
}

#[test]
fn single_missing_field_defaults_to_zero() {
    let s = device(None, Some(90.0), None);
    assert_eq!(s.heading_deg, 0.0);
    // beta 0 means the phone lies flat: the camera looks straight down
    let s = device(Some(0.0), None, None);
    assert!(approx(s.target_lat(), 85.0));
    let s = device(Some(f64::NAN), Some(90.0), Some(f64::NAN));
    assert_eq!(s.heading_deg, 0.0);
}

#[test]
fn event_without_alpha_or_beta_is_not_a_reading() {
    assert_eq!(OrientationSample::from_device(None, None, None), None);
    assert_eq!(
        OrientationSample::from_device(Some(f64::NAN), Some(f64::NAN), None),
        None
    );
    assert_eq!(OrientationSample::from_device(None, None, Some(370.0)), None);
}

#[test]
fn upright_pitch_maps_to_horizon() {
    let s = device(None, Some(90.0), None);
    assert!(approx(s.target_lat(), 0.0));
    let below = OrientationSample {
        heading_deg: 0.0,
        pitch_deg: 60.0,
    };
    assert!(approx(below.target_lat(), -30.0));
    let above = OrientationSample {
        heading_deg: 0.0,
        pitch_deg: 120.0,
    };
    assert!(approx(above.target_lat(), 30.0));
}

#[test]
fn latitude_is_clamped_for_any_pitch() {
    for beta in (-360..=360).step_by(5) {
        let mut c = gyro().with_smoothing(1.0);
        c.apply_sample(device(None, Some(beta as f64), None));
        let lat = c.state().lat;
        assert!((-85.0..=85.0).contains(&lat), "beta {beta} gave lat {lat}");

        let mut c = gyro();
        for _ in 0..200 {
            c.apply_sample(device(None, Some(beta as f64), None));
            let lat = c.state().lat;
            assert!((-85.0..=85.0).contains(&lat));
        }
    }
}

#[test]
fn smoothing_step_is_bounded_and_short() {
    let k = 0.1;
    for c in (0..360).step_by(15) {
        for t in (0..360).step_by(15) {
            let (c, t) = (c as f64, t as f64);
            let next = step_lon(c, t, k);
            let moved = turn(c, next).abs();
            let limit = turn(c, t).abs() * k;
            assert!(moved <= limit + 1e-9, "{c} -> {t}: moved {moved} > {limit}");
            assert!(moved < 180.0);
            // never moves away from the target
            if turn(c, t) != 0.0 {
                assert!(turn(c, next).signum() == turn(c, t).signum() || moved == 0.0);
            }
        }
    }
}

#[test]
fn heading_10_to_350_crosses_north() {
    assert!(approx(step_lon(10.0, 350.0, 0.1), 8.0));

    let mut c = gyro().with_smoothing(1.0);
    c.apply_sample(OrientationSample {
        heading_deg: 10.0,
        pitch_deg: 90.0,
    });
    assert!(approx(c.state().lon, 10.0));

    let mut c2 = gyro();
    for _ in 0..400 {
        c2.apply_sample(OrientationSample {
            heading_deg: 10.0,
            pitch_deg: 90.0,
        });
    }
    assert!((c2.state().lon - 10.0).abs() < 1e-6);

    let first = {
        c2.apply_sample(OrientationSample {
            heading_deg: 350.0,
            pitch_deg: 90.0,
        });
        c2.state().lon
    };
    assert!(first < 10.0, "first step went the long way: {first}");

    for _ in 0..200 {
        c2.apply_sample(OrientationSample {
            heading_deg: 350.0,
            pitch_deg: 90.0,
        });
        let lon = c2.state().lon;
        assert!(
            lon <= 10.0 || lon >= 350.0,
            "lon {lon} passed through the far side"
        );
    }
    assert!((c2.state().lon - 350.0).abs() < 0.01);
}

#[test]
fn compass_heading_tracks_latest_sample() {
    let mut c = gyro();
    c.apply_sample(device(Some(90.0), Some(90.0), None));
    assert!(approx(c.state().compass_heading, 270.0));
}

#[test]
fn drag_mode_ignores_sensor_samples() {
    let mut c = OrientationController::new();
    assert_eq!(c.mode(), ControlMode::Drag);
    let before = c.state();
    assert!(!c.apply_sample(OrientationSample {
        heading_deg: 100.0,
        pitch_deg: 120.0,
    }));
    assert_eq!(c.state(), before);
}

#[test]
fn drag_adds_scaled_deltas() {
    let mut c = OrientationController::new();
    assert!(!c.drag_to(10.0, 10.0), "move without press must be ignored");
    assert!(c.begin_drag(100.0, 100.0));
    assert!(c.drag_to(80.0, 130.0));
    assert!(approx(c.state().lon, 2.0));
    assert!(approx(c.state().lat, 3.0));
    assert!(c.drag_to(120.0, 130.0));
    assert!(approx(c.state().lon, 358.0));
    c.end_drag();
    assert!(!c.is_dragging());
    assert!(!c.drag_to(0.0, 0.0));
}

#[test]
fn drag_latitude_is_clamped() {
    let mut c = OrientationController::new();
    c.begin_drag(0.0, 0.0);
    c.drag_to(0.0, 5000.0);
    assert_eq!(c.state().lat, 85.0);
    c.drag_to(0.0, -10000.0);
    assert_eq!(c.state().lat, -85.0);
}

#[test]
fn gyroscope_mode_rejects_drags() {
    let mut c = gyro();
    assert!(!c.begin_drag(0.0, 0.0));
    assert!(!c.is_dragging());
}

#[test]
fn switching_mode_ends_drag() {
    let mut c = OrientationController::new();
    c.begin_drag(0.0, 0.0);
    c.set_mode(ControlMode::Gyroscope);
    assert!(!c.is_dragging());
}

#[test]
fn camera_sits_on_orbit_sphere() {
    let p = spherical_to_cartesian(0.0, 0.0, 100.0);
    assert!((p.x - 100.0).abs() < 1e-3 && p.y.abs() < 1e-3 && p.z.abs() < 1e-3);
    let p = spherical_to_cartesian(90.0, 0.0, 100.0);
    assert!(p.x.abs() < 1e-3 && (p.z - 100.0).abs() < 1e-3);
    let p = spherical_to_cartesian(0.0, 85.0, 100.0);
    assert!((p.y - 100.0 * 5f32.to_radians().cos()).abs() < 1e-3);
    for lon in (0..360).step_by(30) {
        for lat in (-85..=85).step_by(17) {
            let p = spherical_to_cartesian(lon as f64, lat as f64, 100.0);
            assert!((p.length() - 100.0).abs() < 1e-2);
        }
    }
}

#[test]
fn sensorless_browser_keeps_drag_after_gyro_is_requested() {
    let mut c = OrientationController::new();
    c.arm_gyroscope();
    for _ in 0..100 {
        if let Some(sample) = OrientationSample::from_device(None, None, None) {
            c.apply_sample(sample);
        }
    }
    assert_eq!(c.mode(), ControlMode::Drag);
    assert_eq!(c.state().lat, 0.0);
    assert!(c.begin_drag(10.0, 10.0));
    assert!(c.drag_to(10.0, 40.0));
    assert!(approx(c.state().lat, 3.0));
}

#[test]
fn first_real_reading_hands_control_to_gyroscope() {
    let mut c = OrientationController::new();
    c.arm_gyroscope();
    c.begin_drag(0.0, 0.0);
    assert!(c.apply_sample(device(Some(0.0), Some(90.0), None)));
    assert_eq!(c.mode(), ControlMode::Gyroscope);
    assert!(!c.is_dragging());
    assert!(!c.begin_drag(0.0, 0.0));
}

#[test]
fn unarmed_drag_mode_still_ignores_readings() {
    let mut c = OrientationController::new();
    assert!(!c.apply_sample(device(Some(0.0), Some(120.0), None)));
    assert_eq!(c.mode(), ControlMode::Drag);
    // choosing drag explicitly cancels an earlier arm
    c.arm_gyroscope();
    c.set_mode(ControlMode::Drag);
    assert!(!c.apply_sample(device(Some(0.0), Some(120.0), None)));
}

#[test]
fn control_mode_is_chosen_once() {
    // "skip" first, then a slow permission grant arrives
    let mut c = OrientationController::new();
    assert!(c.choose_mode(ControlMode::Drag));
    assert!(!c.choose_mode(ControlMode::Gyroscope));
    assert!(!c.apply_sample(device(Some(0.0), Some(90.0), None)));
    assert_eq!(c.mode(), ControlMode::Drag);

    let mut c = OrientationController::new();
    assert!(c.choose_mode(ControlMode::Gyroscope));
    assert!(!c.choose_mode(ControlMode::Drag));
    assert!(c.begin_drag(0.0, 0.0), "drag works until a reading arrives");
    assert!(c.apply_sample(device(Some(0.0), Some(90.0), None)));
    assert_eq!(c.mode(), ControlMode::Gyroscope);
}
