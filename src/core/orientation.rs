// Camera look-around controller for the interior panorama.
//
// Turns device-orientation samples (gyroscope mode) or pointer drags (manual mode)
// into a longitude/latitude pair that the renderer reads once per frame.

use crate::constants::{DRAG_SENSITIVITY, LAT_LIMIT_DEG, ORIENTATION_LERP, UPRIGHT_BETA_DEG};
use glam::Vec3;

/// Wrap any angle into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let w = deg.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

/// Wrap an angular difference into `(-180, 180]` so it describes the shortest turn.
#[inline]
pub fn wrap_delta(delta: f64) -> f64 {
    let d = wrap_degrees(delta + 180.0) - 180.0;
    if d <= -180.0 {
        d + 360.0
    } else {
        d
    }
}

#[inline]
pub fn clamp_lat(lat: f64) -> f64 {
    if lat.is_nan() {
        return 0.0;
    }
    lat.clamp(-LAT_LIMIT_DEG, LAT_LIMIT_DEG)
}

/// One exponential smoothing step toward `target` along the shortest arc.
#[inline]
pub fn step_lon(current: f64, target: f64, factor: f64) -> f64 {
    wrap_degrees(current + wrap_delta(target - current) * factor)
}

#[inline]
pub fn step_lat(current: f64, target: f64, factor: f64) -> f64 {
    clamp_lat(current + (target - current) * factor)
}

/// Which input drives the camera. Chosen once when the session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControlMode {
    #[default]
    Drag,
    Gyroscope,
}

/// Latest camera-facing direction in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationState {
    pub lon: f64,
    pub lat: f64,
    pub compass_heading: f64,
}

/// A normalised sensor reading.
///
/// `heading_deg` is clockwise from north in `[0, 360)`. `pitch_deg` is the
/// elevation of the camera on its orbit where 90 is the horizon.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationSample {
    pub heading_deg: f64,
    pub pitch_deg: f64,
}

impl OrientationSample {
    /// Build a sample from raw `deviceorientation` fields.
    ///
    /// iOS reports `webkitCompassHeading` clockwise; elsewhere `alpha` runs
    /// counter-clockwise and is negated. A single missing field reads as 0, but an
    /// event with neither alpha nor beta carries no reading (desktop browsers fire
    /// these without a sensor) and yields `None`.
    pub fn from_device(alpha: Option<f64>, beta: Option<f64>, compass: Option<f64>) -> Option<Self> {
        let alpha = alpha.filter(|a| a.is_finite());
        let beta = beta.filter(|b| b.is_finite());
        if alpha.is_none() && beta.is_none() {
            return None;
        }
        let heading = match compass.filter(|h| h.is_finite()) {
            Some(h) => wrap_degrees(h),
            None => wrap_degrees(-alpha.unwrap_or(0.0)),
        };
        // The camera orbits the antipode of where the device points: tilting the
        // phone down lifts the camera so it looks down through the centre.
        Some(Self {
            heading_deg: heading,
            pitch_deg: 2.0 * UPRIGHT_BETA_DEG - beta.unwrap_or(0.0),
        })
    }

    /// Latitude this sample asks for, already clamped.
    #[inline]
    pub fn target_lat(&self) -> f64 {
        clamp_lat(self.pitch_deg - UPRIGHT_BETA_DEG)
    }
}

#[derive(Clone, Copy, Debug)]
struct DragAnchor {
    x: f64,
    y: f64,
}

#[derive(Debug, Default)]
pub struct OrientationController {
    state: OrientationState,
    mode: ControlMode,
    drag: Option<DragAnchor>,
    factor: Option<f64>,
    /// Gyroscope requested; it takes over on the first real sample.
    gyro_armed: bool,
    chosen: bool,
}

impl OrientationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the smoothing factor (defaults to `ORIENTATION_LERP`).
    #[cfg(test)]
    pub fn with_smoothing(mut self, factor: f64) -> Self {
        self.factor = Some(factor.clamp(0.0, 1.0));
        self
    }

    #[inline]
    pub fn state(&self) -> OrientationState {
        self.state
    }

    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        if self.mode != mode {
            log::info!("[orientation] control mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.gyro_armed = false;
        self.drag = None;
    }

    /// The session's one-time control choice. Later calls are ignored and return
    /// false, so a slow permission answer cannot override an earlier "skip".
    pub fn choose_mode(&mut self, mode: ControlMode) -> bool {
        if self.chosen {
            return false;
        }
        self.chosen = true;
        match mode {
            ControlMode::Drag => self.set_mode(ControlMode::Drag),
            ControlMode::Gyroscope => self.arm_gyroscope(),
        }
        true
    }

    /// Let the gyroscope take over once a sample with real data arrives.
    /// Until then the camera stays under drag control.
    pub fn arm_gyroscope(&mut self) {
        if self.mode == ControlMode::Drag {
            self.gyro_armed = true;
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Feed one sensor sample. Ignored unless the gyroscope drives the camera or
    /// has been armed; an armed controller switches to it here.
    pub fn apply_sample(&mut self, sample: OrientationSample) -> bool {
        if self.mode == ControlMode::Drag {
            if !self.gyro_armed {
                return false;
            }
            self.set_mode(ControlMode::Gyroscope);
        }
        let k = self.factor.unwrap_or(ORIENTATION_LERP);
        self.state.lon = step_lon(self.state.lon, sample.heading_deg, k);
        self.state.lat = step_lat(self.state.lat, sample.target_lat(), k);
        self.state.compass_heading = wrap_degrees(sample.heading_deg);
        true
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
        if self.mode != ControlMode::Drag {
            return false;
        }
        self.drag = Some(DragAnchor { x, y });
        true
    }

    /// Move the active drag to `(x, y)` in CSS pixels.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(anchor) = self.drag.as_mut() else {
            return false;
        };
        let dx = anchor.x - x;
        let dy = y - anchor.y;
        anchor.x = x;
        anchor.y = y;
        self.state.lon = wrap_degrees(self.state.lon + dx * DRAG_SENSITIVITY);
        self.state.lat = clamp_lat(self.state.lat + dy * DRAG_SENSITIVITY);
        true
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Camera eye on a sphere of `radius` around the origin.
    pub fn camera_position(&self, radius: f32) -> Vec3 {
        spherical_to_cartesian(self.state.lon, self.state.lat, radius)
    }
}

/// `phi = 90° - lat`, `theta = lon`.
pub fn spherical_to_cartesian(lon_deg: f64, lat_deg: f64, radius: f32) -> Vec3 {
    let phi = (90.0 - clamp_lat(lat_deg)).to_radians();
    let theta = lon_deg.to_radians();
    let r = radius as f64;
    Vec3::new(
        (r * phi.sin() * theta.cos()) as f32,
        (r * phi.cos()) as f32,
        (r * phi.sin() * theta.sin()) as f32,
    )
}
