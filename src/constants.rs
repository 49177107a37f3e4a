// Shared interaction/rendering tuning constants.
//
// Pure values only: this file is also compiled into the host-side tests.

// Orientation smoothing and limits
pub const ORIENTATION_LERP: f64 = 0.1; // fraction of the remaining delta applied per sensor sample
pub const DRAG_SENSITIVITY: f64 = 0.1; // degrees of look per CSS pixel dragged
pub const LAT_LIMIT_DEG: f64 = 85.0; // |lat| never reaches the poles
pub const UPRIGHT_BETA_DEG: f64 = 90.0; // device pitch that maps to the horizon

// Panorama camera/sphere
pub const CAMERA_ORBIT_RADIUS: f32 = 100.0; // camera sits on this sphere and looks at the origin
pub const PANORAMA_RADIUS: f32 = 500.0;
pub const PANORAMA_WIDTH_SEGMENTS: u32 = 60;
pub const PANORAMA_HEIGHT_SEGMENTS: u32 = 40;
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 1100.0;

// Floor-plan mini map: angle between the photo's forward and the map's up
pub const MAP_VIEW_CONE_OFFSET_DEG: f64 = 90.0;

// Swipe cards
pub const SWIPE_AXIS_LOCK_PX: f64 = 10.0; // beyond this the gesture is classified (scroll / horizontal)
pub const SWIPE_TAP_MAX_PX: f64 = 5.0; // |dx| below this on release is a tap
pub const SWIPE_COMMIT_PX: f64 = 100.0; // |dx| at or above this on release discards the card
pub const SWIPE_ROTATION_DEG_PER_PX: f64 = 0.1;
pub const SWIPE_EXIT_MS: i32 = 400; // must match the fly-out CSS transition
pub const SWIPE_SNAP_TRANSITION: &str = "transform 0.3s cubic-bezier(0.25, 0.8, 0.25, 1)";
pub const SWIPE_EXIT_TRANSITION: &str = "transform 0.4s ease-in, opacity 0.4s ease-in";

// Loading progress icon bands (percent)
pub const PROGRESS_STAGE_1: f64 = 33.0;
pub const PROGRESS_STAGE_2: f64 = 66.0;

// Asset defaults
pub const DEFAULT_CATALOG_URL: &str = "projects.json";
pub const DEFAULT_VARIANT_THUMBNAIL: &str = "plan_default.png";
