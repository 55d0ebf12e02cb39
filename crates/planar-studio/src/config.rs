use planar_engine::camera::OrbitConfig;
use planar_engine::frame::FrameConfig;
use planar_engine::geometry::PlaneSpec;
use planar_engine::logging::LoggingConfig;
use planar_engine::math::Vec3;
use planar_engine::scene::{PlaneStyle, PointStyle};

/// Environment variable holding an optional `env_logger` filter.
pub const LOG_ENV: &str = "PLANAR_LOG";

/// Everything the studio can be tuned with. Overridable in code.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,

    /// Planes added before the first frame.
    pub startup_planes: Vec<PlaneSpec>,
    /// Cycled through by the `N` key.
    pub normal_point_presets: Vec<PlaneSpec>,
    /// Cycled through by the `T` key.
    pub three_point_presets: Vec<PlaneSpec>,

    pub plane_style: PlaneStyle,
    pub point_style: PointStyle,

    /// `(u, v)` step per arrow key press, and with Shift held.
    pub fine_step: f32,
    pub coarse_step: f32,

    pub orbit: OrbitConfig,
    pub frame: FrameConfig,
    pub log_filter: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "planar studio".to_string(),
            width: 1280.0,
            height: 720.0,

            startup_planes: vec![PlaneSpec::NormalPoint {
                point: Vec3::ZERO,
                normal: Vec3::Z,
            }],
            normal_point_presets: vec![
                PlaneSpec::NormalPoint { point: Vec3::new(0.0, 1.0, 0.0), normal: Vec3::Y },
                PlaneSpec::NormalPoint { point: Vec3::new(2.0, 0.0, 0.0), normal: Vec3::X },
                PlaneSpec::NormalPoint { point: Vec3::new(0.0, 0.5, -1.0), normal: Vec3::new(1.0, 1.0, 1.0) },
            ],
            three_point_presets: vec![
                PlaneSpec::ThreePoints {
                    p1: Vec3::ZERO,
                    p2: Vec3::new(3.0, 0.0, 0.0),
                    p3: Vec3::new(0.0, 2.0, 2.0),
                },
                PlaneSpec::ThreePoints {
                    p1: Vec3::new(-1.0, 0.0, -1.0),
                    p2: Vec3::new(1.0, 2.0, -1.0),
                    p3: Vec3::new(0.0, 1.0, 2.0),
                },
            ],

            plane_style: PlaneStyle::default(),
            point_style: PointStyle::default(),

            fine_step: 0.1,
            coarse_step: 1.0,

            orbit: OrbitConfig::default(),
            frame: FrameConfig::default(),
            log_filter: None,
        }
    }
}

impl StudioConfig {
    /// Defaults, with the log filter taken from `PLANAR_LOG` when set.
    pub fn from_env() -> Self {
        Self {
            log_filter: std::env::var(LOG_ENV).ok().filter(|s| !s.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }
}
