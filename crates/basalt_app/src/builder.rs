use crate::runner;
use crate::traits::BasaltApp;

/// Initial window and swap-chain configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub resizable: bool,
    pub fullscreen: bool,
    /// MSAA samples for the world pass (1 disables multisampling).
    pub sample_count: u32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Basalt Application".to_string(),
            width: 800,
            height: 600,
            vsync: true,
            resizable: true,
            fullscreen: false,
            sample_count: 1,
            fov_y: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

/// Entry point; builder-style configuration around a [`BasaltApp`].
pub struct App<A: BasaltApp> {
    config: AppConfig,
    app_state: A,
}

impl<A: BasaltApp + 'static> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            app_state,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    pub fn with_msaa(mut self, sample_count: u32) -> Self {
        self.config.sample_count = sample_count;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.config.fullscreen = fullscreen;
        self
    }

    /// Vertical field of view in degrees.
    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.config.fov_y = fov_y;
        self
    }

    pub fn with_clip_planes(mut self, znear: f32, zfar: f32) -> Self {
        self.config.znear = znear;
        self.config.zfar = zfar;
        self
    }

    /// Runs the event loop until the window closes or the app requests exit.
    pub fn run(self) -> anyhow::Result<()> {
        crate::logging::init();
        runner::run_internal(self.config, self.app_state)
    }
}
