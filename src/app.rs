//! Application owner: window configuration, frame loop, exit lifecycle
//!
//! `App` owns the `SceneManager` and drives it once per frame on top of
//! macroquad: update the active scene, draw it into the screen target, apply
//! any pending scene switch, present. Window creation and event pumping stay
//! inside the windowing library.

use std::fs;
use std::path::{Path, PathBuf};

use macroquad::prelude::{clear_background, get_frame_time, info, next_frame, warn, Conf, BLACK};
use serde::{Deserialize, Serialize};

use crate::render::ScreenTarget;
use crate::scene::{Scene, SceneAction, SceneManager};

/// Window/application settings, stored as RON.
///
/// Every field has a default so a partial config file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub high_dpi: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "marquee".to_string(),
            width: 640,
            height: 480,
            fullscreen: false,
            high_dpi: true,
        }
    }
}

impl AppConfig {
    /// Read a config file, falling back to defaults when the file is
    /// missing or unparsable
    pub fn load(path: impl AsRef<Path>) -> AppConfig {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => {
                info!("no config at {}, using defaults", path.display());
                return AppConfig::default();
            }
        };
        match ron::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("bad config {}: {}, using defaults", path.display(), e);
                AppConfig::default()
            }
        }
    }

    /// Window configuration for `#[macroquad::main]`
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.title.clone(),
            window_width: self.width as i32,
            window_height: self.height as i32,
            fullscreen: self.fullscreen,
            high_dpi: self.high_dpi,
            window_resizable: true,
            ..Default::default()
        }
    }
}

/// Owns the configuration and the scene manager, runs the frame loop
pub struct App {
    config: AppConfig,
    scenes: SceneManager,
    running: bool,
    exit_code: i32,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            scenes: SceneManager::new(),
            running: false,
            exit_code: 0,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Scene registry: add scenes here before or during `run`
    pub fn scenes(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    /// Whether the frame loop is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop at the end of the current frame
    pub fn quit(&mut self, exit_code: i32) {
        self.running = false;
        self.exit_code = exit_code;
    }

    /// Directory of the running executable.
    ///
    /// Falls back to the first CLI argument's parent, then to the current
    /// directory.
    pub fn exe_dir() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.to_path_buf();
            }
        }
        std::env::args()
            .next()
            .and_then(|arg| PathBuf::from(arg).parent().map(Path::to_path_buf))
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Run the frame loop until a scene quits or the window closes.
    ///
    /// The given scene is registered, activated and initialized before the
    /// first frame. Returns the exit code.
    pub async fn run(mut self, first_scene: Box<dyn Scene>) -> i32 {
        let first_id = first_scene.id().to_string();
        self.scenes.add(first_scene);
        self.scenes.set_active(&first_id);
        self.scenes.apply_pending_switch();

        info!("{}: starting with scene '{}'", self.config.title, first_id);
        self.running = true;
        while self.running {
            let dt = get_frame_time();
            match self.scenes.update(dt) {
                SceneAction::Continue => {}
                SceneAction::Switch(id) => self.scenes.set_active(&id),
                SceneAction::Quit(code) => self.quit(code),
            }

            clear_background(BLACK);
            let mut target = ScreenTarget;
            self.scenes.draw(&mut target);

            // Switches land between frames, never mid-draw
            self.scenes.apply_pending_switch();
            next_frame().await;
        }

        self.scenes.clear();
        info!("{}: exiting with code {}", self.config.title, self.exit_code);
        self.exit_code
    }
}
