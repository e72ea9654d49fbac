//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! vsync = true
//! target_fps = 120
//!
//! [physics]
//! gravity = -9.81
//! fixed_hz = 50
//!
//! [controller]
//! jump_height = 2
//! walk_speed = 5
//! run_speed = 8
//! ; ...every ControllerSettings field
//!
//! [camera]
//! mouse_sensitivity = 0.1
//! min_pitch = -90
//! max_pitch = 90
//! ; ...every CameraSettings field
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::charactercontroller::ControllerSettings;
use crate::components::firstpersoncamera::CameraSettings;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_GRAVITY: f32 = -9.81;
const DEFAULT_FIXED_HZ: f32 = 50.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Window values are applied by
/// [`apply_window_settings`](crate::systems::gameconfig::apply_window_settings),
/// everything else by
/// [`apply_gameplay_settings`](crate::systems::gameconfig::apply_gameplay_settings),
/// both on change detection.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Vertical gravity, negative pulls down.
    pub gravity: f32,
    /// Physics steps per second.
    pub fixed_hz: f32,
    pub controller: ControllerSettings,
    pub camera: CameraSettings,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, value: &mut f32) {
    if let Some(v) = config.getfloat(section, key).ok().flatten() {
        *value = v as f32;
    }
}

fn write_f32(config: &mut Ini, section: &str, key: &str, value: f32) {
    config.set(section, key, Some(value.to_string()));
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            gravity: DEFAULT_GRAVITY,
            fixed_hz: DEFAULT_FIXED_HZ,
            controller: ControllerSettings::default(),
            camera: CameraSettings::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.read_ini(&config);

        info!(
            "Loaded config from {:?}: {}x{} window, fps={}, vsync={}, gravity={}, fixed_hz={}",
            self.config_path,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.gravity,
            self.fixed_hz
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.read_ini(&config);
        Ok(())
    }

    fn read_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [physics] section
        read_f32(config, "physics", "gravity", &mut self.gravity);
        read_f32(config, "physics", "fixed_hz", &mut self.fixed_hz);
        if self.fixed_hz <= 0.0 {
            self.fixed_hz = DEFAULT_FIXED_HZ;
        }

        // [controller] section
        let c = &mut self.controller;
        read_f32(config, "controller", "jump_height", &mut c.jump_height);
        read_f32(config, "controller", "walk_speed", &mut c.walk_speed);
        read_f32(config, "controller", "run_speed", &mut c.run_speed);
        read_f32(config, "controller", "crouch_speed", &mut c.crouch_speed);
        read_f32(config, "controller", "backward_speed_factor", &mut c.backward_speed_factor);
        read_f32(config, "controller", "speed_smooth_time", &mut c.speed_smooth_time);
        read_f32(config, "controller", "air_control", &mut c.air_control);
        read_f32(config, "controller", "shell_offset", &mut c.shell_offset);
        read_f32(config, "controller", "ground_check_distance", &mut c.ground_check_distance);
        read_f32(config, "controller", "wall_check_radius", &mut c.wall_check_radius);
        read_f32(config, "controller", "wall_sector", &mut c.wall_sector);
        self.controller = self.controller.sanitized();

        // [camera] section
        let cam = &mut self.camera;
        read_f32(config, "camera", "horizontal_speed", &mut cam.horizontal_speed);
        read_f32(config, "camera", "vertical_speed", &mut cam.vertical_speed);
        read_f32(config, "camera", "mouse_sensitivity", &mut cam.mouse_sensitivity);
        read_f32(config, "camera", "min_pitch", &mut cam.min_pitch);
        read_f32(config, "camera", "max_pitch", &mut cam.max_pitch);
        read_f32(config, "camera", "fov", &mut cam.fov);
        read_f32(config, "camera", "eye_height", &mut cam.eye_height);
        read_f32(config, "camera", "crouch_offset", &mut cam.crouch_offset);
        self.camera = self.camera.sanitized();
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        // [physics] section
        write_f32(&mut config, "physics", "gravity", self.gravity);
        write_f32(&mut config, "physics", "fixed_hz", self.fixed_hz);

        // [controller] section
        let c = &self.controller;
        write_f32(&mut config, "controller", "jump_height", c.jump_height);
        write_f32(&mut config, "controller", "walk_speed", c.walk_speed);
        write_f32(&mut config, "controller", "run_speed", c.run_speed);
        write_f32(&mut config, "controller", "crouch_speed", c.crouch_speed);
        write_f32(&mut config, "controller", "backward_speed_factor", c.backward_speed_factor);
        write_f32(&mut config, "controller", "speed_smooth_time", c.speed_smooth_time);
        write_f32(&mut config, "controller", "air_control", c.air_control);
        write_f32(&mut config, "controller", "shell_offset", c.shell_offset);
        write_f32(&mut config, "controller", "ground_check_distance", c.ground_check_distance);
        write_f32(&mut config, "controller", "wall_check_radius", c.wall_check_radius);
        write_f32(&mut config, "controller", "wall_sector", c.wall_sector);

        // [camera] section
        let cam = &self.camera;
        write_f32(&mut config, "camera", "horizontal_speed", cam.horizontal_speed);
        write_f32(&mut config, "camera", "vertical_speed", cam.vertical_speed);
        write_f32(&mut config, "camera", "mouse_sensitivity", cam.mouse_sensitivity);
        write_f32(&mut config, "camera", "min_pitch", cam.min_pitch);
        write_f32(&mut config, "camera", "max_pitch", cam.max_pitch);
        write_f32(&mut config, "camera", "fov", cam.fov);
        write_f32(&mut config, "camera", "eye_height", cam.eye_height);
        write_f32(&mut config, "camera", "crouch_offset", cam.crouch_offset);

        config
    }

    /// Render the configuration as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_ini().writes()
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn gravity_vector(&self) -> crate::math::Vec3 {
        crate::math::Vec3::new(0.0, self.gravity, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.target_fps, 120);
        assert!(config.vsync);
        assert_eq!(config.gravity, -9.81);
        assert_eq!(config.fixed_hz, 50.0);
        assert_eq!(config.controller, ControllerSettings::default());
        assert_eq!(config.config_path, PathBuf::from("./config.ini"));
    }

    #[test]
    fn test_with_path() {
        let config = GameConfig::with_path("/tmp/other.ini");
        assert_eq!(config.config_path, PathBuf::from("/tmp/other.ini"));
        assert_eq!(config.target_fps, 120);
    }

    #[test]
    fn test_load_from_str_partial() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\nwidth = 800\nvsync = false\n\n[controller]\nrun_speed = 12.5\n\n[camera]\nmax_pitch = 60\n",
            )
            .unwrap();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 720);
        assert!(!config.vsync);
        assert_eq!(config.controller.run_speed, 12.5);
        assert_eq!(config.controller.walk_speed, 5.0);
        assert_eq!(config.camera.max_pitch, 60.0);
    }

    #[test]
    fn test_load_from_str_clamps_ranges() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[controller]\nshell_offset = 4\nwall_sector = -2\n[physics]\nfixed_hz = 0\n")
            .unwrap();
        assert_eq!(config.controller.shell_offset, 1.0);
        assert_eq!(config.controller.wall_sector, 0.0);
        assert_eq!(config.fixed_hz, 50.0);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[controller]\njump_height = high\n[window]\nwidth = wide\n")
            .unwrap();
        assert_eq!(config.controller.jump_height, 2.0);
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn test_written_text_reloads() {
        let mut original = GameConfig::new();
        original.controller.air_control = 0.3;
        original.camera.mouse_sensitivity = 0.25;
        original.gravity = -20.0;

        let mut loaded = GameConfig::new();
        loaded.load_from_str(&original.to_ini_string()).unwrap();
        assert_eq!(loaded.controller.air_control, 0.3);
        assert_eq!(loaded.camera.mouse_sensitivity, 0.25);
        assert_eq!(loaded.gravity, -20.0);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let mut config = GameConfig::with_path("/nonexistent/dir/config.ini");
        let err = config.load_from_file().unwrap_err();
        assert!(err.starts_with("Failed to load config file"));
        assert_eq!(config.target_fps, 120);
    }
}
