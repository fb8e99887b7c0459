//! 配置管理模块
//!
//! 提供场景运行配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! log_file = "distscene.log"
//!
//! [simulation]
//! frames = 3
//! target_fps = 60.0
//!
//! [scene]
//! root_name = "Root"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 运行配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 帧循环配置
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// 场景配置
    #[serde(default)]
    pub scene: SceneSettings,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 帧循环配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 运行的帧数
    #[serde(default = "default_frames")]
    pub frames: u32,

    /// 目标帧率，决定固定的 delta_time
    #[serde(default = "default_target_fps")]
    pub target_fps: f32,
}

/// 场景配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSettings {
    /// 根对象名称
    #[serde(default = "default_root_name")]
    pub root_name: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "distscene.log".to_string() }
fn default_frames() -> u32 { 3 }
fn default_target_fps() -> f32 { 60.0 }
fn default_root_name() -> String { "Root".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            target_fps: default_target_fps(),
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            root_name: default_root_name(),
        }
    }
}

impl SimulationConfig {
    /// 每帧的固定时间步长（秒）
    pub fn delta_time(&self) -> f32 {
        1.0 / self.target_fps
    }
}

impl LogLevel {
    /// 对应的 `EnvFilter` 指令
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// 从字符串解析（不区分大小写）
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use dist_scene::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), dist_scene::core::DistSceneError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--frames <value>`: 运行的帧数
    /// - `--fps <value>`: 目标帧率
    /// - `--log-level <value>`: 日志级别
    ///
    /// 无法解析的值会被忽略。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|idx| args.get(idx + 1))
        };

        if let Some(frames) = value_of("--frames").and_then(|v| v.parse().ok()) {
            self.simulation.frames = frames;
        }

        if let Some(fps) = value_of("--fps").and_then(|v| v.parse().ok()) {
            self.simulation.target_fps = fps;
        }

        if let Some(level) = value_of("--log-level").and_then(|v| LogLevel::parse(v)) {
            self.logging.level = level;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if !(self.simulation.target_fps.is_finite() && self.simulation.target_fps > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "simulation.target_fps".to_string(),
                reason: "Target FPS must be a positive number".to_string(),
            }
            .into());
        }

        if self.scene.root_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scene.root_name".to_string(),
                reason: "Root name must not be empty".to_string(),
            }
            .into());
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path is required when file output is enabled".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
