//! 核心功能模块
//!
//! 本模块提供了场景图的基础功能，包括数学类型、日志系统、配置管理、错误处理
//! 以及每帧的更新上下文。
//!
//! # 模块组织
//!
//! - `math`：数学类型，变换组件使用
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载运行设置
//! - `error`：错误处理，定义统一的错误类型
//! - `context`：每帧传递给场景树的上下文

pub mod math;
pub mod log;
pub mod config;
pub mod error;
pub mod context;

// 重新导出常用类型，方便使用
pub use math::{Vector3, Matrix4, Quaternion};
pub use error::{Result, DistSceneError, SceneError, ConfigError};
pub use config::Config;
pub use context::Context;
