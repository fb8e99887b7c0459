//! 错误处理模块
//!
//! 定义了场景图中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::fmt;

use crate::component::{ComponentId, ObjectId};

/// 场景库统一的 Result 类型
pub type Result<T> = std::result::Result<T, DistSceneError>;

/// DistScene 的错误类型
#[derive(Debug)]
pub enum DistSceneError {
    /// 配置错误
    Config(ConfigError),

    /// 场景树操作错误
    Scene(SceneError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 场景树操作相关的错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// 对象上不存在该组件
    ComponentNotFound {
        object: String,
        component: ComponentId,
    },

    /// 对象下不存在该子对象
    ChildNotFound { object: String, child: ObjectId },
}

impl SceneError {
    /// 是否为"未找到"类错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SceneError::ComponentNotFound { .. } | SceneError::ChildNotFound { .. }
        )
    }
}

impl DistSceneError {
    /// 是否为场景树的"未找到"错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, DistSceneError::Scene(e) if e.is_not_found())
    }
}

impl fmt::Display for DistSceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistSceneError::Config(e) => write!(f, "Configuration error: {}", e),
            DistSceneError::Scene(e) => write!(f, "Scene error: {}", e),
            DistSceneError::Io(e) => write!(f, "IO error: {}", e),
            DistSceneError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::ComponentNotFound { object, component } => {
                write!(f, "Component {} not found on object '{}'", component, object)
            }
            SceneError::ChildNotFound { object, child } => {
                write!(f, "Child {} not found under object '{}'", child, object)
            }
        }
    }
}

impl std::error::Error for DistSceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DistSceneError::Io(e) => Some(e),
            DistSceneError::Config(e) => Some(e),
            DistSceneError::Scene(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for SceneError {}

impl From<std::io::Error> for DistSceneError {
    fn from(err: std::io::Error) -> Self {
        DistSceneError::Io(err)
    }
}

impl From<ConfigError> for DistSceneError {
    fn from(err: ConfigError) -> Self {
        DistSceneError::Config(err)
    }
}

impl From<SceneError> for DistSceneError {
    fn from(err: SceneError) -> Self {
        DistSceneError::Scene(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err: DistSceneError = SceneError::ChildNotFound {
            object: "Root".to_string(),
            child: ObjectId::from_raw(42),
        }
        .into();
        assert!(err.is_not_found());

        let err: DistSceneError = ConfigError::ParseError("bad".to_string()).into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_messages() {
        let err = SceneError::ComponentNotFound {
            object: "Player".to_string(),
            component: ComponentId::from_raw(7),
        };
        assert_eq!(err.to_string(), "Component #7 not found on object 'Player'");

        let err = DistSceneError::from(ConfigError::InvalidValue {
            field: "simulation.frames".to_string(),
            reason: "must be greater than 0".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for 'simulation.frames': must be greater than 0"
        );
    }
}
