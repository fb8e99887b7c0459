//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! 日志系统有显式的生命周期：`init_logger` 安装全局订阅者并返回
//! [`LoggerGuard`]，守卫被释放时会把文件输出中缓冲的日志刷新到磁盘。
//! 场景树在结构变化（添加/移除组件或子对象）时以 `dist_scene::engine`
//! 为 target 输出 info 级别日志。
//!
//! # 使用示例
//!
//! ```no_run
//! use dist_scene::core::config::LogLevel;
//! use dist_scene::core::log;
//!
//! let _guard = log::init_logger(LogLevel::Info, false, None)?;
//! dist_scene::app_info!(width = 800, height = 600, "Window created");
//! # Ok::<(), dist_scene::core::DistSceneError>(())
//! ```

use std::path::Path;

use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    prelude::*,
    registry::LookupSpan,
    EnvFilter,
};

use super::config::LogLevel;
use super::error::{DistSceneError, Result};

/// 默认日志文件名
const DEFAULT_LOG_FILE: &str = "distscene.log";

/// 日志系统守卫
///
/// 持有文件输出的后台写线程，释放时刷新并关闭文件输出。
/// 仅控制台输出时守卫为空。
#[must_use = "dropping the guard tears down file logging immediately"]
pub struct LoggerGuard {
    _file_guard: Option<WorkerGuard>,
}

/// 控制台输出层
///
/// 两种初始化方式共用，span 关闭时输出耗时，供 `span_trace!` 的帧追踪使用。
fn console_layer<S, W>(writer: W) -> impl tracing_subscriber::Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(writer)
}

/// 初始化日志系统
///
/// 必须在程序开始时调用一次，重复调用会返回 `DistSceneError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "distscene.log"）
pub fn init_logger(
    level: LogLevel,
    file_output: bool,
    log_file_path: Option<&str>,
) -> Result<LoggerGuard> {
    let filter = EnvFilter::new(level.as_filter());

    if file_output {
        let log_path = log_file_path.unwrap_or(DEFAULT_LOG_FILE);
        let path = Path::new(log_path);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_LOG_FILE);

        // 每天滚动
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);
        let (writer, file_guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(false)
            .with_writer(writer);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(std::io::stdout))
            .with(file_layer)
            .try_init()
            .map_err(|e| DistSceneError::Log(e.to_string()))?;

        Ok(LoggerGuard {
            _file_guard: Some(file_guard),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(std::io::stdout))
            .try_init()
            .map_err(|e| DistSceneError::Log(e.to_string()))?;

        Ok(LoggerGuard { _file_guard: None })
    }
}

/// 场景核心日志 - Debug 级别
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "dist_scene::engine", $($arg)*)
    };
}

/// 场景核心日志 - Info 级别
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "dist_scene::engine", $($arg)*)
    };
}

/// 场景核心日志 - Warn 级别
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "dist_scene::engine", $($arg)*)
    };
}

/// 应用层日志 - Info 级别
#[macro_export]
macro_rules! app_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "dist_scene::app", $($arg)*)
    };
}

/// 应用层日志 - Warn 级别
#[macro_export]
macro_rules! app_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "dist_scene::app", $($arg)*)
    };
}

/// 应用层日志 - Error 级别
#[macro_export]
macro_rules! app_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "dist_scene::app", $($arg)*)
    };
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// 帧追踪宏
///
/// 在帧循环中为每一帧创建一个 span，配合 `FmtSpan::CLOSE` 输出耗时。
#[macro_export]
macro_rules! span_trace {
    ($name:expr) => {
        tracing::span!(tracing::Level::TRACE, $name)
    };
    ($name:expr, $($fields:tt)*) => {
        tracing::span!(tracing::Level::TRACE, $name, $($fields)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// 写入共享缓冲区的输出目标
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = SharedBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_console_layer_reports_span_close() {
        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::registry().with(console_layer(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let span = crate::span_trace!("frame", index = 7);
            let _enter = span.enter();
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("frame"), "output: {}", output);
        assert!(output.contains("close"), "output: {}", output);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(LogLevel::Warn.as_filter(), "warn");
        assert_eq!(LogLevel::parse("Warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
    }
}
