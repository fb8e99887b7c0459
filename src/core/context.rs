//! 帧上下文模块
//!
//! `Context` 是每帧传递给场景树 `update` 的数据。场景树本身不解读其内容，
//! 只把它原样转发给每个组件。

use std::fmt;

/// 帧上下文
///
/// # 示例
///
/// ```
/// use dist_scene::core::Context;
///
/// // 模拟 60 FPS 的两帧
/// let first = Context::new(1.0 / 60.0);
/// let second = first.next(1.0 / 60.0);
///
/// assert_eq!(second.frame, 1);
/// assert!((second.total_time - 2.0 / 60.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Context {
    /// 帧间隔时间（秒）
    ///
    /// 自上一帧以来经过的时间。使用此值进行帧率无关的更新计算。
    pub delta_time: f32,

    /// 总运行时间（秒），包含当前帧
    pub total_time: f32,

    /// 帧序号，从 0 开始
    pub frame: u64,
}

impl Context {
    /// 创建第一帧的上下文
    pub fn new(delta_time: f32) -> Self {
        Self {
            delta_time,
            total_time: delta_time,
            frame: 0,
        }
    }

    /// 推进到下一帧
    pub fn next(&self, delta_time: f32) -> Self {
        Self {
            delta_time,
            total_time: self.total_time + delta_time,
            frame: self.frame + 1,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame {}: dt={:.3}s, total={:.2}s",
            self.frame, self.delta_time, self.total_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_advance() {
        let mut context = Context::new(0.5);
        for _ in 0..3 {
            context = context.next(0.5);
        }

        assert_eq!(context.frame, 3);
        assert_eq!(context.total_time, 2.0);
        assert_eq!(context.to_string(), "Frame 3: dt=0.500s, total=2.00s");
    }
}
