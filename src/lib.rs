//! DistScene - 场景图核心
//!
//! 提供由 `GameObject` 和组件构成的场景树，支持延迟初始化以及逐帧的
//! 更新和绘制遍历。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理、帧上下文）
//! - `component`: 组件系统（`GameObject`、`Component`、`Transform`）
//!
//! # 使用示例
//!
//! ```
//! use dist_scene::component::{GameObject, Transform};
//! use dist_scene::core::Context;
//!
//! let mut root = GameObject::new("Root");
//! let mut player = GameObject::new("Player");
//! player.add_component(Transform::new("Weapon"));
//! root.add_child(player);
//!
//! root.initialize();
//!
//! let context = Context::new(1.0 / 60.0);
//! root.update(&context);
//! root.draw();
//! ```

pub mod core;
pub mod component;
