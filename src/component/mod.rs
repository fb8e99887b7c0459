//! 组件系统模块
//!
//! 场景树由 `GameObject` 组成：每个对象拥有一组组件和一组子对象，
//! 并按深度优先、先组件后子对象的顺序传播初始化、更新和绘制调用。

mod component;
mod transform;
mod game_object;

pub use component::{AsAny, Component, ComponentId, ComponentState};
pub use transform::Transform;
pub use game_object::{GameObject, ObjectId};
