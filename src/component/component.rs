//! 组件基类
//!
//! 组件是挂载在 `GameObject` 上的行为单元。`GameObject` 只依赖本 trait
//! 定义的能力集合：初始化、每帧更新、绘制、初始化状态查询以及父对象回指。

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::ObjectId;
use crate::core::Context;

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// 组件标识
///
/// 每个组件在创建时获得一个进程内唯一的 id，用于在所属对象上定位并移除它。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// 由原始值构造（主要用于测试和日志回放）
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// 原始值
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 组件的公共状态
///
/// 每个组件内嵌一份，通过 [`Component::state`] 暴露给 trait 的默认实现。
#[derive(Debug)]
pub struct ComponentState {
    id: ComponentId,
    initialized: bool,
    parent: Option<ObjectId>,
}

impl ComponentState {
    /// 创建未初始化、未挂载的状态
    pub fn new() -> Self {
        Self {
            id: ComponentId::next(),
            initialized: false,
            parent: None,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// 设置所属对象
    ///
    /// 只由 `GameObject` 在挂载组件时调用，外部无法改写回指：
    ///
    /// ```compile_fail
    /// use dist_scene::component::{ComponentState, ObjectId};
    ///
    /// let mut state = ComponentState::new();
    /// state.set_parent(ObjectId::from_raw(1));
    /// ```
    pub(crate) fn set_parent(&mut self, parent: ObjectId) {
        self.parent = Some(parent);
    }
}

impl Default for ComponentState {
    fn default() -> Self {
        Self::new()
    }
}

/// 类型擦除辅助 trait，用于按具体类型查询组件
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// 组件 trait
///
/// 实现者只需提供 `name`、`state` 和 `state_mut`，其余方法都有默认实现。
/// 所属对象的回指只能由 `GameObject` 写入，trait 上只读。
/// 需要自定义初始化逻辑时覆盖 [`Component::on_initialize`]，而不是 `initialize`，
/// 这样初始化标志总能被正确设置。
pub trait Component: AsAny {
    /// 获取组件名称
    fn name(&self) -> &str;

    /// 组件公共状态
    fn state(&self) -> &ComponentState;

    /// 组件公共状态（可变）
    fn state_mut(&mut self) -> &mut ComponentState;

    /// 初始化钩子（可选实现）
    fn on_initialize(&mut self) {}

    /// 每帧更新（可选实现）
    fn update(&mut self, _context: &Context) {}

    /// 绘制（可选实现）
    fn draw(&self) {}

    /// 初始化组件并标记为已初始化
    fn initialize(&mut self) {
        self.on_initialize();
        self.state_mut().initialized = true;
    }

    fn is_initialized(&self) -> bool {
        self.state().initialized
    }

    /// 所属对象，未挂载时为 `None`
    fn parent(&self) -> Option<ObjectId> {
        self.state().parent
    }

    fn id(&self) -> ComponentId {
        self.state().id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        state: ComponentState,
        setups: u32,
    }

    impl Component for Counter {
        fn name(&self) -> &str {
            "Counter"
        }

        fn state(&self) -> &ComponentState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ComponentState {
            &mut self.state
        }

        fn on_initialize(&mut self) {
            self.setups += 1;
        }
    }

    #[test]
    fn test_component_ids_are_unique() {
        let a = ComponentState::new();
        let b = ComponentState::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_initialize_runs_hook_and_sets_flag() {
        let mut counter = Counter {
            state: ComponentState::new(),
            setups: 0,
        };
        assert!(!counter.is_initialized());

        counter.initialize();
        assert!(counter.is_initialized());
        assert_eq!(counter.setups, 1);
    }

    #[test]
    fn test_downcast_through_trait_object() {
        let boxed: Box<dyn Component> = Box::new(Counter {
            state: ComponentState::new(),
            setups: 3,
        });

        let counter = (*boxed).as_any().downcast_ref::<Counter>();
        assert_eq!(counter.map(|c| c.setups), Some(3));
        assert_eq!(boxed.parent(), None);
    }

    #[test]
    fn test_state_parent_is_set_by_crate() {
        let mut state = ComponentState::new();
        assert_eq!(state.parent(), None);

        state.set_parent(ObjectId::from_raw(9));
        assert_eq!(state.parent(), Some(ObjectId::from_raw(9)));
    }
}
