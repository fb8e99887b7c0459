//! GameObject 场景节点
//!
//! 管理游戏对象附加的组件和子对象，并负责在树上传播生命周期调用。
//!
//! # 所有权
//!
//! 对象独占其组件和子对象：移除或释放对象时，它拥有的一切随之释放。
//! 组件和子对象对所属对象的回指只是一个 [`ObjectId`]，只用于查询，
//! 不参与释放。
//!
//! # 初始化
//!
//! 对象可以在未初始化的状态下组装。调用 [`GameObject::initialize`] 后，
//! 之后再挂载到它上面的组件或子树会被立即初始化，因此从一个已初始化对象
//! 出发可达的一切都处于已初始化状态。

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Component, ComponentId, Transform};
use crate::core::error::{Result, SceneError};
use crate::core::Context;
use crate::{engine_debug, engine_info};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// 默认对象名称
const DEFAULT_NAME: &str = "Standard";

/// 对象标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// 由原始值构造（主要用于测试和日志回放）
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// GameObject - 场景树节点
///
/// 创建时总会自带一个 [`Transform`] 组件。
///
/// # 示例
///
/// ```
/// use dist_scene::component::{Component, GameObject};
///
/// let mut root = GameObject::new("Root");
/// let child_id = root.add_child(GameObject::new("Child"));
///
/// root.initialize();
/// assert!(root.child(child_id).unwrap().is_initialized());
/// assert!(root.transform().unwrap().is_initialized());
/// ```
pub struct GameObject {
    id: ObjectId,

    /// 游戏对象名称
    name: String,

    initialized: bool,

    /// 所属父对象
    parent: Option<ObjectId>,

    components: Vec<Box<dyn Component>>,

    children: Vec<GameObject>,
}

impl GameObject {
    /// 创建新的 GameObject，并挂载默认的 Transform 组件
    pub fn new(name: impl Into<String>) -> Self {
        let id = ObjectId::next();
        let mut transform = Transform::default();
        transform.state_mut().set_parent(id);

        Self {
            id,
            name: name.into(),
            initialized: false,
            parent: None,
            components: vec![Box::new(transform)],
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// 获取名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 设置名称
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 所属父对象，根对象或已分离的对象为 `None`
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    // ========== 生命周期 ==========

    /// 初始化对象及其可达的全部组件和子对象
    ///
    /// 已初始化的对象直接返回。先初始化组件，再递归初始化子对象，
    /// 最后标记自身。
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        for component in &mut self.components {
            if !component.is_initialized() {
                component.initialize();
            }
        }

        for child in &mut self.children {
            if !child.initialized {
                child.initialize();
            }
        }

        self.initialized = true;
    }

    /// 每帧更新：先组件后子对象，各自按添加顺序
    pub fn update(&mut self, context: &Context) {
        for component in &mut self.components {
            component.update(context);
        }

        for child in &mut self.children {
            child.update(context);
        }
    }

    /// 绘制：遍历顺序与 `update` 相同
    pub fn draw(&self) {
        for component in &self.components {
            component.draw();
        }

        for child in &self.children {
            child.draw();
        }
    }

    // ========== 组件管理 ==========

    /// 添加组件
    ///
    /// 组件的父对象被设置为本对象；如果本对象已初始化而组件尚未初始化，
    /// 组件会被立即初始化。
    ///
    /// # 返回
    /// 组件 id，可用于之后的查询和移除
    pub fn add_component<C: Component>(&mut self, component: C) -> ComponentId {
        self.attach_component(Box::new(component))
    }

    /// 添加已装箱的组件
    pub fn attach_component(&mut self, mut component: Box<dyn Component>) -> ComponentId {
        component.state_mut().set_parent(self.id);

        if self.initialized && !component.is_initialized() {
            component.initialize();
        }

        let component_id = component.id();
        engine_info!(
            object = %self.name,
            component = component.name(),
            id = %component_id,
            "Component added"
        );
        self.components.push(component);

        component_id
    }

    /// 移除并释放组件
    ///
    /// # 错误
    /// 组件不在本对象上时返回 `SceneError::ComponentNotFound`，组件列表不变
    pub fn remove_component(&mut self, component_id: ComponentId) -> Result<()> {
        let index = self
            .components
            .iter()
            .position(|c| c.id() == component_id)
            .ok_or_else(|| SceneError::ComponentNotFound {
                object: self.name.clone(),
                component: component_id,
            })?;

        let component = self.components.remove(index);
        engine_info!(
            object = %self.name,
            component = component.name(),
            id = %component_id,
            "Component removed"
        );

        Ok(())
    }

    /// 按 id 获取组件
    pub fn component(&self, component_id: ComponentId) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.id() == component_id)
            .map(|c| &**c)
    }

    /// 按添加顺序遍历所有组件
    pub fn components(&self) -> impl Iterator<Item = &dyn Component> + '_ {
        self.components.iter().map(|c| &**c)
    }

    /// 获取第一个指定类型的组件
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| (**c).as_any().downcast_ref::<T>())
    }

    /// 获取第一个指定类型的组件的可变引用
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| (**c).as_any_mut().downcast_mut::<T>())
    }

    /// 获取所有指定类型的组件
    pub fn get_components<T: Component>(&self) -> Vec<&T> {
        self.components
            .iter()
            .filter_map(|c| (**c).as_any().downcast_ref::<T>())
            .collect()
    }

    /// 检查是否有指定类型的组件
    pub fn has_component<T: Component>(&self) -> bool {
        self.get_component::<T>().is_some()
    }

    /// 获取组件数量
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// 默认的 Transform 组件
    ///
    /// 只有在它被显式移除后才会返回 `None`。
    pub fn transform(&self) -> Option<&Transform> {
        self.get_component::<Transform>()
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.get_component_mut::<Transform>()
    }

    // ========== 子对象管理 ==========

    /// 添加子对象
    ///
    /// 子对象的父对象被设置为本对象；如果本对象已初始化而子对象尚未初始化，
    /// 子对象（连同其整棵子树）会被立即初始化。
    pub fn add_child(&mut self, mut child: GameObject) -> ObjectId {
        child.parent = Some(self.id);

        if self.initialized && !child.initialized {
            child.initialize();
        }

        let child_id = child.id;
        engine_info!(
            object = %self.name,
            child = %child.name,
            id = %child_id,
            "Child added"
        );
        self.children.push(child);

        child_id
    }

    /// 移除并释放子对象（连同其整棵子树）
    ///
    /// # 错误
    /// 子对象不在本对象下时返回 `SceneError::ChildNotFound`，子对象列表不变
    pub fn remove_child(&mut self, child_id: ObjectId) -> Result<()> {
        let child = self.detach_child(child_id)?;
        engine_info!(
            object = %self.name,
            child = %child.name,
            id = %child_id,
            "Child removed"
        );

        Ok(())
    }

    /// 分离子对象但不释放它，返回的对象没有父对象，可以挂到别处
    pub fn take_child(&mut self, child_id: ObjectId) -> Result<GameObject> {
        let mut child = self.detach_child(child_id)?;
        child.parent = None;
        engine_info!(
            object = %self.name,
            child = %child.name,
            id = %child_id,
            "Child detached"
        );

        Ok(child)
    }

    fn detach_child(&mut self, child_id: ObjectId) -> Result<GameObject> {
        let index = self
            .children
            .iter()
            .position(|c| c.id == child_id)
            .ok_or_else(|| SceneError::ChildNotFound {
                object: self.name.clone(),
                child: child_id,
            })?;

        Ok(self.children.remove(index))
    }

    /// 按 id 获取直接子对象
    pub fn child(&self, child_id: ObjectId) -> Option<&GameObject> {
        self.children.iter().find(|c| c.id == child_id)
    }

    pub fn child_mut(&mut self, child_id: ObjectId) -> Option<&mut GameObject> {
        self.children.iter_mut().find(|c| c.id == child_id)
    }

    /// 直接子对象，按添加顺序
    pub fn children(&self) -> &[GameObject] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// 所有后代的数量（不含自身）
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// 按名称查找后代（深度优先、先序，不含自身）
    pub fn find_descendant(&self, name: &str) -> Option<&GameObject> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_descendant_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        for child in &mut self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_mut(name) {
                return Some(found);
            }
        }
        None
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("initialized", &self.initialized)
            .field("parent", &self.parent)
            .field(
                "components",
                &self.components.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("children", &self.children)
            .finish()
    }
}

impl Drop for GameObject {
    fn drop(&mut self) {
        if !self.components.is_empty() || !self.children.is_empty() {
            engine_debug!(
                object = %self.name,
                components = self.components.len(),
                children = self.children.len(),
                "GameObject dropped"
            );
        }
    }
}
