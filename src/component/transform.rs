//! Transform 组件
//!
//! 每个 `GameObject` 创建时自带的默认组件，管理对象的位置、旋转和缩放。

use super::{Component, ComponentState};
use crate::core::math::{self, matrix, Matrix4, Quaternion, Vector3};
use crate::core::Context;

/// Transform 组件
///
/// 管理游戏对象的空间变换（位置、旋转、缩放）。世界矩阵按需重建，
/// 在初始化和每帧更新时刷新。
#[derive(Debug)]
pub struct Transform {
    state: ComponentState,

    /// 组件名称
    name: String,

    /// 位置
    position: Vector3,

    /// 欧拉角（度数）
    euler_angle: Vector3,

    /// 缩放
    scale: Vector3,

    /// 前方向量
    forward: Vector3,

    quaternion: Quaternion,

    /// 世界矩阵缓存
    world_matrix: Matrix4,

    /// 世界矩阵是否需要更新
    world_dirty: bool,
}

impl Transform {
    /// 创建新的 Transform 组件
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: ComponentState::new(),
            name: name.into(),
            position: Vector3::zeros(),
            euler_angle: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            forward: Vector3::new(0.0, 0.0, -1.0),
            quaternion: Quaternion::identity(),
            world_matrix: Matrix4::identity(),
            world_dirty: true,
        }
    }

    /// 创建带位置的 Transform
    pub fn with_position(name: impl Into<String>, position: Vector3) -> Self {
        let mut transform = Self::new(name);
        transform.position = position;
        transform
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn euler_angle(&self) -> Vector3 {
        self.euler_angle
    }

    pub fn scale(&self) -> Vector3 {
        self.scale
    }

    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    pub fn quaternion(&self) -> Quaternion {
        self.quaternion
    }

    /// 设置位置
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
        self.world_dirty = true;
    }

    /// 设置欧拉角（度数）
    pub fn set_euler_angle(&mut self, euler: Vector3) {
        self.euler_angle = euler;
        self.world_dirty = true;
    }

    /// 设置缩放
    pub fn set_scale(&mut self, scale: Vector3) {
        self.scale = scale;
        self.world_dirty = true;
    }

    /// 添加位置偏移
    pub fn translate(&mut self, offset: Vector3) {
        self.position += offset;
        self.world_dirty = true;
    }

    /// 添加旋转偏移（度数）
    pub fn rotate(&mut self, offset: Vector3) {
        self.euler_angle += offset;
        self.world_dirty = true;
    }

    /// 世界矩阵是否等待重建
    pub fn is_dirty(&self) -> bool {
        self.world_dirty
    }

    /// 获取世界矩阵
    pub fn world_matrix(&mut self) -> Matrix4 {
        if self.world_dirty {
            self.update_world_matrix();
        }
        self.world_matrix
    }

    fn update_world_matrix(&mut self) {
        let pitch = math::deg_to_rad(self.euler_angle.x);
        let yaw = math::deg_to_rad(self.euler_angle.y);
        let roll = math::deg_to_rad(self.euler_angle.z);

        let rotation = matrix::rotation_euler(pitch, yaw, roll);

        // T * R * S
        self.world_matrix =
            matrix::translation(&self.position) * rotation * matrix::scaling(&self.scale);
        // nalgebra 的参数顺序为绕 X、Y、Z，组合方式同为 Z * Y * X
        self.quaternion = Quaternion::from_euler_angles(pitch, yaw, roll);
        self.forward = rotation
            .transform_vector(&Vector3::new(0.0, 0.0, -1.0))
            .normalize();

        self.world_dirty = false;
    }
}

impl Component for Transform {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn on_initialize(&mut self) {
        self.update_world_matrix();
    }

    fn update(&mut self, _context: &Context) {
        if self.world_dirty {
            self.update_world_matrix();
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new("Transform")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform() {
        let transform = Transform::default();
        assert_eq!(transform.name(), "Transform");
        assert_eq!(transform.scale(), Vector3::new(1.0, 1.0, 1.0));
        assert!(transform.is_dirty());
        assert!(!transform.is_initialized());
    }

    #[test]
    fn test_initialize_builds_world_matrix() {
        let mut transform = Transform::with_position("T", Vector3::new(1.0, 2.0, 3.0));
        transform.initialize();

        assert!(transform.is_initialized());
        assert!(!transform.is_dirty());

        let world = transform.world_matrix();
        assert!(math::approx_eq(world[(0, 3)], 1.0));
        assert!(math::approx_eq(world[(1, 3)], 2.0));
        assert!(math::approx_eq(world[(2, 3)], 3.0));
    }

    #[test]
    fn test_update_refreshes_dirty_matrix() {
        let mut transform = Transform::default();
        transform.initialize();

        transform.rotate(Vector3::new(0.0, 90.0, 0.0));
        assert!(transform.is_dirty());

        transform.update(&Context::new(0.016));
        assert!(!transform.is_dirty());
        assert!(math::approx_eq(transform.forward().x, -1.0));
    }

    #[test]
    fn test_quaternion_matches_world_rotation() {
        for euler in [
            Vector3::new(0.0, 90.0, 0.0),
            Vector3::new(30.0, 45.0, 60.0),
            Vector3::new(-20.0, 170.0, 10.0),
        ] {
            let mut transform = Transform::default();
            transform.set_euler_angle(euler);
            transform.initialize();

            let rotated = transform.quaternion() * Vector3::new(0.0, 0.0, -1.0);
            let forward = transform.forward();
            assert!(
                (rotated - forward).norm() < 1e-4,
                "euler {:?}: quaternion gives {:?}, matrix gives {:?}",
                euler,
                rotated,
                forward
            );
        }
    }
}
