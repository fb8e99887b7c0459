//! 数学类型模块
//!
//! 基于 `nalgebra`，为变换组件提供简洁的类型名称和常用的矩阵构造函数。

pub use nalgebra::{Matrix4 as Mat4, UnitQuaternion, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Matrix4 = Mat4<f32>;
pub type Quaternion = UnitQuaternion<f32>;

/// 数学常量
pub mod constants {
    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-5;
}

/// 角度转弧度
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * constants::DEG_TO_RAD
}

/// 检查两个浮点数是否近似相等
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < constants::EPSILON
}

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(offset: &Vector3) -> Matrix4 {
        Matrix4::new_translation(offset)
    }

    /// 创建缩放矩阵
    pub fn scaling(scale: &Vector3) -> Matrix4 {
        Matrix4::new_nonuniform_scaling(scale)
    }

    /// 由欧拉角（弧度）创建旋转矩阵，旋转顺序 Z * Y * X
    pub fn rotation_euler(pitch: f32, yaw: f32, roll: f32) -> Matrix4 {
        let rotation_x = Matrix4::from_axis_angle(&Vector3::x_axis(), pitch);
        let rotation_y = Matrix4::from_axis_angle(&Vector3::y_axis(), yaw);
        let rotation_z = Matrix4::from_axis_angle(&Vector3::z_axis(), roll);
        rotation_z * rotation_y * rotation_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_translation() {
        let mat = matrix::translation(&Vector3::new(1.0, 2.0, 3.0));
        let point = nalgebra::Vector4::new(0.0, 0.0, 0.0, 1.0);
        let result = mat * point;

        assert!(approx_eq(result.x, 1.0));
        assert!(approx_eq(result.y, 2.0));
        assert!(approx_eq(result.z, 3.0));
    }

    #[test]
    fn test_rotation_yaw() {
        let rotation = matrix::rotation_euler(0.0, deg_to_rad(90.0), 0.0);
        let forward = rotation.transform_vector(&Vector3::new(0.0, 0.0, -1.0));

        assert!(approx_eq(forward.x, -1.0));
        assert!(approx_eq(forward.z, 0.0));
    }
}
