//! 可注入组件接口定义

use crate::metadata::TypeDescriptor;
use std::any::Any;

/// 可注入组件 trait
///
/// 实现者在编译期声明自己的构造方式，容器据此自动装配。
/// 通常由 `#[derive(Injectable)]` 生成。
pub trait Injectable: Any + Send + Sync {
    /// 组件的类型描述符
    fn descriptor() -> TypeDescriptor
    where
        Self: Sized;

    /// 组件在容器中的标识符
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}
