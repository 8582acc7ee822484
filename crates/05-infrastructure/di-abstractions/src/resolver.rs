//! 解析器抽象接口
//!
//! 提供按标识符解析实例的能力

use infrastructure_common::{DependencyError, DependencyResult, Instance, IntrospectionError};
use std::any::Any;
use std::sync::Arc;

/// 解析器 trait
///
/// 工厂被调用时会拿到 `&dyn Resolver`，可借此解析自己的依赖。
pub trait Resolver: Send + Sync {
    /// 解析标识符
    fn resolve(&self, id: &str) -> DependencyResult<Instance>;

    /// 标识符是否有显式注册的条目（可自动装配不算）
    fn contains(&self, id: &str) -> bool;
}

/// 带类型转换的解析辅助方法
pub trait ResolverExt: Resolver {
    /// 解析标识符并转换为 `Arc<T>`
    fn resolve_as<T: Any + Send + Sync>(&self, id: &str) -> DependencyResult<Arc<T>> {
        let instance = self.resolve(id)?;
        instance.downcast::<T>().ok_or_else(|| {
            DependencyError::resolution_failure(
                id,
                IntrospectionError::UnexpectedType {
                    id: id.to_string(),
                    expected: std::any::type_name::<T>().to_string(),
                    actual: instance.type_name().to_string(),
                },
            )
        })
    }

    /// 以 `T` 的类型名称为标识符解析
    fn resolve_type<T: Any + Send + Sync>(&self) -> DependencyResult<Arc<T>> {
        self.resolve_as::<T>(std::any::type_name::<T>())
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}
