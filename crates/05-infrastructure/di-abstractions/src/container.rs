//! 依赖注入容器抽象接口
//!
//! 提供依赖注入容器的核心抽象

use crate::registry::Entry;
use crate::resolver::Resolver;
use infrastructure_common::{DependencyResult, Injectable, Instance};
use std::any::Any;

/// 依赖注入容器 trait
///
/// 在 [`Resolver`] 之上增加注册能力。注册需要 `&mut self`，
/// 多个调用方共享容器时必须在外部加锁串行化。
pub trait DiContainer: Resolver {
    /// 注册条目，覆盖同名条目
    fn register(&mut self, id: String, entry: Entry);

    /// 已注册的标识符（按首次注册顺序）
    fn registered_ids(&self) -> Vec<String>;

    /// 是否启用自动装配
    fn autowiring_enabled(&self) -> bool;

    /// 注册字面量
    fn set<T>(&mut self, id: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
        Self: Sized,
    {
        self.register(id.into(), Entry::literal(value));
    }

    /// 注册工厂
    fn factory<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(&dyn Resolver) -> DependencyResult<Instance> + Send + Sync + 'static,
        Self: Sized,
    {
        self.register(id.into(), Entry::factory(factory));
    }

    /// 把标识符绑定到某个类型名称
    fn bind(&mut self, id: impl Into<String>, type_name: impl Into<String>)
    where
        Self: Sized,
    {
        self.register(id.into(), Entry::class(type_name));
    }

    /// 把标识符绑定到可注入类型 `T`
    fn bind_type<T: Injectable>(&mut self, id: impl Into<String>)
    where
        Self: Sized,
    {
        self.register(id.into(), Entry::class_of::<T>());
    }
}
