//! 注册条目定义

use crate::resolver::Resolver;
use infrastructure_common::{DependencyResult, Injectable, Instance};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 工厂函数类型
///
/// 每次解析都会重新调用，结果不缓存。
pub type FactoryFn = Arc<dyn Fn(&dyn Resolver) -> DependencyResult<Instance> + Send + Sync>;

/// 注册条目
///
/// 条目种类在注册时确定，解析时不再检查值本身的类型。
#[derive(Clone)]
pub enum Entry {
    /// 工厂，解析时以容器为参数调用
    Factory(FactoryFn),
    /// 类型引用，解析时构造该类型
    ClassReference(String),
    /// 字面量，原样返回
    Literal(Instance),
}

/// 条目种类，用于日志与诊断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Factory,
    ClassReference,
    Literal,
}

impl Entry {
    /// 创建工厂条目
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&dyn Resolver) -> DependencyResult<Instance> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(factory))
    }

    /// 创建类型引用条目
    pub fn class(type_name: impl Into<String>) -> Self {
        Self::ClassReference(type_name.into())
    }

    /// 以 `T` 的类型名称创建类型引用条目
    pub fn class_of<T: Injectable>() -> Self {
        Self::class(T::type_name())
    }

    /// 创建字面量条目
    pub fn literal<T: Any + Send + Sync>(value: T) -> Self {
        Self::Literal(Instance::new(value))
    }

    /// 条目种类
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Factory(_) => EntryKind::Factory,
            Self::ClassReference(_) => EntryKind::ClassReference,
            Self::Literal(_) => EntryKind::Literal,
        }
    }
}

impl From<Instance> for Entry {
    fn from(instance: Instance) -> Self {
        Self::Literal(instance)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Factory(<function>)"),
            Self::ClassReference(type_name) => {
                f.debug_tuple("ClassReference").field(type_name).finish()
            }
            Self::Literal(instance) => f.debug_tuple("Literal").field(instance).finish(),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Factory => "工厂",
            Self::ClassReference => "类型引用",
            Self::Literal => "字面量",
        };
        f.write_str(name)
    }
}
