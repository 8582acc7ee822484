//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义条目注册和标识符解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`Resolver`] - 按标识符解析实例
//! - [`DiContainer`] - 带注册能力的容器
//! - [`TypeIntrospector`] - 自动装配使用的类型内省设施
//! - [`Entry`] - 注册条目（工厂 / 类型引用 / 字面量）
//!
//! `#[derive(Injectable)]` 生成的代码只引用本 crate 的路径，
//! 因此这里同时重新导出了公共基础类型与 `ctor`。

pub mod container;
pub mod introspection;
pub mod registry;
pub mod resolver;

pub use container::*;
pub use introspection::*;
pub use registry::*;
pub use resolver::*;

pub use infrastructure_common::{
    ConstructorArgs, Construction, DependencyError, DependencyResult, Injectable, Instance,
    IntrospectionError, IntrospectionResult, ParameterInfo, ParameterType, TypeCatalog,
    TypeDescriptor,
};

#[doc(hidden)]
pub use ctor;
