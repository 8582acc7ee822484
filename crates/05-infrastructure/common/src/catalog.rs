//! 类型目录
//!
//! 记录“哪些类型名称可以被构造以及如何构造”，充当自动装配所需的内省设施。

use crate::component::Injectable;
use crate::errors::{IntrospectionError, IntrospectionResult};
use crate::metadata::TypeDescriptor;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 全局类型目录
static GLOBAL_TYPE_CATALOG: Lazy<TypeCatalog> = Lazy::new(TypeCatalog::new);

/// 类型目录
///
/// 以类型名称为键保存 [`TypeDescriptor`]，内部加锁，可在多线程间共享。
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程级目录，`#[derive(Injectable)]` 的类型在启动时自动登记到这里
    pub fn global() -> &'static TypeCatalog {
        &GLOBAL_TYPE_CATALOG
    }

    /// 登记类型描述符，同名类型会被覆盖
    pub fn register(&self, descriptor: TypeDescriptor) {
        debug!("登记类型: {}", descriptor.name());
        self.types
            .write()
            .insert(descriptor.name().to_string(), Arc::new(descriptor));
    }

    /// 登记可注入组件
    pub fn register_type<T: Injectable>(&self) {
        self.register(T::descriptor());
    }

    /// 查询类型描述符
    pub fn describe(&self, name: &str) -> IntrospectionResult<Arc<TypeDescriptor>> {
        self.types
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| IntrospectionError::unknown_type(name))
    }

    /// 是否已登记
    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// 已登记类型数量
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// 所有已登记的类型名称（按名称排序）
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }
}
