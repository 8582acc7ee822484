//! 类型擦除的共享实例

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 容器中流转的值
///
/// 字面量条目、工厂返回值和自动装配构造出的对象都以 `Instance` 表示。
/// 克隆只增加引用计数，不会复制底层对象。
#[derive(Clone)]
pub struct Instance {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    /// 包装一个值
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 包装一个已共享的值
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 底层值的具体类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 底层值是否为 `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// 以 `Arc<T>` 取出底层值
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// 借用底层值
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// 两个实例是否指向同一个对象
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("instance", &"<erased>")
            .finish()
    }
}
