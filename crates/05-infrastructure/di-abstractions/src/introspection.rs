//! 类型内省抽象接口
//!
//! 自动装配通过该接口得知一个类型名称能否构造、如何构造。

use infrastructure_common::{IntrospectionResult, TypeCatalog, TypeDescriptor};
use std::sync::Arc;

/// 类型内省 trait
pub trait TypeIntrospector: Send + Sync {
    /// 查询类型描述符，未知类型返回 `UnknownType`
    fn describe(&self, type_name: &str) -> IntrospectionResult<Arc<TypeDescriptor>>;

    /// 是否认识该类型名称
    fn knows(&self, type_name: &str) -> bool {
        self.describe(type_name).is_ok()
    }
}

impl TypeIntrospector for TypeCatalog {
    fn describe(&self, type_name: &str) -> IntrospectionResult<Arc<TypeDescriptor>> {
        TypeCatalog::describe(self, type_name)
    }

    fn knows(&self, type_name: &str) -> bool {
        self.contains(type_name)
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for &T {
    fn describe(&self, type_name: &str) -> IntrospectionResult<Arc<TypeDescriptor>> {
        (**self).describe(type_name)
    }

    fn knows(&self, type_name: &str) -> bool {
        (**self).knows(type_name)
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for Arc<T> {
    fn describe(&self, type_name: &str) -> IntrospectionResult<Arc<TypeDescriptor>> {
        (**self).describe(type_name)
    }

    fn knows(&self, type_name: &str) -> bool {
        (**self).knows(type_name)
    }
}

/// 进程级类型目录
pub fn global_introspector() -> Arc<dyn TypeIntrospector> {
    Arc::new(TypeCatalog::global())
}
