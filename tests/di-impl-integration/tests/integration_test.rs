//! Centralized integration tests for di-impl crate

use di_abstractions::{
    ConstructorArgs, DependencyError, DiContainer, Injectable, Instance, ParameterInfo, Resolver,
    ResolverExt, TypeCatalog, TypeDescriptor,
};
use di_impl::DiContainerImpl;
use std::error::Error as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// 数据库连接
#[derive(Debug)]
struct DatabaseConnection {
    dsn: String,
}

impl Injectable for DatabaseConnection {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::with_constructor(
            Self::type_name(),
            vec![ParameterInfo::builtin("dsn", "String")
                .with_default(String::from("sqlite::memory:"))],
            |arguments| {
                let mut args = ConstructorArgs::new(Self::type_name(), arguments);
                Ok(Instance::new(DatabaseConnection {
                    dsn: args.owned::<String>()?,
                }))
            },
        )
    }
}

/// 用户仓储
#[derive(Debug)]
struct UserRepository {
    connection: Arc<DatabaseConnection>,
}

impl Injectable for UserRepository {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::with_constructor(
            Self::type_name(),
            vec![ParameterInfo::named(
                "connection",
                DatabaseConnection::type_name(),
            )],
            |arguments| {
                let mut args = ConstructorArgs::new(Self::type_name(), arguments);
                Ok(Instance::new(UserRepository {
                    connection: args.shared()?,
                }))
            },
        )
    }
}

/// 邮件发送器
#[derive(Debug)]
struct SmtpMailer {
    host: String,
}

impl Injectable for SmtpMailer {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::with_constructor(
            Self::type_name(),
            vec![ParameterInfo::builtin("host", "String").with_default(String::from("localhost"))],
            |arguments| {
                let mut args = ConstructorArgs::new(Self::type_name(), arguments);
                Ok(Instance::new(SmtpMailer {
                    host: args.owned()?,
                }))
            },
        )
    }
}

/// 依赖 "Mailer" 接口标识符的通知服务
#[derive(Debug)]
struct NotificationService {
    mailer: Arc<SmtpMailer>,
}

impl Injectable for NotificationService {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::with_constructor(
            Self::type_name(),
            vec![ParameterInfo::named("mailer", "Mailer")],
            |arguments| {
                let mut args = ConstructorArgs::new(Self::type_name(), arguments);
                Ok(Instance::new(NotificationService {
                    mailer: args.shared()?,
                }))
            },
        )
    }
}

fn catalog() -> Arc<TypeCatalog> {
    let catalog = TypeCatalog::new();
    catalog.register_type::<DatabaseConnection>();
    catalog.register_type::<UserRepository>();
    catalog.register_type::<SmtpMailer>();
    catalog.register_type::<NotificationService>();
    Arc::new(catalog)
}

fn container(autowiring: bool) -> DiContainerImpl {
    DiContainerImpl::with_catalog(catalog(), autowiring)
}

#[test]
fn test_literal_registration_and_resolution() -> anyhow::Result<()> {
    let mut container = container(false);
    container.set("app.version", String::from("1.0.0"));
    container.set("app.name", String::from("SmtpMailer"));

    let version = container.resolve_as::<String>("app.version")?;
    assert_eq!(version.as_str(), "1.0.0");

    // 与类型同名的字符串字面量不会被当作类型引用
    let name = container.resolve_as::<String>("app.name")?;
    assert_eq!(name.as_str(), "SmtpMailer");
    Ok(())
}

#[test]
fn test_factory_runs_on_every_resolution() -> anyhow::Result<()> {
    let mut container = container(false);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    container.factory("request.id", move |_| {
        Ok(Instance::new(counter.fetch_add(1, Ordering::SeqCst)))
    });

    let first = container.resolve_as::<usize>("request.id")?;
    let second = container.resolve_as::<usize>("request.id")?;
    assert_eq!((*first, *second), (0, 1));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_factory_receives_container() -> anyhow::Result<()> {
    let mut container = container(false);
    container.set("mailer.host", String::from("smtp.example.com"));
    container.factory("Mailer", |resolver| {
        let host = resolver.resolve_as::<String>("mailer.host")?;
        Ok(Instance::new(SmtpMailer {
            host: host.as_ref().clone(),
        }))
    });

    let mailer = container.resolve_as::<SmtpMailer>("Mailer")?;
    assert_eq!(mailer.host, "smtp.example.com");
    Ok(())
}

#[test]
fn test_autowiring_builds_dependency_graph() -> anyhow::Result<()> {
    let container = container(true);

    let first = container.resolve_type::<UserRepository>()?;
    let second = container.resolve_type::<UserRepository>()?;
    assert_eq!(first.connection.dsn, "sqlite::memory:");
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first.connection, &second.connection));
    Ok(())
}

#[test]
fn test_registered_literal_is_shared_by_dependents() -> anyhow::Result<()> {
    let mut container = container(true);
    container.set(
        DatabaseConnection::type_name(),
        DatabaseConnection {
            dsn: String::from("postgres://localhost/app"),
        },
    );

    let first = container.resolve_type::<UserRepository>()?;
    let second = container.resolve_type::<UserRepository>()?;
    assert_eq!(first.connection.dsn, "postgres://localhost/app");
    assert!(Arc::ptr_eq(&first.connection, &second.connection));
    Ok(())
}

#[test]
fn test_interface_binding_without_autowiring() -> anyhow::Result<()> {
    let mut container = container(false);
    container.bind_type::<SmtpMailer>("Mailer");
    container.bind_type::<NotificationService>("notifications");

    let service = container.resolve_as::<NotificationService>("notifications")?;
    assert_eq!(service.mailer.host, "localhost");
    Ok(())
}

#[test]
fn test_missing_interface_binding() {
    let mut container = container(false);
    container.bind_type::<NotificationService>("notifications");

    let error = container.resolve("notifications").unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(
        error.to_string(),
        format!(
            "条目 Mailer 未在容器中找到 (被 {} 的参数 $mailer 依赖)",
            NotificationService::type_name()
        )
    );
}

#[test]
fn test_failure_names_outer_link() {
    let mut container = container(false);
    container.bind_type::<UserRepository>("users");

    let error = container.resolve("users").unwrap_err();
    assert!(error.is_not_found());

    let links: Vec<(&str, &str)> = error
        .chain()
        .iter()
        .map(|link| (link.type_name.as_str(), link.parameter.as_str()))
        .collect();
    assert_eq!(links, vec![(UserRepository::type_name(), "connection")]);
}

#[test]
fn test_autowiring_disabled_reports_not_found() {
    let container = container(false);
    let error = container.resolve(UserRepository::type_name()).unwrap_err();
    assert!(error.is_not_found());
}

#[test]
fn test_unknown_type_carries_introspection_source() {
    let container = container(true);
    let error = container.resolve("App\\Missing").unwrap_err();

    assert!(matches!(error, DependencyError::ResolutionFailure { .. }));
    assert!(error.source().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolution_with_external_lock() {
    let shared = Arc::new(RwLock::new(container(true)));

    let mut handles = Vec::new();
    for worker in 0..8 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            if worker == 0 {
                let mut container = shared.write().await;
                container.set("app.version", String::from("2.0.0"));
            }
            let container = shared.read().await;
            container
                .resolve_type::<UserRepository>()
                .map(|repository| repository.connection.dsn.clone())
        }));
    }

    for handle in handles {
        let dsn = handle.await.unwrap().unwrap();
        assert_eq!(dsn, "sqlite::memory:");
    }

    let container = shared.read().await;
    assert!(container.contains("app.version"));
    assert_eq!(container.registered_ids(), vec!["app.version".to_string()]);
}
