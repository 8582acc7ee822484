//! 演示场景

use crate::services::{
    DatabaseConnection, MailerInterface, NotificationService, SmtpMailer, UserRepository,
    UserService, MAILER,
};
use anyhow::Context;
use di_abstractions::{DiContainer, Injectable, Instance, Resolver, ResolverExt};
use di_impl::DiContainerImpl;
use infrastructure_common::ContainerOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// 基本值的注册与读取
pub fn basic(options: &ContainerOptions) -> anyhow::Result<()> {
    info!("=== 基本值 ===");
    let mut container = DiContainerImpl::from_options(options);

    container.set("app.version", String::from("1.0.0"));
    container.set("app.debug", true);
    container.set("app.max_connections", 100u32);
    // 与类型同名的字符串仍然是字面量
    container.set("app.mailer", String::from("SmtpMailer"));

    let version = container.resolve_as::<String>("app.version")?;
    let debug_enabled = container.resolve_as::<bool>("app.debug")?;
    let max_connections = container.resolve_as::<u32>("app.max_connections")?;
    let mailer = container.resolve_as::<String>("app.mailer")?;

    info!("app.version = {}", version);
    info!("app.debug = {}", debug_enabled);
    info!("app.max_connections = {}", max_connections);
    info!("app.mailer = {}", mailer);
    info!(
        "contains(app.version) = {}, contains(app.missing) = {}",
        container.contains("app.version"),
        container.contains("app.missing")
    );
    info!("已注册: {:?}", container.registered_ids());
    Ok(())
}

/// 工厂闭包
pub fn factories(options: &ContainerOptions) -> anyhow::Result<()> {
    info!("=== 工厂 ===");
    let mut container = DiContainerImpl::from_options(options);

    let counter = Arc::new(AtomicUsize::new(0));
    let next = counter.clone();
    container.factory("request.id", move |_| {
        Ok(Instance::new(next.fetch_add(1, Ordering::SeqCst) + 1))
    });

    container.set("mailer.host", String::from("smtp.example.com"));
    container.set("mailer.port", 587u16);
    container.factory("mailer", |resolver| {
        let host = resolver.resolve_as::<String>("mailer.host")?;
        let port = resolver.resolve_as::<u16>("mailer.port")?;
        Ok(Instance::new(SmtpMailer {
            host: host.as_ref().clone(),
            port: *port,
        }))
    });

    for _ in 0..3 {
        let id = container.resolve_as::<usize>("request.id")?;
        info!("request.id = {}", id);
    }
    info!("工厂共调用 {} 次", counter.load(Ordering::SeqCst));

    let mailer = container.resolve_as::<SmtpMailer>("mailer")?;
    info!("{}", mailer.send("ops@example.com", "工厂构造的邮件发送器"));
    Ok(())
}

/// 依赖链自动装配
pub fn autowiring(options: &ContainerOptions) -> anyhow::Result<()> {
    info!("=== 自动装配 ===");
    let container = DiContainerImpl::from_options(options);

    let service = match container.resolve_type::<UserService>() {
        Ok(service) => service,
        Err(e) if e.is_not_found() => {
            warn!("自动装配已关闭: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e).context("解析 UserService 失败"),
    };
    info!("{}", service.repository.find_user(42));

    let another = container.resolve_type::<UserService>()?;
    info!(
        "再次解析得到新的实例: {}",
        !Arc::ptr_eq(&service.repository.connection, &another.repository.connection)
    );

    let mut container = container;
    container.bind_type::<UserRepository>("users");
    let repository = container.resolve_as::<UserRepository>("users")?;
    info!("通过类型引用 users 解析: {}", repository.find_user(7));
    Ok(())
}

/// 接口到实现的绑定
pub fn interface(options: &ContainerOptions) -> anyhow::Result<()> {
    info!("=== 接口绑定 ===");
    let mut container = DiContainerImpl::from_options(options);

    if let Err(e) = container.resolve(MailerInterface::type_name()) {
        warn!("接口本身不能实例化: {}", e);
    }

    container.bind_type::<SmtpMailer>(MAILER);
    container.bind_type::<NotificationService>("notifications");

    let notifications = container.resolve_as::<NotificationService>("notifications")?;
    info!("{}", notifications.notify("user@example.com", "欢迎注册"));
    Ok(())
}

/// 多个任务共享同一个容器
pub async fn concurrent(options: &ContainerOptions) -> anyhow::Result<()> {
    info!("=== 并发解析 ===");
    let mut container = DiContainerImpl::from_options(options);
    container.bind_type::<DatabaseConnection>(DatabaseConnection::type_name());
    container.bind_type::<UserRepository>("users");
    let shared = Arc::new(RwLock::new(container));

    let mut handles = Vec::new();
    for worker in 0..4u64 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            if worker == 0 {
                // 注册必须持有写锁
                shared
                    .write()
                    .await
                    .set("app.started_by", format!("worker-{}", worker));
            }
            let container = shared.read().await;
            container
                .resolve_as::<UserRepository>("users")
                .map(|repository| repository.find_user(worker))
        }));
    }

    for (worker, handle) in handles.into_iter().enumerate() {
        let query = handle.await.context("任务异常退出")??;
        info!("worker-{}: {}", worker, query);
    }

    let container = shared.read().await;
    info!("最终注册: {:?}", container.registered_ids());
    Ok(())
}
