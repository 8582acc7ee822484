//! 演示用的组件

use component_macros::Injectable;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static NEXT_CONNECTION: AtomicUsize = AtomicUsize::new(1);

/// 数据库连接，每次构造分配新的编号
#[derive(Debug, Injectable)]
#[injectable(default)]
pub struct DatabaseConnection {
    pub serial: usize,
}

impl Default for DatabaseConnection {
    fn default() -> Self {
        Self {
            serial: NEXT_CONNECTION.fetch_add(1, Ordering::SeqCst),
        }
    }
}

/// 用户仓储
#[derive(Debug, Injectable)]
pub struct UserRepository {
    pub connection: Arc<DatabaseConnection>,
    #[inject(default = String::from("users"))]
    pub table: String,
}

impl UserRepository {
    pub fn find_user(&self, id: u64) -> String {
        format!(
            "SELECT * FROM {} WHERE id = {} (连接 #{})",
            self.table, id, self.connection.serial
        )
    }
}

/// 用户服务
#[derive(Debug, Injectable)]
pub struct UserService {
    pub repository: Arc<UserRepository>,
}

/// 邮件发送接口标记，不可直接实例化
#[derive(Debug, Injectable)]
#[injectable(abstract_type)]
pub struct MailerInterface;

/// 邮件发送接口的标识符，需与 `NotificationService::mailer` 上的 `inject(id)` 一致
pub const MAILER: &str = "MailerInterface";

/// SMTP 邮件发送实现
#[derive(Debug, Injectable)]
pub struct SmtpMailer {
    #[inject(default = String::from("localhost"))]
    pub host: String,
    #[inject(default = 25)]
    pub port: u16,
}

impl SmtpMailer {
    pub fn send(&self, to: &str, body: &str) -> String {
        format!("通过 {}:{} 向 {} 发送: {}", self.host, self.port, to, body)
    }
}

/// 通知服务，通过接口标识符获取邮件发送器
#[derive(Debug, Injectable)]
pub struct NotificationService {
    #[inject(id = "MailerInterface")]
    pub mailer: Arc<SmtpMailer>,
}

impl NotificationService {
    pub fn notify(&self, to: &str, message: &str) -> String {
        self.mailer.send(to, message)
    }
}
