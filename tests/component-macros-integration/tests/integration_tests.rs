//! Centralized integration tests for component-macros crate

use component_macros::Injectable;
use di_abstractions::{
    Construction, DependencyError, DiContainer, Injectable as _, Instance, ParameterType,
    Resolver, ResolverExt, TypeCatalog,
};
use di_impl::DiContainerImpl;
use std::any::type_name;
use std::sync::Arc;

#[derive(Debug, Injectable)]
pub struct DatabaseConnection;

#[derive(Debug, Injectable)]
pub struct UserRepository {
    connection: Arc<DatabaseConnection>,
    #[inject(default = 30)]
    timeout_secs: u64,
}

#[derive(Debug, Injectable)]
pub struct SmtpMailer {
    #[inject(default = String::from("localhost"))]
    host: String,
}

#[derive(Debug, Injectable)]
pub struct NotificationService {
    #[inject(id = "mailer")]
    mailer: Arc<SmtpMailer>,
    #[inject(default)]
    sender: String,
}

#[derive(Debug, Injectable)]
pub struct ApiClient {
    base_url: String,
}

#[derive(Debug, Default, Injectable)]
#[injectable(default)]
pub struct Settings {
    retries: u32,
}

#[derive(Debug, Injectable)]
#[injectable(abstract_type)]
pub struct Transport;

#[derive(Debug, Injectable)]
pub struct Envelope(Arc<SmtpMailer>, #[inject(default = 2)] u8);

#[derive(Debug, Injectable)]
pub struct Payload {
    #[inject(default = Instance::new(7i64))]
    body: Instance,
}

#[test]
fn test_descriptor_parameters_follow_field_order() {
    let descriptor = UserRepository::descriptor();
    assert_eq!(descriptor.name(), type_name::<UserRepository>());

    let parameters = descriptor.parameters();
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[0].name, "connection");
    assert_eq!(
        parameters[0].ty,
        ParameterType::Named(type_name::<DatabaseConnection>().to_string())
    );
    assert_eq!(parameters[1].name, "timeout_secs");
    assert_eq!(
        parameters[1].ty,
        ParameterType::Builtin(type_name::<u64>().to_string())
    );
    assert!(parameters[1].has_default());
}

#[test]
fn test_descriptor_construction_kinds() {
    assert!(matches!(
        DatabaseConnection::descriptor().construction(),
        Construction::Default(_)
    ));
    assert!(matches!(
        Settings::descriptor().construction(),
        Construction::Default(_)
    ));
    assert!(!Transport::descriptor().is_instantiable());
    assert_eq!(
        Payload::descriptor().parameters()[0].ty,
        ParameterType::Untyped
    );
}

#[test]
fn test_global_catalog_registration() {
    let catalog = TypeCatalog::global();
    assert!(catalog.contains(type_name::<DatabaseConnection>()));
    assert!(catalog.contains(type_name::<UserRepository>()));
    assert!(catalog.contains(type_name::<Transport>()));
}

#[test]
fn test_autowire_derived_graph() {
    let container = DiContainerImpl::new(true);

    let repository = container.resolve_type::<UserRepository>().unwrap();
    assert_eq!(repository.timeout_secs, 30);

    let again = container.resolve_type::<UserRepository>().unwrap();
    assert!(!Arc::ptr_eq(&repository.connection, &again.connection));
}

#[test]
fn test_registered_dependency_is_injected() {
    let mut container = DiContainerImpl::new(true);
    let connection = Arc::new(DatabaseConnection);
    let shared = Instance::from_arc(connection.clone());
    container.factory(type_name::<DatabaseConnection>(), move |_| Ok(shared.clone()));

    let repository = container.resolve_type::<UserRepository>().unwrap();
    assert!(Arc::ptr_eq(&repository.connection, &connection));
}

#[test]
fn test_id_override_uses_registered_entry() {
    let mut container = DiContainerImpl::new(true);
    container.bind_type::<SmtpMailer>("mailer");

    let service = container.resolve_type::<NotificationService>().unwrap();
    assert_eq!(service.mailer.host, "localhost");
    assert_eq!(service.sender, "");

    let mut manual = DiContainerImpl::new(false);
    manual.bind_type::<NotificationService>("notifications");
    let error = manual.resolve("notifications").unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(
        error.to_string(),
        DependencyError::not_found("mailer")
            .required_by(type_name::<NotificationService>(), "mailer")
            .to_string()
    );
}

#[test]
fn test_builtin_without_default_is_unresolvable() {
    let container = DiContainerImpl::new(true);
    let error = container.resolve(type_name::<ApiClient>()).unwrap_err();

    match error {
        DependencyError::UnresolvableParameter {
            type_name: owner,
            parameter,
            ..
        } => {
            assert_eq!(owner, type_name::<ApiClient>());
            assert_eq!(parameter, "base_url");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_abstract_type_is_not_instantiable() {
    let container = DiContainerImpl::new(true);
    let error = container.resolve(type_name::<Transport>()).unwrap_err();
    assert!(matches!(error, DependencyError::NotInstantiable { .. }));
}

#[test]
fn test_tuple_struct_and_untyped_field() {
    let container = DiContainerImpl::new(true);

    let envelope = container.resolve_type::<Envelope>().unwrap();
    assert_eq!(envelope.0.host, "localhost");
    assert_eq!(envelope.1, 2);

    let payload = container.resolve_type::<Payload>().unwrap();
    assert_eq!(payload.body.downcast_ref::<i64>(), Some(&7));

    let settings = container.resolve_type::<Settings>().unwrap();
    assert_eq!(settings.retries, 0);
}
