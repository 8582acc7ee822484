use component_macros::Injectable;
use di_abstractions::Injectable as _;
use std::sync::Arc;

#[derive(Injectable)]
struct Marker;

#[derive(Injectable)]
struct Empty {}

#[derive(Injectable)]
struct Wrapper(Arc<Marker>, #[inject(default = 3)] u32);

#[derive(Default, Injectable)]
#[injectable(default)]
struct Settings {
    verbose: bool,
}

#[derive(Injectable)]
#[injectable(abstract_type)]
struct Driver;

fn main() {
    assert!(Marker::descriptor().is_instantiable());
    assert!(Empty::descriptor().parameters().is_empty());
    assert_eq!(Wrapper::descriptor().parameters()[1].name, "1");
    assert!(Settings::descriptor().is_instantiable());
    assert!(!Driver::descriptor().is_instantiable());
}
