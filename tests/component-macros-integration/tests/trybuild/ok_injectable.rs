use component_macros::Injectable;
use di_abstractions::{Injectable as _, Instance, TypeCatalog};
use std::sync::Arc;

#[derive(Injectable)]
struct Clock;

#[derive(Injectable)]
struct Scheduler {
    clock: Arc<Clock>,
    #[inject(id = "tick")]
    tick: Arc<u64>,
    #[inject(default = 8)]
    workers: usize,
    #[inject(default)]
    label: String,
    #[inject(default = Instance::new(1u8))]
    extra: Instance,
}

fn main() {
    let descriptor = Scheduler::descriptor();
    assert_eq!(descriptor.parameters().len(), 5);
    assert!(TypeCatalog::global().contains(std::any::type_name::<Scheduler>()));
}
