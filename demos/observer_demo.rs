//! Observer registry walkthrough
//!
//! Run with: cargo run --example observer_demo
//!
//! Shows ordered fan-out, self-removal during a publish, a failing observer
//! that does not stop delivery, run-once observers, and the channel bridge.
//! Set `RUST_LOG=topic_registry=debug` for registration logs.

use std::cell::RefCell;
use std::rc::Rc;

use topic_registry::{Handle, Registry, RegistryConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("topic_registry=info".parse()?)
                .add_directive("observer_demo=info".parse()?),
        )
        .init();

    let config = RegistryConfig::default().max_observers_per_topic(16);
    let registry: Registry<&str, (i32, i32)> = Registry::with_config(config);
    let order = Rc::new(RefCell::new(Vec::new()));

    // A and C stay; B removes itself on first delivery
    let log = Rc::clone(&order);
    registry.register("t", move |_, (x, y): &(i32, i32)| {
        log.borrow_mut().push(format!("A({},{})", x, y))
    })?;

    let log = Rc::clone(&order);
    let b: Rc<RefCell<Option<Handle<&str>>>> = Rc::new(RefCell::new(None));
    let own = Rc::clone(&b);
    let handle = registry.register("t", move |registry, (x, y): &(i32, i32)| {
        log.borrow_mut().push(format!("B({},{})", x, y));
        if let Some(handle) = own.borrow().as_ref() {
            registry.unregister(handle);
        }
    })?;
    *b.borrow_mut() = Some(handle);

    let log = Rc::clone(&order);
    registry.register("t", move |_, (x, y): &(i32, i32)| {
        log.borrow_mut().push(format!("C({},{})", x, y))
    })?;

    // Fails, gets logged, and delivery continues
    registry.register("t", |_, _| Err::<(), _>("observer refused the message"))?;

    registry.publish(&"t", &(1, 2));
    registry.publish(&"t", &(3, 4));
    tracing::info!(calls = ?order.borrow(), "Fan-out order");

    // Run-once observer with a scope
    registry.register_once_scoped("ready", "startup", |scope, _, _| {
        tracing::info!(scope = *scope, "Ready fired");
    })?;
    registry.publish(&"ready", &(0, 0));
    tracing::info!(
        delivered_again = registry.publish(&"ready", &(0, 0)),
        "Second publish on run-once topic"
    );

    // Async consumer via the channel bridge
    let (handle, mut rx) = registry.channel("metrics")?;
    registry.publish(&"metrics", &(10, 20));
    registry.unregister(&handle);

    while let Some((x, y)) = rx.recv().await {
        tracing::info!(x, y, "Received over channel");
    }

    registry.unregister_all(None);
    tracing::info!(topics = registry.topic_count(), "Registry cleared");

    Ok(())
}
