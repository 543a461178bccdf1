//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpad_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use taskpad_core::{MemoryBackend, StoreResult, TaskService, TaskStore};

fn main() {
    println!("taskpad_core ping={}", taskpad_core::ping());
    println!("taskpad_core version={}", taskpad_core::core_version());

    match smoke() {
        Ok(count) => println!("taskpad_core smoke tasks={count}"),
        Err(err) => println!("taskpad_core smoke error={err}"),
    }
}

/// Exercises one in-memory create/list cycle through the service.
fn smoke() -> StoreResult<usize> {
    let service = TaskService::new(TaskStore::new(MemoryBackend::new()));
    service.create("smoke task", None)?;
    Ok(service.list()?.len())
}
