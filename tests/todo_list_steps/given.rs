//! Given steps for todo list BDD scenarios.

use super::world::TodoListWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use toist::todo::{adapters::memory::InMemoryKeyValueStore, services::STORAGE_KEY};

#[given("an empty todo list")]
fn empty_todo_list(world: &mut TodoListWorld) -> Result<(), eyre::Report> {
    world
        .start_session()
        .wrap_err("start session over empty storage")
}

#[given("stored todos that cannot be decoded")]
fn corrupted_storage(world: &mut TodoListWorld) {
    world.store = InMemoryKeyValueStore::new().with_entry(STORAGE_KEY, "[{\"id\": 42");
}
