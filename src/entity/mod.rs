//! Loading and persisting mapped instances.

mod loader;
mod manager;
mod persister;

pub use loader::EntityLoader;
pub use manager::{EntityManager, EntityManagerImpl, SimpleEntityManager};
pub use persister::EntityPersister;
