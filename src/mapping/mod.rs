//! Entity mapping: descriptors produced by `#[derive(Entity)]` (or written
//! by hand), and the validated [`EntityMetadata`] derived from them.

pub mod column;
pub mod column_value;
pub mod descriptor;
pub mod entity;
pub mod metadata;
pub mod registry;

pub use column::EntityColumn;
pub use column_value::{ColumnValue, FieldType};
pub use descriptor::{EntityDescriptor, FieldDescriptor};
pub use entity::Entity;
pub use metadata::EntityMetadata;
pub use registry::metadata_for;
