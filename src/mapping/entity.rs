use std::sync::Arc;

use super::{EntityDescriptor, EntityMetadata, registry};
use crate::core::{Result, Value};
use crate::result::ResultRow;

/// A type mapped to exactly one table.
///
/// Usually implemented with `#[derive(Entity)]`:
///
/// ```
/// use rustmemorm::Entity;
///
/// #[derive(Entity, Debug, Clone, PartialEq)]
/// #[table(name = "users")]
/// struct Person {
///     #[id]
///     id: i64,
///     #[column(name = "nick_name", nullable = false)]
///     name: String,
///     age: Option<i32>,
///     #[transient]
///     index: i32,
/// }
///
/// let metadata = Person::metadata().unwrap();
/// assert_eq!(metadata.table_name(), "users");
/// assert_eq!(metadata.column_names(), vec!["id", "nick_name", "age"]);
/// ```
pub trait Entity: Sized + 'static {
    /// Mapping table of the type. Called once per type by the registry.
    fn descriptor() -> EntityDescriptor;

    /// Current value of the field named `field_name`, or `None` when the
    /// type has no such mapped field.
    fn field_value(&self, field_name: &str) -> Option<Value>;

    /// Rebuilds an instance from a result row, reading each mapped column
    /// by name.
    fn from_row(row: &ResultRow<'_>) -> Result<Self>;

    /// Cached metadata for the type.
    fn metadata() -> Result<Arc<EntityMetadata>> {
        registry::metadata_for::<Self>()
    }
}
