use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use tracing::debug;

use super::{Entity, EntityMetadata};
use crate::core::Result;

lazy_static! {
    static ref METADATA_CACHE: RwLock<HashMap<TypeId, Arc<EntityMetadata>>> =
        RwLock::new(HashMap::new());
}

/// Returns the metadata of `T`, building it on first use.
///
/// Construction happens under the write lock, so each type is mapped once
/// even when several threads race on it. Failed constructions are not
/// cached.
pub fn metadata_for<T: Entity>() -> Result<Arc<EntityMetadata>> {
    let type_id = TypeId::of::<T>();

    if let Some(found) = METADATA_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
    {
        return Ok(found.clone());
    }

    let mut cache = METADATA_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(found) = cache.get(&type_id) {
        return Ok(found.clone());
    }

    let metadata = Arc::new(EntityMetadata::of::<T>()?);
    debug!(table = %metadata.table_name(), "registered entity metadata");
    cache.insert(type_id, metadata.clone());
    Ok(metadata)
}

pub fn is_registered<T: Entity>() -> bool {
    METADATA_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&TypeId::of::<T>())
}
