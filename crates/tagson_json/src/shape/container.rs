use alloc::boxed::Box;

use tagson_reflect::Reflect;
use tagson_reflect::info::{ReadOnlyInfo, TypeInfo};

use super::cache::TypeCache;
use crate::JsonError;

/// How a collection target is built.
#[derive(Clone, Copy, Debug)]
pub struct ContainerShape {
    /// The mutable type that is instantiated and populated.
    pub concrete: &'static TypeInfo,
    /// Grown item by item (lists, sets).
    pub list_like: bool,
    /// Allocated once from all elements.
    pub array_like: bool,
    /// Set when the target is a read-only view over `concrete`.
    pub read_only: Option<&'static ReadOnlyInfo>,
}

impl ContainerShape {
    /// An empty instance of the concrete type, for list, set and map targets.
    pub fn with_capacity(&self, capacity: usize) -> Option<Box<dyn Reflect>> {
        match self.concrete {
            TypeInfo::List(info) => Some(info.with_capacity(capacity)),
            TypeInfo::Set(info) => Some(info.with_capacity(capacity)),
            TypeInfo::Map(info) => Some(info.with_capacity(capacity)),
            _ => None,
        }
    }

    /// Applies the read-only wrapper, if any, to a populated container.
    pub fn finish(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, JsonError> {
        match self.read_only {
            None => Ok(value),
            Some(view) => view.wrap(value).map_err(|value| {
                JsonError::mismatch(view.inner_info().type_path(), value.reflect_type_path())
            }),
        }
    }
}

static CONTAINERS: TypeCache<ContainerShape> = TypeCache::new();

/// Returns the cached [`ContainerShape`] for a requested collection type.
///
/// `Box<dyn Reflect>` resolves to the default list type.
pub fn resolve_container(info: &'static TypeInfo) -> &'static ContainerShape {
    CONTAINERS.get_or_insert(info.type_id(), || {
        let shape = resolve_uncached(info);
        log::trace!(
            "resolved container `{}` to `{}`",
            info.type_path(),
            shape.concrete.type_path()
        );
        shape
    })
}

fn resolve_uncached(info: &'static TypeInfo) -> ContainerShape {
    match info {
        TypeInfo::ReadOnly(view) => ContainerShape {
            read_only: Some(view),
            ..*resolve_container(view.inner_info())
        },
        TypeInfo::Dynamic(_) => ContainerShape {
            concrete: super::default_list_info(),
            list_like: true,
            array_like: false,
            read_only: None,
        },
        _ => ContainerShape {
            concrete: info,
            list_like: matches!(info, TypeInfo::List(_) | TypeInfo::Set(_)),
            array_like: matches!(info, TypeInfo::Array(_)),
            read_only: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeSet;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use tagson_reflect::Reflect;
    use tagson_reflect::info::Typed;

    use super::resolve_container;

    #[test]
    fn plain_collections() {
        let list = resolve_container(<Vec<u8>>::type_info());
        assert!(list.list_like && !list.array_like && list.read_only.is_none());
        assert!(resolve_container(<BTreeSet<u8>>::type_info()).list_like);
        assert!(resolve_container(<[u8; 4]>::type_info()).array_like);
    }

    #[test]
    fn dynamic_target_uses_default_list() {
        let shape = resolve_container(<Box<dyn Reflect>>::type_info());
        assert!(shape.concrete.type_is::<Vec<Box<dyn Reflect>>>());
    }

    #[test]
    fn read_only_view_builds_backing_first() {
        let shape = resolve_container(<Arc<[u8]>>::type_info());
        assert!(shape.list_like);
        assert!(shape.concrete.type_is::<Vec<u8>>());
        assert!(shape.read_only.is_some());

        let backing = Box::new(vec![1_u8, 2]) as Box<dyn Reflect>;
        let view = shape.finish(backing).unwrap();
        assert_eq!(&**view.downcast_ref::<Arc<[u8]>>().unwrap(), &[1, 2]);
    }
}
