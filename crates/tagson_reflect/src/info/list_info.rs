use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{CapacityFn, InfoFn, Type, TypeInfo, TypePath, Typed};

/// The order in which a list yields and accepts its items.
///
/// Items are always iterated in the order they were pushed, so a list read
/// back from its own output keeps its contents. The order only affects how
/// the list is classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListOrder {
    /// A plain ordered sequence, e.g. `Vec<T>`.
    Sequence,
    /// Last-in first-out, e.g. [`Stack<T>`](crate::Stack).
    Stack,
    /// First-in first-out, e.g. `VecDeque<T>`.
    Queue,
}

/// Information for a growable list.
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item: Type,
    item_info: InfoFn,
    order: ListOrder,
    with_capacity: CapacityFn,
}

impl ListInfo {
    #[inline]
    pub const fn new<TList: TypePath, TItem: Typed>(
        order: ListOrder,
        with_capacity: CapacityFn,
    ) -> Self {
        Self {
            ty: Type::of::<TList>(),
            item: Type::of::<TItem>(),
            item_info: TItem::type_info,
            order,
            with_capacity,
        }
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub const fn item_ty(&self) -> &Type {
        &self.item
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub const fn order(&self) -> ListOrder {
        self.order
    }

    /// Builds an empty list.
    #[inline]
    pub fn with_capacity(&self, capacity: usize) -> Box<dyn Reflect> {
        (self.with_capacity)(capacity)
    }
}
