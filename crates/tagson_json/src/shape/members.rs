use alloc::boxed::Box;
use alloc::string::String;
use core::any::TypeId;

use indexmap::IndexMap;
use tagson_reflect::Reflect;
use tagson_reflect::info::{NamedField, StructInfo, TypeInfo};
use tagson_reflect::ops::Struct;
use tagson_utils::hash::HashMap;

use super::cache::TypeCache;

// -----------------------------------------------------------------------------
// MemberDescriptor

/// A struct member as the engines see it.
///
/// Access goes through the field index of the derived [`Struct`] impl, so
/// reads and writes never look a name up twice.
#[derive(Debug)]
pub struct MemberDescriptor {
    index: usize,
    field: &'static NamedField,
}

impl MemberDescriptor {
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.field.name()
    }

    #[inline]
    pub const fn alias(&self) -> Option<&'static str> {
        self.field.alias()
    }

    /// The key this member is written under.
    #[inline]
    pub fn wire_name(&self) -> &'static str {
        self.field.alias().unwrap_or(self.field.name())
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.field.type_info()
    }

    #[inline]
    pub const fn is_read_only(&self) -> bool {
        self.field.is_read_only()
    }

    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.field.default_value()
    }

    #[inline]
    pub fn get<'a>(&self, value: &'a dyn Struct) -> Option<&'a dyn Reflect> {
        value.field_at(self.index)
    }

    #[inline]
    pub fn get_mut<'a>(&self, value: &'a mut dyn Struct) -> Option<&'a mut dyn Reflect> {
        value.field_at_mut(self.index)
    }

    /// Replaces the member value. Returns the value back on a type mismatch.
    pub fn set(&self, target: &mut dyn Struct, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        match target.field_at_mut(self.index) {
            Some(field) => field.set(value),
            None => Err(value),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberTable

/// The members of one struct type, in declaration order.
#[derive(Debug)]
pub struct MemberTable {
    case_sensitive: bool,
    members: IndexMap<String, MemberDescriptor>,
    aliases: HashMap<String, usize>,
}

impl MemberTable {
    fn new(info: &'static StructInfo, case_sensitive: bool) -> Self {
        let key = |name: &str| {
            if case_sensitive {
                String::from(name)
            } else {
                name.to_ascii_lowercase()
            }
        };

        let mut members = IndexMap::with_capacity(info.field_len());
        let mut aliases = HashMap::default();
        for (index, field) in info.fields().iter().enumerate() {
            if let Some(alias) = field.alias() {
                aliases.insert(key(alias), index);
            }
            members.insert(key(field.name()), MemberDescriptor { index, field });
        }

        Self {
            case_sensitive,
            members,
            aliases,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Members in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MemberDescriptor> {
        self.members.values()
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> Option<&MemberDescriptor> {
        self.members.get_index(index).map(|(_, member)| member)
    }

    /// Finds a member by an input key: name first, then alias.
    pub fn find(&self, key: &str) -> Option<&MemberDescriptor> {
        let lowered;
        let key = if self.case_sensitive {
            key
        } else {
            lowered = key.to_ascii_lowercase();
            lowered.as_str()
        };
        self.members
            .get(key)
            .or_else(|| self.aliases.get(key).and_then(|&index| self.get_index(index)))
    }
}

static SENSITIVE: TypeCache<MemberTable> = TypeCache::new();
static INSENSITIVE: TypeCache<MemberTable> = TypeCache::new();

/// Returns the cached member table of a struct type.
pub fn members_of(info: &'static StructInfo, case_sensitive: bool) -> &'static MemberTable {
    let cache = if case_sensitive { &SENSITIVE } else { &INSENSITIVE };
    let type_id: TypeId = info.type_id();
    cache.get_or_insert(type_id, || {
        log::trace!(
            "built member table of `{}` (case sensitive: {case_sensitive})",
            info.type_path()
        );
        MemberTable::new(info, case_sensitive)
    })
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use tagson_reflect::Reflect;
    use tagson_reflect::info::Typed;

    use super::members_of;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Person {
        #[reflect(alias = "full_name")]
        name: String,
        age: u32,
        #[reflect(skip)]
        cache: Vec<u8>,
    }

    fn info() -> &'static tagson_reflect::info::StructInfo {
        Person::type_info().as_struct().unwrap()
    }

    #[test]
    fn ordered_and_skipping() {
        let table = members_of(info(), true);
        let names: Vec<_> = table.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["name", "age"]);
        assert_eq!(table.find("name").unwrap().wire_name(), "full_name");
    }

    #[test]
    fn case_and_alias_lookup() {
        let sensitive = members_of(info(), true);
        assert!(sensitive.find("AGE").is_none());
        assert_eq!(sensitive.find("full_name").unwrap().name(), "name");

        let insensitive = members_of(info(), false);
        assert_eq!(insensitive.find("AGE").unwrap().index(), 1);
        assert_eq!(insensitive.find("Full_Name").unwrap().name(), "name");
    }

    #[test]
    fn get_and_set() {
        let mut person = Person::default();
        let member = members_of(info(), false).find("age").unwrap();
        member.set(&mut person, alloc::boxed::Box::new(7_u32)).unwrap();
        assert_eq!(person.age, 7);
        assert_eq!(member.get(&person).unwrap().downcast_ref::<u32>(), Some(&7));
        assert!(member.set(&mut person, alloc::boxed::Box::new(1_u8)).is_err());
        assert!(person.cache.is_empty());
    }
}
