use core::marker::PhantomData;

use alloc::vec::Vec;
use serde::{Deserialize, Deserializer, de};

/// A group of named sub-groups, kept in declaration order.
///
/// Repeated names are kept as well; deciding whether they are allowed is
/// left to the caller.
#[derive(Clone, Debug)]
pub struct NamedGroups<K, V>(pub Vec<(K, V)>);

impl<K, V> Default for NamedGroups<K, V> {
    fn default() -> Self {
        NamedGroups(Vec::new())
    }
}

impl<'de, K: Deserialize<'de>, V: Deserialize<'de>> Deserialize<'de> for NamedGroups<K, V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de> {
        struct GroupsVisitor<K, V>(PhantomData<K>, PhantomData<V>);
        impl<'de, K: Deserialize<'de>, V: Deserialize<'de>> de::Visitor<'de> for GroupsVisitor<K, V> {
            type Value = NamedGroups<K, V>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a group of named groups")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
                where
                    A: de::MapAccess<'de>, {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    groups.push(entry);
                }
                Ok(NamedGroups(groups))
            }
        }
        deserializer.deserialize_map(GroupsVisitor::<K, V>(PhantomData, PhantomData))
    }
}
