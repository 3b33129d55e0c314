//! `serde` support for [`AvlMap`], enabled by the `serde` feature.
//!
//! Maps serialize as a map of entries in key order and deserialize through
//! repeated [`AvlMap::insert`], so later duplicates overwrite earlier ones.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::avl::AvlMap;

impl<K, V, C> Serialize for AvlMap<K, V, C>
where
    K: Serialize,
    V: Serialize,
    C: Fn(&K, &K) -> i32,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct AvlMapVisitor<K, V> {
    marker: PhantomData<fn() -> AvlMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for AvlMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = AvlMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = AvlMap::new();
        while let Some((k, v)) = access.next_entry()? {
            map.insert(k, v);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for AvlMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AvlMapVisitor {
            marker: PhantomData,
        })
    }
}
