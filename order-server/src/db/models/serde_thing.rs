//! Serde helpers for SurrealDB `Thing` ids
//!
//! Document ids and cross-collection references travel as `"table:id"`
//! strings on the wire and in the store, while handlers work with `Thing`.
//! Deserialization accepts both the string form and SurrealDB's native
//! object form.

use serde::{Deserialize, Deserializer, Serializer, de};
use std::fmt;
use surrealdb::sql::Thing;

/// Parse `"table:id"` into a `Thing`; a bare string becomes an id with an
/// empty table part.
pub fn parse_thing(s: &str) -> Thing {
    if let Some((tb, id)) = s.split_once(':') {
        Thing::from((tb.to_string(), id.to_string()))
    } else {
        Thing::from(("".to_string(), s.to_string()))
    }
}

struct ThingVisitor;

impl<'de> de::Visitor<'de> for ThingVisitor {
    type Value = Thing;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a Thing or a string like 'table:id'")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(parse_thing(v))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(parse_thing(&v))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        Thing::deserialize(de::value::MapAccessDeserializer::new(map))
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Thing::deserialize(deserializer)
    }
}

/// Deserialize a `Thing` from either wire format.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Thing, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ThingVisitor)
}

/// Serialize a `Thing` as a `"table:id"` string.
pub fn serialize<S>(thing: &Thing, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&thing.to_string())
}

/// `Option<Thing>` variant of the helpers above.
pub mod option {
    use super::*;

    struct OptionThingVisitor;

    impl<'de> de::Visitor<'de> for OptionThingVisitor {
        type Value = Option<Thing>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("null, a Thing, or a string like 'table:id'")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ThingVisitor).map(Some)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_empty() { Ok(None) } else { Ok(Some(parse_thing(v))) }
        }

        fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            Thing::deserialize(de::value::MapAccessDeserializer::new(map)).map(Some)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Thing>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionThingVisitor)
    }

    pub fn serialize<S>(thing: &Option<Thing>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match thing {
            Some(t) => serializer.serialize_some(&t.to_string()),
            None => serializer.serialize_none(),
        }
    }
}
