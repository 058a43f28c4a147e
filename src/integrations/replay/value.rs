// src/integrations/replay/value.rs
//
// Generic decoded replay data.
//
// Protocol decoders turn binary blobs into nested maps and lists of primitives and
// byte strings. Field names are the game's own (`m_playerList`, `m_hero`, ...).

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Null,
    Bool(bool),
    Int(i64),
    Bytes(Vec<u8>),
    List(Vec<DecodedValue>),
    Map(BTreeMap<String, DecodedValue>),
}

impl DecodedValue {
    /// Build a map from field/value pairs
    pub fn map<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, DecodedValue)>,
    {
        DecodedValue::Map(
            fields
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    pub fn bytes(value: impl AsRef<[u8]>) -> Self {
        DecodedValue::Bytes(value.as_ref().to_vec())
    }

    /// Field of a map; None for other variants
    pub fn get(&self, field: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Map(fields) => fields.get(field),
            _ => None,
        }
    }

    /// Follow a chain of map fields
    pub fn path(&self, fields: &[&str]) -> Option<&DecodedValue> {
        fields.iter().try_fold(self, |value, field| value.get(field))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            DecodedValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DecodedValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Byte string decoded as UTF-8, invalid sequences replaced
    pub fn as_text(&self) -> Option<String> {
        self.as_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn as_list(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::List(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_lookup() {
        let header = DecodedValue::map([(
            "m_version",
            DecodedValue::map([("m_baseBuild", DecodedValue::Int(91756))]),
        )]);

        assert_eq!(header.path(&["m_version", "m_baseBuild"]).and_then(DecodedValue::as_int), Some(91756));
        assert!(header.path(&["m_version", "m_build"]).is_none());
        assert!(header.path(&["m_version", "m_baseBuild", "deeper"]).is_none());
    }

    #[test]
    fn test_text_is_lossy_utf8() {
        assert_eq!(DecodedValue::bytes("Lúcio").as_text().unwrap(), "Lúcio");
        assert_eq!(DecodedValue::Bytes(vec![b'a', 0xff]).as_text().unwrap(), "a\u{fffd}");
        assert!(DecodedValue::Int(1).as_text().is_none());
    }
}
