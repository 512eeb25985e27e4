use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A translation tree for one language.
///
/// No schema is imposed: sections are objects, leaves are usually strings
/// but may be arrays of records (job entries, degrees, tags). Keys address
/// the tree with dotted paths such as `experience.title`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(Value);

impl Default for Dictionary {
    fn default() -> Self {
        Self(Value::Object(Default::default()))
    }
}

impl From<Value> for Dictionary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Dictionary {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self)
    }

    #[inline]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    /// Walks `key` segment by segment. A `null` anywhere on the path counts
    /// as missing.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.0, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
            .filter(|value| !value.is_null())
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// The text stored under `key`, if the leaf is a scalar.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Resolves `key`, degrading to `fallback` and then to the key itself so
    /// untranslated UI never goes blank.
    pub fn translate(&self, key: &str, fallback: Option<&str>) -> String {
        self.text(key).unwrap_or_else(|| {
            fallback
                .filter(|f| !f.is_empty())
                .unwrap_or(key)
                .to_owned()
        })
    }
}
