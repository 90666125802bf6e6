use serde::{Deserialize, Serialize};

/// Content classification assigned by [`Tree::classify_contents`].
///
/// [`Tree::classify_contents`]: crate::Tree::classify_contents
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// File contents look like text.
    Text,
    /// File contents contain NUL bytes.
    Binary,
}

/// One entry in the materialised tree arena.
///
/// Nodes identify each other by index into the owning arena, never by
/// reference. Index 0 is always the root; its `parent` is `None`, which the
/// serialised form writes as `-1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Display connector prefix (`├── `, `└── `, with `│   ` continuations).
    pub symbol: String,
    /// Leaf name. The root's name is the path the walk started from.
    pub name: String,
    /// Full path, re-derivable from the parent chain after renames.
    pub path: String,
    /// Arena index of the parent; `None` only for the root.
    #[serde(with = "parent_index")]
    pub parent: Option<usize>,
    /// Arena indices of direct children, in traversal order.
    pub children: Vec<usize>,
    /// Whether the entry was a directory at walk time.
    pub is_dir: bool,
    /// Content classification; unset until a classification pass runs.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<ContentKind>,
}

impl Node {
    /// Returns `true` for the arena root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Serialises the parent link as a signed index, `-1` for the root.
mod parent_index {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        parent: &Option<usize>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match parent {
            Some(index) => serializer.serialize_i64(i64::try_from(*index).unwrap_or(i64::MAX)),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw == -1 {
            return Ok(None);
        }
        usize::try_from(raw)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid parent index {raw}")))
    }
}
