//! Namespaced kind keys and the kind registry.
//!
//! Kind keys are stable string identifiers used by data files (e.g.
//! `stockpile:iron_bar`). The registry maps them to compact [`KindId`]s in
//! registration order, so ids stay stable for a given data file across runs.

use crate::stack::{KindId, ResourceStack};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default namespace used when a key omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "stockpile";

/// Error returned when parsing an invalid [`KindKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct KindKeyError {
    message: String,
}

impl KindKeyError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A namespaced key of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KindKey {
    namespace: String,
    path: String,
}

impl KindKey {
    /// Parse a kind key.
    ///
    /// Accepts either:
    /// - `namespace:path`
    /// - `path` (uses [`DEFAULT_NAMESPACE`])
    pub fn parse(input: &str) -> Result<Self, KindKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(KindKeyError::new("KindKey cannot be empty"));
        }

        let (namespace, path) = input
            .split_once(':')
            .unwrap_or((DEFAULT_NAMESPACE, input));

        let namespace = namespace.trim();
        let path = path.trim();

        validate_segment("namespace", namespace, 64, false)?;
        validate_segment("path", path, 128, true)?;

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for KindKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for KindKey {
    type Err = KindKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KindKey {
    type Error = KindKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KindKey> for String {
    fn from(key: KindKey) -> Self {
        key.to_string()
    }
}

fn validate_segment(
    what: &str,
    segment: &str,
    max_len: usize,
    allow_slash: bool,
) -> Result<(), KindKeyError> {
    if segment.is_empty() {
        return Err(KindKeyError::new(format!("KindKey {what} cannot be empty")));
    }
    if segment.len() > max_len {
        return Err(KindKeyError::new(format!(
            "KindKey {what} too long (max {max_len})"
        )));
    }
    let valid = segment.chars().all(|c| {
        matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.') || (allow_slash && c == '/')
    });
    if !valid {
        return Err(KindKeyError::new(format!(
            "KindKey {what} has invalid characters"
        )));
    }
    Ok(())
}

/// A registered resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDef {
    /// Assigned identifier.
    pub id: KindId,
    /// Key the kind was registered under.
    pub key: KindKey,
    /// Stack ceiling for this kind.
    pub max_quantity: u32,
}

/// Errors emitted while building a [`KindRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The same key was registered twice.
    #[error("kind {0} registered twice")]
    DuplicateKind(KindKey),
    /// A substitution group names a kind that was never registered.
    #[error("group {group} references unknown kind {key}")]
    UnknownGroupMember {
        /// Group name.
        group: String,
        /// Offending member key.
        key: KindKey,
    },
    /// Wrap serde parsing issues.
    #[error("failed to parse kind registry: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    kinds: Vec<KindEntry>,
    #[serde(default)]
    groups: BTreeMap<String, Vec<KindKey>>,
}

#[derive(Debug, Deserialize)]
struct KindEntry {
    key: KindKey,
    max_quantity: u32,
}

/// Kind registry: key lookup, stack construction, and substitution groups.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: Vec<KindDef>,
    by_key: HashMap<KindKey, KindId>,
    groups: BTreeMap<String, BTreeSet<KindId>>,
}

impl KindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON document.
    ///
    /// ```json
    /// {
    ///   "kinds": [{ "key": "stockpile:oak_wood", "max_quantity": 999 }],
    ///   "groups": { "wood": ["stockpile:oak_wood"] }
    /// }
    /// ```
    pub fn load_from_str(content: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(content)?;

        let mut registry = Self::new();
        for entry in file.kinds {
            registry.register(entry.key, entry.max_quantity)?;
        }
        for (name, members) in file.groups {
            let mut ids = BTreeSet::new();
            for key in members {
                let id = registry
                    .id(&key)
                    .ok_or_else(|| RegistryError::UnknownGroupMember {
                        group: name.clone(),
                        key: key.clone(),
                    })?;
                ids.insert(id);
            }
            registry.groups.insert(name, ids);
        }

        tracing::debug!(
            kinds = registry.len(),
            groups = registry.groups.len(),
            "loaded kind registry"
        );
        Ok(registry)
    }

    /// Register a kind, assigning the next free id.
    pub fn register(&mut self, key: KindKey, max_quantity: u32) -> Result<KindId, RegistryError> {
        if self.by_key.contains_key(&key) {
            return Err(RegistryError::DuplicateKind(key));
        }
        // Ids start at 1; 0 is the empty sentinel.
        let id = KindId(self.kinds.len() as u32 + 1);
        self.by_key.insert(key.clone(), id);
        self.kinds.push(KindDef {
            id,
            key,
            max_quantity: max_quantity.max(1),
        });
        Ok(id)
    }

    /// Add `member` to the named substitution group, creating the group if needed.
    pub fn add_to_group(&mut self, group: &str, member: KindId) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(member);
    }

    /// Look up a kind id by key.
    pub fn id(&self, key: &KindKey) -> Option<KindId> {
        self.by_key.get(key).copied()
    }

    /// Look up a kind definition by id.
    pub fn get(&self, id: KindId) -> Option<&KindDef> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.kinds.get(index)
    }

    /// Build a stack of `quantity` units of the kind registered under `key`.
    pub fn stack(&self, key: &KindKey, quantity: u32) -> Option<ResourceStack> {
        let def = self.get(self.id(key)?)?;
        Some(ResourceStack::new(def.id, quantity, def.max_quantity))
    }

    /// Substitution groups by name.
    pub fn groups(&self) -> &BTreeMap<String, BTreeSet<KindId>> {
        &self.groups
    }

    /// All registered kinds in id order.
    pub fn kinds(&self) -> impl Iterator<Item = &KindDef> {
        self.kinds.iter()
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
