use serde_derive::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A reference to a property by name, as used by the `if` and `unless` guards of a target.
///
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRef(String);

impl PropertyRef {
    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PropertyRef {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Read-only access to a snapshot of properties.
///
/// The engine only ever reads through this trait, and only to evaluate guards. Whoever owns the
/// properties is free to change them between runs.
///
pub trait PropertyResolver {
    fn resolve(&self, property: &PropertyRef) -> Option<String>;
}

impl PropertyResolver for HashMap<String, String> {
    fn resolve(&self, property: &PropertyRef) -> Option<String> {
        self.get(property.name()).cloned()
    }
}

impl PropertyResolver for BTreeMap<String, String> {
    fn resolve(&self, property: &PropertyRef) -> Option<String> {
        self.get(property.name()).cloned()
    }
}

/// An ordered property snapshot.
///
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into())
    }

    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertyResolver for Properties {
    fn resolve(&self, property: &PropertyRef) -> Option<String> {
        self.values.get(property.name()).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut props = Properties::new();
        props.extend(iter);
        props
    }
}

impl<K, V> Extend<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

/// Interprets a property value as a condition.
///
/// A missing property is false, and so are `false`, `off` and `no` in any casing. Any other value,
/// including the empty string, counts as set.
///
pub fn is_truthy(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "off" | "no"),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Run,

    /// The `if` property was not set.
    SkipIf(PropertyRef),

    /// The `unless` property was set.
    SkipUnless(PropertyRef),
}

impl GuardDecision {
    pub fn should_run(&self) -> bool {
        matches!(self, GuardDecision::Run)
    }

    /// The message to log when a target is skipped because of this decision.
    pub fn reason(&self) -> Option<String> {
        match self {
            GuardDecision::Run => None,
            GuardDecision::SkipIf(p) => Some(format!("Skipped because property '{p}' not set.")),
            GuardDecision::SkipUnless(p) => Some(format!("Skipped because property '{p}' set.")),
        }
    }
}

/// The `if`/`unless` pair attached to a target.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Guard {
    pub if_condition: Option<PropertyRef>,
    pub unless_condition: Option<PropertyRef>,
}

impl Guard {
    pub fn is_empty(&self) -> bool {
        self.if_condition.is_none() && self.unless_condition.is_none()
    }

    #[tracing::instrument(name = "Guard::evaluate", skip(properties))]
    pub fn evaluate(&self, properties: &dyn PropertyResolver) -> GuardDecision {
        if let Some(prop) = &self.if_condition {
            if !is_truthy(properties.resolve(prop).as_deref()) {
                return GuardDecision::SkipIf(prop.clone());
            }
        }

        if let Some(prop) = &self.unless_condition {
            if is_truthy(properties.resolve(prop).as_deref()) {
                return GuardDecision::SkipUnless(prop.clone());
            }
        }

        GuardDecision::Run
    }
}
