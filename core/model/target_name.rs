use serde_derive::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::sync::Arc;

/// The case-sensitive name of a target. Names are cheap to clone, so they are used everywhere a
/// target needs to be referenced: dependency edges, plans, events, and results.
///
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetName(Arc<str>);

impl TargetName {
    pub fn new<S>(name: S) -> Self
    where
        S: AsRef<str>,
    {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for TargetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TargetName {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&String> for TargetName {
    fn from(value: &String) -> Self {
        Self::new(value)
    }
}

impl From<&TargetName> for TargetName {
    fn from(value: &TargetName) -> Self {
        value.clone()
    }
}

impl AsRef<str> for TargetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TargetName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TargetName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for TargetName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
