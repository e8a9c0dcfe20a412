use super::*;
use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::*;

#[derive(Default, Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum TargetKind {
    /// A regular target, with a body of tasks.
    #[default]
    Target,

    /// A named hook with no body that exists purely to be depended upon. Other targets attach
    /// themselves to it with `extension_of`.
    ExtensionPoint,
}

/// What to do when a target extends an extension point that was never declared.
///
#[derive(
    Default, Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OnMissingExtensionPoint {
    #[default]
    Fail,
    Warn,
    Ignore,
}

#[derive(Error, Debug)]
pub enum OnMissingExtensionPointError {
    #[error("Unknown onMissingExtensionPoint {0}. Valid values are: fail, warn, and ignore.")]
    Invalid(String),
}

impl FromStr for OnMissingExtensionPoint {
    type Err = OnMissingExtensionPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(Self::Fail),
            "warn" => Ok(Self::Warn),
            "ignore" => Ok(Self::Ignore),
            _ => Err(OnMissingExtensionPointError::Invalid(s.into())),
        }
    }
}

impl std::fmt::Display for OnMissingExtensionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Fail => "fail",
            Self::Warn => "warn",
            Self::Ignore => "ignore",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionOf {
    pub point: TargetName,
    pub on_missing: OnMissingExtensionPoint,
}

/// A named unit of work.
///
/// A target has an ordered list of dependencies (by name), an optional `if`/`unless` guard, and an
/// ordered body of tasks. Declaration order of the dependencies matters: it is the tie-break used
/// when resolving an execution order.
///
#[derive(Debug)]
pub struct Target {
    name: TargetName,
    kind: TargetKind,
    description: Option<String>,
    depends_on: Vec<TargetName>,
    guard: Guard,
    extension_of: Option<ExtensionOf>,
    body: Vec<Box<dyn TaskDescriptor>>,
}

impl Target {
    pub fn builder<N>(name: N) -> TargetBuilder
    where
        N: Into<TargetName>,
    {
        TargetBuilder::new(name)
    }

    pub fn name(&self) -> &TargetName {
        &self.name
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn is_extension_point(&self) -> bool {
        self.kind == TargetKind::ExtensionPoint
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn depends_on(&self) -> &[TargetName] {
        &self.depends_on
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn extension_of(&self) -> Option<&ExtensionOf> {
        self.extension_of.as_ref()
    }

    pub fn body(&self) -> &[Box<dyn TaskDescriptor>] {
        &self.body
    }

    pub(crate) fn add_dependency(&mut self, dep: TargetName) {
        if !self.depends_on.contains(&dep) {
            self.depends_on.push(dep);
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name.as_str())
    }
}

#[derive(Debug)]
pub struct TargetBuilder {
    target: Target,
}

impl TargetBuilder {
    fn new<N>(name: N) -> Self
    where
        N: Into<TargetName>,
    {
        Self {
            target: Target {
                name: name.into(),
                kind: TargetKind::Target,
                description: None,
                depends_on: vec![],
                guard: Guard::default(),
                extension_of: None,
                body: vec![],
            },
        }
    }

    pub fn kind(mut self, kind: TargetKind) -> Self {
        self.target.kind = kind;
        self
    }

    pub fn description<S>(mut self, description: S) -> Self
    where
        S: Into<String>,
    {
        self.target.description = Some(description.into());
        self
    }

    pub fn depends_on<I, N>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<TargetName>,
    {
        for dep in deps {
            self.target.add_dependency(dep.into());
        }
        self
    }

    pub fn if_condition<P>(mut self, property: P) -> Self
    where
        P: Into<PropertyRef>,
    {
        self.target.guard.if_condition = Some(property.into());
        self
    }

    pub fn unless_condition<P>(mut self, property: P) -> Self
    where
        P: Into<PropertyRef>,
    {
        self.target.guard.unless_condition = Some(property.into());
        self
    }

    pub fn extension_of<N>(mut self, point: N, on_missing: OnMissingExtensionPoint) -> Self
    where
        N: Into<TargetName>,
    {
        self.target.extension_of = Some(ExtensionOf {
            point: point.into(),
            on_missing,
        });
        self
    }

    pub fn task<T>(self, task: T) -> Self
    where
        T: TaskDescriptor + 'static,
    {
        self.boxed_task(Box::new(task))
    }

    pub fn boxed_task(mut self, task: Box<dyn TaskDescriptor>) -> Self {
        self.target.body.push(task);
        self
    }

    pub fn build(self) -> Target {
        self.target
    }
}

impl From<TargetBuilder> for Target {
    fn from(builder: TargetBuilder) -> Self {
        builder.build()
    }
}
