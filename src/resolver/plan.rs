//! Install plans and the build variables attached to each entry.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// One `name=path` binding pointing a build at a dependency's checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVar {
    pub name: String,
    pub path: PathBuf,
}

impl fmt::Display for BuildVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.path.display())
    }
}

/// Bindings for every direct dependency of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildVars(Vec<BuildVar>);

impl BuildVars {
    pub fn new(vars: Vec<BuildVar>) -> Self {
        Self(vars)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildVar> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `-D<name>=<path>` arguments for the configure step.
    pub fn cmake_defines(&self) -> Vec<String> {
        self.0.iter().map(|var| format!("-D{}", var)).collect()
    }

    /// The bindings as environment variables.
    pub fn to_env(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|var| (var.name.clone(), var.path.display().to_string()))
            .collect()
    }
}

impl fmt::Display for BuildVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, var) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", var)?;
        }
        Ok(())
    }
}

/// An element to build and the bindings it is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub element: String,
    pub build_vars: BuildVars,
}

/// Build order: dependencies first, the requested element last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    entries: Vec<PlanEntry>,
}

impl InstallPlan {
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Element names in build order.
    pub fn elements(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.element.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for InstallPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            write!(f, "{}. {}", i + 1, entry.element)?;
            if !entry.build_vars.is_empty() {
                write!(f, " ({})", entry.build_vars)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a InstallPlan {
    type Item = &'a PlanEntry;
    type IntoIter = std::slice::Iter<'a, PlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
