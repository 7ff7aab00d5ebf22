//! Dependency resolution.
//!
//! The resolver walks an element's dependencies breadth-first, fetching
//! each one as it is discovered (manifests only exist after a clone), and
//! accumulates a pending list of names. A name that is discovered again is
//! *promoted*: moved to the end of the pending list together with the
//! dependencies already known for it. Reversing root-plus-pending yields a
//! plan where every element builds after everything it depends on.
//!
//! Each element is fetched and expanded at most once, so the walk ends for
//! any finite graph, cycles included.

pub mod manifest;
pub mod plan;

pub use manifest::{parse_manifest, read_manifest, MANIFEST_FILE};
pub use plan::{BuildVar, BuildVars, InstallPlan, PlanEntry};

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::{ElementsError, Result};

/// What fetching an element did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched {
    /// A fresh checkout now exists and must be built.
    Cloned,
    /// The element was already on disk and is left alone.
    AlreadyPresent,
}

/// Brings elements onto disk while a plan is being resolved.
pub trait ElementFetcher {
    fn fetch(&mut self, element: &str) -> Result<Fetched>;

    /// Called once per expanded element with its declared dependencies.
    fn dependencies_found(&mut self, _element: &str, _dependencies: &[String]) {}
}

/// Computes install plans against one catalog and source root.
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    source_root: &'a Path,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog, source_root: &'a Path) -> Self {
        Self {
            catalog,
            source_root,
        }
    }

    /// Declared dependencies of `element`.
    ///
    /// The catalog's list wins when it has one; otherwise the manifest in
    /// the element's checkout is read, and a missing checkout or manifest
    /// means no dependencies.
    pub fn dependencies_of(&self, element: &str) -> Result<Vec<String>> {
        let entry = self
            .catalog
            .get(element)
            .ok_or_else(|| ElementsError::ElementNotFound {
                element: element.to_string(),
            })?;

        match &entry.dependencies {
            Some(deps) => Ok(parse_manifest(&deps.join(" "))),
            None => read_manifest(&self.source_root.join(element)),
        }
    }

    /// Bindings for a list of direct dependencies of `element`.
    pub fn build_vars(&self, element: &str, dependencies: &[String]) -> BuildVars {
        BuildVars::new(
            dependencies
                .iter()
                .filter(|dep| dep.as_str() != element)
                .map(|dep| BuildVar {
                    name: dep.clone(),
                    path: self.source_root.join(dep),
                })
                .collect(),
        )
    }

    /// Resolve the plan for `root`, which must already be fetched.
    pub fn resolve(&self, root: &str, fetcher: &mut dyn ElementFetcher) -> Result<InstallPlan> {
        let mut walk = Walk::new(root);

        let root_deps = self.dependencies_of(root)?;
        tracing::debug!("{} depends on {:?}", root, root_deps);
        fetcher.dependencies_found(root, &root_deps);
        walk.expand(root, root_deps);

        while let Some(next) = walk.next_unvisited() {
            walk.visited.insert(next.clone());
            if !self.catalog.contains(&next) {
                return Err(ElementsError::ElementNotFound { element: next });
            }

            match fetcher.fetch(&next)? {
                Fetched::AlreadyPresent => {
                    tracing::debug!("{} already present, not rebuilding", next);
                }
                Fetched::Cloned => {
                    let deps = self.dependencies_of(&next)?;
                    tracing::debug!("{} depends on {:?}", next, deps);
                    fetcher.dependencies_found(&next, &deps);
                    walk.expand(&next, deps);
                }
            }
        }

        let mut entries: Vec<PlanEntry> = std::iter::once(root)
            .chain(
                walk.pending
                    .iter()
                    .map(String::as_str)
                    .filter(|name| walk.expanded.contains_key(*name)),
            )
            .map(|name| PlanEntry {
                element: name.to_string(),
                build_vars: self.build_vars(name, &walk.expanded[name]),
            })
            .collect();
        entries.reverse();

        Ok(InstallPlan::new(entries))
    }
}

/// Mutable state of one resolution.
struct Walk<'r> {
    root: &'r str,
    /// Discovered names, most recently discovered last.
    pending: Vec<String>,
    visited: HashSet<String>,
    /// Dependencies of every expanded element, root included.
    expanded: HashMap<String, Vec<String>>,
}

impl<'r> Walk<'r> {
    fn new(root: &'r str) -> Self {
        let mut visited = HashSet::new();
        visited.insert(root.to_string());
        Self {
            root,
            pending: Vec::new(),
            visited,
            expanded: HashMap::new(),
        }
    }

    fn next_unvisited(&self) -> Option<String> {
        self.pending
            .iter()
            .find(|name| !self.visited.contains(*name))
            .cloned()
    }

    fn expand(&mut self, element: &str, dependencies: Vec<String>) {
        self.expanded
            .insert(element.to_string(), dependencies.clone());
        for dep in &dependencies {
            if dep != self.root && dep != element {
                self.promote(dep);
            }
        }
    }

    /// Move `name` and its known dependencies to the end of `pending`.
    fn promote(&mut self, name: &str) {
        let block = self.closure(name);
        self.pending.retain(|n| !block.contains(n));
        self.pending.extend(block);
    }

    /// `name` followed by its known transitive dependencies, each placed
    /// after everything in the block that depends on it.
    fn closure(&self, name: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        self.post_order(name, &mut seen, &mut order);
        order.reverse();
        order
    }

    fn post_order(&self, name: &str, seen: &mut HashSet<String>, order: &mut Vec<String>) {
        if name == self.root || !seen.insert(name.to_string()) {
            return;
        }
        if let Some(deps) = self.expanded.get(name) {
            for dep in deps {
                self.post_order(dep, seen, order);
            }
        }
        order.push(name.to_string());
    }
}
