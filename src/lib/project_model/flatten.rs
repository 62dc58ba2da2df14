//! Merges a graph of project descriptors into the single descriptor that the
//! toolchain emitters consume

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::Serialize;

use crate::domain::error::{ProjectError, ProjectResult};

use super::{
    compiler::CppStandard,
    descriptor::ProjectDescriptor,
    graph::{ProjectGraph, ProjectId},
};

/// The result of flattening a project graph. Every list is free of
/// duplicates, and keeps the position where each entry was first seen
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct FlatProjectDescriptor {
    pub name: String,
    pub sources: IndexSet<PathBuf>,
    pub include_dirs: IndexSet<PathBuf>,
    pub libraries: IndexSet<String>,
    pub defines: IndexSet<String>,
    pub assets: IndexSet<PathBuf>,
    pub shaders: IndexSet<PathBuf>,
    pub icon: Option<PathBuf>,
    pub cpp_std: Option<CppStandard>,
    pub debug_dir: Option<PathBuf>,
}

impl FlatProjectDescriptor {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            sources: IndexSet::new(),
            include_dirs: IndexSet::new(),
            libraries: IndexSet::new(),
            defines: IndexSet::new(),
            assets: IndexSet::new(),
            shaders: IndexSet::new(),
            icon: None,
            cpp_std: None,
            debug_dir: None,
        }
    }

    fn append(&mut self, project: &ProjectDescriptor) {
        extend_paths(&mut self.sources, project.sources());
        extend_paths(&mut self.include_dirs, project.include_dirs());
        self.libraries.extend(project.libraries().iter().cloned());
        self.defines.extend(project.defines().iter().cloned());
        extend_paths(&mut self.assets, project.assets());
        extend_paths(&mut self.shaders, project.shaders());
        self.cpp_std = self.cpp_std.max(project.cpp_std());
    }
}

/// `IndexSet::extend` keeps the first position of an already present entry,
/// which is exactly the ordering wanted here
fn extend_paths(dst: &mut IndexSet<PathBuf>, paths: &[PathBuf]) {
    dst.extend(paths.iter().map(|p| crate::utils::fs::normalize(p)));
}

/// Flattens the graph reachable from `root`.
///
/// Sub-projects are visited depth first, in the order they were added, and
/// a project's own entries are appended after the ones of its sub-projects.
/// A sub-project shared by several projects is only visited once. If the
/// graph has a cycle the whole pass fails with
/// [`ProjectError::CyclicDependency`], and nothing is returned.
pub fn flatten(graph: &ProjectGraph, root: ProjectId) -> ProjectResult<FlatProjectDescriptor> {
    let root_project = graph.get(root)?;
    log::debug!("Flattening the project graph of '{}'", root_project.name());

    let mut walker = Walker {
        graph,
        visiting: Vec::new(),
        finished: HashSet::new(),
        flat: FlatProjectDescriptor::new(root_project.name()),
    };
    walker.visit(root)?;

    let mut flat = walker.flat;
    flat.icon = root_project.icon().map(Path::to_path_buf);
    flat.debug_dir = root_project.debug_dir().map(Path::to_path_buf);

    log::info!(
        "Flattened '{}': {} sources, {} libraries, {} defines, {} assets",
        flat.name,
        flat.sources.len(),
        flat.libraries.len(),
        flat.defines.len(),
        flat.assets.len()
    );

    Ok(flat)
}

struct Walker<'a> {
    graph: &'a ProjectGraph,
    visiting: Vec<ProjectId>,
    finished: HashSet<ProjectId>,
    flat: FlatProjectDescriptor,
}

impl<'a> Walker<'a> {
    fn visit(&mut self, id: ProjectId) -> ProjectResult<()> {
        if self.finished.contains(&id) {
            return Ok(());
        }
        if let Some(start) = self.visiting.iter().position(|v| *v == id) {
            return Err(self.cycle_error(start, id));
        }

        let graph = self.graph;
        let project = graph.get(id)?;
        self.visiting.push(id);
        for child in project.sub_projects() {
            self.visit(*child)?;
        }
        self.visiting.pop();

        log::debug!("Appending the entries of '{}'", project.name());
        self.flat.append(project);
        self.finished.insert(id);

        Ok(())
    }

    fn cycle_error(&self, start: usize, closing: ProjectId) -> ProjectError {
        let names = self.visiting[start..]
            .iter()
            .chain(std::iter::once(&closing))
            .map(|id| {
                self.graph
                    .get(*id)
                    .map(|p| p.name().to_owned())
                    .unwrap_or_else(|_| id.to_string())
            })
            .collect();
        ProjectError::CyclicDependency(names)
    }
}
