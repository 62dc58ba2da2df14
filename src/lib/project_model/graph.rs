use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{ProjectError, ProjectResult};

use super::descriptor::ProjectDescriptor;

/// Strong type for the handles that a [`ProjectGraph`] gives out
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Copy, Clone)]
pub struct ProjectId(pub usize);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every descriptor of one build invocation. Descriptors refer to their
/// sub-projects through [`ProjectId`]s, so a library can be shared by many
/// projects of the same graph
#[derive(Debug, Default)]
pub struct ProjectGraph {
    projects: Vec<ProjectDescriptor>,
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, project: ProjectDescriptor) -> ProjectId {
        self.projects.push(project);
        ProjectId(self.projects.len() - 1)
    }

    pub fn get(&self, id: ProjectId) -> ProjectResult<&ProjectDescriptor> {
        self.projects
            .get(id.0)
            .ok_or(ProjectError::UnknownProject(id.0))
    }

    pub fn get_mut(&mut self, id: ProjectId) -> ProjectResult<&mut ProjectDescriptor> {
        self.projects
            .get_mut(id.0)
            .ok_or(ProjectError::UnknownProject(id.0))
    }

    /// Makes `child` a sub-project of `parent`
    pub fn add_sub_project(&mut self, parent: ProjectId, child: ProjectId) -> ProjectResult<()> {
        self.get(child)?;
        self.get_mut(parent)?.add_sub_project(child);
        Ok(())
    }

    /// Looks up a project by its name. The first one registered wins
    pub fn find(&self, name: &str) -> Option<ProjectId> {
        self.projects
            .iter()
            .position(|p| p.name() == name)
            .map(ProjectId)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
