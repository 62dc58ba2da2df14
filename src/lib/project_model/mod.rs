pub mod compiler;
pub mod descriptor;
pub mod flatten;
pub mod graph;
pub mod sourceset;

pub use self::{
    descriptor::ProjectDescriptor,
    flatten::{flatten, FlatProjectDescriptor},
    graph::{ProjectGraph, ProjectId},
};
