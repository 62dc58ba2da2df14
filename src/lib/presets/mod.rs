//! Project descriptions written as code, branching on the build target and
//! the flags the same way a project file does with its `[[when]]` blocks

pub mod armorcore;
