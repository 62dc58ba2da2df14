//! Loading of the project files, and their mapping to the project graph
//!
//! The work happens in three steps, so the flags are complete before any
//! descriptor reads them:
//! 1. [`load_config_tree`] parses the project file of the root and, recursively,
//! the ones of its sub-projects
//! 2. [`assemble_flags`] builds the [`FlagSet`] from the defaults declared on the
//! files plus the caller overrides
//! 3. [`build_graph`] builds one descriptor per file, evaluating the `[[when]]`
//! blocks against the build target and the flags
//!
//! Every string of a project file may contain placeholders, written as
//! `{name}`: `{root}` (directory of the file), `{system}` (`win32`, `linux`,
//! `macos`...), `{build}` (`debug` or `release`), `{platform}`, and the name of
//! any registered flag.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::{eyre::Context, Result};
use regex::Regex;

use crate::{
    config_file::{self, contents::ContentsAttribute, ArmoryConfigFile},
    domain::{
        error::{ProjectError, ProjectResult},
        flags::FlagSet,
        target::BuildTarget,
    },
    project_model::{ProjectDescriptor, ProjectGraph, ProjectId},
    utils::{
        self,
        constants::{error_messages, placeholders, PROJECT_FILE_NAME},
        fs::PathResolver,
    },
};

/// A parsed project file
#[derive(Debug)]
pub struct ConfigFile {
    pub dir: PathBuf,
    pub path: PathBuf,
    pub config: ArmoryConfigFile,
    /// Positions, on the owning [`ConfigTree`], of the sub-project files
    pub sub_projects: Vec<usize>,
}

/// Every project file reachable from the root one, which is always the first.
/// A file referenced from several places is only loaded once
#[derive(Debug, Default)]
pub struct ConfigTree {
    pub files: Vec<ConfigFile>,
}

impl ConfigTree {
    pub fn root(&self) -> Option<&ConfigFile> {
        self.files.first()
    }
}

/// Loads the project file found at `project_root` and the ones of all its
/// sub-projects
pub fn load_config_tree(project_root: &Path) -> Result<ConfigTree> {
    log::debug!("Searching for the project file at {project_root:?}");
    let mut tree = ConfigTree::default();
    let mut loaded = HashMap::new();

    load_config_file(project_root, &mut tree, &mut loaded)?;

    log::debug!("Loaded {} project file(s)", tree.files.len());
    Ok(tree)
}

fn load_config_file(
    dir: &Path,
    tree: &mut ConfigTree,
    loaded: &mut HashMap<PathBuf, usize>,
) -> Result<usize> {
    let dir = utils::fs::get_absolute_path(dir)
        .with_context(|| format!("{}: {dir:?}", error_messages::FAILURE_LOADING_SUB_PROJECT))?;
    if let Some(position) = loaded.get(&dir) {
        return Ok(*position);
    }

    let path = dir.join(PROJECT_FILE_NAME);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("{}: {path:?}", error_messages::READ_CFG_FILE))?;
    let config = config_file::armory_cfg_from_file(&raw)
        .with_context(|| format!("{}: {path:?}", error_messages::PARSE_CFG_FILE))?;

    log::debug!("Loaded the project file of '{}'", config.project.name);
    let sub_projects_dirs: Vec<PathBuf> = config
        .project
        .sub_projects
        .iter()
        .map(|sub| dir.join(sub))
        .collect();

    // Registered before visiting the sub-projects, so a file that ends up
    // referencing itself is not loaded again
    let position = tree.files.len();
    loaded.insert(dir.clone(), position);
    tree.files.push(ConfigFile {
        dir,
        path,
        config,
        sub_projects: Vec::with_capacity(sub_projects_dirs.len()),
    });

    for sub_dir in sub_projects_dirs {
        let sub_position = load_config_file(&sub_dir, tree, loaded)?;
        tree.files[position].sub_projects.push(sub_position);
    }

    Ok(position)
}

/// Builds the flags of the invocation. The root file declares the defaults,
/// sub-projects may register the flags it doesn't know about, and finally the
/// `overrides` (`name`, `value`) are applied
pub fn assemble_flags(tree: &ConfigTree, overrides: &[(String, String)]) -> Result<FlagSet> {
    let mut files = tree.files.iter();
    let mut flags = files
        .next()
        .map(|root| FlagSet::new(root.config.flags.clone()))
        .unwrap_or_default();

    for file in files {
        flags.merge_defaults(file.config.flags.clone());
    }

    for (name, value) in overrides {
        flags
            .override_from_str(name, value)
            .with_context(|| error_messages::FAILURE_ASSEMBLING_FLAGS)?;
    }

    Ok(flags)
}

/// Maps every file of the tree to a [`ProjectDescriptor`]. The returned id
/// is the one of the root project.
///
/// When the root file doesn't declare an icon, an `icon.png` on the
/// `working_dir` is used if there's one
pub fn build_graph(
    tree: &ConfigTree,
    target: &BuildTarget,
    flags: &FlagSet,
    working_dir: &Path,
    resolver: &PathResolver,
) -> Result<(ProjectGraph, ProjectId)> {
    let mut graph = ProjectGraph::new();
    let pattern = Placeholders::pattern()?;

    for file in &tree.files {
        let placeholders = Placeholders::new(&pattern, &file.dir, target, flags);
        let project = assemble_descriptor(file, target, flags, &placeholders, resolver)
            .with_context(|| {
                format!(
                    "{}: {:?}",
                    error_messages::FAILURE_BUILDING_DESCRIPTOR,
                    file.path
                )
            })?;
        graph.add(project);
    }

    for (position, file) in tree.files.iter().enumerate() {
        for sub_position in &file.sub_projects {
            graph.add_sub_project(ProjectId(position), ProjectId(*sub_position))?;
        }
    }

    let root = ProjectId(0);
    let root_project = graph.get_mut(root)?;
    if root_project.icon().is_none() {
        if let Some(icon) = utils::fs::find_icon(working_dir) {
            root_project.set_found_icon(icon)?;
        }
    }

    Ok((graph, root))
}

fn assemble_descriptor(
    file: &ConfigFile,
    target: &BuildTarget,
    flags: &FlagSet,
    placeholders: &Placeholders<'_>,
    resolver: &PathResolver,
) -> Result<ProjectDescriptor> {
    let project_attr = &file.config.project;

    let mut project = ProjectDescriptor::with_resolver(
        placeholders.expand(&project_attr.name)?,
        &file.dir,
        resolver.clone(),
    )?;

    if let Some(cpp_std) = project_attr.cpp_std {
        project.set_cpp_std(cpp_std);
    }
    if let Some(ref debug_dir) = project_attr.debug_dir {
        project.set_debug_dir(placeholders.expand(debug_dir)?)?;
    }
    if let Some(ref icon) = project_attr.icon {
        project.set_icon(placeholders.expand(icon)?)?;
    }

    add_contents(&mut project, &file.config.contents, placeholders)?;

    for (index, when) in file.config.when.iter().enumerate() {
        if when.applies_to(target, flags)? {
            log::debug!(
                "[{}] Applying the conditional block #{index} for {target}",
                project.name()
            );
            add_contents(&mut project, &when.contents, placeholders)?;
        }
    }

    Ok(project)
}

fn add_contents(
    project: &mut ProjectDescriptor,
    contents: &ContentsAttribute,
    placeholders: &Placeholders<'_>,
) -> ProjectResult<()> {
    for source in &contents.sources {
        project.add_source(placeholders.expand(source)?)?;
    }
    for dir in &contents.source_dirs {
        project.add_sources_dir(placeholders.expand(dir)?)?;
    }
    for include_dir in &contents.include_dirs {
        project.add_include_dir(placeholders.expand(include_dir)?)?;
    }
    for library in &contents.libraries {
        project.add_library(placeholders.expand(library)?);
    }
    for define in &contents.defines {
        project.add_define(placeholders.expand(define)?);
    }
    for asset in &contents.assets {
        project.add_asset(placeholders.expand(asset)?)?;
    }
    for pattern in &contents.asset_globs {
        project.add_asset_glob(placeholders.expand(pattern)?)?;
    }
    for shader in &contents.shaders {
        project.add_shader(placeholders.expand(shader)?)?;
    }
    Ok(())
}

/// Expands the `{name}` placeholders of the strings of one project file
pub struct Placeholders<'a> {
    pattern: &'a Regex,
    root: String,
    target: &'a BuildTarget,
    flags: &'a FlagSet,
}

impl<'a> Placeholders<'a> {
    /// The `{name}` matcher, shared by every project file of a graph
    pub fn pattern() -> Result<Regex> {
        Ok(Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}")?)
    }

    pub fn new(
        pattern: &'a Regex,
        root: &Path,
        target: &'a BuildTarget,
        flags: &'a FlagSet,
    ) -> Self {
        Self {
            pattern,
            root: root.to_string_lossy().replace('\\', "/"),
            target,
            flags,
        }
    }

    pub fn expand(&self, raw: &str) -> ProjectResult<String> {
        let mut expanded = String::with_capacity(raw.len());
        let mut last = 0;

        for captures in self.pattern.captures_iter(raw) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            expanded.push_str(&raw[last..whole.start()]);
            expanded.push_str(&self.value_of(name.as_str())?);
            last = whole.end();
        }
        expanded.push_str(&raw[last..]);

        Ok(expanded)
    }

    fn value_of(&self, name: &str) -> ProjectResult<Cow<'_, str>> {
        Ok(match name {
            placeholders::ROOT => Cow::Borrowed(self.root.as_str()),
            placeholders::SYSTEM => Cow::Borrowed(self.target.platform.system_name()),
            placeholders::BUILD => Cow::Borrowed(self.target.mode.as_ref()),
            placeholders::PLATFORM => Cow::Borrowed(self.target.platform.as_ref()),
            flag if self.flags.contains(flag) => Cow::Owned(self.flags.get(flag)?.to_string()),
            unknown => return Err(ProjectError::UnknownPlaceholder(unknown.to_owned())),
        })
    }
}
