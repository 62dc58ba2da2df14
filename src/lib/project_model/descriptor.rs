use std::path::{Path, PathBuf};

use crate::domain::error::{PathError, ProjectError, ProjectResult};
use crate::utils::fs::PathResolver;

use super::{
    compiler::CppStandard,
    graph::ProjectId,
    sourceset::{GlobPattern, SourceDir},
};

/// Everything needed to compile and link one unit (an application or a
/// library) for one build target.
///
/// The entries are append only. Paths are resolved against the base
/// directory when they are added, so re-basing the descriptor later only
/// affects the entries added after it. Duplicates are allowed here, they
/// are dropped when the graph is flattened.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ProjectDescriptor {
    name: String,
    base_dir: PathBuf,
    resolver: PathResolver,
    sources: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    libraries: Vec<String>,
    defines: Vec<String>,
    assets: Vec<PathBuf>,
    shaders: Vec<PathBuf>,
    sub_projects: Vec<ProjectId>,
    icon: Option<PathBuf>,
    cpp_std: Option<CppStandard>,
    debug_dir: Option<PathBuf>,
}

impl ProjectDescriptor {
    /// Creates an empty descriptor rooted at `base_dir`, which must be an
    /// existing directory given as an absolute path
    pub fn new<P: AsRef<Path>>(name: impl Into<String>, base_dir: P) -> ProjectResult<Self> {
        Self::with_resolver(name, base_dir, PathResolver::new())
    }

    pub fn with_resolver<P: AsRef<Path>>(
        name: impl Into<String>,
        base_dir: P,
        resolver: PathResolver,
    ) -> ProjectResult<Self> {
        let base_dir = checked_base_dir(base_dir.as_ref())?;
        Ok(Self {
            name: name.into(),
            base_dir,
            resolver,
            sources: Vec::new(),
            include_dirs: Vec::new(),
            libraries: Vec::new(),
            defines: Vec::new(),
            assets: Vec::new(),
            shaders: Vec::new(),
            sub_projects: Vec::new(),
            icon: None,
            cpp_std: None,
            debug_dir: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn defines(&self) -> &[String] {
        &self.defines
    }

    pub fn assets(&self) -> &[PathBuf] {
        &self.assets
    }

    pub fn shaders(&self) -> &[PathBuf] {
        &self.shaders
    }

    pub fn sub_projects(&self) -> &[ProjectId] {
        &self.sub_projects
    }

    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    pub fn cpp_std(&self) -> Option<CppStandard> {
        self.cpp_std
    }

    pub fn debug_dir(&self) -> Option<&Path> {
        self.debug_dir.as_deref()
    }

    /// Moves the base directory. Already added entries keep their paths
    pub fn set_base_dir<P: AsRef<Path>>(&mut self, base_dir: P) -> ProjectResult<()> {
        let base_dir = if base_dir.as_ref().is_absolute() {
            base_dir.as_ref().to_path_buf()
        } else {
            self.base_dir.join(base_dir)
        };
        self.base_dir = checked_base_dir(&base_dir)?;
        Ok(())
    }

    pub fn add_source<P: AsRef<Path>>(&mut self, path: P) -> ProjectResult<()> {
        let resolved = self.resolve(path.as_ref())?;
        self.sources.push(resolved);
        Ok(())
    }

    /// Adds every source and header file found under `dir`. Returns how
    /// many files were added
    pub fn add_sources_dir<P: AsRef<Path>>(&mut self, dir: P) -> ProjectResult<usize> {
        let dir = self.resolve(dir.as_ref())?;
        let found = SourceDir(dir).resolve();
        let count = found.len();
        self.sources.extend(found);
        Ok(count)
    }

    pub fn add_include_dir<P: AsRef<Path>>(&mut self, path: P) -> ProjectResult<()> {
        let resolved = self.resolve(path.as_ref())?;
        self.include_dirs.push(resolved);
        Ok(())
    }

    /// Library entries are kept verbatim. A plain name (`winmm`), a path to
    /// an archive or a name carrying linker search flags
    /// (`v8_monolith -L/path/`) are all just strings for the emitter
    pub fn add_library(&mut self, name_or_path: impl Into<String>) {
        self.libraries.push(name_or_path.into());
    }

    pub fn add_define(&mut self, symbol: impl Into<String>) {
        self.defines.push(symbol.into());
    }

    pub fn add_asset<P: AsRef<Path>>(&mut self, path: P) -> ProjectResult<()> {
        let resolved = self.resolve(path.as_ref())?;
        self.assets.push(resolved);
        Ok(())
    }

    /// Expands `pattern` right now and adds the matches as assets.
    ///
    /// A pattern without matches is not an error, the asset list is left as
    /// it was and `Ok(0)` is returned
    pub fn add_asset_glob<P: AsRef<Path>>(&mut self, pattern: P) -> ProjectResult<usize> {
        // The sandbox check applies to the pattern as a whole
        self.resolve(pattern.as_ref())?;
        let pattern = GlobPattern::new(&self.base_dir, pattern.as_ref());
        let matches = pattern.resolve()?;

        if matches.is_empty() {
            log::info!("[{}] No assets matched {}", self.name, pattern.to_glob());
        }

        let count = matches.len();
        for asset in matches {
            let resolved = self.resolve(&asset)?;
            self.assets.push(resolved);
        }
        Ok(count)
    }

    pub fn add_shader<P: AsRef<Path>>(&mut self, path: P) -> ProjectResult<()> {
        let resolved = self.resolve(path.as_ref())?;
        self.shaders.push(resolved);
        Ok(())
    }

    /// Records a dependency on another descriptor of the same [`ProjectGraph`].
    /// Cycles aren't checked here but when the graph is flattened
    ///
    /// [`ProjectGraph`]: super::graph::ProjectGraph
    pub fn add_sub_project(&mut self, project: ProjectId) {
        self.sub_projects.push(project);
    }

    pub fn set_icon<P: AsRef<Path>>(&mut self, path: P) -> ProjectResult<()> {
        self.icon = Some(self.resolve(path.as_ref())?);
        Ok(())
    }

    /// Like [`Self::set_icon`], for an icon that was found rather than
    /// declared: one lying outside of the sandbox is skipped instead of
    /// failing. Returns whether the icon was taken
    pub fn set_found_icon<P: AsRef<Path>>(&mut self, path: P) -> ProjectResult<bool> {
        match self.set_icon(path.as_ref()) {
            Ok(()) => Ok(true),
            Err(ProjectError::Path(PathError::EscapesSandbox { path, root })) => {
                log::info!("[{}] Skipping the icon {path:?}, it lies outside of {root:?}", self.name);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn set_cpp_std(&mut self, level: CppStandard) {
        self.cpp_std = Some(level);
    }

    pub fn set_debug_dir<P: AsRef<Path>>(&mut self, path: P) -> ProjectResult<()> {
        self.debug_dir = Some(self.resolve(path.as_ref())?);
        Ok(())
    }

    fn resolve(&self, path: &Path) -> ProjectResult<PathBuf> {
        Ok(self.resolver.resolve(&self.base_dir, path)?)
    }
}

fn checked_base_dir(base_dir: &Path) -> Result<PathBuf, PathError> {
    if base_dir.as_os_str().is_empty() {
        return Err(PathError::Empty);
    }
    if !base_dir.is_absolute() {
        return Err(PathError::RelativeBaseDir(base_dir.to_path_buf()));
    }
    if !base_dir.is_dir() {
        return Err(PathError::MissingBaseDir(base_dir.to_path_buf()));
    }
    Ok(crate::utils::fs::normalize(base_dir))
}
