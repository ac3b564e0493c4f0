use std::path::{Path, PathBuf};
use std::process::Command;

use starknet_deploy_types::artifact::{ArtifactKind, CompiledArtifactPair};

use crate::error::DeployerError;

/// Runs the Cairo toolchain out of process and locates the artifacts it emits.
#[derive(Debug, Clone)]
pub struct ContractCompiler {
    compiler: String,
    target_dir: PathBuf,
}

impl ContractCompiler {
    pub fn new(compiler: impl Into<String>, target_dir: impl Into<PathBuf>) -> Self {
        Self { compiler: compiler.into(), target_dir: target_dir.into() }
    }

    /// Cleans and builds the project at `contract_dir`, then loads the artifacts of
    /// `contract_name`.
    pub fn compile(&self, contract_dir: &Path, contract_name: &str) -> Result<CompiledArtifactPair, DeployerError> {
        log::info!("Compiling {} in {}", contract_name, contract_dir.display());
        self.run(contract_dir, "clean")?;
        self.run(contract_dir, "build")?;
        log::info!("Compilation of {} succeeded", contract_name);

        self.load_artifacts(contract_dir, contract_name)
    }

    /// Loads previously built artifacts without invoking the compiler.
    pub fn load_artifacts(
        &self,
        contract_dir: &Path,
        contract_name: &str,
    ) -> Result<CompiledArtifactPair, DeployerError> {
        let artifacts_dir = contract_dir.join(&self.target_dir);
        let casm_path = find_artifact(&artifacts_dir, ArtifactKind::Casm, contract_name)?;
        let sierra_path = find_artifact(&artifacts_dir, ArtifactKind::Sierra, contract_name)?;
        log::debug!("CASM artifact: {}", casm_path.display());
        log::debug!("Sierra artifact: {}", sierra_path.display());

        Ok(CompiledArtifactPair::from_files(casm_path, sierra_path)?)
    }

    fn run(&self, contract_dir: &Path, subcommand: &str) -> Result<(), DeployerError> {
        log::debug!("Running `{} {}`", self.compiler, subcommand);
        let output = Command::new(&self.compiler).arg(subcommand).current_dir(contract_dir).output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            log::debug!("{}", stdout.trim_end());
        }

        if !output.status.success() {
            log::error!("`{} {}` failed: {}", self.compiler, subcommand, stderr.trim_end());
            return Err(DeployerError::CompilationFailed {
                contract_dir: contract_dir.to_path_buf(),
                status: output.status.to_string(),
                stderr: stderr.into_owned(),
            });
        }
        if !stderr.trim().is_empty() {
            log::warn!("{}", stderr.trim_end());
        }

        Ok(())
    }
}

/// Finds `<name>.<suffix>` or `<package>_<name>.<suffix>` in `dir`.
fn find_artifact(dir: &Path, kind: ArtifactKind, contract_name: &str) -> Result<PathBuf, DeployerError> {
    let file_name = kind.file_suffix(contract_name);
    let not_found = || DeployerError::ArtifactNotFound { path: dir.join(&file_name) };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(e.into()),
    };

    let package_suffix = format!("_{file_name}");
    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name == file_name || name.ends_with(&package_suffix) {
            candidates.push(path);
        }
    }
    candidates.sort();

    if candidates.len() > 1 {
        log::warn!("Several {} artifacts match {}, using {}", kind, contract_name, candidates[0].display());
    }
    candidates.into_iter().next().ok_or_else(not_found)
}
