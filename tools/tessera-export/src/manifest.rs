//! Manifest parsing and build orchestration
//!
//! Parses assets.toml and exports every listed mesh. Relative source
//! paths are resolved against the manifest's directory.

use anyhow::{Context, Result};
use hashbrown::HashMap;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tessera_shared::{MeshDatas, MeshRecord, safe_mesh_name};

use crate::config::{ConfigOverrides, ExportConfig, WeldStrategy};
use crate::formats::{extension, write_mesh, write_mesh_datas};
use crate::input::{load_skin_source, load_source_mesh};
use crate::pipeline::export_mesh;

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub meshes: BTreeMap<String, MeshEntry>,

    /// Directory relative source paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// One file per mesh, or a single `meshes.<ext>` container
    #[serde(default = "default_per_file")]
    pub per_file: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            per_file: default_per_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("assets/")
}

fn default_per_file() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MeshEntry {
    Simple(PathBuf),
    Detailed {
        path: PathBuf,
        #[serde(default)]
        skin: Option<PathBuf>,
        #[serde(default)]
        strategy: Option<WeldStrategy>,
        #[serde(default)]
        tangents: Option<bool>,
    },
}

impl MeshEntry {
    pub fn path(&self) -> &Path {
        match self {
            MeshEntry::Simple(p) => p,
            MeshEntry::Detailed { path, .. } => path,
        }
    }

    pub fn skin(&self) -> Option<&Path> {
        match self {
            MeshEntry::Simple(_) => None,
            MeshEntry::Detailed { skin, .. } => skin.as_deref(),
        }
    }

    /// Per-mesh settings that replace the `[export]` table
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            MeshEntry::Simple(_) => ConfigOverrides::default(),
            MeshEntry::Detailed {
                strategy, tangents, ..
            } => ConfigOverrides {
                strategy: *strategy,
                tangents: *tangents,
                minimize: None,
            },
        }
    }
}

impl Manifest {
    /// Resolve a manifest-relative path
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let mut manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(manifest)
}

/// Validate a manifest without building
pub fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.output.per_file {
        check_output_names(manifest)?;
    }

    // Check that all source files exist
    for (name, entry) in &manifest.meshes {
        let path = manifest.resolve(entry.path());
        if !path.exists() {
            anyhow::bail!("Mesh '{}' source not found: {:?}", name, path);
        }
        if let Some(skin) = entry.skin() {
            let skin = manifest.resolve(skin);
            if !skin.exists() {
                anyhow::bail!("Mesh '{}' skin not found: {:?}", name, skin);
            }
        }
    }
    Ok(())
}

/// Per-file output names must stay distinct after sanitizing, or one mesh
/// would overwrite another (`"rock.low"` and `rock_low` both become
/// `mesh_rock_low`).
pub fn check_output_names(manifest: &Manifest) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(manifest.meshes.len());
    for name in manifest.meshes.keys() {
        let file_name = safe_mesh_name(name);
        if let Some(other) = seen.insert(file_name.clone(), name) {
            anyhow::bail!(
                "Meshes '{}' and '{}' both write to mesh_{}",
                other,
                name,
                file_name
            );
        }
    }
    Ok(())
}

/// Summary of a finished build
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub warnings: usize,
}

/// Build all meshes from a manifest
///
/// `overrides` come from the command line and win over both the
/// `[export]` table and per-mesh settings.
pub fn build_all(
    manifest: &Manifest,
    output_override: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<BuildReport> {
    if manifest.output.per_file {
        check_output_names(manifest)?;
    }

    let output_dir = match output_override {
        Some(dir) => dir.to_path_buf(),
        None => manifest.resolve(&manifest.output.dir),
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let run_config = manifest.export.with_overrides(overrides);

    let entries: Vec<_> = manifest.meshes.iter().collect();
    let exported: Vec<(String, MeshRecord, usize)> = entries
        .into_par_iter()
        .map(|(name, entry)| {
            let config = manifest
                .export
                .with_overrides(&entry.overrides())
                .with_overrides(overrides);
            let (record, warnings) = export_entry(manifest, name, entry, &config)?;
            Ok((name.clone(), record, warnings))
        })
        .collect::<Result<_>>()?;

    let ext = extension(run_config.minimize);
    let mut report = BuildReport {
        written: Vec::new(),
        warnings: exported.iter().map(|(_, _, w)| w).sum(),
    };

    if manifest.output.per_file {
        for (name, record, _) in &exported {
            let output = output_dir.join(format!("mesh_{}.{}", safe_mesh_name(name), ext));
            write_record_file(&output, record, run_config.minimize)?;
            report.written.push(output);
        }
    } else {
        let output = output_dir.join(format!("meshes.{}", ext));
        let datas = MeshDatas {
            mesh_datas: exported.into_iter().map(|(_, record, _)| record).collect(),
        };
        let mut file = std::fs::File::create(&output)
            .with_context(|| format!("Failed to create output file: {:?}", output))?;
        write_mesh_datas(&mut file, &datas, run_config.minimize)?;
        tracing::info!("Wrote {} meshes to {:?}", datas.mesh_datas.len(), output);
        report.written.push(output);
    }

    Ok(report)
}

fn export_entry(
    manifest: &Manifest,
    name: &str,
    entry: &MeshEntry,
    config: &ExportConfig,
) -> Result<(MeshRecord, usize)> {
    let mesh = load_source_mesh(&manifest.resolve(entry.path()))?;
    let skin = entry
        .skin()
        .map(|path| load_skin_source(&manifest.resolve(path)))
        .transpose()?;

    let export = export_mesh(&mesh, skin.as_ref(), config)
        .with_context(|| format!("Failed to export mesh '{}'", name))?;
    Ok((export.record, export.warnings.len()))
}

/// Write one record to `path` in the format selected by `minimize`
pub fn write_record_file(path: &Path, record: &MeshRecord, minimize: bool) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    write_mesh(&mut file, record, minimize)?;
    tracing::info!("Wrote mesh '{}' to {:?}", record.name, path);
    Ok(())
}
