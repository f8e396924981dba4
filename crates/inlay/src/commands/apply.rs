//! Transform registry sources for the configured project.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

use inlay_registry::{icons, BaseColor, Config};
use inlay_transform::{apply_prefixes_css, transform, TransformInput};

const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs"];

/// Run the apply command.
pub fn run(
    config_path: &Path,
    paths: &[PathBuf],
    out: &Path,
    colors: Option<&Path>,
    icon_table: Option<&Path>,
    remote: bool,
) -> Result<()> {
    let config = Config::load(config_path)?;

    let base_color = colors
        .map(|path| -> Result<BaseColor> {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(BaseColor::parse(&json)?)
        })
        .transpose()?;

    let icon_mappings = icon_table
        .map(|path| -> Result<icons::IconMappings> {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(icons::parse_mappings(&json)?)
        })
        .transpose()?;

    let files = collect_files(paths)?;
    if files.is_empty() {
        bail!("No source files found in the given paths");
    }

    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    // Files are independent; transform them in parallel. A failure in one
    // never touches another file's output.
    let results: Vec<(PathBuf, Result<()>)> = files
        .par_iter()
        .map(|(file, relative)| {
            let result = process_file(
                file,
                relative,
                out,
                &config,
                base_color.as_ref(),
                icon_mappings.as_ref(),
                remote,
            );
            (file.clone(), result)
        })
        .collect();

    let mut failed = 0usize;
    for (file, result) in &results {
        if let Err(error) = result {
            failed += 1;
            tracing::warn!("Failed to transform {}: {error:#}", file.display());
        }
    }

    let written = results.len() - failed;
    tracing::info!("Wrote {written} files to {}", out.display());

    if failed > 0 {
        bail!("{failed} of {} files failed to transform", results.len());
    }
    Ok(())
}

fn process_file(
    file: &Path,
    relative: &Path,
    out: &Path,
    config: &Config,
    base_color: Option<&BaseColor>,
    icon_mappings: Option<&icons::IconMappings>,
    remote: bool,
) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let filename = relative.to_string_lossy().replace('\\', "/");

    let output = if file.extension().and_then(|e| e.to_str()) == Some("css") {
        // Stylesheets only carry the prefix pass; there is no tree to walk.
        apply_prefixes_css(&raw, &config.tailwind.prefix)
    } else {
        let mut input = TransformInput::new(&filename, &raw, config);
        input.base_color = base_color;
        input.icons = icon_mappings;
        input.is_remote = remote;
        transform(input)?
    };

    let target = out.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&target, output)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::debug!("Wrote {}", target.display());
    Ok(())
}

/// Gather transformable files, keeping paths relative to their input root.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            let relative = PathBuf::from(path.file_name().context("Path has no file name")?);
            files.push((path.clone(), relative));
            continue;
        }
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            let extension = file.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !SOURCE_EXTENSIONS.contains(&extension) && extension != "css" {
                continue;
            }
            let relative = file.strip_prefix(path).unwrap_or(file).to_path_buf();
            files.push((file.to_path_buf(), relative));
        }
    }
    Ok(files)
}
