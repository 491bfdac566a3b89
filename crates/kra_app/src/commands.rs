use anyhow::{Context, Result, bail};
use humansize::{BINARY, format_size};
use kra_core::{ColorSpace, DecodeFlags, FileType, FormatRegistry};
use std::io::Write;
use std::path::{Path, PathBuf};

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn detect(files: &[impl AsRef<Path>], out: &mut impl Write) -> Result<()> {
    let registry = FormatRegistry::with_defaults();
    for path in files {
        let path = path.as_ref();
        let data = read_input(path)?;
        let file_type = registry.detect(&data).unwrap_or(FileType::Unknown);
        writeln!(out, "{}: {}", path.display(), file_type)?;
    }
    Ok(())
}

pub fn info(path: &Path, out: &mut impl Write) -> Result<()> {
    let registry = FormatRegistry::with_defaults();
    let data = read_input(path)?;

    let mut colorspace = ColorSpace::Unset;
    let Some(image) = registry.load(&data, DecodeFlags::HEADER_ONLY, &mut colorspace) else {
        bail!("{} is not a supported image", path.display());
    };

    writeln!(out, "File:        {}", path.display())?;
    writeln!(out, "Format:      {}", image.file_type)?;
    writeln!(out, "Size:        {}", format_size(data.len() as u64, BINARY))?;
    writeln!(out, "Dimensions:  {}x{}", image.width, image.height)?;
    writeln!(out, "Color space: {}", colorspace)?;
    Ok(())
}

/// Where `extract` writes when no output path is given.
pub fn default_output(input: &Path, file_type: FileType) -> PathBuf {
    input.with_extension(file_type.extension())
}

pub fn extract(path: &Path, output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let registry = FormatRegistry::with_defaults();
    let data = read_input(path)?;

    if registry.detect(&data) != Some(FileType::Kra) {
        bail!("{} is not a Krita document", path.display());
    }

    let mut colorspace = ColorSpace::Unset;
    let image = registry
        .load(&data, DecodeFlags::empty(), &mut colorspace)
        .with_context(|| format!("Failed to load the merged preview of {}", path.display()))?;
    let pixels = image
        .pixels
        .context("Decoder returned no pixels for the merged preview")?;

    let output = match output {
        Some(output) => output.to_path_buf(),
        None => default_output(path, FileType::Png),
    };
    let output = output.as_path();

    pixels
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        input = %path.display(),
        output = %output.display(),
        width = image.width,
        height = image.height,
        "extracted merged preview"
    );
    writeln!(
        out,
        "{} -> {} ({}x{})",
        path.display(),
        output.display(),
        image.width,
        image.height
    )?;
    Ok(())
}
