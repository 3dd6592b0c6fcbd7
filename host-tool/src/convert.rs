use icon_format::*;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// One image to convert, with optional overrides
#[derive(Debug, Clone)]
pub struct IconRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
}

/// Outcome of a successful conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub array_name: String,
    pub original_width: u32,
    pub original_height: u32,
    pub byte_size: usize,
}

impl IconRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            name: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Explicit name, or the input file stem normalized into an identifier
    pub fn resolve_symbol(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => {
                let stem = self
                    .input
                    .file_stem()
                    .map(|s| s.to_string_lossy())
                    .unwrap_or_default();
                symbol_base(&stem)
            }
        }
    }

    /// Explicit output path, or `file_name` next to the input image
    pub fn resolve_output(&self, file_name: &str) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        match self.input.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
            _ => PathBuf::from(file_name),
        }
    }
}

/// Fail early when the linked `image` build cannot read any format.
///
/// With `image`'s default features every common decoder is compiled in and
/// this never fails; it only trips for builds that disable all of them.
pub fn ensure_decoders() -> Result<(), ConvertError> {
    if ImageFormat::all().any(|format| format.reading_enabled()) {
        Ok(())
    } else {
        Err(ConvertError::MissingDependency)
    }
}

/// Decode an image file, guessing the format from its contents
pub fn decode_path(path: &Path) -> Result<DynamicImage, ConvertError> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    reader
        .decode()
        .map_err(|source| ConvertError::UnsupportedOrCorruptImage {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode an in-memory image
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage, ConvertError> {
    image::load_from_memory(bytes).map_err(|source| ConvertError::UnsupportedOrCorruptImage {
        path: PathBuf::from("<memory>"),
        source,
    })
}

/// Resize to 32×32 with Lanczos filtering and pack every pixel as RGB565
pub fn rasterize(img: &DynamicImage) -> Result<ColorBuffer, ConvertError> {
    let rgba = img.to_rgba8();
    let resized = imageops::resize(
        &rgba,
        ICON_WIDTH as u32,
        ICON_HEIGHT as u32,
        FilterType::Lanczos3,
    );

    Ok(ColorBuffer::from_rgba(resized.as_raw())?)
}

/// Build the header document for an already decoded image
pub fn build_document(img: &DynamicImage, symbol: &str) -> Result<HeaderDocument, ConvertError> {
    let (width, height) = img.dimensions();
    Ok(HeaderDocument::new(symbol, width, height, rasterize(img)?))
}

/// Convert one image into a header file on disk
pub fn convert(request: &IconRequest) -> Result<ConversionReport, ConvertError> {
    if !request.input.exists() {
        return Err(ConvertError::MissingInputFile(request.input.clone()));
    }

    let img = decode_path(&request.input)?;
    info!(
        "Resizing {:?} from {}x{} to {}x{}",
        request.input,
        img.width(),
        img.height(),
        ICON_WIDTH,
        ICON_HEIGHT
    );

    let symbol = request.resolve_symbol();
    let document = build_document(&img, &symbol)?;
    let output = request.resolve_output(&document.file_name());
    debug!("Symbol {:?}, output {:?}", symbol, output);

    write_atomic(&output, &document.render())?;

    Ok(ConversionReport {
        input: request.input.clone(),
        output,
        array_name: document.array_name(),
        original_width: img.width(),
        original_height: img.height(),
        byte_size: document.colors().len() * BYTES_PER_PIXEL,
    })
}

/// Write through a sibling temporary file so the target is never left half written
fn write_atomic(path: &Path, contents: &str) -> Result<(), ConvertError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(ConvertError::WriteFailure {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}
