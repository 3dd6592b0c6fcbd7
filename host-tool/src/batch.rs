use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::convert::{convert, ConversionReport, IconRequest};
use crate::error::ConvertError;

/// Overrides that only apply when a single image is converted
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub output: Option<PathBuf>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    /// 0 when at least one image converted, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.succeeded > 0 {
            0
        } else {
            1
        }
    }

    pub fn message(&self) -> String {
        let elapsed = Duration::from_millis(self.elapsed.as_millis() as u64);
        format!(
            "Done: {}/{} files converted in {}",
            self.succeeded,
            self.total,
            humantime::format_duration(elapsed)
        )
    }
}

/// Build one request per image; `-o`/`-n` are dropped for multi-image batches
pub fn build_requests(images: &[PathBuf], options: &BatchOptions) -> Vec<IconRequest> {
    let single = images.len() == 1;
    if !single && (options.output.is_some() || options.name.is_some()) {
        warn!(
            "--output and --name apply to a single image only; ignoring them for {} images",
            images.len()
        );
    }

    images
        .iter()
        .map(|path| {
            let request = IconRequest::new(path);
            if single {
                request
                    .with_output(options.output.clone())
                    .with_name(options.name.clone())
            } else {
                request
            }
        })
        .collect()
}

/// Convert every image in turn; a failing image never stops the rest
pub fn run_batch(images: &[PathBuf], options: &BatchOptions) -> BatchSummary {
    let start = Instant::now();
    let requests = build_requests(images, options);

    let pb = if requests.len() > 1 {
        let pb = ProgressBar::new(requests.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut succeeded = 0;
    for request in &requests {
        pb.set_message(request.input.display().to_string());

        match convert(request) {
            Ok(report) => {
                succeeded += 1;
                pb.suspend(|| print_report(&report));
            }
            Err(e) => {
                debug!("{:?} failed: {:?}", request.input, e);
                pb.suspend(|| eprintln!("{}", failure_message(&e)));
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    BatchSummary {
        succeeded,
        total: requests.len(),
        elapsed: start.elapsed(),
    }
}

/// The single operator-facing line for a failed image
fn failure_message(err: &ConvertError) -> String {
    format!("❌ {}", err)
}

fn print_report(report: &ConversionReport) {
    let file_name = report
        .output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    println!(
        "✅ Converted {} ({}x{})",
        report.input.display(),
        report.original_width,
        report.original_height
    );
    println!("   Output: {}", report.output.display());
    println!("   Array: {}", report.array_name);
    println!("   Size: {} bytes (32x32 RGB565)", report.byte_size);
    println!("   Usage:");
    println!("     #include \"{}\"", file_name);
    println!("     drawRGBBitmap(x, y, {}, 32, 32);", report.array_name);
}
