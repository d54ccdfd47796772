#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::{
    error::Error,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use image::{ImageFormat, ImageResult, RgbImage};
use palettefy::{parse::parse_palette, DitherMode, ImagePipeline, Palette};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Restricts a source image to the colors in a given palette.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Options {
    /// Path to the source image.
    #[arg(short, long)]
    source: PathBuf,

    /// The palette, either as hex codes like "#0f380f, #306230, #8bac0f, #9bbc0f"
    /// or as @path/to/palette.txt to read the hex codes from a file.
    #[arg(short, long)]
    palette: String,

    /// Output file name. Defaults to the source file name affixed with "_p.png".
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dither mode: 0 for nearest color only, 1 for Floyd-Steinberg dithering.
    #[arg(short, long, default_value_t = 0)]
    dither: u32,

    /// Number of threads to use for remapping (0 uses all available threads).
    #[arg(short, long, default_value_t = 0)]
    threads: u8,

    /// Print how long each step takes.
    #[arg(long)]
    verbose: bool,
}

/// Loads the palette from `arg`, reading it from a file if it starts with '@'.
fn load_palette(arg: &str) -> Result<Palette, Box<dyn Error>> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => arg.to_owned(),
    };
    Ok(parse_palette(&text)?)
}

/// The source path up to the first '.' in its file name, followed by "_p.png".
fn default_output(source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();
    source.with_file_name(format!("{stem}_p.png"))
}

/// Writes `image` to `path` as a PNG, regardless of the file extension.
fn save_png(image: &RgbImage, path: &Path) -> ImageResult<()> {
    image.save_with_format(path, ImageFormat::Png)
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let Options { source, palette, output, dither, threads, verbose } = options;

    macro_rules! log {
        ($name: literal, $val: expr) => {
            if verbose {
                let time = std::time::Instant::now();
                let value = $val;
                tracing::info!("{} took {}ms", $name, time.elapsed().as_millis());
                value
            } else {
                $val
            }
        };
    }

    let mode = DitherMode::from_code(dither)?;
    let palette = log!("parse palette", load_palette(&palette)?);
    let image = log!("read image", image::open(&source)?);

    let pipeline = {
        let mut pipeline = ImagePipeline::new(&image, &palette);
        pipeline.dither_mode(mode);
        pipeline
    };

    let quantized = log!(
        "quantization",
        match threads {
            1 => pipeline.quantized_rgbimage(),
            0 => pipeline.quantized_rgbimage_par(),
            t => rayon::ThreadPoolBuilder::new()
                .num_threads(t.into())
                .build()?
                .install(|| pipeline.quantized_rgbimage_par()),
        }
    );

    let output = output.unwrap_or_else(|| default_output(&source));
    log!("write image", save_png(&quantized, &output)?);
    tracing::debug!(output = %output.display(), "wrote image");

    Ok(())
}

fn main() -> ExitCode {
    let options = Options::parse();

    let level = if options.verbose { LevelFilter::INFO } else { LevelFilter::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(options) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_output_name() {
        assert_eq!(default_output(Path::new("dir/cat.tar.gz")), Path::new("dir/cat_p.png"));
        assert_eq!(default_output(Path::new("photo")), Path::new("photo_p.png"));
    }

    #[test]
    fn output_is_always_png() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(1, 1, image::Rgb([15, 56, 15]));

        let dir = std::env::temp_dir().join(format!("palettefy-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        for name in ["result", "result.jpg"] {
            let path = dir.join(name);
            save_png(&img, &path).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
            let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
            assert_eq!(decoded.into_rgb8(), img);
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
