use clap::{Args, Parser, Subcommand};
use imageset::assemble::{GenerationPlan, generate_archive};
use imageset::config::{self, Config, GenerationConfig};
use imageset::error::GenerateError;
use imageset::imaging::RustCodec;
use imageset::naming::{BaseName, base_name_from_path};
use imageset::output;
use imageset::package::ZipPackager;
use imageset::resize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "imageset")]
#[command(about = "Generate responsive image sets")]
#[command(long_about = "\
Generate responsive image sets

Takes one source image and produces a zip archive containing:

  name-420.jpeg  name-420.webp      # one pair per planned width
  name-960.jpeg  name-960.webp
  name-1920.jpeg name-1920.webp
  index.html                        # <picture> element with srcset sources
  styles.css                        # background-image rules per width

Widths come from a fixed ladder (420, 960, 1920) below --max-width.
Transparent sources should use --transparent to get a PNG fallback.

Run 'imageset gen-config' to generate a documented imageset.toml.")]
#[command(version)]
struct Cli {
    /// Config file (optional; stock defaults apply when missing)
    #[arg(long, default_value = "imageset.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Flags that override `[generation]` values from the config file.
#[derive(Args, Clone)]
struct GenerationArgs {
    /// Widest rendition in pixels
    #[arg(long)]
    max_width: Option<u32>,
    /// Output base name (ASCII letters, digits and '_')
    #[arg(long)]
    name: Option<String>,
    /// Use a PNG fallback instead of JPEG
    #[arg(long)]
    transparent: bool,
    /// Render only --max-width, no breakpoints
    #[arg(long)]
    single_size: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render an image set and write it as a zip archive
    Build {
        /// Source image (JPEG, PNG or WebP)
        image: PathBuf,
        /// Archive path (default: <name>.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        generation: GenerationArgs,
        /// Leave index.html out of the archive
        #[arg(long)]
        no_html: bool,
        /// Leave styles.css out of the archive
        #[arg(long)]
        no_css: bool,
        /// alt text for the generated <img>
        #[arg(long)]
        alt: Option<String>,
    },
    /// List the files a build would produce, without reading any image
    Plan {
        #[command(flatten)]
        generation: GenerationArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Resize one image to an exact width and height, keeping its format
    Resize {
        /// Source image (JPEG, PNG or WebP)
        image: PathBuf,
        /// Target width in pixels
        #[arg(long)]
        width: u32,
        /// Target height in pixels
        #[arg(long)]
        height: u32,
        /// Output path (default: resized_<filename> next to the source)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a stock imageset.toml with all options documented
    GenConfig,
}

impl GenerationArgs {
    fn apply(&self, config: &mut GenerationConfig) {
        if let Some(max_width) = self.max_width {
            config.max_width = max_width;
        }
        if self.transparent {
            config.transparent = true;
        }
        if self.single_size {
            config.responsive = false;
        }
    }

    /// Explicit names are validated strictly; derived ones are sanitized.
    fn base_name(&self, source: Option<&Path>) -> Result<BaseName, GenerateError> {
        match (&self.name, source) {
            (Some(name), _) => BaseName::new(name),
            (None, Some(path)) => Ok(base_name_from_path(path)),
            (None, None) => BaseName::new("image"),
        }
    }
}

#[derive(Serialize)]
struct PlanJson {
    widths: Vec<u32>,
    fallback: imageset::formats::OutputFormat,
    preferred: imageset::formats::OutputFormat,
    files: Vec<String>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<GenerateError>() {
                Some(ge) => eprintln!("{}: {}", ge.class().label(), ge),
                None => eprintln!("error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build {
            image,
            output,
            generation,
            no_html,
            no_css,
            alt,
        } => {
            let site: Config = config::load_config(&cli.config)?;
            let mut gen_config = site.generation;
            generation.apply(&mut gen_config);
            if no_html {
                gen_config.emit_html = false;
            }
            if no_css {
                gen_config.emit_css = false;
            }
            if let Some(alt) = alt {
                gen_config.alt_text = alt;
            }
            let base = generation.base_name(Some(image.as_path()))?;

            init_thread_pool(&site.processing);
            let source = std::fs::read(&image)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_render_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = generate_archive(
                &RustCodec::new(),
                &ZipPackager::new(),
                &source,
                &base,
                &gen_config,
                Some(&tx),
            );
            drop(tx);
            printer.join().ok();
            let (set, archive) = result?;

            let archive_path = output.unwrap_or_else(|| PathBuf::from(format!("{}.zip", base)));
            std::fs::write(&archive_path, &archive)?;
            output::print_build_summary(&set, &archive_path, archive.len());
        }
        Command::Plan { generation, json } => {
            let site = config::load_config(&cli.config)?;
            let mut gen_config = site.generation;
            generation.apply(&mut gen_config);
            let base = generation.base_name(None)?;
            let plan = GenerationPlan::from_config(&gen_config)?;

            if json {
                let out = PlanJson {
                    widths: plan.sizes.widths().to_vec(),
                    fallback: plan.formats.fallback(),
                    preferred: plan.formats.preferred(),
                    files: plan.filenames(&base),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                output::print_plan(&plan, &base);
            }
        }
        Command::Resize {
            image,
            width,
            height,
            output,
        } => {
            let site = config::load_config(&cli.config)?;
            let format = resize::format_for_path(&image)?;
            let source = std::fs::read(&image)?;
            let resized = resize::resize_image(
                &RustCodec::new(),
                &source,
                width,
                height,
                format,
                site.generation.quality,
            )?;

            let out_path = output.unwrap_or_else(|| resize::default_output_path(&image));
            std::fs::write(&out_path, &resized.bytes)?;
            output::print_resize_summary(&resized, &out_path);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
