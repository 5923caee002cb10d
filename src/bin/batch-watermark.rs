use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use batch_watermark::{annotate::DEFAULT_PROGRAM, ConvertAnnotator, WatermarkRunner, WatermarkStyle};

#[derive(Parser)]
#[command(
    name = "batch-watermark",
    about = "Stamp a text watermark onto every image in a directory",
    version,
    after_help = "Watermarked copies are written to <IMAGE_DIRECTORY>_watermarked.\n\
                  Requires ImageMagick (`convert`, or pass --program magick)."
)]
struct Cli {
    /// Directory containing .png, .jpg or .jpeg images
    image_directory: PathBuf,

    /// ImageMagick executable used to draw the watermark
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    program: String,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report failures
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            process::exit(code);
        }
    };

    init_tracing(&cli);

    let runner = WatermarkRunner::with_annotator(
        ConvertAnnotator::new(&cli.program),
        WatermarkStyle::default(),
    );

    if let Err(e) = runner.run(&cli.image_directory) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
