//! hdrview - HDR frame rendering CLI
//!
//! Renders decoded YUV frames into display-referred output surfaces.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use hdrview_core::ColorSpaceTag;

mod commands;

#[derive(Parser)]
#[command(name = "hdrview")]
#[command(author, version, about = "HDR frame rendering CLI")]
#[command(long_about = "
Renders decoded HDR video frames (HLG or PQ source) into display-referred
output surfaces: sRGB, Display P3, scRGB linear, BT.2020 HLG and BT.2020 PQ.

Examples:
  hdrview targets                                  # List output targets
  hdrview render -o out/                           # Synthetic ramp, all targets
  hdrview render -t srgb --cpu -o out/             # CPU pipeline, one target
  hdrview render frame.yuv -W 1920 -H 1080 -s p010 -t pq -o out/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a frame to one or all output targets
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// List the output target table
    #[command(visible_alias = "t")]
    Targets,
}

/// Output target selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TargetArg {
    Srgb,
    P3,
    Scrgb,
    Hlg,
    Pq,
    All,
}

impl TargetArg {
    fn tags(self) -> Vec<ColorSpaceTag> {
        match self {
            TargetArg::Srgb => vec![ColorSpaceTag::Srgb],
            TargetArg::P3 => vec![ColorSpaceTag::DisplayP3],
            TargetArg::Scrgb => vec![ColorSpaceTag::ScrgbLinear],
            TargetArg::Hlg => vec![ColorSpaceTag::Bt2020Hlg],
            TargetArg::Pq => vec![ColorSpaceTag::Bt2020Pq],
            TargetArg::All => ColorSpaceTag::ALL.to_vec(),
        }
    }
}

/// Raw input sample layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    /// 8-bit video-range planar 4:2:0
    Narrow8,
    /// Half-float full-range planar 4:2:0
    F16,
    /// 10-bit-in-16 semi-planar 4:2:0
    P010,
}

#[derive(Args)]
struct RenderArgs {
    /// Raw YUV input (planes concatenated); synthetic ramp when omitted
    input: Option<PathBuf>,

    /// Output directory for rendered surfaces
    #[arg(short, long)]
    output: PathBuf,

    /// Frame width (required with an input file)
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Frame height (required with an input file)
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Input sample layout
    #[arg(short, long, value_enum, default_value = "narrow8")]
    source: SourceArg,

    /// Output target
    #[arg(short, long, value_enum, default_value = "all")]
    target: TargetArg,

    /// Force the CPU pipeline (also used when no GPU adapter exists)
    #[arg(long)]
    cpu: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args, cli.verbose),
        Commands::Targets => commands::targets::run(),
    }
}
