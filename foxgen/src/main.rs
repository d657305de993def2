// foxgen/src/main.rs

mod cmd;
mod layout;
mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foxfs::codec::FieldWidths;

use crate::layout::VolumeLayout;
use crate::utils::LogLevel;

#[derive(Parser)]
#[command(name = "foxgen", version, about = "foxfs image generator", long_about = None)]
struct Cli {
    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Print library diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a foxfs image from volume.toml
    Format {
        /// Layout path
        #[arg(short, long, default_value = "layout/volume.toml")]
        layout: PathBuf,
        /// Output path
        #[arg(short, long, default_value = "foxfs.img")]
        output: PathBuf,
        /// Zero the whole image before writing
        #[arg(long)]
        full: bool,
        /// Only print what would be done, don't write the image
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the superblock and check group descriptors
    Inspect {
        /// Image path
        #[arg(short, long)]
        image: PathBuf,
        /// Byte offset of the volume inside the image
        #[arg(long, default_value_t = 0, value_parser = utils::parse_offset)]
        offset: u64,
        /// Group descriptor offsets (decimal or 0x-hex)
        #[arg(short, long, value_delimiter = ',', value_parser = utils::parse_offset)]
        groups: Vec<u64>,
        /// List directory entries at this offset
        #[arg(long, value_parser = utils::parse_offset)]
        dir: Option<u64>,
        /// Bytes to read for --dir
        #[arg(long, default_value_t = 4096)]
        dir_len: usize,
    },
    /// Print every record schema resolved against a width configuration
    Layout {
        /// Layout path; the default widths are used when omitted
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    utils::init(if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    });

    if let Err(e) = run(cli.command) {
        log_error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Format {
            layout,
            output,
            full,
            dry_run,
        } => {
            let layout = VolumeLayout::from_file(&layout)?;
            cmd::format::run(&layout, &output, full, dry_run)
        }
        Commands::Inspect {
            image,
            offset,
            groups,
            dir,
            dir_len,
        } => cmd::inspect::run(&image, offset, &groups, dir.map(|off| (off, dir_len))),
        Commands::Layout { layout } => {
            let widths = match layout {
                Some(path) => VolumeLayout::from_file(&path)?.field_widths()?,
                None => FieldWidths::default(),
            };
            cmd::layout::run(&widths)
        }
    }
}
