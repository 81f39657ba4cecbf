use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use wsmask::frame::{MaskingKey, Opcode};
use wsmask::pipeline::{self, MaskConfig, Mode};

#[derive(Parser, Debug)]
#[command(version, about = "mask or unmask a single websocket frame")]
#[command(group(ArgGroup::new("mode").required(true).args(["mask", "unmask"])))]
#[command(group(ArgGroup::new("opcode").args(["text", "binary"])))]
#[command(group(ArgGroup::new("masking_key").args(["key", "random_key"])))]
struct Args {
    /// Wrap the input into a masked frame
    #[arg(short, long)]
    mask: bool,

    /// Extract the payload of the framed input
    #[arg(short, long)]
    unmask: bool,

    /// Text opcode
    #[arg(short, long, conflicts_with = "unmask")]
    text: bool,

    /// Binary opcode (default)
    #[arg(short, long, conflicts_with = "unmask")]
    binary: bool,

    /// Masking key as 8 hex digits
    #[arg(short, long, default_value_t = MaskingKey::DEFAULT, conflicts_with = "unmask")]
    key: MaskingKey,

    /// Mask with a freshly generated key
    #[arg(long, conflicts_with = "unmask")]
    random_key: bool,

    /// Produce a frame without mask bit and key
    #[arg(long, conflicts_with = "unmask")]
    unmasked: bool,

    #[arg(short, long)]
    input: PathBuf,

    #[arg(short, long)]
    output: PathBuf,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Also log frame head bytes
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn mode(&self) -> Mode {
        match self.unmask {
            true => Mode::Unmask,
            false => Mode::Mask,
        }
    }
    fn config(&self) -> MaskConfig {
        let key = match self.random_key {
            true => MaskingKey::random(),
            false => self.key,
        };
        MaskConfig {
            key,
            opcode: match self.text {
                true => Opcode::Text,
                false => Opcode::Binary,
            },
            masked: !self.unmasked,
        }
    }
    fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (_, true) => LevelFilter::Debug,
            _ => LevelFilter::Info,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new().with_level(args.log_level()).init()?;

    let input = File::open(&args.input)
        .with_context(|| format!("cannot open: {}", args.input.display()))?;
    let output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&args.output)
        .with_context(|| format!("cannot open: {}", args.output.display()))?;

    let summary = pipeline::run(
        args.mode(),
        &args.config(),
        &mut BufReader::new(input),
        &mut BufWriter::new(output),
    )?;
    log::debug!("{:?}", summary);
    Ok(())
}
