mod config;
mod error;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use sailgen_codegen::MnemonicStyle;
use sailgen_parser::{ClauseKind, PresenceMode, SailFile};

use config::Config;
use error::CliError;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "sailgen",
    about = "Generate C encode/decode/disassembly stubs from a Sail ISA description"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScanArgs {
    /// Path to the Sail source
    input: PathBuf,
    /// YAML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Attribute clauses only to instructions the clause mentions
    #[arg(long)]
    strict: bool,
    /// Mnemonic token prefix (default: RISCV_)
    #[arg(long)]
    prefix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write C stubs for every instruction with an encdec or assembly clause
    Generate {
        #[command(flatten)]
        scan: ScanArgs,
        /// Output file (default: input path with a .c extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Mnemonic printed by the disassembly functions
        #[arg(long, value_enum)]
        mnemonic: Option<MnemonicArg>,
    },
    /// Show clause flags and extracted fragments per instruction
    Info {
        #[command(flatten)]
        scan: ScanArgs,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MnemonicArg {
    /// Representative mnemonic of the encoding family
    Family,
    /// The instruction's own name
    Instruction,
}

impl From<MnemonicArg> for MnemonicStyle {
    fn from(arg: MnemonicArg) -> Self {
        match arg {
            MnemonicArg::Family => MnemonicStyle::Family,
            MnemonicArg::Instruction => MnemonicStyle::Instruction,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Yaml,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            scan,
            output,
            mnemonic,
        } => cmd_generate(&scan, output.as_deref(), mnemonic),
        Commands::Info { scan, format } => cmd_info(&scan, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Config file values with command-line overrides applied.
fn settings(scan: &ScanArgs) -> Result<Config, CliError> {
    let mut config = Config::load(scan.config.as_deref())?;
    if scan.strict {
        config.parser.presence = PresenceMode::Mnemonic;
    }
    if let Some(prefix) = &scan.prefix {
        config.parser.mnemonic_prefix = prefix.clone();
    }
    Ok(config)
}

fn read_source(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn cmd_generate(
    scan: &ScanArgs,
    output: Option<&Path>,
    mnemonic: Option<MnemonicArg>,
) -> Result<(), CliError> {
    let mut config = settings(scan)?;
    if let Some(mnemonic) = mnemonic {
        config.codegen.mnemonic = mnemonic.into();
    }

    let source = read_source(&scan.input)?;
    let file = SailFile::parse(&source, &config.parser)?;
    let code = sailgen_codegen::generate(&file, &config.codegen);

    let out_path = output.map_or_else(|| scan.input.with_extension("c"), Path::to_path_buf);
    fs::write(&out_path, code).map_err(|source| CliError::Write {
        path: out_path.clone(),
        source,
    })?;

    let emitted = file
        .records()
        .filter(|r| r.has(ClauseKind::EncDec) || r.has(ClauseKind::Assembly))
        .count();
    println!(
        "Wrote C stubs for {emitted} of {} instructions to {}",
        file.table().len(),
        out_path.display()
    );
    Ok(())
}

fn cmd_info(scan: &ScanArgs, format: Format) -> Result<(), CliError> {
    let config = settings(scan)?;
    let source = read_source(&scan.input)?;
    let file = SailFile::parse(&source, &config.parser)?;

    match format {
        Format::Text => print!("{}", report::text(&file)),
        Format::Yaml => print!("{}", report::yaml(&file)?),
    }
    Ok(())
}
