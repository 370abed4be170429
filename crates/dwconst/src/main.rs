use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use dwconst_core::abbrev::{summarize_path, UnitFilter, UnitSummary};
use dwconst_core::tables::table;
use dwconst_core::{decode, encode, Category, DwconstError, DwconstResult};
use dwconst_utils::{debug, info, init_logging, init_logging_to_file, init_logging_with_level, LogFormat, LogLevel};
use dwconst_utils::{LoggingError, LoggingGuard};

/// Decode and encode DWARF symbolic constants.
#[derive(Parser, Debug)]
#[command(name = "dwconst")]
#[command(version)]
#[command(about = "Decode and encode DWARF tag, attribute, form and children constants", long_about = None)]
struct Cli
{
    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Send logs to ~/.dwconst/<date>-dwconst.log instead of stderr
    #[arg(long, global = true, default_value_t = false)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Decode a raw code to its symbolic name
    Decode
    {
        /// Table to consult: tag, children, at, form
        category: Category,
        /// Code in decimal or 0x-prefixed hex
        code: String,
    },
    /// Encode a symbolic name to its code
    Encode
    {
        /// Table to consult: tag, children, at, form
        category: Category,
        /// Name, with or without the DW_*_ prefix
        name: String,
    },
    /// List every entry of a table in declaration order
    Table
    {
        /// Table to list: tag, children, at, form
        category: Category,
    },
    /// Summarize the abbreviations used by each unit of an object file
    Abbrevs
    {
        /// Path to an ELF or Mach-O file with DWARF sections
        path: PathBuf,
        /// Only this unit (zero-based position in .debug_info)
        #[arg(short, long)]
        unit: Option<usize>,
        /// Only print abbreviations containing an unknown code
        #[arg(long, default_value_t = false)]
        unknown_only: bool,
    },
}

fn main()
{
    let cli = Cli::parse();

    let guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    // Build the form index before any decoding happens
    dwconst_core::init();

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {}", e);
        drop(guard);
        process::exit(1);
    }
}

fn setup_logging(cli: &Cli) -> Result<LoggingGuard, LoggingError>
{
    if cli.log_to_file {
        let (path, guard) = init_logging_to_file(cli.log_level)?;
        info!(path = %path.display(), "logging to file");
        return Ok(guard);
    }

    match cli.log_level {
        Some(level) => init_logging_with_level(level, LogFormat::Pretty),
        None => init_logging(),
    }
}

fn run_command(cli: Cli) -> DwconstResult<()>
{
    match cli.command {
        Commands::Decode { category, code } => {
            let code = parse_code(&code)?;
            if !category.fits(code) {
                debug!(%category, code, "code exceeds the category's declared width");
            }
            println!("{}", decode(category, code).qualified(category));
            Ok(())
        }
        Commands::Encode { category, name } => {
            let code = encode(category, &name)?;
            println!("0x{code:x}");
            Ok(())
        }
        Commands::Table { category } => {
            print_table(category);
            Ok(())
        }
        Commands::Abbrevs {
            path,
            unit,
            unknown_only,
        } => {
            let filter = unit.map_or(UnitFilter::All, UnitFilter::Only);
            let units = summarize_path(&path, filter)?;
            if units.is_empty() {
                info!(path = %path.display(), "no DWARF units found");
            }
            for summary in &units {
                print_unit(summary, unknown_only);
            }
            Ok(())
        }
    }
}

/// Parse `0x`-prefixed hex or decimal.
fn parse_code(text: &str) -> DwconstResult<u64>
{
    let trimmed = text.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    };
    parsed.map_err(|err| DwconstError::InvalidCode(format!("{text}: {err}")))
}

fn print_table(category: Category)
{
    let table = table(category);
    for entry in table.entries() {
        if table.is_shadowed(entry) {
            let canonical = table.lookup(entry.code).unwrap_or(entry.name);
            println!(
                "0x{:04x}  {}{}  (alias of {}{})",
                entry.code,
                category.prefix(),
                entry.name,
                category.prefix(),
                canonical
            );
        } else {
            println!("0x{:04x}  {}{}", entry.code, category.prefix(), entry.name);
        }
    }
}

fn print_unit(summary: &UnitSummary, unknown_only: bool)
{
    println!(
        "unit {}: DWARF {}, address size {}, {} entries, {} abbreviations",
        summary.index,
        summary.version,
        summary.address_size,
        summary.entry_count,
        summary.abbreviations.len()
    );

    for abbrev in &summary.abbreviations {
        if unknown_only && !abbrev.has_unknown() {
            continue;
        }
        println!(
            "  [{}] {} {}",
            abbrev.code,
            abbrev.tag.qualified(Category::EntityKind),
            abbrev.children.qualified(Category::HasChildrenFlag)
        );
        for attr in &abbrev.attributes {
            println!(
                "      {:<32} {}",
                attr.name.qualified(Category::AttributeKind),
                attr.form.qualified(Category::AttributeForm)
            );
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_parse_code()
    {
        assert_eq!(parse_code("17").unwrap(), 17);
        assert_eq!(parse_code("0x11").unwrap(), 0x11);
        assert_eq!(parse_code("0XFFFF").unwrap(), 0xffff);
        assert_eq!(parse_code(" 0x4080 ").unwrap(), 0x4080);
        assert!(matches!(parse_code("0xzz"), Err(DwconstError::InvalidCode(_))));
        assert!(matches!(parse_code("-1"), Err(DwconstError::InvalidCode(_))));
    }

    #[test]
    fn test_cli_parses_subcommands()
    {
        let cli = Cli::try_parse_from(["dwconst", "decode", "tag", "0x2e"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Decode {
                category: Category::EntityKind,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["dwconst", "--log-level", "debug", "encode", "form", "DW_FORM_strp"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));

        let cli = Cli::try_parse_from(["dwconst", "abbrevs", "a.out", "--unit", "2", "--unknown-only"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Abbrevs {
                unit: Some(2),
                unknown_only: true,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["dwconst", "decode", "op", "1"]).is_err());
    }

    #[test]
    fn test_cli_definition()
    {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
