//! yudo CLI - enumerators and small generators
//!
//! This binary parses the command line, sets up diagnostics and hands each
//! subcommand to its implementation in the library crate.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use yudo_cli::commands;
use yudo_cli::commands::adc::AdcArgs;
use yudo_cli::commands::bit::BitArgs;
use yudo_cli::commands::chars::CharArgs;
use yudo_cli::commands::gend::GendArgs;
use yudo_cli::commands::gendt::GendtArgs;
use yudo_cli::commands::idc::IdcArgs;
use yudo_cli::commands::product::ProductArgs;
use yudo_cli::commands::url::UrlArgs;

mod cli_args;

use cli_args::{Cli, Commands};

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,yudo=debug,yudo_cli=debug,yudo_range=debug"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Gend {
            format,
            intervals,
            ages,
            offsets,
            zodiacs,
            regex,
            force,
        } => commands::gend::run(GendArgs {
            format,
            intervals,
            ages,
            offsets,
            zodiacs,
            regex,
            force,
        }),
        Commands::Gendt {
            format,
            intervals,
            timestamps,
            offsets,
            regex,
            millisecond,
            force,
        } => commands::gendt::run(GendtArgs {
            format,
            intervals,
            timestamps,
            offsets,
            regex,
            millisecond,
            force,
        }),
        Commands::Idc {
            data,
            provinces,
            cities,
            counties,
            ages,
            births,
            seqs,
            male,
            female,
            checksums,
            force,
        } => commands::idc::run(IdcArgs {
            data,
            provinces,
            cities,
            counties,
            ages,
            births,
            seqs,
            male,
            female,
            checksums,
            force,
        }),
        Commands::Adc {
            data,
            detail,
            provinces,
            cities,
            counties,
            townships,
            regex,
            name,
            purify,
        } => commands::adc::run(AdcArgs {
            data,
            detail,
            provinces,
            cities,
            counties,
            townships,
            regex,
            name,
            purify,
        }),
        Commands::Bit {
            bits,
            qty,
            hex,
            dec,
            int,
            b64,
            b32,
            b85,
            group,
            separator,
            prefix,
            suffix,
            head,
            tail,
        } => commands::bit::run(BitArgs {
            bits,
            qty,
            hex,
            dec,
            int,
            b64,
            b32,
            b85,
            group,
            separator,
            prefix,
            suffix,
            head,
            tail,
        }),
        Commands::Char {
            length,
            digit,
            digit_safe,
            lowercase,
            lowercase_safe,
            uppercase,
            uppercase_safe,
            symbol,
            symbol_normal,
            symbol_shift,
            b16,
            b64,
            line_max,
        } => commands::chars::run(CharArgs {
            length,
            digit,
            digit_safe,
            lowercase,
            lowercase_safe,
            uppercase,
            uppercase_safe,
            symbol,
            symbol_unshifted: symbol_normal,
            symbol_shifted: symbol_shift,
            b16,
            b64,
            line_max,
        }),
        Commands::Product {
            files,
            repeat,
            skip_empty,
            patch_prc_sum,
            format,
            regex,
            force,
        } => commands::product::run(ProductArgs {
            files,
            repeat,
            skip_empty,
            patch_prc_sum,
            format,
            regex,
            force,
        }),
        Commands::Url {
            url,
            parse_location,
            skip_fragment,
            json,
        } => commands::url::run(UrlArgs {
            url,
            parse_location,
            skip_fragment,
            json,
        }),
        Commands::Conf { pattern } => commands::conf::run(pattern),
        Commands::Disconf { pattern } => commands::conf::run_remove(&pattern),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::from(1)
        }
    }
}
