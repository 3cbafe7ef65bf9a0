//! CLI argument definitions for the yudo command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use yudo_cli::binary::parse_bit_length;
use yudo_cli::range_args::{
    self, AgeRange, DateOffsetRange, DateRange, DateTimeOffsetRange, DateTimeRange, IntegerRange,
    TimestampRange,
};

/// yudo - a toolbox of enumerators and small generators
#[derive(Parser)]
#[command(name = "yudo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Enumerate dates from intervals, ages and offsets
    Gend {
        /// strftime output format (default: %Y.%m.%d, or [gend] format)
        #[arg(short, long)]
        format: Option<String>,

        /// Date interval, e.g. 2024.01.01~2024.03.01
        #[arg(short, long = "interval", value_name = "MIN[~MAX]", value_parser = range_args::date)]
        intervals: Vec<DateRange>,

        /// Age range in a year, e.g. 18~25,2024
        #[arg(short, long = "age", value_name = "MIN[~MAX][,YEAR]", value_parser = range_args::age)]
        ages: Vec<AgeRange>,

        /// Day offsets around a date, e.g. -3d~1w,2024.01.01
        #[arg(
            short,
            long = "offset",
            value_name = "LEFT[~RIGHT][,BASE]",
            value_parser = range_args::date_offset,
            allow_hyphen_values = true
        )]
        offsets: Vec<DateOffsetRange>,

        /// Keep dates in these zodiac years only, e.g. 虎兔龙蛇
        #[arg(short, long)]
        zodiacs: Option<String>,

        /// Keep formatted dates that fully match this regex
        #[arg(short, long)]
        regex: Option<String>,

        /// Print without asking for confirmation
        #[arg(short = 'F', long)]
        force: bool,
    },

    /// Enumerate datetimes from intervals, timestamps and offsets
    Gendt {
        /// strftime output format (default: %Y.%m.%d+%H:%M:%S, or [gendt] format)
        #[arg(short, long)]
        format: Option<String>,

        /// Datetime interval, e.g. 2024.01.01+08:00:00~2024.01.01+09:00:00
        #[arg(short, long = "interval", value_name = "MIN[~MAX]", value_parser = range_args::datetime)]
        intervals: Vec<DateTimeRange>,

        /// Unix timestamps read in a UTC offset, e.g. 0~60,+08:00
        #[arg(
            short,
            long = "timestamp",
            value_name = "MIN[~MAX][,ZONE]",
            value_parser = range_args::timestamp,
            allow_hyphen_values = true
        )]
        timestamps: Vec<TimestampRange>,

        /// Offsets around a datetime, e.g. -1h~30m
        #[arg(
            short,
            long = "offset",
            value_name = "MIN[~MAX][,BASE]",
            value_parser = range_args::datetime_offset,
            allow_hyphen_values = true
        )]
        offsets: Vec<DateTimeOffsetRange>,

        /// Keep formatted datetimes that fully match this regex
        #[arg(short, long)]
        regex: Option<String>,

        /// Step by milliseconds instead of seconds
        #[arg(short, long)]
        millisecond: bool,

        /// Print without asking for confirmation
        #[arg(short = 'F', long)]
        force: bool,
    },

    /// Enumerate PRC resident ID numbers
    #[command(group(ArgGroup::new("birth_range").args(["ages", "births"]).required(true).multiple(true)))]
    Idc {
        /// Area-code dataset (default: [idc] data, or code2022.json)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Province part of the area code (2 digits)
        #[arg(short, long = "province")]
        provinces: Vec<String>,

        /// City part of the area code (2 digits)
        #[arg(short, long = "city")]
        cities: Vec<String>,

        /// County part of the area code (2 digits)
        #[arg(short = 'u', long = "county")]
        counties: Vec<String>,

        /// Age range of the holders, e.g. 18~25
        #[arg(short, long = "age", value_name = "MIN[~MAX][,YEAR]", value_parser = range_args::age)]
        ages: Vec<AgeRange>,

        /// Birth date interval, e.g. 2000.01.01~2000.02.01
        #[arg(short, long = "birth", value_name = "MIN[~MAX]", value_parser = range_args::date)]
        births: Vec<DateRange>,

        /// Sequence number range (default: 1~996)
        #[arg(short, long = "seq", value_name = "MIN[~MAX]", value_parser = range_args::integer)]
        seqs: Vec<IntegerRange>,

        /// Male holders only (odd sequence numbers)
        #[arg(short = 'M', long)]
        male: bool,

        /// Female holders only (even sequence numbers)
        #[arg(short = 'W', long)]
        female: bool,

        /// Accepted final characters, e.g. 0X
        #[arg(short = 'k', long = "checksum")]
        checksums: Option<String>,

        /// Print without asking for confirmation
        #[arg(short = 'F', long)]
        force: bool,
    },

    /// Look up or list administrative division codes
    Adc {
        /// Area-code dataset (default: [adc] data, or code2022.json)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Show the division chain of one code
        #[arg(short, long, value_name = "CODE")]
        detail: Option<String>,

        /// Province part (2 digits)
        #[arg(short, long = "province")]
        provinces: Vec<String>,

        /// City part (2 digits)
        #[arg(short, long = "city")]
        cities: Vec<String>,

        /// County part (2 digits)
        #[arg(short = 'u', long = "county")]
        counties: Vec<String>,

        /// Township part (3 digits)
        #[arg(short, long = "township")]
        townships: Vec<String>,

        /// Keep codes that fully match this regex
        #[arg(short, long)]
        regex: Option<String>,

        /// Keep divisions whose name contains this text
        #[arg(short, long)]
        name: Option<String>,

        /// Print codes without names
        #[arg(long)]
        purify: bool,
    },

    /// Print random bit strings
    #[command(group(ArgGroup::new("encoding").args(["hex", "dec", "int", "b64", "b32", "b85"])))]
    Bit {
        /// Bit count, or a digest name such as SHA-256
        #[arg(value_name = "BITS", value_parser = parse_bit_length)]
        bits: u32,

        /// Number of lines
        #[arg(short, long, default_value_t = 1)]
        qty: usize,

        /// Hexadecimal output (the default)
        #[arg(short = 'x', long)]
        hex: bool,

        /// Decimal byte array
        #[arg(short, long)]
        dec: bool,

        /// One decimal integer
        #[arg(short, long)]
        int: bool,

        /// Base64
        #[arg(long, alias = "base64")]
        b64: bool,

        /// Base32
        #[arg(long, alias = "base32")]
        b32: bool,

        /// Base85
        #[arg(long, alias = "base85")]
        b85: bool,

        /// Bytes per group
        #[arg(long, default_value_t = 1)]
        group: usize,

        /// Text between groups (decimal output defaults to ",")
        #[arg(long, allow_hyphen_values = true)]
        separator: Option<String>,

        /// Text before each group
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        prefix: String,

        /// Text after each group
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        suffix: String,

        /// Text at the start of each line
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        head: String,

        /// Text at the end of each line
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        tail: String,
    },

    /// Print random characters
    Char {
        /// Number of characters
        length: usize,

        /// Digits
        #[arg(short = 'd', long)]
        digit: bool,

        /// Digits except 0 and 1
        #[arg(short = 'D', long)]
        digit_safe: bool,

        /// Lowercase letters
        #[arg(short = 'l', long)]
        lowercase: bool,

        /// Lowercase letters except l
        #[arg(short = 'L', long)]
        lowercase_safe: bool,

        /// Uppercase letters
        #[arg(short = 'u', long)]
        uppercase: bool,

        /// Uppercase letters except I and O
        #[arg(short = 'U', long)]
        uppercase_safe: bool,

        /// Every printable keyboard symbol
        #[arg(short = 's', long)]
        symbol: bool,

        /// Symbols typed without shift
        #[arg(short = 'c', long)]
        symbol_normal: bool,

        /// Symbols typed with shift
        #[arg(short = 'C', long)]
        symbol_shift: bool,

        /// Base16 charset
        #[arg(short = 'x', long, alias = "base16")]
        b16: bool,

        /// Base64 charset, without =
        #[arg(long, alias = "base64")]
        b64: bool,

        /// Characters per line
        #[arg(short = 'm', long)]
        line_max: Option<usize>,
    },

    /// Print the cartesian product of line files
    Product {
        /// Column files, one value per line
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Repeat the whole set of columns this many times
        #[arg(short = 'm', long, default_value_t = 1)]
        repeat: usize,

        /// Ignore columns without lines
        #[arg(short = '0', long)]
        skip_empty: bool,

        /// Append the ID checksum to each row (rows need 17+ digits)
        #[arg(long)]
        patch_prc_sum: bool,

        /// Row template with {N} column placeholders
        #[arg(short, long)]
        format: Option<String>,

        /// Keep rows that fully match this regex
        #[arg(short, long)]
        regex: Option<String>,

        /// Print without asking for confirmation
        #[arg(short = 'F', long)]
        force: bool,
    },

    /// Split a URL into its components
    Url {
        /// URL to split (read from stdin when omitted)
        url: Option<String>,

        /// Expand user, password, host and port
        #[arg(short = 'l', long)]
        parse_location: bool,

        /// Treat # as part of the path or query
        #[arg(short = 'f', long)]
        skip_fragment: bool,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Read or write configuration values
    Conf {
        /// SECTION[.KEY[=VALUE]]
        #[arg(value_name = "SECTION[.KEY[=VALUE]]")]
        pattern: Option<String>,
    },

    /// Delete a configuration key or section
    Disconf {
        /// SECTION[.KEY]
        #[arg(value_name = "SECTION[.KEY]")]
        pattern: String,
    },
}
