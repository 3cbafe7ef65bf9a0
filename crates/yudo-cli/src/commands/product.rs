//! Product command implementation
//!
//! Prints the cartesian product of line files, one combination per line.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::OnceLock;

use yudo_range::FullMatch;

use crate::confirm::{confirm_on_terminal, try_emit, Estimate};
use crate::idcard;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{(\d+)\}").expect("invalid regex pattern"))
}

/// Options of one `product` invocation.
#[derive(Debug, Clone)]
pub struct ProductArgs {
    pub files: Vec<PathBuf>,
    pub repeat: usize,
    pub skip_empty: bool,
    pub patch_prc_sum: bool,
    pub format: Option<String>,
    pub regex: Option<String>,
    pub force: bool,
}

impl Default for ProductArgs {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            repeat: 1,
            skip_empty: false,
            patch_prc_sum: false,
            format: None,
            regex: None,
            force: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Column(usize),
}

/// A `{N}` template over row columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFormat {
    pieces: Vec<Piece>,
}

impl RowFormat {
    /// Parses `template`, rejecting columns at or beyond `width`.
    pub fn new(template: &str, width: usize) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in placeholder_regex().captures_iter(template) {
            let (Some(whole), Some(index)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let column: usize = index
                .as_str()
                .parse()
                .with_context(|| format!("bad column '{}'", index.as_str()))?;
            if column >= width {
                bail!("format refers to column {{{}}} but rows have {} columns", column, width);
            }
            if whole.start() > last {
                pieces.push(Piece::Text(template[last..whole.start()].to_string()));
            }
            pieces.push(Piece::Column(column));
            last = whole.end();
        }
        if last < template.len() {
            pieces.push(Piece::Text(template[last..].to_string()));
        }
        Ok(Self { pieces })
    }

    pub fn render(&self, row: &[&str]) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Column(i) => out.push_str(row.get(*i).copied().unwrap_or_default()),
            }
        }
        out
    }
}

/// Cartesian product of line columns plus the per-row transforms.
#[derive(Debug, Clone)]
pub struct Product {
    columns: Vec<Vec<String>>,
    patch_prc_sum: bool,
    format: Option<RowFormat>,
    pattern: Option<FullMatch>,
}

impl Product {
    pub fn new(columns: Vec<Vec<String>>, args: &ProductArgs) -> Result<Self> {
        if args.repeat < 1 {
            bail!("--repeat must be at least 1");
        }
        let mut columns: Vec<Vec<String>> = if args.skip_empty {
            columns.into_iter().filter(|c| !c.is_empty()).collect()
        } else {
            columns
        };
        let base = columns.clone();
        for _ in 1..args.repeat {
            columns.extend(base.iter().cloned());
        }

        // A patched row collapses into one column.
        let width = if args.patch_prc_sum { 1 } else { columns.len() };
        let format = args
            .format
            .as_deref()
            .map(|template| RowFormat::new(template, width))
            .transpose()?;
        let pattern = args
            .regex
            .as_deref()
            .map(FullMatch::new)
            .transpose()
            .context("Invalid --regex")?;

        Ok(Self {
            columns,
            patch_prc_sum: args.patch_prc_sum,
            format,
            pattern,
        })
    }

    pub fn rows(&self) -> Rows<'_> {
        let exhausted = self.columns.is_empty() || self.columns.iter().any(Vec::is_empty);
        Rows {
            columns: &self.columns,
            indices: vec![0; self.columns.len()],
            exhausted,
        }
    }

    fn render(&self, row: Vec<&str>) -> Result<Option<String>> {
        let patched;
        let cells: Vec<&str> = if self.patch_prc_sum {
            patched = idcard::patch_checksum(&row.concat())?;
            vec![patched.as_str()]
        } else {
            row
        };

        let line = match &self.format {
            Some(format) => format.render(&cells),
            None => cells.concat(),
        };
        let admitted = self.pattern.as_ref().map_or(true, |p| p.is_match(&line));
        Ok(admitted.then_some(line))
    }

    /// Rendered lines that pass the regex, in row order.
    pub fn lines(&self) -> impl Iterator<Item = Result<String>> + '_ {
        self.rows()
            .filter_map(move |row| self.render(row).transpose())
    }
}

/// Odometer over column indices; the last column varies fastest.
#[derive(Debug)]
pub struct Rows<'a> {
    columns: &'a [Vec<String>],
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let row = self
            .indices
            .iter()
            .zip(self.columns)
            .map(|(&i, column)| column[i].as_str())
            .collect();

        self.exhausted = true;
        for (index, column) in self.indices.iter_mut().zip(self.columns).rev() {
            *index += 1;
            if *index < column.len() {
                self.exhausted = false;
                break;
            }
            *index = 0;
        }
        Some(row)
    }
}

fn read_column(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read column file: {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Run the product command.
pub fn run(args: ProductArgs) -> Result<ExitCode> {
    if args.files.is_empty() {
        bail!("at least one column file is required");
    }
    let columns = args
        .files
        .iter()
        .map(|path| read_column(path))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(
        sizes = ?columns.iter().map(Vec::len).collect::<Vec<_>>(),
        "columns loaded"
    );
    let product = Product::new(columns, &args)?;

    let estimate = Estimate::try_scan(product.lines())?;
    if confirm_on_terminal(&estimate, args.force)? {
        try_emit(product.lines())?;
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn lines(product: &Product) -> Vec<String> {
        product.lines().collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn product_of_two_columns() {
        let product = Product::new(
            vec![column(&["a", "b"]), column(&["1", "2", "3"])],
            &ProductArgs::default(),
        )
        .unwrap();
        assert_eq!(lines(&product), vec!["a1", "a2", "a3", "b1", "b2", "b3"]);
    }

    #[test]
    fn empty_column_empties_everything_unless_skipped() {
        let columns = vec![column(&["a"]), Vec::new(), column(&["1", "2"])];
        let product = Product::new(columns.clone(), &ProductArgs::default()).unwrap();
        assert!(lines(&product).is_empty());

        let args = ProductArgs {
            skip_empty: true,
            ..ProductArgs::default()
        };
        let product = Product::new(columns, &args).unwrap();
        assert_eq!(lines(&product), vec!["a1", "a2"]);
    }

    #[test]
    fn repeat_duplicates_columns() {
        let args = ProductArgs {
            repeat: 2,
            format: Some("{0}-{1}".into()),
            ..ProductArgs::default()
        };
        let product = Product::new(vec![column(&["x", "y"])], &args).unwrap();
        assert_eq!(lines(&product), vec!["x-x", "x-y", "y-x", "y-y"]);
    }

    #[test]
    fn format_and_regex() {
        let args = ProductArgs {
            format: Some("<{1}:{0}>".into()),
            regex: Some(r"<2:.>".into()),
            ..ProductArgs::default()
        };
        let product =
            Product::new(vec![column(&["a", "b"]), column(&["1", "2"])], &args).unwrap();
        assert_eq!(lines(&product), vec!["<2:a>", "<2:b>"]);
    }

    #[test]
    fn format_column_out_of_range() {
        let args = ProductArgs {
            format: Some("{2}".into()),
            ..ProductArgs::default()
        };
        assert!(Product::new(vec![column(&["a"]), column(&["b"])], &args).is_err());
    }

    #[test]
    fn patch_prc_sum_appends_checksum() {
        let args = ProductArgs {
            patch_prc_sum: true,
            ..ProductArgs::default()
        };
        let product = Product::new(
            vec![column(&["110105"]), column(&["19491231"]), column(&["002"])],
            &args,
        )
        .unwrap();
        assert_eq!(lines(&product), vec!["11010519491231002X"]);

        let short = Product::new(vec![column(&["1234"])], &args).unwrap();
        assert!(short.lines().next().unwrap().is_err());
    }

    #[test]
    fn estimate_counts_rendered_rows() {
        let args = ProductArgs {
            format: Some("{0}+{1}".into()),
            ..ProductArgs::default()
        };
        let product =
            Product::new(vec![column(&["a", "b"]), column(&["1", "2", "3"])], &args).unwrap();
        assert_eq!(
            Estimate::try_scan(product.lines()).unwrap(),
            Estimate::new(6, 18)
        );

        let patched = ProductArgs {
            patch_prc_sum: true,
            ..ProductArgs::default()
        };
        let short = Product::new(vec![column(&["1234"])], &patched).unwrap();
        assert!(Estimate::try_scan(short.lines()).is_err());
    }

    #[test]
    fn zero_repeat_is_rejected() {
        let args = ProductArgs {
            repeat: 0,
            ..ProductArgs::default()
        };
        assert!(Product::new(vec![column(&["a"])], &args).is_err());
    }
}
