use std::fs::File;
use std::io::{self, BufRead, BufReader};

use regex::Regex;

use crate::errors::ReadError;
use crate::table::{Series, Table};

/// Default layout of a series line: `Seattle: [69, 108, 178]`.  Brackets are
/// optional.
const SERIES_LINE: &str = r"^\s*(?P<name>[^:#]*[^:#\s])\s*:\s*\[?(?P<values>[^\]]*)\]?\s*$";

/// Return io::BufRead from a path, falling back to using stdin if path is "-".
fn open_file(path: &str) -> Result<Box<dyn BufRead>, ReadError> {
    match path {
        "-" => Ok(Box::new(BufReader::new(io::stdin()))),
        _ => match File::open(path) {
            Ok(fd) => Ok(Box::new(BufReader::new(fd))),
            Err(source) => Err(ReadError::Open {
                path: path.to_string(),
                source,
            }),
        },
    }
}

/// Reads a `Table` out of lines holding a series name and its values.
///
/// Lines not matching the layout (blank lines, comments) are skipped.  So are
/// lines with values that cannot be parsed as floats.
#[derive(Debug, Builder)]
pub struct DataReader {
    /// A regex with `name` and `values` capture groups.  If not present a
    /// `name: v1, v2, ...` layout is expected.
    #[builder(setter(strip_option), default)]
    regex: Option<Regex>,
    /// Separator between values.
    #[builder(default = "','")]
    separator: char,
}

impl Default for DataReader {
    fn default() -> Self {
        Self {
            regex: None,
            separator: ',',
        }
    }
}

impl DataReader {
    pub fn read(&self, path: &str) -> Result<Table, ReadError> {
        self.read_from(open_file(path)?)
    }

    pub fn read_from<R: BufRead>(&self, input: R) -> Result<Table, ReadError> {
        let regex = match &self.regex {
            Some(re) => re.clone(),
            None => Regex::new(SERIES_LINE)?,
        };
        let mut series = Vec::new();
        for line in input.lines() {
            let line = line?;
            if let Some(s) = self.parse_line(&regex, &line) {
                debug!("Read {} values for '{}'", s.values.len(), s.name);
                series.push(s);
            }
        }
        Ok(Table::new(series)?)
    }

    fn parse_line(&self, regex: &Regex, line: &str) -> Option<Series> {
        let cap = match regex.captures(line) {
            Some(cap) => cap,
            None => {
                debug!("Regex does not match '{}'", line);
                return None;
            }
        };
        let (name, values) = match (cap.name("name"), cap.name("values")) {
            (Some(name), Some(values)) => (name.as_str().trim(), values.as_str()),
            _ => {
                debug!("Missing name or values in '{}'", line);
                return None;
            }
        };
        let mut parsed = Vec::new();
        for token in values.split(self.separator).map(str::trim) {
            if token.is_empty() {
                continue;
            }
            match token.parse::<f64>() {
                Ok(n) => parsed.push(n),
                Err(parse_error) => {
                    warn!(
                        "Skipping series '{}': cannot parse float ({}) at '{}'",
                        name, parse_error, token
                    );
                    return None;
                }
            }
        }
        Some(Series {
            name: name.to_string(),
            values: parsed,
        })
    }
}
