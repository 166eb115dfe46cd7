use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{self, value_parser, Arg, ArgAction, Command};

/// Parses a `YYYY-MM-DD` date as UTC midnight.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}' ({e}), expected YYYY-MM-DD"))?;
    match date.and_hms_opt(0, 0, 0) {
        Some(naive) => Ok(Utc.from_utc_datetime(&naive)),
        None => Err(format!("invalid date '{value}'")),
    }
}

fn add_data(cmd: Command<'static>) -> Command<'static> {
    const LONG_DATA_ABOUT: &str = "\
File holding the series to process.  If a single dash, standard input will be
used.  If not present, the builtin monthly sunshine hours of Seattle, Chicago
and San Francisco are used.

Every series is a line with a name, a colon and comma separated values, like
'Seattle: 69, 108, 178' or 'Seattle: [69, 108, 178]'.  Every series must have
the same amount of values.  Other lines are ignored.
";
    cmd.arg(
        Arg::new("data")
            .long("data")
            .short('d')
            .help("Read series from this file")
            .long_help(LONG_DATA_ABOUT)
            .takes_value(true),
    )
}

fn add_regex(cmd: Command<'static>) -> Command<'static> {
    const LONG_RE_ABOUT: &str = "\
A regular expression used for capturing the series inside the lines of the data
file.  It needs a capture group named `name` and another one named `values`.
Lines where it does not match are ignored.

If no regex is used, lines like 'Seattle: 69, 108, 178' are expected.

An example of regex is '^(?P<name>\\w+)=(?P<values>.*)$', for lines like
'Seattle=69;108;178' (together with a ';' separator).
";
    cmd.arg(
        Arg::new("regex")
            .long("regex")
            .short('R')
            .help("Use a regex to capture series names and values")
            .long_help(LONG_RE_ABOUT)
            .requires("data")
            .takes_value(true),
    )
    .arg(
        Arg::new("separator")
            .long("separator")
            .short('S')
            .help("Character between the values of a series")
            .value_parser(value_parser!(char))
            .default_value(",")
            .takes_value(true),
    )
}

fn add_precision(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("precision")
            .long("precision")
            .short('p')
            .help("Show that number of decimals")
            .value_parser(value_parser!(usize))
            .takes_value(true),
    )
}

fn add_width(cmd: Command<'static>, default: &'static str) -> Command<'static> {
    cmd.arg(
        Arg::new("width")
            .long("width")
            .short('w')
            .help("Use this many characters as terminal width")
            .value_parser(value_parser!(usize))
            .default_value(default)
            .takes_value(true),
    )
}

pub fn get_app() -> Command<'static> {
    let diff = Command::new("diff")
        .version(clap::crate_version!())
        .about("Print row differences between two series, sorted descending")
        .arg(
            Arg::new("left")
                .long("left")
                .short('l')
                .help("Series to subtract from")
                .default_value("Seattle")
                .takes_value(true),
        )
        .arg(
            Arg::new("right")
                .long("right")
                .short('r')
                .help("Series to subtract")
                .default_value("Chicago")
                .takes_value(true),
        );
    let diff = add_regex(add_data(add_precision(diff)));

    let corr = Command::new("corr")
        .version(clap::crate_version!())
        .about("Print correlation of Seattle with San Francisco and Chicago");
    let corr = add_regex(add_data(add_precision(corr)));

    let fold = Command::new("fold")
        .version(clap::crate_version!())
        .about("Print every value of the table as a (city, sun) pair");
    let fold = add_regex(add_data(add_precision(fold)));

    let rollup = Command::new("rollup")
        .version(clap::crate_version!())
        .about("Print min, max, average, median and skew of every series");
    let rollup = add_regex(add_data(add_precision(rollup)));

    let hist = Command::new("hist")
        .version(clap::crate_version!())
        .about("Plot an histogram of uniformly distributed random values")
        .arg(
            Arg::new("samples")
                .long("samples")
                .short('n')
                .help("Amount of random values")
                .value_parser(value_parser!(usize))
                .default_value("10000")
                .takes_value(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .short('s')
                .help("Seed of the random generator (for repeatable output)")
                .value_parser(value_parser!(u64))
                .takes_value(true),
        )
        .arg(
            Arg::new("intervals")
                .long("intervals")
                .short('i')
                .help("Use approximately this amount of buckets to classify data")
                .value_parser(value_parser!(usize))
                .default_value("20")
                .takes_value(true),
        );
    let hist = add_precision(add_width(hist, "110"));

    let axes = Command::new("axes")
        .version(clap::crate_version!())
        .about("Draw the axes of a chart: time on x, values on y")
        .arg(
            Arg::new("height")
                .long("height")
                .short('H')
                .help("Use that many rows for the chart")
                .value_parser(value_parser!(usize))
                .default_value("20")
                .takes_value(true),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Start of the time axis (YYYY-MM-DD)")
                .value_parser(parse_date)
                .default_value("2023-01-01")
                .takes_value(true),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("End of the time axis (YYYY-MM-DD)")
                .value_parser(parse_date)
                .default_value("2024-01-01")
                .takes_value(true),
        )
        .arg(
            Arg::new("min")
                .long("min")
                .short('m')
                .help("Lower value of the y axis")
                .value_parser(value_parser!(f64))
                .allow_hyphen_values(true)
                .default_value("0")
                .takes_value(true),
        )
        .arg(
            Arg::new("max")
                .long("max")
                .short('M')
                .help("Upper value of the y axis")
                .value_parser(value_parser!(f64))
                .allow_hyphen_values(true)
                .default_value("100")
                .takes_value(true),
        );
    let axes = add_width(axes, "64");

    Command::new("sunstats")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .max_term_width(100)
        .subcommand_required(true)
        .arg(
            Arg::new("color")
                .short('c')
                .long("color")
                .help("Use colors in the output")
                .value_parser(["auto", "no", "yes"])
                .default_value("auto")
                .takes_value(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Be more verbose")
                .action(ArgAction::SetTrue),
        )
        .subcommand(diff)
        .subcommand(corr)
        .subcommand(fold)
        .subcommand(rollup)
        .subcommand(hist)
        .subcommand(axes)
}
