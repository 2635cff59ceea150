//! Console rendering of frequency reports: a table followed by a horizontal
//! bar chart

use crate::query::{FrequencyReport, SubstringFrequency};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const ID_HEADER: &str = "Id";
const SUBSTRING_HEADER: &str = "Substring";
const PERCENTAGE_HEADER: &str = "Percentage";

/// Narrowest Id and Substring column
const MIN_COLUMN_WIDTH: usize = 4;
/// Width of the Percentage column, excluding the `%` sign
const PERCENTAGE_WIDTH: usize = 30;
/// Length of the longest bar
const CHART_WIDTH: usize = 70;
/// Significant digits of printed percentages
const SIGNIFICANT_DIGITS: i32 = 6;

/// Print a report to stdout
pub fn print_report(report: &FrequencyReport, color: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);
    render_report(&mut stdout, report)
}

/// Render the qualifying total, the result table and the bar chart
pub fn render_report<W: WriteColor>(out: &mut W, report: &FrequencyReport) -> io::Result<()> {
    writeln!(
        out,
        "Number of substrings longer or equal to {} is: {}",
        report.min_length, report.total
    )?;
    writeln!(out)?;
    render_entries(out, &report.entries)
}

/// Render ranked entries as a table and, for two or more entries, a chart
pub fn render_entries<W: WriteColor>(out: &mut W, entries: &[SubstringFrequency]) -> io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No results to show.")?;
        return Ok(());
    }

    let id_width = MIN_COLUMN_WIDTH.max(ID_HEADER.len());
    let text_width = entries
        .iter()
        .map(|e| e.substring.len())
        .fold(MIN_COLUMN_WIDTH.max(SUBSTRING_HEADER.len()), usize::max);
    let number_width = PERCENTAGE_WIDTH.max(PERCENTAGE_HEADER.len());

    let separator = format!(
        "+{}+{}+{}+",
        "-".repeat(id_width),
        "-".repeat(text_width),
        "-".repeat(number_width + 1)
    );

    // Table header
    writeln!(out, "{}", separator)?;
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(
        out,
        "|{:>id_width$}|{:>text_width$}|{:>header_width$}|",
        ID_HEADER,
        SUBSTRING_HEADER,
        PERCENTAGE_HEADER,
        header_width = number_width + 1
    )?;
    out.reset()?;
    writeln!(out)?;
    writeln!(out, "{}", separator)?;

    // Table rows
    for (id, entry) in entries.iter().enumerate() {
        write!(out, "|{:>id_width$}|", id)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{:>text_width$}", entry.substring)?;
        out.reset()?;
        writeln!(
            out,
            "|{:>number_width$}%|",
            format_percentage(entry.percentage)
        )?;
        writeln!(out, "{}", separator)?;
    }
    writeln!(out)?;

    render_chart(out, entries, id_width, number_width)
}

/// Bars are scaled against the largest percentage from a zero baseline
fn render_chart<W: WriteColor>(
    out: &mut W,
    entries: &[SubstringFrequency],
    id_width: usize,
    number_width: usize,
) -> io::Result<()> {
    if entries.len() < 2 {
        writeln!(out, "Only one result, nothing to show on a chart")?;
        return Ok(());
    }

    let minimum = 0.0;
    let maximum = entries
        .iter()
        .map(|e| e.percentage)
        .fold(entries[0].percentage, f64::max);
    let spread = (maximum - minimum).abs();

    writeln!(out, "Frequency difference horizontal bar chart:")?;
    writeln!(out)?;

    writeln!(
        out,
        "{:>id_width$}{:<left$}| Maximal %",
        "",
        "| Minimal %",
        left = CHART_WIDTH - 1
    )?;
    writeln!(
        out,
        "{:<id_width$}|{:<left$}|{}",
        ID_HEADER,
        format_percentage(minimum),
        format_percentage(maximum),
        left = CHART_WIDTH - 2
    )?;
    writeln!(
        out,
        "{}+{:->left$}{}",
        "-".repeat(id_width),
        "+",
        "-".repeat(number_width),
        left = CHART_WIDTH - 1
    )?;

    for (id, entry) in entries.iter().enumerate() {
        let points = if spread > 0.0 {
            (CHART_WIDTH as f64 * (entry.percentage - minimum) / spread).round() as usize
        } else {
            0
        };

        write!(out, "{:<id_width$}", id)?;
        if points > 1 {
            write!(out, "|")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "{}", "#".repeat(points - 2))?;
            out.reset()?;
        }
        writeln!(out, "| {}%", format_percentage(entry.percentage))?;
    }

    Ok(())
}

/// Format like C's `%g`: six significant digits, trailing zeros dropped,
/// exponent notation for very small or large values
pub fn format_percentage(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let formatted = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
        let (mantissa, exp) = formatted.split_once('e').unwrap_or((&formatted, "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs());
    }

    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
