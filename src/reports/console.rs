use crate::Result;
use crate::config::Config;
use crate::metrics::MetricsReport;
use crate::misc::ColorMode;
use core::fmt::{self, Write};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, stdout};
use terminal_size::{Width, terminal_size};

const DEFAULT_TERMINAL_WIDTH: usize = 120;
const SEPARATOR_WIDTH: usize = 40;
const MAX_BAR_WIDTH: usize = 30;

pub fn generate<W: Write>(report: &MetricsReport, config: &Config, color: ColorMode, writer: &mut W) -> Result<()> {
    ConsoleReporter::new(writer, config, color).generate_report(report)
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colors: ColorScheme,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    fn new(writer: &'a mut W, config: &Config, color_mode: ColorMode) -> Self {
        Self {
            writer,
            colors: ColorScheme::new(config, color_mode),
        }
    }

    fn generate_report(&mut self, report: &MetricsReport) -> Result<()> {
        self.write_summary(report)?;

        self.write_distribution("Severity", &report.severity_distribution)?;
        self.write_distribution("Found Stage", &report.stage_distribution)?;
        self.write_sprint_table(report)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &MetricsReport) -> Result<()> {
        self.colors.write_styled_text(self.writer, "Defect Quality Report", TextStyle::Bold)?;
        writeln!(self.writer)?;
        self.colors.write_styled_line(self.writer, "═", SEPARATOR_WIDTH, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "Total Defects      : {}", report.total_defects)?;

        write!(self.writer, "Escape Rate        : ")?;
        self.colors
            .write_banded_value(self.writer, report.defect_escape_rate, "%", Band::EscapeRate)?;
        writeln!(self.writer)?;

        write!(self.writer, "Mean Resolution    : ")?;
        self.colors
            .write_banded_value(self.writer, report.mean_time_to_resolution_days, " days", Band::Mttr)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distribution(&mut self, heading: &str, counts: &std::collections::BTreeMap<String, u64>) -> Result<()> {
        if counts.is_empty() {
            return Ok(());
        }

        writeln!(self.writer)?;
        self.colors.write_styled_text(self.writer, heading, TextStyle::Bold)?;
        writeln!(self.writer)?;

        let width = counts.keys().map(String::len).max().unwrap_or(0);
        let max_count = counts.values().copied().max().unwrap_or(1).max(1);

        for (label, &count) in counts {
            write!(self.writer, "  {label:<width$}  {count:>5}  ")?;
            self.colors.write_bar(self.writer, count, max_count)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_sprint_table(&mut self, report: &MetricsReport) -> Result<()> {
        if report.defects_by_sprint.is_empty() {
            return Ok(());
        }

        writeln!(self.writer)?;
        self.colors.write_styled_text(self.writer, "Sprints", TextStyle::Bold)?;
        writeln!(self.writer)?;

        let width = report.defects_by_sprint.keys().map(String::len).max().unwrap_or(0).max("Sprint".len());

        write!(self.writer, "  ")?;
        self.colors.write_styled_text(self.writer, "Sprint", TextStyle::Bold)?;
        write!(self.writer, "{:pad$}  ", "", pad = width - "Sprint".len())?;
        self.colors.write_styled_text(self.writer, "Defects", TextStyle::Bold)?;
        write!(self.writer, "  ")?;
        self.colors.write_styled_text(self.writer, "Escape Rate", TextStyle::Bold)?;
        writeln!(self.writer)?;

        for (sprint, &count) in &report.defects_by_sprint {
            write!(self.writer, "  {sprint:<width$}  {count:>7}  ")?;
            match report.escape_rate_by_sprint.get(sprint) {
                Some(&rate) => self.colors.write_banded_value(self.writer, rate, "%", Band::EscapeRate)?,
                None => write!(self.writer, "-")?,
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum TextStyle {
    Bold,
    Dimmed,
}

#[derive(Copy, Clone)]
enum Band {
    EscapeRate,
    Mttr,
}

struct ColorScheme {
    escape_rate_bands: [f64; 2],
    mttr_bands: [f64; 2],
    enabled: bool,
}

impl ColorScheme {
    fn new(config: &Config, color_mode: ColorMode) -> Self {
        let enabled = matches!(color_mode, ColorMode::Always) || (matches!(color_mode, ColorMode::Auto) && stdout().is_terminal());
        Self {
            escape_rate_bands: config.escape_rate_bands,
            mttr_bands: config.mttr_bands,
            enabled,
        }
    }

    fn write_styled_text<W: Write>(&self, writer: &mut W, text: &str, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{text}");
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", text.bold()),
            TextStyle::Dimmed => write!(writer, "{}", text.dimmed()),
        }
    }

    fn write_styled_line<W: Write>(&self, writer: &mut W, ch: &str, width: usize, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{}", ch.repeat(width));
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", ch.repeat(width).bold()),
            TextStyle::Dimmed => write!(writer, "{}", ch.repeat(width).dimmed()),
        }
    }

    fn write_banded_value<W: Write>(&self, writer: &mut W, value: f64, unit: &str, band: Band) -> fmt::Result {
        let text = format!("{value:.2}{unit}");
        if !self.enabled {
            return write!(writer, "{text}");
        }

        let bands = match band {
            Band::EscapeRate => self.escape_rate_bands,
            Band::Mttr => self.mttr_bands,
        };

        if value < bands[0] {
            write!(writer, "{}", text.green())
        } else if value < bands[1] {
            write!(writer, "{}", text.yellow())
        } else {
            write!(writer, "{}", text.red())
        }
    }

    fn write_bar<W: Write>(&self, writer: &mut W, count: u64, max_count: u64) -> fmt::Result {
        let bar_space = available_bar_width();

        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss, reason = "Bar widths are tiny")]
        let len = ((count as f64 / max_count as f64) * bar_space as f64).round() as usize;

        self.write_styled_line(writer, "▪", len.max(1), TextStyle::Dimmed)
    }
}

fn available_bar_width() -> usize {
    detect_terminal_width().saturating_sub(60).clamp(10, MAX_BAR_WIDTH)
}

fn detect_terminal_width() -> usize {
    if stdout().is_terminal() {
        terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(Width(w), _)| usize::from(w))
    } else {
        DEFAULT_TERMINAL_WIDTH
    }
}
