//! Nice QTaper output formatting.

use std::fmt;

const QTAPER_BANNER_LENGTH: usize = 103;

/// Logs an error to the `qtaper-output` logger as well as the default logger.
macro_rules! qtaper_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "qtaper-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a warning to the `qtaper-output` logger.
macro_rules! qtaper_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "qtaper-output", $fmt, $($($arg)*)?) }
}

/// Logs a main output line to the `qtaper-output` logger.
macro_rules! qtaper_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "qtaper-output", $fmt, $($($arg)*)?) }
}

pub(crate) use {qtaper_error, qtaper_output, qtaper_warn};

/// Returns the three lines of a boxed section title at least as wide as the QTaper banner.
pub(crate) fn title_lines(title: &str) -> [String; 3] {
    let width = title.chars().count().max(QTAPER_BANNER_LENGTH - 6);
    let bar = "─".repeat(width);
    [
        format!("┌──{bar}──┐"),
        format!("│§ {title:^width$} §│"),
        format!("└──{bar}──┘"),
    ]
}

/// Logs a nicely formatted section title to the `qtaper-output` logger.
pub(crate) fn log_title(title: &str) {
    title_lines(title)
        .iter()
        .for_each(|line| qtaper_output!("{line}"));
}

/// Returns the double underline of a subtitle.
fn subtitle_rule(subtitle: &str) -> String {
    "═".repeat(subtitle.chars().count())
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{}", subtitle_rule(subtitle))
}

/// Logs a nicely formatted subtitle to the `qtaper-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    qtaper_output!("{subtitle}");
    qtaper_output!("{}", subtitle_rule(subtitle));
}

/// Logs a nicely formatted macro-section beginning to the `qtaper-output` logger.
pub(crate) fn log_macsec_begin(sectitle: &str) {
    let width = QTAPER_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    qtaper_output!("❬❬❬❬❬ [Begin] {sectitle_space:❬<width$}");
}

/// Logs a nicely formatted macro-section ending to the `qtaper-output` logger.
pub(crate) fn log_macsec_end(sectitle: &str) {
    let width = QTAPER_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    qtaper_output!("❭❭❭❭❭ [ End ] {sectitle_space:❭<width$}");
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// Returns a horizontal table rule of the given width.
pub(crate) fn table_rule(width: usize) -> String {
    "┈".repeat(width)
}

/// A trait for logging QTaper outputs nicely.
pub(crate) trait QTaperOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            qtaper_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> QTaperOutput for T where T: fmt::Debug + fmt::Display {}
