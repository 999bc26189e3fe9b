//! Progress Bar Module
//!
//! Single-line console progress bar redrawn in place with a carriage return.

use std::io::{self, Write};
use std::time::Instant;

use chrono::Local;

// == Defaults ==
const DEFAULT_WIDTH: usize = 50;
const DEFAULT_FILL: &str = "-";

// == Progress Bar ==
/// Console progress bar.
///
/// # Example
/// ```
/// use toolshed::progress::ProgressBar;
///
/// let bar = ProgressBar::new().with_width(10);
/// assert_eq!(bar.render(5, 10), "[---->     ]  5/10");
/// ```
#[derive(Debug, Clone)]
pub struct ProgressBar {
    /// Number of cells between the brackets
    width: usize,
    /// Text repeated for each completed cell
    fill: String,
    /// Whether the head of the bar is drawn as `>`
    arrow: bool,
    /// Whether both counters are padded to the same width
    pad: bool,
    /// Start time, set when timing is enabled
    started: Option<Instant>,
}

impl ProgressBar {
    // == Constructor ==
    /// Creates a bar 50 cells wide with an arrow head and padded counters.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            fill: DEFAULT_FILL.to_string(),
            arrow: true,
            pad: true,
            started: None,
        }
    }

    /// Sets the number of cells, at least one.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Sets the text drawn for completed cells. Empty text falls back to `-`.
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Draws a `>` head at the leading edge of the filled cells.
    pub fn with_arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    /// Right-aligns the current count to the width of the total.
    pub fn with_pad(mut self, pad: bool) -> Self {
        self.pad = pad;
        self
    }

    /// Starts the clock used by [`finish`](Self::finish).
    pub fn with_timing(mut self, enabled: bool) -> Self {
        self.started = enabled.then(Instant::now);
        self
    }

    // == Render ==
    /// Formats the bar for `current` out of `total` steps.
    pub fn render(&self, current: usize, total: usize) -> String {
        let current = current.min(total);
        let fill = self.fill();

        let bar = if self.arrow {
            let done = scaled(current, total, self.width - 1);
            format!(
                "{}>{}",
                fill.repeat(done),
                " ".repeat(self.width - done - 1)
            )
        } else {
            let done = scaled(current, total, self.width);
            format!("{}{}", fill.repeat(done), " ".repeat(self.width - done))
        };

        let (current, total) = self.counters(current, total);
        format!("[{}] {}/{}", bar, current, total)
    }

    // == Print ==
    /// Redraws the bar on the current console line.
    pub fn print(&self, current: usize, total: usize) {
        let mut stdout = io::stdout().lock();
        // Console output is best effort.
        let _ = write!(stdout, "\r{}", self.render(current, total));
        let _ = stdout.flush();
    }

    // == Finish ==
    /// Ends the bar line, then reports elapsed time if timing is enabled.
    pub fn finish(&self) {
        println!();
        if let Some(summary) = self.summary() {
            println!("{}", summary);
        }
    }

    /// Elapsed-time line printed by [`finish`](Self::finish).
    pub fn summary(&self) -> Option<String> {
        self.started.map(|started| {
            format!(
                "{} [bar] Total time consumption: {:?}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                started.elapsed()
            )
        })
    }

    fn fill(&self) -> &str {
        if self.fill.is_empty() {
            DEFAULT_FILL
        } else {
            &self.fill
        }
    }

    fn counters(&self, current: usize, total: usize) -> (String, String) {
        let (current, total) = (current.to_string(), total.to_string());
        if !self.pad {
            return (current, total);
        }

        let len = current.len().max(total.len());
        (format!("{:>len$}", current), format!("{:>len$}", total))
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Cells completed out of `cells` for `current / total`.
fn scaled(current: usize, total: usize, cells: usize) -> usize {
    if total == 0 {
        return 0;
    }
    current * cells / total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_bar_progress() {
        let bar = ProgressBar::new().with_width(10);

        assert_eq!(bar.render(0, 10), "[>         ]  0/10");
        assert_eq!(bar.render(10, 10), "[--------->] 10/10");
    }

    #[test]
    fn test_plain_bar_progress() {
        let bar = ProgressBar::new().with_width(10).with_arrow(false);

        assert_eq!(bar.render(5, 10), "[-----     ]  5/10");
        assert_eq!(bar.render(10, 10), "[----------] 10/10");
    }

    #[test]
    fn test_without_padding() {
        let bar = ProgressBar::new()
            .with_width(4)
            .with_arrow(false)
            .with_pad(false);

        assert_eq!(bar.render(1, 100), "[    ] 1/100");
    }

    #[test]
    fn test_custom_fill_and_empty_fallback() {
        let bar = ProgressBar::new().with_width(4).with_arrow(false);

        assert_eq!(bar.clone().with_fill("#").render(2, 4), "[##  ] 2/4");
        assert_eq!(bar.with_fill("").render(2, 4), "[--  ] 2/4");
    }

    #[test]
    fn test_zero_total_and_overflow() {
        let bar = ProgressBar::new().with_width(4).with_arrow(false);

        assert_eq!(bar.render(0, 0), "[    ] 0/0");
        assert_eq!(bar.render(9, 4), "[----] 4/4");
    }

    #[test]
    fn test_width_at_least_one() {
        let bar = ProgressBar::new().with_width(0);
        assert_eq!(bar.render(3, 3), "[>] 3/3");
    }

    #[test]
    fn test_default_width() {
        let rendered = ProgressBar::default().render(0, 1);
        assert_eq!(rendered.len(), DEFAULT_WIDTH + 2 + " 0/1".len());
    }

    #[test]
    fn test_summary_only_with_timing() {
        assert!(ProgressBar::new().summary().is_none());

        let summary = ProgressBar::new().with_timing(true).summary().unwrap();
        assert!(summary.contains("[bar] Total time consumption:"));
    }
}
