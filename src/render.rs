//! Rendering histograms as text bar charts.

use crate::histogram::{Bucket, CommitHistograms, Histogram};

const DONE_BLOCK: &str = "█";
const EMPTY_BLOCK: &str = "░";

/// The number of cells in a bar; each filled cell stands for 4 percentage points
const BAR_WIDTH: usize = 25;

/// Width of the `key:` column
const KEY_WIDTH: usize = 14;

/// Width of the `N commits` column
const COUNT_WIDTH: usize = 15;

/// Spaces between the bar and the percentage
const GAP_WIDTH: usize = 5;

/// Render one line per key of the histogram, in key order:
///
/// ```text
/// Monday:       3 commits      ███████████████████░░░░░░     75.00%
/// ```
///
/// Each line is followed by a blank line. Percentages are shares of the histogram total, or 0 for
/// an empty histogram.
pub fn render_graph<K: Bucket>(histogram: &Histogram<K>) -> String {
    let total = histogram.total();
    let mut out = String::new();
    for (key, count) in histogram.iter() {
        let key = format!("{}:", key.label());
        let commits = format!("{count} commit{}", if count == 1 { "" } else { "s" });
        out.push_str(&format!(
            "{key:<KEY_WIDTH$}{commits:<COUNT_WIDTH$}{}{:GAP_WIDTH$}{}%\n\n",
            make_bar(filled_cells(count, total)),
            "",
            format_hundredths(percentage_hundredths(count, total)),
        ));
    }
    out
}

/// `count / total` as hundredths of a percent, rounded half up; 0 when `total` is 0.
fn percentage_hundredths(count: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        (2 * 10_000 * count + total) / (2 * total)
    }
}

fn format_hundredths(hundredths: u64) -> String {
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// The number of bar cells for `count / total`, rounded half up.
fn filled_cells(count: u64, total: u64) -> usize {
    if total == 0 {
        0
    } else {
        let cells = (2 * BAR_WIDTH as u64 * count + total) / (2 * total);
        (cells as usize).min(BAR_WIDTH)
    }
}

fn make_bar(filled: usize) -> String {
    let filled = filled.min(BAR_WIDTH);
    DONE_BLOCK.repeat(filled) + &EMPTY_BLOCK.repeat(BAR_WIDTH - filled)
}

/// Render the README content for a run: a weekday subsection and a time-of-day subsection.
///
/// With `preformatted`, each graph is wrapped in `<pre>` so that web viewers keep the columns
/// aligned.
pub fn render_readme_section(histograms: &CommitHistograms, preformatted: bool) -> String {
    let wrap = |graph: String| {
        if preformatted {
            format!("<pre>{graph}</pre>")
        } else {
            graph
        }
    };
    format!(
        "### Weekday stats\n{}\n\n\n ### Time of day stats\n{}",
        wrap(render_graph(&histograms.weekdays)),
        wrap(render_graph(&histograms.times)),
    )
}
