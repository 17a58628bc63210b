//! ASCII plotting for plain-stdout output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - bars: `#` columns (predicted score vs. reference)
//! - value labels above each bar, category labels below
//!
//! The y scale is always `[0, CHART_Y_MAX]` and bar heights clamp to
//! `[SCORE_MIN, SCORE_MAX]`; the printed value labels show the raw score.

use crate::domain::{CHART_Y_MAX, SCORE_MAX, SCORE_MIN};

/// Render the two-bar comparison chart (predicted vs. reference).
pub fn render_ascii_bars(score: f64, reference: f64, width: usize, height: usize) -> String {
    let width = width.max(20);
    let height = height.max(5);

    let mut grid = vec![vec![' '; width]; height];

    // Top row stays free so the tallest bar's value label still fits.
    let bar_rows = height - 1;

    let half = width / 2;
    let bar_w = (half / 2).max(1);
    let x_a = (half - bar_w) / 2;
    let x_b = half + (half - bar_w) / 2;

    draw_bar(&mut grid, x_a, bar_w, bar_height(score, bar_rows), score);
    draw_bar(&mut grid, x_b, bar_w, bar_height(reference, bar_rows), reference);

    let mut labels = vec![vec![' '; width]];
    write_centered(&mut labels, 0, x_a + bar_w / 2, "prevista");
    write_centered(&mut labels, 0, x_b + bar_w / 2, "referência");

    let mut out = String::new();
    out.push_str(&format!(
        "Notas: prevista={score:.2} | referência={reference:.2} | escala=[0, {CHART_Y_MAX:.0}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for row in labels {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Rows a value fills on the fixed scale, after the presentation clamp.
fn bar_height(value: f64, rows: usize) -> usize {
    let v = value.clamp(SCORE_MIN, SCORE_MAX);
    let filled = ((v / CHART_Y_MAX) * rows as f64).round() as usize;
    filled.min(rows)
}

fn draw_bar(grid: &mut [Vec<char>], x: usize, bar_w: usize, filled: usize, value: f64) {
    let height = grid.len();
    let width = grid[0].len();

    for row in (height - filled)..height {
        for col in x..(x + bar_w).min(width) {
            grid[row][col] = '#';
        }
    }

    let label_row = height.saturating_sub(filled + 1);
    write_centered(grid, label_row, x + bar_w / 2, &format!("{value:.2}"));
}

fn write_centered(grid: &mut [Vec<char>], row: usize, center: usize, text: &str) {
    let start = center.saturating_sub(text.chars().count() / 2);
    write_text(grid, row, start, text);
}

fn write_text(grid: &mut [Vec<char>], row: usize, start: usize, text: &str) {
    if row >= grid.len() {
        return;
    }
    let width = grid[0].len();
    for (i, ch) in text.chars().enumerate() {
        let col = start + i;
        if col < width {
            grid[row][col] = ch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_golden_snapshot_small() {
        let txt = render_ascii_bars(140.0, 200.0, 24, 8);
        let expected = concat!(
            "Notas: prevista=140.00 | referência=200.00 | escala=[0, 350]\n",
            "                        \n",
            "                        \n",
            "                        \n",
            "               200.00   \n",
            "   140.00      ######   \n",
            "   ######      ######   \n",
            "   ######      ######   \n",
            "   ######      ######   \n",
            "  prevista   referência \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn out_of_range_score_clamps_bar_but_labels_raw_value() {
        let txt = render_ascii_bars(9999.0, 0.0, 20, 5);

        assert!(txt.contains("9999.00"));
        assert!(txt.contains("0.00"));
        // 300-clamped bar over 4 rows of a 350 scale fills 3 rows of 5 cols;
        // the zero bar draws nothing.
        let hashes = txt.chars().filter(|c| *c == '#').count();
        assert_eq!(hashes, 15);
    }

    #[test]
    fn tiny_dimensions_are_raised_to_the_minimum() {
        let txt = render_ascii_bars(200.0, 200.0, 1, 1);
        // header + 5 grid rows + category labels
        assert_eq!(txt.lines().count(), 7);
        for line in txt.lines().skip(1) {
            assert_eq!(line.chars().count(), 20);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(
            render_ascii_bars(233.58, 200.0, 60, 12),
            render_ascii_bars(233.58, 200.0, 60, 12)
        );
    }
}
