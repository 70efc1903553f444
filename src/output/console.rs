//! Console rendering of move rows

use crate::analysis::{format_output_row, Move, OUTPUT_HEADERS};

/// Render moves as an aligned text table with a header row
pub fn render_moves_table(moves: &[Move]) -> String {
    let rows: Vec<[String; 6]> = moves.iter().map(format_output_row).collect();

    let mut widths = OUTPUT_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, OUTPUT_HEADERS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Render moves as one JSON object per line
pub fn render_moves_json(moves: &[Move]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for mv in moves {
        out.push_str(&serde_json::to_string(mv)?);
        out.push('\n');
    }
    Ok(out)
}
