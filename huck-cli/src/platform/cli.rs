//! CLI formatted output
//!
//! Command-line friendly error display with source context.

use huck_api::HuckError;

/// Print an error, with source context when the error carries a position
pub fn print_error_with_source(e: &HuckError, source: &str) {
    eprintln!("❌ {}", e);

    if let (Some(line), Some(col)) = (e.line(), e.column()) {
        print_source_context(source, line, col);
    }
}

/// Print the lines around an error position, with a marker under the column
pub fn print_source_context(source: &str, error_line: usize, error_col: usize) {
    const CONTEXT_LINES: usize = 5;

    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return;
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);

    // line numbers are right-aligned to the widest one shown
    let num_width = end_line.to_string().len();

    let separator = "-".repeat(num_width + 1);
    eprintln!("{}|--", separator);

    for line_idx in start_line..=end_line {
        let line_content = lines[line_idx - 1];
        eprintln!("{:>num_width$} | {}", line_idx, line_content);

        if line_idx == error_line {
            let marker_offset = error_col.saturating_sub(1);
            eprintln!("{} | {}^", " ".repeat(num_width), " ".repeat(marker_offset));
        }
    }

    eprintln!("{}|--", separator);
}
