//! Pipe table layout.

/// Lay out extracted rows as a pipe table.
///
/// The first row is the header. Short rows are padded with empty cells up to
/// the widest row, every cell is left-justified to its column width (counted
/// in characters) and the separator row uses at least three dashes per column.
pub fn table(rows: &[Vec<String>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; column_count];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(header, &widths));
    lines.push(
        widths
            .iter()
            .map(|&width| "-".repeat(width.max(3)))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    lines.extend(body.iter().map(|row| format_row(row, &widths)));

    format!("\n\n{}\n\n", lines.join("\n"))
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let padding = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
