//! ASCII table rendering for the interactive shell. Lists and detail cards
//! are printed as bordered tables with numeric columns right-aligned.

/// Render headers and rows as an ASCII table string. Returns None when there
/// are no rows (callers print their empty state instead).
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    // Compute widths, capped so one long cell cannot blow out the layout.
    let max_col_width = max_cell_width();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count().min(max_col_width)).collect();
    for r in rows {
        for (i, cell) in r.iter().enumerate().take(headers.len()) {
            let w = display_len(cell);
            if w > widths[i] {
                widths[i] = w.min(max_col_width);
            }
        }
    }

    let mut out = String::new();
    let sep = build_separator(&widths);
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&build_row(&header_cells, &widths));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for r in rows {
        out.push_str(&build_row(r, &widths));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!("rows: {}", rows.len()));
    Some(out)
}

// Cap cell width from the terminal when available; 80 columns otherwise.
fn max_cell_width() -> usize {
    match terminal_size::terminal_size() {
        Some((terminal_size::Width(w), _)) if w > 20 => (w as usize).saturating_sub(10),
        _ => 80,
    }
}

fn display_len(s: &str) -> usize { s.chars().count() }

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('+');
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).cloned().unwrap_or_default();
        let (text, align_right) = (truncate(&cell, *w), is_numeric_like(&cell));
        s.push(' ');
        if align_right {
            let pad = w.saturating_sub(display_len(&text));
            s.push_str(&" ".repeat(pad));
            s.push_str(&text);
        } else {
            s.push_str(&text);
            let pad = w.saturating_sub(display_len(&text));
            s.push_str(&" ".repeat(pad));
        }
        s.push(' ');
        s.push('|');
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max { return s.to_string(); }
    if max <= 1 { return "…".to_string(); }
    let take = max - 1;
    s.chars().take(take).collect::<String>() + "…"
}

fn is_numeric_like(s: &str) -> bool {
    // crude detection for aligning numbers to the right
    let st = s.trim().trim_start_matches('₹').trim_start_matches('-');
    if st.is_empty() { return false; }
    let mut has_digit = false;
    for ch in st.chars() {
        if ch.is_ascii_digit() { has_digit = true; continue; }
        if ".-+eE,_%".contains(ch) { continue; }
        return false;
    }
    has_digit
}
