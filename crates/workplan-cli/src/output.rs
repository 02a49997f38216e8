use chrono::NaiveDateTime;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render_table(headers, &rows));
}

/// Left-aligned columns separated by two spaces, with a dashed rule under the header.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:w$}", cell)
            })
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.iter().map(|h| h.to_string()).collect());
    out.push_str(&line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        out.push_str(&line(row.clone()));
    }
    out
}

pub fn fmt_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}h")
    } else {
        format!("{hours:.1}h")
    }
}

pub fn fmt_date(at: NaiveDateTime) -> String {
    at.format("%a %Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns() {
        let out = render_table(
            &["ID", "TITLE"],
            &[
                vec!["1".to_string(), "Short".to_string()],
                vec!["10-2".to_string(), "A longer title".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID    TITLE");
        assert_eq!(lines[1], "----  --------------");
        assert_eq!(lines[2], "1     Short");
        assert_eq!(lines[3], "10-2  A longer title");
    }

    #[test]
    fn hours_formatting() {
        assert_eq!(fmt_hours(4.0), "4h");
        assert_eq!(fmt_hours(5.5), "5.5h");
    }
}
