use super::MetricsTable;

const BAR_WIDTH: usize = 40;

/// Render the table as horizontal text bars, one block per timestamp and one
/// bar per column. Bars are scaled to the largest value in the table; gaps
/// are shown as `-`.
pub fn render_chart(table: &MetricsTable, title: &str) -> String {
    let mut out = format!("{title}\n");
    if table.is_empty() {
        out.push_str("(no datapoints)\n");
        return out;
    }

    let max = table
        .rows()
        .flat_map(|(_, values)| values.iter().flatten().copied())
        .fold(0.0_f64, f64::max);
    let label_width = table.columns().iter().map(|c| c.len()).max().unwrap_or(0);

    for (ts, values) in table.rows() {
        out.push_str(&format!("{}\n", ts.format("%Y-%m-%d %H:%M:%S")));
        for (column, value) in table.columns().iter().zip(values) {
            let bar = match value {
                Some(v) => {
                    let len = if max > 0.0 {
                        ((v / max) * BAR_WIDTH as f64).round() as usize
                    } else {
                        0
                    };
                    format!("{} {v}", "#".repeat(len))
                }
                None => "-".to_string(),
            };
            out.push_str(&format!("  {column:<label_width$} | {bar}\n"));
        }
    }
    out
}
