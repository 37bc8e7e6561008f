use serde_json::Value;

pub use crate::types::OutputFormat;

/// Renders a JSON value for the terminal.
pub trait Formatter {
    fn format(&self, data: &Value) -> anyhow::Result<String>;
}

pub struct JsonFormatter;
pub struct YamlFormatter;

#[derive(Debug, Default)]
pub struct TableFormatter {
    columns: Option<Vec<String>>,
}

impl TableFormatter {
    /// Render exactly these columns, in this order.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: Some(columns.into_iter().map(Into::into).collect()),
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, data: &Value) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

impl Formatter for YamlFormatter {
    fn format(&self, data: &Value) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(data)?)
    }
}

/// Arrays of objects become aligned rows; a single object becomes a
/// key/value listing. Without explicit columns the headers are gathered
/// from the rows, with `Timestamp` leading when present.
impl Formatter for TableFormatter {
    fn format(&self, data: &Value) -> anyhow::Result<String> {
        match data {
            Value::Array(items) if items.is_empty() => {
                Ok("No data available".to_string())
            }
            Value::Array(items) => {
                let headers = self
                    .columns
                    .clone()
                    .unwrap_or_else(|| collect_headers(items));
                let rows: Vec<Vec<String>> = items
                    .iter()
                    .map(|item| {
                        headers
                            .iter()
                            .map(|h| format_value(item.get(h).unwrap_or(&Value::Null)))
                            .collect()
                    })
                    .collect();
                Ok(render_rows(&headers, &rows))
            }
            Value::Object(obj) => {
                let headers = vec!["Key".to_string(), "Value".to_string()];
                let rows: Vec<Vec<String>> = obj
                    .iter()
                    .map(|(k, v)| vec![k.clone(), format_value(v)])
                    .collect();
                Ok(render_rows(&headers, &rows))
            }
            other => Ok(format_value(other)),
        }
    }
}

fn collect_headers(items: &[Value]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for item in items {
        if let Value::Object(obj) = item {
            for key in obj.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    if let Some(pos) = headers.iter().position(|h| h == "Timestamp") {
        let timestamp = headers.remove(pos);
        headers.insert(0, timestamp);
    }
    headers
}

fn render_rows(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

pub fn get_formatter(format: &OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Table => Box::new(TableFormatter::default()),
    }
}

/// Format and print data in the specified format
pub fn print_output(data: &Value, format: &OutputFormat) -> anyhow::Result<()> {
    let output = get_formatter(format).format(data)?;
    println!("{}", output.trim_end());
    Ok(())
}

/// Like [`print_output`] for row data whose table columns have a fixed order.
pub fn print_rows(
    rows: &Value,
    columns: &[String],
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let output = match format {
        OutputFormat::Table => {
            TableFormatter::with_columns(columns.iter().cloned()).format(rows)?
        }
        other => get_formatter(other).format(rows)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}

/// Output arguments shared by every command that prints data
#[derive(clap::Args, Clone, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}
