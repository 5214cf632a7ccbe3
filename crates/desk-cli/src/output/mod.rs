use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::context::PageContext;
use crate::ui;

pub mod highlight;
pub mod table;

/// Column headers and pre-formatted rows for table output.
#[derive(Debug, Default)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// Search text to highlight.
    pub highlight: Option<String>,
    /// Line printed under the table (paging summary and the like).
    pub footer: Option<String>,
}

/// Responses with a purpose-built table layout.
pub trait Tabular {
    fn table(&self) -> Table;
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a list response: JSON as-is, tables with the page title and footer.
pub fn show<T: Serialize + Tabular>(
    page: &PageContext,
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Table => render_titled(page, &value.table(), ui::prefs().quiet),
        OutputFormat::Json | OutputFormat::Raw => render(value, format)?,
    };
    println!("{rendered}");
    Ok(())
}

fn options(highlight: Option<&str>) -> table::TableOptions<'_> {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
        highlight,
    }
}

fn render_titled(page: &PageContext, table: &Table, quiet: bool) -> String {
    let body = if table.rows.is_empty() {
        String::from("(no rows)")
    } else {
        table::render_table(&table.headers, &table.rows, options(table.highlight.as_deref()))
    };

    if quiet {
        return body;
    }

    let mut out = format!("{}\n\n{body}", page.title());
    if let Some(footer) = &table.footer {
        out.push_str("\n\n");
        out.push_str(footer);
    }
    out
}

fn render_value_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let rendered = match value {
        Value::Array(items) => render_array_table(&items),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            table::render_table(&["key", "value"], &rows, options(None))
        }
        scalar => table::render_table(&["value"], &[vec![value_to_cell(&scalar)]], options(None)),
    };
    Ok(rendered)
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options(None));
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, options(None))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

/// Date cell: `YYYY-MM-DD HH:MM` in UTC.
#[must_use]
pub fn date_cell(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Footer for an offset page: `Page 2 of 5 (43 cases)`.
#[must_use]
pub fn page_footer<T>(page: &desk_core::page::OffsetPage<T>, noun: &str) -> String {
    format!(
        "Page {} of {} ({} {noun})",
        page.page_number + 1,
        page.total_pages.max(1),
        page.total_count
    )
}
