use comfy_table::{ContentArrangement, Table, presets};

use crate::config::OutputFormat;
use crate::paginator::{PageLink, PageSummary};

const ELLIPSIS: &str = "…";
const ACTIVE_MARK: &str = "●";
const DEFAULT_MAX_CELL_WIDTH: usize = 140;
const DEFAULT_MAX_OUTPUT_CHARS: usize = 25_000;

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub max_cell_width: usize,
    pub max_output_chars: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
        }
    }
}

pub fn render_key_value_table(
    title: &str,
    rows: &[(String, String)],
    format: OutputFormat,
    options: &TableOptions,
) -> String {
    let mut table = new_table(format);
    table.set_header(vec![title.to_string(), "Value".to_string()]);

    for (key, value) in rows {
        let key = truncate_string(key, options.max_cell_width);
        let value = truncate_string(value, options.max_cell_width);
        table.add_row(vec![key, value]);
    }

    truncate_output(table.to_string(), options.max_output_chars)
}

pub fn render_links_table(
    links: &[PageLink],
    total_pages: u64,
    format: OutputFormat,
    options: &TableOptions,
) -> String {
    let mut table = new_table(format);
    table.set_header(vec!["page", "href", "active"]);

    for link in links {
        table.add_row(vec![
            link.page.to_string(),
            truncate_string(&link.href, options.max_cell_width),
            if link.active {
                ACTIVE_MARK.to_string()
            } else {
                String::new()
            },
        ]);
    }

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&window_footer(links, total_pages));
    truncate_output(output, options.max_output_chars)
}

pub fn summary_rows(summary: &PageSummary) -> Vec<(String, String)> {
    vec![
        ("totalCount".to_string(), summary.total_count.to_string()),
        ("perPage".to_string(), summary.per_page.to_string()),
        ("windowSize".to_string(), summary.window_size.to_string()),
        ("urlPrefix".to_string(), summary.url_prefix.clone()),
        ("requestedPage".to_string(), summary.requested_page.to_string()),
        ("currentPage".to_string(), summary.current_page.to_string()),
        ("totalPages".to_string(), summary.total_pages.to_string()),
        (
            "window".to_string(),
            format!("{}..={}", summary.window_start, summary.window_end),
        ),
        (
            "offsets".to_string(),
            format!("[{}, {})", summary.start, summary.end),
        ),
        ("hasPrevious".to_string(), summary.has_previous.to_string()),
        ("hasNext".to_string(), summary.has_next.to_string()),
    ]
}

fn new_table(format: OutputFormat) -> Table {
    let mut table = Table::new();
    match format {
        OutputFormat::Markdown => {
            table.load_preset(presets::ASCII_MARKDOWN);
        }
        _ => {
            table.load_preset(presets::UTF8_FULL);
        }
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn window_footer(links: &[PageLink], total_pages: u64) -> String {
    match (links.first(), links.last()) {
        (Some(first), Some(last)) => {
            format!("Pages {}-{} of {}", first.page, last.page, total_pages)
        }
        _ => format!("No pages (total: {})", total_pages),
    }
}

fn truncate_string(input: &str, max_len: usize) -> String {
    let len = input.chars().count();
    if len <= max_len {
        return input.to_string();
    }
    if max_len <= 1 {
        return ELLIPSIS.to_string();
    }
    let truncated: String = input.chars().take(max_len - 1).collect();
    format!("{}{}", truncated, ELLIPSIS)
}

fn truncate_output(output: String, max_len: usize) -> String {
    if output.len() <= max_len {
        return output;
    }
    let mut truncated = output.chars().take(max_len).collect::<String>();
    truncated.push_str("\n[output truncated]");
    truncated
}
