//! Page-window arithmetic for list views and the `<nav>` fragment rendered
//! from it.
//!
//! A [`Paginator`] is built once per request from a record count and the raw
//! `page` value the client sent. Every derived field is computed up front, so
//! the accessors and [`Paginator::render`] are cheap and side-effect free.

use std::fmt;

use serde::Serialize;
use tracing::debug;

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const DEFAULT_WINDOW_SIZE: u64 = 7;

const FIRST_LABEL: &str = "首页";
const LAST_LABEL: &str = "尾页";
const NAV_OPEN: &str =
    r#"<nav aria-label="Page navigation" class="text-center"><ul class="pagination">"#;
const NAV_CLOSE: &str = "</ul></nav>";

/// Raw page request as it arrives from a query string, form, or caller code.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestedPage {
    Number(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl RequestedPage {
    /// Resolve to a definite page number. Anything that is not an integer
    /// falls back to page 1.
    pub fn resolve(&self) -> i64 {
        match self {
            RequestedPage::Number(value) => *value,
            RequestedPage::Float(value) if value.is_finite() => value.trunc() as i64,
            RequestedPage::Float(_) => 1,
            RequestedPage::Text(value) => parse_page(value),
            RequestedPage::Missing => 1,
        }
    }
}

/// Parse a textual page number, defaulting to 1 when the input is not an
/// integer. Accepts what Python's `int()` accepts: surrounding whitespace, a
/// sign, single underscores between digits, and any Unicode decimal digits.
/// Out-of-range digits saturate so they still clamp to the last page.
pub fn parse_page(input: &str) -> i64 {
    parse_integer(input.trim()).unwrap_or_else(|| {
        debug!("Unparseable page {:?}; using page 1", input);
        1
    })
}

fn parse_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    let mut value: i64 = 0;
    for ch in digits.chars().filter(|ch| *ch != '_') {
        let digit = decimal_digit(ch)?;
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    Some(value)
}

/// Value of a Unicode `Nd` character. Every decimal digit block is ten
/// consecutive code points starting at one of these zeros.
fn decimal_digit(ch: char) -> Option<i64> {
    if let Some(digit) = ch.to_digit(10) {
        return Some(i64::from(digit));
    }
    let code = u32::from(ch);
    let zero = match DIGIT_ZEROS.binary_search(&code) {
        Ok(index) => DIGIT_ZEROS[index],
        Err(0) => return None,
        Err(index) => DIGIT_ZEROS[index - 1],
    };
    (code - zero < 10).then_some(i64::from(code - zero))
}

const DIGIT_ZEROS: [u32; 67] = [
    0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6, 0x0D66,
    0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0, 0x1A80, 0x1A90,
    0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10,
    0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650,
    0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16A60, 0x16AC0,
    0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950,
    0x1FBF0,
];

impl From<i64> for RequestedPage {
    fn from(value: i64) -> Self {
        RequestedPage::Number(value)
    }
}

impl From<i32> for RequestedPage {
    fn from(value: i32) -> Self {
        RequestedPage::Number(i64::from(value))
    }
}

impl From<u32> for RequestedPage {
    fn from(value: u32) -> Self {
        RequestedPage::Number(i64::from(value))
    }
}

impl From<u64> for RequestedPage {
    fn from(value: u64) -> Self {
        RequestedPage::Number(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for RequestedPage {
    fn from(value: usize) -> Self {
        RequestedPage::Number(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for RequestedPage {
    fn from(value: f64) -> Self {
        RequestedPage::Float(value)
    }
}

impl From<&str> for RequestedPage {
    fn from(value: &str) -> Self {
        RequestedPage::Text(value.to_string())
    }
}

impl From<String> for RequestedPage {
    fn from(value: String) -> Self {
        RequestedPage::Text(value)
    }
}

impl From<&String> for RequestedPage {
    fn from(value: &String) -> Self {
        RequestedPage::Text(value.clone())
    }
}

impl<T: Into<RequestedPage>> From<Option<T>> for RequestedPage {
    fn from(value: Option<T>) -> Self {
        value.map_or(RequestedPage::Missing, Into::into)
    }
}

/// Page size and link-window width. Zero is raised to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub per_page: u64,
    pub window_size: u64,
}

impl PageOptions {
    pub fn new(per_page: u64, window_size: u64) -> Self {
        Self {
            per_page: per_page.max(1),
            window_size: window_size.max(1),
        }
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// One entry of the visible page-number window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u64,
    pub href: String,
    pub active: bool,
}

/// Snapshot of every derived value, used for JSON and table output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub total_count: u64,
    pub per_page: u64,
    pub window_size: u64,
    pub url_prefix: String,
    pub requested_page: i64,
    pub current_page: u64,
    pub total_pages: u64,
    pub window_start: u64,
    pub window_end: u64,
    pub start: u64,
    pub end: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    total_count: u64,
    per_page: u64,
    window_size: u64,
    url_prefix: String,
    requested_page: i64,
    current_page: u64,
    total_pages: u64,
    window_start: u64,
    window_end: u64,
}

impl Paginator {
    /// Build with the default page size (10) and window size (7).
    pub fn new(
        total_count: u64,
        requested_page: impl Into<RequestedPage>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self::with_options(
            total_count,
            requested_page,
            url_prefix,
            PageOptions::default(),
        )
    }

    pub fn with_options(
        total_count: u64,
        requested_page: impl Into<RequestedPage>,
        url_prefix: impl Into<String>,
        options: PageOptions,
    ) -> Self {
        let per_page = options.per_page.max(1);
        let window_size = options.window_size.max(1);
        let requested_page = requested_page.into().resolve();

        let half = i128::from(window_size / 2);
        let window = i128::from(window_size);

        let mut total_pages = total_count / per_page;
        if total_count % per_page != 0 {
            total_pages += 1;
        }
        let total = i128::from(total_pages);

        // Both clamps run in order: an empty result set first pulls the page
        // down to 0, then back up to 1.
        let mut current = i128::from(requested_page);
        if current > total {
            current = total;
        }
        if current < 1 {
            current = 1;
        }

        let mut start = current - half;
        let mut end = current + half;

        if current - half <= 0 {
            start = 1;
            end = window;
        }
        if current + half >= total {
            end = total;
            start = total - window + 1;
        }
        if total < window {
            start = 1;
            end = total;
        }

        let paginator = Self {
            total_count,
            per_page,
            window_size,
            url_prefix: url_prefix.into(),
            requested_page,
            current_page: to_page(current),
            total_pages,
            window_start: to_page(start),
            window_end: to_page(end),
        };

        debug!(
            "Page {} of {} (requested {}), window {}..={}",
            paginator.current_page,
            paginator.total_pages,
            requested_page,
            paginator.window_start,
            paginator.window_end
        );

        paginator
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// The page number after fail-soft parsing, before clamping.
    pub fn requested_page(&self) -> i64 {
        self.requested_page
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn window_start(&self) -> u64 {
        self.window_start
    }

    pub fn window_end(&self) -> u64 {
        self.window_end
    }

    /// Inclusive lower bound of the `[start, end)` slice for the current page.
    pub fn start(&self) -> u64 {
        (self.current_page - 1).saturating_mul(self.per_page)
    }

    /// Exclusive upper bound of the `[start, end)` slice for the current page.
    pub fn end(&self) -> u64 {
        self.current_page.saturating_mul(self.per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Link target for `page`. The prefix is inserted verbatim.
    pub fn href(&self, page: u64) -> String {
        format!("/{}/?page={}", self.url_prefix, page)
    }

    pub fn links(&self) -> Vec<PageLink> {
        (self.window_start..=self.window_end)
            .map(|page| PageLink {
                page,
                href: self.href(page),
                active: page == self.current_page,
            })
            .collect()
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary {
            total_count: self.total_count,
            per_page: self.per_page,
            window_size: self.window_size,
            url_prefix: self.url_prefix.clone(),
            requested_page: self.requested_page,
            current_page: self.current_page,
            total_pages: self.total_pages,
            window_start: self.window_start,
            window_end: self.window_end,
            start: self.start(),
            end: self.end(),
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }

    /// Render the navigation fragment. `url_prefix` is not HTML-escaped;
    /// callers must pass a sanitized value.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_arrow(
        &self,
        f: &mut fmt::Formatter<'_>,
        target: Option<u64>,
        label: &str,
        glyph: &str,
    ) -> fmt::Result {
        match target {
            Some(page) => {
                let href = self.href(page);
                write!(f, r#"<li><a href="{}" aria-label="{}">"#, href, label)?;
                write!(f, r#"<span aria-hidden="true">{}</span></a></li>"#, glyph)
            }
            None => write!(
                f,
                r#"<li class="disabled"><span><span aria-hidden="true">{}</span></span></li>"#,
                glyph
            ),
        }
    }
}

impl fmt::Display for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(NAV_OPEN)?;
        let first = self.href(1);
        write!(f, r#"<li><a href="{}">{}</a></li>"#, first, FIRST_LABEL)?;

        let previous = self.has_previous().then(|| self.current_page - 1);
        self.write_arrow(f, previous, "Previous", "&laquo;")?;

        for page in self.window_start..=self.window_end {
            let class = if page == self.current_page {
                r#" class="active""#
            } else {
                ""
            };
            let href = self.href(page);
            write!(f, r#"<li{}><a href="{}">{}</a></li>"#, class, href, page)?;
        }

        let next = self.has_next().then(|| self.current_page + 1);
        self.write_arrow(f, next, "Next", "&raquo;")?;

        let last = self.href(self.total_pages);
        write!(f, r#"<li><a href="{}">{}</a></li>"#, last, LAST_LABEL)?;
        f.write_str(NAV_CLOSE)
    }
}

fn to_page(value: i128) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISABLED_PREVIOUS: &str =
        r#"<li class="disabled"><span><span aria-hidden="true">&laquo;"#;
    const DISABLED_NEXT: &str = r#"<li class="disabled"><span><span aria-hidden="true">&raquo;"#;

    fn paginate(total: u64, page: impl Into<RequestedPage>) -> Paginator {
        Paginator::new(total, page, "items")
    }

    #[test]
    fn first_page_of_ninety_five() {
        let p = paginate(95, 1);
        assert_eq!(p.total_pages(), 10);
        assert_eq!(p.current_page(), 1);
        assert_eq!((p.window_start(), p.window_end()), (1, 7));
        assert_eq!((p.start(), p.end()), (0, 10));

        let html = p.render();
        assert!(html.contains(DISABLED_PREVIOUS));
        assert!(html.contains(r#"<a href="/items/?page=2" aria-label="Next">"#));
    }

    #[test]
    fn last_page_of_ninety_five() {
        let p = paginate(95, 10);
        assert_eq!(p.current_page(), 10);
        assert_eq!((p.window_start(), p.window_end()), (4, 10));
        assert_eq!((p.start(), p.end()), (90, 100));

        let html = p.render();
        assert!(html.contains(DISABLED_NEXT));
        assert!(html.contains(r#"<a href="/items/?page=9" aria-label="Previous">"#));
    }

    #[test]
    fn clamps_out_of_range_requests() {
        assert_eq!(paginate(95, 50).current_page(), 10);
        assert_eq!(paginate(95, 0).current_page(), 1);
        assert_eq!(paginate(95, -4).current_page(), 1);
        assert_eq!(paginate(95, u64::MAX).current_page(), 10);
    }

    #[test]
    fn empty_result_set_lands_on_page_one() {
        let p = paginate(0, 3);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.current_page(), 1);
        assert_eq!((p.window_start(), p.window_end()), (1, 0));
        assert!(p.links().is_empty());

        let html = p.render();
        assert!(!html.contains("active"));
        assert!(html.contains(r#"<li><a href="/items/?page=0">尾页</a></li>"#));
        assert_eq!(html.matches(r#"class="disabled""#).count(), 2);
    }

    #[test]
    fn non_numeric_requests_fall_back_to_first_page() {
        assert_eq!(paginate(95, "xyz").current_page(), 1);
        assert_eq!(paginate(95, "").current_page(), 1);
        assert_eq!(paginate(95, "3.5").current_page(), 1);
        assert_eq!(paginate(95, None::<&str>).current_page(), 1);
        assert_eq!(paginate(95, f64::NAN).current_page(), 1);
    }

    #[test]
    fn numeric_text_is_accepted() {
        assert_eq!(paginate(95, " 4 ").current_page(), 4);
        assert_eq!(paginate(95, "+6").current_page(), 6);
        assert_eq!(paginate(95, Some("8")).current_page(), 8);
        assert_eq!(paginate(95, 5.9).current_page(), 5);
        assert_eq!(paginate(95, "99999999999999999999999").current_page(), 10);
        assert_eq!(paginate(95, "1_0").current_page(), 10);
        assert_eq!(paginate(95, "1__0").current_page(), 1);
        assert_eq!(paginate(95, "_1").current_page(), 1);
        assert_eq!(paginate(95, "1_").current_page(), 1);
        assert_eq!(paginate(95, "３").current_page(), 3);
        assert_eq!(paginate(95, "٤").current_page(), 4);
    }

    #[test]
    fn parse_page_defaults_to_one() {
        assert_eq!(parse_page("12"), 12);
        assert_eq!(parse_page("-3"), -3);
        assert_eq!(parse_page("twelve"), 1);
        assert_eq!(parse_page("1_000"), 1000);
        assert_eq!(parse_page("-2_5"), -25);
        assert_eq!(parse_page("１２"), 12);
        assert_eq!(parse_page("\u{0967}\u{0966}"), 10);
        assert_eq!(parse_page("+-1"), 1);
        assert_eq!(parse_page("-"), 1);
        assert_eq!(parse_page("-99999999999999999999999"), i64::MIN);
        assert_eq!(parse_page("1 0"), 1);
    }

    #[test]
    fn near_end_rule_fires_on_exact_boundary() {
        // With an even window the tentative range is one wider than the
        // window, so the `>=` boundary is observable.
        let p = Paginator::with_options(100, 7, "items", PageOptions::new(10, 6));
        assert_eq!((p.window_start(), p.window_end()), (5, 10));
    }

    #[test]
    fn too_few_pages_overrides_other_rules() {
        let p = paginate(25, 2);
        assert_eq!(p.total_pages(), 3);
        assert_eq!((p.window_start(), p.window_end()), (1, 3));
    }

    #[test]
    fn middle_page_centers_window() {
        let p = Paginator::with_options(1000, 50, "items", PageOptions::new(10, 7));
        assert_eq!((p.window_start(), p.window_end()), (47, 53));
    }

    #[test]
    fn zero_options_are_raised_to_one() {
        let options = PageOptions::new(0, 0);
        assert_eq!(options.per_page, 1);
        assert_eq!(options.window_size, 1);

        let p = Paginator::with_options(
            5,
            2,
            "items",
            PageOptions {
                per_page: 0,
                window_size: 0,
            },
        );
        assert_eq!(p.total_pages(), 5);
        assert_eq!((p.window_start(), p.window_end()), (2, 2));
    }

    #[test]
    fn renders_exact_fragment() {
        let p = Paginator::new(25, 2, "books");
        let expected = concat!(
            r#"<nav aria-label="Page navigation" class="text-center"><ul class="pagination">"#,
            r#"<li><a href="/books/?page=1">首页</a></li>"#,
            r#"<li><a href="/books/?page=1" aria-label="Previous">"#,
            r#"<span aria-hidden="true">&laquo;</span></a></li>"#,
            r#"<li><a href="/books/?page=1">1</a></li>"#,
            r#"<li class="active"><a href="/books/?page=2">2</a></li>"#,
            r#"<li><a href="/books/?page=3">3</a></li>"#,
            r#"<li><a href="/books/?page=3" aria-label="Next">"#,
            r#"<span aria-hidden="true">&raquo;</span></a></li>"#,
            r#"<li><a href="/books/?page=3">尾页</a></li>"#,
            "</ul></nav>",
        );
        assert_eq!(p.render(), expected);
        assert_eq!(format!("{}", p), expected);
    }

    #[test]
    fn prefix_is_not_escaped() {
        let p = Paginator::new(10, 1, "a&b");
        assert!(p.render().contains(r#"href="/a&b/?page=1""#));
    }

    #[test]
    fn links_mark_current_page() {
        let p = paginate(95, 5);
        let links = p.links();
        assert_eq!(links.len(), 7);
        assert_eq!(links[0].page, 2);
        assert_eq!(links[0].href, "/items/?page=2");
        let active = links.iter().filter(|l| l.active).collect::<Vec<_>>();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].page, 5);
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = paginate(95, "3").summary();
        let value = serde_json::to_value(summary).expect("json");
        assert_eq!(value["currentPage"], 3);
        assert_eq!(value["totalPages"], 10);
        assert_eq!(value["urlPrefix"], "items");
        assert_eq!(value["hasPrevious"], true);
    }

    #[test]
    fn total_pages_is_ceiling() {
        for per_page in 1..=12u64 {
            for total in 0..=60u64 {
                let p = Paginator::with_options(total, 1, "x", PageOptions::new(per_page, 7));
                assert_eq!(p.total_pages(), total.div_ceil(per_page));
                assert_eq!(p.total_pages() == 0, total == 0);
            }
        }
    }

    #[test]
    fn window_and_offset_invariants_hold() {
        for window_size in [1u64, 3, 5, 7, 9] {
            for total in 0..=45u64 {
                for requested in -2..=8i64 {
                    let options = PageOptions::new(4, window_size);
                    let p = Paginator::with_options(total, requested, "x", options);
                    let current = p.current_page();

                    assert!(current >= 1);
                    assert!(current <= p.total_pages().max(1));
                    assert!(p.window_start() >= 1);
                    assert_eq!(p.end() - p.start(), 4);
                    assert_eq!(p.start(), (current - 1) * 4);

                    if p.total_pages() >= 1 && p.window_start() <= p.window_end() {
                        assert!(p.window_start() <= current && current <= p.window_end());
                        assert!(p.window_end() - p.window_start() + 1 <= window_size);
                    }

                    let html = p.render();
                    let disabled_prev = html.contains(DISABLED_PREVIOUS);
                    let enabled_prev = html.contains(r#"aria-label="Previous""#);
                    assert!(disabled_prev != enabled_prev);
                    if p.total_pages() >= 1 {
                        assert_eq!(html.matches(r#"class="active""#).count(), 1);
                    }
                }
            }
        }
    }
}
