//! Server-side rendering of the flight board page.

use std::fmt::Write;

use chrono::FixedOffset;

use crate::filter::{AirportFilter, ALL, ALL_LABEL};
use crate::lookup::AIRPORTS;
use crate::render::table::{visible_rows, HEADINGS};
use crate::state::{Theme, UiState};

/// Page heading.
pub const TITLE: &str = "✈️ 即時航班資訊";

/// Shown instead of the table while a refresh is in flight.
pub const LOADING: &str = "載入中...";

/// Seconds between browser reloads while loading. The reload re-reads the
/// page only; it does not start another refresh cycle.
const LOADING_RELOAD_SECS: u32 = 2;

const STYLE: &str = "\
body{margin:0;font-family:sans-serif}\
.p-6{padding:1.5rem}.p-2{padding:.5rem}.min-h-screen{min-height:100vh}\
.mb-4{margin-bottom:1rem}.text-2xl{font-size:1.5rem}.font-bold{font-weight:700}\
.text-sm{font-size:.875rem}.text-center{text-align:center}.w-full{width:100%}\
.controls>*{margin-right:1rem}.controls form{display:inline}\
.overflow-x-auto{overflow-x:auto}table{border-collapse:collapse}\
.border{border-width:1px;border-style:solid}\
.rounded{border-radius:.25rem}.px-2{padding-left:.5rem;padding-right:.5rem}\
.px-3{padding-left:.75rem;padding-right:.75rem}.py-1{padding-top:.25rem;padding-bottom:.25rem}\
.border-gray-500{border-color:#6b7280}\
.bg-black{background:#000}.text-white{color:#fff}\
.bg-white{background:#fff}.text-black{color:#000}\
.border-white{border-color:#fff}.border-black{border-color:#000}\
.bg-gray-800{background:#1f2937}.bg-gray-200{background:#e5e7eb}";

struct Palette {
    page: &'static str,
    border: &'static str,
    header: &'static str,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            page: "bg-black text-white",
            border: "border-white",
            header: "bg-gray-800",
        },
        Theme::Light => Palette {
            page: "bg-white text-black",
            border: "border-black",
            header: "bg-gray-200",
        },
    }
}

/// Escape text for use in HTML element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the complete page for `state`.
#[must_use]
pub fn render_page(state: &UiState, offset: FixedOffset) -> String {
    let colors = palette(state.theme());
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-Hant-TW\">\n<head>\n<meta charset=\"utf-8\">\n");
    if state.is_loading() {
        let _ = writeln!(html, "<meta http-equiv=\"refresh\" content=\"{LOADING_RELOAD_SECS}\">");
    }
    let _ = writeln!(html, "<title>{TITLE}</title>\n<style>{STYLE}</style>\n</head>");
    let _ = writeln!(html, "<body>\n<main class=\"p-6 min-h-screen {}\">", colors.page);
    let _ = writeln!(html, "<h1 class=\"text-2xl font-bold mb-4\">{TITLE}</h1>");

    render_controls(&mut html, state.filter());

    if let Some(updated) = state.last_updated() {
        let _ = writeln!(html, "<p class=\"mb-4 text-sm\">最後更新：{}</p>", escape(updated));
    }

    if state.is_loading() {
        let _ = writeln!(html, "<p>{LOADING}</p>");
    } else {
        render_table(&mut html, state, offset, &colors);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_controls(html: &mut String, filter: &AirportFilter) {
    html.push_str("<div class=\"mb-4 controls\">\n");
    html.push_str("<form method=\"post\" action=\"/filter\">\n");
    html.push_str("<label for=\"filter\">篩選機場：</label>\n");
    html.push_str(
        "<select id=\"filter\" name=\"airport\" class=\"rounded px-2 py-1 border border-gray-500\" onchange=\"this.form.submit()\">\n",
    );
    push_option(html, ALL, ALL_LABEL, filter.as_value() == ALL);
    for (code, name) in AIRPORTS {
        push_option(html, code, name, filter.as_value() == *code);
    }
    html.push_str("</select>\n<noscript><button type=\"submit\">套用</button></noscript>\n</form>\n");
    html.push_str(
        "<form method=\"post\" action=\"/refresh\"><button type=\"submit\" class=\"px-3 py-1 rounded border border-gray-500\">重新整理</button></form>\n",
    );
    html.push_str(
        "<form method=\"post\" action=\"/theme\"><button type=\"submit\" class=\"px-3 py-1 rounded border border-gray-500\">切換主題</button></form>\n",
    );
    html.push_str("</div>\n");
}

fn push_option(html: &mut String, value: &str, label: &str, selected: bool) {
    let selected = if selected { " selected" } else { "" };
    let _ = writeln!(
        html,
        "<option value=\"{}\"{selected}>{}</option>",
        escape(value),
        escape(label)
    );
}

fn render_table(html: &mut String, state: &UiState, offset: FixedOffset, colors: &Palette) {
    let border = colors.border;
    html.push_str("<div class=\"overflow-x-auto\">\n");
    let _ = writeln!(html, "<table class=\"w-full text-sm border {border}\">");
    let _ = writeln!(html, "<thead>\n<tr class=\"text-center {}\">", colors.header);
    for heading in HEADINGS {
        let _ = writeln!(html, "<th class=\"p-2 border {border}\">{heading}</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in visible_rows(state.flights(), state.filter(), offset) {
        html.push_str("<tr class=\"text-center\">\n");
        for cell in row.cells() {
            let _ = writeln!(html, "<td class=\"p-2 border {border}\">{}</td>", escape(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::FlightRecord;

    fn taipei() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn loaded(flights: Vec<FlightRecord>) -> UiState {
        let (state, ticket) = UiState::new(Theme::Dark).begin_refresh();
        state.complete_refresh(ticket, flights, "2024/1/1 上午9:00:00".to_string())
    }

    fn body_rows(html: &str) -> usize {
        html.matches("<tr class=\"text-center\">").count()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("中華航空"), "中華航空");
    }

    #[test]
    fn test_loading_page() {
        let html = render_page(&UiState::new(Theme::Dark), taipei());
        assert!(html.contains(LOADING));
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(!html.contains("<table"));
        assert!(!html.contains("最後更新"));
    }

    #[test]
    fn test_loaded_page() {
        let record = FlightRecord::new("CI100", "CI", "TPE", "KHH")
            .with_departure_time("2024-01-01T08:00:00");
        let html = render_page(&loaded(vec![record]), taipei());
        assert!(!html.contains(LOADING));
        assert!(!html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("最後更新：2024/1/1 上午9:00:00"));
        assert!(html.contains(">CI（中華航空）</td>"));
        assert!(html.contains(">TPE（桃園國際機場）</td>"));
        assert!(html.contains(">KHH（高雄小港機場）</td>"));
        assert!(html.contains(">2024/1/1 上午8:00:00</td>"));
        assert_eq!(body_rows(&html), 1);
        for heading in HEADINGS {
            assert!(html.contains(heading));
        }
    }

    #[test]
    fn test_dropdown_lists_all_airports() {
        let html = render_page(&UiState::default(), taipei());
        assert_eq!(html.matches("<option ").count(), AIRPORTS.len() + 1);
        assert!(html.contains("<option value=\"all\" selected>全部</option>"));
    }

    #[test]
    fn test_selected_filter() {
        let state = loaded(vec![]).with_filter(AirportFilter::airport("KHH"));
        let html = render_page(&state, taipei());
        assert!(html.contains("<option value=\"KHH\" selected>高雄小港機場</option>"));
        assert!(html.contains("<option value=\"all\">全部</option>"));
    }

    #[test]
    fn test_filtered_out_rows() {
        let record = FlightRecord::new("CI100", "CI", "TPE", "KHH");
        let state = loaded(vec![record]).with_filter(AirportFilter::airport("TSA"));
        let html = render_page(&state, taipei());
        assert!(html.contains("<tbody>"));
        assert_eq!(body_rows(&html), 0);
    }

    #[test]
    fn test_at_most_ten_rows() {
        let records = (0..40)
            .map(|i| FlightRecord::new(format!("BR{i}"), "BR", "TPE", "KHH"))
            .collect();
        let html = render_page(&loaded(records), taipei());
        assert_eq!(body_rows(&html), 10);
    }

    #[test]
    fn test_theme_classes() {
        let dark = render_page(&loaded(vec![]), taipei());
        assert!(dark.contains("p-6 min-h-screen bg-black text-white"));
        assert!(dark.contains("text-center bg-gray-800"));

        let light = render_page(&loaded(vec![]).with_theme_toggled(), taipei());
        assert!(light.contains("p-6 min-h-screen bg-white text-black"));
        assert!(light.contains("border border-black"));
    }

    #[test]
    fn test_upstream_text_is_escaped() {
        let record = FlightRecord::new("<b>X</b>", "ZZ", "TPE", "KHH");
        let html = render_page(&loaded(vec![record]), taipei());
        assert!(html.contains("&lt;b&gt;X&lt;/b&gt;"));
        assert!(!html.contains("<b>X</b>"));
    }
}
