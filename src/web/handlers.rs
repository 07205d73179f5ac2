//! HTTP handlers: two pages and one trigger endpoint per load strategy.
//!
//! A failed run renders its error into the results page instead of a bare
//! 5xx, so the demo surfaces what went wrong in the browser; the error is
//! also logged.

use axum::extract::State;
use axum::response::Html;
use tracing::error;

use super::AppState;
use crate::models::LoadStrategy;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn results() -> Html<String> {
    Html(render_results(None))
}

pub async fn load_copy_from(State(state): State<AppState>) -> Html<String> {
    run_and_render(&state, LoadStrategy::CopyFrom).await
}

pub async fn load_bulk_insert(State(state): State<AppState>) -> Html<String> {
    run_and_render(&state, LoadStrategy::BatchedInsert).await
}

async fn run_and_render(state: &AppState, strategy: LoadStrategy) -> Html<String> {
    let result = match state.service.run(strategy).await {
        Ok(report) => report.summary(),
        Err(e) => {
            error!("{} load failed: {}", strategy.describe(), e);
            e.to_string()
        }
    };
    Html(render_results(Some(&result)))
}

fn render_index() -> String {
    page(
        "Bulk load demo",
        r#"<p>Fetch the speaker list and load it into PostgreSQL with either strategy:</p>
    <form method="post" action="/load/copy-from">
      <button type="submit">Load with COPY FROM</button>
    </form>
    <form method="post" action="/load/bulk-insert">
      <button type="submit">Load with batched INSERT</button>
    </form>"#,
    )
}

fn render_results(result: Option<&str>) -> String {
    let body = match result {
        Some(result) => format!(
            "<p>{}</p>\n    <p><a href=\"/\">Run again</a></p>",
            escape_html(result)
        ),
        None => "<p>No load has run yet.</p>\n    <p><a href=\"/\">Back</a></p>".to_string(),
    };
    page("Results", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head><title>{title}</title></head>
  <body>
    <h1>{title}</h1>
    {body}
  </body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_page_carries_the_summary() {
        let html = render_results(Some("Created 10 rows in 1.000 milliseconds"));
        assert!(html.contains("Created 10 rows in 1.000 milliseconds"));
    }

    #[test]
    fn results_page_escapes_error_text() {
        let html = render_results(Some("speakers service returned HTTP <500>"));
        assert!(html.contains("HTTP &lt;500&gt;"));
        assert!(!html.contains("<500>"));
    }

    #[test]
    fn index_links_both_strategies() {
        let html = render_index();
        assert!(html.contains("/load/copy-from"));
        assert!(html.contains("/load/bulk-insert"));
    }
}
