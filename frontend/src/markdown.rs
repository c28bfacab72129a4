use pulldown_cmark::{html, Event, Options, Parser};

/// Renders a model reply to HTML.
///
/// Raw HTML in the reply is escaped rather than passed through, since the
/// result is injected with `inner_html`.
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_common_markdown() {
        let html = render_markdown("**Halo**\n\n- satu\n- dua");
        assert!(html.contains("<strong>Halo</strong>"));
        assert!(html.contains("<li>satu</li>"));
    }

    #[test]
    fn renders_fenced_code() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("<code class=\"language-rust\">"));
    }

    #[test]
    fn escapes_embedded_html() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
