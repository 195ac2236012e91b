use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

const ALLOWED_URL_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

/// Renders generated markdown to HTML. Raw HTML in the source is emitted
/// as escaped text, and link or image targets outside http, https and
/// mailto are blanked.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: allowed_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: allowed_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, parser);
    rendered
}

fn allowed_url(url: CowStr<'_>) -> CowStr<'_> {
    let normalized = url.trim().to_ascii_lowercase();
    if ALLOWED_URL_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
    {
        url
    } else {
        CowStr::Borrowed("")
    }
}
