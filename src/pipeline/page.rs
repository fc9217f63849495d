//! Full HTML page assembly around a converted chapter fragment.
//!
//! Every page shares one shell: navbar with a menu toggle, a sidebar table
//! of contents, the chapter article, prev/next buttons and a footer. KaTeX
//! is loaded from the CDN and auto-renders `$..$` and `$$..$$` on load.
//! Pure string construction; nothing here touches the filesystem.

use crate::manifest::{BookManifest, ChapterMeta, SiteLabels};

const KATEX_VERSION: &str = "0.16.9";

/// Sidebar table of contents: home link, then every chapter in manifest
/// order with `class="active"` on `current_id`.
pub fn toc_html(manifest: &BookManifest, current_id: &str) -> String {
    let mut toc = String::from(r#"<ul class="toc">"#);
    toc.push_str(&format!(
        r#"<li><a href="index.html">{}</a></li>"#,
        manifest.labels.home
    ));
    for chapter in &manifest.chapters {
        let active = if chapter.id == current_id {
            r#"class="active""#
        } else {
            ""
        };
        toc.push_str(&format!(
            r#"<li><a href="{}" {active}>{}</a></li>"#,
            chapter.page_file(),
            chapter.title
        ));
    }
    toc.push_str("</ul>");
    toc
}

/// Two-slot prev/next navigation; a missing neighbour becomes an empty
/// `<span>` so the remaining button keeps its side.
pub fn nav_html(chapter: &ChapterMeta, labels: &SiteLabels) -> String {
    let mut nav = String::from(r#"<div class="chapter-nav">"#);
    match chapter.prev_link() {
        Some(link) => nav.push_str(&format!(
            r#"<a href="{link}" class="nav-button prev">{}</a>"#,
            labels.prev
        )),
        None => nav.push_str("<span></span>"),
    }
    match chapter.next_link() {
        Some(link) => nav.push_str(&format!(
            r#"<a href="{link}" class="nav-button next">{}</a>"#,
            labels.next
        )),
        None => nav.push_str("<span></span>"),
    }
    nav.push_str("</div>");
    nav
}

fn footer_html(manifest: &BookManifest) -> String {
    let labels = &manifest.labels;
    let mut footer = String::new();
    if let Some(text) = &manifest.footer {
        footer.push_str(&format!("        <p>&copy; {text}</p>\n"));
    }
    let mut links = format!(r#"<a href="index.html">{}</a>"#, labels.back_home);
    if let Some(url) = &manifest.repository {
        links.push_str(&format!(r#" | <a href="{url}">{}</a>"#, labels.repository));
    }
    footer.push_str(&format!("        <p>{links}</p>\n"));
    footer
}

/// Wrap `fragment` (the converted chapter body) in the full page shell.
pub fn render_page(fragment: &str, chapter: &ChapterMeta, manifest: &BookManifest) -> String {
    let toc = toc_html(manifest, &chapter.id);
    let nav = nav_html(chapter, &manifest.labels);
    let footer = footer_html(manifest);
    let book = &manifest.title;
    let lang = &manifest.lang;
    let title = &chapter.title;
    let contents = &manifest.labels.contents;
    let katex = format!("https://cdn.jsdelivr.net/npm/katex@{KATEX_VERSION}/dist");

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {book}</title>
    <link rel="stylesheet" href="style.css">
    <link rel="stylesheet" href="{katex}/katex.min.css">
    <script defer src="{katex}/katex.min.js"></script>
    <script defer src="{katex}/contrib/auto-render.min.js"></script>
</head>
<body>
    <nav class="navbar">
        <div class="nav-container">
            <h1 class="nav-title">{book}</h1>
            <button class="menu-toggle" id="menuToggle">☰</button>
        </div>
    </nav>

    <div class="container">
        <aside class="sidebar" id="sidebar">
            <div class="sidebar-content">
                <h2>{contents}</h2>
                {toc}
            </div>
        </aside>

        <main class="content">
            <article class="chapter-content">
                {fragment}
            </article>

            {nav}
        </main>
    </div>

    <footer class="footer">
{footer}    </footer>

    <script>
        const menuToggle = document.getElementById('menuToggle');
        const sidebar = document.getElementById('sidebar');

        menuToggle.addEventListener('click', () => {{
            sidebar.classList.toggle('active');
        }});

        document.addEventListener('click', (e) => {{
            if (!sidebar.contains(e.target) && !menuToggle.contains(e.target)) {{
                sidebar.classList.remove('active');
            }}
        }});

        document.addEventListener("DOMContentLoaded", function() {{
            renderMathInElement(document.body, {{
                delimiters: [
                    {{left: '$$', right: '$$', display: true}},
                    {{left: '$', right: '$', display: false}}
                ],
                throwOnError: false
            }});
        }});
    </script>
</body>
</html>
"#
    )
}
