use pulldown_cmark::{Options, Parser, html};

/// Fast renders are cheap partial passes used while the user is typing;
/// full renders enable every markdown extension the wiki supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Fast,
    Full,
}

pub trait MarkdownRenderer {
    fn render(&self, markdown: &str, mode: RenderMode) -> String;
}

#[derive(Debug, Default)]
pub struct CmarkRenderer;

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str, mode: RenderMode) -> String {
        let options = match mode {
            RenderMode::Fast => Options::empty(),
            RenderMode::Full => {
                let mut options = Options::empty();
                options.insert(Options::ENABLE_TABLES);
                options.insert(Options::ENABLE_STRIKETHROUGH);
                options.insert(Options::ENABLE_FOOTNOTES);
                options.insert(Options::ENABLE_TASKLISTS);
                options
            }
        };

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }
}
