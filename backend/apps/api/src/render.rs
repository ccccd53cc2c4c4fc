//! Minimal HTML Renderer
//!
//! Presentation proper is a frontend concern, but every page still goes
//! through the [`Renderer`] seam. This implementation wraps the view
//! name and its data bag in a bare HTML shell so the whole surface is
//! drivable from a browser or a test without a template engine.

use kernel::error::app_error::AppResult;
use kernel::render::Renderer;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, view: &str, data: serde_json::Value) -> AppResult<String> {
        let data = serde_json::to_string_pretty(&data)?;
        Ok(format!(
            "<!doctype html>\n\
             <html>\n\
             <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
             <body>\n\
             <h1>{title}</h1>\n\
             <pre>{data}</pre>\n\
             </body>\n\
             </html>\n",
            title = escape(view),
            data = escape(&data),
        ))
    }
}

/// Escape text dropped into an HTML body
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
