//! Renders a generated document as the Gmail filter-import Atom feed.
//!
//! This is the outermost layer: it consumes only the finalized
//! [`Document`] and knows nothing about filters or criteria.

use chrono::{SecondsFormat, Utc};

use crate::Document;

pub(crate) fn render(document: &Document) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<feed xmlns=\"http://www.w3.org/2005/Atom\" \
         xmlns:apps=\"http://schemas.google.com/apps/2006\">\n",
    );
    out.push_str("  <title>Mail Filters</title>\n");
    out.push_str("  <id>tag:mail.google.com,2008:filters:</id>\n");
    let updated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    out.push_str(&format!("  <updated>{updated}</updated>\n"));
    for entry in document.entries() {
        out.push_str("  <entry>\n");
        out.push_str("    <category term=\"filter\"/>\n");
        out.push_str("    <title>Mail Filter</title>\n");
        out.push_str("    <content/>\n");
        for property in entry.properties() {
            out.push_str(&format!(
                "    <apps:property name=\"{}\" value=\"{}\"/>\n",
                escape(property.name()),
                escape(property.value()),
            ));
        }
        out.push_str("  </entry>\n");
    }
    out.push_str("</feed>\n");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
