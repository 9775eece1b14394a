//! HTML rendering of the todo page.
//!
//! Every piece of stored or ambient text goes through [`escape_html`] before
//! it reaches the markup.

use sample_todo_core::TodoItem;
use std::borrow::Cow;

/// Ambient values shown in the system info block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// Host serving the request
    pub hostname: String,
    /// Version string reported by the record store
    pub store_version: String,
}

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Sample TODO App</title>
  <style>
    div, body, html { background-color: #eee; }
    h1 { margin-left: 30px; }
    #sys-info, #task-add, #task-list { margin-top: 30px; margin-left: 30px; }
    #task-add input, #task-add button { height: 28px; font-size: 1.2em; }
    #task-list ul {
      margin: 0; padding: 0; max-width: 500px;
      border: 1px solid #333; border-radius: 5px;
      background-color: #ffe;
      box-shadow: 10px 10px 18px 1px rgba(0, 0, 0, 0.18);
    }
    #task-list li { display: block; list-style-type: none; font-size: 1.25em; }
    #task-list li:hover { background-color: #fff; }
    #task-list li.checked span { text-decoration: line-through; }
    #task-list li i:before { content: "\2713"; padding: 0 6px 0 0; }
    #task-list li.checked i:before { color: green; }
    #task-list li.unchecked i:before { color: transparent; }
    .toggle-form { display: inline; margin: 0; padding: 0; }
    .toggle-form button { color: inherit; border-style: none; }
  </style>
</head>
<body>
  <h1>Sample TODO app</h1>
"#;

const ADD_FORM: &str = r#"  <hr>

  <form method="POST">
    <div id="task-add">
      <input type="hidden" name="action" value="add">
      <input id="task-title" name="title" type="text" placeholder="Task Title">
      <button type="submit">Add</button>
    </div>
  </form>

  <div id="task-list">
    <ul>
"#;

const TAIL: &str = "    </ul>
  </div>
</body>
</html>
";

/// Render the full page for `items`.
#[must_use]
pub fn render_page(items: &[TodoItem], info: &SystemInfo) -> String {
    let mut page = String::with_capacity(HEAD.len() + ADD_FORM.len() + items.len() * 320 + 512);
    page.push_str(HEAD);
    page.push_str(&format!(
        r#"  <div id="sys-info">
    <p>The app was deployed successfully.</p>
    <p>Here's some system information:</p>
    <ul>
      <li>Hostname serving your request: {}</li>
      <li>Database version: {}</li>
    </ul>
  </div>

"#,
        escape_html(&info.hostname),
        escape_html(&info.store_version),
    ));
    page.push_str(ADD_FORM);
    for item in items {
        page.push_str(&render_item(item));
    }
    page.push_str(TAIL);
    page
}

fn render_item(item: &TodoItem) -> String {
    let class = if item.done { "checked" } else { "unchecked" };
    format!(
        r#"      <li class="{class}">
        <form class="toggle-form" method="POST">
          <input type="hidden" name="action" value="toggle">
          <input type="hidden" name="id" value="{id}">
          <button type="submit"><i></i></button>
        </form>
        <span>{title}</span>
      </li>
"#,
        id = item.id,
        title = escape_html(&item.title),
    )
}

/// Escape `&`, `<`, `>`, `"` and `'` for use in element content and
/// quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_todo_core::TodoId;

    fn info() -> SystemInfo {
        SystemInfo {
            hostname: "web-1".to_string(),
            store_version: "PostgreSQL 16.2".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_html_borrows_clean_text() {
        assert!(matches!(escape_html("Buy milk"), Cow::Borrowed("Buy milk")));
    }

    #[test]
    fn test_empty_list_renders_no_items() {
        let page = render_page(&[], &info());
        assert!(page.contains("<ul>\n    </ul>"));
        assert_eq!(page.matches("<li class=").count(), 0);
    }

    #[test]
    fn test_items_render_state_and_toggle_id() {
        let items = vec![
            TodoItem::new(TodoId::new(1), "Buy milk".to_string(), false),
            TodoItem::new(TodoId::new(2), "Write docs".to_string(), true),
        ];
        let page = render_page(&items, &info());

        assert_eq!(page.matches("<li class=").count(), 2);
        assert!(page.contains(r#"<li class="unchecked">"#));
        assert!(page.contains(r#"<li class="checked">"#));
        assert!(page.contains(r#"<input type="hidden" name="id" value="2">"#));
        assert!(page.contains("<span>Buy milk</span>"));
    }

    #[test]
    fn test_title_markup_is_literal_text() {
        let items = vec![TodoItem::new(
            TodoId::new(1),
            "<script>alert(1)</script>".to_string(),
            false,
        )];
        let page = render_page(&items, &info());

        assert!(!page.contains("<script>"));
        assert!(page.contains("<span>&lt;script&gt;alert(1)&lt;/script&gt;</span>"));
    }

    #[test]
    fn test_system_info_is_shown() {
        let page = render_page(&[], &info());
        assert!(page.contains("Hostname serving your request: web-1"));
        assert!(page.contains("Database version: PostgreSQL 16.2"));
    }
}
