//! CSS and debug serialization.

use sable_ir::ListSeparator;

use super::{SassList, Value};
use crate::EvalResult;

/// Quote `text` for output, preferring double quotes.
///
/// Single quotes are used when the text holds a `"` but no `'`. Line breaks
/// become the CSS escape `\a`.
pub fn quote(text: &str) -> String {
    let mark = if text.contains('"') && !text.contains('\'') {
        '\''
    } else {
        '"'
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(mark);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                out.push_str("\\a");
                if chars.peek().is_some_and(char::is_ascii_hexdigit) {
                    out.push(' ');
                }
            }
            c if c == mark => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(mark);
    out
}

/// Whether `item` needs parentheses when printed inside a list with
/// `outer` as separator.
fn needs_parens(item: &Value, outer: ListSeparator) -> bool {
    match item {
        Value::List(list) => {
            !list.bracketed
                && list.len() > 1
                && (outer == ListSeparator::Space || list.separator == ListSeparator::Comma)
        }
        _ => false,
    }
}

fn inspect_list(list: &SassList, precision: u8) -> String {
    if list.is_empty() {
        return if list.bracketed { "[]" } else { "()" }.to_owned();
    }
    let items: Vec<String> = list
        .items
        .iter()
        .map(|item| {
            let text = item.inspect(precision);
            if needs_parens(item, list.separator) {
                format!("({text})")
            } else {
                text
            }
        })
        .collect();
    let body = items.join(list.separator.joiner(false));
    if list.bracketed {
        format!("[{body}]")
    } else {
        body
    }
}

impl Value {
    /// Text emitted into a stylesheet.
    ///
    /// Maps and numbers with compound units have no CSS form and raise.
    /// `null` items vanish from lists.
    pub fn to_css(&self, precision: u8) -> EvalResult<String> {
        match self {
            Value::Number(n) => {
                let n = n.clone().reduced();
                if !n.is_valid_css() {
                    return Err(crate::invalid_css_value(n.format(precision)));
                }
                Ok(n.format(precision))
            }
            Value::Color(c) => Ok(c.to_css(precision)),
            Value::String(s) if s.quoted => Ok(quote(&s.text)),
            Value::String(s) => Ok(s.text.clone()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Null => Ok(String::new()),
            Value::List(list) => {
                let mut items = Vec::with_capacity(list.len());
                for item in list.items.iter().filter(|i| !i.is_blank()) {
                    items.push(item.to_css(precision)?);
                }
                let body = items.join(list.separator.joiner(false));
                Ok(if list.bracketed {
                    format!("[{body}]")
                } else {
                    body
                })
            }
            Value::Map(_) => Err(crate::invalid_css_value(self.inspect(precision))),
        }
    }

    /// Debug text, as `inspect()` and `@debug` print it.
    pub fn inspect(&self, precision: u8) -> String {
        match self {
            Value::Number(n) => n.clone().reduced().format(precision),
            Value::Color(c) => c.inspect(precision),
            Value::String(s) if s.quoted => quote(&s.text),
            Value::String(s) => s.text.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Null => "null".to_owned(),
            Value::List(list) => inspect_list(list, precision),
            Value::Map(map) => {
                let entries: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        let value = v.inspect(precision);
                        let value = if needs_parens(v, ListSeparator::Comma) {
                            format!("({value})")
                        } else {
                            value
                        };
                        format!("{}: {value}", k.inspect(precision))
                    })
                    .collect();
                format!("({})", entries.join(", "))
            }
        }
    }
}
