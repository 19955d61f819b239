//! Python-`pprint` style rendering of a `serde_json::Value`.
//!
//! Scalars use Python repr syntax (`None`, `True`, `'text'`), mapping keys are
//! sorted, and containers that don't fit the line width are split one entry
//! per line. Long strings are kept on one line rather than split.

use serde_json::{Map, Value};

/// Layout settings. The default is width 120, indent 1, compact sequences.
#[derive(Debug, Clone, Copy)]
pub struct PrettyPrinter {
    pub width: usize,
    pub indent_per_level: usize,
    pub compact: bool,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self {
            width: 120,
            indent_per_level: 1,
            compact: true,
        }
    }
}

/// Renders `value` with the default printer, optionally framed in newlines.
pub fn value_to_string(value: &Value, framed: bool) -> String {
    let rendered = PrettyPrinter::default().format(value);
    if framed {
        format!("\n{}\n", rendered)
    } else {
        rendered
    }
}

/// Single-line Python repr of a value.
pub fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => repr_str(s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = sorted_entries(map)
                .into_iter()
                .map(|(k, v)| format!("{}: {}", repr_str(k), repr(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn char_len(s: &str) -> isize {
    s.chars().count() as isize
}

impl PrettyPrinter {
    pub fn format(&self, value: &Value) -> String {
        let mut out = String::new();
        self.format_into(value, &mut out, 0, 0);
        out
    }

    fn format_into(&self, value: &Value, out: &mut String, indent: usize, allowance: usize) {
        let rep = repr(value);
        let max_width = self.width as isize - indent as isize - allowance as isize;
        if char_len(&rep) > max_width {
            match value {
                Value::Object(map) if !map.is_empty() => {
                    out.push('{');
                    self.pad(out);
                    self.format_dict_items(map, out, indent, allowance + 1);
                    out.push('}');
                    return;
                }
                Value::Array(items) if !items.is_empty() => {
                    out.push('[');
                    self.format_items(items, out, indent, allowance + 1);
                    out.push(']');
                    return;
                }
                _ => {}
            }
        }
        out.push_str(&rep);
    }

    fn pad(&self, out: &mut String) {
        if self.indent_per_level > 1 {
            out.push_str(&" ".repeat(self.indent_per_level - 1));
        }
    }

    fn format_dict_items(
        &self,
        map: &Map<String, Value>,
        out: &mut String,
        indent: usize,
        allowance: usize,
    ) {
        let indent = indent + self.indent_per_level;
        let delimnl = format!(",\n{}", " ".repeat(indent));
        let entries = sorted_entries(map);
        let last_index = entries.len() - 1;

        for (i, (key, value)) in entries.into_iter().enumerate() {
            let last = i == last_index;
            let rep = repr_str(key);
            out.push_str(&rep);
            out.push_str(": ");
            let child_indent = indent + rep.chars().count() + 2;
            self.format_into(value, out, child_indent, if last { allowance } else { 1 });
            if !last {
                out.push_str(&delimnl);
            }
        }
    }

    fn format_items(&self, items: &[Value], out: &mut String, indent: usize, allowance: usize) {
        let indent = indent + self.indent_per_level;
        self.pad(out);
        let delimnl = format!(",\n{}", " ".repeat(indent));
        let mut delim = String::new();
        let mut max_width = self.width as isize - indent as isize + 1;
        let mut width = max_width;

        for (i, item) in items.iter().enumerate() {
            let last = i + 1 == items.len();
            if last {
                max_width -= allowance as isize;
                width -= allowance as isize;
            }

            if self.compact {
                let rep = repr(item);
                let w = char_len(&rep) + 2;
                if width < w {
                    width = max_width;
                    if !delim.is_empty() {
                        delim = delimnl.clone();
                    }
                }
                if width >= w {
                    width -= w;
                    out.push_str(&delim);
                    delim = ", ".to_string();
                    out.push_str(&rep);
                    continue;
                }
            }

            out.push_str(&delim);
            delim = delimnl.clone();
            self.format_into(item, out, indent, if last { allowance } else { 1 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_dict_is_sorted_on_one_line() {
        let value = json!({"name": "Bob", "age": 50});
        assert_eq!(value_to_string(&value, false), "{'age': 50, 'name': 'Bob'}");
        assert_eq!(value_to_string(&value, true), "\n{'age': 50, 'name': 'Bob'}\n");
    }

    #[test]
    fn test_scalar_reprs() {
        assert_eq!(repr(&json!(null)), "None");
        assert_eq!(repr(&json!(true)), "True");
        assert_eq!(repr(&json!([1, "a", false])), "[1, 'a', False]");
        assert_eq!(repr(&json!("it's")), "\"it's\"");
        assert_eq!(repr(&json!("line\nbreak")), "'line\\nbreak'");
        assert_eq!(repr(&json!({})), "{}");
    }

    #[test]
    fn test_wide_dict_breaks_per_key() {
        let long = "x".repeat(70);
        let value = json!({"b": long, "a": long});
        let expected = format!("{{'a': '{}',\n 'b': '{}'}}", long, long);
        assert_eq!(value_to_string(&value, false), expected);
    }

    #[test]
    fn test_compact_list_wraps_at_width() {
        let printer = PrettyPrinter {
            width: 20,
            ..PrettyPrinter::default()
        };
        let value = json!([1000, 2000, 3000, 4000, 5000, 6000]);
        assert_eq!(printer.format(&value), "[1000, 2000, 3000,\n 4000, 5000, 6000]");
    }
}
