//! JavaScript object-literal rendering of an asset tree.
//!
//! ```text
//! {'icon' : 'data:image/png;base64,iVBO...', 'sounds' : {'beep' : 'UklG...'}}
//! ```
//!
//! Entries are separated by `, `, keys and leaves are single-quoted, and
//! nested branches are rendered recursively without quotes. Leaf payloads
//! are emitted verbatim: base64 and `data:` prefixes never contain `'` or
//! `\`. Keys come from filenames, which can, so those two characters are
//! backslash-escaped in keys.

use crate::compiler::{AssetMap, AssetNode};

/// Render `map` as a JavaScript object literal.
pub fn serialize(map: &AssetMap) -> String {
    let mut out = String::new();
    write_map(map, &mut out);
    out
}

fn write_map(map: &AssetMap, out: &mut String) {
    out.push('{');
    for (i, (key, node)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('\'');
        push_escaped_key(key, out);
        out.push_str("' : ");
        match node {
            AssetNode::Leaf(value) => {
                out.push('\'');
                out.push_str(value);
                out.push('\'');
            }
            AssetNode::Branch(sub) => write_map(sub, out),
        }
    }
    out.push('}');
}

fn push_escaped_key(key: &str, out: &mut String) {
    for c in key.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Wrap a rendered literal in the script element that replaces a marker.
pub fn script_tag(var_name: &str, literal: &str) -> String {
    format!("<script type='text/javascript'> var {var_name} = {literal}; </script>")
}
