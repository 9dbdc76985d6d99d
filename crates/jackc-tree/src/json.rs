//! Loader for the analyzer's JSON tree dump.
//!
//! Each node is an object with exactly one key, the node kind:
//!
//! ```text
//! {"letStatement": [{"keyword": " let "}, {"identifier": " x "}, ...]}
//! ```
//!
//! Non-terminals map to an array of children, terminals to their text.
//! Terminal text is copied as is, padding included; see
//! [`strip_padding`](crate::strip_padding).

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;
use serde_json::Value;

use jackc_core::{NodeKind, TreeError};

use crate::Node;

/// Parse a JSON tree dump into arena nodes.
pub fn load_json<'ast>(text: &str, arena: &'ast Bump) -> Result<&'ast Node<'ast>, TreeError> {
    let value: Value = serde_json::from_str(text).map_err(|e| TreeError::Json {
        message: e.to_string(),
    })?;
    let root = convert(&value, arena, "$")?;
    Ok(arena.alloc(root))
}

fn convert<'ast>(value: &Value, arena: &'ast Bump, path: &str) -> Result<Node<'ast>, TreeError> {
    let Value::Object(map) = value else {
        return Err(invalid(path, "expected an object"));
    };
    let mut entries = map.iter();
    let (Some((name, payload)), None) = (entries.next(), entries.next()) else {
        return Err(invalid(
            path,
            &format!("expected exactly one key, found {}", map.len()),
        ));
    };
    let path = format!("{path}.{name}");
    let kind = NodeKind::from_name(name).ok_or_else(|| TreeError::UnknownKind {
        name: name.clone(),
        path: path.clone(),
    })?;

    match kind {
        NodeKind::Production(kind) => {
            let mut children = BumpVec::new_in(arena);
            match payload {
                Value::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        children.push(convert(item, arena, &format!("{path}[{i}]"))?);
                    }
                }
                // Empty elements round-tripped through XML come back as blank text.
                Value::String(s) if s.trim().is_empty() => {}
                Value::Null => {}
                _ => return Err(invalid(&path, "expected an array of children")),
            }
            Ok(Node::NonTerminal {
                kind,
                children: children.into_bump_slice(),
            })
        }
        NodeKind::Token(kind) => {
            let Value::String(text) = payload else {
                return Err(invalid(&path, "expected token text"));
            };
            Ok(Node::Terminal {
                kind,
                value: arena.alloc_str(text),
            })
        }
    }
}

fn invalid(path: &str, detail: &str) -> TreeError {
    TreeError::InvalidNode {
        path: path.to_string(),
        detail: detail.to_string(),
    }
}
