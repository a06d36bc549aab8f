// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde_json::{Map, Value};

/// Indentation unit: two spaces per depth level.
const INDENT_WIDTH: usize = 2;

/// Parses the content source's indented plain-text outline into the nested
/// source form accepted by `ConceptTree::build_from_source`.
///
/// Format: one entry per line, depth by two-space indentation, optional
/// `- `/`* `/`+ ` bullet, and `Label: description` on leaf lines. Blank lines
/// are skipped. No entries parse to `null` (the empty source).
pub fn parse_outline(text: &str) -> Result<Value, OutlineError> {
    let mut roots: Vec<OutlineNode> = Vec::new();
    // Open ancestor chain; `chain[d]` is the unfinished entry at depth `d`.
    let mut chain: Vec<OutlineNode> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        if raw_line.trim().is_empty() {
            continue;
        }

        let indent: String = raw_line
            .chars()
            .take_while(|ch| ch.is_whitespace())
            .collect();
        if indent.contains('\t') {
            return Err(OutlineError::TabIndent { line_number });
        }
        if indent.len() % INDENT_WIDTH != 0 {
            return Err(OutlineError::IrregularIndent { line_number });
        }
        let depth = indent.len() / INDENT_WIDTH;
        if depth > chain.len() {
            return Err(OutlineError::IrregularIndent { line_number });
        }

        while chain.len() > depth {
            let closed = chain.pop().expect("chain not empty (checked)");
            attach(&mut chain, &mut roots, closed)?;
        }

        let content = strip_bullet(raw_line.trim_start());
        let (label, description) = match content.split_once(": ") {
            Some((label, description)) if !label.is_empty() && !description.trim().is_empty() => {
                (label.to_owned(), Some(description.trim().to_owned()))
            }
            _ => (content.to_owned(), None),
        };

        chain.push(OutlineNode { line_number, label, description, children: Vec::new() });
    }

    while let Some(closed) = chain.pop() {
        attach(&mut chain, &mut roots, closed)?;
    }

    Ok(match roots.len() {
        0 => Value::Null,
        1 => roots.remove(0).into_value(),
        _ => Value::Array(roots.into_iter().map(OutlineNode::into_value).collect()),
    })
}

fn strip_bullet(content: &str) -> &str {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = content.strip_prefix(bullet) {
            return rest.trim_start();
        }
    }
    content
}

fn attach(
    chain: &mut [OutlineNode],
    roots: &mut Vec<OutlineNode>,
    closed: OutlineNode,
) -> Result<(), OutlineError> {
    match chain.last_mut() {
        Some(parent) => {
            if parent.description.is_some() {
                return Err(OutlineError::DescribedBranch { line_number: parent.line_number });
            }
            parent.children.push(closed);
            Ok(())
        }
        None => {
            roots.push(closed);
            Ok(())
        }
    }
}

struct OutlineNode {
    line_number: usize,
    label: String,
    description: Option<String>,
    children: Vec<OutlineNode>,
}

impl OutlineNode {
    fn into_value(self) -> Value {
        if self.children.is_empty() {
            match self.description {
                Some(description) => {
                    let mut entry = Map::new();
                    entry.insert(self.label, Value::String(description));
                    Value::Object(entry)
                }
                None => Value::String(self.label),
            }
        } else {
            let children = self
                .children
                .into_iter()
                .map(OutlineNode::into_value)
                .collect();
            let mut entry = Map::new();
            entry.insert(self.label, Value::Array(children));
            Value::Object(entry)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    TabIndent { line_number: usize },
    IrregularIndent { line_number: usize },
    /// A line with a `Label: description` form also has children; the outline
    /// format keeps descriptions on leaves.
    DescribedBranch { line_number: usize },
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TabIndent { line_number } => {
                write!(f, "line {line_number}: tabs are not valid outline indentation")
            }
            Self::IrregularIndent { line_number } => {
                write!(f, "line {line_number}: indentation is not a two-space multiple of the parent depth")
            }
            Self::DescribedBranch { line_number } => {
                write!(f, "line {line_number}: a described entry cannot have children")
            }
        }
    }
}

impl std::error::Error for OutlineError {}
