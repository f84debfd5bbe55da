// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cobertura XML report parsing.
//!
//! ```xml
//! <coverage line-rate="0.8333">
//!   <packages>
//!     <package name="pkg">
//!       <classes>
//!         <class filename="pkg/Add.py" line-rate="0.75">
//!           <lines><line number="1" hits="1"/></lines>
//!         </class>
//!       </classes>
//!     </package>
//!   </packages>
//! </coverage>
//! ```

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Line coverage extracted from a Cobertura report.
#[derive(Debug, Clone, PartialEq)]
pub struct CoberturaReport {
    /// Root `line-rate` (0.0-1.0).
    pub line_rate: f64,
    /// Per-class `line-rate` keyed by `filename`.
    pub files: BTreeMap<String, f64>,
}

/// Parse a Cobertura XML report.
///
/// Only the attributes needed for line coverage are read, so a small
/// attribute scanner is used instead of a full XML parser.
pub fn parse_cobertura_xml(xml: &str) -> Result<CoberturaReport> {
    let root = element_tag(xml, "coverage")
        .ok_or_else(|| Error::Format("coverage report has no <coverage> element".into()))?;
    let line_rate = extract_attr(root, "line-rate")
        .ok_or_else(|| Error::Format("coverage report has no line-rate".into()))
        .and_then(parse_rate)?;

    let mut files = BTreeMap::new();
    for (start, _) in xml.match_indices("<class ") {
        let Some(class_tag) = open_tag_at(xml, start) else {
            continue;
        };

        match (
            extract_attr(class_tag, "filename"),
            extract_attr(class_tag, "line-rate"),
        ) {
            (Some(filename), Some(rate)) => {
                files.insert(unescape(filename), parse_rate(rate)?);
            }
            _ => tracing::warn!("skipping coverage class without filename/line-rate"),
        }
    }

    Ok(CoberturaReport { line_rate, files })
}

fn parse_rate(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|e| Error::Format(format!("invalid line-rate {s:?}: {e}")))
}

/// Opening tag of the first `element` in `xml`, without the closing `>`.
fn element_tag<'a>(xml: &'a str, element: &str) -> Option<&'a str> {
    let start = xml
        .match_indices(&format!("<{element}"))
        .map(|(i, _)| i)
        .find(|&i| {
            xml[i + element.len() + 1..]
                .starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/')
        })?;
    open_tag_at(xml, start)
}

fn open_tag_at(xml: &str, start: usize) -> Option<&str> {
    let end = xml[start..].find('>')?;
    Some(&xml[start..start + end])
}

/// Extract an attribute value from an opening tag.
fn extract_attr<'a>(tag: &'a str, attr_name: &str) -> Option<&'a str> {
    let pattern = format!("{attr_name}=\"");
    let mut search_from = 0;
    while let Some(offset) = tag[search_from..].find(&pattern) {
        let idx = search_from + offset;
        // Require a word boundary so `name` doesn't match inside `filename`
        if tag[..idx].ends_with(char::is_whitespace) {
            let value_start = idx + pattern.len();
            let value_end = tag[value_start..].find('"')? + value_start;
            return Some(&tag[value_start..value_end]);
        }
        search_from = idx + pattern.len();
    }
    None
}

fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "cobertura_tests.rs"]
mod tests;
