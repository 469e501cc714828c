//! Source front end: finds class strings in files matched by glob patterns.
//!
//! Recognized forms are `class="..."` / `className="..."` attributes (also
//! `className={"..."}`) and string arguments of `tw(...)` / `.tw(...)` calls.

use crate::error::ScanError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One class string and where its first character sits (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassOccurrence {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanResult {
    pub occurrences: Vec<ClassOccurrence>,
    pub files_scanned: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanGlobOptions {
    pub base_path: PathBuf,
    pub respect_gitignore: bool,
    pub include_node_modules: bool,
}

impl Default for ScanGlobOptions {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            respect_gitignore: true,
            include_node_modules: false,
        }
    }
}

/// A class string found in a text buffer, before a path is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassString {
    pub line: usize,
    pub column: usize,
    pub value: String,
}

pub fn scan_globs_with_options(
    patterns: &[String],
    ignore_patterns: &[String],
    options: &ScanGlobOptions,
) -> Result<ScanResult, ScanError> {
    if patterns.is_empty() {
        return Err(ScanError::NoPatterns);
    }

    let globset = build_globset(patterns)?;
    let ignore_set = build_globset(ignore_patterns)?;
    let mut paths = Vec::new();
    let mut seen = HashSet::new();

    let mut builder = WalkBuilder::new(&options.base_path);
    builder
        .hidden(false)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore);

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let relative_path = path.strip_prefix(&options.base_path).unwrap_or(path);
        if !globset.is_match(relative_path) && !globset.is_match(path) {
            continue;
        }
        if ignore_set.is_match(relative_path) || ignore_set.is_match(path) {
            continue;
        }
        if should_skip_file(path, options) {
            continue;
        }
        if seen.insert(path.to_path_buf()) {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort();
    Ok(scan_files(&paths))
}

/// Reads each file and collects its class strings. Unreadable or non-UTF-8
/// files are skipped.
pub fn scan_files(paths: &[PathBuf]) -> ScanResult {
    let mut result = ScanResult::default();
    for path in paths {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping file");
                continue;
            }
        };
        result.files_scanned += 1;
        result
            .occurrences
            .extend(
                extract_class_strings(&text)
                    .into_iter()
                    .map(|found| ClassOccurrence {
                        path: path.clone(),
                        line: found.line,
                        column: found.column,
                        value: found.value,
                    }),
            );
    }
    tracing::debug!(
        files = result.files_scanned,
        occurrences = result.occurrences.len(),
        "scan finished"
    );
    result
}

/// Class strings in `text`, ordered by position.
pub fn extract_class_strings(text: &str) -> Vec<ClassString> {
    let mut spans = extract_class_attributes(text);
    spans.extend(extract_tw_calls(text));
    spans.sort_unstable();
    spans.dedup();

    let line_starts = line_starts(text);
    spans
        .into_iter()
        .map(|(start, end)| {
            let (line, column) = line_column(text, &line_starts, start);
            ClassString {
                line,
                column,
                value: text[start..end].to_string(),
            }
        })
        .collect()
}

fn should_skip_file(path: &Path, options: &ScanGlobOptions) -> bool {
    if !options.include_node_modules
        && path
            .components()
            .any(|component| component.as_os_str() == "node_modules")
    {
        return true;
    }

    path.extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .is_some_and(|ext| is_binary_extension(&ext))
}

fn is_binary_extension(ext: &str) -> bool {
    matches!(
        ext,
        "png"
            | "jpg"
            | "jpeg"
            | "gif"
            | "webp"
            | "ico"
            | "avif"
            | "mp4"
            | "mov"
            | "mp3"
            | "wav"
            | "zip"
            | "gz"
            | "pdf"
            | "woff"
            | "woff2"
            | "ttf"
            | "otf"
    )
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ScanError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(ScanError::GlobSet)
}

/// Byte spans of `class=` / `className=` attribute values.
fn extract_class_attributes(text: &str) -> Vec<(usize, usize)> {
    const ATTRS: [&str; 2] = ["class", "className"];
    let bytes = text.as_bytes();
    let mut out = Vec::new();

    for attr in ATTRS {
        for (idx, _) in text.match_indices(attr) {
            if preceded_by_name_char(bytes, idx) {
                continue;
            }
            let mut pos = skip_whitespace(bytes, idx + attr.len());
            if bytes.get(pos) != Some(&b'=') {
                continue;
            }
            pos = skip_whitespace(bytes, pos + 1);

            match bytes.get(pos) {
                Some(b'"') | Some(b'\'') => {
                    if let Some(span) = string_literal_span(bytes, pos) {
                        out.push(span);
                    }
                }
                Some(b'{') => {
                    let inner = skip_whitespace(bytes, pos + 1);
                    let Some((start, end)) = string_literal_span(bytes, inner) else {
                        continue;
                    };
                    // Only a lone literal; expressions are not class strings.
                    let close = skip_whitespace(bytes, end + 1);
                    if bytes.get(close) == Some(&b'}') {
                        out.push((start, end));
                    }
                }
                _ => {}
            }
        }
    }

    out
}

/// Byte spans of string literal arguments to `tw(...)`.
fn extract_tw_calls(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();

    for (idx, _) in text.match_indices("tw") {
        if idx > 0 && is_identifier_byte(bytes[idx - 1]) {
            continue;
        }
        let open = skip_whitespace(bytes, idx + 2);
        if bytes.get(open) != Some(&b'(') {
            continue;
        }
        let Some(close) = matching_paren(bytes, open) else {
            continue;
        };

        let mut pos = open + 1;
        while pos < close {
            match bytes[pos] {
                b'"' | b'\'' | b'`' => match string_literal_span(bytes, pos) {
                    Some((start, end)) => {
                        out.push((start, end));
                        pos = end + 1;
                    }
                    None => pos = skip_string(bytes, pos),
                },
                _ => pos += 1,
            }
        }
    }

    out
}

/// Content span of the literal opening at `idx`. Template literals with
/// `${...}` interpolation and unterminated strings yield `None`.
fn string_literal_span(bytes: &[u8], idx: usize) -> Option<(usize, usize)> {
    let quote = *bytes.get(idx)?;
    if !matches!(quote, b'"' | b'\'' | b'`') {
        return None;
    }
    let start = idx + 1;
    let mut pos = start;
    while let Some(&byte) = bytes.get(pos) {
        match byte {
            b'\\' => pos += 2,
            b'\n' if quote != b'`' => return None,
            b'$' if quote == b'`' && bytes.get(pos + 1) == Some(&b'{') => return None,
            _ if byte == quote => return Some((start, pos)),
            _ => pos += 1,
        }
    }
    None
}

/// Index just past the string opening at `idx`, or the end of input.
fn skip_string(bytes: &[u8], idx: usize) -> usize {
    let quote = bytes[idx];
    let mut pos = idx + 1;
    while let Some(&byte) = bytes.get(pos) {
        match byte {
            b'\\' => pos += 2,
            _ if byte == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

fn matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = open;
    while let Some(&byte) = bytes.get(pos) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(pos);
                }
            }
            b'"' | b'\'' | b'`' => {
                pos = skip_string(bytes, pos);
                continue;
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

fn preceded_by_name_char(bytes: &[u8], idx: usize) -> bool {
    idx > 0 && {
        let prev = bytes[idx - 1];
        is_identifier_byte(prev) || prev == b'-' || prev == b':'
    }
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

fn skip_whitespace(bytes: &[u8], mut idx: usize) -> usize {
    while bytes.get(idx).is_some_and(u8::is_ascii_whitespace) {
        idx += 1;
    }
    idx
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect()
}

fn line_column(text: &str, line_starts: &[usize], offset: usize) -> (usize, usize) {
    let line_idx = match line_starts.binary_search(&offset) {
        Ok(idx) => idx,
        Err(idx) => idx.saturating_sub(1),
    };
    let line_start = line_starts.get(line_idx).copied().unwrap_or(0);
    let column = text[line_start..offset].chars().count() + 1;
    (line_idx + 1, column)
}
