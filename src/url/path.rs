//! URL path modeled as decoded segments plus an absoluteness flag.

use std::fmt;

use super::codec::{percent_decode, percent_encode};
use super::segments::{join_path_segments, normalize_path, remove_path_segments};

/// A URL path.
///
/// Segments are stored percent-decoded, without the leading empty segment a
/// `/`-prefixed string would produce; absoluteness lives in a flag instead.
/// A trailing empty segment marks a directory (string form ends in `/`).
/// Mutators update in place and return `&mut Self` so calls chain.
#[derive(Debug, Clone, Default)]
pub struct Path {
    segments: Vec<String>,
    is_absolute: bool,
}

impl Path {
    /// The empty, relative path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded segments as stored (no leading empty segment).
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_absolute(&self) -> bool {
        self.is_absolute
    }

    /// True when the path is empty or its last segment is empty.
    pub fn is_dir(&self) -> bool {
        self.segments.is_empty() || self.segments.last().is_some_and(String::is_empty)
    }

    pub fn is_file(&self) -> bool {
        !self.is_dir()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Replaces the path from its string form, percent-decoding each
    /// segment. Absoluteness is derived from a leading `/`; an empty string
    /// resets to the empty relative path.
    pub fn load(&mut self, path: &str) -> &mut Self {
        if path.is_empty() {
            self.segments.clear();
            self.is_absolute = false;
            return self;
        }
        let segments = split_segments(path);
        self.store(segments, path.starts_with('/'))
    }

    /// Replaces the path from already-decoded segments; a leading empty
    /// segment denotes an absolute path.
    pub fn load_segments(&mut self, segments: Vec<String>) -> &mut Self {
        if segments.is_empty() {
            self.segments.clear();
            self.is_absolute = false;
            return self;
        }
        let absolute = segments[0].is_empty();
        self.store(segments, absolute)
    }

    /// Alias for [`Path::load`].
    pub fn set(&mut self, path: &str) -> &mut Self {
        self.load(path)
    }

    /// Collapses `.` and `..` segments, keeping the directory marker.
    ///
    /// `/file/title/../author` becomes `/file/author`. No-op on the empty
    /// path.
    pub fn normalize(&mut self) -> &mut Self {
        let current = self.to_string();
        if current.is_empty() {
            return self;
        }
        let mut normalized = normalize_path(&current);
        if self.is_dir() {
            normalized.push('/');
        }
        // normalizing "/" yields "//" via the directory marker; repair it
        if normalized.starts_with("//") {
            normalized = format!("/{}", normalized.trim_start_matches('/'));
        }
        self.load(&normalized)
    }

    /// Appends `path`, joining at the directory boundary. Appending the
    /// empty string is a no-op.
    pub fn add(&mut self, path: &str) -> &mut Self {
        if path.is_empty() {
            return self;
        }
        self.add_segments(split_segments(path))
    }

    /// Segment-list form of [`Path::add`].
    pub fn add_segments(&mut self, mut new_segments: Vec<String>) -> &mut Self {
        // growing the bare root: keep the leading slash in the joined list
        if matches!(self.segments.as_slice(), [s] if s.is_empty())
            && new_segments.first().is_some_and(|s| !s.is_empty())
        {
            new_segments.insert(0, String::new());
        }
        let mut base = self.segments.clone();
        if self.is_absolute && base.first().is_some_and(|s| !s.is_empty()) {
            base.insert(0, String::new());
        }
        let joined = join_path_segments(&[base, new_segments]);
        self.load_segments(joined)
    }

    /// With `None`, resets to the empty path; otherwise removes `path` from
    /// the tail (no-op when the tail does not match).
    pub fn remove(&mut self, path: Option<&str>) -> &mut Self {
        let Some(path) = path else {
            return self.load("");
        };
        let removes = split_segments(path);
        let mut base = self.segments.clone();
        if self.is_absolute {
            base.insert(0, String::new());
        }
        let remaining = remove_path_segments(&base, &removes);
        self.load_segments(remaining)
    }

    fn store(&mut self, mut segments: Vec<String>, absolute: bool) -> &mut Self {
        if segments.len() > 1 && segments[0].is_empty() {
            segments.remove(0);
        }
        self.segments = segments;
        self.is_absolute = absolute;
        self
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/').map(percent_decode).collect()
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.segments.clone();
        if self.is_absolute {
            if segments.is_empty() {
                // bare root placeholder
                segments = vec![String::new(), String::new()];
            } else {
                segments.insert(0, String::new());
            }
        }
        let raw = segments.join("/");
        // already-encoded input keeps its escapes; encoding again would
        // double them (this under-encodes a literal '%', a known limitation)
        if raw.contains('%') {
            return f.write_str(&raw);
        }
        let encoded: Vec<String> = segments.iter().map(|s| percent_encode(s, "/")).collect();
        f.write_str(&encoded.join("/"))
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Path {}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        let mut p = Self::new();
        p.load(path);
        p
    }
}
