//! Segment-list algebra for URL paths.
//!
//! Pure helpers over `/`-delimited, already-decoded path segments. A leading
//! empty segment denotes an absolute path; a trailing empty segment marks a
//! directory.

/// Joins multiple segment lists into one path.
///
/// Input lists that are empty or equal to `[""]` are skipped. At each
/// boundary exactly one empty segment survives: if the accumulated list ends
/// with `""` and the incoming list does not consist solely of a leading
/// `""`, the trailing `""` is dropped; if instead the accumulated list ends
/// with a real segment and the incoming list starts with `""` followed by
/// more, the leading `""` is dropped. Inputs are never mutated.
///
/// `join(["a", ""], ["", "b"])` is `["a", "", "b"]`;
/// `join(["a"], ["b"])` is `["a", "b"]`.
pub fn join_path_segments(lists: &[Vec<String>]) -> Vec<String> {
    let mut finals: Vec<String> = Vec::new();
    for segments in lists {
        if segments.is_empty() || matches!(segments.as_slice(), [s] if s.is_empty()) {
            continue;
        }
        if finals.is_empty() {
            finals.extend(segments.iter().cloned());
            continue;
        }
        let mut incoming: &[String] = segments;
        let tail_empty = finals.last().is_some_and(String::is_empty);
        if tail_empty && (!incoming[0].is_empty() || incoming.len() > 1) {
            finals.pop();
        } else if !tail_empty && incoming[0].is_empty() && incoming.len() > 1 {
            incoming = &incoming[1..];
        }
        finals.extend(incoming.iter().cloned());
    }
    finals
}

/// Removes `removes` from the tail of `segments`.
///
/// Returns the remaining segments, or `segments` unchanged when the tail
/// does not match or `removes` is longer. A bare `[""]` on either side is
/// widened to `["", ""]` (the root path) before comparing; full equality
/// yields the empty list. A leading `""` in a multi-element `removes` is
/// excluded from the tail match, and a trailing `""` is re-appended only
/// when the removal request was not absolute-rooted and the remainder is
/// non-empty.
///
/// `remove(["", "a", "b", "c"], ["b", "c"])` is `["", "a", ""]`;
/// `remove(["", "a", "b", "c"], ["", "b", "c"])` is `["", "a"]`.
pub fn remove_path_segments(segments: &[String], removes: &[String]) -> Vec<String> {
    let root = [String::new(), String::new()];
    let segments: &[String] = if matches!(segments, [s] if s.is_empty()) {
        &root
    } else {
        segments
    };
    let removes: &[String] = if matches!(removes, [s] if s.is_empty()) {
        &root
    } else {
        removes
    };

    if segments == removes {
        return Vec::new();
    }
    if removes.len() > segments.len() {
        return segments.to_vec();
    }

    let absolute_removal = removes.len() > 1 && removes[0].is_empty();
    let matchable: &[String] = if absolute_removal {
        &removes[1..]
    } else {
        removes
    };

    if !matchable.is_empty() && segments[segments.len() - matchable.len()..] == *matchable {
        let mut remaining = segments[..segments.len() - matchable.len()].to_vec();
        if !removes[0].is_empty() && !remaining.is_empty() {
            remaining.push(String::new());
        }
        remaining
    } else {
        segments.to_vec()
    }
}

/// POSIX-style path normalization: collapses `//` and `.`, resolves `..`,
/// and preserves exactly two leading slashes. Returns `"."` for an empty
/// input. Trailing-slash (directory) information is dropped; callers that
/// need it re-append.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let initial_slashes = if path.starts_with("//") && !path.starts_with("///") {
        2
    } else if path.starts_with('/') {
        1
    } else {
        0
    };

    let mut comps: Vec<&str> = Vec::new();
    for comp in path.split('/') {
        if comp.is_empty() || comp == "." {
            continue;
        }
        if comp != ".."
            || (initial_slashes == 0 && comps.is_empty())
            || comps.last().is_some_and(|c| *c == "..")
        {
            comps.push(comp);
        } else if !comps.is_empty() {
            comps.pop();
        }
    }

    let mut out = "/".repeat(initial_slashes);
    out.push_str(&comps.join("/"));
    if out.is_empty() {
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn join_basic_pairs() {
        let tests: &[(&[&str], &[&str], &[&str])] = &[
            (&["a"], &["b"], &["a", "b"]),
            (&["a", ""], &["b"], &["a", "b"]),
            (&["a"], &["", "b"], &["a", "b"]),
            (&["a", ""], &["", "b"], &["a", "", "b"]),
            (&["a", "b"], &["c", "d"], &["a", "b", "c", "d"]),
        ];
        for (base, add, expected) in tests {
            let joined = join_path_segments(&[segs(base), segs(add)]);
            assert_eq!(joined, segs(expected), "join({base:?}, {add:?})");
        }
    }

    #[test]
    fn join_skips_empty_and_root_sentinel() {
        assert_eq!(join_path_segments(&[segs(&[]), segs(&["a"])]), segs(&["a"]));
        assert_eq!(join_path_segments(&[segs(&[""]), segs(&["", "x"])]), segs(&["", "x"]));
        assert_eq!(join_path_segments(&[segs(&["a"]), segs(&[""])]), segs(&["a"]));
        assert!(join_path_segments(&[]).is_empty());
    }

    #[test]
    fn join_no_doubled_boundary() {
        // exactly one of the tail/head empties survives at the boundary
        let joined = join_path_segments(&[segs(&["a", ""]), segs(&["", "b", ""])]);
        assert_eq!(joined, segs(&["a", "", "b", ""]));
        let joined = join_path_segments(&[segs(&["", "a"]), segs(&["", "b"])]);
        assert_eq!(joined, segs(&["", "a", "b"]));
    }

    #[test]
    fn join_three_lists() {
        let joined = join_path_segments(&[segs(&["", "a", ""]), segs(&["b"]), segs(&["c", ""])]);
        assert_eq!(joined, segs(&["", "a", "b", "c", ""]));
    }

    #[test]
    fn remove_relative_tail_keeps_directory_marker() {
        // '/a/b/c' - 'b/c' == '/a/'
        assert_eq!(
            remove_path_segments(&segs(&["", "a", "b", "c"]), &segs(&["b", "c"])),
            segs(&["", "a", ""])
        );
    }

    #[test]
    fn remove_absolute_tail() {
        // '/a/b/c' - '/b/c' == '/a'
        assert_eq!(
            remove_path_segments(&segs(&["", "a", "b", "c"]), &segs(&["", "b", "c"])),
            segs(&["", "a"])
        );
    }

    #[test]
    fn remove_no_match_returns_input() {
        let base = segs(&["", "a", "b"]);
        assert_eq!(remove_path_segments(&base, &segs(&["x"])), base);
        assert_eq!(remove_path_segments(&base, &segs(&["a"])), base);
    }

    #[test]
    fn remove_longer_than_segments_returns_input() {
        let base = segs(&["a"]);
        assert_eq!(remove_path_segments(&base, &segs(&["a", "b", "c"])), base);
    }

    #[test]
    fn remove_full_equality_empties() {
        assert!(remove_path_segments(&segs(&["", "a", "b"]), &segs(&["", "a", "b"])).is_empty());
        // both sides widen from [""] to ["", ""] and compare equal
        assert!(remove_path_segments(&segs(&[""]), &segs(&[""])).is_empty());
        assert!(remove_path_segments(&segs(&[""]), &segs(&["", ""])).is_empty());
    }

    #[test]
    fn remove_root_sentinel_strips_trailing_marker() {
        assert_eq!(
            remove_path_segments(&segs(&["a", ""]), &segs(&[""])),
            segs(&["a"])
        );
    }

    #[test]
    fn normalize_path_collapses() {
        assert_eq!(normalize_path("/file/title/../author"), "/file/author");
        assert_eq!(normalize_path("a/./b//c"), "a/b/c");
        assert_eq!(normalize_path("/a/b/"), "/a/b");
    }

    #[test]
    fn normalize_path_parent_escapes() {
        assert_eq!(normalize_path(".."), "..");
        assert_eq!(normalize_path("../a"), "../a");
        assert_eq!(normalize_path("/.."), "/");
        assert_eq!(normalize_path("a/../../b"), "../b");
    }

    #[test]
    fn normalize_path_roots() {
        assert_eq!(normalize_path(""), ".");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("//a"), "//a");
        assert_eq!(normalize_path("///a"), "/a");
    }
}
