// SPDX-License-Identifier: MIT OR Apache-2.0
//! Passes over generated shader source.
//!
//! The generator names every temporary `n<node>_p<port>` (optionally with a
//! suffix), which is what lets these passes find them without parsing the
//! target language. Each pass is a single sweep; none of them iterate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Temporary declaration: `<type|let|var> n<node>_p<port><suffix> =` or `:`
static DECLARATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:float|vec[234]<f32>|vec[234]|mat[34]|bool|f32|let|var)\s+(n\d+_p\d+\w*)\s*[:=]",
    )
    .unwrap()
});

/// `x * 1.0` closing an expression
static MUL_ONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\s*\*\s*1\.0(\s*[;,)])").unwrap());

/// `x + 0.0` closing an expression
static ADD_ZERO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\s*\+\s*0\.0(\s*[;,)])").unwrap());

/// `0.0 + x` opening an expression
static ZERO_ADD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([=(,]\s*)0\.0\s*\+\s*(\w+)").unwrap());

/// `normalize(normalize(x))`
static DOUBLE_NORMALIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"normalize\(normalize\(([^()]+)\)\)").unwrap());

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `line` mentions `ident` as a whole identifier
fn references(line: &str, ident: &str) -> bool {
    line.match_indices(ident).any(|(start, _)| {
        let before = line[..start].chars().next_back();
        let after = line[start + ident.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

/// Drop declarations of temporaries that no later line reads.
///
/// Returns the rewritten source and the number of removed lines. Every
/// kept line is terminated by `\n`. Liveness is checked against all later
/// lines, including declarations removed in the same sweep, so chains of
/// dead temporaries need another call to disappear completely.
pub fn remove_dead_assignments(src: &str) -> (String, usize) {
    let lines: Vec<&str> = src.lines().collect();
    let mut keep = vec![true; lines.len()];

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = DECLARATION_PATTERN.captures(line) else {
            continue;
        };
        let name = &caps[1];
        if !lines[i + 1..].iter().any(|later| references(later, name)) {
            keep[i] = false;
        }
    }

    let removed = keep.iter().filter(|k| !**k).count();
    let mut out = String::with_capacity(src.len() + 1);
    for (line, _) in lines.iter().zip(&keep).filter(|(_, k)| **k) {
        out.push_str(line);
        out.push('\n');
    }
    (out, removed)
}

/// Fold arithmetic with literal identities: `x * 1.0`, `x + 0.0`, `0.0 + x`
pub fn fold_literal_ops(src: &str) -> String {
    let result = MUL_ONE_PATTERN.replace_all(src, "${1}${2}");
    let result = ADD_ZERO_PATTERN.replace_all(&result, "${1}${2}");
    ZERO_ADD_PATTERN.replace_all(&result, "${1}${2}").into_owned()
}

/// Collapse `normalize(normalize(x))` into `normalize(x)`
pub fn simplify_identity_ops(src: &str) -> String {
    DOUBLE_NORMALIZE_PATTERN
        .replace_all(src, "normalize(${1})")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_temporary_is_removed() {
        let src = "void main() {\n    float n3_p0 = 1.0;\n    vec3 n4_p0 = vec3(0.5);\n    out_color = vec4(n4_p0, 1.0);\n}\n";
        let (out, removed) = remove_dead_assignments(src);

        assert_eq!(removed, 1);
        assert!(!out.contains("n3_p0"));
        assert!(out.contains("vec3 n4_p0 = vec3(0.5);"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_wgsl_declarations() {
        let src = "    let n1_p0: f32 = 2.0;\n    var n2_p0_tmp = n1_p0 * 2.0;\n";
        let (out, removed) = remove_dead_assignments(src);

        // n2 is dead, n1 is read by n2's (removed) line in the same sweep
        assert_eq!(removed, 1);
        assert_eq!(out, "    let n1_p0: f32 = 2.0;\n");

        let (out, removed) = remove_dead_assignments(&out);
        assert_eq!(removed, 1);
        assert_eq!(out, "");
    }

    #[test]
    fn test_references_need_identifier_boundaries() {
        let src = "    float n1_p0 = 1.0;\n    float n1_p01 = 2.0;\n    result = n1_p01;\n";
        let (out, removed) = remove_dead_assignments(src);

        assert_eq!(removed, 1);
        assert!(!out.contains("n1_p0 ="));
        assert!(out.contains("n1_p01 = 2.0"));
        assert!(references("x = n1_p0.xyz;", "n1_p0"));
        assert!(!references("x = n1_p0_a;", "n1_p0"));
    }

    #[test]
    fn test_non_temporaries_are_kept() {
        let src = "    float roughness = 0.5;\n    vec3 n9_p0 = vec3(1.0);\n    n9_p0 += 1.0;\n";
        let (out, removed) = remove_dead_assignments(src);
        assert_eq!(removed, 0);
        assert_eq!(out, src);
    }

    #[test]
    fn test_fold_literal_ops() {
        assert_eq!(fold_literal_ops("a = x * 1.0;"), "a = x;");
        assert_eq!(fold_literal_ops("a = f(x + 0.0, y);"), "a = f(x, y);");
        assert_eq!(fold_literal_ops("a = 0.0 + x;"), "a = x;");

        assert_eq!(fold_literal_ops("a = x * 1.05;"), "a = x * 1.05;");
        assert_eq!(fold_literal_ops("a = 10.0 + x;"), "a = 10.0 + x;");
        assert_eq!(fold_literal_ops("a = x + 0.0 * y;"), "a = x + 0.0 * y;");
    }

    #[test]
    fn test_double_normalize() {
        assert_eq!(
            simplify_identity_ops("n = normalize(normalize(n2_p0));"),
            "n = normalize(n2_p0);"
        );
        assert_eq!(
            simplify_identity_ops("n = normalize(cross(a, b));"),
            "n = normalize(cross(a, b));"
        );
    }
}
