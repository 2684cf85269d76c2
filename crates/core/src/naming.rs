//! Canonical folder names.
//!
//! Every entity maps to a folder named `<code> - <name>`, for example
//! `CPA - Cancer Program A`. Names are pure functions of the entity's code and name: they never
//! look at the filesystem and always produce a single path segment that is safe on common host
//! filesystems.
//!
//! ## Collisions
//!
//! Two entities with different codes or names are expected to map to different folders. This
//! holds as long as the domain layer keeps codes unique among siblings; sanitisation can map
//! distinct inputs (`A/B` and `A:B`) to the same segment, which this module cannot detect.

use crate::constants::{FOLDER_NAME_REPLACEMENT, FOLDER_NAME_SEPARATOR, RESERVED_FOLDER_NAME_CHARS};
use study_types::{Assay, NonEmptyText, Program, Study};

pub fn program_folder_name(program: &Program) -> String {
    folder_name(&program.code, &program.name)
}

pub fn study_folder_name(study: &Study) -> String {
    folder_name(&study.code, &study.name)
}

pub fn assay_folder_name(assay: &Assay) -> String {
    folder_name(&assay.code, &assay.name)
}

fn folder_name(code: &NonEmptyText, name: &NonEmptyText) -> String {
    format!(
        "{}{}{}",
        sanitise_segment(code.as_str()),
        FOLDER_NAME_SEPARATOR,
        sanitise_segment(name.as_str())
    )
}

/// Makes `raw` usable as a single path segment.
///
/// Reserved and control characters become `_`, whitespace runs collapse to one space, and
/// leading/trailing spaces plus trailing dots are dropped. Empty results and the special
/// segments `.` and `..` become `_`.
pub fn sanitise_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if c.is_control() || RESERVED_FOLDER_NAME_CHARS.contains(&c) {
            out.push(FOLDER_NAME_REPLACEMENT);
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_end_matches(&['.', ' '][..]);
    if trimmed.is_empty() {
        FOLDER_NAME_REPLACEMENT.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).unwrap()
    }

    fn program() -> Program {
        Program::new(text("CPA"), text("Cancer Program A"))
    }

    #[test]
    fn test_program_folder_name() {
        assert_eq!(program_folder_name(&program()), "CPA - Cancer Program A");
    }

    #[test]
    fn test_study_and_assay_folder_names() {
        let study = Study::new(text("CPA-10001"), text("Kinase Screen"), program());
        let assay = Assay::new(text("CPA-10001-001"), text("Western Blot"), study.clone());

        assert_eq!(study_folder_name(&study), "CPA-10001 - Kinase Screen");
        assert_eq!(assay_folder_name(&assay), "CPA-10001-001 - Western Blot");
    }

    #[test]
    fn test_folder_name_is_deterministic() {
        assert_eq!(program_folder_name(&program()), program_folder_name(&program()));
    }

    #[test]
    fn test_sanitise_replaces_separators_and_reserved_chars() {
        assert_eq!(sanitise_segment("a/b\\c"), "a_b_c");
        assert_eq!(sanitise_segment("pH: 7? <yes>|\"no\"*"), "pH_ 7_ _yes___no__");
        assert_eq!(sanitise_segment("tab\u{0}null"), "tab_null");
    }

    #[test]
    fn test_sanitise_collapses_whitespace_and_trims() {
        assert_eq!(sanitise_segment("  Dose   Response\t\nStudy  "), "Dose Response Study");
        assert_eq!(sanitise_segment("Trailing dots..."), "Trailing dots");
    }

    #[test]
    fn test_sanitise_special_segments() {
        assert_eq!(sanitise_segment(".."), "_");
        assert_eq!(sanitise_segment("."), "_");
        assert_eq!(sanitise_segment("   "), "_");
    }

    #[test]
    fn test_folder_name_never_contains_separator() {
        let p = Program::new(text("../etc"), text("passwd/shadow"));
        let name = program_folder_name(&p);
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
        assert_eq!(name, ".._etc - passwd_shadow");
    }
}
