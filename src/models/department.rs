//! Department codes and their display names.

/// Known department codes with human-readable names.
///
/// Codes not listed here are shown as the raw code.
const DEPARTMENT_NAMES: &[(&str, &str)] = &[
    ("ANTH", "Anthropology"),
    ("BILD", "Biology (Lower Division)"),
    ("CHEM", "Chemistry and Biochemistry"),
    ("COGS", "Cognitive Science"),
    ("CSE", "Computer Science and Engineering"),
    ("DSC", "Data Science"),
    ("ECE", "Electrical and Computer Engineering"),
    ("ECON", "Economics"),
    ("HIST", "History"),
    ("LING", "Linguistics"),
    ("MAE", "Mechanical and Aerospace Engineering"),
    ("MATH", "Mathematics"),
    ("PHIL", "Philosophy"),
    ("PHYS", "Physics"),
    ("POLI", "Political Science"),
    ("PSYC", "Psychology"),
    ("SOCI", "Sociology"),
];

/// Returns the display name for a department code, if one is known.
///
/// Lookup is case-insensitive.
pub fn department_name(code: &str) -> Option<&'static str> {
    DEPARTMENT_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Returns the label used in lists: "Name (CODE)" or the raw code.
pub fn department_label(code: &str) -> String {
    match department_name(code) {
        Some(name) => format!("{name} ({code})"),
        None => code.to_string(),
    }
}
