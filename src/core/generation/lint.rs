//! Line-based checks on generated component code

use serde::Serialize;

/// Category of a lint finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    FontFamily,
    ExternalFonts,
    NextjsImage,
    MissingDimensions,
    Animations,
    GlobalResets,
    MissingExport,
    MissingImports,
}

impl ViolationKind {
    pub fn description(&self) -> &'static str {
        match self {
            ViolationKind::FontFamily => "Font family declarations are not allowed",
            ViolationKind::ExternalFonts => "External font URLs are not allowed",
            ViolationKind::NextjsImage => {
                "Use regular HTML img tags instead of Next.js Image component"
            }
            ViolationKind::MissingDimensions => "img tags must include width and height attributes",
            ViolationKind::Animations => "Animations are not allowed",
            ViolationKind::GlobalResets => "Global CSS resets are not allowed",
            ViolationKind::MissingExport => "Component must have an export statement",
            ViolationKind::MissingImports => "Component should include necessary imports",
        }
    }
}

/// One finding; `line` is 1-based and absent for whole-file checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Violation {
    fn new(kind: ViolationKind, line: Option<usize>) -> Self {
        Self {
            kind,
            description: kind.description().to_string(),
            line,
        }
    }
}

/// Per-line style checks
pub fn validate_component(code: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (index, line) in code.lines().enumerate() {
        let line_no = Some(index + 1);

        if line.contains("font-family") || line.contains("fontFamily") {
            violations.push(Violation::new(ViolationKind::FontFamily, line_no));
        }
        if line.contains("fonts.google") || line.contains("font-url") || line.contains("@import url")
        {
            violations.push(Violation::new(ViolationKind::ExternalFonts, line_no));
        }
        if line.contains("from \"next/image\"") || line.contains("from 'next/image'") {
            violations.push(Violation::new(ViolationKind::NextjsImage, line_no));
        }
        if line.contains("<img") && (!line.contains("width=") || !line.contains("height=")) {
            violations.push(Violation::new(ViolationKind::MissingDimensions, line_no));
        }
        if line.contains("animation") || line.contains("transition") || line.contains("animate-") {
            violations.push(Violation::new(ViolationKind::Animations, line_no));
        }
        if line.contains("* {") || line.contains("html {") || line.contains("body {") {
            violations.push(Violation::new(ViolationKind::GlobalResets, line_no));
        }
    }

    violations
}

/// Whole-file shape checks: an export and at least one import
pub fn check_module_shape(code: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !code.contains("export") {
        violations.push(Violation::new(ViolationKind::MissingExport, None));
    }
    if !code.contains("import") {
        violations.push(Violation::new(ViolationKind::MissingImports, None));
    }
    violations
}

/// All checks, line findings first
pub fn lint_component(code: &str) -> Vec<Violation> {
    let mut violations = validate_component(code);
    violations.extend(check_module_shape(code));
    violations
}
