//! Artifact assembly
//!
//! Composes the final single-file library: banner, license block,
//! dependency includes, the guarded header section and, when there is one,
//! the guarded implementation section. The layout is fixed; every line ends
//! with the configured line ending.

use super::line_count::LineCounts;
use super::metadata::LicenseMetadata;

const DOCUMENTATION_URL: &str = "https://pagghiu.github.io/SaneCppLibraries";
const SOURCE_CODE_URL: &str = "https://github.com/pagghiu/SaneCppLibraries";

/// Preprocessor flag that enables every implementation section.
pub const IMPLEMENTATION_FLAG: &str = "SANE_CPP_IMPLEMENTATION";

/// `//` followed by 118 dashes and `eol`
pub fn divider(eol: &str) -> String {
    format!("//{}{}", "-".repeat(118), eol)
}

/// File name of the amalgamated artifact for `library`
pub fn artifact_name(library: &str) -> String {
    format!("SaneCpp{}.h", library)
}

/// Guard symbol wrapping the header section
pub fn header_guard(library: &str) -> String {
    format!("SANE_CPP_{}_HEADER", library.to_uppercase())
}

/// Guard symbol wrapping the implementation section
pub fn implementation_guard(library: &str) -> String {
    format!("SANE_CPP_{}_IMPLEMENTATION", library.to_uppercase())
}

/// Everything the assembler needs for one library
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'a> {
    pub library: &'a str,
    pub dependencies: &'a [String],
    pub version: &'a str,
    pub header_body: &'a str,
    pub implementation_body: &'a str,
    pub header_counts: LineCounts,
    pub implementation_counts: LineCounts,
    pub metadata: &'a LicenseMetadata,
    pub eol: &'a str,
}

/// Renders the artifact text
pub fn assemble(input: &AssemblyInput<'_>) -> String {
    let eol = input.eol;
    let div = divider(eol);
    let rule = div.trim_end_matches(eol);
    let mut out = String::new();
    let mut line = |text: &str| {
        out.push_str(text);
        out.push_str(eol);
    };

    let dependency_list = if input.dependencies.is_empty() {
        "None".to_string()
    } else {
        input
            .dependencies
            .iter()
            .map(|dep| artifact_name(dep))
            .collect::<Vec<_>>()
            .join(", ")
    };

    line(rule);
    line(&format!(
        "// {} - Sane C++ {} Library (single file build)",
        artifact_name(input.library),
        input.library
    ));
    line(rule);
    line(&format!("// Dependencies:       {}", dependency_list));
    line(&format!("// Version:            {}", input.version));
    line(&format!("// LOC header:         {}", input.header_counts));
    line(&format!("// LOC implementation: {}", input.implementation_counts));
    line(&format!("// Documentation:      {}", DOCUMENTATION_URL));
    line(&format!("// Source Code:        {}", SOURCE_CODE_URL));
    line(rule);

    line("// All copyrights and SPDX information for this library (each amalgamated section has its own copyright attributions):");
    for holder in input.metadata.authors.ranked() {
        line(&format!("// Copyright (c) {}", holder));
    }
    if let Some(identifiers) = input.metadata.spdx.joined() {
        line(&format!("// SPDX-License-Identifier: {}", identifiers));
    }
    line(rule);

    for dep in input.dependencies {
        line(&format!("#include \"{}\"", artifact_name(dep)));
    }
    if !input.dependencies.is_empty() {
        line("");
    }

    let guard = header_guard(input.library);
    line(&format!("#if !defined({})", guard));
    line(&format!("#define {} 1", guard));
    out.push_str(input.header_body);
    out.push_str(eol);
    out.push_str(&format!("#endif // {}", guard));
    out.push_str(eol);

    if !input.implementation_body.trim().is_empty() {
        let guard = implementation_guard(input.library);
        out.push_str(&format!(
            "#if defined({}) && !defined({}){}",
            IMPLEMENTATION_FLAG, guard, eol
        ));
        out.push_str(&format!("#define {} 1{}", guard, eol));
        out.push_str(input.implementation_body);
        out.push_str(eol);
        out.push_str(&format!("#endif // {}", guard));
        out.push_str(eol);
    }

    out
}
