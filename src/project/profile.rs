//! MSVC argument vector assembly.
//!
//! One supported configuration: C++20, debug codegen, x64 console target.
//! Every builder is a pure function of the path table, so a given layout
//! always produces byte-identical vectors.

use crate::project::layout::ProjectLayout;
use std::path::Path;

/// Options shared by every compiler invocation.
const COMMON_COMPILE_OPTIONS: &[&str] = &[
    "/c",                  // Compile only
    "/nologo",             // Suppress the banner
    "/utf-8",              // Source and execution charset
    "/ZI",                 // Debug info for edit and continue
    "/diagnostics:column", // Column numbers in diagnostics
    "/std:c++20",          // Language standard
    "/W4",                 // Warning level
    "/Od",                 // No optimization
    "/D",
    "_DEBUG",
    "/D",
    "_WINDOWS",
    "/D",
    "_UNICODE",
    "/D",
    "UNICODE",
    "/EHsc",              // C++ exception handling
    "/fp:precise",        // Float model
    "/MDd",               // Debug multithreaded runtime DLL
    "/external:W4",       // Warning level for external headers
    "/FC",                // Full paths in diagnostics
    "/errorReport:prompt",
];

/// Linker options preceding the outputs and objects.
const COMMON_LINK_OPTIONS: &[&str] = &[
    "/ERRORREPORT:PROMPT",
    "/nologo",
    "/INCREMENTAL",     // Incremental link
    "/MANIFEST:EMBED",  // Manifest embedded in the image
    "/MANIFESTUAC:level='asInvoker' uiAccess='false'",
    "/DEBUG",              // Debug info
    "/SUBSYSTEM:CONSOLE",  // Console application
    "/TLBID:1",            // Linker-created type library id
    "/DYNAMICBASE",        // ASLR
    "/NXCOMPAT",           // Data execution prevention
    "/MACHINE:X64",        // x64 only
];

/// System import libraries pulled into every link.
const SYSTEM_LIBRARIES: &[&str] = &[
    "kernel32.lib",
    "user32.lib",
    "winspool.lib",
    "comdlg32.lib",
    "advapi32.lib",
    "shell32.lib",
    "ole32.lib",
    "oleaut32.lib",
    "uuid.lib",
    "odbc32.lib",
    "odbccp32.lib",
];

/// A single compiler invocation for the compile phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileJob {
    pub unit: String,      // Short name for log lines, e.g. "main.cpp"
    pub args: Vec<String>, // Full argv after the compiler path
}

/// Arguments for the precompile phase: create the PCH from `pch.cpp`.
pub fn precompile_args(layout: &ProjectLayout) -> Vec<String> {
    let mut args = common_compile_options();
    args.push(format!("/Yc{}", layout.pch_header_name())); // Create precompiled header
    args.push(format!("/Fp{}", layout.pch_binary.display()));
    args.push(format!("/Fd{}", layout.debug_database.display()));
    args.push(format!("/Fo{}", layout.pch_object.display()));
    push_includes(&mut args, layout);
    args.push(layout.pch_source.display().to_string());
    args
}

/// Per-unit invocations for the compile phase, in build order.
pub fn compile_jobs(layout: &ProjectLayout) -> Vec<CompileJob> {
    vec![
        compile_unit(layout, &layout.main_source, &layout.main_object),
        compile_unit(layout, &layout.util_source, &layout.util_object),
    ]
}

/// Arguments for the link phase: produce the executable from the objects.
pub fn link_args(layout: &ProjectLayout) -> Vec<String> {
    let mut args: Vec<String> = COMMON_LINK_OPTIONS.iter().map(|s| s.to_string()).collect();
    args.extend(SYSTEM_LIBRARIES.iter().map(|s| s.to_string()));
    args.push(format!("/ILK:{}", layout.incremental_db.display()));
    args.push(format!("/OUT:{}", layout.executable.display()));
    args.push(format!("/PDB:{}", layout.debug_database.display()));
    args.push(format!("/IMPLIB:{}", layout.import_library.display()));
    for object in [&layout.pch_object, &layout.main_object, &layout.util_object] {
        args.push(object.display().to_string());
    }
    args
}

fn common_compile_options() -> Vec<String> {
    COMMON_COMPILE_OPTIONS.iter().map(|s| s.to_string()).collect()
}

fn push_includes(args: &mut Vec<String>, layout: &ProjectLayout) {
    args.push(format!("/I{}", layout.utils_dir.display()));
    args.push(format!("/I{}", layout.source_root.display()));
}

fn compile_unit(layout: &ProjectLayout, source: &Path, object: &Path) -> CompileJob {
    let mut args = common_compile_options();
    args.push(format!("/Yu{}", layout.pch_header_name())); // Consume precompiled header
    args.push(format!("/Fp{}", layout.pch_binary.display()));
    args.push(format!("/Fd{}", layout.debug_database.display()));
    args.push(format!("/Fo{}", object.display()));
    push_includes(&mut args, layout);
    args.push(source.display().to_string());

    let unit = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    CompileJob { unit, args }
}
