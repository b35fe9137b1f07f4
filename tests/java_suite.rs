use std::fs;
use std::path::{Path, PathBuf};

use jsyntax::{parse_source, ParserConfig, SourceUnit};
use walkdir::WalkDir;

fn java_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("java")
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Files under `recovery/` are malformed on purpose and must report at
/// least one diagnostic; every other file must parse cleanly.
#[test]
fn parse_all_java_files_under_tests_java() {
    init_logging();
    let root = java_root();
    assert!(root.exists(), "tests/java directory not found: {}", root.display());

    let config = ParserConfig::from_env().expect("parser limits from environment");
    let mut failures: Vec<(String, String)> = Vec::new();
    let mut total: usize = 0;

    for entry in WalkDir::new(&root).sort_by_file_name().into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |e| e != "java") {
            continue;
        }
        total += 1;
        let expect_errors = path.components().any(|c| c.as_os_str() == "recovery");

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(io_err) => {
                failures.push((path.display().to_string(), format!("IO error: {}", io_err)));
                continue;
            }
        };
        let name = path.strip_prefix(&root).unwrap_or(path).display().to_string();
        let output = parse_source(&SourceUnit::new(&name, source), &config, None);

        if expect_errors && output.diagnostics.is_empty() {
            failures.push((name, "expected diagnostics, parsed cleanly".to_string()));
        } else if !expect_errors && !output.diagnostics.is_empty() {
            let rendered: Vec<String> = output.diagnostics.iter().map(ToString::to_string).collect();
            failures.push((name, rendered.join("\n")));
        }
    }

    assert!(total >= 10, "only {} Java files found under {}", total, root.display());
    if !failures.is_empty() {
        eprintln!("Parsed {} Java files. {} failed:\n", total, failures.len());
        for (p, e) in &failures {
            eprintln!("- {} -> {}\n", p, e);
        }
        panic!("Java parse failures: {} of {}", failures.len(), total);
    }
}

#[test]
fn commented_out_source_yields_empty_unit() {
    init_logging();
    let source = fs::read_to_string(java_root().join("comments_only.java")).expect("read fixture");
    let output = parse_source(&SourceUnit::new("comments_only.java", source), &ParserConfig::default(), None);
    assert!(output.diagnostics.is_empty());
    assert!(output.unit.types.is_empty());
    assert!(output.unit.package.is_none());
}
