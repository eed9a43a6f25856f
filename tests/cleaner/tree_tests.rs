// Tests for the tree cleaner against MemoryFs
// No disk access: every tree is built in memory

use logless::cleaner::{CleanError, ExclusionSet, MemoryFs, TreeCleaner};
use std::path::{Path, PathBuf};

fn project() -> MemoryFs {
    let fs = MemoryFs::new();
    fs.add_file("/p/index.js", "import x from './x';\nconsole.log(x);\nexport default x;\n");
    fs.add_file("/p/src/app.ts", "const a = 1;\nconsole.log(a)\nreturn a;\n");
    fs.add_file("/p/src/view.vue", "<script>\nconsole.log('mounted');\n</script>\n");
    fs.add_file("/p/src/deep/lib.rs", "fn main() {}\n");
    fs.add_file("/p/notes.txt", "console.log(\"not code\")\n");
    fs.add_file("/p/node_modules/pkg/index.js", "console.log('dep');\n");
    fs
}

#[test]
fn test_scenario_single_statement_becomes_empty() {
    let fs = MemoryFs::new();
    fs.add_file("/p/a.js", "console.log(\"hi\");\n");

    TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new()).unwrap();

    assert_eq!(fs.text("/p/a.js").unwrap(), "");
}

#[test]
fn test_scenario_statement_without_semicolon() {
    let fs = MemoryFs::new();
    fs.add_file("/p/a.js", "const x = 1;\nconsole.log(x)\nreturn x;\n");

    TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new()).unwrap();

    assert_eq!(fs.text("/p/a.js").unwrap(), "const x = 1;\nreturn x;\n");
}

#[test]
fn test_scenario_excluded_directory_untouched() {
    let fs = MemoryFs::new();
    fs.add_file("/p/vendor/util.js", "console.log(\"skip\")");
    fs.add_file("/p/main.js", "console.log(\"go\")");

    let excluded = ExclusionSet::from_names(["vendor"]);
    let report = TreeCleaner::new(&fs).clean(Path::new("/p"), &excluded).unwrap();

    assert_eq!(fs.text("/p/vendor/util.js").unwrap(), "console.log(\"skip\")");
    assert_eq!(fs.text("/p/main.js").unwrap(), "");
    assert_eq!(report.dirs_excluded, 1);
    assert!(!fs.writes().contains(&PathBuf::from("/p/vendor/util.js")));
}

#[test]
fn test_scenario_unrecognized_extension_untouched() {
    let fs = MemoryFs::new();
    fs.add_file("/p/notes.txt", "console.log(\"not code\")");

    let report = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new()).unwrap();

    assert_eq!(fs.text("/p/notes.txt").unwrap(), "console.log(\"not code\")");
    assert_eq!(report.files_scanned, 0);
    assert!(fs.writes().is_empty());
}

#[test]
fn test_scenario_multiline_call_left_alone() {
    let fs = MemoryFs::new();
    let text = "console.log(\n  \"multi\"\n);\n";
    fs.add_file("/p/a.js", text);

    let report = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new()).unwrap();

    assert_eq!(fs.text("/p/a.js").unwrap(), text);
    assert_eq!(report.statements_removed, 0);
}

#[test]
fn test_clean_whole_project() {
    let fs = project();

    let report = TreeCleaner::new(&fs)
        .clean(Path::new("/p"), &ExclusionSet::with_defaults())
        .unwrap();

    assert_eq!(fs.text("/p/index.js").unwrap(), "import x from './x';\nexport default x;\n");
    assert_eq!(fs.text("/p/src/app.ts").unwrap(), "const a = 1;\nreturn a;\n");
    assert_eq!(fs.text("/p/src/view.vue").unwrap(), "<script>\n</script>\n");
    assert_eq!(fs.text("/p/src/deep/lib.rs").unwrap(), "fn main() {}\n");
    assert_eq!(fs.text("/p/notes.txt").unwrap(), "console.log(\"not code\")\n");
    assert_eq!(fs.text("/p/node_modules/pkg/index.js").unwrap(), "console.log('dep');\n");

    assert_eq!(report.files_scanned, 4);
    assert_eq!(report.files_modified, 3);
    assert_eq!(report.statements_removed, 3);
    assert_eq!(report.dirs_excluded, 1);
    // /p, /p/src, /p/src/deep
    assert_eq!(report.dirs_visited, 3);
}

#[test]
fn test_recognized_files_are_written_even_when_unchanged() {
    let fs = project();

    let report = TreeCleaner::new(&fs)
        .clean(Path::new("/p"), &ExclusionSet::with_defaults())
        .unwrap();

    assert!(fs.writes().contains(&PathBuf::from("/p/src/deep/lib.rs")));
    assert!(!report.modified.contains(&PathBuf::from("/p/src/deep/lib.rs")));
}

#[test]
fn test_excluded_name_matches_at_any_depth() {
    let fs = MemoryFs::new();
    fs.add_file("/p/build/a.js", "console.log(1);\n");
    fs.add_file("/p/src/build/b.js", "console.log(2);\n");
    fs.add_file("/p/src/builder/c.js", "console.log(3);\n");

    let excluded = ExclusionSet::from_names(["build"]);
    let report = TreeCleaner::new(&fs).clean(Path::new("/p"), &excluded).unwrap();

    assert_eq!(fs.text("/p/build/a.js").unwrap(), "console.log(1);\n");
    assert_eq!(fs.text("/p/src/build/b.js").unwrap(), "console.log(2);\n");
    assert_eq!(fs.text("/p/src/builder/c.js").unwrap(), "");
    assert_eq!(report.dirs_excluded, 2);
}

#[test]
fn test_exclusion_does_not_apply_to_files() {
    let fs = MemoryFs::new();
    fs.add_file("/p/vendor", "not a dir");
    fs.add_file("/p/skip.js", "console.log(1);\n");

    let excluded = ExclusionSet::from_names(["skip.js"]);
    TreeCleaner::new(&fs).clean(Path::new("/p"), &excluded).unwrap();

    assert_eq!(fs.text("/p/skip.js").unwrap(), "");
}

#[test]
fn test_root_name_is_not_checked_against_exclusions() {
    let fs = MemoryFs::new();
    fs.add_file("/work/vendor/a.js", "console.log(1);\n");

    let excluded = ExclusionSet::from_names(["vendor"]);
    TreeCleaner::new(&fs).clean(Path::new("/work/vendor"), &excluded).unwrap();

    assert_eq!(fs.text("/work/vendor/a.js").unwrap(), "");
}

#[test]
fn test_other_entries_are_ignored() {
    let fs = MemoryFs::new();
    fs.add_other("/p/link.js");
    fs.add_other("/p/linked_dir");
    fs.add_file("/p/real.js", "console.log(1);\n");

    let report = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new()).unwrap();

    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.dirs_visited, 1);
    assert_eq!(fs.writes(), vec![PathBuf::from("/p/real.js")]);
}

#[test]
fn test_clean_is_idempotent() {
    let fs = project();
    let cleaner = TreeCleaner::new(&fs);
    let excluded = ExclusionSet::with_defaults();

    cleaner.clean(Path::new("/p"), &excluded).unwrap();
    let snapshot: Vec<Option<String>> = ["/p/index.js", "/p/src/app.ts", "/p/src/view.vue"]
        .iter()
        .map(|p| fs.text(p))
        .collect();

    let second = cleaner.clean(Path::new("/p"), &excluded).unwrap();
    let after: Vec<Option<String>> = ["/p/index.js", "/p/src/app.ts", "/p/src/view.vue"]
        .iter()
        .map(|p| fs.text(p))
        .collect();

    assert_eq!(snapshot, after);
    assert!(second.is_clean());
    assert_eq!(second.files_modified, 0);
}

#[test]
fn test_dry_run_writes_nothing() {
    let fs = project();

    let report = TreeCleaner::new(&fs)
        .with_dry_run(true)
        .clean(Path::new("/p"), &ExclusionSet::with_defaults())
        .unwrap();

    assert!(fs.writes().is_empty());
    assert_eq!(report.files_modified, 3);
    assert_eq!(report.statements_removed, 3);
    assert_eq!(
        fs.text("/p/index.js").unwrap(),
        "import x from './x';\nconsole.log(x);\nexport default x;\n"
    );
}

#[test]
fn test_bytes_removed_counted() {
    let fs = MemoryFs::new();
    fs.add_file("/p/a.js", "keep();\nconsole.log(1);\n");

    let report = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new()).unwrap();

    assert_eq!(report.bytes_removed, "console.log(1);\n".len() as u64);
    assert_eq!(report.modified, vec![PathBuf::from("/p/a.js")]);
}

#[test]
fn test_first_error_aborts_traversal() {
    let fs = MemoryFs::new();
    fs.add_file("/p/a.js", "console.log('a');\n");
    fs.add_file("/p/b.js", "console.log('b');\n");
    fs.add_file("/p/c.js", "console.log('c');\n");
    fs.deny("/p/b.js");

    let result = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new());

    match result {
        Err(CleanError::PermissionDenied { path, operation }) => {
            assert_eq!(path, PathBuf::from("/p/b.js"));
            assert_eq!(operation, "reading file");
        }
        other => panic!("Expected PermissionDenied, got {:?}", other),
    }

    // Rewritten before the failure, untouched after it
    assert_eq!(fs.text("/p/a.js").unwrap(), "");
    assert_eq!(fs.text("/p/c.js").unwrap(), "console.log('c');\n");
}

#[test]
fn test_unwritable_file_aborts() {
    let fs = MemoryFs::new();
    fs.add_file("/p/a.js", "console.log('a');\n");
    fs.add_file("/p/b.js", "console.log('b');\n");
    fs.add_file("/p/c.js", "console.log('c');\n");
    fs.deny_write("/p/b.js");

    let result = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new());

    match result {
        Err(CleanError::PermissionDenied { path, operation }) => {
            assert_eq!(path, PathBuf::from("/p/b.js"));
            assert_eq!(operation, "writing file");
        }
        other => panic!("Expected PermissionDenied, got {:?}", other),
    }

    assert_eq!(fs.text("/p/a.js").unwrap(), "");
    assert_eq!(fs.text("/p/b.js").unwrap(), "console.log('b');\n");
    assert_eq!(fs.text("/p/c.js").unwrap(), "console.log('c');\n");
    assert_eq!(fs.writes(), vec![PathBuf::from("/p/a.js")]);
}

#[test]
fn test_unwritable_file_is_fine_in_dry_run() {
    let fs = MemoryFs::new();
    fs.add_file("/p/a.js", "console.log('a');\n");
    fs.deny_write("/p/a.js");

    let report = TreeCleaner::new(&fs)
        .with_dry_run(true)
        .clean(Path::new("/p"), &ExclusionSet::new())
        .unwrap();

    assert_eq!(report.statements_removed, 1);
}

#[test]
fn test_inaccessible_root_is_not_reported_missing() {
    let fs = MemoryFs::new();
    fs.add_file("/p/a.js", "console.log(1);\n");
    fs.deny("/p");

    let result = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new());

    match result {
        Err(CleanError::PermissionDenied { path, operation }) => {
            assert_eq!(path, PathBuf::from("/p"));
            assert_eq!(operation, "inspecting directory");
        }
        other => panic!("Expected PermissionDenied, got {:?}", other),
    }
}

#[test]
fn test_unreadable_subdirectory_aborts() {
    let fs = MemoryFs::new();
    fs.add_dir("/p/locked");
    fs.add_file("/p/z.js", "console.log('z');\n");
    fs.deny("/p/locked");

    let result = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new());

    assert!(matches!(result, Err(CleanError::PermissionDenied { .. })));
    assert_eq!(fs.text("/p/z.js").unwrap(), "console.log('z');\n");
}

#[test]
fn test_excluded_unreadable_directory_is_never_listed() {
    let fs = MemoryFs::new();
    fs.add_dir("/p/secret");
    fs.deny("/p/secret");
    fs.add_file("/p/a.js", "console.log(1);\n");

    let excluded = ExclusionSet::from_names(["secret"]);
    let report = TreeCleaner::new(&fs).clean(Path::new("/p"), &excluded).unwrap();

    assert_eq!(report.files_modified, 1);
}

#[test]
fn test_non_utf8_file_aborts() {
    let fs = MemoryFs::new();
    fs.add_bytes("/p/bad.js", &[0x63, 0xff, 0xfe, 0x0a]);

    let result = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new());

    match result {
        Err(CleanError::InvalidEncoding { path }) => assert_eq!(path, PathBuf::from("/p/bad.js")),
        other => panic!("Expected InvalidEncoding, got {:?}", other),
    }
}

#[test]
fn test_non_utf8_unrecognized_file_is_skipped() {
    let fs = MemoryFs::new();
    fs.add_bytes("/p/image.png", &[0x89, 0x50, 0x4e, 0x47, 0xff]);
    fs.add_file("/p/a.ts", "console.log(1)\n");

    let report = TreeCleaner::new(&fs).clean(Path::new("/p"), &ExclusionSet::new()).unwrap();

    assert_eq!(report.files_modified, 1);
}

#[test]
fn test_missing_root() {
    let fs = MemoryFs::new();

    let result = TreeCleaner::new(&fs).clean(Path::new("/nowhere"), &ExclusionSet::new());

    assert!(matches!(result, Err(CleanError::DirectoryNotFound { .. })));
}

#[test]
fn test_root_is_a_file() {
    let fs = MemoryFs::new();
    fs.add_file("/p/a.js", "console.log(1);\n");

    let result = TreeCleaner::new(&fs).clean(Path::new("/p/a.js"), &ExclusionSet::new());

    assert!(matches!(result, Err(CleanError::NotADirectory { .. })));
    assert_eq!(fs.text("/p/a.js").unwrap(), "console.log(1);\n");
}
