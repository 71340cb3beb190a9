//! Installer behavior against temporary checkouts and destinations

use std::fs;
use std::path::{Path, PathBuf};

use cppkit::install::{self, FailurePolicy, OutcomeStatus};
use cppkit::{paths, ScaffoldError};
use tempfile::TempDir;

fn touch(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A checkout with three generator scripts plus the installer, two
/// top-level headers and a nested detail tree.
fn checkout(root: &Path) -> PathBuf {
    let dir = root.join("checkout");
    for script in ["mkclass.sh", "make-header.sh", "cppinit.sh", "install.sh"] {
        touch(&dir.join("scripts").join(script), "#!/bin/sh\n");
    }
    touch(&dir.join("headers/count_t.hpp"), "// count_t\n");
    touch(&dir.join("headers/narrow_cast.hpp"), "// narrow_cast\n");
    touch(&dir.join("headers/detail/new_overloads.hpp"), "// new\n");
    touch(&dir.join("headers/detail/usign/common.hpp"), "// common\n");
    dir
}

fn tree(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = files_under(dir)
        .into_iter()
        .map(|p| p.strip_prefix(dir).unwrap().to_path_buf())
        .collect();
    entries.sort();
    entries
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(files_under(&path));
        } else {
            out.push(path);
        }
    }
    out
}

#[test]
fn test_install_scripts_three_executables() {
    let temp = TempDir::new().unwrap();
    let checkout = checkout(temp.path());
    let bin = temp.path().join("bin");
    fs::create_dir(&bin).unwrap();

    let report =
        install::install_scripts(&paths::scripts_dir(&checkout), &bin, FailurePolicy::Abort)
            .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert!(report
        .outcomes
        .iter()
        .all(|o| o.status == OutcomeStatus::Installed));
    let mut names: Vec<String> = fs::read_dir(&bin)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["cppinit", "make-header", "mkclass"]);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        for name in &names {
            let mode = fs::metadata(bin.join(name)).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111, "{} should be executable by all", name);
        }
    }
}

#[test]
fn test_install_scripts_missing_target_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let checkout = checkout(temp.path());
    let before = tree(temp.path());

    let err = install::install_scripts(
        &paths::scripts_dir(&checkout),
        &temp.path().join("no-such-bin"),
        FailurePolicy::BestEffort,
    )
    .unwrap_err();

    assert!(matches!(err, ScaffoldError::PathNotFound(p) if p.ends_with("no-such-bin")));
    assert_eq!(tree(temp.path()), before);
}

#[test]
fn test_install_headers_creates_include_dir() {
    let temp = TempDir::new().unwrap();
    let checkout = checkout(temp.path());
    let include = paths::header_install_dir(&temp.path().join("usr/include"));

    let report = install::install_headers(
        &paths::headers_dir(&checkout),
        &include,
        FailurePolicy::Abort,
    )
    .unwrap();

    assert!(report.is_success());
    // Two headers plus the detail tree.
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(
        tree(&include),
        vec![
            PathBuf::from("count_t.hpp"),
            PathBuf::from("detail/new_overloads.hpp"),
            PathBuf::from("detail/usign/common.hpp"),
            PathBuf::from("narrow_cast.hpp"),
        ]
    );
}

#[test]
fn test_install_headers_twice_is_identical() {
    let temp = TempDir::new().unwrap();
    let checkout = checkout(temp.path());
    let include = temp.path().join("include/utility");
    let headers = paths::headers_dir(&checkout);

    install::install_headers(&headers, &include, FailurePolicy::Abort).unwrap();
    let first: Vec<Vec<u8>> = tree(&include)
        .iter()
        .map(|p| fs::read(include.join(p)).unwrap())
        .collect();

    install::install_headers(&headers, &include, FailurePolicy::Abort).unwrap();
    let second: Vec<Vec<u8>> = tree(&include)
        .iter()
        .map(|p| fs::read(include.join(p)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_reinstall_removes_stray_detail_file() {
    let temp = TempDir::new().unwrap();
    let checkout = checkout(temp.path());
    let include = temp.path().join("include/utility");
    touch(&include.join("detail/old.hpp"), "// stale\n");
    touch(&include.join("detail/gone/deep.hpp"), "// stale\n");
    // Files outside detail/ are additive and survive.
    touch(&include.join("local.hpp"), "// mine\n");

    install::install_headers(&paths::headers_dir(&checkout), &include, FailurePolicy::Abort)
        .unwrap();

    assert_eq!(
        tree(&include.join("detail")),
        vec![
            PathBuf::from("new_overloads.hpp"),
            PathBuf::from("usign/common.hpp"),
        ]
    );
    assert!(include.join("local.hpp").exists());
}

#[test]
fn test_shipped_checkout_is_installable() {
    let temp = TempDir::new().unwrap();
    let checkout = Path::new(env!("CARGO_MANIFEST_DIR"));
    let bin = temp.path().join("bin");
    fs::create_dir(&bin).unwrap();

    let scripts =
        install::install_scripts(&paths::scripts_dir(checkout), &bin, FailurePolicy::Abort)
            .unwrap();
    assert!(scripts.is_success());
    assert!(bin.join("mkclass").is_file());
    assert!(!bin.join("install").exists());

    let include = temp.path().join("include/utility");
    let headers =
        install::install_headers(&paths::headers_dir(checkout), &include, FailurePolicy::Abort)
            .unwrap();
    assert!(headers.is_success());
    for header in ["memory_view.hpp", "type_info.hpp", "unsigned_integer.hpp"] {
        assert!(include.join(header).is_file(), "{} not installed", header);
    }
    assert_eq!(
        tree(&include.join("detail")),
        vec![
            PathBuf::from("assignment_counter.hpp"),
            PathBuf::from("constructor_counter.hpp"),
            PathBuf::from("new_overloads.hpp"),
            PathBuf::from("usign/arithmetic.hpp"),
            PathBuf::from("usign/bitset_to_string.hpp"),
            PathBuf::from("usign/common.hpp"),
            PathBuf::from("usign/string_to_bitset.hpp"),
        ]
    );
}
