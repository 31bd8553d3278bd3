//! Integration tests for the dependency resolver over real files in scratch directories.

use std::fs;
use std::path::{Path, PathBuf};

use forthtalk::frontend::{KnownWords, Resolution, ResolveError, Resolver, SearchPaths, SymbolIndex};
use forthtalk_syntax::{RegisterTable, Warning};
use tempfile::TempDir;

/// Words a freshly flashed target already knows.
const BASELINE: &str = "marker ; mset mclr c! c@ ms for next cr .\" dup drop";

/// A scratch project: the temp dir is the working directory, sub-directories are search paths.
struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn file(&self, rel: &str, contents: &str) -> &Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    fn remove(&self, rel: &str) {
        fs::remove_file(self.dir.path().join(rel)).unwrap();
    }

    fn paths(&self, dirs: &[&str]) -> SearchPaths {
        let mut paths = SearchPaths::new().with_working_dir(self.dir.path());
        for dir in dirs {
            fs::create_dir_all(self.dir.path().join(dir)).unwrap();
            paths.push(*dir);
        }
        paths
    }
}

fn index(paths: &SearchPaths) -> SymbolIndex {
    SymbolIndex::build(&paths.scan_dirs()).index
}

fn resolve(paths: &SearchPaths, known: &mut KnownWords, entry: &str) -> Result<Resolution, ResolveError> {
    let index = index(paths);
    let registers = RegisterTable::new();
    Resolver::new(paths, &index, &registers, known).resolve(entry)
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_dependency_is_uploaded_before_user() {
    let project = Project::new();
    project
        .file("a.frt", ": main foo ;\n")
        .file("lib/b.frt", ": foo ( n -- n ) dup drop ;\n");
    let paths = project.paths(&["lib"]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a").unwrap();

    assert_eq!(names(resolution.discovery_order()), vec!["a.frt", "b.frt"]);
    assert_eq!(names(&resolution.upload_plan()), vec!["b.frt", "a.frt"]);
    assert!(resolution.unresolved().is_empty());
    assert!(resolution.is_complete());
}

#[test]
fn test_unknown_word_is_reported_once() {
    let project = Project::new();
    project.file("a.frt", ": main bar bar ;\n: other bar baz ;\n");
    let paths = project.paths(&[]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a.frt").unwrap();

    assert_eq!(resolution.unresolved(), &["bar", "baz"]);
    assert_eq!(names(&resolution.upload_plan()), vec!["a.frt"]);
}

#[test]
fn test_mutual_references_terminate() {
    let project = Project::new();
    project
        .file("a.frt", ": main b-word c-word ;\n")
        .file("lib/b.frt", ": b-word c-word ;\n")
        .file("lib/c.frt", ": c-word b-word ;\n: later c-word ;\n");
    let paths = project.paths(&["lib"]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a").unwrap();

    assert_eq!(names(resolution.discovery_order()), vec!["a.frt", "b.frt", "c.frt"]);
    assert_eq!(names(&resolution.upload_plan()), vec!["c.frt", "b.frt", "a.frt"]);
}

#[test]
fn test_entry_found_on_search_path_is_not_analysed_twice() {
    let project = Project::new();
    project
        .file("lib/a.frt", ": main helper ;\n: helper ;\n")
        .file("lib/b.frt", ": other main ;\n");
    let paths = project.paths(&["lib"]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a").unwrap();

    assert_eq!(names(resolution.discovery_order()), vec!["a.frt"]);
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_command_lines_are_not_analysed() {
    let project = Project::new();
    project.file("a.frt", "#send missing\n\\ #require other\n#words list\n: main ;\n");
    let paths = project.paths(&[]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a").unwrap();

    assert!(resolution.unresolved().is_empty());
}

#[test]
fn test_defining_words_define_the_next_word() {
    let project = Project::new();
    project.file(
        "a.frt",
        "variable counter\n5 constant FIVE\ntask: worker\n: main counter FIVE worker ;\n",
    );
    let paths = project.paths(&[]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a").unwrap();

    assert!(resolution.unresolved().is_empty());
    let session: Vec<&str> = known.session_defined().collect();
    assert_eq!(session, vec!["counter", "FIVE", "worker", "main"]);
}

#[test]
fn test_pending_definition_does_not_cross_lines() {
    let project = Project::new();
    project.file("a.frt", "variable\ncounter\n");
    let paths = project.paths(&[]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a").unwrap();

    assert_eq!(resolution.unresolved(), &["counter"]);
}

#[test]
fn test_strings_comments_literals_and_registers_are_ignored() {
    let project = Project::new();
    project.file(
        "a.frt",
        ": main ( unknown words here ) $FF %101 #12 PORTB c! .\" not words either\" cr ; \\ nor these\n",
    );
    let paths = project.paths(&[]);
    let index = index(&paths);
    let registers: RegisterTable = [("PORTB", "$25")].into_iter().collect();
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = Resolver::new(&paths, &index, &registers, &mut known)
        .resolve("a")
        .unwrap();

    assert!(resolution.unresolved().is_empty(), "{:?}", resolution.unresolved());
}

#[test]
fn test_session_words_are_reset_between_runs() {
    let project = Project::new();
    project
        .file("first.frt", ": helper ;\n")
        .file("second.frt", ": main helper ;\n");
    let paths = project.paths(&[]);
    let mut known = KnownWords::from_listing(BASELINE);

    resolve(&paths, &mut known, "first").unwrap();
    let resolution = resolve(&paths, &mut known, "second").unwrap();

    assert_eq!(resolution.unresolved(), &["helper"]);
}

#[test]
fn test_line_warnings_are_carried_with_position() {
    let project = Project::new();
    project.file("a.frt", ": main ;\n: broken ( never closed\n");
    let paths = project.paths(&[]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a").unwrap();

    let [warning] = resolution.warnings() else {
        panic!("expected one warning, got {:?}", resolution.warnings());
    };
    assert_eq!(warning.line, 2);
    assert!(matches!(warning.warning, Warning::UnterminatedGrouping { .. }));
}

// ============================================================================
// Index and failures
// ============================================================================

#[test]
fn test_last_scanned_definition_wins() {
    let project = Project::new();
    project
        .file("lib1/alpha.frt", ": blink ;\n: only-in-alpha ;\n")
        .file("lib1/beta.frt", ": blink ;\n")
        .file("lib2/gamma.frt", ": blink ;\n");
    let paths = project.paths(&["lib1", "lib2"]);

    let build = SymbolIndex::build(&paths.scan_dirs());

    assert_eq!(build.index.get("blink"), Some("gamma.frt"));
    assert_eq!(build.index.get("only-in-alpha"), Some("alpha.frt"));
    assert_eq!(names(&build.files), vec!["alpha.frt", "beta.frt", "gamma.frt"]);
}

#[test]
fn test_index_ignores_other_extensions_and_subdirectories() {
    let project = Project::new();
    project
        .file("lib/notes.txt", ": not-indexed ;\n")
        .file("lib/nested/deep.frt", ": too-deep ;\n")
        .file("lib/ok.frt", ": indexed ;\n");
    let paths = project.paths(&["lib", "does-not-exist-yet"]);
    fs::remove_dir(project.dir.path().join("does-not-exist-yet")).unwrap();

    let build = SymbolIndex::build(&paths.scan_dirs());

    assert_eq!(build.index.sorted(), vec![("indexed", "ok.frt")]);
}

#[test]
fn test_missing_entry_is_not_found() {
    let project = Project::new();
    let paths = project.paths(&["lib"]);
    let mut known = KnownWords::new();

    let err = resolve(&paths, &mut known, "nope").unwrap_err();

    assert!(matches!(err, ResolveError::NotFound { ref name } if name == "nope"));
    assert_eq!(err.to_string(), "File not found: nope");
}

#[test]
fn test_stale_index_entry_aborts() {
    let project = Project::new();
    project
        .file("a.frt", ": main gone ;\n")
        .file("lib/old.frt", ": gone ;\n");
    let paths = project.paths(&["lib"]);
    let index = index(&paths);
    project.remove("lib/old.frt");
    let registers = RegisterTable::new();
    let mut known = KnownWords::from_listing(BASELINE);

    let err = Resolver::new(&paths, &index, &registers, &mut known)
        .resolve("a")
        .unwrap_err();

    assert!(matches!(
        err,
        ResolveError::MissingDefinitionFile { ref file, ref word } if file == "old.frt" && word == "gone"
    ));
    assert_eq!(err.file(), "old.frt");
}

#[test]
fn test_working_dir_file_shadows_search_path() {
    let project = Project::new();
    project
        .file("a.frt", ": local ;\n")
        .file("lib/a.frt", ": remote ;\n");
    let paths = project.paths(&["lib"]);
    let mut known = KnownWords::from_listing(BASELINE);

    let resolution = resolve(&paths, &mut known, "a").unwrap();

    assert_eq!(resolution.discovery_order(), &[project.dir.path().join("a.frt")]);
    assert!(Path::new(&resolution.discovery_order()[0]).is_file());
}
