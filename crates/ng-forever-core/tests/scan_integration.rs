//! End-to-end scanner behavior over real directory trees.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ng_forever_core::{FixSuggestion, Issue, Rule, ScanObserver, ScanStats, Scanner};
use semver::Version;
use tempfile::TempDir;

/// Minimal line rule used to drive the orchestrator: flags lines
/// containing `PROBE`.
struct Probe {
    ext: &'static str,
    skip_commented: bool,
    versions: &'static [&'static str],
}

impl Probe {
    fn html() -> Self {
        Self {
            ext: "html",
            skip_commented: false,
            versions: &[],
        }
    }
}

impl Rule for Probe {
    fn name(&self) -> &'static str {
        "probe"
    }
    fn description(&self) -> &'static str {
        "Find PROBE tokens"
    }
    fn file_extension(&self) -> &'static str {
        self.ext
    }
    fn supported_versions(&self) -> &[&str] {
        self.versions
    }
    fn fix_suggestions(&self) -> &[&str] {
        &["Remove the PROBE token"]
    }
    fn skip_commented(&self) -> bool {
        self.skip_commented
    }

    fn classify_line(&self, line: &str, line_number: usize) -> Option<Issue> {
        line.contains("PROBE").then(|| Issue::new(line_number, line))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Issue { seq: usize, line: usize },
    Skipped { version: String },
    Clean,
    Suggestion(FixSuggestion),
    Stats(ScanStats),
}

/// Observer that records events into a shared buffer so tests can inspect
/// them after the scanner consumed the box.
#[derive(Clone, Default)]
struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl ScanObserver for Recorder {
    fn issue(&mut self, seq: usize, _file: &Path, line: usize, _code: &str, _commented: bool) {
        self.events.borrow_mut().push(Event::Issue { seq, line });
    }

    fn rule_skipped(&mut self, _description: &str, version: &str) {
        self.events.borrow_mut().push(Event::Skipped {
            version: version.to_string(),
        });
    }

    fn rule_clean(&mut self, _description: &str) {
        self.events.borrow_mut().push(Event::Clean);
    }

    fn fix_suggestion(&mut self, suggestion: &FixSuggestion) {
        self.events
            .borrow_mut()
            .push(Event::Suggestion(suggestion.clone()));
    }

    fn stats(&mut self, stats: &ScanStats) {
        self.events.borrow_mut().push(Event::Stats(*stats));
    }
}

fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn files_scanned_counts_work_units_not_unique_files() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "src/a.html", "PROBE\n");
    write_file(tmp.path(), "src/b.html", "clean\n");
    write_file(tmp.path(), "notes.txt", "PROBE\n");
    write_file(tmp.path(), "style.css", "PROBE\n");

    // Two rules target html, one targets txt, none targets css.
    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe::html())
        .rule(Probe::html())
        .rule(Probe {
            ext: "txt",
            skip_commented: false,
            versions: &[],
        })
        .build()
        .unwrap();

    let result = scanner.scan().unwrap();
    assert_eq!(result.stats.files_scanned, 5);
    assert_eq!(result.total_issues(), 3);
    assert_eq!(result.stats.errors, 0);
}

#[test]
fn scan_is_idempotent_over_unchanged_tree() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "src/a.html", "PROBE\nclean\nPROBE\n");
    write_file(tmp.path(), "src/nested/b.html", "PROBE\n");

    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe::html())
        .build()
        .unwrap();

    let first = scanner.scan().unwrap();
    let second = scanner.scan().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.total_issues(), 3);
}

#[test]
fn excluded_directories_are_never_reported() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "node_modules/pkg/tpl.html", "PROBE\n");
    write_file(tmp.path(), "dist/out.html", "PROBE\n");
    write_file(tmp.path(), ".git/hook.html", "PROBE\n");

    for skip_commented in [false, true] {
        let mut scanner = Scanner::builder()
            .root(tmp.path())
            .rule(Probe {
                ext: "html",
                skip_commented,
                versions: &[],
            })
            .build()
            .unwrap();

        let result = scanner.scan().unwrap();
        assert_eq!(result.total_issues(), 0);
        assert_eq!(result.stats.files_scanned, 0);
    }
}

#[test]
fn version_gate_skips_rule_with_notice() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a.html", "PROBE\n");

    let recorder = Recorder::default();
    let events = Rc::clone(&recorder.events);

    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe {
            ext: "html",
            skip_commented: false,
            versions: &[">=4.0.0"],
        })
        .framework_version(Version::new(3, 9, 0))
        .observer(Box::new(recorder))
        .build()
        .unwrap();

    let result = scanner.scan().unwrap();
    assert_eq!(result.total_issues(), 0);
    // Skipped rules produce no report entry at all.
    assert!(result.reports.is_empty());
    assert!(events
        .borrow()
        .iter()
        .any(|e| matches!(e, Event::Skipped { version } if version == "3.9.0")));
}

#[test]
fn version_gate_admits_supported_version() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a.html", "PROBE\n");

    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe {
            ext: "html",
            skip_commented: false,
            versions: &[">=4.0.0"],
        })
        .framework_version(Version::new(5, 0, 0))
        .build()
        .unwrap();

    let result = scanner.scan().unwrap();
    assert_eq!(result.total_issues(), 1);
}

#[test]
fn undetected_version_proceeds() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a.html", "PROBE\n");

    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe {
            ext: "html",
            skip_commented: false,
            versions: &[">=4.0.0"],
        })
        .build()
        .unwrap();

    let result = scanner.scan().unwrap();
    assert_eq!(result.total_issues(), 1);
}

#[test]
fn observer_sequence_is_global_across_rules() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a.html", "PROBE\nPROBE\n");
    write_file(tmp.path(), "b.txt", "PROBE\n");

    let recorder = Recorder::default();
    let events = Rc::clone(&recorder.events);

    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe::html())
        .rule(Probe {
            ext: "txt",
            skip_commented: false,
            versions: &[],
        })
        .observer(Box::new(recorder))
        .build()
        .unwrap();

    scanner.scan().unwrap();

    let seqs: Vec<usize> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Issue { seq, .. } => Some(*seq),
            _ => None,
        })
        .collect();
    assert_eq!(seqs, vec![1, 2, 3]);

    // Final stats event carries the aggregate counters.
    assert!(events
        .borrow()
        .iter()
        .any(|e| matches!(e, Event::Stats(stats) if stats.files_scanned == 2)));
}

#[test]
fn fix_suggestions_attach_per_rule_and_respect_toggle() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a.html", "PROBE\n");
    write_file(tmp.path(), "b.txt", "clean\n");

    let recorder = Recorder::default();
    let events = Rc::clone(&recorder.events);

    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe::html())
        .rule(Probe {
            ext: "txt",
            skip_commented: false,
            versions: &[],
        })
        .observer(Box::new(recorder))
        .build()
        .unwrap();

    let result = scanner.scan().unwrap();
    assert!(result.reports[0].fix_suggestion.is_some());
    // The clean rule gets a clean notice and no suggestion.
    assert!(result.reports[1].fix_suggestion.is_none());
    assert!(events.borrow().iter().any(|e| matches!(e, Event::Clean)));

    let mut muted = Scanner::builder()
        .root(tmp.path())
        .rule(Probe::html())
        .show_fix_suggestions(false)
        .build()
        .unwrap();
    let result = muted.scan().unwrap();
    assert!(result.reports[0].fix_suggestion.is_none());
}

#[test]
fn unreadable_file_is_counted_and_skipped() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a.html", "PROBE\n");
    // Invalid UTF-8 makes read_to_string fail for this file only.
    fs::write(tmp.path().join("b.html"), [0xff, 0xfe, 0x50]).unwrap();

    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe::html())
        .build()
        .unwrap();

    let result = scanner.scan().unwrap();
    assert_eq!(result.stats.errors, 1);
    assert_eq!(result.stats.files_scanned, 1);
    assert_eq!(result.total_issues(), 1);
}

#[test]
fn reported_code_is_trimmed() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a.html", "    PROBE   \n");

    let mut scanner = Scanner::builder()
        .root(tmp.path())
        .rule(Probe::html())
        .build()
        .unwrap();

    let result = scanner.scan().unwrap();
    assert_eq!(result.reports[0].issues[0].code, "PROBE");
}
