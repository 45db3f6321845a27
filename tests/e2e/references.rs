//! Resolution-policy scenarios: entry points, workflow delegation,
//! rule refs, and namespace handling.

use packcheck::checker::{Checker, DEFAULT_NAMESPACE};
use packcheck::diagnostics::{MemorySink, Severity};

use crate::helpers::PackFixture;

#[test]
fn test_entry_point_resolves_to_existing_file() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_action("foo", "name: foo\nentry_point: foo.py\n")
        .unwrap();
    fixture.write_action_file("foo.py", "print('foo')\n").unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    assert!(summary.is_clean());
    assert!(sink
        .messages_at(Severity::Debug)
        .iter()
        .any(|m| m.contains("foo.py exists")));
}

#[test]
fn test_entry_point_missing_file_is_one_error() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_action("bar", "name: bar\nentry_point: bar.py\n")
        .unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    assert_eq!(summary.errors, 1);
    let errors = sink.messages_at(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("bar.yaml"));
    assert!(errors[0].contains("bar.py"));
}

#[test]
fn test_empty_entry_point_performs_no_check() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_action("local", "name: local\nentry_point: ''\n")
        .unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.references, 0);
}

#[test]
fn test_rule_ref_local_namespace_resolves() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_rule("r1", "action:\n  ref: snpseq_packs.run_demux\n")
        .unwrap();
    fixture
        .write_action("run_demux", "name: run_demux\n")
        .unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.references, 1);
}

#[test]
fn test_rule_ref_local_namespace_missing_is_error() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_rule("r1", "action:\n  ref: snpseq_packs.run_demux\n")
        .unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    assert_eq!(summary.errors, 1);
    assert!(sink.messages_at(Severity::Error)[0].contains("run_demux"));
}

#[test]
fn test_foreign_namespace_is_silent() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_rule("r2", "action:\n  ref: other_pack.some_action\n")
        .unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    // Skipped entirely: no error, no debug confirmation, no check.
    assert!(summary.is_clean());
    assert_eq!(summary.references, 0);
    assert!(sink
        .entries()
        .iter()
        .all(|(_, m)| !m.contains("some_action")));
}

#[test]
fn test_workflow_task_action_missing_is_error() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_workflow(
            "wf1",
            "tasks:\n  step_one:\n    action: snpseq_packs.step_one\n",
        )
        .unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    assert_eq!(summary.errors, 1);
    let errors = sink.messages_at(Severity::Error);
    assert!(errors[0].contains("wf1.yaml"));
    assert!(errors[0].contains("step_one"));
}

#[test]
fn test_workflow_task_bare_action_resolves() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_workflow("wf1", "tasks:\n  step_one:\n    action: step_one\n")
        .unwrap();
    fixture.write_action("step_one", "name: step_one\n").unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.references, 1);
}

#[test]
fn test_action_workflow_block_delegates_to_local_action() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_action(
            "delegator",
            "name: delegator\nparameters:\n  workflow:\n    default: snpseq_packs.ngi_uu_workflow\n",
        )
        .unwrap();
    fixture
        .write_action("ngi_uu_workflow", "name: ngi_uu_workflow\n")
        .unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), DEFAULT_NAMESPACE, &sink);
    let summary = checker.check_pack().unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.references, 1);
}

#[test]
fn test_custom_namespace_is_honored() {
    let fixture = PackFixture::new().unwrap();
    fixture
        .write_rule("r1", "action:\n  ref: my_pack.present\n")
        .unwrap();
    fixture.write_action("present", "name: present\n").unwrap();

    let sink = MemorySink::new();
    let checker = Checker::new(fixture.pack(), "my_pack", &sink);
    let summary = checker.check_pack().unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.references, 1);
}
