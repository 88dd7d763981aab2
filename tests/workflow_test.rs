use affirm::actions::MemoryOutputs;
use affirm::boundary::BoundaryWarning;
use affirm::cli::orchestration::{run_workflow, RunContext, WorkflowArgs, WorkflowResult};
use affirm::collector::collect_version_tags;
use affirm::config::Config;
use affirm::domain::{TagScheme, VersionBump};
use affirm::git::MockTagRepository;
use affirm::publish::mock::PublishedRef;
use affirm::publish::RecordingPublisher;
use affirm::resolver::resolve_current_version;

fn context(dry_run: bool) -> RunContext {
    context_for("svc", dry_run)
}

fn context_for(target: &str, dry_run: bool) -> RunContext {
    WorkflowArgs {
        deployable_target: Some(target.to_string()),
        dry_run,
        github_token: Some("token".to_string()),
        sha: Some("0123abcd".to_string()),
        repository: Some("acme/mono".to_string()),
    }
    .into_context()
    .unwrap()
}

fn run(tags: &[&str], dry_run: bool) -> (WorkflowResult, MemoryOutputs, RecordingPublisher) {
    let repo = MockTagRepository::with_tags(tags.iter().copied());
    let publisher = RecordingPublisher::new();
    let mut outputs = MemoryOutputs::new();

    let result = run_workflow(
        &context(dry_run),
        &Config::default(),
        &repo,
        Some(&publisher),
        &mut outputs,
    )
    .unwrap();

    (result, outputs, publisher)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_a_no_tags() {
    let (result, outputs, _) = run(&[], true);

    assert_eq!(result.previous.tag, "svc-v0.0.0");
    assert_eq!(result.next.bump, VersionBump::Patch);
    assert_eq!(outputs.get("new_version"), Some("0.0.1"));
    assert_eq!(outputs.get("new_tag"), Some("svc-v0.0.1"));
    assert_eq!(
        outputs.get("previous_version"),
        Some(r#"{"tag":"svc-v0.0.0","version":"0.0.0"}"#)
    );
    assert!(result
        .warnings
        .contains(&BoundaryWarning::NoVersionTags {
            target: "svc".to_string(),
            default_tag: "svc-v0.0.0".to_string(),
        }));
}

#[test]
fn test_scenario_b_highest_patch_bump() {
    let (result, outputs, _) = run(&["svc-v1.2.3", "svc-v1.3.0"], true);

    assert_eq!(result.previous.tag, "svc-v1.3.0");
    assert_eq!(result.next.bump, VersionBump::Patch);
    assert_eq!(outputs.get("new_version"), Some("1.3.1"));
    assert_eq!(outputs.get("new_tag"), Some("svc-v1.3.1"));
}

#[test]
fn test_scenario_c_major_bump_and_trim() {
    let (result, outputs, _) = run(&["svc-v2"], true);

    assert_eq!(result.previous.version.to_string(), "2.0.0");
    assert_eq!(result.next.bump, VersionBump::Major);
    assert_eq!(result.next.version.to_string(), "3.0.0");
    assert_eq!(outputs.get("new_version"), Some("3"));
    assert_eq!(outputs.get("new_tag"), Some("svc-v3"));
}

#[test]
fn test_scenario_d_malformed_tag_never_reaches_resolver() {
    let repo = MockTagRepository::with_tags(["svc-v1.x.3"]);
    let collected = collect_version_tags(&repo, "origin", "svc", &TagScheme::default());
    assert!(collected.tags.is_empty());

    let (result, outputs, _) = run(&["svc-v1.x.3"], true);
    assert!(result.previous.is_default);
    assert_eq!(outputs.get("new_tag"), Some("svc-v0.0.1"));
    assert!(!result
        .warnings
        .iter()
        .any(|w| matches!(w, BoundaryWarning::UnparsableTag { .. })));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_resolved_version_is_maximum() {
    let tags: Vec<String> = ["svc-v0.1", "svc-v3.2.1", "svc-v3.10", "svc-v3.2.10", "svc-v1"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let scheme = TagScheme::default();
    let resolved = resolve_current_version("svc", &tags, &scheme).unwrap();

    for tag in &tags {
        let other = resolve_current_version("svc", std::slice::from_ref(tag), &scheme).unwrap();
        assert!(resolved.version.version >= other.version.version);
    }
    assert_eq!(resolved.tag, "svc-v3.10");
}

#[test]
fn test_round_trip_through_collector_and_resolver() {
    let (first, outputs, _) = run(&["svc-v1.2"], true);
    let new_tag = outputs.get("new_tag").unwrap().to_string();
    assert_eq!(new_tag, "svc-v1.3");

    let repo = MockTagRepository::with_tags([new_tag.as_str()]);
    let scheme = TagScheme::default();
    let collected = collect_version_tags(&repo, "origin", "svc", &scheme);
    let resolved = resolve_current_version("svc", &collected.tags, &scheme).unwrap();

    assert_eq!(resolved.tag, new_tag);
    assert_eq!(resolved.version.version, first.next.version);
}

#[test]
fn test_dotted_target_uses_version_shape() {
    let repo = MockTagRepository::with_tags(["my.app-v1.2", "my.app-v1.2.3", "my-v9"]);
    let publisher = RecordingPublisher::new();
    let mut outputs = MemoryOutputs::new();

    let result = run_workflow(
        &context_for("my.app", true),
        &Config::default(),
        &repo,
        Some(&publisher),
        &mut outputs,
    )
    .unwrap();

    assert_eq!(result.previous.tag, "my.app-v1.2.3");
    assert_eq!(result.next.bump, VersionBump::Patch);
    assert_eq!(outputs.get("new_tag"), Some("my.app-v1.2.4"));
}

#[test]
fn test_stray_periods_follow_period_count() {
    for (tag, bump, new_tag) in [
        ("svc-v1.2.", VersionBump::Patch, "svc-v1.2.1"),
        ("svc-v1..2", VersionBump::Patch, "svc-v1.0.1"),
        ("svc-v.5", VersionBump::Minor, "svc-v5.1"),
    ] {
        let (result, outputs, _) = run(&[tag], true);
        assert_eq!(result.previous.tag, tag);
        assert_eq!(result.next.bump, bump, "bump for {}", tag);
        assert_eq!(outputs.get("new_tag"), Some(new_tag), "new tag for {}", tag);
    }
}

#[test]
fn test_other_targets_are_ignored() {
    let (result, _, _) = run(&["web-v9.9.9", "svc-v0.4.2", "svc-web-v5"], true);
    assert_eq!(result.previous.tag, "svc-v0.4.2");
}

// ============================================================================
// Publishing
// ============================================================================

#[test]
fn test_dry_run_never_publishes() {
    let (result, _, publisher) = run(&["svc-v1.2.3"], true);
    assert!(!result.published);
    assert!(publisher.published().is_empty());
}

#[test]
fn test_publish_creates_ref_once() {
    let (result, _, publisher) = run(&["svc-v1.2.3"], false);
    assert!(result.published);
    assert_eq!(
        publisher.published(),
        vec![PublishedRef {
            tag: "svc-v1.2.4".to_string(),
            sha: "0123abcd".to_string(),
        }]
    );
}

#[test]
fn test_publish_failure_is_fatal_after_outputs() {
    let repo = MockTagRepository::with_tags(["svc-v1.2.3"]);
    let publisher = RecordingPublisher::failing("Reference already exists");
    let mut outputs = MemoryOutputs::new();

    let err = run_workflow(
        &context(false),
        &Config::default(),
        &repo,
        Some(&publisher),
        &mut outputs,
    )
    .unwrap_err();

    assert!(err.to_string().contains("Reference already exists"));
    assert_eq!(outputs.get("new_tag"), Some("svc-v1.2.4"));
}

#[test]
fn test_missing_publisher_is_fatal() {
    let repo = MockTagRepository::with_tags(["svc-v1"]);
    let mut outputs = MemoryOutputs::new();

    let result = run_workflow::<_, RecordingPublisher, _>(
        &context(false),
        &Config::default(),
        &repo,
        None,
        &mut outputs,
    );
    assert!(result.is_err());
}

#[test]
fn test_missing_sha_fails_before_any_stage() {
    let args = WorkflowArgs {
        deployable_target: Some("svc".to_string()),
        dry_run: true,
        ..WorkflowArgs::default()
    };

    let err = args.into_context().unwrap_err();
    assert_eq!(err.to_string(), "Missing required context: GITHUB_SHA");
}

#[test]
fn test_collector_failures_fall_back_to_default() {
    let repo = MockTagRepository::with_tags(["svc-v4.1.0"])
        .failing_fetch()
        .failing_list();
    let publisher = RecordingPublisher::new();
    let mut outputs = MemoryOutputs::new();

    let result = run_workflow(
        &context(true),
        &Config::default(),
        &repo,
        Some(&publisher),
        &mut outputs,
    )
    .unwrap();

    assert!(result.previous.is_default);
    assert_eq!(outputs.get("new_tag"), Some("svc-v0.0.1"));
    assert!(matches!(
        result.warnings.first(),
        Some(BoundaryWarning::FetchFailed { .. })
    ));
}

#[test]
fn test_configured_scheme_flows_through() {
    let config = affirm::config::parse_config(
        "[versioning]\nversion_prefix = \"@\"\ndefault_version = \"1\"\n",
    )
    .unwrap();
    let repo = MockTagRepository::new();
    let publisher = RecordingPublisher::new();
    let mut outputs = MemoryOutputs::new();

    let result = run_workflow(&context(true), &config, &repo, Some(&publisher), &mut outputs).unwrap();

    assert_eq!(result.previous.tag, "svc@1");
    assert_eq!(result.next.bump, VersionBump::Major);
    assert_eq!(outputs.get("new_tag"), Some("svc@2"));
}
