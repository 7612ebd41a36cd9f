//! End-to-end pipeline runs over scripted in-memory hosts

use drift_core::{CheckConfig, CheckOptions, Checker, ChangeAction};
use drift_test_utils::MemoryHost;
use pretty_assertions::assert_eq;

fn checker(source: MemoryHost, target: MemoryHost, config_toml: &str) -> Checker {
    let rules = CheckConfig::from_toml_str(config_toml)
        .unwrap()
        .compile()
        .unwrap();
    Checker::new(Box::new(source), Box::new(target), rules)
}

#[tokio::test]
async fn identical_hosts_pass_with_zero_counts() {
    let listing = [
        "/root, dr-xr-x---, root, root, 4096",
        "/root/.bash_logout, -rw-r--r--, root, root, 18",
        "/root/.bashrc, -rw-r--r--, root, root, 176",
    ];
    let source = MemoryHost::new("web01").with_listing(&listing);
    let target = MemoryHost::new("web02").with_listing(&listing);

    let report = checker(source, target, r#"check_root_path = "/root""#)
        .check()
        .await
        .unwrap();

    assert!(report.passed);
    assert_eq!(report.counts.source_entries, 3);
    assert_eq!(report.counts.target_entries, 3);
    assert_eq!(report.counts.ignored_by_path, 0);
    assert_eq!(report.counts.pending_by_path, 0);
    assert_eq!(report.counts.ignored_by_content, 0);
    assert_eq!(report.counts.pending_by_content, 0);
    assert_eq!(report.counts.diff_files, 0);
    assert!(report.diff_text.is_empty());
}

#[tokio::test]
async fn changed_entry_surfaces_as_remove_add_pair() {
    let source = MemoryHost::new("web01")
        .with_listing(&[
            "/root, dr-xr-x---, root, root, 4096",
            "/root/.bash_history, -rw-------, root, root, 4847",
            "/root/.bash_logout, -rw-r--r--, root, root, 18",
            "/root/.bash_profile, -rw-r--r--, root, root, 176",
            "/root/.bashrc, -rw-r--r--, root, root, 176",
            "/root/.cshrc, -rw-r--r--, root, root, 100",
        ])
        .with_file("/root/.bash_history", "history\n");
    let target = MemoryHost::new("web02").with_listing(&[
        "/root, dr-xr-x---, root, root, 4096",
        "/root/.bash_logout, -rw-r--r--, root, root, 18",
        "/root/.bash_profile, -rw-r--r--, root, root, 176",
        "/root/.bashrc, -rw-r--r--, root, root, 176",
        "/root/.cshrc, -rw-r--r--, root, root, 100",
        "/root/.ssh, drwx------, root, root, 4096",
    ]);

    let report = checker(source, target, r#"check_root_path = "/root""#)
        .check()
        .await
        .unwrap();

    assert!(!report.passed);
    // Positions index each side's own listing: the removed history file
    // sits at source index 1, the added .ssh dir at target index 5.
    let first = report.diff.groups.first().unwrap().changes.first().unwrap();
    let last = report.diff.groups.last().unwrap().changes.last().unwrap();
    assert_eq!(first.action, ChangeAction::Remove);
    assert_eq!(first.position, 1);
    assert_eq!(first.element.path, "/root/.bash_history");
    assert_eq!(last.action, ChangeAction::Add);
    assert_eq!(last.position, 5);
    assert_eq!(last.element.path, "/root/.ssh");
    assert_eq!(report.counts.diff_files, 2);
}

#[tokio::test]
async fn ignored_path_makes_check_pass() {
    // Source [A, B, C], target [A, B', C], ignore_paths = ["B"].
    let source = MemoryHost::new("src").with_listing(&[
        "/a, -rw-r--r--, root, root, 1",
        "/b, -rw-r--r--, root, root, 2",
        "/c, -rw-r--r--, root, root, 3",
    ]);
    let target = MemoryHost::new("dst").with_listing(&[
        "/a, -rw-r--r--, root, root, 1",
        "/b, -rw-r--r--, root, root, 20",
        "/c, -rw-r--r--, root, root, 3",
    ]);

    let report = checker(
        source,
        target,
        r#"
check_root_path = "/"
ignore_paths = ["/b"]
"#,
    )
    .check()
    .await
    .unwrap();

    assert!(report.passed);
    assert_eq!(report.counts.ignored_by_path, 1);
    assert_eq!(report.counts.diff_files, 0);
    assert_eq!(report.ignored_paths, vec!["/b".to_string()]);
}

#[tokio::test]
async fn pending_only_sees_ignore_residue() {
    let source = MemoryHost::new("src").with_listing(&[
        "/var/log/app.log, -rw-r--r--, root, root, 100",
        "/var/run/app.pid, -rw-r--r--, root, root, 5",
    ]);
    let target = MemoryHost::new("dst").with_listing(&[
        "/var/log/app.log, -rw-r--r--, root, root, 200",
        "/var/run/app.pid, -rw-r--r--, root, root, 6",
    ]);

    // The log file matches both lists; ignore wins and pending only
    // picks up the pid file.
    let report = checker(
        source,
        target,
        r#"
check_root_path = "/var"
ignore_paths = [{ regex = '\.log$' }]
pending_paths = [{ regex = "^/var/" }]
"#,
    )
    .check()
    .await
    .unwrap();

    assert!(report.passed);
    assert_eq!(report.ignored_paths, vec!["/var/log/app.log".to_string()]);
    assert_eq!(report.pending_paths, vec!["/var/run/app.pid".to_string()]);
    assert_eq!(report.counts.ignored_by_path, 1);
    assert_eq!(report.counts.pending_by_path, 1);
}

#[tokio::test]
async fn content_fully_covered_by_ignore_pattern_is_classified_out() {
    // Path-level diff is a Remove+Add pair for /f, but every differing
    // line matches the ignore-content regex.
    let source = MemoryHost::new("src")
        .with_listing(&["/f, -rw-r--r--, root, root, 4"])
        .with_file("/f", "x\ny\n");
    let target = MemoryHost::new("dst")
        .with_listing(&["/f, -rw-r--r--, root, root, 5"])
        .with_file("/f", "x\nz\n");

    let report = checker(
        source,
        target,
        r#"
check_root_path = "/"

[ignore_contents]
"/f" = "y|z"
"#,
    )
    .check()
    .await
    .unwrap();

    assert!(report.passed);
    assert_eq!(report.counts.ignored_by_content, 1);
    assert_eq!(report.counts.diff_files, 0);
    assert_eq!(report.ignored_content_paths, vec!["/f".to_string()]);
    assert!(report.diff_text.is_empty());
}

#[tokio::test]
async fn metadata_only_drift_fails_the_check() {
    // Owner changed on /f but the content is byte-identical and no
    // content pattern is configured: the entry difference must survive
    // every stage and fail the check, with nothing counted as ignored.
    let source = MemoryHost::new("src")
        .with_listing(&["/f, -rw-r--r--, root, root, 4"])
        .with_file("/f", "same\n");
    let target = MemoryHost::new("dst")
        .with_listing(&["/f, -rw-r--r--, admin, root, 4"])
        .with_file("/f", "same\n");

    let report = checker(source, target, r#"check_root_path = "/""#)
        .check()
        .await
        .unwrap();

    assert!(!report.passed);
    assert_eq!(report.counts.ignored_by_content, 0);
    assert_eq!(report.counts.pending_by_content, 0);
    assert_eq!(report.counts.diff_files, 1);
    assert!(report.diff_text.is_empty());
}

#[tokio::test]
async fn pending_content_applies_after_ignore_content() {
    let source = MemoryHost::new("src")
        .with_listing(&["/etc/motd, -rw-r--r--, root, root, 10"])
        .with_file("/etc/motd", "welcome\ngenerated 2026-01-01\n");
    let target = MemoryHost::new("dst")
        .with_listing(&["/etc/motd, -rw-r--r--, root, root, 12"])
        .with_file("/etc/motd", "welcome\ngenerated 2026-02-02\nmaintenance window\n");

    let report = checker(
        source,
        target,
        r#"
check_root_path = "/etc"

[ignore_contents]
"/etc/motd" = "^generated "

[pending_contents]
"/etc/motd" = "maintenance"
"#,
    )
    .check()
    .await
    .unwrap();

    assert!(report.passed);
    assert_eq!(report.counts.ignored_by_content, 0);
    assert_eq!(report.counts.pending_by_content, 1);
    assert_eq!(report.pending_content_paths, vec!["/etc/motd".to_string()]);
    assert!(report.diff_text.is_empty());
}

#[tokio::test]
async fn genuine_content_differences_render_sorted_records() {
    let source = MemoryHost::new("alpha")
        .with_listing(&[
            "/b, -rw-r--r--, root, root, 2",
            "/a, -rw-r--r--, root, root, 2",
        ])
        .with_file("/a", "one\n")
        .with_file("/b", "uno\n");
    let target = MemoryHost::new("beta")
        .with_listing(&[
            "/b, -rw-r--r--, root, root, 3",
            "/a, -rw-r--r--, root, root, 3",
        ])
        .with_file("/a", "two\n")
        .with_file("/b", "dos\n");

    let report = checker(source, target, r#"check_root_path = "/""#)
        .check()
        .await
        .unwrap();

    assert!(!report.passed);
    assert_eq!(report.counts.diff_files, 2);
    // Records are path-sorted even though the listings put /b first.
    assert_eq!(
        report.diff_text,
        "--- alpha: /a\n+++ beta: /a\n\n- 0 one\n+ 0 two\n\
         --- alpha: /b\n+++ beta: /b\n\n- 0 uno\n+ 0 dos\n"
    );
}

#[tokio::test]
async fn output_is_stable_across_fetch_concurrency() {
    let listing_src: Vec<String> = (0..8)
        .map(|i| format!("/f{i}, -rw-r--r--, root, root, 1"))
        .collect();
    let listing_dst: Vec<String> = (0..8)
        .map(|i| format!("/f{i}, -rw-r--r--, root, root, 2"))
        .collect();

    let build = |label: &str, listing: &[String], body: &str| {
        let refs: Vec<&str> = listing.iter().map(String::as_str).collect();
        let mut host = MemoryHost::new(label).with_listing(&refs);
        for i in 0..8 {
            host = host.with_file(&format!("/f{i}"), body);
        }
        host
    };

    let mut reports = Vec::new();
    for concurrency in [1, 2, 8] {
        let source = build("src", &listing_src, "old\n");
        let target = build("dst", &listing_dst, "new\n");
        let rules = CheckConfig::from_toml_str(r#"check_root_path = "/""#)
            .unwrap()
            .compile()
            .unwrap();
        let report = Checker::new(Box::new(source), Box::new(target), rules)
            .with_options(CheckOptions {
                fetch_concurrency: concurrency,
                timeout: None,
            })
            .check()
            .await
            .unwrap();
        reports.push(report);
    }

    for report in &reports[1..] {
        assert_eq!(report.passed, reports[0].passed);
        assert_eq!(report.counts, reports[0].counts);
        assert_eq!(report.diff_text, reports[0].diff_text);
    }
}
