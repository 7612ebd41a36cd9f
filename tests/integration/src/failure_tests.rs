//! Fail-fast behavior: bad listings, bad patterns, transport failures,
//! and timeouts all abort the run with no partial report

use std::time::Duration;

use drift_core::{CheckConfig, CheckOptions, Checker, Error};
use drift_test_utils::MemoryHost;

fn compile(config_toml: &str) -> drift_core::CheckRules {
    CheckConfig::from_toml_str(config_toml)
        .unwrap()
        .compile()
        .unwrap()
}

#[tokio::test]
async fn malformed_listing_record_aborts_the_run() {
    let source = MemoryHost::new("src").with_listing(&["/etc/hosts -rw-r--r-- root"]);
    let target = MemoryHost::new("dst");

    let result = Checker::new(
        Box::new(source),
        Box::new(target),
        compile(r#"check_root_path = "/etc""#),
    )
    .check()
    .await;

    assert!(matches!(result, Err(Error::Parse(_))));
}

#[tokio::test]
async fn unreadable_candidate_content_propagates_host_error() {
    let source = MemoryHost::new("src").with_listing(&["/secret, -rw-------, root, root, 1"]);
    let target = MemoryHost::new("dst")
        .with_listing(&["/secret, -rw-------, root, root, 2"])
        .with_file("/secret", "x\n");

    let result = Checker::new(
        Box::new(source),
        Box::new(target),
        compile(r#"check_root_path = "/""#),
    )
    .check()
    .await;

    match result {
        Err(Error::Host { host, message }) => {
            assert_eq!(host, "src");
            assert!(message.contains("/secret"));
        }
        other => panic!("expected host error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_host_trips_the_run_timeout() {
    let listing = ["/f, -rw-r--r--, root, root, 1"];
    let source = MemoryHost::new("src")
        .with_listing(&listing)
        .with_latency(Duration::from_millis(200));
    let target = MemoryHost::new("dst").with_listing(&listing);

    let result = Checker::new(
        Box::new(source),
        Box::new(target),
        compile(r#"check_root_path = "/""#),
    )
    .with_options(CheckOptions {
        fetch_concurrency: 4,
        timeout: Some(Duration::from_millis(20)),
    })
    .check()
    .await;

    assert!(matches!(result, Err(Error::Cancelled { .. })));
}

#[test]
fn invalid_path_regex_is_a_configuration_error() {
    let config = CheckConfig::from_toml_str(
        r#"
check_root_path = "/"
ignore_paths = [{ regex = "([" }]
"#,
    )
    .unwrap();

    assert!(matches!(
        config.compile(),
        Err(Error::UnsupportedPattern { .. })
    ));
}

#[test]
fn invalid_content_regex_is_a_configuration_error() {
    let config = CheckConfig::from_toml_str(
        r#"
check_root_path = "/"

[pending_contents]
"/f" = "(["
"#,
    )
    .unwrap();

    assert!(matches!(
        config.compile(),
        Err(Error::InvalidContentPattern { .. })
    ));
}
