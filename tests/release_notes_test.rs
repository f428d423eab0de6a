use std::fs;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::Parser;
use serde_json::{json, Value};
use submodule_release_notes::github::{GitHubClient, RepoId};
use submodule_release_notes::notes::{NotesError, ReleaseNotesWriter, ReleaseRequest, Stage};
use submodule_release_notes::Cli;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOST_V1_0: &str = "1111111111111111111111111111111111111111";
const HOST_V1_1: &str = "2222222222222222222222222222222222222222";
const SUB_OLD: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const SUB_NEW: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// GitHub API for `grafana/beyla` releasing `v1.1.0` after `v1.0.0`, with
/// the `ebpf` submodule moving forward by one commit.
async fn release_server() -> MockServer {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/repos/grafana/beyla/releases",
        json!([
            {"tag_name": "v1.1.0"},
            {"tag_name": "v1.1.0-rc1"},
            {"tag_name": "v1.0.0"}
        ]),
    )
    .await;
    mount_json(
        &server,
        "/repos/grafana/beyla/git/ref/tags/v1.0.0",
        json!({"ref": "refs/tags/v1.0.0", "object": {"sha": HOST_V1_0, "type": "commit"}}),
    )
    .await;
    // v1.1.0 is an annotated tag.
    mount_json(
        &server,
        "/repos/grafana/beyla/git/ref/tags/v1.1.0",
        json!({"ref": "refs/tags/v1.1.0", "object": {"sha": "7a97a97a", "type": "tag"}}),
    )
    .await;
    mount_json(
        &server,
        "/repos/grafana/beyla/git/tags/7a97a97a",
        json!({"sha": "7a97a97a", "object": {"sha": HOST_V1_1, "type": "commit"}}),
    )
    .await;
    mount_json(
        &server,
        &format!("/repos/grafana/beyla/compare/{HOST_V1_0}...{HOST_V1_1}"),
        json!({"commits": [
            {"sha": "c1", "commit": {"message": "Add feature"}},
            {"sha": "c2", "commit": {"message": "Fix bug\n\nLong description."}}
        ]}),
    )
    .await;
    mount_json(
        &server,
        "/repos/grafana/beyla/contents/.gitmodules",
        json!({
            "type": "file",
            "encoding": "base64",
            "content": STANDARD.encode(
                "[submodule \"ebpf\"]\n\tpath = ebpf\n\turl = https://github.com/org/ebpf.git\n"
            )
        }),
    )
    .await;
    mount_json(
        &server,
        &format!("/repos/grafana/beyla/git/trees/{HOST_V1_0}"),
        json!({"sha": "t1", "truncated": false, "tree": [
            {"path": "ebpf", "mode": "160000", "type": "commit", "sha": SUB_OLD},
            {"path": "go.mod", "mode": "100644", "type": "blob", "sha": "m1"}
        ]}),
    )
    .await;
    mount_json(
        &server,
        &format!("/repos/grafana/beyla/git/trees/{HOST_V1_1}"),
        json!({"sha": "t2", "truncated": false, "tree": [
            {"path": "ebpf", "mode": "160000", "type": "commit", "sha": SUB_NEW},
            {"path": "go.mod", "mode": "100644", "type": "blob", "sha": "m2"}
        ]}),
    )
    .await;
    mount_json(
        &server,
        &format!("/repos/org/ebpf/compare/{SUB_OLD}...{SUB_NEW}"),
        json!({"commits": [
            {"sha": "e1", "commit": {"message": "Fix map leak (#5)"}}
        ]}),
    )
    .await;

    server
}

fn request(tag: &str) -> ReleaseRequest {
    ReleaseRequest {
        repository: RepoId::new("grafana", "beyla"),
        tag: tag.to_string(),
        previous_tag: String::new(),
        submodule_link: String::new(),
    }
}

#[tokio::test]
async fn release_notes_include_submodule_changes() -> Result<()> {
    let server = release_server().await;
    let client = GitHubClient::new(&server.uri(), Some("token".to_string()))?;

    let report = ReleaseNotesWriter::new(&client, request("v1.1.0"))
        .write()
        .await?;

    assert_eq!(report.previous_tag, "v1.0.0");
    insta::assert_snapshot!(report.render(), @r"
## Changes from grafana/beyla:
* Add feature
* Fix bug

## Changes from org/ebpf:
* Fix map leak (org/ebpf#5)
");
    Ok(())
}

#[tokio::test]
async fn unknown_tag_fails_at_tag_resolution() -> Result<()> {
    let server = release_server().await;
    let client = GitHubClient::new(&server.uri(), None)?;

    let err = ReleaseNotesWriter::new(&client, request("v3.0.0"))
        .write()
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::TagCommit);
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn cli_writes_step_output() -> Result<()> {
    let server = release_server().await;
    let temp_dir = tempfile::tempdir()?;
    let output_path = temp_dir.path().join("github_output");
    let uri = server.uri();

    let cli = Cli::try_parse_from([
        "submodule-release-notes",
        "--github-token",
        "token",
        "--repository",
        "grafana/beyla",
        "--tag",
        "v1.1.0",
        "--generated-submodule-link",
        "grafana/ebpf",
        "--api-url",
        uri.as_str(),
        "--output-file",
        output_path.to_str().unwrap(),
    ])?;
    cli.execute().await?;

    let output = fs::read_to_string(&output_path)?;
    assert!(output.starts_with("release_notes<<EOF\n## Changes from grafana/beyla:\n"));
    assert!(output.contains("* Fix map leak (grafana/ebpf#5)\n"));
    assert!(output.ends_with("\nEOF\n"));
    Ok(())
}

#[tokio::test]
async fn cli_failure_writes_no_output() -> Result<()> {
    let server = release_server().await;
    let temp_dir = tempfile::tempdir()?;
    let output_path = temp_dir.path().join("github_output");
    let uri = server.uri();

    let cli = Cli::try_parse_from([
        "submodule-release-notes",
        "--github-token",
        "token",
        "--repository",
        "grafana/beyla",
        "--tag",
        "v1.1.0",
        "--previous-tag",
        "v0.1.0",
        "--api-url",
        uri.as_str(),
        "--output-file",
        output_path.to_str().unwrap(),
    ])?;
    let err = cli.execute().await.unwrap_err();

    let notes_error = err.downcast_ref::<NotesError>().unwrap();
    assert_eq!(notes_error.stage(), Stage::PreviousTagCommit);
    assert!(!output_path.exists());
    Ok(())
}
