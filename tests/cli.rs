use std::process::Command;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("hn-top-stories-cli-{}-{name}", std::process::id()))
}

fn log_dir(test_name: &str) -> std::path::PathBuf {
    temp_path(&format!("{test_name}-log"))
}

fn command(server: &mockito::Server, test_name: &str) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hn-top-stories"));
    command
        .env("HN_API_BASE_URL", server.url())
        .env("HN_DELAY_SECS", "0")
        .env("HN_LOG_DIR", log_dir(test_name))
        .env_remove("LOG_TO_CONSOLE");
    command
}

fn mock_scenario(server: &mut mockito::Server) -> Vec<mockito::Mock> {
    vec![
        server
            .mock("GET", "/topstories.json")
            .with_header("content-type", "application/json")
            .with_body("[1, 2, 3]")
            .create(),
        server
            .mock("GET", "/item/1.json")
            .with_body(r#"{"id":1,"title":"A","url":"http://a","type":"story"}"#)
            .create(),
        server
            .mock("GET", "/item/2.json")
            .with_body(r#"{}"#)
            .create(),
        server
            .mock("GET", "/item/3.json")
            .with_body(r#"{"id":3,"title":"C","type":"story"}"#)
            .create(),
    ]
}

#[test]
fn cli_save_writes_titled_stories() {
    let mut server = mockito::Server::new();
    let mocks = mock_scenario(&mut server);
    let output_path = temp_path("save.json");

    let output = command(&server, "save")
        .args(["save", "-n", "3", "-o"])
        .arg(&output_path)
        .output()
        .expect("run CLI");

    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let written = std::fs::read_to_string(&output_path).expect("read output file");
    std::fs::remove_file(&output_path).ok();

    let records: serde_json::Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(
        records,
        serde_json::json!([
            {"title": "A", "link": "http://a"},
            {"title": "C", "link": null},
        ])
    );
    for mock in mocks {
        mock.assert();
    }
    std::fs::remove_dir_all(log_dir("save")).ok();
}

#[test]
fn cli_print_writes_one_line_per_story() {
    let mut server = mockito::Server::new();
    let _mocks = mock_scenario(&mut server);

    let output = command(&server, "print")
        .args(["print", "--num", "500"])
        .output()
        .expect("run CLI");

    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "A\thttp://a\nC\t-\n");
    std::fs::remove_dir_all(log_dir("print")).ok();
}

#[test]
fn cli_clamps_zero_to_one_story() {
    let mut server = mockito::Server::new();
    let mocks = mock_scenario(&mut server);

    let output = command(&server, "clamp")
        .args(["print", "-n", "0"])
        .output()
        .expect("run CLI");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "A\thttp://a\n");
    // Only the top ids and the first item are requested.
    mocks[0].assert();
    mocks[1].assert();
    assert!(!mocks[2].matched());
    assert!(!mocks[3].matched());
    std::fs::remove_dir_all(log_dir("clamp")).ok();
}

#[test]
fn cli_aborts_when_top_stories_fail() {
    let mut server = mockito::Server::new();
    let _top = server
        .mock("GET", "/topstories.json")
        .with_status(500)
        .create();
    let items = server
        .mock("GET", mockito::Matcher::Regex(r"^/item/".to_string()))
        .expect(0)
        .create();
    let output_path = temp_path("aborted.json");

    let output = command(&server, "abort")
        .args(["save", "-o"])
        .arg(&output_path)
        .output()
        .expect("run CLI");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("500"));
    assert!(!output_path.exists());
    items.assert();
    std::fs::remove_dir_all(log_dir("abort")).ok();
}
