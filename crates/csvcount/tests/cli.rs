//! End-to-end tests that drive the `csvcount` binary in a scratch directory.
//!
//! Every test points `CSVCOUNT_CONFIG` at a file inside its own sandbox, so
//! the user's configuration is never read and defaults apply.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create sandbox"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).unwrap()
    }

    /// Writes two numbered input files in the default input directory.
    fn with_inputs(self) -> Self {
        self.write(
            "unfiltered_CLC_data/run_001_g1_a.csv",
            "Count,Type\n12,Deletion\n5,Insertion\n",
        );
        self.write("unfiltered_CLC_data/run_002_g1_b.csv", "Count,Type\n20,MNV\n");
        self
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_csvcount"))
            .args(args)
            .current_dir(self.path())
            .env("CSVCOUNT_CONFIG", self.path().join("config.toml"))
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()
            .expect("failed to run csvcount")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn json_error(output: &Output) -> Value {
    serde_json::from_str(&stderr(output)).expect("stderr is not a JSON error")
}

#[test]
fn test_analyse_writes_results_and_empty_error_file() {
    let sandbox = Sandbox::new().with_inputs();
    sandbox.write("filters.csv", "Count,>=10\nType,\"Deletion,Insertion\"\n");

    let output = sandbox.run(&["--no-color", "analyse"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Analysis complete with 0 errors"));
    assert_eq!(
        sandbox.read("results.csv"),
        "Num,File,Filter 1\r\n001,run_001_g1_a.csv,1\r\n002,run_002_g1_b.csv,0\r\n"
    );
    assert_eq!(sandbox.read("errors.csv"), "");
}

#[test]
fn test_analyse_logs_row_errors() {
    let sandbox = Sandbox::new();
    sandbox.write(
        "unfiltered_CLC_data/run_007_g1_a.csv",
        "Type,Count\nDeletion,3\nDeletion,N/A\n",
    );
    sandbox.write("filters.csv", "Count,<10\n");

    let output = sandbox.run(&["--json", "run"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["error_count"], 1);
    assert_eq!(report["results"][0]["counts"][0], 1);
    assert_eq!(
        sandbox.read("errors.csv"),
        "run_007_g1_a.csv,B3,Invalid data - greater/less than queries can only be \
         performed on numeric data (N/A < 10)\r\n"
    );
}

#[test]
fn test_analyse_refuses_to_overwrite_without_confirmation() {
    let sandbox = Sandbox::new().with_inputs();
    sandbox.write("filters.csv", "Count,>=10\n");
    sandbox.write("results.csv", "previous\r\n");

    let output = sandbox.run(&["analyse"]);

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("--yes"));
    assert_eq!(sandbox.read("results.csv"), "previous\r\n");

    let output = sandbox.run(&["analyse", "--yes"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(sandbox.read("results.csv").starts_with("Num,File,Filter 1"));
}

#[test]
fn test_analyse_without_filter_file() {
    let sandbox = Sandbox::new().with_inputs();

    let output = sandbox.run(&["--json", "analyse"]);

    assert_eq!(output.status.code(), Some(3));
    let error = json_error(&output);
    assert_eq!(error["error"]["code"], "FILE_ERROR");
    assert!(error["error"]["message"]
        .as_str()
        .unwrap()
        .contains("filters.csv"));
}

#[test]
fn test_analyse_without_input_files() {
    let sandbox = Sandbox::new();
    fs::create_dir(sandbox.path().join("unfiltered_CLC_data")).unwrap();
    sandbox.write("filters.csv", "Count,>=10\n");

    let output = sandbox.run(&["--json", "analyse"]);

    assert_eq!(output.status.code(), Some(4));
    assert_eq!(json_error(&output)["error"]["code"], "INPUT_ERROR");
    assert!(!sandbox.path().join("results.csv").exists());
}

#[test]
fn test_malformed_filter_reports_cell() {
    let sandbox = Sandbox::new().with_inputs();
    sandbox.write("filters.csv", "Count,>=10\nFrequency,>=abc\n");

    let output = sandbox.run(&["analyse"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("B2"));
}

#[test]
fn test_files_lists_numbered_inputs() {
    let sandbox = Sandbox::new().with_inputs();
    sandbox.write("unfiltered_CLC_data/notes.csv", "x\n");

    let output = sandbox.run(&["files"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "001\trun_001_g1_a.csv\n002\trun_002_g1_b.csv\n"
    );

    let output = sandbox.run(&["--json", "files"]);
    let listing: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(listing["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_files_duplicate_number() {
    let sandbox = Sandbox::new().with_inputs();
    sandbox.write("unfiltered_CLC_data/other_002_g1_c.csv", "Count\n1\n");

    let output = sandbox.run(&["--json", "files"]);

    assert_eq!(output.status.code(), Some(4));
    assert_eq!(json_error(&output)["error"]["code"], "DISCOVERY_ERROR");
}

#[test]
fn test_sample_filters_written_and_listed() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["filters", "sample"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(sandbox.path().join("filters_SAMPLE.csv").exists());

    let output = sandbox.run(&["--no-color", "--filters", "filters_SAMPLE.csv", "filters"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let listing = stdout(&output);
    assert!(listing.contains("Filter 1:\n  Count >= 10\n"));
    assert!(listing.contains("Filter 2:"));
    assert!(listing.contains("  Type = Deletion OR MNV\n"));

    // A second write needs confirmation.
    let output = sandbox.run(&["filters", "sample"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_config_set_then_used() {
    let sandbox = Sandbox::new();
    sandbox.write("samples/s_010_g1_x.csv", "Count\n1\n");

    let output = sandbox.run(&["config", "set", "paths.input_dir", "samples"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(sandbox.read("config.toml").contains("input_dir = \"samples\""));

    let output = sandbox.run(&["files"]);
    assert_eq!(stdout(&output), "010\ts_010_g1_x.csv\n");

    let output = sandbox.run(&["config", "set", "discovery.pattern", "(["]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_config_path_honours_env() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["config", "path"]);
    assert_eq!(
        stdout(&output).trim(),
        sandbox.path().join("config.toml").display().to_string()
    );
}
