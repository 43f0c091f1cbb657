use std::env;
use std::path::PathBuf;
use std::process::{Command, Output};

fn get_conductor_binary() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace_root = PathBuf::from(&manifest_dir).join("..");
    let binary_path = workspace_root
        .join("target")
        .join("debug")
        .join("conductor");

    if binary_path.exists() {
        return binary_path;
    }

    PathBuf::from("target/debug/conductor")
}

fn run_conductor(args: &[&str]) -> Output {
    Command::new(get_conductor_binary())
        .args(args)
        .output()
        .expect("Failed to execute conductor command")
}

fn output_to_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_to_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

mod version_and_help_tests {
    use super::*;

    #[test]
    fn test_version_flag() {
        let output = run_conductor(&["--version"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "--version should succeed");
        assert!(stdout.contains("conductor"));
        assert!(stdout.contains("0.1.0"));
    }

    #[test]
    fn test_help_lists_commands() {
        let output = run_conductor(&["--help"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "--help should succeed");
        for command in ["init", "submit", "plans", "run", "feedback", "agents", "status"] {
            assert!(stdout.contains(command), "help should mention '{command}'");
        }
    }
}

mod agents_command_tests {
    use super::*;

    #[test]
    fn test_agents_list_shows_builtin_kinds() {
        let output = run_conductor(&["--memory", "agents", "list"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "agents list should succeed");
        for kind in ["hr", "marketing", "procurement", "product", "tech_support", "generic"] {
            assert!(stdout.contains(kind), "agents list should mention '{kind}'");
        }
    }

    #[test]
    fn test_agents_show_displays_catalog() {
        let output = run_conductor(&["--memory", "agents", "show", "hr"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "agents show hr should succeed");
        assert!(stdout.contains("schedule_orientation"));
    }

    #[test]
    fn test_agents_show_unknown_kind_fails() {
        let output = run_conductor(&["--memory", "agents", "show", "finance"]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("unknown agent kind"));
    }
}

mod status_command_tests {
    use super::*;

    #[test]
    fn test_status_with_memory_store() {
        let output = run_conductor(&["--memory", "status"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "status should succeed");
        assert!(stdout.contains("healthy"));
    }

    #[test]
    fn test_status_json_format() {
        let output = run_conductor(&["--memory", "status", "--format", "json"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        let parsed: serde_json::Value =
            serde_json::from_str(stdout.trim()).expect("status --format json should emit JSON");
        assert!(parsed["healthy"].is_boolean());
    }

    #[test]
    fn test_status_bypass_reports_healthy() {
        let output = run_conductor(&["--memory", "status", "--bypass", "--format", "json"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
        assert_eq!(parsed["healthy"], serde_json::Value::Bool(true));
        assert_eq!(parsed["bypassed"], serde_json::Value::Bool(true));
    }
}

mod plans_command_tests {
    use super::*;

    #[test]
    fn test_plans_list_empty_session() {
        let session = "00000000-0000-0000-0000-000000000001";
        let output = run_conductor(&["--memory", "plans", "list", "--session", session]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "plans list should succeed");
        assert!(stdout.contains("No plans"));
    }

    #[test]
    fn test_plans_show_missing_plan_fails() {
        let id = "00000000-0000-0000-0000-000000000002";
        let output = run_conductor(&[
            "--memory", "plans", "show", "--session", id, "--plan", id,
        ]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("not found"));
    }
}

mod feedback_command_tests {
    use super::*;

    #[test]
    fn test_feedback_on_missing_step_fails() {
        let id = "00000000-0000-0000-0000-000000000003";
        let output = run_conductor(&[
            "--memory", "feedback", "approve", id, "--session", id,
        ]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("Step not found"));
    }
}
