//! Integration tests for CLI commands

use std::fs;
use std::path::Path;
use std::process::Command;

/// Helper to run kubepug command
fn kubepug(args: &[&str]) -> std::process::Output {
    kubepug_with_env(args, &[])
}

/// Helper to run kubepug command with extra environment variables
fn kubepug_with_env(args: &[&str], vars: &[(&str, &str)]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_kubepug"))
        .args(args)
        .env_remove("KUBEPUG_LOG")
        .envs(vars.iter().copied())
        .output()
        .expect("Failed to execute kubepug")
}

/// Swagger fixture shared with the core crate
fn swagger_path() -> &'static str {
    concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../kubepug-core/tests/fixtures/swagger.json"
    )
}

const MANIFESTS: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: default
---
apiVersion: policy/v1beta1
kind: PodDisruptionBudget
metadata:
  name: web
  namespace: default
---
apiVersion: extensions/v1beta1
kind: Ingress
metadata:
  name: web
  namespace: default
"#;

const CLEAN_MANIFESTS: &str = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
  namespace: default
"#;

fn write_manifests(dir: &Path, content: &str) -> String {
    let path = dir.join("app.yaml");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

mod check_command {
    use super::*;

    #[test]
    fn test_check_reports_deprecated_and_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_manifests(dir.path(), MANIFESTS);

        let output = kubepug(&[
            "check",
            "--swagger-file",
            swagger_path(),
            "--input-file",
            &input,
            "--format",
            "plain",
        ]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("PodDisruptionBudget found in policy/v1beta1"));
        assert!(stdout.contains("Ingress found in extensions/v1beta1"));
        assert!(!stdout.contains("Deployment found"));
    }

    #[test]
    fn test_check_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_manifests(dir.path(), MANIFESTS);

        let output = kubepug(&[
            "check",
            "--swagger-file",
            swagger_path(),
            "--input-file",
            &input,
            "--format",
            "json",
        ]);

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        assert_eq!(json["deprecatedApis"].as_array().unwrap().len(), 1);
        assert_eq!(json["deprecatedApis"][0]["kind"], "PodDisruptionBudget");
        assert_eq!(json["deletedApis"][0]["kind"], "Ingress");
        assert_eq!(json["deletedApis"][0]["items"][0]["scope"], "default");
    }

    #[test]
    fn test_error_on_deprecated() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_manifests(dir.path(), MANIFESTS);

        let output = kubepug(&[
            "check",
            "--swagger-file",
            swagger_path(),
            "--input-file",
            &input,
            "--error-on-deprecated",
        ]);

        assert_eq!(output.status.code(), Some(6));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("found 1 Deleted APIs and 1 Deprecated APIs"));
    }

    #[test]
    fn test_clean_manifests_pass_with_error_flags() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_manifests(dir.path(), CLEAN_MANIFESTS);

        let output = kubepug(&[
            "check",
            "--swagger-file",
            swagger_path(),
            "--input-file",
            &input,
            "--error-on-deprecated",
            "--error-on-deleted",
        ]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("No deprecated or deleted APIs found"));
    }

    #[test]
    fn test_results_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_manifests(dir.path(), MANIFESTS);
        let results = dir.path().join("results.yaml");

        let output = kubepug(&[
            "check",
            "--swagger-file",
            swagger_path(),
            "--input-file",
            &input,
            "--format",
            "yaml",
            "--filename",
            &results.display().to_string(),
        ]);

        assert!(output.status.success());
        let content = fs::read_to_string(&results).unwrap();
        let yaml = serde_yaml_from(&content);
        assert_eq!(yaml["deprecatedApis"][0]["version"], "v1beta1");
    }

    #[test]
    fn test_invalid_swagger_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_manifests(dir.path(), MANIFESTS);
        let swagger = dir.path().join("swagger.json");
        fs::write(&swagger, "{ this is not json").unwrap();

        let output = kubepug(&[
            "check",
            "--swagger-file",
            &swagger.display().to_string(),
            "--input-file",
            &input,
        ]);

        assert_eq!(output.status.code(), Some(3));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid API definitions"));
    }

    #[test]
    fn test_no_description_from_environment() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_manifests(dir.path(), MANIFESTS);

        let output = kubepug_with_env(
            &[
                "check",
                "--swagger-file",
                swagger_path(),
                "--input-file",
                &input,
                "--format",
                "json",
            ],
            &[("KUBEPUG_NO_DESCRIPTION", "true")],
        );

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert!(json["deprecatedApis"][0].get("description").is_none());
    }

    #[test]
    fn test_missing_swagger_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_manifests(dir.path(), MANIFESTS);

        let output = kubepug(&[
            "check",
            "--swagger-file",
            &dir.path().join("missing.json").display().to_string(),
            "--input-file",
            &input,
        ]);

        assert_eq!(output.status.code(), Some(5));
    }

    /// The YAML report is parsed through JSON to keep the assertions uniform
    fn serde_yaml_from(content: &str) -> serde_json::Value {
        let value: serde_yaml::Value = serde_yaml::from_str(content).unwrap();
        serde_json::to_value(value).unwrap()
    }
}

mod catalog_command {
    use super::*;

    #[test]
    fn test_catalog_lists_deprecated() {
        let output = kubepug(&[
            "catalog",
            "--swagger-file",
            swagger_path(),
            "--deprecated",
            "--json",
        ]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        let kinds: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["CronJob", "PodDisruptionBudget", "ComponentStatus"]);
    }

    #[test]
    fn test_catalog_flags_from_environment() {
        let output = kubepug_with_env(
            &["catalog", "--swagger-file", swagger_path()],
            &[("KUBEPUG_DEPRECATED_ONLY", "true"), ("KUBEPUG_JSON", "true")],
        );

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
    }
}
