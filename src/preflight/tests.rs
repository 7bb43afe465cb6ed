use super::*;
use crate::config::DEFAULT_REQUIRED_FILES;
use crate::console::RecordingConsole;
use crate::error::{ErrorCode, LauncherError};
use crate::subprocess::MockProcessRunner;
use tempfile::TempDir;

fn app_dir_with(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        std::fs::write(dir.path().join(file), "# stub\n").unwrap();
    }
    dir
}

fn full_app_dir() -> TempDir {
    app_dir_with(&DEFAULT_REQUIRED_FILES)
}

fn setup(dir: &TempDir) -> (Launcher, MockProcessRunner, RecordingConsole) {
    let (manager, mock) = SubprocessManager::mock();
    let console = RecordingConsole::new();
    let launcher = Launcher::new(
        LauncherConfig::default(),
        dir.path(),
        &manager,
        Arc::new(console.clone()),
    );
    (launcher, mock, console)
}

fn expect_version(mock: &mut MockProcessRunner) {
    mock.expect_command("python")
        .with_args(|args| args == ["--version"])
        .returns_stdout("Python 3.12.1\n")
        .returns_success()
        .finish();
}

fn expect_probe(mock: &mut MockProcessRunner, exit_code: i32) {
    mock.expect_command("python")
        .with_args(|args| args == ["-c", "import pypdf"])
        .returns_exit_code(exit_code)
        .finish();
}

fn expect_install(mock: &mut MockProcessRunner, exit_code: i32) {
    mock.expect_command("python")
        .with_args(|args| args == ["-m", "pip", "install", "pypdf"])
        .returns_exit_code(exit_code)
        .times(1)
        .finish();
}

fn expect_app(mock: &mut MockProcessRunner, exit_code: i32) {
    mock.expect_command("python")
        .with_args(|args| args.first().map(String::as_str) == Some("main.py"))
        .returns_exit_code(exit_code)
        .finish();
}

fn app_invocations(mock: &MockProcessRunner) -> usize {
    mock.get_call_history()
        .iter()
        .filter(|cmd| cmd.args.first().map(String::as_str) == Some("main.py"))
        .count()
}

#[tokio::test]
async fn test_runtime_absent_prints_download_link() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    mock.expect_command("python").returns_not_found().finish();

    let report = launcher.launch().await;

    assert_eq!(report.exit_code(), 1);
    assert!(report.completed.is_empty());
    let err = report.result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PREFLIGHT_RUNTIME_MISSING);

    let transcript = console.transcript();
    assert!(transcript.contains("ERROR: Python is not installed or not in PATH"));
    assert!(transcript.contains("https://www.python.org/downloads/"));
    assert_eq!(console.pause_count(), 1);
    assert!(mock.verify_called("python", 1));
}

#[tokio::test]
async fn test_runtime_version_query_failing_counts_as_absent() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    mock.expect_command("python")
        .with_args(|args| args == ["--version"])
        .returns_exit_code(9009)
        .finish();

    let report = launcher.launch().await;

    assert_eq!(report.exit_code(), 1);
    assert!(console.transcript().contains("Please install Python from"));
}

#[tokio::test]
async fn test_runtime_banner_is_reported() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    mock.expect_command("python")
        .with_args(|args| args == ["--version"])
        .returns_stderr("Python 2.7.18\n")
        .returns_success()
        .finish();

    launcher.check_runtime().await.unwrap();
    assert!(console.transcript().contains("Python 2.7.18 found"));
}

#[tokio::test]
async fn test_dependency_installed_then_files_checked() {
    let dir = app_dir_with(&["main.py"]);
    let (launcher, mut mock, console) = setup(&dir);
    expect_version(&mut mock);
    expect_probe(&mut mock, 1);
    expect_install(&mut mock, 0);

    let report = launcher.launch().await;

    let transcript = console.transcript();
    assert!(transcript.contains("pypdf not found. Installing pypdf..."));
    assert!(transcript.contains("pypdf installed successfully"));
    assert!(transcript.contains("Checking application files..."));
    assert_eq!(
        report.completed,
        vec![
            PreflightStep::Runtime,
            PreflightStep::Dependency("pypdf".to_string())
        ]
    );
    assert_eq!(
        report.result.unwrap_err().code(),
        ErrorCode::PREFLIGHT_FILE_MISSING
    );
}

#[tokio::test]
async fn test_dependency_install_failure_prints_manual_guidance() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    expect_version(&mut mock);
    expect_probe(&mut mock, 1);
    expect_install(&mut mock, 1);

    let report = launcher.launch().await;

    assert_eq!(report.exit_code(), 1);
    match report.result.unwrap_err() {
        LauncherError::DependencyMissing {
            package,
            install_hint,
            ..
        } => {
            assert_eq!(package, "pypdf");
            assert_eq!(install_hint, "python -m pip install pypdf");
        }
        other => panic!("unexpected error: {other}"),
    }

    let transcript = console.transcript();
    assert!(transcript.contains("ERROR: Failed to install pypdf"));
    assert!(transcript.contains("Please install it manually by running: python -m pip install pypdf"));
    assert!(!transcript.contains("Checking application files..."));
    assert_eq!(app_invocations(&mock), 0);
    assert_eq!(console.pause_count(), 1);
}

#[tokio::test]
async fn test_installed_dependency_skips_installer() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    expect_probe(&mut mock, 0);

    launcher.check_dependency("pypdf").await.unwrap();

    assert!(console.transcript().contains("pypdf is already installed"));
    assert_eq!(mock.get_call_history().len(), 1);
}

#[tokio::test]
async fn test_missing_svg_processor_is_named_and_app_not_started() {
    let dir = app_dir_with(&["main.py", "gui.py", "pdf_merger.py", "utils.py"]);
    let (launcher, mut mock, console) = setup(&dir);
    expect_version(&mut mock);
    expect_probe(&mut mock, 0);
    expect_app(&mut mock, 0);

    let report = launcher.launch().await;

    assert_eq!(report.exit_code(), 1);
    match report.result.unwrap_err() {
        LauncherError::FileMissing { file, required, .. } => {
            assert_eq!(file, "svg_processor.py");
            assert_eq!(required.len(), 5);
        }
        other => panic!("unexpected error: {other}"),
    }

    let transcript = console.transcript();
    assert!(transcript.contains("ERROR: svg_processor.py not found!"));
    for file in DEFAULT_REQUIRED_FILES {
        assert!(transcript.contains(&format!("  - {file}")));
    }
    assert_eq!(app_invocations(&mock), 0);
}

#[tokio::test]
async fn test_first_missing_file_wins() {
    let dir = app_dir_with(&["main.py"]);
    let (launcher, _mock, console) = setup(&dir);

    let names: Vec<String> = DEFAULT_REQUIRED_FILES.iter().map(|s| s.to_string()).collect();
    let err = launcher.check_files(&names).await.unwrap_err();

    assert!(err.to_string().contains("gui.py"));
    assert!(!console.transcript().contains("ERROR: pdf_merger.py not found!"));
}

#[tokio::test]
async fn test_application_success_prints_closing_message() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    expect_version(&mut mock);
    expect_probe(&mut mock, 0);
    expect_app(&mut mock, 0);

    let report = launcher.launch().await;

    assert!(report.is_success());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.result.unwrap(), LaunchOutcome::Completed);
    assert_eq!(report.completed.len(), 4);

    let transcript = console.transcript();
    assert!(transcript.contains("Starting SVG to PDF Merger..."));
    assert!(transcript.contains("SVG to PDF Merger closed."));
    assert!(!transcript.contains("Possible causes:"));
    assert_eq!(console.pause_count(), 1);

    let app = mock
        .get_call_history()
        .into_iter()
        .find(|cmd| cmd.args.first().map(String::as_str) == Some("main.py"))
        .unwrap();
    assert!(app.inherit_stdio);
    assert_eq!(app.timeout, None);
    assert_eq!(app.working_dir.as_deref(), Some(dir.path()));
}

#[tokio::test]
async fn test_application_failure_prints_three_hints() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    expect_version(&mut mock);
    expect_probe(&mut mock, 0);
    expect_app(&mut mock, 1);

    let report = launcher.launch().await;

    assert_eq!(report.exit_code(), 1);
    assert_eq!(
        report.result.unwrap_err().code(),
        ErrorCode::EXEC_APPLICATION_FAILED
    );

    let transcript = console.transcript();
    assert!(transcript.contains("exited with an error (code 1)"));
    assert!(transcript.contains("1. A required package is missing"));
    assert!(transcript.contains("2. One or more application files are missing or corrupted"));
    assert!(transcript.contains("3. Inkscape is not installed"));
    assert_eq!(console.pause_count(), 1);
}

#[tokio::test]
async fn test_application_killed_by_signal_fails() {
    let dir = full_app_dir();
    let (launcher, mut mock, _console) = setup(&dir);
    mock.expect_command("python")
        .with_args(|args| args.first().map(String::as_str) == Some("main.py"))
        .returns_signal(9)
        .finish();

    let err = launcher.run_application().await.unwrap_err();
    match err {
        LauncherError::ApplicationFailed { exit_code, .. } => assert_eq!(exit_code, None),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_passthrough_args_reach_entry_point() {
    let dir = full_app_dir();
    let (launcher, mut mock, _console) = setup(&dir);
    mock.expect_command("python")
        .with_args(|args| args == ["main.py", "--debug", "a.svg"])
        .returns_success()
        .finish();

    let launcher =
        launcher.with_passthrough_args(vec!["--debug".to_string(), "a.svg".to_string()]);
    launcher.run_application().await.unwrap();

    assert!(mock.verify_called("python", 1));
}

#[tokio::test]
async fn test_preflight_only_never_starts_application() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    expect_version(&mut mock);
    expect_probe(&mut mock, 0);
    expect_app(&mut mock, 0);

    let report = launcher.preflight().await;

    assert_eq!(report.result.unwrap(), LaunchOutcome::Ready);
    assert_eq!(app_invocations(&mock), 0);
    assert!(console
        .transcript()
        .contains("All checks passed. SVG to PDF Merger is ready to run."));
    assert_eq!(console.pause_count(), 1);
}

#[tokio::test]
async fn test_unexpected_spawn_error_is_reported() {
    let dir = full_app_dir();
    let (launcher, mut mock, console) = setup(&dir);
    expect_version(&mut mock);
    expect_probe(&mut mock, 0);
    mock.expect_command("python")
        .with_args(|args| args.first().map(String::as_str) == Some("main.py"))
        .returns_not_found()
        .finish();

    let report = launcher.launch().await;

    let err = report.result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::EXEC_COMMAND_NOT_FOUND);
    assert_eq!(err.exit_code(), 1);
    assert!(console.transcript().contains("ERROR: [E4001]"));
}

#[test]
fn test_plan_orders_each_dependency() {
    let mut config = LauncherConfig::default();
    config.dependencies.packages = vec!["pypdf".to_string(), "pikepdf".to_string()];

    let plan = LaunchPlan::from_config(&config, true);
    assert_eq!(
        plan.steps(),
        &[
            PreflightStep::Runtime,
            PreflightStep::Dependency("pypdf".to_string()),
            PreflightStep::Dependency("pikepdf".to_string()),
            PreflightStep::Files,
            PreflightStep::Application,
        ]
    );
    assert!(!LaunchPlan::from_config(&config, false).runs_application());
}
