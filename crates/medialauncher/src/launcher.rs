use crate::platform_factory::{create_system_inspector, create_worker_manager, platform_name};
use anyhow::{Context, Result};
use medialauncher_core::{
    AppConfig, DependencyCheck, DependencyProber, DependencyStatus, LauncherError,
    ServerSupervisor, WorkerSpec, WorkerState,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the config document, kept next to the launcher executable.
pub const CONFIG_FILE: &str = "config.json";

/// The default dependency battery, in the order the UI shell renders it.
pub fn default_checks(base_dir: &Path) -> Vec<DependencyCheck> {
    let sdk_dir = base_dir.join("everything_sdk");
    vec![
        DependencyCheck::command("Node.js (node)", "node"),
        DependencyCheck::command("Python (python)", "python"),
        DependencyCheck::command("FFmpeg (ffmpeg)", "ffmpeg"),
        DependencyCheck::files(
            "Everything SDK DLLs",
            [
                sdk_dir.join("dll").join("Everything32.dll"),
                sdk_dir.join("dll").join("Everything64.dll"),
            ],
        ),
        DependencyCheck::file("Everything CLI (es.exe)", sdk_dir.join("es.exe")),
        DependencyCheck::process_owner("Everything running", "Everything.exe"),
        DependencyCheck::tcp("TMDB API", "api.themoviedb.org", 80),
        DependencyCheck::tcp("MusicBrainz API", "musicbrainz.org", 80),
    ]
}

/// The two worker recipes: the node web server and the python subtitle
/// backend, both rooted in the launcher's own directory.
pub fn default_worker_specs(base_dir: &Path) -> Vec<WorkerSpec> {
    vec![
        WorkerSpec {
            name: "node-server".to_string(),
            command: "node".to_string(),
            args: vec!["server.js".to_string()],
            env: HashMap::new(),
            working_directory: Some(base_dir.to_path_buf()),
        },
        WorkerSpec {
            name: "subtitle-backend".to_string(),
            command: "python".to_string(),
            args: vec!["subtitle_process_backend.py".to_string()],
            env: HashMap::new(),
            working_directory: Some(base_dir.to_path_buf()),
        },
    ]
}

/// Facade tying together the dependency prober, the server supervisor and
/// the config store, all rooted in the launcher's executable directory.
///
/// This is the surface a UI shell talks to: probe on startup and on refresh,
/// start/stop on button press, load/save around the settings dialog.
pub struct Launcher {
    base_dir: PathBuf,
    config_path: PathBuf,
    prober: DependencyProber,
    supervisor: ServerSupervisor,
}

impl Launcher {
    /// Build a launcher rooted next to the running executable.
    pub fn new() -> Result<Self> {
        let exe = std::env::current_exe().context("Failed to resolve launcher executable path")?;
        let base_dir = exe
            .parent()
            .context("Launcher executable has no parent directory")?
            .to_path_buf();
        Ok(Self::with_base_dir(base_dir))
    }

    /// Build a launcher rooted in an explicit directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        info!(
            platform = platform_name(),
            base_dir = %base_dir.display(),
            "initializing launcher"
        );

        let mut prober = DependencyProber::new(create_system_inspector());
        for check in default_checks(&base_dir) {
            prober.register(check);
        }

        let supervisor =
            ServerSupervisor::new(create_worker_manager(), default_worker_specs(&base_dir));

        Self {
            config_path: base_dir.join(CONFIG_FILE),
            base_dir,
            prober,
            supervisor,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn dependency_checks(&self) -> &[DependencyCheck] {
        self.prober.checks()
    }

    /// Run the whole dependency battery; one status per check, in order.
    pub async fn run_all_checks(&self) -> Vec<DependencyStatus> {
        self.prober.run_all_checks().await
    }

    /// Start both servers as an all-or-nothing unit.
    pub async fn start_servers(&mut self) -> Result<(), LauncherError> {
        self.supervisor.start().await
    }

    /// Stop whatever is running; safe to call at any time.
    pub async fn stop_servers(&mut self) {
        self.supervisor.stop().await;
    }

    pub fn servers_running(&self) -> bool {
        self.supervisor.is_running()
    }

    /// Liveness snapshot that actually asks the OS, unlike
    /// [`servers_running`](Self::servers_running) which reports occupancy.
    pub async fn poll_workers(&mut self) -> Vec<WorkerState> {
        self.supervisor.poll_workers().await
    }

    /// Load the config document; degrades to defaults, never fails.
    pub fn load_config(&self) -> AppConfig {
        AppConfig::load(&self.config_path)
    }

    pub fn save_config(&self, config: &AppConfig) -> Result<(), LauncherError> {
        config
            .save(&self.config_path)
            .map_err(|e| LauncherError::ConfigurationError(format!("{e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medialauncher_core::CheckKind;

    #[test]
    fn test_default_battery_names_and_order() {
        let checks = default_checks(Path::new("/opt/launcher"));
        let names: Vec<&str> = checks.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "Node.js (node)",
                "Python (python)",
                "FFmpeg (ffmpeg)",
                "Everything SDK DLLs",
                "Everything CLI (es.exe)",
                "Everything running",
                "TMDB API",
                "MusicBrainz API",
            ]
        );
    }

    #[test]
    fn test_sdk_check_is_single_and_over_both_dlls() {
        let checks = default_checks(Path::new("/opt/launcher"));
        let sdk = checks
            .iter()
            .find(|c| c.name() == "Everything SDK DLLs")
            .unwrap();
        match sdk.kind() {
            CheckKind::FilesExist { paths } => {
                assert_eq!(paths.len(), 2);
                assert!(paths.iter().all(|p| p.starts_with("/opt/launcher")));
            }
            other => panic!("unexpected check kind: {other:?}"),
        }
    }

    #[test]
    fn test_worker_specs_share_base_dir() {
        let specs = default_worker_specs(Path::new("/opt/launcher"));
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].command, "node");
        assert_eq!(specs[1].command, "python");
        for spec in &specs {
            assert_eq!(
                spec.working_directory.as_deref(),
                Some(Path::new("/opt/launcher"))
            );
        }
    }

    #[test]
    fn test_launcher_wiring() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Launcher::with_base_dir(dir.path());

        assert_eq!(launcher.base_dir(), dir.path());
        assert_eq!(launcher.config_path(), dir.path().join(CONFIG_FILE));
        assert_eq!(launcher.dependency_checks().len(), 8);
        assert!(!launcher.servers_running());
    }

    #[test]
    fn test_config_round_trip_through_launcher() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Launcher::with_base_dir(dir.path());

        // Absent file degrades to defaults.
        assert_eq!(launcher.load_config(), AppConfig::default());

        let mut config = AppConfig::default();
        config.api_keys.tmdb = "abc".to_string();
        launcher.save_config(&config).expect("save should succeed");
        assert_eq!(launcher.load_config().tmdb_api_key(), "abc");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_start_rolls_back_when_second_worker_is_missing() {
        let good = WorkerSpec {
            name: "sleeper".to_string(),
            command: "sleep".to_string(),
            args: vec!["5".to_string()],
            env: HashMap::new(),
            working_directory: None,
        };
        let bad = WorkerSpec {
            name: "ghost".to_string(),
            command: "definitely-not-an-installed-binary".to_string(),
            args: vec![],
            env: HashMap::new(),
            working_directory: None,
        };

        let mut supervisor =
            ServerSupervisor::new(crate::platform_factory::create_worker_manager(), [good, bad]);

        let err = supervisor.start().await.expect_err("start must fail");
        assert!(err.is_spawn_failure());
        assert!(!supervisor.is_running());

        // Stopping after a failed start stays a no-op.
        supervisor.stop().await;
        assert!(!supervisor.is_running());
    }
}
