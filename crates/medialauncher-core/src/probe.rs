use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Upper bound on a single network reachability probe. The underlying OS
/// default can be much larger; probes must return in bounded time.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Platform seam for probes that need OS services beyond the filesystem.
///
/// Implementations must degrade internally: any enumeration, token or lookup
/// failure is answered with `false`, never an error. One failing probe must
/// not be able to abort a whole probe run.
#[async_trait]
pub trait SystemInspector: Send + Sync {
    /// True only if a path-lookup of `command` terminates with exit code 0.
    /// A missing binary, a non-zero exit and a launch failure are all "not
    /// found"; no distinction is surfaced.
    async fn command_on_path(&self, command: &str) -> bool;

    /// True if any process whose image name matches `image_name`
    /// case-insensitively is owned by the same account the launcher runs as.
    /// Candidates whose owner cannot be resolved are skipped, and scanning
    /// continues; the first match by name is not authoritative.
    async fn process_running_as_current_user(&self, image_name: &str) -> bool;
}

/// The probe families the launcher supports.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckKind {
    /// Executable resolvable through the platform path-lookup mechanism
    CommandOnPath { command: String },
    /// Every listed path exists as a regular file (logical AND)
    FilesExist { paths: Vec<PathBuf> },
    /// Named process running under the launcher's own account
    ProcessOwnedByCurrentUser { image_name: String },
    /// TCP handshake with the host completes within [`CONNECT_TIMEOUT`]
    TcpReachable { host: String, port: u16 },
}

/// A named, read-only boolean test. Immutable after construction; identity is
/// the name.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyCheck {
    name: String,
    kind: CheckKind,
}

impl DependencyCheck {
    pub fn command(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CheckKind::CommandOnPath {
                command: command.into(),
            },
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::files(name, [path.into()])
    }

    pub fn files<I, P>(name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            kind: CheckKind::FilesExist {
                paths: paths.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn process_owner(name: impl Into<String>, image_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CheckKind::ProcessOwnedByCurrentUser {
                image_name: image_name.into(),
            },
        }
    }

    pub fn tcp(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            kind: CheckKind::TcpReachable {
                host: host.into(),
                port,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &CheckKind {
        &self.kind
    }

    async fn evaluate(&self, inspector: &dyn SystemInspector) -> bool {
        match &self.kind {
            CheckKind::CommandOnPath { command } => inspector.command_on_path(command).await,
            CheckKind::FilesExist { paths } => {
                !paths.is_empty() && paths.iter().all(|p| p.is_file())
            }
            CheckKind::ProcessOwnedByCurrentUser { image_name } => {
                inspector.process_running_as_current_user(image_name).await
            }
            CheckKind::TcpReachable { host, port } => tcp_reachable(host, *port).await,
        }
    }
}

/// Immutable snapshot produced by running one [`DependencyCheck`].
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyStatus {
    pub name: String,
    pub found: bool,
}

/// Runs a fixed battery of independent checks and reports their status.
///
/// The prober keeps no state between runs; callers refresh status solely by
/// calling [`run_all_checks`](Self::run_all_checks) again.
pub struct DependencyProber {
    inspector: Arc<dyn SystemInspector>,
    checks: Vec<DependencyCheck>,
}

impl DependencyProber {
    pub fn new(inspector: Arc<dyn SystemInspector>) -> Self {
        Self {
            inspector,
            checks: Vec::new(),
        }
    }

    pub fn register(&mut self, check: DependencyCheck) -> &mut Self {
        self.checks.push(check);
        self
    }

    pub fn checks(&self) -> &[DependencyCheck] {
        &self.checks
    }

    /// Run every registered check, in registration order.
    ///
    /// Always yields one status per check; a check whose underlying OS call
    /// fails reports `found = false` and never prevents the remaining checks
    /// from running.
    pub async fn run_all_checks(&self) -> Vec<DependencyStatus> {
        let mut statuses = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let found = check.evaluate(self.inspector.as_ref()).await;
            debug!(check = check.name(), found, "dependency probe finished");
            statuses.push(DependencyStatus {
                name: check.name().to_string(),
                found,
            });
        }
        statuses
    }
}

async fn tcp_reachable(host: &str, port: u16) -> bool {
    let addr = format!("{host}:{port}");
    match tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(addr.as_str())).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            debug!("TCP connect to {addr} failed: {e}");
            false
        }
        Err(_) => {
            debug!("TCP connect to {addr} timed out after {CONNECT_TIMEOUT:?}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inspector whose answers are fixed per call site, recording the probe
    /// arguments it was asked about.
    struct FakeInspector {
        commands_found: Vec<&'static str>,
        owned_processes: Vec<&'static str>,
    }

    impl FakeInspector {
        fn empty() -> Self {
            Self {
                commands_found: Vec::new(),
                owned_processes: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl SystemInspector for FakeInspector {
        async fn command_on_path(&self, command: &str) -> bool {
            self.commands_found.contains(&command)
        }

        async fn process_running_as_current_user(&self, image_name: &str) -> bool {
            self.owned_processes
                .iter()
                .any(|p| p.eq_ignore_ascii_case(image_name))
        }
    }

    #[tokio::test]
    async fn test_statuses_preserve_registration_order() {
        let inspector = Arc::new(FakeInspector {
            commands_found: vec!["node"],
            owned_processes: vec![],
        });
        let mut prober = DependencyProber::new(inspector);
        prober
            .register(DependencyCheck::command("Node.js (node)", "node"))
            .register(DependencyCheck::command("Python (python)", "python"))
            .register(DependencyCheck::file(
                "Missing artifact",
                "/definitely/not/here.dll",
            ));

        let statuses = prober.run_all_checks().await;
        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses[0].name, "Node.js (node)");
        assert!(statuses[0].found);
        assert_eq!(statuses[1].name, "Python (python)");
        assert!(!statuses[1].found);
        assert_eq!(statuses[2].name, "Missing artifact");
        assert!(!statuses[2].found);
    }

    #[tokio::test]
    async fn test_failing_probe_does_not_abort_batch() {
        // A nonsense host and an unresolvable path both degrade to false
        // while the check after them still runs.
        let mut prober = DependencyProber::new(Arc::new(FakeInspector {
            commands_found: vec!["sh"],
            owned_processes: vec![],
        }));
        prober
            .register(DependencyCheck::tcp(
                "Unreachable API",
                "nonexistent.invalid",
                80,
            ))
            .register(DependencyCheck::file("Missing file", "/no/such/file"))
            .register(DependencyCheck::command("Shell", "sh"));

        let statuses = prober.run_all_checks().await;
        assert_eq!(statuses.len(), 3);
        assert!(!statuses[0].found);
        assert!(!statuses[1].found);
        assert!(statuses[2].found);
    }

    #[tokio::test]
    async fn test_files_exist_is_logical_and() {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        let p1 = dir.path().join("Everything32.dll");
        let p2 = dir.path().join("Everything64.dll");
        std::fs::write(&p1, b"stub").expect("Failed to write fixture");

        let check = DependencyCheck::files("Everything SDK DLLs", [p1.clone(), p2.clone()]);
        let inspector = Arc::new(FakeInspector::empty());
        let mut prober = DependencyProber::new(inspector);
        prober.register(check);

        // Only P1 exists: the combined check must report not found.
        let statuses = prober.run_all_checks().await;
        assert!(!statuses[0].found);

        std::fs::write(&p2, b"stub").expect("Failed to write fixture");
        let statuses = prober.run_all_checks().await;
        assert!(statuses[0].found);
    }

    #[tokio::test]
    async fn test_directory_does_not_count_as_file() {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        let mut prober = DependencyProber::new(Arc::new(FakeInspector::empty()));
        prober.register(DependencyCheck::file("dir as artifact", dir.path()));

        let statuses = prober.run_all_checks().await;
        assert!(!statuses[0].found);
    }

    #[tokio::test]
    async fn test_tcp_probe_refused_connection_is_not_found() {
        // Port 1 on loopback refuses immediately on any sane test host.
        let mut prober = DependencyProber::new(Arc::new(FakeInspector::empty()));
        prober.register(DependencyCheck::tcp("Closed port", "127.0.0.1", 1));

        let statuses = prober.run_all_checks().await;
        assert!(!statuses[0].found);
    }

    #[tokio::test]
    async fn test_tcp_probe_open_port_is_found() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let port = listener.local_addr().unwrap().port();

        let mut prober = DependencyProber::new(Arc::new(FakeInspector::empty()));
        prober.register(DependencyCheck::tcp("Local API", "127.0.0.1", port));

        let statuses = prober.run_all_checks().await;
        assert!(statuses[0].found);
    }

    #[tokio::test]
    async fn test_process_owner_check_delegates_to_inspector() {
        let mut prober = DependencyProber::new(Arc::new(FakeInspector {
            commands_found: vec![],
            owned_processes: vec!["Everything.exe"],
        }));
        prober
            .register(DependencyCheck::process_owner(
                "Everything running",
                "everything.exe",
            ))
            .register(DependencyCheck::process_owner("Other daemon", "other.exe"));

        let statuses = prober.run_all_checks().await;
        assert!(statuses[0].found);
        assert!(!statuses[1].found);
    }

    #[tokio::test]
    async fn test_empty_file_list_is_not_found() {
        let mut prober = DependencyProber::new(Arc::new(FakeInspector::empty()));
        prober.register(DependencyCheck::files("No artifacts", Vec::<PathBuf>::new()));

        let statuses = prober.run_all_checks().await;
        assert!(!statuses[0].found);
    }
}
