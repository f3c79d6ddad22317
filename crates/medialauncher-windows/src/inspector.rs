use medialauncher_core::SystemInspector;

#[cfg(windows)]
mod windows_impl {
    use super::*;
    use async_trait::async_trait;
    use std::process::Stdio;
    use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, Users};
    use tokio::process::Command;
    use tracing::debug;

    /// Windows system inspector backed by `where` and sysinfo enumeration.
    #[derive(Default)]
    pub struct WindowsSystemInspector;

    impl WindowsSystemInspector {
        pub fn new() -> Self {
            Self
        }
    }

    #[async_trait]
    impl SystemInspector for WindowsSystemInspector {
        async fn command_on_path(&self, command: &str) -> bool {
            match Command::new("where")
                .arg(command)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
            {
                Ok(status) => status.success(),
                Err(e) => {
                    debug!("path lookup for '{command}' failed to run: {e}");
                    false
                }
            }
        }

        async fn process_running_as_current_user(&self, image_name: &str) -> bool {
            let mut system = System::new();
            system.refresh_processes_specifics(
                ProcessesToUpdate::All,
                true,
                ProcessRefreshKind::everything(),
            );
            let users = Users::new_with_refreshed_list();

            // The launcher's own account is whatever owns this process
            let current_account = sysinfo::get_current_pid()
                .ok()
                .and_then(|pid| system.process(pid))
                .and_then(|process| process.user_id())
                .and_then(|sid| users.get_user_by_id(sid))
                .map(|user| user.name().to_string());
            let Some(current_account) = current_account else {
                debug!("could not resolve own account name");
                return false;
            };

            // Scan every candidate: the first match by name may belong to a
            // different account (e.g. a service session) while a later one is
            // ours. Candidates whose token cannot be resolved are skipped.
            for process in system.processes().values() {
                if !process
                    .name()
                    .to_string_lossy()
                    .eq_ignore_ascii_case(image_name)
                {
                    continue;
                }
                let Some(sid) = process.user_id() else {
                    continue;
                };
                let Some(owner) = users.get_user_by_id(sid) else {
                    continue;
                };
                if owner.name().eq_ignore_ascii_case(&current_account) {
                    return true;
                }
            }
            false
        }
    }
}

#[cfg(windows)]
pub use windows_impl::WindowsSystemInspector;

#[cfg(not(windows))]
#[derive(Default)]
pub struct WindowsSystemInspector;

#[cfg(not(windows))]
impl WindowsSystemInspector {
    pub fn new() -> Self {
        Self
    }
}
