use medialauncher_core::SystemInspector;

#[cfg(unix)]
mod unix_impl {
    use super::*;
    use async_trait::async_trait;
    use std::process::Stdio;
    use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, Users};
    use tokio::process::Command;
    use tracing::debug;

    /// Unix system inspector backed by `which` and sysinfo enumeration.
    #[derive(Default)]
    pub struct UnixSystemInspector;

    impl UnixSystemInspector {
        pub fn new() -> Self {
            Self
        }

        fn current_account_name() -> Option<String> {
            let user = nix::unistd::User::from_uid(nix::unistd::geteuid()).ok()??;
            Some(user.name)
        }
    }

    #[async_trait]
    impl SystemInspector for UnixSystemInspector {
        async fn command_on_path(&self, command: &str) -> bool {
            match Command::new("which")
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
            let Some(current_account) = Self::current_account_name() else {
                debug!("could not resolve own account name");
                return false;
            };

            let mut system = System::new();
            system.refresh_processes_specifics(
                ProcessesToUpdate::All,
                true,
                ProcessRefreshKind::everything(),
            );
            let users = Users::new_with_refreshed_list();

            // Scan every candidate: the first match by name may belong to a
            // different account while a later one is ours.
            for process in system.processes().values() {
                if !process
                    .name()
                    .to_string_lossy()
                    .eq_ignore_ascii_case(image_name)
                {
                    continue;
                }
                let Some(uid) = process.user_id() else {
                    continue;
                };
                let Some(owner) = users.get_user_by_id(uid) else {
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

#[cfg(unix)]
pub use unix_impl::UnixSystemInspector;

#[cfg(not(unix))]
#[derive(Default)]
pub struct UnixSystemInspector;

#[cfg(not(unix))]
impl UnixSystemInspector {
    pub fn new() -> Self {
        Self
    }
}
