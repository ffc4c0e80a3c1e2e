//! Keep the host awake while monitoring

use tokio::process::{Child, Command};
use tracing::{error, info};

/// Holds a `caffeinate -i` child process. The process is killed on drop.
pub struct KeepAwake {
    child: Option<Child>,
}

impl KeepAwake {
    pub fn start() -> Self {
        match Command::new("caffeinate").arg("-i").kill_on_drop(true).spawn() {
            Ok(child) => {
                info!("Started caffeinate (pid {:?})", child.id());
                Self { child: Some(child) }
            }
            Err(e) => {
                error!("Failed to start caffeinate: {}", e);
                Self { child: None }
            }
        }
    }

    pub async fn stop(mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().await {
                error!("Failed to stop caffeinate: {}", e);
            }
        }
    }
}
