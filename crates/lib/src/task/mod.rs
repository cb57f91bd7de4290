//! Named tasks with explicit dependencies.
//!
//! A [`TaskGraph`] holds every registered task; [`TaskGraph::run_in_order`]
//! executes a target and everything it depends on sequentially, stopping at
//! the first failure.

mod exec;
mod graph;
mod types;

pub use exec::run_external_process;
pub use graph::TaskGraph;
pub use types::{CompletedTask, Task, TaskAction, TaskError, TaskReport};

use tracing::debug;

use crate::tool::{self, DownloadOptions};

/// Perform a single task action.
pub async fn execute_action(action: &TaskAction) -> Result<(), TaskError> {
  match action {
    TaskAction::MakeDirectory { path } => tool::ensure_directory(path).await?,
    TaskAction::Download {
      url,
      destination,
      overwrite,
      only_if_modified,
    } => {
      let options = DownloadOptions {
        overwrite: *overwrite,
        only_if_modified: *only_if_modified,
      };
      let outcome = tool::download(url, destination, options).await?;
      debug!(?outcome, "download finished");
    }
    TaskAction::Verify {
      path,
      checksum,
      algorithm,
    } => tool::verify(path, checksum, *algorithm)?,
    TaskAction::Exec { command, cwd } => run_external_process(command, cwd.as_deref()).await?,
  }
  Ok(())
}
