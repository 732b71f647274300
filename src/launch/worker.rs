use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use super::tracker::Launcher;
use super::types::{LaunchOutcome, LaunchRequest};

/// Run `request` on a dedicated thread and send the outcome to `done`.
///
/// There is no cancellation: the thread waits for the child however long it
/// runs. If the receiver is gone the outcome is logged and dropped.
pub fn spawn_launch(
    request: LaunchRequest,
    launcher: Arc<dyn Launcher>,
    done: Sender<LaunchOutcome>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = launcher.launch(&request.item, &request.root);
        let name = request.item.name.clone();

        if done.send(LaunchOutcome { request, result }).is_err() {
            tracing::error!("Launch of {name} finished but nobody is listening; its playtime is lost");
        }
    })
}
