//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn queues_commands_without_touching_status() {
        let (tx, rx) = bounded(1);
        let mut status = "Ready".to_string();
        assert!(dispatch_backend_command(
            &tx,
            BackendCommand::Compress {
                sentence: "the cat".to_string()
            },
            &mut status,
        ));
        assert_eq!(status, "Ready");
        match rx.try_recv().expect("queued") {
            BackendCommand::Compress { sentence } => assert_eq!(sentence, "the cat"),
        }
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        let cmd = || BackendCommand::Compress {
            sentence: String::new(),
        };
        assert!(dispatch_backend_command(&tx, cmd(), &mut status));
        assert!(!dispatch_backend_command(&tx, cmd(), &mut status));
        assert!(status.contains("queue is full"));
    }

    #[test]
    fn reports_disconnected_backend() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        assert!(!dispatch_backend_command(
            &tx,
            BackendCommand::Compress {
                sentence: "x".to_string()
            },
            &mut status,
        ));
        assert!(status.contains("disconnected"));
    }
}
