//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    ClientEvent, ClientSettings, CompressionService, HttpCompressionService,
    MissingCompressionService, Submitter,
};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

fn build_service(settings: &ClientSettings, ui_tx: &Sender<UiEvent>) -> Arc<dyn CompressionService> {
    match HttpCompressionService::new(settings) {
        Ok(service) => {
            tracing::info!(endpoint = %service.base_endpoint(), "compression endpoint configured");
            Arc::new(service)
        }
        Err(err) => {
            tracing::error!(endpoint = %settings.base_endpoint, error = %err, "unusable compression endpoint");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                err.to_string(),
            )));
            Arc::new(MissingCompressionService::new(err.to_string()))
        }
    }
}

fn to_ui_event(event: ClientEvent) -> UiEvent {
    match event {
        ClientEvent::Issued { request_id, .. } => UiEvent::Issued { request_id },
        ClientEvent::Resolved(outcome) => UiEvent::Resolved(outcome),
    }
}

/// Relays submitter events to the UI until either side closes.
///
/// Sends block while the UI queue is full: a dropped `Resolved` would leave
/// its request counted as in flight forever.
fn forward_events(mut events: broadcast::Receiver<ClientEvent>, ui_tx: Sender<UiEvent>) {
    loop {
        let event = match events.blocking_recv() {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "ui event forwarder lagged behind");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };
        if ui_tx.send(to_ui_event(event)).is_err() {
            tracing::info!("ui event queue closed; forwarder exiting");
            break;
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let submitter = Submitter::new(build_service(&settings, &ui_tx));

            let events = submitter.subscribe_events();
            let ui_tx_events = ui_tx.clone();
            thread::spawn(move || forward_events(events, ui_tx_events));

            let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

            // Blocks this thread only; request tasks run on the runtime's workers.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Compress { sentence } => {
                        let _ = submitter.submit(sentence);
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}
