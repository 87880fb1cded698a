use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::common::{ApiError, ApiReply, ApiRequest, NetworkCommand, NetworkEvent};

use super::api::ApiClient;

/// Background task that executes [`NetworkCommand`]s off the UI thread.
pub struct ApiWorker {
    api: ApiClient,
    event_sender: mpsc::Sender<NetworkEvent>,
    command_receiver: mpsc::Receiver<NetworkCommand>,
    in_flight: HashMap<Uuid, Vec<AbortHandle>>,
}

impl ApiWorker {
    pub fn new(
        api: ApiClient,
        event_sender: mpsc::Sender<NetworkEvent>,
        command_receiver: mpsc::Receiver<NetworkCommand>,
    ) -> Self {
        Self {
            api,
            event_sender,
            command_receiver,
            in_flight: HashMap::new(),
        }
    }

    pub async fn run(mut self) {
        log::info!("API worker started");

        while let Some(command) = self.command_receiver.recv().await {
            self.handle(command);
        }

        for (_, handles) in self.in_flight.drain() {
            handles.iter().for_each(AbortHandle::abort);
        }
        log::info!("API worker stopped");
    }

    fn handle(&mut self, command: NetworkCommand) {
        self.prune_finished();
        match command {
            NetworkCommand::Request { origin, request } => self.spawn_request(origin, request),
            NetworkCommand::Cancel(origin) => self.cancel(origin),
        }
    }

    fn spawn_request(&mut self, origin: Uuid, request: ApiRequest) {
        let api = self.api.clone();
        let event_sender = self.event_sender.clone();
        let kind = request.kind();
        log::debug!("Dispatching {kind:?} for activation {origin}");

        let handle = tokio::spawn(async move {
            let result = execute(&api, request).await;
            if let Err(err) = &result {
                log::warn!("{kind:?} failed: {err}");
            }
            let event = NetworkEvent::Completed {
                origin,
                kind,
                result,
            };
            if let Err(err) = event_sender.send(event).await {
                log::warn!("Failed to deliver {kind:?} result to UI: {err}");
            }
        });

        self.in_flight
            .entry(origin)
            .or_default()
            .push(handle.abort_handle());
    }

    fn cancel(&mut self, origin: Uuid) {
        if let Some(handles) = self.in_flight.remove(&origin) {
            let pending = handles.iter().filter(|handle| !handle.is_finished()).count();
            handles.iter().for_each(AbortHandle::abort);
            if pending > 0 {
                log::debug!("Cancelled {pending} in-flight request(s) for activation {origin}");
            }
        }
    }

    fn prune_finished(&mut self) {
        self.in_flight.retain(|_, handles| {
            handles.retain(|handle| !handle.is_finished());
            !handles.is_empty()
        });
    }
}

async fn execute(api: &ApiClient, request: ApiRequest) -> Result<ApiReply, ApiError> {
    match request {
        ApiRequest::Login(credentials) => api
            .login(&credentials)
            .await
            .map(|message| ApiReply::Authenticated { message }),
        ApiRequest::Register(credentials) => api
            .register(&credentials)
            .await
            .map(|message| ApiReply::Authenticated { message }),
        ApiRequest::RefreshSession => api
            .refresh_session()
            .await
            .map(|_| ApiReply::SessionRefreshed),
        ApiRequest::LoadProfile => api.fetch_profile().await.map(ApiReply::Profile),
        ApiRequest::SaveProfile(profile) => api
            .save_profile(&profile)
            .await
            .map(|message| ApiReply::ProfileSaved { message }),
        ApiRequest::LoadHistory => api.fetch_history().await.map(ApiReply::History),
        ApiRequest::SendMessage(text) => api.send_message(&text).await.map(ApiReply::Reply),
    }
}
