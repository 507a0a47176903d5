//! Background workers for network operations.
//!
//! Every network call runs on a short-lived worker thread and reports back
//! over a single `mpsc` channel that the controller drains once per frame,
//! so the UI stays responsive while a call is in flight. List loads and
//! stream fetches carry generation/request ids so stale results are
//! discarded instead of clobbering newer state.

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender, TryRecvError},
    thread,
};

use crate::api::{ApiError, Clip, ClipApi, Pagination, SortMode, UploadRequest};
use crate::playback::PlaybackParams;

pub(crate) enum JobMessage {
    ClipsLoaded(ClipsLoadResult),
    DeleteFinished(DeleteResult),
    UploadFinished(UploadResult),
    StreamFetched(StreamFetchResult),
}

pub(crate) struct ClipsLoadResult {
    /// Which load this answers; only the latest generation is applied.
    pub(crate) generation: u64,
    pub(crate) result: Result<Vec<Clip>, ApiError>,
}

pub(crate) struct DeleteResult {
    pub(crate) id: u64,
    pub(crate) result: Result<(), ApiError>,
}

pub(crate) struct UploadResult {
    pub(crate) result: Result<(), ApiError>,
}

pub(crate) struct StreamFetchResult {
    pub(crate) request_id: u64,
    pub(crate) clip_id: u64,
    pub(crate) result: Result<Vec<u8>, ApiError>,
}

/// A validated upload handed to the worker; the file is read off-thread.
pub(crate) struct UploadJob {
    pub(crate) path: PathBuf,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) uploaded_by: String,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    list_generation: u64,
    delete_in_progress: bool,
    upload_in_progress: bool,
    /// Request id of the stream fetch whose result is still wanted; 0 when
    /// no fetch is pending.
    wanted_stream_request: u64,
    next_stream_request: u64,
}

impl ControllerJobs {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            message_tx,
            message_rx,
            list_generation: 0,
            delete_in_progress: false,
            upload_in_progress: false,
            wanted_stream_request: 0,
            next_stream_request: 1,
        }
    }

    pub(crate) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Start a listing or search fetch; returns the generation it answers.
    pub(crate) fn begin_list_load(
        &mut self,
        api: ClipApi,
        sort: SortMode,
        query: Option<String>,
    ) -> u64 {
        self.list_generation += 1;
        let generation = self.list_generation;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = match &query {
                Some(q) => api.search(q, Pagination::default()),
                None => api.list(sort, Pagination::default()),
            };
            let _ = tx.send(JobMessage::ClipsLoaded(ClipsLoadResult { generation, result }));
        });
        generation
    }

    pub(crate) fn current_list_generation(&self) -> u64 {
        self.list_generation
    }

    pub(crate) fn delete_in_progress(&self) -> bool {
        self.delete_in_progress
    }

    pub(crate) fn begin_delete(&mut self, api: ClipApi, id: u64, password: String) {
        if self.delete_in_progress {
            return;
        }
        self.delete_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.delete_clip(id, &password);
            let _ = tx.send(JobMessage::DeleteFinished(DeleteResult { id, result }));
        });
    }

    pub(crate) fn clear_delete(&mut self) {
        self.delete_in_progress = false;
    }

    pub(crate) fn upload_in_progress(&self) -> bool {
        self.upload_in_progress
    }

    pub(crate) fn begin_upload(&mut self, api: ClipApi, job: UploadJob) {
        if self.upload_in_progress {
            return;
        }
        self.upload_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = run_upload(&api, &job);
            let _ = tx.send(JobMessage::UploadFinished(UploadResult { result }));
        });
    }

    pub(crate) fn clear_upload(&mut self) {
        self.upload_in_progress = false;
    }

    /// Start a stream fetch, superseding any previous one.
    pub(crate) fn begin_stream_fetch(
        &mut self,
        api: ClipApi,
        clip_id: u64,
        params: PlaybackParams,
    ) -> u64 {
        let request_id = self.next_stream_request;
        self.next_stream_request = self.next_stream_request.wrapping_add(1).max(1);
        self.wanted_stream_request = request_id;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.fetch_stream(clip_id, params);
            let _ = tx.send(JobMessage::StreamFetched(StreamFetchResult {
                request_id,
                clip_id,
                result,
            }));
        });
        request_id
    }

    /// True when a stream result answers the fetch we still care about.
    pub(crate) fn stream_fetch_is_current(&self, request_id: u64) -> bool {
        self.wanted_stream_request != 0 && self.wanted_stream_request == request_id
    }

    pub(crate) fn clear_stream_fetch(&mut self) {
        self.wanted_stream_request = 0;
    }
}

fn run_upload(api: &ClipApi, job: &UploadJob) -> Result<(), ApiError> {
    let bytes = std::fs::read(&job.path)
        .map_err(|err| ApiError::Transport(format!("Could not read file: {err}")))?;
    let file_name = job
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    api.upload(&UploadRequest {
        file_name,
        bytes,
        title: job.title.clone(),
        description: job.description.clone(),
        uploaded_by: job.uploaded_by.clone(),
    })
}
