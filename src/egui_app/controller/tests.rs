use super::*;
use std::time::{Duration, Instant};

use super::clips::LOAD_FAILED_MESSAGE;
use super::delete::{DELETE_FAILED_MESSAGE, WRONG_PASSWORD_MESSAGE};
use super::playback::{CardPointer, NOT_READY_MESSAGE};
use super::upload::MISSING_FIELDS_MESSAGE;
use crate::api::{ApiError, SortMode};
use crate::egui_app::jobs::{ClipsLoadResult, DeleteResult, UploadResult};

fn controller() -> ClipController {
    let mut config = AppConfig::default();
    // Unroutable port so stray worker threads fail fast.
    config.api.base_url = "http://127.0.0.1:9/api".to_string();
    ClipController::new(&config)
}

fn clip(id: u64, title: &str, processed: bool) -> Clip {
    Clip {
        id,
        title: title.to_string(),
        description: None,
        uploaded_by: Some("sam".into()),
        thumbnail_url: None,
        audio_url: processed.then(|| format!("/files/{id}.mp3")),
        upload_date: Some("2024-05-02T10:15:30".into()),
        file_size_bytes: Some(2048),
        play_count: Some(0),
        is_processed: processed,
    }
}

fn seed_clips(controller: &mut ClipController, clips: Vec<Clip>) {
    controller.apply_clips_loaded(ClipsLoadResult {
        generation: controller.jobs.current_list_generation(),
        result: Ok(clips),
    });
}

#[test]
fn successful_load_populates_grid_and_cards() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(1, "Yodel", true), clip(2, "Horn", false)]);
    assert_eq!(controller.ui.list.phase, ListPhase::Populated);
    assert_eq!(controller.clips().len(), 2);
    assert!(controller.ui.cards.contains_key(&1));
    assert!(controller.ui.cards.contains_key(&2));
}

#[test]
fn empty_load_shows_empty_phase() {
    let mut controller = controller();
    seed_clips(&mut controller, Vec::new());
    assert_eq!(controller.ui.list.phase, ListPhase::Empty);
    assert!(controller.ui.list.error.is_none());
}

#[test]
fn failed_load_clears_collection_and_banners() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(1, "Yodel", true)]);
    controller.apply_clips_loaded(ClipsLoadResult {
        generation: controller.jobs.current_list_generation(),
        result: Err(ApiError::Transport("connection refused".into())),
    });
    assert_eq!(controller.ui.list.phase, ListPhase::Error);
    assert_eq!(controller.ui.list.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(controller.clips().is_empty());
    assert!(controller.ui.cards.is_empty());
}

#[test]
fn stale_load_results_are_dropped() {
    let mut controller = controller();
    controller.reload_clips();
    let stale = controller.jobs.current_list_generation();
    controller.reload_clips();
    controller.apply_clips_loaded(ClipsLoadResult {
        generation: stale,
        result: Ok(vec![clip(1, "Stale", true)]),
    });
    assert_eq!(controller.ui.list.phase, ListPhase::Loading);
    assert!(controller.clips().is_empty());
}

#[test]
fn selecting_the_active_sort_does_not_refetch() {
    let mut controller = controller();
    controller.request_initial_load();
    let generation = controller.jobs.current_list_generation();
    controller.set_sort(SortMode::Recent);
    assert_eq!(controller.jobs.current_list_generation(), generation);
    controller.set_sort(SortMode::Popular);
    assert_eq!(controller.jobs.current_list_generation(), generation + 1);
}

#[test]
fn switching_sort_drops_the_active_search() {
    let mut controller = controller();
    controller.ui.list.search_input = "horn".to_string();
    controller.submit_search();
    assert_eq!(controller.ui.list.active_query.as_deref(), Some("horn"));
    controller.set_sort(SortMode::Popular);
    assert!(controller.ui.list.active_query.is_none());
    assert!(controller.ui.list.search_input.is_empty());
}

#[test]
fn reload_keeps_card_state_for_surviving_clips() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(1, "Yodel", true), clip(2, "Horn", true)]);
    controller.set_card_speed(1, 1.5);
    controller.set_session_title(1, "Renamed".to_string());
    seed_clips(&mut controller, vec![clip(1, "Yodel", true), clip(3, "New", true)]);
    let card = &controller.ui.cards[&1];
    assert!((card.params.speed() - 1.5).abs() < f32::EPSILON);
    assert_eq!(card.session_title.as_deref(), Some("Renamed"));
    assert!(!controller.ui.cards.contains_key(&2));
    assert!(controller.ui.cards.contains_key(&3));
}

#[test]
fn delete_flow_reprompts_on_wrong_password_then_succeeds() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(7, "Airhorn", true)]);

    controller.request_delete(7);
    assert!(controller.ui.delete.is_open());
    assert!(controller.ui.delete.focus_password_requested);

    // Empty password never leaves the dialog.
    controller.confirm_delete();
    assert!(!controller.ui.delete.deleting);
    assert!(controller.ui.delete.auth_error.is_some());

    controller.ui.delete.password_input = "wrong".to_string();
    controller.confirm_delete();
    assert!(controller.ui.delete.deleting);
    controller.apply_delete_finished(DeleteResult {
        id: 7,
        result: Err(ApiError::Unauthorized),
    });
    assert!(controller.ui.delete.is_open());
    assert!(!controller.ui.delete.deleting);
    assert!(controller.ui.delete.password_input.is_empty());
    assert_eq!(controller.ui.delete.auth_error.as_deref(), Some(WRONG_PASSWORD_MESSAGE));

    controller.ui.delete.password_input = "right".to_string();
    controller.confirm_delete();
    controller.apply_delete_finished(DeleteResult { id: 7, result: Ok(()) });
    assert!(!controller.ui.delete.is_open());
    assert!(controller.clips().is_empty());
    assert_eq!(controller.ui.list.phase, ListPhase::Empty);
}

#[test]
fn delete_success_drops_only_the_target_clip() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(7, "Airhorn", true), clip(8, "Yodel", true)]);
    controller.request_delete(7);
    controller.ui.delete.password_input = "secret".to_string();
    controller.confirm_delete();
    controller.apply_delete_finished(DeleteResult { id: 7, result: Ok(()) });

    let remaining: Vec<u64> = controller.clips().iter().map(|c| c.id).collect();
    assert_eq!(remaining, vec![8]);
    assert!(!controller.ui.cards.contains_key(&7));
    assert!(controller.ui.cards.contains_key(&8));
    assert_eq!(controller.ui.list.phase, ListPhase::Populated);
}

#[test]
fn cancel_closes_the_dialog_even_while_a_delete_is_in_flight() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(7, "Airhorn", true)]);
    controller.request_delete(7);
    controller.ui.delete.password_input = "wrong".to_string();
    controller.confirm_delete();
    assert!(controller.ui.delete.deleting);

    controller.cancel_delete();
    assert!(!controller.ui.delete.is_open());

    // A late auth failure for a dismissed dialog must not reopen it.
    controller.apply_delete_finished(DeleteResult {
        id: 7,
        result: Err(ApiError::Unauthorized),
    });
    assert!(!controller.ui.delete.is_open());
    assert!(controller.ui.delete.auth_error.is_none());
    assert!(!controller.ui.delete.deleting);
}

#[test]
fn delete_transport_failure_closes_dialog_with_status() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(7, "Airhorn", true)]);
    controller.request_delete(7);
    controller.ui.delete.password_input = "secret".to_string();
    controller.confirm_delete();
    controller.apply_delete_finished(DeleteResult {
        id: 7,
        result: Err(ApiError::Transport("boom".into())),
    });
    assert!(!controller.ui.delete.is_open());
    assert_eq!(controller.ui.status.text, DELETE_FAILED_MESSAGE);
}

#[test]
fn upload_without_file_or_title_fails_locally() {
    let mut controller = controller();
    controller.open_upload_form();
    controller.submit_upload();
    assert!(!controller.ui.upload.uploading);
    assert_eq!(controller.ui.upload.last_error.as_deref(), Some(MISSING_FIELDS_MESSAGE));

    controller.ui.upload.file = Some("/tmp/horn.mp3".into());
    controller.ui.upload.title = "   ".to_string();
    controller.submit_upload();
    assert!(!controller.ui.upload.uploading);
    assert_eq!(controller.ui.upload.last_error.as_deref(), Some(MISSING_FIELDS_MESSAGE));
}

#[test]
fn upload_success_closes_form_and_reloads() {
    let mut controller = controller();
    controller.open_upload_form();
    controller.ui.upload.uploading = true;
    controller.apply_upload_finished(UploadResult { result: Ok(()) });
    assert!(!controller.ui.upload.open);
    assert!(controller.ui.upload.title.is_empty());
    assert_eq!(controller.ui.list.phase, ListPhase::Loading);
}

#[test]
fn upload_failure_surfaces_server_message_inline() {
    let mut controller = controller();
    controller.open_upload_form();
    controller.ui.upload.uploading = true;
    controller.apply_upload_finished(UploadResult {
        result: Err(ApiError::BadRequest("File too large".into())),
    });
    assert!(controller.ui.upload.open);
    assert_eq!(controller.ui.upload.last_error.as_deref(), Some("File too large"));
}

#[test]
fn unprocessed_clips_refuse_playback() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(4, "Raw", false)]);
    controller.request_play(4);
    assert_eq!(controller.ui.status.text, NOT_READY_MESSAGE);
}

#[test]
fn tap_gesture_reaches_playback_request() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(4, "Horn", true)]);
    let t0 = Instant::now();
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: true, released: false, hovered: true },
        t0,
    );
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: false, released: true, hovered: true },
        t0 + Duration::from_millis(100),
    );
    // No audio output attached in tests, so the request ends at the status
    // line rather than a fetch.
    assert_eq!(controller.ui.status.text, "No audio output device available");
}

#[test]
fn hold_gesture_expands_without_requesting_playback() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(4, "Horn", true)]);
    let t0 = Instant::now();
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: true, released: false, hovered: true },
        t0,
    );
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: false, released: false, hovered: true },
        t0 + Duration::from_millis(350),
    );
    assert!(controller.any_card_expanded());
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: false, released: true, hovered: true },
        t0 + Duration::from_millis(400),
    );
    assert!(controller.any_card_expanded());
    controller.collapse_all_cards();
    assert!(!controller.any_card_expanded());
}

#[test]
fn pointer_leaving_mid_hold_cancels_the_press() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(4, "Horn", true)]);
    let t0 = Instant::now();
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: true, released: false, hovered: true },
        t0,
    );
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: false, released: false, hovered: false },
        t0 + Duration::from_millis(200),
    );
    assert!(!controller.any_card_expanded());
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: false, released: false, hovered: true },
        t0 + Duration::from_millis(500),
    );
    assert!(!controller.any_card_expanded());
}

#[test]
fn release_in_the_same_frame_as_leaving_does_not_play() {
    let mut controller = controller();
    seed_clips(&mut controller, vec![clip(4, "Horn", true)]);
    let t0 = Instant::now();
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: true, released: false, hovered: true },
        t0,
    );
    // Dragging off the card and releasing can land in one frame; the
    // leave wins and no playback request goes out.
    controller.handle_card_pointer(
        4,
        CardPointer { pressed: false, released: true, hovered: false },
        t0 + Duration::from_millis(100),
    );
    assert_eq!(controller.ui.status.text, "Connecting to the clip API");
    assert!(!controller.any_card_expanded());
}
