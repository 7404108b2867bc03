use super::*;
use crate::editor::ListenerId;
use crate::editor::drag::MockPointerHost;
use crate::oracle::StaticOracle;
use crate::playback::PlaybackState;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum PreviewEvent {
    Start,
    Brightness(f64),
    End,
}

#[derive(Clone, Default)]
struct SharedOwner {
    entries: Rc<RefCell<Vec<ScheduleEntry>>>,
    updates: Rc<RefCell<usize>>,
}

impl SharedOwner {
    fn with(entries: Vec<ScheduleEntry>) -> Self {
        Self {
            entries: Rc::new(RefCell::new(entries)),
            updates: Rc::default(),
        }
    }

    fn snapshot(&self) -> Vec<ScheduleEntry> {
        self.entries.borrow().clone()
    }
}

impl ScheduleOwner for SharedOwner {
    fn entries(&self) -> Vec<ScheduleEntry> {
        self.entries.borrow().clone()
    }

    fn on_update(&mut self, entries: Vec<ScheduleEntry>) {
        *self.entries.borrow_mut() = entries;
        *self.updates.borrow_mut() += 1;
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    events: Rc<RefCell<Vec<PreviewEvent>>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<PreviewEvent> {
        self.events.borrow().clone()
    }

    fn count(&self, wanted: &PreviewEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == wanted).count()
    }
}

impl PreviewSink for RecordingSink {
    fn on_preview_brightness(&mut self, value: f64) {
        self.events.borrow_mut().push(PreviewEvent::Brightness(value));
    }

    fn on_preview_start(&mut self) {
        self.events.borrow_mut().push(PreviewEvent::Start);
    }

    fn on_preview_end(&mut self) {
        self.events.borrow_mut().push(PreviewEvent::End);
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn day_entries() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry::fixed("08:00", 20.0),
        ScheduleEntry::fixed("20:00", 90.0),
    ]
}

fn controller_with(owner: &SharedOwner, sink: &RecordingSink) -> ScheduleController {
    ScheduleController::new(Box::new(owner.clone())).with_preview(Box::new(sink.clone()))
}

fn counting_pointer() -> MockPointerHost {
    let mut host = MockPointerHost::new();
    let mut next = 0;
    host.expect_attach().returning(move |_| {
        next += 1;
        ListenerId(next)
    });
    host
}

#[test]
fn test_end_to_end_boundary_value() {
    let owner = SharedOwner::with(day_entries());
    let controller = ScheduleController::new(Box::new(owner));

    let expected = 90.0 + (-70.0 / 720.0) * 240.0;
    assert!((controller.brightness_at(0.0) - expected).abs() < 1e-9);
    assert!((controller.brightness_at(840.0) - 55.0).abs() < 1e-9);
}

#[test]
fn test_edits_notify_owner_with_full_replacement() {
    let owner = SharedOwner::with(day_entries());
    let mut controller = ScheduleController::new(Box::new(owner.clone()));

    controller.add_point(720.0, 100.0);
    controller.move_point(0, 420.0, 10.0);
    controller.delete_point(1);

    let entries = owner.snapshot();
    assert_eq!(*owner.updates.borrow(), 3);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].time.as_deref(), Some("07:00"));
    assert_eq!(entries[1].time.as_deref(), Some("12:00"));
}

#[test]
fn test_delete_to_empty_samples_neutral() {
    let owner = SharedOwner::with(vec![ScheduleEntry::fixed("09:00", 70.0)]);
    let mut controller = ScheduleController::new(Box::new(owner.clone()));

    controller.delete_point(0);

    assert!(owner.snapshot().is_empty());
    assert_eq!(controller.brightness_at(300.0), 50.0);
}

#[test]
fn test_mock_owner_receives_update() {
    let mut owner = MockScheduleOwner::new();
    owner.expect_entries().return_const(day_entries());
    owner
        .expect_on_update()
        .withf(|entries: &Vec<ScheduleEntry>| {
            entries.len() == 3 && entries[2].time.as_deref() == Some("23:59")
        })
        .times(1)
        .return_const(());

    let mut controller = ScheduleController::new(Box::new(owner));
    controller.add_point(5000.0, 10.0);
}

#[test]
fn test_oracle_linked_point_follows_oracle() {
    let owner = SharedOwner::with(vec![
        ScheduleEntry::linked("sunrise", Some("07:00".to_string()), 80.0),
        ScheduleEntry::fixed("22:00", 10.0),
    ]);
    let oracle = StaticOracle::from_pairs([("sunrise", "5:30am")]);
    let mut controller = ScheduleController::new(Box::new(owner.clone())).with_oracle(
        Box::new(oracle),
        52.52,
        13.40,
    );

    assert_eq!(controller.points()[0].minute, 330);

    controller.move_point(0, 600.0, 80.0);
    let points = controller.points();
    assert_eq!(points[0].minute, 600);
    assert!(!points[0].is_oracle_linked);
}

#[test]
fn test_playback_runs_to_completion_and_ends_once() {
    let owner = SharedOwner::with(day_entries());
    let sink = RecordingSink::default();
    let mut controller = controller_with(&owner, &sink);

    assert!(controller.start_playback(ms(1_000)));
    let mut now = 1_000;
    while controller.is_playing() {
        now += 16;
        controller.frame(ms(now));
        assert!(now < 10_000, "playback never finished");
    }

    assert_eq!(controller.virtual_minute(), 0.0);
    assert_eq!(sink.count(&PreviewEvent::Start), 1);
    assert_eq!(sink.count(&PreviewEvent::End), 1);
    assert_eq!(sink.events().last(), Some(&PreviewEvent::End));

    // later stops and teardown do not repeat the end notification
    assert!(!controller.stop_playback());
    drop(controller);
    assert_eq!(sink.count(&PreviewEvent::End), 1);
}

#[test]
fn test_playback_previews_are_throttled() {
    let owner = SharedOwner::with(day_entries());
    let sink = RecordingSink::default();
    let mut controller = controller_with(&owner, &sink);

    controller.start_playback(ms(0));
    // 16 ms frames across 1 s: at most one preview per 50 ms window
    for frame in 1..=62 {
        controller.frame(ms(frame * 16));
    }

    let previews = sink
        .events()
        .iter()
        .filter(|e| matches!(e, PreviewEvent::Brightness(_)))
        .count();
    assert!((15..=21).contains(&previews), "got {previews} previews");
}

#[test]
fn test_cancel_token_ends_session() {
    let owner = SharedOwner::with(day_entries());
    let sink = RecordingSink::default();
    let mut controller = controller_with(&owner, &sink);

    controller.start_playback(ms(0));
    controller.frame(ms(16));
    controller.playback_token().cancel();

    assert_eq!(controller.frame(ms(32)), FrameOutcome::Cancelled);
    assert!(!controller.is_playing());
    assert_eq!(sink.count(&PreviewEvent::End), 1);
}

#[test]
fn test_stop_playback_is_idempotent() {
    let owner = SharedOwner::with(day_entries());
    let sink = RecordingSink::default();
    let mut controller = controller_with(&owner, &sink);

    assert!(!controller.stop_playback());
    controller.start_playback(ms(0));
    assert!(!controller.start_playback(ms(5)));
    assert!(controller.stop_playback());
    assert!(!controller.stop_playback());

    assert_eq!(sink.events(), vec![PreviewEvent::Start, PreviewEvent::End]);
}

#[test]
fn test_drop_during_playback_notifies_end() {
    let owner = SharedOwner::with(day_entries());
    let sink = RecordingSink::default();
    {
        let mut controller = controller_with(&owner, &sink);
        controller.start_playback(ms(0));
        controller.frame(ms(100));
    }
    assert_eq!(sink.count(&PreviewEvent::Start), 1);
    assert_eq!(sink.count(&PreviewEvent::End), 1);
}

#[test]
fn test_mock_sink_start_then_end() {
    let mut sink = MockPreviewSink::new();
    let mut seq = mockall::Sequence::new();
    sink.expect_on_preview_start()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    sink.expect_on_preview_end()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    sink.expect_on_preview_brightness().times(0);

    let mut controller = ScheduleController::new(Box::new(SharedOwner::with(day_entries())))
        .with_preview(Box::new(sink));
    controller.start_playback(ms(0));
    controller.stop_playback();
}

#[test]
fn test_drag_moves_point_and_releases_listeners() {
    let owner = SharedOwner::with(day_entries());
    let sink = RecordingSink::default();
    let mut host = counting_pointer();
    host.expect_detach().times(2).return_const(());

    let mut controller = controller_with(&owner, &sink).with_pointer(Box::new(host));

    assert!(controller.begin_drag(1));
    assert!(!controller.begin_drag(0));
    assert_eq!(controller.dragging_index(), Some(1));

    controller.drag_to(ms(0), 1260.0, 75.2);
    controller.drag_to(ms(20), 1270.0, 76.0);
    assert!(controller.end_drag());
    assert!(!controller.end_drag());

    let entries = owner.snapshot();
    assert_eq!(entries[1].time.as_deref(), Some("21:10"));
    assert_eq!(entries[1].brightness, 76.0);
    // second move fell inside the throttle window
    assert_eq!(sink.events(), vec![PreviewEvent::Brightness(75.0)]);
}

#[test]
fn test_drop_mid_drag_releases_listeners() {
    let mut host = counting_pointer();
    host.expect_detach().times(2).return_const(());

    let mut controller = ScheduleController::new(Box::new(SharedOwner::with(day_entries())))
        .with_pointer(Box::new(host));
    assert!(controller.begin_drag(0));
    drop(controller);
}

#[test]
fn test_begin_drag_without_pointer_host() {
    let mut controller = ScheduleController::new(Box::new(SharedOwner::with(day_entries())));
    assert!(!controller.begin_drag(0));
    assert!(!controller.is_dragging());
}

#[test]
fn test_drag_and_playback_share_throttle() {
    let owner = SharedOwner::with(day_entries());
    let sink = RecordingSink::default();
    let mut host = counting_pointer();
    host.expect_detach().times(2).return_const(());
    let mut controller = controller_with(&owner, &sink).with_pointer(Box::new(host));

    controller.start_playback(ms(0));
    controller.frame(ms(16));
    controller.begin_drag(0);
    controller.drag_to(ms(30), 500.0, 33.0);
    controller.frame(ms(70));

    let previews: Vec<PreviewEvent> = sink
        .events()
        .into_iter()
        .filter(|e| matches!(e, PreviewEvent::Brightness(_)))
        .collect();
    assert_eq!(previews.len(), 2);
    assert_ne!(previews[0], PreviewEvent::Brightness(33.0));

    controller.stop_playback();
    assert_eq!(controller.playback.state(), PlaybackState::Stopped);
    // the drag is still active and is released on drop
    assert!(controller.is_dragging());
}
