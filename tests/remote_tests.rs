use rtunnellogger::core::remote::{
    ButtonMap, Dispatch, KeepAliveTrack, RemoteCommand, RemoteCommandRouter,
};
use rtunnellogger::errors::AppError;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

mod common;
use common::{FakeMedia, Recorder};

fn router(buttons: ButtonMap) -> (RemoteCommandRouter, Recorder) {
    let media = Recorder::default();
    let r = RemoteCommandRouter::new(
        0.5,
        buttons,
        KeepAliveTrack::Silence,
        Box::new(FakeMedia(media.clone())),
    );
    (r, media)
}

fn counter(r: &mut RemoteCommandRouter, command: RemoteCommand) -> Arc<AtomicUsize> {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    r.bind(command, move || {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    hits
}

#[test]
fn each_press_invokes_its_handler_once() {
    let (mut r, _) = router(ButtonMap::default());
    let toggles = counter(&mut r, RemoteCommand::Toggle);
    let undos = counter(&mut r, RemoteCommand::Undo);
    r.set_active(true);

    for code in [103, 104, 109, 103, 105, 106, 7] {
        r.on_button_event(code);
    }
    assert_eq!(toggles.load(Ordering::SeqCst), 2);
    assert_eq!(undos.load(Ordering::SeqCst), 2);
}

#[test]
fn inactive_router_ignores_every_code() {
    let (mut r, media) = router(ButtonMap::default());
    let toggles = counter(&mut r, RemoteCommand::Toggle);
    let ups = counter(&mut r, RemoteCommand::VolumeUp);

    for code in -5..300 {
        assert_eq!(r.on_button_event(code), Dispatch::Inactive);
    }
    assert_eq!(r.on_volume_changed(0.9), Dispatch::Inactive);

    r.set_active(true);
    r.set_active(false);
    assert_eq!(r.on_button_event(103), Dispatch::Inactive);

    assert_eq!(toggles.load(Ordering::SeqCst), 0);
    assert_eq!(ups.load(Ordering::SeqCst), 0);
    assert_eq!(media.all(), vec!["begin", "play Silence", "end", "stop"]);
}

#[test]
fn injected_codes_replace_hardware_defaults() {
    let (mut r, _) = router(ButtonMap {
        toggle: vec![1],
        undo: vec![2, 3],
        back: vec![],
    });
    let toggles = counter(&mut r, RemoteCommand::Toggle);
    r.set_active(true);

    assert_eq!(r.on_button_event(103), Dispatch::Ignored);
    assert_eq!(r.on_button_event(1), Dispatch::Handled(RemoteCommand::Toggle));
    assert_eq!(r.on_button_event(3), Dispatch::Unbound(RemoteCommand::Undo));
    assert_eq!(toggles.load(Ordering::SeqCst), 1);
}

#[test]
fn volume_direction_selects_handler_and_relocks() {
    let (mut r, media) = router(ButtonMap::default());
    let ups = counter(&mut r, RemoteCommand::VolumeUp);
    let downs = counter(&mut r, RemoteCommand::VolumeDown);
    r.set_active(true);
    media.clear();

    assert_eq!(r.on_volume_changed(0.5625), Dispatch::Handled(RemoteCommand::VolumeUp));
    assert_eq!(r.on_volume_changed(0.4375), Dispatch::Handled(RemoteCommand::VolumeDown));
    assert_eq!(r.on_volume_changed(0.5), Dispatch::Ignored);

    assert_eq!(ups.load(Ordering::SeqCst), 1);
    assert_eq!(downs.load(Ordering::SeqCst), 1);
    assert_eq!(media.all(), vec!["volume 0.5", "volume 0.5"]);
}

#[test]
fn erroring_handler_is_reported_not_propagated() {
    let (mut r, _) = router(ButtonMap::default());
    r.bind(RemoteCommand::Toggle, || Err(AppError::Handler("boom".into())));
    let undos = counter(&mut r, RemoteCommand::Undo);
    r.set_active(true);

    assert_eq!(r.on_button_event(103), Dispatch::Failed(RemoteCommand::Toggle));
    assert_eq!(r.on_button_event(104), Dispatch::Handled(RemoteCommand::Undo));
    assert_eq!(undos.load(Ordering::SeqCst), 1);
}

#[test]
fn unbinding_leaves_command_unassigned() {
    let (mut r, _) = router(ButtonMap::default());
    let toggles = counter(&mut r, RemoteCommand::Toggle);
    r.unbind(RemoteCommand::Toggle);
    r.set_active(true);

    assert_eq!(r.on_button_event(103), Dispatch::Unbound(RemoteCommand::Toggle));
    assert_eq!(toggles.load(Ordering::SeqCst), 0);
}
