use std::sync::{Arc, Mutex};

use client_core::{
    keyboard::Event, AppContext, BoundaryView, KeyCombo, KeyboardEvent, Settings,
};

fn log_into(
    log: &Arc<Mutex<Vec<String>>>,
    entry: &'static str,
) -> impl Fn(&mut KeyboardEvent) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |_| log.lock().expect("log").push(entry.to_string())
}

struct DinnerForm {
    _save: client_core::HandlerGuard<KeyboardEvent>,
}

struct ConfirmModal {
    _save: client_core::HandlerGuard<KeyboardEvent>,
    _cancel: client_core::HandlerGuard<KeyboardEvent>,
}

fn press(ctx: &AppContext, combo: &str) -> KeyboardEvent {
    let mut event = combo.parse::<KeyCombo>().expect("combo").key_down_event();
    ctx.dispatch_key(&mut event);
    event
}

#[test]
fn modal_owns_ctrl_s_until_closed() {
    let ctx = AppContext::new(Settings::default()).expect("context");
    let log = Arc::new(Mutex::new(Vec::new()));

    let _form = DinnerForm {
        _save: ctx.save.push_scoped(log_into(&log, "form saved")),
    };

    let modal = ConfirmModal {
        _save: ctx.save.push_scoped(log_into(&log, "modal saved")),
        _cancel: ctx.cancel.push_scoped(log_into(&log, "modal cancelled")),
    };

    assert!(press(&ctx, "ctrl+s").default_prevented());
    assert!(press(&ctx, "escape").default_prevented());

    drop(modal);

    assert!(press(&ctx, "ctrl+s").default_prevented());
    let escape = press(&ctx, "escape");
    assert!(!escape.default_prevented(), "nobody owns escape any more");

    assert_eq!(
        *log.lock().expect("log"),
        vec!["modal saved", "modal cancelled", "form saved"]
    );
}

#[test]
fn unrelated_keys_keep_their_default_action() {
    let ctx = AppContext::new(Settings::default()).expect("context");
    let _form = ctx.save.push_scoped(|_| {});

    assert!(!press(&ctx, "s").default_prevented());
    assert!(!press(&ctx, "ctrl+p").default_prevented());
}

#[test]
fn detached_save_shortcut_lets_the_platform_handle_it() {
    let ctx = AppContext::new(Settings::default()).expect("context");
    let _form = ctx.save.push_scoped(|_| {});

    ctx.save.detach();
    assert!(!press(&ctx, "ctrl+s").default_prevented());

    ctx.save.attach();
    assert!(press(&ctx, "ctrl+s").default_prevented());
}

#[test]
fn boundary_reacts_to_reports_from_anywhere() {
    let ctx = AppContext::new(Settings::default()).expect("context");
    let boundary = ctx.install_boundary();
    let shadow = ctx.install_boundary();

    ctx.errors.report(client_core::ReportedError::Unauthenticated);
    assert_eq!(boundary.view(), BoundaryView::Login);
    assert_eq!(shadow.view(), BoundaryView::Healthy);

    assert!(boundary.complete_login());
    ctx.errors
        .report(client_core::ReportedError::message("Unknown error occurred"));
    assert_eq!(
        boundary.view(),
        BoundaryView::Crashed("Unknown error occurred".to_string())
    );
}
