//! Cache, reload, options passthrough, delay, unload.

use std::time::Duration;

use rstest::rstest;
use scriptorium::{LoadError, LoadOptions, Loader};
use scriptorium_dom::{InjectTarget, MemHost};

use crate::common::fixtures::{rig, tracing_setup};

#[rstest]
#[tokio::test]
async fn at_most_one_load_per_identifier(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    // Two pending requests for the same identifier, no reload.
    let first = loader.load("x.js", LoadOptions::default());
    let second = loader.load("x.js", LoadOptions::default());

    assert_eq!(first.await.unwrap(), "x.js");
    assert_eq!(second.await.unwrap(), "x.js");
    assert_eq!(host.append_count(), 1);
}

#[rstest]
#[tokio::test]
async fn reload_forces_a_second_append(rig: (Loader, MemHost), #[from(tracing_setup)] _tracing: ()) {
    let (loader, host) = rig;

    loader.load("x.js", LoadOptions::default()).await.unwrap();
    loader
        .load("x.js", LoadOptions::new().with_reload())
        .await
        .unwrap();

    assert_eq!(host.append_count(), 2);
    assert!(loader.is_loaded("x.js"));
}

#[rstest]
#[tokio::test]
async fn reload_applies_to_that_call_only(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    loader.load("x.js", LoadOptions::default()).await.unwrap();
    loader
        .load("x.js", LoadOptions::new().with_reload())
        .await
        .unwrap();
    // Cached again after the forced refetch.
    loader.load("x.js", LoadOptions::default()).await.unwrap();

    assert_eq!(host.append_count(), 2);
}

#[rstest]
#[tokio::test]
async fn data_entries_become_dashed_attributes(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    loader
        .load("x.js", LoadOptions::new().with_data_entry("feedId", "7"))
        .await
        .unwrap();

    let appended = host.appended();
    let attrs: Vec<_> = appended[0].element.data_attributes().collect();
    assert_eq!(attrs, vec![("data-feed-id".to_string(), "7")]);
}

#[rstest]
#[tokio::test]
async fn passthrough_attributes_land_on_the_element(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    loader
        .load(
            "x.js",
            LoadOptions::new()
                .with_script_type("module")
                .with_integrity("sha384-abc")
                .with_cross_origin("anonymous")
                .with_parent(InjectTarget::node("sidebar")),
        )
        .await
        .unwrap();

    let appended = host.appended();
    let el = &appended[0].element;
    assert_eq!(el.src.as_deref(), Some("x.js"));
    assert_eq!(el.script_type.as_deref(), Some("module"));
    assert_eq!(el.integrity.as_deref(), Some("sha384-abc"));
    assert_eq!(el.cross_origin.as_deref(), Some("anonymous"));
    assert!(!el.async_exec);
    assert_eq!(appended[0].target, InjectTarget::node("sidebar"));
}

#[rstest]
#[tokio::test]
async fn parent_defaults_to_the_head(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    loader.load("x.js", LoadOptions::default()).await.unwrap();

    assert_eq!(host.appended()[0].target, InjectTarget::Head);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn delay_holds_back_the_append(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    let begun = tokio::time::Instant::now();
    loader
        .load("x.js", LoadOptions::new().with_delay(Duration::from_millis(50)))
        .await
        .unwrap();

    let appended_at = host.appended()[0].at;
    assert!(appended_at - begun >= Duration::from_millis(50));
}

#[rstest]
#[tokio::test]
async fn unload_makes_the_next_load_fresh(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    loader.load("x.js", LoadOptions::default()).await.unwrap();
    assert!(loader.unload("x.js"));
    loader.load("x.js", LoadOptions::default()).await.unwrap();

    assert_eq!(host.append_count(), 2);
}

#[rstest]
#[tokio::test]
async fn failure_surfaces_on_the_specific_handle(rig: (Loader, MemHost)) {
    let (loader, host) = rig;
    host.fail_src("bad.js");

    let err = loader
        .load("bad.js", LoadOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.src(), Some("bad.js"));
    assert!(matches!(err, LoadError::Failed { .. }));
    assert!(err.to_string().contains("bad.js"));
    assert!(!loader.is_loaded("bad.js"));
}

#[rstest]
#[tokio::test]
async fn inline_content_is_wrapped_and_injected(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    loader
        .load_inline(
            "window.ready = true;",
            LoadOptions::new().with_parent(InjectTarget::node("widget")),
        )
        .await
        .unwrap();

    let appended = host.appended();
    assert_eq!(appended.len(), 1);
    let el = &appended[0].element;
    assert!(el.is_inline());
    assert_eq!(el.text.as_deref(), Some("window.ready = true;"));
    assert_eq!(el.script_type.as_deref(), Some("text/javascript"));
    assert_eq!(appended[0].target, InjectTarget::node("widget"));
}
