//! Declarative tag lifecycle against a live loader.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    sync::Arc,
    time::Duration,
};

use rstest::rstest;
use scriptorium::{Loader, Mounted, ScriptTag};
use scriptorium_dom::{InjectTarget, MemHost};

use crate::common::fixtures::rig;

async fn settle(mounted: Mounted) {
    match mounted {
        Mounted::External(handle) => {
            handle.await.unwrap();
        }
        Mounted::Inline(handle) => handle.await.unwrap(),
    }
}

#[rstest]
#[tokio::test]
async fn tag_attributes_pass_through_to_the_element(rig: (Loader, MemHost)) {
    let (loader, host) = rig;
    let tag = ScriptTag::external("widget.js")
        .with_script_type("module")
        .with_integrity("sha384-abc")
        .with_cross_origin("anonymous")
        .with_data_entry("feedId", "7")
        .with_parent(InjectTarget::node("widget"));

    settle(tag.mount(&loader)).await;

    let appended = host.appended();
    let el = &appended[0].element;
    assert_eq!(el.src.as_deref(), Some("widget.js"));
    assert_eq!(el.script_type.as_deref(), Some("module"));
    assert_eq!(el.integrity.as_deref(), Some("sha384-abc"));
    assert_eq!(el.cross_origin.as_deref(), Some("anonymous"));
    assert_eq!(el.data("feedId"), Some("7"));
    assert_eq!(appended[0].target, InjectTarget::node("widget"));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn immediate_tag_skips_the_queue(rig: (Loader, MemHost)) {
    let (loader, host) = rig;

    let slow = ScriptTag::external("slow.js").with_delay(Duration::from_millis(50));
    let fast = ScriptTag::external("fast.js").with_immediate();

    let slow_mounted = slow.mount(&loader);
    let fast_mounted = fast.mount(&loader);
    settle(fast_mounted).await;
    settle(slow_mounted).await;

    assert_eq!(host.appended_srcs(), vec!["fast.js", "slow.js"]);
}

#[rstest]
#[tokio::test]
async fn mount_unmount_cycle_reloads_fresh(rig: (Loader, MemHost)) {
    let (loader, host) = rig;
    let unloads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&unloads);
    let tag = ScriptTag::external("widget.js")
        .with_unload(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    settle(tag.mount(&loader)).await;
    assert!(loader.is_loaded("widget.js"));

    tag.unmount(&loader);
    assert_eq!(unloads.load(Ordering::SeqCst), 1);
    assert!(!loader.is_loaded("widget.js"));

    // A remount appends again instead of settling from cache.
    settle(tag.mount(&loader)).await;
    assert_eq!(host.append_count(), 2);
}

#[rstest]
#[tokio::test]
async fn inline_tag_injects_at_its_parent(rig: (Loader, MemHost)) {
    let (loader, host) = rig;
    let tag = ScriptTag::inline("console.log('hi')").with_parent(InjectTarget::node("footer"));

    settle(tag.mount(&loader)).await;

    let appended = host.appended();
    assert!(appended[0].element.is_inline());
    assert_eq!(
        appended[0].element.text.as_deref(),
        Some("console.log('hi')")
    );
    assert_eq!(appended[0].target, InjectTarget::node("footer"));
}
