// Browser test for the full preload -> fade -> reveal path. Lives in its own
// binary because a started player stays installed for the page's lifetime.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn add(doc: &Document, tag: &str, id: Option<&str>, class: Option<&str>) -> HtmlElement {
    let el: HtmlElement = doc.create_element(tag).unwrap().dyn_into().unwrap();
    if let Some(id) = id {
        el.set_id(id);
    }
    if let Some(class) = class {
        el.set_class_name(class);
    }
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
async fn failed_frames_still_reveal_the_page() {
    let doc = web_sys::window().unwrap().document().unwrap();
    let cfg = r#"{
        "frame_count": 2,
        "reveal_threshold": 1,
        "frames": { "prefix": "missing-" },
        "page": { "canvas": "reveal-canvas" }
    }"#;

    // no canvas yet: the failed start must not leave a player behind
    assert!(scroll_sequence::start_sequence_with_config(cfg).is_err());
    assert_eq!(scroll_sequence::load_percent(), -1);

    let preloader = add(&doc, "div", Some("preloader"), None);
    let bar = add(&doc, "div", Some("load-progress"), None);
    let label = add(&doc, "span", Some("percent"), None);
    let hero = add(&doc, "section", None, Some("hero-section"));
    let scroll_bar = add(&doc, "div", None, Some("scroll-progress-bar"));
    add(&doc, "canvas", Some("reveal-canvas"), None);

    scroll_sequence::start_sequence_with_config(cfg).unwrap();
    assert_eq!(scroll_sequence::load_percent(), 0);
    assert!(scroll_sequence::start_sequence_with_config(cfg).is_err());
    // the test page does not scroll
    assert_eq!(scroll_bar.style().get_property_value("width").unwrap(), "0%");

    // both frames 404; fade (500ms) + removal (800ms) follow the first failure
    sleep(2000).await;

    assert_eq!(scroll_sequence::load_percent(), 100);
    assert_eq!(label.text_content().unwrap(), "100%");
    assert_eq!(bar.style().get_property_value("width").unwrap(), "100%");
    assert_eq!(preloader.style().get_property_value("opacity").unwrap(), "0");
    assert_eq!(preloader.style().get_property_value("display").unwrap(), "none");
    assert!(hero.class_list().contains("active"));
}
