//! Browser side of the frame player: DOM lookups, image elements, listeners,
//! timers and canvas drawing. All decisions are delegated to
//! [`SequenceState`]; this module only moves data between it and the page.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    Window, window,
};

use crate::config::{PageIds, SequenceConfig};
use crate::sequence::SequenceState;
use crate::sequence::cover::CoverFit;
use crate::sequence::preload::LoadOutcome;
use crate::sequence::scroll::ScrollMetrics;

/// Optional page collaborators, looked up once. A `None` simply switches the
/// matching feature off.
struct PageElements {
    preloader: Option<HtmlElement>,
    load_progress: Option<HtmlElement>,
    percent_label: Option<HtmlElement>,
    hero: Option<Element>,
    scroll_progress: Option<HtmlElement>,
}

impl PageElements {
    fn resolve(doc: &Document, ids: &PageIds) -> Self {
        let by_id = |id: &str| {
            doc.get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        };
        let by_selector = |sel: &str| doc.query_selector(sel).ok().flatten();
        let page = Self {
            preloader: by_id(&ids.preloader),
            load_progress: by_id(&ids.load_progress),
            percent_label: by_id(&ids.percent_label),
            hero: by_selector(&ids.hero_selector),
            scroll_progress: by_selector(&ids.scroll_progress_selector)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        };
        if page.preloader.is_none() {
            log::debug!("no #{} element, preloader fade disabled", ids.preloader);
        }
        if page.hero.is_none() {
            log::debug!("no {} element, hero reveal disabled", ids.hero_selector);
        }
        page
    }

    fn show_load_progress(&self, percent: u32) {
        let text = format!("{}%", percent);
        if let Some(bar) = &self.load_progress {
            bar.style().set_property("width", &text).ok();
        }
        if let Some(label) = &self.percent_label {
            label.set_inner_text(&text);
        }
    }

    fn show_scroll_progress(&self, fraction: f64) {
        if let Some(bar) = &self.scroll_progress {
            bar.style()
                .set_property("width", &format!("{}%", fraction * 100.0))
                .ok();
        }
    }
}

struct Player {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: Vec<HtmlImageElement>,
    state: SequenceState,
    page: PageElements,
    started_ms: f64,
}

thread_local! {
    static PLAYER: std::cell::RefCell<Option<Player>> = const { std::cell::RefCell::new(None) };
}

pub fn start(config: SequenceConfig) -> Result<(), JsValue> {
    config.validate()?;
    if PLAYER.with(|cell| cell.borrow().is_some()) {
        return Err(JsValue::from_str("scroll sequence already started"));
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(&config.page.canvas)
        .ok_or_else(|| JsValue::from_str(&format!("no #{} canvas", config.page.canvas)))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;

    let page = PageElements::resolve(&doc, &config.page);
    let mut images = Vec::with_capacity(config.frame_count);
    for _ in 0..config.frame_count {
        images.push(HtmlImageElement::new()?);
    }

    let mut state = SequenceState::new(config);
    state.update_scroll(measure(&win, &doc));
    page.show_scroll_progress(state.fraction());
    log::info!(
        "scroll sequence: preloading {} frames, reveal after {}",
        state.frame_count(),
        state.config().effective_reveal_threshold()
    );

    let sources: Vec<String> = (1..=state.frame_count())
        .map(|number| state.frame_path(number))
        .collect();
    let handles = images.clone();

    // Scroll + resize both just re-measure and ask for a paint. Wired before the
    // player is installed so a failed registration leaves no half-started player.
    for event in ["scroll", "resize"] {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            on_viewport_change();
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    PLAYER.with(|cell| {
        cell.replace(Some(Player {
            canvas,
            ctx,
            images,
            state,
            page,
            started_ms: now_ms(),
        }))
    });

    // Handlers go on before `src` so no completion can slip past the counter.
    for (slot, (img, src)) in handles.iter().zip(sources).enumerate() {
        let on_load = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            on_frame_settled(slot, LoadOutcome::Loaded);
        }) as Box<dyn FnMut(_)>);
        let on_error = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            on_frame_settled(slot, LoadOutcome::Failed);
        }) as Box<dyn FnMut(_)>);
        img.set_onload(Some(on_load.as_ref().unchecked_ref()));
        img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();
        img.set_src(&src);
    }

    Ok(())
}

fn on_frame_settled(slot: usize, outcome: LoadOutcome) {
    let settled = PLAYER.with(|cell| {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            return None;
        };
        let player = guard.as_mut()?;
        let update = player.state.record_load(slot, outcome)?;
        if outcome == LoadOutcome::Failed {
            log::warn!(
                "frame {} failed to load ({}), it will be skipped",
                slot + 1,
                player.state.frame_path(slot + 1)
            );
        }
        player.page.show_load_progress(update.progress.percent);
        if update.progress.finished {
            let tracker = player.state.tracker();
            log::info!(
                "scroll sequence: {}/{} frames loaded ({} failed) in {:.0}ms",
                tracker.loaded(),
                tracker.total(),
                tracker.failed(),
                now_ms() - player.started_ms
            );
        }
        let reveal = update.progress.reveal.then(|| {
            (
                player.page.preloader.clone(),
                player.page.hero.clone(),
                player.state.config().clone(),
            )
        });
        Some((update.progress, update.is_current, reveal))
    });

    let Some((progress, is_current, reveal)) = settled else {
        return;
    };
    if let Some((preloader, hero, config)) = reveal {
        log::debug!("reveal threshold reached at {}%", progress.percent);
        if let Err(e) = schedule_reveal(preloader, hero, &config) {
            log::error!("preloader fade: {e:?}");
        }
    }
    if is_current {
        request_redraw();
    }
}

/// Two-stage fade: opacity first, then remove the overlay, paint the first
/// frame and activate the hero section.
fn schedule_reveal(
    preloader: Option<HtmlElement>,
    hero: Option<Element>,
    config: &SequenceConfig,
) -> Result<(), JsValue> {
    let removal_delay = config.removal_delay_ms;
    let hero_class = config.page.hero_active_class.clone();
    after(config.fade_delay_ms, move || {
        if let Some(el) = &preloader {
            el.style().set_property("opacity", "0").ok();
        }
        let removed = after(removal_delay, move || {
            if let Some(el) = &preloader {
                el.style().set_property("display", "none").ok();
            }
            request_redraw();
            if let Some(hero) = &hero {
                hero.class_list().add_1(&hero_class).ok();
            }
        });
        if let Err(e) = removed {
            log::error!("preloader removal: {e:?}");
        }
    })
}

fn on_viewport_change() {
    let Some(win) = window() else { return };
    let Some(doc) = win.document() else { return };
    let metrics = measure(&win, &doc);
    PLAYER.with(|cell| {
        if let Ok(mut guard) = cell.try_borrow_mut() {
            if let Some(player) = guard.as_mut() {
                player.state.update_scroll(metrics);
                player.page.show_scroll_progress(player.state.fraction());
            }
        }
    });
    request_redraw();
}

/// Ask for a paint on the next animation frame. Repeated calls before that
/// frame fires are absorbed by the scheduler.
fn request_redraw() {
    let needs_callback = PLAYER.with(|cell| {
        cell.try_borrow_mut()
            .ok()
            .and_then(|mut guard| guard.as_mut().map(|p| p.state.scheduler_mut().request()))
            .unwrap_or(false)
    });
    if !needs_callback {
        return;
    }
    let registered = window()
        .ok_or_else(|| JsValue::from_str("no window"))
        .and_then(|w| {
            let cb = Closure::once_into_js(move |_ts: f64| paint());
            w.request_animation_frame(cb.unchecked_ref())
        });
    if let Err(e) = registered {
        log::error!("requestAnimationFrame: {e:?}");
        // drop the pending flag so the next event can try again
        PLAYER.with(|cell| {
            if let Ok(mut guard) = cell.try_borrow_mut() {
                if let Some(player) = guard.as_mut() {
                    player.state.scheduler_mut().take();
                }
            }
        });
    }
}

fn paint() {
    let Some(win) = window() else { return };
    PLAYER.with(|cell| {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            return;
        };
        let Some(player) = guard.as_mut() else { return };
        if !player.state.scheduler_mut().take() {
            return;
        }
        if let Err(e) = draw_current(player, &win) {
            log::error!("render: {e:?}");
        }
    });
}

/// Draw the current frame if it is available; otherwise leave the canvas alone
/// so the previous frame stays up.
fn draw_current(player: &Player, win: &Window) -> Result<(), JsValue> {
    let Some(slot) = player.state.drawable_slot() else {
        return Ok(());
    };
    let Some(img) = player.images.get(slot) else {
        return Ok(());
    };
    if !img.complete() || img.natural_width() == 0 {
        return Ok(());
    }

    let width = viewport_dim(win.inner_width());
    let height = viewport_dim(win.inner_height());
    let Some(fit) = CoverFit::compute(
        width,
        height,
        img.natural_width() as f64,
        img.natural_height() as f64,
    ) else {
        return Ok(());
    };

    player.canvas.set_width(width as u32);
    player.canvas.set_height(height as u32);
    let ctx = &player.ctx;
    ctx.clear_rect(0.0, 0.0, width, height);

    let overlay = player.state.overlay();
    let blur = overlay.filter(|_| player.state.config().overlay.canvas_blur);
    if let Some(o) = &blur {
        ctx.set_filter(&o.filter());
    }
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, fit.x, fit.y, fit.width, fit.height)?;
    if blur.is_some() {
        ctx.set_filter("none");
    }

    if let Some(o) = overlay {
        ctx.set_fill_style_str(&o.fill_style());
        ctx.fill_rect(0.0, 0.0, width, height);
    }
    Ok(())
}

fn measure(win: &Window, doc: &Document) -> ScrollMetrics {
    // `scroll_y` keeps sub-pixel offsets; `Element::scroll_top` is an i32.
    let scroll_top = win.scroll_y().unwrap_or(0.0);
    let scroll_height = doc
        .document_element()
        .map(|root| root.scroll_height() as f64)
        .unwrap_or(0.0);
    ScrollMetrics::new(scroll_top, scroll_height, viewport_dim(win.inner_height()))
}

fn viewport_dim(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0)
}

fn after(ms: i32, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)?;
    Ok(())
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Current load percentage, `None` before `start` has run.
pub fn load_percent() -> Option<u32> {
    PLAYER.with(|cell| {
        let guard = cell.try_borrow().ok()?;
        Some(guard.as_ref()?.state.tracker().percent())
    })
}
