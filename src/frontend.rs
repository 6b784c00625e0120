use js_sys::{Array, Math};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::{
    config::InteractionConfig,
    error::{require, MountError, MountResult},
    logging::{log_event, LogLevel},
    motion::{
        background_transform, cursor_origin, generate_shapes, is_in_viewport, pointer_fraction,
        scroll_progress, CursorLook, HoverEffect, HoverTarget, ParallaxTransform, Rect,
        RippleGeometry, ScrollBounce, StyleToggle, ANCHOR_LINKS, BACKGROUND_SELECTOR,
        BOUNCE_IN_CLASS, BOUNCE_IN_STYLE, BOUNCE_TARGETS, CURSOR_ACTIVE, CURSOR_CLASS, CURSOR_CSS,
        CURSOR_INTERACTIVE_TARGETS, CURSOR_REST, DYNAMIC_SHAPE_CLASSES, FADE_IN_DELAY_MS,
        FADE_IN_TRANSITION, HOME_PAGE_CLASS, HOVER_EFFECTS, KEYBOARD_FOCUS_STYLE,
        KEYBOARD_NAVIGATION_CLASS, REVEAL_HIDDEN_TRANSFORM, REVEAL_ROOT_MARGIN,
        REVEAL_SHOWN_TRANSFORM, REVEAL_TARGETS, REVEAL_THRESHOLD, REVEAL_TRANSITION,
        RIPPLE_KEYFRAMES, RIPPLE_STYLE_ID, RIPPLE_TARGETS, SHAPE_CONTAINER_SELECTOR,
        SHAPE_CLASS, TOOLTIP_ATTRIBUTE, TOOLTIP_CLASS, TOOLTIP_CSS, TOOLTIP_TARGETS,
        TYPING_CARET_ANIMATION, TYPING_CARET_BORDER, TYPING_CARET_LINGER_MS, TYPING_TARGET,
    },
    state::{ClassChange, PageState},
    timing::{reveal_delays, Throttle, TypingAnimation, TypingPhases, TypingStep},
};

type Mount = fn(&Page) -> MountResult<()>;

const FEATURES: [(&str, Mount); 12] = [
    ("parallax", mount_parallax),
    ("scroll_reveal", mount_scroll_reveal),
    ("hover_effects", mount_hover_effects),
    ("tooltips", mount_tooltips),
    ("custom_cursor", mount_custom_cursor),
    ("dynamic_shapes", mount_dynamic_shapes),
    ("typing", mount_typing),
    ("anchor_scroll", mount_anchor_scroll),
    ("fade_in", mount_fade_in),
    ("ripple", mount_ripple),
    ("scroll_effects", mount_scroll_effects),
    ("keyboard_navigation", mount_keyboard_navigation),
];

#[derive(Clone)]
struct Page {
    window: Window,
    document: Document,
    body: HtmlElement,
    config: InteractionConfig,
    state: Rc<RefCell<PageState>>,
}

impl Page {
    fn detect() -> MountResult<Self> {
        let window = require("window", window())?;
        let document = require("document", window.document())?;
        let body = require("body", document.body())?;
        let config = InteractionConfig::from_lookup(|name| body.get_attribute(name));

        Ok(Self {
            window,
            document,
            body,
            config,
            state: Rc::new(RefCell::new(PageState::default())),
        })
    }

    fn log(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        log_event(self.config.log_level, level, event, fields);
    }

    /// Logs the outcome of one mount and reports whether it attached.
    fn report(&self, feature: &str, result: MountResult<()>) -> bool {
        match result {
            Ok(()) => {
                self.log(
                    LogLevel::Debug,
                    "feature_mounted",
                    serde_json::json!({ "feature": feature }),
                );
                true
            }
            Err(err) => {
                self.log(
                    LogLevel::Debug,
                    "feature_inactive",
                    serde_json::json!({
                        "feature": feature,
                        "error_class": err.class(),
                        "reason": err.to_string(),
                    }),
                );
                false
            }
        }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> MountResult<Vec<Element>> {
        let nodes = self.document.query_selector_all(selector).map_err(dom)?;

        Ok((0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn create(&self, tag: &str) -> MountResult<Element> {
        self.document.create_element(tag).map_err(dom)
    }

    fn inject_style(&self, id: Option<&str>, css: &str) -> MountResult<()> {
        let head = require("head", self.document.head())?;
        let style = self.create("style")?;
        if let Some(id) = id {
            style.set_id(id);
        }
        style.set_text_content(Some(css));
        head.append_child(&style).map_err(dom)?;
        Ok(())
    }

    fn viewport_size(&self) -> (f64, f64) {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(1280.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(720.0);

        (width, height)
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn set_timeout<F>(&self, delay_ms: u32, callback: F) -> MountResult<()>
    where
        F: FnOnce() + 'static,
    {
        let callback = Closure::once_into_js(callback);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            )
            .map_err(dom)?;
        Ok(())
    }
}

fn dom(err: JsValue) -> MountError {
    MountError::dom(format!("{err:?}"))
}

/// Attaches `handler` for the page lifetime.
fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> MountResult<()>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(dom)?;
    closure.forget();
    Ok(())
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

fn set_css_text(element: &Element, css: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        element.style().set_css_text(css);
    }
}

fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.x(),
        top: rect.y(),
        width: rect.width(),
        height: rect.height(),
    }
}

fn mount_parallax(page: &Page) -> MountResult<()> {
    let handler_page = page.clone();

    listen(&page.window, "mousemove", move |event: MouseEvent| {
        let (width, height) = handler_page.viewport_size();
        let fraction_x = pointer_fraction(f64::from(event.client_x()), width);
        let fraction_y = pointer_fraction(f64::from(event.client_y()), height);

        // Re-queried per event so generated shapes join in.
        let shapes = handler_page.document.get_elements_by_class_name(SHAPE_CLASS);
        for index in 0..shapes.length() {
            if let Some(shape) = shapes.item(index) {
                let transform =
                    ParallaxTransform::for_shape(index as usize, fraction_x, fraction_y);
                set_style(&shape, "transform", &transform.to_css());
            }
        }
    })
}

fn mount_dynamic_shapes(page: &Page) -> MountResult<()> {
    let is_home = page.body.class_list().contains(HOME_PAGE_CLASS);
    let container = page.query(SHAPE_CONTAINER_SELECTOR);
    let count = page.state.borrow_mut().claim_shapes(
        is_home,
        container.is_some(),
        page.config.shape_count,
    )?;
    let container = require(SHAPE_CONTAINER_SELECTOR, container)?;

    let mut random = Math::random;
    for shape in generate_shapes(count, &mut random) {
        let bubble = page.create("div")?;
        bubble.set_class_name(DYNAMIC_SHAPE_CLASSES);
        set_css_text(&bubble, &shape.css_text());
        container.append_child(&bubble).map_err(dom)?;
    }

    Ok(())
}

fn mount_scroll_reveal(page: &Page) -> MountResult<()> {
    let targets = page.query_all(REVEAL_TARGETS)?;
    let stagger_ms = page.config.reveal_stagger_ms;
    let timer_page = page.clone();

    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let entries: Vec<IntersectionObserverEntry> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into().ok())
                .collect();
            let intersecting: Vec<bool> =
                entries.iter().map(|entry| entry.is_intersecting()).collect();

            for (entry, delay) in entries.iter().zip(reveal_delays(&intersecting, stagger_ms)) {
                let Some(delay) = delay else {
                    continue;
                };
                let target = entry.target();
                let _ = timer_page.set_timeout(delay, move || {
                    set_style(&target, "opacity", "1");
                    set_style(&target, "transform", REVEAL_SHOWN_TRANSFORM);
                    let _ = target.class_list().add_1(BOUNCE_IN_CLASS);
                });
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
            .map_err(dom)?;
    on_intersect.forget();

    for target in &targets {
        set_style(target, "opacity", "0");
        set_style(target, "transform", REVEAL_HIDDEN_TRANSFORM);
        set_style(target, "transition", REVEAL_TRANSITION);
        observer.observe(target);
    }

    page.inject_style(None, BOUNCE_IN_STYLE)
}

fn mount_hover_effects(page: &Page) -> MountResult<()> {
    for effect in HOVER_EFFECTS {
        let result = mount_hover_effect(page, effect);
        page.report(effect.name, result);
    }
    Ok(())
}

fn mount_hover_effect(page: &Page, effect: HoverEffect) -> MountResult<()> {
    match effect.target {
        HoverTarget::Page(selector) => {
            let target = require(selector, page.query(selector))?;
            let trigger = require(effect.trigger, page.query(effect.trigger))?;
            bind_hover(&trigger, effect.styles, move || Some(target.clone()))
        }
        HoverTarget::Child(selector) => {
            for trigger in page.query_all(effect.trigger)? {
                let item = trigger.clone();
                bind_hover(&trigger, effect.styles, move || {
                    item.query_selector(selector).ok().flatten()
                })?;
            }
            Ok(())
        }
    }
}

fn bind_hover<F>(trigger: &Element, styles: &'static [StyleToggle], resolve: F) -> MountResult<()>
where
    F: Fn() -> Option<Element> + Clone + 'static,
{
    let resolve_enter = resolve.clone();
    listen(trigger, "mouseenter", move |_: MouseEvent| {
        if let Some(target) = resolve_enter() {
            for toggle in styles {
                set_style(&target, toggle.property, toggle.active);
            }
        }
    })?;
    listen(trigger, "mouseleave", move |_: MouseEvent| {
        if let Some(target) = resolve() {
            for toggle in styles {
                set_style(&target, toggle.property, toggle.rest);
            }
        }
    })
}

fn mount_tooltips(page: &Page) -> MountResult<()> {
    for link in page.query_all(TOOLTIP_TARGETS)? {
        let tooltip = page.create("div")?;
        tooltip.set_class_name(TOOLTIP_CLASS);
        tooltip.set_text_content(link.get_attribute(TOOLTIP_ATTRIBUTE).as_deref());
        set_css_text(&tooltip, TOOLTIP_CSS);

        set_style(&link, "position", "relative");
        link.append_child(&tooltip).map_err(dom)?;

        let shown = tooltip.clone();
        listen(&link, "mouseenter", move |_: MouseEvent| {
            set_style(&shown, "opacity", "1");
        })?;
        listen(&link, "mouseleave", move |_: MouseEvent| {
            set_style(&tooltip, "opacity", "0");
        })?;
    }
    Ok(())
}

fn apply_cursor_look(cursor: &Element, look: CursorLook) {
    set_style(cursor, "transform", look.transform);
    set_style(cursor, "background", look.background);
}

fn mount_custom_cursor(page: &Page) -> MountResult<()> {
    let cursor = page.create("div")?;
    cursor.set_class_name(CURSOR_CLASS);
    set_css_text(&cursor, CURSOR_CSS);
    page.body.append_child(&cursor).map_err(dom)?;

    let follower = cursor.clone();
    listen(&page.document, "mousemove", move |event: MouseEvent| {
        let (left, top) = cursor_origin(f64::from(event.client_x()), f64::from(event.client_y()));
        set_style(&follower, "left", &format!("{left}px"));
        set_style(&follower, "top", &format!("{top}px"));
        set_style(&follower, "opacity", "1");
    })?;

    let hidden = cursor.clone();
    listen(&page.document, "mouseleave", move |_: MouseEvent| {
        set_style(&hidden, "opacity", "0");
    })?;
    let shown = cursor.clone();
    listen(&page.document, "mouseenter", move |_: MouseEvent| {
        set_style(&shown, "opacity", "1");
    })?;

    for element in page.query_all(CURSOR_INTERACTIVE_TARGETS)? {
        let active = cursor.clone();
        listen(&element, "mouseenter", move |_: MouseEvent| {
            apply_cursor_look(&active, CURSOR_ACTIVE);
        })?;
        let rest = cursor.clone();
        listen(&element, "mouseleave", move |_: MouseEvent| {
            apply_cursor_look(&rest, CURSOR_REST);
        })?;
    }

    Ok(())
}

fn mount_typing(page: &Page) -> MountResult<()> {
    let label = require(TYPING_TARGET, page.query(TYPING_TARGET))?;
    let phases = TypingPhases::split(page.config.typing_start_delay_ms);
    let typing_page = page.clone();

    // The label is blanked and shows its caret for the whole wait before
    // the first character lands.
    page.set_timeout(phases.clear_after_ms, move || {
        let typing = TypingAnimation::new(&label.text_content().unwrap_or_default());
        label.set_text_content(Some(""));
        set_style(&label, "border-right", TYPING_CARET_BORDER);
        set_style(&label, "animation", TYPING_CARET_ANIMATION);
        typing_page.log(
            LogLevel::Debug,
            "typing_start",
            serde_json::json!({
                "chars": typing.len(),
                "type_after_ms": phases.type_after_ms,
                "duration_ms": typing.total_duration_ms(typing_page.config.typing_interval_ms),
            }),
        );

        let next_page = typing_page.clone();
        let _ = typing_page.set_timeout(phases.type_after_ms, move || {
            type_next(next_page, label, typing)
        });
    })
}

/// Commits one character, then schedules the next step.
fn type_next(page: Page, label: Element, mut typing: TypingAnimation) {
    match typing.advance() {
        TypingStep::Typed(text) => {
            label.set_text_content(Some(&text));
            let interval_ms = page.config.typing_interval_ms;
            let next_page = page.clone();
            let _ = page.set_timeout(interval_ms, move || type_next(next_page, label, typing));
        }
        TypingStep::Finished => {
            let _ = page.set_timeout(TYPING_CARET_LINGER_MS, move || {
                set_style(&label, "border-right", "none");
                set_style(&label, "animation", "none");
            });
        }
    }
}

fn mount_anchor_scroll(page: &Page) -> MountResult<()> {
    for anchor in page.query_all(ANCHOR_LINKS)? {
        let scroll_page = page.clone();
        let link = anchor.clone();

        listen(&anchor, "click", move |event: MouseEvent| {
            event.prevent_default();
            let Some(target) = link
                .get_attribute("href")
                .and_then(|href| scroll_page.query(&href))
            else {
                return;
            };

            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?;
    }
    Ok(())
}

fn fade_in(page: &Page) {
    let body: &Element = &page.body;
    set_style(body, "opacity", "0");
    set_style(body, "transition", FADE_IN_TRANSITION);

    let shown = page.body.clone();
    let _ = page.set_timeout(FADE_IN_DELAY_MS, move || {
        set_style(&shown, "opacity", "1");
    });
}

fn mount_fade_in(page: &Page) -> MountResult<()> {
    if page.document.ready_state() == "complete" {
        fade_in(page);
        return Ok(());
    }

    let load_page = page.clone();
    listen(&page.window, "load", move |_: Event| fade_in(&load_page))
}

fn mount_ripple(page: &Page) -> MountResult<()> {
    for element in page.query_all(RIPPLE_TARGETS)? {
        let ripple_page = page.clone();
        listen(&element, "click", move |event: MouseEvent| {
            if let Err(err) = spawn_ripple(&ripple_page, &event) {
                ripple_page.log(
                    LogLevel::Debug,
                    "ripple_skipped",
                    serde_json::json!({ "error_class": err.class(), "reason": err.to_string() }),
                );
            }
        })?;
    }
    Ok(())
}

fn spawn_ripple(page: &Page, event: &MouseEvent) -> MountResult<()> {
    let host = require(
        "event.currentTarget",
        event
            .current_target()
            .and_then(|target| target.dyn_into::<Element>().ok()),
    )?;
    let geometry = RippleGeometry::from_click(
        element_rect(&host),
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    );
    let duration_ms = page.config.ripple_duration_ms;

    let ripple = page.create("span")?;
    set_css_text(&ripple, &geometry.css_text(duration_ms));
    ensure_ripple_keyframes(page)?;

    set_style(&host, "position", "relative");
    set_style(&host, "overflow", "hidden");
    host.append_child(&ripple).map_err(dom)?;

    page.set_timeout(duration_ms, move || ripple.remove())
}

fn ensure_ripple_keyframes(page: &Page) -> MountResult<()> {
    page.state.borrow_mut().ensure_ripple_styles(
        || page.document.get_element_by_id(RIPPLE_STYLE_ID).is_some(),
        || page.inject_style(Some(RIPPLE_STYLE_ID), RIPPLE_KEYFRAMES),
    )
}

fn mount_scroll_effects(page: &Page) -> MountResult<()> {
    let mut throttle = Throttle::new(page.config.scroll_throttle_ms);
    let scroll_page = page.clone();

    listen(&page.window, "scroll", move |_: Event| {
        if throttle.admit(scroll_page.now_ms()) {
            apply_scroll_effects(&scroll_page);
        }
    })
}

fn apply_scroll_effects(page: &Page) {
    let scrolled = page.window.scroll_y().unwrap_or(0.0);
    if let Some(background) = page.query(BACKGROUND_SELECTOR) {
        set_style(&background, "transform", &background_transform(scrolled));
    }

    let Ok(elements) = page.query_all(BOUNCE_TARGETS) else {
        return;
    };
    let (_, viewport_height) = page.viewport_size();

    for element in elements {
        let rect = element_rect(&element);
        if !is_in_viewport(rect, viewport_height) {
            continue;
        }
        let bounce = ScrollBounce::at(scroll_progress(rect.top, viewport_height));
        set_style(&element, "transform", &bounce.to_css());
    }
}

fn apply_class_change(element: &Element, class: &str, change: ClassChange) {
    let classes = element.class_list();
    let _ = match change {
        ClassChange::Add => classes.add_1(class),
        ClassChange::Remove => classes.remove_1(class),
        ClassChange::Keep => Ok(()),
    };
}

fn mount_keyboard_navigation(page: &Page) -> MountResult<()> {
    page.inject_style(None, KEYBOARD_FOCUS_STYLE)?;

    let key_page = page.clone();
    listen(&page.document, "keydown", move |event: KeyboardEvent| {
        let change = key_page.state.borrow_mut().on_key_down(&event.key());
        apply_class_change(&key_page.body, KEYBOARD_NAVIGATION_CLASS, change);
    })?;

    let pointer_page = page.clone();
    listen(&page.document, "mousedown", move |_: MouseEvent| {
        let change = pointer_page.state.borrow_mut().on_pointer_down();
        apply_class_change(&pointer_page.body, KEYBOARD_NAVIGATION_CLASS, change);
    })
}

fn start() {
    let page = match Page::detect() {
        Ok(page) => page,
        Err(err) => {
            log_event(
                LogLevel::Info,
                LogLevel::Info,
                "interactions_unavailable",
                serde_json::json!({ "reason": err.to_string() }),
            );
            return;
        }
    };

    page.log(
        LogLevel::Info,
        "interactions_start",
        serde_json::json!({
            "config": serde_json::to_value(&page.config).unwrap_or_default(),
        }),
    );

    let mounted = FEATURES
        .iter()
        .filter(|(feature, mount)| page.report(feature, mount(&page)))
        .count();

    page.log(
        LogLevel::Info,
        "interactions_ready",
        serde_json::json!({
            "mounted": mounted,
            "inactive": FEATURES.len() - mounted,
        }),
    );
}

pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() != "loading" {
        start();
        return;
    }

    let on_ready = Closure::once_into_js(start);
    let _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
}
