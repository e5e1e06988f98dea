// crates/evolucion-app/src/carousel.rs
// Hero carousel: drives the slide state machine over the slider markup

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

use evolucion_core::config::CarouselConfig;
use evolucion_core::{AutoplayGate, Carousel, KeyScope, SiteError, SlideCommand, Transition};

use crate::dom::{self, ListenerSet};

const ROOT: &str = ".hero-slider";
const SLIDE: &str = ".slide";
const INDICATORS: &str = ".slider-dots";
const INDICATOR: &str = ".slider-dot";
const PREV: &str = ".slider-arrow--prev";
const NEXT: &str = ".slider-arrow--next";

// ============================================================================
// Markup
// ============================================================================

struct CarouselMarkup {
    root: Element,
    slides: Vec<Element>,
    indicators: Vec<Element>,
    prev: Element,
    next: Element,
}

impl CarouselMarkup {
    /// Collect every node the carousel needs. Nothing on the page is changed
    /// unless all of them are present.
    fn find(document: &Document) -> Result<Self, SiteError> {
        let missing = |selector: &str| SiteError::MissingMarkup(selector.to_string());

        let root = dom::find(document, ROOT).ok_or_else(|| missing(ROOT))?;
        let slides = dom::find_all_in(&root, SLIDE);
        if slides.is_empty() {
            return Err(missing(SLIDE));
        }
        let dots = dom::find(document, INDICATORS).ok_or_else(|| missing(INDICATORS))?;
        let prev = dom::find(document, PREV).ok_or_else(|| missing(PREV))?;
        let next = dom::find(document, NEXT).ok_or_else(|| missing(NEXT))?;

        let mut indicators = dom::find_all_in(&dots, INDICATOR);
        if indicators.is_empty() {
            indicators = build_indicators(document, &dots, slides.len())?;
        }
        if indicators.len() != slides.len() {
            return Err(SiteError::IndicatorMismatch {
                slides: slides.len(),
                indicators: indicators.len(),
            });
        }

        Ok(Self {
            root,
            slides,
            indicators,
            prev,
            next,
        })
    }
}

fn build_indicators(
    document: &Document,
    container: &Element,
    count: usize,
) -> Result<Vec<Element>, SiteError> {
    (0..count)
        .map(|index| {
            let dot = document.create_element("button").map_err(dom::js_error)?;
            dot.set_class_name("slider-dot");
            dom::set_attr(&dot, "type", "button");
            dom::set_attr(&dot, "aria-label", &format!("Ir a diapositiva {}", index + 1));
            dot.set_inner_html(&format!(
                "<span class=\"sr-only\">Diapositiva {}</span>",
                index + 1
            ));
            container.append_child(&dot).map_err(dom::js_error)?;
            Ok(dot)
        })
        .collect()
}

/// Fallback when the carousel cannot run: first slide visible, nothing wired
fn show_first_slide(document: &Document) {
    let slides = dom::find_all(document, SLIDE);
    for (index, slide) in slides.iter().enumerate() {
        dom::set_class(slide, "active", index == 0);
        dom::set_flag(slide, "aria-hidden", index != 0);
    }
}

// ============================================================================
// Controller
// ============================================================================

struct CarouselInner {
    machine: Carousel,
    markup: CarouselMarkup,
    config: CarouselConfig,
    gate: AutoplayGate,
    autoplay: Option<Interval>,
    /// Completion timer of the latest transition. Left in place after it
    /// fires and replaced by the next transition.
    settle: Option<Timeout>,
    listeners: ListenerSet,
}

impl CarouselInner {
    fn render_slides(&self) {
        for (index, slide) in self.markup.slides.iter().enumerate() {
            let active = self.machine.is_current(index);
            dom::set_class(slide, "active", active);
            dom::set_flag(slide, "aria-hidden", !active);
        }
    }

    fn render_transition(&self, transition: Transition) {
        if let Some(slide) = self.markup.slides.get(transition.from) {
            dom::set_class(slide, "active", false);
            dom::set_flag(slide, "aria-hidden", true);
        }
        if let Some(slide) = self.markup.slides.get(transition.to) {
            dom::set_class(slide, "active", true);
            dom::set_flag(slide, "aria-hidden", false);
        }
    }

    /// Indicators and prev/next state, refreshed once a transition settles
    fn render_derived(&self) {
        for (index, dot) in self.markup.indicators.iter().enumerate() {
            let selected = self.machine.is_current(index);
            dom::set_class(dot, "active", selected);
            dom::set_flag(dot, "aria-selected", selected);
        }

        let controls = self.machine.controls();
        set_disabled(&self.markup.prev, controls.prev_disabled);
        set_disabled(&self.markup.next, controls.next_disabled);
    }
}

fn set_disabled(control: &Element, disabled: bool) {
    dom::set_class(control, "disabled", disabled);
    dom::set_flag(control, "aria-disabled", disabled);
    if disabled {
        dom::set_attr(control, "disabled", "");
    } else {
        let _ = control.remove_attribute("disabled");
    }
}

/// A running hero carousel. Dropping it (or calling `teardown`) cancels its
/// timers and removes its listeners.
pub struct HeroCarousel {
    shared: Rc<RefCell<CarouselInner>>,
}

impl HeroCarousel {
    /// Start the carousel if the page has one. Incomplete markup leaves the
    /// first slide showing statically and returns `None`.
    pub fn mount(document: &Document, config: &CarouselConfig) -> Option<Self> {
        if dom::find(document, ROOT).is_none() && dom::find(document, SLIDE).is_none() {
            log::debug!("No hero carousel on this page");
            return None;
        }

        match CarouselMarkup::find(document) {
            Ok(markup) => Some(Self::start(document, markup, config.clone())),
            Err(e) => {
                if e.is_markup() {
                    log::warn!("Hero carousel not initialized: {}", e);
                } else {
                    log::error!("Hero carousel failed to start: {}", e);
                }
                show_first_slide(document);
                None
            }
        }
    }

    fn start(document: &Document, markup: CarouselMarkup, config: CarouselConfig) -> Self {
        let total = markup.slides.len();
        let shared = Rc::new(RefCell::new(CarouselInner {
            machine: Carousel::new(total, config.wrap),
            markup,
            config,
            gate: AutoplayGate {
                hovering: false,
                document_hidden: document.hidden(),
            },
            autoplay: None,
            settle: None,
            listeners: ListenerSet::new(),
        }));

        {
            let inner = shared.borrow();
            inner.render_slides();
            inner.render_derived();
        }
        wire(&shared);
        start_autoplay(&shared);

        log::info!("Hero carousel ready with {} slides", total);
        Self { shared }
    }

    pub fn current(&self) -> usize {
        self.shared.borrow().machine.current()
    }

    pub fn teardown(&self) {
        let mut inner = self.shared.borrow_mut();
        inner.autoplay = None;
        inner.settle = None;
        inner.listeners.clear();
        inner.machine.halt();
        log::info!("Hero carousel torn down");
    }
}

fn wire(shared: &Rc<RefCell<CarouselInner>>) {
    let weak = Rc::downgrade(shared);
    let mut listeners = ListenerSet::new();

    let (root, prev, next, indicators, pause_on_hover) = {
        let inner = shared.borrow();
        (
            inner.markup.root.clone(),
            inner.markup.prev.clone(),
            inner.markup.next.clone(),
            inner.markup.indicators.clone(),
            inner.config.pause_on_hover,
        )
    };

    listeners.listen(&prev, "click", on_command(&weak, SlideCommand::Prev));
    listeners.listen(&next, "click", on_command(&weak, SlideCommand::Next));
    for (index, dot) in indicators.iter().enumerate() {
        listeners.listen(dot, "click", on_command(&weak, SlideCommand::GoTo(index)));
    }

    // Focusable so Home/End can reach it
    if !root.has_attribute("tabindex") {
        dom::set_attr(&root, "tabindex", "0");
    }
    if let Ok(document) = dom::document() {
        let keys = weak.clone();
        let slider = root.clone();
        listeners.listen(&document, "keydown", move |event: Event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key_event.alt_key() || key_event.ctrl_key() || key_event.meta_key() {
                return;
            }
            let scope = key_scope(&event, &slider);
            if let (Some(command), Some(shared)) =
                (SlideCommand::for_key(&key_event.key(), scope), keys.upgrade())
            {
                if scope == KeyScope::Slider {
                    event.prevent_default();
                }
                user_command(&shared, command);
            }
        });
    }

    if pause_on_hover {
        listeners.listen(&root, "mouseenter", on_gate(&weak, |gate| gate.hovering = true));
        listeners.listen(&root, "mouseleave", on_gate(&weak, |gate| gate.hovering = false));
    }

    if let Ok(document) = dom::document() {
        let visibility = weak.clone();
        let doc = document.clone();
        listeners.listen(&document, "visibilitychange", move |_: Event| {
            if let Some(shared) = visibility.upgrade() {
                let hidden = doc.hidden();
                update_gate(&shared, |gate| gate.document_hidden = hidden);
            }
        });
    }

    shared.borrow_mut().listeners = listeners;
}

fn key_scope(event: &Event, slider: &Element) -> KeyScope {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return KeyScope::Page;
    };
    let editable = target
        .dyn_ref::<HtmlElement>()
        .is_some_and(|el| el.is_content_editable());
    KeyScope::of_target(&target.tag_name(), editable, slider.contains(Some(target.as_ref())))
}

fn on_command(weak: &Weak<RefCell<CarouselInner>>, command: SlideCommand) -> impl FnMut(Event) + 'static {
    let weak = weak.clone();
    move |_: Event| {
        if let Some(shared) = weak.upgrade() {
            user_command(&shared, command);
        }
    }
}

fn on_gate(
    weak: &Weak<RefCell<CarouselInner>>,
    change: fn(&mut AutoplayGate),
) -> impl FnMut(Event) + 'static {
    let weak = weak.clone();
    move |_: Event| {
        if let Some(shared) = weak.upgrade() {
            update_gate(&shared, change);
        }
    }
}

fn update_gate(shared: &Rc<RefCell<CarouselInner>>, change: impl FnOnce(&mut AutoplayGate)) {
    let open = {
        let mut inner = shared.borrow_mut();
        change(&mut inner.gate);
        inner.gate.is_open()
    };
    if open {
        start_autoplay(shared);
    } else {
        shared.borrow_mut().autoplay = None;
        log::debug!("Hero autoplay paused");
    }
}

/// Clicks and keys: apply the command, then restart the autoplay countdown
fn user_command(shared: &Rc<RefCell<CarouselInner>>, command: SlideCommand) {
    let result = shared.borrow_mut().machine.apply(command);
    match result {
        Ok(transition) => {
            begin_transition(shared, transition);
            start_autoplay(shared);
        }
        Err(rejected) => log::debug!("Slide change ignored ({:?}): {}", command, rejected),
    }
}

fn begin_transition(shared: &Rc<RefCell<CarouselInner>>, transition: Transition) {
    let weak = Rc::downgrade(shared);
    let mut inner = shared.borrow_mut();
    inner.render_transition(transition);

    let duration = inner.config.transition_ms;
    inner.settle = Some(Timeout::new(duration, move || {
        if let Some(shared) = weak.upgrade() {
            finish_transition(&shared);
        }
    }));
    log::debug!("Slide {} -> {}", transition.from + 1, transition.to + 1);
}

fn finish_transition(shared: &Rc<RefCell<CarouselInner>>) {
    let mut inner = shared.borrow_mut();
    if inner.machine.complete().is_some() {
        inner.render_derived();
    }
}

/// (Re)create the autoplay interval. The previous one is cancelled on drop.
fn start_autoplay(shared: &Rc<RefCell<CarouselInner>>) {
    let weak = Rc::downgrade(shared);
    let mut inner = shared.borrow_mut();
    if inner.machine.is_halted() || !inner.gate.is_open() {
        inner.autoplay = None;
        return;
    }

    let delay = inner.config.autoplay_delay_ms.max(1);
    inner.autoplay = Some(Interval::new(delay, move || {
        if let Some(shared) = weak.upgrade() {
            autoplay_tick(&shared);
        }
    }));
}

fn autoplay_tick(shared: &Rc<RefCell<CarouselInner>>) {
    let result = {
        let mut inner = shared.borrow_mut();
        let gate = inner.gate;
        inner.machine.autoplay_tick(gate)
    };
    match result {
        Ok(transition) => begin_transition(shared, transition),
        Err(rejected) => log::debug!("Autoplay skipped: {}", rejected),
    }
}
