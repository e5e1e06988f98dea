// crates/evolucion-core/src/carousel.rs
// Hero carousel state machine: slide index, transition lock, autoplay gating

use serde::Deserialize;
use thiserror::Error;

/// What happens past the last (or before the first) slide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Clamped: prev is disabled on the first slide, next on the last.
    Finite,
    /// Indices wrap modulo the slide count. Nothing is ever disabled.
    #[default]
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning { from: usize, to: usize },
}

/// An accepted index change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Why a request was dropped. These are expected no-ops, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("slide {index} is outside 0..{total}")]
    OutOfRange { index: usize, total: usize },

    #[error("slide {0} is already active")]
    AlreadyActive(usize),

    #[error("a transition is in flight")]
    Busy,

    #[error("no slide beyond the {0:?} end")]
    Boundary(Edge),

    #[error("autoplay is paused")]
    Paused,

    #[error("carousel is torn down")]
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

/// User or timer intent, before it is resolved to an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideCommand {
    Next,
    Prev,
    First,
    Last,
    GoTo(usize),
}

impl SlideCommand {
    /// Map a `KeyboardEvent.key` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(SlideCommand::Next),
            "ArrowLeft" => Some(SlideCommand::Prev),
            "Home" => Some(SlideCommand::First),
            "End" => Some(SlideCommand::Last),
            _ => None,
        }
    }

    /// Map a key pressed in `scope`. Arrows work anywhere on the page;
    /// Home/End only inside the slider so they keep scrolling the page
    /// elsewhere. Nothing is taken from text entry fields.
    pub fn for_key(key: &str, scope: KeyScope) -> Option<Self> {
        match (scope, Self::from_key(key)?) {
            (KeyScope::TextEntry, _) => None,
            (KeyScope::Page, SlideCommand::First | SlideCommand::Last) => None,
            (_, command) => Some(command),
        }
    }
}

/// Where a keydown was targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScope {
    Page,
    Slider,
    TextEntry,
}

impl KeyScope {
    /// Classify a keydown target from its tag name, its `isContentEditable`
    /// flag and whether it sits inside the slider.
    pub fn of_target(tag_name: &str, editable: bool, in_slider: bool) -> Self {
        let text_entry = editable
            || ["INPUT", "TEXTAREA", "SELECT"]
                .iter()
                .any(|tag| tag_name.eq_ignore_ascii_case(tag));

        if text_entry {
            KeyScope::TextEntry
        } else if in_slider {
            KeyScope::Slider
        } else {
            KeyScope::Page
        }
    }
}

/// Conditions that hold autoplay back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoplayGate {
    pub hovering: bool,
    pub document_hidden: bool,
}

impl AutoplayGate {
    pub fn is_open(&self) -> bool {
        !self.hovering && !self.document_hidden
    }
}

/// Disabled state of the prev/next controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Slide carousel state. At most one slide is current; `Transitioning`
/// lasts from an accepted index change until [`Carousel::complete`].
#[derive(Debug, Clone)]
pub struct Carousel {
    current: usize,
    total: usize,
    phase: Phase,
    wrap: WrapMode,
    halted: bool,
}

impl Carousel {
    pub fn new(total: usize, wrap: WrapMode) -> Self {
        Self {
            current: 0,
            total,
            phase: Phase::Idle,
            wrap,
            halted: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn is_current(&self, index: usize) -> bool {
        index == self.current
    }

    /// Start a transition to `index`. On rejection nothing changes.
    pub fn go_to(&mut self, index: usize) -> Result<Transition, Rejected> {
        if self.halted {
            return Err(Rejected::Halted);
        }
        if index >= self.total {
            return Err(Rejected::OutOfRange {
                index,
                total: self.total,
            });
        }
        if self.is_animating() {
            return Err(Rejected::Busy);
        }
        if index == self.current {
            return Err(Rejected::AlreadyActive(index));
        }

        let transition = Transition {
            from: self.current,
            to: index,
        };
        self.current = index;
        self.phase = Phase::Transitioning {
            from: transition.from,
            to: transition.to,
        };
        Ok(transition)
    }

    pub fn next(&mut self) -> Result<Transition, Rejected> {
        self.apply(SlideCommand::Next)
    }

    pub fn prev(&mut self) -> Result<Transition, Rejected> {
        self.apply(SlideCommand::Prev)
    }

    pub fn apply(&mut self, command: SlideCommand) -> Result<Transition, Rejected> {
        let target = self.target_of(command)?;
        self.go_to(target)
    }

    /// Resolve a command to a slide index without changing state
    pub fn target_of(&self, command: SlideCommand) -> Result<usize, Rejected> {
        if self.total == 0 {
            return Err(Rejected::OutOfRange {
                index: 0,
                total: 0,
            });
        }
        let last = self.total - 1;

        match command {
            SlideCommand::GoTo(index) => Ok(index),
            SlideCommand::First => Ok(0),
            SlideCommand::Last => Ok(last),
            SlideCommand::Next => match self.wrap {
                WrapMode::Finite if self.current == last => Err(Rejected::Boundary(Edge::Last)),
                _ => Ok((self.current + 1) % self.total),
            },
            SlideCommand::Prev => match self.wrap {
                WrapMode::Finite if self.current == 0 => Err(Rejected::Boundary(Edge::First)),
                _ => Ok((self.current + self.total - 1) % self.total),
            },
        }
    }

    /// Finish the in-flight transition. Returns it, or `None` when idle.
    pub fn complete(&mut self) -> Option<Transition> {
        match self.phase {
            Phase::Transitioning { from, to } => {
                self.phase = Phase::Idle;
                Some(Transition { from, to })
            }
            Phase::Idle => None,
        }
    }

    /// One autoplay timer tick. Always wraps, even in finite mode, so the
    /// show restarts after the last slide.
    pub fn autoplay_tick(&mut self, gate: AutoplayGate) -> Result<Transition, Rejected> {
        if self.halted {
            return Err(Rejected::Halted);
        }
        if self.is_animating() {
            return Err(Rejected::Busy);
        }
        if !gate.is_open() {
            return Err(Rejected::Paused);
        }
        if self.total == 0 {
            return Err(Rejected::OutOfRange {
                index: 0,
                total: 0,
            });
        }
        self.go_to((self.current + 1) % self.total)
    }

    pub fn controls(&self) -> Controls {
        match self.wrap {
            WrapMode::Wrap => Controls::default(),
            WrapMode::Finite => Controls {
                prev_disabled: self.current == 0,
                next_disabled: self.total == 0 || self.current + 1 >= self.total,
            },
        }
    }

    /// Inert idle state: drops any in-flight transition and rejects all
    /// further requests.
    pub fn halt(&mut self) {
        self.phase = Phase::Idle;
        self.halted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(carousel: &mut Carousel) {
        carousel.complete();
    }

    // ============================================================================
    // go_to tests
    // ============================================================================

    #[test]
    fn test_initial_state() {
        let carousel = Carousel::new(4, WrapMode::Wrap);
        assert_eq!(carousel.current(), 0);
        assert_eq!(carousel.phase(), Phase::Idle);
        assert!(carousel.is_current(0));
        assert!(!carousel.is_animating());
    }

    #[test]
    fn test_go_to_enters_transitioning() {
        let mut carousel = Carousel::new(4, WrapMode::Wrap);
        let transition = carousel.go_to(2).unwrap();
        assert_eq!(transition, Transition { from: 0, to: 2 });
        assert_eq!(carousel.current(), 2);
        assert_eq!(carousel.phase(), Phase::Transitioning { from: 0, to: 2 });
    }

    #[test]
    fn test_go_to_same_index_rejected() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        assert_eq!(carousel.go_to(0), Err(Rejected::AlreadyActive(0)));
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn test_go_to_out_of_range_rejected() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        assert_eq!(
            carousel.go_to(3),
            Err(Rejected::OutOfRange { index: 3, total: 3 })
        );
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn test_go_to_while_busy_rejected() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        carousel.go_to(1).unwrap();
        assert_eq!(carousel.go_to(2), Err(Rejected::Busy));
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn test_complete_returns_to_idle() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        carousel.go_to(1).unwrap();
        assert_eq!(carousel.complete(), Some(Transition { from: 0, to: 1 }));
        assert_eq!(carousel.phase(), Phase::Idle);
        assert_eq!(carousel.complete(), None);
    }

    // ============================================================================
    // next / prev tests
    // ============================================================================

    #[test]
    fn test_prev_wraps_from_first() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        assert_eq!(carousel.prev().unwrap().to, 2);
    }

    #[test]
    fn test_finite_mode_boundaries() {
        let mut carousel = Carousel::new(2, WrapMode::Finite);
        assert_eq!(carousel.prev(), Err(Rejected::Boundary(Edge::First)));
        carousel.next().unwrap();
        settled(&mut carousel);
        assert_eq!(carousel.next(), Err(Rejected::Boundary(Edge::Last)));
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn test_single_slide_next_is_noop() {
        let mut carousel = Carousel::new(1, WrapMode::Wrap);
        assert_eq!(carousel.next(), Err(Rejected::AlreadyActive(0)));
    }

    #[test]
    fn test_empty_carousel_rejects_everything() {
        let mut carousel = Carousel::new(0, WrapMode::Wrap);
        assert!(matches!(carousel.next(), Err(Rejected::OutOfRange { .. })));
        assert!(matches!(
            carousel.autoplay_tick(AutoplayGate::default()),
            Err(Rejected::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_first_and_last_commands() {
        let mut carousel = Carousel::new(5, WrapMode::Finite);
        assert_eq!(carousel.apply(SlideCommand::Last).unwrap().to, 4);
        settled(&mut carousel);
        assert_eq!(carousel.apply(SlideCommand::First).unwrap().to, 0);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(SlideCommand::from_key("ArrowLeft"), Some(SlideCommand::Prev));
        assert_eq!(SlideCommand::from_key("ArrowRight"), Some(SlideCommand::Next));
        assert_eq!(SlideCommand::from_key("Home"), Some(SlideCommand::First));
        assert_eq!(SlideCommand::from_key("End"), Some(SlideCommand::Last));
        assert_eq!(SlideCommand::from_key("Enter"), None);
    }

    #[test]
    fn test_arrows_work_without_slider_focus() {
        let page = KeyScope::of_target("BODY", false, false);
        assert_eq!(page, KeyScope::Page);
        assert_eq!(SlideCommand::for_key("ArrowRight", page), Some(SlideCommand::Next));
        assert_eq!(SlideCommand::for_key("ArrowLeft", page), Some(SlideCommand::Prev));
        assert_eq!(SlideCommand::for_key("Home", page), None);
        assert_eq!(SlideCommand::for_key("End", page), None);
    }

    #[test]
    fn test_home_end_inside_slider() {
        let slider = KeyScope::of_target("BUTTON", false, true);
        assert_eq!(slider, KeyScope::Slider);
        assert_eq!(SlideCommand::for_key("Home", slider), Some(SlideCommand::First));
        assert_eq!(SlideCommand::for_key("End", slider), Some(SlideCommand::Last));
        assert_eq!(SlideCommand::for_key("ArrowLeft", slider), Some(SlideCommand::Prev));
    }

    #[test]
    fn test_text_entry_keeps_its_keys() {
        for tag in ["INPUT", "textarea", "Select"] {
            let scope = KeyScope::of_target(tag, false, false);
            assert_eq!(scope, KeyScope::TextEntry, "{tag}");
            assert_eq!(SlideCommand::for_key("ArrowLeft", scope), None);
        }
        let editable = KeyScope::of_target("DIV", true, true);
        assert_eq!(SlideCommand::for_key("ArrowRight", editable), None);
    }

    // ============================================================================
    // Autoplay tests
    // ============================================================================

    #[test]
    fn test_autoplay_advances_when_open() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        let transition = carousel.autoplay_tick(AutoplayGate::default()).unwrap();
        assert_eq!(transition.to, 1);
    }

    #[test]
    fn test_autoplay_paused_by_hover() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        let gate = AutoplayGate {
            hovering: true,
            document_hidden: false,
        };
        assert_eq!(carousel.autoplay_tick(gate), Err(Rejected::Paused));
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn test_autoplay_wraps_in_finite_mode() {
        let mut carousel = Carousel::new(2, WrapMode::Finite);
        carousel.go_to(1).unwrap();
        settled(&mut carousel);
        let transition = carousel.autoplay_tick(AutoplayGate::default()).unwrap();
        assert_eq!(transition.to, 0);
    }

    // ============================================================================
    // Controls and teardown tests
    // ============================================================================

    #[test]
    fn test_controls_finite() {
        let mut carousel = Carousel::new(3, WrapMode::Finite);
        assert_eq!(
            carousel.controls(),
            Controls {
                prev_disabled: true,
                next_disabled: false
            }
        );
        carousel.go_to(2).unwrap();
        assert_eq!(
            carousel.controls(),
            Controls {
                prev_disabled: false,
                next_disabled: true
            }
        );
    }

    #[test]
    fn test_controls_wrap_never_disabled() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        assert_eq!(carousel.controls(), Controls::default());
        carousel.go_to(2).unwrap();
        assert_eq!(carousel.controls(), Controls::default());
    }

    #[test]
    fn test_halt_is_inert() {
        let mut carousel = Carousel::new(3, WrapMode::Wrap);
        carousel.go_to(1).unwrap();
        carousel.halt();
        assert_eq!(carousel.phase(), Phase::Idle);
        assert!(carousel.is_halted());
        assert_eq!(carousel.go_to(2), Err(Rejected::Halted));
        assert_eq!(
            carousel.autoplay_tick(AutoplayGate::default()),
            Err(Rejected::Halted)
        );
        assert_eq!(carousel.current(), 1);
    }
}
