// crates/evolucion-core/src/header.rs
// Header scroll state and mobile menu state

/// Tracks whether the header should carry `.scrolled`
#[derive(Debug, Clone)]
pub struct ScrollEffect {
    threshold: f64,
    scrolled: bool,
}

impl ScrollEffect {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed the current scroll position. Returns the new state only when it
    /// changed, so the caller touches the DOM only on edges.
    pub fn update(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = scroll_y > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}

/// Open/closed state of the mobile navigation menu
#[derive(Debug, Clone)]
pub struct MobileMenu {
    open: bool,
    breakpoint: f64,
}

impl MobileMenu {
    pub fn new(breakpoint: f64) -> Self {
        Self {
            open: false,
            breakpoint,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu and return the new state
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the menu. Returns true if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Close when the viewport grows past the mobile breakpoint. Returns true
    /// if the menu was closed.
    pub fn close_for_width(&mut self, viewport_width: f64) -> bool {
        viewport_width > self.breakpoint && self.close()
    }
}
