use crate::particle::ShapeKind;

/// The "exploded" flag the field's expansion tracks.
///
/// There is no debounce: a toggle mid-transition simply redirects the
/// expansion target and the smoothing carries the reversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExplodeToggle {
    exploded: bool,
}

impl ExplodeToggle {
    pub fn new(exploded: bool) -> Self {
        Self { exploded }
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.exploded = !self.exploded;
        self.exploded
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }
}

/// What the pointer landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    Particle { shape: ShapeKind, index: usize },
    Trigger,
}

/// Receives hover feedback (e.g. to switch the cursor).
pub trait HoverObserver {
    fn on_hover_change(&mut self, hovered: bool);
}

impl<F: FnMut(bool)> HoverObserver for F {
    fn on_hover_change(&mut self, hovered: bool) {
        self(hovered)
    }
}

/// Observer that ignores hover changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHover;

impl HoverObserver for NoHover {
    fn on_hover_change(&mut self, _hovered: bool) {}
}

/// Routes pointer callbacks from the renderer to the toggle and the hover
/// observer.
pub struct PointerRouter<H: HoverObserver> {
    toggle: ExplodeToggle,
    hovered: Option<PickTarget>,
    observer: H,
}

impl<H: HoverObserver> PointerRouter<H> {
    pub fn new(observer: H) -> Self {
        Self {
            toggle: ExplodeToggle::default(),
            hovered: None,
            observer,
        }
    }

    pub fn toggle_state(&self) -> ExplodeToggle {
        self.toggle
    }

    pub fn is_exploded(&self) -> bool {
        self.toggle.is_exploded()
    }

    /// Flip the field without a pick, e.g. from a keyboard shortcut.
    pub fn toggle(&mut self) -> bool {
        self.toggle.toggle()
    }

    /// Any particle or the trigger flips the field.
    pub fn on_click(&mut self, target: PickTarget) -> bool {
        let exploded = self.toggle.toggle();
        log::debug!("{:?} clicked, exploded={}", target, exploded);
        exploded
    }

    pub fn on_hover(&mut self, target: PickTarget) {
        let was_hovered = self.hovered.is_some();
        self.hovered = Some(target);
        if !was_hovered {
            self.observer.on_hover_change(true);
        }
    }

    /// Leaving a target other than the one currently hovered is ignored; the
    /// pointer already moved on to something else.
    pub fn on_unhover(&mut self, target: PickTarget) {
        if self.hovered == Some(target) {
            self.hovered = None;
            self.observer.on_hover_change(false);
        }
    }

    pub fn hovered(&self) -> Option<PickTarget> {
        self.hovered
    }

    pub fn observer(&self) -> &H {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut H {
        &mut self.observer
    }
}
