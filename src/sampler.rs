// =============================================================================
// sampler.rs - Pixel under the cursor
// =============================================================================

use crate::color::Color;
use crate::config;
use crate::events::{ListenerId, Listeners};
use crate::geometry::{Point, PreviewImage, Rect};

/// Accès à l'écran (curseur, bornes, capture)
/// Screen access (cursor, bounds, capture)
pub trait ScreenSource {
    /// Cursor position in global coordinates, `None` when unavailable
    fn cursor_location(&self) -> Option<Point>;

    /// Union of the bounds of every active display
    fn screen_bounds(&self) -> Rect;

    /// Captures `rect`, which lies within [`ScreenSource::screen_bounds`],
    /// as an image of one pixel per point
    fn capture(&self, rect: Rect) -> Option<PreviewImage>;
}

/// Événement émis quand la position ou la couleur change
/// Event emitted when the location or the color changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorChanged {
    pub color: Color,
    pub location: Point,
}

pub struct ColorSampler<S: ScreenSource> {
    source: S,
    tracking: bool,
    color: Color,
    location: Option<Point>,
    preview: Option<PreviewImage>,
    listeners: Listeners<ColorChanged>,
}

impl<S: ScreenSource> ColorSampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            tracking: false,
            color: Color::BLACK,
            location: None,
            preview: None,
            listeners: Listeners::new(),
        }
    }

    /// Starts tracking and samples immediately. No-op when already tracking.
    pub fn start_tracking(&mut self) {
        if self.tracking {
            return;
        }
        self.tracking = true;
        tracing::debug!("Sampler tracking started");
        self.refresh();
    }

    pub fn stop_tracking(&mut self) {
        if !self.tracking {
            return;
        }
        self.tracking = false;
        tracing::debug!("Sampler tracking stopped");
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// One timer tick. Returns `true` when a change event was emitted.
    pub fn poll(&mut self) -> bool {
        self.tracking && self.refresh()
    }

    /// Reads the pixel under the cursor now, tracking or not
    pub fn sample_now(&mut self) -> Color {
        self.refresh();
        self.color
    }

    /// Last sampled color, black before the first successful read
    pub fn current_color(&self) -> Color {
        self.color
    }

    pub fn preview_image(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ColorChanged) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn refresh(&mut self) -> bool {
        let Some(location) = self.source.cursor_location() else {
            tracing::debug!("Cursor location unavailable");
            return false;
        };

        let mut changed = self.location != Some(location);
        self.location = Some(location);

        match self.capture_around(location) {
            Some(preview) => {
                let color = preview.center();
                changed |= color != self.color;
                self.color = color;
                self.preview = Some(preview);
            }
            None => tracing::debug!("Screen capture failed at {:?}, keeping last color", location),
        }

        if changed {
            self.listeners.emit(&ColorChanged {
                color: self.color,
                location,
            });
        }
        changed
    }

    /// Preview centered on `location`; parts outside every display are black
    fn capture_around(&self, location: Point) -> Option<PreviewImage> {
        let size = config::CAPTURE_SIZE as usize;
        let requested = Rect::centered_on(location, config::CAPTURE_SIZE);
        let visible = requested.intersection(&self.source.screen_bounds());

        if visible.is_empty() {
            return Some(PreviewImage::black(size, size));
        }

        let captured = self.source.capture(visible)?;
        if visible == requested && captured.width() == size && captured.height() == size {
            return Some(captured);
        }

        let mut padded = PreviewImage::black(size, size);
        padded.paste(
            &captured,
            (visible.x - requested.x) as usize,
            (visible.y - requested.y) as usize,
        );
        Some(padded)
    }
}

// =============================================================================
// TESTS
// =============================================================================
