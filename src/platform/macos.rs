//! macOS backend of the picker
//!
//! Screen capture goes through Core Graphics, the clipboard through
//! NSPasteboard, and global shortcuts through Carbon hotkeys. The pinned
//! preview is a borderless floating window whose view is declared at runtime
//! with `ClassDecl`.

// Suppress deprecation warnings for legacy objc crate usage
#![allow(deprecated)]

// =============================================================================
// IMPORTS
// =============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::c_void;
use std::ptr::null_mut;

// Objective-C runtime bindings for class declaration and messaging (legacy)
use objc::declare::ClassDecl;
use objc::runtime::{Class, Object, Sel, BOOL};
use objc::{class, msg_send, sel, sel_impl};

// objc2 imports for modern Objective-C bindings
use objc2::runtime::AnyObject;
use objc2::ClassType;
use objc2_app_kit::{
    NSApplication, NSApplicationActivationPolicy, NSBezierPath, NSColor, NSStringDrawing, NSView,
    NSWindowStyleMask,
};
use objc2_foundation::{MainThreadMarker, NSDictionary, NSPoint, NSRect, NSSize, NSString};

// Core Graphics for screen capture
use core_graphics::display::CGDisplay;
use core_graphics::geometry::{CGPoint, CGRect, CGSize};
use core_graphics::window::{
    kCGNullWindowID, kCGWindowImageNominalResolution, kCGWindowListOptionOnScreenOnly,
};

use crate::app::PickerApp;
use crate::clipboard::Clipboard;
use crate::color::Color;
use crate::config;
use crate::error::{PickerError, Result};
use crate::geometry::{Point, PreviewImage, Rect};
use crate::hotkey::{HotkeyBackend, HotkeyQueue, NullBackend};
use crate::sampler::ScreenSource;
use crate::shortcut::{Shortcut, ShortcutAction};
use crate::store::SharedStore;

// Type alias for Objective-C object pointer
type Id = *mut Object;

const YES: BOOL = true as BOOL;
const NO: BOOL = false as BOOL;

// NSRect compatible with objc::Encode for use with add_method
// objc2's NSRect doesn't implement objc::Encode
#[repr(C)]
#[derive(Copy, Clone, Debug)]
struct NSRectEncode {
    pub origin: NSPointEncode,
    pub size: NSSizeEncode,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
struct NSPointEncode {
    pub x: f64,
    pub y: f64,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
struct NSSizeEncode {
    pub width: f64,
    pub height: f64,
}

unsafe impl objc::Encode for NSRectEncode {
    fn encode() -> objc::Encoding {
        let encoding = format!(
            "{{CGRect={}{}}}",
            NSPointEncode::encode().as_str(),
            NSSizeEncode::encode().as_str()
        );
        unsafe { objc::Encoding::from_str(&encoding) }
    }
}

unsafe impl objc::Encode for NSPointEncode {
    fn encode() -> objc::Encoding {
        unsafe { objc::Encoding::from_str("{CGPoint=dd}") }
    }
}

unsafe impl objc::Encode for NSSizeEncode {
    fn encode() -> objc::Encoding {
        unsafe { objc::Encoding::from_str("{CGSize=dd}") }
    }
}

// =============================================================================
// SCREEN
// =============================================================================

/// Lecture de l'écran via Core Graphics
/// Screen reading through Core Graphics
#[derive(Debug, Default)]
pub struct CoreGraphicsScreen;

fn to_rect(rect: CGRect) -> Rect {
    Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
}

impl ScreenSource for CoreGraphicsScreen {
    fn cursor_location(&self) -> Option<Point> {
        // Cocoa coordinates: origin at the bottom-left of the main display
        let location: NSPoint = unsafe { msg_send![class!(NSEvent), mouseLocation] };
        if !location.x.is_finite() || !location.y.is_finite() {
            return None;
        }
        let main_height = CGDisplay::main().bounds().size.height;
        Some(Point::new(location.x, main_height - location.y))
    }

    fn screen_bounds(&self) -> Rect {
        match CGDisplay::active_displays() {
            Ok(ids) => ids
                .into_iter()
                .map(|id| to_rect(CGDisplay::new(id).bounds()))
                .fold(Rect::default(), |all, display| all.union(&display)),
            Err(e) => {
                tracing::debug!("CGGetActiveDisplayList failed ({}), using main display", e);
                to_rect(CGDisplay::main().bounds())
            }
        }
    }

    fn capture(&self, rect: Rect) -> Option<PreviewImage> {
        let (width, height) = (rect.width as usize, rect.height as usize);
        if width == 0 || height == 0 {
            return None;
        }

        let cg_rect = CGRect::new(
            &CGPoint::new(rect.x, rect.y),
            &CGSize::new(rect.width, rect.height),
        );
        let image = CGDisplay::screenshot(
            cg_rect,
            kCGWindowListOptionOnScreenOnly,
            kCGNullWindowID,
            kCGWindowImageNominalResolution,
        )?;

        let (image_width, image_height) = (image.width(), image.height());
        if image.bits_per_pixel() != 32 || image_width == 0 || image_height == 0 {
            return None;
        }

        // Most Mac displays use BGRA; backing pixels are resampled to points
        let bytes_per_row = image.bytes_per_row();
        let data = image.data();
        let bytes = data.bytes();
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let source_y = y * image_height / height;
            for x in 0..width {
                let source_x = x * image_width / width;
                let offset = source_y * bytes_per_row + source_x * 4;
                let bgra = bytes.get(offset..offset + 4)?;
                pixels.push([bgra[2], bgra[1], bgra[0], 255]);
            }
        }
        PreviewImage::from_pixels(width, height, pixels)
    }
}

// =============================================================================
// CLIPBOARD
// =============================================================================

/// UTI behind NSPasteboardTypeString
const PASTEBOARD_TYPE_STRING: &str = "public.utf8-plain-text";

/// Presse-papiers général (NSPasteboard)
/// General pasteboard (NSPasteboard)
#[derive(Debug, Default)]
pub struct Pasteboard;

impl Clipboard for Pasteboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let ns_text = NSString::from_str(text);
        let ns_type = NSString::from_str(PASTEBOARD_TYPE_STRING);

        let written: BOOL = unsafe {
            let pasteboard: Id = msg_send![class!(NSPasteboard), generalPasteboard];
            let _: i64 = msg_send![pasteboard, clearContents];

            let text_ptr: Id = &*ns_text as *const NSString as Id;
            let type_ptr: Id = &*ns_type as *const NSString as Id;
            msg_send![pasteboard, setString: text_ptr forType: type_ptr]
        };

        if written == NO {
            return Err(PickerError::Clipboard("NSPasteboard refused the string".to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// HOTKEYS
// =============================================================================

type OSStatus = i32;
type EventTargetRef = *mut c_void;
type EventHandlerRef = *mut c_void;
type EventHandlerCallRef = *mut c_void;
type EventRef = *mut c_void;
type EventHotKeyRef = *mut c_void;

type EventHandlerProc = extern "C" fn(EventHandlerCallRef, EventRef, *mut c_void) -> OSStatus;

#[repr(C)]
struct EventTypeSpec {
    event_class: u32,
    event_kind: u32,
}

#[repr(C)]
#[derive(Default)]
struct EventHotKeyID {
    signature: u32,
    id: u32,
}

const fn four_char_code(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

const NO_ERR: OSStatus = 0;
const EVENT_NOT_HANDLED_ERR: OSStatus = -9874;
const EVENT_CLASS_KEYBOARD: u32 = four_char_code(b"keyb");
const EVENT_HOT_KEY_PRESSED: u32 = 5;
const EVENT_PARAM_DIRECT_OBJECT: u32 = four_char_code(b"----");
const TYPE_EVENT_HOT_KEY_ID: u32 = four_char_code(b"hkid");

/// Tags the hotkeys registered by the picker
const HOTKEY_SIGNATURE: u32 = four_char_code(b"PCKR");

#[link(name = "Carbon", kind = "framework")]
extern "C" {
    fn GetApplicationEventTarget() -> EventTargetRef;

    fn InstallEventHandler(
        target: EventTargetRef,
        handler: EventHandlerProc,
        num_types: usize,
        list: *const EventTypeSpec,
        user_data: *mut c_void,
        out_ref: *mut EventHandlerRef,
    ) -> OSStatus;

    fn RemoveEventHandler(handler: EventHandlerRef) -> OSStatus;

    fn RegisterEventHotKey(
        key_code: u32,
        modifiers: u32,
        hot_key_id: EventHotKeyID,
        target: EventTargetRef,
        options: u32,
        out_ref: *mut EventHotKeyRef,
    ) -> OSStatus;

    fn UnregisterEventHotKey(hot_key: EventHotKeyRef) -> OSStatus;

    fn GetEventParameter(
        event: EventRef,
        name: u32,
        desired_type: u32,
        actual_type: *mut u32,
        buffer_size: usize,
        actual_size: *mut usize,
        data: *mut c_void,
    ) -> OSStatus;
}

/// Raccourcis globaux enregistrés auprès de Carbon
/// Global shortcuts registered with Carbon
///
/// The system consumes the keystroke and reports one event per key-down. The
/// event handler queues the hotkey id; `poll` drains the queue on the next
/// timer tick.
pub struct CarbonBackend {
    /// Boxed so the address handed to the event handler stays put
    queue: Box<RefCell<HotkeyQueue>>,
    hotkeys: HashMap<u32, EventHotKeyRef>,
    handler: EventHandlerRef,
}

impl CarbonBackend {
    pub fn new() -> Result<Self> {
        let queue = Box::new(RefCell::new(HotkeyQueue::new()));
        let event_type = EventTypeSpec {
            event_class: EVENT_CLASS_KEYBOARD,
            event_kind: EVENT_HOT_KEY_PRESSED,
        };
        let user_data = &*queue as *const RefCell<HotkeyQueue> as *mut c_void;
        let mut handler: EventHandlerRef = null_mut();

        let status = unsafe {
            InstallEventHandler(
                GetApplicationEventTarget(),
                hotkey_pressed,
                1,
                &event_type,
                user_data,
                &mut handler,
            )
        };
        if status != NO_ERR {
            return Err(PickerError::Hotkey(format!("InstallEventHandler failed ({})", status)));
        }

        Ok(Self {
            queue,
            hotkeys: HashMap::new(),
            handler,
        })
    }
}

impl HotkeyBackend for CarbonBackend {
    fn register(&mut self, shortcut: &Shortcut) -> Result<()> {
        let id = self.queue.borrow_mut().assign(*shortcut);
        let hot_key_id = EventHotKeyID {
            signature: HOTKEY_SIGNATURE,
            id,
        };
        let mut hot_key: EventHotKeyRef = null_mut();

        let status = unsafe {
            RegisterEventHotKey(
                u32::from(shortcut.key_code()),
                shortcut.carbon_flags(),
                hot_key_id,
                GetApplicationEventTarget(),
                0,
                &mut hot_key,
            )
        };
        if status != NO_ERR {
            self.queue.borrow_mut().release(shortcut);
            return Err(PickerError::Hotkey(format!(
                "{} was refused by the system ({})",
                shortcut.display_string(),
                status
            )));
        }

        self.hotkeys.insert(id, hot_key);
        Ok(())
    }

    fn unregister(&mut self, shortcut: &Shortcut) {
        let Some(id) = self.queue.borrow_mut().release(shortcut) else {
            return;
        };
        if let Some(hot_key) = self.hotkeys.remove(&id) {
            let status = unsafe { UnregisterEventHotKey(hot_key) };
            if status != NO_ERR {
                tracing::debug!("UnregisterEventHotKey failed for {} ({})", shortcut, status);
            }
        }
    }

    fn poll(&mut self) -> Vec<Shortcut> {
        self.queue.borrow_mut().drain()
    }
}

impl Drop for CarbonBackend {
    fn drop(&mut self) {
        unsafe {
            for (_, hot_key) in self.hotkeys.drain() {
                UnregisterEventHotKey(hot_key);
            }
            RemoveEventHandler(self.handler);
        }
    }
}

/// Carbon event handler: queues the pressed hotkey and consumes the event
extern "C" fn hotkey_pressed(_next: EventHandlerCallRef, event: EventRef, user_data: *mut c_void) -> OSStatus {
    let mut hot_key_id = EventHotKeyID::default();
    let status = unsafe {
        GetEventParameter(
            event,
            EVENT_PARAM_DIRECT_OBJECT,
            TYPE_EVENT_HOT_KEY_ID,
            null_mut(),
            std::mem::size_of::<EventHotKeyID>(),
            null_mut(),
            &mut hot_key_id as *mut EventHotKeyID as *mut c_void,
        )
    };
    if status != NO_ERR || hot_key_id.signature != HOTKEY_SIGNATURE || user_data.is_null() {
        return EVENT_NOT_HANDLED_ERR;
    }

    // Owned by the CarbonBackend that installed this handler
    let queue = unsafe { &*(user_data as *const RefCell<HotkeyQueue>) };
    let Ok(mut queue) = queue.try_borrow_mut() else {
        return EVENT_NOT_HANDLED_ERR;
    };
    if queue.fire(hot_key_id.id) {
        NO_ERR
    } else {
        EVENT_NOT_HANDLED_ERR
    }
}

// =============================================================================
// GLOBAL STATE
// =============================================================================

pub type MacApp = PickerApp<CoreGraphicsScreen, Pasteboard, CarbonBackend>;

thread_local! {
    /// Application owned by the main thread for the lifetime of the run loop
    static APP: RefCell<Option<MacApp>> = const { RefCell::new(None) };

    static PINNED_WINDOW: Cell<Id> = const { Cell::new(null_mut()) };
}

/// Marge autour de l'aperçu (points)
/// Margin around the preview (points)
const MARGIN: f64 = 10.0;

/// Height of the row holding the formatted color
const TEXT_HEIGHT: f64 = 22.0;

const FONT_SIZE: f64 = 12.0;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Runs the picker on the AppKit main loop. Does not return until the
/// application terminates.
pub fn run(store: SharedStore) -> Result<()> {
    let mtm = MainThreadMarker::new()
        .ok_or_else(|| PickerError::Platform("the picker must run on the main thread".to_string()))?;

    // Hotkey events are dispatched by the application's run loop
    let ns_app = NSApplication::sharedApplication(mtm);
    unsafe {
        // Accessory: no Dock icon, no main menu
        ns_app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);
    }

    let app = PickerApp::new(store, CoreGraphicsScreen, Pasteboard, CarbonBackend::new()?)?;
    let shortcuts: Vec<String> = ShortcutAction::ALL
        .into_iter()
        .filter_map(|action| {
            let shortcut = app.preferences().shortcut(action)?;
            Some(format!("{}: {}", action.display_name(), shortcut))
        })
        .collect();
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    let view_class = register_view_class()?;
    let ticker_class = register_ticker_class()?;
    let window = create_pinned_window(view_class);
    PINNED_WINDOW.with(|w| w.set(window));

    unsafe {
        let ticker: Id = msg_send![ticker_class, new];
        let _: Id = msg_send![class!(NSTimer),
            scheduledTimerWithTimeInterval: config::POLL_INTERVAL_SECS
            target: ticker
            selector: sel!(tick:)
            userInfo: null_mut::<Object>()
            repeats: YES
        ];
    }

    tracing::info!("Picker running ({})", shortcuts.join(", "));
    unsafe {
        ns_app.run();
    }
    Ok(())
}

/// Copies the history entry at `index` to the pasteboard, leaving the
/// history order untouched
pub fn copy_history(store: SharedStore, index: usize) -> Result<String> {
    let mut app = PickerApp::new(store, CoreGraphicsScreen, Pasteboard, NullBackend)?;
    app.copy_history(index)
}

// =============================================================================
// CUSTOM CLASS REGISTRATION
// =============================================================================

fn register_view_class() -> Result<&'static Class> {
    // Get NSView class via objc2 and convert to objc runtime class
    let superclass_ptr = NSView::class() as *const objc2::runtime::AnyClass as *const Class;
    let superclass = unsafe { &*superclass_ptr };
    let mut decl = ClassDecl::new("PickerPinnedView", superclass)
        .ok_or_else(|| PickerError::Platform("PickerPinnedView is already declared".to_string()))?;

    unsafe {
        decl.add_method(sel!(acceptsFirstMouse:), accepts_first_mouse as extern "C" fn(&Object, Sel, Id) -> bool);
        decl.add_method(sel!(mouseDown:), mouse_down as extern "C" fn(&Object, Sel, Id));
        decl.add_method(sel!(drawRect:), draw_rect as extern "C" fn(&Object, Sel, NSRectEncode));
    }

    Ok(decl.register())
}

fn register_ticker_class() -> Result<&'static Class> {
    let mut decl = ClassDecl::new("PickerTicker", class!(NSObject))
        .ok_or_else(|| PickerError::Platform("PickerTicker is already declared".to_string()))?;

    unsafe {
        decl.add_method(sel!(tick:), tick as extern "C" fn(&Object, Sel, Id));
    }

    Ok(decl.register())
}

fn create_pinned_window(view_class: &Class) -> Id {
    let side = config::CAPTURE_SIZE * config::PINNED_ZOOM_FACTOR + 2.0 * MARGIN;
    let frame = NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(side, side + TEXT_HEIGHT));

    unsafe {
        let window: Id = msg_send![class!(NSWindow), alloc];
        let window: Id = msg_send![window,
            initWithContentRect: frame
            styleMask: NSWindowStyleMask::Borderless
            backing: 2u64  // NSBackingStoreBuffered = 2
            defer: NO
        ];

        let _: () = msg_send![window, setLevel: config::PINNED_WINDOW_LEVEL];
        let _: () = msg_send![window, setHasShadow: YES];
        let _: () = msg_send![window, setReleasedWhenClosed: NO];
        // NSWindowSharingNone: keeps the preview out of its own captures
        let _: () = msg_send![window, setSharingType: 0u64];

        let view: Id = msg_send![view_class, alloc];
        let view: Id = msg_send![view, initWithFrame: frame];
        let _: () = msg_send![window, setContentView: view];
        let _: () = msg_send![window, center];
        window
    }
}

// =============================================================================
// OBJECTIVE-C METHOD IMPLEMENTATIONS
// =============================================================================

extern "C" fn accepts_first_mouse(_this: &Object, _cmd: Sel, _event: Id) -> bool {
    true
}

/// Clicking the pinned preview copies the displayed color
extern "C" fn mouse_down(_this: &Object, _cmd: Sel, _event: Id) {
    APP.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            return;
        };
        let Some(app) = slot.as_mut() else {
            return;
        };
        let color = app.sampler().current_color();
        if let Err(e) = app.copy(color, true) {
            tracing::warn!("Copy failed: {}", e);
        }
    });
}

extern "C" fn tick(_this: &Object, _cmd: Sel, _timer: Id) {
    let state = APP.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        let app = slot.as_mut()?;
        let changed = app.tick();
        Some((app.is_pinned(), changed))
    });

    if let Some((pinned, changed)) = state {
        update_pinned_window(pinned, changed);
    }
}

fn update_pinned_window(pinned: bool, changed: bool) {
    let window = PINNED_WINDOW.with(|w| w.get());
    if window.is_null() {
        return;
    }

    unsafe {
        let visible: BOOL = msg_send![window, isVisible];
        let visible = visible != NO;

        if !pinned {
            if visible {
                let _: () = msg_send![window, orderOut: null_mut::<Object>()];
            }
            return;
        }

        if !visible {
            let _: () = msg_send![window, orderFrontRegardless];
        }
        if changed || !visible {
            let view: Id = msg_send![window, contentView];
            let _: () = msg_send![view, setNeedsDisplay: YES];
        }
    }
}

// =============================================================================
// DRAWING
// =============================================================================

struct Snapshot {
    color: Color,
    text: String,
    preview: Option<PreviewImage>,
}

extern "C" fn draw_rect(this: &Object, _cmd: Sel, _rect: NSRectEncode) {
    let snapshot = APP.with(|cell| {
        let slot = cell.try_borrow().ok()?;
        let app = slot.as_ref()?;
        let color = app.sampler().current_color();
        Some(Snapshot {
            color,
            text: app.format().format(&color),
            preview: app.sampler().preview_image().cloned(),
        })
    });
    let Some(snapshot) = snapshot else {
        return;
    };

    let view_ref: &NSView = unsafe { &*(this as *const Object as *const NSView) };
    let bounds: NSRect = unsafe { view_ref.bounds() };

    // Background shows the sampled color
    fill_rect(bounds, snapshot.color);

    if let Some(preview) = &snapshot.preview {
        draw_preview(preview);
    }

    draw_text(&snapshot.text, NSPoint::new(MARGIN, MARGIN / 2.0), snapshot.color.text_color());
}

fn fill_rect(rect: NSRect, color: Color) {
    unsafe {
        let ns_color = NSColor::colorWithCalibratedRed_green_blue_alpha(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        );
        ns_color.set();
        NSBezierPath::bezierPathWithRect(rect).fill();
    }
}

/// Magnified preview, one square per captured pixel, with a reticle on the
/// sampled pixel
fn draw_preview(preview: &PreviewImage) {
    let zoom = config::PINNED_ZOOM_FACTOR;
    let base_y = TEXT_HEIGHT + MARGIN;
    let rows = preview.height();

    // Image rows go top-down, view coordinates go bottom-up
    let cell_rect = |x: usize, y: usize| {
        NSRect::new(
            NSPoint::new(MARGIN + x as f64 * zoom, base_y + (rows - 1 - y) as f64 * zoom),
            NSSize::new(zoom, zoom),
        )
    };

    for y in 0..rows {
        for x in 0..preview.width() {
            if let Some(pixel) = preview.pixel(x, y) {
                fill_rect(cell_rect(x, y), pixel);
            }
        }
    }

    unsafe {
        let gray = NSColor::colorWithCalibratedRed_green_blue_alpha(0.5, 0.5, 0.5, 1.0);
        gray.setStroke();
        let reticle = NSBezierPath::bezierPathWithRect(cell_rect(preview.width() / 2, rows / 2));
        reticle.setLineWidth(1.0);
        reticle.stroke();
    }
}

fn draw_text(text: &str, at: NSPoint, color: Color) {
    let text_color = unsafe {
        NSColor::colorWithCalibratedRed_green_blue_alpha(color.red(), color.green(), color.blue(), 1.0)
    };

    let ns_text = NSString::from_str(text);
    let font_attr_key = NSString::from_str("NSFont");
    let color_attr_key = NSString::from_str("NSColor");

    unsafe {
        let font: Id = msg_send![class!(NSFont), monospacedSystemFontOfSize: FONT_SIZE weight: 0.0f64];

        // Attributes dictionary through legacy msg_send (objc2 NSDictionary::from_vec requires Retained values)
        let font_key_ptr: Id = &*font_attr_key as *const NSString as Id;
        let color_key_ptr: Id = &*color_attr_key as *const NSString as Id;
        let text_color_ptr: Id = &*text_color as *const NSColor as Id;

        let keys: [Id; 2] = [font_key_ptr, color_key_ptr];
        let values: [Id; 2] = [font, text_color_ptr];
        let attributes: Id = msg_send![class!(NSDictionary),
            dictionaryWithObjects: values.as_ptr()
            forKeys: keys.as_ptr()
            count: 2usize
        ];

        let attrs_ref: &NSDictionary<NSString, AnyObject> = &*(attributes as *const NSDictionary<_, _>);
        ns_text.drawAtPoint_withAttributes(at, Some(attrs_ref));
    }
}
