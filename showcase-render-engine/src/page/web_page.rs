use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, MouseEvent, window};

use super::layout::{PageLayout, SectionBox};
use super::{PagePointerMoved, PageResized, PageScrolled};
use crate::engine::config::ShowcaseConfig;

/// Raw DOM input captured by the listeners, drained once per frame.
#[derive(Debug, Clone, Copy)]
enum PageSignal {
    PointerMoved { x: f32, y: f32, width: f32, height: f32 },
    Scrolled(f32),
    Resized { width: f32, height: f32 },
}

#[derive(Resource)]
pub struct PageSignalQueue(Arc<Mutex<Vec<PageSignal>>>);

fn push(queue: &Arc<Mutex<Vec<PageSignal>>>, signal: PageSignal) {
    if let Ok(mut queue) = queue.lock() {
        queue.push(signal);
    }
}

fn inner_size(window: &web_sys::Window) -> (f32, f32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    (width as f32, height as f32)
}

pub fn setup_page_listeners(mut commands: Commands) {
    let queue: Arc<Mutex<Vec<PageSignal>>> = Arc::new(Mutex::new(Vec::new()));

    let Some(window) = window() else {
        error!("Window object not available, page listeners not installed");
        return;
    };
    let Some(document) = window.document() else {
        error!("Document not available, page listeners not installed");
        return;
    };

    let pointer_queue = queue.clone();
    let on_pointer = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (width, height) = inner_size(&window);
        push(
            &pointer_queue,
            PageSignal::PointerMoved {
                x: event.client_x() as f32,
                y: event.client_y() as f32,
                width,
                height,
            },
        );
    }) as Box<dyn FnMut(MouseEvent)>);

    let scroll_queue = queue.clone();
    let on_scroll = Closure::wrap(Box::new(move |_event: Event| {
        if let Some(scroll_y) = web_sys::window().and_then(|w| w.scroll_y().ok()) {
            push(&scroll_queue, PageSignal::Scrolled(scroll_y as f32));
        }
    }) as Box<dyn FnMut(Event)>);

    let resize_queue = queue.clone();
    let on_resize = Closure::wrap(Box::new(move |_event: Event| {
        if let Some(window) = web_sys::window() {
            let (width, height) = inner_size(&window);
            push(&resize_queue, PageSignal::Resized { width, height });
        }
    }) as Box<dyn FnMut(Event)>);

    if let Err(e) =
        document.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())
    {
        error!("Failed to register mousemove listener: {:?}", e);
    }
    if let Err(e) =
        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
    {
        error!("Failed to register scroll listener: {:?}", e);
    }
    if let Err(e) =
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
    {
        error!("Failed to register resize listener: {:?}", e);
    }

    // Listeners live as long as the page.
    on_pointer.forget();
    on_scroll.forget();
    on_resize.forget();

    // Seed the layout with the page as it is now.
    let (width, height) = inner_size(&window);
    push(&queue, PageSignal::Resized { width, height });
    if let Ok(scroll_y) = window.scroll_y() {
        push(&queue, PageSignal::Scrolled(scroll_y as f32));
    }

    commands.insert_resource(PageSignalQueue(queue));
}

pub fn drain_page_signals(
    queue: Option<Res<PageSignalQueue>>,
    mut pointer: EventWriter<PagePointerMoved>,
    mut scrolled: EventWriter<PageScrolled>,
    mut resized: EventWriter<PageResized>,
) {
    let Some(queue) = queue else {
        return;
    };

    let signals = if let Ok(mut queue) = queue.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for signal in signals {
        match signal {
            PageSignal::PointerMoved { x, y, width, height } => {
                pointer.write(PagePointerMoved {
                    position: Vec2::new(x, y),
                    page_size: Vec2::new(width, height),
                });
            }
            PageSignal::Scrolled(scroll_y) => {
                scrolled.write(PageScrolled { scroll_y });
            }
            PageSignal::Resized { width, height } => {
                resized.write(PageResized { width, height });
            }
        }
    }
}

/// Re-measure trigger sections after the page lays out again.
pub fn measure_sections(
    config: Res<ShowcaseConfig>,
    mut resized: EventReader<PageResized>,
    mut layout: ResMut<PageLayout>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
    layout.viewport_height = last.height;
    if let Some(root) = document.document_element() {
        layout.document_height = root.scroll_height() as f32;
    }

    for selector in &config.sections {
        match document.query_selector(selector) {
            Ok(Some(element)) => {
                let rect = element.get_bounding_client_rect();
                layout.set_section(
                    selector.clone(),
                    SectionBox {
                        top: rect.top() as f32 + scroll_y,
                        height: rect.height() as f32,
                    },
                );
            }
            Ok(None) => warn!("Trigger section {} not found on page", selector),
            Err(e) => error!("Invalid trigger selector {}: {:?}", selector, e),
        }
    }
}
