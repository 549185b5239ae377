//! Runaway Button entry point
//!
//! On the web: binds the button element, forwards pointer moves and runs the
//! frame loop once the button wakes up. Natively: runs a scripted chase and
//! logs where the button ends up.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_host {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlElement, MouseEvent};

    use runaway_button::Tuning;
    use runaway_button::platform::{Driver, FrameOutput, LoopCommand};
    use runaway_button::sim::PointerSample;

    /// DOM id of the element that runs away
    const ELEMENT_ID: &str = "runaway-button";

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// State shared by the pointer listener and the frame loop
    struct Shared {
        driver: RefCell<Driver>,
        element: HtmlElement,
        frame_loop: RefCell<Option<FrameLoop>>,
    }

    /// A running requestAnimationFrame chain; cancelled on drop
    struct FrameLoop {
        handle: Rc<Cell<Option<i32>>>,
        callback: FrameCallback,
    }

    impl FrameLoop {
        fn start(shared: Rc<Shared>) -> Self {
            let handle = Rc::new(Cell::new(None));
            let callback: FrameCallback = Rc::new(RefCell::new(None));

            let next = callback.clone();
            let next_handle = handle.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                let output = shared.driver.borrow_mut().frame(time / 1000.0);
                match output {
                    Some(out) => {
                        apply_transform(&shared.element, &out);
                        next_handle.set(schedule(&next));
                    }
                    None => next_handle.set(None),
                }
            }));

            handle.set(schedule(&callback));
            Self { handle, callback }
        }
    }

    impl Drop for FrameLoop {
        fn drop(&mut self) {
            if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            // Break the closure's reference to itself
            self.callback.borrow_mut().take();
            log::info!("Frame loop stopped");
        }
    }

    fn schedule(callback: &FrameCallback) -> Option<i32> {
        let window = web_sys::window()?;
        let callback = callback.borrow();
        let callback = callback.as_ref()?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    /// An event listener that unregisters itself on drop
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(MouseEvent)>,
    }

    impl Listener {
        fn mouse(target: EventTarget, kind: &'static str, closure: Closure<dyn FnMut(MouseEvent)>) -> Self {
            let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            Self {
                target,
                kind,
                closure,
            }
        }
    }

    impl Drop for Listener {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
            log::info!("Removed {} listener", self.kind);
        }
    }

    /// Everything owned by a mounted button
    pub struct App {
        shared: Rc<Shared>,
        _pointer: Listener,
    }

    impl Drop for App {
        fn drop(&mut self) {
            self.shared.driver.borrow_mut().teardown();
            self.shared.frame_loop.borrow_mut().take();
        }
    }

    fn apply_transform(element: &HtmlElement, out: &FrameOutput) {
        let transform = format!(
            "translate({:.2}px, {:.2}px) scale({:.3}, {:.3})",
            out.position.x, out.position.y, out.scale.x, out.scale.y
        );
        let _ = element.style().set_property("transform", &transform);
    }

    /// Measure the element and build a sample for this pointer position
    fn measure(element: &HtmlElement, event: &MouseEvent) -> PointerSample {
        let rect = element.get_bounding_client_rect();
        PointerSample::new(
            event.client_x() as f32,
            event.client_y() as f32,
            (rect.left() + rect.width() / 2.0) as f32,
            (rect.top() + rect.height() / 2.0) as f32,
            (rect.width() / 2.0) as f32,
        )
    }

    pub fn mount() -> Option<App> {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(element) = document
            .get_element_by_id(ELEMENT_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::warn!("No #{} element found, nothing to do", ELEMENT_ID);
            return None;
        };

        let seed = js_sys::Date::now() as u64;
        let shared = Rc::new(Shared {
            driver: RefCell::new(Driver::new(Tuning::load(), seed)),
            element,
            frame_loop: RefCell::new(None),
        });
        log::info!("Button mounted with seed: {}", seed);

        let listener_shared = shared.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let shared = &listener_shared;
            let sample = measure(&shared.element, &event);

            let (response, command) = shared.driver.borrow_mut().pointer_moved(&sample);
            if command == LoopCommand::Start {
                *shared.frame_loop.borrow_mut() = Some(FrameLoop::start(shared.clone()));
            }

            // Dormant buttons still need redrawing for hover
            if !shared.driver.borrow().loop_running() {
                let out = shared.driver.borrow().render(js_sys::Date::now() / 1000.0);
                apply_transform(&shared.element, &out);
            }
            if response.activated {
                log::info!("Button is loose!");
            }
        });
        let pointer = Listener::mouse(window.into(), "mousemove", closure);

        Some(App {
            shared,
            _pointer: pointer,
        })
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static APP: std::cell::RefCell<Option<web_host::App>> = const { std::cell::RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Runaway Button starting...");
    let app = web_host::mount();
    APP.with(|slot| *slot.borrow_mut() = app);
}

/// Stop the frame loop and remove the pointer listener
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn teardown() {
    APP.with(|slot| slot.borrow_mut().take());
    log::info!("Runaway Button torn down");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Runaway Button (native) starting...");
    log::info!("Native mode runs a scripted chase - run with `trunk serve` for the web version");

    run_scripted_chase();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Sweep the pointer in, wake the button, then chase it for a few seconds
#[cfg(not(target_arch = "wasm32"))]
fn run_scripted_chase() {
    use runaway_button::Tuning;
    use runaway_button::platform::{Driver, LoopCommand};
    use runaway_button::sim::PointerSample;

    const FRAMES: u32 = 600;
    const BUTTON_RADIUS: f32 = 32.0;
    const FRAME_SECS: f64 = 1.0 / 60.0;

    let mut driver = Driver::new(Tuning::load(), 2024);

    // Approach from the right until the button wakes up
    let mut pointer_x = 120.0;
    while pointer_x > 0.0 {
        let sample = PointerSample::new(pointer_x, 0.0, 0.0, 0.0, BUTTON_RADIUS);
        let (_, command) = driver.pointer_moved(&sample);
        if command == LoopCommand::Start {
            println!("Activated with pointer at x = {:.0}", pointer_x);
            break;
        }
        pointer_x -= 5.0;
    }

    // Chase: the pointer drifts toward the button a little every frame
    let mut pointer = glam::Vec2::new(pointer_x, 0.0);
    let mut flee_events = 0;
    let mut bounces = 0;
    for frame in 0..FRAMES {
        let center = driver.state().position();
        pointer += (center - pointer) * 0.08;
        let sample = PointerSample::new(pointer.x, pointer.y, center.x, center.y, BUTTON_RADIUS);
        if driver.pointer_moved(&sample).0.fled {
            flee_events += 1;
        }

        let before = driver.state().velocity();
        let Some(out) = driver.frame(frame as f64 * FRAME_SECS) else {
            break;
        };
        if before.signum() != driver.state().velocity().signum() {
            bounces += 1;
        }
        if frame % 60 == 0 {
            log::info!(
                "frame {:3}: pos ({:7.1}, {:7.1}) scale ({:.2}, {:.2})",
                frame,
                out.position.x,
                out.position.y,
                out.scale.x,
                out.scale.y
            );
        }
    }

    let end = driver.state().position();
    driver.teardown();

    println!(
        "After {} frames: button at ({:.1}, {:.1}), {} flee events, ~{} direction changes",
        FRAMES, end.x, end.y, flee_events, bounces
    );
    assert!(driver.tuning().bounds.contains(end), "button escaped its box");
    println!("✓ Button stayed inside its box");
}
