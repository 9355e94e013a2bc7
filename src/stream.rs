use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::connection::Connection;
use crate::error::StreamError;
use crate::state::Controls;
use crate::surface::DrawSurface;

/// What happened to the snapshot built during one tick.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TickOutcome {
    Sent,
    /// Connection not open; nothing is queued.
    Skipped,
    /// Encoding or sending failed; the message is lost.
    Dropped,
}

/// One frame: redraw, snapshot, and push the snapshot if the link is open.
pub fn tick<S, C>(controls: &Controls, surface: &mut S, conn: &C) -> TickOutcome
where
    S: DrawSurface + ?Sized,
    C: Connection + ?Sized,
{
    surface.clear();
    controls.draw(surface);
    let snapshot = controls.snapshot();
    if !conn.is_open() {
        return TickOutcome::Skipped;
    }
    let sent: Result<(), StreamError> = snapshot.to_json().and_then(|payload| conn.send(&payload));
    match sent {
        Ok(()) => TickOutcome::Sent,
        Err(e) => {
            log::warn!("dropping control frame: {e}");
            TickOutcome::Dropped
        }
    }
}

type FrameCallback = Closure<dyn FnMut()>;

/// Runs `step` on every animation frame until dropped.
pub struct StreamLoop {
    window: web_sys::Window,
    raf_id: Rc<RefCell<Option<i32>>>,
    closure_cell: Rc<RefCell<Option<FrameCallback>>>,
}

impl StreamLoop {
    pub fn start<F>(window: web_sys::Window, mut step: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let raf_id = Rc::new(RefCell::new(None));
        let closure_cell: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        {
            let raf_id_loop = raf_id.clone();
            let window_loop = window.clone();
            let closure_cell_loop = closure_cell.clone();
            *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                step();
                // reschedule unconditionally
                if let Some(cb) = closure_cell_loop.borrow().as_ref() {
                    if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id_loop.borrow_mut() = Some(id);
                    }
                }
            }) as Box<dyn FnMut()>));
        }
        if let Some(cb) = closure_cell.borrow().as_ref() {
            if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                *raf_id.borrow_mut() = Some(id);
            }
        }
        Self {
            window,
            raf_id,
            closure_cell,
        }
    }
}

impl Drop for StreamLoop {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.borrow_mut().take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Break the closure's reference to its own cell.
        self.closure_cell.borrow_mut().take();
    }
}
