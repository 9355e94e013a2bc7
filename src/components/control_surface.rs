use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, TouchEvent};
use yew::prelude::*;

use crate::config::ConnectionConfig;
use crate::connection::{Connection, WsConnection};
use crate::state::{Controls, TouchPoint};
use crate::stream::{StreamLoop, tick};
use crate::surface::{CanvasSurface, DrawSurface, NullSurface};
use crate::util::touch_points;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlSurfaceProps {
    pub config: ConnectionConfig,
}

fn changed_touches(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Vec<TouchPoint> {
    let rect = canvas.get_bounding_client_rect();
    touch_points(&e.changed_touches(), &rect)
}

/// Full-screen canvas hosting the joystick and sliders, streaming their
/// values to the robot every animation frame.
#[function_component(ControlSurface)]
pub fn control_surface(props: &ControlSurfaceProps) -> Html {
    let canvas_ref = use_node_ref();
    let controls = use_mut_ref(Controls::default);

    {
        let canvas_ref = canvas_ref.clone();
        let controls = controls.clone();
        let config = props.config.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            let apply_layout = {
                let canvas = canvas.clone();
                let window = window.clone();
                let controls = controls.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                    if let Err(e) = controls.borrow_mut().layout(width, height) {
                        log::error!("keeping previous layout: {e}");
                    }
                }
            };
            apply_layout();

            let connection: Rc<Option<WsConnection>> = Rc::new(match WsConnection::open(&config) {
                Ok(conn) => Some(conn),
                Err(e) => {
                    log::error!("{e}");
                    None
                }
            });

            let ctx = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
            if ctx.is_none() {
                log::error!("no 2d canvas context; streaming without drawing");
            }

            let stream_loop = {
                let canvas = canvas.clone();
                let controls = controls.clone();
                let connection = connection.clone();
                let status_url = config.url();
                StreamLoop::start(window.clone(), move || {
                    let controls = controls.borrow();
                    match &ctx {
                        Some(ctx) => {
                            let w = canvas.width() as f64;
                            let mut surface = CanvasSurface::new(ctx.clone(), w, canvas.height() as f64);
                            tick(&controls, &mut surface, &*connection);
                            let status = format!("{status_url} ({})", connection.state_name());
                            surface.draw_text(&status, w / 2.0, 24.0);
                        }
                        None => {
                            tick(&controls, &mut NullSurface, &*connection);
                        }
                    }
                })
            };

            let resize_cb = {
                let apply_layout = apply_layout.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_layout();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let controls_tc = controls.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let began = changed_touches(&canvas_tc, &e);
                    controls_tc.borrow_mut().touch_start(&began);
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let controls_tc = controls.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let moved = changed_touches(&canvas_tc, &e);
                    controls_tc.borrow_mut().touch_move(&moved);
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            // touchend and touchcancel share a handler.
            let touch_end_cb = {
                let canvas_tc = canvas.clone();
                let controls_tc = controls.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let ended = changed_touches(&canvas_tc, &e);
                    controls_tc.borrow_mut().touch_end(&ended);
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback("touchcancel", touch_end_cb.as_ref().unchecked_ref())
                .ok();

            let window_clone = window.clone();
            move || {
                let _ = window_clone
                    .remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                // Stop ticking before the socket goes away.
                drop(stream_loop);
                drop(connection);
                let _keep_alive = (&resize_cb, &touch_start_cb, &touch_move_cb, &touch_end_cb);
            }
        });
    }

    html! {
        <canvas ref={canvas_ref} style="display:block; width:100vw; height:100vh; touch-action:none;" />
    }
}
