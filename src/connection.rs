use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CloseEvent, Event, WebSocket};

use crate::config::ConnectionConfig;
use crate::error::StreamError;

/// Outbound side of the control link.
pub trait Connection {
    fn is_open(&self) -> bool;
    fn send(&self, payload: &str) -> Result<(), StreamError>;
    fn state_name(&self) -> &'static str {
        if self.is_open() { "open" } else { "closed" }
    }
}

/// A websocket opened once at startup. Callbacks only log; reconnecting is
/// left to a page reload.
pub struct WsConnection {
    socket: WebSocket,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

impl WsConnection {
    pub fn open(config: &ConnectionConfig) -> Result<Self, StreamError> {
        let url = config.url();
        let socket = WebSocket::new(&url).map_err(|e| StreamError::Open {
            url: url.clone(),
            reason: describe(&e),
        })?;

        let on_open = {
            let url = url.clone();
            Closure::wrap(Box::new(move |_e: Event| {
                log::info!("connected to {url}");
            }) as Box<dyn FnMut(_)>)
        };
        let on_close = {
            let url = url.clone();
            Closure::wrap(Box::new(move |e: CloseEvent| {
                log::warn!("connection to {url} closed (code {}, {:?})", e.code(), e.reason());
            }) as Box<dyn FnMut(_)>)
        };
        let on_error = {
            let url = url.clone();
            Closure::wrap(Box::new(move |_e: Event| {
                log::warn!("websocket error on {url}");
            }) as Box<dyn FnMut(_)>)
        };
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        log::info!("opening {url}");
        Ok(Self {
            socket,
            _on_open: on_open,
            _on_close: on_close,
            _on_error: on_error,
        })
    }

}

impl Connection for WsConnection {
    fn is_open(&self) -> bool {
        self.socket.ready_state() == WebSocket::OPEN
    }

    fn send(&self, payload: &str) -> Result<(), StreamError> {
        self.socket
            .send_with_str(payload)
            .map_err(|e| StreamError::Send(describe(&e)))
    }

    fn state_name(&self) -> &'static str {
        match self.socket.ready_state() {
            WebSocket::CONNECTING => "connecting",
            WebSocket::OPEN => "open",
            WebSocket::CLOSING => "closing",
            _ => "closed",
        }
    }
}

impl Drop for WsConnection {
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onclose(None);
        self.socket.set_onerror(None);
        let _ = self.socket.close();
    }
}

/// A link that failed to open is simply never open.
impl<C: Connection> Connection for Option<C> {
    fn is_open(&self) -> bool {
        self.as_ref().is_some_and(Connection::is_open)
    }

    fn send(&self, payload: &str) -> Result<(), StreamError> {
        match self {
            Some(conn) => conn.send(payload),
            None => Err(StreamError::Send("no connection".into())),
        }
    }

    fn state_name(&self) -> &'static str {
        self.as_ref().map_or("unavailable", Connection::state_name)
    }
}
