use yew::prelude::*;

use super::control_surface::ControlSurface;
use crate::config::ConnectionConfig;

#[function_component(App)]
pub fn app() -> Html {
    // Read once; the connection lives for the page session.
    let config = use_memo((), |_| ConnectionConfig::from_location());

    html! {
        <div id="root" style="position:fixed; inset:0; overflow:hidden; touch-action:none;">
            <ControlSurface config={(*config).clone()} />
        </div>
    }
}
