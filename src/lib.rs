use tracing_wasm::WASMLayerConfigBuilder;
use wasm_bindgen::prelude::*;

mod app;
mod components;
pub mod dropzone;

pub use components::dropzone_field::{DropzoneField, DropzoneFieldProps};
pub use dropzone::{BindingError, DropzoneController, DropzoneOptions, Notification, SelectedFile};

#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let config = WASMLayerConfigBuilder::default()
        .set_max_level(tracing::Level::DEBUG)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);

    // The demo only mounts on pages that ask for it; everywhere else this
    // crate is used as a library.
    let mount = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("app"));

    if let Some(mount) = mount {
        tracing::info!("mounting dropzone demo");
        yew::Renderer::<app::App>::with_root(mount).render();
    }
}
