use web_sys::Element;
use yew::prelude::*;

use crate::dropzone::{DropzoneController, DropzoneOptions, Notification, SelectedFile, Subscribers};

#[derive(Properties, PartialEq)]
pub struct DropzoneFieldProps {
    #[prop_or_default]
    pub name: String,
    #[prop_or_default]
    pub accept: Option<String>,
    #[prop_or_else(|| "Drag and drop or browse".to_string())]
    pub placeholder: String,
    #[prop_or(false)]
    pub disabled: bool,
    #[prop_or_default]
    pub on_connect: Callback<()>,
    #[prop_or_default]
    pub on_clear: Callback<()>,
    #[prop_or_default]
    pub on_change: Callback<SelectedFile>,
}

/// Stock dropzone markup with a [`DropzoneController`] bound to it.
///
/// Callbacks are captured when the field mounts.
#[function_component(DropzoneField)]
pub fn dropzone_field(props: &DropzoneFieldProps) -> Html {
    let root = use_node_ref();

    {
        let root = root.clone();
        let on_connect = props.on_connect.clone();
        let on_clear = props.on_clear.clone();
        let on_change = props.on_change.clone();

        use_effect_with_deps(
            move |_| {
                let controller = root.cast::<Element>().and_then(|element| {
                    let subscribers = Subscribers::new();
                    subscribers.subscribe(move |notification| match notification {
                        Notification::Connect => on_connect.emit(()),
                        Notification::Clear => on_clear.emit(()),
                        Notification::Change(file) => on_change.emit(file.clone()),
                    });

                    let options = DropzoneOptions::from_element(&element);
                    match DropzoneController::bind(&element, options, subscribers) {
                        Ok(controller) => Some(controller),
                        Err(err) => {
                            tracing::error!(%err, "could not bind dropzone field");
                            None
                        }
                    }
                });

                move || drop(controller)
            },
            (),
        );
    }

    html! {
        <div class="dropzone-container" ref={root}>
            <input
                type="file"
                class="dropzone-input"
                name={props.name.clone()}
                accept={props.accept.clone()}
                disabled={props.disabled}
                data-dropzone-target="input"
            />
            <div class="dropzone-placeholder" data-dropzone-target="placeholder">
                { props.placeholder.clone() }
            </div>
            <div class="dropzone-preview" data-dropzone-target="preview">
                <button
                    type="button"
                    class="dropzone-preview-button"
                    data-dropzone-target="previewClearButton"
                />
                <div class="dropzone-preview-image" data-dropzone-target="previewImage"></div>
                <div class="dropzone-preview-filename" data-dropzone-target="previewFilename"></div>
            </div>
        </div>
    }
}
