use crate::components::dropzone_field::DropzoneField;
use crate::dropzone::SelectedFile;
use yew::prelude::*;

pub struct App {
    selected: Option<SelectedFile>,
    logs: Vec<String>,
}

pub enum Msg {
    Connected,
    Cleared,
    FileChanged(SelectedFile),
    AddLog(String),
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            selected: None,
            logs: vec!["Dropzone demo ready".to_string()],
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Connected => {
                self.add_log(ctx, "dropzone:connect".to_string());
                false
            }
            Msg::Cleared => {
                self.selected = None;
                self.add_log(ctx, "dropzone:clear".to_string());
                true
            }
            Msg::FileChanged(file) => {
                let kind = if file.is_image() { "image" } else { "file" };
                self.add_log(
                    ctx,
                    format!("dropzone:change {} '{}' ({})", kind, file.name, display_mime(&file)),
                );
                self.selected = Some(file);
                true
            }
            Msg::AddLog(log) => {
                self.logs.push(log);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="app-container">
                <header>
                    <h1>{ "Dropzone" }</h1>
                </header>

                <main>
                    <div class="panel">
                        <h2>{ "Attachment" }</h2>
                        <DropzoneField
                            name="attachment"
                            on_connect={ctx.link().callback(|_| Msg::Connected)}
                            on_clear={ctx.link().callback(|_| Msg::Cleared)}
                            on_change={ctx.link().callback(Msg::FileChanged)}
                        />

                        {
                            match &self.selected {
                                Some(file) => html! {
                                    <p class="selection">
                                        { format!("Selected: {} ({})", file.name, display_mime(file)) }
                                    </p>
                                },
                                None => html! {
                                    <p class="selection">{ "No file selected" }</p>
                                },
                            }
                        }
                    </div>

                    <div class="panel">
                        <h2>{ "Events" }</h2>
                        <div class="logs-container">
                            {
                                for self.logs.iter().map(|log| {
                                    html! { <div class="log-entry">{ log }</div> }
                                })
                            }
                        </div>
                    </div>
                </main>
            </div>
        }
    }
}

impl App {
    fn add_log(&mut self, ctx: &Context<Self>, message: String) {
        let timestamp = js_sys::Date::new_0().to_locale_time_string("en-US");
        let log_entry = format!("[{}] {}", timestamp, message);
        ctx.link().send_message(Msg::AddLog(log_entry));
    }
}

fn display_mime(file: &SelectedFile) -> &str {
    if file.mime_type.is_empty() {
        "unknown type"
    } else {
        &file.mime_type
    }
}
