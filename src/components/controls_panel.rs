use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub needle: bool,
    pub read_only: bool,
    pub on_toggle_needle: Callback<()>,
    pub on_toggle_read_only: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let needle_cb = {
        let cb = props.on_toggle_needle.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let read_only_cb = {
        let cb = props.on_toggle_read_only.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let needle_label = if props.needle { "Style: needle" } else { "Style: filled arc" };
    let read_only_label = if props.read_only { "Read-only: on" } else { "Read-only: off" };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <button onclick={needle_cb}>{ needle_label }</button>
        <button onclick={read_only_cb}>{ read_only_label }</button>
        <div style="font-size:11px; opacity:0.7;">{"Drag, scroll or double-click to type a value"}</div>
    </div>}
}
