use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CommitPanelProps {
    pub last: Option<i64>,
    pub count: u32,
}

#[function_component]
pub fn CommitPanel(props: &CommitPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let last = props
        .last
        .map_or_else(|| "-".to_string(), |v| v.to_string());
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:200px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={format!("{} color:#ff8800;", label_style)}>{"Committed"}</span>
                <span style={format!("{} color:#ff8800;", value_style)}>{ last }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Commits"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ props.count }</span>
            </div>
        </div>
    }
}
