use std::rc::Rc;

use super::{commit_panel::CommitPanel, controls_panel::ControlsPanel, knob::Knob};
use crate::model::{InitialValue, KnobConfig};
use yew::prelude::*;

/// Commits seen from the knob so far.
#[derive(Default, PartialEq)]
struct CommitLog {
    last: Option<i64>,
    count: u32,
}

impl Reducible for CommitLog {
    type Action = i64;

    fn reduce(self: Rc<Self>, value: i64) -> Rc<Self> {
        Rc::new(Self {
            last: Some(value),
            count: self.count + 1,
        })
    }
}

fn body_attribute(name: &str) -> Option<String> {
    web_sys::window()?.document()?.body()?.get_attribute(name)
}

fn load_config() -> KnobConfig {
    match body_attribute("data-knob-config") {
        Some(raw) => KnobConfig::from_json(&raw).unwrap_or_else(|err| {
            log::error!("{err}; falling back to defaults");
            KnobConfig::default()
        }),
        None => KnobConfig::default(),
    }
}

fn load_value() -> InitialValue {
    body_attribute("data-knob-value")
        .map(InitialValue::Text)
        .unwrap_or_default()
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(load_config);
    let value = use_state(load_value);
    let commits = use_reducer(CommitLog::default);

    let on_commit = {
        let commits = commits.clone();
        Callback::from(move |value: i64| commits.dispatch(value))
    };
    let on_toggle_needle = {
        let config = config.clone();
        Callback::from(move |()| {
            let mut next = (*config).clone();
            next.needle = !next.needle;
            config.set(next);
        })
    };
    let on_toggle_read_only = {
        let config = config.clone();
        Callback::from(move |()| {
            let mut next = (*config).clone();
            next.read_only = !next.read_only;
            config.set(next);
        })
    };

    html! {
        <div style="position:relative; min-height:100vh; display:flex; align-items:center; justify-content:center; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
            <CommitPanel last={commits.last} count={commits.count} />
            <ControlsPanel
                needle={config.needle}
                read_only={config.read_only}
                {on_toggle_needle}
                {on_toggle_read_only}
            />
            <Knob config={(*config).clone()} value={(*value).clone()} {on_commit} />
        </div>
    }
}
