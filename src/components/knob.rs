use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlInputElement,
    KeyboardEvent, MouseEvent, TouchEvent, WheelEvent,
};
use yew::prelude::*;

use crate::engine::{Effect, KnobCore, Timer};
use crate::geometry::{BoundingBox, Extent, PointerSample};
use crate::model::{InitialValue, KnobConfig};
use crate::render::{self, KnobLayout};
use crate::state::Button;

#[derive(Properties, PartialEq, Clone)]
pub struct KnobProps {
    pub config: KnobConfig,
    /// Read once, when the knob is created.
    #[prop_or_default]
    pub value: InitialValue,
    /// Fired with the new value after every completed gesture or text entry.
    #[prop_or_default]
    pub on_commit: Callback<i64>,
}

/// Carries out core effects against the live canvas, text overlay and timers.
struct KnobHost {
    core: Rc<RefCell<KnobCore>>,
    ctx: CanvasRenderingContext2d,
    input_ref: NodeRef,
    editing: UseStateSetter<bool>,
    on_commit: Rc<RefCell<Callback<i64>>>,
    double_tap: RefCell<Option<Timeout>>,
    wheel_commit: RefCell<Option<Timeout>>,
}

impl KnobHost {
    fn dispatch(self: &Rc<Self>, handler: impl FnOnce(&mut KnobCore) -> Vec<Effect>) {
        let effects = handler(&mut self.core.borrow_mut());
        for effect in effects {
            self.perform(effect);
        }
    }

    fn perform(self: &Rc<Self>, effect: Effect) {
        match effect {
            Effect::RenderNeeded => self.draw(),
            Effect::Committed(value) => {
                let on_commit = self.on_commit.borrow().clone();
                on_commit.emit(value);
            }
            Effect::ArmTimer(timer) => self.arm(timer),
            Effect::CancelTimer(timer) => drop(self.timer_slot(timer).borrow_mut().take()),
            Effect::OpenEditor => {
                self.clear_input();
                self.editing.set(true);
            }
            Effect::CloseEditor => {
                self.clear_input();
                self.editing.set(false);
            }
        }
    }

    fn draw(&self) {
        let core = self.core.borrow();
        let mut ctx = self.ctx.clone();
        if let Err(err) = render::draw(&mut ctx, core.config(), core.value()) {
            log::warn!("knob render failed: {err}");
        }
    }

    /// Replacing the slot drops, and so cancels, the previous timeout.
    fn arm(self: &Rc<Self>, timer: Timer) {
        let host = Rc::clone(self);
        let timeout = Timeout::new(timer.millis(), move || {
            host.dispatch(|core| core.on_timer(timer));
        });
        *self.timer_slot(timer).borrow_mut() = Some(timeout);
    }

    fn timer_slot(&self, timer: Timer) -> &RefCell<Option<Timeout>> {
        match timer {
            Timer::DoubleTap => &self.double_tap,
            Timer::WheelCommit => &self.wheel_commit,
        }
    }

    fn cancel_timers(&self) {
        drop(self.double_tap.borrow_mut().take());
        drop(self.wheel_commit.borrow_mut().take());
    }

    fn clear_input(&self) {
        if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }
}

/// DOM listeners on one target, removed again on drop.
struct Listeners {
    target: EventTarget,
    bound: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    fn new(target: EventTarget) -> Self {
        Self {
            target,
            bound: Vec::new(),
        }
    }

    fn listen<E: JsCast + 'static>(&mut self, kind: &'static str, mut handler: impl FnMut(E) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            handler(event.unchecked_into::<E>());
        });
        if let Err(err) = self
            .target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("could not listen for {kind}: {err:?}");
        }
        self.bound.push((kind, closure));
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (kind, closure) in &self.bound {
            let _ = self
                .target
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}

fn canvas_extent(canvas: &HtmlCanvasElement) -> Extent {
    Extent::new(f64::from(canvas.scroll_width()), f64::from(canvas.scroll_height()))
}

fn mouse_sample(canvas: &HtmlCanvasElement, event: &MouseEvent) -> PointerSample {
    PointerSample::new(
        f64::from(event.offset_x()),
        f64::from(event.offset_y()),
        canvas_extent(canvas),
    )
}

/// Touch count on the canvas and the first touch as a sample.
fn touch_sample(canvas: &HtmlCanvasElement, event: &TouchEvent) -> (u32, Option<PointerSample>) {
    let touches = event.target_touches();
    let first = touches.item(0).map(|touch| {
        let rect = canvas.get_bounding_client_rect();
        let (scroll_x, scroll_y) = web_sys::window()
            .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
            .unwrap_or((0.0, 0.0));
        let extent = canvas_extent(canvas);
        let bounds = BoundingBox {
            left: rect.left() + scroll_x,
            top: rect.top() + scroll_y,
            width: extent.width,
            height: extent.height,
        };
        PointerSample::from_page(f64::from(touch.page_x()), f64::from(touch.page_y()), &bounds)
    });
    (touches.length(), first)
}

fn bind(canvas: &HtmlCanvasElement, host: &Rc<KnobHost>) -> Listeners {
    let mut listeners = Listeners::new(canvas.clone().into());
    // Mouse
    {
        let (host, canvas) = (host.clone(), canvas.clone());
        listeners.listen("mousedown", move |e: MouseEvent| {
            e.prevent_default();
            if let Some(button) = Button::from_buttons(e.buttons()) {
                let sample = mouse_sample(&canvas, &e);
                host.dispatch(|core| core.on_pointer_down(button, sample));
            }
        });
    }
    {
        let (host, canvas) = (host.clone(), canvas.clone());
        listeners.listen("mousemove", move |e: MouseEvent| {
            e.prevent_default();
            let sample = mouse_sample(&canvas, &e);
            host.dispatch(|core| core.on_pointer_move(sample));
        });
    }
    {
        let (host, canvas) = (host.clone(), canvas.clone());
        listeners.listen("mouseup", move |e: MouseEvent| {
            e.prevent_default();
            let sample = mouse_sample(&canvas, &e);
            host.dispatch(|core| core.on_pointer_up(sample));
        });
    }
    {
        let host = host.clone();
        listeners.listen("mouseleave", move |_e: MouseEvent| {
            host.dispatch(KnobCore::on_pointer_leave);
        });
    }
    {
        let host = host.clone();
        listeners.listen("dblclick", move |e: MouseEvent| {
            e.prevent_default();
            host.dispatch(KnobCore::on_double_click);
        });
    }
    // Secondary button opens the editor instead of the browser menu.
    listeners.listen("contextmenu", |e: Event| e.prevent_default());
    // Wheel
    {
        let host = host.clone();
        listeners.listen("wheel", move |e: WheelEvent| {
            e.prevent_default();
            let delta_y = e.delta_y();
            host.dispatch(|core| core.on_wheel(delta_y));
        });
    }
    // Touch
    {
        let (host, canvas) = (host.clone(), canvas.clone());
        listeners.listen("touchstart", move |e: TouchEvent| {
            let (touches, sample) = touch_sample(&canvas, &e);
            host.dispatch(|core| core.on_touch_start(touches, sample));
        });
    }
    {
        let (host, canvas) = (host.clone(), canvas.clone());
        listeners.listen("touchmove", move |e: TouchEvent| {
            e.prevent_default();
            let (touches, sample) = touch_sample(&canvas, &e);
            host.dispatch(|core| core.on_touch_move(touches, sample));
        });
    }
    {
        let host = host.clone();
        listeners.listen("touchend", move |e: TouchEvent| {
            // Also suppresses the emulated mouse events that would follow.
            e.prevent_default();
            let remaining = e.target_touches().length();
            host.dispatch(|core| core.on_touch_end(remaining));
        });
    }
    {
        let host = host.clone();
        listeners.listen("touchcancel", move |_e: TouchEvent| {
            host.dispatch(KnobCore::on_touch_cancel);
        });
    }
    listeners
}

#[function_component(Knob)]
pub fn knob(props: &KnobProps) -> Html {
    let canvas_ref = use_node_ref();
    let input_ref = use_node_ref();
    let editing = use_state(|| false);
    let core = {
        let config = props.config.clone();
        let value = props.value.clone();
        use_mut_ref(move || KnobCore::new(config, &value))
    };
    let host_ref = use_mut_ref(|| None::<Rc<KnobHost>>);
    let on_commit = use_mut_ref(|| props.on_commit.clone());

    // Keep the latest commit callback for the host
    {
        let on_commit = on_commit.clone();
        use_effect_with(props.on_commit.clone(), move |cb| {
            *on_commit.borrow_mut() = cb.clone();
            || ()
        });
    }

    // Attach canvas, first draw, listeners
    {
        let canvas_ref = canvas_ref.clone();
        let input_ref = input_ref.clone();
        let core = core.clone();
        let host_ref = host_ref.clone();
        let on_commit = on_commit.clone();
        let editing = editing.setter();
        use_effect_with((), move |_| {
            let listeners = canvas_ref.cast::<HtmlCanvasElement>().and_then(|canvas| {
                match render::context_2d(&canvas) {
                    Ok(ctx) => {
                        let host = Rc::new(KnobHost {
                            core,
                            ctx,
                            input_ref,
                            editing,
                            on_commit,
                            double_tap: RefCell::new(None),
                            wheel_commit: RefCell::new(None),
                        });
                        host.draw();
                        *host_ref.borrow_mut() = Some(host.clone());
                        Some(bind(&canvas, &host))
                    }
                    Err(err) => {
                        log::error!("knob canvas unavailable: {err}");
                        None
                    }
                }
            });
            move || {
                drop(listeners);
                if let Some(host) = host_ref.borrow_mut().take() {
                    host.cancel_timers();
                }
            }
        });
    }

    // Config replaced by the owner: re-render with it
    {
        let host_ref = host_ref.clone();
        use_effect_with(props.config.clone(), move |config| {
            let host = host_ref.borrow().clone();
            if let Some(host) = host {
                let config = config.clone();
                host.dispatch(move |core| core.set_config(config));
            }
            || ()
        });
    }

    // Focus the entry once the overlay is on screen
    {
        let input_ref = input_ref.clone();
        use_effect_with(*editing, move |open| {
            if *open {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    if let Err(err) = input.focus() {
                        log::warn!("could not focus knob entry: {err:?}");
                    }
                }
            }
            || ()
        });
    }

    let onkeyup = {
        let host_ref = host_ref.clone();
        Callback::from(move |e: KeyboardEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let key = e.key();
            let text = input.value();
            let host = host_ref.borrow().clone();
            if let Some(host) = host {
                host.dispatch(|core| core.on_editor_key(&key, &text));
            }
        })
    };

    let config = &props.config;
    let layout = KnobLayout::new(config);
    let overlay_style = format!(
        "position:absolute; left:0; right:0; top:0; bottom:0; align-items:center; justify-content:center; display:{};",
        if *editing { "flex" } else { "none" }
    );
    let input_style = format!(
        "font-size:{}px; color:{}; width:150px; margin:auto; text-align:center; padding:0;",
        layout.value_font_px, config.color_fg
    );
    html! {
        <div class="knob" style="display:inline-block; position:relative; text-align:center;">
            <canvas ref={canvas_ref} width={config.width.to_string()} height={config.height.to_string()} />
            <div style={overlay_style}>
                <input ref={input_ref} type="number" style={input_style} {onkeyup} />
            </div>
        </div>
    }
}
