//! Browser bindings: canvas, keyboard, visibility, audio and the frame
//! loop. Everything here is wiring; gameplay lives in the host-agnostic
//! core and is reached only through [`Game`]'s entry points.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, window};

use crate::audio::AudioOut;
use crate::config::{Geometry, Tuning};
use crate::game::Game;

mod audio;
mod hud;
mod surface;

use audio::WebAudio;
use surface::CanvasSurface;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Build the page, wire the listeners and arm the frame loop. The loop
/// itself only starts once the background track reports `canplaythrough`.
pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.set_attribute("style", "margin:0")?;

    let viewport_h = win
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    let geometry = Geometry::new(480.0, viewport_h - 40.0);
    let tuning = Tuning::default();

    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    canvas.set_width(geometry.width as u32);
    canvas.set_height(geometry.height as u32);
    canvas.set_attribute("style", "display:block; margin:0 auto; transform:translateZ(0)")?;
    doc.get_element_by_id("app")
        .ok_or_else(|| JsValue::from_str("no #app element"))?
        .append_child(&canvas)?;

    let perf = win
        .performance()
        .ok_or_else(|| JsValue::from_str("no performance"))?;
    let now = perf.now();
    let game = Rc::new(RefCell::new(Game::new(
        tuning,
        geometry,
        now.to_bits(),
        now,
    )));

    let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas)?));
    let audio = Rc::new(RefCell::new(WebAudio::new()?));

    hud::mount(&doc, &mut game.borrow_mut())?;

    // Keyboard input goes straight to the core; it does its own filtering.
    {
        let game = game.clone();
        let audio = audio.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let mut audio = audio.borrow_mut();
            game.borrow_mut().key_pressed(&evt.key(), &mut *audio);
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Tab visibility suspends and resumes the session clock.
    {
        let game = game.clone();
        let audio = audio.clone();
        let doc_v = doc.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let now = window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0);
            let mut audio = audio.borrow_mut();
            game.borrow_mut()
                .visibility_changed(doc_v.hidden(), now, &mut *audio);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // The browser may fire canplaythrough again after a seek or a stall;
    // taking the surface out of the slot makes sure only the first event
    // starts a loop.
    {
        let game = game.clone();
        let audio_for_loop = audio.clone();
        let loop_slot = Rc::new(RefCell::new(Some(surface)));
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(surface) = loop_slot.borrow_mut().take() {
                audio_for_loop.borrow_mut().music_play();
                start_frame_loop(game.clone(), surface, audio_for_loop.clone());
            }
        }) as Box<dyn FnMut(_)>);
        audio
            .borrow()
            .music_element()
            .add_event_listener_with_callback("canplaythrough", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn start_frame_loop(
    game: Rc<RefCell<Game>>,
    surface: Rc<RefCell<CanvasSurface>>,
    audio: Rc<RefCell<WebAudio>>,
) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let keep_going = {
            let mut surface = surface.borrow_mut();
            let mut audio = audio.borrow_mut();
            game.borrow_mut().frame(ts, &mut *surface, &mut *audio)
        };
        if keep_going {
            if let Some(w) = window() {
                let _ = w
                    .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
