//! DOM overlays: the gradient score ticker with its sliding marker, and the
//! one-time GAME OVER screen.

use std::cell::Cell;

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::game::Game;
use crate::ui;

const GAME_OVER_STYLE: &str = "box-sizing:border-box; position:fixed; left:0; top:0; \
    width:100%; height:100%; z-index:10; background:rgba(0,0,0,0.75); \
    font:bold 48px arial; padding:10vh 10vw; text-align:center; color:white";

/// Build the ticker and bind it to the store. The subscription lives for
/// the whole session, so the returned guard is dropped on purpose.
pub fn mount(doc: &Document, game: &mut Game) -> Result<(), JsValue> {
    let app = doc
        .get_element_by_id("app")
        .ok_or_else(|| JsValue::from_str("no #app element"))?;

    let ticker = doc.create_element("div")?;
    ticker.set_attribute("style", &ticker_style(game.geometry().width))?;
    let marker = doc.create_element("div")?;
    marker.set_attribute("style", &marker_style(50.0))?;
    ticker.append_child(&marker)?;
    app.append_child(&ticker)?;

    let score_min = game.tuning().score_min;
    let score_max = game.tuning().score_max;
    let latched = Cell::new(false);
    let doc = doc.clone();
    let _ = game.subscribe(move |state| {
        let percent = ui::marker_percent(state.score(), score_min, score_max);
        let _ = marker.set_attribute("style", &marker_style(percent));
        // Latched: repeated floor-score updates must not stack overlays.
        if state.score() <= score_min && !latched.get() {
            latched.set(true);
            let _ = mount_game_over(&doc);
        }
    });
    Ok(())
}

/// The bar matches the canvas width, pinned bottom-center of the viewport.
fn ticker_style(width: f64) -> String {
    let half = width / 2.0;
    format!(
        "position:fixed; bottom:0; left:50%; width:{width}px; height:40px; \
         margin-left:-{half}px; background:linear-gradient(to right, rgba(255,50,50,1) 0%, \
         rgba(255,225,0,1) 50%, rgba(255,225,0,1) 51%, rgba(45,255,101,1) 100%)"
    )
}

fn marker_style(percent: f64) -> String {
    format!(
        "border:solid 8px white; width:40px; height:40px; position:absolute; \
         border-radius:40px; left:{percent}%; margin-left:-20px; \
         transition:left 0.2s ease-in-out"
    )
}

fn mount_game_over(doc: &Document) -> Result<(), JsValue> {
    let overlay = doc.create_element("div")?;
    overlay.set_attribute("style", GAME_OVER_STYLE)?;
    overlay.set_text_content(Some("GAME OVER"));
    doc.get_element_by_id("app")
        .ok_or_else(|| JsValue::from_str("no #app element"))?
        .append_child(&overlay)?;
    Ok(())
}
