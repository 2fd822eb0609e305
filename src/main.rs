//! Teeter entry point
//!
//! Handles platform-specific initialization and wires the DOM to the model.
//!
//! Page contract: `#plank` is the beam, `.pivot` the fulcrum, `#left-total`
//! and `#right-total` the per-side weight readouts, `#reset-btn` the reset
//! control. Blocks are rendered as `div.block` children of the plank so
//! they rotate with it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlElement, MouseEvent};

    use teeter::consts::*;
    use teeter::{LeverModel, click_to_factor, factor_to_percent, persistence};

    /// App instance: the model plus the measured beam half-span
    struct App {
        model: LeverModel,
        half_width: f32,
    }

    impl App {
        fn new(seed: u64) -> Self {
            Self {
                model: LeverModel::new(seed),
                half_width: REFERENCE_HALF_WIDTH,
            }
        }
    }

    /// Half the plank's current client width, if it has laid out yet
    fn measure_half_width() -> Option<f32> {
        let document = web_sys::window()?.document()?;
        let plank = document.get_element_by_id("plank")?;
        let half = plank.client_width() as f32 / 2.0;
        (half > 0.0).then_some(half)
    }

    /// Full redraw: beam tilt, per-side totals, one block per item.
    /// Idempotent, driven after every mutation and on resize.
    fn render(app: &App) {
        let balance = app.model.balance(app.half_width);
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(plank) = document.get_element_by_id("plank") {
            if let Ok(plank) = plank.dyn_into::<HtmlElement>() {
                let _ = plank
                    .style()
                    .set_property("transform", &format!("rotate({}deg)", balance.angle_deg));

                // Rebuild the blocks from scratch; they ride the plank's rotation
                plank.set_inner_html("");
                for item in app.model.items() {
                    let Ok(block) = document.create_element("div") else {
                        continue;
                    };
                    block.set_class_name("block");
                    if let Ok(block) = block.dyn_into::<HtmlElement>() {
                        let _ = block.style().set_property(
                            "left",
                            &format!("{}%", factor_to_percent(item.position_factor)),
                        );
                        let _ = block.style().set_property("transform", "translateX(-50%)");
                        block.set_text_content(Some(&item.weight.to_string()));
                        let _ = plank.append_child(&block);
                    }
                }
            }
        }

        if let Some(el) = document.get_element_by_id("left-total") {
            el.set_text_content(Some(&format!("Left weight: {} kg", balance.left_weight)));
        }
        if let Some(el) = document.get_element_by_id("right-total") {
            el.set_text_content(Some(&format!("Right weight: {} kg", balance.right_weight)));
        }
    }

    fn setup_click_handler(plank: &Element, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut app = app.borrow_mut();

            // The plank's rect skews while rotated; the untransformed pivot
            // supplies a stable center for the click mapping.
            let document = web_sys::window().unwrap().document().unwrap();
            let Some(pivot) = document.query_selector(".pivot").ok().flatten() else {
                return;
            };
            let rect = pivot.get_bounding_client_rect();
            let center_x = (rect.left() + rect.width() / 2.0) as f32;

            let factor = click_to_factor(event.client_x() as f32, center_x, app.half_width);
            let placed = app.model.add_random_weight(factor).copied();
            if let Some(item) = placed {
                log::info!(
                    "Placed {} kg at factor {:.3}",
                    item.weight,
                    item.position_factor
                );
                persistence::save(app.model.items());
                render(&app);
            }
        });
        let _ = plank.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.model.clear();
                persistence::clear();
                render(&app);
                log::info!("Beam reset");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            app.half_width = measure_half_width().unwrap_or(REFERENCE_HALF_WIDTH);
            render(&app);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Teeter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let plank = document.get_element_by_id("plank").expect("no plank");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Model initialized with seed: {}", seed);

        {
            let mut app = app.borrow_mut();
            app.half_width = measure_half_width().unwrap_or(REFERENCE_HALF_WIDTH);

            // Seed the model from any saved state (legacy saves upgrade here)
            match persistence::load() {
                Some(saved) => {
                    let admitted = app.model.load_from(&saved);
                    log::info!("Restored {} of {} saved items", admitted, saved.len());
                }
                None => log::info!("No saved state, starting empty"),
            }
        }

        setup_click_handler(&plank, app.clone());
        setup_reset_button(app.clone());
        setup_resize_handler(app.clone());

        // Initial render
        render(&app.borrow());

        log::info!("Teeter running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Teeter (native) starting...");
    log::info!("Native mode has no UI - run with `trunk serve` for the web version");

    // Run a sanity scenario
    println!("\nRunning balance scenario...");
    demo_balance();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_balance() {
    use teeter::LeverModel;
    use teeter::consts::REFERENCE_HALF_WIDTH;

    let mut model = LeverModel::new(0);
    model.add_weight(4, -0.6).expect("valid placement");
    model.add_weight(6, 0.5).expect("valid placement");

    let balance = model.balance(REFERENCE_HALF_WIDTH);
    assert!((balance.angle_deg - 15.0).abs() < 1e-4, "Beam should tilt 15°");
    println!("✓ Balance scenario passed!");
}
