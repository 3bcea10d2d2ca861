/// Native demo: replays a scripted session against a simulated page
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use fadebar::simulated::{advance, pump, SimulatedPage};
    use fadebar::{IndicatorConfig, IndicatorEvent, Mounted, Part, ScrollIndicator};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let config = IndicatorConfig::new(0.85).velocity(2.0).right_offset(4.0);
    let page = SimulatedPage::page(3000.0, 1000.0);

    let mut indicator = match ScrollIndicator::mount(config, page) {
        Ok(Mounted::Ready(indicator)) => indicator,
        Ok(Mounted::NotNeeded(_)) => {
            log::info!("Page fits the viewport, nothing to show");
            return;
        }
        Err(e) => {
            eprintln!("Failed to mount indicator: {}", e);
            return;
        }
    };

    let report = |indicator: &ScrollIndicator<SimulatedPage>, label: &str| {
        let thumb = indicator.thumb();
        log::info!(
            "{:<12} scroll={:>7.1} thumb h={:>6.1} y={:>6.1} {:?}",
            label,
            indicator.env().scroll_offset(),
            thumb.height,
            thumb.offset,
            indicator.visibility()
        );
    };

    report(&indicator, "mounted");

    for offset in [250.0, 500.0, 750.0] {
        indicator.env_mut().scroll_to(offset);
        pump(&mut indicator);
        advance(&mut indicator, Duration::from_millis(400));
    }
    report(&indicator, "scrolled");

    advance(&mut indicator, Duration::from_secs(2));
    report(&indicator, "idle");

    indicator.handle(IndicatorEvent::PointerEnter);
    let start_y = indicator.track().top + indicator.thumb().offset + 10.0;
    indicator.handle(IndicatorEvent::PointerDown {
        y: start_y,
        target: Part::Thumb,
    });
    for step in 1..=5 {
        indicator.handle(IndicatorEvent::PointerMove {
            y: start_y + step as f32 * 40.0,
        });
        pump(&mut indicator);
    }
    indicator.handle(IndicatorEvent::PointerUp);
    report(&indicator, "dragged");

    indicator.handle(IndicatorEvent::PointerLeave);
    report(&indicator, "left");

    indicator.env_mut().resize(700.0);
    pump(&mut indicator);
    report(&indicator, "resized");

    let page = indicator.dispose();
    match serde_json::to_string_pretty(&page.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize snapshot: {}", e),
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
