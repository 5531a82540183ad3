// Example: binding a controller to a host scroll container.
use std::sync::{Arc, Mutex};

use listwindow::EngineOptions;
use listwindow_adapter::{Controller, ScrollElement};

#[derive(Debug, Default)]
struct Viewport {
    top: u64,
    height: u32,
}

#[derive(Clone, Default)]
struct Handle(Arc<Mutex<Viewport>>);

impl ScrollElement for Handle {
    fn scroll_top(&self) -> u64 {
        self.0.lock().map(|v| v.top).unwrap_or(0)
    }

    fn client_height(&self) -> u32 {
        self.0.lock().map(|v| v.height).unwrap_or(0)
    }
}

fn main() {
    let handle = Handle::default();
    if let Ok(mut v) = handle.0.lock() {
        v.height = 600;
    }

    let options = EngineOptions::new(|id: &u32| *id).with_item_height(30);
    let getter = handle.clone();
    let Ok(mut controller) = Controller::new((0..5_000).collect(), options, move || {
        Some(getter.clone())
    }) else {
        return;
    };

    let sub = controller.attach();
    println!("attached: range={:?}", controller.engine().window().range());

    for (now_ms, top) in [(0, 300), (16, 900), (32, 1_800)] {
        if let Ok(mut v) = handle.0.lock() {
            v.top = top;
        }
        let delivery = controller.on_scroll(&sub, now_ms);
        println!(
            "t={now_ms} {delivery:?} range={:?} scrolling={}",
            controller.engine().window().range(),
            controller.engine().is_scrolling()
        );
    }

    controller.tick(200);
    println!("idle: scrolling={}", controller.engine().is_scrolling());
    controller.detach(sub);
}
