// Example: identity keys keep measurements attached to items across a reorder.
use listwindow::{EngineOptions, EngineState};

fn main() {
    let ids: Vec<u64> = (0..100).map(|i| 1_000 + i).collect();

    let options = EngineOptions::new(|id: &u64| *id).with_estimate_height(|_| 10);
    let Ok(mut engine) = EngineState::new(ids, options) else {
        return;
    };
    engine.on_resize(40);

    let _ = engine.record_measurement(0, 30);
    println!("before: key={:?} height={:?}", engine.key_for(0), engine.item_height(0));

    engine.update_items(|mut ids| {
        ids.rotate_right(1);
        ids
    });
    println!("after:  key={:?} height={:?}", engine.key_for(0), engine.item_height(0));
    println!("        key={:?} height={:?}", engine.key_for(1), engine.item_height(1));
}
