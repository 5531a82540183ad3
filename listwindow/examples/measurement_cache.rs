// Example: persist measurements and warm up a fresh engine with them.
use listwindow::{EngineOptions, EngineState};

fn main() {
    let options = EngineOptions::new(|id: &u32| *id).with_estimate_height(|_| 20);
    let Ok(mut first) = EngineState::new((0..500).collect(), options.clone()) else {
        return;
    };
    first.on_resize(200);
    for index in 0..10 {
        let _ = first.record_measurement(index, 20 + index as u32 * 3);
    }
    let snapshot = first.export_measurements();
    println!("exported {} measurements", snapshot.len());

    let Ok(mut second) = EngineState::new((0..500).collect(), options) else {
        return;
    };
    second.import_measurements(snapshot);
    second.on_resize(200);
    println!(
        "first total={} second total={}",
        first.total_height(),
        second.total_height()
    );
}
