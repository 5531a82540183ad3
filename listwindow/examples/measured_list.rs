// Example: estimated heights refined by measuring rendered rows.
use listwindow::{EngineOptions, EngineState, MeasuredElement};

struct RenderedRow {
    index: String,
    height: u32,
}

impl MeasuredElement for RenderedRow {
    fn index_attribute(&self) -> Option<&str> {
        Some(&self.index)
    }

    fn measured_height(&self) -> u32 {
        self.height
    }
}

fn main() {
    let messages: Vec<String> = (0..1_000)
        .map(|i| "lorem ipsum ".repeat(1 + i % 7))
        .collect();

    let options = EngineOptions::new(|m: &String| m.clone()).with_estimate_height(|_| 24);
    let Ok(mut engine) = EngineState::new(messages, options) else {
        return;
    };
    engine.on_resize(300);
    println!("estimated total={}", engine.total_height());

    // Pretend the host laid out every visible row and reported its wrapped height.
    let rendered: Vec<RenderedRow> = engine
        .virtual_items()
        .iter()
        .map(|item| RenderedRow {
            index: item.index.to_string(),
            height: 16 * (1 + engine.items()[item.index].len() as u32 / 40),
        })
        .collect();
    engine.batch_update(|engine| {
        for row in &rendered {
            if let Err(err) = engine.measure_height_ref(Some(row)) {
                eprintln!("measurement rejected: {err}");
            }
        }
    });

    println!("measured total={}", engine.total_height());
    for item in engine.virtual_items() {
        println!(
            "#{:<3} top={:<5} height={:<3} measured={}",
            item.index,
            item.offset_top,
            item.height,
            engine.is_measured(item.index)
        );
    }

    let broken = RenderedRow {
        index: "not-a-number".into(),
        height: 10,
    };
    if let Err(err) = engine.measure_height_ref(Some(&broken)) {
        println!("rejected: {err}");
    }
}
