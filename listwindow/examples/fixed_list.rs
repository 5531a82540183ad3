// Example: a fixed-height list of 10k rows, scrolled and reversed.
use listwindow::{EngineOptions, EngineState};

#[derive(Clone, Debug)]
struct Row {
    id: u32,
    label: String,
}

fn main() {
    let rows: Vec<Row> = (0..10_000)
        .map(|id| Row {
            id,
            label: format!("row {id}"),
        })
        .collect();

    let options = EngineOptions::new(|row: &Row| row.id)
        .with_item_height(40)
        .with_overscan(5)
        .with_on_change(Some(|window: &listwindow::WindowResult<u32>, scrolling: bool| {
            println!(
                "on_change: range={:?} scrolling={scrolling}",
                window.range()
            );
        }));
    let Ok(mut engine) = EngineState::new(rows, options) else {
        return;
    };

    engine.on_resize(750);
    println!("total_height={}", engine.total_height());

    engine.on_scroll(123_456, 0);
    for item in engine.virtual_items().iter().take(3) {
        let row = &engine.items()[item.index];
        println!("{} at {}..{}", row.label, item.offset_top, item.offset_bottom());
    }

    engine.tick(150);
    engine.reverse_items();
    let first = engine.virtual_items().first().map(|i| &engine.items()[i.index].label);
    println!("after reverse, first rendered: {first:?}");
}
