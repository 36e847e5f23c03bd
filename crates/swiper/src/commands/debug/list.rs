use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use swiper_windows::inspect;

pub fn execute() {
    let groups = match inspect::switchable_by_display() {
        Ok(groups) => groups,
        Err(e) => {
            eprintln!("Failed to scan windows: {e}");
            std::process::exit(1);
        }
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Monitor"),
            Cell::new("#").set_alignment(CellAlignment::Right),
            Cell::new("HWND"),
            Cell::new("Title"),
            Cell::new("Class"),
        ]);

    let mut count = 0;
    for (i, (display, windows)) in groups.iter().enumerate() {
        let label = format!(
            "{}{} {}x{}",
            i + 1,
            if display.primary { "*" } else { "" },
            display.work_area.width,
            display.work_area.height
        );
        for (index, window) in windows.iter().enumerate() {
            table.add_row(vec![
                Cell::new(&label),
                Cell::new(index).set_alignment(CellAlignment::Right),
                Cell::new(format!("0x{:X}", window.hwnd)),
                Cell::new(&window.title),
                Cell::new(&window.class),
            ]);
            count += 1;
        }
    }

    println!("{table}");
    println!("\n{count} switchable windows found");
}
