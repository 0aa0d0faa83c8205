//! Dual-list walkthrough on the console.
//!
//! Builds a grouped language picker, then drives the widget the way a
//! UI front end would: toggle, search, reorder, and watch the limit.
//! Set `RUST_LOG=picklist=trace,picklist_core=trace` to see the engine's
//! tracing output.
//!
//! Run with: cargo run -p picklist --example dual_list

use picklist::{
    AvailableEntry, HostSelect, OptionGroup, Picklist, PicklistSettings, SelectOption,
};
use tracing_subscriber::EnvFilter;

fn print_views(widget: &Picklist) {
    let available = widget.available();
    if let Some(header) = &available.header {
        println!("== {header} ==");
    }
    for entry in &available.entries {
        match entry {
            AvailableEntry::Group(group) => {
                println!("  [{}]", group.label);
                for row in &group.rows {
                    let mark = if row.selected { "*" } else { " " };
                    println!("   {mark} {}", row.label);
                }
            }
            AvailableEntry::Item(row) => {
                let mark = if row.selected { "*" } else { " " };
                println!("  {mark} {}", row.label);
            }
        }
    }

    let chosen = widget.chosen();
    if let Some(header) = &chosen.header {
        println!("== {header} ==");
    }
    for row in &chosen.rows {
        println!("  - {}", row.label);
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut host = HostSelect::new();
    let systems = host.add_group(OptionGroup::new("Systems"));
    let scripting = host.add_group(OptionGroup::new("Scripting"));
    host.add_option(SelectOption::new("rs", "Rust").with_group(systems));
    host.add_option(SelectOption::new("c", "C").with_group(systems));
    host.add_option(SelectOption::new("py", "Python").with_group(scripting));
    host.add_option(SelectOption::new("lua", "Lua").with_group(scripting));
    host.add_option(SelectOption::new("hs", "Haskell"));

    let settings = PicklistSettings::new()
        .with_headers("Available", "Chosen")
        .with_limit(3)
        .with_on_limit_reached(|| println!("(limit reached)"));

    let mut widget = Picklist::init(host, settings).expect("multi-choice host");

    println!("Initial state:");
    print_views(&widget);

    println!("Toggle Rust and Python:");
    widget.toggle(0);
    widget.toggle(2);
    print_views(&widget);

    println!("Search for \"lu\":");
    widget.set_query("lu");
    print_views(&widget);
    widget.clear_query();

    println!("Toggle Haskell (third pick hits the limit):");
    widget.toggle(4);
    print_views(&widget);

    println!("Move Haskell to the top:");
    widget.set_highlight(Some(4));
    widget.move_up();
    widget.move_up();
    print_views(&widget);

    println!("Persisted order: {:?}", widget.stored_order());
}
