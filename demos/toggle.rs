use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use toggler::{bind, Animation, Display, Element, MemDom, Speed, ToggleOptions};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("toggle.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let dom = MemDom::instant();

    // Disclosure row: a link whose span label tracks the content region
    // sitting next to it. Everything below runs on the default lookups.
    let row = dom.root().append("div");
    let link = row.append("a");
    let label = link.append("span").with_text("More");
    let details = row
        .append("div")
        .with_class("toggler-content")
        .with_text("The fine print.");
    details.set_display(Display::None);

    bind(
        link.clone(),
        ToggleOptions::new().on_complete(|_, trigger| {
            println!("    settled: shown={} ({:?})", trigger.shown, trigger.cause);
        }),
    );
    println!(
        "bound: label={:?} display={:?}",
        label.text(),
        details.display()
    );

    for _ in 0..2 {
        link.click();
        println!(
            "clicked: label={:?} display={:?}",
            label.text(),
            details.display()
        );
    }

    // Notice banner: fades instead of sliding, target named explicitly, no
    // handle to keep in sync.
    let banner = dom.root().append("div").with_id("banner");
    let mute = dom.root().append("a");
    let notice = bind(
        mute,
        ToggleOptions::new()
            .animation(Animation::Fade)
            .speed(Speed::Fast)
            .target(banner.clone())
            .no_handle(),
    );

    notice.hide();
    println!("banner muted: opacity={}", banner.opacity());
    notice.show();
    println!("banner restored: opacity={}", banner.opacity());

    // Queued document: transitions sit in the pending list until the host
    // pumps them, so the rest state lands only on completion.
    let queued = MemDom::new();
    let wrap = queued.root().append("div");
    let toggle = wrap.append("a");
    toggle.append("span").with_text("More");
    let panel = wrap.append("div").with_class("toggler-content");

    let controller = bind(toggle, ToggleOptions::new());
    controller.hide();
    println!(
        "hide requested: pending={} display={:?}",
        queued.pending(),
        panel.display()
    );
    queued.complete_all();
    println!(
        "pumped: pending={} display={:?}",
        queued.pending(),
        panel.display()
    );

    Ok(())
}
