use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, ensure, Context};
use dragkit_foundation::{ContentState, SharedContent, Side};
use dragkit_modules::{
    DragModule, ExpandingSwipeSubmodule, ModuleDelegate, ModuleEvent, TranslatingContentSubmodule,
};
use dragkit_view::{DragConfig, DragContext, DragView};
use web_time::Instant;

const ITEM_COUNT: usize = 20;
const ROW_WIDTH: f32 = 1080.0;
const BUTTON_WIDTH: f32 = 200.0;
const LABEL_WIDTH: f32 = 160.0;
const ROW_Y: f32 = 40.0;

const FRAME_MS: i64 = 16;
const MOVE_STEPS: i64 = 10;
const SETTLE_TIMEOUT_MS: i64 = 10_000;

type EventLog = Rc<RefCell<Vec<(Side, ModuleEvent)>>>;

/// One list cell: an engine, its top view and the events its modules raised.
struct Row {
    id: usize,
    view: DragView<ModuleDelegate>,
    top: Rc<RefCell<ContentState>>,
    events: EventLog,
}

impl Row {
    fn new(id: usize, config: DragConfig) -> anyhow::Result<Self> {
        let top = Rc::new(RefCell::new(ContentState::with_width(ROW_WIDTH)));
        let events: EventLog = Rc::default();

        let sink = events.clone();
        let swipe_row = id % 5 == 0;
        let factory = move |side: Side, _view: &DragContext<'_>| {
            let background: SharedContent = ContentState::with_width(ROW_WIDTH).shared();
            let sink = sink.clone();
            let listener = move |side, event| sink.borrow_mut().push((side, event));

            let module = if swipe_row {
                match side {
                    Side::Right => {
                        let label: SharedContent = ContentState::with_width(LABEL_WIDTH).shared();
                        DragModule::swipe(side, background)
                            .with_submodule(ExpandingSwipeSubmodule::new(label))
                    }
                    Side::Left => DragModule::ticker(side, background),
                }
            } else {
                let button: SharedContent = ContentState::with_width(BUTTON_WIDTH).shared();
                DragModule::openable(side, background, button.clone())
                    .with_submodule(TranslatingContentSubmodule::new(button))
            };
            Some(module.with_listener(listener))
        };

        let top_view: SharedContent = top.clone();
        let mut view = DragView::try_new(config)
            .with_context(|| format!("invalid drag config for item {id}"))?;
        view.set_delegate(ModuleDelegate::new(top_view, factory));
        view.on_layout(ROW_WIDTH);

        Ok(Self {
            id,
            view,
            top,
            events,
        })
    }

    /// Rebinding a recycled cell closes it without animation.
    fn rebind(&mut self) {
        self.view.with_delegate(|delegate, view| delegate.reset(view, false));
        self.events.borrow_mut().clear();
    }

    fn report(&self, gesture: &str) {
        let top = self.top.borrow();
        log::info!(
            "item {:>2} {:<14} position {:+.3} offset {:>7.1}px open {:<5} events {:?}",
            self.id,
            gesture,
            self.view.position(),
            top.x,
            self.view.is_open(),
            self.events.borrow()
        );
    }
}

/// Synthetic frame clock shared by every row.
struct Clock {
    now_ms: i64,
}

impl Clock {
    fn frame(&mut self, row: &mut Row) {
        self.now_ms += FRAME_MS;
        row.view.on_frame(self.now_ms as u64 * 1_000_000);
    }

    /// Run frames until the row has no animation or delayed task left.
    fn settle(&mut self, row: &mut Row) -> anyhow::Result<()> {
        let deadline = self.now_ms + SETTLE_TIMEOUT_MS;
        while row.view.is_animating() || row.view.has_pending_delayed() {
            if self.now_ms > deadline {
                bail!("item {} never came to rest", row.id);
            }
            self.frame(row);
        }
        Ok(())
    }

    /// Press at `from`, move to `to` over `duration_ms`, optionally pause, release.
    fn drag(&mut self, row: &mut Row, from: f32, to: f32, duration_ms: i64, pause: bool) {
        row.view.on_pointer_down(from, ROW_Y, self.now_ms);
        let step_ms = (duration_ms / MOVE_STEPS).max(1);
        for step in 1..=MOVE_STEPS {
            self.now_ms += step_ms;
            let x = from + (to - from) * step as f32 / MOVE_STEPS as f32;
            row.view.on_pointer_move(x, ROW_Y, self.now_ms);
        }
        if pause {
            self.now_ms += 100;
            row.view.on_pointer_move(to, ROW_Y, self.now_ms);
        }
        row.view.on_pointer_up(to, ROW_Y, self.now_ms);
    }

    fn click(&mut self, row: &mut Row, x: f32) -> bool {
        row.view.on_pointer_down(x, ROW_Y, self.now_ms);
        self.now_ms += 50;
        row.view.on_pointer_up(x, ROW_Y, self.now_ms)
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Dragkit Gesture Demo ===");
    println!("Replays scripted gestures over {ITEM_COUNT} rows.");
    println!("Set RUST_LOG=debug to see every engine decision.");
    println!();

    let config = DragConfig::default().with_density(2.0);
    let mut rows = (1..=ITEM_COUNT)
        .map(|id| Row::new(id, config))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut clock = Clock { now_ms: 0 };
    let started = Instant::now();

    // Preview both sides of the first row after a short delay.
    let row = &mut rows[0];
    row.view.with_delegate(|delegate, view| delegate.tease(view, 300));
    clock.settle(row)?;
    row.report("tease");

    let row = &mut rows[1];
    clock.drag(row, 100.0, 300.0, 320, true);
    clock.settle(row)?;
    row.report("slow drag");
    ensure!(row.view.is_open(), "item {} should have snapped open", row.id);

    let row = &mut rows[2];
    clock.drag(row, 800.0, 500.0, 60, false);
    clock.settle(row)?;
    row.report("fling left");

    let row = &mut rows[3];
    clock.drag(row, 100.0, 140.0, 320, true);
    clock.settle(row)?;
    row.report("short drag");
    ensure!(!row.view.is_open(), "item {} should have closed", row.id);

    let row = &mut rows[4];
    clock.drag(row, 100.0, 600.0, 400, true);
    clock.settle(row)?;
    row.report("swipe out");

    let row = &mut rows[9];
    clock.drag(row, 800.0, 500.0, 400, true);
    clock.settle(row)?;
    row.report("tick");

    let row = &mut rows[6];
    let clicked = clock.click(row, 540.0);
    row.report(if clicked { "click" } else { "click ignored" });

    // Open a row from code, then recycle every cell.
    let row = &mut rows[7];
    row.view
        .with_delegate(|delegate, view| delegate.open(view, Side::Left, false));
    row.report("open left");

    for row in &mut rows {
        row.rebind();
        clock.settle(row)?;
    }
    let still_open = rows.iter().filter(|row| row.view.is_open()).count();
    ensure!(still_open == 0, "{still_open} rows stayed open after rebinding");

    log::info!(
        "replayed {} ms of gestures in {:?}",
        clock.now_ms,
        started.elapsed()
    );
    Ok(())
}
