//! Pages through 30k synthetic account rows with the lazy machinery,
//! printing what the viewport sees and how little was actually fetched.
//!
//! Run with `RUST_LOG=debug` to watch the loads happen.

mod host;

use std::rc::Rc;

use kea_core::{Column, DataType, SortOrder, SortableModel};
use kea_foundation::lazy::{LazyListUpdater, LazySummary, UpdaterConfig};
use kea_testing::{FetchError, VecRowSource};

use host::{ConsoleView, MainLoop};

const ROWS: usize = 30_000;
const PAGE_ROWS: usize = 15;

#[derive(Clone, Debug)]
struct Account {
    id: usize,
    holder: String,
    balance: f64,
}

fn accounts() -> Vec<Account> {
    (0..ROWS)
        .map(|id| Account {
            id,
            holder: format!("account-{id:05}"),
            balance: ((id * 7919) % 100_000) as f64 / 100.0,
        })
        .collect()
}

fn columns() -> Rc<[Column]> {
    vec![
        Column::new("Holder").attribute("holder").data_type(DataType::Str),
        Column::new("Balance")
            .attribute("balance")
            .data_type(DataType::Float),
    ]
    .into()
}

fn main() -> Result<(), FetchError> {
    env_logger::init();

    let rows = accounts();
    let total_balance: f64 = rows.iter().map(|account| account.balance).sum();
    let source = VecRowSource::new(rows)
        .with_ordering("holder", |a: &Account, b: &Account| a.holder.cmp(&b.holder))
        .with_ordering("balance", |a: &Account, b: &Account| {
            a.balance.total_cmp(&b.balance)
        });

    let view = Rc::new(ConsoleView::new(PAGE_ROWS));
    view.set_sort_state(Some(0), SortOrder::Ascending);
    let main_loop = Rc::new(MainLoop::new());
    let updater = LazyListUpdater::with_config(
        Rc::clone(&view),
        columns(),
        main_loop.clone(),
        UpdaterConfig::new(),
    );
    updater.attach(source.clone())?;

    // A user paging downward, pausing between jumps.
    for offset in [0usize, 120, 480, 5_000, 29_985] {
        view.scroll_to(offset);
        updater.on_scroll_changed();
        main_loop.run_until_idle();
        println!("-- viewport at row {offset} --");
        view.render(|account| {
            format!(
                "#{:<6} {:<14} {:>9.2}",
                account.id, account.holder, account.balance
            )
        });
    }

    // A fling: a burst of scroll signals inside the debounce window
    // collapses to a single load at the resting position.
    for offset in (10_000..10_200).step_by(40) {
        view.scroll_to(offset);
        updater.on_scroll_changed();
    }
    main_loop.run_until_idle();
    log::info!(
        "after fling: {} of {ROWS} rows materialized",
        updater.store().map(|s| s.materialized_count()).unwrap_or(0)
    );

    // Sorting by balance reorders everything; the viewport snaps back
    // to the top and only the fresh initial window is loaded.
    let store = updater.store().expect("store attached");
    store.set_sort_column(1, SortOrder::Descending)?;
    updater.on_sorting_changed("balance", SortOrder::Descending);
    println!("-- sorted by balance, descending --");
    view.render(|account| format!("{:<14} {:>9.2}", account.holder, account.balance));

    let mut summary = LazySummary::new(
        Column::new("Balance")
            .attribute("balance")
            .data_type(DataType::Float),
    );
    summary.update_total(Some(total_balance));
    println!("{}", summary.text());

    println!(
        "materialized {} of {ROWS} rows over {} fetches; row height {} line(s)",
        store.materialized_count(),
        source.fetches().len(),
        updater.row_height(),
    );

    updater.detach();
    Ok(())
}
