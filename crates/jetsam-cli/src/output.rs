//! Table rendering for interactive output. Reports for unattended runs go
//! through `tracing`; these tables are for humans at a terminal.

use jetsam_core::{Transfer, human_size};

pub(crate) fn render_transfers(transfers: &[Transfer]) {
    println!(
        "{:>6} {:<60} {:<19} {:>10} {:>5} {:>7} STATUS",
        "ID", "NAME", "ADDED", "SIZE", "PROG", "RATIO"
    );
    for transfer in transfers {
        println!(
            "{:>6} {:<60.60} {:<19} {:>10} {:>4.0}% {:>7.2} {}",
            transfer.id,
            transfer.name,
            transfer.added_at.format("%Y-%m-%d %H:%M:%S"),
            human_size(transfer.total_size_bytes),
            transfer.progress * 100.0,
            transfer.ratio,
            transfer.status.as_str()
        );
    }
}

pub(crate) fn render_orphans(entries: &[(String, u64)]) {
    println!("{:<60} {:>10}", "ORPHAN", "SIZE");
    for (name, bytes) in entries {
        println!("{:<60.60} {:>10}", name, human_size(*bytes));
    }
}
