//! Transfer listing driver.

use jetsam_config::Config;
use jetsam_core::{Transfer, TransferSource as _};
use tracing::info;

use crate::cli::{CliResult, ListArgs, SortKey, build_client};
use crate::output;

pub(crate) async fn handle(config: &Config, args: ListArgs) -> CliResult<()> {
    let client = build_client(config)?;
    let mut transfers = client.list().await?;
    info!(transfers = transfers.len(), "fetched transfer list");

    sort_transfers(&mut transfers, args.sort);
    output::render_transfers(&transfers);
    Ok(())
}

/// Stable sort so that equal keys keep the daemon's ordering.
fn sort_transfers(transfers: &mut [Transfer], key: SortKey) {
    match key {
        SortKey::Id => transfers.sort_by_key(|transfer| transfer.id),
        SortKey::Name => transfers.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Size => {
            transfers.sort_by(|a, b| b.total_size_bytes.cmp(&a.total_size_bytes));
        }
        SortKey::Ratio => transfers.sort_by(|a, b| b.ratio.total_cmp(&a.ratio)),
        SortKey::Added => transfers.sort_by_key(|transfer| transfer.added_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use jetsam_core::{TransferId, TransferStatus};

    fn transfer(id: i64, name: &str, size: u64, ratio: f64, added: i64) -> Transfer {
        Transfer {
            id: TransferId(id),
            name: name.to_string(),
            total_size_bytes: size,
            ratio,
            added_at: Utc.timestamp_opt(added, 0).single().expect("valid timestamp"),
            progress: 1.0,
            status: TransferStatus::Seeding,
        }
    }

    fn fixture() -> Vec<Transfer> {
        vec![
            transfer(3, "bravo", 10, 1.5, 300),
            transfer(1, "alpha", 30, 0.5, 100),
            transfer(2, "charlie", 20, 2.5, 200),
        ]
    }

    fn ids(transfers: &[Transfer]) -> Vec<i64> {
        transfers.iter().map(|transfer| transfer.id.0).collect()
    }

    #[test]
    fn sorts_by_id_ascending() {
        let mut transfers = fixture();
        sort_transfers(&mut transfers, SortKey::Id);
        assert_eq!(ids(&transfers), vec![1, 2, 3]);
    }

    #[test]
    fn sorts_by_name_ascending() {
        let mut transfers = fixture();
        sort_transfers(&mut transfers, SortKey::Name);
        assert_eq!(ids(&transfers), vec![1, 3, 2]);
    }

    #[test]
    fn sorts_by_size_largest_first() {
        let mut transfers = fixture();
        sort_transfers(&mut transfers, SortKey::Size);
        assert_eq!(ids(&transfers), vec![1, 2, 3]);
    }

    #[test]
    fn sorts_by_ratio_highest_first() {
        let mut transfers = fixture();
        sort_transfers(&mut transfers, SortKey::Ratio);
        assert_eq!(ids(&transfers), vec![2, 3, 1]);
    }

    #[test]
    fn sorts_by_added_oldest_first() {
        let mut transfers = fixture();
        sort_transfers(&mut transfers, SortKey::Added);
        assert_eq!(ids(&transfers), vec![1, 2, 3]);
    }

    #[test]
    fn equal_ratios_keep_input_order() {
        let mut transfers = vec![
            transfer(9, "first", 10, 2.0, 100),
            transfer(4, "second", 10, 2.0, 200),
        ];
        sort_transfers(&mut transfers, SortKey::Ratio);
        assert_eq!(ids(&transfers), vec![9, 4]);
    }
}
