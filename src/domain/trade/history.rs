//! Reassembly of complete trade histories across capped pages.
//!
//! A single `returnTradeHistory` page caps at 50 000 rows. A capped page is
//! chronologically contiguous — it covers an unbroken span of time with no
//! trades missing inside that span — so a full range can be reassembled by
//! re-querying the uncovered remainder(s) of the range until every window
//! comes back under the cap. Pages are merged by global trade id; two
//! distinct trades can share every visible field, so the tuple of fields is
//! never the identity.
//!
//! The assembler is generic over the page-fetch function, so the stitching
//! logic is exercised against synthetic transports in tests.

use super::Trade;
use crate::error::SdkError;
use std::collections::HashMap;
use std::future::Future;

/// Maximum rows the exchange returns for one history query.
pub(crate) const PAGE_CAP: usize = 50_000;

/// Fetch the complete set of trades with timestamps in `[start, end]`
/// (epoch seconds, inclusive).
///
/// `fetch(s, e)` must return every trade in `[s, e]`, up to `cap` rows.
/// An empty range returns no trades and performs no fetch. A fetch error
/// fails the whole assembly; no partial result is ever returned.
pub(crate) async fn assemble<F, Fut>(
    start: i64,
    end: i64,
    cap: usize,
    fetch: F,
) -> Result<Vec<Trade>, SdkError>
where
    F: Fn(i64, i64) -> Fut,
    Fut: Future<Output = Result<Vec<Trade>, SdkError>>,
{
    if start > end {
        return Ok(Vec::new());
    }

    let mut merged: HashMap<u64, Trade> = HashMap::new();
    let mut windows = vec![(start, end)];

    while let Some((s, e)) = windows.pop() {
        let page = fetch(s, e).await?;
        let capped = !page.is_empty() && page.len() >= cap;

        if capped {
            let min_ts = page.iter().map(|t| t.timestamp.timestamp()).min().unwrap();
            let max_ts = page.iter().map(|t| t.timestamp.timestamp()).max().unwrap();

            // Re-query the uncovered remainders. Boundary seconds are
            // included again — a second can be split across pages — and the
            // id-keyed merge absorbs the overlap. Every continuation window
            // must be strictly narrower than its parent; a capped page that
            // leaves none is stuck on a single over-dense second.
            let mut progressed = false;
            if s < min_ts && min_ts - s < e - s {
                windows.push((s, min_ts));
                progressed = true;
            }
            if max_ts < e && e - max_ts < e - s {
                windows.push((max_ts, e));
                progressed = true;
            }
            if !progressed {
                return Err(SdkError::Exchange {
                    code: None,
                    message: format!(
                        "trade history window [{s}, {e}] is capped at {cap} rows and cannot be subdivided"
                    ),
                });
            }
        }

        for trade in page {
            merged.insert(trade.global_id, trade);
        }
    }

    Ok(merged.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Side;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_trade(global_id: u64, ts: i64) -> Trade {
        Trade {
            global_id,
            trade_id: global_id,
            order_id: None,
            side: Side::Buy,
            subtype: None,
            pair: "ETH/BTC".parse().unwrap(),
            rate: "0.05".parse().unwrap(),
            amount: "1".parse().unwrap(),
            total: "0.05".parse().unwrap(),
            fee: None,
            timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
        }
    }

    /// One synthetic trade per second, global id == timestamp.
    fn universe(start: i64, end: i64) -> Vec<Trade> {
        (start..=end).map(|ts| make_trade(ts as u64, ts)).collect()
    }

    fn ids(trades: &[Trade]) -> Vec<u64> {
        let mut ids: Vec<u64> = trades.iter().map(|t| t.global_id).collect();
        ids.sort_unstable();
        ids
    }

    #[tokio::test]
    async fn test_empty_range_fetches_nothing() {
        let calls = AtomicUsize::new(0);
        let result = assemble(100, 99, 3, |_, _| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        })
        .await
        .unwrap();
        assert!(result.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sub_cap_page_is_complete() {
        let calls = AtomicUsize::new(0);
        let result = assemble(100, 101, 3, |s, e| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(universe(s, e)) }
        })
        .await
        .unwrap();
        assert_eq!(ids(&result), vec![100, 101]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_capped_pages_stitch_newest_first_transport() {
        // The transport returns the newest `cap` trades of the window, the
        // way the exchange saturates a too-wide range.
        let calls = AtomicUsize::new(0);
        let result = assemble(100, 107, 3, |s, e| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                let mut page = universe(s, e);
                page.reverse();
                page.truncate(3);
                Ok(page)
            }
        })
        .await
        .unwrap();
        // Every trade exactly once, boundary overlaps deduped by id.
        assert_eq!(ids(&result), (100..=107).collect::<Vec<_>>());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_capped_pages_stitch_oldest_first_transport() {
        let result = assemble(100, 107, 3, |s, e| async move {
            let mut page = universe(s, e);
            page.truncate(3);
            Ok(page)
        })
        .await
        .unwrap();
        assert_eq!(ids(&result), (100..=107).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_unsubdividable_capped_window_errors() {
        // Three trades sharing one timestamp, always at the cap: no
        // continuation window can shrink, so assembly must fail loudly
        // rather than spin or silently drop coverage.
        let result = assemble(100, 100, 3, |_, _| async {
            Ok(vec![
                make_trade(1, 100),
                make_trade(2, 100),
                make_trade(3, 100),
            ])
        })
        .await;
        assert!(matches!(result, Err(SdkError::Exchange { .. })));
    }

    #[tokio::test]
    async fn test_continuation_error_fails_whole_assembly() {
        let calls = AtomicUsize::new(0);
        let result = assemble(100, 107, 3, |s, e| {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    let mut page = universe(s, e);
                    page.reverse();
                    page.truncate(3);
                    Ok(page)
                } else {
                    Err(SdkError::Exchange {
                        code: None,
                        message: "boom".to_string(),
                    })
                }
            }
        })
        .await;
        assert!(matches!(result, Err(SdkError::Exchange { message, .. }) if message == "boom"));
    }
}
