//! Timer semantics for the lobby refresher, under paused tokio time.

use std::time::Duration;

use tokio::sync::mpsc;
use whisperline_app::{LobbyRefresher, RefreshTick};

const INTERVAL: Duration = Duration::from_secs(5);

/// Advance virtual time and give the timer task a chance to run.
async fn advance(duration: Duration) {
    tokio::time::advance(duration).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

fn drain(rx: &mut mpsc::Receiver<RefreshTick>) -> usize {
    let mut count = 0;
    while rx.try_recv().is_ok() {
        count += 1;
    }
    count
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_interval() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut refresher = LobbyRefresher::with_interval(INTERVAL);
    refresher.start(tx);

    advance(INTERVAL).await;
    assert_eq!(drain(&mut rx), 1);

    advance(INTERVAL).await;
    advance(INTERVAL).await;
    assert_eq!(drain(&mut rx), 2);
}

#[tokio::test(start_paused = true)]
async fn no_tick_before_the_first_interval() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut refresher = LobbyRefresher::with_interval(INTERVAL);
    refresher.start(tx);

    advance(INTERVAL / 2).await;
    assert_eq!(drain(&mut rx), 0);
}

#[tokio::test(start_paused = true)]
async fn cancelled_timer_issues_zero_further_ticks() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut refresher = LobbyRefresher::with_interval(INTERVAL);
    refresher.start(tx);

    advance(INTERVAL).await;
    assert_eq!(drain(&mut rx), 1);

    refresher.cancel();
    assert!(!refresher.is_running());

    // Wait multiple intervals: nothing more arrives.
    for _ in 0..4 {
        advance(INTERVAL).await;
    }
    assert_eq!(drain(&mut rx), 0);
}

#[tokio::test(start_paused = true)]
async fn double_start_does_not_double_schedule() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut refresher = LobbyRefresher::with_interval(INTERVAL);
    refresher.start(tx.clone());
    refresher.start(tx);

    advance(INTERVAL).await;
    assert_eq!(drain(&mut rx), 1, "a doubled timer would tick twice per interval");
}

#[tokio::test(start_paused = true)]
async fn double_cancel_is_a_no_op() {
    let (tx, _rx) = mpsc::channel(16);
    let mut refresher = LobbyRefresher::with_interval(INTERVAL);
    refresher.start(tx);

    refresher.cancel();
    refresher.cancel();
    assert!(!refresher.is_running());
}

#[tokio::test(start_paused = true)]
async fn restart_after_cancel_resumes_ticking() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut refresher = LobbyRefresher::with_interval(INTERVAL);

    refresher.start(tx.clone());
    refresher.cancel();
    refresher.start(tx);
    assert!(refresher.is_running());

    advance(INTERVAL).await;
    assert_eq!(drain(&mut rx), 1);
}
